//! Integration tests for Shilpini.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shilpini-integration-tests
//! ```
//!
//! Apart from the ignored `database` tests, none of these need a running
//! database: routers are built over a lazily connected pool and an in-memory
//! session store, and only routes that answer before touching the pool are
//! exercised.
//!
//! # Test Categories
//!
//! - `order_pipeline` - Admin catalog input through cart to a composed order
//! - `http_surface` - Both routers side by side (sessions, auth, errors)
//! - `database` - Order numbering and settings against `TEST_DATABASE_URL` (ignored by default)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};

use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connection string that is never dialed.
pub const TEST_DATABASE_URL: &str = "postgres://localhost/shilpini_test";

/// A pool that connects on first use.
///
/// # Panics
///
/// Panics if [`TEST_DATABASE_URL`] cannot be parsed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy(TEST_DATABASE_URL)
        .expect("valid test database url")
}

/// Storefront configuration for tests (no SMTP, no Sentry).
#[must_use]
pub fn storefront_config() -> shilpini_storefront::config::StorefrontConfig {
    shilpini_storefront::config::StorefrontConfig {
        database_url: SecretString::from(TEST_DATABASE_URL),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        email: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Admin configuration for tests (no ImgBB key, no Sentry).
#[must_use]
pub fn admin_config() -> shilpini_admin::config::AdminConfig {
    shilpini_admin::config::AdminConfig {
        database_url: SecretString::from(TEST_DATABASE_URL),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3001,
        base_url: "http://localhost:3001".to_string(),
        imgbb_api_key: None,
        json_logs: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

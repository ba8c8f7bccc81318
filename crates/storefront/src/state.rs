//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::email::EmailService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    email: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Order notification email is enabled when the configuration carries an
    /// SMTP block and the transport can be built; otherwise it is disabled
    /// and a message is logged.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let email = match &config.email {
            Some(email_config) => match EmailService::new(email_config) {
                Ok(service) => Some(service),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to configure SMTP, order emails disabled");
                    None
                }
            },
            None => {
                tracing::info!("SMTP not configured, order notification emails disabled");
                None
            }
        };

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                email,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the order notification mailer, if email is enabled.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }
}

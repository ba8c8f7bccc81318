//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::imgbb::ImgbbClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    imgbb: ImgbbClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        if config.imgbb_api_key.is_none() {
            tracing::warn!("IMGBB_API_KEY not set, image uploads will fail");
        }
        let imgbb = ImgbbClient::new(config.imgbb_api_key.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                imgbb,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the image host client.
    #[must_use]
    pub fn imgbb(&self) -> &ImgbbClient {
        &self.inner.imgbb
    }
}

//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::AdminConfig,
    metrics::MetricsClient,
    shopify::{AdminClient, AdminShopifyError},
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    metrics: MetricsClient,
    shopify: AdminClient,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the Shopify client cannot be configured.
    pub fn new(config: &AdminConfig) -> Result<Self, AdminShopifyError> {
        let metrics = MetricsClient::new(&config.translation_server);
        let shopify = AdminClient::new(&config.shopify)?;
        Ok(Self::from_parts(metrics, shopify))
    }

    /// Build state from already-constructed clients.
    #[must_use]
    pub fn from_parts(metrics: MetricsClient, shopify: AdminClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                metrics,
                shopify,
            }),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &MetricsClient {
        &self.inner.metrics
    }

    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }
}

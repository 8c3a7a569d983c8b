//! Integration tests for ImageLingo.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p imagelingo-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_metrics_client` - Remote metrics client against a mock translation server
//! - `admin_routes` - Router tests with mock Shopify and translation servers
//!
//! No external services are required; every peer is a `mockito` server.

#![allow(clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use imagelingo_admin::{
    config::{AdminConfig, ShopifyAdminConfig, TranslationServerConfig},
    metrics::MetricsClient,
    routes,
    shopify::AdminClient,
    state::AppState,
};
use secrecy::SecretString;
use url::Url;

pub const TEST_STORE: &str = "test-shop.myshopify.com";
pub const TEST_API_VERSION: &str = "2026-01";

/// Path the mock Shopify server serves GraphQL on.
#[must_use]
pub fn graphql_path() -> String {
    format!("/admin/api/{TEST_API_VERSION}/graphql.json")
}

/// Admin configuration pointing the translation server at `server_url`.
#[must_use]
pub fn test_config(server_url: &str) -> AdminConfig {
    AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        translation_server: TranslationServerConfig::new(server_url).unwrap(),
        shopify: ShopifyAdminConfig {
            store: TEST_STORE.to_string(),
            api_version: TEST_API_VERSION.to_string(),
            access_token: SecretString::from("shpat_integration_test_token"),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Application state wired to two mock servers.
#[must_use]
pub fn test_state(translation_url: &str, shopify_url: &str) -> AppState {
    let config = test_config(translation_url);
    let metrics = MetricsClient::new(&config.translation_server);

    let endpoint = Url::parse(&format!("{shopify_url}{}", graphql_path())).unwrap();
    let shopify =
        AdminClient::with_endpoint(endpoint, TEST_STORE, &config.shopify.access_token).unwrap();

    AppState::from_parts(metrics, shopify)
}

/// The admin router with state applied.
#[must_use]
pub fn test_router(translation_url: &str, shopify_url: &str) -> Router {
    routes::routes().with_state(test_state(translation_url, shopify_url))
}

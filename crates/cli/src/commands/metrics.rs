//! Translation server metrics commands.
//!
//! # Usage
//!
//! ```bash
//! il-cli metrics quota -s demo.myshopify.com
//! il-cli metrics quality -s demo.myshopify.com --source en
//! il-cli metrics conversion -s demo.myshopify.com -l en -l fr --days 7
//! ```
//!
//! # Environment Variables
//!
//! - `SERVER_URL` - Translation server base URL
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Token for `untranslated` when `--access-token` is not given
//!
//! Every command prints the server's JSON body on success, or the fixed
//! failure record when the request fails.

use imagelingo_admin::{
    config::TranslationServerConfig,
    metrics::{
        ConversionDataParams, MetricsClient, QualityScoreParams, RealTimeQuotaParams,
        RemoteResponse, StoreLanguageParams, UnTranslatedWordsParams,
    },
};
use imagelingo_core::ShopDomain;
use secrecy::SecretString;

use super::CliError;

fn client() -> Result<MetricsClient, CliError> {
    let client = MetricsClient::new(&TranslationServerConfig::from_env()?);
    tracing::debug!(base_url = %client.base_url(), "Using translation server");
    Ok(client)
}

#[allow(clippy::print_stdout)]
fn print_response(response: &RemoteResponse) -> Result<(), CliError> {
    if let Some(cause) = response.failure_cause() {
        tracing::warn!(kind = cause.kind(), error = %cause, "Translation server request failed");
    }
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

/// Untranslated character count.
pub async fn untranslated(
    shop: ShopDomain,
    module: String,
    source: String,
    access_token: Option<String>,
) -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let access_token = access_token
        .or_else(|| std::env::var("SHOPIFY_ADMIN_ACCESS_TOKEN").ok())
        .ok_or(CliError::MissingInput(
            "access token (--access-token or SHOPIFY_ADMIN_ACCESS_TOKEN)",
        ))?;

    let params = UnTranslatedWordsParams {
        shop,
        module,
        access_token: SecretString::from(access_token),
        source,
    };

    print_response(&client()?.get_untranslated_words(&params).await)
}

/// Conversion report for the given store languages.
pub async fn conversion(
    shop: ShopDomain,
    store_language: Vec<String>,
    day_data: u32,
) -> Result<(), CliError> {
    let params = ConversionDataParams {
        shop,
        store_language,
        day_data,
    };

    print_response(&client()?.get_conversion_data(&params).await)
}

/// Translation status per store language.
pub async fn languages(shop: ShopDomain, source: String) -> Result<(), CliError> {
    let params = StoreLanguageParams { shop, source };
    print_response(&client()?.get_store_language(&params).await)
}

/// Real-time quota switches.
pub async fn quota(shop: ShopDomain) -> Result<(), CliError> {
    let params = RealTimeQuotaParams { shop };
    print_response(&client()?.get_real_time_quota_data(&params).await)
}

/// Translation quality score.
pub async fn quality(shop: ShopDomain, source: String) -> Result<(), CliError> {
    let params = QualityScoreParams { shop, source };
    print_response(&client()?.get_translation_quality_score(&params).await)
}

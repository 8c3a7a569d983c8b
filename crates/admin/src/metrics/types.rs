//! Request parameters for the translation server endpoints.
//!
//! Field names deserialize from camelCase so the metrics proxy routes can
//! accept the same JSON the embedded app sends.

use imagelingo_core::ShopDomain;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Parameters for [`super::MetricsClient::get_untranslated_words`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnTranslatedWordsParams {
    pub shop: ShopDomain,
    /// Translation module tag, sent as `modelType`.
    pub module: String,
    /// Shopify access token forwarded in the request body.
    #[serde(deserialize_with = "secret_from_string")]
    pub access_token: SecretString,
    /// Source language/locale.
    pub source: String,
}

/// Parameters for [`super::MetricsClient::get_conversion_data`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionDataParams {
    pub shop: ShopDomain,
    /// Published store languages to report on.
    pub store_language: Vec<String>,
    /// Report window in days.
    pub day_data: u32,
}

/// Parameters for [`super::MetricsClient::get_store_language`].
#[derive(Debug, Clone, Deserialize)]
pub struct StoreLanguageParams {
    pub shop: ShopDomain,
    pub source: String,
}

/// Parameters for [`super::MetricsClient::get_real_time_quota_data`].
#[derive(Debug, Clone, Deserialize)]
pub struct RealTimeQuotaParams {
    pub shop: ShopDomain,
}

/// Parameters for [`super::MetricsClient::get_translation_quality_score`].
#[derive(Debug, Clone, Deserialize)]
pub struct QualityScoreParams {
    pub shop: ShopDomain,
    pub source: String,
}

fn secret_from_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

//! HTTP client for the translation server.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

use super::{
    ConversionDataParams, MetricsError, QualityScoreParams, RealTimeQuotaParams, RemoteResponse,
    StoreLanguageParams, UnTranslatedWordsParams,
};
use crate::config::TranslationServerConfig;

const UNTRANSLATED_WORDS_PATH: &str = "/shopify/getUnTranslatedToken";
const CONVERSION_DATA_PATH: &str = "/getUserDataReport";
const STORE_LANGUAGE_PATH: &str = "/rating/getTranslationStatus";
const REAL_TIME_QUOTA_PATH: &str = "/rating/getDBConfiguration";
const QUALITY_SCORE_PATH: &str = "/rating/getRatingInfo";

/// Translation server metrics client.
///
/// Each operation issues exactly one POST. There are no retries and no
/// client-side timeout beyond `reqwest`'s defaults.
#[derive(Clone)]
pub struct MetricsClient {
    inner: Arc<MetricsClientInner>,
}

struct MetricsClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl MetricsClient {
    /// Create a client for the configured server.
    #[must_use]
    pub fn new(config: &TranslationServerConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(config: &TranslationServerConfig, client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(MetricsClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// The server base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Normalized operations
    // =========================================================================

    /// Untranslated character count for a module/source pair.
    #[instrument(skip(self, params), fields(shop = %params.shop, module = %params.module, source = %params.source))]
    pub async fn get_untranslated_words(&self, params: &UnTranslatedWordsParams) -> RemoteResponse {
        RemoteResponse::settle(
            "get_untranslated_words",
            self.try_get_untranslated_words(params).await,
        )
    }

    /// Web-pixel conversion report for the given languages and window.
    #[instrument(skip(self, params), fields(shop = %params.shop, day_data = params.day_data))]
    pub async fn get_conversion_data(&self, params: &ConversionDataParams) -> RemoteResponse {
        RemoteResponse::settle(
            "get_conversion_data",
            self.try_get_conversion_data(params).await,
        )
    }

    /// Translation status per store language.
    #[instrument(skip(self, params), fields(shop = %params.shop, source = %params.source))]
    pub async fn get_store_language(&self, params: &StoreLanguageParams) -> RemoteResponse {
        RemoteResponse::settle(
            "get_store_language",
            self.try_get_store_language(params).await,
        )
    }

    /// The four real-time translation quota switches.
    #[instrument(skip(self, params), fields(shop = %params.shop))]
    pub async fn get_real_time_quota_data(&self, params: &RealTimeQuotaParams) -> RemoteResponse {
        RemoteResponse::settle(
            "get_real_time_quota_data",
            self.try_get_real_time_quota_data(params).await,
        )
    }

    /// Translation quality score and its breakdown.
    #[instrument(skip(self, params), fields(shop = %params.shop, source = %params.source))]
    pub async fn get_translation_quality_score(
        &self,
        params: &QualityScoreParams,
    ) -> RemoteResponse {
        RemoteResponse::settle(
            "get_translation_quality_score",
            self.try_get_translation_quality_score(params).await,
        )
    }

    // =========================================================================
    // Fallible operations
    // =========================================================================

    /// Like [`Self::get_untranslated_words`], keeping the error.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn try_get_untranslated_words(
        &self,
        params: &UnTranslatedWordsParams,
    ) -> Result<Value, MetricsError> {
        let url = self.endpoint(
            UNTRANSLATED_WORDS_PATH,
            &[
                ("shopName", params.shop.as_str()),
                ("source", &params.source),
                ("modelType", &params.module),
            ],
        )?;
        let body = json!({ "accessToken": params.access_token.expose_secret() });
        self.post(url, Some(&body)).await
    }

    /// Like [`Self::get_conversion_data`], keeping the error.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn try_get_conversion_data(
        &self,
        params: &ConversionDataParams,
    ) -> Result<Value, MetricsError> {
        let url = self.endpoint(CONVERSION_DATA_PATH, &[("shopName", params.shop.as_str())])?;
        let body = conversion_body(params, Utc::now());
        self.post(url, Some(&body)).await
    }

    /// Like [`Self::get_store_language`], keeping the error.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn try_get_store_language(
        &self,
        params: &StoreLanguageParams,
    ) -> Result<Value, MetricsError> {
        let url = self.endpoint(
            STORE_LANGUAGE_PATH,
            &[("shopName", params.shop.as_str()), ("source", &params.source)],
        )?;
        self.post(url, None).await
    }

    /// Like [`Self::get_real_time_quota_data`], keeping the error.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn try_get_real_time_quota_data(
        &self,
        params: &RealTimeQuotaParams,
    ) -> Result<Value, MetricsError> {
        let url = self.endpoint(REAL_TIME_QUOTA_PATH, &[("shopName", params.shop.as_str())])?;
        self.post(url, None).await
    }

    /// Like [`Self::get_translation_quality_score`], keeping the error.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn try_get_translation_quality_score(
        &self,
        params: &QualityScoreParams,
    ) -> Result<Value, MetricsError> {
        let url = self.endpoint(
            QUALITY_SCORE_PATH,
            &[("shopName", params.shop.as_str()), ("source", &params.source)],
        )?;
        self.post(url, None).await
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Append `path` to the base URL and set the query string.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, MetricsError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                MetricsError::InvalidUrl(format!("{} cannot be a base", self.inner.base_url))
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send one POST and decode the JSON body.
    async fn post(&self, url: Url, body: Option<&Value>) -> Result<Value, MetricsError> {
        tracing::debug!(url = %url.path(), "POST translation server");

        let mut request = self.inner.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetricsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for MetricsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Body for the conversion report, stamped with `now`.
fn conversion_body(params: &ConversionDataParams, now: DateTime<Utc>) -> Value {
    json!({
        "storeLanguage": params.store_language,
        "dayData": params.day_data,
        "timestamp": now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use imagelingo_core::ShopDomain;
    use mockito::{Matcher, Server};
    use secrecy::SecretString;

    use super::*;

    fn client_for(url: &str) -> MetricsClient {
        MetricsClient::new(&TranslationServerConfig::new(url).unwrap())
    }

    fn shop(s: &str) -> ShopDomain {
        ShopDomain::parse(s).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client_for("https://api.example.org/v1/");
        let url = client
            .endpoint(QUALITY_SCORE_PATH, &[("shopName", "a.myshopify.com"), ("source", "en")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.org/v1/rating/getRatingInfo?shopName=a.myshopify.com&source=en"
        );
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let client = client_for("http://localhost:8080");
        let url = client
            .endpoint(STORE_LANGUAGE_PATH, &[("shopName", "a&b"), ("source", "zh CN")])
            .unwrap();
        assert_eq!(url.query(), Some("shopName=a%26b&source=zh+CN"));
    }

    #[test]
    fn test_conversion_body_timestamp_format() {
        let params = ConversionDataParams {
            shop: shop("demo.myshopify.com"),
            store_language: vec!["fr".to_string()],
            day_data: 30,
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let body = conversion_body(&params, now);
        assert_eq!(
            body,
            json!({
                "storeLanguage": ["fr"],
                "dayData": 30,
                "timestamp": "2025-03-04T05:06:07.000Z"
            })
        );
    }

    #[tokio::test]
    async fn test_untranslated_words_request_shape() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/shopify/getUnTranslatedToken")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("shopName".into(), "demo.myshopify.com".into()),
                Matcher::UrlEncoded("source".into(), "en".into()),
                Matcher::UrlEncoded("modelType".into(), "product".into()),
            ]))
            .match_body(Matcher::Json(json!({"accessToken": "shpat_abc"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"response":1234}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let response = client
            .get_untranslated_words(&UnTranslatedWordsParams {
                shop: shop("demo.myshopify.com"),
                module: "product".to_string(),
                access_token: SecretString::from("shpat_abc"),
                source: "en".to_string(),
            })
            .await;

        mock.assert_async().await;
        assert_eq!(response.into_json(), json!({"success": true, "response": 1234}));
    }

    #[tokio::test]
    async fn test_conversion_data_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/getUserDataReport")
            .match_query(Matcher::UrlEncoded("shopName".into(), "demo.myshopify.com".into()))
            .match_body(Matcher::PartialJson(json!({
                "storeLanguage": ["fr", "de"],
                "dayData": 7
            })))
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let response = client
            .get_conversion_data(&ConversionDataParams {
                shop: shop("demo.myshopify.com"),
                store_language: vec!["fr".to_string(), "de".to_string()],
                day_data: 7,
            })
            .await;

        mock.assert_async().await;
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/rating/getTranslationStatus")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client
            .try_get_store_language(&StoreLanguageParams {
                shop: shop("x"),
                source: "en".to_string(),
            })
            .await;

        match result {
            Err(MetricsError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/rating/getDBConfiguration")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let response = client
            .get_real_time_quota_data(&RealTimeQuotaParams { shop: shop("x") })
            .await;

        assert!(matches!(
            response.failure_cause(),
            Some(MetricsError::Decode(_))
        ));
        assert_eq!(
            response.into_json(),
            json!({"success": false, "errorCode": 10001, "errorMsg": "SERVER_ERROR"})
        );
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/rating/getRatingInfo")
            .match_query(Matcher::Any)
            .with_status(200)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let response = client
            .get_translation_quality_score(&QualityScoreParams {
                shop: shop("x"),
                source: "en".to_string(),
            })
            .await;

        assert!(response.is_success());
        assert_eq!(response.into_json(), Value::Null);
    }
}

//! HTTP translation gateway client (reqwest).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use linguasync_core::error::{LinguaSyncError, Result};

use crate::config::TranslatorSection;

use super::Translator;

pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_langs: &'a [String],
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// Target language -> translated text. Languages the gateway could not
    /// serve are simply absent.
    #[serde(default)]
    translations: HashMap<String, String>,
}

impl HttpTranslator {
    pub fn from_config(cfg: &TranslatorSection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| LinguaSyncError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_langs: &[String],
    ) -> Result<HashMap<String, String>> {
        let mut req = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&TranslateRequest {
                text,
                source_lang,
                target_langs,
            });
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| LinguaSyncError::Translation(format!("translate request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(LinguaSyncError::Translation(format!(
                "translate request returned {}",
                resp.status()
            )));
        }

        let body: TranslateResponse = resp
            .json()
            .await
            .map_err(|e| LinguaSyncError::Translation(format!("translate response invalid: {e}")))?;
        Ok(body.translations)
    }

    async fn probe(&self) -> Result<()> {
        let resp = self
            .client
            .get(format!("{}/healthz", self.endpoint))
            .send()
            .await
            .map_err(|e| LinguaSyncError::Unreachable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(LinguaSyncError::Unreachable(format!(
                "health check returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn section(endpoint: &str, api_key: Option<&str>) -> TranslatorSection {
        TranslatorSection {
            endpoint: endpoint.to_string(),
            api_key: api_key.map(str::to_string),
            request_timeout_ms: 2000,
        }
    }

    #[tokio::test]
    async fn translate_returns_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_partial_json(serde_json::json!({
                "text": "hello",
                "sourceLang": "fr-FR",
                "targetLangs": ["es-ES"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": { "es-ES": "hola" }
            })))
            .mount(&server)
            .await;

        let t = HttpTranslator::from_config(&section(&server.uri(), None)).unwrap();
        let map = t
            .translate("hello", "fr-FR", &["es-ES".to_string()])
            .await
            .unwrap();
        assert_eq!(map.get("es-ES").map(String::as_str), Some("hola"));
    }

    #[tokio::test]
    async fn missing_language_key_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": {}
            })))
            .mount(&server)
            .await;

        let t = HttpTranslator::from_config(&section(&server.uri(), None)).unwrap();
        let map = t
            .translate("hello", "fr-FR", &["es-ES".to_string()])
            .await
            .unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn missing_translations_field_is_an_empty_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let t = HttpTranslator::from_config(&section(&server.uri(), None)).unwrap();
        let map = t
            .translate("hello", "en-US", &["es-ES".to_string()])
            .await
            .unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_a_translation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let t = HttpTranslator::from_config(&section(&server.uri(), None)).unwrap();
        let err = t
            .translate("hello", "fr-FR", &["es-ES".to_string()])
            .await
            .expect_err("must fail");
        assert!(matches!(err, LinguaSyncError::Translation(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn api_key_is_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(header("Authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let t = HttpTranslator::from_config(&section(&server.uri(), Some("s3cret"))).unwrap();
        t.translate("hi", "en-US", &["es-ES".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn probe_succeeds_on_healthy_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let t = HttpTranslator::from_config(&section(&server.uri(), None)).unwrap();
        assert!(t.probe().await.is_ok());
    }

    #[tokio::test]
    async fn probe_fails_when_gateway_is_down() {
        // Nothing is listening here.
        let t = HttpTranslator::from_config(&section("http://127.0.0.1:9", None)).unwrap();
        let err = t.probe().await.expect_err("must fail");
        assert!(matches!(err, LinguaSyncError::Unreachable(_)));
    }

    #[tokio::test]
    async fn probe_fails_on_unhealthy_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let t = HttpTranslator::from_config(&section(&server.uri(), None)).unwrap();
        assert!(t.probe().await.is_err());
    }

    #[tokio::test]
    async fn trailing_slash_in_endpoint_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let endpoint = format!("{}/", server.uri());
        let t = HttpTranslator::from_config(&section(&endpoint, None)).unwrap();
        assert!(t.probe().await.is_ok());
    }
}

use std::time::Duration;

use async_trait::async_trait;
use gatepass_types::Language;
use serde::{Deserialize, Serialize};

use crate::{ProviderMetadata, TranslateError, Translation, Translator, check_status, endpoint};

/// One public LibreTranslate-compatible instance
#[derive(Clone)]
pub struct MirrorTranslator {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct MirrorRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    api_key: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MirrorResponse {
    translated_text: Option<String>,
}

impl MirrorTranslator {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    /// One translator per configured base URL, in configuration order
    pub fn from_urls(urls: &[String], timeout: Duration) -> Vec<Self> {
        urls.iter()
            .map(|url| Self::new(url.clone(), timeout))
            .collect()
    }
}

#[async_trait]
impl Translator for MirrorTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &Language,
        to: &Language,
    ) -> Result<Translation, TranslateError> {
        let request = MirrorRequest {
            q: text,
            source: from.code(),
            target: to.code(),
            format: "text",
            api_key: "",
        };

        tracing::debug!("Mirror {} translating {} -> {}", self.base_url, from, to);
        let response = self
            .client
            .post(endpoint(&self.base_url, "translate"))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let response = check_status(response)?;

        let body: MirrorResponse = response.json().await.map_err(|e| {
            TranslateError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = body
            .translated_text
            .filter(|t| !t.trim().is_empty())
            .ok_or(TranslateError::EmptyTranslation)?;

        Ok(Translation {
            text: translated_text,
            from: from.clone(),
            to: to.clone(),
            provider: self.base_url.clone(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;
    use crate::test_support::serve;

    #[tokio::test]
    async fn posts_libretranslate_body() {
        let router = axum::Router::new().route(
            "/translate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["q"], "Welcome");
                assert_eq!(body["source"], "en");
                assert_eq!(body["target"], "am");
                assert_eq!(body["format"], "text");
                assert_eq!(body["api_key"], "");
                Json(json!({ "translatedText": "እንኳን ደህና መጣህ" }))
            }),
        );
        let url = serve(router).await;

        let mirror = MirrorTranslator::new(format!("{url}/"), Duration::from_secs(2));
        let result = mirror
            .translate("Welcome", &Language::english(), &Language::amharic())
            .await
            .unwrap();

        assert_eq!(result.text, "እንኳን ደህና መጣህ");
        assert_eq!(result.provider, format!("{url}/"));
    }

    #[tokio::test]
    async fn blank_translation_is_rejected() {
        let router = axum::Router::new().route(
            "/translate",
            post(|| async { Json(json!({ "translatedText": "  " })) }),
        );
        let url = serve(router).await;

        let result = MirrorTranslator::new(url, Duration::from_secs(2))
            .translate("Welcome", &Language::english(), &Language::amharic())
            .await;

        assert!(matches!(result, Err(TranslateError::EmptyTranslation)));
    }

    #[tokio::test]
    async fn rate_limit_status_is_mapped() {
        let router = axum::Router::new().route(
            "/translate",
            post(|| async { (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let url = serve(router).await;

        let result = MirrorTranslator::new(url, Duration::from_secs(2))
            .translate("Welcome", &Language::english(), &Language::amharic())
            .await;

        assert!(matches!(result, Err(TranslateError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn slow_instance_times_out() {
        let router = axum::Router::new().route(
            "/translate",
            post(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({ "translatedText": "late" }))
            }),
        );
        let url = serve(router).await;

        let result = MirrorTranslator::new(url, Duration::from_millis(50))
            .translate("Welcome", &Language::english(), &Language::amharic())
            .await;

        match result {
            Err(TranslateError::NetworkError(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other.map(|t| t.text)),
        }
    }

    #[test]
    fn from_urls_keeps_order() {
        let urls = vec!["http://one.test".to_string(), "http://two.test".to_string()];
        let mirrors = MirrorTranslator::from_urls(&urls, Duration::from_secs(1));
        let names: Vec<String> = mirrors.iter().map(|m| m.metadata().name).collect();
        assert_eq!(names, urls);
    }
}

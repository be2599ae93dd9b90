use std::time::Duration;

use async_trait::async_trait;
use gatepass_types::Language;
use serde::{Deserialize, Serialize};

use crate::{ProviderMetadata, TranslateError, Translation, Translator, check_status, endpoint};

/// The application's own backend translation endpoints
#[derive(Clone)]
pub struct BackendTranslator {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TextRequest<'a> {
    text: &'a str,
    target_language: &'a str,
    source_language: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRequest<'a> {
    texts: &'a [String],
    target_language: &'a str,
    source_language: &'a str,
}

#[derive(Deserialize)]
struct TextResponse {
    #[serde(default)]
    success: bool,
    translation: Option<String>,
}

#[derive(Deserialize)]
struct BatchResponse {
    #[serde(default)]
    success: bool,
    translations: Option<Vec<String>>,
}

impl BackendTranslator {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, TranslateError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = endpoint(&self.base_url, path);
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        let response = check_status(response)?;

        response
            .json::<R>()
            .await
            .map_err(|e| TranslateError::MalformedResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Translator for BackendTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &Language,
        to: &Language,
    ) -> Result<Translation, TranslateError> {
        let request = TextRequest {
            text,
            target_language: to.code(),
            source_language: from.code(),
        };

        let response: TextResponse = self.post("translate/text", &request).await?;

        let translation = match response {
            TextResponse {
                success: true,
                translation: Some(translation),
            } => translation,
            _ => {
                return Err(TranslateError::MalformedResponse(
                    "expected { success: true, translation }".to_string(),
                ));
            }
        };

        Ok(Translation {
            text: translation,
            from: from.clone(),
            to: to.clone(),
            provider: "backend".to_string(),
        })
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        from: &Language,
        to: &Language,
    ) -> Result<Vec<String>, TranslateError> {
        let request = BatchRequest {
            texts,
            target_language: to.code(),
            source_language: from.code(),
        };

        let response: BatchResponse = self.post("translate/batch", &request).await?;

        let translations = match response {
            BatchResponse {
                success: true,
                translations: Some(translations),
            } => translations,
            _ => {
                return Err(TranslateError::MalformedResponse(
                    "expected { success: true, translations }".to_string(),
                ));
            }
        };

        if translations.len() != texts.len() {
            return Err(TranslateError::BatchLengthMismatch {
                expected: texts.len(),
                got: translations.len(),
            });
        }

        Ok(translations)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "backend".to_string(),
        }
    }
}

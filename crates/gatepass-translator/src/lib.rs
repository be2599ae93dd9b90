use gatepass_types::Language;

pub mod backend;
pub mod mirror;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::BackendTranslator;
pub use mirror::MirrorTranslator;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: &Language,
        to: &Language,
    ) -> Result<Translation, TranslateError>;

    /// Translate several texts, answers in input order.
    ///
    /// Providers without a batch endpoint translate one element at a time and
    /// fail on the first error.
    async fn translate_batch(
        &self,
        texts: &[String],
        from: &Language,
        to: &Language,
    ) -> Result<Vec<String>, TranslateError> {
        let mut translations = Vec::with_capacity(texts.len());
        for text in texts {
            translations.push(self.translate(text, from, to).await?.text);
        }
        Ok(translations)
    }

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: Language,
    pub to: Language,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned an empty translation")]
    EmptyTranslation,

    #[error("Batch returned {got} translations for {expected} texts")]
    BatchLengthMismatch { expected: usize, got: usize },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Map non-success HTTP statuses onto provider errors
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TranslateError> {
    let status = response.status();

    if status == 429 {
        return Err(TranslateError::RateLimitExceeded);
    }

    if status == 403 {
        return Err(TranslateError::AuthenticationError);
    }

    if !status.is_success() {
        return Err(TranslateError::ApiError(format!("HTTP {}", status)));
    }

    Ok(response)
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

use serde::{Deserialize, Serialize};

fn default_backend_enabled() -> bool {
    true
}

fn default_backend_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_mirror_urls() -> Vec<String> {
    vec![
        "https://libretranslate.de".to_string(),
        "https://translate.argosopentech.com".to_string(),
        "https://translate.terraprint.co".to_string(),
    ]
}

fn default_batch_threshold() -> usize {
    5
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_backend_enabled")]
    pub backend_enabled: bool,
    /// Base URL of the application backend, without the `/translate` suffix
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_timeout_ms")]
    pub backend_timeout_ms: u64,
    /// Public LibreTranslate-compatible instances, tried in order
    #[serde(default = "default_mirror_urls")]
    pub mirror_urls: Vec<String>,
    /// Bound on each individual mirror attempt
    #[serde(default = "default_timeout_ms")]
    pub mirror_timeout_ms: u64,
    /// Batches larger than this go through the backend batch endpoint
    #[serde(default = "default_batch_threshold")]
    pub batch_threshold: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            backend_enabled: default_backend_enabled(),
            backend_url: default_backend_url(),
            backend_timeout_ms: default_timeout_ms(),
            mirror_urls: default_mirror_urls(),
            mirror_timeout_ms: default_timeout_ms(),
            batch_threshold: default_batch_threshold(),
        }
    }
}

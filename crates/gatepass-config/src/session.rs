use serde::{Deserialize, Serialize};

fn default_base_language() -> String {
    "en".to_string()
}

fn default_supported_languages() -> Vec<String> {
    vec!["en".to_string(), "am".to_string()]
}

fn default_storage_path() -> String {
    "gatepass-session.json".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Language UI literals are authored in
    #[serde(default = "default_base_language")]
    pub base_language: String,
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,
    /// Key/value file the selected language is persisted to
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_language: default_base_language(),
            supported_languages: default_supported_languages(),
            storage_path: default_storage_path(),
        }
    }
}

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::session::SessionConfig;
use self::translator::TranslatorConfig;

pub mod dictionary;
pub mod session;
pub mod translator;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub session: SessionConfig,
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load a JSON config file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("GATEPASS_BACKEND_URL") {
            self.translator.backend_url = url;
        }

        if let Some(mirrors) = lookup("GATEPASS_MIRRORS") {
            self.translator.mirror_urls = mirrors
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(timeout) = lookup("GATEPASS_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.translator.backend_timeout_ms = timeout;
            self.translator.mirror_timeout_ms = timeout;
        }

        if let Some(path) = lookup("GATEPASS_STORAGE_PATH") {
            self.session.storage_path = path;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.supported_languages.is_empty() {
            return Err(ConfigError::Invalid(
                "session.supported_languages is empty".to_string(),
            ));
        }

        let base = self.session.base_language.trim();
        if !self
            .session
            .supported_languages
            .iter()
            .any(|l| l.trim().eq_ignore_ascii_case(base))
        {
            return Err(ConfigError::Invalid(format!(
                "base language '{base}' is not in supported_languages"
            )));
        }

        Ok(())
    }
}

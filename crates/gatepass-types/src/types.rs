use serde::{Deserialize, Serialize};

/// Health of the translation pipeline as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationStatus {
    pub working: bool,
    pub error: Option<String>,
    pub offline_mode: bool,
}

impl TranslationStatus {
    pub fn healthy() -> Self {
        Self {
            working: true,
            error: None,
            offline_mode: false,
        }
    }

    /// Only local dictionary translation is believed to be available.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            working: false,
            error: Some(message.into()),
            offline_mode: true,
        }
    }
}

impl Default for TranslationStatus {
    fn default() -> Self {
        Self::healthy()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// The base (source) language is active; translation is a no-op.
    BaseActive,
    Healthy,
    Degraded,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    ChangeLanguage(String),
    Translate(String),
    TranslateMany(Vec<String>),
    RefreshTranslation,
    ShowStatus,
    Output(String),
    Quit,
}

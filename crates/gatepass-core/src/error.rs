use crate::dictionary::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] LoadError),
}

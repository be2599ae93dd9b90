use std::fmt;

use serde::{Deserialize, Serialize};

/// ISO 639-1 language code, always stored lower-case.
///
/// The set of languages the application recognises is configuration, not
/// code: any code can be represented, and the session decides whether it is
/// supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub const ENGLISH: &'static str = "en";
    pub const AMHARIC: &'static str = "am";

    /// Normalize a user supplied code (`" AM "` -> `am`). Returns `None` for
    /// empty input.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        Some(Self(code.to_lowercase()))
    }

    pub fn english() -> Self {
        Self(Self::ENGLISH.to_string())
    }

    pub fn amharic() -> Self {
        Self(Self::AMHARIC.to_string())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is(&self, code: &str) -> bool {
        self.0.eq_ignore_ascii_case(code.trim())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code).ok_or_else(|| "empty language code".to_string())
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Language::parse(" AM "), Some(Language::amharic()));
        assert_eq!(Language::parse("En"), Some(Language::english()));
        assert_eq!(Language::parse("   "), None);
    }

    #[test]
    fn serializes_as_plain_code() {
        let json = serde_json::to_string(&Language::amharic()).unwrap();
        assert_eq!(json, "\"am\"");
        let back: Language = serde_json::from_str("\"en\"").unwrap();
        assert!(back.is("EN"));
    }

    #[test]
    fn deserializing_normalizes_the_code() {
        let back: Language = serde_json::from_str("\" EN \"").unwrap();
        assert_eq!(back, Language::english());
        assert_eq!(back.code(), "en");

        assert!(serde_json::from_str::<Language>("\"  \"").is_err());
    }
}

use std::collections::HashMap;
use std::path::Path;

use gatepass_types::Language;
use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Phrase pairs for one language direction, in authoring order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseTable {
    pub from: Language,
    pub to: Language,
    #[serde(default)]
    pub phrases: Vec<Phrase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub source: String,
    pub target: String,
}

impl PhraseTable {
    pub fn new(from: Language, to: Language) -> Self {
        Self {
            from,
            to,
            phrases: Vec::new(),
        }
    }

    /// Load a phrase table from JSON
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json_str).map_err(|e| LoadError::ParseError(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add a phrase, replacing the target of an existing source in place
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.phrases.iter_mut().find(|p| p.source == source) {
            Some(existing) => existing.target = target,
            None => self.phrases.push(Phrase { source, target }),
        }
    }

    pub fn with(mut self, source: &str, target: &str) -> Self {
        self.insert(source, target);
        self
    }

    /// Merge another table into this one; phrases from `other` override
    /// existing ones with the same source
    pub fn merge(mut self, other: PhraseTable) -> Result<Self, LoadError> {
        if other.from != self.from || other.to != self.to {
            return Err(LoadError::InvalidFormat(format!(
                "cannot merge {}->{} table into {}->{}",
                other.from, other.to, self.from, self.to
            )));
        }

        for phrase in other.phrases {
            self.insert(phrase.source, phrase.target);
        }

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// One lookup direction: exact index plus precompiled substring patterns in
/// insertion order.
#[derive(Default)]
struct PhraseMap {
    exact: HashMap<String, String>,
    order: Vec<String>,
}

impl PhraseMap {
    fn insert(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            return;
        }
        if self.exact.insert(key.to_string(), value.to_string()).is_none() {
            self.order.push(key.to_string());
        }
    }

    fn patterns(&self) -> Vec<(Regex, String)> {
        self.order
            .iter()
            .filter_map(|key| {
                let pattern = RegexBuilder::new(&regex::escape(key))
                    .case_insensitive(true)
                    .build();
                match pattern {
                    Ok(re) => Some((re, self.exact[key].clone())),
                    Err(e) => {
                        tracing::warn!("Skipping phrase '{}' for substring matching: {}", key, e);
                        None
                    }
                }
            })
            .collect()
    }
}

struct Direction {
    phrases: PhraseMap,
    patterns: Vec<(Regex, String)>,
}

impl Direction {
    fn new(phrases: PhraseMap) -> Self {
        let patterns = phrases.patterns();
        Self { phrases, patterns }
    }
}

/// Fixed bilingual phrase dictionary.
///
/// Built once from a forward table; the reverse direction is its inversion,
/// so when two forward phrases share a translation the one inverted last
/// wins.
pub struct StaticDictionary {
    from: Language,
    to: Language,
    forward: Direction,
    reverse: Direction,
}

impl StaticDictionary {
    pub fn new(table: &PhraseTable) -> Self {
        let mut forward = PhraseMap::default();
        let mut reverse = PhraseMap::default();

        for phrase in &table.phrases {
            forward.insert(&phrase.source, &phrase.target);
        }
        for key in &forward.order {
            reverse.insert(&forward.exact[key], key);
        }

        tracing::debug!(
            "Built {}<->{} dictionary: {} forward, {} reverse phrases",
            table.from,
            table.to,
            forward.order.len(),
            reverse.order.len()
        );

        Self {
            from: table.from.clone(),
            to: table.to.clone(),
            forward: Direction::new(forward),
            reverse: Direction::new(reverse),
        }
    }

    /// Dictionary with no phrases; every lookup misses
    pub fn empty(from: Language, to: Language) -> Self {
        Self::new(&PhraseTable::new(from, to))
    }

    pub fn languages(&self) -> (&Language, &Language) {
        (&self.from, &self.to)
    }

    /// Whether this dictionary translates between `source` and `target`
    pub fn covers(&self, source: &Language, target: &Language) -> bool {
        (source == &self.from && target == &self.to) || (source == &self.to && target == &self.from)
    }

    fn direction(&self, source: &Language) -> Option<&Direction> {
        if source == &self.from {
            Some(&self.forward)
        } else if source == &self.to {
            Some(&self.reverse)
        } else {
            None
        }
    }

    /// Case-sensitive whole-phrase match
    pub fn lookup_exact(&self, source: &Language, text: &str) -> Option<String> {
        self.direction(source)?.phrases.exact.get(text).cloned()
    }

    /// Replace every occurrence (ignoring case) of the first known phrase
    /// found in `text`
    pub fn lookup_substring(&self, source: &Language, text: &str) -> Option<String> {
        let direction = self.direction(source)?;
        direction
            .patterns
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(re, translation)| {
                re.replace_all(text, NoExpand(translation.as_str()))
                    .into_owned()
            })
    }

    /// Replace each space-separated word that has an exact entry. Never
    /// fails; unknown words pass through untouched.
    pub fn lookup_word_by_word(&self, source: &Language, text: &str) -> String {
        let Some(direction) = self.direction(source) else {
            return text.to_string();
        };

        text.split(' ')
            .map(|word| {
                direction
                    .phrases
                    .exact
                    .get(word)
                    .map(String::as_str)
                    .unwrap_or(word)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.forward.phrases.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

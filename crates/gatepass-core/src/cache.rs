use std::collections::HashMap;

use gatepass_types::Language;
use tokio::sync::RwLock;

/// Memo table of resolved translations, one sub-map per target language.
///
/// Keys are the exact source text: no case folding or whitespace
/// normalization. Entries live until `clear`.
#[derive(Default)]
pub struct TranslationCache {
    entries: RwLock<HashMap<Language, HashMap<String, String>>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, target: &Language, text: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries.get(target)?.get(text).cloned()
    }

    pub async fn put(&self, target: &Language, text: &str, translation: &str) {
        let mut entries = self.entries.write().await;
        entries
            .entry(target.clone())
            .or_default()
            .insert(text.to_string(), translation.to_string());
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let dropped: usize = entries.values().map(HashMap::len).sum();
        entries.clear();
        tracing::debug!("Translation cache cleared ({} entries)", dropped);
    }

    /// Number of entries across every target language
    pub async fn len(&self) -> usize {
        self.entries.read().await.values().map(HashMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_is_exact() {
        let cache = TranslationCache::new();
        let am = Language::amharic();
        cache.put(&am, "Visitor", "ጎብኚ").await;

        assert_eq!(cache.get(&am, "Visitor").await.as_deref(), Some("ጎብኚ"));
        assert_eq!(cache.get(&am, "visitor").await, None);
        assert_eq!(cache.get(&am, "Visitor ").await, None);
        assert_eq!(cache.get(&Language::english(), "Visitor").await, None);
    }

    #[tokio::test]
    async fn put_overwrites() {
        let cache = TranslationCache::new();
        let am = Language::amharic();
        cache.put(&am, "Visit", "first").await;
        cache.put(&am, "Visit", "ጉብኝት").await;

        assert_eq!(cache.get(&am, "Visit").await.as_deref(), Some("ጉብኝት"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn clear_empties_every_language() {
        let cache = TranslationCache::new();
        cache.put(&Language::amharic(), "Visit", "ጉብኝት").await;
        cache.put(&Language::english(), "ጉብኝት", "Visit").await;
        assert_eq!(cache.len().await, 2);

        cache.clear().await;

        assert!(cache.is_empty().await);
        assert_eq!(cache.get(&Language::amharic(), "Visit").await, None);
    }
}

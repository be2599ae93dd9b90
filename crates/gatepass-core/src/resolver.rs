use std::sync::Arc;

use async_trait::async_trait;
use gatepass_translator::Translator;
use gatepass_types::Language;

use crate::cache::TranslationCache;
use crate::dictionary::StaticDictionary;
use crate::error::CoreError;

/// Which tier of the fallback chain produced a translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedBy {
    Identity,
    Cache,
    DictionaryExact,
    Provider(String),
    DictionarySubstring,
    WordByWord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub text: String,
    pub resolved_by: ResolvedBy,
    /// Network providers that were tried and failed before `resolved_by`
    pub failures: Vec<ProviderFailure>,
}

impl Resolution {
    fn new(text: String, resolved_by: ResolvedBy) -> Self {
        Self {
            text,
            resolved_by,
            failures: Vec::new(),
        }
    }

    pub fn identity(text: &str) -> Self {
        Self::new(text.to_string(), ResolvedBy::Identity)
    }

    /// True when a network provider or the exact dictionary answered
    pub fn is_full_translation(&self) -> bool {
        matches!(
            self.resolved_by,
            ResolvedBy::Cache | ResolvedBy::DictionaryExact | ResolvedBy::Provider(_)
        )
    }
}

/// Something that turns source text into target-language text.
#[async_trait]
pub trait TextResolver: Send + Sync {
    async fn resolve(
        &self,
        text: &str,
        target: &Language,
        source: &Language,
    ) -> Result<Resolution, CoreError>;

    /// Resolve every element independently, answers in input order
    async fn resolve_batch(
        &self,
        texts: &[String],
        target: &Language,
        source: &Language,
    ) -> Vec<Result<Resolution, CoreError>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.resolve(text, target, source).await);
        }
        results
    }

    async fn clear_cache(&self);
}

/// Ordered translation chain: cache, exact dictionary phrase, backend,
/// public mirrors, dictionary substring, word-by-word.
///
/// Remote answers and exact phrases are written through to the cache;
/// substring and word-by-word results are not.
pub struct FallbackResolver {
    cache: Arc<TranslationCache>,
    dictionary: Arc<StaticDictionary>,
    backend: Option<Arc<dyn Translator>>,
    mirrors: Vec<Arc<dyn Translator>>,
    batch_threshold: usize,
}

impl FallbackResolver {
    pub fn new(cache: Arc<TranslationCache>, dictionary: Arc<StaticDictionary>) -> Self {
        Self {
            cache,
            dictionary,
            backend: None,
            mirrors: Vec::new(),
            batch_threshold: 5,
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn Translator>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_mirrors(mut self, mirrors: Vec<Arc<dyn Translator>>) -> Self {
        self.mirrors = mirrors;
        self
    }

    pub fn with_batch_threshold(mut self, batch_threshold: usize) -> Self {
        self.batch_threshold = batch_threshold;
        self
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// Translate `text`, never failing
    pub async fn translate(&self, text: &str, target: &Language, source: &Language) -> String {
        self.resolve_chain(text, target, source).await.text
    }

    /// Identity, cache and exact dictionary tiers
    async fn resolve_local(
        &self,
        text: &str,
        target: &Language,
        source: &Language,
    ) -> Option<Resolution> {
        if text.trim().is_empty() || source == target {
            return Some(Resolution::identity(text));
        }

        if let Some(hit) = self.cache.get(target, text).await {
            return Some(Resolution::new(hit, ResolvedBy::Cache));
        }

        if self.dictionary.covers(source, target) {
            if let Some(exact) = self.dictionary.lookup_exact(source, text) {
                tracing::debug!("Dictionary hit for '{}'", text);
                self.cache.put(target, text, &exact).await;
                return Some(Resolution::new(exact, ResolvedBy::DictionaryExact));
            }
        }

        None
    }

    pub async fn resolve_chain(&self, text: &str, target: &Language, source: &Language) -> Resolution {
        if let Some(local) = self.resolve_local(text, target, source).await {
            return local;
        }

        let mut failures = Vec::new();

        let providers = self.backend.iter().chain(self.mirrors.iter());
        for provider in providers {
            let name = provider.metadata().name;
            match provider.translate(text, source, target).await {
                Ok(translation) => {
                    tracing::debug!("'{}' translated by {}", text, name);
                    self.cache.put(target, text, &translation.text).await;
                    return Resolution {
                        text: translation.text,
                        resolved_by: ResolvedBy::Provider(name),
                        failures,
                    };
                }
                Err(e) => {
                    tracing::warn!("Translation provider {} failed: {}", name, e);
                    failures.push(ProviderFailure {
                        provider: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !self.dictionary.covers(source, target) {
            return Resolution {
                text: text.to_string(),
                resolved_by: ResolvedBy::Identity,
                failures,
            };
        }

        if let Some(partial) = self.dictionary.lookup_substring(source, text) {
            return Resolution {
                text: partial,
                resolved_by: ResolvedBy::DictionarySubstring,
                failures,
            };
        }

        Resolution {
            text: self.dictionary.lookup_word_by_word(source, text),
            resolved_by: ResolvedBy::WordByWord,
            failures,
        }
    }

    /// Resolve many texts. When more than `batch_threshold` of them miss
    /// every local tier, the backend batch endpoint is tried once for those;
    /// otherwise (or if it fails) each goes through the full chain.
    pub async fn resolve_many(
        &self,
        texts: &[String],
        target: &Language,
        source: &Language,
    ) -> Vec<Resolution> {
        let mut results: Vec<Option<Resolution>> = Vec::with_capacity(texts.len());
        let mut pending = Vec::new();

        for (index, text) in texts.iter().enumerate() {
            let local = self.resolve_local(text, target, source).await;
            if local.is_none() {
                pending.push(index);
            }
            results.push(local);
        }

        if pending.len() > self.batch_threshold {
            if let Some(backend) = &self.backend {
                let batch: Vec<String> = pending.iter().map(|&i| texts[i].clone()).collect();
                let name = backend.metadata().name;

                match backend.translate_batch(&batch, source, target).await {
                    Ok(translations) => {
                        tracing::debug!("Batch of {} translated by {}", batch.len(), name);
                        for (&index, translation) in pending.iter().zip(translations) {
                            self.cache.put(target, &texts[index], &translation).await;
                            results[index] =
                                Some(Resolution::new(translation, ResolvedBy::Provider(name.clone())));
                        }
                        pending.clear();
                    }
                    Err(e) => {
                        tracing::warn!("Batch translation via {} failed: {}", name, e);
                    }
                }
            }
        }

        for index in pending {
            results[index] = Some(self.resolve_chain(&texts[index], target, source).await);
        }

        results
            .into_iter()
            .zip(texts)
            .map(|(result, text)| result.unwrap_or_else(|| Resolution::identity(text)))
            .collect()
    }
}

#[async_trait]
impl TextResolver for FallbackResolver {
    async fn resolve(
        &self,
        text: &str,
        target: &Language,
        source: &Language,
    ) -> Result<Resolution, CoreError> {
        Ok(self.resolve_chain(text, target, source).await)
    }

    async fn resolve_batch(
        &self,
        texts: &[String],
        target: &Language,
        source: &Language,
    ) -> Vec<Result<Resolution, CoreError>> {
        self.resolve_many(texts, target, source)
            .await
            .into_iter()
            .map(Ok)
            .collect()
    }

    async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}

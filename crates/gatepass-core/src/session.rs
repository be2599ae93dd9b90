use std::sync::Arc;

use gatepass_config::session::SessionConfig;
use gatepass_types::{Language, SessionState, TranslationStatus};
use tokio::sync::watch;

use crate::error::CoreError;
use crate::resolver::{ProviderFailure, TextResolver};
use crate::storage::{LANGUAGE_KEY, LanguageStore};

/// Canary text translated from the base language to check the pipeline
pub const HEALTH_PROBE_TEXT: &str = "Hello";

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub base: Language,
    pub supported: Vec<Language>,
}

impl SessionSettings {
    pub fn new(base: Language, supported: Vec<Language>) -> Self {
        Self { base, supported }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, CoreError> {
        let base = Language::parse(&config.base_language)
            .ok_or_else(|| CoreError::UnsupportedLanguage(config.base_language.clone()))?;

        let supported: Vec<Language> = config
            .supported_languages
            .iter()
            .filter_map(|code| Language::parse(code))
            .collect();

        if !supported.contains(&base) {
            return Err(CoreError::UnsupportedLanguage(base.to_string()));
        }

        Ok(Self { base, supported })
    }

    pub fn is_supported(&self, language: &Language) -> bool {
        self.supported.contains(language)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::new(
            Language::english(),
            vec![Language::english(), Language::amharic()],
        )
    }
}

/// The application's language state: selected language, translation health
/// and the `translate` entry points used by UI text.
///
/// Constructed once at startup and shared through an `Arc`.
pub struct LanguageSession {
    settings: SessionSettings,
    resolver: Arc<dyn TextResolver>,
    store: Arc<dyn LanguageStore>,
    current: watch::Sender<Language>,
    status: watch::Sender<TranslationStatus>,
}

impl LanguageSession {
    /// Restore the persisted language (base language if none) and probe the
    /// pipeline when it needs translation
    pub async fn start(
        settings: SessionSettings,
        resolver: Arc<dyn TextResolver>,
        store: Arc<dyn LanguageStore>,
    ) -> Self {
        let stored = store.load(LANGUAGE_KEY).unwrap_or_else(|e| {
            tracing::warn!("Failed to read stored language: {}", e);
            None
        });

        let current = match stored.as_deref().and_then(Language::parse) {
            Some(language) if settings.is_supported(&language) => language,
            Some(language) => {
                tracing::warn!("Stored language '{}' is not supported, using {}", language, settings.base);
                settings.base.clone()
            }
            None => settings.base.clone(),
        };

        tracing::info!("Starting language session in '{}'", current);

        let session = Self {
            current: watch::Sender::new(current.clone()),
            status: watch::Sender::new(TranslationStatus::healthy()),
            settings,
            resolver,
            store,
        };

        if current != session.settings.base {
            session.run_health_probe(&current).await;
        }

        session
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn current_language(&self) -> Language {
        self.current.borrow().clone()
    }

    pub fn status(&self) -> TranslationStatus {
        self.status.borrow().clone()
    }

    /// Receive every status change
    pub fn subscribe(&self) -> watch::Receiver<TranslationStatus> {
        self.status.subscribe()
    }

    pub fn state(&self) -> SessionState {
        if self.current_language() == self.settings.base {
            SessionState::BaseActive
        } else if self.status.borrow().working {
            SessionState::Healthy
        } else {
            SessionState::Degraded
        }
    }

    pub fn is_language(&self, code: &str) -> bool {
        self.current.borrow().is(code)
    }

    pub fn is_english(&self) -> bool {
        self.is_language(Language::ENGLISH)
    }

    pub fn is_amharic(&self) -> bool {
        self.is_language(Language::AMHARIC)
    }

    /// Switch the active language. Unsupported codes leave the session
    /// untouched.
    pub async fn change_language(&self, code: &str) -> Result<SessionState, CoreError> {
        let Some(language) = Language::parse(code).filter(|l| self.settings.is_supported(l)) else {
            tracing::warn!("Ignoring unsupported language code '{}'", code);
            return Err(CoreError::UnsupportedLanguage(code.to_string()));
        };

        tracing::info!("Changing language to '{}'", language);

        self.current.send_replace(language.clone());
        if let Err(e) = self.store.save(LANGUAGE_KEY, language.code()) {
            tracing::warn!("Failed to persist language '{}': {}", language, e);
        }

        self.resolver.clear_cache().await;

        if language == self.settings.base {
            self.status.send_replace(TranslationStatus::healthy());
        } else {
            self.run_health_probe(&language).await;
        }

        Ok(self.state())
    }

    /// Re-probe the current language, keeping cached translations
    pub async fn refresh_translation_service(&self) -> SessionState {
        let language = self.current_language();

        if language == self.settings.base {
            self.status.send_replace(TranslationStatus::healthy());
        } else {
            self.run_health_probe(&language).await;
        }

        self.state()
    }

    async fn run_health_probe(&self, language: &Language) -> TranslationStatus {
        let status = match self
            .resolver
            .resolve(HEALTH_PROBE_TEXT, language, &self.settings.base)
            .await
        {
            Ok(resolution) if resolution.text != HEALTH_PROBE_TEXT => {
                tracing::info!("Translation service for '{}' is working", language);
                TranslationStatus::healthy()
            }
            Ok(resolution) => {
                let message = describe_failures(language, &resolution.failures);
                tracing::warn!("{}", message);
                TranslationStatus::degraded(message)
            }
            Err(e) => {
                tracing::warn!("Health probe for '{}' failed: {}", language, e);
                TranslationStatus::degraded(format!("Translation service unavailable: {}", e))
            }
        };

        // A newer language switch owns the status now
        if self.current_language() != *language {
            tracing::debug!("Discarding stale health probe for '{}'", language);
            return status;
        }

        self.status.send_replace(status.clone());
        status
    }

    /// Translate `text` into the current language. `source` defaults to the
    /// base language. Never fails: on error the original text comes back and
    /// the status is marked as not working.
    pub async fn translate(&self, text: &str, source: Option<&Language>) -> String {
        let source = source.unwrap_or(&self.settings.base);
        let target = self.current_language();

        if *source == target {
            return text.to_string();
        }

        match self.resolver.resolve(text, &target, source).await {
            Ok(resolution) => resolution.text,
            Err(e) => {
                tracing::warn!("Translation of '{}' failed: {}", text, e);
                self.mark_failed(&e);
                text.to_string()
            }
        }
    }

    /// Translate each element independently, preserving order
    pub async fn translate_texts(&self, texts: &[String], source: Option<&Language>) -> Vec<String> {
        let source = source.unwrap_or(&self.settings.base);
        let target = self.current_language();

        if *source == target {
            return texts.to_vec();
        }

        self.resolver
            .resolve_batch(texts, &target, source)
            .await
            .into_iter()
            .zip(texts)
            .map(|(result, text)| match result {
                Ok(resolution) => resolution.text,
                Err(e) => {
                    tracing::warn!("Translation of '{}' failed: {}", text, e);
                    self.mark_failed(&e);
                    text.clone()
                }
            })
            .collect()
    }

    fn mark_failed(&self, error: &CoreError) {
        self.status.send_modify(|status| {
            status.working = false;
            status.error = Some(error.to_string());
        });
    }
}

fn describe_failures(language: &Language, failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return format!("No translation available for '{}', showing original text", language);
    }

    let reasons: Vec<String> = failures
        .iter()
        .map(|f| format!("{}: {}", f.provider, f.reason))
        .collect();

    format!(
        "Translation service for '{}' unavailable, using offline dictionary ({})",
        language,
        reasons.join("; ")
    )
}

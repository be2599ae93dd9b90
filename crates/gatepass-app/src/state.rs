use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gatepass_config::Config;
use gatepass_core::{
    FallbackResolver, FileStore, LanguageSession, SessionSettings, StaticDictionary,
    TranslationCache,
};
use gatepass_lang_amharic::PhraseLoader;
use gatepass_translator::{BackendTranslator, MirrorTranslator, Translator};
use gatepass_types::Language;

pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<LanguageSession>,
}

impl AppState {
    pub fn new(config: Config, session: Arc<LanguageSession>) -> Self {
        Self {
            config: Arc::new(config),
            session,
        }
    }
}

/// Wire dictionary, providers, cache and store into a started session
pub async fn build_session(config: &Config) -> anyhow::Result<Arc<LanguageSession>> {
    let settings =
        SessionSettings::from_config(&config.session).context("Invalid session configuration")?;

    let dictionary = if config.dictionary.enabled {
        PhraseLoader::dictionary(&config.dictionary.additional_paths)
    } else {
        tracing::warn!("Dictionary disabled, offline translation unavailable");
        StaticDictionary::empty(Language::english(), Language::amharic())
    };

    let translator = &config.translator;
    let mut resolver = FallbackResolver::new(Arc::new(TranslationCache::new()), Arc::new(dictionary))
        .with_batch_threshold(translator.batch_threshold);

    if translator.backend_enabled {
        tracing::info!("Using translation backend at {}", translator.backend_url);
        resolver = resolver.with_backend(Arc::new(BackendTranslator::new(
            translator.backend_url.clone(),
            Duration::from_millis(translator.backend_timeout_ms),
        )));
    }

    let mirrors: Vec<Arc<dyn Translator>> = MirrorTranslator::from_urls(
        &translator.mirror_urls,
        Duration::from_millis(translator.mirror_timeout_ms),
    )
    .into_iter()
    .map(|mirror| Arc::new(mirror) as Arc<dyn Translator>)
    .collect();
    tracing::info!("{} public translation mirrors configured", mirrors.len());
    resolver = resolver.with_mirrors(mirrors);

    let store = FileStore::new(&config.session.storage_path);

    let session = LanguageSession::start(settings, Arc::new(resolver), Arc::new(store)).await;
    Ok(Arc::new(session))
}

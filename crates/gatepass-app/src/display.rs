use gatepass_config::Config;
use gatepass_core::LanguageSession;
use gatepass_types::SessionState;

/// Appended to text shown untranslated because translation is degraded
pub const DEGRADED_MARKER: &str = "[!]";

/// What a UI text element shows for `text`: the translation while the
/// pipeline is healthy, the original text with a marker otherwise.
pub async fn render_text(session: &LanguageSession, text: &str) -> String {
    let translated = session.translate(text, None).await;
    decorate(session, text, translated)
}

pub async fn render_texts(session: &LanguageSession, texts: &[String]) -> Vec<String> {
    let translated = session.translate_texts(texts, None).await;
    texts
        .iter()
        .zip(translated)
        .map(|(text, translated)| decorate(session, text, translated))
        .collect()
}

fn decorate(session: &LanguageSession, original: &str, translated: String) -> String {
    if session.status().working {
        translated
    } else {
        format!("{original} {DEGRADED_MARKER}")
    }
}

pub fn describe_state(state: SessionState) -> &'static str {
    match state {
        SessionState::BaseActive => "base language",
        SessionState::Healthy => "translation working",
        SessionState::Degraded => "offline, dictionary only",
    }
}

pub fn describe_status(session: &LanguageSession) -> String {
    let status = session.status();
    let mut line = format!(
        "language={} state={} working={} offline={}",
        session.current_language(),
        describe_state(session.state()),
        status.working,
        status.offline_mode
    );
    if let Some(error) = status.error {
        line.push_str(&format!(" error=\"{error}\""));
    }
    line
}

/// Configured providers, in the order they are tried
pub fn describe_providers(config: &Config) -> String {
    let translator = &config.translator;
    let backend = if translator.backend_enabled {
        translator.backend_url.as_str()
    } else {
        "off"
    };
    format!(
        "backend={} mirrors={} batch_threshold={}",
        backend,
        translator.mirror_urls.len(),
        translator.batch_threshold
    )
}

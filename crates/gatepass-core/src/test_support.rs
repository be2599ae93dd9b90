use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gatepass_translator::{ProviderMetadata, TranslateError, Translation, Translator};
use gatepass_types::Language;

type ReplyFn = dyn Fn(&str, usize) -> Option<String> + Send + Sync;

/// In-process provider whose answers come from a closure of
/// `(text, call index)`. `None` is a provider failure.
pub(crate) struct StubTranslator {
    name: String,
    reply: Box<ReplyFn>,
    calls: Mutex<Vec<String>>,
    batch_calls: AtomicUsize,
}

impl StubTranslator {
    pub(crate) fn new(
        name: &str,
        reply: impl Fn(&str, usize) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
            batch_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(name: &str) -> Self {
        Self::new(name, |_, _| None)
    }

    pub(crate) fn fixed(name: &str, answer: &str) -> Self {
        let answer = answer.to_string();
        Self::new(name, move |_, _| Some(answer.clone()))
    }

    /// `[tag] text`
    pub(crate) fn tagging(name: &str, tag: &str) -> Self {
        let tag = tag.to_string();
        Self::new(name, move |text, _| Some(format!("[{tag}] {text}")))
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, text: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == text).count()
    }

    pub(crate) fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &Language,
        to: &Language,
    ) -> Result<Translation, TranslateError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(text.to_string());
            calls.len() - 1
        };

        match (self.reply)(text, index) {
            Some(answer) => Ok(Translation {
                text: answer,
                from: from.clone(),
                to: to.clone(),
                provider: self.name.clone(),
            }),
            None => Err(TranslateError::ApiError(format!("{} unavailable", self.name))),
        }
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        _from: &Language,
        _to: &Language,
    ) -> Result<Vec<String>, TranslateError> {
        let index = self.batch_calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|text| (self.reply)(text, index))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| TranslateError::ApiError(format!("{} batch unavailable", self.name)))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.name.clone(),
        }
    }
}

pub(crate) fn providers(stubs: Vec<Arc<StubTranslator>>) -> Vec<Arc<dyn Translator>> {
    stubs
        .into_iter()
        .map(|stub| stub as Arc<dyn Translator>)
        .collect()
}

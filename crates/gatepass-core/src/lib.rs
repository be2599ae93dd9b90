pub mod cache;
pub mod dictionary;
pub mod error;
pub mod resolver;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::TranslationCache;
pub use dictionary::{Phrase, PhraseTable, StaticDictionary};
pub use error::CoreError;
pub use resolver::{FallbackResolver, ProviderFailure, Resolution, ResolvedBy, TextResolver};
pub use session::{HEALTH_PROBE_TEXT, LanguageSession, SessionSettings};
pub use storage::{FileStore, LANGUAGE_KEY, LanguageStore, MemoryStore};

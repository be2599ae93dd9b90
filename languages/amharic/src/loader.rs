use std::path::Path;

use gatepass_core::dictionary::{LoadError, PhraseTable};
use gatepass_core::StaticDictionary;
use gatepass_types::Language;

pub struct PhraseLoader;

impl PhraseLoader {
    /// Load the embedded English -> Amharic UI phrase table
    pub fn load_embedded() -> Result<PhraseTable, LoadError> {
        let json = include_str!("../data/en_am.json");
        tracing::info!("Loading embedded Amharic phrase table...");
        let table = PhraseTable::from_json(json)?;
        tracing::info!("Loaded {} phrases", table.len());
        Ok(table)
    }

    /// Load a phrase table from file path
    pub fn load_from_file(path: &Path) -> Result<PhraseTable, LoadError> {
        tracing::info!("Loading phrase table from file: {}", path.display());
        let table = PhraseTable::from_file(path)?;
        tracing::info!("Loaded {} phrases from file", table.len());
        Ok(table)
    }

    /// Embedded table with additional tables merged on top, in order.
    /// Unreadable files are skipped.
    pub fn load_with_additional(additional_paths: &[String]) -> PhraseTable {
        let mut table = Self::load_embedded().unwrap_or_else(|e| {
            tracing::error!("Failed to load embedded phrase table: {}", e);
            tracing::warn!("Starting with empty phrase table");
            PhraseTable::new(Language::english(), Language::amharic())
        });

        for path in additional_paths {
            let merged = Self::load_from_file(Path::new(path)).and_then(|extra| table.clone().merge(extra));
            match merged {
                Ok(next) => {
                    tracing::info!("Merged additional phrases from: {}", path);
                    table = next;
                }
                Err(e) => {
                    tracing::warn!("Failed to load phrases from {}: {}", path, e);
                }
            }
        }

        table
    }

    /// Build the English <-> Amharic dictionary
    pub fn dictionary(additional_paths: &[String]) -> StaticDictionary {
        StaticDictionary::new(&Self::load_with_additional(additional_paths))
    }
}

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::pipeline::TaggerWait;
use crate::semantic::{source_for, EmbeddingCache};
use crate::tagging::penn::PennTagger;
use crate::tagging::SecondaryTagger;
use crate::vocabulary::Vocabulary;

/// Which secondary tagger arbitration consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryBackend {
    /// Built-in Penn Treebank tagger (default)
    Penn,
    /// Primary tags only
    None,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so any of these can
/// live there instead of the shell environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding payload locations (paths or http(s) URLs), tried in order.
    pub embedding_locations: Vec<String>,
    /// Replacement vocabulary file (GAPS_VOCABULARY). Built-in lists when unset.
    pub vocabulary_path: Option<PathBuf>,
    pub secondary_tagger: SecondaryBackend,
    pub tagger_wait: TaggerWait,
}

impl Config {
    /// Load configuration from environment variables. Every setting has a
    /// default; only malformed values are errors.
    pub fn load() -> Result<Self> {
        let embedding_locations = match env::var("GAPS_EMBEDDINGS") {
            Ok(value) if !value.trim().is_empty() => value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => default_embedding_locations(),
        };

        let secondary_tagger = match env::var("GAPS_SECONDARY_TAGGER").as_deref() {
            Ok("none") | Ok("off") => SecondaryBackend::None,
            Ok("penn") | Err(_) => SecondaryBackend::Penn,
            Ok(other) => anyhow::bail!(
                "GAPS_SECONDARY_TAGGER must be `penn` or `none`, got `{other}`"
            ),
        };

        let defaults = TaggerWait::default();
        let attempts = match env::var("GAPS_TAGGER_ATTEMPTS") {
            Ok(v) => v
                .parse::<u32>()
                .with_context(|| format!("GAPS_TAGGER_ATTEMPTS is not a number: {v}"))?,
            Err(_) => defaults.attempts,
        };
        let interval = match env::var("GAPS_TAGGER_INTERVAL_MS") {
            Ok(v) => Duration::from_millis(
                v.parse::<u64>()
                    .with_context(|| format!("GAPS_TAGGER_INTERVAL_MS is not a number: {v}"))?,
            ),
            Err(_) => defaults.interval,
        };

        Ok(Self {
            embedding_locations,
            vocabulary_path: env::var("GAPS_VOCABULARY").ok().map(PathBuf::from),
            secondary_tagger,
            tagger_wait: TaggerWait {
                attempts: attempts.max(1),
                interval,
            },
        })
    }

    /// The vocabulary override if configured, else the built-in lists.
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        let vocabulary = match &self.vocabulary_path {
            Some(path) => Vocabulary::from_path(path)?,
            None => Vocabulary::builtin()?,
        };
        Ok(vocabulary)
    }

    pub fn secondary(&self) -> Option<Arc<dyn SecondaryTagger>> {
        match self.secondary_tagger {
            SecondaryBackend::Penn => Some(Arc::new(PennTagger::new())),
            SecondaryBackend::None => None,
        }
    }

    pub fn embedding_cache(&self) -> EmbeddingCache {
        EmbeddingCache::new(
            self.embedding_locations
                .iter()
                .map(|loc| source_for(loc))
                .collect(),
        )
    }
}

/// Default embedding locations: the user data directory, then the working
/// directory and its dist/ subdirectory.
pub fn default_embedding_locations() -> Vec<String> {
    let mut locations = Vec::new();
    if let Some(data) = dirs::data_dir() {
        locations.push(path_string(&data.join("gaps").join("embeddings.json")));
    }
    locations.push("./embeddings.json".to_string());
    locations.push("./dist/embeddings.json".to_string());
    locations
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locations_end_with_working_directory() {
        let locations = default_embedding_locations();
        assert_eq!(
            &locations[locations.len() - 2..],
            &["./embeddings.json", "./dist/embeddings.json"]
        );
    }

    #[test]
    fn test_secondary_backend_selection() {
        let mut config = Config {
            embedding_locations: Vec::new(),
            vocabulary_path: None,
            secondary_tagger: SecondaryBackend::Penn,
            tagger_wait: TaggerWait::default(),
        };
        assert!(config.secondary().is_some());
        config.secondary_tagger = SecondaryBackend::None;
        assert!(config.secondary().is_none());
        assert_eq!(config.vocabulary().unwrap().version, Vocabulary::builtin().unwrap().version);
    }
}

// Closed vocabularies used across the pipeline.
//
// The lists live in data/vocabulary.json so they can be versioned and
// extended without touching the algorithms. The built-in copy is compiled
// into the binary; GAPS_VOCABULARY can point at a replacement file.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;

const BUILTIN_VOCABULARY: &str = include_str!("../data/vocabulary.json");

/// Every closed word list the pipeline consults, keyed by purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Bumped whenever list contents change in a way that alters output.
    pub version: u32,
    pub profiles: ProfileVocabulary,
    /// Words never chosen as key words, however specific they look.
    pub key_word_exclusions: Vec<String>,
    /// Stop and generic words never offered as gap candidates.
    pub candidate_exclusions: Vec<String>,
    /// Overly generic nouns excluded from the candidate scan.
    pub generic_nouns: Vec<String>,
    /// First word (lowercase) -> second words it fuses with, e.g. chat + gpt.
    pub compound_whitelist: HashMap<String, Vec<String>>,
    /// Nouns the primary tagger tends to flag as proper nouns.
    pub known_nouns: Vec<String>,
    /// Standard English negation and auxiliary contractions.
    pub contractions: Vec<String>,
    /// Head word -> hand-picked alternatives used when embeddings are absent.
    pub fallback_alternatives: HashMap<String, Vec<String>>,
    /// Emitted when nothing else produces a gap.
    pub last_resort: Vec<String>,
}

/// Word lists for the six rhetorical profile dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileVocabulary {
    pub sensory: SensoryVocabulary,
    pub confidence: ConfidenceVocabulary,
    pub abstraction: AbstractionVocabulary,
    pub perspective: PerspectiveVocabulary,
    pub temporal: TemporalVocabulary,
    pub argumentation: ArgumentationVocabulary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensoryVocabulary {
    pub sight: Vec<String>,
    pub sound: Vec<String>,
    pub touch: Vec<String>,
    pub smell: Vec<String>,
    pub taste: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceVocabulary {
    pub absolutes: Vec<String>,
    pub hedges: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbstractionVocabulary {
    pub concrete: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerspectiveVocabulary {
    pub subjective: Vec<String>,
    pub objective: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalVocabulary {
    pub past: Vec<String>,
    pub present: Vec<String>,
    pub future: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentationVocabulary {
    pub causality: Vec<String>,
    pub contrast: Vec<String>,
    pub addition: Vec<String>,
}

impl Vocabulary {
    /// The vocabulary compiled into the crate.
    pub fn builtin() -> Result<Self, AnalysisError> {
        serde_json::from_str(BUILTIN_VOCABULARY)
            .map_err(|e| AnalysisError::Vocabulary(format!("built-in vocabulary: {e}")))
    }

    /// Load a replacement vocabulary from disk.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Vocabulary(format!("failed to read {}: {e}", path.display()))
        })?;
        let vocabulary: Vocabulary = serde_json::from_str(&raw).map_err(|e| {
            AnalysisError::Vocabulary(format!("failed to parse {}: {e}", path.display()))
        })?;
        debug!(
            path = %path.display(),
            version = vocabulary.version,
            "Loaded vocabulary override"
        );
        Ok(vocabulary)
    }

    /// Whether `first` followed by `second` is a whitelisted compound.
    pub fn is_compound(&self, first: &str, second: &str) -> bool {
        self.compound_whitelist
            .get(&first.to_lowercase())
            .is_some_and(|seconds| {
                let second = second.to_lowercase();
                seconds.iter().any(|s| *s == second)
            })
    }

    pub fn is_known_noun(&self, word: &str) -> bool {
        self.known_nouns.iter().any(|n| n == word)
    }

    pub fn is_contraction(&self, word: &str) -> bool {
        self.contractions.iter().any(|c| c == word)
    }

    /// Key-word exclusions merged with the stop-words crate's English list.
    pub fn key_word_stoplist(&self) -> HashSet<String> {
        with_english_stop_words(&self.key_word_exclusions)
    }

    /// Candidate exclusions merged with the stop-words crate's English list.
    pub fn candidate_stoplist(&self) -> HashSet<String> {
        let mut set = with_english_stop_words(&self.candidate_exclusions);
        set.extend(self.generic_nouns.iter().cloned());
        set
    }
}

fn with_english_stop_words(extra: &[String]) -> HashSet<String> {
    let mut set: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect();
    set.extend(extra.iter().map(|w| w.to_lowercase()));
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let vocab = Vocabulary::builtin().unwrap();
        assert!(vocab.version >= 1);
        assert_eq!(vocab.profiles.sensory.sight.len(), 20);
        assert!(!vocab.last_resort.is_empty());
    }

    #[test]
    fn test_compound_whitelist_is_case_insensitive() {
        let vocab = Vocabulary::builtin().unwrap();
        assert!(vocab.is_compound("Chat", "GPT"));
        assert!(vocab.is_compound("you", "Tube"));
        assert!(!vocab.is_compound("Books", "AI"));
        assert!(!vocab.is_compound("chat", "room"));
    }

    #[test]
    fn test_stoplists_include_crate_words() {
        let vocab = Vocabulary::builtin().unwrap();
        let stop = vocab.candidate_stoplist();
        assert!(stop.contains("the"));
        assert!(stop.contains("circumstance"));
        assert!(vocab.key_word_stoplist().contains("significant"));
    }

    #[test]
    fn test_from_path_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Vocabulary::from_path(&path),
            Err(AnalysisError::Vocabulary(_))
        ));
    }
}

// Statistics engine: counts, readability and the rhetorical profile.
//
// `compute_stats` is a pure function of the tagged word sequence and the
// sentence texts. All maps are ordered so two runs over the same input
// serialize identically.

pub mod counts;
pub mod profile;
pub mod readability;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tagging::{UniversalTag, Word};
use crate::vocabulary::Vocabulary;

pub use counts::{ContextEntry, PosSegment, WordEntry};
pub use profile::{ProfileDimension, RhetoricalProfile};

/// Aggregate statistics for one analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_words: usize,
    /// Distinct case-folded surface forms.
    pub unique_words: usize,
    /// Per-tag totals; always sums to `total_words`.
    pub pos_counts: BTreeMap<UniversalTag, usize>,
    pub word_frequency: BTreeMap<String, usize>,
    /// Counted words seen exactly once, in order of appearance.
    pub hapax_legomena: Vec<String>,
    /// Cleaned word -> original form, tag counts and context windows.
    pub word_index: BTreeMap<String, WordEntry>,
    pub sentences: Vec<String>,
    /// Flesch Reading Ease.
    pub readability_index: f64,
    pub avg_sentence_length: f64,
    /// Tag of every word in text order.
    pub pos_sequence: Vec<UniversalTag>,
    pub profile: RhetoricalProfile,
}

/// Compute every statistic for a tagged word sequence.
pub fn compute_stats(words: &[Word], sentences: &[String], vocabulary: &Vocabulary) -> Stats {
    let frequencies = counts::word_frequency(words);
    let readability = readability::flesch(words, sentences.len());

    Stats {
        total_words: words.len(),
        unique_words: counts::unique_words(words),
        pos_counts: counts::pos_counts(words),
        hapax_legomena: counts::hapax_legomena(words, &frequencies),
        word_index: counts::word_index(words, sentences),
        word_frequency: frequencies,
        sentences: sentences.to_vec(),
        readability_index: readability.index,
        avg_sentence_length: readability.avg_sentence_length,
        pos_sequence: words.iter().map(|w| w.tag).collect(),
        profile: profile::rhetorical_profile(words, &vocabulary.profiles),
    }
}

impl Stats {
    /// Index entries whose key or original form contains `term`
    /// (case-insensitive) and, if given, that were tagged `pos` at least once.
    /// Most frequent first.
    pub fn search(&self, term: &str, pos: Option<UniversalTag>) -> Vec<(&str, &WordEntry)> {
        let term = term.trim().to_lowercase();
        let mut hits: Vec<(&str, &WordEntry)> = self
            .word_index
            .iter()
            .filter(|(key, entry)| {
                term.is_empty()
                    || key.contains(&term)
                    || entry.original.to_lowercase().contains(&term)
            })
            .filter(|(_, entry)| pos.is_none_or(|tag| entry.tags.get(&tag).is_some_and(|c| *c > 0)))
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        hits.sort_by(|a, b| b.1.total_count.cmp(&a.1.total_count));
        hits
    }

    /// The POS sequence sampled down to at most 200 positions and grouped
    /// into runs of equal tags, for compact display.
    pub fn pos_segments(&self) -> Vec<PosSegment> {
        counts::pos_segments(&self.pos_sequence, counts::HEATMAP_SAMPLES)
    }
}

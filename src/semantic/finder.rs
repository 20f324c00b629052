// Semantic gap finder.
//
// A gap is a word that is absent from the text but sits close, in embedding
// space, to several of the text's key words at once. Single-word closeness
// alone mostly finds synonyms of one key word, so candidates are also
// measured against the midpoint of every pair of key words: a word near a
// pair midpoint is near what the two words mean together.
//
// Every candidate passes a cheap lexical filter, then a similarity gate, and
// survivors are ranked by a lexicographic comparator. Nouns and non-nouns
// are ranked in separate pools so the result is mostly nouns.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, info};

use super::embeddings::{cosine_similarity, mean_vector, midpoint, EmbeddingTable};
use super::fallback::fallback_gaps;
use super::keywords::{score_key_words, select_key_words};
use crate::tagging::Word;
use crate::text::clean_word;
use crate::vocabulary::Vocabulary;

/// Tunable thresholds and weights for gap scoring.
///
/// Similarities are cosine values in [0, 1].
#[derive(Debug, Clone)]
pub struct GapSettings {
    /// Candidates shorter than this are skipped (default 9).
    pub min_candidate_len: usize,
    /// Minimum length for candidates ending in -ing (default 12).
    pub min_ing_len: usize,
    /// Minimum length for candidates ending in -ed (default 11).
    pub min_ed_len: usize,
    /// Minimum length for candidates ending in -tion/-sion (default 12).
    pub min_tion_len: usize,
    /// Pair similarities at or below this are ignored entirely (default 0.4).
    pub meaningful_pair: f64,
    /// Key similarity counted as close (default 0.5).
    pub close_key: f64,
    /// Key similarity counted as very close (default 0.6).
    pub very_close_key: f64,
    /// Key similarity counted as extremely close (default 0.7).
    pub extremely_close_key: f64,
    /// Pair similarity counted as close (default 0.55).
    pub close_pair: f64,
    /// Pair similarity counted as very close (default 0.65).
    pub very_close_pair: f64,
    /// Maximum similarity a strong match must exceed (default 0.6).
    pub strong_match: f64,
    /// Close pairs needed for a strong pair match (default 3).
    pub strong_pair_count: usize,
    /// Close keys needed for a strong key match (default 4).
    pub strong_key_count: usize,
    /// Close pairs a strong key match must also have (default 2).
    pub key_match_min_pairs: usize,
    /// Adjusted score a noun must exceed (default 0.5).
    pub noun_threshold: f64,
    /// Adjusted score a non-noun must exceed (default 0.6).
    pub other_threshold: f64,
    /// Weight of the pair intersection score (default 0.6).
    pub pair_weight: f64,
    /// Weight of the single-key intersection score (default 0.4).
    pub key_weight: f64,
    pub noun_bonus: f64,
    /// Length bonus is `min(len / divisor, max)` (defaults 15 and 0.1).
    pub length_bonus_divisor: f64,
    pub max_length_bonus: f64,
    /// Pair bonus is `min(close_pairs / 2, max)` (default max 0.25).
    pub max_pair_bonus: f64,
    pub very_close_pair_bonus: f64,
    /// Multi-key bonus is `min(close_keys / 2, max)` (default max 0.2).
    pub max_multi_key_bonus: f64,
    pub very_close_key_bonus: f64,
    pub extremely_close_key_bonus: f64,
    /// Gaps taken from the noun pool (default 15).
    pub top_nouns: usize,
    /// Gaps taken from the non-noun pool (default 5).
    pub top_others: usize,
    /// Hard cap on returned gaps (default 20).
    pub max_gaps: usize,
}

impl Default for GapSettings {
    fn default() -> Self {
        Self {
            min_candidate_len: 9,
            min_ing_len: 12,
            min_ed_len: 11,
            min_tion_len: 12,
            meaningful_pair: 0.4,
            close_key: 0.5,
            very_close_key: 0.6,
            extremely_close_key: 0.7,
            close_pair: 0.55,
            very_close_pair: 0.65,
            strong_match: 0.6,
            strong_pair_count: 3,
            strong_key_count: 4,
            key_match_min_pairs: 2,
            noun_threshold: 0.5,
            other_threshold: 0.6,
            pair_weight: 0.6,
            key_weight: 0.4,
            noun_bonus: 0.1,
            length_bonus_divisor: 15.0,
            max_length_bonus: 0.1,
            max_pair_bonus: 0.25,
            very_close_pair_bonus: 0.15,
            max_multi_key_bonus: 0.2,
            very_close_key_bonus: 0.15,
            extremely_close_key_bonus: 0.2,
            top_nouns: 15,
            top_others: 5,
            max_gaps: 20,
        }
    }
}

/// Key-word vectors with their pair midpoints and centroid.
pub struct Anchors {
    pub words: Vec<String>,
    keys: Vec<Vec<f64>>,
    pairs: Vec<Vec<f64>>,
    center: Option<Vec<f64>>,
}

impl Anchors {
    pub fn new(key_words: &[String], embeddings: &EmbeddingTable) -> Self {
        let mut words = Vec::new();
        let mut keys: Vec<Vec<f64>> = Vec::new();
        for word in key_words {
            if let Some(vector) = embeddings.get(word) {
                words.push(word.clone());
                keys.push(vector.to_vec());
            }
        }

        let mut pairs = Vec::with_capacity(keys.len() * keys.len().saturating_sub(1) / 2);
        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                pairs.push(midpoint(&keys[i], &keys[j]));
            }
        }

        let refs: Vec<&[f64]> = keys.iter().map(Vec::as_slice).collect();
        let center = mean_vector(&refs);

        Self {
            words,
            keys,
            pairs,
            center,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Every measurement taken for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub word: String,
    pub length: usize,
    pub is_noun: bool,
    pub adjusted: f64,
    pub key_matches: usize,
    pub very_close_matches: usize,
    pub extremely_close_matches: usize,
    pub pair_matches: usize,
    pub very_close_pairs: usize,
    pub max_key_similarity: f64,
    pub max_pair_similarity: f64,
    pub avg_top_similarity: f64,
    pub avg_top_pair_similarity: f64,
    pub intersection_score: f64,
    pub center_similarity: f64,
}

impl CandidateScore {
    /// Ranking order, best first.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .avg_top_pair_similarity
            .total_cmp(&self.avg_top_pair_similarity)
            .then(other.very_close_pairs.cmp(&self.very_close_pairs))
            .then(other.pair_matches.cmp(&self.pair_matches))
            .then(other.max_pair_similarity.total_cmp(&self.max_pair_similarity))
            .then(other.intersection_score.total_cmp(&self.intersection_score))
            .then(other.extremely_close_matches.cmp(&self.extremely_close_matches))
            .then(other.very_close_matches.cmp(&self.very_close_matches))
            .then(other.key_matches.cmp(&self.key_matches))
            .then(other.avg_top_similarity.total_cmp(&self.avg_top_similarity))
            .then(other.max_key_similarity.total_cmp(&self.max_key_similarity))
            .then(other.adjusted.total_cmp(&self.adjusted))
            .then(other.length.cmp(&self.length))
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Mean of the `n` largest values, or 0 when empty. `values` must be sorted
/// descending.
fn mean_of_top(values: &[f64], n: usize) -> f64 {
    let top = &values[..values.len().min(n)];
    if top.is_empty() {
        0.0
    } else {
        top.iter().sum::<f64>() / top.len() as f64
    }
}

/// Sum of squared similarities above `threshold`, over their count floored at 1.
fn intersection(values: &[f64], threshold: f64) -> f64 {
    let close: Vec<f64> = values.iter().copied().filter(|s| *s > threshold).collect();
    close.iter().map(|s| s * s).sum::<f64>() / close.len().max(1) as f64
}

fn count_above(values: &[f64], threshold: f64) -> usize {
    values.iter().filter(|s| **s > threshold).count()
}

pub struct GapFinder<'v> {
    vocabulary: &'v Vocabulary,
    settings: GapSettings,
}

impl<'v> GapFinder<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self::with_settings(vocabulary, GapSettings::default())
    }

    pub fn with_settings(vocabulary: &'v Vocabulary, settings: GapSettings) -> Self {
        Self {
            vocabulary,
            settings,
        }
    }

    pub fn settings(&self) -> &GapSettings {
        &self.settings
    }

    /// Ranked words absent from `words` but close to its key words. Falls back
    /// to the curated alternatives when embeddings give nothing. Never fails;
    /// an empty list is a valid answer.
    pub fn find_gaps(&self, words: &[Word], embeddings: &EmbeddingTable) -> Vec<String> {
        if words.is_empty() {
            return Vec::new();
        }
        let present = present_forms(words);

        let gaps = self.semantic_gaps(words, embeddings, &present);
        let gaps = if gaps.is_empty() {
            debug!("No semantic gaps, using fallback alternatives");
            fallback_gaps(words, self.vocabulary, self.settings.max_gaps)
        } else {
            gaps
        };

        // Whatever produced them, gaps never repeat the text.
        let mut seen = HashSet::new();
        gaps.into_iter()
            .filter(|g| !present.contains(&g.to_lowercase()) && !present.contains(&clean_word(g)))
            .filter(|g| seen.insert(g.to_lowercase()))
            .take(self.settings.max_gaps)
            .collect()
    }

    fn semantic_gaps(
        &self,
        words: &[Word],
        embeddings: &EmbeddingTable,
        present: &HashSet<String>,
    ) -> Vec<String> {
        if embeddings.is_empty() {
            debug!("Embedding table empty");
            return Vec::new();
        }

        let scored = score_key_words(words, embeddings, &self.vocabulary.key_word_stoplist());
        let key_words: Vec<String> = select_key_words(&scored)
            .into_iter()
            .map(|k| k.word)
            .collect();
        let anchors = Anchors::new(&key_words, embeddings);
        if anchors.is_empty() {
            debug!("No key words with embeddings");
            return Vec::new();
        }
        debug!(key_words = ?anchors.words, "Selected key words");

        let stoplist = self.vocabulary.candidate_stoplist();
        let key_set: HashSet<&str> = anchors.words.iter().map(String::as_str).collect();

        let mut nouns: Vec<CandidateScore> = Vec::new();
        let mut others: Vec<CandidateScore> = Vec::new();
        let mut checked = 0usize;
        for (word, vector) in embeddings.iter() {
            if present.contains(word) || key_set.contains(word) || stoplist.contains(word) {
                continue;
            }
            if !self.passes_filters(word) {
                continue;
            }
            checked += 1;
            let Some(score) = self.score(word, vector, &anchors) else {
                continue;
            };
            if score.is_noun {
                nouns.push(score);
            } else {
                others.push(score);
            }
        }

        nouns.sort_by(CandidateScore::rank);
        others.sort_by(CandidateScore::rank);
        info!(
            checked,
            nouns = nouns.len(),
            others = others.len(),
            "Scored gap candidates"
        );

        let mut seen = HashSet::new();
        nouns
            .into_iter()
            .take(self.settings.top_nouns)
            .chain(others.into_iter().take(self.settings.top_others))
            .map(|c| c.word)
            .filter(|w| seen.insert(w.to_lowercase()))
            .take(self.settings.max_gaps)
            .collect()
    }

    /// Lexical filters applied before any vector math.
    pub fn passes_filters(&self, word: &str) -> bool {
        let s = &self.settings;
        let len = word.chars().count();
        if len < s.min_candidate_len || word.ends_with("ly") {
            return false;
        }
        if word.ends_with("ing") && len < s.min_ing_len {
            return false;
        }
        if word.ends_with("ed") && len < s.min_ed_len {
            return false;
        }
        if (word.ends_with("tion") || word.ends_with("sion")) && len < s.min_tion_len {
            return false;
        }
        true
    }

    /// Measure a candidate against the anchors. `None` when it fails the gate.
    pub fn score(&self, word: &str, vector: &[f64], anchors: &Anchors) -> Option<CandidateScore> {
        let s = &self.settings;

        let mut key_sims: Vec<f64> = anchors
            .keys
            .iter()
            .map(|k| cosine_similarity(k, vector))
            .collect();
        key_sims.sort_by(|a, b| b.total_cmp(a));

        let mut pair_sims: Vec<f64> = anchors
            .pairs
            .iter()
            .map(|p| cosine_similarity(p, vector))
            .filter(|sim| *sim > s.meaningful_pair)
            .collect();
        pair_sims.sort_by(|a, b| b.total_cmp(a));

        let key_matches = count_above(&key_sims, s.close_key);
        let very_close_matches = count_above(&key_sims, s.very_close_key);
        let extremely_close_matches = count_above(&key_sims, s.extremely_close_key);
        let pair_matches = count_above(&pair_sims, s.close_pair);
        let very_close_pairs = count_above(&pair_sims, s.very_close_pair);

        let max_key_similarity = key_sims.first().copied().unwrap_or(0.0);
        let max_pair_similarity = pair_sims.first().copied().unwrap_or(0.0);

        let strong_pair = max_pair_similarity > s.strong_match && pair_matches >= s.strong_pair_count;
        let strong_key = max_key_similarity > s.strong_match && key_matches >= s.strong_key_count;
        if !(strong_pair || (strong_key && pair_matches >= s.key_match_min_pairs)) {
            return None;
        }

        let avg_top_similarity = mean_of_top(&key_sims, 3);
        let avg_top_pair_similarity = mean_of_top(&pair_sims, 3);
        let intersection_score = intersection(&pair_sims, s.close_pair) * s.pair_weight
            + intersection(&key_sims, s.close_key) * s.key_weight;
        let center_similarity = anchors
            .center
            .as_deref()
            .map(|c| cosine_similarity(c, vector))
            .unwrap_or(0.0);

        let length = word.chars().count();
        let is_noun = self.is_likely_noun(word);
        let noun_bonus = if is_noun { s.noun_bonus } else { 0.0 };
        let bonuses = noun_bonus
            + (length as f64 / s.length_bonus_divisor).min(s.max_length_bonus)
            + (pair_matches as f64 / 2.0).min(s.max_pair_bonus)
            + very_close_pairs as f64 * s.very_close_pair_bonus
            + (key_matches as f64 / 2.0).min(s.max_multi_key_bonus)
            + very_close_matches as f64 * s.very_close_key_bonus
            + extremely_close_matches as f64 * s.extremely_close_key_bonus;
        let best = intersection_score
            .max(avg_top_pair_similarity)
            .max(avg_top_similarity)
            .max(center_similarity);
        let adjusted = best + bonuses;

        let threshold = if is_noun {
            s.noun_threshold
        } else {
            s.other_threshold
        };
        if adjusted <= threshold {
            return None;
        }

        Some(CandidateScore {
            word: word.to_string(),
            length,
            is_noun,
            adjusted,
            key_matches,
            very_close_matches,
            extremely_close_matches,
            pair_matches,
            very_close_pairs,
            max_key_similarity,
            max_pair_similarity,
            avg_top_similarity,
            avg_top_pair_similarity,
            intersection_score,
            center_similarity,
        })
    }

    /// Morphological guess at nounhood for long candidate words.
    pub fn is_likely_noun(&self, word: &str) -> bool {
        let len = word.chars().count();
        if len < 10 || ["ing", "ed", "ly"].iter().any(|s| word.ends_with(s)) {
            return false;
        }
        let generic = ["tion", "sion", "ness", "ment", "ity", "ance", "ence"]
            .iter()
            .any(|s| word.ends_with(s));
        let specific = ["ship", "hood", "dom", "ism", "ist", "er", "or", "ian"]
            .iter()
            .any(|s| word.ends_with(s));
        (len >= 11 && !generic) || specific || len >= 13
    }
}

/// Lowercase and cleaned forms of every input word.
fn present_forms(words: &[Word]) -> HashSet<String> {
    let mut present = HashSet::new();
    for word in words {
        present.insert(word.surface.to_lowercase());
        present.insert(clean_word(&word.surface));
    }
    present
}

// Key-word extraction: the text's most specific nouns and verbs.
//
// Specificity favours long, repeated, noun-dominant words:
// `frequency * length^1.5 * (2 if mostly NOUN/PROPN else 1)`.
// These key words are the anchors every gap candidate is measured against.

use std::collections::{HashMap, HashSet};

use crate::tagging::{UniversalTag, Word};
use crate::text::clean_word;

use super::embeddings::EmbeddingTable;

/// Minimum cleaned length (exclusive) for a key word.
pub const MIN_KEY_WORD_LEN: usize = 4;

/// Size of the key-word set.
pub const MAX_KEY_WORDS: usize = 20;

/// Nouns guaranteed a place in the key-word set.
pub const GUARANTEED_NOUNS: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyWord {
    pub word: String,
    pub frequency: usize,
    pub length: usize,
    pub is_noun: bool,
    pub specificity: f64,
}

impl KeyWord {
    pub fn new(word: String, frequency: usize, noun_occurrences: usize) -> Self {
        let length = word.chars().count();
        // Dominant tag: nominal in at least half of its occurrences.
        let is_noun = noun_occurrences * 2 >= frequency && noun_occurrences > 0;
        let bonus = if is_noun { 2.0 } else { 1.0 };
        Self {
            specificity: frequency as f64 * (length as f64).powf(1.5) * bonus,
            word,
            frequency,
            length,
            is_noun,
        }
    }
}

/// Score every eligible content word, most specific first. Ties keep the
/// order of first appearance.
pub fn score_key_words(
    words: &[Word],
    embeddings: &EmbeddingTable,
    stoplist: &HashSet<String>,
) -> Vec<KeyWord> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for word in words {
        if !matches!(
            word.tag,
            UniversalTag::Noun | UniversalTag::Verb | UniversalTag::Propn
        ) {
            continue;
        }
        let clean = clean_word(&word.surface);
        if clean.chars().count() <= MIN_KEY_WORD_LEN
            || stoplist.contains(&clean)
            || !embeddings.contains(&clean)
        {
            continue;
        }
        let entry = counts.entry(clean.clone()).or_insert_with(|| {
            order.push(clean);
            (0, 0)
        });
        entry.0 += 1;
        if word.tag.is_nominal() {
            entry.1 += 1;
        }
    }

    let mut scored: Vec<KeyWord> = order
        .into_iter()
        .map(|word| {
            let (frequency, nouns) = counts.get(&word).copied().unwrap_or_default();
            KeyWord::new(word, frequency, nouns)
        })
        .collect();
    // Stable sort: equal scores stay in order of appearance.
    scored.sort_by(|a, b| b.specificity.total_cmp(&a.specificity));
    scored
}

/// The key-word set: the top guaranteed nouns first, then the most specific
/// words overall, deduplicated and capped.
pub fn select_key_words(scored: &[KeyWord]) -> Vec<KeyWord> {
    let nouns = scored.iter().filter(|k| k.is_noun).take(GUARANTEED_NOUNS);
    let top = scored.iter().take(MAX_KEY_WORDS);

    let mut seen: HashSet<&str> = HashSet::new();
    nouns
        .chain(top)
        .filter(|k| seen.insert(k.word.as_str()))
        .take(MAX_KEY_WORDS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(words: &[&str]) -> EmbeddingTable {
        EmbeddingTable::new(words.iter().map(|w| (w.to_string(), vec![1.0, 0.0])))
    }

    #[test]
    fn test_specificity_formula() {
        let k = KeyWord::new("tariff".into(), 2, 2);
        assert!(k.is_noun);
        assert!((k.specificity - 2.0 * 6f64.powf(1.5) * 2.0).abs() < 1e-9);
        let v = KeyWord::new("tariff".into(), 2, 0);
        assert!(!v.is_noun);
    }

    #[test]
    fn test_eligibility_filters() {
        let words = vec![
            Word::new("Tariffs", UniversalTag::Noun),
            Word::new("quickly", UniversalTag::Adv),
            Word::new("good", UniversalTag::Noun),
            Word::new("imports", UniversalTag::Verb),
            Word::new("unknownword", UniversalTag::Noun),
            Word::new("people", UniversalTag::Noun),
        ];
        let stop: HashSet<String> = ["people".to_string()].into_iter().collect();
        let emb = table(&["tariffs", "quickly", "good", "imports", "people"]);
        let scored = score_key_words(&words, &emb, &stop);
        let names: Vec<&str> = scored.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(names, vec!["tariffs", "imports"]);
    }

    #[test]
    fn test_selection_guarantees_nouns_and_caps() {
        let mut scored: Vec<KeyWord> = (0..25)
            .map(|i| KeyWord::new(format!("verbword{i:02}"), 10, 0))
            .collect();
        scored.extend((0..15).map(|i| KeyWord::new(format!("noun{i:02}"), 1, 1)));
        let selected = select_key_words(&scored);
        assert_eq!(selected.len(), MAX_KEY_WORDS);
        assert_eq!(selected.iter().filter(|k| k.is_noun).count(), GUARANTEED_NOUNS);
        assert_eq!(selected[0].word, "noun00");
    }
}

// Frequency counts, the word index and the POS heatmap.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::tagging::{UniversalTag, Word};
use crate::text::clean_word;

/// Words on either side of a match in a context window.
pub const CONTEXT_WINDOW: usize = 7;

/// Upper bound on sampled positions in `pos_segments`.
pub const HEATMAP_SAMPLES: usize = 200;

/// One counted word in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Surface form of the first occurrence.
    pub original: String,
    pub tags: BTreeMap<UniversalTag, usize>,
    pub total_count: usize,
    pub contexts: Vec<ContextEntry>,
}

/// One occurrence of a word inside a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntry {
    pub sentence_index: usize,
    /// Whitespace token offset of the word within its sentence.
    pub word_index: usize,
    /// Up to `CONTEXT_WINDOW` whitespace tokens either side, space-joined.
    pub context: String,
    /// Offset of the word within `context`.
    pub word_position: usize,
    pub sentence: String,
}

/// A run of equal tags in the sampled POS sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosSegment {
    pub tag: UniversalTag,
    pub count: usize,
}

/// True for cleaned forms that take part in frequency counts.
pub fn is_countable(clean: &str) -> bool {
    clean.chars().count() > 1 && clean.chars().any(char::is_alphabetic)
}

pub fn unique_words(words: &[Word]) -> usize {
    words
        .iter()
        .map(|w| w.surface.to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

pub fn pos_counts(words: &[Word]) -> BTreeMap<UniversalTag, usize> {
    let mut counts = BTreeMap::new();
    for word in words {
        *counts.entry(word.tag).or_insert(0) += 1;
    }
    counts
}

pub fn word_frequency(words: &[Word]) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for word in words {
        let clean = clean_word(&word.surface);
        if is_countable(&clean) {
            *frequency.entry(clean).or_insert(0) += 1;
        }
    }
    frequency
}

/// Counted words with frequency 1 and length over 2, in order of appearance.
pub fn hapax_legomena(words: &[Word], frequency: &BTreeMap<String, usize>) -> Vec<String> {
    words
        .iter()
        .map(|w| clean_word(&w.surface))
        .filter(|clean| clean.chars().count() > 2 && frequency.get(clean) == Some(&1))
        .collect()
}

/// Build the word index: per counted word its first surface form, tag
/// counts and every sentence occurrence with a context window.
pub fn word_index(words: &[Word], sentences: &[String]) -> BTreeMap<String, WordEntry> {
    let mut index: BTreeMap<String, WordEntry> = BTreeMap::new();
    for word in words {
        let clean = clean_word(&word.surface);
        if !is_countable(&clean) {
            continue;
        }
        let entry = index.entry(clean).or_insert_with(|| WordEntry {
            original: word.surface.clone(),
            tags: BTreeMap::new(),
            total_count: 0,
            contexts: Vec::new(),
        });
        *entry.tags.entry(word.tag).or_insert(0) += 1;
        entry.total_count += 1;
    }

    for (sentence_index, sentence) in sentences.iter().enumerate() {
        let sentence = sentence.trim();
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        for (word_index, token) in tokens.iter().enumerate() {
            let Some(entry) = index.get_mut(&clean_word(token)) else {
                continue;
            };
            if entry
                .contexts
                .iter()
                .any(|c| c.sentence_index == sentence_index && c.word_index == word_index)
            {
                continue;
            }
            let start = word_index.saturating_sub(CONTEXT_WINDOW);
            let end = (word_index + CONTEXT_WINDOW + 1).min(tokens.len());
            entry.contexts.push(ContextEntry {
                sentence_index,
                word_index,
                context: tokens[start..end].join(" "),
                word_position: word_index - start,
                sentence: sentence.to_string(),
            });
        }
    }

    index
}

/// Sample `sequence` with a fixed stride so at most `max_samples` positions
/// remain, then group consecutive equal tags.
pub fn pos_segments(sequence: &[UniversalTag], max_samples: usize) -> Vec<PosSegment> {
    if sequence.is_empty() || max_samples == 0 {
        return Vec::new();
    }
    let stride = sequence.len().div_ceil(max_samples).max(1);

    let mut segments: Vec<PosSegment> = Vec::new();
    for tag in sequence.iter().step_by(stride) {
        match segments.last_mut() {
            Some(last) if last.tag == *tag => last.count += 1,
            _ => segments.push(PosSegment { tag: *tag, count: 1 }),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(pairs: &[(&str, UniversalTag)]) -> Vec<Word> {
        pairs.iter().map(|(s, t)| Word::new(*s, *t)).collect()
    }

    #[test]
    fn test_countable_words() {
        assert!(is_countable("cat"));
        assert!(is_countable("4th"));
        assert!(!is_countable("a"));
        assert!(!is_countable("42"));
    }

    #[test]
    fn test_hapax_in_order_of_appearance() {
        let w = words(&[
            ("Zebra", UniversalTag::Noun),
            ("ran", UniversalTag::Verb),
            ("apple", UniversalTag::Noun),
            ("ran", UniversalTag::Verb),
            ("to", UniversalTag::Part),
        ]);
        let freq = word_frequency(&w);
        assert_eq!(freq.get("ran"), Some(&2));
        assert_eq!(freq.get("to"), Some(&1));
        assert_eq!(hapax_legomena(&w, &freq), vec!["zebra", "apple"]);
    }

    #[test]
    fn test_context_window_and_dedup() {
        let w = words(&[("cat", UniversalTag::Noun)]);
        let sentences = vec!["one two three four five six seven eight cat nine ten.".to_string()];
        let index = word_index(&w, &sentences);
        let entry = &index["cat"];
        assert_eq!(entry.contexts.len(), 1);
        let ctx = &entry.contexts[0];
        assert_eq!(ctx.word_index, 8);
        assert_eq!(ctx.word_position, 7);
        assert_eq!(ctx.context, "two three four five six seven eight cat nine ten.");
    }

    #[test]
    fn test_context_matches_punctuated_tokens() {
        let w = words(&[("Cats", UniversalTag::Noun), ("cats", UniversalTag::Noun)]);
        let sentences = vec!["Cats, cats everywhere.".to_string()];
        let index = word_index(&w, &sentences);
        let entry = &index["cats"];
        assert_eq!(entry.original, "Cats");
        assert_eq!(entry.total_count, 2);
        assert_eq!(entry.contexts.len(), 2);
    }

    #[test]
    fn test_pos_segments_run_length() {
        use UniversalTag::*;
        let seq = [Noun, Noun, Verb, Noun];
        assert_eq!(
            pos_segments(&seq, 200),
            vec![
                PosSegment { tag: Noun, count: 2 },
                PosSegment { tag: Verb, count: 1 },
                PosSegment { tag: Noun, count: 1 },
            ]
        );
        assert!(pos_segments(&[], 200).is_empty());
    }

    #[test]
    fn test_pos_segments_caps_samples() {
        let seq = vec![UniversalTag::Noun; 1001];
        let total: usize = pos_segments(&seq, 200).iter().map(|s| s.count).sum();
        assert!(total <= 200);
    }
}

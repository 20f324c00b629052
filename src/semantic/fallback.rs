// Curated alternatives for when embeddings cannot produce gaps.

use std::collections::HashSet;

use crate::tagging::{UniversalTag, Word};
use crate::text::clean_word;
use crate::vocabulary::Vocabulary;

/// Hand-picked alternatives for the text's content words, or the
/// last-resort list when none of them has any. Words already in the text
/// are never returned.
pub fn fallback_gaps(words: &[Word], vocabulary: &Vocabulary, max: usize) -> Vec<String> {
    if words.is_empty() {
        return Vec::new();
    }
    let present: HashSet<String> = words.iter().map(|w| clean_word(&w.surface)).collect();

    let heads = words
        .iter()
        .filter(|w| {
            matches!(
                w.tag,
                UniversalTag::Noun | UniversalTag::Verb | UniversalTag::Propn
            )
        })
        .map(|w| clean_word(&w.surface))
        .filter(|c| c.chars().count() > 2);

    let mut gaps: Vec<String> = Vec::new();
    for head in heads {
        let Some(alternatives) = vocabulary.fallback_alternatives.get(&head) else {
            continue;
        };
        for alt in alternatives {
            if alt.chars().count() > 2 && !present.contains(alt) && !gaps.contains(alt) {
                gaps.push(alt.clone());
            }
        }
    }

    if gaps.is_empty() {
        gaps = vocabulary
            .last_resort
            .iter()
            .filter(|w| !present.contains(*w))
            .cloned()
            .collect();
    }
    gaps.truncate(max);
    gaps
}

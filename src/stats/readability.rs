// Flesch Reading Ease with a vowel-cluster syllable estimate.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::tagging::Word;

static VOWEL_CLUSTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[aeiouy]+").expect("valid vowel cluster pattern"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readability {
    pub index: f64,
    pub avg_sentence_length: f64,
}

/// Estimated syllables in a word: vowel clusters in its lowercase letters,
/// one fewer for a final `e`, never below 1. Words without letters have 0.
pub fn syllables(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 0;
    }
    let mut count = VOWEL_CLUSTER.find_iter(&letters).count();
    if letters.ends_with('e') {
        count = count.saturating_sub(1);
    }
    count.max(1)
}

/// `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
///
/// Both values are 0 when there are no words or no sentences.
pub fn flesch(words: &[Word], sentence_count: usize) -> Readability {
    if words.is_empty() || sentence_count == 0 {
        return Readability {
            index: 0.0,
            avg_sentence_length: 0.0,
        };
    }
    let total_words = words.len() as f64;
    let total_syllables: usize = words.iter().map(|w| syllables(&w.surface)).sum();
    let avg_sentence_length = total_words / sentence_count as f64;
    let avg_syllables = total_syllables as f64 / total_words;

    Readability {
        index: 206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables,
        avg_sentence_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::UniversalTag;

    #[test]
    fn test_syllables() {
        assert_eq!(syllables("cats"), 1);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("the"), 1);
        assert_eq!(syllables("reading"), 2);
        assert_eq!(syllables("beautiful"), 3);
        assert_eq!(syllables("rhythm"), 1);
        assert_eq!(syllables("42"), 0);
    }

    #[test]
    fn test_single_sentence_of_monosyllables() {
        let words = vec![
            Word::new("Cats", UniversalTag::Noun),
            Word::new("run", UniversalTag::Verb),
        ];
        let r = flesch(&words, 1);
        assert_eq!(r.avg_sentence_length, 2.0);
        assert!((r.index - 120.205).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let r = flesch(&[], 0);
        assert_eq!(r.index, 0.0);
        assert!(!r.index.is_nan());
    }
}

// The six rhetorical profile dimensions.
//
// Each dimension partitions matches against closed word lists. Matching is
// exact membership of the cleaned word, and a word may count in several
// dimensions (or several categories of one dimension) at once.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::tagging::Word;
use crate::text::clean_word;
use crate::vocabulary::ProfileVocabulary;

/// Ratio reported by the abstraction dimension when nothing matched.
pub const NEUTRAL_ABSTRACTION: f64 = 0.5;

/// One profile dimension: a percentage per category, an optional summary
/// ratio and the distinct matched words per category for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDimension {
    pub percentages: BTreeMap<String, f64>,
    pub ratio: Option<f64>,
    pub example_words: BTreeMap<String, Vec<String>>,
}

impl ProfileDimension {
    pub fn percentage(&self, category: &str) -> f64 {
        self.percentages.get(category).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RhetoricalProfile {
    /// Per sense: matches as a percentage of that sense's list size.
    pub sensory: ProfileDimension,
    /// Absolutes vs hedges; ratio is the absolutes index.
    pub confidence: ProfileDimension,
    /// Concrete vs abstract; ratio 1.0 is fully concrete.
    pub abstraction: ProfileDimension,
    /// Subjective vs objective; ratio is the subjective share.
    pub perspective: ProfileDimension,
    /// Past, present and future cue words.
    pub temporal: ProfileDimension,
    /// Causality, contrast and addition connectives.
    pub argumentation: ProfileDimension,
}

/// Match counts and distinct original-case matches per category.
struct Tally {
    counts: Vec<usize>,
    examples: Vec<Vec<String>>,
}

fn tally(words: &[Word], lists: &[&[String]]) -> Tally {
    let sets: Vec<HashSet<&str>> = lists
        .iter()
        .map(|list| list.iter().map(String::as_str).collect())
        .collect();
    let mut counts = vec![0; lists.len()];
    let mut examples: Vec<Vec<String>> = vec![Vec::new(); lists.len()];

    for word in words {
        let clean = clean_word(&word.surface);
        for (i, set) in sets.iter().enumerate() {
            if set.contains(clean.as_str()) {
                counts[i] += 1;
                if !examples[i].contains(&word.surface) {
                    examples[i].push(word.surface.clone());
                }
            }
        }
    }
    Tally { counts, examples }
}

fn examples_map(names: &[&str], examples: Vec<Vec<String>>) -> BTreeMap<String, Vec<String>> {
    names
        .iter()
        .map(|n| n.to_string())
        .zip(examples)
        .collect()
}

/// Percentages over the combined total, with the total floored at 1.
fn shares(names: &[&str], counts: &[usize]) -> BTreeMap<String, f64> {
    let total = counts.iter().sum::<usize>().max(1) as f64;
    names
        .iter()
        .zip(counts)
        .map(|(n, c)| (n.to_string(), *c as f64 / total * 100.0))
        .collect()
}

/// Two-way dimension whose ratio is `first / max(first + second, 1)`.
fn floored_pair(words: &[Word], names: [&str; 2], lists: [&[String]; 2]) -> ProfileDimension {
    let tally = tally(words, &lists);
    let ratio = tally.counts[0] as f64 / (tally.counts[0] + tally.counts[1]).max(1) as f64;
    ProfileDimension {
        percentages: shares(&names, &tally.counts),
        ratio: Some(ratio),
        example_words: examples_map(&names, tally.examples),
    }
}

/// Three-way dimension of shares over the combined total.
fn three_way(words: &[Word], names: [&str; 3], lists: [&[String]; 3]) -> ProfileDimension {
    let tally = tally(words, &lists);
    ProfileDimension {
        percentages: shares(&names, &tally.counts),
        ratio: None,
        example_words: examples_map(&names, tally.examples),
    }
}

pub fn sensory(words: &[Word], vocab: &ProfileVocabulary) -> ProfileDimension {
    let names = ["sight", "sound", "touch", "smell", "taste"];
    let s = &vocab.sensory;
    let lists: [&[String]; 5] = [&s.sight, &s.sound, &s.touch, &s.smell, &s.taste];
    let tally = tally(words, &lists);
    let percentages = names
        .iter()
        .zip(lists.iter().zip(&tally.counts))
        .map(|(n, (list, count))| {
            let score = if list.is_empty() {
                0.0
            } else {
                *count as f64 / list.len() as f64 * 100.0
            };
            (n.to_string(), score)
        })
        .collect();
    ProfileDimension {
        percentages,
        ratio: None,
        example_words: examples_map(&names, tally.examples),
    }
}

pub fn confidence(words: &[Word], vocab: &ProfileVocabulary) -> ProfileDimension {
    let c = &vocab.confidence;
    floored_pair(words, ["absolutes", "hedges"], [&c.absolutes, &c.hedges])
}

pub fn abstraction(words: &[Word], vocab: &ProfileVocabulary) -> ProfileDimension {
    let names = ["concrete", "abstract"];
    let a = &vocab.abstraction;
    let lists: [&[String]; 2] = [&a.concrete, &a.abstract_];
    let tally = tally(words, &lists);
    let total = tally.counts[0] + tally.counts[1];

    // Unlike the floored dimensions, no matches means neutral, not zero.
    let (percentages, ratio) = if total == 0 {
        (
            names
                .iter()
                .map(|n| (n.to_string(), 0.0))
                .collect::<BTreeMap<_, _>>(),
            NEUTRAL_ABSTRACTION,
        )
    } else {
        (
            shares(&names, &tally.counts),
            tally.counts[0] as f64 / total as f64,
        )
    };
    ProfileDimension {
        percentages,
        ratio: Some(ratio),
        example_words: examples_map(&names, tally.examples),
    }
}

pub fn perspective(words: &[Word], vocab: &ProfileVocabulary) -> ProfileDimension {
    let p = &vocab.perspective;
    floored_pair(words, ["subjective", "objective"], [&p.subjective, &p.objective])
}

pub fn temporal(words: &[Word], vocab: &ProfileVocabulary) -> ProfileDimension {
    let t = &vocab.temporal;
    three_way(words, ["past", "present", "future"], [&t.past, &t.present, &t.future])
}

pub fn argumentation(words: &[Word], vocab: &ProfileVocabulary) -> ProfileDimension {
    let a = &vocab.argumentation;
    three_way(
        words,
        ["causality", "contrast", "addition"],
        [&a.causality, &a.contrast, &a.addition],
    )
}

pub fn rhetorical_profile(words: &[Word], vocab: &ProfileVocabulary) -> RhetoricalProfile {
    RhetoricalProfile {
        sensory: sensory(words, vocab),
        confidence: confidence(words, vocab),
        abstraction: abstraction(words, vocab),
        perspective: perspective(words, vocab),
        temporal: temporal(words, vocab),
        argumentation: argumentation(words, vocab),
    }
}

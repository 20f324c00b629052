// Statistics tests: counts, readability, profile and the word index.
//
// Words are built by hand so each property is checked independently of the
// taggers.

use gaps::stats::readability::syllables;
use gaps::stats::{compute_stats, Stats};
use gaps::tagging::{UniversalTag, Word};
use gaps::vocabulary::Vocabulary;

fn stats_for(pairs: &[(&str, UniversalTag)], sentences: &[&str]) -> Stats {
    let words: Vec<Word> = pairs.iter().map(|(s, t)| Word::new(*s, *t)).collect();
    let sentences: Vec<String> = sentences.iter().map(|s| s.to_string()).collect();
    compute_stats(&words, &sentences, &Vocabulary::builtin().unwrap())
}

fn sample() -> Stats {
    use UniversalTag::*;
    stats_for(
        &[
            ("The", Det),
            ("committee", Noun),
            ("never", Adv),
            ("approved", Verb),
            ("the", Det),
            ("plan", Noun),
            ("The", Det),
            ("plan", Noun),
            ("might", Aux),
            ("change", Verb),
        ],
        &["The committee never approved the plan.", "The plan might change."],
    )
}

// ============================================================
// Counts
// ============================================================

#[test]
fn pos_counts_sum_to_total_words() {
    let stats = sample();
    assert_eq!(stats.total_words, 10);
    assert_eq!(stats.pos_counts.values().sum::<usize>(), stats.total_words);
    assert_eq!(stats.pos_counts[&UniversalTag::Det], 3);
}

#[test]
fn frequencies_fold_case() {
    let stats = sample();
    assert_eq!(stats.word_frequency["the"], 3);
    assert_eq!(stats.word_frequency["plan"], 2);
    assert_eq!(stats.unique_words, 7);
}

#[test]
fn hapax_keep_text_order() {
    let stats = sample();
    assert_eq!(
        stats.hapax_legomena,
        vec!["committee", "never", "approved", "might", "change"]
    );
}

#[test]
fn pos_sequence_follows_words() {
    let stats = sample();
    assert_eq!(stats.pos_sequence.len(), stats.total_words);
    assert_eq!(stats.pos_sequence[1], UniversalTag::Noun);
}

// ============================================================
// Readability
// ============================================================

#[test]
fn single_short_sentence_readability() {
    let stats = stats_for(
        &[("Cats", UniversalTag::Noun), ("run", UniversalTag::Verb)],
        &["Cats run."],
    );
    assert_eq!(stats.avg_sentence_length, 2.0);
    assert!(stats.readability_index.is_finite());
    assert!((stats.readability_index - 120.205).abs() < 1e-9);
}

#[test]
fn empty_input_has_zero_readability() {
    let stats = stats_for(&[], &[]);
    assert_eq!(stats.total_words, 0);
    assert_eq!(stats.readability_index, 0.0);
    assert_eq!(stats.avg_sentence_length, 0.0);
    assert!(stats.pos_counts.is_empty());
}

#[test]
fn syllable_heuristic() {
    assert_eq!(syllables("cat"), 1);
    assert_eq!(syllables("table"), 1);
    assert_eq!(syllables("committee"), 2);
    assert_eq!(syllables("the"), 1);
    assert_eq!(syllables("42"), 0);
}

// ============================================================
// Rhetorical profile
// ============================================================

#[test]
fn confidence_without_markers_is_zero_not_nan() {
    let stats = stats_for(
        &[("Cats", UniversalTag::Noun), ("run", UniversalTag::Verb)],
        &["Cats run."],
    );
    let confidence = &stats.profile.confidence;
    assert_eq!(confidence.ratio, Some(0.0));
    assert!(confidence.percentages.values().all(|p| *p == 0.0));
}

#[test]
fn confidence_balances_absolutes_and_hedges() {
    let stats = sample();
    let confidence = &stats.profile.confidence;
    assert_eq!(confidence.ratio, Some(0.5));
    assert_eq!(confidence.example_words["absolutes"], vec!["never"]);
    assert_eq!(confidence.example_words["hedges"], vec!["might"]);
}

// ============================================================
// Word index and heatmap
// ============================================================

#[test]
fn word_index_tracks_contexts_per_sentence() {
    let stats = sample();
    let plan = &stats.word_index["plan"];
    assert_eq!(plan.total_count, 2);
    assert_eq!(plan.tags[&UniversalTag::Noun], 2);
    let sentences: Vec<usize> = plan.contexts.iter().map(|c| c.sentence_index).collect();
    assert_eq!(sentences, vec![0, 1]);
    assert_eq!(plan.contexts[1].sentence, "The plan might change.");
}

#[test]
fn search_filters_by_term_and_pos() {
    let stats = sample();
    let hits = stats.search("PLA", None);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, "plan");
    assert!(stats.search("plan", Some(UniversalTag::Verb)).is_empty());

    let everything = stats.search("", None);
    assert_eq!(everything[0].0, "the");
}

#[test]
fn heatmap_samples_long_sequences() {
    let words: Vec<(&str, UniversalTag)> = (0..1000)
        .map(|i| {
            if i % 5 == 0 {
                ("cat", UniversalTag::Noun)
            } else {
                ("ran", UniversalTag::Verb)
            }
        })
        .collect();
    let stats = stats_for(&words, &["cat ran"]);
    let segments = stats.pos_segments();
    let sampled: usize = segments.iter().map(|s| s.count).sum();
    assert_eq!(sampled, 200);
    // A stride of 5 always lands on nouns.
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].tag, UniversalTag::Noun);
}

#[test]
fn stats_serialize_in_camel_case() {
    let json = serde_json::to_value(sample()).unwrap();
    assert!(json.get("totalWords").is_some());
    assert!(json.get("posCounts").unwrap().get("NOUN").is_some());
    assert!(json.get("hapaxLegomena").is_some());
}

// Semantic gap tests: key words, candidate scoring and the fallback path.
//
// Embedding tables are tiny hand-built 3-d spaces where "trade" words all
// point the same way, so acceptance is easy to reason about.

use gaps::semantic::{
    score_key_words, select_key_words, EmbeddingTable, GapFinder, GapSettings,
};
use gaps::tagging::{UniversalTag, Word};
use gaps::vocabulary::Vocabulary;

fn trade_words() -> Vec<Word> {
    vec![
        Word::new("Tariffs", UniversalTag::Noun),
        Word::new("on", UniversalTag::Adp),
        Word::new("imports", UniversalTag::Noun),
        Word::new("and", UniversalTag::Conj),
        Word::new("exports", UniversalTag::Noun),
        Word::new("rose", UniversalTag::Verb),
    ]
}

fn trade_table() -> EmbeddingTable {
    let entries: Vec<(&str, [f64; 3])> = vec![
        ("tariffs", [1.0, 0.0, 0.0]),
        ("imports", [0.9, 0.1, 0.0]),
        ("exports", [0.95, 0.05, 0.0]),
        ("protectionism", [1.0, 0.05, 0.0]),
        ("manufacturer", [0.9, 0.1, 0.0]),
        ("fundamentally", [1.0, 0.0, 0.0]),
        ("regulated", [1.0, 0.0, 0.0]),
        ("globalization", [0.0, 1.0, 0.0]),
        ("photosynthesis", [0.0, 0.0, 1.0]),
    ];
    EmbeddingTable::new(entries.into_iter().map(|(w, v)| (w.to_string(), v.to_vec())))
}

fn vocab() -> Vocabulary {
    Vocabulary::builtin().unwrap()
}

// ============================================================
// Key words
// ============================================================

#[test]
fn key_words_are_long_embedded_content_words() {
    let v = vocab();
    let scored = score_key_words(&trade_words(), &trade_table(), &v.key_word_stoplist());
    let selected: Vec<String> = select_key_words(&scored).into_iter().map(|k| k.word).collect();
    assert_eq!(selected, vec!["tariffs", "imports", "exports"]);
}

// ============================================================
// Gap finding
// ============================================================

#[test]
fn close_candidates_become_gaps() {
    let v = vocab();
    let gaps = GapFinder::new(&v).find_gaps(&trade_words(), &trade_table());
    assert!(gaps.contains(&"protectionism".to_string()));
    assert!(gaps.contains(&"manufacturer".to_string()));
    assert!(!gaps.contains(&"globalization".to_string()));
    assert!(!gaps.contains(&"photosynthesis".to_string()));
}

#[test]
fn lexical_filters_apply_before_similarity() {
    let v = vocab();
    let gaps = GapFinder::new(&v).find_gaps(&trade_words(), &trade_table());
    assert!(!gaps.contains(&"fundamentally".to_string()));
    assert!(!gaps.contains(&"regulated".to_string()));
}

#[test]
fn gaps_never_repeat_input_words() {
    let v = vocab();
    let words = trade_words();
    let gaps = GapFinder::new(&v).find_gaps(&words, &trade_table());
    for gap in &gaps {
        assert!(
            !words.iter().any(|w| w.surface.eq_ignore_ascii_case(gap)),
            "{gap} appears in the input"
        );
    }
}

#[test]
fn settings_cap_the_noun_pool() {
    let v = vocab();
    let settings = GapSettings {
        top_nouns: 1,
        ..GapSettings::default()
    };
    let gaps = GapFinder::with_settings(&v, settings).find_gaps(&trade_words(), &trade_table());
    assert_eq!(gaps.len(), 1);
}

#[test]
fn gap_finding_is_deterministic() {
    let v = vocab();
    let finder = GapFinder::new(&v);
    let first = finder.find_gaps(&trade_words(), &trade_table());
    let second = finder.find_gaps(&trade_words(), &trade_table());
    assert_eq!(first, second);
}

// ============================================================
// Fallback
// ============================================================

#[test]
fn empty_table_uses_curated_alternatives() {
    let v = vocab();
    let words = vec![
        Word::new("Trump", UniversalTag::Propn),
        Word::new("president", UniversalTag::Noun),
        Word::new("spoke", UniversalTag::Verb),
    ];
    let gaps = GapFinder::new(&v).find_gaps(&words, &EmbeddingTable::default());
    assert!(gaps.contains(&"administration".to_string()));
    assert!(!gaps.contains(&"president".to_string()));
}

#[test]
fn no_key_words_falls_back_to_last_resort() {
    let v = vocab();
    let words = vec![
        Word::new("Cats", UniversalTag::Noun),
        Word::new("run", UniversalTag::Verb),
    ];
    let gaps = GapFinder::new(&v).find_gaps(&words, &trade_table());
    assert_eq!(gaps, v.last_resort);
}

#[test]
fn empty_input_has_no_gaps() {
    let v = vocab();
    assert!(GapFinder::new(&v).find_gaps(&[], &trade_table()).is_empty());
}

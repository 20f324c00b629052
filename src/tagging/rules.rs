// Rule-based primary tagger.
//
// A small, dependency-free stand-in for a statistical tagger: a regex
// sentence splitter, a character-class tokenizer that splits clitics the way
// common English tokenizers do, and a closed-class lexicon with suffix
// heuristics. It emits UD-style tags plus PUNCT, which the arbiter maps to
// the universal set. Good enough to drive the pipeline standalone; swap in a
// real engine through `SentenceSegmenter` for serious work.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::traits::{RawToken, SentenceSegmenter, TaggedSentence};
use crate::text::is_apostrophe_char;

/// Clitics split off after an apostrophe.
const CLITICS: [&str; 6] = ["s", "ll", "re", "ve", "d", "m"];

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("valid sentence boundary pattern"));

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    /// Split text into sentence spans, keeping terminal punctuation.
    pub fn split_sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut spans = Vec::new();
        let mut start = 0;
        for m in SENTENCE_BOUNDARY.find_iter(text) {
            let end = m.start() + m.as_str().trim_end().len();
            let span = text[start..end].trim();
            if !span.is_empty() {
                spans.push(span);
            }
            start = m.end();
        }
        let tail = text[start..].trim();
        if !tail.is_empty() {
            spans.push(tail);
        }
        spans
    }
}

impl SentenceSegmenter for RuleTagger {
    fn segment(&self, text: &str) -> Vec<TaggedSentence> {
        self.split_sentences(text)
            .into_iter()
            .map(|span| {
                let pieces = tokenize(span);
                let tokens = pieces
                    .iter()
                    .enumerate()
                    .map(|(i, piece)| {
                        let previous = i.checked_sub(1).map(|p| pieces[p].as_str());
                        RawToken::new(piece.as_str(), tag_token(piece, i, previous), i)
                    })
                    .collect();
                TaggedSentence {
                    text: span.to_string(),
                    tokens,
                }
            })
            .collect()
    }
}

/// Split a sentence into raw tokens.
///
/// Alphanumeric runs form words; every other non-space character is its own
/// token. Clitics are split off ("do" "n't", "Trump" "'s") while internal
/// apostrophes that do not start a clitic stay in the word ("O'Brien").
pub fn tokenize(sentence: &str) -> Vec<String> {
    let chars: Vec<char> = sentence.chars().collect();
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut i = 0;

    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';

    while i < chars.len() {
        let c = chars[i];
        if is_word_char(c) {
            word.push(c);
            i += 1;
            continue;
        }

        if is_apostrophe_char(c) && !word.is_empty() {
            let rest_len = chars[i + 1..]
                .iter()
                .take_while(|c| is_word_char(**c))
                .count();
            let rest: String = chars[i + 1..i + 1 + rest_len].iter().collect();
            let rest_lower = rest.to_lowercase();

            if rest_lower == "t" && word.to_lowercase().ends_with('n') && word.chars().count() > 1 {
                let n = word.pop().unwrap_or('n');
                tokens.push(std::mem::take(&mut word));
                tokens.push(format!("{n}{c}{rest}"));
                i += 1 + rest_len;
                continue;
            }
            if CLITICS.contains(&rest_lower.as_str()) {
                tokens.push(std::mem::take(&mut word));
                tokens.push(format!("{c}{rest}"));
                i += 1 + rest_len;
                continue;
            }
            if rest_len > 0 {
                word.push(c);
                i += 1;
                continue;
            }
        }

        if !word.is_empty() {
            tokens.push(std::mem::take(&mut word));
        }
        if !c.is_whitespace() {
            tokens.push(c.to_string());
        }
        i += 1;
    }

    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

/// UD-style tag for one token given its position and predecessor.
pub fn tag_token(token: &str, position: usize, previous: Option<&str>) -> &'static str {
    if !token.chars().any(char::is_alphanumeric) {
        return "PUNCT";
    }
    if token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return "NUM";
    }

    let lower: String = token
        .chars()
        .map(|c| if is_apostrophe_char(c) { '\'' } else { c })
        .collect::<String>()
        .to_lowercase();

    if let Some(tag) = clitic_tag(&lower) {
        return tag;
    }
    if let Some(tag) = closed_class(&lower) {
        return tag;
    }

    let capitalized = token.chars().next().is_some_and(char::is_uppercase);
    let acronym = token.chars().count() > 1 && token.chars().all(|c| c.is_uppercase());
    if acronym || (capitalized && position > 0) {
        return "PROPN";
    }

    let after_verb_cue = previous
        .map(|p| p.to_lowercase())
        .is_some_and(|p| matches!(closed_class(&p), Some("AUX" | "PRON")) || p == "to");
    suffix_tag(&lower, after_verb_cue)
}

fn clitic_tag(lower: &str) -> Option<&'static str> {
    match lower {
        "n't" | "'s" => Some("PART"),
        "'ll" | "'re" | "'ve" | "'m" | "'d" => Some("AUX"),
        _ => None,
    }
}

fn suffix_tag(lower: &str, after_verb_cue: bool) -> &'static str {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        "ADV"
    } else if len > 4 && (lower.ends_with("ing") || lower.ends_with("ed")) {
        "VERB"
    } else if len > 5
        && ["ous", "ful", "less", "ive", "able", "ible", "ical", "ial"]
            .iter()
            .any(|s| lower.ends_with(s))
    {
        "ADJ"
    } else if after_verb_cue {
        "VERB"
    } else {
        "NOUN"
    }
}

fn closed_class(lower: &str) -> Option<&'static str> {
    let tag = match lower {
        "the" | "a" | "an" | "this" | "that" | "these" | "those" | "every" | "each" | "some"
        | "any" | "no" | "all" | "both" | "either" | "neither" | "another" => "DET",
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "her" | "us"
        | "them" | "my" | "your" | "his" | "its" | "our" | "their" | "mine" | "yours"
        | "ours" | "theirs" | "myself" | "yourself" | "himself" | "herself" | "itself"
        | "ourselves" | "themselves" | "who" | "whom" | "what" | "which" | "someone"
        | "something" | "anyone" | "anything" | "everyone" | "everything" | "nobody"
        | "nothing" => "PRON",
        "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between"
        | "into" | "through" | "during" | "before" | "after" | "above" | "below" | "from"
        | "up" | "down" | "of" | "off" | "over" | "under" | "across" | "among" | "without"
        | "within" | "toward" | "towards" | "upon" | "like" | "near" => "ADP",
        "and" | "or" | "but" | "nor" | "so" | "yet" | "because" | "although" | "though"
        | "if" | "unless" | "while" | "whereas" | "since" | "whether" => "CONJ",
        "is" | "are" | "was" | "were" | "be" | "been" | "being" | "am" | "do" | "does"
        | "did" | "have" | "has" | "had" | "will" | "would" | "shall" | "should" | "can"
        | "could" | "may" | "might" | "must" | "won't" | "can't" | "don't" | "isn't"
        | "aren't" | "wasn't" | "weren't" | "doesn't" | "didn't" => "AUX",
        "not" | "to" => "PART",
        "very" | "too" | "also" | "just" | "only" | "even" | "still" | "never" | "always"
        | "often" | "here" | "there" | "now" | "then" | "soon" | "already" | "again"
        | "perhaps" | "maybe" | "almost" | "quite" | "rather" | "when" | "where" | "why"
        | "how" => "ADV",
        "oh" | "wow" | "hello" | "hi" | "hey" | "yes" | "ouch" | "oops" | "alas" => "INTJ",
        "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
        | "ten" | "hundred" | "thousand" | "million" | "billion" => "NUM",
        "good" | "bad" | "new" | "old" | "big" | "small" | "great" | "high" | "low"
        | "long" | "short" | "large" | "little" | "young" | "important" | "different"
        | "same" | "real" | "best" | "better" | "own" | "other" | "many" | "much" | "more"
        | "most" | "few" => "ADJ",
        _ => return None,
    };
    Some(tag)
}

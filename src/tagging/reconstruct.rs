// Word reconstruction from a tagger's raw token stream.
//
// Tokenizers split "don't" into "do" + "n't", "Trump's" into "Trump" + "'" +
// "s", "low-budget" into three pieces, and brand names like "ChatGPT" into
// "Chat" + "GPT". This module undoes that with a single left-to-right pass
// over each sentence.
//
// The pass is driven by an ordered rule list. At every position the rules
// are tried in `RULES` order and the first one that matches decides what
// happens to the next one to three tokens. Each rule is a variant of `Rule`
// so it can be tested on its own and the precedence is visible in one place.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::RawToken;
use crate::text::{
    has_apostrophe, is_alphabetic_word, is_apostrophe_char, is_lone_apostrophe,
    is_punctuation_only, normalize_apostrophes,
};
use crate::vocabulary::Vocabulary;

/// Native tag given to a word that absorbs a negation or auxiliary suffix.
const AUX_TAG: &str = "AUX";

/// Suffixes accepted after a split-off apostrophe (`word ' suffix`).
const SPLIT_SUFFIXES: [&str; 7] = ["s", "d", "ll", "re", "ve", "t", "m"];

/// A reconstructed word still carrying the primary tagger's native tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub surface: String,
    pub tag: String,
}

impl Fragment {
    pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
        }
    }
}

/// Reconstruction rules, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `'s` token: attach to the previous word as a possessive.
    Possessive,
    /// `n't`, `'ll`, `'re`, `'ve`, `'d`, `'m`: attach and retag the host AUX.
    ContractionSuffix,
    /// Any other token containing an apostrophe (`O'Brien`): keep standalone.
    ApostropheWord,
    /// `word` `'` `suffix` across three tokens: merge.
    SplitContraction,
    /// A lone apostrophe left over: drop it or attach it to the previous word.
    LoneApostrophe,
    /// `word` `-` `word`: merge into a hyphenated compound.
    Hyphenated,
    /// `-` `word` directly after a merged compound: extend the compound.
    HyphenContinuation,
    /// A hyphen with no word on both sides: drop.
    StrayHyphen,
    /// Two tokens forming a whitelisted compound name: concatenate.
    Compound,
    /// Anything else: keep as-is.
    Keep,
}

/// Every rule in priority order.
pub const RULES: [Rule; 10] = [
    Rule::Possessive,
    Rule::ContractionSuffix,
    Rule::ApostropheWord,
    Rule::SplitContraction,
    Rule::LoneApostrophe,
    Rule::Hyphenated,
    Rule::HyphenContinuation,
    Rule::StrayHyphen,
    Rule::Compound,
    Rule::Keep,
];

/// What a matching rule does with the tokens it consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append `suffix` to the previous word, optionally retagging it.
    Attach {
        suffix: String,
        retag: Option<&'static str>,
    },
    /// Start a new word.
    Emit(Fragment),
    /// Discard the consumed tokens.
    Drop,
}

/// A matched rule and how many raw tokens it consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub rule: Rule,
    pub action: Action,
    pub consumed: usize,
}

/// Read-only view of the token stream at the current position.
pub struct Window<'a> {
    tokens: &'a [RawToken],
    pos: usize,
    previous: Option<&'a str>,
}

impl<'a> Window<'a> {
    /// `previous` is the surface of the last word emitted in this sentence.
    pub fn new(tokens: &'a [RawToken], pos: usize, previous: Option<&'a str>) -> Self {
        Self {
            tokens,
            pos,
            previous,
        }
    }

    fn ahead(&self, offset: usize) -> Option<&'a RawToken> {
        self.tokens.get(self.pos + offset)
    }

    fn has_previous_word(&self) -> bool {
        self.previous.is_some()
    }
}

impl Rule {
    /// Try this rule at the window's position. `None` means "does not apply",
    /// including every case where the lookahead would run past the sentence.
    pub fn apply(&self, window: &Window<'_>, vocabulary: &Vocabulary) -> Option<Step> {
        let current = window.ahead(0)?;
        let text = current.text.as_str();
        let step = |action, consumed| {
            Some(Step {
                rule: *self,
                action,
                consumed,
            })
        };

        match self {
            Rule::Possessive => {
                if !window.has_previous_word() || !is_possessive_token(text) {
                    return None;
                }
                step(
                    Action::Attach {
                        suffix: "'s".to_string(),
                        retag: None,
                    },
                    1,
                )
            }
            Rule::ContractionSuffix => {
                if !window.has_previous_word() || !has_apostrophe(text) {
                    return None;
                }
                let suffix = contraction_suffix(text)?;
                step(
                    Action::Attach {
                        suffix,
                        retag: Some(AUX_TAG),
                    },
                    1,
                )
            }
            Rule::ApostropheWord => {
                if !has_apostrophe(text) || is_lone_apostrophe(text) {
                    return None;
                }
                step(
                    Action::Emit(Fragment::new(normalize_apostrophes(text), &current.tag)),
                    1,
                )
            }
            Rule::SplitContraction => {
                if !is_word_token(text) {
                    return None;
                }
                let apostrophe = window.ahead(1)?;
                let suffix = window.ahead(2)?;
                if !is_lone_apostrophe(&apostrophe.text) {
                    return None;
                }
                let suffix = split_suffix(&suffix.text)?;
                step(
                    Action::Emit(Fragment::new(format!("{text}'{suffix}"), &current.tag)),
                    3,
                )
            }
            Rule::LoneApostrophe => {
                if !is_lone_apostrophe(text) {
                    return None;
                }
                if !window.has_previous_word() {
                    return step(Action::Drop, 1);
                }
                // A following suffix belongs to the previous word ("low-budget ' s").
                if let Some(suffix) = window.ahead(1).and_then(|t| split_suffix(&t.text)) {
                    return step(
                        Action::Attach {
                            suffix: format!("'{suffix}"),
                            retag: None,
                        },
                        2,
                    );
                }
                step(
                    Action::Attach {
                        suffix: "'".to_string(),
                        retag: None,
                    },
                    1,
                )
            }
            Rule::Hyphenated => {
                if !is_word_token(text) {
                    return None;
                }
                let hyphen = window.ahead(1)?;
                let second = window.ahead(2)?;
                if hyphen.text != "-" || !is_alphabetic_word(&second.text) {
                    return None;
                }
                step(
                    Action::Emit(Fragment::new(
                        format!("{text}-{}", second.text),
                        &current.tag,
                    )),
                    3,
                )
            }
            Rule::HyphenContinuation => {
                if text != "-" {
                    return None;
                }
                let previous = window.previous?;
                let next = window.ahead(1)?;
                if !is_hyphenated_word(previous) || !is_alphabetic_word(&next.text) {
                    return None;
                }
                step(
                    Action::Attach {
                        suffix: format!("-{}", next.text),
                        retag: None,
                    },
                    2,
                )
            }
            Rule::StrayHyphen => (text == "-").then(|| Step {
                rule: *self,
                action: Action::Drop,
                consumed: 1,
            }),
            Rule::Compound => {
                let second = window.ahead(1)?;
                if !vocabulary.is_compound(text, &second.text) {
                    return None;
                }
                step(
                    Action::Emit(Fragment::new(
                        format!("{text}{}", second.text),
                        &current.tag,
                    )),
                    2,
                )
            }
            Rule::Keep => step(Action::Emit(Fragment::new(text, &current.tag)), 1),
        }
    }
}

/// Rebuilds surface words from one sentence's raw tokens.
pub struct Reconstructor<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Reconstructor<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Find the first rule that applies at `pos`.
    pub fn step(&self, tokens: &[RawToken], pos: usize, previous: Option<&str>) -> Option<Step> {
        let window = Window::new(tokens, pos, previous);
        RULES
            .iter()
            .find_map(|rule| rule.apply(&window, self.vocabulary))
    }

    /// Reconstruct one sentence, preserving order.
    pub fn reconstruct(&self, tokens: &[RawToken]) -> Vec<Fragment> {
        let mut words: Vec<Fragment> = Vec::with_capacity(tokens.len());
        let mut pos = 0;

        while pos < tokens.len() {
            // Keep always matches; `None` cannot happen.
            let Some(step) = self.step(tokens, pos, words.last().map(|w| w.surface.as_str())) else {
                break;
            };

            match step.action {
                Action::Attach { suffix, retag } => {
                    if let Some(previous) = words.last_mut() {
                        previous.surface.push_str(&suffix);
                        if let Some(tag) = retag {
                            previous.tag = tag.to_string();
                        }
                    }
                }
                Action::Emit(fragment) => {
                    if is_punctuation_only(&fragment.surface) {
                        debug!(token = %fragment.surface, "Discarded punctuation fragment");
                    } else {
                        words.push(fragment);
                    }
                }
                Action::Drop => {
                    debug!(rule = ?step.rule, token = %tokens[pos].text, "Dropped token");
                }
            }

            pos += step.consumed.max(1);
        }

        words
    }
}

/// Apostrophe variant followed by `s`, and nothing else.
fn is_possessive_token(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some('s' | 'S'), None) if is_apostrophe_char(a)
    )
}

/// Canonical form of a contraction suffix token, if it is one.
fn contraction_suffix(text: &str) -> Option<String> {
    let normalized = normalize_apostrophes(text).to_lowercase();
    let body = normalized.strip_prefix('\'').unwrap_or(&normalized);
    match body {
        "n't" | "nt" => Some("n't".to_string()),
        "ll" | "re" | "ve" | "d" | "m" => Some(format!("'{body}")),
        _ => None,
    }
}

/// Lowercased suffix if the token may follow a split-off apostrophe.
fn split_suffix(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    SPLIT_SUFFIXES.contains(&lower.as_str()).then_some(lower)
}

/// Letters only, optionally joined by single hyphens (`state-of-the`).
fn is_hyphenated_word(word: &str) -> bool {
    word.split('-').all(is_alphabetic_word)
}

/// A token that can host a suffix or start a compound.
fn is_word_token(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric) && !has_apostrophe(text) && text != "-"
}

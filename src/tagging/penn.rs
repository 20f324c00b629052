// Lexicon-based secondary tagger emitting Penn Treebank tags.
//
// Works on the normalized forms the arbiter hands it (lowercased except for
// all-caps words), so it cannot see capitalization and only calls acronyms NNP.
// Its value is a second opinion on adjectives, verbs and modals that is
// independent of the primary tagger's position heuristics.

use super::traits::SecondaryTagger;
use crate::error::AnalysisError;
use crate::text::normalize_apostrophes;

#[derive(Debug, Clone, Copy, Default)]
pub struct PennTagger;

impl PennTagger {
    pub fn new() -> Self {
        Self
    }
}

impl SecondaryTagger for PennTagger {
    fn tag(&self, words: &[String]) -> Result<Vec<String>, AnalysisError> {
        let mut tags: Vec<String> = Vec::with_capacity(words.len());
        for word in words {
            let previous = tags.last().map(String::as_str);
            tags.push(penn_tag(word, previous).to_string());
        }
        Ok(tags)
    }
}

/// Penn tag for one normalized word given the previous word's tag.
pub fn penn_tag(word: &str, previous: Option<&str>) -> &'static str {
    if word.is_empty() {
        return "";
    }
    if word.chars().count() > 1 && word.chars().all(|c| c.is_ascii_uppercase()) {
        return "NNP";
    }
    if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return "CD";
    }

    let lower = normalize_apostrophes(word).to_lowercase();
    if let Some(tag) = lexicon(&lower) {
        return tag;
    }
    if let Some(tag) = contraction(&lower) {
        return tag;
    }

    let after_to_or_modal = matches!(previous, Some("TO" | "MD"));
    let after_determiner = matches!(previous, Some("DT" | "PRP$" | "JJ"));
    suffix(&lower, after_to_or_modal, after_determiner)
}

fn contraction(lower: &str) -> Option<&'static str> {
    if lower.ends_with("n't") {
        return Some(match lower {
            "won't" | "can't" | "couldn't" | "shouldn't" | "wouldn't" => "MD",
            "didn't" | "hadn't" | "wasn't" | "weren't" => "VBD",
            "doesn't" | "hasn't" | "isn't" => "VBZ",
            _ => "VBP",
        });
    }
    if lower.ends_with("'ll") || lower.ends_with("'d") {
        return Some("MD");
    }
    if lower.ends_with("'re") || lower.ends_with("'ve") || lower.ends_with("'m") {
        return Some("VBP");
    }
    if lower.ends_with("'s") {
        return Some(match lower {
            "it's" | "he's" | "she's" | "that's" | "there's" | "what's" | "who's" => "VBZ",
            _ => "NN",
        });
    }
    None
}

fn suffix(lower: &str, after_to_or_modal: bool, after_determiner: bool) -> &'static str {
    let len = lower.chars().count();
    if after_to_or_modal && !after_determiner {
        return "VB";
    }
    if len > 4 && lower.ends_with("ly") {
        "RB"
    } else if len > 4 && lower.ends_with("ing") {
        if after_determiner {
            "NN"
        } else {
            "VBG"
        }
    } else if len > 3 && lower.ends_with("ed") {
        "VBD"
    } else if len > 5 && lower.ends_with("iest") {
        "JJS"
    } else if len > 5
        && [
            "ous", "ful", "less", "ive", "able", "ible", "ical", "ial", "ary", "ish", "ent", "ant",
        ]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        "JJ"
    } else if len > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") {
        "NNS"
    } else {
        "NN"
    }
}

fn lexicon(lower: &str) -> Option<&'static str> {
    let tag = match lower {
        "the" | "a" | "an" | "this" | "that" | "these" | "those" | "every" | "each" | "some"
        | "any" | "no" | "another" | "either" | "neither" => "DT",
        "all" | "both" | "half" => "PDT",
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
        | "myself" | "yourself" | "himself" | "herself" | "itself" | "ourselves"
        | "themselves" | "someone" | "something" | "anyone" | "anything" | "everyone"
        | "everything" | "nobody" | "nothing" | "mine" | "yours" | "ours" | "theirs" => "PRP",
        "my" | "your" | "his" | "her" | "its" | "our" | "their" => "PRP$",
        "who" | "whom" | "what" => "WP",
        "whose" => "WP$",
        "which" => "WDT",
        "when" | "where" | "why" | "how" => "WRB",
        "there" => "EX",
        "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between"
        | "into" | "through" | "during" | "before" | "after" | "above" | "below" | "from"
        | "of" | "off" | "over" | "under" | "across" | "among" | "without" | "within"
        | "toward" | "towards" | "upon" | "like" | "near" | "because" | "although"
        | "though" | "if" | "unless" | "while" | "whereas" | "since" | "whether" => "IN",
        "and" | "or" | "but" | "nor" | "yet" | "so" => "CC",
        "to" => "TO",
        "will" | "would" | "shall" | "should" | "can" | "could" | "may" | "might" | "must" => {
            "MD"
        }
        "is" | "has" | "does" => "VBZ",
        "are" | "am" | "have" | "do" => "VBP",
        "was" | "were" | "had" | "did" | "said" | "made" | "went" | "got" | "took" | "came"
        | "saw" | "knew" | "thought" | "told" | "became" | "left" | "felt" | "brought" => "VBD",
        "be" => "VB",
        "been" | "done" | "gone" | "known" | "seen" | "taken" | "given" => "VBN",
        "being" => "VBG",
        "not" | "very" | "too" | "also" | "just" | "only" | "even" | "still" | "never"
        | "always" | "often" | "here" | "now" | "then" | "soon" | "already" | "again"
        | "perhaps" | "maybe" | "almost" | "quite" | "rather" | "n't" => "RB",
        "up" | "out" => "RP",
        "oh" | "wow" | "hello" | "hi" | "hey" | "yes" | "ouch" | "oops" | "alas" => "UH",
        "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
        | "ten" | "hundred" | "thousand" | "million" | "billion" => "CD",
        "good" | "bad" | "new" | "old" | "big" | "small" | "great" | "high" | "low"
        | "long" | "short" | "large" | "little" | "young" | "important" | "different"
        | "same" | "real" | "own" | "other" | "many" | "much" | "few" => "JJ",
        "better" | "more" | "less" | "worse" => "JJR",
        "best" | "most" | "least" | "worst" => "JJS",
        _ => return None,
    };
    Some(tag)
}

// The universal tagset and the mapping from tagger-native tags into it.
//
// Both taggers speak their own dialect: the primary emits UD-style tags
// (NOUN, PROPN, AUX, PUNCT, ...), the secondary Penn Treebank tags (NN, VBZ,
// MD, ...). Everything that leaves the arbiter is a `UniversalTag`.

use serde::{Deserialize, Serialize};

/// Closed universal part-of-speech tagset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UniversalTag {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Conj,
    Num,
    Part,
    Intj,
    X,
}

impl UniversalTag {
    pub const ALL: [UniversalTag; 14] = [
        UniversalTag::Noun,
        UniversalTag::Propn,
        UniversalTag::Verb,
        UniversalTag::Aux,
        UniversalTag::Adj,
        UniversalTag::Adv,
        UniversalTag::Pron,
        UniversalTag::Det,
        UniversalTag::Adp,
        UniversalTag::Conj,
        UniversalTag::Num,
        UniversalTag::Part,
        UniversalTag::Intj,
        UniversalTag::X,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UniversalTag::Noun => "NOUN",
            UniversalTag::Propn => "PROPN",
            UniversalTag::Verb => "VERB",
            UniversalTag::Aux => "AUX",
            UniversalTag::Adj => "ADJ",
            UniversalTag::Adv => "ADV",
            UniversalTag::Pron => "PRON",
            UniversalTag::Det => "DET",
            UniversalTag::Adp => "ADP",
            UniversalTag::Conj => "CONJ",
            UniversalTag::Num => "NUM",
            UniversalTag::Part => "PART",
            UniversalTag::Intj => "INTJ",
            UniversalTag::X => "X",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            UniversalTag::Noun => "Noun",
            UniversalTag::Propn => "Proper noun",
            UniversalTag::Verb => "Verb",
            UniversalTag::Aux => "Auxiliary",
            UniversalTag::Adj => "Adjective",
            UniversalTag::Adv => "Adverb",
            UniversalTag::Pron => "Pronoun",
            UniversalTag::Det => "Determiner",
            UniversalTag::Adp => "Preposition",
            UniversalTag::Conj => "Conjunction",
            UniversalTag::Num => "Number",
            UniversalTag::Part => "Particle",
            UniversalTag::Intj => "Interjection",
            UniversalTag::X => "Other",
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, UniversalTag::Noun | UniversalTag::Propn)
    }

    /// Map any native tag (Penn Treebank or UD-style) to the universal set.
    ///
    /// Total: unknown and empty strings map to `X`.
    pub fn from_native(tag: &str) -> Self {
        let upper = tag.trim().to_uppercase();
        if upper.is_empty() {
            return UniversalTag::X;
        }
        penn_prefix(&upper)
            .or_else(|| universal_name(&upper))
            .unwrap_or(UniversalTag::X)
    }
}

impl std::fmt::Display for UniversalTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UniversalTag {
    type Err = String;

    /// Strict parse of a universal tag name, for user input such as `--pos`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        UniversalTag::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| format!("unknown POS tag: {s}"))
    }
}

/// Map a secondary-tagger (Penn) tag, falling back to the primary tag when
/// the secondary produced nothing for this position.
pub fn map_secondary(tag: &str, fallback: UniversalTag) -> UniversalTag {
    if tag.trim().is_empty() {
        fallback
    } else {
        UniversalTag::from_native(tag)
    }
}

/// Penn Treebank rules. Exact tags are matched before prefixes so NNP is not
/// swallowed by NN.
fn penn_prefix(upper: &str) -> Option<UniversalTag> {
    let tag = match upper {
        "NNP" | "NNPS" => UniversalTag::Propn,
        "MD" => UniversalTag::Aux,
        "TO" | "RP" | "POS" => UniversalTag::Part,
        "UH" => UniversalTag::Intj,
        "EX" | "WP" | "WP$" => UniversalTag::Pron,
        "WDT" | "PDT" => UniversalTag::Det,
        "WRB" => UniversalTag::Adv,
        t if t.starts_with("NN") => UniversalTag::Noun,
        t if t.starts_with("VB") => UniversalTag::Verb,
        t if t.starts_with("JJ") => UniversalTag::Adj,
        t if t.starts_with("RB") => UniversalTag::Adv,
        t if t.starts_with("PRP") => UniversalTag::Pron,
        t if t.starts_with("DT") => UniversalTag::Det,
        t if t.starts_with("IN") && t != "INTJ" => UniversalTag::Adp,
        t if t.starts_with("CC") => UniversalTag::Conj,
        t if t.starts_with("CD") => UniversalTag::Num,
        _ => return None,
    };
    Some(tag)
}

/// UD-style names and their common spellings.
fn universal_name(upper: &str) -> Option<UniversalTag> {
    let tag = match upper {
        "NOUN" => UniversalTag::Noun,
        "PROPN" => UniversalTag::Propn,
        "VERB" => UniversalTag::Verb,
        "AUX" => UniversalTag::Aux,
        "ADJ" | "ADJECTIVE" => UniversalTag::Adj,
        "ADV" | "ADVERB" => UniversalTag::Adv,
        "PRON" | "PRONOUN" => UniversalTag::Pron,
        "DET" | "ART" | "DETERMINER" | "ARTICLE" => UniversalTag::Det,
        "ADP" | "PREP" | "PREPOSITION" => UniversalTag::Adp,
        "CONJ" | "CCONJ" | "SCONJ" | "CONJUNCTION" => UniversalTag::Conj,
        "NUM" | "NUMBER" => UniversalTag::Num,
        "PART" | "PARTICLE" => UniversalTag::Part,
        "INTJ" => UniversalTag::Intj,
        _ => return None,
    };
    Some(tag)
}

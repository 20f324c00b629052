// POS arbitration between the primary and secondary taggers.
//
// The primary tagger is better on common nouns and auxiliaries, the
// secondary on adjectives and on words the primary over-eagerly calls
// proper nouns. Arbitration walks an ordered list of decision rules per
// word; the first rule that returns a tag wins. Every rule's output is a
// `UniversalTag`, so no native tag string can leave this module.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::reconstruct::Fragment;
use super::tags::{map_secondary, UniversalTag};
use super::traits::SecondaryTagger;
use crate::text::{is_apostrophe_char, normalize_apostrophes};
use crate::vocabulary::Vocabulary;

/// A reconstructed word with its final universal tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub surface: String,
    pub tag: UniversalTag,
}

impl Word {
    pub fn new(surface: impl Into<String>, tag: UniversalTag) -> Self {
        Self {
            surface: surface.into(),
            tag,
        }
    }
}

/// Everything a decision rule may look at for one word.
pub struct Evidence<'a> {
    pub surface: &'a str,
    /// Primary tag, already normalized to the universal set.
    pub primary: UniversalTag,
    /// Secondary tag in its native (Penn) tagset, uppercased. Empty when the
    /// secondary produced nothing for this position.
    pub secondary: &'a str,
}

impl Evidence<'_> {
    fn secondary_is_verb(&self) -> bool {
        self.secondary.starts_with("VB")
    }

    fn secondary_is_adjective(&self) -> bool {
        self.secondary.starts_with("JJ")
    }

    fn secondary_is_proper(&self) -> bool {
        matches!(self.secondary, "NNP" | "NNPS")
    }

    fn secondary_is_modal(&self) -> bool {
        self.secondary.starts_with("MD")
    }
}

/// Arbitration rules, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Known contraction tagged AUX/VERB by the primary: keep it.
    Contraction,
    /// Primary NOUN against a secondary verb/adjective: keep NOUN.
    NounOverModifier,
    /// Primary PROPN against a secondary verb/adjective: NOUN for known
    /// mis-flagged nouns, otherwise the secondary tag.
    MisflaggedProper,
    /// Primary PROPN confirmed by a secondary NNP/NNPS.
    ConfirmedProper,
    /// Primary AUX unless the secondary says modal or verb.
    Auxiliary,
    /// The secondary's mapped tag, or the primary when it is empty.
    Secondary,
}

pub const DECISIONS: [Decision; 6] = [
    Decision::Contraction,
    Decision::NounOverModifier,
    Decision::MisflaggedProper,
    Decision::ConfirmedProper,
    Decision::Auxiliary,
    Decision::Secondary,
];

impl Decision {
    pub fn decide(&self, evidence: &Evidence<'_>, vocabulary: &Vocabulary) -> Option<UniversalTag> {
        match self {
            Decision::Contraction => {
                let lowered = normalize_apostrophes(evidence.surface).to_lowercase();
                (vocabulary.is_contraction(&lowered)
                    && matches!(evidence.primary, UniversalTag::Aux | UniversalTag::Verb))
                .then_some(evidence.primary)
            }
            Decision::NounOverModifier => (evidence.primary == UniversalTag::Noun
                && (evidence.secondary_is_verb() || evidence.secondary_is_adjective()))
            .then_some(UniversalTag::Noun),
            Decision::MisflaggedProper => {
                if evidence.primary != UniversalTag::Propn
                    || !(evidence.secondary_is_adjective() || evidence.secondary_is_verb())
                {
                    return None;
                }
                let key: String = evidence
                    .surface
                    .to_lowercase()
                    .chars()
                    .filter(|c| !is_apostrophe_char(*c))
                    .collect();
                if vocabulary.is_known_noun(&key) {
                    Some(UniversalTag::Noun)
                } else {
                    Some(UniversalTag::from_native(evidence.secondary))
                }
            }
            Decision::ConfirmedProper => (evidence.primary == UniversalTag::Propn
                && evidence.secondary_is_proper())
            .then_some(UniversalTag::Propn),
            Decision::Auxiliary => (evidence.primary == UniversalTag::Aux
                && !evidence.secondary_is_modal()
                && !evidence.secondary_is_verb())
            .then_some(UniversalTag::Aux),
            Decision::Secondary => Some(map_secondary(evidence.secondary, evidence.primary)),
        }
    }
}

/// Form handed to the secondary tagger: all-caps words verbatim, everything
/// else lowercased with leading and trailing non-word characters removed.
pub fn secondary_input(surface: &str) -> String {
    if is_all_caps(surface) {
        return surface.to_string();
    }
    let keep = |c: char| c.is_alphanumeric() || c == '_' || is_apostrophe_char(c);
    surface
        .trim_start_matches(|c: char| !keep(c))
        .trim_end_matches(|c: char| !keep(c))
        .to_lowercase()
}

/// Has a letter and no lowercase letters: `I`, `NASA`, `U.S.`.
fn is_all_caps(surface: &str) -> bool {
    surface.chars().any(char::is_alphabetic) && surface.to_uppercase() == surface
}

/// Reconciles one sentence at a time.
pub struct PosArbiter {
    vocabulary: Arc<Vocabulary>,
    secondary: Option<Arc<dyn SecondaryTagger>>,
}

impl PosArbiter {
    pub fn new(vocabulary: Arc<Vocabulary>, secondary: Option<Arc<dyn SecondaryTagger>>) -> Self {
        Self {
            vocabulary,
            secondary,
        }
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Resolve one sentence's fragments into universally tagged words.
    pub fn reconcile(&self, fragments: &[Fragment]) -> Vec<Word> {
        let Some(secondary) = &self.secondary else {
            return primary_only(fragments);
        };

        let inputs: Vec<String> = fragments
            .iter()
            .map(|f| secondary_input(&f.surface))
            .collect();
        let tags = match secondary.tag(&inputs) {
            Ok(tags) => tags,
            Err(e) => {
                warn!(error = %e, words = fragments.len(), "Secondary tagger failed, using primary tags for sentence");
                return primary_only(fragments);
            }
        };

        fragments
            .iter()
            .enumerate()
            .map(|(i, fragment)| {
                let secondary_tag = tags
                    .get(i)
                    .map(|t| t.trim().to_uppercase())
                    .unwrap_or_default();
                let evidence = Evidence {
                    surface: &fragment.surface,
                    primary: UniversalTag::from_native(&fragment.tag),
                    secondary: &secondary_tag,
                };
                Word::new(&fragment.surface, self.decide(&evidence))
            })
            .collect()
    }

    /// Run the decision list for one word.
    pub fn decide(&self, evidence: &Evidence<'_>) -> UniversalTag {
        DECISIONS
            .iter()
            .find_map(|d| d.decide(evidence, &self.vocabulary))
            .unwrap_or(evidence.primary)
    }
}

fn primary_only(fragments: &[Fragment]) -> Vec<Word> {
    fragments
        .iter()
        .map(|f| Word::new(&f.surface, UniversalTag::from_native(&f.tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbiter() -> PosArbiter {
        PosArbiter::new(Arc::new(Vocabulary::builtin().unwrap()), None)
    }

    fn decide(surface: &str, primary: UniversalTag, secondary: &str) -> UniversalTag {
        arbiter().decide(&Evidence {
            surface,
            primary,
            secondary,
        })
    }

    #[test]
    fn test_secondary_input_normalization() {
        assert_eq!(secondary_input("NASA"), "NASA");
        assert_eq!(secondary_input("\"Hello,"), "hello");
        assert_eq!(secondary_input("Don't"), "don't");
        assert_eq!(secondary_input("I"), "I");
        assert_eq!(secondary_input("U.S."), "U.S.");
        assert_eq!(secondary_input("42"), "42");
        assert_eq!(secondary_input("...word"), "word");
    }

    #[test]
    fn test_contraction_keeps_primary() {
        assert_eq!(decide("don't", UniversalTag::Aux, "JJ"), UniversalTag::Aux);
        assert_eq!(decide("can\u{2019}t", UniversalTag::Verb, "JJ"), UniversalTag::Verb);
    }

    #[test]
    fn test_noun_beats_verb_or_adjective() {
        assert_eq!(decide("run", UniversalTag::Noun, "VB"), UniversalTag::Noun);
        assert_eq!(decide("light", UniversalTag::Noun, "JJ"), UniversalTag::Noun);
        assert_eq!(decide("light", UniversalTag::Noun, "RB"), UniversalTag::Adv);
    }

    #[test]
    fn test_misflagged_proper_noun() {
        assert_eq!(decide("Podcast", UniversalTag::Propn, "VBZ"), UniversalTag::Noun);
        assert_eq!(decide("Brilliant", UniversalTag::Propn, "JJ"), UniversalTag::Adj);
    }

    #[test]
    fn test_confirmed_proper_noun() {
        assert_eq!(decide("Paris", UniversalTag::Propn, "NNP"), UniversalTag::Propn);
    }

    #[test]
    fn test_auxiliary_unless_modal_or_verb() {
        assert_eq!(decide("is", UniversalTag::Aux, "NN"), UniversalTag::Aux);
        assert_eq!(decide("will", UniversalTag::Aux, "MD"), UniversalTag::Aux);
        assert_eq!(decide("has", UniversalTag::Aux, "VBZ"), UniversalTag::Verb);
    }

    #[test]
    fn test_empty_secondary_falls_back_to_primary() {
        assert_eq!(decide("quickly", UniversalTag::Adv, ""), UniversalTag::Adv);
    }
}

// Tagger traits: the seams where external NLP engines plug in.
//
// The primary tagger segments a document into sentences of raw tokens,
// each carrying one native tag. The secondary tagger re-tags an already
// reconstructed word sequence. Either can be swapped without touching the
// reconstructor, arbiter or statistics.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One fragment as emitted by the primary tagger within a sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToken {
    pub text: String,
    pub tag: String,
    #[serde(default)]
    pub index: usize,
}

impl RawToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
            index,
        }
    }
}

/// A sentence as segmented by the primary tagger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSentence {
    /// The sentence's original text span.
    pub text: String,
    pub tokens: Vec<RawToken>,
}

/// Primary tagger ("Tagger A"): sentence segmentation plus one native tag
/// per raw token.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<TaggedSentence>;
}

/// Secondary tagger ("Tagger B"): one native tag per surface form.
///
/// Returning an error marks the tagger unavailable for this sentence; the
/// arbiter then falls back to the primary tags.
pub trait SecondaryTagger: Send + Sync {
    fn tag(&self, words: &[String]) -> Result<Vec<String>, AnalysisError>;
}

/// Somewhere the primary tagger becomes available from, possibly after a
/// delay (a model still loading, a bundle still being fetched).
pub trait TaggerSource: Send + Sync {
    /// Non-blocking check; `None` means "not ready yet".
    fn try_acquire(&self) -> Option<Arc<dyn SentenceSegmenter>>;
}

/// A source whose tagger is ready immediately.
pub struct ReadyTagger(pub Arc<dyn SentenceSegmenter>);

impl TaggerSource for ReadyTagger {
    fn try_acquire(&self) -> Option<Arc<dyn SentenceSegmenter>> {
        Some(Arc::clone(&self.0))
    }
}

// Primary tagger backed by a pre-computed token stream.
//
// Lets an external engine do segmentation and tagging out of process: it
// writes `[{"text": ..., "tokens": [{"text": ..., "tag": ...}]}]` and the
// pipeline replays it. The document text passed to `segment` is ignored.

use super::traits::{SentenceSegmenter, TaggedSentence};

#[derive(Debug, Clone, Default)]
pub struct PretaggedDocument {
    sentences: Vec<TaggedSentence>,
}

impl PretaggedDocument {
    pub fn new(mut sentences: Vec<TaggedSentence>) -> Self {
        for sentence in &mut sentences {
            for (i, token) in sentence.tokens.iter_mut().enumerate() {
                token.index = i;
            }
        }
        Self { sentences }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let sentences: Vec<TaggedSentence> = serde_json::from_str(raw)?;
        Ok(Self::new(sentences))
    }

    /// Plain text of every sentence, space-joined.
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SentenceSegmenter for PretaggedDocument {
    fn segment(&self, _text: &str) -> Vec<TaggedSentence> {
        self.sentences.clone()
    }
}

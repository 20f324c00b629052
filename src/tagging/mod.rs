// Part-of-speech tagging: word reconstruction and tag arbitration.
//
// Raw tokens come from a primary tagger behind `SentenceSegmenter`. The
// reconstructor glues split fragments back into words, then the arbiter
// reconciles the primary tag with an optional secondary tagger and emits
// exactly one `UniversalTag` per word.

pub mod arbiter;
pub mod penn;
pub mod pretagged;
pub mod reconstruct;
pub mod rules;
pub mod tags;
pub mod traits;

pub use arbiter::{PosArbiter, Word};
pub use reconstruct::{Fragment, Reconstructor};
pub use tags::UniversalTag;
pub use traits::{
    RawToken, ReadyTagger, SecondaryTagger, SentenceSegmenter, TaggedSentence, TaggerSource,
};

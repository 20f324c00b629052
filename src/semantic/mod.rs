// Semantic gap detection over static word embeddings.

pub mod embeddings;
pub mod fallback;
pub mod finder;
pub mod keywords;
pub mod loader;

pub use embeddings::{cosine_similarity, EmbeddingTable};
pub use fallback::fallback_gaps;
pub use finder::{CandidateScore, GapFinder, GapSettings};
pub use keywords::{score_key_words, select_key_words, KeyWord};
pub use loader::{source_for, EmbeddingCache, EmbeddingSource, FileSource, HttpSource};

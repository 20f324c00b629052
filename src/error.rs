// Error taxonomy for the analysis pipeline.
//
// Only `TaggerUnavailable` is allowed to abort an analysis. Every other
// variant is produced internally and turned into degraded output at the
// boundary where it occurs (see `tagging::arbiter` and `semantic::loader`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The primary tagger never became available within the bounded wait.
    #[error("Primary tagger unavailable after {attempts} attempts")]
    TaggerUnavailable { attempts: u32 },

    /// The secondary tagger is missing or failed on a sentence.
    #[error("Secondary tagger unavailable: {0}")]
    SecondaryTaggerUnavailable(String),

    /// The embedding payload could not be fetched or parsed.
    #[error("Embedding load failed: {0}")]
    EmbeddingLoadFailure(String),

    /// A vocabulary file could not be read or parsed.
    #[error("Invalid vocabulary: {0}")]
    Vocabulary(String),
}

// Gaps: linguistic profiling and semantic gap detection.
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline or to the ambient plumbing around it.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod semantic;
pub mod stats;
pub mod tagging;
pub mod text;
pub mod vocabulary;

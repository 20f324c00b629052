// Output formatting: the JSON report and terminal display.

pub mod terminal;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::AnalysisResult;
use crate::stats::Stats;
use crate::tagging::UniversalTag;

/// Serialized form of one analysis: parallel `words`/`posTags` arrays,
/// the statistics, and the gaps when they were computed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    pub words: Vec<String>,
    pub pos_tags: Vec<UniversalTag>,
    pub stats: &'a Stats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaps: Option<&'a [String]>,
    pub analyzed_at: DateTime<Utc>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(result: &'a AnalysisResult, gaps: Option<&'a [String]>) -> Self {
        Self {
            words: result.surface_forms(),
            pos_tags: result.pos_tags(),
            stats: &result.stats,
            gaps,
            analyzed_at: Utc::now(),
        }
    }
}

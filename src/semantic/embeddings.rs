// Static word embeddings: a lowercase word -> vector table.
//
// The payload is a JSON object of word -> array of floats, but it may be
// served with junk around it (a download banner, a trailing log line), so
// parsing looks at the span from the first `{` to the last `}` only. A
// payload that still fails to parse becomes an empty table: missing
// embeddings degrade the gap finder to its fallback, they never fail the run.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::AnalysisError;

/// Word vectors keyed by lowercase word. Iteration order is sorted by word,
/// which keeps candidate scans deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingTable {
    vectors: BTreeMap<String, Vec<f64>>,
}

impl EmbeddingTable {
    /// Build a table, lowercasing keys. When two keys fold to the same word the
    /// first in sorted order wins.
    pub fn new(vectors: impl IntoIterator<Item = (String, Vec<f64>)>) -> Self {
        let mut table = BTreeMap::new();
        for (word, vector) in vectors {
            table.entry(word.to_lowercase()).or_insert(vector);
        }
        Self { vectors: table }
    }

    /// Parse a served payload, degrading to an empty table on any failure.
    pub fn parse_payload(payload: &str) -> Self {
        match Self::try_parse_payload(payload) {
            Ok(table) => {
                debug!(words = table.len(), "Parsed embedding payload");
                table
            }
            Err(e) => {
                warn!(error = %e, "Using empty embedding table");
                Self::default()
            }
        }
    }

    /// Parse a served payload, reporting why it could not be used.
    pub fn try_parse_payload(payload: &str) -> Result<Self, AnalysisError> {
        let start = payload
            .find('{')
            .ok_or_else(|| AnalysisError::EmbeddingLoadFailure("no JSON object in payload".into()))?;
        let end = payload
            .rfind('}')
            .filter(|end| *end > start)
            .ok_or_else(|| AnalysisError::EmbeddingLoadFailure("incomplete JSON object".into()))?;

        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&payload[start..=end])
                .map_err(|e| AnalysisError::EmbeddingLoadFailure(format!("invalid JSON: {e}")))?;

        // Entries that are not arrays of numbers are skipped, not fatal.
        let vectors = raw.into_iter().filter_map(|(word, value)| {
            let values = value.as_array()?;
            let vector: Option<Vec<f64>> = values.iter().map(serde_json::Value::as_f64).collect();
            vector.filter(|v| !v.is_empty()).map(|v| (word, v))
        });
        Ok(Self::new(vectors))
    }

    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.vectors.iter().map(|(w, v)| (w.as_str(), v.as_slice()))
    }

    /// Length of the first vector, if any.
    pub fn dimension(&self) -> Option<usize> {
        self.vectors.values().next().map(Vec::len)
    }
}

/// Cosine similarity clamped to [0, 1]. Mismatched, empty or zero vectors
/// score 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Element-wise midpoint of two vectors of equal length.
pub fn midpoint(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b.iter()).map(|(x, y)| (x + y) / 2.0).collect()
}

/// Element-wise mean of vectors sharing the first vector's dimension.
/// Vectors of another length are ignored.
pub fn mean_vector(vectors: &[&[f64]]) -> Option<Vec<f64>> {
    let dim = vectors.first()?.len();
    let same: Vec<&[f64]> = vectors.iter().copied().filter(|v| v.len() == dim).collect();
    let n = same.len() as f64;

    let mut mean = vec![0.0_f64; dim];
    for vector in &same {
        for (i, val) in vector.iter().enumerate() {
            mean[i] += val;
        }
    }
    for val in &mut mean {
        *val /= n;
    }
    Some(mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tolerates_prefix_and_suffix() {
        let payload = "Downloading...\n{\"cat\": [1.0, 0.0], \"Dog\": [0.0, 1.0]}\n-- done";
        let table = EmbeddingTable::parse_payload(payload);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("dog"), Some(&[0.0, 1.0][..]));
        assert_eq!(table.dimension(), Some(2));
    }

    #[test]
    fn test_parse_failure_is_empty_table() {
        assert!(EmbeddingTable::parse_payload("not json at all").is_empty());
        assert!(EmbeddingTable::parse_payload("} backwards {").is_empty());
        assert!(EmbeddingTable::parse_payload("{\"cat\": [1.0,").is_empty());
        assert!(matches!(
            EmbeddingTable::try_parse_payload(""),
            Err(AnalysisError::EmbeddingLoadFailure(_))
        ));
    }

    #[test]
    fn test_parse_skips_non_vector_entries() {
        let table = EmbeddingTable::parse_payload(r#"{"cat": [1, 2], "meta": "v1", "empty": []}"#);
        assert_eq!(table.len(), 1);
        assert!(table.contains("cat"));
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_midpoint_and_mean() {
        assert_eq!(midpoint(&[1.0, 3.0], &[3.0, 5.0]), vec![2.0, 4.0]);
        let vectors: [&[f64]; 2] = [&[1.0, 2.0], &[3.0, 4.0]];
        assert_eq!(mean_vector(&vectors), Some(vec![2.0, 3.0]));
        assert_eq!(mean_vector(&[]), None);
    }
}

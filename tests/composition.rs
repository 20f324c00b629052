// Composition tests: the whole pipeline from raw text to gaps.
//
// These tests chain the built-in taggers, reconstruction, arbitration,
// statistics and the gap finder:
//   RuleTagger -> Reconstructor -> PosArbiter -> Stats -> GapFinder
// without network access. Embeddings come from a temp file or are absent.

use std::sync::Arc;

use gaps::error::AnalysisError;
use gaps::output::AnalysisReport;
use gaps::pipeline::{AnalysisContext, TaggerWait};
use gaps::semantic::{EmbeddingCache, EmbeddingSource, EmbeddingTable, FileSource};
use gaps::tagging::penn::PennTagger;
use gaps::tagging::pretagged::PretaggedDocument;
use gaps::tagging::rules::RuleTagger;
use gaps::tagging::{ReadyTagger, SentenceSegmenter, TaggerSource, UniversalTag};
use gaps::vocabulary::Vocabulary;

const ARTICLE: &str = "Trump's tariffs don't help the low-budget factories. \
    Imports fell while exports rose sharply! Maybe the tariffs will always hurt workers.";

fn context_with(embeddings: EmbeddingCache) -> AnalysisContext {
    AnalysisContext::new(
        Arc::new(Vocabulary::builtin().unwrap()),
        Arc::new(ReadyTagger(Arc::new(RuleTagger::new()))),
        Some(Arc::new(PennTagger::new())),
        embeddings,
    )
}

fn context() -> AnalysisContext {
    context_with(EmbeddingCache::preloaded(EmbeddingTable::default()))
}

// ============================================================
// Chain: text -> words -> stats
// ============================================================

#[tokio::test]
async fn pos_counts_always_sum_to_total() {
    let result = context().analyze(ARTICLE).await.unwrap();
    let stats = &result.stats;
    assert!(stats.total_words > 0);
    assert_eq!(stats.pos_counts.values().sum::<usize>(), stats.total_words);
    assert_eq!(result.words.len(), stats.total_words);
    assert_eq!(stats.sentences.len(), 3);
}

#[tokio::test]
async fn every_tag_is_universal() {
    let result = context().analyze(ARTICLE).await.unwrap();
    for tag in result.pos_tags() {
        assert!(UniversalTag::ALL.contains(&tag));
    }
}

#[tokio::test]
async fn split_forms_are_rebuilt_end_to_end() {
    let result = context().analyze(ARTICLE).await.unwrap();
    let surfaces = result.surface_forms();
    assert!(surfaces.contains(&"Trump's".to_string()));
    assert!(surfaces.contains(&"low-budget".to_string()));

    let dont = result
        .words
        .iter()
        .find(|w| w.surface == "don't")
        .expect("contraction rebuilt");
    assert_eq!(dont.tag, UniversalTag::Aux);
    assert!(!surfaces.iter().any(|s| s == "." || s == "!"));
}

#[tokio::test]
async fn analysis_is_deterministic() {
    let ctx = context();
    let first = ctx.analyze(ARTICLE).await.unwrap();
    let second = ctx.analyze(ARTICLE).await.unwrap();
    assert_eq!(first.surface_forms(), second.surface_forms());
    assert_eq!(first.pos_tags(), second.pos_tags());
    assert_eq!(
        serde_json::to_string(&first.stats).unwrap(),
        serde_json::to_string(&second.stats).unwrap()
    );
}

#[tokio::test]
async fn empty_text_gives_empty_result() {
    let ctx = context();
    let result = ctx.analyze("").await.unwrap();
    assert!(result.words.is_empty());
    assert_eq!(result.stats.total_words, 0);
    assert!(ctx.find_gaps(&result).await.is_empty());
}

// ============================================================
// Chain: pre-tagged stream -> words
// ============================================================

#[tokio::test]
async fn pretagged_stream_runs_through_pipeline() {
    let json = r#"[
        {"text": "Cats don't run.", "tokens": [
            {"text": "Cats", "tag": "NOUN"},
            {"text": "do", "tag": "VERB"},
            {"text": "n't", "tag": "PART"},
            {"text": "run", "tag": "VERB"},
            {"text": ".", "tag": "PUNCT"}
        ]}
    ]"#;
    let document = PretaggedDocument::from_json(json).unwrap();
    let text = document.text();
    let ctx = AnalysisContext::new(
        Arc::new(Vocabulary::builtin().unwrap()),
        Arc::new(ReadyTagger(Arc::new(document))),
        None,
        EmbeddingCache::preloaded(EmbeddingTable::default()),
    );
    let result = ctx.analyze(&text).await.unwrap();
    assert_eq!(result.surface_forms(), vec!["Cats", "don't", "run"]);
    assert_eq!(
        result.pos_tags(),
        vec![UniversalTag::Noun, UniversalTag::Aux, UniversalTag::Verb]
    );
}

// ============================================================
// Chain: tagger availability
// ============================================================

struct NeverReady;

impl TaggerSource for NeverReady {
    fn try_acquire(&self) -> Option<Arc<dyn SentenceSegmenter>> {
        None
    }
}

#[tokio::test]
async fn unavailable_tagger_aborts_analysis() {
    let ctx = AnalysisContext::new(
        Arc::new(Vocabulary::builtin().unwrap()),
        Arc::new(NeverReady),
        None,
        EmbeddingCache::preloaded(EmbeddingTable::default()),
    )
    .with_wait(TaggerWait {
        attempts: 3,
        interval: std::time::Duration::from_millis(1),
    });
    let err = ctx.analyze(ARTICLE).await.unwrap_err();
    assert!(matches!(err, AnalysisError::TaggerUnavailable { attempts: 3 }));
}

// ============================================================
// Chain: embeddings file -> gaps
// ============================================================

const EMBEDDINGS: &str = r#"served by cache v2
{
  "tariffs": [1.0, 0.0, 0.0],
  "imports": [0.9, 0.1, 0.0],
  "exports": [0.95, 0.05, 0.0],
  "factories": [0.9, 0.05, 0.05],
  "workers": [0.8, 0.1, 0.1],
  "protectionism": [1.0, 0.05, 0.0],
  "photosynthesis": [0.0, 0.0, 1.0]
}
"#;

#[tokio::test]
async fn gaps_come_from_embedding_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("embeddings.json");
    std::fs::write(&path, EMBEDDINGS).unwrap();

    let source: Box<dyn EmbeddingSource> = Box::new(FileSource::new(&path));
    let ctx = context_with(EmbeddingCache::new(vec![source]));
    assert!(!ctx.embeddings().is_loaded());

    let result = ctx.analyze(ARTICLE).await.unwrap();
    let gaps = ctx.find_gaps(&result).await;
    assert!(ctx.embeddings().is_loaded());
    assert!(gaps.contains(&"protectionism".to_string()));
    assert!(!gaps.contains(&"photosynthesis".to_string()));

    let surfaces: Vec<String> = result
        .surface_forms()
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    for gap in &gaps {
        assert!(!surfaces.contains(&gap.to_lowercase()));
    }
}

#[tokio::test]
async fn missing_embeddings_fall_back_without_failing() {
    let source: Box<dyn EmbeddingSource> = Box::new(FileSource::new("/nonexistent/gaps.json"));
    let ctx = context_with(EmbeddingCache::new(vec![source]));
    let result = ctx.analyze("The president spoke about Trump.").await.unwrap();
    let gaps = ctx.find_gaps(&result).await;
    assert!(!gaps.is_empty());
    assert!(!gaps.contains(&"president".to_string()));
}

// ============================================================
// Chain: result -> JSON report
// ============================================================

#[tokio::test]
async fn report_serializes_parallel_arrays() {
    let result = context().analyze("Cats run.").await.unwrap();
    let gaps = vec!["felines".to_string()];
    let report = AnalysisReport::new(&result, Some(gaps.as_slice()));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["words"], serde_json::json!(["Cats", "run"]));
    assert_eq!(json["posTags"].as_array().unwrap().len(), 2);
    assert_eq!(json["stats"]["avgSentenceLength"], 2.0);
    assert_eq!(json["gaps"], serde_json::json!(["felines"]));
    assert!(json.get("analyzedAt").is_some());
}

// Analysis pipeline: tag, reconstruct, arbitrate, count, find gaps.
//
// `AnalysisContext` owns everything that lives for a session: the
// vocabulary, the primary tagger (acquired once, after a bounded wait), the
// optional secondary tagger and the embedding cache. Each `analyze` call
// produces a fresh `AnalysisResult` and never mutates shared state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::semantic::{EmbeddingCache, GapFinder, GapSettings};
use crate::stats::{compute_stats, Stats};
use crate::tagging::{
    PosArbiter, Reconstructor, SecondaryTagger, SentenceSegmenter, TaggedSentence, TaggerSource,
    UniversalTag, Word,
};
use crate::vocabulary::Vocabulary;

/// Bounded wait for the primary tagger to become available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggerWait {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for TaggerWait {
    fn default() -> Self {
        Self {
            attempts: 30,
            interval: Duration::from_millis(100),
        }
    }
}

/// The output of one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub words: Vec<Word>,
    pub stats: Stats,
}

impl AnalysisResult {
    pub fn surface_forms(&self) -> Vec<String> {
        self.words.iter().map(|w| w.surface.clone()).collect()
    }

    pub fn pos_tags(&self) -> Vec<UniversalTag> {
        self.words.iter().map(|w| w.tag).collect()
    }

    pub fn sentences(&self) -> &[String] {
        &self.stats.sentences
    }
}

/// Session state shared by every analysis.
pub struct AnalysisContext {
    vocabulary: Arc<Vocabulary>,
    tagger_source: Arc<dyn TaggerSource>,
    primary: OnceCell<Arc<dyn SentenceSegmenter>>,
    wait: TaggerWait,
    arbiter: PosArbiter,
    embeddings: EmbeddingCache,
    gap_settings: GapSettings,
}

impl AnalysisContext {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        tagger_source: Arc<dyn TaggerSource>,
        secondary: Option<Arc<dyn SecondaryTagger>>,
        embeddings: EmbeddingCache,
    ) -> Self {
        if secondary.is_none() {
            warn!(
                error = %AnalysisError::SecondaryTaggerUnavailable("not configured".into()),
                "Using primary tags only"
            );
        }
        Self {
            arbiter: PosArbiter::new(Arc::clone(&vocabulary), secondary),
            vocabulary,
            tagger_source,
            primary: OnceCell::new(),
            wait: TaggerWait::default(),
            embeddings,
            gap_settings: GapSettings::default(),
        }
    }

    pub fn with_wait(mut self, wait: TaggerWait) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_gap_settings(mut self, settings: GapSettings) -> Self {
        self.gap_settings = settings;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn embeddings(&self) -> &EmbeddingCache {
        &self.embeddings
    }

    pub fn has_secondary(&self) -> bool {
        self.arbiter.has_secondary()
    }

    /// Analyze a document. Fails only when the primary tagger never becomes
    /// available; every other problem degrades the result instead.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let segmenter = self.primary_tagger().await?;
        let sentences = segmenter.segment(text);
        Ok(self.analyze_sentences(&sentences))
    }

    /// Analyze sentences already segmented and tagged by a primary tagger.
    pub fn analyze_sentences(&self, sentences: &[TaggedSentence]) -> AnalysisResult {
        let reconstructor = Reconstructor::new(&self.vocabulary);
        let mut words: Vec<Word> = Vec::new();
        let mut texts: Vec<String> = Vec::with_capacity(sentences.len());

        for sentence in sentences {
            let fragments = reconstructor.reconstruct(&sentence.tokens);
            words.extend(self.arbiter.reconcile(&fragments));
            texts.push(sentence.text.clone());
        }

        let stats = compute_stats(&words, &texts, &self.vocabulary);
        info!(
            sentences = texts.len(),
            words = stats.total_words,
            unique = stats.unique_words,
            "Analysis complete"
        );
        AnalysisResult { words, stats }
    }

    /// Semantic gaps for an analysis, loading embeddings on first use.
    pub async fn find_gaps(&self, result: &AnalysisResult) -> Vec<String> {
        let table = self.embeddings.get().await;
        GapFinder::with_settings(&self.vocabulary, self.gap_settings.clone())
            .find_gaps(&result.words, &table)
    }

    async fn primary_tagger(&self) -> Result<Arc<dyn SentenceSegmenter>, AnalysisError> {
        self.primary
            .get_or_try_init(|| wait_for_tagger(self.tagger_source.as_ref(), self.wait))
            .await
            .map(Arc::clone)
    }
}

/// Poll a tagger source until it yields a tagger or the attempts run out.
pub async fn wait_for_tagger(
    source: &dyn TaggerSource,
    wait: TaggerWait,
) -> Result<Arc<dyn SentenceSegmenter>, AnalysisError> {
    for attempt in 1..=wait.attempts {
        if let Some(tagger) = source.try_acquire() {
            debug!(attempt, "Primary tagger ready");
            return Ok(tagger);
        }
        if attempt < wait.attempts {
            tokio::time::sleep(wait.interval).await;
        }
    }
    Err(AnalysisError::TaggerUnavailable {
        attempts: wait.attempts,
    })
}

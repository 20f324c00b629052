use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use gaps::config::{Config, SecondaryBackend};
use gaps::output::{terminal, AnalysisReport};
use gaps::pipeline::{AnalysisContext, AnalysisResult};
use gaps::semantic::{source_for, EmbeddingSource, EmbeddingTable};
use gaps::tagging::pretagged::PretaggedDocument;
use gaps::tagging::rules::RuleTagger;
use gaps::tagging::{ReadyTagger, SentenceSegmenter, UniversalTag};

/// Gaps: linguistic profiling and semantic gap detection.
///
/// Tags a document, reports its statistics and rhetorical profile, and
/// suggests words the text circles around but never uses.
#[derive(Parser)]
#[command(name = "gaps", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and report statistics and semantic gaps
    Analyze {
        /// Text file to analyze, or `-` for stdin
        input: String,

        /// Pre-tagged token stream (JSON) to use instead of the built-in tagger
        #[arg(long)]
        tokens: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Skip the secondary tagger
        #[arg(long)]
        no_secondary: bool,

        /// Skip semantic gap detection
        #[arg(long)]
        no_gaps: bool,
    },

    /// Search the word index of a document
    Search {
        /// Text file to analyze, or `-` for stdin
        input: String,

        /// Substring to look for (case-insensitive)
        term: String,

        /// Only words tagged with this part of speech (e.g. NOUN)
        #[arg(long)]
        pos: Option<UniversalTag>,

        /// Context lines shown per word (default: 3)
        #[arg(long, default_value = "3")]
        contexts: usize,
    },

    /// Show configuration and whether the embedding resource is reachable
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gaps=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            tokens,
            json,
            no_secondary,
            no_gaps,
        } => {
            let mut config = Config::load()?;
            if no_secondary {
                config.secondary_tagger = SecondaryBackend::None;
            }

            let (ctx, text) = match tokens {
                Some(path) => {
                    let document = load_pretagged(&path)?;
                    let text = document.text();
                    (build_context(&config, Arc::new(document))?, text)
                }
                None => (
                    build_context(&config, Arc::new(RuleTagger::new()))?,
                    read_input(&input)?,
                ),
            };

            let result = ctx.analyze(&text).await.context("Analysis failed")?;
            let gaps = if no_gaps {
                None
            } else {
                Some(find_gaps_with_spinner(&ctx, &result, !json).await)
            };

            if json {
                let report = AnalysisReport::new(&result, gaps.as_deref());
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&result, gaps.as_deref());
            }
        }

        Commands::Search {
            input,
            term,
            pos,
            contexts,
        } => {
            let config = Config::load()?;
            let ctx = build_context(&config, Arc::new(RuleTagger::new()))?;
            let text = read_input(&input)?;
            let result = ctx.analyze(&text).await.context("Analysis failed")?;
            let hits = result.stats.search(&term, pos);
            info!(term = %term, hits = hits.len(), "Searched word index");
            terminal::display_search(&term, &hits, contexts);
        }

        Commands::Status => {
            let config = Config::load()?;
            show_status(&config).await?;
        }
    }

    Ok(())
}

fn build_context(config: &Config, tagger: Arc<dyn SentenceSegmenter>) -> Result<AnalysisContext> {
    let vocabulary = config.vocabulary().context("Failed to load vocabulary")?;
    Ok(AnalysisContext::new(
        Arc::new(vocabulary),
        Arc::new(ReadyTagger(tagger)),
        config.secondary(),
        config.embedding_cache(),
    )
    .with_wait(config.tagger_wait))
}

/// Read a document from a file, or from stdin when the path is `-`.
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

fn load_pretagged(path: &Path) -> Result<PretaggedDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    PretaggedDocument::from_json(&raw)
        .with_context(|| format!("Failed to parse token stream {}", path.display()))
}

/// Find gaps, showing a spinner while embeddings load on first use.
async fn find_gaps_with_spinner(
    ctx: &AnalysisContext,
    result: &AnalysisResult,
    show_progress: bool,
) -> Vec<String> {
    let pb = if show_progress && !ctx.embeddings().is_loaded() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner} {msg}")
                .expect("valid template"),
        );
        pb.set_message("Loading word embeddings...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let gaps = ctx.find_gaps(result).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    gaps
}

/// Display configuration and probe the embedding resource.
async fn show_status(config: &Config) -> Result<()> {
    let vocabulary = config.vocabulary().context("Failed to load vocabulary")?;
    let vocab_source = config
        .vocabulary_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    println!("Vocabulary: {} (version {})", vocab_source, vocabulary.version);

    let secondary = match config.secondary_tagger {
        SecondaryBackend::Penn => "penn",
        SecondaryBackend::None => "none",
    };
    println!("Secondary tagger: {secondary}");
    println!(
        "Tagger wait: {} attempts every {} ms",
        config.tagger_wait.attempts,
        config.tagger_wait.interval.as_millis()
    );

    println!("Embeddings:");
    for location in &config.embedding_locations {
        match source_for(location).fetch().await {
            Ok(payload) => {
                let table = EmbeddingTable::parse_payload(&payload);
                let dim = table
                    .dimension()
                    .map(|d| format!("{d}-dim"))
                    .unwrap_or_else(|| "empty".to_string());
                println!(
                    "  {} {} ({} words, {})",
                    "✓".green(),
                    location,
                    table.len(),
                    dim
                );
            }
            Err(e) => {
                println!("  {} {} {}", "-".dimmed(), location, e.to_string().dimmed());
            }
        }
    }
    Ok(())
}

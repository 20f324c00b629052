// Colored terminal output for analysis reports and word searches.
//
// main.rs delegates all display here. Nothing in this module computes
// statistics; it only formats what the pipeline produced.

use colored::Colorize;

use crate::pipeline::AnalysisResult;
use crate::stats::{PosSegment, ProfileDimension, RhetoricalProfile, Stats, WordEntry};
use crate::tagging::UniversalTag;
use crate::text::truncate_chars;

/// Display the full report for one analysis.
pub fn display_report(result: &AnalysisResult, gaps: Option<&[String]>) {
    let stats = &result.stats;
    if stats.total_words == 0 {
        println!("No words found. Is the input empty?");
        return;
    }

    println!("\n{}", "=== Text Overview ===".bold());
    println!(
        "  Words: {}  Unique: {}  Sentences: {}",
        stats.total_words,
        stats.unique_words,
        stats.sentences.len()
    );
    println!(
        "  Readability: {:.1} ({})  Avg sentence: {:.1} words",
        stats.readability_index,
        colorize_readability(stats.readability_index),
        stats.avg_sentence_length
    );
    println!("  Hapax legomena: {}", stats.hapax_legomena.len());

    display_pos_counts(stats);
    display_pos_bar(&stats.pos_segments());
    display_top_words(stats, 10);
    display_profile(&stats.profile);

    if let Some(gaps) = gaps {
        display_gaps(gaps);
    }
}

fn display_pos_counts(stats: &Stats) {
    println!("\n{}", "=== Parts of Speech ===".bold());
    let mut counts: Vec<(UniversalTag, usize)> =
        stats.pos_counts.iter().map(|(t, c)| (*t, *c)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (tag, count) in counts {
        let share = count as f64 / stats.total_words.max(1) as f64 * 100.0;
        println!(
            "  {:<14} {:>6}  {:>5.1}%",
            colorize_tag(tag, tag.label()),
            count,
            share
        );
    }
}

/// One colored block per sampled run of tags.
pub fn display_pos_bar(segments: &[PosSegment]) {
    if segments.is_empty() {
        return;
    }
    let bar: String = segments
        .iter()
        .map(|s| colorize_tag(s.tag, &"█".repeat(s.count)).to_string())
        .collect();
    println!("\n  {bar}");
}

fn display_top_words(stats: &Stats, limit: usize) {
    let mut top: Vec<(&String, &usize)> = stats.word_frequency.iter().collect();
    top.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    if top.is_empty() {
        return;
    }

    println!("\n{}", "=== Most Frequent ===".bold());
    let line = top
        .iter()
        .take(limit)
        .map(|(w, c)| format!("{w} ({c})"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("  {line}");
}

/// Display the six rhetorical profile dimensions.
pub fn display_profile(profile: &RhetoricalProfile) {
    println!("\n{}", "=== Rhetorical Profile ===".bold());
    display_dimension("Sensory", &profile.sensory);
    display_dimension("Confidence", &profile.confidence);
    display_dimension("Abstraction", &profile.abstraction);
    display_dimension("Perspective", &profile.perspective);
    display_dimension("Temporal", &profile.temporal);
    display_dimension("Argumentation", &profile.argumentation);
}

fn display_dimension(name: &str, dimension: &ProfileDimension) {
    let parts = dimension
        .percentages
        .iter()
        .map(|(category, pct)| format!("{category} {pct:.0}%"))
        .collect::<Vec<_>>()
        .join("  ");
    match dimension.ratio {
        Some(ratio) => println!("  {:<14} {}  {}", name, parts, format!("[{ratio:.2}]").dimmed()),
        None => println!("  {:<14} {}", name, parts),
    }
}

fn display_gaps(gaps: &[String]) {
    println!("\n{}", format!("=== Semantic Gaps ({}) ===", gaps.len()).bold());
    if gaps.is_empty() {
        println!("  {}", "No gaps found.".dimmed());
        return;
    }
    println!("  {}", gaps.join(", ").cyan());
}

/// Display word index search results with their contexts.
pub fn display_search(term: &str, hits: &[(&str, &WordEntry)], max_contexts: usize) {
    if hits.is_empty() {
        println!("No words matching \"{term}\".");
        return;
    }

    println!(
        "\n{}",
        format!("=== Matches for \"{term}\" ({}) ===", hits.len()).bold()
    );
    for (key, entry) in hits {
        let tags = entry
            .tags
            .iter()
            .map(|(tag, count)| colorize_tag(*tag, &format!("{tag}:{count}")).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("\n  {} x{}  {}", key.bold(), entry.total_count, tags);
        for context in entry.contexts.iter().take(max_contexts) {
            println!(
                "    {} {}",
                format!("[{}]", context.sentence_index + 1).dimmed(),
                truncate_chars(&context.context, 120)
            );
        }
        if entry.contexts.len() > max_contexts {
            println!(
                "    {}",
                format!("... {} more", entry.contexts.len() - max_contexts).dimmed()
            );
        }
    }
}

/// Rough Flesch band.
pub fn readability_band(index: f64) -> &'static str {
    match index {
        i if i >= 80.0 => "Easy",
        i if i >= 60.0 => "Standard",
        i if i >= 30.0 => "Difficult",
        _ => "Very difficult",
    }
}

fn colorize_readability(index: f64) -> colored::ColoredString {
    let band = readability_band(index);
    match band {
        "Easy" => band.green(),
        "Standard" => band.normal(),
        "Difficult" => band.yellow(),
        _ => band.red(),
    }
}

/// Color text by part of speech.
fn colorize_tag(tag: UniversalTag, text: &str) -> colored::ColoredString {
    match tag {
        UniversalTag::Noun => text.blue(),
        UniversalTag::Propn => text.bright_blue().bold(),
        UniversalTag::Verb => text.red(),
        UniversalTag::Aux => text.bright_red(),
        UniversalTag::Adj => text.green(),
        UniversalTag::Adv => text.bright_green(),
        UniversalTag::Pron => text.magenta(),
        UniversalTag::Det | UniversalTag::Adp | UniversalTag::Conj => text.yellow(),
        UniversalTag::Num => text.cyan(),
        UniversalTag::Part | UniversalTag::Intj | UniversalTag::X => text.dimmed(),
    }
}

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tdiff_batch::{run_batch, BatchSummary, Manifest, RowReport};
use tdiff_core::{CompareConfig, Comparator};

use crate::cli::*;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let comparator = load_comparator(cli.config.as_deref(), cli.threshold)?;
    tracing::debug!(?comparator, "comparator ready");

    match cli.command {
        Command::Compare(args) => cmd_compare(&comparator, args, &cli.format),
        Command::Score(args) => cmd_score(&comparator, args, &cli.format),
        Command::Batch(args) => cmd_batch(comparator, args, &cli.format),
    }
}

fn load_comparator(config: Option<&Path>, threshold: Option<f64>) -> anyhow::Result<Comparator> {
    let config = match config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            CompareConfig::from_toml_str(&source)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => CompareConfig::default(),
    };

    let comparator = Comparator::from_config(&config)?;
    match threshold {
        Some(t) => Ok(comparator.with_threshold(t)?),
        None => Ok(comparator),
    }
}

fn read_transcript(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))
}

fn cmd_compare(
    comparator: &Comparator,
    args: CompareArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let left = read_transcript(&args.left)?;
    let right = read_transcript(&args.right)?;
    let comparison = comparator.compare(&left, &right);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Text => print!("{}", render::comparison(&comparison)),
    }
    Ok(())
}

fn cmd_score(
    comparator: &Comparator,
    args: ScoreArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let left = read_transcript(&args.left)?;
    let right = read_transcript(&args.right)?;
    let similarity = comparator.score(&left, &right);

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "similarity": similarity })),
        OutputFormat::Text => println!("{similarity:.2}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    summary: &'a BatchSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a [RowReport]>,
}

fn cmd_batch(comparator: Comparator, args: BatchArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let reports = runtime.block_on(async {
        let manifest = Manifest::load(&args.manifest).await?;
        run_batch(manifest.rows, Arc::new(comparator), args.concurrency).await
    })?;
    let summary = BatchSummary::from_reports(&reports);

    match format {
        OutputFormat::Json => {
            let output = BatchOutput {
                summary: &summary,
                rows: (!args.summary).then_some(reports.as_slice()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print!("{}", render::batch(&reports, &summary, args.summary)),
    }
    Ok(())
}

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use newsdesk::logging::configure_logging;
use newsdesk::pipeline::load_articles;
use newsdesk::{LlmGenerator, Pipeline, TextGenerator, TriageConfig, TARGET_TRIAGE};

#[derive(Parser)]
#[clap(name = "newsdesk", about = "Triage a batch of news articles into a digest")]
struct Cli {
    /// JSON file with an article array or an object with an `articles` array
    #[clap(short, long)]
    input: PathBuf,

    /// Where to write the digest JSON (stdout when omitted)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Number of articles to keep after scoring (overrides NEWSDESK_TOP_N)
    #[clap(short = 'n', long)]
    top_n: Option<usize>,

    /// Reference time for recency scoring, RFC 3339
    #[clap(long)]
    now: Option<String>,

    /// Skip the language model even if one is configured
    #[clap(long)]
    local_only: bool,

    /// Look for bills in every category, not only Government/Policy
    #[clap(long)]
    bills_all_categories: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();
    let cli = Cli::parse();

    let mut config = TriageConfig::from_env();
    if let Some(top_n) = cli.top_n {
        config.top_n = top_n;
    }
    if cli.bills_all_categories {
        config.bills_all_categories = true;
    }

    let now = match &cli.now {
        Some(now) => DateTime::parse_from_rfc3339(now)
            .with_context(|| format!("Invalid --now timestamp '{}'", now))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let generator: Option<Arc<dyn TextGenerator>> = if cli.local_only {
        info!(target: TARGET_TRIAGE, "Local-only run requested");
        None
    } else {
        LlmGenerator::from_env().map(|g| Arc::new(g) as Arc<dyn TextGenerator>)
    };

    let raw = load_articles(&cli.input)?;
    let digest = Pipeline::new(config, generator, now).run(raw).await;

    let json = serde_json::to_string_pretty(&digest).context("Failed to serialize digest")?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write digest to {}", path.display()))?;
            info!(target: TARGET_TRIAGE, "Digest written to {}", path.display());
        }
        None => println!("{}", json),
    }

    // Keep stdout clean for the JSON when no output file was given
    if cli.output.is_some() {
        digest.stats.to_table().printstd();
    } else {
        eprintln!("{}", digest.stats.to_table());
    }

    Ok(())
}

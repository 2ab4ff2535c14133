//! Command-line entry point
//!
//! Usage:
//!   placefinder "Utah Holiday Lighting SLC" "Brite Nites Salt Lake City"
//!   placefinder --queries-file businesses.txt --output results.csv --reviews-output reviews.txt
//!   placefinder --queries-file businesses.txt --concurrency 3 --no-reviews

use anyhow::{bail, Context};
use clap::Parser;
use log::{error, info};
use placefinder_lib::modules::report;
use placefinder_lib::shared::utils::init_logger;
use placefinder_lib::{AppError, LookupConfig, LookupConfigBuilder, PlaceLookupService};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "placefinder")]
#[command(about = "Look up businesses on Google Places and report the best match for each")]
struct Cli {
    /// Business queries, e.g. "Brite Nites Salt Lake City"
    queries: Vec<String>,

    /// File with one query per line (blank lines and # comments are skipped)
    #[arg(short = 'f', long)]
    queries_file: Option<PathBuf>,

    /// Google Places API key (defaults to GOOGLE_PLACES_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// CSV output path
    #[arg(short, long, default_value = "business_results.csv")]
    output: PathBuf,

    /// Text output path for reviews
    #[arg(long, default_value = "business_reviews.txt")]
    reviews_output: PathBuf,

    /// Skip fetching and writing reviews
    #[arg(long)]
    no_reviews: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Minimum delay between API calls in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Number of queries resolved at once
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut queries = cli.queries.clone();
    if let Some(path) = &cli.queries_file {
        queries.extend(read_queries(path)?);
    }
    if queries.is_empty() {
        return Err(AppError::ValidationError(
            "No queries given. Pass them as arguments or with --queries-file".to_string(),
        )
        .into());
    }

    let config = build_config(&cli)?;
    let service = PlaceLookupService::from_config(&config)?;

    info!("Looking up {} businesses", queries.len());
    let results = match service.lookup_batch(&queries).await {
        Ok(results) => results,
        Err(AppError::Unauthorized(msg)) => {
            bail!("API key rejected ({}). Check GOOGLE_PLACES_API_KEY", msg)
        }
        Err(e) => return Err(e.into()),
    };

    report::write_results_to_path(&cli.output, &results)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    if !cli.no_reviews {
        report::write_reviews_to_path(&cli.reviews_output, &results)
            .with_context(|| format!("Failed to write {}", cli.reviews_output.display()))?;
    }

    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<LookupConfig> {
    let base = LookupConfig::from_env()?;
    let mut builder = LookupConfigBuilder::from_config(base);

    if let Some(key) = &cli.api_key {
        builder = builder.api_key(key.clone());
    }
    if cli.no_reviews {
        builder = builder.include_reviews(false);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout(seconds(secs, "--timeout")?);
    }
    if let Some(secs) = cli.delay {
        builder = builder.min_request_interval(seconds(secs, "--delay")?);
    }
    if let Some(workers) = cli.concurrency {
        builder = builder.concurrency(workers);
    }

    Ok(builder.build()?)
}

fn seconds(value: f64, flag: &str) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| format!("Invalid value for {}", flag))
}

fn read_queries(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(parse_query_lines(&content))
}

fn parse_query_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

//! Skimmer CLI — thin hosting shim around the crawl pipeline.
//!
//! Loads the run input from flags or a JSON file, executes one crawl run,
//! and emits the resulting dataset as JSON. Ctrl-C cancels the run; the
//! partial dataset accumulated so far is still emitted.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use skimmer_client::{cancel_pair, HttpPageFetcher, PaginationController, RetryConfig, SearchEndpoint};
use skimmer_core::{FilterSpec, QuerySpec, RunStatus, DEFAULT_PAGE_SIZE};

/// Crawl a remote search index and emit the matching records as a dataset.
#[derive(Debug, Parser)]
#[command(name = "skimmer", version, about)]
struct Args {
    /// Constrain results to one record identifier.
    #[arg(long)]
    actor_id: Option<String>,

    /// Constrain results to one username.
    #[arg(long)]
    username: Option<String>,

    /// Free-text search query.
    #[arg(long)]
    query: Option<String>,

    /// Maximum number of distinct items to collect.
    #[arg(long)]
    limit: Option<usize>,

    /// Records requested per page (clamped to the remote maximum).
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// JSON file with input fields (actorId, username, query, limit).
    /// Explicit flags take precedence over the file.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the dataset to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Search endpoint URL.
    #[arg(long, env = "SKIMMER_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Application identifier for the search endpoint.
    #[arg(long, env = "SKIMMER_APP_ID")]
    app_id: Option<String>,

    /// API key for the search endpoint.
    #[arg(long, env = "SKIMMER_API_KEY")]
    api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
}

/// Input file shape. Absent and `null` fields are treated identically.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileInput {
    actor_id: Option<String>,
    username: Option<String>,
    query: Option<String>,
    limit: Option<usize>,
}

fn load_input(args: &Args) -> anyhow::Result<FileInput> {
    let mut input = match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading input file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing input file {}", path.display()))?
        }
        None => FileInput::default(),
    };

    // Flags override the file.
    if args.actor_id.is_some() {
        input.actor_id.clone_from(&args.actor_id);
    }
    if args.username.is_some() {
        input.username.clone_from(&args.username);
    }
    if args.query.is_some() {
        input.query.clone_from(&args.query);
    }
    if args.limit.is_some() {
        input.limit = args.limit;
    }

    Ok(input)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let input = load_input(&args)?;

    let filter = FilterSpec {
        identifier: input.actor_id,
        username: input.username,
    };
    let query = QuerySpec::new(input.query, filter, input.limit, args.page_size);

    let defaults = SearchEndpoint::default();
    let endpoint = SearchEndpoint {
        url: args.endpoint_url.unwrap_or(defaults.url),
        app_id: args.app_id.unwrap_or(defaults.app_id),
        api_key: args.api_key.unwrap_or_default(),
        timeout: Duration::from_secs(args.request_timeout_secs),
    };

    let fetcher = HttpPageFetcher::new(endpoint)?;
    let controller = PaginationController::new(fetcher, RetryConfig::default());

    let (handle, token) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling run");
            handle.cancel();
        }
    });

    let result = controller.run(&query, token).await;

    let json = serde_json::to_string_pretty(&result.items)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing dataset to {}", path.display()))?;
            info!(path = %path.display(), items = result.items.len(), "dataset written");
        }
        None => println!("{json}"),
    }

    info!(
        items = result.items.len(),
        duplicates = result.duplicates,
        rejected = result.rejected,
        status = ?result.status,
        "run summary"
    );

    // A cancelled run still exits cleanly: the partial dataset is valid
    // output. Only error terminations report failure to the host.
    if matches!(
        result.status,
        RunStatus::AbortedOnError | RunStatus::ExhaustedRetries
    ) {
        if let Some(error) = &result.error {
            warn!(%error, "run ended early");
        }
        std::process::exit(1);
    }
    Ok(())
}

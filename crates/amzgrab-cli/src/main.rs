mod batch;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use amzgrab_core::AppConfig;
use amzgrab_export::{default_output_name, write_csv};
use amzgrab_extract::{extract_product, ProxyClient};

use batch::{ItemStatus, ScrapeEvent};

#[derive(Debug, Parser)]
#[command(name = "amzgrab")]
#[command(about = "Amazon product-page scraper and spreadsheet exporter")]
struct Cli {
    /// ScrapeOps API key; falls back to AMZGRAB_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a single ASIN or product URL and print the record as JSON.
    Scrape {
        /// ASIN (e.g. B08N5WRWNW) or full product URL.
        input: String,
        /// Category hint, e.g. "Grocery & Gourmet Food".
        #[arg(long)]
        niche: Option<String>,
        /// Also write a one-record spreadsheet to this path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Scrape many ASINs/URLs in fixed-size concurrent groups and export a
    /// spreadsheet.
    Batch {
        /// ASINs or product URLs.
        inputs: Vec<String>,
        /// File with additional identifiers (whitespace- or comma-separated).
        #[arg(long)]
        file: Option<PathBuf>,
        /// Category hint applied to every item.
        #[arg(long)]
        niche: Option<String>,
        /// Group size; defaults to AMZGRAB_CONCURRENCY.
        #[arg(long)]
        concurrency: Option<usize>,
        /// Spreadsheet path; defaults to a timestamped name.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = amzgrab_core::load_app_config()?;
    init_tracing(&config);

    let cli = Cli::parse();
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| config.api_key.clone())
        .context("no API key: pass --api-key or set AMZGRAB_API_KEY")?;
    let client = ProxyClient::from_config(&config)?;

    match cli.command {
        Commands::Scrape {
            input,
            niche,
            output,
        } => {
            let record = extract_product(&client, &input, niche.as_deref(), &api_key).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            if let Some(path) = output {
                write_csv(&path, std::slice::from_ref(&record))?;
            }
        }
        Commands::Batch {
            inputs,
            file,
            niche,
            concurrency,
            output,
        } => {
            let items = gather_inputs(inputs, file.as_deref())?;
            anyhow::ensure!(!items.is_empty(), "no identifiers given");
            let group_size = concurrency.unwrap_or(config.concurrency).max(1);
            tracing::info!(items = items.len(), group_size, "starting batch run");

            let cancel = install_cancel_flag();
            let (events, renderer) = spawn_event_renderer();

            let records =
                batch::run_batch(&client, &items, niche.as_deref(), &api_key, group_size, &cancel, &events)
                    .await;
            drop(events);
            renderer.await?;

            let path =
                output.unwrap_or_else(|| PathBuf::from(default_output_name("amazon_scrape")));
            write_csv(&path, &records)?;
            tracing::info!(
                records = records.len(),
                path = %path.display(),
                "batch run complete"
            );
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Combines positional identifiers with the optional list file.
fn gather_inputs(inputs: Vec<String>, file: Option<&std::path::Path>) -> anyhow::Result<Vec<String>> {
    let mut items = inputs;
    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read identifier list {}", path.display()))?;
        items.extend(batch::split_input_list(&contents));
    }
    Ok(items)
}

/// Ctrl-C sets the flag; the batch runner honors it at group boundaries.
fn install_cancel_flag() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("ctrl-c received — finishing the in-flight group, then stopping");
            flag.store(true, Ordering::SeqCst);
        }
    });
    cancel
}

/// Completion events are rendered by a dedicated task; the batch runner
/// itself never writes to the log view.
fn spawn_event_renderer() -> (
    mpsc::UnboundedSender<ScrapeEvent>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<ScrapeEvent>();
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.status {
                ItemStatus::Succeeded => {
                    tracing::info!(identifier = %event.identifier, detail = %event.detail, "scraped");
                }
                ItemStatus::Failed => {
                    tracing::warn!(identifier = %event.identifier, detail = %event.detail, "scrape failed");
                }
            }
        }
    });
    (tx, handle)
}

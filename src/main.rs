use anyhow::Result;
use clap::Parser;
use papers_fetcher::export;
use papers_fetcher::models::SearchQuery;
use papers_fetcher::pipeline::collect_papers;
use papers_fetcher::sources::pubmed::PubMedClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch research papers from PubMed based on a query
#[derive(Parser, Debug)]
#[command(name = "papers-fetcher")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch PubMed papers with company-affiliated authors", long_about = None)]
struct Cli {
    /// Search query for PubMed
    query: String,

    /// Number of results to fetch
    #[arg(short = 'n', long, default_value_t = 10)]
    num_results: usize,

    /// Print debug information
    #[arg(short, long)]
    debug: bool,

    /// Output CSV filename (prints to console when absent)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.debug {
        println!(
            "🔍 Querying PubMed for: {} (Max results: {})",
            cli.query, cli.num_results
        );
    }

    // Every failure path degrades to a logged warning and exit code 0.
    let client = match PubMedClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error building HTTP client: {}", e);
            return Ok(());
        }
    };

    let query = SearchQuery::new(&cli.query).max_results(cli.num_results);
    let papers = collect_papers(&client, &query, cli.debug).await;

    if let Err(e) = export::export(&papers, cli.file.as_deref()) {
        tracing::warn!(error = %e, "export failed");
        eprintln!("⚠️ Error saving results: {}", e);
    }

    Ok(())
}

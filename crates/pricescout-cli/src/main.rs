mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricescout-cli")]
#[command(about = "Find the cheapest verifiable offer for a product query")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search and print the result as JSON.
    Search {
        /// Product query, e.g. "dog treats 200g".
        query: String,
        /// Market to search: uk, us, eu or au. Unknown codes fall back to uk.
        #[arg(long, default_value = "uk")]
        region: String,
        /// Skip the retail re-query and pick among tier-1 offers instead.
        #[arg(long)]
        reuse_tier1: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            query,
            region,
            reuse_tier1,
        } => {
            let config = pricescout_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            search::run_search(&config, &query, &region, reuse_tier1).await
        }
    }
}

/// Logs go to stderr so stdout stays valid JSON. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

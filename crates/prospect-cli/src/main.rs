mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prospect")]
#[command(about = "Find local businesses on Google Maps and send them an inquiry")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search, save snapshots, and email active businesses (default)
    Run,
    /// Search and save snapshots without sending any mail
    Search,
    /// Email the active businesses from a saved snapshot
    Send {
        /// Path to a business snapshot such as `data/companies_all.json`
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Crawl one website and print the addresses found on it
    FindEmail {
        /// Website URL; `https://` is assumed when no scheme is given
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = prospect_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let summary = run::run_full(&config).await?;
            println!("{summary}");
        }
        Commands::Search => {
            let summary = run::run_search(&config).await?;
            println!("{summary}");
        }
        Commands::Send { input } => {
            let summary = run::run_send(&config, &input).await?;
            println!("{summary}");
        }
        Commands::FindEmail { url } => run::run_find_email(&config, &url).await?,
    }

    Ok(())
}

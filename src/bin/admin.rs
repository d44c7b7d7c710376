//! CLI administration tool for urlcutter.
//!
//! Creates and inspects short links and checks the store without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prints the existing code if already shortened)
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Show a stored link with its click count
//! cargo run --bin admin -- info Ab3dE9
//!
//! # Check the store connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`STORE_BACKEND`, `DATABASE_URL`, ...).

use urlcutter::config;
use urlcutter::domain::error::ShortenError;
use urlcutter::server::build_link_service;
use urlcutter::state::DynLinkService;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing urlcutter.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// Absolute URL to shorten
        url: String,
    },

    /// Show a stored link
    Info {
        /// Short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let (service, worker) = build_link_service(&config).await?;

    let outcome = match cli.command {
        Commands::Shorten { url } => shorten(&service, &url).await,
        Commands::Info { code } => info(&service, &code).await,
        Commands::Db {
            action: DbAction::Check,
        } => db_check(&service).await,
    };

    drop(service);
    worker.await?;

    outcome
}

/// Creates (or fetches) the short code for `url`.
async fn shorten(service: &DynLinkService, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    match service.create_short_url(url).await {
        Ok(code) => {
            println!("  URL:  {}", url.bright_white());
            println!("  Code: {}", code.bright_green().bold());
            println!();
            Ok(())
        }
        Err(ShortenError::InvalidUrl(reason)) => {
            println!("{} {}", "❌ Invalid URL:".red(), reason);
            anyhow::bail!("invalid URL")
        }
        Err(e) => Err(e.into()),
    }
}

/// Prints the stored record for `code`.
async fn info(service: &DynLinkService, code: &str) -> Result<()> {
    println!("{}", "ℹ️  Link Information".bright_blue().bold());
    println!();

    match service.get_link(code).await {
        Ok(link) => {
            println!("  Code:     {}", link.short.cyan());
            println!("  Original: {}", link.original.bright_white());
            println!(
                "  Created:  {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .bright_black()
            );
            println!(
                "  Clicks:   {}",
                link.clicks.to_string().bright_green().bold()
            );
            println!();
            Ok(())
        }
        Err(ShortenError::NotFound(code)) => {
            println!("{} {}", "❌ No link for code".red(), code);
            anyhow::bail!("link not found")
        }
        Err(e) => Err(e.into()),
    }
}

/// Pings the configured store.
async fn db_check(service: &DynLinkService) -> Result<()> {
    println!("{}", "🔍 Checking store connection...".bright_blue());

    service.check_store().await?;

    println!("{}", "✅ Store connection OK".green().bold());
    Ok(())
}

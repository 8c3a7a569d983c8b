//! ImageLingo CLI - Translation metrics and store image browsing.
//!
//! # Usage
//!
//! ```bash
//! # Query the translation server
//! il-cli metrics quota -s demo.myshopify.com
//! il-cli metrics untranslated -s demo.myshopify.com -m product --source en
//!
//! # Browse store images through a running admin service
//! il-cli images browse --admin-url http://127.0.0.1:3001
//! ```
//!
//! # Commands
//!
//! - `metrics` - Translation server queries (prints JSON)
//! - `images browse` - Interactive paged image browser

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use imagelingo_core::{PageRequest, ShopDomain};

mod browser;
mod commands;

#[derive(Parser)]
#[command(name = "il-cli")]
#[command(author, version, about = "ImageLingo CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the translation server
    Metrics {
        #[command(subcommand)]
        action: MetricsAction,
    },
    /// Store images
    Images {
        #[command(subcommand)]
        action: ImagesAction,
    },
}

#[derive(Subcommand)]
enum MetricsAction {
    /// Untranslated character count
    Untranslated {
        /// Shop domain
        #[arg(short, long)]
        shop: ShopDomain,

        /// Translation module tag
        #[arg(short, long)]
        module: String,

        /// Source language
        #[arg(long)]
        source: String,

        /// Shopify access token (defaults to `SHOPIFY_ADMIN_ACCESS_TOKEN`)
        #[arg(long)]
        access_token: Option<String>,
    },
    /// Conversion report
    Conversion {
        /// Shop domain
        #[arg(short, long)]
        shop: ShopDomain,

        /// Store language (repeatable)
        #[arg(short = 'l', long = "language")]
        languages: Vec<String>,

        /// Report window in days
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Translation status per store language
    Languages {
        /// Shop domain
        #[arg(short, long)]
        shop: ShopDomain,

        /// Source language
        #[arg(long)]
        source: String,
    },
    /// Real-time quota switches
    Quota {
        /// Shop domain
        #[arg(short, long)]
        shop: ShopDomain,
    },
    /// Translation quality score
    Quality {
        /// Shop domain
        #[arg(short, long)]
        shop: ShopDomain,

        /// Source language
        #[arg(long)]
        source: String,
    },
}

#[derive(Subcommand)]
enum ImagesAction {
    /// Page through store images interactively
    Browse {
        /// Base URL of the admin service
        #[arg(long, default_value = "http://127.0.0.1:3001")]
        admin_url: String,

        /// Images per page
        #[arg(long, default_value_t = PageRequest::DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "il_cli=info,imagelingo_admin=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Metrics { action } => match action {
            MetricsAction::Untranslated {
                shop,
                module,
                source,
                access_token,
            } => commands::metrics::untranslated(shop, module, source, access_token).await?,
            MetricsAction::Conversion {
                shop,
                languages,
                days,
            } => commands::metrics::conversion(shop, languages, days).await?,
            MetricsAction::Languages { shop, source } => {
                commands::metrics::languages(shop, source).await?;
            }
            MetricsAction::Quota { shop } => commands::metrics::quota(shop).await?,
            MetricsAction::Quality { shop, source } => {
                commands::metrics::quality(shop, source).await?;
            }
        },
        Commands::Images { action } => match action {
            ImagesAction::Browse {
                admin_url,
                page_size,
            } => commands::images::browse(&admin_url, page_size).await?,
        },
    }
    Ok(())
}

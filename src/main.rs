//! CLI entry point for sitepress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sitepress")]
#[command(version)]
#[command(about = "Server-rendered company site and blog engine", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List all posts in merged order
    List,

    /// Validate local post documents
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "sitepress=debug,info"
    } else {
        "sitepress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let site = sitepress::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            sitepress::server::start(&site, &ip, port).await?;
        }

        Commands::List => {
            let site = sitepress::Site::new(&base_dir)?;
            sitepress::commands::list::run(&site)?;
        }

        Commands::Check => {
            let site = sitepress::Site::new(&base_dir)?;
            sitepress::commands::check::run(&site)?;
        }

        Commands::Version => {
            println!("sitepress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

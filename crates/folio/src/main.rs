//! folio CLI - generate a developer portfolio from a GitHub profile.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Generate a developer portfolio site from a GitHub profile")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default folio.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate a portfolio for a GitHub user
    Generate {
        /// GitHub username
        username: String,

        /// LinkedIn profile URL
        #[arg(short, long)]
        linkedin: Option<String>,

        /// Archive path (defaults to config or "portfolio.zip")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the unpacked site to this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Write the self-contained preview document to this file
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Start the generator web UI
    Dev {
        /// Port to listen on (defaults to config or 7777)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Preview a generated site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "site")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Generate {
            username,
            linkedin,
            output,
            out_dir,
            preview,
            no_minify,
        } => {
            let minify = if no_minify { Some(false) } else { None };
            let options = commands::generate::GenerateOptions {
                username,
                linkedin,
                output,
                out_dir,
                preview,
                minify,
            };
            commands::generate::run(&cli.config, options).await?;
        }
        Commands::Dev { port, no_open } => {
            commands::dev::run(&cli.config, port, !no_open).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(port, dir).await?;
        }
    }

    Ok(())
}

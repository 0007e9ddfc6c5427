use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelflife_ocr::Config;
use tracing_subscriber::EnvFilter;

mod commands;

/// Find manufacturing and expiry dates in OCR text from food labels
#[derive(Parser)]
#[command(name = "shelflife")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract dates from OCR text in FILE, or stdin when omitted
    Extract(commands::ExtractArgs),

    /// Normalize raw date tokens to YYYY-MM-DD
    Normalize(commands::NormalizeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Extract(args) => commands::extract(args, &config, cli.pretty),
        Commands::Normalize(args) => commands::normalize(args, cli.pretty),
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

//! CLI application for Brazilian bank statement extraction.

mod commands;

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tracing_subscriber::util::SubscriberInitExt;

use commands::{batch, config, serve, text};

/// Extrato - consolidate Brazilian bank statement PDFs into one spreadsheet
#[derive(Parser)]
#[command(name = "extrato")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the upload web interface
    Serve(serve::ServeArgs),

    /// Process statement files and write the consolidated table
    Batch(batch::BatchArgs),

    /// Print the text extracted from a PDF
    Text(text::TextArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // Also captures `log` records, which is how actix-web reports requests
    subscriber.try_init()?;

    let config_path = cli.config.as_deref().map(Path::new);

    match cli.command {
        Commands::Serve(args) => serve::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Text(args) => text::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}

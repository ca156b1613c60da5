//! Serve command - run the upload web interface.

use std::path::Path;

use clap::Args;
use console::style;

use extrato_core::{ExtratoConfig, Layout};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind to (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Layout preselected in the upload form
    #[arg(short, long)]
    layout: Option<Layout>,

    /// Disable the processed-file cache
    #[arg(long)]
    no_cache: bool,
}

pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = ExtratoConfig::load_or_default(config_path)?;

    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(layout) = args.layout {
        config.processing.default_layout = layout;
    }
    if args.no_cache {
        config.processing.cache_enabled = false;
    }

    println!(
        "{} Serving on http://{}:{}",
        style("ℹ").blue(),
        config.server.bind_addr,
        config.server.port
    );

    extrato_web::run(config).await?;
    Ok(())
}

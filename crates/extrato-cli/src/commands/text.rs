//! Text command - dump the text a PDF yields, for writing and debugging
//! layout patterns.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use extrato_core::{PdfExtractor, PdfProcessor};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Only print this page (1-indexed)
    #[arg(short, long)]
    page: Option<u32>,
}

pub async fn run(args: TextArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    if let Some(page) = args.page {
        print!("{}", extractor.extract_page_text(page)?);
        return Ok(());
    }

    let content = extractor.extract_all()?;
    for page in &content.pages {
        println!(
            "{}",
            style(format!("--- page {}/{} ---", page.number, content.pages.len())).dim()
        );
        print!("{}", page.text);
        if !page.text.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

//! Batch command - consolidate many statement files into one table.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use extrato_core::export::headers;
use extrato_core::statement::rules::format_brl;
use extrato_core::{
    to_xlsx, BatchProcessor, ConsolidatedTable, ExtratoConfig, Layout, StatementCache,
    StatementFile,
};
use extrato_web::ApiProcessResponse;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the statement PDFs
    #[arg(required = true)]
    input: String,

    /// Statement layout (caixa, padrao2, bb); defaults to the configured one
    #[arg(short, long)]
    layout: Option<Layout>,

    /// Output file (default: layout-based .xlsx name, or stdout for csv/json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,

    /// Process duplicate files again instead of reusing their first result
    #[arg(long)]
    no_cache: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook
    Xlsx,
    /// CSV table
    Csv,
    /// JSON records plus summary
    Json,
}

pub async fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = ExtratoConfig::load_or_default(config_path)?;
    let layout = args.layout.unwrap_or(config.processing.default_layout);

    let paths = find_pdfs(&args.input)?;
    if paths.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process as {}",
        style("ℹ").blue(),
        paths.len(),
        layout
    );

    let files = paths
        .iter()
        .map(|path| read_statement(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut cache = StatementCache::new(config.processing.cache_capacity);
    let mut processor = BatchProcessor::new(layout);
    if config.processing.cache_enabled && !args.no_cache {
        processor = processor.with_cache(&mut cache);
    }

    let table = processor.run_with_progress(&files, |p| {
        pb.set_position(p.done as u64);
        pb.set_message(p.file_name.to_string());
    });
    pb.finish_with_message("Complete");

    write_output(&args, layout, &config, &table)?;
    print_summary(&table, start);

    Ok(())
}

/// Expand the pattern to PDF paths in sorted order.
fn find_pdfs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob(pattern)? {
        match entry {
            Ok(path) if is_pdf(&path) => paths.push(path),
            Ok(path) => debug!("Skipping non-PDF {}", path.display()),
            Err(e) => warn!("Unreadable glob entry: {}", e),
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_pdf(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn read_statement(path: &Path) -> anyhow::Result<StatementFile> {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("statement.pdf")
        .to_string();
    let data = fs::read(path)?;
    Ok(StatementFile::new(name, data))
}

fn write_output(
    args: &BatchArgs,
    layout: Layout,
    config: &ExtratoConfig,
    table: &ConsolidatedTable,
) -> anyhow::Result<()> {
    let content = match args.format {
        OutputFormat::Xlsx => to_xlsx(table, &config.export)?,
        OutputFormat::Csv => format_csv(table)?.into_bytes(),
        OutputFormat::Json => {
            let response = ApiProcessResponse::new(layout, table.clone());
            let mut json = serde_json::to_string_pretty(&response)?;
            json.push('\n');
            json.into_bytes()
        }
    };

    let output = match (&args.output, args.format) {
        (Some(path), _) => Some(path.clone()),
        (None, OutputFormat::Xlsx) => Some(PathBuf::from(config.export.file_name(layout))),
        (None, _) => None,
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => io::stdout().write_all(&content)?,
    }

    Ok(())
}

fn format_csv(table: &ConsolidatedTable) -> anyhow::Result<String> {
    let with_bank = table.has_bank();
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(headers(table))?;

    for record in table {
        let mut row = vec![record.file_name.clone()];
        if with_bank {
            row.push(record.bank.clone().unwrap_or_default());
        }
        row.push(record.account.clone());
        for amount in [record.previous_balance, record.income, record.current_balance] {
            row.push(format!("{amount:.2}"));
        }
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn print_summary(table: &ConsolidatedTable, start: Instant) {
    let summary = table.summary();
    let failed: Vec<_> = table.iter().filter(|r| r.is_error()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        summary.record_count,
        start.elapsed()
    );
    eprintln!("   Saldo Total:      {}", format_brl(summary.total_current_balance));
    eprintln!("   Rendimento Total: {}", format_brl(summary.total_income));
    eprintln!("   Contas:           {}", summary.distinct_accounts);

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for record in failed {
            eprintln!("  - {}: {}", record.file_name, record.account);
        }
    }
}

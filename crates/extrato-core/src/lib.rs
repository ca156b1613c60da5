//! Core library for Brazilian bank statement extraction.
//!
//! This crate provides:
//! - PDF text acquisition (first page or all pages)
//! - Per-layout field extraction (CAIXA, "Padrão 2", Banco do Brasil)
//! - pt-BR amount normalization
//! - Consolidation, aggregates and xlsx export
//! - A session cache keyed on file content

pub mod batch;
pub mod cache;
pub mod consolidate;
pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod statement;

pub use batch::{BatchProcessor, BatchProgress};
pub use cache::{CacheKey, RecordCache, StatementCache};
pub use consolidate::{ConsolidatedTable, TableSummary};
pub use error::{ExportError, ExtratoError, PdfError, Result, UnknownLayout};
pub use export::{to_xlsx, XLSX_MIME};
pub use models::config::ExtratoConfig;
pub use models::statement::{StatementFile, StatementRecord};
pub use pdf::{PdfExtractor, PdfProcessor, TextScope};
pub use statement::{Layout, StatementExtractor};

//! Error types for the extrato-core library.

use thiserror::Error;

/// Main error type for the extrato library.
#[derive(Error, Debug)]
pub enum ExtratoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Spreadsheet export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Unknown statement layout name.
    #[error(transparent)]
    Layout(#[from] UnknownLayout),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised while writing the consolidated workbook.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The spreadsheet writer rejected the workbook.
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// A layout name that does not map to any known statement layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown statement layout: {0}")]
pub struct UnknownLayout(pub String);

/// Result type for the extrato library.
pub type Result<T> = std::result::Result<T, ExtratoError>;

//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lazy_static::lazy_static;
use lopdf::Document;
use regex::Regex;
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf for structure and pdf-extract for text.
///
/// The loaded document lives as long as the extractor; statement processing
/// creates one per file and drops it before returning.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Text of every page, concatenated.
    pub text: String,
    /// Pages with their content.
    pub pages: Vec<PdfPage>,
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Extract the text of every page.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let pages: Vec<PdfPage> = self
            .page_texts()?
            .into_iter()
            .zip(1..)
            .map(|(text, number)| PdfPage { number, text })
            .collect();

        let text = pages.iter().map(|p| p.text.as_str()).collect::<String>();

        debug!("PDF content: {} pages, {} chars text", pages.len(), text.len());

        Ok(PdfContent { text, pages })
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        decode_pages(&self.raw_data)
    }

    /// Decode one page without touching the others, so a broken later page
    /// cannot spoil a first-page read.
    fn single_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))?;
        let total = doc.get_pages().len() as u32;

        let texts = if total == 1 {
            decode_pages(&self.raw_data)?
        } else {
            let mut single = doc.clone();
            let others: Vec<u32> = (1..=total).filter(|&n| n != page).collect();
            single.delete_pages(&others);

            let mut data = Vec::new();
            single
                .save_to(&mut data)
                .map_err(|e| PdfError::Parse(format!("Failed to isolate page {}: {}", page, e)))?;
            decode_pages(&data)?
        };

        texts.into_iter().next().ok_or(PdfError::InvalidPage(page))
    }
}

lazy_static! {
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// pdf-extract emits an empty line for wide line spacing; labels and their
/// values must end up on adjacent lines.
fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").into_owned()
}

fn decode_pages(data: &[u8]) -> Result<Vec<String>> {
    // pdf-extract panics on some malformed content streams
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }))
    .map_err(|_| PdfError::TextExtraction("text decoder panicked".to_string()))?
    .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

    trace!("pdf-extract returned {} pages", pages.len());
    Ok(pages.iter().map(|page| collapse_blank_lines(page)).collect())
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads from bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        Ok(self.page_texts()?.concat())
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        self.single_page_text(page)
    }
}

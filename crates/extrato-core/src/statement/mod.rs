//! Bank statement field extraction.
//!
//! Each [`Layout`] maps to one [`StatementExtractor`]. An extractor turns the
//! bytes of one PDF into exactly one [`StatementRecord`]; failures become
//! records whose account reads `Erro: <message>`.

mod caixa;
mod layout;
pub mod rules;
mod standard;

pub use caixa::CaixaExtractor;
pub use layout::Layout;
pub use standard::MovementExtractor;

use tracing::{debug, warn};

use crate::error::ExtratoError;
use crate::models::statement::StatementRecord;
use crate::pdf::{PdfExtractor, PdfProcessor, TextScope};

/// Shared contract of the per-layout statement extractors.
pub trait StatementExtractor: Sync {
    /// Layout this extractor implements.
    fn layout(&self) -> Layout;

    /// Bank label written to every record, if the layout has one.
    fn bank(&self) -> Option<&'static str> {
        None
    }

    /// Which pages the fields are read from.
    fn text_scope(&self) -> TextScope;

    /// Build the record from already extracted text.
    fn extract_from_text(&self, file_name: &str, text: &str) -> StatementRecord;

    /// Extract one statement using the given PDF backend.
    fn process_with(
        &self,
        pdf: &mut dyn PdfProcessor,
        data: &[u8],
        file_name: &str,
    ) -> StatementRecord {
        let text = pdf
            .load(data)
            .and_then(|()| pdf.extract_scoped_text(self.text_scope()));

        match text {
            Ok(text) => {
                debug!("{}: {} chars of text", file_name, text.len());
                self.extract_from_text(file_name, &text)
            }
            Err(e) => {
                let e = ExtratoError::from(e);
                warn!("Failed to process {}: {}", file_name, e);
                StatementRecord::failed(file_name, self.bank().map(str::to_string), e)
            }
        }
    }

    /// Extract one statement from raw PDF bytes.
    ///
    /// The document is loaded for the duration of this call only.
    fn process(&self, data: &[u8], file_name: &str) -> StatementRecord {
        let mut pdf = PdfExtractor::new();
        self.process_with(&mut pdf, data, file_name)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory PDF backend for exercising extractors without real PDFs.

    use crate::error::PdfError;
    use crate::pdf::{PdfProcessor, Result};

    /// Treats the loaded bytes as UTF-8 text, one page per form feed.
    /// Bytes starting with `%BROKEN` fail to load.
    #[derive(Default)]
    pub struct TextPdf {
        pages: Vec<String>,
    }

    impl PdfProcessor for TextPdf {
        fn load(&mut self, data: &[u8]) -> Result<()> {
            if data.starts_with(b"%BROKEN") {
                return Err(PdfError::Parse("invalid file header".to_string()));
            }
            let text = String::from_utf8_lossy(data);
            self.pages = text.split('\u{c}').map(str::to_string).collect();
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn extract_text(&self) -> Result<String> {
            Ok(self.pages.concat())
        }

        fn extract_page_text(&self, page: u32) -> Result<String> {
            self.pages
                .get((page as usize).wrapping_sub(1))
                .cloned()
                .ok_or(PdfError::InvalidPage(page))
        }
    }
}

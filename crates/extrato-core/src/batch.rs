//! Sequential batch processing of uploaded statements.

use std::time::Instant;

use tracing::{debug, info};

use crate::cache::{CacheKey, RecordCache};
use crate::consolidate::ConsolidatedTable;
use crate::models::statement::StatementFile;
use crate::pdf::{PdfExtractor, PdfProcessor};
use crate::statement::Layout;

/// Progress after one file of a batch has been processed.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// Files finished so far, including this one.
    pub done: usize,
    /// Files in the batch.
    pub total: usize,
    /// Name of the file just finished.
    pub file_name: &'a str,
    /// Whether the record came from the cache.
    pub cached: bool,
}

/// Constructor for the PDF backend used on each file.
pub type PdfBackend = fn() -> Box<dyn PdfProcessor>;

fn default_backend() -> Box<dyn PdfProcessor> {
    Box::new(PdfExtractor::new())
}

/// Runs one layout over a list of files, in order, one at a time.
pub struct BatchProcessor<'c> {
    layout: Layout,
    cache: Option<&'c mut dyn RecordCache>,
    backend: PdfBackend,
}

impl<'c> BatchProcessor<'c> {
    /// Create a processor for `layout` without a cache.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            cache: None,
            backend: default_backend,
        }
    }

    /// Reuse records from `cache` and store new ones in it.
    pub fn with_cache(mut self, cache: &'c mut dyn RecordCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Use a different PDF backend.
    pub fn with_backend(mut self, backend: PdfBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Process every file; failures become error records.
    pub fn run(self, files: &[StatementFile]) -> ConsolidatedTable {
        self.run_with_progress(files, |_| {})
    }

    /// Process every file, reporting progress after each one.
    pub fn run_with_progress<F>(mut self, files: &[StatementFile], mut on_progress: F) -> ConsolidatedTable
    where
        F: FnMut(BatchProgress<'_>),
    {
        let start = Instant::now();
        let extractor = self.layout.extractor();
        let total = files.len();
        let mut table = ConsolidatedTable::new();

        for (i, file) in files.iter().enumerate() {
            let key = self.cache.is_some().then(|| CacheKey::new(self.layout, file));
            let cached = match (self.cache.as_deref_mut(), &key) {
                (Some(cache), Some(key)) => cache.lookup(key),
                _ => None,
            };
            let hit = cached.is_some();

            let record = match cached {
                Some(record) => record,
                None => {
                    let mut pdf = (self.backend)();
                    let record = extractor.process_with(pdf.as_mut(), &file.data, &file.name);
                    if let (Some(cache), Some(key)) = (self.cache.as_deref_mut(), key) {
                        cache.store(key, record.clone());
                    }
                    record
                }
            };

            debug!("[{}/{}] {} -> {}", i + 1, total, file.name, record.account);
            table.push(record);

            on_progress(BatchProgress {
                done: i + 1,
                total,
                file_name: &file.name,
                cached: hit,
            });
        }

        info!(
            "Processed {} files as {} in {:?}",
            total,
            self.layout.slug(),
            start.elapsed()
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::StatementCache;
    use crate::statement::testing::TextPdf;
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn text_backend() -> Box<dyn PdfProcessor> {
        Box::new(TextPdf::default())
    }

    fn caixa_file(name: &str, account: &str, current: &str) -> StatementFile {
        let text = format!(
            "Conta Corrente\n{}\nSaldo Anterior\n100,00C\nRendimento Bruto no Mês\n1,00C\nSaldo Bruto\n{}\n",
            account, current
        );
        StatementFile::new(name, text.into_bytes())
    }

    #[test]
    fn test_one_failure_does_not_stop_batch() {
        let files = vec![
            caixa_file("a.pdf", "111-1", "101,00C"),
            StatementFile::new("broken.pdf", b"%BROKEN".to_vec()),
            caixa_file("c.pdf", "333-3", "50,00C"),
        ];

        let table = BatchProcessor::new(Layout::Caixa)
            .with_backend(text_backend)
            .run(&files);

        assert_eq!(table.len(), 3);
        let errors: Vec<_> = table.iter().filter(|r| r.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file_name, "broken.pdf");
        assert!(errors[0].account.starts_with("Erro:"));

        let summary = table.summary();
        assert!((summary.total_current_balance - 151.0).abs() < 1e-9);
        assert!((summary.total_income - 2.0).abs() < 1e-9);
        assert_eq!(summary.distinct_accounts, 3);
    }

    #[test]
    fn test_progress_reported_per_file() {
        let files = vec![
            caixa_file("a.pdf", "1-1", "1,00C"),
            caixa_file("b.pdf", "2-2", "2,00C"),
        ];
        let mut seen = Vec::new();

        BatchProcessor::new(Layout::Caixa)
            .with_backend(text_backend)
            .run_with_progress(&files, |p| seen.push((p.done, p.total, p.file_name.to_string())));

        assert_eq!(
            seen,
            vec![(1, 2, "a.pdf".to_string()), (2, 2, "b.pdf".to_string())]
        );
    }

    #[test]
    fn test_cache_reuses_identical_upload() {
        let mut cache = StatementCache::new(8);
        let files = vec![caixa_file("a.pdf", "1-1", "1,00C")];

        let first = BatchProcessor::new(Layout::Caixa)
            .with_backend(text_backend)
            .with_cache(&mut cache)
            .run(&files);
        assert_eq!(cache.len(), 1);

        let mut hits = 0;
        let second = BatchProcessor::new(Layout::Caixa)
            .with_backend(text_backend)
            .with_cache(&mut cache)
            .run_with_progress(&files, |p| {
                if p.cached {
                    hits += 1;
                }
            });

        assert_eq!(hits, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_bytes_other_layout_not_cached() {
        let mut cache = StatementCache::new(8);
        let files = vec![caixa_file("a.pdf", "1-1", "1,00C")];

        BatchProcessor::new(Layout::Caixa)
            .with_backend(text_backend)
            .with_cache(&mut cache)
            .run(&files);
        let table = BatchProcessor::new(Layout::Standard)
            .with_backend(text_backend)
            .with_cache(&mut cache)
            .run(&files);

        assert_eq!(cache.len(), 2);
        assert_eq!(table.records()[0].account, "Não encontrado");
    }

    lazy_static! {
        static ref SHARED: Mutex<StatementCache> = Mutex::new(StatementCache::new(8));
    }
    static LOCKED_DURING_EXTRACTION: AtomicBool = AtomicBool::new(false);

    fn lock_checking_backend() -> Box<dyn PdfProcessor> {
        if SHARED.try_lock().is_err() {
            LOCKED_DURING_EXTRACTION.store(true, Ordering::SeqCst);
        }
        Box::new(TextPdf::default())
    }

    #[test]
    fn test_shared_cache_unlocked_while_extracting() {
        let files = vec![
            caixa_file("a.pdf", "1-1", "1,00C"),
            caixa_file("b.pdf", "2-2", "2,00C"),
        ];

        let mut shared = &*SHARED;
        let table = BatchProcessor::new(Layout::Caixa)
            .with_backend(lock_checking_backend)
            .with_cache(&mut shared)
            .run(&files);

        assert_eq!(table.len(), 2);
        assert!(!LOCKED_DURING_EXTRACTION.load(Ordering::SeqCst));
        assert_eq!(SHARED.lock().unwrap().len(), 2);
    }
}

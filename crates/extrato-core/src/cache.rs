//! Session cache of processed statements.
//!
//! Keyed on the SHA-256 of the file bytes, the file name and the layout, so
//! re-uploading an identical file skips extraction. Lives as long as its
//! owner; nothing is persisted.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};
use tracing::trace;

use crate::models::statement::{StatementFile, StatementRecord};
use crate::statement::Layout;

/// Identity of one processed upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    digest: [u8; 32],
    file_name: String,
    layout: Layout,
}

impl CacheKey {
    pub fn new(layout: Layout, file: &StatementFile) -> Self {
        Self {
            digest: Sha256::digest(&file.data).into(),
            file_name: file.name.clone(),
            layout,
        }
    }
}

/// Bounded cache evicting the oldest entry first.
#[derive(Debug)]
pub struct StatementCache {
    capacity: usize,
    entries: HashMap<CacheKey, StatementRecord>,
    order: VecDeque<CacheKey>,
}

impl StatementCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<&StatementRecord> {
        let hit = self.entries.get(key);
        trace!("cache {} for {}", if hit.is_some() { "hit" } else { "miss" }, key.file_name);
        hit
    }

    pub fn insert(&mut self, key: CacheKey, record: StatementRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), record).is_none() {
            self.order.push_back(key);
        }
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Where a batch looks up finished records and stores new ones.
pub trait RecordCache {
    fn lookup(&mut self, key: &CacheKey) -> Option<StatementRecord>;
    fn store(&mut self, key: CacheKey, record: StatementRecord);
}

impl RecordCache for StatementCache {
    fn lookup(&mut self, key: &CacheKey) -> Option<StatementRecord> {
        self.get(key).cloned()
    }

    fn store(&mut self, key: CacheKey, record: StatementRecord) {
        self.insert(key, record);
    }
}

/// A cache shared between concurrent batches. The lock is taken per lookup
/// and per store, never across extraction.
impl RecordCache for &Mutex<StatementCache> {
    fn lookup(&mut self, key: &CacheKey) -> Option<StatementRecord> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn store(&mut self, key: CacheKey, record: StatementRecord) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(name: &str) -> StatementRecord {
        StatementRecord::failed(name, None, "cached")
    }

    #[test]
    fn test_key_depends_on_content_name_and_layout() {
        let a = StatementFile::new("a.pdf", b"same".to_vec());
        let b = StatementFile::new("b.pdf", b"same".to_vec());
        let a2 = StatementFile::new("a.pdf", b"other".to_vec());

        let key = CacheKey::new(Layout::Caixa, &a);
        assert_eq!(key, CacheKey::new(Layout::Caixa, &a.clone()));
        assert_ne!(key, CacheKey::new(Layout::Caixa, &b));
        assert_ne!(key, CacheKey::new(Layout::Caixa, &a2));
        assert_ne!(key, CacheKey::new(Layout::Bb, &a));
    }

    #[test]
    fn test_get_after_insert() {
        let mut cache = StatementCache::new(4);
        let file = StatementFile::new("a.pdf", b"x".to_vec());
        let key = CacheKey::new(Layout::Standard, &file);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), record("a.pdf"));
        assert_eq!(cache.get(&key), Some(&record("a.pdf")));
    }

    #[test]
    fn test_evicts_oldest() {
        let mut cache = StatementCache::new(2);
        let keys: Vec<CacheKey> = ["a", "b", "c"]
            .iter()
            .map(|n| CacheKey::new(Layout::Caixa, &StatementFile::new(*n, n.as_bytes().to_vec())))
            .collect();

        for key in &keys {
            cache.insert(key.clone(), record("x"));
        }

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&keys[0]).is_none());
        assert!(cache.get(&keys[2]).is_some());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = StatementCache::new(0);
        let key = CacheKey::new(Layout::Caixa, &StatementFile::new("a", vec![]));
        cache.insert(key.clone(), record("a"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_cache_round_trip() {
        let shared = Mutex::new(StatementCache::new(4));
        let key = CacheKey::new(Layout::Bb, &StatementFile::new("a.pdf", b"x".to_vec()));

        let mut handle = &shared;
        assert!(handle.lookup(&key).is_none());
        handle.store(key.clone(), record("a.pdf"));

        assert_eq!(handle.lookup(&key), Some(record("a.pdf")));
        assert!(shared.try_lock().is_ok());
        assert_eq!(shared.lock().unwrap().len(), 1);
    }
}

//! Persistence of metric records between runs

use crate::error::StorageError;
use crate::record::MetricRecord;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Where metric records live between batches
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the record for `name`, or a fresh one if none was saved
    async fn load(&self, name: &str) -> Result<MetricRecord, StorageError>;

    /// Save a record, replacing any previous one with the same name
    async fn save(&self, record: &MetricRecord) -> Result<(), StorageError>;

    /// Drop every record whose name is not in `keep`
    ///
    /// Returns how many records were removed.
    async fn cleanup(&self, keep: &[&str]) -> Result<usize, StorageError>;
}

/// Process-local storage
///
/// Records are lost on restart. Every metric then reads as never updated
/// until its next successful write.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<HashMap<String, MetricRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Saved record names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.records.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self, name: &str) -> Result<MetricRecord, StorageError> {
        Ok(self
            .records
            .read()
            .get(name)
            .cloned()
            .unwrap_or_else(|| MetricRecord::new(name)))
    }

    async fn save(&self, record: &MetricRecord) -> Result<(), StorageError> {
        self.records
            .write()
            .insert(record.name.clone(), record.clone());
        Ok(())
    }

    async fn cleanup(&self, keep: &[&str]) -> Result<usize, StorageError> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|name, _| keep.contains(&name.as_str()));
        Ok(before - records.len())
    }
}

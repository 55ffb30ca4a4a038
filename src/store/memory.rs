//! In-memory address store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::observability::metrics;
use crate::store::address::AddressRecord;
use crate::store::seed::seed_records;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("address store lock poisoned")]
    LockPoisoned,

    #[error("index {index} out of range for store of {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("address id already present: {0}")]
    DuplicateId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Ordered collection of address records, in insertion order.
///
/// Reads share the lock; `insert` and removals take it exclusively, so a
/// mutation never interleaves with another mutation or a read.
#[derive(Debug, Default)]
pub struct AddressStore {
    records: RwLock<Vec<AddressRecord>>,
}

impl AddressStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the startup seed set.
    pub fn seeded() -> Self {
        Self::from_records(seed_records())
    }

    /// Create a store from existing records.
    ///
    /// Records with an id already seen are dropped.
    pub fn from_records(records: impl IntoIterator<Item = AddressRecord>) -> Self {
        let mut unique: Vec<AddressRecord> = Vec::new();
        for record in records {
            if unique.iter().any(|r| r.id == record.id) {
                tracing::warn!(id = %record.id, "Skipping duplicate seed record");
                continue;
            }
            unique.push(record);
        }
        metrics::record_store_size(unique.len());
        Self {
            records: RwLock::new(unique),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<AddressRecord>>> {
        self.records.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<AddressRecord>>> {
        self.records.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Snapshot of every record in insertion order.
    pub fn list(&self) -> StoreResult<Vec<AddressRecord>> {
        Ok(self.read()?.clone())
    }

    /// Position of the record with `id`, if any.
    pub fn find_index(&self, id: &str) -> StoreResult<Option<usize>> {
        Ok(position(&self.read()?, id))
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Append a record. Fails if its id is already stored.
    pub fn insert(&self, record: AddressRecord) -> StoreResult<()> {
        let mut records = self.write()?;
        if position(&records, &record.id).is_some() {
            return Err(StoreError::DuplicateId(record.id));
        }
        records.push(record);
        metrics::record_store_size(records.len());
        Ok(())
    }

    /// Remove and return the record at `index`.
    pub fn remove_at(&self, index: usize) -> StoreResult<AddressRecord> {
        let mut records = self.write()?;
        remove_at(&mut records, index)
    }

    /// Look up `id` and remove it under one write lock.
    ///
    /// Returns `Ok(None)` when no record has that id.
    pub fn remove_by_id(&self, id: &str) -> StoreResult<Option<AddressRecord>> {
        let mut records = self.write()?;
        match position(&records, id) {
            Some(index) => remove_at(&mut records, index).map(Some),
            None => Ok(None),
        }
    }
}

fn position(records: &[AddressRecord], id: &str) -> Option<usize> {
    records.iter().position(|r| r.id == id)
}

fn remove_at(records: &mut Vec<AddressRecord>, index: usize) -> StoreResult<AddressRecord> {
    if index >= records.len() {
        return Err(StoreError::IndexOutOfRange {
            index,
            len: records.len(),
        });
    }
    let removed = records.remove(index);
    metrics::record_store_size(records.len());
    Ok(removed)
}

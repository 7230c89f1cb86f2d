//! Immutable accident-record storage.

use roadrisk_types::record::{AccidentRecord, RecordId};
use rustc_hash::FxHashMap;

/// Frozen id → record map, the single owner of all [`AccidentRecord`]s.
///
/// Every other structure in the index references records by id only; the
/// store is built once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: FxHashMap<RecordId, AccidentRecord>,
}

impl RecordStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, record: AccidentRecord) {
        self.records.insert(record.id, record);
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&AccidentRecord> {
        self.records.get(&id)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all stored records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &AccidentRecord> + '_ {
        self.records.values()
    }
}

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, PoisonError, RwLock,
    },
};

use crate::model::{
    api::ApiResult,
    record::{IssuedFor, SyncRecord},
};

/// Pending and imported records of one data set.
///
/// Completions of either scope merge into the pending set; an import de-duplicates the
/// pending set into the presented set and empties it.
pub(crate) struct RecordStore<R> {
    pending: Mutex<Vec<R>>,
    presented: RwLock<Vec<R>>,
    imports: AtomicU64,
}

impl<R: SyncRecord> RecordStore<R> {
    pub(crate) fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            presented: RwLock::new(Vec::new()),
            imports: AtomicU64::new(0),
        }
    }

    /// Merges the records of `result` into the pending set.
    ///
    /// Unless the other scope already added records in this epoch, the pending set is
    /// cleared first so a scope completing twice does not stack its records.
    ///
    /// # Returns
    /// - `true` - At least one record was added
    /// - `false` - The result was an error or carried no records
    pub(crate) fn merge(
        &self,
        result: &ApiResult<Vec<R>>,
        peer_added: bool,
        issued_for: IssuedFor,
    ) -> bool {
        let Some(records) = result.payload() else {
            return false;
        };

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !peer_added {
            pending.clear();
        }

        pending.extend(records.iter().cloned().map(|mut record| {
            record.set_issued_for(issued_for);
            record
        }));

        !records.is_empty()
    }

    /// Replaces the presented set with the de-duplicated pending set.
    ///
    /// A record reported by both scopes is kept once, as its corporation copy, at the
    /// position it was first seen.
    ///
    /// # Returns
    /// Number of presented records.
    pub(crate) fn import(&self) -> usize {
        let pending: Vec<R> =
            std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));

        let mut positions: HashMap<i64, usize> = HashMap::with_capacity(pending.len());
        let mut records: Vec<R> = Vec::with_capacity(pending.len());

        for record in pending {
            match positions.get(&record.record_id()) {
                Some(&index) => {
                    if record.issued_for() == IssuedFor::Corporation {
                        records[index] = record;
                    }
                }
                None => {
                    positions.insert(record.record_id(), records.len());
                    records.push(record);
                }
            }
        }

        let count = records.len();
        *self
            .presented
            .write()
            .unwrap_or_else(PoisonError::into_inner) = records;
        self.imports.fetch_add(1, Ordering::AcqRel);

        count
    }

    pub(crate) fn records(&self) -> Vec<R> {
        self.presented
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub(crate) fn import_count(&self) -> u64 {
        self.imports.load(Ordering::Acquire)
    }
}

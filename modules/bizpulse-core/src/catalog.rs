use std::collections::HashMap;

use bizpulse_common::BusinessRecord;

use crate::filter::SearchKeys;

/// The full record collection for a session. Built once after the fetch
/// and never mutated; keyed by `location_account`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<BusinessRecord>,
    /// Parallel to `records`.
    search_keys: Vec<SearchKeys>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Later rows repeating an already-seen key are dropped, so the key stays
    /// unique. Rows without a key are all kept but never indexed, so they
    /// count and filter like any other record and cannot be selected.
    pub fn new(records: Vec<BusinessRecord>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());
        let mut duplicates = 0usize;
        let mut keyless = 0usize;

        for record in records {
            if record.location_account.is_empty() {
                keyless += 1;
            } else if index.contains_key(&record.location_account) {
                duplicates += 1;
                continue;
            } else {
                index.insert(record.location_account.clone(), kept.len());
            }
            kept.push(record);
        }

        if duplicates > 0 {
            tracing::warn!(duplicates, "Dropped records with duplicate location_account");
        }
        if keyless > 0 {
            tracing::debug!(keyless, "Kept unselectable records without location_account");
        }

        let search_keys = kept.iter().map(SearchKeys::of).collect();
        Self {
            records: kept,
            search_keys,
            index,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    /// Records paired with their prepared search keys, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&BusinessRecord, &SearchKeys)> {
        self.records.iter().zip(&self.search_keys)
    }

    pub fn get(&self, key: &str) -> Option<&BusinessRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

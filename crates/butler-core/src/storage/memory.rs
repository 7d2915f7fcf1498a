//! In-memory day store.

use chrono::NaiveDate;

use super::{apply_upsert, DayStore};
use crate::error::Result;
use crate::record::{DayRecord, DrinkCount};

/// Day store held entirely in memory. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<DayRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. Later duplicates of a day replace earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = DayRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            apply_upsert(
                &mut store.records,
                record.day,
                Some(record.count),
                Some(record.note),
            );
        }
        store
    }
}

impl DayStore for MemoryStore {
    fn load(&self) -> Result<Vec<DayRecord>> {
        Ok(self.records.clone())
    }

    fn upsert(
        &mut self,
        day: NaiveDate,
        count: Option<DrinkCount>,
        note: Option<String>,
    ) -> Result<DayRecord> {
        Ok(apply_upsert(&mut self.records, day, count, note))
    }
}

mod config;
mod csv_store;
mod memory;

pub use config::{Config, DisplayConfig, StorageConfig};
pub use csv_store::CsvStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{Result, StoreError, ValidationError};
use crate::record::{DayRecord, DrinkCount};

/// File name of the day-record table inside the data directory.
pub const RECORDS_FILE: &str = "drinks.csv";

/// Returns `$BUTLER_HOME`, or `~/.butler/` when unset, creating it if needed.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("BUTLER_HOME") {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => dirs::home_dir().ok_or(StoreError::NoDataDir)?.join(".butler"),
    };

    std::fs::create_dir_all(&dir).map_err(|source| StoreError::OpenFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Persistent collection of day records, unique by day.
///
/// Only the store writes; the engines read snapshots returned by `load`.
pub trait DayStore {
    /// All valid records, in no guaranteed order.
    fn load(&self) -> Result<Vec<DayRecord>>;

    /// Insert or update the record for `day`.
    ///
    /// A new day starts absent with an empty note. For an existing day only
    /// the fields passed as `Some` are replaced.
    fn upsert(
        &mut self,
        day: NaiveDate,
        count: Option<DrinkCount>,
        note: Option<String>,
    ) -> Result<DayRecord>;

    fn find(&self, day: NaiveDate) -> Result<Option<DayRecord>> {
        Ok(self.load()?.into_iter().find(|r| r.day == day))
    }

    /// Add `n` drinks to the day's effective count.
    fn add_drinks(&mut self, day: NaiveDate, n: u32) -> Result<DayRecord> {
        let current = self.find(day)?.map_or(0, |r| r.count.effective());
        let total = current
            .checked_add(n)
            .ok_or(ValidationError::CountOverflow {
                day,
                current,
                added: n,
            })?;
        self.upsert(day, Some(DrinkCount::Recorded(total)), None)
    }

    /// Advance the day's count through the quick-edit cycle.
    fn cycle_drinks(&mut self, day: NaiveDate) -> Result<DayRecord> {
        let current = self.find(day)?.map_or(DrinkCount::Absent, |r| r.count);
        self.upsert(day, Some(current.cycled()), None)
    }

    fn set_note(&mut self, day: NaiveDate, note: String) -> Result<DayRecord> {
        self.upsert(day, None, Some(note))
    }
}

/// Shared upsert rule for every store backend.
pub(crate) fn apply_upsert(
    records: &mut Vec<DayRecord>,
    day: NaiveDate,
    count: Option<DrinkCount>,
    note: Option<String>,
) -> DayRecord {
    match records.iter_mut().find(|r| r.day == day) {
        Some(existing) => {
            if let Some(count) = count {
                existing.count = count;
            }
            if let Some(note) = note {
                existing.note = note;
            }
            existing.clone()
        }
        None => {
            let record = DayRecord {
                day,
                count: count.unwrap_or_default(),
                note: note.unwrap_or_default(),
            };
            records.push(record.clone());
            record
        }
    }
}

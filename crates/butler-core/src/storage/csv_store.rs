//! CSV-backed day store.
//!
//! File layout: a `date,count,note` header, then one row per day in day
//! order. An empty `count` cell means no data for that day. Rows that fail
//! to parse are logged and skipped so one bad line never hides the rest.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::{apply_upsert, data_dir, DayStore, RECORDS_FILE};
use crate::error::{Result, StoreError};
use crate::record::{DayRecord, DrinkCount};

const HEADER: [&str; 3] = ["date", "count", "note"];

/// Reason a stored row was skipped.
#[derive(Error, Debug)]
enum RowError {
    #[error("unparseable date {0:?}")]
    InvalidDate(String),

    #[error("unparseable count {0:?}")]
    InvalidCount(String),
}

/// Column positions resolved from the header row.
struct Columns {
    date: Option<usize>,
    count: Option<usize>,
    note: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Self {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        Self {
            date: find("date"),
            count: find("count"),
            note: find("note"),
        }
    }

    fn parse(&self, row: &csv::StringRecord) -> Result<DayRecord, RowError> {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map_or("", str::trim);

        let raw_date = cell(self.date);
        let day = raw_date
            .parse::<NaiveDate>()
            .map_err(|_| RowError::InvalidDate(raw_date.to_string()))?;

        let raw_count = cell(self.count);
        let count = if raw_count.is_empty() {
            DrinkCount::Absent
        } else {
            raw_count
                .parse::<u32>()
                .map(DrinkCount::Recorded)
                .map_err(|_| RowError::InvalidCount(raw_count.to_string()))?
        };

        Ok(DayRecord {
            day,
            count,
            note: cell(self.note).to_string(),
        })
    }
}

/// Day store persisted as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Open `drinks.csv` in the default data directory.
    pub fn open() -> Result<Self> {
        Self::open_at(data_dir()?.join(RECORDS_FILE))
    }

    /// Open the store at `path`, creating a header-only file if missing.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::OpenFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            let store = Self { path };
            store.write_all(&[])?;
            tracing::debug!(path = %store.path.display(), "created day store");
            return Ok(store);
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole file in day order via a temp file and rename.
    fn write_all(&self, records: &[DayRecord]) -> Result<()> {
        let mut sorted: Vec<&DayRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.day);

        let tmp = self.path.with_extension("csv.tmp");
        let written = Self::write_rows(&tmp, &sorted).and_then(|()| {
            std::fs::rename(&tmp, &self.path).map_err(|e| {
                StoreError::WriteFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }
                .into()
            })
        });
        if written.is_err() && tmp.exists() {
            if let Err(e) = std::fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temp file");
            }
        }
        written
    }

    fn write_rows(path: &Path, records: &[&DayRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(HEADER)?;
        for record in records {
            let count = match record.count {
                DrinkCount::Absent => String::new(),
                DrinkCount::Recorded(n) => n.to_string(),
            };
            writer.write_record([record.day.to_string(), count, record.note.clone()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl DayStore for CsvStore {
    fn load(&self) -> Result<Vec<DayRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let columns = Columns::from_header(reader.headers()?);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "skipping unreadable row");
                    continue;
                }
            };
            match columns.parse(&row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    let line = row.position().map_or(0, |p| p.line());
                    tracing::warn!(path = %self.path.display(), line, reason = %e, "skipping malformed row");
                }
            }
        }
        Ok(records)
    }

    fn upsert(
        &mut self,
        day: NaiveDate,
        count: Option<DrinkCount>,
        note: Option<String>,
    ) -> Result<DayRecord> {
        let mut records = self.load()?;
        let record = apply_upsert(&mut records, day, count, note);
        self.write_all(&records)?;
        tracing::debug!(%day, count = ?record.count, "upserted day record");
        Ok(record)
    }
}

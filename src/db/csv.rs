use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ::csv::StringRecord;

use super::{LeadStore, StoreError};
use crate::models::Lead;

/// Column order written to disk. Matches the field order of `Lead`.
const COLUMNS: [&str; 7] = [
    "LeadID",
    "PhoneNumber",
    "Name",
    "AvailableSlots",
    "BookedSlot",
    "Status",
    "BookingTime",
];

pub struct CsvLeadStore {
    path: PathBuf,
    /// Rows from the last load that did not parse as a `Lead`, already
    /// mapped onto `COLUMNS`. They are written back untouched on every save.
    quarantined: Mutex<Vec<StringRecord>>,
}

impl CsvLeadStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            quarantined: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn quarantined_count(&self) -> usize {
        self.quarantined
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .len()
    }
}

fn to_columns(headers: &StringRecord, record: &StringRecord) -> StringRecord {
    COLUMNS
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h == *column)
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
        })
        .collect()
}

impl LeadStore for CsvLeadStore {
    fn load(&self) -> Result<Vec<Lead>, StoreError> {
        let mut quarantined = self.quarantined.lock().unwrap_or_else(|p| p.into_inner());
        quarantined.clear();

        if !self.path.exists() {
            tracing::warn!(path = %self.path.display(), "leads file not found, starting empty");
            return Ok(Vec::new());
        }

        let mut reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut leads = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            match record.deserialize::<Lead>(Some(&headers)) {
                Ok(lead) => leads.push(lead),
                // Header is line 1, so data row N sits on line N + 2.
                Err(e) => {
                    tracing::warn!(line = row + 2, error = %e, "quarantining malformed lead row");
                    quarantined.push(to_columns(&headers, &record));
                }
            }
        }

        Ok(leads)
    }

    fn replace_all(&self, leads: &[Lead]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let quarantined = self.quarantined.lock().unwrap_or_else(|p| p.into_inner());

        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        for lead in leads {
            writer.serialize(lead)?;
        }
        for record in quarantined.iter() {
            writer.write_record(record)?;
        }
        writer.flush()?;

        Ok(())
    }
}

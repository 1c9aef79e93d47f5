// Scan record persistence, one JSON object per line

use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::models::TravelRecord;
use crate::utils::PassportError;

/// Storage for scanned records. Callers own the handle and pass it where it
/// is needed.
pub trait RecordStore {
    fn save(&mut self, record: &TravelRecord) -> Result<(), PassportError>;
    fn load_all(&self) -> Result<Vec<TravelRecord>, PassportError>;
}

pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PassportError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(JsonLinesStore { path })
    }

    /// Opens an existing store without creating anything. A missing file is
    /// an `Io` error.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self, PassportError> {
        let path = path.as_ref().to_path_buf();
        File::open(&path)?;
        Ok(JsonLinesStore { path })
    }
}

impl RecordStore for JsonLinesStore {
    fn save(&mut self, record: &TravelRecord) -> Result<(), PassportError> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        info!(
            "Saved scan of document {:?} to {}",
            record.document.document_number,
            self.path.display()
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TravelRecord>, PassportError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

//! Catalog store: the immutable list of laptops served for the process lifetime.
//!
//! Loading policy:
//! - a missing or unreadable source yields an empty catalog, not an error;
//! - a document that is not a JSON array is rejected outright;
//! - individual records that fail to parse or validate, or whose value score is
//!   not a finite number, are skipped and reported.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::domain::laptop::LaptopRecord;
use crate::engine::value_score;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    records: Vec<LaptopRecord>,
}

impl Catalog {
    pub fn new(records: Vec<LaptopRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LaptopRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceState {
    Loaded,
    Missing,
    Unreadable { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadReport {
    pub source: PathBuf,
    pub state: SourceState,
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not parse catalog `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Reads the catalog file at `path`.
pub fn load_catalog(path: &Path) -> Result<LoadReport, CatalogError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            let state = if error.kind() == io::ErrorKind::NotFound {
                SourceState::Missing
            } else {
                SourceState::Unreadable { reason: error.to_string() }
            };
            return Ok(LoadReport {
                source: path.to_path_buf(),
                state,
                catalog: Catalog::default(),
                skipped: Vec::new(),
            });
        }
    };

    let (catalog, skipped) = parse_catalog(&raw)
        .map_err(|source| CatalogError::Parse { path: path.to_path_buf(), source })?;

    Ok(LoadReport { source: path.to_path_buf(), state: SourceState::Loaded, catalog, skipped })
}

/// Parses a JSON array of laptop records, keeping catalog order.
pub fn parse_catalog(raw: &str) -> Result<(Catalog, Vec<SkippedRecord>), serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let parsed = serde_json::from_value::<LaptopRecord>(entry)
            .map_err(|error| error.to_string())
            .and_then(admit);

        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(SkippedRecord { index, reason }),
        }
    }

    Ok((Catalog::new(records), skipped))
}

/// A record joins the catalog only if it is valid and can be ranked.
fn admit(record: LaptopRecord) -> Result<LaptopRecord, String> {
    record.validate().map_err(|error| error.to_string())?;
    value_score(&record).map_err(|error| error.to_string())?;
    Ok(record)
}

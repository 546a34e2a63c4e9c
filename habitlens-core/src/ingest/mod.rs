//! Ingestion of habit logs
//!
//! Reads a CSV habit log into a [`Dataset`].
//!
//! ## Failure model
//!
//! - **File level**: an unreadable table (no header, invalid UTF-8, a row
//!   with more fields than the header) fails the whole load with a single
//!   error. No partial dataset is returned.
//! - **Cell level**: an unparseable value only empties that cell (and the
//!   fields derived from it). A warning is logged and loading continues.
//! - **Column level**: unknown headers are ignored; missing recognized
//!   headers simply leave their columns out of the schema.

pub mod features;

use csv::{ReaderBuilder, StringRecord, Trim};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::types::{Column, Dataset, HabitRecord};

pub use features::{derive, parse_date, parse_wake_minutes, wake_hour};

/// SHA-256 fingerprint (hex) of a habit log's raw bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load a habit log from a file on disk.
pub fn load_path(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path)?;
    load_bytes(&bytes)
}

/// Load a habit log from in-memory bytes.
pub fn load_bytes(bytes: &[u8]) -> Result<Dataset> {
    load_csv(bytes)
}

/// Load a habit log from any CSV reader.
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(Error::Load("no columns to parse".to_string()));
    }

    let layout = ColumnLayout::from_headers(&headers);
    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result?;
        if row.len() > headers.len() {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            return Err(Error::Load(format!(
                "line {} has {} fields, expected {}",
                line,
                row.len(),
                headers.len()
            )));
        }
        records.push(features::derive(layout.record(&row)));
    }

    let dataset = Dataset::new(layout.columns(), records);
    info!(
        records = dataset.len(),
        columns = dataset.columns.len(),
        "Loaded habit log"
    );
    Ok(dataset)
}

/// Position of each recognized column in the input header.
struct ColumnLayout {
    positions: Vec<(Column, usize)>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut positions: Vec<(Column, usize)> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            match Column::from_header(header) {
                Some(column) if positions.iter().any(|(c, _)| *c == column) => {
                    warn!(column = header, "Duplicate column, keeping the first one");
                }
                Some(column) => positions.push((column, idx)),
                None => debug!(column = header, "Ignoring unrecognized column"),
            }
        }
        Self { positions }
    }

    /// Recognized columns in input order.
    fn columns(&self) -> Vec<Column> {
        self.positions.iter().map(|(c, _)| *c).collect()
    }

    fn cell<'a>(&self, row: &'a StringRecord, column: Column) -> Option<&'a str> {
        let idx = self.positions.iter().find(|(c, _)| *c == column)?.1;
        row.get(idx).filter(|s| !s.is_empty())
    }

    fn float(&self, row: &StringRecord, column: Column) -> Option<f64> {
        let raw = self.cell(row, column)?;
        let value = parse_float(raw);
        if value.is_none() && !is_missing_marker(raw) {
            warn!(column = %column, value = raw, "Unparseable number, cell left empty");
        }
        value
    }

    fn integer(&self, row: &StringRecord, column: Column) -> Option<i64> {
        let raw = self.cell(row, column)?;
        match parse_integer(raw) {
            Ok(value) => Some(value),
            Err(_) if is_missing_marker(raw) => None,
            Err(problem) => {
                warn!(column = %column, value = raw, problem = %problem, "Integer cell left empty");
                None
            }
        }
    }

    fn record(&self, row: &StringRecord) -> HabitRecord {
        let date = self.cell(row, Column::Date).and_then(|raw| {
            let date = features::parse_date(raw);
            if date.is_none() {
                warn!(value = raw, "Unparseable date, weekday left empty");
            }
            date
        });

        HabitRecord {
            date,
            wake_time: self.cell(row, Column::WakeUpTime).map(str::to_string),
            sleep_hours: self.float(row, Column::SleepHours),
            steps: self.integer(row, Column::Steps),
            calories_burned: self.float(row, Column::CaloriesBurned),
            water_intake_ml: self.float(row, Column::WaterIntakeMl),
            study_hours: self.float(row, Column::StudyHours),
            mood_score: self.integer(row, Column::MoodScore),
        }
    }
}

/// Spreadsheet spellings of an empty cell.
fn is_missing_marker(raw: &str) -> bool {
    matches!(raw, "NA" | "N/A" | "NaN" | "nan" | "null" | "NULL" | "None")
}

/// Parse a finite float; NaN and infinities count as missing.
fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Why an integer cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntegerProblem {
    NotANumber,
    /// A valid number with a fractional part, e.g. "7.5"
    NotWhole,
}

impl std::fmt::Display for IntegerProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegerProblem::NotANumber => f.write_str("not a number"),
            IntegerProblem::NotWhole => f.write_str("non-integer value"),
        }
    }
}

/// Parse an integer, accepting whole-valued floats such as "5000.0".
fn parse_integer(raw: &str) -> std::result::Result<i64, IntegerProblem> {
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    let value = parse_float(raw).ok_or(IntegerProblem::NotANumber)?;
    if value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
        return Err(IntegerProblem::NotWhole);
    }
    Ok(value as i64)
}

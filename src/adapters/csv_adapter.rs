//! CSV file data adapter.
//!
//! Daily file: header row, then `date,avg_temperature,...` with ISO dates.
//! Atmosphere file: header row, then `label,temperature,nitrogen_dioxide,ozone`.
//! Rows missing a required value are skipped; malformed values are errors.

use crate::domain::error::ClimtrendError;
use crate::domain::sample::{AtmosphereRecord, Sample};
use crate::ports::data_port::ClimateDataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct CsvAdapter {
    daily_path: PathBuf,
    atmosphere_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(daily_path: PathBuf, atmosphere_path: PathBuf) -> Self {
        Self {
            daily_path,
            atmosphere_path,
        }
    }
}

/// Where a record came from, for error messages.
struct RowLocation<'a> {
    file: &'a Path,
    line: u64,
}

impl RowLocation<'_> {
    fn error(&self, reason: String) -> ClimtrendError {
        ClimtrendError::DataParse {
            file: self.file.display().to_string(),
            line: self.line,
            reason,
        }
    }

    /// The trimmed field at `index`, or `None` when the column is absent or blank.
    fn optional<'r>(&self, record: &'r StringRecord, index: usize) -> Option<&'r str> {
        record.get(index).map(str::trim).filter(|s| !s.is_empty())
    }

    fn number(&self, raw: &str, column: &str) -> Result<f64, ClimtrendError> {
        raw.parse()
            .map_err(|e| self.error(format!("invalid {} value '{}': {}", column, raw, e)))
    }
}

fn read_records(path: &Path) -> Result<Vec<(u64, StringRecord)>, ClimtrendError> {
    let content = fs::read_to_string(path)
        .map_err(|e| std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| ClimtrendError::DataParse {
            file: path.display().to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: format!("CSV parse error: {}", e),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        records.push((line, record));
    }
    Ok(records)
}

/// Numeric `(x, y)` pairs from two zero-based columns of a headed CSV file.
/// Rows where either column is blank are skipped.
pub fn read_column_pairs(
    path: &Path,
    x_column: usize,
    y_column: usize,
) -> Result<Vec<(f64, f64)>, ClimtrendError> {
    let mut pairs = Vec::new();

    for (line, record) in read_records(path)? {
        let loc = RowLocation { file: path, line };
        let (Some(x), Some(y)) = (
            loc.optional(&record, x_column),
            loc.optional(&record, y_column),
        ) else {
            continue;
        };
        pairs.push((loc.number(x, "x")?, loc.number(y, "y")?));
    }

    debug!(path = %path.display(), pairs = pairs.len(), "loaded column pairs");
    Ok(pairs)
}

impl ClimateDataPort for CsvAdapter {
    fn fetch_daily_temperatures(&self) -> Result<Vec<Sample>, ClimtrendError> {
        let mut samples = Vec::new();
        let mut skipped = 0usize;

        for (line, record) in read_records(&self.daily_path)? {
            let loc = RowLocation {
                file: &self.daily_path,
                line,
            };

            let Some(raw_temp) = loc.optional(&record, 1) else {
                debug!(line, "skipping daily row without temperature");
                skipped += 1;
                continue;
            };

            let date_str = loc
                .optional(&record, 0)
                .ok_or_else(|| loc.error("missing date column".into()))?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map_err(|e| loc.error(format!("invalid date '{}': {}", date_str, e)))?;
            let value = loc.number(raw_temp, "temperature")?;

            samples.push(Sample::new(date, value));
        }

        samples.sort_by_key(|s| s.date);
        info!(
            path = %self.daily_path.display(),
            rows = samples.len(),
            skipped,
            "loaded daily temperatures"
        );
        Ok(samples)
    }

    fn fetch_atmosphere(&self) -> Result<Vec<AtmosphereRecord>, ClimtrendError> {
        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for (line, record) in read_records(&self.atmosphere_path)? {
            let loc = RowLocation {
                file: &self.atmosphere_path,
                line,
            };

            let fields = (
                loc.optional(&record, 1),
                loc.optional(&record, 2),
                loc.optional(&record, 3),
            );
            let (Some(temperature), Some(nitrogen_dioxide), Some(ozone)) = fields else {
                debug!(line, "skipping atmosphere row with missing values");
                skipped += 1;
                continue;
            };

            rows.push(AtmosphereRecord {
                temperature: loc.number(temperature, "temperature")?,
                nitrogen_dioxide: loc.number(nitrogen_dioxide, "nitrogen_dioxide")?,
                ozone: loc.number(ozone, "ozone")?,
            });
        }

        info!(
            path = %self.atmosphere_path.display(),
            rows = rows.len(),
            skipped,
            "loaded atmosphere records"
        );
        Ok(rows)
    }
}

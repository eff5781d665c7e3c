//! CSV export of yearly aggregates and fitted models.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::aggregate::YearlyAggregate;
use crate::domain::analysis::Analysis;
use crate::domain::error::ClimtrendError;

#[derive(Debug, Serialize)]
struct YearlyRow {
    year: i32,
    mean_temperature: f64,
    samples: usize,
}

#[derive(Debug, Serialize)]
struct ModelRow<'a> {
    panel: &'a str,
    n: usize,
    slope: f64,
    intercept: f64,
    correlation: f64,
    r_squared: f64,
}

fn csv_error(path: &Path, e: csv::Error) -> ClimtrendError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => ClimtrendError::Io(io),
        other => ClimtrendError::Io(std::io::Error::other(format!(
            "failed to write {}: {:?}",
            path.display(),
            other
        ))),
    }
}

fn writer(path: &Path) -> Result<csv::Writer<fs::File>, ClimtrendError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    csv::Writer::from_path(path).map_err(|e| csv_error(path, e))
}

pub fn write_yearly(path: &Path, yearly: &[YearlyAggregate]) -> Result<(), ClimtrendError> {
    let mut wtr = writer(path)?;
    for y in yearly {
        wtr.serialize(YearlyRow {
            year: y.year,
            mean_temperature: y.mean_value,
            samples: y.sample_count,
        })
        .map_err(|e| csv_error(path, e))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_models(path: &Path, analysis: &Analysis) -> Result<(), ClimtrendError> {
    let mut wtr = writer(path)?;
    for panel in &analysis.panels {
        let m = &panel.model;
        wtr.serialize(ModelRow {
            panel: panel.kind.slug(),
            n: panel.series.len(),
            slope: m.slope,
            intercept: m.intercept,
            correlation: m.correlation,
            r_squared: m.r_squared,
        })
        .map_err(|e| csv_error(path, e))?;
    }
    wtr.flush()?;
    Ok(())
}

//! Configuration validation.
//!
//! Validates the `[data]` and `[analysis]` sections before any file is read.

use crate::domain::analysis::{AxisRange, DEFAULT_TEMPERATURE_RANGE, DEFAULT_YEAR_RANGE};
use crate::domain::error::ClimtrendError;
use crate::ports::config_port::ConfigPort;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), ClimtrendError> {
    require_path(config, "daily_csv")?;
    require_path(config, "atmosphere_csv")?;
    Ok(())
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), ClimtrendError> {
    validate_range(config, "year_range", DEFAULT_YEAR_RANGE)?;
    validate_range(config, "temperature_range", DEFAULT_TEMPERATURE_RANGE)?;
    validate_city(config)?;
    Ok(())
}

fn require_path(config: &dyn ConfigPort, key: &str) -> Result<(), ClimtrendError> {
    match config.get_path("data", key) {
        Some(_) => Ok(()),
        None => Err(ClimtrendError::ConfigMissing {
            section: "data".to_string(),
            key: key.to_string(),
        }),
    }
}

fn parse_number(config: &dyn ConfigPort, key: &str) -> Result<Option<f64>, ClimtrendError> {
    match config.get_string("analysis", key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| ClimtrendError::ConfigInvalid {
                section: "analysis".to_string(),
                key: key.to_string(),
                reason: format!("expected a finite number, got '{}'", raw.trim()),
            }),
    }
}

/// A missing bound falls back to `default`, so a one-sided override is
/// checked against the other default bound.
fn validate_range(
    config: &dyn ConfigPort,
    prefix: &str,
    default: AxisRange,
) -> Result<(), ClimtrendError> {
    let min_key = format!("{prefix}_min");
    let max_key = format!("{prefix}_max");
    let min = parse_number(config, &min_key)?.unwrap_or(default.min);
    let max = parse_number(config, &max_key)?.unwrap_or(default.max);

    if min >= max {
        return Err(ClimtrendError::ConfigInvalid {
            section: "analysis".to_string(),
            key: min_key,
            reason: format!("{prefix}_min ({min}) must be less than {prefix}_max ({max})"),
        });
    }
    Ok(())
}

fn validate_city(config: &dyn ConfigPort) -> Result<(), ClimtrendError> {
    match config.get_string("analysis", "city") {
        Some(s) if s.trim().is_empty() => Err(ClimtrendError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "city".to_string(),
            reason: "city must not be blank".to_string(),
        }),
        _ => Ok(()),
    }
}

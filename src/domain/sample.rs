//! Observation records produced by ingestion.

use chrono::{Datelike, NaiveDate};

/// A dated scalar observation, e.g. one day's average temperature in Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// One row of the atmosphere dataset.
///
/// Temperature is in Celsius; both concentrations are in ppb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereRecord {
    pub temperature: f64,
    pub nitrogen_dioxide: f64,
    pub ozone: f64,
}

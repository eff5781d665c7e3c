#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use climtrend::domain::analysis::Analysis;
use climtrend::domain::error::ClimtrendError;
use climtrend::domain::sample::{AtmosphereRecord, Sample};
use climtrend::ports::data_port::ClimateDataPort;
use climtrend::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub daily: Vec<Sample>,
    pub atmosphere: Vec<AtmosphereRecord>,
    pub daily_error: Option<String>,
}

impl MockDataPort {
    pub fn new(daily: Vec<Sample>, atmosphere: Vec<AtmosphereRecord>) -> Self {
        Self {
            daily,
            atmosphere,
            daily_error: None,
        }
    }

    pub fn with_daily_error(mut self, reason: &str) -> Self {
        self.daily_error = Some(reason.to_string());
        self
    }
}

impl ClimateDataPort for MockDataPort {
    fn fetch_daily_temperatures(&self) -> Result<Vec<Sample>, ClimtrendError> {
        if let Some(reason) = &self.daily_error {
            return Err(ClimtrendError::DataParse {
                file: "mock".into(),
                line: 0,
                reason: reason.clone(),
            });
        }
        Ok(self.daily.clone())
    }

    fn fetch_atmosphere(&self) -> Result<Vec<AtmosphereRecord>, ClimtrendError> {
        Ok(self.atmosphere.clone())
    }
}

/// Records every write instead of touching the filesystem.
#[derive(Default)]
pub struct RecordingReportPort {
    pub writes: RefCell<Vec<(PathBuf, usize)>>,
}

impl ReportPort for RecordingReportPort {
    fn write(&self, analysis: &Analysis, output_path: &Path) -> Result<(), ClimtrendError> {
        self.writes
            .borrow_mut()
            .push((output_path.to_path_buf(), analysis.panels.len()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One sample per day from Jan 1 of `start_year` for `years` years. Values
/// swing ±5 around `base + warming * (year - start_year)` so each year
/// averages to that value.
pub fn generate_daily(start_year: i32, years: i32, base: f64, warming: f64) -> Vec<Sample> {
    let mut samples = Vec::new();
    for offset in 0..years {
        let year = start_year + offset;
        let mean = base + warming * offset as f64;
        let days: Vec<NaiveDate> = date(year, 1, 1)
            .iter_days()
            .take_while(|d| d.year() == year)
            .collect();
        let paired = days.len() - days.len() % 2;
        for (i, day) in days.into_iter().enumerate() {
            let swing = if i >= paired {
                0.0
            } else if i % 2 == 0 {
                5.0
            } else {
                -5.0
            };
            samples.push(Sample::new(day, mean + swing));
        }
    }
    samples
}

pub fn sample_atmosphere() -> Vec<AtmosphereRecord> {
    [
        (-8.0, 31.0, 16.5),
        (-2.5, 27.5, 19.0),
        (4.0, 22.0, 24.5),
        (11.5, 17.0, 30.0),
        (18.0, 14.5, 36.0),
        (24.5, 12.0, 43.5),
    ]
    .iter()
    .map(|&(temperature, nitrogen_dioxide, ozone)| AtmosphereRecord {
        temperature,
        nitrogen_dioxide,
        ozone,
    })
    .collect()
}

pub const DAILY_CSV: &str = "date,avg_temperature,min_temperature\n\
    2018-01-01,-4.0,-9.0\n\
    2018-07-01,22.0,16.0\n\
    2019-01-01,-6.0,-11.0\n\
    2019-07-01,,15.0\n\
    2019-08-01,24.0,17.0\n\
    2020-01-01,-2.0,-6.0\n\
    2020-04-01,8.0,2.0\n\
    2020-07-01,25.0,18.0\n";

pub const ATMOSPHERE_CSV: &str = "month,temperature,nitrogen_dioxide,ozone\n\
    Jan,-5.5,29.0,18.0\n\
    Mar,1.0,24.5,23.0\n\
    May,13.0,18.0,31.5\n\
    Jul,22.5,13.5,41.0\n\
    Sep,16.0,16.0,33.0\n";

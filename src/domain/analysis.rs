//! End-to-end analysis: aggregate, fit, chain, re-fit.
//!
//! Produces up to five panels:
//! - year vs yearly mean temperature
//! - temperature vs nitrogen dioxide
//! - temperature vs ozone
//! - year vs predicted nitrogen dioxide (year → temperature → NO2)
//! - year vs predicted ozone (year → temperature → O3)
//!
//! Empty inputs abort the analysis. A degenerate fit only drops its own panel
//! and every panel chained from it.

use std::fmt;

use tracing::{debug, info, warn};

use crate::domain::aggregate::{aggregate_yearly, YearlyAggregate};
use crate::domain::chain::chain_predict;
use crate::domain::error::ClimtrendError;
use crate::domain::regression::{fit, RegressionModel};
use crate::domain::sample::{AtmosphereRecord, Sample};
use crate::domain::series::CoordinateSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelKind {
    YearTemperature,
    TemperatureNitrogenDioxide,
    TemperatureOzone,
    YearNitrogenDioxide,
    YearOzone,
}

impl PanelKind {
    pub const ALL: [PanelKind; 5] = [
        PanelKind::YearTemperature,
        PanelKind::TemperatureNitrogenDioxide,
        PanelKind::TemperatureOzone,
        PanelKind::YearNitrogenDioxide,
        PanelKind::YearOzone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelKind::YearTemperature => "Year vs Temperature",
            PanelKind::TemperatureNitrogenDioxide => "Temperature vs Nitrogen Dioxide",
            PanelKind::TemperatureOzone => "Temperature vs Ozone",
            PanelKind::YearNitrogenDioxide => "Year vs Nitrogen Dioxide",
            PanelKind::YearOzone => "Year vs Ozone",
        }
    }

    pub fn line_label(self) -> &'static str {
        match self {
            PanelKind::YearTemperature => "Regression Line",
            PanelKind::TemperatureNitrogenDioxide | PanelKind::YearNitrogenDioxide => {
                "Nitrogen Dioxide Regression Line"
            }
            PanelKind::TemperatureOzone | PanelKind::YearOzone => "Ozone Regression Line",
        }
    }

    /// Stable identifier for element ids and export rows.
    pub fn slug(self) -> &'static str {
        match self {
            PanelKind::YearTemperature => "year-temperature",
            PanelKind::TemperatureNitrogenDioxide => "temperature-no2",
            PanelKind::TemperatureOzone => "temperature-o3",
            PanelKind::YearNitrogenDioxide => "year-no2",
            PanelKind::YearOzone => "year-o3",
        }
    }

    pub fn x_axis_title(self) -> &'static str {
        if self.is_yearly() {
            "Year"
        } else {
            "Temperature (Celsius)"
        }
    }

    pub fn y_axis_title(self) -> &'static str {
        match self {
            PanelKind::YearTemperature => "Average Temperature (Celsius)",
            PanelKind::TemperatureNitrogenDioxide => "Nitrogen Dioxide Concentration (ppb)",
            PanelKind::TemperatureOzone => "Ozone Concentration (ppb)",
            PanelKind::YearNitrogenDioxide => "Predicted Nitrogen Dioxide Concentration (ppb)",
            PanelKind::YearOzone => "Predicted Ozone Concentration (ppb)",
        }
    }

    /// Whether the x-axis is the calendar year.
    pub fn is_yearly(self) -> bool {
        matches!(
            self,
            PanelKind::YearTemperature | PanelKind::YearNitrogenDioxide | PanelKind::YearOzone
        )
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed x-interval a regression line is drawn across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

pub const DEFAULT_YEAR_RANGE: AxisRange = AxisRange::new(1920.0, 2150.0);
pub const DEFAULT_TEMPERATURE_RANGE: AxisRange = AxisRange::new(-50.0, 50.0);

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub city: String,
    pub year_range: AxisRange,
    pub temperature_range: AxisRange,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            city: "Toronto".to_string(),
            year_range: DEFAULT_YEAR_RANGE,
            temperature_range: DEFAULT_TEMPERATURE_RANGE,
        }
    }
}

impl AnalysisSettings {
    pub fn line_range(&self, kind: PanelKind) -> AxisRange {
        if kind.is_yearly() {
            self.year_range
        } else {
            self.temperature_range
        }
    }
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub kind: PanelKind,
    pub series: CoordinateSeries,
    pub model: RegressionModel,
    pub line_range: AxisRange,
}

impl Panel {
    /// The two end points of the regression line across `line_range`.
    pub fn line_endpoints(&self) -> [(f64, f64); 2] {
        let AxisRange { min, max } = self.line_range;
        [
            (min, self.model.evaluate(min)),
            (max, self.model.evaluate(max)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPanel {
    pub kind: PanelKind,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub city: String,
    pub yearly: Vec<YearlyAggregate>,
    pub panels: Vec<Panel>,
    pub skipped: Vec<SkippedPanel>,
}

impl Analysis {
    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }
}

struct PanelBuilder<'a> {
    settings: &'a AnalysisSettings,
    panels: Vec<Panel>,
    skipped: Vec<SkippedPanel>,
}

impl<'a> PanelBuilder<'a> {
    fn new(settings: &'a AnalysisSettings) -> Self {
        Self {
            settings,
            panels: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Fits `series` and records the panel. A degenerate fit is recorded as
    /// skipped and yields `None`; every other error aborts.
    fn fit(
        &mut self,
        kind: PanelKind,
        series: CoordinateSeries,
    ) -> Result<Option<RegressionModel>, ClimtrendError> {
        match fit(&series) {
            Ok(model) => {
                debug!(
                    panel = %kind,
                    slope = model.slope,
                    intercept = model.intercept,
                    correlation = model.correlation,
                    r_squared = model.r_squared,
                    "fitted panel"
                );
                self.panels.push(Panel {
                    kind,
                    series,
                    model,
                    line_range: self.settings.line_range(kind),
                });
                Ok(Some(model))
            }
            Err(ClimtrendError::DegenerateInput { reason }) => {
                warn!(panel = %kind, %reason, "skipping panel");
                self.skip(kind, reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn skip(&mut self, kind: PanelKind, reason: String) {
        self.skipped.push(SkippedPanel { kind, reason });
    }

    fn chain(
        &mut self,
        kind: PanelKind,
        years: &[f64],
        year_to_temperature: Option<&RegressionModel>,
        temperature_to_pollutant: Option<&RegressionModel>,
    ) -> Result<(), ClimtrendError> {
        match (year_to_temperature, temperature_to_pollutant) {
            (Some(first), Some(second)) => {
                let predicted = chain_predict(years, first, second);
                let series = CoordinateSeries::new(years.to_vec(), predicted)?;
                self.fit(kind, series)?;
            }
            (None, _) => self.skip(kind, "year vs temperature model unavailable".to_string()),
            (_, None) => self.skip(kind, "temperature vs pollutant model unavailable".to_string()),
        }
        Ok(())
    }
}

pub fn run_analysis(
    daily: &[Sample],
    atmosphere: &[AtmosphereRecord],
    settings: &AnalysisSettings,
) -> Result<Analysis, ClimtrendError> {
    let yearly = aggregate_yearly(daily)?;
    info!(
        days = daily.len(),
        years = yearly.len(),
        "aggregated daily temperatures"
    );

    if atmosphere.is_empty() {
        return Err(ClimtrendError::empty("atmosphere records"));
    }

    let years: Vec<f64> = yearly.iter().map(|y| f64::from(y.year)).collect();
    let year_temperature =
        CoordinateSeries::new(years.clone(), yearly.iter().map(|y| y.mean_value).collect())?;

    let temperatures: Vec<f64> = atmosphere.iter().map(|a| a.temperature).collect();
    let temperature_no2 = CoordinateSeries::new(
        temperatures.clone(),
        atmosphere.iter().map(|a| a.nitrogen_dioxide).collect(),
    )?;
    let temperature_o3 = CoordinateSeries::new(
        temperatures,
        atmosphere.iter().map(|a| a.ozone).collect(),
    )?;

    let mut builder = PanelBuilder::new(settings);
    let year_to_temperature = builder.fit(PanelKind::YearTemperature, year_temperature)?;
    let temperature_to_no2 =
        builder.fit(PanelKind::TemperatureNitrogenDioxide, temperature_no2)?;
    let temperature_to_o3 = builder.fit(PanelKind::TemperatureOzone, temperature_o3)?;

    builder.chain(
        PanelKind::YearNitrogenDioxide,
        &years,
        year_to_temperature.as_ref(),
        temperature_to_no2.as_ref(),
    )?;
    builder.chain(
        PanelKind::YearOzone,
        &years,
        year_to_temperature.as_ref(),
        temperature_to_o3.as_ref(),
    )?;

    let PanelBuilder {
        panels, skipped, ..
    } = builder;
    if panels.is_empty() {
        return Err(ClimtrendError::NoPanels);
    }
    info!(
        panels = panels.len(),
        skipped = skipped.len(),
        "analysis complete"
    );

    Ok(Analysis {
        city: settings.city.clone(),
        yearly,
        panels,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn daily(points: &[(i32, f64)]) -> Vec<Sample> {
        points
            .iter()
            .map(|&(year, value)| Sample::new(NaiveDate::from_ymd_opt(year, 7, 1).unwrap(), value))
            .collect()
    }

    fn atmosphere(rows: &[(f64, f64, f64)]) -> Vec<AtmosphereRecord> {
        rows.iter()
            .map(|&(temperature, nitrogen_dioxide, ozone)| AtmosphereRecord {
                temperature,
                nitrogen_dioxide,
                ozone,
            })
            .collect()
    }

    fn warming_daily() -> Vec<Sample> {
        daily(&[(2000, 7.0), (2001, 7.5), (2002, 7.4), (2003, 8.1)])
    }

    fn sample_atmosphere() -> Vec<AtmosphereRecord> {
        atmosphere(&[
            (-5.0, 30.0, 18.0),
            (0.0, 25.0, 22.0),
            (10.0, 18.0, 29.0),
            (20.0, 12.0, 41.0),
        ])
    }

    #[test]
    fn produces_all_five_panels_in_order() {
        let analysis =
            run_analysis(&warming_daily(), &sample_atmosphere(), &AnalysisSettings::default())
                .unwrap();

        let kinds: Vec<_> = analysis.panels.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, PanelKind::ALL.to_vec());
        assert!(analysis.skipped.is_empty());
        assert_eq!(analysis.yearly.len(), 4);
        assert_eq!(analysis.city, "Toronto");
    }

    #[test]
    fn chained_panel_refits_predicted_values() {
        let analysis =
            run_analysis(&warming_daily(), &sample_atmosphere(), &AnalysisSettings::default())
                .unwrap();

        let year_temp = analysis.panel(PanelKind::YearTemperature).unwrap().model;
        let temp_o3 = analysis.panel(PanelKind::TemperatureOzone).unwrap().model;
        let year_o3 = analysis.panel(PanelKind::YearOzone).unwrap();

        for (x, y) in year_o3.series.points() {
            assert_relative_eq!(y, temp_o3.evaluate(year_temp.evaluate(x)), epsilon = 1e-9);
        }
        assert_relative_eq!(
            year_o3.model.slope,
            year_temp.slope * temp_o3.slope,
            epsilon = 1e-9
        );
        assert_relative_eq!(year_o3.model.correlation, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn line_ranges_follow_axis() {
        let settings = AnalysisSettings {
            city: "Ottawa".into(),
            year_range: AxisRange::new(1990.0, 2100.0),
            temperature_range: AxisRange::new(-30.0, 40.0),
        };
        let analysis = run_analysis(&warming_daily(), &sample_atmosphere(), &settings).unwrap();

        let year_panel = analysis.panel(PanelKind::YearNitrogenDioxide).unwrap();
        assert_eq!(year_panel.line_range, AxisRange::new(1990.0, 2100.0));
        let temp_panel = analysis.panel(PanelKind::TemperatureOzone).unwrap();
        assert_eq!(temp_panel.line_range, AxisRange::new(-30.0, 40.0));

        let [(x0, y0), (x1, y1)] = temp_panel.line_endpoints();
        assert_eq!((x0, x1), (-30.0, 40.0));
        assert_eq!(y0, temp_panel.model.evaluate(-30.0));
        assert_eq!(y1, temp_panel.model.evaluate(40.0));
    }

    #[test]
    fn degenerate_temperature_trend_skips_dependent_panels() {
        let flat = daily(&[(2000, 7.0), (2001, 7.0), (2002, 7.0)]);
        let analysis =
            run_analysis(&flat, &sample_atmosphere(), &AnalysisSettings::default()).unwrap();

        let kinds: Vec<_> = analysis.panels.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![PanelKind::TemperatureNitrogenDioxide, PanelKind::TemperatureOzone]
        );
        let skipped: Vec<_> = analysis.skipped.iter().map(|s| s.kind).collect();
        assert_eq!(
            skipped,
            vec![
                PanelKind::YearTemperature,
                PanelKind::YearNitrogenDioxide,
                PanelKind::YearOzone
            ]
        );
    }

    #[test]
    fn degenerate_pollutant_skips_only_its_chain() {
        let constant_ozone = atmosphere(&[(-5.0, 30.0, 20.0), (5.0, 22.0, 20.0), (15.0, 15.0, 20.0)]);
        let analysis =
            run_analysis(&warming_daily(), &constant_ozone, &AnalysisSettings::default())
                .unwrap();

        assert!(analysis.panel(PanelKind::TemperatureOzone).is_none());
        assert!(analysis.panel(PanelKind::YearOzone).is_none());
        assert!(analysis.panel(PanelKind::YearNitrogenDioxide).is_some());
        assert_eq!(analysis.skipped.len(), 2);
    }

    #[test]
    fn single_year_yields_no_panels_when_atmosphere_is_flat() {
        let one_year = daily(&[(2000, 7.0)]);
        let flat = atmosphere(&[(1.0, 5.0, 5.0), (1.0, 5.0, 5.0)]);
        let err = run_analysis(&one_year, &flat, &AnalysisSettings::default()).unwrap_err();
        assert!(matches!(err, ClimtrendError::NoPanels));
    }

    #[test]
    fn empty_daily_aborts() {
        let err = run_analysis(&[], &sample_atmosphere(), &AnalysisSettings::default())
            .unwrap_err();
        assert!(matches!(err, ClimtrendError::EmptyInput { .. }));
    }

    #[test]
    fn empty_atmosphere_aborts() {
        let err =
            run_analysis(&warming_daily(), &[], &AnalysisSettings::default()).unwrap_err();
        assert!(matches!(err, ClimtrendError::EmptyInput { what } if what == "atmosphere records"));
    }

    #[test]
    fn panel_metadata() {
        assert_eq!(PanelKind::YearOzone.to_string(), "Year vs Ozone");
        assert_eq!(PanelKind::TemperatureOzone.x_axis_title(), "Temperature (Celsius)");
        assert_eq!(PanelKind::YearNitrogenDioxide.x_axis_title(), "Year");
        assert_eq!(
            PanelKind::TemperatureNitrogenDioxide.line_label(),
            "Nitrogen Dioxide Regression Line"
        );
    }
}

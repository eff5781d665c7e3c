//! Selectable report views.
//!
//! A view is a set of panels shown together under one figure title. The five
//! single-panel views are joined by two combined views overlaying both
//! pollutants.

use crate::domain::analysis::{Analysis, PanelKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    YearTemperature,
    TemperatureNitrogenDioxide,
    TemperatureOzone,
    TemperatureConcentrations,
    YearNitrogenDioxide,
    YearOzone,
    YearConcentrations,
}

impl ViewKind {
    pub const ALL: [ViewKind; 7] = [
        ViewKind::YearTemperature,
        ViewKind::TemperatureNitrogenDioxide,
        ViewKind::TemperatureOzone,
        ViewKind::TemperatureConcentrations,
        ViewKind::YearNitrogenDioxide,
        ViewKind::YearOzone,
        ViewKind::YearConcentrations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::TemperatureConcentrations => "Temperature vs Concentrations",
            ViewKind::YearConcentrations => "Year vs Concentrations",
            other => other.panels()[0].label(),
        }
    }

    pub fn panels(self) -> &'static [PanelKind] {
        match self {
            ViewKind::YearTemperature => &[PanelKind::YearTemperature],
            ViewKind::TemperatureNitrogenDioxide => &[PanelKind::TemperatureNitrogenDioxide],
            ViewKind::TemperatureOzone => &[PanelKind::TemperatureOzone],
            ViewKind::TemperatureConcentrations => &[
                PanelKind::TemperatureNitrogenDioxide,
                PanelKind::TemperatureOzone,
            ],
            ViewKind::YearNitrogenDioxide => &[PanelKind::YearNitrogenDioxide],
            ViewKind::YearOzone => &[PanelKind::YearOzone],
            ViewKind::YearConcentrations => {
                &[PanelKind::YearNitrogenDioxide, PanelKind::YearOzone]
            }
        }
    }

    pub fn title(self, city: &str) -> String {
        let subject = match self {
            ViewKind::YearTemperature => "Year vs Average Temperature",
            ViewKind::TemperatureNitrogenDioxide => {
                "Average Temperature vs Nitrogen Dioxide Concentration"
            }
            ViewKind::TemperatureOzone => "Average Temperature vs Ozone Concentration",
            ViewKind::TemperatureConcentrations => "Average Temperature vs Concentrations",
            ViewKind::YearNitrogenDioxide => "Year vs Predicted Nitrogen Dioxide Concentration",
            ViewKind::YearOzone => "Year vs Predicted Ozone Concentration",
            ViewKind::YearConcentrations => "Year vs Predicted Concentrations",
        };
        format!("{subject} in {city}")
    }

    pub fn x_axis_title(self) -> &'static str {
        self.panels()[0].x_axis_title()
    }

    pub fn y_axis_title(self) -> &'static str {
        match self {
            ViewKind::TemperatureConcentrations => "Concentration (ppb)",
            ViewKind::YearConcentrations => "Predicted Concentration (ppb)",
            other => other.panels()[0].y_axis_title(),
        }
    }
}

/// A view whose panels are at least partly present in an analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub kind: ViewKind,
    pub title: String,
    pub panels: Vec<PanelKind>,
}

/// Views with at least one computed panel, in menu order. Panels that were
/// skipped are left out of the view rather than hiding it.
pub fn available_views(analysis: &Analysis) -> Vec<View> {
    ViewKind::ALL
        .iter()
        .filter_map(|&kind| {
            let panels: Vec<PanelKind> = kind
                .panels()
                .iter()
                .copied()
                .filter(|&p| analysis.panel(p).is_some())
                .collect();
            if panels.is_empty() {
                None
            } else {
                Some(View {
                    kind,
                    title: kind.title(&analysis.city),
                    panels,
                })
            }
        })
        .collect()
}

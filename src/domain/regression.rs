//! Simple linear regression (ordinary least squares, one predictor).
//!
//! For n paired observations with means x̄ and ȳ:
//!
//! ```text
//! Sxy = Σ(xi - x̄)(yi - ȳ)    Sxx = Σ(xi - x̄)²    Syy = Σ(yi - ȳ)²
//! slope       = Sxy / Sxx
//! intercept   = ȳ - slope·x̄
//! correlation = Sxy / sqrt(Sxx·Syy)
//! R²          = 1 - Σ(yi - (slope·xi + intercept))² / Syy
//! ```
//!
//! R² is taken from the residuals rather than as `correlation²`; the two
//! agree algebraically but not bit-for-bit.

use crate::domain::error::ClimtrendError;
use crate::domain::series::CoordinateSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
    pub r_squared: f64,
}

impl RegressionModel {
    /// slope·x + intercept
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// The model as named fields, in display order.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("slope", self.slope),
            ("intercept", self.intercept),
            ("correlation", self.correlation),
            ("R^2", self.r_squared),
        ]
    }
}

struct Deviations {
    sxy: f64,
    sxx: f64,
    syy: f64,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn deviations(xs: &[f64], ys: &[f64], x_mean: f64, y_mean: f64) -> Deviations {
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;

    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    Deviations { sxy, sxx, syy }
}

pub fn fit(series: &CoordinateSeries) -> Result<RegressionModel, ClimtrendError> {
    let xs = series.xs();
    let ys = series.ys();
    if xs.is_empty() {
        return Err(ClimtrendError::empty("coordinate series"));
    }

    let x_mean = mean(xs);
    let y_mean = mean(ys);
    let Deviations { sxy, sxx, syy } = deviations(xs, ys, x_mean, y_mean);

    if sxx == 0.0 {
        return Err(ClimtrendError::degenerate(
            "x-coordinates have no variance, slope is undefined",
        ));
    }
    if syy == 0.0 {
        return Err(ClimtrendError::degenerate(
            "y-coordinates have no variance, correlation is undefined",
        ));
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let correlation = sxy / (sxx * syy).sqrt();

    let residual_sum_of_squares: f64 = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let residual = y - (slope * x + intercept);
            residual * residual
        })
        .sum();
    let r_squared = 1.0 - residual_sum_of_squares / syy;

    Ok(RegressionModel {
        slope,
        intercept,
        correlation,
        r_squared,
    })
}

//! Paired coordinate sequences.

use crate::domain::error::ClimtrendError;

/// Paired observations `(xs[i], ys[i])`.
///
/// The constructor guarantees `xs.len() == ys.len() > 0`, so everything
/// downstream may index both sides freely.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSeries {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CoordinateSeries {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, ClimtrendError> {
        if xs.len() != ys.len() {
            return Err(ClimtrendError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(ClimtrendError::empty("coordinate series"));
        }
        Ok(Self { xs, ys })
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, ClimtrendError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (xs, ys) = pairs.into_iter().unzip();
        Self::new(xs, ys)
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed series; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// `(min, max)` of the x-coordinates, ignoring NaN.
    pub fn x_bounds(&self) -> (f64, f64) {
        bounds(&self.xs)
    }

    /// `(min, max)` of the y-coordinates, ignoring NaN.
    pub fn y_bounds(&self) -> (f64, f64) {
        bounds(&self.ys)
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_length_mismatch() {
        let err = CoordinateSeries::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, ClimtrendError::LengthMismatch { xs: 2, ys: 1 }));
    }

    #[test]
    fn rejects_empty() {
        let err = CoordinateSeries::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, ClimtrendError::EmptyInput { .. }));
    }

    #[test]
    fn from_pairs_unzips_in_order() {
        let series = CoordinateSeries::from_pairs(vec![(1.0, 10.0), (2.0, 20.0)]).unwrap();
        assert_eq!(series.xs(), &[1.0, 2.0]);
        assert_eq!(series.ys(), &[10.0, 20.0]);
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
    }

    #[test]
    fn bounds_skip_nan() {
        let series =
            CoordinateSeries::new(vec![3.0, f64::NAN, -1.0], vec![0.5, 2.0, 1.0]).unwrap();
        assert_eq!(series.x_bounds(), (-1.0, 3.0));
        assert_eq!(series.y_bounds(), (0.5, 2.0));
    }
}

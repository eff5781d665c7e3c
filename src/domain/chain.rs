//! Second-order prediction by composing two fitted lines.
//!
//! `chain_predict(xs, a, b)[i] = b.evaluate(a.evaluate(xs[i]))`. Used to go
//! from year to pollutant concentration through predicted temperature.

use crate::domain::regression::RegressionModel;

pub fn chain_predict<T>(
    independent: &[T],
    first: &RegressionModel,
    second: &RegressionModel,
) -> Vec<f64>
where
    T: Copy + Into<f64>,
{
    independent
        .iter()
        .map(|&x| second.evaluate(first.evaluate(x.into())))
        .collect()
}

//! Daily-to-yearly aggregation.
//!
//! Samples must arrive sorted by date so that each year forms one contiguous
//! run. Every run becomes one [`YearlyAggregate`] holding the arithmetic mean
//! of its values.

use crate::domain::error::ClimtrendError;
use crate::domain::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyAggregate {
    pub year: i32,
    pub mean_value: f64,
    pub sample_count: usize,
}

struct YearGroup {
    year: i32,
    sum: f64,
    count: usize,
}

impl YearGroup {
    fn start(sample: &Sample) -> Self {
        Self {
            year: sample.year(),
            sum: sample.value,
            count: 1,
        }
    }

    fn finish(self) -> YearlyAggregate {
        YearlyAggregate {
            year: self.year,
            mean_value: self.sum / self.count as f64,
            sample_count: self.count,
        }
    }
}

pub fn aggregate_yearly(samples: &[Sample]) -> Result<Vec<YearlyAggregate>, ClimtrendError> {
    let (first, rest) = samples
        .split_first()
        .ok_or_else(|| ClimtrendError::empty("daily samples"))?;

    let mut yearly = Vec::new();
    let mut group = YearGroup::start(first);

    for sample in rest {
        if sample.year() == group.year {
            group.sum += sample.value;
            group.count += 1;
        } else {
            let finished = std::mem::replace(&mut group, YearGroup::start(sample));
            yearly.push(finished.finish());
        }
    }

    // The last year never sees a boundary inside the loop.
    yearly.push(group.finish());

    Ok(yearly)
}

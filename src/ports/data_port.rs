//! Climate data access port trait.

use crate::domain::error::ClimtrendError;
use crate::domain::sample::{AtmosphereRecord, Sample};

pub trait ClimateDataPort {
    /// Daily average temperatures, sorted by date ascending.
    fn fetch_daily_temperatures(&self) -> Result<Vec<Sample>, ClimtrendError>;

    /// Atmosphere records in source order.
    fn fetch_atmosphere(&self) -> Result<Vec<AtmosphereRecord>, ClimtrendError>;
}

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// One land-surface temperature reading: deviation in °C from the dataset
/// baseline for a given year and month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReading {
    pub year: i32,
    pub month: u32,
    pub variance: f32,
}

impl MonthlyReading {
    pub fn is_well_formed(&self) -> bool {
        (1..=12).contains(&self.month) && self.variance.is_finite()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureSeries {
    pub base_temperature: f32,
    pub monthly_variance: Vec<MonthlyReading>,
}

impl TemperatureSeries {
    /// Parse the wire format, dropping readings that would propagate NaN
    /// positions or land outside the 12 month rows.
    pub fn from_json(input: &str) -> Result<Self> {
        let mut series: TemperatureSeries = serde_json::from_str(input)?;
        series.drop_malformed();
        if series.monthly_variance.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Ok(series)
    }

    fn drop_malformed(&mut self) {
        let before = self.monthly_variance.len();
        self.monthly_variance.retain(MonthlyReading::is_well_formed);
        let dropped = before - self.monthly_variance.len();
        if dropped > 0 {
            tracing::warn!(dropped, "ignoring malformed monthly readings");
        }
    }

    pub fn year_range(&self) -> Result<(i32, i32)> {
        let years = self.monthly_variance.iter().map(|reading| reading.year);
        match (years.clone().min(), years.max()) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(Error::EmptyDataset),
        }
    }

    /// Absolute temperature of one reading.
    pub fn temperature(&self, reading: &MonthlyReading) -> f32 {
        reading.variance + self.base_temperature
    }

    /// Absolute temperatures for every reading, in input order.
    pub fn temperatures(&self) -> Vec<f32> {
        self.monthly_variance
            .iter()
            .map(|reading| self.temperature(reading))
            .collect()
    }

    /// `[min, max]` of the absolute temperatures; the color scale domain.
    pub fn temperature_domain(&self) -> Result<(f32, f32)> {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for reading in &self.monthly_variance {
            let temperature = self.temperature(reading);
            lo = lo.min(temperature);
            hi = hi.max(temperature);
        }
        if self.monthly_variance.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Ok((lo, hi))
    }
}

use chrono::NaiveDate;

use crate::error::{Error, Result};

pub fn jan1(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Continuous linear map from calendar dates to horizontal pixels. Only
/// January 1st of each year is queried by the grid, but any in-range date
/// interpolates.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    domain_start: NaiveDate,
    domain_days: f32,
    range_start: f32,
    range_span: f32,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f32, f32)) -> Self {
        Self {
            domain_start: domain.0,
            domain_days: (domain.1 - domain.0).num_days() as f32,
            range_start: range.0,
            range_span: range.1 - range.0,
        }
    }

    pub fn position(&self, date: NaiveDate) -> f32 {
        if self.domain_days == 0.0 {
            return self.range_start;
        }
        let elapsed = (date - self.domain_start).num_days() as f32;
        self.range_start + elapsed / self.domain_days * self.range_span
    }

    pub fn year_position(&self, year: i32) -> f32 {
        self.position(jan1(year))
    }
}

/// Equal-count color bucketing: the sorted samples are split into
/// `palette.len()` groups and a query returns the color of the group it
/// falls into.
#[derive(Debug, Clone)]
pub struct QuantileScale {
    thresholds: Vec<f32>,
    palette: Vec<String>,
}

impl QuantileScale {
    pub fn from_samples(samples: &[f32], palette: &[String]) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::InvalidConfig("color palette is empty".to_string()));
        }
        let mut sorted: Vec<f32> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Err(Error::EmptyDataset);
        }
        sorted.sort_by(f32::total_cmp);

        let buckets = palette.len();
        let thresholds = (1..buckets)
            .map(|i| quantile_sorted(&sorted, i as f32 / buckets as f32))
            .collect();
        Ok(Self {
            thresholds,
            palette: palette.to_vec(),
        })
    }

    pub fn color(&self, value: f32) -> &str {
        // Values equal to a boundary land in the upper bucket.
        let idx = self.thresholds.partition_point(|t| *t <= value);
        &self.palette[idx.min(self.palette.len() - 1)]
    }

    /// The `palette.len() - 1` boundary values between buckets, ascending.
    pub fn quantiles(&self) -> &[f32] {
        &self.thresholds
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }
}

/// Linear interpolation between adjacent order statistics (the R-7 rule).
fn quantile_sorted(sorted: &[f32], p: f32) -> f32 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let h = (sorted.len() - 1) as f32 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f32)
}

/// Tick years for the bottom axis: multiples of a 1-2-5 nice step chosen so
/// roughly `target` ticks cover the inclusive year range.
pub fn year_ticks(min_year: i32, max_year: i32, target: usize) -> Vec<i32> {
    if max_year < min_year || target == 0 {
        return Vec::new();
    }
    let span = (max_year - min_year).max(1) as f32;
    let step = nice_step(span, target as f32).max(1.0) as i32;
    let mut first = min_year.div_euclid(step) * step;
    if first < min_year {
        first += step;
    }
    (first..=max_year).step_by(step as usize).collect()
}

fn nice_step(span: f32, count: f32) -> f32 {
    let raw = span / count;
    let base = 10f32.powf(raw.log10().floor());
    let err = raw / base;
    let factor = if err >= 50f32.sqrt() {
        10.0
    } else if err >= 10f32.sqrt() {
        5.0
    } else if err >= 2f32.sqrt() {
        2.0
    } else {
        1.0
    };
    base * factor
}

use std::time::Duration;

use crate::dataset::TemperatureSeries;
use crate::error::Result;

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/FreeCodeCamp/ProjectReferenceData/master/global-temperature.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One-shot blocking fetch of the dataset. No retries; a failed or slow
/// request surfaces as an error instead of a never-rendered chart.
pub fn fetch_series(url: &str) -> Result<TemperatureSeries> {
    tracing::info!(url, "fetching temperature dataset");
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    tracing::debug!(bytes = body.len(), "dataset downloaded");
    TemperatureSeries::from_json(&body)
}

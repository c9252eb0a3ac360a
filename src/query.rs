use chrono::{DateTime, Utc};
use crate::providers::ProviderState;
use crate::stamp::Stamp;

/// One valid time's worth of index entries: the reference run(s) that
/// produced it (at most two survive the grace window) and the forecast
/// hour relative to that valid time's most recent run.
pub struct ForecastEntry {
    pub valid_time_key: String,
    pub reference_run_0: String,
    pub reference_run_1: Option<String>,
    pub forecast_hour: i64,
}

fn reference_run_stem(filename: &str) -> String {
    filename.split('.').next().unwrap_or(filename).to_string()
}

pub async fn list_forecasts(state: &ProviderState) -> Vec<ForecastEntry> {
    let status = state.status.read().await;

    status.forecasts.iter()
        .filter_map(|(key, files)| {
            let last = files.last()?;
            let (_, offset) = Stamp::parse_filename(last).ok()?;

            Some(ForecastEntry {
                valid_time_key: key.clone(),
                reference_run_0: reference_run_stem(&files[0]),
                reference_run_1: (files.len() >= 2).then(|| reference_run_stem(last)),
                forecast_hour: offset,
            })
        })
        .collect()
}

pub async fn get_forecast(state: &ProviderState, valid_time_key: &str) -> Option<String> {
    state.status.read().await.forecasts.get(valid_time_key)?.last().cloned()
}

pub async fn get_forecast_at(state: &ProviderState, valid_time_key: &str, reference_run: &str) -> Option<String> {
    state.status.read().await.forecasts.get(valid_time_key)?
        .iter()
        .find(|file| reference_run_stem(file) == reference_run)
        .cloned()
}

pub fn key_to_valid_time(key: &str) -> Option<DateTime<Utc>> {
    chrono::NaiveDateTime::parse_from_str(&format!("{key}0000"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::providers::Provider;
use crate::query::key_to_valid_time;
use crate::stamp::Stamp as RunStamp;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProviderSummary {
    pub(crate) id: String,
    pub(crate) name: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StampEntry {
    ref_time: DateTime<Utc>,
    forecast_time: i64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ForecastGroup {
    forecast: DateTime<Utc>,
    stamps: Vec<StampEntry>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Winds {
    provider: String,
    last_ref_time: Option<DateTime<Utc>>,
    last_forecast_time: Option<i64>,
    next_update_time: DateTime<Utc>,
    next_ref_time: DateTime<Utc>,
    progress: u8,
    last_forecast: Option<DateTime<Utc>>,
    forecasts: Vec<ForecastGroup>,
}

pub(crate) async fn build(provider: &dyn Provider) -> Winds {
    let state = provider.state();
    let status = state.status.read().await;

    let mut forecasts: Vec<ForecastGroup> = status.forecasts.iter()
        .filter_map(|(key, files)| {
            let forecast = key_to_valid_time(key)?;
            let stamps = files.iter()
                .filter_map(|file| RunStamp::parse_filename(file).ok())
                .map(|(stamp, offset)| StampEntry { ref_time: stamp.ref_time, forecast_time: offset })
                .collect();
            Some(ForecastGroup { forecast, stamps })
        })
        .collect();
    forecasts.sort_by_key(|f| f.forecast);

    Winds {
        provider: state.id.clone(),
        last_ref_time: status.last_ref_time,
        last_forecast_time: status.last_forecast_hour,
        next_update_time: state.next_update_time,
        next_ref_time: state.next_ref_time,
        progress: status.progress,
        last_forecast: status.forecasts.keys().next_back().and_then(|key| key_to_valid_time(key)),
        forecasts,
    }
}

use serde::Serialize;
use crate::providers::ProviderState;
use crate::stamp::Stamp;

#[derive(Serialize, Debug)]
pub(crate) struct Forecast {
    hour: i64,
    stamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stamp2: Option<String>,
    forecast: String,
}

/// The pre-v2 shape: one entry per valid time, naming the reference run(s)
/// that cover it. Kept byte-for-byte compatible since old clients depend on
/// the exact field names.
pub(crate) async fn build(state: &ProviderState) -> Vec<Forecast> {
    let status = state.status.read().await;

    let mut forecasts: Vec<Forecast> = status.forecasts.iter()
        .filter_map(|(key, files)| {
            let first = files.first()?;
            let (stamp, offset) = Stamp::parse_filename(first).ok()?;

            Some(Forecast {
                hour: stamp.from_now(offset),
                stamp: stamp.ref_time.format("%Y%m%d%H").to_string(),
                stamp2: files.get(1)
                    .and_then(|f| Stamp::parse_filename(f).ok())
                    .map(|(stamp2, _)| stamp2.ref_time.format("%Y%m%d%H").to_string()),
                forecast: key.clone(),
            })
        })
        .collect();

    forecasts.sort_by(|a, b| a.forecast.cmp(&b.forecast));
    forecasts
}

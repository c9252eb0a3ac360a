use serde::{Serialize, Deserialize};

#[derive(Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderConfig {
    Noaa(NoaaProviderConfig),
    Meteofrance(MeteofranceProviderConfig),
}

#[derive(Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoaaProviderConfig {
    pub enabled: bool,
    pub grib_dir: String,
    pub json_dir: String,
    pub webhook: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteofranceProviderConfig {
    pub enabled: bool,
    pub grib_dir: String,
    pub json_dir: String,
    pub webhook: Option<String>,
}

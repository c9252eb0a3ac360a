use std::path::PathBuf;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::sync::Mutex;
use crate::config::MeteofranceProviderConfig;
use crate::error::{Error, Result};
use crate::providers::{Provider, ProviderState};
use crate::stamp::Stamp;
use crate::transcode;

const DEFAULT_MAX_FORECAST: i64 = 104;
const STARTUP_DISCOVERY_ATTEMPTS: u32 = 4;

/// Meteo-France ARPEGE, fetched as separate U/V wind components through the
/// WCS API and merged locally. The forecast horizon isn't fixed like NOAA's —
/// it's discovered per reference run via `DescribeCoverage` and cached until
/// the next run is tried.
pub struct MeteoFrance {
    state: ProviderState,
    http: reqwest::Client,
    token: String,
    last_described: Mutex<Option<DateTime<Utc>>>,
}

impl MeteoFrance {
    pub async fn from_config(config: &MeteofranceProviderConfig) -> Result<Self> {
        let token = std::env::var("METEOFRANCE_TOKEN")
            .map_err(|_| Error::Other(anyhow::anyhow!("METEOFRANCE_TOKEN environment variable not set")))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("build reqwest client");

        let mut ref_time = Stamp::now().ref_time;
        let mut max_forecast = DEFAULT_MAX_FORECAST;

        for attempt in 0..STARTUP_DISCOVERY_ATTEMPTS {
            match describe_coverage(&http, &token, ref_time).await {
                Ok(Some(hours)) => {
                    max_forecast = hours;
                    info!("meteo-france - horizon for {}Z is {}h", ref_time.format("%H"), hours);
                    break;
                }
                Ok(None) | Err(_) => {
                    debug!("meteo-france - no horizon for {}Z (attempt {})", ref_time.format("%H"), attempt);
                    ref_time -= Duration::hours(6);
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                }
            }
        }

        Ok(Self {
            state: ProviderState::new(
                "meteo-france",
                "Meteo-France",
                PathBuf::from(&config.grib_dir),
                PathBuf::from(&config.json_dir),
                3,
                max_forecast,
                config.webhook.clone(),
            )?,
            http,
            token,
            last_described: Mutex::new(None),
        })
    }

    async fn download_component(&self, stamp: Stamp, offset: i64, component: &str) -> Result<bool> {
        let uri = format!(
            "https://geoservices.meteofrance.fr/api/{}/MF-NWP-GLOBAL-ARPEGE-025-GLOBE-WCS",
            self.token
        );
        let coverage_id = format!(
            "{component}_COMPONENT_OF_WIND__SPECIFIC_HEIGHT_LEVEL_ABOVE_GROUND___{}.00.00Z",
            stamp.ref_time.format("%Y-%m-%dT%H")
        );
        let valid_time = stamp.ref_time + Duration::hours(offset);

        let response = self.http.get(&uri).query(&[
            ("service", "WCS"),
            ("version", "2.0.1"),
            ("request", "GetCoverage"),
            ("format", "application/wmo-grib"),
            ("coverageid", coverage_id.as_str()),
            ("subset", "height(10)"),
            ("subset", &format!("time({}:00:00Z)", valid_time.format("%Y-%m-%dT%H"))),
        ]).send().await?;

        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await?;
                let tmp_path = self.state.grib_dir.join(format!("{component}_{}.tmp", stamp.filename(offset)));
                tokio::fs::write(&tmp_path, &bytes).await?;
                Ok(true)
            }
            StatusCode::NOT_FOUND => Ok(false),
            other => {
                warn!("meteo-france - download {component} failed `{}`: {}", stamp.filename(offset), other);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl Provider for MeteoFrance {
    fn state(&self) -> &ProviderState {
        &self.state
    }

    async fn refresh_horizon(&self, stamp: Stamp) {
        let mut last_described = self.last_described.lock().await;
        if *last_described == Some(stamp.ref_time) {
            return;
        }

        match describe_coverage(&self.http, &self.token, stamp.ref_time).await {
            Ok(Some(hours)) => {
                self.state.max_forecast.store(hours, std::sync::atomic::Ordering::Relaxed);
                info!("meteo-france - horizon for {}Z is {}h", stamp.ref_time.format("%H"), hours);
            }
            Ok(None) => debug!("meteo-france - no horizon for {}Z yet", stamp.ref_time.format("%H")),
            Err(e) => warn!("meteo-france - describe coverage failed: {:?}", e),
        }
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;

        *last_described = Some(stamp.ref_time);
    }

    async fn fetch(&self, stamp: Stamp, offset: i64) -> Result<bool> {
        if !self.download_component(stamp, offset, "U").await? {
            return Ok(false);
        }
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;

        if !self.download_component(stamp, offset, "V").await? {
            let u_tmp = self.state.grib_dir.join(format!("U_{}.tmp", stamp.filename(offset)));
            tokio::fs::remove_file(&u_tmp).await.unwrap_or_default();
            return Ok(false);
        }
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;

        let u_tmp = self.state.grib_dir.join(format!("U_{}.tmp", stamp.filename(offset)));
        let v_tmp = self.state.grib_dir.join(format!("V_{}.tmp", stamp.filename(offset)));
        let out_tmp = self.state.grib_dir.join(format!("{}.tmp", stamp.filename(offset)));

        transcode::grib_copy_merge(&u_tmp, &v_tmp, &out_tmp).await?;

        tokio::fs::remove_file(&u_tmp).await.unwrap_or_default();
        tokio::fs::remove_file(&v_tmp).await.unwrap_or_default();
        tokio::fs::rename(&out_tmp, self.state.grib_dir.join(stamp.filename(offset))).await?;

        Ok(true)
    }
}

async fn describe_coverage(http: &reqwest::Client, token: &str, ref_time: DateTime<Utc>) -> Result<Option<i64>> {
    let uri = format!("https://geoservices.meteofrance.fr/api/{token}/MF-NWP-GLOBAL-ARPEGE-025-GLOBE-WCS");
    let coverage_id = format!(
        "U_COMPONENT_OF_WIND__SPECIFIC_HEIGHT_LEVEL_ABOVE_GROUND___{}.00.00Z",
        ref_time.format("%Y-%m-%dT%H")
    );

    let response = http.get(&uri).query(&[
        ("service", "WCS"),
        ("version", "2.0.1"),
        ("request", "DescribeCoverage"),
        ("coverageid", coverage_id.as_str()),
    ]).send().await?;

    if response.status() != StatusCode::OK {
        return Ok(None);
    }

    let body = response.text().await?;
    let parsed: CoverageDescriptions = quick_xml::de::from_str(&body)
        .map_err(|e| Error::Other(anyhow::anyhow!(e)))?;

    for axis in &parsed.coverage_description.domain_set.referenceable_grid_by_vectors.general_grid_axis {
        if axis.axis.grid_axes_spanned == "time" {
            let seconds: i64 = axis.axis.coefficients
                .split(' ')
                .next_back()
                .ok_or_else(|| Error::Other(anyhow::anyhow!("empty time coefficients")))?
                .parse()
                .map_err(|e: std::num::ParseIntError| Error::Other(anyhow::anyhow!(e)))?;
            return Ok(Some(seconds / 3600));
        }
    }

    Ok(Some(DEFAULT_MAX_FORECAST))
}

#[derive(Debug, Deserialize)]
struct CoverageDescriptions {
    #[serde(rename = "CoverageDescription")]
    coverage_description: CoverageDescription,
}

#[derive(Debug, Deserialize)]
struct CoverageDescription {
    #[serde(rename = "domainSet")]
    domain_set: DomainSet,
}

#[derive(Debug, Deserialize)]
struct DomainSet {
    #[serde(rename = "ReferenceableGridByVectors")]
    referenceable_grid_by_vectors: ReferenceableGridByVectors,
}

#[derive(Debug, Deserialize)]
struct ReferenceableGridByVectors {
    #[serde(rename = "generalGridAxis")]
    general_grid_axis: Vec<GeneralGridAxisWrapper>,
}

#[derive(Debug, Deserialize)]
struct GeneralGridAxisWrapper {
    #[serde(rename = "GeneralGridAxis")]
    axis: GeneralGridAxis,
}

#[derive(Debug, Deserialize)]
struct GeneralGridAxis {
    #[serde(rename = "gridAxesSpanned")]
    grid_axes_spanned: String,
    #[serde(rename = "coefficients")]
    coefficients: String,
}

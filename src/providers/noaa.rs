use std::io::Write;
use std::path::PathBuf;
use async_trait::async_trait;
use http::StatusCode;
use log::{debug, warn};
use tempfile::NamedTempFile;
use crate::config::NoaaProviderConfig;
use crate::error::{Error, Result};
use crate::providers::{Provider, ProviderState, WebhookMode};
use crate::stamp::Stamp;

/// NOAA GFS, mirrored at 3-hourly steps out to 384h over a regional window.
pub struct Noaa {
    state: ProviderState,
    http: reqwest::Client,
}

impl Noaa {
    pub fn from_config(config: &NoaaProviderConfig) -> Result<Self> {
        Ok(Self {
            state: ProviderState::new(
                "noaa",
                "NOAA",
                PathBuf::from(&config.grib_dir),
                PathBuf::from(&config.json_dir),
                3,
                384,
                config.webhook.clone(),
            )?,
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("build reqwest client"),
        })
    }
}

#[async_trait]
impl Provider for Noaa {
    fn state(&self) -> &ProviderState {
        &self.state
    }

    fn webhook_mode(&self) -> WebhookMode {
        WebhookMode::PerArtifact
    }

    async fn fetch(&self, stamp: Stamp, offset: i64) -> Result<bool> {
        let url = "http://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_1p00.pl";
        let date = stamp.ref_time.format("%Y%m%d").to_string();
        let hour = stamp.ref_time.format("%H").to_string();
        let file = format!("gfs.t{hour}z.pgrb2.1p00.f{offset:03}");

        let req = self.http.get(url).query(&[
            ("dir", format!("/gfs.{date}/{hour}").as_str()),
            ("file", file.as_str()),
            ("lev_10_m_above_ground", "on"),
            ("lev_surface", "off"),
            ("var_TMP", "off"),
            ("var_UGRD", "on"),
            ("var_VGRD", "on"),
            ("var_LAND", "off"),
            ("leftlon", "-50"),
            ("rightlon", "0"),
            ("toplat", "50"),
            ("bottomlat", "-30"),
        ]).build()?;

        debug!("noaa - try `{}`", req.url());

        let response = self.http.execute(req).await?;

        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await?;
                let mut tmp = NamedTempFile::new_in(&self.state.grib_dir)?;
                tmp.write_all(&bytes)?;
                tmp.persist(self.state.grib_dir.join(stamp.filename(offset)))
                    .map_err(|e| Error::Io(e.error))?;
                Ok(true)
            }
            StatusCode::NOT_FOUND => Ok(false),
            other => {
                warn!("noaa - download failed `{}`: {}", stamp.filename(offset), other);
                Ok(false)
            }
        }
    }
}

use std::path::Path;
use async_process::Command;
use async_trait::async_trait;
use crate::error::{Error, Result};

/// The ingestion engine's hook for turning a fetched GRIB into the JSON it
/// serves. `ExternalTranscoder` is the real implementation (shells out to
/// `grib2json`); tests substitute a stub so index-mutation behaviour can be
/// exercised without the external binary.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(&self, grib_path: &Path, json_path: &Path) -> Result<()>;
}

pub struct ExternalTranscoder;

#[async_trait]
impl Transcoder for ExternalTranscoder {
    async fn transcode(&self, grib_path: &Path, json_path: &Path) -> Result<()> {
        grib_to_json(grib_path, json_path).await
    }
}

/// Invokes the external `grib2json` tool, per the documented `--data --names
/// --fs 103 --fv 10 --compact` transcoder contract. A non-zero exit is
/// reported as a failure; the caller keeps the GRIB around so the next tick
/// can retry the transcode.
pub async fn grib_to_json(grib_path: &Path, json_path: &Path) -> Result<()> {
    let output = Command::new("grib2json/bin/grib2json")
        .arg("--data")
        .arg("--names")
        .arg("--fs")
        .arg("103")
        .arg("--fv")
        .arg("10")
        .arg("--compact")
        .arg("--output")
        .arg(json_path)
        .arg(grib_path)
        .output()
        .await?;

    require_success("grib2json", output)
}

/// Merges the U and V component GRIBs downloaded separately by the
/// Meteo-France adapter into a single file, via the external `grib_copy`
/// tool.
pub async fn grib_copy_merge(u_path: &Path, v_path: &Path, out_path: &Path) -> Result<()> {
    let output = Command::new("grib_copy")
        .arg(u_path)
        .arg(v_path)
        .arg(out_path)
        .output()
        .await?;

    require_success("grib_copy", output)
}

fn require_success(command: &str, output: std::process::Output) -> Result<()> {
    if output.status.success() {
        Ok(())
    } else {
        Err(Error::SubprocessFailed {
            command: command.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

use std::fmt::{Display, Formatter};
use chrono::{DateTime, DurationRound, Utc};

/// A reference run: the model initialisation time, truncated to a 6h boundary.
/// Forecast-hour offsets are passed in separately to every derived operation,
/// mirroring the upstream's `YYYYMMDDHH` + `.fHHH` file naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stamp {
    pub ref_time: DateTime<Utc>,
}

impl Stamp {
    /// Snap `t` down to the nearest multiple of 6 UTC hours.
    pub fn from(t: DateTime<Utc>) -> Self {
        Self {
            ref_time: t.duration_trunc(chrono::Duration::hours(6)).expect("truncate to 6h boundary"),
        }
    }

    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// The canonical valid-time key `YYYYMMDDHH` for forecast offset `h`.
    pub fn key(&self, h: i64) -> String {
        (self.ref_time + chrono::Duration::hours(h)).format("%Y%m%d%H").to_string()
    }

    /// `YYYYMMDDHH.fHHH`.
    pub fn filename(&self, h: i64) -> String {
        format!("{}.f{:03}", self.ref_time.format("%Y%m%d%H"), h)
    }

    /// Signed, rounded hours between the valid time (`ref_time + h`) and now.
    pub fn from_now(&self, h: i64) -> i64 {
        let valid_time = self.ref_time + chrono::Duration::hours(h);
        let seconds = (valid_time - Utc::now()).num_seconds() as f64;
        (seconds / 3600.0).round() as i64
    }

    pub fn six_hours_earlier(&self) -> Self {
        Self { ref_time: self.ref_time - chrono::Duration::hours(6) }
    }

    /// Parse a `YYYYMMDDHH.fHHH[.tmp]` filename into its stamp and forecast offset.
    pub fn parse_filename(name: &str) -> Result<(Self, i64), StampError> {
        let name = name.strip_suffix(".tmp").unwrap_or(name);

        match name.split('.').collect::<Vec<&str>>()[..] {
            [date_hour, forecast] => {
                let ref_time = chrono::NaiveDateTime::parse_from_str(
                    &format!("{date_hour}0000"),
                    "%Y%m%d%H%M%S",
                )
                .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
                .map_err(StampError::ParseError)?;

                if !forecast.starts_with('f') || forecast.len() != 4 {
                    return Err(StampError::FilenameError(name.to_string()));
                }

                let offset = forecast[1..].parse::<i64>()?;

                Ok((Self { ref_time }, offset))
            }
            _ => Err(StampError::FilenameError(name.to_string())),
        }
    }
}

impl Display for Stamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Z", self.ref_time.format("%Y%m%d%H"))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StampError {
    #[error("wrong filename format `{0}`")]
    FilenameError(String),

    #[error("parse error: {0}")]
    ParseError(#[from] chrono::ParseError),

    #[error("parse int error: {0}")]
    ParseIntError(#[from] std::num::ParseIntError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_round_trips() {
        let stamp = Stamp { ref_time: Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap() };

        let filename = stamp.filename(9);
        assert_eq!(filename, "2024010106.f009");

        let (parsed, offset) = Stamp::parse_filename(&filename).unwrap();
        assert_eq!(parsed, stamp);
        assert_eq!(offset, 9);
    }

    #[test]
    fn key_is_parseable_back_to_valid_time() {
        let stamp = Stamp { ref_time: Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap() };

        assert_eq!(stamp.key(9), "2024010115");
    }

    #[test]
    fn tmp_suffix_is_stripped_before_parsing() {
        let stamp = Stamp { ref_time: Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap() };
        let (parsed, offset) = Stamp::parse_filename(&format!("{}.tmp", stamp.filename(3))).unwrap();

        assert_eq!(parsed, stamp);
        assert_eq!(offset, 3);
    }

    #[test]
    fn from_truncates_to_six_hour_boundary() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();
        assert_eq!(Stamp::from(t).ref_time, Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap());
    }

    #[test]
    fn malformed_filename_is_rejected() {
        assert!(Stamp::parse_filename("not-a-stamp").is_err());
        assert!(Stamp::parse_filename("2024010106.003").is_err());
    }
}

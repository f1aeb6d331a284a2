//! Shared records passed between pipeline stages.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Display format of `capturedon`.
pub const CAPTURE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Operational state of a camera as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CameraStatus {
    Active,
    Inactive,
    Disabled,
    Unapproved,
    /// A state this crate does not know about, kept verbatim.
    Other(String),
}

impl CameraStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CameraStatus::Active => "active",
            CameraStatus::Inactive => "inactive",
            CameraStatus::Disabled => "disabled",
            CameraStatus::Unapproved => "unapproved",
            CameraStatus::Other(s) => s,
        }
    }
}

impl From<String> for CameraStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => CameraStatus::Active,
            "inactive" => CameraStatus::Inactive,
            "disabled" => CameraStatus::Disabled,
            "unapproved" => CameraStatus::Unapproved,
            _ => CameraStatus::Other(s),
        }
    }
}

impl From<CameraStatus> for String {
    fn from(status: CameraStatus) -> Self {
        match status {
            CameraStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// One row of the camera catalog (`cams.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    pub id: String,
    pub status: CameraStatus,
    pub city: String,
    pub country_code: String,
    pub continent_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl Table for CameraRecord {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "status",
        "city",
        "country_code",
        "continent_code",
        "latitude",
        "longitude",
        "timezone",
    ];
}

/// One archived frame of a camera (`url/<camid>.csv`).
///
/// `(camid, lapse, seqid)` is unique within one camera's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub camid: String,
    /// Time bucket label chosen by the service: day, month, year, lifetime.
    pub lapse: String,
    /// Zero-based position within the bucket.
    pub seqid: usize,
    pub url: String,
    pub capturedon: String,
}

impl ArchiveEntry {
    pub fn image_file_name(&self) -> String {
        image_file_name(&self.camid, &self.capturedon)
    }
}

impl Table for ArchiveEntry {
    const COLUMNS: &'static [&'static str] = &["camid", "lapse", "seqid", "url", "capturedon"];
}

/// Format an epoch-millisecond capture time as `YYYYMMDD_HHMMSS` in UTC.
///
/// Sub-second precision is dropped by flooring to whole seconds. Returns
/// `None` when the instant is outside chrono's representable range.
pub fn capture_stamp(epoch_ms: i64) -> Option<String> {
    let secs = epoch_ms.div_euclid(1000);
    DateTime::from_timestamp(secs, 0).map(|t| t.format(CAPTURE_STAMP_FORMAT).to_string())
}

/// Parse a `capturedon` string back to epoch seconds.
pub fn parse_capture_stamp(stamp: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(stamp, CAPTURE_STAMP_FORMAT)
        .ok()
        .map(|t| t.and_utc().timestamp())
}

/// Destination image name. Two rows with the same camera and capture
/// second map to the same file.
pub fn image_file_name(camid: &str, capturedon: &str) -> String {
    format!("{camid}-{capturedon}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_stamp_known_value() {
        assert_eq!(capture_stamp(1_700_000_000_000).as_deref(), Some("20231114_221320"));
    }

    #[test]
    fn test_capture_stamp_truncates_millis() {
        assert_eq!(capture_stamp(1_700_000_000_999), capture_stamp(1_700_000_000_000));
    }

    #[test]
    fn test_capture_stamp_before_epoch_floors() {
        assert_eq!(capture_stamp(-1).as_deref(), Some("19691231_235959"));
    }

    #[test]
    fn test_capture_stamp_recovers_whole_seconds() {
        for ms in [0, 999, 1_000, 86_399_999, 1_234_567_890_123, 1_700_000_000_500] {
            let stamp = capture_stamp(ms).unwrap();
            assert_eq!(parse_capture_stamp(&stamp), Some(ms.div_euclid(1000)));
        }
    }

    #[test]
    fn test_parse_capture_stamp_rejects_garbage() {
        assert_eq!(parse_capture_stamp("2023-11-14"), None);
    }

    #[test]
    fn test_image_file_name() {
        assert_eq!(image_file_name("123", "20231114_221320"), "123-20231114_221320.jpg");
    }

    #[test]
    fn test_image_file_name_ignores_bucket() {
        let day = ArchiveEntry {
            camid: "7".into(),
            lapse: "day".into(),
            seqid: 0,
            url: "http://x/a.jpg".into(),
            capturedon: "20231114_221320".into(),
        };
        let month = ArchiveEntry {
            lapse: "month".into(),
            seqid: 4,
            url: "http://x/b.jpg".into(),
            ..day.clone()
        };
        assert_eq!(day.image_file_name(), month.image_file_name());
    }

    #[test]
    fn test_status_known_and_unknown() {
        assert_eq!(CameraStatus::from("active".to_string()), CameraStatus::Active);
        let odd = CameraStatus::from("maintenance".to_string());
        assert_eq!(odd, CameraStatus::Other("maintenance".into()));
        assert_eq!(String::from(odd), "maintenance");
    }
}

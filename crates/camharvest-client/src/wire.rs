//! JSON shapes returned by the webcam service.

use std::fmt;

use camharvest_core::{CameraRecord, CameraStatus};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Body of one catalog page.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub result: CatalogResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResult {
    pub webcams: Vec<WebcamEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebcamEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub status: String,
    pub location: WebcamLocation,
}

/// Text fields may be `null` for cameras the service has no place data
/// for; they are kept as empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct WebcamLocation {
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub country_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub continent_code: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(deserialize_with = "null_as_empty")]
    pub timezone: String,
}

impl From<WebcamEntry> for CameraRecord {
    fn from(entry: WebcamEntry) -> Self {
        let WebcamLocation {
            city,
            country_code,
            continent_code,
            latitude,
            longitude,
            timezone,
        } = entry.location;
        CameraRecord {
            id: entry.id,
            status: CameraStatus::from(entry.status),
            city,
            country_code,
            continent_code,
            latitude,
            longitude,
            timezone,
        }
    }
}

/// One archived frame.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameDescriptor {
    /// Capture time in epoch milliseconds; integer or float on the wire.
    pub timestamp: serde_json::Number,
    pub url: String,
}

impl FrameDescriptor {
    pub fn epoch_ms(&self) -> Option<i64> {
        self.timestamp
            .as_i64()
            .or_else(|| self.timestamp.as_f64().map(|ms| ms.floor() as i64))
    }
}

/// Archive body: bucket label to frames, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveResponse {
    pub buckets: Vec<(String, Vec<FrameDescriptor>)>,
}

impl ArchiveResponse {
    pub fn frame_count(&self) -> usize {
        self.buckets.iter().map(|(_, frames)| frames.len()).sum()
    }
}

impl PartialEq for FrameDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.epoch_ms() == other.epoch_ms()
    }
}

impl<'de> Deserialize<'de> for ArchiveResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BucketsVisitor;

        impl<'de> Visitor<'de> for BucketsVisitor {
            type Value = ArchiveResponse;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of bucket label to frame list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut buckets = Vec::new();
                while let Some((label, frames)) = map.next_entry::<String, Vec<FrameDescriptor>>()? {
                    buckets.push((label, frames));
                }
                Ok(ArchiveResponse { buckets })
            }
        }

        deserializer.deserialize_map(BucketsVisitor)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

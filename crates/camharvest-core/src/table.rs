//! Flat CSV tables, loaded and saved wholesale.
//!
//! Every file starts with a header row naming the columns, even when the
//! table is empty, so a cached empty catalog is still a valid table.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{HarvestError, HarvestResult};

/// A record type persisted as one CSV row.
pub trait Table: Serialize + DeserializeOwned {
    /// Header row, in field order.
    const COLUMNS: &'static [&'static str];
}

pub fn read_table<T: Table>(path: &Path) -> HarvestResult<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| HarvestError::table(path, e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| HarvestError::table(path, e))
}

pub fn write_table<T: Table>(path: &Path, rows: &[T]) -> HarvestResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| HarvestError::table(path, e))?;
    writer
        .write_record(T::COLUMNS)
        .map_err(|e| HarvestError::table(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| HarvestError::table(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArchiveEntry, CameraRecord, CameraStatus};

    fn camera(id: &str) -> CameraRecord {
        CameraRecord {
            id: id.to_string(),
            status: CameraStatus::Active,
            city: "Zell am See".to_string(),
            country_code: "AT".to_string(),
            continent_code: "EU".to_string(),
            latitude: 47.3236,
            longitude: 12.7966,
            timezone: "Europe/Vienna".to_string(),
        }
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cams.csv");
        write_table::<CameraRecord>(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "id,status,city,country_code,continent_code,latitude,longitude,timezone\n"
        );
        assert!(read_table::<CameraRecord>(&path).unwrap().is_empty());
    }

    #[test]
    fn test_listing_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("123.csv");
        let rows = vec![ArchiveEntry {
            camid: "123".into(),
            lapse: "day".into(),
            seqid: 0,
            url: "http://x/a.jpg".into(),
            capturedon: "20231114_221320".into(),
        }];
        write_table(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "camid,lapse,seqid,url,capturedon\n123,day,0,http://x/a.jpg,20231114_221320\n"
        );
        assert_eq!(read_table::<ArchiveEntry>(&path).unwrap(), rows);
    }

    #[test]
    fn test_quoted_fields_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cams.csv");
        let mut cam = camera("1");
        cam.city = "Washington, D.C.".into();
        cam.status = CameraStatus::Other("maintenance".into());
        write_table(&path, &[cam.clone(), camera("2")]).unwrap();

        let loaded = read_table::<CameraRecord>(&path).unwrap();
        assert_eq!(loaded, vec![cam, camera("2")]);
    }

    #[test]
    fn test_read_missing_file_is_table_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table::<CameraRecord>(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, HarvestError::Table { .. }));
    }

    #[test]
    fn test_read_wrong_shape_is_table_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("123.csv");
        std::fs::write(&path, "camid,lapse,seqid,url,capturedon\n123,day,notanumber,u,s\n").unwrap();
        let err = read_table::<ArchiveEntry>(&path).unwrap_err();
        assert!(matches!(err, HarvestError::Table { .. }));
    }
}

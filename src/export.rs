//! Export functionality for reconstructed telemetry
//!
//! Writes per-frame telemetry as CSV, one `(latitude, longitude, speed)`
//! row per output video frame, in frame order. This is the artifact the
//! overlay renderer consumes.

use crate::error::{DashcamError, Result};
use crate::types::TelemetrySample;
use std::io::Write;

/// Write per-frame telemetry as CSV.
///
/// Columns: `frame`, `latitude`, `longitude`, `speed_kmh`. Coordinates are
/// written with enough precision to survive a round trip through text.
#[cfg(feature = "csv")]
pub fn write_track_csv<W: Write>(writer: W, frames: &[TelemetrySample]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["frame", "latitude", "longitude", "speed_kmh"])
        .map_err(|e| DashcamError::Export(e.to_string()))?;

    for (index, frame) in frames.iter().enumerate() {
        csv_writer
            .write_record(&[
                index.to_string(),
                format!("{:.7}", frame.latitude),
                format!("{:.7}", frame.longitude),
                format!("{:.2}", frame.speed),
            ])
            .map_err(|e| DashcamError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| DashcamError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(all(test, feature = "csv"))]
mod tests {
    use super::*;

    #[test]
    fn test_write_track_csv() {
        let frames = vec![
            TelemetrySample {
                latitude: 52.5,
                longitude: 13.25,
                speed: 11.5,
            },
            TelemetrySample {
                latitude: -33.875,
                longitude: 151.2,
                speed: 0.0,
            },
        ];

        let mut buffer = Vec::new();
        write_track_csv(&mut buffer, &frames).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "frame,latitude,longitude,speed_kmh");
        assert_eq!(lines[1], "0,52.5000000,13.2500000,11.50");
        assert_eq!(lines[2], "1,-33.8750000,151.2000000,0.00");
    }

    #[test]
    fn test_empty_track_writes_header_only() {
        let mut buffer = Vec::new();
        write_track_csv(&mut buffer, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}

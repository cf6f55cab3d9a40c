//! Telemetry sentence parsing
//!
//! Converts one decoded sentence string into a [`GpsFix`], applying the
//! camera-specific coordinate descrambling and unit conversion. Any failure
//! here is a per-sentence [`DashcamError::Parse`]; callers turn it into an
//! unresolved tick and keep going.

use crate::conversion::{apply_hemisphere, convert_speed, descramble_coordinates};
use crate::error::{DashcamError, Result};
use crate::types::{CameraModel, GpsFix};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(.*) (N|S):([0-9.]*) (E|W):([0-9.]*) ([0-9.]*) km/h").unwrap()
    })
}

/// Parse one sentence into a GPS fix.
///
/// Grammar: `TIMESTAMP HEMI_NS:LAT HEMI_EW:LON SPEED km/h` with the
/// timestamp in `YYYY/MM/DD HH:MM:SS` form. Vantop coordinates arrive
/// scrambled and are unscrambled before the hemisphere sign is applied;
/// Novatek coordinates are already decimal degrees.
pub fn parse_sentence(sentence: &str, camera: CameraModel) -> Result<GpsFix> {
    let captures = sentence_pattern()
        .captures(sentence)
        .ok_or_else(|| DashcamError::Parse(format!("unrecognized sentence '{}'", sentence)))?;

    let timestamp = NaiveDateTime::parse_from_str(&captures[1], TIMESTAMP_FORMAT)
        .map_err(|e| DashcamError::Parse(format!("bad timestamp '{}': {}", &captures[1], e)))?;

    let latitude = parse_float(&captures[3])?;
    let longitude = parse_float(&captures[5])?;
    let speed = convert_speed(parse_float(&captures[6])?);

    let (latitude, longitude) = match camera {
        CameraModel::Novatek => (latitude, longitude),
        CameraModel::Vantop => descramble_coordinates(latitude, longitude),
    };

    let ns = captures[2].chars().next().unwrap_or('N');
    let ew = captures[4].chars().next().unwrap_or('E');

    Ok(GpsFix {
        timestamp,
        latitude: apply_hemisphere(latitude, ns),
        longitude: apply_hemisphere(longitude, ew),
        speed,
    })
}

fn parse_float(field: &str) -> Result<f64> {
    field
        .parse()
        .map_err(|e| DashcamError::Parse(format!("bad numeric field '{}': {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_novatek_sentence() {
        let fix =
            parse_sentence("2021/07/15 12:34:56 N:52.5 E:13.25 10.0 km/h", CameraModel::Novatek)
                .unwrap();
        assert_eq!(fix.timestamp, timestamp("2021/07/15 12:34:56"));
        assert_eq!(fix.latitude, 52.5);
        assert_eq!(fix.longitude, 13.25);
        assert!((fix.speed - 10.0 * 1.852 / 1.609344).abs() < 1e-12);
    }

    #[test]
    fn test_parse_applies_hemisphere_sign() {
        let fix =
            parse_sentence("2021/07/15 12:34:56 S:52.5 W:13.25 0.0 km/h", CameraModel::Novatek)
                .unwrap();
        assert_eq!(fix.latitude, -52.5);
        assert_eq!(fix.longitude, -13.25);
    }

    #[test]
    fn test_parse_vantop_descrambles_before_signing() {
        let fix =
            parse_sentence("2021/07/15 12:34:56 S:52.0 E:13.0 0.0 km/h", CameraModel::Vantop)
                .unwrap();
        let expected_lat = 50.0 + 3.0 * 1.524855;
        let expected_lon = 10.0 + 2.0 * 1.524855;
        assert!((fix.latitude + expected_lat).abs() < 1e-9);
        assert!((fix.longitude - expected_lon).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_bad_grammar() {
        assert!(matches!(
            parse_sentence("not a sentence", CameraModel::Novatek),
            Err(DashcamError::Parse(_))
        ));
        // speed field present but unit label missing
        assert!(matches!(
            parse_sentence("2021/07/15 12:34:56 N:52.5 E:13.25 10.0", CameraModel::Novatek),
            Err(DashcamError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        assert!(matches!(
            parse_sentence("2021-07-15 12:34:56 N:52.5 E:13.25 10.0 km/h", CameraModel::Novatek),
            Err(DashcamError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_numerics() {
        // multiple dots pass the character class but fail float parsing
        assert!(matches!(
            parse_sentence("2021/07/15 12:34:56 N:52..5 E:13.25 1.0 km/h", CameraModel::Novatek),
            Err(DashcamError::Parse(_))
        ));
    }

    #[test]
    fn test_sample_projection_drops_timestamp() {
        let fix = GpsFix {
            timestamp: NaiveDate::from_ymd_opt(2021, 7, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            latitude: 1.0,
            longitude: 2.0,
            speed: 3.0,
        };
        let sample = fix.sample();
        assert_eq!(
            (sample.latitude, sample.longitude, sample.speed),
            (1.0, 2.0, 3.0)
        );
    }
}

//! GPS metadata region location
//!
//! Finds the byte offset and size of the embedded GPS blob inside a source
//! video by running `exiftool -v3` and pattern-matching its tag dump. The
//! dump is treated as opaque line-oriented text; there is no binary contract
//! with exiftool.

use crate::error::{DashcamError, Result};
use crate::types::{CameraModel, GpsRegion};
use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

fn novatek_size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Tag 'gps '.*\(([0-9]+) bytes").unwrap())
}

fn hex_address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9a-f]+):.*").unwrap())
}

fn vantop_offset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9a-f]*):.*LIGOGPSINFO").unwrap())
}

fn vantop_size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Tag.*skip.*\(([0-9]*) bytes").unwrap())
}

/// Locate the GPS metadata region of a source file.
///
/// Runs the exiftool verbose tag dump (blocking subprocess, one call per
/// file) and matches it with [`scan_tag_dump`]. Returns a zero region when
/// the dump carries no recognizable GPS markers; callers treat that as "no
/// telemetry in this file".
pub fn locate_gps_region(file_path: &Path, camera: CameraModel) -> Result<GpsRegion> {
    let output = Command::new("exiftool").arg("-v3").arg(file_path).output()?;

    if !output.status.success() {
        return Err(DashcamError::Format(format!(
            "exiftool failed on {:?} (exit status {})",
            file_path, output.status
        )));
    }

    let text = std::str::from_utf8(&output.stdout)?;
    Ok(scan_tag_dump(text, camera))
}

/// Match firmware-specific markers in an exiftool verbose dump.
///
/// Novatek reports a `Tag 'gps '` line with the size in bytes, followed by a
/// line whose leading hexadecimal address is the region offset. Vantop puts
/// the address on the LIGOGPSINFO line itself and reports the size on a
/// separate skip tag. Unmatched markers leave the corresponding field at 0.
pub fn scan_tag_dump(dump: &str, camera: CameraModel) -> GpsRegion {
    match camera {
        CameraModel::Novatek => scan_novatek_dump(dump),
        CameraModel::Vantop => scan_vantop_dump(dump),
    }
}

fn scan_novatek_dump(dump: &str) -> GpsRegion {
    let mut region = GpsRegion::default();
    let mut read_offset = false;

    for line in dump.lines() {
        if read_offset {
            if let Some(captures) = hex_address_pattern().captures(line) {
                region.offset = u64::from_str_radix(&captures[1], 16).unwrap_or(0);
            }
            read_offset = false;
        }

        if let Some(captures) = novatek_size_pattern().captures(line) {
            region.size = captures[1].parse().unwrap_or(0);
            read_offset = true;
        }
    }

    region
}

fn scan_vantop_dump(dump: &str) -> GpsRegion {
    let mut region = GpsRegion::default();

    for line in dump.lines() {
        if let Some(captures) = vantop_offset_pattern().captures(line) {
            region.offset = u64::from_str_radix(&captures[1], 16).unwrap_or(0);
        }

        if let Some(captures) = vantop_size_pattern().captures(line) {
            region.size = captures[1].parse().unwrap_or(0);
        }
    }

    region
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_novatek_dump() {
        let dump = "\
  | MovieData (SubDirectory) -->
  | | Tag 'gps ' (262144 bytes):
  | |   3d10f2c8: 00 00 00 08 00 3c 4b 00 [.....<K.]
  | | Tag 'moov' (64 bytes):
";
        let region = scan_tag_dump(dump, CameraModel::Novatek);
        assert_eq!(region.offset, 0x3d10f2c8);
        assert_eq!(region.size, 262144);
    }

    #[test]
    fn test_scan_novatek_dump_without_gps_tag() {
        let dump = "  | Tag 'moov' (64 bytes):\n  |   000000a0: 00 00 [..]\n";
        let region = scan_tag_dump(dump, CameraModel::Novatek);
        assert!(region.is_empty());
        assert_eq!(region.offset, 0);
    }

    #[test]
    fn test_scan_vantop_dump() {
        let dump = "\
  | Tag 'skip' (16384 bytes):
  |   0000f1a0: 4c 49 47 4f 47 50 53 49 4e 46 4f [LIGOGPSINFO]
";
        let region = scan_tag_dump(dump, CameraModel::Vantop);
        assert_eq!(region.offset, 0xf1a0);
        assert_eq!(region.size, 16384);
    }

    #[test]
    fn test_scan_vantop_dump_without_markers() {
        let dump = "  | Tag 'mdat' (100 bytes):\n";
        let region = scan_tag_dump(dump, CameraModel::Vantop);
        assert!(region.is_empty());
    }
}

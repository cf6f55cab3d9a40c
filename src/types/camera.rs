use std::fmt;
use std::str::FromStr;

/// Camera firmware family governing locator/decoder/parser rules.
///
/// Selected once per run, not per file: a recording directory always comes
/// from a single camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraModel {
    /// Novatek firmware: plain-struct GPS blocks reachable through an index
    /// table in the 'gps ' atom.
    Novatek,
    /// Vantop firmware: obfuscated fixed-size GPS blocks in the LIGOGPSINFO
    /// region.
    Vantop,
}

impl FromStr for CameraModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "novatek" => Ok(CameraModel::Novatek),
            "vantop" => Ok(CameraModel::Vantop),
            other => Err(format!(
                "unknown camera model '{}' (expected 'novatek' or 'vantop')",
                other
            )),
        }
    }
}

impl fmt::Display for CameraModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraModel::Novatek => write!(f, "novatek"),
            CameraModel::Vantop => write!(f, "vantop"),
        }
    }
}

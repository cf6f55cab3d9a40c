use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One telemetry value: position in signed decimal degrees (+ = N/E) and
/// speed in km/h-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetrySample {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}

/// A parsed GPS sentence before timeline placement: the telemetry value plus
/// the wall-clock timestamp the camera stamped it with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}

impl GpsFix {
    pub fn sample(&self) -> TelemetrySample {
        TelemetrySample {
            latitude: self.latitude,
            longitude: self.longitude,
            speed: self.speed,
        }
    }
}

/// Byte region inside a source file holding the embedded GPS metadata blob.
///
/// A zero-size region means the locator found no markers; it decodes to an
/// empty sentence list downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpsRegion {
    pub offset: u64,
    pub size: u64,
}

impl GpsRegion {
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

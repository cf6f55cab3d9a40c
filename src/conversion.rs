//! Unit and coordinate conversion utilities
//!
//! Contains the camera-specific coordinate and speed conversions shared by
//! the block decoders and the sentence parser.

/// Convert a DDMM.MMMM encoded coordinate to decimal degrees.
///
/// Novatek GPS blocks store latitude/longitude as degrees*100 + minutes,
/// the classic NMEA packing.
pub fn dm_to_degrees(coordinate: f64) -> f64 {
    let minutes = coordinate % 100.0;
    let degrees = (coordinate - minutes) / 100.0;

    degrees + minutes / 60.0
}

/// Convert a sentence speed field to km/h-equivalent units.
///
/// The sentence label says km/h but the value behaves like knots; the factor
/// below (knots -> km/h -> mph back-projection) matches what the cameras'
/// own players display. Observed behavior, kept exactly.
pub fn convert_speed(raw: f64) -> f64 {
    raw * 1.852 / 1.609344
}

/// Unscramble a Vantop latitude/longitude pair.
///
/// Vantop firmware swaps the sub-10-degree remainder between the two
/// coordinates and scales it by a fixed constant. Returns (latitude,
/// longitude) in decimal degrees, unsigned.
pub fn descramble_coordinates(latitude: f64, longitude: f64) -> (f64, f64) {
    let real_latitude = (latitude / 10.0).floor() * 10.0 + (longitude % 10.0) * 1.524855;
    let real_longitude = (longitude / 10.0).floor() * 10.0 + (latitude % 10.0) * 1.524855;

    (real_latitude, real_longitude)
}

/// Apply a hemisphere letter to an unsigned coordinate ('S' and 'W' negate).
pub fn apply_hemisphere(value: f64, hemisphere: char) -> f64 {
    match hemisphere {
        'S' | 'W' => -value,
        _ => value,
    }
}

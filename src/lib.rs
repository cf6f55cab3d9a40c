//! Dashcam GPS Library
//!
//! A Rust library for recovering continuous GPS telemetry tracks from
//! Novatek and Vantop dashcam video containers. Both firmware families
//! embed telemetry in proprietary, partially obfuscated binary layouts and
//! emit sentences irregularly (roughly 1 Hz, with gaps, duplicates and
//! corrupt records); this library decodes them, densifies the result into a
//! gap-free per-second track and resamples it to an arbitrary video frame
//! count for overlay rendering.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export of per-frame telemetry
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Recover a track from a recording directory and resample it to a frame
//! count:
//! ```rust,no_run
//! use dashcam_gps::{parse_gps_files, reconstruct_track, resample_track, CameraModel};
//!
//! let files = ["FILE0001.MP4", "FILE0002.MP4"];
//! let slots = parse_gps_files(&files, CameraModel::Novatek, false).unwrap();
//! let track = reconstruct_track(&slots).unwrap();
//! let frames = resample_track(&track, 4500);
//! assert_eq!(frames.len(), 4500);
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_gps_file`] - Decode and assemble one source file's timeline
//! - [`parse_gps_files`] - Decode all source files into one merged timeline
//! - [`locate_gps_region`] - Find the embedded GPS blob via exiftool
//! - [`decode_novatek_region`] / [`decode_vantop_region`] - Low-level block
//!   decoders for the two firmware families
//! - [`parse_sentence`] - Parse one decoded sentence into a [`GpsFix`]
//!
//! ## Track Functions
//! - [`reconstruct_track`] - Fill every unresolved tick of a merged timeline
//! - [`resample_track`] - Map a dense track onto a target frame count
//!
//! ## Data Types
//! - [`TelemetrySample`] - One `(latitude, longitude, speed)` value
//! - [`GpsFix`] - A parsed sentence with its camera timestamp
//! - [`GpsRegion`] - Located byte region of the embedded metadata
//! - [`CameraModel`] - Firmware family selector
//!
//! ## Export Functions
//! - [`write_track_csv`] - Write per-frame telemetry for the renderer

// Module declarations
pub mod conversion;
pub mod error;
#[cfg(feature = "csv")]
pub mod export;
pub mod parser;
pub mod reconstruct;
pub mod resample;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[cfg(feature = "csv")]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
pub use reconstruct::*;
pub use resample::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;

//! CLI binary for the dashcam GPS library
//!
//! Recovers the GPS track from a directory of dashcam recordings and writes
//! per-frame telemetry CSV for the overlay renderer. The target frame count
//! comes from `--frames`, or from probing a concatenated video with ffprobe
//! (cached in a JSON sidecar so repeated runs skip the probe).

use anyhow::{anyhow, Context, Result};
use clap::{Arg, Command};
use dashcam_gps::{
    parse_gps_files, reconstruct_track, resample_track, write_track_csv, CameraModel,
    DashcamError,
};
use glob::glob;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as Subprocess;

/// Probed frame counts are divided by this decimation factor by default:
/// the timelapse pipeline keeps every fourth source frame.
const DEFAULT_DECIMATION: &str = "4";

/// Sidecar file caching the probed frame count next to the probed video.
const FRAME_COUNT_CACHE: &str = "dashcam-gps-frames.json";

#[derive(Debug, Serialize, Deserialize)]
struct FrameCountCache {
    frame_count: usize,
}

/// Collect the recording files of a directory, sorted by name (the cameras
/// number recordings sequentially, so name order is record order).
fn find_source_videos(directory: &Path) -> Result<Vec<PathBuf>> {
    let pattern = directory.join("*").to_string_lossy().into_owned();
    let mut videos: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Invalid source directory pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("mp4"))
                .unwrap_or(false)
        })
        .collect();

    videos.sort();
    Ok(videos)
}

/// Count output frames by probing the concatenated video with ffprobe,
/// dividing the packet count by the decimation factor. The result is cached
/// in a JSON sidecar next to the probed file.
fn get_frame_count(video: &Path, decimation: usize, debug: bool) -> Result<usize> {
    let cache_path = video
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(FRAME_COUNT_CACHE);

    if cache_path.exists() {
        let text = fs::read_to_string(&cache_path)
            .with_context(|| format!("Failed to read frame count cache {:?}", cache_path))?;
        let cache: FrameCountCache = serde_json::from_str(&text)
            .with_context(|| format!("Malformed frame count cache {:?}", cache_path))?;
        if debug {
            eprintln!("Using cached frame count {}", cache.frame_count);
        }
        return Ok(cache.frame_count);
    }

    let output = Subprocess::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-count_packets",
            "-show_entries",
            "stream=nb_read_packets",
            "-of",
            "csv=p=0",
        ])
        .arg(video)
        .output()
        .with_context(|| format!("Failed to run ffprobe on {:?}", video))?;

    if !output.status.success() {
        return Err(anyhow!(
            "ffprobe failed on {:?}: {}",
            video,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let packets: usize = String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .with_context(|| format!("Unexpected ffprobe output for {:?}", video))?;
    let frame_count = packets / decimation;

    let cache = FrameCountCache { frame_count };
    fs::write(&cache_path, serde_json::to_string(&cache)?)
        .with_context(|| format!("Failed to write frame count cache {:?}", cache_path))?;

    Ok(frame_count)
}

fn build_command() -> Command {
    Command::new("Dashcam GPS")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recover the GPS track from dashcam recordings and emit per-frame telemetry CSV for overlay rendering.")
        .arg(
            Arg::new("directory")
                .help("Directory containing the source recordings (*.MP4, processed in name order)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("camera")
                .short('c')
                .long("camera")
                .help("Camera firmware family: 'novatek' or 'vantop'")
                .value_name("MODEL")
                .default_value("novatek"),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .help("Target output frame count (skips probing)")
                .value_name("N"),
        )
        .arg(
            Arg::new("video")
                .long("video")
                .help("Concatenated video to probe for the frame count with ffprobe")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("decimation")
                .long("decimation")
                .help("Divide the probed packet count by this factor")
                .value_name("FACTOR")
                .default_value(DEFAULT_DECIMATION),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output CSV path (default: stdout)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");

    let camera: CameraModel = matches
        .get_one::<String>("camera")
        .expect("camera has a default")
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let decimation: usize = matches
        .get_one::<String>("decimation")
        .expect("decimation has a default")
        .parse()
        .context("--decimation must be a positive integer")?;
    if decimation == 0 {
        return Err(anyhow!("--decimation must be a positive integer"));
    }

    let directory = PathBuf::from(matches.get_one::<String>("directory").expect("required"));
    if !directory.is_dir() {
        eprintln!("Error: {:?} does not exist or is not a directory", directory);
        std::process::exit(1);
    }

    let videos = find_source_videos(&directory)?;
    if videos.is_empty() {
        eprintln!("Error: No .MP4 recordings found in {:?}", directory);
        std::process::exit(1);
    }

    // progress goes to stderr: stdout may be carrying the CSV stream
    eprintln!(
        "Extracting GPS track from {} recording(s) ({} camera)...",
        videos.len(),
        camera
    );

    let slots = parse_gps_files(&videos, camera, debug)?;

    let track = match reconstruct_track(&slots) {
        Ok(track) => track,
        Err(DashcamError::NoTelemetry) => {
            // distinct condition: callers skip overlay generation entirely
            eprintln!("Warning: No GPS data was found. Not generating telemetry.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if debug {
        println!("Reconstructed track of {} sample(s)", track.len());
    }

    let frame_count = match (
        matches.get_one::<String>("frames"),
        matches.get_one::<String>("video"),
    ) {
        (Some(frames), _) => frames.parse().context("--frames must be a positive integer")?,
        (None, Some(video)) => get_frame_count(Path::new(video), decimation, debug)?,
        // without a frame timeline, emit the dense track one row per tick
        (None, None) => track.len(),
    };
    if frame_count == 0 {
        return Err(anyhow!("target frame count must be at least 1"));
    }

    eprintln!("Resampling {} sample(s) to {} frame(s)...", track.len(), frame_count);
    let frames = resample_track(&track, frame_count);

    match matches.get_one::<String>("output") {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path))?;
            write_track_csv(file, &frames)?;
            eprintln!("Wrote {} frame(s) to {}", frames.len(), path);
        }
        None => {
            let stdout = std::io::stdout();
            write_track_csv(stdout.lock(), &frames)?;
        }
    }

    Ok(())
}

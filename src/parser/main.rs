use crate::parser::assembler::TimelineAssembler;
use crate::parser::locator::locate_gps_region;
use crate::parser::novatek::decode_novatek_region;
use crate::parser::sentence::parse_sentence;
use crate::parser::vantop::decode_vantop_region;
use crate::types::{CameraModel, TelemetrySample};
use anyhow::Context;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Parse one source file into its per-file slot timeline.
///
/// Runs the full per-file pipeline: locate the GPS region, decode its blocks
/// for the selected camera family, parse the sentences, and assemble them
/// onto the tick timeline. A file with zero GPS sentences contributes an
/// empty timeline and a warning, not an error.
pub fn parse_gps_file(
    file_path: &Path,
    camera: CameraModel,
    debug: bool,
) -> anyhow::Result<Vec<Option<TelemetrySample>>> {
    let region = locate_gps_region(file_path, camera)
        .with_context(|| format!("Failed to locate GPS region in {:?}", file_path))?;

    if debug {
        println!(
            "GPS region in {:?}: offset 0x{:x}, {} bytes",
            file_path, region.offset, region.size
        );
    }

    let mut file =
        File::open(file_path).with_context(|| format!("Failed to open {:?}", file_path))?;

    let mut region_data = vec![0u8; region.size as usize];
    if !region.is_empty() {
        file.seek(SeekFrom::Start(region.offset))?;
        file.read_exact(&mut region_data)
            .with_context(|| format!("Failed to read GPS region of {:?}", file_path))?;
    }

    let sentences: Vec<Option<String>> = match camera {
        CameraModel::Novatek => decode_novatek_region(&region_data, &mut file)
            .with_context(|| format!("Failed to decode GPS blocks of {:?}", file_path))?,
        CameraModel::Vantop => decode_vantop_region(&region_data)
            .with_context(|| format!("Failed to decode GPS blocks of {:?}", file_path))?
            .into_iter()
            .map(Some)
            .collect(),
    };

    let mut assembler = TimelineAssembler::new();
    for sentence in &sentences {
        let fix = sentence
            .as_deref()
            .and_then(|text| parse_sentence(text, camera).ok());
        assembler.push(fix);
    }

    if assembler.sentence_count() == 0 {
        eprintln!("Warning: {:?} had zero GPS sentences.", file_path);
    } else if debug {
        println!(
            "Decoded {} sentence(s) from {:?}",
            assembler.sentence_count(),
            file_path
        );
    }

    Ok(assembler.finish())
}

/// Parse all source files, in input order, into one merged slot sequence.
///
/// Per-file timelines are simply concatenated; reconstruction across file
/// boundaries happens later, once every input is available.
pub fn parse_gps_files(
    file_paths: &[impl AsRef<Path>],
    camera: CameraModel,
    debug: bool,
) -> anyhow::Result<Vec<Option<TelemetrySample>>> {
    let mut slots = Vec::new();

    for file_path in file_paths {
        slots.extend(parse_gps_file(file_path.as_ref(), camera, debug)?);
    }

    Ok(slots)
}

//! Novatek GPS block decoding
//!
//! The 'gps ' atom of a Novatek container is an index table of 8-byte
//! entries, each pointing at an indirect block elsewhere in the same file.
//! Each indirect block carries one telemetry sentence, packed as a plain
//! little-endian struct inside a freeform block that must be scanned for the
//! hemisphere-letter signature.

use crate::conversion::dm_to_degrees;
use crate::error::{DashcamError, Result};
use crate::parser::stream::RegionStream;
use std::io::{Read, Seek, SeekFrom};

/// Byte length of the packed GPS record inside an indirect block.
const GPS_RECORD_LEN: usize = 44;

/// Index table entries start after an 8-byte table header.
const INDEX_TABLE_START: usize = 8;

/// Sentence scan starts after the block header and "GPS " marker.
const BLOCK_SCAN_START: usize = 12;

/// Decode every sentence reachable from a Novatek index table.
///
/// `region_data` is the raw bytes at the located region; `source` is the
/// containing file, needed because index entries address indirect blocks by
/// absolute file offset. Yields one `Option<String>` per table entry: `None`
/// for entries without a decodable GPS record (absent marker or no matching
/// signature window), which later become unresolved ticks.
pub fn decode_novatek_region<R: Read + Seek>(
    region_data: &[u8],
    source: &mut R,
) -> Result<Vec<Option<String>>> {
    if region_data.len() % 8 != 0 {
        return Err(DashcamError::Format(format!(
            "Novatek index table size {} is not a multiple of 8",
            region_data.len()
        )));
    }

    let mut sentences = Vec::new();
    let mut table = RegionStream::new(region_data);
    table.set_position(INDEX_TABLE_START);

    while table.remaining() >= 8 {
        let block_offset = table.read_u32_be()?;
        let block_size = table.read_u32_be()?;

        let mut block = vec![0u8; block_size as usize];
        source.seek(SeekFrom::Start(block_offset as u64))?;
        source.read_exact(&mut block)?;

        sentences.push(decode_block(&block)?);
    }

    Ok(sentences)
}

/// Decode one indirect block into a sentence, or `None` when the block holds
/// no GPS record.
fn decode_block(block: &[u8]) -> Result<Option<String>> {
    if block.len() < BLOCK_SCAN_START || &block[8..12] != b"GPS " {
        return Ok(None);
    }

    // The record is not at a fixed offset; scan for the hemisphere letters
    // that anchor it.
    let mut index = BLOCK_SCAN_START;
    while index + GPS_RECORD_LEN <= block.len() {
        let ns = block[index + 25];
        let ew = block[index + 26];

        if (ns == b'N' || ns == b'S') && (ew == b'E' || ew == b'W') {
            let sentence = decode_record(&block[index..index + GPS_RECORD_LEN])?;
            return Ok(Some(sentence));
        }

        index += 1;
    }

    Ok(None)
}

/// Unpack one 44-byte GPS record into sentence text.
///
/// Layout: six LE u32s (hour, minute, second, year-2000, month, day),
/// hemisphere letters at 25/26, three LE f32s at 28 (latitude, longitude,
/// speed) with coordinates in DDMM.MMMM form.
fn decode_record(record: &[u8]) -> Result<String> {
    let mut stream = RegionStream::new(record);

    let hour = stream.read_u32_le()?;
    let minute = stream.read_u32_le()?;
    let second = stream.read_u32_le()?;
    let year = stream.read_u32_le()? + 2000;
    let month = stream.read_u32_le()?;
    let day = stream.read_u32_le()?;

    let ns = record[25] as char;
    let ew = record[26] as char;

    stream.set_position(28);
    let latitude = dm_to_degrees(stream.read_f32_le()? as f64);
    let longitude = dm_to_degrees(stream.read_f32_le()? as f64);
    let speed = stream.read_f32_le()?;

    Ok(format!(
        "{:04}/{:02}/{:02} {:02}:{:02}:{:02} {}:{} {}:{} {} km/h",
        year, month, day, hour, minute, second, ns, latitude, ew, longitude, speed
    ))
}

//! Vantop GPS block decoding
//!
//! The LIGOGPSINFO region of a Vantop container is a run of fixed 132-byte
//! blocks, each carrying one telemetry sentence whose first 120 bytes are
//! obfuscated. The obfuscation is a byte-class scheme: the top three bits of
//! each input byte select how many following bytes participate and which
//! mask bits of the lead byte are folded into them.

use crate::error::{DashcamError, Result};

/// Blocks start after the region header.
const BLOCK_TABLE_START: usize = 28;

/// Full block length, including the clear tail.
const BLOCK_LEN: usize = 132;

/// Obfuscated prefix length within a block.
const OBFUSCATED_LEN: usize = 120;

/// Decoded bytes dropped from the front of each block.
const HEADER_LEN: usize = 4;

/// Decode every sentence in a located Vantop region.
///
/// Yields one sentence per 132-byte block. A trailing block shorter than 132
/// bytes means the located size disagrees with the layout the firmware
/// writes, which is fatal.
pub fn decode_vantop_region(region_data: &[u8]) -> Result<Vec<String>> {
    let mut sentences = Vec::new();

    if region_data.len() <= BLOCK_TABLE_START {
        return Ok(sentences);
    }

    for block in region_data[BLOCK_TABLE_START..].chunks(BLOCK_LEN) {
        if block.len() < BLOCK_LEN {
            return Err(DashcamError::Format(format!(
                "truncated Vantop GPS block ({} of {} bytes)",
                block.len(),
                BLOCK_LEN
            )));
        }

        sentences.push(deobfuscate_block(block)?);
    }

    Ok(sentences)
}

/// Deobfuscate one block into sentence text.
///
/// Walks the 120-byte obfuscated prefix with the byte-class state machine,
/// drops the 4-byte decoded header and maps the remaining bytes straight to
/// chars (the firmware emits an 8-bit charset, not UTF-8).
pub fn deobfuscate_block(block: &[u8]) -> Result<String> {
    // classes read up to 4 bytes past the last opcode position
    if block.len() < OBFUSCATED_LEN + 4 {
        return Err(DashcamError::Format(format!(
            "Vantop block too short to deobfuscate ({} bytes)",
            block.len()
        )));
    }

    let mut output: Vec<u8> = Vec::with_capacity(OBFUSCATED_LEN);
    let mut index = 0;

    while index < OBFUSCATED_LEN {
        let byte = block[index];

        match byte & 0xE0 {
            0x00 => {
                output.push((byte & 0x13) | block[index + 1]);
                index += 2;
            }
            0x40 => {
                output.push(0x20);
                output.push(((byte & 0x01) | block[index + 1]) ^ 0x20);
                output.push(((byte & 0x06) | block[index + 2]) ^ 0x20);
                output.push(((byte & 0x18) | block[index + 3]) ^ 0x20);
                index += 4;
            }
            0x60 => {
                output.push(((byte & 0x03) | block[index + 1]) ^ 0x20);
                output.push(0x20);
                output.push(((byte & 0x04) | block[index + 2]) ^ 0x20);
                output.push(((byte & 0x18) | block[index + 3]) ^ 0x20);
                index += 4;
            }
            0x80 => {
                output.push(((byte & 0x03) | block[index + 1]) ^ 0x20);
                output.push(((byte & 0x0C) | block[index + 2]) ^ 0x20);
                output.push(0x20);
                output.push(((byte & 0x10) | block[index + 3]) ^ 0x20);
                index += 4;
            }
            0xA0 => {
                output.push(((byte & 0x01) | block[index + 1]) ^ 0x20);
                output.push(((byte & 0x06) | block[index + 2]) ^ 0x20);
                output.push(((byte & 0x18) | block[index + 3]) ^ 0x20);
                output.push(0x20);
                index += 4;
            }
            class_bits => {
                if byte & 0xC0 == 0 {
                    // the firmware encoder never emits this class; the
                    // layout assumption has failed
                    return Err(DashcamError::Format(format!(
                        "unknown obfuscation byte {:02X} (class {:02X})",
                        byte, class_bits
                    )));
                }

                output.push(((byte & 0x01) | block[index + 1]) ^ 0x20);
                output.push(((byte & 0x02) | block[index + 2]) ^ 0x20);
                output.push(((byte & 0x0C) | block[index + 3]) ^ 0x20);
                output.push(
                    ((byte | (!block[index + 4] & 0xEF)) & 0x30) | (block[index + 4] & 0xDF),
                );
                index += 5;
            }
        }
    }

    Ok(output[HEADER_LEN..].iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of the class-0x00 rule: every plaintext byte becomes the pair
    /// (0x00, byte), which the decoder emits unchanged. 60 pairs fill the
    /// 120-byte obfuscated prefix exactly.
    pub(crate) fn obfuscate_block(header: &[u8; 4], sentence: &str) -> Vec<u8> {
        let mut plaintext: Vec<u8> = header.to_vec();
        plaintext.extend(sentence.bytes());
        assert!(plaintext.len() <= OBFUSCATED_LEN / 2);
        plaintext.resize(OBFUSCATED_LEN / 2, b' ');

        let mut block = Vec::with_capacity(BLOCK_LEN);
        for byte in plaintext {
            block.push(0x00);
            block.push(byte);
        }
        block.resize(BLOCK_LEN, 0);
        block
    }

    pub(crate) fn synthetic_region(sentences: &[&str]) -> Vec<u8> {
        let mut region = vec![0u8; BLOCK_TABLE_START];
        for sentence in sentences {
            region.extend(obfuscate_block(b"LIGO", sentence));
        }
        region
    }

    #[test]
    fn test_roundtrip_class_zero() {
        let sentence = "2021/07/15 12:34:56 N:52.5 E:13.25 10.0 km/h";
        let block = obfuscate_block(b"HDR0", sentence);
        let decoded = deobfuscate_block(&block).unwrap();
        assert_eq!(decoded.trim_end(), sentence);
        assert_eq!(decoded.len(), OBFUSCATED_LEN / 2 - HEADER_LEN);
    }

    #[test]
    fn test_class_0x40_emits_leading_space() {
        let mut block = vec![0u8; BLOCK_LEN];
        block[0] = 0x40;
        block[1] = 0x41;
        block[2] = 0x42;
        block[3] = 0x43;
        // remaining opcodes stay class 0x00 and decode to NULs
        let decoded = deobfuscate_block(&block).unwrap();
        // first four outputs (0x20 'a' 'b' 'c') are the dropped header
        assert!(decoded.starts_with('\0'));

        // shift the class-0x40 group past the header to observe it
        let mut block = vec![0u8; BLOCK_LEN];
        block[8] = 0x40;
        block[9] = 0x41;
        block[10] = 0x42;
        block[11] = 0x43;
        let decoded = deobfuscate_block(&block).unwrap();
        assert_eq!(&decoded[0..4], " abc");
    }

    #[test]
    fn test_catch_all_class_decodes_five_bytes() {
        let mut block = vec![0u8; BLOCK_LEN];
        block[8] = 0xC0;
        block[9] = 0x41;
        block[10] = 0x42;
        block[11] = 0x44;
        block[12] = 0x48;
        let decoded = deobfuscate_block(&block).unwrap();
        assert_eq!(&decoded[0..4], "abdh");
    }

    #[test]
    fn test_unknown_class_is_fatal() {
        let mut block = vec![0u8; BLOCK_LEN];
        block[0] = 0x20;
        assert!(matches!(
            deobfuscate_block(&block),
            Err(DashcamError::Format(_))
        ));
    }

    #[test]
    fn test_truncated_region_block_is_fatal() {
        let mut region = synthetic_region(&["x"]);
        region.truncate(region.len() - 1);
        assert!(matches!(
            decode_vantop_region(&region),
            Err(DashcamError::Format(_))
        ));
    }

    #[test]
    fn test_region_decode() {
        let region = synthetic_region(&[
            "2021/07/15 12:34:56 N:52.0 E:13.0 10.0 km/h",
            "2021/07/15 12:34:57 N:52.1 E:13.1 11.0 km/h",
        ]);
        let sentences = decode_vantop_region(&region).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[0].trim_end(),
            "2021/07/15 12:34:56 N:52.0 E:13.0 10.0 km/h"
        );
    }

    #[test]
    fn test_header_only_region_is_empty() {
        let region = vec![0u8; BLOCK_TABLE_START];
        assert!(decode_vantop_region(&region).unwrap().is_empty());
    }
}

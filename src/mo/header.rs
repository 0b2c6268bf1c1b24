// src/mo/header.rs — fixed MO header (28 bytes, LE)
//
// u32 magic                   = 0x950412de
// u32 revision                (passed through unexamined)
// u32 count                   N
// u32 original_table_offset   O
// u32 translated_table_offset T
// u32 hash_size               S
// u32 hash_offset             H
//
// Only the magic is validated; everything else is taken as-is.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use std::io::{Read, Write};

use crate::consts::{HEADER_SIZE, MO_MAGIC};
use crate::error::{MoError, Result};

const OFF_MAGIC: usize = 0;
const OFF_REVISION: usize = 4;
const OFF_COUNT: usize = 8;
const OFF_ORIG_TABLE: usize = 12;
const OFF_TRANS_TABLE: usize = 16;
const OFF_HASH_SIZE: usize = 20;
const OFF_HASH_OFFSET: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoHeader {
    pub magic: u32,
    pub revision: u32,
    pub count: u32,
    pub original_table_offset: u32,
    pub translated_table_offset: u32,
    pub hash_size: u32,
    pub hash_offset: u32,
}

impl MoHeader {
    /// Parse the header from the first 28 bytes of `bytes`.
    ///
    /// The magic is checked as soon as 4 bytes are available, so a short
    /// non-MO file reports `InvalidMagic` rather than `TruncatedFile`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() >= 4 {
            let magic = LittleEndian::read_u32(&bytes[OFF_MAGIC..OFF_MAGIC + 4]);
            if magic != MO_MAGIC {
                return Err(MoError::InvalidMagic { found: magic });
            }
        }
        if bytes.len() < HEADER_SIZE as usize {
            return Err(MoError::TruncatedFile {
                what: format!("header ({} of {} bytes)", bytes.len(), HEADER_SIZE),
                offset: 0,
            });
        }

        Ok(Self {
            magic: MO_MAGIC,
            revision: LittleEndian::read_u32(&bytes[OFF_REVISION..OFF_REVISION + 4]),
            count: LittleEndian::read_u32(&bytes[OFF_COUNT..OFF_COUNT + 4]),
            original_table_offset: LittleEndian::read_u32(&bytes[OFF_ORIG_TABLE..OFF_ORIG_TABLE + 4]),
            translated_table_offset: LittleEndian::read_u32(
                &bytes[OFF_TRANS_TABLE..OFF_TRANS_TABLE + 4],
            ),
            hash_size: LittleEndian::read_u32(&bytes[OFF_HASH_SIZE..OFF_HASH_SIZE + 4]),
            hash_offset: LittleEndian::read_u32(&bytes[OFF_HASH_OFFSET..OFF_HASH_OFFSET + 4]),
        })
    }

    /// Read and parse the header from the current position (expected: offset 0).
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut buf = Vec::with_capacity(HEADER_SIZE as usize);
        r.take(HEADER_SIZE as u64)
            .read_to_end(&mut buf)
            .map_err(|e| MoError::from_read(e, "header", 0))?;
        Self::parse(&buf)
    }

    /// Serialize into exactly 28 bytes. The stored magic is ignored: the
    /// constant is always written.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut out = [0u8; HEADER_SIZE as usize];
        LittleEndian::write_u32(&mut out[OFF_MAGIC..OFF_MAGIC + 4], MO_MAGIC);
        LittleEndian::write_u32(&mut out[OFF_REVISION..OFF_REVISION + 4], self.revision);
        LittleEndian::write_u32(&mut out[OFF_COUNT..OFF_COUNT + 4], self.count);
        LittleEndian::write_u32(
            &mut out[OFF_ORIG_TABLE..OFF_ORIG_TABLE + 4],
            self.original_table_offset,
        );
        LittleEndian::write_u32(
            &mut out[OFF_TRANS_TABLE..OFF_TRANS_TABLE + 4],
            self.translated_table_offset,
        );
        LittleEndian::write_u32(&mut out[OFF_HASH_SIZE..OFF_HASH_SIZE + 4], self.hash_size);
        LittleEndian::write_u32(&mut out[OFF_HASH_OFFSET..OFF_HASH_OFFSET + 4], self.hash_offset);
        out
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.to_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MoHeader {
        MoHeader {
            magic: MO_MAGIC,
            revision: 0,
            count: 2,
            original_table_offset: 28,
            translated_table_offset: 44,
            hash_size: 5,
            hash_offset: 60,
        }
    }

    #[test]
    fn header_bytes_layout() {
        let b = sample().to_bytes();
        assert_eq!(b.len(), 28);
        assert_eq!(&b[0..4], &[0xde, 0x12, 0x04, 0x95]);
        assert_eq!(LittleEndian::read_u32(&b[8..12]), 2);
        assert_eq!(LittleEndian::read_u32(&b[24..28]), 60);

        let back = MoHeader::parse(&b).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn revision_passes_through() {
        let mut h = sample();
        h.revision = 0x0001_0002;
        let back = MoHeader::parse(&h.to_bytes()).unwrap();
        assert_eq!(back.revision, 0x0001_0002);
    }

    #[test]
    fn bad_magic_rejected_first() {
        let mut b = sample().to_bytes();
        b[0] = 0x00;
        match MoHeader::parse(&b) {
            Err(MoError::InvalidMagic { found }) => assert_eq!(found & 0xff, 0),
            other => panic!("unexpected {other:?}"),
        }

        // short and wrong: magic wins
        assert!(matches!(
            MoHeader::parse(b"abcdefgh"),
            Err(MoError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn big_endian_magic_is_not_supported() {
        let mut b = sample().to_bytes();
        byteorder::BigEndian::write_u32(&mut b[0..4], MO_MAGIC);
        assert!(matches!(
            MoHeader::parse(&b),
            Err(MoError::InvalidMagic { found: 0xde120495 })
        ));
    }

    #[test]
    fn short_header_is_truncated() {
        let b = sample().to_bytes();
        assert!(matches!(
            MoHeader::parse(&b[..20]),
            Err(MoError::TruncatedFile { offset: 0, .. })
        ));

        let mut r = std::io::Cursor::new(b[..10].to_vec());
        assert!(matches!(
            MoHeader::read_from(&mut r),
            Err(MoError::TruncatedFile { .. })
        ));
    }
}

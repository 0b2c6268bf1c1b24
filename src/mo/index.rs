//! mo/index — the two parallel string tables: N × (length i32, offset u32), LE.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::consts::INDEX_ENTRY_SIZE;
use crate::error::{MoError, Result, StringTable};

/// Upper bound for the up-front allocation; a lying `count` must not OOM us
/// before the first short read surfaces.
const PREALLOC_MAX: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Byte length without the trailing NUL.
    pub length: i32,
    pub offset: u32,
}

/// Seek to `at_offset` and read `count` entries in ascending index order.
pub fn parse_table<R: Read + Seek>(
    r: &mut R,
    at_offset: u32,
    count: u32,
    table: StringTable,
) -> Result<Vec<IndexEntry>> {
    r.seek(SeekFrom::Start(at_offset as u64))?;

    let mut out = Vec::with_capacity((count as usize).min(PREALLOC_MAX));
    for i in 0..count {
        let pos = at_offset as u64 + i as u64 * INDEX_ENTRY_SIZE as u64;
        let what = || format!("{} table entry #{}", table, i);
        let length = r
            .read_i32::<LittleEndian>()
            .map_err(|e| MoError::from_read(e, what(), pos))?;
        let offset = r
            .read_u32::<LittleEndian>()
            .map_err(|e| MoError::from_read(e, what(), pos + 4))?;
        out.push(IndexEntry { length, offset });
    }
    Ok(out)
}

/// Serialize entries as consecutive 8-byte pairs.
pub fn serialize_table(entries: &[IndexEntry]) -> Vec<u8> {
    let mut out = Vec::with_capacity(entries.len() * INDEX_ENTRY_SIZE as usize);
    // Vec<u8> writes are infallible
    let _ = write_table(&mut out, entries);
    out
}

pub fn write_table<W: Write>(w: &mut W, entries: &[IndexEntry]) -> Result<()> {
    for e in entries {
        w.write_i32::<LittleEndian>(e.length)?;
        w.write_u32::<LittleEndian>(e.offset)?;
    }
    Ok(())
}

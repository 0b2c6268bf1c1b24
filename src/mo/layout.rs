//! mo/layout — recompute every offset of a catalog before writing.
//!
//! Resulting file order (always):
//!   [header 28][orig table N*8][trans table N*8][hash S*4][originals\0...][translations\0...]
//!
//! String offsets come from one running accumulator threaded through two
//! ordered passes: originals first (starting at data_start), then
//! translations continuing where the originals ended. Each string consumes
//! length + 1 bytes (NUL).

use crate::catalog::Catalog;
use crate::consts::{HASH_ENTRY_SIZE, HEADER_SIZE, INDEX_ENTRY_SIZE, MO_MAGIC, ORIGINAL_TABLE_OFFSET};
use crate::error::{MoError, Result};
use crate::mo::header::MoHeader;
use crate::mo::index::IndexEntry;
use crate::mo::strings::encoded_len;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub header: MoHeader,
    pub data_start: u32,
    pub originals: Vec<IndexEntry>,
    pub translations: Vec<IndexEntry>,
    /// Total file size in bytes.
    pub file_len: u64,
}

fn fit_u32(v: u64, what: &str) -> Result<u32> {
    u32::try_from(v).map_err(|_| MoError::LayoutOverflow {
        what: format!("{} ({})", what, v),
    })
}

/// Advance `cursor` over one string and return its table row.
fn place(cursor: &mut u64, s: &str) -> Result<IndexEntry> {
    let length = encoded_len(s)?;
    let offset = fit_u32(*cursor, "string offset")?;
    *cursor += length as u64 + 1;
    Ok(IndexEntry { length, offset })
}

impl Layout {
    pub fn compute(catalog: &Catalog) -> Result<Self> {
        let n = catalog.count() as u64;
        let s = catalog.hash_size() as u64;

        let translated_table_offset =
            fit_u32(HEADER_SIZE as u64 + n * INDEX_ENTRY_SIZE as u64, "translated table offset")?;
        let hash_offset =
            fit_u32(HEADER_SIZE as u64 + n * INDEX_ENTRY_SIZE as u64 * 2, "hash table offset")?;
        let data_start = fit_u32(hash_offset as u64 + s * HASH_ENTRY_SIZE as u64, "string data start")?;

        let mut cursor = data_start as u64;

        let mut originals = Vec::with_capacity(n as usize);
        for e in catalog.iter() {
            originals.push(place(&mut cursor, &e.original)?);
        }

        let mut translations = Vec::with_capacity(n as usize);
        for e in catalog.iter() {
            translations.push(place(&mut cursor, &e.translated)?);
        }

        // the last string's offset fits u32; its end may sit exactly past it
        let file_len = cursor;

        let header = MoHeader {
            magic: MO_MAGIC,
            revision: catalog.revision(),
            count: catalog.count(),
            original_table_offset: ORIGINAL_TABLE_OFFSET,
            translated_table_offset,
            hash_size: catalog.hash_size(),
            hash_offset,
        };

        log::debug!(
            "layout: N={} O={} T={} S={} H={} data_start={} file_len={}",
            header.count,
            header.original_table_offset,
            header.translated_table_offset,
            header.hash_size,
            header.hash_offset,
            data_start,
            file_len
        );

        Ok(Self {
            header,
            data_start,
            originals,
            translations,
            file_len,
        })
    }
}

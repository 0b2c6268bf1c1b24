//! mo/reader — MO file -> Catalog.

use log::{debug, info};
use std::fs::OpenOptions;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::catalog::{Catalog, Entry};
use crate::consts::HASH_ENTRY_SIZE;
use crate::error::{MoError, Result, StringTable};
use crate::mo::header::MoHeader;
use crate::mo::index::parse_table;
use crate::mo::strings::read_string;

/// Open and parse an MO file. Nothing is returned on any failure.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let f = OpenOptions::new().read(true).open(path)?;
    let mut r = BufReader::new(f);
    let catalog = load_from(&mut r)?;
    info!(
        "loaded {}: {} entries, revision {}, hash_size {}",
        path.display(),
        catalog.count(),
        catalog.revision(),
        catalog.hash_size()
    );
    Ok(catalog)
}

/// Parse an MO image from any seekable reader.
pub fn load_from<R: Read + Seek>(r: &mut R) -> Result<Catalog> {
    r.seek(SeekFrom::Start(0))?;
    let h = MoHeader::read_from(r)?;
    debug!(
        "header: revision={} N={} O={} T={} S={} H={}",
        h.revision,
        h.count,
        h.original_table_offset,
        h.translated_table_offset,
        h.hash_size,
        h.hash_offset
    );

    let originals = parse_table(r, h.original_table_offset, h.count, StringTable::Original)?;
    let translations = parse_table(r, h.translated_table_offset, h.count, StringTable::Translated)?;

    let hash_table = read_hash_table(r, h.hash_offset, h.hash_size)?;

    let mut entries = Vec::with_capacity(originals.len());
    for (i, (o, t)) in originals.iter().zip(translations.iter()).enumerate() {
        let index = i as u32;
        let original = read_string(r, o.offset, o.length, StringTable::Original, index)?;
        let translated = read_string(r, t.offset, t.length, StringTable::Translated, index)?;
        entries.push(Entry {
            index,
            original,
            translated,
        });
    }

    Ok(Catalog::from_parts(h.revision, hash_table, entries))
}

/// Raw `hash_size * 4` bytes at `hash_offset`, verbatim.
fn read_hash_table<R: Read + Seek>(r: &mut R, hash_offset: u32, hash_size: u32) -> Result<Vec<u8>> {
    let len = hash_size as u64 * HASH_ENTRY_SIZE as u64;
    if len == 0 {
        return Ok(Vec::new());
    }
    r.seek(SeekFrom::Start(hash_offset as u64))?;
    let mut buf = Vec::new();
    r.take(len)
        .read_to_end(&mut buf)
        .map_err(|e| MoError::from_read(e, "hash table", hash_offset as u64))?;
    if (buf.len() as u64) < len {
        return Err(MoError::TruncatedFile {
            what: format!("hash table ({} of {} bytes)", buf.len(), len),
            offset: hash_offset as u64,
        });
    }
    Ok(buf)
}

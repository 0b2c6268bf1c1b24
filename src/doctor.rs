//! doctor — read-only structural check of an MO file.
//!
//! Semantics:
//! - The whole file is read into memory; nothing is written.
//! - A bad magic (or a file shorter than the header) is an error, not an issue.
//! - Index/hash tables that run past EOF are issues; strings of such a table
//!   are not inspected further.
//! - Per string: negative length, out of bounds, missing NUL terminator,
//!   invalid UTF-8.
//! - `canonical` = the file is byte-identical to what `save` would write for
//!   the same catalog (only evaluated when there are no issues).
//!
//! Output is a `DoctorReport` (serde-serializable for --json).

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;

use crate::consts::{HASH_ENTRY_SIZE, INDEX_ENTRY_SIZE, STRING_TERMINATOR};
use crate::error::{Result, StringTable};
use crate::mo::header::MoHeader;
use crate::mo::{load_from, to_bytes};

/// Stop collecting details past this many issues (the total is still counted).
const MAX_REPORTED_ISSUES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorIssue {
    pub table: Option<StringTable>,
    pub index: Option<u32>,
    pub offset: u64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub path: String,
    pub file_len: u64,
    pub header: MoHeader,
    pub strings_checked: u64,
    pub issues_total: usize,
    pub issues: Vec<DoctorIssue>,
    pub canonical: bool,
}

impl DoctorReport {
    pub fn is_ok(&self) -> bool {
        self.issues_total == 0
    }

    fn push(&mut self, issue: DoctorIssue) {
        self.issues_total += 1;
        if self.issues.len() < MAX_REPORTED_ISSUES {
            self.issues.push(issue);
        }
    }
}

pub fn check_file<P: AsRef<Path>>(path: P) -> Result<DoctorReport> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let mut rep = check_bytes(&bytes)?;
    rep.path = path.display().to_string();
    Ok(rep)
}

/// Check an in-memory MO image.
pub fn check_bytes(bytes: &[u8]) -> Result<DoctorReport> {
    let header = MoHeader::parse(bytes)?;
    let file_len = bytes.len() as u64;

    let mut rep = DoctorReport {
        path: String::new(),
        file_len,
        header,
        strings_checked: 0,
        issues_total: 0,
        issues: Vec::new(),
        canonical: false,
    };

    for (table, at) in [
        (StringTable::Original, header.original_table_offset),
        (StringTable::Translated, header.translated_table_offset),
    ] {
        let end = at as u64 + header.count as u64 * INDEX_ENTRY_SIZE as u64;
        if end > file_len {
            rep.push(DoctorIssue {
                table: Some(table),
                index: None,
                offset: at as u64,
                message: format!("{} table ends at {} past EOF ({})", table, end, file_len),
            });
            continue;
        }
        for i in 0..header.count {
            let pos = at as usize + i as usize * INDEX_ENTRY_SIZE as usize;
            let length = LittleEndian::read_i32(&bytes[pos..pos + 4]);
            let offset = LittleEndian::read_u32(&bytes[pos + 4..pos + 8]);
            check_string(&mut rep, bytes, table, i, length, offset);
        }
    }

    let hash_end = header.hash_offset as u64 + header.hash_size as u64 * HASH_ENTRY_SIZE as u64;
    if hash_end > file_len {
        rep.push(DoctorIssue {
            table: None,
            index: None,
            offset: header.hash_offset as u64,
            message: format!("hash table ends at {} past EOF ({})", hash_end, file_len),
        });
    }

    if rep.is_ok() {
        let catalog = load_from(&mut Cursor::new(bytes))?;
        rep.canonical = to_bytes(&catalog)? == bytes;
    }

    debug!(
        "doctor: {} strings, {} issues, canonical={}",
        rep.strings_checked, rep.issues_total, rep.canonical
    );
    Ok(rep)
}

fn check_string(
    rep: &mut DoctorReport,
    bytes: &[u8],
    table: StringTable,
    index: u32,
    length: i32,
    offset: u32,
) {
    rep.strings_checked += 1;
    let issue = |message: String| DoctorIssue {
        table: Some(table),
        index: Some(index),
        offset: offset as u64,
        message,
    };

    if length < 0 {
        rep.push(issue(format!("negative length {}", length)));
        return;
    }
    let start = offset as u64;
    let end = start + length as u64;
    if end >= bytes.len() as u64 {
        rep.push(issue(format!(
            "string [{}..{}] plus NUL runs past EOF ({})",
            start,
            end,
            bytes.len()
        )));
        return;
    }
    let (start, end) = (start as usize, end as usize);
    if bytes[end] != STRING_TERMINATOR {
        rep.push(issue(format!("missing NUL terminator at {}", end)));
    }
    if let Err(e) = std::str::from_utf8(&bytes[start..end]) {
        rep.push(issue(format!("invalid UTF-8: {}", e)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::MoError;

    fn image() -> Vec<u8> {
        to_bytes(&Catalog::from_pairs([("Hello", "Bonjour"), ("Bye", "Au revoir")])).unwrap()
    }

    #[test]
    fn clean_canonical_file() {
        let rep = check_bytes(&image()).unwrap();
        assert!(rep.is_ok(), "{:?}", rep.issues);
        assert!(rep.canonical);
        assert_eq!(rep.strings_checked, 4);
    }

    #[test]
    fn missing_terminator() {
        let mut b = image();
        // NUL after "Hello" at 60..65
        b[65] = b'!';
        let rep = check_bytes(&b).unwrap();
        assert_eq!(rep.issues_total, 1);
        assert_eq!(rep.issues[0].table, Some(StringTable::Original));
        assert_eq!(rep.issues[0].index, Some(0));
        assert!(!rep.canonical);
    }

    #[test]
    fn bad_utf8_and_truncation() {
        let mut b = image();
        b[70] = 0xff; // first byte of "Bonjour"
        let rep = check_bytes(&b).unwrap();
        assert!(rep.issues[0].message.contains("UTF-8"));

        let b = image();
        let rep = check_bytes(&b[..80]).unwrap();
        // "Au revoir" no longer fits
        assert_eq!(rep.issues_total, 1);
        assert_eq!(rep.issues[0].table, Some(StringTable::Translated));
        assert_eq!(rep.issues[0].index, Some(1));
    }

    #[test]
    fn bad_magic_is_an_error() {
        let mut b = image();
        b[3] = 0;
        assert!(matches!(check_bytes(&b), Err(MoError::InvalidMagic { .. })));
    }

    #[test]
    fn table_past_eof() {
        let mut b = image();
        // N = 1000
        LittleEndian::write_u32(&mut b[8..12], 1000);
        let rep = check_bytes(&b).unwrap();
        assert!(rep.issues_total >= 2);
        assert!(rep.issues[0].message.contains("past EOF"));
        assert!(rep.issues[0].index.is_none());
    }
}

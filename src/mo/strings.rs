//! mo/strings — (offset, length) -> String on read, UTF-8 bytes + NUL on write.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::consts::STRING_TERMINATOR;
use crate::error::{MoError, Result, StringTable};

/// Read exactly `length` bytes at `offset` and decode them as strict UTF-8.
/// The terminating NUL is not read.
pub fn read_string<R: Read + Seek>(
    r: &mut R,
    offset: u32,
    length: i32,
    table: StringTable,
    index: u32,
) -> Result<String> {
    if length < 0 {
        return Err(MoError::InvalidLength {
            table,
            index,
            length,
        });
    }
    let len = length as u64;

    r.seek(SeekFrom::Start(offset as u64))?;
    let mut buf = Vec::with_capacity((length as usize).min(64 * 1024));
    r.take(len)
        .read_to_end(&mut buf)
        .map_err(|e| MoError::from_read(e, format!("{} string #{}", table, index), offset as u64))?;
    if (buf.len() as u64) < len {
        return Err(MoError::TruncatedFile {
            what: format!(
                "{} string #{} ({} of {} bytes)",
                table,
                index,
                buf.len(),
                len
            ),
            offset: offset as u64,
        });
    }

    String::from_utf8(buf).map_err(|source| MoError::InvalidEncoding {
        table,
        index,
        source,
    })
}

/// UTF-8 bytes of `s`, without terminator.
#[inline]
pub fn encode_string(s: &str) -> &[u8] {
    s.as_bytes()
}

/// On-disk length field for `s` (bytes, not chars).
pub fn encoded_len(s: &str) -> Result<i32> {
    i32::try_from(encode_string(s).len()).map_err(|_| MoError::LayoutOverflow {
        what: format!("string of {} bytes", s.len()),
    })
}

/// Write the UTF-8 bytes of `s` followed by one NUL.
pub fn write_string<W: Write>(w: &mut W, s: &str) -> Result<()> {
    w.write_all(encode_string(s))?;
    w.write_all(&[STRING_TERMINATOR])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn multibyte_length_is_bytes() {
        assert_eq!(encoded_len("cafe").unwrap(), 4);
        assert_eq!(encoded_len("café").unwrap(), 5);
        assert_eq!(encoded_len("日本語").unwrap(), 9);
        assert_eq!(encoded_len("").unwrap(), 0);
    }

    #[test]
    fn write_appends_single_nul() {
        let mut out = Vec::new();
        write_string(&mut out, "café").unwrap();
        assert_eq!(out, b"caf\xc3\xa9\0");
    }

    #[test]
    fn read_at_offset() {
        let data = b"xxHello\0Bonjour\0".to_vec();
        let mut r = Cursor::new(data);
        let s = read_string(&mut r, 2, 5, StringTable::Original, 0).unwrap();
        assert_eq!(s, "Hello");
        let s = read_string(&mut r, 8, 7, StringTable::Translated, 0).unwrap();
        assert_eq!(s, "Bonjour");
        let s = read_string(&mut r, 7, 0, StringTable::Translated, 1).unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn invalid_utf8_fails_loudly() {
        let mut r = Cursor::new(vec![b'a', 0xff, 0xfe, 0]);
        match read_string(&mut r, 0, 3, StringTable::Translated, 4) {
            Err(MoError::InvalidEncoding { table, index, .. }) => {
                assert_eq!(table, StringTable::Translated);
                assert_eq!(index, 4);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn past_end_is_truncated() {
        let mut r = Cursor::new(b"abc".to_vec());
        assert!(matches!(
            read_string(&mut r, 1, 10, StringTable::Original, 0),
            Err(MoError::TruncatedFile { offset: 1, .. })
        ));
        assert!(matches!(
            read_string(&mut r, 100, 1, StringTable::Original, 0),
            Err(MoError::TruncatedFile { offset: 100, .. })
        ));
    }

    #[test]
    fn negative_length_rejected() {
        let mut r = Cursor::new(b"abc".to_vec());
        assert!(matches!(
            read_string(&mut r, 0, -2, StringTable::Original, 3),
            Err(MoError::InvalidLength { length: -2, index: 3, .. })
        ));
    }
}

//! Error type of the MO codec and the catalog API.

use std::fmt;
use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Which of the two parallel string tables a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringTable {
    Original,
    Translated,
}

impl fmt::Display for StringTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringTable::Original => f.write_str("original"),
            StringTable::Translated => f.write_str("translated"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MoError {
    /// Any OS-level I/O failure that is not a short read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The first header field is not 0x950412de.
    #[error("not a GNU MO file: bad magic {found:#010x} (expected 0x950412de)")]
    InvalidMagic { found: u32 },

    /// A read ran past the end of the available data.
    #[error("truncated file: cannot read {what} at offset {offset}")]
    TruncatedFile { what: String, offset: u64 },

    /// String bytes are not valid UTF-8.
    #[error("invalid UTF-8 in {table} string #{index}: {source}")]
    InvalidEncoding {
        table: StringTable,
        index: u32,
        #[source]
        source: FromUtf8Error,
    },

    /// A length field is negative.
    #[error("invalid length {length} for {table} string #{index}")]
    InvalidLength {
        table: StringTable,
        index: u32,
        length: i32,
    },

    #[error("entry index {index} out of range (count {count})")]
    IndexOutOfRange { index: u32, count: u32 },

    /// The recomputed layout does not fit the format's 32-bit fields.
    #[error("layout overflow: {what} does not fit in 32 bits")]
    LayoutOverflow { what: String },
}

impl MoError {
    /// Maps a short read onto `TruncatedFile`, everything else onto `Io`.
    pub(crate) fn from_read(e: io::Error, what: impl Into<String>, offset: u64) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            MoError::TruncatedFile {
                what: what.into(),
                offset,
            }
        } else {
            MoError::Io(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, MoError>;

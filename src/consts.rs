//! Constants of the GNU MO format (little-endian layout) and env names.

// -------- Header --------
pub const MO_MAGIC: u32 = 0x950412de;
/// 7 × u32: magic, revision, N, O, T, S, H.
pub const HEADER_SIZE: u32 = 28;

// -------- Tables --------
/// (length i32, offset u32) per string.
pub const INDEX_ENTRY_SIZE: u32 = 8;
pub const HASH_ENTRY_SIZE: u32 = 4;

/// Original table always starts right after the header on write.
pub const ORIGINAL_TABLE_OFFSET: u32 = HEADER_SIZE;

// -------- Strings --------
pub const STRING_TERMINATOR: u8 = 0;

// -------- Env --------
pub const ENV_ATOMIC_SAVE: &str = "MOEDIT_ATOMIC_SAVE";
pub const ENV_FSYNC: &str = "MOEDIT_FSYNC";
pub const ENV_EXPORT_SEP: &str = "MOEDIT_EXPORT_SEP";

pub const DEFAULT_EXPORT_SEP: char = '\t';
pub const TMP_SUFFIX: &str = "tmp";

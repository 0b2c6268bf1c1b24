//! mo — GNU gettext compiled catalog codec (little-endian, magic 0x950412de).
//!
//! Layout read by `load` (offsets come from the header, any order):
//!
//! ```text
//!   0  magic | revision | N | O | T | S | H
//!   O  N × (length i32, offset u32)   originals
//!   T  N × (length i32, offset u32)   translations
//!   H  S × 4 bytes                    hash table (opaque)
//!      NUL-terminated UTF-8 strings
//! ```
//!
//! Layout written by `save` is always canonical: O=28, T=28+8N, H=28+16N,
//! then all originals, then all translations. The hash table is copied
//! through verbatim and is NOT rebuilt when strings change.

pub mod header;
pub mod index;
pub mod layout;
pub mod reader;
pub mod strings;
pub mod writer;

use std::path::Path;

use crate::catalog::Catalog;
use crate::config::MoConfig;
use crate::error::Result;

pub use header::MoHeader;
pub use index::{parse_table, serialize_table, IndexEntry};
pub use layout::Layout;
pub use reader::{load, load_from};
pub use strings::{encode_string, read_string};
pub use writer::{save, save_atomic, save_to, to_bytes};

/// Save honoring `cfg`: atomic staging when enabled, otherwise a direct
/// write with optional fsync.
pub fn save_with_config<P: AsRef<Path>>(catalog: &Catalog, path: P, cfg: &MoConfig) -> Result<()> {
    if cfg.atomic_save {
        save_atomic(catalog, path)
    } else {
        writer::save_with(catalog, path.as_ref(), cfg.fsync)?;
        if cfg.fsync {
            writer::fsync_dir(path.as_ref())?;
        }
        Ok(())
    }
}

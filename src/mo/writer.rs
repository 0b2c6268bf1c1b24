//! mo/writer — Catalog -> MO file, single linear pass in file order.
//!
//! `save` truncates and writes the destination directly; a failure midway
//! leaves it undefined. `save_atomic` stages to `<path>.tmp` and renames.

use log::{info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::consts::TMP_SUFFIX;
use crate::error::Result;
use crate::mo::index::write_table;
use crate::mo::layout::Layout;
use crate::mo::strings::write_string;

/// Write `catalog` to `path` (created or truncated).
pub fn save<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    save_with(catalog, path.as_ref(), false)
}

/// Write to `<path>.tmp`, fsync, rename over `path`, fsync the parent (unix).
pub fn save_atomic<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp = tmp_path(path);
    let _ = fs::remove_file(&tmp);

    if let Err(e) = save_with(catalog, &tmp, true) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)?;
    let _ = fsync_dir(path);
    Ok(())
}

pub(crate) fn save_with(catalog: &Catalog, path: &Path, sync: bool) -> Result<()> {
    // compute first: nothing is written for a layout that cannot be encoded
    let layout = Layout::compute(catalog)?;

    let f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    let mut w = BufWriter::new(f);
    write_with_layout(catalog, &layout, &mut w)?;
    let f = w.into_inner().map_err(|e| e.into_error())?;
    if sync {
        f.sync_all()?;
    }

    if catalog.is_modified() && catalog.hash_size() > 0 {
        warn!(
            "{}: hash table ({} slots) carried through unchanged; it no longer matches the edited strings",
            path.display(),
            catalog.hash_size()
        );
    }
    info!(
        "saved {}: {} entries, {} bytes",
        path.display(),
        catalog.count(),
        layout.file_len
    );
    Ok(())
}

/// Serialize into any writer.
pub fn save_to<W: Write>(catalog: &Catalog, w: &mut W) -> Result<()> {
    let layout = Layout::compute(catalog)?;
    write_with_layout(catalog, &layout, w)
}

/// Serialize into an in-memory image.
pub fn to_bytes(catalog: &Catalog) -> Result<Vec<u8>> {
    let layout = Layout::compute(catalog)?;
    let mut out = Vec::with_capacity(layout.file_len as usize);
    write_with_layout(catalog, &layout, &mut out)?;
    Ok(out)
}

fn write_with_layout<W: Write>(catalog: &Catalog, layout: &Layout, w: &mut W) -> Result<()> {
    layout.header.write_to(w)?;
    write_table(w, &layout.originals)?;
    write_table(w, &layout.translations)?;
    w.write_all(catalog.hash_table())?;
    for e in catalog.iter() {
        write_string(w, &e.original)?;
    }
    for e in catalog.iter() {
        write_string(w, &e.translated)?;
    }
    w.flush()?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}

#[cfg(unix)]
pub(crate) fn fsync_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
pub(crate) fn fsync_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

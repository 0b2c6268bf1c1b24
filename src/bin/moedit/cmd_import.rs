use anyhow::{Context, Result};
use std::path::PathBuf;

use moedit::export::import_file;
use moedit::MoConfig;

use super::util::{open_catalog, print_json, save_catalog, sep_arg};

pub fn exec(
    path: PathBuf,
    from: PathBuf,
    sep: Option<String>,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let cfg = MoConfig::from_env();
    let sep = sep_arg(sep, &cfg)?;

    let mut catalog = open_catalog(&path)?;
    let report =
        import_file(&mut catalog, &from, sep).with_context(|| format!("import {}", from.display()))?;

    let saved = if catalog.is_modified() || out.is_some() {
        Some(save_catalog(&catalog, &path, out.as_deref(), &cfg)?)
    } else {
        None
    };

    if json {
        return print_json(&report);
    }
    println!(
        "rows: {}, updated: {}, unchanged: {}, failed: {}",
        report.rows, report.updated, report.unchanged, report.failed
    );
    match saved {
        Some(p) => println!("saved to {}", p.display()),
        None => println!("nothing changed, not saved"),
    }
    Ok(())
}

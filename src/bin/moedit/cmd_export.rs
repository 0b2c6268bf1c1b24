use anyhow::{Context, Result};
use std::path::PathBuf;

use moedit::export::export_file;
use moedit::MoConfig;

use super::util::{open_catalog, sep_arg};

pub fn exec(path: PathBuf, out: PathBuf, sep: Option<String>) -> Result<()> {
    let cfg = MoConfig::from_env();
    let sep = sep_arg(sep, &cfg)?;

    let catalog = open_catalog(&path)?;
    let rows = export_file(&catalog, &out, sep).with_context(|| format!("export to {}", out.display()))?;
    println!("exported {} rows to {}", rows, out.display());
    Ok(())
}

use anyhow::Result;
use log::info;
use std::path::PathBuf;

use moedit::MoConfig;

use super::util::{open_catalog, preview, save_catalog, text_arg};

pub fn exec(
    path: PathBuf,
    index: u32,
    text: Option<String>,
    text_file: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let cfg = MoConfig::from_env();
    let text = text_arg(text, text_file)?;

    let mut catalog = open_catalog(&path)?;
    let before = catalog.get(index)?.translated.clone();
    catalog.set(index, text)?;

    if !catalog.is_modified() && out.is_none() {
        println!("#{} unchanged, nothing to save", index);
        return Ok(());
    }

    let target = save_catalog(&catalog, &path, out.as_deref(), &cfg)?;
    info!("set #{} in {}", index, target.display());
    println!(
        "#{}: '{}' -> '{}' (saved to {})",
        index,
        preview(&before, 40),
        preview(&catalog.get(index)?.translated, 40),
        target.display()
    );
    Ok(())
}

use anyhow::Result;
use std::path::PathBuf;

use super::util::{open_catalog, print_json};

pub fn exec(path: PathBuf, index: u32, json: bool) -> Result<()> {
    let catalog = open_catalog(&path)?;
    let e = catalog.get(index)?;
    if json {
        return print_json(e);
    }
    println!("index:      {}", e.index);
    println!("original:   {}", e.original);
    println!("translated: {}", e.translated);
    Ok(())
}

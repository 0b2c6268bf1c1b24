use anyhow::Result;
use std::path::PathBuf;

use moedit::Entry;

use super::util::{open_catalog, preview, print_json};

pub fn exec(path: PathBuf, offset: u32, limit: Option<u32>, json: bool) -> Result<()> {
    let catalog = open_catalog(&path)?;
    let take = limit.map(|n| n as usize).unwrap_or(usize::MAX);
    let window: Vec<&Entry> = catalog.iter().skip(offset as usize).take(take).collect();

    if json {
        return print_json(&window);
    }

    if window.is_empty() {
        println!("(no entries)");
        return Ok(());
    }
    for e in window {
        println!(
            "#{:<6} {}  =>  {}",
            e.index,
            preview(&e.original, 60),
            preview(&e.translated, 60)
        );
    }
    Ok(())
}

use anyhow::Result;
use std::path::PathBuf;

use moedit::search::{find_all, find_next, find_prev};
use moedit::Entry;

use super::util::{open_catalog, preview, print_json};

pub fn exec(
    path: PathBuf,
    query: String,
    from: Option<u32>,
    backward: bool,
    all: bool,
    json: bool,
) -> Result<()> {
    let catalog = open_catalog(&path)?;

    let hits: Vec<u32> = if all {
        find_all(&catalog, &query)
    } else if backward {
        find_prev(&catalog, &query, from).into_iter().collect()
    } else {
        find_next(&catalog, &query, from).into_iter().collect()
    };

    let mut entries: Vec<&Entry> = Vec::with_capacity(hits.len());
    for i in hits {
        entries.push(catalog.get(i)?);
    }

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        let dir = if backward { "previous" } else { "further" };
        if all {
            println!("No instances of \"{}\" found", query);
        } else {
            println!("No {} instances of \"{}\" found", dir, query);
        }
        return Ok(());
    }
    for e in entries {
        println!(
            "#{:<6} {}  =>  {}",
            e.index,
            preview(&e.original, 60),
            preview(&e.translated, 60)
        );
    }
    Ok(())
}

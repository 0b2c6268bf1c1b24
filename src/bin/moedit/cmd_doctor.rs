use anyhow::{Context, Result};
use std::path::PathBuf;

use moedit::doctor::check_file;

use super::util::print_json;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let rep = check_file(&path).with_context(|| format!("doctor {}", path.display()))?;
    if json {
        return print_json(&rep);
    }

    println!("doctor: {}", rep.path);
    println!("  file_len        = {}", rep.file_len);
    println!("  strings         = {}", rep.header.count);
    println!("  strings_checked = {}", rep.strings_checked);
    println!("  canonical       = {}", rep.canonical);
    if rep.is_ok() {
        println!("  status          = OK");
        return Ok(());
    }
    println!("  issues          = {}", rep.issues_total);
    for i in &rep.issues {
        let loc = match (i.table, i.index) {
            (Some(t), Some(n)) => format!("{} #{}", t, n),
            (Some(t), None) => format!("{} table", t),
            _ => "hash table".to_string(),
        };
        println!("    - [{} @ {}] {}", loc, i.offset, i.message);
    }
    if rep.issues.len() < rep.issues_total {
        println!("    ... {} more", rep.issues_total - rep.issues.len());
    }
    Ok(())
}

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use moedit::MoHeader;

use super::util::{open_catalog, print_json};

#[derive(Serialize)]
struct Info {
    path: String,
    file_len: u64,
    header: MoHeader,
    untranslated: u32,
}

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let f = File::open(&path).with_context(|| format!("open {}", path.display()))?;
    let file_len = f.metadata()?.len();
    let header = MoHeader::read_from(&mut BufReader::new(f))
        .with_context(|| format!("read header of {}", path.display()))?;

    let catalog = open_catalog(&path)?;
    let untranslated = catalog.iter().filter(|e| e.translated.is_empty()).count() as u32;

    if json {
        return print_json(&Info {
            path: path.display().to_string(),
            file_len,
            header,
            untranslated,
        });
    }

    println!("file:            {} ({} B)", path.display(), file_len);
    println!("magic:           {:#010x}", header.magic);
    println!("revision:        {}", header.revision);
    println!("strings (N):     {}", header.count);
    println!("orig table (O):  {}", header.original_table_offset);
    println!("trans table (T): {}", header.translated_table_offset);
    println!("hash size (S):   {}", header.hash_size);
    println!("hash offset (H): {}", header.hash_offset);
    println!("untranslated:    {}", untranslated);
    Ok(())
}

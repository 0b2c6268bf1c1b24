use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use moedit::config::parse_sep;
use moedit::{save_with_config, Catalog, MoConfig};

/// One-line preview: line breaks shown as ⏎, long text cut with an ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (i, c) in s.chars().enumerate() {
        if i == max_chars {
            out.push('…');
            break;
        }
        match c {
            '\n' => out.push('⏎'),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

pub fn print_json<T: Serialize + ?Sized>(v: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(v).context("serialize json")?);
    Ok(())
}

/// `\n`, `\t`, `\\` → LF, TAB, backslash; any other backslash stays literal.
pub fn decode_text_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match it.peek() {
            Some('n') => {
                out.push('\n');
                it.next();
            }
            Some('t') => {
                out.push('\t');
                it.next();
            }
            Some('\\') => {
                out.push('\\');
                it.next();
            }
            _ => out.push('\\'),
        }
    }
    out
}

/// --text (escapes decoded) / --text-file (verbatim, CRLF -> LF).
pub fn text_arg(text: Option<String>, text_file: Option<PathBuf>) -> Result<String> {
    if let Some(p) = text_file {
        let raw = std::fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        return Ok(raw.replace("\r\n", "\n"));
    }
    text.map(|t| decode_text_escapes(&t))
        .ok_or_else(|| anyhow!("either --text or --text-file is required"))
}

pub fn sep_arg(sep: Option<String>, cfg: &MoConfig) -> Result<char> {
    match sep {
        Some(s) => parse_sep(&s).ok_or_else(|| anyhow!("unusable separator {:?}", s)),
        None => Ok(cfg.export_sep),
    }
}

/// Save to `out`, or back to `path` honoring the config.
pub fn save_catalog(catalog: &Catalog, path: &Path, out: Option<&Path>, cfg: &MoConfig) -> Result<PathBuf> {
    let target = out.unwrap_or(path);
    save_with_config(catalog, target, cfg).with_context(|| format!("save {}", target.display()))?;
    Ok(target.to_path_buf())
}

pub fn open_catalog(path: &Path) -> Result<Catalog> {
    Catalog::open(path).with_context(|| format!("open {}", path.display()))
}

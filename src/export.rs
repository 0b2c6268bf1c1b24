//! export — line-oriented delimited text format for bulk editing.
//!
//! One row per entry:
//!
//! ```text
//! <line_count><sep><index><sep><original><sep><translated line 1>
//! <translated line 2>
//! ...
//! <translated line line_count>
//! ```
//!
//! `line_count` = number of '\n'-separated lines of the translation (>= 1).
//! Continuation lines are literal. The original column is escaped
//! (`\\`, `\n`, `\r`, `\t`, `\<sep>`) so the first line always splits into 4
//! fields; the translation is never escaped. Import matches rows by index
//! and never touches originals.

use log::{debug, warn};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rows recognised (well-formed or not).
    pub rows: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Malformed rows and rows whose index is not in the catalog.
    pub failed: usize,
}

pub fn escape_field(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == sep => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

pub fn unescape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match it.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Split on the first unescaped `sep`.
fn split_escaped(s: &str, sep: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            return Some((&s[..i], &s[i + c.len_utf8()..]));
        }
    }
    None
}

/// Write every entry; returns the number of rows.
pub fn export<W: Write>(catalog: &Catalog, w: &mut W, sep: char) -> Result<usize> {
    for e in catalog.iter() {
        let line_count = e.translated.split('\n').count();
        writeln!(
            w,
            "{}{sep}{}{sep}{}{sep}{}",
            line_count,
            e.index,
            escape_field(&e.original, sep),
            e.translated,
            sep = sep
        )?;
    }
    w.flush()?;
    Ok(catalog.count() as usize)
}

pub fn export_file<P: AsRef<Path>>(catalog: &Catalog, path: P, sep: char) -> Result<usize> {
    let f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path.as_ref())?;
    let mut w = BufWriter::new(f);
    let n = export(catalog, &mut w, sep)?;
    debug!("exported {} rows to {}", n, path.as_ref().display());
    Ok(n)
}

struct RowHead<'a> {
    line_count: usize,
    index: u32,
    original: &'a str,
    first: &'a str,
}

fn parse_head(line: &str, sep: char) -> Option<RowHead<'_>> {
    let (count, rest) = line.split_once(sep)?;
    let (index, rest) = rest.split_once(sep)?;
    let (original, first) = split_escaped(rest, sep)?;
    let line_count = count.trim().parse::<usize>().ok().filter(|n| *n >= 1)?;
    let index = index.trim().parse::<u32>().ok()?;
    Some(RowHead {
        line_count,
        index,
        original,
        first,
    })
}

/// Physical lines with only the trailing '\n' removed; a '\r' before it
/// belongs to the translation and is kept.
struct RawLines<R> {
    r: R,
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = String::new();
        match self.r.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with('\n') {
                    buf.pop();
                }
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Apply rows to `catalog` via `Catalog::set`. Blank lines between rows are
/// skipped. I/O errors abort; bad rows are only counted.
pub fn import<R: BufRead>(catalog: &mut Catalog, r: R, sep: char) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    let mut lines = RawLines { r }.enumerate();

    while let Some((lineno, line)) = lines.next() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        report.rows += 1;

        let head = match parse_head(&line, sep) {
            Some(h) => h,
            None => {
                warn!("line {}: malformed row header", lineno + 1);
                report.failed += 1;
                continue;
            }
        };

        let mut text = head.first.to_string();
        let mut complete = true;
        for _ in 1..head.line_count {
            match lines.next() {
                Some((_, cont)) => {
                    text.push('\n');
                    text.push_str(&cont?);
                }
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            warn!(
                "line {}: row {} expects {} lines but the input ended",
                lineno + 1,
                head.index,
                head.line_count
            );
            report.failed += 1;
            break;
        }

        let current = match catalog.get(head.index) {
            Ok(e) => e,
            Err(_) => {
                warn!(
                    "line {}: index {} is not in the catalog (count {})",
                    lineno + 1,
                    head.index,
                    catalog.count()
                );
                report.failed += 1;
                continue;
            }
        };
        if current.original != unescape_field(head.original) {
            debug!("line {}: original of #{} differs from the catalog", lineno + 1, head.index);
        }

        if current.translated == text {
            report.unchanged += 1;
        } else {
            catalog.set(head.index, text)?;
            report.updated += 1;
        }
    }

    Ok(report)
}

pub fn import_file<P: AsRef<Path>>(catalog: &mut Catalog, path: P, sep: char) -> Result<ImportReport> {
    let f = File::open(path.as_ref())?;
    let report = import(catalog, BufReader::new(f), sep)?;
    debug!("imported {}: {:?}", path.as_ref().display(), report);
    Ok(report)
}

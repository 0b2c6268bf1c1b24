use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// moedit: inspect and edit GNU gettext .mo catalogs
#[derive(Parser, Debug)]
#[command(name = "moedit", version, about = "GNU .mo catalog editor", arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print header fields and counts
    Info {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List entries (optionally a window of them)
    List {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print one entry by index
    Get {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        index: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replace the translation of one entry and save
    ///
    /// Example:
    ///   moedit set --path de.mo --index 12 --text "Datei öffnen"
    ///   moedit set --path de.mo --index 12 --text-file t.txt --out de.new.mo
    Set {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        index: u32,
        /// New translation; \n, \t and \\ are decoded. Ignored if --text-file is set.
        #[arg(long)]
        text: Option<String>,
        /// Read the new translation from a file (CRLF is normalized to LF)
        #[arg(long)]
        text_file: Option<PathBuf>,
        /// Write to another file instead of saving in place
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Case-insensitive search over originals and translations
    Search {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        query: String,
        /// Start after (or, with --backward, before) this index
        #[arg(long)]
        from: Option<u32>,
        #[arg(long, default_value_t = false)]
        backward: bool,
        /// Print every match instead of the next one
        #[arg(long, default_value_t = false)]
        all: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Export entries to the delimited text format
    Export {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Separator (default: MOEDIT_EXPORT_SEP or TAB; "\t" accepted)
        #[arg(long)]
        sep: Option<String>,
    },
    /// Apply a delimited text file to the catalog and save
    Import {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        sep: Option<String>,
        /// Write to another file instead of saving in place
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Structural check (bounds, NUL terminators, UTF-8, canonical layout)
    Doctor {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod util;
mod cmd_info;
mod cmd_list;
mod cmd_get;
mod cmd_set;
mod cmd_search;
mod cmd_export;
mod cmd_import;
mod cmd_doctor;

fn init_logger() {
    // RUST_LOG overrides, e.g. RUST_LOG=debug moedit doctor --path de.mo
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Info { path, json } =>
            cmd_info::exec(path, json),

        cli::Cmd::List { path, offset, limit, json } =>
            cmd_list::exec(path, offset, limit, json),

        cli::Cmd::Get { path, index, json } =>
            cmd_get::exec(path, index, json),

        cli::Cmd::Set { path, index, text, text_file, out } =>
            cmd_set::exec(path, index, text, text_file, out),

        cli::Cmd::Search { path, query, from, backward, all, json } =>
            cmd_search::exec(path, query, from, backward, all, json),

        cli::Cmd::Export { path, out, sep } =>
            cmd_export::exec(path, out, sep),

        cli::Cmd::Import { path, from, sep, out, json } =>
            cmd_import::exec(path, from, sep, out, json),

        cli::Cmd::Doctor { path, json } =>
            cmd_doctor::exec(path, json),
    }
}

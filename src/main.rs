mod analyzer;
mod cli;
mod clipboard;
mod file_scanner;
mod report;
mod tree_builder;
mod tui;
mod utils;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // A clipboard holder is an early exit and must not parse the regular CLI.
    if clipboard::run_holder_if_requested()? {
        return Ok(());
    }

    #[cfg(debug_assertions)]
    init_debug_log();

    let cli_args = cli::Cli::parse();
    workflow::run_cjkcount(cli_args)
}

/// Appends DEBUG-level lines to `cjkcount-debug.log` in the temp dir; stdout
/// belongs to the TUI.
#[cfg(debug_assertions)]
fn init_debug_log() {
    use std::io::Write;

    let log_path = std::env::temp_dir().join("cjkcount-debug.log");
    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    else {
        return;
    };

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            let datetime = chrono::Local::now();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== cjkcount debug session started ===");
}

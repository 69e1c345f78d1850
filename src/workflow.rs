use crate::{analyzer, cli, clipboard, file_scanner, report, tree_builder, tui};
use anyhow::{Result, bail};
use std::path::Path;

// Counts a single file and prints the result without starting the TUI.
fn run_headless_mode(path: &Path, brief: bool, copy: bool) -> Result<()> {
    let stats = analyzer::analyze_file(path)?;

    let full_report = report::render_report(path, &stats);
    if brief {
        println!("{}", report::summary_line(&stats));
    } else {
        print!("{full_report}");
    }

    if copy {
        clipboard::copy_report(&full_report)?;
        println!("✅ Report copied to the clipboard.");
    }
    Ok(())
}

// Scans `root` for candidate files and lets the user count them one at a time.
fn run_interactive_mode(root: &Path, cli_args: &cli::Cli) -> Result<()> {
    let scan_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let type_filter = cli_args.type_filter();

    let entries = file_scanner::scan_files(&scan_root, &type_filter, cli_args.include_ignored)?;
    if entries.iter().all(|(_, is_dir)| *is_dir) {
        if type_filter.is_empty() {
            bail!("no files found under {}", scan_root.display());
        }
        bail!(
            "no .{} files found under {} (try --types or --all-files)",
            type_filter.join("/."),
            scan_root.display()
        );
    }

    let labels = tree_builder::build_tree_labels(&entries, &scan_root);
    let items = tui::prepare_picker_items(&entries, &labels, &scan_root);
    log::info!("picker opened on {} with {} entries", scan_root.display(), items.len());
    tui::run_picker(items)
}

pub fn run_cjkcount(cli_args: cli::Cli) -> Result<()> {
    if cli_args.path.is_dir() {
        run_interactive_mode(&cli_args.path, &cli_args)
    } else {
        run_headless_mode(&cli_args.path, cli_args.brief, cli_args.copy)
    }
}

use anyhow::Result;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Collects countable files under `root` plus every directory leading to one.
///
/// The result is sorted and always starts with `root` itself. An empty
/// `types_filter` keeps every file.
pub fn scan_files(
    root: &Path,
    types_filter: &[String],
    include_ignored: bool,
) -> Result<Vec<(PathBuf, bool)>> {
    let mut walker = WalkBuilder::new(root);
    if include_ignored {
        walker.git_ignore(false).ignore(false);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for result in walker.build() {
        let dirent = match result {
            Ok(v) => v,
            Err(e) => {
                eprintln!("⚠️  Warning during scan: {}", e);
                log::warn!("scan error under {}: {}", root.display(), e);
                continue;
            }
        };
        if !dirent.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = dirent.into_path();
        if matches_types(&path, types_filter) {
            files.push(path);
        }
    }

    let mut dirs: BTreeSet<PathBuf> = BTreeSet::new();
    dirs.insert(root.to_path_buf());
    for file in &files {
        for ancestor in file.ancestors().skip(1) {
            if !ancestor.starts_with(root) || !dirs.insert(ancestor.to_path_buf()) {
                break;
            }
        }
    }

    let mut collected: Vec<(PathBuf, bool)> = dirs
        .into_iter()
        .map(|dir| (dir, true))
        .chain(files.into_iter().map(|file| (file, false)))
        .collect();
    collected.sort_by(|(a, _), (b, _)| a.cmp(b));
    collected.dedup_by(|(a, _), (b, _)| a == b);

    log::debug!(
        "scanned {}: {} entries",
        root.display(),
        collected.len()
    );
    Ok(collected)
}

fn matches_types(path: &Path, types_filter: &[String]) -> bool {
    types_filter.is_empty()
        || types_filter.iter().any(|ext| {
            path.extension()
                .and_then(OsStr::to_str)
                .is_some_and(|actual| actual.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn relative(root: &Path, entries: &[(PathBuf, bool)]) -> Vec<(String, bool)> {
        entries
            .iter()
            .map(|(p, d)| {
                let rel = p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
                (rel, *d)
            })
            .collect()
    }

    #[test]
    fn keeps_matching_files_and_their_directories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "a.txt");
        touch(root, "docs/b.TXT");
        touch(root, "docs/c.md");
        touch(root, "img/d.png");

        let entries = scan_files(root, &["txt".to_string()], false).unwrap();
        assert_eq!(
            relative(root, &entries),
            vec![
                ("".to_string(), true),
                ("a.txt".to_string(), false),
                ("docs".to_string(), true),
                ("docs/b.TXT".to_string(), false),
            ]
        );
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "a.txt");
        touch(root, "img/d.png");

        let entries = scan_files(root, &[], false).unwrap();
        let files: Vec<_> = entries.iter().filter(|(_, d)| !d).collect();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn empty_root_still_lists_root() {
        let tmp = TempDir::new().unwrap();
        let entries = scan_files(tmp.path(), &["txt".to_string()], false).unwrap();
        assert_eq!(entries, vec![(tmp.path().to_path_buf(), true)]);
    }
}

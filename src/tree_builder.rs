use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tree-style labels (`├─ `, `└─ `, `│  `) for a picker list.
///
/// * `entries` **must** be sorted so that every directory precedes its contents.
/// * Each element is `(path, is_dir)`; the entry equal to `root` is labelled `./`.
pub fn build_tree_labels(entries: &[(PathBuf, bool)], root: &Path) -> Vec<String> {
    // parent -> index of its last listed child
    let mut last_child: HashMap<&Path, usize> = HashMap::new();
    for (idx, (path, _)) in entries.iter().enumerate() {
        if path != root {
            if let Some(parent) = path.parent() {
                last_child.insert(parent, idx);
            }
        }
    }

    // open_branches[d] is true while the ancestor at depth d+1 still has siblings below it
    let mut open_branches: Vec<bool> = Vec::new();
    let mut labels = Vec::with_capacity(entries.len());

    for (idx, (path, is_dir)) in entries.iter().enumerate() {
        let Ok(rel) = path.strip_prefix(root) else {
            labels.push(path.display().to_string());
            continue;
        };
        let depth = rel.components().count();
        if depth == 0 {
            labels.push("./".to_string());
            continue;
        }

        let is_last = path
            .parent()
            .and_then(|parent| last_child.get(parent))
            .is_some_and(|&last| last == idx);
        open_branches.truncate(depth - 1);

        let mut label: String = open_branches
            .iter()
            .map(|&open| if open { "│  " } else { "   " })
            .collect();
        label.push_str(if is_last { "└─ " } else { "├─ " });
        label.push_str(&rel.file_name().unwrap_or_default().to_string_lossy());
        if *is_dir {
            label.push('/');
            open_branches.push(!is_last);
        }
        labels.push(label);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(root: &Path, rels: &[(&str, bool)]) -> Vec<(PathBuf, bool)> {
        rels.iter()
            .map(|(rel, is_dir)| {
                let path = if rel.is_empty() {
                    root.to_path_buf()
                } else {
                    root.join(rel)
                };
                (path, *is_dir)
            })
            .collect()
    }

    #[test]
    fn draws_nested_tree() {
        let root = Path::new("/books");
        let list = entries(
            root,
            &[
                ("", true),
                ("a.txt", false),
                ("novels", true),
                ("novels/one.txt", false),
                ("novels/two", true),
                ("novels/two/deep.txt", false),
                ("z.txt", false),
            ],
        );
        let labels = build_tree_labels(&list, root);
        assert_eq!(
            labels.join("\n"),
            "\
./
├─ a.txt
├─ novels/
│  ├─ one.txt
│  └─ two/
│     └─ deep.txt
└─ z.txt"
        );
    }

    #[test]
    fn last_directory_does_not_draw_rail() {
        let root = Path::new("/r");
        let list = entries(root, &[("", true), ("d", true), ("d/f.txt", false)]);
        assert_eq!(build_tree_labels(&list, root), vec!["./", "└─ d/", "   └─ f.txt"]);
    }
}

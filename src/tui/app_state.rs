use crate::analyzer::FileStats;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PickerItem {
    pub path: PathBuf,
    pub display_text: String,
    pub is_dir: bool,
    pub is_expanded: bool,
    pub children_indices: Vec<usize>,
    pub parent_index: Option<usize>,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    Normal,
    Filtering,
}

/// What the right-hand panels currently show.
#[derive(Debug, Clone)]
pub(super) enum StatsView {
    Empty,
    Loaded(Box<LoadedFile>),
    /// The last count failed; no numbers are shown.
    Failed,
}

#[derive(Debug, Clone)]
pub(super) struct LoadedFile {
    pub path: PathBuf,
    pub stats: FileStats,
    pub report: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

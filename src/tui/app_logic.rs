use super::app_state::{AppMode, LoadedFile, PickerItem, StatsView, StatusLine};
use crate::{analyzer, clipboard, report};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const IDLE_STATUS: &str = "Select a file and press Enter to count it";
const PREVIEW_SCROLL_STEP: u16 = 5;

pub struct TuiApp {
    pub(super) items: Vec<PickerItem>,
    pub(super) current_selection_idx: usize,
    pub(super) scroll_offset: usize,
    pub(super) quit: bool,
    pub(super) mode: AppMode,
    pub(super) filter_input: String,
    pub(super) filter_cursor_pos: usize,
    pub(super) list_viewport_height: usize,
    pub(super) view: StatsView,
    pub(super) status: StatusLine,
    pub(super) preview_scroll: u16,
    copier: fn(&str) -> Result<()>,
}

impl TuiApp {
    pub fn new(items: Vec<PickerItem>) -> Self {
        TuiApp {
            items,
            current_selection_idx: 0,
            scroll_offset: 0,
            quit: false,
            mode: AppMode::Normal,
            filter_input: String::new(),
            filter_cursor_pos: 0,
            list_viewport_height: 0, // set by ui_renderer on every frame
            view: StatsView::Empty,
            status: StatusLine::info(IDLE_STATUS),
            preview_scroll: 0,
            copier: clipboard::copy_report,
        }
    }

    pub(super) fn select_next_visible_item(&mut self) {
        self.move_selection_in_visible_list(1);
    }

    pub(super) fn select_previous_visible_item(&mut self) {
        self.move_selection_in_visible_list(-1);
    }

    fn move_selection_in_visible_list(&mut self, delta: i32) {
        let visible_indices = self.get_visible_item_indices();
        if visible_indices.is_empty() {
            return;
        }
        let new_pos = match visible_indices
            .iter()
            .position(|&idx| idx == self.current_selection_idx)
        {
            Some(pos) => (pos as i32 + delta).rem_euclid(visible_indices.len() as i32) as usize,
            None if delta > 0 => 0,
            None => visible_indices.len() - 1,
        };
        self.current_selection_idx = visible_indices[new_pos];
    }

    pub(super) fn selected_item(&self) -> Option<&PickerItem> {
        self.items.get(self.current_selection_idx)
    }

    /// Enter on a directory folds it; on a file it runs a count.
    pub(super) fn activate_current_item(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        if item.is_dir {
            self.toggle_expansion_and_adjust_selection();
        } else {
            let path = item.path.clone();
            self.count_file(&path);
        }
    }

    pub(super) fn count_file(&mut self, path: &Path) {
        self.preview_scroll = 0;
        match analyzer::read_document(path) {
            Ok(document) => {
                self.status = StatusLine::info(report::summary_line(&document.stats));
                self.view = StatsView::Loaded(Box::new(LoadedFile {
                    report: report::render_report(&document.path, &document.stats),
                    preview: report::preview(&document.text, report::PREVIEW_CHARS),
                    path: document.path,
                    stats: document.stats,
                }));
            }
            Err(e) => {
                log::warn!("count failed: {e}");
                self.status = StatusLine::error(format!("Error: {e}"));
                self.view = StatsView::Failed;
            }
        }
    }

    pub(super) fn copy_current_report(&mut self) {
        let StatsView::Loaded(loaded) = &self.view else {
            self.status = StatusLine::error("Nothing to copy yet: count a file first");
            return;
        };
        self.status = match (self.copier)(&loaded.report) {
            Ok(()) => StatusLine::info(format!(
                "Report for {} copied to the clipboard",
                loaded.path.display()
            )),
            Err(e) => StatusLine::error(format!("Clipboard error: {e}")),
        };
    }

    pub(super) fn scroll_preview(&mut self, down: bool) {
        self.preview_scroll = if down {
            self.preview_scroll.saturating_add(PREVIEW_SCROLL_STEP)
        } else {
            self.preview_scroll.saturating_sub(PREVIEW_SCROLL_STEP)
        };
    }

    pub(super) fn expand_all_directories(&mut self) {
        for item in self.items.iter_mut().filter(|item| item.is_dir) {
            item.is_expanded = true;
        }
        self.ensure_selection_is_visible();
    }

    /// Collapses everything except the root so its children stay listed.
    pub(super) fn collapse_all_directories(&mut self) {
        for item in self.items.iter_mut().filter(|item| item.is_dir) {
            item.is_expanded = item.parent_index.is_none();
        }
        self.ensure_selection_is_visible();
    }

    pub(super) fn get_visible_item_indices(&self) -> Vec<usize> {
        let lower_filter = self.filter_input.to_lowercase();
        (0..self.items.len())
            .filter(|&i| self.is_item_visible_recursive(i))
            .filter(|&i| {
                lower_filter.is_empty()
                    || self.item_matches_filter_or_has_matching_descendant(i, &lower_filter)
            })
            .collect()
    }

    fn is_item_visible_recursive(&self, item_idx: usize) -> bool {
        match self.items.get(item_idx).and_then(|item| item.parent_index) {
            None => item_idx < self.items.len(),
            Some(parent_idx) => {
                self.items.get(parent_idx).is_some_and(|p| p.is_expanded)
                    && self.is_item_visible_recursive(parent_idx)
            }
        }
    }

    fn item_matches_filter_or_has_matching_descendant(
        &self,
        item_idx: usize,
        lower_filter: &str,
    ) -> bool {
        let Some(item) = self.items.get(item_idx) else {
            return false;
        };
        let name = item
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        name.contains(lower_filter)
            || item.children_indices.iter().any(|&child_idx| {
                self.item_matches_filter_or_has_matching_descendant(child_idx, lower_filter)
            })
    }

    fn ensure_selection_is_valid_after_filter(&mut self) {
        let visible_indices = self.get_visible_item_indices();
        if let Some(&first) = visible_indices.first() {
            if !visible_indices.contains(&self.current_selection_idx) {
                self.current_selection_idx = first;
            }
        }
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn ensure_selection_is_visible_in_viewport(&mut self) {
        if self.list_viewport_height == 0 {
            return;
        }
        let visible_indices = self.get_visible_item_indices();
        let list_height = self.list_viewport_height;

        match visible_indices
            .iter()
            .position(|&idx| idx == self.current_selection_idx)
        {
            Some(pos) if pos < self.scroll_offset => self.scroll_offset = pos,
            Some(pos) if pos >= self.scroll_offset + list_height => {
                self.scroll_offset = pos + 1 - list_height;
            }
            Some(_) => {}
            None => {
                if let Some(&first) = visible_indices.first() {
                    self.current_selection_idx = first;
                }
                self.scroll_offset = 0;
            }
        }

        let max_offset = visible_indices.len().saturating_sub(list_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    pub(super) fn toggle_expansion_and_adjust_selection(&mut self) {
        if let Some(item) = self.items.get_mut(self.current_selection_idx) {
            if item.is_dir {
                item.is_expanded = !item.is_expanded;
                self.ensure_selection_is_visible();
            }
        }
    }

    /// Moves the selection up to the nearest visible ancestor when a fold hid it.
    pub(super) fn ensure_selection_is_visible(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let mut candidate_idx = self.current_selection_idx;
        while !self.is_item_visible_recursive(candidate_idx) {
            match self.items.get(candidate_idx).and_then(|item| item.parent_index) {
                Some(parent_idx) => candidate_idx = parent_idx,
                None => {
                    candidate_idx = self.get_visible_item_indices().first().copied().unwrap_or(0);
                    break;
                }
            }
        }
        self.current_selection_idx = candidate_idx;
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('/') => self.mode = AppMode::Filtering,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next_visible_item(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_visible_item(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_current_item(),
            KeyCode::Char('o') | KeyCode::Tab => self.toggle_expansion_and_adjust_selection(),
            KeyCode::Char('*') => self.expand_all_directories(),
            KeyCode::Char('-') => self.collapse_all_directories(),
            KeyCode::Char('c') => self.copy_current_report(),
            KeyCode::PageDown => self.scroll_preview(true),
            KeyCode::PageUp => self.scroll_preview(false),
            _ => {}
        }
    }

    pub(super) fn handle_filtering_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                self.ensure_selection_is_valid_after_filter();
            }
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.filter_input.clear();
                self.filter_cursor_pos = 0;
                self.ensure_selection_is_valid_after_filter();
            }
            KeyCode::Char(c) => {
                let byte_pos = self.filter_byte_pos();
                self.filter_input.insert(byte_pos, c);
                self.filter_cursor_pos += 1;
                self.ensure_selection_is_valid_after_filter();
            }
            KeyCode::Backspace if self.filter_cursor_pos > 0 => {
                self.filter_cursor_pos -= 1;
                let byte_pos = self.filter_byte_pos();
                self.filter_input.remove(byte_pos);
                self.ensure_selection_is_valid_after_filter();
            }
            KeyCode::Left => self.filter_cursor_pos = self.filter_cursor_pos.saturating_sub(1),
            KeyCode::Right if self.filter_cursor_pos < self.filter_input.chars().count() => {
                self.filter_cursor_pos += 1;
            }
            _ => {}
        }
    }

    // filter_cursor_pos counts chars; String::insert/remove want a byte offset
    pub(super) fn filter_byte_pos(&self) -> usize {
        self.filter_input
            .char_indices()
            .nth(self.filter_cursor_pos)
            .map_or(self.filter_input.len(), |(i, _)| i)
    }
}

/// Links scanned `(path, is_dir)` entries into a parent/child tree. Directories start expanded.
pub fn prepare_picker_items(
    entries: &[(PathBuf, bool)],
    display_labels: &[String],
    root_path: &Path,
) -> Vec<PickerItem> {
    let mut items: Vec<PickerItem> = entries
        .iter()
        .zip(display_labels)
        .map(|((path, is_dir), label)| PickerItem {
            path: path.clone(),
            display_text: label.clone(),
            is_dir: *is_dir,
            is_expanded: *is_dir,
            children_indices: Vec::new(),
            parent_index: None,
        })
        .collect();

    let path_to_idx: HashMap<PathBuf, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.path.clone(), i))
        .collect();

    for i in 0..items.len() {
        if items[i].path == root_path {
            continue;
        }
        let parent_idx = items[i]
            .path
            .parent()
            .and_then(|parent| path_to_idx.get(parent))
            .copied();
        if let Some(parent_idx) = parent_idx {
            if items[parent_idx].is_dir {
                items[i].parent_index = Some(parent_idx);
                items[parent_idx].children_indices.push(i);
            }
        }
    }
    items
}

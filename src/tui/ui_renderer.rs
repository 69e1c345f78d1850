use super::app_logic::TuiApp;
use super::app_state::{AppMode, StatsView};
use crate::utils::group_thousands;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const RESULTS_HEIGHT: u16 = 7;
const STAT_LABELS: [&str; 5] = [
    "Total characters:",
    "Chinese characters:",
    "Chinese share:",
    "File size:",
    "Encoding:",
];

fn draw_help_block(f: &mut Frame, area: Rect) {
    let help_lines = vec![
        Line::from("Arrows/jk: Nav | Enter: Count file / Fold dir | Tab/o: Fold | q/Esc: Quit"),
        Line::from("c: Copy report | PgUp/PgDn: Scroll preview | *: Expand All | -: Collapse All | /: Filter"),
    ];
    let help_paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("cjkcount - Chinese Character Counter"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_filter_input_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let filter_paragraph = Paragraph::new(format!("/{}", app.filter_input)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filter (Esc to cancel, Enter to apply)"),
    );
    f.render_widget(filter_paragraph, area);
    f.set_cursor_position((area.x + 2 + filter_cursor_column(app), area.y + 1));
}

/// Display columns taken by the filter text left of the cursor.
fn filter_cursor_column(app: &TuiApp) -> u16 {
    let typed = &app.filter_input[..app.filter_byte_pos()];
    u16::try_from(typed.width()).unwrap_or(u16::MAX)
}

fn draw_file_list_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_selection_is_visible_in_viewport();

    let visible_item_indices = app.get_visible_item_indices();
    let window_end = (app.scroll_offset + app.list_viewport_height).min(visible_item_indices.len());
    let window = visible_item_indices
        .get(app.scroll_offset..window_end)
        .unwrap_or(&[]);

    let list_items: Vec<ListItem> = window
        .iter()
        .map(|&idx| {
            let item = &app.items[idx];
            let fold_marker = match (item.is_dir, item.is_expanded) {
                (true, true) => "[-] ",
                (true, false) => "[+] ",
                (false, _) => "    ",
            };
            ListItem::new(format!("{fold_marker}{}", item.display_text))
        })
        .collect();

    let list_title = if !app.filter_input.is_empty() && app.mode == AppMode::Normal {
        format!("Files (Filter: '{}')", app.filter_input)
    } else {
        "Files".to_string()
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ListState::default();
    if let Some(pos) = window
        .iter()
        .position(|&idx| idx == app.current_selection_idx)
    {
        list_state.select(Some(pos));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state);
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label:<20}")),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn draw_results_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let lines: Vec<Line> = match &app.view {
        StatsView::Loaded(loaded) => {
            let stats = &loaded.stats;
            let values = [
                (group_thousands(stats.total_chars), Color::White),
                (group_thousands(stats.chinese_chars), Color::Blue),
                (stats.percentage_display(), Color::Green),
                (stats.formatted_size(), Color::White),
                (stats.encoding.to_string(), Color::White),
            ];
            STAT_LABELS
                .iter()
                .zip(values)
                .map(|(label, (value, color))| stat_line(label, value, color))
                .collect()
        }
        StatsView::Empty | StatsView::Failed => STAT_LABELS
            .iter()
            .map(|label| stat_line(label, "-".to_string(), Color::DarkGray))
            .collect(),
    };
    let results =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(results, area);
}

fn draw_details_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let text = match &app.view {
        StatsView::Loaded(loaded) => loaded.report.clone(),
        StatsView::Empty => "No file counted yet.".to_string(),
        StatsView::Failed => "The last count failed; see the status bar.".to_string(),
    };
    let details = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    f.render_widget(details, area);
}

fn draw_preview_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let (text, title) = match &app.view {
        StatsView::Loaded(loaded) => (
            loaded.preview.as_str(),
            format!("Preview: {}", loaded.path.display()),
        ),
        _ => ("", "Preview".to_string()),
    };
    let preview = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(preview, area);
}

fn draw_status_bar(f: &mut Frame, app: &TuiApp, area: Rect) {
    let style = if app.status.is_error {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default().fg(Color::Black).bg(Color::Gray)
    };
    f.render_widget(Paragraph::new(app.status.text.as_str()).style(style), area);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let filter_height = if app.mode == AppMode::Filtering { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(filter_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_help_block(frame, rows[0]);
    if app.mode == AppMode::Filtering {
        draw_filter_input_block(frame, app, rows[1]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2]);
    draw_file_list_block(frame, app, columns[0]);

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(RESULTS_HEIGHT),
            Constraint::Percentage(50),
            Constraint::Min(3),
        ])
        .split(columns[1]);
    draw_results_block(frame, app, panels[0]);
    draw_details_block(frame, app, panels[1]);
    draw_preview_block(frame, app, panels[2]);

    draw_status_bar(frame, app, rows[3]);
}

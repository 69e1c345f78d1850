use super::app_logic::TuiApp;
use super::app_state::AppMode;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Waits briefly for one terminal event and applies it. Resizes need no
/// handling beyond the redraw the loop does anyway.
pub(super) fn handle_events(app: &mut TuiApp) -> Result<()> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(());
    }
    match event::read()? {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            dispatch_key(app, key_event);
        }
        _ => {}
    }
    Ok(())
}

pub(super) fn dispatch_key(app: &mut TuiApp, key_event: KeyEvent) {
    // raw mode swallows SIGINT
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }
    match app.mode {
        AppMode::Normal => app.handle_normal_mode_input(key_event),
        AppMode::Filtering => app.handle_filtering_mode_input(key_event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = TuiApp::new(Vec::new());
        app.mode = AppMode::Filtering;
        dispatch_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.quit);
        assert!(app.filter_input.is_empty());
    }

    #[test]
    fn plain_c_in_filter_mode_is_typed() {
        let mut app = TuiApp::new(Vec::new());
        app.mode = AppMode::Filtering;
        dispatch_key(&mut app, KeyEvent::from(KeyCode::Char('c')));
        assert!(!app.quit);
        assert_eq!(app.filter_input, "c");
    }
}

mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use app_logic::prepare_picker_items;

pub use self::run_tui::run_picker;

// Terminal setup/teardown and the draw/event loop
mod run_tui {
    use super::app_logic::TuiApp;
    use super::app_state::PickerItem;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use anyhow::Result;
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    /// Runs the picker until the user quits. Counting happens inside the loop,
    /// so there is nothing to hand back.
    pub fn run_picker(items: Vec<PickerItem>) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let mut app = TuiApp::new(items);
        let mut terminal = init_terminal()?;

        let loop_result = (|| -> Result<()> {
            while !app.quit {
                terminal.draw(|frame| ui_frame(frame, &mut app))?;
                handle_events(&mut app)?;
            }
            Ok(())
        })();

        // restore before surfacing any loop error
        restore_terminal(terminal)?;
        loop_result
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor().map_err(Into::into)
    }
}

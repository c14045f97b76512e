//! Interactive terminal presenter (crossterm backend)

use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::{BoardView, Presenter};
use crate::input::{InputHandler, InputState};
use crate::sim::Snapshot;

pub struct TerminalPresenter {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: BoardView,
    input: InputHandler,
    restored: bool,
}

impl TerminalPresenter {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        match Self::open() {
            Ok(terminal) => Ok(Self {
                terminal,
                view: BoardView::new(),
                input: InputHandler::new(),
                restored: false,
            }),
            Err(e) => {
                let _ = disable_raw_mode();
                Err(e)
            }
        }
    }

    fn open() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut out = stdout();
        execute!(out, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let mut terminal = Terminal::new(CrosstermBackend::new(out)).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    /// Give the terminal back to the shell. Safe to call more than once.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Terminal restore failed: {e:#}");
        }
    }
}

impl Presenter for TerminalPresenter {
    fn poll_input(&mut self) -> Result<InputState> {
        let mut state = InputState::default();
        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                state.apply(self.input.handle_key_event(key));
            }
        }
        Ok(state)
    }

    fn present(&mut self, snapshot: &Snapshot<'_>, fps: Option<u32>) -> Result<()> {
        self.terminal
            .draw(|frame| self.view.render(frame, snapshot, fps))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

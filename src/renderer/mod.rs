//! Presentation boundary
//!
//! The game loop only talks to a [`Presenter`]: it asks for the keys pressed
//! since the last iteration and hands over a snapshot to show. The terminal
//! presenter draws with ratatui; the headless one draws nothing and runs
//! unpaced for scripted runs and tests.

pub mod board;
pub mod headless;
pub mod terminal;

pub use board::BoardView;
pub use headless::HeadlessPresenter;
pub use terminal::TerminalPresenter;

use anyhow::Result;

use crate::input::InputState;
use crate::sim::Snapshot;

pub trait Presenter {
    /// Drain pending input without blocking
    fn poll_input(&mut self) -> Result<InputState>;

    /// Show one frame
    fn present(&mut self, snapshot: &Snapshot<'_>, fps: Option<u32>) -> Result<()>;

    /// Whether the loop should sleep to hold the tick budget
    fn paced(&self) -> bool {
        true
    }
}

//! Presenter with no screen and no keyboard
//!
//! Runs the loop flat out. Input comes from an optional script, one entry per
//! iteration; once the script runs dry every iteration sees no keys.

use std::collections::VecDeque;

use anyhow::Result;

use super::Presenter;
use crate::input::InputState;
use crate::sim::Snapshot;

#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    script: VecDeque<InputState>,
    frames: u64,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            script: script.into_iter().collect(),
            frames: 0,
        }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for HeadlessPresenter {
    fn poll_input(&mut self) -> Result<InputState> {
        Ok(self.script.pop_front().unwrap_or_default())
    }

    fn present(&mut self, snapshot: &Snapshot<'_>, _fps: Option<u32>) -> Result<()> {
        self.frames += 1;
        if snapshot.outcome.is_some() {
            log::debug!("Final frame {} presented", self.frames);
        }
        Ok(())
    }

    fn paced(&self) -> bool {
        false
    }
}

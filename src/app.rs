//! Fixed-timestep game loop
//!
//! One iteration: poll input, run one simulation tick, play the cues it
//! produced, serve any post-death pause, present, then sleep off whatever is
//! left of the tick budget.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::audio::AudioManager;
use crate::input::InputState;
use crate::renderer::Presenter;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, Outcome, TickInput, tick};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Finished(Outcome),
    Quit,
    TickLimit,
}

const FPS_WINDOW: usize = 60;

/// Frame rate over the last `FPS_WINDOW` presented frames
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    fn record(&mut self, now: Instant) {
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest once the ring is full
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }
}

pub struct GameLoop {
    session: GameSession,
    audio: AudioManager,
    tick_budget: Duration,
    autopilot: bool,
    show_fps: bool,
    max_ticks: Option<u64>,
    fps: FpsCounter,
}

impl GameLoop {
    pub fn new(session: GameSession, audio: AudioManager, settings: &Settings) -> Self {
        Self {
            session,
            audio,
            tick_budget: settings.tick_budget(),
            autopilot: settings.demo,
            show_fps: settings.show_fps,
            max_ticks: None,
            fps: FpsCounter::default(),
        }
    }

    /// Stop after this many ticks even if nobody has won or lost
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run one tick with the given input and play its cues
    pub fn step(&mut self, input: &InputState) -> Vec<GameEvent> {
        let tick_input = TickInput {
            direction: input.direction,
            autopilot: self.autopilot,
        };
        let events = tick(&mut self.session, &tick_input);
        self.audio.handle_events(&events);
        events
    }

    /// Drive the session until it ends, the player quits or the tick limit hits
    pub fn run(&mut self, presenter: &mut dyn Presenter) -> Result<ExitReason> {
        let paced = presenter.paced();
        presenter.present(&self.session.snapshot(), self.fps_reading())?;

        loop {
            let started = Instant::now();

            let input = presenter.poll_input()?;
            if input.quit {
                log::info!("Quit requested after {} ticks", self.session.time_ticks);
                return Ok(ExitReason::Quit);
            }
            if self.max_ticks.is_some_and(|limit| self.session.time_ticks >= limit) {
                log::info!("Tick limit reached");
                return Ok(ExitReason::TickLimit);
            }

            self.step(&input);

            if let Some(pause) = self.session.take_pause() {
                log::debug!("Pausing {:?} after losing a life", pause);
                if paced {
                    thread::sleep(pause);
                }
            }

            self.fps.record(Instant::now());
            presenter.present(&self.session.snapshot(), self.fps_reading())?;

            if let Some(outcome) = self.session.outcome {
                return Ok(ExitReason::Finished(outcome));
            }

            if paced {
                if let Some(rest) = self.tick_budget.checked_sub(started.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }
    }

    fn fps_reading(&self) -> Option<u32> {
        self.show_fps.then_some(self.fps.fps)
    }
}

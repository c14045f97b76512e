//! Maze Chomp - A tile-maze arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, collisions, session state)
//! - `renderer`: Presentation boundary (terminal and headless presenters)
//! - `audio`: Procedural sound cues for game events
//! - `input`: Keyboard mapping
//! - `app`: Fixed-timestep game loop

pub mod app;
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::GameLoop;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep budget (~60 Hz)
    pub const TICK_BUDGET: Duration = Duration::from_millis(16);
    /// Real-time pause after losing a life
    pub const RESPAWN_PAUSE: Duration = Duration::from_secs(1);

    /// Board dimensions (cells)
    pub const MAP_COLS: usize = 19;
    pub const MAP_ROWS: usize = 21;
    /// Edge length of one tile in pixels
    pub const TILE_SIZE: i32 = 24;
    pub const HALF_TILE: i32 = TILE_SIZE / 2;
    /// Row where the horizontal bounds are suspended
    pub const TUNNEL_ROW: i32 = 10;

    /// Pixels per tick
    pub const AGENT_SPEED: i32 = 2;
    pub const ADVERSARY_SPEED: i32 = 1;

    /// Scoring
    pub const PELLET_SCORE: u64 = 10;
    pub const CLEAR_BONUS: u64 = 1000;
    pub const STARTING_LIVES: u32 = 3;

    /// Hitbox shrink on every side, so neighbours in adjacent tiles never touch
    pub const HITBOX_INSET: i32 = 4;

    /// Mouth animation: full cycle length and how long the mouth stays open
    pub const MOUTH_CYCLE_TICKS: u32 = 20;
    pub const MOUTH_OPEN_TICKS: u32 = 10;

    /// Number of ghosts in the classic layout
    pub const ADVERSARY_COUNT: usize = 4;
}

//! Game session state and core simulation types
//!
//! `GameSession` is the single owner of everything the simulation mutates:
//! the grid, the agent, the ghosts, score, lives and the RNG.

use std::time::Duration;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::adversary::{Adversary, AdversarySpawn, Rgb};
use super::agent::{Agent, Spawn};
use super::grid::{Cell, GridMap, Tile};
use super::motion::Direction;
use crate::consts::*;

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Things the presentation layer may want to react to (sound, messages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletEaten,
    Death,
    Won,
    Lost,
}

/// Board plus starting positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub grid: GridMap,
    pub agent: Spawn,
    pub adversaries: Vec<AdversarySpawn>,
}

impl Level {
    /// The compiled-in maze with its four ghosts
    pub fn classic() -> Self {
        let ghost = |col, row, dir, color| AdversarySpawn {
            spawn: Spawn::at(Cell::new(col, row), dir),
            color,
        };

        Self {
            grid: GridMap::classic(),
            agent: Spawn::at(Cell::new(9, 16), Direction::Right),
            adversaries: vec![
                ghost(9, 8, Direction::Left, Rgb::RED),
                ghost(9, 10, Direction::Right, Rgb::PINK),
                ghost(8, 10, Direction::Up, Rgb::CYAN),
                ghost(10, 10, Direction::Up, Rgb::ORANGE),
            ],
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::classic()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the ghost RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub grid: GridMap,
    pub agent: Agent,
    /// Ghosts, updated in index order every tick
    pub adversaries: Vec<Adversary>,
    pub agent_spawn: Spawn,
    pub adversary_spawns: Vec<AdversarySpawn>,
    pub score: u64,
    /// Always equal to `grid.pellet_count()`
    pub pellets_left: usize,
    pub lives: u32,
    /// Set once the session has ended
    pub outcome: Option<Outcome>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Real-time pause requested by life losses, not yet served by the loop
    pub(crate) pending_pause: Duration,
}

impl GameSession {
    /// Classic maze, ghosts seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_level(Level::classic(), seed)
    }

    pub fn with_level(level: Level, seed: u64) -> Self {
        let pellets_left = level.grid.pellet_count();
        let session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            agent: Agent::new(level.agent),
            adversaries: level.adversaries.iter().copied().map(Adversary::new).collect(),
            agent_spawn: level.agent,
            adversary_spawns: level.adversaries,
            grid: level.grid,
            score: 0,
            pellets_left,
            lives: STARTING_LIVES,
            outcome: None,
            time_ticks: 0,
            pending_pause: Duration::ZERO,
        };
        log::info!(
            "Session started: seed {}, {} pellets, {} ghosts",
            seed,
            pellets_left,
            session.adversaries.len()
        );
        session
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Move the agent and every ghost back to their starting spots
    pub fn reset_characters(&mut self) {
        self.agent.respawn(self.agent_spawn);
        for (ghost, spawn) in self.adversaries.iter_mut().zip(&self.adversary_spawns) {
            ghost.respawn(*spawn);
        }
    }

    /// Hand the accumulated post-death pause to the caller
    pub fn take_pause(&mut self) -> Option<Duration> {
        let pause = std::mem::take(&mut self.pending_pause);
        (!pause.is_zero()).then_some(pause)
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            tiles: self.grid.tiles(),
            agent: AgentView {
                pos: self.agent.pos(),
                dir: self.agent.dir(),
                mouth_phase: self.agent.mouth_phase,
                mouth_open: self.agent.mouth_open(),
            },
            adversaries: self
                .adversaries
                .iter()
                .map(|g| AdversaryView {
                    pos: g.pos(),
                    color: g.color,
                })
                .collect(),
            score: self.score,
            lives: self.lives,
            pellets_left: self.pellets_left,
            outcome: self.outcome,
        }
    }
}

/// Agent as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentView {
    pub pos: IVec2,
    pub dir: Direction,
    pub mouth_phase: u32,
    pub mouth_open: bool,
}

/// Ghost as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdversaryView {
    pub pos: IVec2,
    pub color: Rgb,
}

/// Everything a frame needs, borrowed between ticks
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub cols: usize,
    pub rows: usize,
    /// Row-major tiles
    pub tiles: &'a [Tile],
    pub agent: AgentView,
    pub adversaries: Vec<AdversaryView>,
    pub score: u64,
    pub lives: u32,
    pub pellets_left: usize,
    pub outcome: Option<Outcome>,
}

impl Snapshot<'_> {
    pub fn tile(&self, col: usize, row: usize) -> Option<Tile> {
        (col < self.cols && row < self.rows).then(|| self.tiles[row * self.cols + col])
    }
}

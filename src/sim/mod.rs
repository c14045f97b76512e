//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, integer pixel positions
//! - Seeded RNG only (owned by the session)
//! - Stable iteration order (ghosts by index)
//! - No rendering, audio or terminal dependencies

pub mod adversary;
pub mod agent;
pub mod collision;
pub mod grid;
pub mod motion;
pub mod state;
pub mod tick;

pub use adversary::{Adversary, AdversarySpawn, DirectionSet, Rgb, legal_directions};
pub use agent::{Agent, Spawn};
pub use collision::{Hitbox, entities_collide};
pub use grid::{CLASSIC_LAYOUT, Cell, GridMap, Tile};
pub use motion::{Direction, Motion, cell_of, is_aligned, wrap_horizontal};
pub use state::{AdversaryView, AgentView, GameEvent, GameSession, Level, Outcome, Snapshot};
pub use tick::{TickInput, tick};

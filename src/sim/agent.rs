//! The player-controlled chomper

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, GridMap};
use super::motion::{Direction, Motion};
use crate::consts::{AGENT_SPEED, MOUTH_CYCLE_TICKS, MOUTH_OPEN_TICKS};

/// Where and how an entity (re)enters the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub pos: IVec2,
    pub dir: Direction,
}

impl Spawn {
    /// Spawn at the center of `cell`
    pub fn at(cell: Cell, dir: Direction) -> Self {
        Self {
            pos: cell.center(),
            dir,
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub motion: Motion,
    /// Last requested heading, applied at the next aligned instant if open
    pub next_dir: Direction,
    /// Mouth animation counter (0..MOUTH_CYCLE_TICKS)
    pub mouth_phase: u32,
}

impl Agent {
    pub fn new(spawn: Spawn) -> Self {
        Self {
            motion: Motion::new(spawn.pos, spawn.dir, AGENT_SPEED),
            next_dir: spawn.dir,
            mouth_phase: 0,
        }
    }

    /// Put the agent back at its spawn point
    pub fn respawn(&mut self, spawn: Spawn) {
        self.motion.pos = spawn.pos;
        self.motion.dir = spawn.dir;
        self.next_dir = spawn.dir;
        self.mouth_phase = 0;
    }

    pub fn pos(&self) -> IVec2 {
        self.motion.pos
    }

    pub fn dir(&self) -> Direction {
        self.motion.dir
    }

    pub fn is_stopped(&self) -> bool {
        !self.motion.dir.is_moving()
    }

    pub fn mouth_open(&self) -> bool {
        self.mouth_phase < MOUTH_OPEN_TICKS
    }

    /// Buffer a requested heading. `Direction::None` leaves the buffer as is.
    pub fn steer(&mut self, dir: Direction) {
        if dir.is_moving() {
            self.next_dir = dir;
        }
    }

    /// Advance one tick. Returns the cell whose pellet was eaten, if any.
    pub fn update(&mut self, grid: &mut GridMap) -> Option<Cell> {
        self.mouth_phase = (self.mouth_phase + 1) % MOUTH_CYCLE_TICKS;

        self.motion.step(grid.width_px());

        if self.motion.is_aligned() {
            if self.next_dir.is_moving() && !grid.is_wall(self.motion.cell_toward(self.next_dir)) {
                self.motion.dir = self.next_dir;
            }

            if self.motion.dir.is_moving() && grid.is_wall(self.motion.cell_toward(self.motion.dir)) {
                self.motion.dir = Direction::None;
            }
        }

        let cell = self.motion.cell();
        grid.consume_pellet(cell).then_some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{HALF_TILE, TILE_SIZE};
    use crate::sim::grid::Tile;

    /// A 5x5 box with a plus-shaped corridor around the center
    fn cross_grid() -> GridMap {
        GridMap::from_ascii(&["#####", "## ##", "#   #", "## ##", "#####"], -1)
    }

    fn ticks_per_tile() -> usize {
        (TILE_SIZE / AGENT_SPEED) as usize
    }

    #[test]
    fn test_moves_and_stops_at_wall() {
        let mut grid = cross_grid();
        let mut agent = Agent::new(Spawn::at(Cell::new(1, 2), Direction::Right));

        for _ in 0..ticks_per_tile() {
            agent.update(&mut grid);
        }
        assert_eq!(agent.motion.cell(), Cell::new(2, 2));
        assert_eq!(agent.dir(), Direction::Right);

        for _ in 0..ticks_per_tile() {
            agent.update(&mut grid);
        }
        assert_eq!(agent.pos(), Cell::new(3, 2).center());
        assert!(agent.is_stopped());

        // Stopped agents stay put
        agent.update(&mut grid);
        assert_eq!(agent.pos(), Cell::new(3, 2).center());
    }

    #[test]
    fn test_buffered_turn_applies_at_alignment() {
        let mut grid = cross_grid();
        let mut agent = Agent::new(Spawn::at(Cell::new(1, 2), Direction::Right));
        agent.steer(Direction::Up);

        // Not aligned yet, so the turn waits
        agent.update(&mut grid);
        assert_eq!(agent.dir(), Direction::Right);

        for _ in 1..ticks_per_tile() {
            agent.update(&mut grid);
        }
        // Arrived at the junction: the buffered turn is taken
        assert_eq!(agent.pos(), Cell::new(2, 2).center());
        assert_eq!(agent.dir(), Direction::Up);

        agent.update(&mut grid);
        assert_eq!(agent.pos(), Cell::new(2, 2).center() - IVec2::new(0, AGENT_SPEED));
    }

    #[test]
    fn test_no_turn_between_alignments() {
        let mut grid = cross_grid();
        let mut agent = Agent::new(Spawn::at(Cell::new(1, 2), Direction::Right));
        agent.update(&mut grid);
        agent.steer(Direction::Left);
        // Reversal is open but must wait for the next aligned instant
        agent.update(&mut grid);
        assert_eq!(agent.dir(), Direction::Right);
    }

    #[test]
    fn test_turn_into_wall_is_ignored() {
        let mut grid = GridMap::from_ascii(&["#####", "#   #", "#####"], -1);
        let mut agent = Agent::new(Spawn::at(Cell::new(1, 1), Direction::Right));
        agent.steer(Direction::Up);
        for _ in 0..ticks_per_tile() {
            agent.update(&mut grid);
        }
        assert_eq!(agent.pos(), Cell::new(2, 1).center());
        assert_eq!(agent.dir(), Direction::Right);
        // The request stays buffered for a later junction
        assert_eq!(agent.next_dir, Direction::Up);
    }

    #[test]
    fn test_eats_pellet_on_cell_entry() {
        let mut grid = GridMap::from_ascii(&["#####", "#  .#", "#####"], -1);
        let start = Cell::new(2, 1).center() + IVec2::new(HALF_TILE - AGENT_SPEED, 0);
        let mut agent = Agent::new(Spawn {
            pos: start,
            dir: Direction::Right,
        });

        let eaten = agent.update(&mut grid);
        assert_eq!(eaten, Some(Cell::new(3, 1)));
        assert_eq!(grid.tile_at(Cell::new(3, 1)), Some(Tile::Empty));
        assert_eq!(agent.update(&mut grid), None);
    }

    #[test]
    fn test_tunnel_exit_keeps_heading() {
        let mut grid = GridMap::from_ascii(&["###", "   ", "###"], 1);
        let mut agent = Agent::new(Spawn::at(Cell::new(0, 1), Direction::Left));
        assert!(!grid.is_wall(Cell::new(-1, 1)));

        for _ in 0..13 {
            agent.update(&mut grid);
        }
        assert_eq!(agent.pos().x, grid.width_px() + HALF_TILE);
        assert_eq!(agent.dir(), Direction::Left);
    }

    #[test]
    fn test_mouth_cycles() {
        let mut grid = cross_grid();
        let mut agent = Agent::new(Spawn::at(Cell::new(2, 2), Direction::None));
        assert!(agent.mouth_open());
        for _ in 0..MOUTH_OPEN_TICKS {
            agent.update(&mut grid);
        }
        assert!(!agent.mouth_open());
        for _ in MOUTH_OPEN_TICKS..MOUTH_CYCLE_TICKS {
            agent.update(&mut grid);
        }
        assert_eq!(agent.mouth_phase, 0);
    }

    #[test]
    fn test_respawn_resets_heading_and_buffer() {
        let spawn = Spawn::at(Cell::new(1, 2), Direction::Right);
        let mut agent = Agent::new(spawn);
        agent.steer(Direction::Down);
        agent.motion.pos = Cell::new(3, 2).center();
        agent.motion.dir = Direction::None;

        agent.respawn(spawn);
        assert_eq!(agent.pos(), spawn.pos);
        assert_eq!(agent.dir(), Direction::Right);
        assert_eq!(agent.next_dir, Direction::Right);
    }
}

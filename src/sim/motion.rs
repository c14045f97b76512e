//! Discrete-to-continuous motion on the tile grid
//!
//! Entities move a fixed number of pixels per tick. Turning and wall checks
//! happen only at grid-aligned instants (the entity sits exactly on its tile
//! center); in between, an entity is committed to its heading.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Cell;
use crate::consts::{HALF_TILE, TILE_SIZE};

/// Heading of a moving entity. `None` means stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four real headings, in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid space (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::None => IVec2::ZERO,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    pub fn is_moving(self) -> bool {
        self != Direction::None
    }
}

/// Grid cell containing a pixel position
#[inline]
pub fn cell_of(pos: IVec2) -> Cell {
    Cell::new(pos.x.div_euclid(TILE_SIZE), pos.y.div_euclid(TILE_SIZE))
}

/// True when the position sits on its tile center on both axes
#[inline]
pub fn is_aligned(pos: IVec2) -> bool {
    pos.x.rem_euclid(TILE_SIZE) == HALF_TILE && pos.y.rem_euclid(TILE_SIZE) == HALF_TILE
}

/// Teleport across the horizontal edges once half a tile past either one
#[inline]
pub fn wrap_horizontal(mut pos: IVec2, board_width: i32) -> IVec2 {
    if pos.x < -HALF_TILE {
        pos.x = board_width + HALF_TILE;
    } else if pos.x > board_width + HALF_TILE {
        pos.x = -HALF_TILE;
    }
    pos
}

/// Position, heading and speed of one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub pos: IVec2,
    pub dir: Direction,
    /// Pixels per tick
    pub speed: i32,
}

impl Motion {
    pub fn new(pos: IVec2, dir: Direction, speed: i32) -> Self {
        Self { pos, dir, speed }
    }

    /// Move one tick along the current heading, then apply wraparound
    pub fn step(&mut self, board_width: i32) {
        self.pos += self.dir.delta() * self.speed;
        self.pos = wrap_horizontal(self.pos, board_width);
    }

    pub fn cell(&self) -> Cell {
        cell_of(self.pos)
    }

    pub fn is_aligned(&self) -> bool {
        is_aligned(self.pos)
    }

    /// The cell one step away in `dir`
    pub fn cell_toward(&self, dir: Direction) -> Cell {
        self.cell().neighbor(dir)
    }
}

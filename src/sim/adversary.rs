//! Wandering ghosts
//!
//! Ghosts pick a new heading at every tile center, uniformly at random among
//! the open neighbours, never reversing in place. When nothing qualifies they
//! keep their heading, even if that runs them into a wall.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Spawn;
use super::grid::{Cell, GridMap};
use super::motion::{Direction, Motion};
use crate::consts::ADVERSARY_SPEED;

/// Cosmetic identity color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const PINK: Rgb = Rgb::new(255, 184, 222);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const ORANGE: Rgb = Rgb::new(255, 184, 82);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Small set of headings, iterated in `Direction::ALL` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    fn bit(dir: Direction) -> u8 {
        match dir {
            Direction::Up => 1,
            Direction::Down => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
            Direction::None => 0,
        }
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= Self::bit(dir);
    }

    pub fn contains(&self, dir: Direction) -> bool {
        let bit = Self::bit(dir);
        bit != 0 && self.0 & bit == bit
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&d| self.contains(d))
    }

    /// Uniformly pick one member
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Direction> {
        if self.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..self.len());
        self.iter().nth(pick)
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::default();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// Headings out of `cell` that are open and are not a reversal of `current`
pub fn legal_directions(grid: &GridMap, cell: Cell, current: Direction) -> DirectionSet {
    Direction::ALL
        .into_iter()
        .filter(|&d| d != current.opposite())
        .filter(|&d| !grid.is_wall(cell.neighbor(d)))
        .collect()
}

/// Spawn point plus identity of one ghost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdversarySpawn {
    pub spawn: Spawn,
    pub color: Rgb,
}

/// A ghost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub motion: Motion,
    pub color: Rgb,
}

impl Adversary {
    pub fn new(spawn: AdversarySpawn) -> Self {
        Self {
            motion: Motion::new(spawn.spawn.pos, spawn.spawn.dir, ADVERSARY_SPEED),
            color: spawn.color,
        }
    }

    pub fn respawn(&mut self, spawn: AdversarySpawn) {
        self.motion.pos = spawn.spawn.pos;
        self.motion.dir = spawn.spawn.dir;
    }

    pub fn pos(&self) -> IVec2 {
        self.motion.pos
    }

    pub fn dir(&self) -> Direction {
        self.motion.dir
    }

    /// Re-pick the heading if on a tile center, then advance one tick
    pub fn update<R: Rng + ?Sized>(&mut self, grid: &GridMap, rng: &mut R) {
        if self.motion.is_aligned() {
            let legal = legal_directions(grid, self.motion.cell(), self.motion.dir);
            if let Some(dir) = legal.choose(rng) {
                self.motion.dir = dir;
            }
        }

        self.motion.step(grid.width_px());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ghost(cell: Cell, dir: Direction) -> Adversary {
        Adversary::new(AdversarySpawn {
            spawn: Spawn::at(cell, dir),
            color: Rgb::RED,
        })
    }

    #[test]
    fn test_set_membership() {
        let set: DirectionSet = [Direction::Left, Direction::Up].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Direction::Up));
        assert!(!set.contains(Direction::Down));
        assert!(!set.contains(Direction::None));
        // Iteration order is fixed, not insertion order
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn test_set_ignores_none() {
        let mut set = DirectionSet::default();
        set.insert(Direction::None);
        assert!(set.is_empty());
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(set.choose(&mut rng), None);
    }

    #[test]
    fn test_legal_excludes_reverse_and_walls() {
        let grid = GridMap::from_ascii(&["#####", "## ##", "#   #", "## ##", "#####"], -1);
        let center = Cell::new(2, 2);

        let legal = legal_directions(&grid, center, Direction::Right);
        assert!(!legal.contains(Direction::Left));
        assert_eq!(legal.len(), 3);

        let corridor = legal_directions(&grid, Cell::new(1, 2), Direction::Left);
        assert!(corridor.is_empty());

        // A stopped entity may go anywhere open
        assert_eq!(legal_directions(&grid, center, Direction::None).len(), 4);
    }

    #[test]
    fn test_choice_is_uniform_over_legal_set() {
        let grid = GridMap::from_ascii(&["#####", "## ##", "#   #", "## ##", "#####"], -1);
        let legal = legal_directions(&grid, Cell::new(2, 2), Direction::Up);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 4];
        for _ in 0..3000 {
            let dir = legal.choose(&mut rng).unwrap();
            assert_ne!(dir, Direction::Down);
            counts[Direction::ALL.iter().position(|&d| d == dir).unwrap()] += 1;
        }
        assert_eq!(counts[1], 0);
        for (i, &n) in counts.iter().enumerate() {
            if i != 1 {
                assert!((800..1200).contains(&n), "skewed choice: {:?}", counts);
            }
        }
    }

    #[test]
    fn test_dead_end_keeps_heading_into_wall() {
        // Only way out of (1,1) is back to the right, which is a reversal
        let grid = GridMap::from_ascii(&["####", "#  #", "####"], -1);
        let mut ghost = ghost(Cell::new(1, 1), Direction::Left);
        let mut rng = Pcg32::seed_from_u64(3);

        assert!(legal_directions(&grid, Cell::new(1, 1), Direction::Left).is_empty());
        ghost.update(&grid, &mut rng);
        assert_eq!(ghost.dir(), Direction::Left);
        assert_eq!(ghost.pos(), Cell::new(1, 1).center() - IVec2::new(ADVERSARY_SPEED, 0));
    }

    #[test]
    fn test_corridor_keeps_heading_between_centers() {
        let grid = GridMap::from_ascii(&["######", "#    #", "######"], -1);
        let mut ghost = ghost(Cell::new(1, 1), Direction::Right);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..TILE_SIZE * 2 {
            ghost.update(&grid, &mut rng);
            assert_eq!(ghost.dir(), Direction::Right);
        }
        assert_eq!(ghost.pos(), Cell::new(3, 1).center());
    }

    #[test]
    fn test_respawn() {
        let spawn = AdversarySpawn {
            spawn: Spawn::at(Cell::new(2, 2), Direction::Up),
            color: Rgb::CYAN,
        };
        let mut ghost = Adversary::new(spawn);
        ghost.motion.pos = IVec2::new(5, 5);
        ghost.motion.dir = Direction::Left;
        ghost.respawn(spawn);
        assert_eq!(ghost.pos(), spawn.spawn.pos);
        assert_eq!(ghost.dir(), Direction::Up);
        assert_eq!(ghost.color, Rgb::CYAN);
    }
}

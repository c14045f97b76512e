//! Static tile grid
//!
//! The maze is a fixed rows × columns array of tiles. Its shape never changes
//! during a session; the only mutation is a pellet being eaten.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::motion::Direction;
use crate::consts::{HALF_TILE, TILE_SIZE, TUNNEL_ROW};

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Pellet,
}

impl Tile {
    fn from_ascii(c: char) -> Self {
        match c {
            '#' => Tile::Wall,
            '.' => Tile::Pellet,
            _ => Tile::Empty,
        }
    }
}

/// Integer grid coordinate. May point outside the board (tunnel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The adjacent cell one step in `dir` (self for `Direction::None`)
    pub fn neighbor(self, dir: Direction) -> Self {
        let d = dir.delta();
        Self::new(self.col + d.x, self.row + d.y)
    }

    /// Pixel position of this cell's center
    pub fn center(self) -> IVec2 {
        IVec2::new(self.col * TILE_SIZE + HALF_TILE, self.row * TILE_SIZE + HALF_TILE)
    }
}

/// The classic maze. `#` wall, `.` pellet, space empty.
pub const CLASSIC_LAYOUT: [&str; 21] = [
    "###################",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.### # ###.####",
    "   #.#       #.#   ",
    "####.# ## ## #.####",
    " ....  #   #  .... ",
    "####.# ##### #.####",
    "   #.#       #.#   ",
    "####.# ##### #.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#..#..... .....#..#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "###################",
];

/// Fixed-size tile grid with a horizontal wraparound corridor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    cols: usize,
    rows: usize,
    tunnel_row: i32,
    /// Row-major tiles
    tiles: Vec<Tile>,
}

impl GridMap {
    /// The compiled-in maze
    pub fn classic() -> Self {
        Self::from_ascii(&CLASSIC_LAYOUT, TUNNEL_ROW)
    }

    /// Build a grid from ASCII rows. Short rows are padded with walls.
    pub fn from_ascii<S: AsRef<str>>(layout: &[S], tunnel_row: i32) -> Self {
        let rows = layout.len();
        let cols = layout
            .iter()
            .map(|line| line.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mut tiles = Vec::with_capacity(rows * cols);
        for line in layout {
            let mut row: Vec<Tile> = line.as_ref().chars().map(Tile::from_ascii).collect();
            row.resize(cols, Tile::Wall);
            tiles.extend(row);
        }

        Self {
            cols,
            rows,
            tunnel_row,
            tiles,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tunnel_row(&self) -> i32 {
        self.tunnel_row
    }

    /// Board width in pixels
    pub fn width_px(&self) -> i32 {
        self.cols as i32 * TILE_SIZE
    }

    /// Board height in pixels
    pub fn height_px(&self) -> i32 {
        self.rows as i32 * TILE_SIZE
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// One row of tiles (empty slice past the last row)
    pub fn row(&self, row: usize) -> &[Tile] {
        if row >= self.rows {
            return &[];
        }
        &self.tiles[row * self.cols..(row + 1) * self.cols]
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let col = usize::try_from(cell.col).ok()?;
        let row = usize::try_from(cell.row).ok()?;
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Tile kind for in-bounds cells
    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Out of bounds counts as wall, except anywhere on the tunnel row.
    pub fn is_wall(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => self.tiles[i] == Tile::Wall,
            None => cell.row != self.tunnel_row,
        }
    }

    /// Turn a pellet into an empty tile. Returns false if there was no pellet.
    pub fn consume_pellet(&mut self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) if self.tiles[i] == Tile::Pellet => {
                self.tiles[i] = Tile::Empty;
                true
            }
            _ => false,
        }
    }

    /// Number of pellets still on the board
    pub fn pellet_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Pellet).count()
    }
}

impl Default for GridMap {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAP_COLS, MAP_ROWS};

    #[test]
    fn test_classic_dimensions() {
        let grid = GridMap::classic();
        assert_eq!(grid.cols(), MAP_COLS);
        assert_eq!(grid.rows(), MAP_ROWS);
        assert!(CLASSIC_LAYOUT.iter().all(|row| row.len() == MAP_COLS));
        assert_eq!(grid.pellet_count(), 145);
    }

    #[test]
    fn test_out_of_bounds_is_wall_except_tunnel() {
        let grid = GridMap::classic();
        assert!(grid.is_wall(Cell::new(-1, 4)));
        assert!(grid.is_wall(Cell::new(19, 4)));
        assert!(grid.is_wall(Cell::new(4, -1)));
        assert!(grid.is_wall(Cell::new(4, 21)));

        assert!(!grid.is_wall(Cell::new(-1, TUNNEL_ROW)));
        assert!(!grid.is_wall(Cell::new(19, TUNNEL_ROW)));
        assert!(!grid.is_wall(Cell::new(-40, TUNNEL_ROW)));
    }

    #[test]
    fn test_tile_at() {
        let grid = GridMap::classic();
        assert_eq!(grid.tile_at(Cell::new(0, 0)), Some(Tile::Wall));
        assert_eq!(grid.tile_at(Cell::new(1, 1)), Some(Tile::Pellet));
        assert_eq!(grid.tile_at(Cell::new(9, 16)), Some(Tile::Empty));
        assert_eq!(grid.tile_at(Cell::new(-1, TUNNEL_ROW)), None);
    }

    #[test]
    fn test_consume_pellet_is_idempotent() {
        let mut grid = GridMap::classic();
        let cell = Cell::new(1, 1);
        let before = grid.pellet_count();

        assert!(grid.consume_pellet(cell));
        assert_eq!(grid.pellet_count(), before - 1);
        assert_eq!(grid.tile_at(cell), Some(Tile::Empty));

        assert!(!grid.consume_pellet(cell));
        assert_eq!(grid.pellet_count(), before - 1);
    }

    #[test]
    fn test_consume_non_pellet() {
        let mut grid = GridMap::classic();
        assert!(!grid.consume_pellet(Cell::new(0, 0)));
        assert!(!grid.consume_pellet(Cell::new(-1, TUNNEL_ROW)));
        assert_eq!(grid.tile_at(Cell::new(0, 0)), Some(Tile::Wall));
    }

    #[test]
    fn test_from_ascii_pads_short_rows() {
        let grid = GridMap::from_ascii(&["#.#", "#"], 0);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.row(1), &[Tile::Wall, Tile::Wall, Tile::Wall]);
        assert!(grid.row(2).is_empty());
    }

    #[test]
    fn test_cell_center_and_neighbor() {
        let cell = Cell::new(9, 16);
        assert_eq!(cell.center(), IVec2::new(9 * 24 + 12, 16 * 24 + 12));
        assert_eq!(cell.neighbor(Direction::Up), Cell::new(9, 15));
        assert_eq!(cell.neighbor(Direction::Left), Cell::new(8, 16));
        assert_eq!(cell.neighbor(Direction::None), cell);
    }
}

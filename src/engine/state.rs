use rand::Rng;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ops;
use crate::config::MIN_SIZE;
use crate::error::EngineError;

/// A single cell value: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u64;
/// Accumulated points from merges.
pub type Score = u64;

/// Largest tile a `Tile` can hold. Tiles of this value no longer merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order the UI lists its buttons.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Accepts direction names, WASD and vi keys, case-insensitive.
impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Direction::Up),
            "down" | "s" | "j" => Ok(Direction::Down),
            "left" | "a" | "h" => Ok(Direction::Left),
            "right" | "d" | "l" => Ok(Direction::Right),
            _ => Err(EngineError::UnknownDirection(s.to_string())),
        }
    }
}

/// Square N×N board stored row-major.
///
/// The dimension is fixed at construction; every nonzero cell holds a
/// power of two >= 2. Grids are only produced by the constructors below
/// and by engine operations, so both invariants hold for every value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

// Deserialized grids go through the same validation as `from_cells`.
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<Tile>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = EngineError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Grid::from_cells(raw.size, raw.cells)
    }
}

impl Grid {
    /// An all-empty board of side `size`.
    pub fn empty(size: usize) -> Result<Self, EngineError> {
        if size < MIN_SIZE {
            return Err(EngineError::InvalidConfiguration { size });
        }
        Ok(Grid { size, cells: vec![0; size * size] })
    }

    /// Build a board from literal rows.
    ///
    /// ```
    /// use game_2048::engine::Grid;
    /// let g = Grid::from_rows([[2, 0], [0, 4]]).unwrap();
    /// assert_eq!(g.get(1, 1), 4);
    /// ```
    pub fn from_rows<const N: usize>(rows: [[Tile; N]; N]) -> Result<Self, EngineError> {
        Self::from_cells(N, rows.iter().flatten().copied().collect())
    }

    /// Build a board from row-major cells, validating shape and tile values.
    pub fn from_cells(size: usize, cells: Vec<Tile>) -> Result<Self, EngineError> {
        if size < MIN_SIZE {
            return Err(EngineError::InvalidConfiguration { size });
        }
        if cells.len() != size * size {
            return Err(EngineError::ShapeMismatch { size, len: cells.len() });
        }
        if let Some(&value) = cells.iter().find(|&&v| !is_valid_tile(v)) {
            return Err(EngineError::InvalidTile { value });
        }
        Ok(Grid { size, cells })
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (`row`, `col`); panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        assert!(row < self.size && col < self.size, "cell ({row}, {col}) out of bounds");
        self.cells[row * self.size + col]
    }

    /// Row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Count the number of empty cells on the board.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Return the highest tile value present (0 on an empty board).
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values, saturating. Moves preserve it; only spawns increase it.
    pub fn total(&self) -> Tile {
        self.cells.iter().fold(0, |acc: Tile, &v| acc.saturating_add(v))
    }

    /// Rows become columns.
    pub fn transposed(&self) -> Grid {
        let n = self.size;
        let mut cells = vec![0; n * n];
        for r in 0..n {
            for c in 0..n {
                cells[c * n + r] = self.cells[r * n + c];
            }
        }
        Grid { size: n, cells }
    }

    /// Each row reversed (horizontal mirror).
    pub fn mirrored(&self) -> Grid {
        let mut out = self.clone();
        for row in out.cells.chunks_mut(self.size) {
            row.reverse();
        }
        out
    }

    /// Return the grid after sliding/merging in `dir` plus the points gained. No randomness.
    ///
    /// ```
    /// use game_2048::engine::{Direction, Grid};
    /// let g = Grid::from_rows([[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// let (moved, gained) = g.shift(Direction::Left);
    /// assert_eq!(moved.get(0, 0), 4);
    /// assert_eq!(gained, 4);
    /// ```
    pub fn shift(&self, dir: Direction) -> (Grid, Score) {
        ops::compute_move(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty
    /// cell, using the provided RNG. A full grid is returned unchanged.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use game_2048::engine::Grid;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::empty(4).unwrap().with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        let empty = self.count_empty();
        if empty == 0 {
            return self;
        }
        let pick = rng.gen_range(0..empty);
        let tile = ops::generate_random_tile(rng);
        if let Some(cell) = self.cells.iter_mut().filter(|v| **v == 0).nth(pick) {
            *cell = tile;
        }
        log::trace!("spawned {tile} at empty slot {pick} of {empty}");
        self
    }

    /// True while an empty cell or an equal adjacent pair remains.
    pub fn can_move(&self) -> bool {
        ops::can_move(self)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Tile] {
        &mut self.cells
    }
}

fn is_valid_tile(v: Tile) -> bool {
    v == 0 || (v >= 2 && v.is_power_of_two() && v <= MAX_TILE)
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8 - 1);
        writeln!(f)?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(ops::format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn it_rejects_bad_shapes_and_tiles() {
        assert_eq!(Grid::empty(1), Err(EngineError::InvalidConfiguration { size: 1 }));
        assert_eq!(
            Grid::from_cells(3, vec![0; 8]),
            Err(EngineError::ShapeMismatch { size: 3, len: 8 })
        );
        assert_eq!(
            Grid::from_rows([[2, 3], [0, 0]]),
            Err(EngineError::InvalidTile { value: 3 })
        );
        assert_eq!(
            Grid::from_rows([[1, 0], [0, 0]]),
            Err(EngineError::InvalidTile { value: 1 })
        );
    }

    #[test]
    fn it_transposes_and_mirrors() {
        let g = Grid::from_rows([[2, 4, 8], [16, 32, 64], [0, 0, 128]]).unwrap();
        assert_eq!(
            g.transposed(),
            Grid::from_rows([[2, 16, 0], [4, 32, 0], [8, 64, 128]]).unwrap()
        );
        assert_eq!(
            g.mirrored(),
            Grid::from_rows([[8, 4, 2], [64, 32, 16], [128, 0, 0]]).unwrap()
        );
        assert_eq!(g.transposed().transposed(), g);
        assert_eq!(g.mirrored().mirrored(), g);
    }

    #[test]
    fn it_count_empty_and_highest() {
        let g = Grid::from_rows([[2, 0, 0, 2], [0, 0, 0, 0], [0, 64, 0, 0], [0, 0, 0, 4]]).unwrap();
        assert_eq!(g.count_empty(), 12);
        assert_eq!(g.highest_tile(), 64);
        assert_eq!(g.total(), 72);
        assert_eq!(Grid::empty(4).unwrap().highest_tile(), 0);
    }

    #[test]
    fn it_spawns_into_first_empty_with_zero_rng() {
        // StepRng(0, 0) always samples the low end of every range.
        let mut rng = StepRng::new(0, 0);
        let g = Grid::from_rows([[2, 0], [0, 4]]).unwrap();
        let g = g.with_random_tile(&mut rng);
        assert_eq!(g, Grid::from_rows([[2, 2], [0, 4]]).unwrap());
        let g = g.with_random_tile(&mut rng);
        assert_eq!(g, Grid::from_rows([[2, 2], [2, 4]]).unwrap());
    }

    #[test]
    fn it_leaves_full_grid_alone() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = Grid::from_rows([[2, 4], [4, 2]]).unwrap();
        assert_eq!(g.clone().with_random_tile(&mut rng), g);
    }

    #[test]
    fn it_test_insert_random_tile() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut game = Grid::empty(4).unwrap();
        for _ in 0..16 {
            game = game.with_random_tile(&mut rng);
        }
        assert_eq!(game.count_empty(), 0);
        assert!(game.cells().iter().all(|&v| v == 2 || v == 4));
    }

    #[test]
    fn it_parses_directions() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("a".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" s ".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("right".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!("d".parse::<Direction>().unwrap(), Direction::Right);
        assert!(matches!("x".parse::<Direction>(), Err(EngineError::UnknownDirection(_))));
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn it_validates_on_deserialize() {
        let g: Grid = serde_json::from_str(r#"{"size":2,"cells":[2,0,0,4]}"#).unwrap();
        assert_eq!(g, Grid::from_rows([[2, 0], [0, 4]]).unwrap());
        assert!(serde_json::from_str::<Grid>(r#"{"size":2,"cells":[3,0,0,4]}"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"size":2,"cells":[2,0,0]}"#).is_err());
    }

    #[test]
    fn it_displays_rows() {
        let g = Grid::from_rows([[2, 0], [0, 2048]]).unwrap();
        let text = g.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("2048"));
    }
}

use rand::Rng;

use super::state::{Direction, Grid, Score, Tile, MAX_TILE};

/// Slide/merge tiles in the given direction. No randomness.
///
/// Every direction is reduced to a left move: the grid is reoriented,
/// each row is shifted left, and the orientation is undone.
pub fn compute_move(grid: &Grid, direction: Direction) -> (Grid, Score) {
    let mut work = orient(grid, direction);
    let size = work.size();
    let gained: Score = work
        .cells_mut()
        .chunks_mut(size)
        .map(shift_line_left)
        .fold(0, Score::saturating_add);
    (restore(&work, direction), gained)
}

/// True if an empty cell or a mergeable horizontal/vertical pair exists.
pub fn can_move(grid: &Grid) -> bool {
    let n = grid.size();
    let cells = grid.cells();
    for r in 0..n {
        for c in 0..n {
            let v = cells[r * n + c];
            if v == 0 {
                return true;
            }
            if c + 1 < n && can_merge(v, cells[r * n + c + 1]) {
                return true;
            }
            if r + 1 < n && can_merge(v, cells[(r + 1) * n + c]) {
                return true;
            }
        }
    }
    false
}

/// Equal nonzero tiles merge unless doubling would pass `MAX_TILE`.
#[inline]
fn can_merge(a: Tile, b: Tile) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

fn orient(grid: &Grid, direction: Direction) -> Grid {
    match direction {
        Direction::Left => grid.clone(),
        Direction::Right => grid.mirrored(),
        Direction::Up => grid.transposed(),
        Direction::Down => grid.transposed().mirrored(),
    }
}

fn restore(grid: &Grid, direction: Direction) -> Grid {
    match direction {
        Direction::Left => grid.clone(),
        Direction::Right => grid.mirrored(),
        Direction::Up => grid.transposed(),
        Direction::Down => grid.mirrored().transposed(),
    }
}

/// Compress, merge, compress. Returns the points gained on this line.
pub(crate) fn shift_line_left(line: &mut [Tile]) -> Score {
    compress(line);
    let gained = merge(line);
    compress(line);
    gained
}

/// Slide nonzero tiles to the front, keeping their order; zero-fill the rest.
fn compress(line: &mut [Tile]) {
    let mut dst = 0;
    for src in 0..line.len() {
        let v = line[src];
        if v != 0 {
            line[dst] = v;
            dst += 1;
        }
    }
    line[dst..].fill(0);
}

/// Pairwise, non-chaining merge of a compressed line.
///
/// A merged cell is doubled in place and its partner zeroed; the scan then
/// skips the partner, so `2 2 2` yields `4 0 2` and never `8`.
fn merge(line: &mut [Tile]) -> Score {
    let mut gained = 0;
    let mut i = 0;
    while i + 1 < line.len() {
        if can_merge(line[i], line[i + 1]) {
            line[i] *= 2;
            line[i + 1] = 0;
            gained = Score::saturating_add(gained, line[i]);
            i += 2;
        } else {
            i += 1;
        }
    }
    gained
}

pub(crate) fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        &x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}

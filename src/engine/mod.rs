//! Engine module: square tile grid, the compress/merge/compress move, tile
//! spawning and terminal detection. Public API stays small and ergonomic.
//!
//! - `Grid` is the N×N board with useful methods.
//! - `GameState` and `Engine` hold a running game.
//! - Free functions mirror the methods when convenient; the ones that need
//!   randomness use the thread-local RNG.

mod game;
mod ops;
pub mod state;

pub use game::{Engine, GameState, MoveOutcome};
pub use ops::{can_move, compute_move};
pub use state::{Direction, Grid, Score, Tile, MAX_TILE};

use crate::error::EngineError;

/// Start a `size`×`size` game with two random tiles (uses thread RNG).
pub fn new_game(size: usize) -> Result<GameState, EngineError> {
    GameState::new(size, &mut rand::thread_rng())
}

/// Insert a random 2 (90%) or 4 (10%) tile using thread-local RNG.
///
/// For reproducible behavior, prefer `Grid::with_random_tile(&mut impl Rng)`.
pub fn spawn_tile(grid: Grid) -> Grid {
    grid.with_random_tile(&mut rand::thread_rng())
}

/// Perform a move on a game by value, spawning with the thread RNG.
pub fn apply_move(mut state: GameState, direction: Direction) -> GameState {
    state.apply_move(direction, &mut rand::thread_rng());
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_functions_use_thread_rng() {
        let s = new_game(4).unwrap();
        assert_eq!(s.grid().count_empty(), 14);
        assert!(new_game(1).is_err());

        let g = spawn_tile(Grid::empty(3).unwrap());
        assert_eq!(g.count_empty(), 8);

        let start = GameState::from_grid(Grid::from_rows([[2, 2], [0, 0]]).unwrap(), 0);
        let after = apply_move(start, Direction::Left);
        assert_eq!(after.score(), 4);
        assert_eq!(after.grid().get(0, 0), 4);
        assert_eq!(after.grid().count_empty(), 2);
    }
}

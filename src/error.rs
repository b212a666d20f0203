use thiserror::Error;

use crate::engine::Tile;

/// Errors raised while constructing grids, games, or parsing input.
///
/// Moves themselves never fail: a blocked move or a full board is
/// reported as data (`MoveOutcome`, `game_over`), not as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid configuration: board size {size} is smaller than 2")]
    InvalidConfiguration { size: usize },
    #[error("expected {size}x{size} cells, got {len}")]
    ShapeMismatch { size: usize, len: usize },
    #[error("invalid tile {value}: tiles must be 0 or a power of two in 2..=2^63")]
    InvalidTile { value: Tile },
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
}

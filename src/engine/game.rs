use rand::Rng;

use serde::{Deserialize, Serialize};

use super::state::{Direction, Grid, Score};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// What a call to `apply_move` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The game was already over; nothing changed.
    Ignored,
    /// The move would not change the grid; nothing changed, no tile spawned.
    Unchanged,
    /// Tiles moved, `gained` points were added and one tile was spawned.
    Moved { gained: Score, game_over: bool },
}

impl MoveOutcome {
    pub fn changed(self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Grid, score and terminal flag of one game.
///
/// Only `apply_move` mutates a running game. Once `game_over` is set the
/// state is frozen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGameState")]
pub struct GameState {
    grid: Grid,
    score: Score,
    game_over: bool,
}

// Snapshots never carry their own terminal flag; it is recomputed from the grid.
#[derive(Deserialize)]
struct RawGameState {
    grid: Grid,
    score: Score,
}

impl From<RawGameState> for GameState {
    fn from(raw: RawGameState) -> Self {
        GameState::from_grid(raw.grid, raw.score)
    }
}

impl GameState {
    /// Start a game: empty `size`×`size` grid with two spawned tiles.
    ///
    /// ```
    /// use game_2048::engine::GameState;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let s = GameState::new(4, &mut rng).unwrap();
    /// assert_eq!(s.grid().count_empty(), 14);
    /// assert_eq!(s.score(), 0);
    /// assert!(!s.is_game_over());
    /// ```
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, EngineError> {
        let grid = Grid::empty(size)?.with_random_tile(rng).with_random_tile(rng);
        log::debug!("new {size}x{size} game");
        Ok(GameState { grid, score: 0, game_over: false })
    }

    /// Resume from an arbitrary grid and score. The terminal flag is
    /// derived from the grid.
    pub fn from_grid(grid: Grid, score: Score) -> Self {
        let game_over = !grid.can_move();
        GameState { grid, score, game_over }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Perform a move; if it changed the grid, add the merge points, spawn a
    /// tile with the provided RNG and recompute the terminal flag.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Ignored;
        }
        let (moved, gained) = self.grid.shift(direction);
        if moved == self.grid {
            return MoveOutcome::Unchanged;
        }
        self.grid = moved.with_random_tile(rng);
        self.score = self.score.saturating_add(gained);
        self.game_over = !self.grid.can_move();
        if self.game_over {
            log::debug!("game over: score {} highest tile {}", self.score, self.grid.highest_tile());
        }
        MoveOutcome::Moved { gained, game_over: self.game_over }
    }

    /// Directions that would change the grid.
    pub fn legal_moves(&self) -> Vec<Direction> {
        if self.game_over {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|&d| self.grid.shift(d).0 != self.grid)
            .collect()
    }
}

/// One game session: owns the state and the tile-spawning RNG.
///
/// ```
/// use game_2048::{config::EngineConfig, engine::{Direction, Engine}};
/// use rand::{rngs::StdRng, SeedableRng};
/// let mut engine = Engine::new(EngineConfig::default(), StdRng::seed_from_u64(7)).unwrap();
/// let before = engine.state().score();
/// engine.apply_move(Direction::Left);
/// assert!(engine.state().score() >= before);
/// ```
#[derive(Debug)]
pub struct Engine<R: Rng> {
    config: EngineConfig,
    state: GameState,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Validate `config` and start the first game.
    pub fn new(config: EngineConfig, mut rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        let state = GameState::new(config.size, &mut rng)?;
        Ok(Engine { config, state, rng })
    }

    /// Wrap an existing state, e.g. a fixture grid in tests.
    pub fn with_state(state: GameState, rng: R) -> Self {
        let config = EngineConfig::with_size(state.grid().size());
        Engine { config, state, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        self.state.apply_move(direction, &mut self.rng)
    }

    pub fn legal_moves(&self) -> Vec<Direction> {
        self.state.legal_moves()
    }

    /// Discard the current game and start a fresh one with the same config.
    pub fn new_game(&mut self) -> Result<&GameState, EngineError> {
        self.state = GameState::new(self.config.size, &mut self.rng)?;
        Ok(&self.state)
    }
}

//! game-2048: a deterministic tile-merging puzzle engine
//!
//! This crate provides:
//! - An N×N `Grid` type with the move algorithm (`shift`), tile spawning
//!   (`with_random_tile`) and terminal detection (`can_move`)
//! - `GameState` / `Engine` for a running game with score and game-over flag
//! - `EngineConfig` for the board dimension (default 4×4)
//!
//! Randomness is always injected as a `rand::Rng`, so seeded generators make
//! every game reproducible.
//!
//! Quick start:
//! ```
//! use game_2048::config::EngineConfig;
//! use game_2048::engine::{Direction, Engine, MoveOutcome};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut engine = Engine::new(EngineConfig::default(), StdRng::seed_from_u64(42)).unwrap();
//! let mut moves = 0u32;
//! while !engine.state().is_game_over() && moves < 8 {
//!     for dir in Direction::ALL {
//!         if let MoveOutcome::Moved { .. } = engine.apply_move(dir) {
//!             moves += 1;
//!             break;
//!         }
//!     }
//! }
//! assert!(moves > 0);
//! ```
//!
//! Pure move computation, no randomness involved:
//! ```
//! use game_2048::engine::{compute_move, Direction, Grid};
//!
//! let g = Grid::from_rows([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
//! let (moved, gained) = compute_move(&g, Direction::Left);
//! assert_eq!(moved.rows().next().unwrap(), &[4, 4, 0, 0]);
//! assert_eq!(gained, 8);
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;

pub use error::EngineError;

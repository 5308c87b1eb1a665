//! Puzzle Replay - Move-sequence replay for interlocking block puzzles.
//!
//! A puzzle is a set of rigid pieces built from unit cubes. Its solution is
//! a linear script of group moves: each move either slides a set of pieces
//! by a delta or removes them from the scene. This crate answers one
//! question for a renderer: at step `S` with progress `F` toward the next
//! move, where is every piece and how visible is it?
//!
//! # Architecture
//!
//! - `schema`: Solution data (pieces, moves) and configuration
//! - `compute`: The replay engine, plus the disassembly solver that produces
//!   move scripts, compaction, playback and scene hand-off
//!
//! # Example
//!
//! ```rust
//! use puzzle_replay::{
//!     compute::{MoveLeap, positions_at_leap},
//!     schema::sample_solution,
//! };
//!
//! let solution = sample_solution();
//!
//! // Halfway through the first move
//! let states = positions_at_leap(&solution, MoveLeap::new(0, 0.5));
//! assert_eq!(states[0].offset.x, 0.5);
//! assert!(states.iter().all(|s| s.exists));
//! ```

pub mod compute;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use compute::{MoveLeap, PositionState, positions_at_leap, positions_at_step};
pub use schema::{Coord, Move, MoveEffect, Piece, Solution};

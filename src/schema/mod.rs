//! Schema module - Puzzle data and configuration types for replays.

mod config;
mod sample;
mod solution;

pub use config::*;
pub use sample::*;
pub use solution::*;

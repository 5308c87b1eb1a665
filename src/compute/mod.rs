//! Compute module - Replay engine, the solver feeding it, and the
//! computations derived from it.

mod compact;
mod playback;
mod replay;
mod scene;
mod solver;

pub use compact::*;
pub use playback::*;
pub use replay::*;
pub use scene::*;
pub use solver::*;

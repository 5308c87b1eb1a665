//! Replay engine: where every piece is, and how visible it is, at any point
//! of a move script.
//!
//! Each piece is either *existing* or *removed*. A `Remove` move naming a
//! piece is the only transition, and it is absorbing: later moves never
//! touch a removed piece again. States are never stored; every call folds
//! the move list from the solved configuration.

use serde::{Deserialize, Serialize};

use crate::schema::{Coord, MoveEffect, Solution, lerp};

/// Derived state of one piece at a point in the replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionState {
    /// Accumulated translation away from the solved position, in cells.
    pub offset: Coord,
    pub exists: bool,
    /// 1.0 while present, 0.0 once removed; fractional while fading.
    pub opacity: f32,
}

impl PositionState {
    /// Solved position: no offset, present, fully opaque.
    pub const SOLVED: PositionState = PositionState {
        offset: Coord::ZERO,
        exists: true,
        opacity: 1.0,
    };

    /// Apply a single move effect to a piece it names.
    #[inline]
    fn apply(self, effect: MoveEffect) -> PositionState {
        if !self.exists {
            return self;
        }
        match effect {
            MoveEffect::Translate(delta) => PositionState {
                offset: self.offset + delta,
                exists: true,
                opacity: 1.0,
            },
            MoveEffect::Remove => PositionState {
                offset: self.offset,
                exists: false,
                opacity: 0.0,
            },
        }
    }

    /// Blend from `current` toward `next`.
    ///
    /// Offset and opacity move linearly. `exists` is the destination's once
    /// the transition has started; at `t == 0` the result is `current`.
    pub fn lerp(current: &PositionState, next: &PositionState, t: f32) -> PositionState {
        PositionState {
            offset: Coord::lerp(current.offset, next.offset, t),
            exists: if t > 0.0 { next.exists } else { current.exists },
            opacity: lerp(current.opacity, next.opacity, t),
        }
    }
}

impl Default for PositionState {
    fn default() -> Self {
        Self::SOLVED
    }
}

/// A point on the replay timeline: `step` completed moves plus `leap`
/// progress toward the next one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveLeap {
    pub step: usize,
    pub leap: f32,
}

impl MoveLeap {
    pub fn new(step: usize, leap: f32) -> Self {
        Self { step, leap }
    }

    /// Exactly at `step`, with no progress toward the next move.
    pub fn at_step(step: usize) -> Self {
        Self { step, leap: 0.0 }
    }

    /// Split a continuous timeline position (in moves) into step and fraction.
    ///
    /// The position is clamped to `[0, move_count]`; NaN maps to the start.
    pub fn from_progress(progress: f32, move_count: usize) -> Self {
        let end = move_count as f32;
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, end)
        };
        if progress >= end {
            return Self::at_step(move_count);
        }
        let step = progress.floor();
        Self {
            step: step as usize,
            leap: progress - step,
        }
    }

    /// Continuous timeline position, the inverse of [`MoveLeap::from_progress`].
    pub fn progress(&self) -> f32 {
        self.step as f32 + self.fraction()
    }

    /// `leap` clamped to `[0, 1]`, NaN as 0.
    #[inline]
    pub fn fraction(&self) -> f32 {
        if self.leap.is_nan() {
            0.0
        } else {
            self.leap.clamp(0.0, 1.0)
        }
    }
}

/// State of every piece after the first `step` moves, in piece order.
///
/// `step` beyond the end of the script replays the whole script. Move indices
/// that do not name a piece are ignored.
pub fn positions_at_step(solution: &Solution, step: usize) -> Vec<PositionState> {
    let applied = &solution.moves[..step.min(solution.move_count())];

    (0..solution.piece_count())
        .map(|piece| {
            applied
                .iter()
                .filter(|mov| mov.affects(piece))
                .fold(PositionState::SOLVED, |state, mov| state.apply(mov.effect))
        })
        .collect()
}

/// State of every piece at a fractional point of the replay.
///
/// At or past the last step the final state is returned as is; the replay
/// never overshoots. Otherwise each piece is interpolated between the two
/// neighbouring steps, reproducing either step exactly at `leap` 0 and 1.
pub fn positions_at_leap(solution: &Solution, leap: MoveLeap) -> Vec<PositionState> {
    let move_count = solution.move_count();
    if leap.step >= move_count {
        return positions_at_step(solution, move_count);
    }

    let t = leap.fraction();
    let current = positions_at_step(solution, leap.step);
    let next = positions_at_step(solution, leap.step + 1);

    current
        .iter()
        .zip(next.iter())
        .map(|(current, next)| PositionState::lerp(current, next, t))
        .collect()
}

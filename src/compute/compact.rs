//! Move-list compaction.
//!
//! Solvers emit one move per unit shift, so a piece sliding three cells shows
//! up as three identical moves. Merging those runs gives a replay with one
//! step per slide.

use crate::schema::{Move, MoveEffect, Solution};

/// Merge each run of consecutive translations of the same piece set into a
/// single move carrying the summed delta.
///
/// Removals are never merged. Replaying the result ends in the same state as
/// replaying `moves`.
pub fn compact_moves(moves: &[Move]) -> Vec<Move> {
    let mut compacted: Vec<Move> = Vec::with_capacity(moves.len());

    for mov in moves {
        if let Some(prev) = compacted.last_mut() {
            if let (MoveEffect::Translate(acc), MoveEffect::Translate(delta)) =
                (&mut prev.effect, mov.effect)
            {
                if same_pieces(&prev.pieces, &mov.pieces) {
                    *acc += delta;
                    continue;
                }
            }
        }
        compacted.push(mov.clone());
    }

    log::debug!("compacted {} moves into {}", moves.len(), compacted.len());
    compacted
}

/// Piece sets compare as sets: order and repeats do not matter.
fn same_pieces(a: &[usize], b: &[usize]) -> bool {
    a.iter().all(|p| b.contains(p)) && b.iter().all(|p| a.contains(p))
}

impl Solution {
    /// Copy of this solution with its move list compacted.
    pub fn compacted(&self) -> Solution {
        Solution {
            pieces: self.pieces.clone(),
            moves: compact_moves(&self.moves),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::positions_at_step;
    use crate::schema::{Coord, Piece};

    fn x(n: f32) -> Coord {
        Coord::new(n, 0.0, 0.0)
    }

    #[test]
    fn test_merges_consecutive_runs() {
        let moves = vec![
            Move::translate(vec![0], x(1.0)),
            Move::translate(vec![0], x(1.0)),
            Move::translate(vec![1], x(-1.0)),
            Move::translate(vec![0], x(1.0)),
        ];
        let compacted = compact_moves(&moves);

        assert_eq!(
            compacted,
            vec![
                Move::translate(vec![0], x(2.0)),
                Move::translate(vec![1], x(-1.0)),
                Move::translate(vec![0], x(1.0)),
            ]
        );
    }

    #[test]
    fn test_piece_set_order_is_irrelevant() {
        let moves = vec![
            Move::translate(vec![0, 1], x(1.0)),
            Move::translate(vec![1, 0], x(1.0)),
        ];
        assert_eq!(
            compact_moves(&moves),
            vec![Move::translate(vec![0, 1], x(2.0))]
        );
    }

    #[test]
    fn test_removals_are_kept() {
        let moves = vec![
            Move::translate(vec![0], x(1.0)),
            Move::remove(vec![0]),
            Move::remove(vec![0]),
        ];
        assert_eq!(compact_moves(&moves).len(), 3);
    }

    #[test]
    fn test_compacted_replay_ends_in_same_state() {
        let solution = Solution::new(
            vec![Piece::new(vec![Coord::ZERO]); 2],
            vec![
                Move::translate(vec![0], x(1.0)),
                Move::translate(vec![0], Coord::new(0.0, 1.0, 0.0)),
                Move::translate(vec![0], x(1.0)),
                Move::remove(vec![0]),
                Move::translate(vec![1], x(-1.0)),
                Move::translate(vec![1], x(-1.0)),
            ],
        );
        let compacted = solution.compacted();

        assert!(compacted.move_count() < solution.move_count());
        assert_eq!(
            positions_at_step(&compacted, compacted.move_count()),
            positions_at_step(&solution, solution.move_count())
        );
    }

    #[test]
    fn test_empty() {
        assert!(compact_moves(&[]).is_empty());
    }
}

//! Built-in demonstration puzzles.

use super::{Coord, Move, Piece, Solution};

/// Two small pieces, each slid out along its own axis.
pub fn sample_solution() -> Solution {
    let first = Piece::new(vec![
        Coord::new(0.0, 0.0, 0.0),
        Coord::new(1.0, 0.0, 0.0),
        Coord::new(0.0, 1.0, 0.0),
        Coord::new(0.0, 0.0, 1.0),
    ]);
    let second = Piece::new(vec![
        Coord::new(1.0, 0.0, 0.0),
        Coord::new(0.0, 1.0, 1.0),
        Coord::new(1.0, 1.0, 1.0),
    ]);

    Solution::new(
        vec![first, second],
        vec![
            Move::translate(vec![0], Coord::new(1.0, 0.0, 0.0)),
            Move::translate(vec![1], Coord::new(0.0, 1.0, 0.0)),
        ],
    )
}

/// Five interlocking pieces filling a 4x4x4 cube, not yet solved.
pub fn sample_puzzle() -> Vec<Piece> {
    const LAYOUTS: [&str; 5] = [
        "x.xx|x...|x...|x...
         x..x|...x|....|x...
         x..x|....|....|xxxx
         x..x|x..x|...x|...x",
        ".x..|..xx|.xx.|.xx.
         .x..|..x.|....|..xx
         .xx.|..x.|....|....
         ..x.|....|....|....",
        "....|....|...x|...x
         ....|....|xxxx|....
         ....|....|x...|....
         ....|....|x...|x...",
        "....|.x..|....|....
         ....|xx..|....|....
         ....|.x..|....|....
         .x..|.xx.|..x.|..x.",
        "....|....|....|....
         ....|....|....|....
         ....|...x|.xxx|....
         ....|....|.x..|.x..",
    ];

    LAYOUTS
        .iter()
        .map(|layout| Piece::from_layout(4, layout))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_puzzle_block_counts() {
        let counts: Vec<usize> = sample_puzzle().iter().map(Piece::block_count).collect();
        assert_eq!(counts, vec![22, 15, 9, 9, 6]);
    }
}

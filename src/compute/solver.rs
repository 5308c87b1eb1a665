//! Disassembly search producing the move scripts the replay engine plays.
//!
//! Breadth-first search over piece offsets. From every arrangement each
//! remaining piece either slides one cell along an axis, or, when nothing
//! stands in its way along that axis, slides clear of the others and is
//! taken out. The first arrangement with at most one piece left ends the
//! search, so the script found has the fewest unit moves.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::schema::{ConfigError, Coord, Move, MoveEffect, Piece, Solution, SolverConfig};

type Cell = [i32; 3];

/// Offset of every piece from its solved position; `None` once removed.
type Arrangement = Vec<Option<Cell>>;

/// Unit moves, in search order: +x, -x, +y, -y, +z, -z.
const DIRECTIONS: [Cell; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

/// Errors raised by [`solve`].
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Pieces {first} and {second} occupy the same cell")]
    Overlap { first: usize, second: usize },
    #[error("No disassembly exists; explored {explored} arrangements")]
    Unsolvable { explored: usize },
    #[error("Gave up after {limit} arrangements")]
    StateLimit { limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Step { piece: usize, dir: usize },
    Escape { piece: usize, dir: usize, distance: i32 },
}

struct Node {
    arrangement: Arrangement,
    parent: Option<(usize, Edge)>,
}

/// Find a move script that takes `pieces` apart.
///
/// Block positions are rounded to whole cells. The returned solution carries
/// the input pieces unchanged. Every removal is preceded by the slide that
/// carries the piece clear of the rest, and consecutive slides of one piece
/// along one direction are merged.
pub fn solve(pieces: &[Piece], config: &SolverConfig) -> Result<Solution, SolveError> {
    config.validate()?;

    let shapes: Vec<Vec<Cell>> = pieces
        .iter()
        .map(|piece| piece.blocks.iter().map(to_cell).collect())
        .collect();
    check_overlap(&shapes)?;

    log::debug!(
        "solving {} pieces (margin {}, limit {})",
        shapes.len(),
        config.margin,
        config.max_states
    );

    let start: Arrangement = vec![Some([0; 3]); shapes.len()];
    let mut seen: HashSet<Arrangement> = HashSet::from([start.clone()]);
    let mut nodes = vec![Node {
        arrangement: start,
        parent: None,
    }];
    let mut queue = VecDeque::from([0]);

    while let Some(current) = queue.pop_front() {
        let arrangement = nodes[current].arrangement.clone();

        if arrangement.iter().flatten().count() <= 1 {
            log::debug!("solved after exploring {} arrangements", nodes.len());
            let moves = script(&nodes, current);
            return Ok(Solution::new(pieces.to_vec(), moves));
        }

        for (piece, offset) in arrangement.iter().enumerate() {
            let Some(offset) = *offset else { continue };

            let mine = placed(&shapes[piece], offset);
            let others: Vec<Cell> = arrangement
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != piece)
                .filter_map(|(other, o)| o.map(|o| placed(&shapes[other], o)))
                .flatten()
                .collect();
            let occupied: HashSet<Cell> = others.iter().copied().collect();

            for (dir, delta) in DIRECTIONS.iter().enumerate() {
                let mut next = arrangement.clone();
                let edge = match escape_distance(&mine, &others, dir) {
                    Some(distance) => {
                        next[piece] = None;
                        Edge::Escape {
                            piece,
                            dir,
                            distance,
                        }
                    }
                    None => {
                        let moved = add(offset, *delta);
                        if moved.iter().any(|v| v.abs() > config.margin) {
                            continue;
                        }
                        if mine.iter().any(|c| occupied.contains(&add(*c, *delta))) {
                            continue;
                        }
                        next[piece] = Some(moved);
                        Edge::Step { piece, dir }
                    }
                };

                if !seen.insert(next.clone()) {
                    continue;
                }
                nodes.push(Node {
                    arrangement: next,
                    parent: Some((current, edge)),
                });
                queue.push_back(nodes.len() - 1);

                if nodes.len() > config.max_states {
                    log::warn!("solver hit its limit of {} arrangements", config.max_states);
                    return Err(SolveError::StateLimit {
                        limit: config.max_states,
                    });
                }
            }
        }
    }

    Err(SolveError::Unsolvable {
        explored: nodes.len(),
    })
}

fn to_cell(block: &Coord) -> Cell {
    [
        block.x.round() as i32,
        block.y.round() as i32,
        block.z.round() as i32,
    ]
}

fn to_coord(cell: Cell) -> Coord {
    Coord::new(cell[0] as f32, cell[1] as f32, cell[2] as f32)
}

#[inline]
fn add(a: Cell, b: Cell) -> Cell {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn placed(shape: &[Cell], offset: Cell) -> Vec<Cell> {
    shape.iter().map(|c| add(*c, offset)).collect()
}

fn check_overlap(shapes: &[Vec<Cell>]) -> Result<(), SolveError> {
    let mut owners: HashMap<Cell, usize> = HashMap::new();
    for (piece, shape) in shapes.iter().enumerate() {
        for cell in shape {
            match owners.get(cell) {
                Some(&first) if first != piece => {
                    return Err(SolveError::Overlap {
                        first,
                        second: piece,
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(*cell, piece);
                }
            }
        }
    }
    Ok(())
}

/// How far `mine` must slide along `dir` to clear every cell in `others`,
/// or `None` if some other cell lies ahead of it on that axis.
fn escape_distance(mine: &[Cell], others: &[Cell], dir: usize) -> Option<i32> {
    let axis = dir / 2;
    let sign = if dir % 2 == 0 { 1 } else { -1 };

    let on_line = |p: &Cell, q: &Cell| (0..3).all(|k| k == axis || p[k] == q[k]);
    let blocked = mine
        .iter()
        .any(|p| others.iter().any(|q| on_line(p, q) && (q[axis] - p[axis]) * sign > 0));
    if blocked {
        return None;
    }

    let extent = |cells: &[Cell]| {
        let values = cells.iter().map(|c| c[axis]);
        (values.clone().min(), values.max())
    };
    let distance = match (extent(mine), extent(others)) {
        ((Some(my_min), Some(my_max)), (Some(other_min), Some(other_max))) => {
            if sign > 0 {
                other_max - my_min + 1
            } else {
                my_max - other_min + 1
            }
        }
        _ => 1,
    };
    Some(distance.max(1))
}

/// Walk back from `goal` to the start and turn the path into moves.
fn script(nodes: &[Node], goal: usize) -> Vec<Move> {
    let mut edges = Vec::new();
    let mut at = goal;
    while let Some((parent, edge)) = nodes[at].parent {
        edges.push(edge);
        at = parent;
    }
    edges.reverse();

    let mut moves: Vec<Move> = Vec::with_capacity(edges.len());
    // Piece and direction of the slide `moves.last()` holds, if any.
    let mut sliding: Option<(usize, usize)> = None;

    for edge in &edges {
        let (piece, dir, distance, escapes) = match *edge {
            Edge::Step { piece, dir } => (piece, dir, 1, false),
            Edge::Escape {
                piece,
                dir,
                distance,
            } => (piece, dir, distance, true),
        };
        let delta = to_coord(DIRECTIONS[dir]) * distance as f32;

        let merged = sliding == Some((piece, dir))
            && match moves.last_mut() {
                Some(Move {
                    effect: MoveEffect::Translate(acc),
                    ..
                }) => {
                    *acc += delta;
                    true
                }
                _ => false,
            };
        if !merged {
            moves.push(Move::translate(vec![piece], delta));
        }
        sliding = Some((piece, dir));

        if escapes {
            moves.push(Move::remove(vec![piece]));
            sliding = None;
        }
    }

    log::debug!("{} search steps became {} moves", edges.len(), moves.len());
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::positions_at_step;
    use crate::schema::sample_puzzle;

    fn cube(x: f32, y: f32, z: f32) -> Piece {
        Piece::new(vec![Coord::new(x, y, z)])
    }

    /// Every cell of a 3x3x3 block except the center.
    fn shell() -> Piece {
        let mut blocks = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    if (x, y, z) != (1, 1, 1) {
                        blocks.push(Coord::new(x as f32, y as f32, z as f32));
                    }
                }
            }
        }
        Piece::new(blocks)
    }

    /// Cells occupied at `step` never coincide.
    fn assert_collision_free(solution: &Solution, step: usize) {
        let mut occupied = HashSet::new();
        for (piece, state) in positions_at_step(solution, step).iter().enumerate() {
            if !state.exists {
                continue;
            }
            for block in &solution.pieces[piece].blocks {
                let cell = to_cell(&(*block + state.offset));
                assert!(
                    occupied.insert(cell),
                    "step {step}: piece {piece} overlaps at {cell:?}"
                );
            }
        }
    }

    #[test]
    fn test_free_pair_slides_one_piece_out() {
        let pieces = vec![cube(0.0, 0.0, 0.0), cube(0.0, 1.0, 0.0)];
        let solution = solve(&pieces, &SolverConfig::default()).unwrap();

        assert_eq!(solution.pieces, pieces);
        assert_eq!(
            solution.moves,
            vec![
                Move::translate(vec![0], Coord::new(1.0, 0.0, 0.0)),
                Move::remove(vec![0]),
            ]
        );
    }

    #[test]
    fn test_single_piece_needs_no_moves() {
        let solution = solve(&[cube(2.0, 2.0, 2.0)], &SolverConfig::default()).unwrap();
        assert!(solution.moves.is_empty());
    }

    #[test]
    fn test_overlapping_pieces_rejected() {
        let pieces = vec![cube(0.0, 0.0, 0.0), cube(0.0, 0.0, 0.0)];
        assert!(matches!(
            solve(&pieces, &SolverConfig::default()),
            Err(SolveError::Overlap {
                first: 0,
                second: 1
            })
        ));
    }

    #[test]
    fn test_enclosed_piece_is_unsolvable() {
        let pieces = vec![shell(), cube(1.0, 1.0, 1.0)];
        assert!(matches!(
            solve(&pieces, &SolverConfig::default()),
            Err(SolveError::Unsolvable { explored: 1 })
        ));
    }

    #[test]
    fn test_state_limit() {
        let config = SolverConfig {
            max_states: 1,
            ..Default::default()
        };
        assert!(matches!(
            solve(&sample_puzzle(), &config),
            Err(SolveError::StateLimit { limit: 1 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SolverConfig {
            margin: -1,
            ..Default::default()
        };
        assert!(matches!(
            solve(&sample_puzzle(), &config),
            Err(SolveError::Config(ConfigError::InvalidMargin))
        ));
    }

    #[test]
    fn test_sample_puzzle_disassembles() {
        let pieces = sample_puzzle();
        let solution = solve(&pieces, &SolverConfig::default()).unwrap();

        let removals = solution
            .moves
            .iter()
            .filter(|m| m.effect == MoveEffect::Remove)
            .count();
        assert_eq!(removals, pieces.len() - 1);

        let end = positions_at_step(&solution, solution.move_count());
        assert_eq!(end.iter().filter(|s| s.exists).count(), 1);

        for mov in &solution.moves {
            assert_eq!(mov.pieces.len(), 1);
            if let MoveEffect::Translate(delta) = mov.effect {
                let axes = [delta.x, delta.y, delta.z]
                    .iter()
                    .filter(|v| **v != 0.0)
                    .count();
                assert_eq!(axes, 1, "slide {delta:?} is not along one axis");
            }
        }

        for step in 0..=solution.move_count() {
            assert_collision_free(&solution, step);
        }
    }
}

//! Benchmarks for the replay engine.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use puzzle_replay::{
    compute::{MoveLeap, positions_at_leap, sample_frames},
    schema::{Coord, Move, Piece, Solution},
};

/// `pieces` single-cube pieces, each slid out in turn and then removed.
fn staircase(pieces: usize) -> Solution {
    let mut moves = Vec::with_capacity(pieces * 2);
    for i in 0..pieces {
        moves.push(Move::translate(vec![i], Coord::new(0.0, 0.0, 4.0)));
        moves.push(Move::remove(vec![i]));
    }
    Solution::new(vec![Piece::new(vec![Coord::ZERO]); pieces], moves)
}

fn bench_positions_at_leap(c: &mut Criterion) {
    let mut group = c.benchmark_group("positions_at_leap");

    for pieces in [6, 12, 24, 48] {
        let solution = staircase(pieces);
        let leap = MoveLeap::new(solution.move_count() - 1, 0.5);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_pieces", pieces)),
            &pieces,
            |b, _| {
                b.iter(|| positions_at_leap(black_box(&solution), black_box(leap)));
            },
        );
    }

    group.finish();
}

fn bench_sample_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_frames");

    for frames in [60, 240] {
        let solution = staircase(12);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_frames", frames)),
            &frames,
            |b, &frames| {
                b.iter(|| sample_frames(black_box(&solution), frames));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_positions_at_leap, bench_sample_frames);
criterion_main!(benches);

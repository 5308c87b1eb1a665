//! End-to-end replay of a solution delivered as listing JSON.

use puzzle_replay::{
    compute::{MoveLeap, Playback, piece_instances, positions_at_leap, positions_at_step},
    schema::{Coord, PlaybackConfig, PuzzleRecord, RenderOptions},
};

const LISTING: &str = r#"[
  {
    "code": "aab|abb",
    "name": "Untitled_20240122T101500",
    "solution": {
      "pieces": [
        { "blocks": [{ "x": 0, "y": 0, "z": 0 }, { "x": 1, "y": 0, "z": 0 }] },
        { "blocks": [{ "x": 0, "y": 1, "z": 0 }] }
      ],
      "moves": [
        { "pieces": [0], "translate": { "x": 1, "y": 0, "z": 0 } },
        { "pieces": [0], "translate": null },
        { "pieces": [1], "translate": { "x": 0, "y": 1, "z": 0 } }
      ]
    }
  }
]"#;

#[test]
fn listing_replays_to_expected_states() {
    let puzzles = PuzzleRecord::list_from_json(LISTING).unwrap();
    let solution = &puzzles[0].solution;

    let step2 = positions_at_step(solution, 2);
    assert!(!step2[0].exists);
    assert_eq!(step2[0].offset, Coord::new(1.0, 0.0, 0.0));
    assert_eq!(step2[1].offset, Coord::ZERO);

    let end = positions_at_step(solution, 3);
    assert_eq!(end[1].offset, Coord::new(0.0, 1.0, 0.0));
    assert!(end[1].exists);
    assert_eq!(end[0].opacity, 0.0);
}

#[test]
fn clock_driven_frames_fade_and_scale() {
    let puzzles = PuzzleRecord::list_from_json(LISTING).unwrap();
    let solution = &puzzles[0].solution;

    let mut playback = Playback::new(PlaybackConfig::default(), solution.move_count()).unwrap();
    playback.play();

    // 1.5 s at one move per second: halfway through the removal.
    let leap = playback.advance(1.5);
    assert_eq!(leap, MoveLeap::new(1, 0.5));

    let states = positions_at_leap(solution, leap);
    let instances = piece_instances(&states, &RenderOptions::default());

    assert_eq!(instances[0].translation, [32.0, 0.0, 0.0]);
    assert_eq!(instances[0].opacity, 0.5);
    assert_eq!(instances[0].visible, 0.0);
    assert_eq!(instances[1].translation, [0.0, 0.0, 0.0]);
    assert_eq!(instances[1].opacity, 1.0);
}

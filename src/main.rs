//! Puzzle Replay CLI - Inspect, play back and solve puzzles from JSON.

use std::path::PathBuf;

use puzzle_replay::{
    compute::{MoveLeap, Playback, piece_instances, positions_at_leap, solve},
    schema::{Piece, ReplayConfig, Solution, sample_puzzle, sample_solution},
};

fn main() {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().collect();
    let config = take_config(&mut args);

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => print_example_solution(),
        "--play" => run_play(&args, &config),
        "--solve" => run_solve(&args, &config),
        _ => run_inspect(&args, &config),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--config <config.json>] <solution.json> [step] [leap]", program);
    eprintln!("       {} [--config <config.json>] --play <solution.json> [fps]", program);
    eprintln!("       {} [--config <config.json>] --solve <pieces.json|sample>", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Print where every piece sits at a point of the replay.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json      Render, playback and solver settings (default: built-in)");
    eprintln!("  solution.json    Path to the solution (pieces + moves)");
    eprintln!("  step             Completed moves (default: all)");
    eprintln!("  leap             Progress toward the next move, 0-1 (default: 0)");
    eprintln!("  fps              Frames per second when playing (default: 10)");
    eprintln!("  pieces.json      Pieces to take apart, or `sample` for the built-in puzzle");
}

/// Pull `--config <path>` out of the argument list and load it.
fn take_config(args: &mut Vec<String>) -> ReplayConfig {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return ReplayConfig::default();
    };
    if pos + 1 >= args.len() {
        eprintln!("--config needs a path");
        std::process::exit(1);
    }
    let path: Vec<String> = args.drain(pos..pos + 2).collect();

    let config = ReplayConfig::from_path(PathBuf::from(&path[1])).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });
    log::info!("Loaded config from {}", path[1]);
    config
}

fn load_solution(path: &str) -> Solution {
    Solution::from_path(PathBuf::from(path)).unwrap_or_else(|e| {
        eprintln!("Error loading solution: {}", e);
        std::process::exit(1);
    })
}

fn run_inspect(args: &[String], config: &ReplayConfig) {
    let solution = load_solution(&args[1]);
    let move_count = solution.move_count();

    let step: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(move_count);
    let leap: f32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.0);

    if step > move_count {
        log::warn!("step {} is past the last move, showing step {}", step, move_count);
    }
    let leap = MoveLeap::new(step.min(move_count), leap);

    log::info!(
        "{} pieces, {} moves, showing step {} + {:.3}",
        solution.piece_count(),
        move_count,
        leap.step,
        leap.fraction()
    );

    println!("Puzzle Replay");
    println!("=============");
    println!("Pieces: {}", solution.piece_count());
    println!("Moves: {}", move_count);
    println!("Position: step {} + {:.3}", leap.step, leap.fraction());
    println!("Cell size: {}", config.render.cell_size);
    println!();

    let states = positions_at_leap(&solution, leap);
    let instances = piece_instances(&states, &config.render);
    for (i, (state, instance)) in states.iter().zip(&instances).enumerate() {
        let [tx, ty, tz] = instance.translation;
        println!(
            "  Piece {:>2}: offset=({:>7.3}, {:>7.3}, {:>7.3}) scene=({:>8.2}, {:>8.2}, {:>8.2}) opacity={:.3}{}",
            i,
            state.offset.x,
            state.offset.y,
            state.offset.z,
            tx,
            ty,
            tz,
            state.opacity,
            if state.exists { "" } else { " (removed)" }
        );
    }
}

/// Drive the replay from a fixed-rate clock and print one line per frame.
fn run_play(args: &[String], config: &ReplayConfig) {
    if args.len() < 3 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let solution = load_solution(&args[2]);
    let fps: f32 = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .filter(|f: &f32| *f > 0.0 && f.is_finite())
        .unwrap_or(10.0);

    let mut playback =
        Playback::new(config.playback, solution.move_count()).unwrap_or_else(|e| {
            eprintln!("Invalid playback config: {}", e);
            std::process::exit(1);
        });

    // A looping replay never finishes on its own; stop after one pass.
    let per_pass = solution.move_count() as f32 * config.playback.step_duration
        / config.playback.speed.abs().max(f32::EPSILON);
    let max_frames = (per_pass * fps).ceil().min(1e6) as usize + 1;

    log::info!(
        "Playing {} moves at {} fps ({} s per move, speed {})",
        solution.move_count(),
        fps,
        config.playback.step_duration,
        config.playback.speed
    );

    playback.play();
    let mut leap = playback.leap();
    for frame in 0..max_frames {
        let states = positions_at_leap(&solution, leap);
        let visible = states.iter().filter(|s| s.opacity > 0.0).count();
        println!(
            "frame {:>5}  step {:>3} + {:.3}  visible {}",
            frame,
            leap.step,
            leap.fraction(),
            visible
        );
        if !playback.is_playing() {
            break;
        }
        leap = playback.advance(1.0 / fps);
    }
}

fn run_solve(args: &[String], config: &ReplayConfig) {
    if args.len() < 3 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let pieces: Vec<Piece> = if args[2] == "sample" {
        sample_puzzle()
    } else {
        let json = std::fs::read_to_string(&args[2]).unwrap_or_else(|e| {
            eprintln!("Error reading pieces: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&json).unwrap_or_else(|e| {
            eprintln!("Error parsing pieces: {}", e);
            std::process::exit(1);
        })
    };

    let solution = solve(&pieces, &config.solver).unwrap_or_else(|e| {
        eprintln!("Error solving puzzle: {}", e);
        std::process::exit(1);
    });
    log::info!(
        "Solved {} pieces in {} moves",
        solution.piece_count(),
        solution.move_count()
    );

    match solution.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing solution: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_example_solution() {
    match sample_solution().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}

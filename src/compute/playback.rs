//! Animation clock driving a replay.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::{MoveLeap, PositionState, positions_at_leap};
use crate::schema::{ConfigError, PlaybackConfig, Solution};

/// Turns elapsed wall-clock time into a [`MoveLeap`].
///
/// Progress is kept as a continuous position in moves, `[0, move_count]`.
#[derive(Debug, Clone)]
pub struct Playback {
    config: PlaybackConfig,
    move_count: usize,
    progress: f32,
    playing: bool,
}

impl Playback {
    /// Paused at the solved state.
    pub fn new(config: PlaybackConfig, move_count: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            move_count,
            progress: 0.0,
            playing: false,
        })
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        if !speed.is_finite() {
            return Err(ConfigError::InvalidSpeed);
        }
        self.config.speed = speed;
        Ok(())
    }

    pub fn play(&mut self) {
        if self.is_finished() {
            self.progress = if self.config.speed < 0.0 {
                self.end()
            } else {
                0.0
            };
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Jump to a point on the timeline.
    pub fn seek(&mut self, leap: MoveLeap) {
        self.progress = leap.progress().clamp(0.0, self.end());
    }

    /// Jump to the next whole step.
    pub fn step_forward(&mut self) {
        self.progress = (self.progress.floor() + 1.0).min(self.end());
    }

    /// Jump to the previous whole step.
    pub fn step_backward(&mut self) {
        self.progress = (self.progress.ceil() - 1.0).max(0.0);
    }

    /// Advance the clock by `dt` seconds and return the new timeline point.
    ///
    /// A non-looping playback pauses itself on reaching either end. A looping
    /// one wraps only once it passes an end, so landing exactly on the final
    /// state shows it for that frame.
    pub fn advance(&mut self, dt: f32) -> MoveLeap {
        if self.playing && self.move_count > 0 {
            let end = self.end();
            self.progress += dt * self.config.speed / self.config.step_duration;

            if self.config.looping {
                if self.progress > end || self.progress < 0.0 {
                    self.progress = self.progress.rem_euclid(end);
                }
            } else if self.progress >= end || self.progress <= 0.0 {
                self.progress = self.progress.clamp(0.0, end);
                if self.is_finished() {
                    log::debug!("playback reached {}", self.progress);
                    self.playing = false;
                }
            }
        }
        self.leap()
    }

    /// Current timeline point.
    pub fn leap(&self) -> MoveLeap {
        MoveLeap::from_progress(self.progress, self.move_count)
    }

    /// Whether a non-looping playback sits at the end it is heading for.
    pub fn is_finished(&self) -> bool {
        if self.config.looping {
            return false;
        }
        if self.config.speed < 0.0 {
            self.progress <= 0.0
        } else {
            self.progress >= self.end()
        }
    }

    fn end(&self) -> f32 {
        self.move_count as f32
    }
}

/// Evenly spaced snapshots across the whole replay.
///
/// The first frame is the solved state and the last is the final state.
pub fn sample_frames(solution: &Solution, frame_count: usize) -> Vec<Vec<PositionState>> {
    let move_count = solution.move_count();
    let last = frame_count.saturating_sub(1);

    let leap_at = |i: usize| {
        if i == last && last > 0 {
            MoveLeap::at_step(move_count)
        } else if last == 0 {
            MoveLeap::at_step(0)
        } else {
            MoveLeap::from_progress(i as f32 * move_count as f32 / last as f32, move_count)
        }
    };

    #[cfg(not(target_arch = "wasm32"))]
    let frames = (0..frame_count)
        .into_par_iter()
        .map(|i| positions_at_leap(solution, leap_at(i)))
        .collect();
    #[cfg(target_arch = "wasm32")]
    let frames = (0..frame_count)
        .map(|i| positions_at_leap(solution, leap_at(i)))
        .collect();

    frames
}

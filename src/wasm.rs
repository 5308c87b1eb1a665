//! WebAssembly bindings for Puzzle Replay.
//!
//! Provides a thin wrapper around the replay engine for browser renderers.

use wasm_bindgen::prelude::*;

use crate::{
    compute::{
        MoveLeap, Playback, compact_moves, piece_instances, positions_at_leap, positions_at_step,
    },
    schema::{PlaybackConfig, RenderOptions, Solution},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// A loaded solution plus the clock and scene scale that drive it.
#[wasm_bindgen]
pub struct WasmReplay {
    solution: Solution,
    playback: Playback,
    options: RenderOptions,
}

#[wasm_bindgen]
impl WasmReplay {
    /// Create a replay from solution JSON (`{ pieces, moves }`).
    #[wasm_bindgen(constructor)]
    pub fn new(solution_json: &str) -> Result<WasmReplay, JsValue> {
        let solution = Solution::from_json(solution_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid solution JSON: {e}")))?;
        let playback = Playback::new(PlaybackConfig::default(), solution.move_count())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmReplay {
            solution,
            playback,
            options: RenderOptions::default(),
        })
    }

    /// Merge consecutive slides of the same pieces into single moves.
    #[wasm_bindgen]
    pub fn compact(&mut self) -> Result<(), JsValue> {
        self.solution.moves = compact_moves(&self.solution.moves);
        self.playback = Playback::new(*self.playback.config(), self.solution.move_count())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    #[wasm_bindgen(js_name = moveCount)]
    pub fn move_count(&self) -> usize {
        self.solution.move_count()
    }

    #[wasm_bindgen(js_name = pieceCount)]
    pub fn piece_count(&self) -> usize {
        self.solution.piece_count()
    }

    /// Set scene scaling from JSON (`{ cell_size, shrink_size }`).
    #[wasm_bindgen(js_name = setRenderOptions)]
    pub fn set_render_options(&mut self, options_json: &str) -> Result<(), JsValue> {
        let options: RenderOptions = serde_json::from_str(options_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid render options JSON: {e}")))?;
        options
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.options = options;
        Ok(())
    }

    /// Set playback timing from JSON (`{ step_duration, speed, looping }`).
    #[wasm_bindgen(js_name = setPlayback)]
    pub fn set_playback(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config: PlaybackConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid playback JSON: {e}")))?;
        let leap = self.playback.leap();
        self.playback = Playback::new(config, self.solution.move_count())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.playback.seek(leap);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn play(&mut self) {
        self.playback.play();
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) {
        self.playback.pause();
    }

    #[wasm_bindgen]
    pub fn seek(&mut self, step: usize, leap: f32) {
        self.playback.seek(MoveLeap::new(step, leap));
    }

    /// Advance the clock by `dt` seconds; returns the piece states for the new frame.
    #[wasm_bindgen]
    pub fn advance(&mut self, dt: f32) -> Result<JsValue, JsValue> {
        let leap = self.playback.advance(dt);
        to_js(&positions_at_leap(&self.solution, leap))
    }

    /// Piece states after `step` whole moves.
    #[wasm_bindgen(js_name = positionsAtStep)]
    pub fn positions_at_step(&self, step: usize) -> Result<JsValue, JsValue> {
        to_js(&positions_at_step(&self.solution, step))
    }

    /// Piece states at `step` plus `leap` progress toward the next move.
    #[wasm_bindgen(js_name = positionsAtLeap)]
    pub fn positions_at_leap(&self, step: usize, leap: f32) -> Result<JsValue, JsValue> {
        to_js(&positions_at_leap(&self.solution, MoveLeap::new(step, leap)))
    }

    /// Packed instance data for the current clock position, as raw f32s
    /// (8 per piece: translation xyz, opacity, visible, padding).
    #[wasm_bindgen]
    pub fn instances(&self) -> Vec<f32> {
        let states = positions_at_leap(&self.solution, self.playback.leap());
        let instances = piece_instances(&states, &self.options);
        bytemuck::cast_slice(&instances).to_vec()
    }
}

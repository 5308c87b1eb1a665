//! Hand-off from replay states to a renderer.
//!
//! The renderer builds each piece once from [`block_translations`] and then,
//! every frame, applies one [`PieceInstance`] per piece.

use bytemuck::{Pod, Zeroable};

use super::PositionState;
use crate::schema::{Coord, Piece, RenderOptions};

/// Per-piece, per-frame transform in scene units.
///
/// Layout matches a 16-byte aligned GPU instance attribute.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PieceInstance {
    /// Scene-space translation (offset scaled by cell size).
    pub translation: [f32; 3],
    pub opacity: f32,
    /// 1.0 while the piece exists, 0.0 once removed.
    pub visible: f32,
    pub _padding: [f32; 3],
}

impl PieceInstance {
    pub fn from_state(state: &PositionState, options: &RenderOptions) -> Self {
        let t = state.offset * options.cell_size;
        Self {
            translation: [t.x, t.y, t.z],
            opacity: state.opacity,
            visible: if state.exists { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        }
    }
}

/// Instances for a full frame, in piece order.
pub fn piece_instances(states: &[PositionState], options: &RenderOptions) -> Vec<PieceInstance> {
    states
        .iter()
        .map(|state| PieceInstance::from_state(state, options))
        .collect()
}

/// Raw bytes of a frame's instances, ready for a vertex buffer upload.
pub fn instance_bytes(instances: &[PieceInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Local translation of every cube in a piece, in scene units.
pub fn block_translations(piece: &Piece, options: &RenderOptions) -> Vec<Coord> {
    piece
        .blocks
        .iter()
        .map(|&block| block * options.cell_size)
        .collect()
}

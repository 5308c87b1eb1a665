//! Puzzle geometry and move scripts as delivered by the puzzle listing.

use std::fs;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A point or translation in puzzle space, measured in cells.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Coord {
    pub const ZERO: Coord = Coord::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation between `a` and `b`.
    ///
    /// Written as `a * (1 - t) + b * t` so both endpoints are reproduced exactly.
    #[inline]
    pub fn lerp(a: Coord, b: Coord, t: f32) -> Coord {
        Coord {
            x: lerp(a.x, b.x, t),
            y: lerp(a.y, b.y, t),
            z: lerp(a.z, b.z, t),
        }
    }
}

/// Scalar interpolation, exact at `t == 0` and `t == 1`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, other: Coord) -> Coord {
        Coord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, other: Coord) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, other: Coord) -> Coord {
        Coord::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Coord {
    type Output = Coord;
    fn mul(self, k: f32) -> Coord {
        Coord::new(self.x * k, self.y * k, self.z * k)
    }
}

/// A rigid cluster of unit cubes, positioned relative to its solved origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Piece {
    pub blocks: Vec<Coord>,
}

impl Piece {
    pub fn new(blocks: Vec<Coord>) -> Self {
        Self { blocks }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Build a piece from a text layout of a `size`-wide cube.
    ///
    /// `x` marks a filled cell and `.` an empty one; every other character is
    /// ignored. Cells advance along x, then z, then y, so each line of a
    /// layout is one y layer and each `|`-separated group is one z row.
    pub fn from_layout(size: usize, layout: &str) -> Piece {
        let mut blocks = Vec::new();
        let (mut x, mut y, mut z) = (0, 0, 0);
        for c in layout.chars() {
            if c != 'x' && c != '.' {
                continue;
            }
            if c == 'x' {
                blocks.push(Coord::new(x as f32, y as f32, z as f32));
            }
            x += 1;
            if x >= size {
                x = 0;
                z += 1;
            }
            if z >= size {
                z = 0;
                y += 1;
            }
        }
        Piece { blocks }
    }

    /// Axis-aligned (min, max) corners over all block positions.
    /// Returns `None` for a piece without blocks.
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        let first = *self.blocks.first()?;
        Some(self.blocks.iter().skip(1).fold((first, first), |(lo, hi), b| {
            (
                Coord::new(lo.x.min(b.x), lo.y.min(b.y), lo.z.min(b.z)),
                Coord::new(hi.x.max(b.x), hi.y.max(b.y), hi.z.max(b.z)),
            )
        }))
    }
}

/// What a move does to the pieces it names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveEffect {
    /// Shift each named piece by the given delta.
    Translate(Coord),
    /// Take the named pieces out of the scene for the rest of the replay.
    Remove,
}

/// One scripted step of a disassembly.
///
/// On the wire the effect is a nullable `translate` field; `null` (or a
/// missing field) means [`MoveEffect::Remove`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MoveRecord", into = "MoveRecord")]
pub struct Move {
    pub pieces: Vec<usize>,
    pub effect: MoveEffect,
}

impl Move {
    pub fn translate(pieces: Vec<usize>, delta: Coord) -> Self {
        Self {
            pieces,
            effect: MoveEffect::Translate(delta),
        }
    }

    pub fn remove(pieces: Vec<usize>) -> Self {
        Self {
            pieces,
            effect: MoveEffect::Remove,
        }
    }

    /// Whether this move names piece `index`.
    #[inline]
    pub fn affects(&self, index: usize) -> bool {
        self.pieces.contains(&index)
    }
}

#[derive(Serialize, Deserialize)]
struct MoveRecord {
    pieces: Vec<usize>,
    #[serde(default)]
    translate: Option<Coord>,
}

impl From<MoveRecord> for Move {
    fn from(record: MoveRecord) -> Self {
        let effect = match record.translate {
            Some(delta) => MoveEffect::Translate(delta),
            None => MoveEffect::Remove,
        };
        Move {
            pieces: record.pieces,
            effect,
        }
    }
}

impl From<Move> for MoveRecord {
    fn from(mov: Move) -> Self {
        let translate = match mov.effect {
            MoveEffect::Translate(delta) => Some(delta),
            MoveEffect::Remove => None,
        };
        MoveRecord {
            pieces: mov.pieces,
            translate,
        }
    }
}

/// Piece geometry plus the ordered move script that takes the puzzle apart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solution {
    pub pieces: Vec<Piece>,
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl Solution {
    pub fn new(pieces: Vec<Piece>, moves: Vec<Move>) -> Self {
        Self { pieces, moves }
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn from_json(json: &str) -> Result<Self, SolutionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SolutionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a solution from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SolutionError> {
        let path = path.as_ref();
        log::debug!("loading solution from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// A named puzzle as served by the puzzle listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    /// Compact block code identifying the puzzle shape.
    pub code: String,
    pub name: String,
    pub solution: Solution,
}

impl PuzzleRecord {
    /// Parse the JSON array returned by the listing endpoint.
    pub fn list_from_json(json: &str) -> Result<Vec<PuzzleRecord>, SolutionError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Errors raised while loading solution data.
#[derive(Debug, thiserror::Error)]
pub enum SolutionError {
    #[error("Failed to read solution: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid solution JSON: {0}")]
    Json(#[from] serde_json::Error),
}

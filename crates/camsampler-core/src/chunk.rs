//! Toolpath points and path chunks
//!
//! A [`PathChunk`] is a contiguous run of toolpath points. Chunks are owned by
//! the caller; the sampling pipeline only rewrites their z components.

use serde::{Deserialize, Serialize};

/// Height written in place for points that lie outside the ambient region.
///
/// Such points are never sent to the sampler.
pub const OUTSIDE_AMBIENT_Z: f64 = 2.0;

/// Height assigned on read-back to points that carried [`OUTSIDE_AMBIENT_Z`].
pub const SKIPPED_SAMPLE_Z: f64 = 1.0;

/// A toolpath point in model space.
///
/// `z` is `None` until the point has been sampled (or flagged).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    /// Creates a planar point with no height yet.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a point with a known height.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// True if the point carries the outside-ambient flag height.
    pub fn is_outside_ambient(&self) -> bool {
        self.z == Some(OUTSIDE_AMBIENT_Z)
    }

    /// Replaces the height, keeping x and y.
    pub fn set_z(&mut self, z: f64) {
        self.z = Some(z);
    }

    /// Raises the height to `z` if it is higher than the current one.
    ///
    /// A point without a height simply takes `z`.
    pub fn raise_to(&mut self, z: f64) {
        self.z = Some(match self.z {
            Some(current) if current >= z => current,
            _ => z,
        });
    }
}

/// An ordered, mutable run of toolpath points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathChunk {
    pub points: Vec<Point>,
    /// Whether the chunk forms a closed loop
    #[serde(default)]
    pub closed: bool,
    /// Slice height the chunk was produced at, for waterline chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl PathChunk {
    /// Creates an empty chunk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chunk from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

}

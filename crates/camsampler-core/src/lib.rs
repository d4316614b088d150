//! # camsampler Core
//!
//! Core types shared by the sampling pipeline:
//! toolpath points and chunks, the ambient containment region,
//! the read-only operation model and the sampler unit scaling.

pub mod ambient;
pub mod chunk;
pub mod error;
pub mod operation;
pub mod units;

pub use ambient::{AmbientRegion, Polygon};
pub use chunk::{PathChunk, Point, OUTSIDE_AMBIENT_Z, SKIPPED_SAMPLE_Z};
pub use error::{Error, GeometryError, Result};
pub use operation::{CutterType, Operation, Triangle, TriangleMesh};
pub use units::{to_external, to_internal, SAMPLER_SCALE};

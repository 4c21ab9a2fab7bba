//! Geometry primitives for crowd simulation: vectors, walls, and goals.
//!
//! This crate holds the pure geometric facts about a simulated room. It is
//! independent of the simulation engine: you can construct walls and goals
//! programmatically or deserialize them from a scenario file via
//! [`ShapeSpec`].

/// Error types used throughout the crate.
pub mod error;
/// Axis-aligned exit lines that agents try to cross.
pub mod goal;
/// Loose, deserializable shape descriptions used by scenario files.
pub mod shape_spec;
/// 2-D point and displacement arithmetic.
pub mod vector;
/// Circle and line-segment obstacles.
pub mod wall;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export goal types.
pub use goal::{Approach, Goal, Orientation};
/// Re-export the loose shape description.
pub use shape_spec::ShapeSpec;
/// Re-export the vector type.
pub use vector::Vector2;
/// Re-export wall types.
pub use wall::{Shape, ShapeKind, Wall};

//! # Trowel
//!
//! Incremental 2D Delaunay triangulations built point by point with the Bowyer-Watson
//! algorithm.
//!
//! # Features
//!  * An [Engine] inserting points one at a time into a mesh enclosed by a super triangle
//!  * Exact orientation and incircle predicates (via the `robust` crate)
//!  * Constraint aware triangulations: a [ConstraintFilter] withholds cavity edges that
//!    would equal or cross a constraint segment
//!  * Step by step execution with observable intermediate meshes, see [TriangulationSession]
//!  * Supports `f32` and `f64` coordinates
//!  * `no_std` support (with `alloc`)
//!  * Serde support with the `serde` feature
//!
//! # Cargo features
//!
//! The `std` feature is enabled by default. Disable default features to use `trowel` in
//! `no_std` environments. The `serde` feature adds `Serialize` and `Deserialize` impls for
//! points, edges and configurations.
//!
//! # Example
//! ```
//! use trowel::{DelaunayEngine, DelaunaySession, Point2, TriangulationConfig, TriangulationError};
//!
//! # fn main() -> Result<(), TriangulationError> {
//! let config = TriangulationConfig::new().with_bounds(0.0, 2.0);
//! let engine = DelaunayEngine::with_config(config, Default::default())?;
//!
//! let points = [(0.0, 0.0), (2.0, 0.0), (1.0, 1.5), (1.0, 0.5)].map(Point2::from);
//! let mut session = DelaunaySession::new(engine, points)?;
//!
//! let triangles = session.run()?;
//! assert_eq!(triangles.len(), 3);
//! # Ok(()) }
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod cdt;
mod config;
mod delaunay_core;
mod error;
mod point;
mod primitives;
mod session;

#[cfg(test)]
mod test_utilities;

pub use crate::cdt::{ConstraintFilter, EdgeFilter, Unconstrained};
pub use crate::config::{TriangulationConfig, MIN_SUPER_TRIANGLE_SCALE};
pub use crate::error::{ConfigError, TriangulationError};
pub use crate::point::{CoordinateNum, Point2};
pub use crate::primitives::{Edge, Triangle};
pub use crate::session::{ConstrainedSession, DelaunaySession, SessionStep, TriangulationSession};

pub use delaunay_core::math::{
    contained_in_circumcircle, on_segment, orientation, segments_intersect,
    validate_coordinate, validate_point, InsertionError, MAX_ALLOWED_VALUE, MIN_ALLOWED_VALUE,
};
pub use delaunay_core::{
    ConstrainedEngine, DelaunayEngine, Engine, EngineState, InsertionReport, Orientation, EPSILON,
};

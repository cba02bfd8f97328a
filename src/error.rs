use thiserror::Error;

use crate::{InsertionError, Point2};

/// Error returned by [TriangulationConfig::validate](crate::TriangulationConfig::validate).
#[derive(Copy, Clone, PartialEq, Debug, Error)]
pub enum ConfigError {
    /// The point generation bounds are empty, reversed or not finite.
    #[error("min_bound ({min}) must be finite and smaller than max_bound ({max})")]
    InvalidBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },

    /// The super triangle multiplier is not finite or too small to enclose the bounds.
    ///
    /// *See [MIN_SUPER_TRIANGLE_SCALE](crate::MIN_SUPER_TRIANGLE_SCALE)*
    #[error("super triangle scale must be finite and larger than 2.5, got {0}")]
    InvalidSuperTriangleScale(f64),

    /// The bounding extent handed to [Engine::bootstrap](crate::Engine::bootstrap) is not
    /// a positive, finite number.
    #[error("bounding scale must be positive and finite, got {0}")]
    InvalidBoundingScale(f64),
}

/// The error type used by [Engine](crate::Engine) and
/// [TriangulationSession](crate::TriangulationSession).
///
/// Every failing operation leaves the working mesh untouched.
#[derive(Copy, Clone, PartialEq, Debug, Error)]
pub enum TriangulationError {
    /// A point was inserted or the mesh finalized before the super triangle was created.
    #[error("the triangulation has not been bootstrapped")]
    NotBootstrapped,

    /// [Engine::bootstrap](crate::Engine::bootstrap) was called twice.
    #[error("the triangulation has already been bootstrapped")]
    AlreadyBootstrapped,

    /// A point was inserted after the super triangle had been stripped.
    #[error("the triangulation has already been finalized")]
    AlreadyFinalized,

    /// A point coordinate can not be handled by the exact predicates.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] InsertionError),

    /// Three collinear points were about to form a triangle.
    #[error("degenerate triangle ({a:?}, {b:?}, {c:?}) has zero area")]
    DegenerateTriangle {
        /// First vertex
        a: Point2<f64>,
        /// Second vertex
        b: Point2<f64>,
        /// Third vertex
        c: Point2<f64>,
    },

    /// The inserted point is equal to an existing vertex of the mesh.
    #[error("point {position:?} coincides with an existing vertex")]
    CoincidentVertex {
        /// The rejected position
        position: Point2<f64>,
    },

    /// The inserted point does not lie strictly inside the super triangle.
    #[error("point {position:?} lies outside of the super triangle")]
    OutsideSuperTriangle {
        /// The rejected position
        position: Point2<f64>,
    },

    /// No circumcircle of the working mesh contains the point.
    ///
    /// Happens for points inside a cavity that an [EdgeFilter](crate::EdgeFilter) left open.
    #[error("no triangle circumcircle contains point {position:?}")]
    EmptyCavity {
        /// The rejected position
        position: Point2<f64>,
    },

    /// The configuration used for bootstrapping is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

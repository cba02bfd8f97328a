use alloc::vec::Vec;

use rand::distributions::uniform::SampleUniform;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoordinateNum, Point2};

/// The smallest super triangle scale for which the whole square
/// `[-bounding_scale, bounding_scale]²` lies strictly inside the super triangle.
pub const MIN_SUPER_TRIANGLE_SCALE: f64 = 2.5;

/// Controls point generation and the size of the super triangle.
///
/// None of these values influence the triangulation itself, only the bootstrap geometry
/// and which points are generated.
///
/// The following parameters will be used by `Self::default` and [Self::new]:
/// * `min_bound`: 0
/// * `max_bound`: 10
/// * `max_point_count`: 10
/// * `super_triangle_scale`: 3
/// * `bounding_center`: the origin
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use trowel::{Point2, TriangulationConfig};
///
/// let config = TriangulationConfig::<f64>::new()
///     .with_bounds(-2.0, 2.0)
///     .with_max_point_count(25)
///     .with_super_triangle_scale(4.0);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.bounding_scale(), 2.0);
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let points = config.generate_points(&mut rng)?;
/// assert_eq!(points.len(), 25);
/// # Ok::<(), trowel::ConfigError>(())
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct TriangulationConfig<S> {
    min_bound: S,
    max_bound: S,
    max_point_count: usize,
    super_triangle_scale: S,
    bounding_center: Point2<S>,
}

impl<S: CoordinateNum> Default for TriangulationConfig<S> {
    fn default() -> Self {
        Self {
            min_bound: S::zero(),
            max_bound: S::from(10.0f32),
            max_point_count: 10,
            super_triangle_scale: S::from(3.0f32),
            bounding_center: Point2::new(S::zero(), S::zero()),
        }
    }
}

impl<S: CoordinateNum> TriangulationConfig<S> {
    /// Creates a new configuration.
    ///
    /// Refer to the [struct definition](Self) for the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the range in which [Self::generate_points] places points on both axes.
    pub fn with_bounds(mut self, min_bound: S, max_bound: S) -> Self {
        self.min_bound = min_bound;
        self.max_bound = max_bound;
        self
    }

    /// Sets the number of points generated by [Self::generate_points].
    pub fn with_max_point_count(mut self, max_point_count: usize) -> Self {
        self.max_point_count = max_point_count;
        self
    }

    /// Sets the size of the super triangle relative to the [bounding scale](Self::bounding_scale).
    ///
    /// Must be larger than [MIN_SUPER_TRIANGLE_SCALE].
    pub fn with_super_triangle_scale(mut self, super_triangle_scale: S) -> Self {
        self.super_triangle_scale = super_triangle_scale;
        self
    }

    /// Moves the super triangle. Defaults to the origin.
    pub fn with_bounding_center(mut self, bounding_center: Point2<S>) -> Self {
        self.bounding_center = bounding_center;
        self
    }

    /// Lower bound of generated coordinates.
    pub fn min_bound(&self) -> S {
        self.min_bound
    }

    /// Upper bound of generated coordinates.
    pub fn max_bound(&self) -> S {
        self.max_bound
    }

    /// Number of generated points.
    pub fn max_point_count(&self) -> usize {
        self.max_point_count
    }

    /// Super triangle multiplier.
    pub fn super_triangle_scale(&self) -> S {
        self.super_triangle_scale
    }

    /// Center of the super triangle.
    pub fn bounding_center(&self) -> Point2<S> {
        self.bounding_center
    }

    /// Returns the largest distance between the [bounding center](Self::bounding_center) and
    /// either bound, measured separately on both axes.
    ///
    /// Every point produced by [Self::generate_points] lies within
    /// `bounding_center ± bounding_scale` on both axes.
    pub fn bounding_scale(&self) -> S {
        let Point2 { x, y } = self.bounding_center;
        [
            self.min_bound - x,
            self.max_bound - x,
            self.min_bound - y,
            self.max_bound - y,
        ]
        .into_iter()
        .map(|offset| offset.abs())
        .fold(S::zero(), |largest, offset| {
            if offset > largest {
                offset
            } else {
                largest
            }
        })
    }

    /// Returns the corners of the square `[-1, 1]²`, scaled by the bounding scale and moved
    /// to the bounding center.
    pub fn bounds(&self) -> [Point2<S>; 4] {
        let scale = self.bounding_scale();
        let center = self.bounding_center;
        [
            Point2::new(scale, scale),
            Point2::new(-scale, scale),
            Point2::new(-scale, -scale),
            Point2::new(scale, -scale),
        ]
        .map(|corner| corner.add(center))
    }

    /// Checks that the bounds form a non empty, finite range and that the super triangle is
    /// large enough to contain them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min: f64 = self.min_bound.into();
        let max: f64 = self.max_bound.into();
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(ConfigError::InvalidBounds { min, max });
        }

        let scale: f64 = self.super_triangle_scale.into();
        if !(scale.is_finite() && scale > MIN_SUPER_TRIANGLE_SCALE) {
            return Err(ConfigError::InvalidSuperTriangleScale(scale));
        }

        let center = self.bounding_center.to_f64();
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        Ok(())
    }
}

impl<S: CoordinateNum + SampleUniform> TriangulationConfig<S> {
    /// Draws [Self::max_point_count] points uniformly from `[min_bound, max_bound)` on both axes.
    ///
    /// Fails if the configuration does not [validate](Self::validate).
    pub fn generate_points<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<Point2<S>>, ConfigError> {
        self.validate()?;
        Ok((0..self.max_point_count)
            .map(|_| {
                let x = rng.gen_range(self.min_bound..self.max_bound);
                let y = rng.gen_range(self.min_bound..self.max_bound);
                Point2::new(x, y)
            })
            .collect())
    }
}

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::math::validate_point;
use crate::{
    ConfigError, ConstraintFilter, CoordinateNum, Edge, EdgeFilter, Point2, Triangle,
    TriangulationConfig, TriangulationError, Unconstrained,
};

/// Lifecycle of an [Engine].
///
/// `Empty -> Bootstrapped -> Inserting -> Finalized`. No state can be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub enum EngineState {
    /// No super triangle exists yet.
    Empty,
    /// The mesh consists of the super triangle only.
    Bootstrapped,
    /// At least one point has been inserted.
    Inserting,
    /// The super triangle has been stripped. The mesh can not change anymore.
    Finalized,
}

/// Describes what a single call to [Engine::insert_point] did.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionReport<S: CoordinateNum> {
    /// The inserted position.
    pub point: Point2<S>,
    /// Number of triangles whose circumcircle contained the point.
    pub num_removed: usize,
    /// Boundary of the removed cavity, in the order the edges were first encountered.
    pub boundary_edges: Vec<Edge<S>>,
    /// Triangles connecting a boundary edge with the new point.
    pub created: Vec<Triangle<S>>,
    /// Boundary edges rejected by the engine's [EdgeFilter]. The cavity stays open there.
    pub withheld: Vec<Edge<S>>,
}

/// Incremental Bowyer-Watson triangulation engine.
///
/// The engine owns the working mesh and the super triangle enclosing all inserted points.
/// Every insertion removes the triangles whose circumcircle contains the new point and fills
/// the resulting cavity with triangles connecting its boundary edges to that point. The
/// filter `F` may veto single boundary edges, see [EdgeFilter].
///
/// # Type parameters
///  * `S: CoordinateNum` The coordinate type, usually `f64`.
///  * `F: EdgeFilter<S>` The cavity filter. Defaults to [Unconstrained].
///
/// # Example
/// ```
/// use trowel::{DelaunayEngine, Point2, TriangulationError};
///
/// fn main() -> Result<(), TriangulationError> {
///     let mut engine = DelaunayEngine::<f64>::default();
///     engine.bootstrap(1.0, Point2::new(0.0, 0.0))?;
///
///     for point in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
///         engine.insert_point(point.into())?;
///     }
///
///     let triangles = engine.finalize()?;
///     assert_eq!(triangles.len(), 2);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Engine<S: CoordinateNum, F = Unconstrained> {
    config: TriangulationConfig<S>,
    filter: F,
    state: EngineState,
    super_triangle: Option<Triangle<S>>,
    triangles: Vec<Triangle<S>>,
    final_triangles: Vec<Triangle<S>>,
    boundary_edges: Vec<Edge<S>>,
    num_inserted: usize,
}

/// An unconstrained Delaunay triangulation engine.
pub type DelaunayEngine<S> = Engine<S, Unconstrained>;

/// A triangulation engine respecting a set of constraint segments.
pub type ConstrainedEngine<S> = Engine<S, ConstraintFilter<S>>;

impl<S: CoordinateNum, F: EdgeFilter<S> + Default> Default for Engine<S, F> {
    fn default() -> Self {
        Engine::new(F::default())
    }
}

impl<S: CoordinateNum, F: EdgeFilter<S>> Engine<S, F> {
    /// Creates an empty engine using the default [TriangulationConfig].
    pub fn new(filter: F) -> Self {
        Engine {
            config: TriangulationConfig::default(),
            filter,
            state: EngineState::Empty,
            super_triangle: None,
            triangles: Vec::new(),
            final_triangles: Vec::new(),
            boundary_edges: Vec::new(),
            num_inserted: 0,
        }
    }

    /// Creates an empty engine after validating `config`.
    pub fn with_config(config: TriangulationConfig<S>, filter: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut result = Self::new(filter);
        result.config = config;
        Ok(result)
    }

    /// Returns the configuration used for bootstrapping.
    pub fn config(&self) -> &TriangulationConfig<S> {
        &self.config
    }

    /// Returns the engine's edge filter.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns the super triangle, if the engine has been bootstrapped.
    pub fn super_triangle(&self) -> Option<&Triangle<S>> {
        self.super_triangle.as_ref()
    }

    /// Returns the number of successfully inserted points.
    pub fn num_inserted(&self) -> usize {
        self.num_inserted
    }

    /// Creates the super triangle and makes it the only triangle of the mesh.
    ///
    /// The triangle is a wide isosceles triangle around `bounding_center` whose size is
    /// `bounding_scale` times the configured
    /// [super triangle scale](TriangulationConfig::super_triangle_scale). `bounding_scale`
    /// should be the largest distance of an inserted coordinate from `bounding_center`, measured
    /// separately on both axes.
    pub fn bootstrap(
        &mut self,
        bounding_scale: S,
        bounding_center: Point2<S>,
    ) -> Result<(), TriangulationError> {
        if self.state != EngineState::Empty {
            return Err(TriangulationError::AlreadyBootstrapped);
        }

        let scale_f64: f64 = bounding_scale.into();
        if !(scale_f64.is_finite() && scale_f64 > 0.0) {
            return Err(ConfigError::InvalidBoundingScale(scale_f64).into());
        }
        validate_point(bounding_center)?;

        let master_scale = bounding_scale * self.config.super_triangle_scale();
        let half = master_scale / S::from(2.0f32);
        let Point2 { x, y } = bounding_center;

        let a = Point2::new(x - master_scale, y - half);
        let b = Point2::new(x + master_scale, y - half);
        let c = Point2::new(x, y + master_scale);
        for vertex in [a, b, c] {
            validate_point(vertex)?;
        }

        let super_triangle = Triangle::new(a, b, c)?;
        debug!(?super_triangle, "bootstrapped triangulation");

        self.super_triangle = Some(super_triangle);
        self.triangles.clear();
        self.triangles.push(super_triangle);
        self.state = EngineState::Bootstrapped;
        Ok(())
    }

    /// Bootstraps the engine with the bounding scale and center of its configuration.
    ///
    /// *See [Engine::bootstrap] and [TriangulationConfig::bounding_scale]*
    pub fn bootstrap_from_config(&mut self) -> Result<(), TriangulationError> {
        let scale = self.config.bounding_scale();
        let center = self.config.bounding_center();
        self.bootstrap(scale, center)
    }

    /// Inserts a point using the Bowyer-Watson cavity algorithm.
    ///
    /// 1. Collects all triangles whose circumcircle strictly contains `point`. Each of their
    ///    edges is counted; edges counted exactly once form the cavity boundary.
    /// 2. Removes those triangles.
    /// 3. Connects each boundary edge to `point`, unless the engine's filter blocks the edge.
    ///
    /// The operation is transactional: if any error is returned, the mesh is unchanged.
    ///
    /// # Errors
    ///  * [TriangulationError::NotBootstrapped] and [TriangulationError::AlreadyFinalized]
    ///    for calls outside of the insertion phase
    ///  * [TriangulationError::InvalidCoordinate] for NaN, infinite or tiny coordinates
    ///  * [TriangulationError::OutsideSuperTriangle] if the point does not lie strictly
    ///    inside the super triangle
    ///  * [TriangulationError::CoincidentVertex] if the point is already a mesh vertex
    ///  * [TriangulationError::EmptyCavity] if no circumcircle contains the point
    ///  * [TriangulationError::DegenerateTriangle] if closing the cavity would create a
    ///    zero area triangle
    pub fn insert_point(
        &mut self,
        point: Point2<S>,
    ) -> Result<InsertionReport<S>, TriangulationError> {
        let super_triangle = match (self.state, self.super_triangle) {
            (EngineState::Empty, _) | (_, None) => return Err(TriangulationError::NotBootstrapped),
            (EngineState::Finalized, _) => return Err(TriangulationError::AlreadyFinalized),
            (_, Some(super_triangle)) => super_triangle,
        };

        validate_point(point)?;
        if !super_triangle.is_point_inside(point) {
            return Err(TriangulationError::OutsideSuperTriangle {
                position: point.to_f64(),
            });
        }
        if self.triangles.iter().any(|triangle| triangle.contains(point)) {
            return Err(TriangulationError::CoincidentVertex {
                position: point.to_f64(),
            });
        }

        let mut bad_triangles: SmallVec<[usize; 16]> = SmallVec::new();
        let mut edge_counts: HashMap<Edge<S>, usize> = HashMap::new();
        let mut edge_order = Vec::new();

        for (index, triangle) in self.triangles.iter().enumerate() {
            if triangle.is_point_in_circumcircle(point) {
                bad_triangles.push(index);
                for edge in triangle.edges() {
                    let count = edge_counts.entry(edge).or_insert(0);
                    if *count == 0 {
                        edge_order.push(edge);
                    }
                    *count += 1;
                }
            }
        }

        if bad_triangles.is_empty() {
            return Err(TriangulationError::EmptyCavity {
                position: point.to_f64(),
            });
        }

        let boundary_edges: Vec<_> = edge_order
            .into_iter()
            .filter(|edge| edge_counts.get(edge) == Some(&1))
            .collect();

        let mut created = Vec::with_capacity(boundary_edges.len());
        let mut withheld = Vec::new();
        for edge in &boundary_edges {
            if self.filter.is_blocked(edge) {
                trace!(?edge, "edge filter withheld cavity boundary edge");
                withheld.push(*edge);
            } else {
                created.push(Triangle::new(edge.start, edge.end, point)?);
            }
        }

        // Indices are ascending, removing from the back keeps the remaining ones valid
        for index in bad_triangles.iter().rev() {
            self.triangles.swap_remove(*index);
        }
        self.triangles.extend(created.iter().copied());
        self.boundary_edges.clone_from(&boundary_edges);
        self.state = EngineState::Inserting;
        self.num_inserted += 1;

        debug!(
            ?point,
            removed = bad_triangles.len(),
            boundary = boundary_edges.len(),
            created = created.len(),
            withheld = withheld.len(),
            "inserted point"
        );

        Ok(InsertionReport {
            point,
            num_removed: bad_triangles.len(),
            boundary_edges,
            created,
            withheld,
        })
    }

    /// Removes every triangle touching a super triangle vertex and returns the remainder.
    ///
    /// Calling this method again returns the same triangles.
    pub fn finalize(&mut self) -> Result<&[Triangle<S>], TriangulationError> {
        let super_triangle = match (self.state, self.super_triangle) {
            (EngineState::Finalized, _) => return Ok(self.final_triangles.as_slice()),
            (EngineState::Empty, _) | (_, None) => return Err(TriangulationError::NotBootstrapped),
            (_, Some(super_triangle)) => super_triangle,
        };

        let num_before = self.triangles.len();
        let [a, b, c] = super_triangle.vertices();
        self.triangles.retain(|triangle| {
            !(triangle.contains(a) || triangle.contains(b) || triangle.contains(c))
        });

        debug!(
            removed = num_before - self.triangles.len(),
            kept = self.triangles.len(),
            "finalized triangulation"
        );

        self.final_triangles.clone_from(&self.triangles);
        self.state = EngineState::Finalized;
        Ok(self.final_triangles.as_slice())
    }

    /// Returns the triangles of the working mesh.
    ///
    /// Before finalization, this includes triangles connected to the super triangle.
    pub fn current_triangles(&self) -> &[Triangle<S>] {
        &self.triangles
    }

    /// Returns the finalized mesh or `None` if [Engine::finalize] has not been called yet.
    pub fn final_triangles(&self) -> Option<&[Triangle<S>]> {
        if self.state == EngineState::Finalized {
            Some(self.final_triangles.as_slice())
        } else {
            None
        }
    }

    /// Returns the cavity boundary edges of the most recent insertion.
    pub fn boundary_edges(&self) -> &[Edge<S>] {
        &self.boundary_edges
    }

    /// Returns all distinct vertices of the working mesh.
    pub fn vertices(&self) -> Vec<Point2<S>> {
        let mut result: Vec<Point2<S>> = Vec::new();
        for vertex in self.triangles.iter().flat_map(|triangle| triangle.vertices()) {
            if !result.contains(&vertex) {
                result.push(vertex);
            }
        }
        result
    }

    /// Checks the empty circumcircle property of the working mesh.
    ///
    /// Returns `false` if any mesh vertex lies strictly inside the circumcircle of any triangle,
    /// unless the filter reports the line from that vertex to the triangle's centroid as
    /// obstructed. Runs in `O(n^2)`.
    pub fn is_delaunay(&self) -> bool {
        is_delaunay_mesh(&self.triangles, &self.vertices(), &self.filter)
    }

    /// Discards all triangles and returns to [EngineState::Empty].
    ///
    /// Configuration and filter are kept.
    pub fn reset(&mut self) {
        self.state = EngineState::Empty;
        self.super_triangle = None;
        self.triangles.clear();
        self.final_triangles.clear();
        self.boundary_edges.clear();
        self.num_inserted = 0;
    }
}

/// Returns `true` if no vertex lies strictly inside the circumcircle of any triangle, unless
/// `filter` obstructs the line between that vertex and the triangle's centroid.
pub(crate) fn is_delaunay_mesh<S: CoordinateNum, F: EdgeFilter<S>>(
    triangles: &[Triangle<S>],
    vertices: &[Point2<S>],
    filter: &F,
) -> bool {
    let three = S::from(3.0f32);
    triangles.iter().all(|triangle| {
        let [a, b, c] = triangle.vertices();
        let sum = a.add(b).add(c);
        let centroid = Point2::new(sum.x / three, sum.y / three);
        vertices.iter().all(|vertex| {
            !triangle.is_point_in_circumcircle(*vertex) || filter.obstructs(*vertex, centroid)
        })
    })
}

#[cfg(test)]
mod test {
    use alloc::vec::Vec;

    use super::{is_delaunay_mesh, EngineState};
    use crate::test_utilities::{random_points_in_range, SEED, SEED2};
    use crate::{
        ConfigError, ConstrainedEngine, ConstraintFilter, DelaunayEngine, Edge, EdgeFilter,
        Engine, Point2, Triangle, TriangulationConfig, TriangulationError, Unconstrained,
    };

    type Delaunay = DelaunayEngine<f64>;

    fn unit_square() -> [Point2<f64>; 4] {
        [
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
        ]
    }

    fn bootstrapped(scale: f64) -> Result<Delaunay, TriangulationError> {
        let mut engine = Delaunay::default();
        engine.bootstrap(scale, Point2::new(0.0, 0.0))?;
        Ok(engine)
    }

    #[test]
    fn test_state_machine() -> Result<(), TriangulationError> {
        let mut engine = Delaunay::default();
        assert_eq!(engine.state(), EngineState::Empty);
        assert_eq!(
            engine.insert_point(Point2::new(0.0, 0.0)),
            Err(TriangulationError::NotBootstrapped)
        );
        assert_eq!(
            engine.finalize().map(|triangles| triangles.len()),
            Err(TriangulationError::NotBootstrapped)
        );

        engine.bootstrap(1.0, Point2::new(0.0, 0.0))?;
        assert_eq!(engine.state(), EngineState::Bootstrapped);
        assert_eq!(engine.current_triangles().len(), 1);
        assert_eq!(
            engine.bootstrap(1.0, Point2::new(0.0, 0.0)),
            Err(TriangulationError::AlreadyBootstrapped)
        );

        engine.insert_point(Point2::new(0.25, 0.5))?;
        assert_eq!(engine.state(), EngineState::Inserting);
        assert!(engine.final_triangles().is_none());

        engine.finalize()?;
        assert_eq!(engine.state(), EngineState::Finalized);
        assert_eq!(
            engine.insert_point(Point2::new(0.5, 0.5)),
            Err(TriangulationError::AlreadyFinalized)
        );

        engine.reset();
        assert_eq!(engine.state(), EngineState::Empty);
        assert!(engine.current_triangles().is_empty());
        Ok(())
    }

    #[test]
    fn test_super_triangle_geometry() -> Result<(), TriangulationError> {
        let mut engine = Delaunay::default();
        engine.bootstrap(2.0, Point2::new(1.0, -1.0))?;
        let super_triangle = engine.super_triangle().copied();
        let vertices = super_triangle.map(|triangle| triangle.vertices());
        // Default super triangle scale is 3
        assert_eq!(
            vertices,
            Some([
                Point2::new(-5.0, -4.0),
                Point2::new(7.0, -4.0),
                Point2::new(1.0, 5.0),
            ])
        );
        Ok(())
    }

    #[test]
    fn test_invalid_bootstrap() {
        let mut engine = Delaunay::default();
        assert_eq!(
            engine.bootstrap(0.0, Point2::new(0.0, 0.0)),
            Err(TriangulationError::InvalidConfig(
                ConfigError::InvalidBoundingScale(0.0)
            ))
        );
        assert!(engine.bootstrap(f64::NAN, Point2::new(0.0, 0.0)).is_err());
        assert!(engine.bootstrap(1.0, Point2::new(f64::NAN, 0.0)).is_err());
        assert_eq!(engine.state(), EngineState::Empty);
    }

    #[test]
    fn test_unit_square() -> Result<(), TriangulationError> {
        let mut engine = bootstrapped(1.0)?;
        let points = unit_square();
        for point in points {
            engine.insert_point(point)?;
        }

        let triangles = engine.finalize()?.to_vec();
        assert_eq!(triangles.len(), 2);

        let shared: Vec<Edge<f64>> = triangles[0]
            .edges()
            .into_iter()
            .filter(|edge| triangles[1].edges().contains(edge))
            .collect();
        assert_eq!(shared.len(), 1);
        let diagonal = shared[0];
        assert!(
            diagonal == Edge::new(points[0], points[2])
                || diagonal == Edge::new(points[1], points[3])
        );

        for triangle in &triangles {
            for point in points {
                assert!(!triangle.is_point_in_circumcircle(point));
            }
        }
        Ok(())
    }

    #[test]
    fn test_finalize_is_idempotent() -> Result<(), TriangulationError> {
        let mut engine = bootstrapped(1.0)?;
        for point in random_points_in_range(1.0, 50, SEED) {
            engine.insert_point(point)?;
        }
        let first = engine.finalize()?.to_vec();
        let second = engine.finalize()?.to_vec();
        assert_eq!(first, second);
        assert_eq!(engine.final_triangles(), Some(first.as_slice()));
        assert_eq!(engine.current_triangles(), first.as_slice());
        Ok(())
    }

    #[test]
    fn test_finalize_strips_exactly_super_triangle_neighbors() -> Result<(), TriangulationError> {
        let mut engine = bootstrapped(1.0)?;
        for point in random_points_in_range(1.0, 100, SEED2) {
            engine.insert_point(point)?;
        }
        let super_vertices = engine
            .super_triangle()
            .map(|triangle| triangle.vertices())
            .ok_or(TriangulationError::NotBootstrapped)?;
        let touches_super = |triangle: &crate::Triangle<f64>| {
            super_vertices.iter().any(|vertex| triangle.contains(*vertex))
        };

        let before = engine.current_triangles().to_vec();
        let expected: Vec<_> = before
            .iter()
            .filter(|triangle| !touches_super(*triangle))
            .copied()
            .collect();
        let removed = before.iter().filter(|triangle| touches_super(*triangle)).count();
        assert!(removed > 0);

        let after = engine.finalize()?;
        assert_eq!(after, expected.as_slice());
        assert_eq!(after.len() + removed, before.len());
        Ok(())
    }

    #[test]
    fn test_delaunay_property_random_points() -> Result<(), TriangulationError> {
        let points = random_points_in_range(10.0, 200, SEED);
        let mut engine = bootstrapped(10.0)?;
        for (index, point) in points.iter().enumerate() {
            engine.insert_point(*point)?;
            // Euler characteristic of a triangulation with a triangular hull
            assert_eq!(engine.current_triangles().len(), 2 * (index + 1) + 1);
        }
        assert!(engine.is_delaunay());

        let triangles = engine.finalize()?;
        for triangle in triangles {
            for point in &points {
                assert!(!triangle.is_point_in_circumcircle(*point));
            }
        }
        Ok(())
    }

    #[test]
    fn test_cavity_closure() -> Result<(), TriangulationError> {
        let mut engine = bootstrapped(1.0)?;
        for point in random_points_in_range(1.0, 100, SEED2) {
            let num_before = engine.current_triangles().len();
            let report = engine.insert_point(point)?;
            assert!(report.num_removed > 0);
            assert!(report.withheld.is_empty());
            assert_eq!(report.boundary_edges.len(), report.created.len());
            assert_eq!(engine.boundary_edges(), report.boundary_edges.as_slice());
            assert_eq!(
                engine.current_triangles().len(),
                num_before - report.num_removed + report.created.len()
            );
            for triangle in &report.created {
                assert!(triangle.contains(point));
            }
        }
        Ok(())
    }

    #[test]
    fn test_rejected_points_leave_mesh_untouched() -> Result<(), TriangulationError> {
        let mut engine = bootstrapped(1.0)?;
        engine.insert_point(Point2::new(0.5, 0.5))?;
        engine.insert_point(Point2::new(-0.5, 0.25))?;
        let before = engine.current_triangles().to_vec();

        assert_eq!(
            engine.insert_point(Point2::new(0.5, 0.5)),
            Err(TriangulationError::CoincidentVertex {
                position: Point2::new(0.5, 0.5)
            })
        );
        assert_eq!(
            engine.insert_point(Point2::new(100.0, 0.0)),
            Err(TriangulationError::OutsideSuperTriangle {
                position: Point2::new(100.0, 0.0)
            })
        );
        assert!(matches!(
            engine.insert_point(Point2::new(f64::NAN, 0.0)),
            Err(TriangulationError::InvalidCoordinate(_))
        ));

        // Super triangle vertices are mesh vertices, too
        let apex = engine
            .super_triangle()
            .map(|triangle| triangle.c())
            .ok_or(TriangulationError::NotBootstrapped)?;
        assert!(engine.insert_point(apex).is_err());

        assert_eq!(engine.current_triangles(), before.as_slice());
        assert_eq!(engine.num_inserted(), 2);
        Ok(())
    }

    #[test]
    fn test_point_on_existing_edge() -> Result<(), TriangulationError> {
        let mut engine = bootstrapped(1.0)?;
        for point in unit_square() {
            engine.insert_point(point)?;
        }
        // Both diagonals of the square pass through the origin
        engine.insert_point(Point2::new(0.0, 0.0))?;
        assert!(engine.is_delaunay());

        let triangles = engine.finalize()?;
        assert_eq!(triangles.len(), 4);
        for triangle in triangles {
            assert!(triangle.contains(Point2::new(0.0, 0.0)));
            assert!(triangle.area() > 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_with_config() -> Result<(), TriangulationError> {
        let config = TriangulationConfig::new()
            .with_bounds(-5.0, 5.0)
            .with_super_triangle_scale(4.0);
        let mut engine = Delaunay::with_config(config, Default::default())?;
        engine.bootstrap_from_config()?;
        let apex = engine.super_triangle().map(|triangle| triangle.c());
        assert_eq!(apex, Some(Point2::new(0.0, 20.0)));

        let invalid = TriangulationConfig::new().with_super_triangle_scale(-1.0);
        assert!(Delaunay::with_config(invalid, Default::default()).is_err());
        Ok(())
    }

    #[test]
    fn test_f32_coordinates() -> Result<(), TriangulationError> {
        let mut engine = DelaunayEngine::<f32>::default();
        engine.bootstrap(2.0, Point2::new(0.0, 0.0))?;
        engine.insert_point(Point2::new(0.0, 0.0))?;
        engine.insert_point(Point2::new(1.0, 0.0))?;
        engine.insert_point(Point2::new(0.0, 1.0))?;
        assert_eq!(engine.finalize()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_constrained_withholds_blocked_edges() -> Result<(), TriangulationError> {
        let wall = Edge::new(Point2::new(0.0, -1.0), Point2::new(0.0, 1.0));
        let mut engine = ConstrainedEngine::new(ConstraintFilter::new([wall]));
        engine.bootstrap(1.0, Point2::new(0.0, 0.0))?;

        for point in [Point2::new(-0.5, 0.0), Point2::new(0.5, 0.0)] {
            let report = engine.insert_point(point)?;
            assert_eq!(
                report.boundary_edges.len(),
                report.created.len() + report.withheld.len()
            );
            for edge in &report.withheld {
                assert!(edge.intersects(&wall));
            }
            for triangle in &report.created {
                for edge in triangle.edges() {
                    if !edge.has_endpoint(point) {
                        assert!(!edge.intersects(&wall));
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_insertion_does_not_depend_on_scale() -> Result<(), TriangulationError> {
        let shape = [(0.0, 0.0), (0.6, 0.1), (0.2, 0.7), (-0.5, 0.4), (-0.3, -0.6)];

        let mut num_final = Vec::new();
        for scale in [1.0, 1.0e-2, 1.0e-3, 1.0e-4] {
            let mut engine = Delaunay::default();
            engine.bootstrap(scale, Point2::new(0.0, 0.0))?;
            for (x, y) in shape {
                let report = engine.insert_point(Point2::new(x * scale, y * scale))?;
                assert!(report.num_removed > 0);
                assert_eq!(report.created.len(), report.boundary_edges.len());
            }
            assert_eq!(engine.num_inserted(), shape.len());
            assert_eq!(engine.current_triangles().len(), 2 * shape.len() + 1);
            assert!(engine.is_delaunay());
            num_final.push(engine.finalize()?.len());
        }

        assert!(num_final[0] > 0);
        assert!(num_final.iter().all(|num| *num == num_final[0]));
        Ok(())
    }

    struct BlockEverything;

    impl EdgeFilter<f64> for BlockEverything {
        fn is_blocked(&self, _: &Edge<f64>) -> bool {
            true
        }

        fn obstructs(&self, _: Point2<f64>, _: Point2<f64>) -> bool {
            true
        }
    }

    #[test]
    fn test_empty_cavity_is_rejected() -> Result<(), TriangulationError> {
        let mut engine = Engine::new(BlockEverything);
        engine.bootstrap(1.0, Point2::new(0.0, 0.0))?;

        let report = engine.insert_point(Point2::new(0.1, 0.2))?;
        assert_eq!(report.withheld.len(), 3);
        assert!(engine.current_triangles().is_empty());

        assert_eq!(
            engine.insert_point(Point2::new(-0.3, 0.1)),
            Err(TriangulationError::EmptyCavity {
                position: Point2::new(-0.3, 0.1)
            })
        );
        assert_eq!(engine.num_inserted(), 1);
        Ok(())
    }

    #[test]
    fn test_constrained_mesh_is_delaunay() -> Result<(), TriangulationError> {
        let wall = Edge::new(Point2::new(0.0, -1.0), Point2::new(0.0, 1.0));
        let mut engine = ConstrainedEngine::new(ConstraintFilter::new([wall]));
        engine.bootstrap(1.0, Point2::new(0.0, 0.0))?;

        let left = engine.insert_point(Point2::new(-0.5, 0.0))?;
        assert_eq!(left.withheld.len(), 0);
        let right = engine.insert_point(Point2::new(0.5, 0.0))?;
        assert_eq!(right.num_removed, 1);
        assert_eq!(right.created.len(), 2);
        assert_eq!(right.withheld.len(), 1);

        assert_eq!(engine.current_triangles().len(), 4);
        assert!(engine.is_delaunay());
        Ok(())
    }

    #[test]
    fn test_delaunay_check_ignores_obstructed_vertices() -> Result<(), TriangulationError> {
        let triangle = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        )?;
        // Circumcircle is centered at (1, 0) with radius 1
        let inside = Point2::new(1.0, -0.5);
        let mut vertices = triangle.vertices().to_vec();
        vertices.push(inside);

        assert!(!is_delaunay_mesh(&[triangle], &vertices, &Unconstrained));

        let separating = ConstraintFilter::new([Edge::new(
            Point2::new(0.0, -0.2),
            Point2::new(2.0, -0.2),
        )]);
        assert!(is_delaunay_mesh(&[triangle], &vertices, &separating));

        let elsewhere = ConstraintFilter::new([Edge::new(
            Point2::new(5.0, -1.0),
            Point2::new(5.0, 1.0),
        )]);
        assert!(!is_delaunay_mesh(&[triangle], &vertices, &elsewhere));
        Ok(())
    }
}

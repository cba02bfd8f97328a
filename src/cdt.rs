use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::delaunay_core::math;
use crate::{CoordinateNum, Edge, Point2};

/// Decides which cavity boundary edges may be closed off with a new triangle.
///
/// An [Engine](crate::Engine) consults its filter once per cavity boundary edge during
/// [insert_point](crate::Engine::insert_point). Two filters are bundled:
///  - [Unconstrained] never blocks anything and yields a plain Delaunay triangulation.
///  - [ConstraintFilter] blocks edges that equal or cross a fixed set of constraint segments.
pub trait EdgeFilter<S: CoordinateNum> {
    /// Returns `true` if no triangle may be built on top of `edge`.
    fn is_blocked(&self, edge: &Edge<S>) -> bool;

    /// Returns `true` if the straight line between `from` and `to` is obstructed.
    ///
    /// Used when validating the empty circumcircle property: a vertex inside a circumcircle
    /// is tolerated if it can not see the triangle.
    fn obstructs(&self, from: Point2<S>, to: Point2<S>) -> bool;
}

/// Edge filter of an unconstrained Delaunay triangulation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Unconstrained;

impl<S: CoordinateNum> EdgeFilter<S> for Unconstrained {
    fn is_blocked(&self, _: &Edge<S>) -> bool {
        false
    }

    fn obstructs(&self, _: Point2<S>, _: Point2<S>) -> bool {
        false
    }
}

/// Edge filter of a constrained triangulation.
///
/// Holds a fixed list of constraint segments, usually the outline of a shape. A cavity
/// boundary edge is blocked if it is equal to a constraint or crosses one. Blocked edges
/// are left open: the cavity is not closed on that side and no constraint edge is ever
/// restored by splitting or flipping.
///
/// The segments are not checked for closure or self intersections.
///
/// # Example
/// ```
/// use trowel::{ConstraintFilter, Edge, EdgeFilter, Point2};
///
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let filter = ConstraintFilter::from_polyline(square, true);
/// assert_eq!(filter.constraints().len(), 4);
///
/// // Equal to a constraint
/// assert!(filter.is_blocked(&Edge::new(square[1], square[0])));
/// // Crosses the right side of the square
/// assert!(filter.is_blocked(&Edge::new(Point2::new(0.5, 0.5), Point2::new(2.0, 0.5))));
/// // Only touches constraints at its end points
/// assert!(!filter.is_blocked(&Edge::new(square[0], square[2])));
/// ```
#[derive(Default, Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct ConstraintFilter<S> {
    constraints: Vec<Edge<S>>,
}

impl<S: CoordinateNum> ConstraintFilter<S> {
    /// Creates a filter from a list of constraint segments.
    pub fn new(constraints: impl IntoIterator<Item = Edge<S>>) -> Self {
        ConstraintFilter {
            constraints: constraints.into_iter().collect(),
        }
    }

    /// Creates a filter from a polyline connecting consecutive vertices.
    ///
    /// If `closed` is `true`, the last vertex is connected to the first one.
    pub fn from_polyline(vertices: impl IntoIterator<Item = Point2<S>>, closed: bool) -> Self {
        let vertices: Vec<_> = vertices.into_iter().collect();
        let mut constraints: Vec<_> = vertices
            .windows(2)
            .map(|pair| Edge::new(pair[0], pair[1]))
            .collect();

        if closed && vertices.len() > 2 {
            if let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) {
                constraints.push(Edge::new(last, first));
            }
        }

        ConstraintFilter { constraints }
    }

    /// Returns all constraint segments.
    pub fn constraints(&self) -> &[Edge<S>] {
        &self.constraints
    }

    /// Returns `true` if `edge` is equal to one of the constraint segments.
    pub fn is_constraint(&self, edge: &Edge<S>) -> bool {
        self.constraints.iter().any(|constraint| constraint == edge)
    }

    /// Returns the first constraint segment crossed by `edge`.
    pub fn crossed_constraint(&self, edge: &Edge<S>) -> Option<&Edge<S>> {
        self.constraints
            .iter()
            .find(|constraint| crosses(edge, constraint))
    }
}

impl<S: CoordinateNum> PartialEq for ConstraintFilter<S> {
    fn eq(&self, other: &Self) -> bool {
        self.constraints == other.constraints
    }
}

/// Returns `true` if `edge` and `constraint` intersect anywhere except at a common end point.
///
/// Segments that share an end point only cross if they overlap collinearly beyond it.
fn crosses<S: CoordinateNum>(edge: &Edge<S>, constraint: &Edge<S>) -> bool {
    match edge.shared_endpoint(constraint) {
        Some(shared) => {
            let edge_end = if edge.start == shared { edge.end } else { edge.start };
            let constraint_end = if constraint.start == shared {
                constraint.end
            } else {
                constraint.start
            };
            math::orientation(shared, edge_end, constraint_end).is_collinear()
                && (math::on_segment(shared, constraint_end, edge_end)
                    || math::on_segment(shared, edge_end, constraint_end))
        }
        None => edge.intersects(constraint),
    }
}

impl<S: CoordinateNum> EdgeFilter<S> for ConstraintFilter<S> {
    fn is_blocked(&self, edge: &Edge<S>) -> bool {
        self.is_constraint(edge) || self.crossed_constraint(edge).is_some()
    }

    fn obstructs(&self, from: Point2<S>, to: Point2<S>) -> bool {
        self.crossed_constraint(&Edge::new(from, to)).is_some()
    }
}

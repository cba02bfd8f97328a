//! Value types making up a mesh: undirected [Edge]s and counter clockwise [Triangle]s.

use core::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::delaunay_core::math;
use crate::{CoordinateNum, Orientation, Point2, TriangulationError};

/// An undirected edge defined by its two end points.
///
/// `Edge::new(a, b)` is equal to `Edge::new(b, a)` and both hash to the same value. Edges
/// containing NaN coordinates break this contract; such points are rejected before they
/// can enter a triangulation.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Edge<S> {
    /// The edge's first end point.
    pub start: Point2<S>,
    /// The edge's second end point.
    pub end: Point2<S>,
}

impl<S> Edge<S> {
    /// Creates a new edge between `start` and `end`.
    pub const fn new(start: Point2<S>, end: Point2<S>) -> Self {
        Edge { start, end }
    }
}

impl<S: CoordinateNum> Edge<S> {
    /// Returns the same edge with swapped end points.
    pub fn reversed(&self) -> Self {
        Edge::new(self.end, self.start)
    }

    /// Returns `true` if `point` is one of the edge's end points.
    pub fn has_endpoint(&self, point: Point2<S>) -> bool {
        self.start == point || self.end == point
    }

    /// Returns the end point shared with `other`, if any.
    pub fn shared_endpoint(&self, other: &Edge<S>) -> Option<Point2<S>> {
        if other.has_endpoint(self.start) {
            Some(self.start)
        } else if other.has_endpoint(self.end) {
            Some(self.end)
        } else {
            None
        }
    }

    /// Returns `true` if this edge and `other` share at least one point.
    ///
    /// *See [segments_intersect](crate::segments_intersect)*
    pub fn intersects(&self, other: &Edge<S>) -> bool {
        math::segments_intersect(self.start, self.end, other.start, other.end)
    }

    /// Returns the squared length of this edge.
    pub fn length_2(&self) -> S {
        self.start.distance_2(self.end)
    }
}

impl<S: CoordinateNum> PartialEq for Edge<S> {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl<S: CoordinateNum> Eq for Edge<S> {}

impl<S: CoordinateNum> Hash for Edge<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let start = self.start.hash_key();
        let end = self.end.hash_key();
        if start <= end {
            start.hash(state);
            end.hash(state);
        } else {
            end.hash(state);
            start.hash(state);
        }
    }
}

/// A non degenerate triangle.
///
/// The vertices are always stored in counter clockwise order, regardless of the order
/// in which they were passed to [Triangle::new]. The circumcircle test relies on this.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(crate = "serde"))]
pub struct Triangle<S> {
    a: Point2<S>,
    b: Point2<S>,
    c: Point2<S>,
}

impl<S: CoordinateNum> Triangle<S> {
    /// Creates a new triangle and reorders its vertices counter clockwise.
    ///
    /// Returns [TriangulationError::DegenerateTriangle] if the three points are collinear.
    ///
    /// # Example
    /// ```
    /// use trowel::{Point2, Triangle};
    ///
    /// # fn main() -> Result<(), trowel::TriangulationError> {
    /// let a = Point2::new(0.0, 0.0);
    /// let b = Point2::new(0.0, 1.0);
    /// let c = Point2::new(1.0, 0.0);
    ///
    /// // a -> b -> c is clockwise, hence b and c are swapped
    /// let triangle = Triangle::new(a, b, c)?;
    /// assert_eq!(triangle.vertices(), [a, c, b]);
    ///
    /// assert!(Triangle::new(a, b, Point2::new(0.0, 2.0)).is_err());
    /// # Ok(()) }
    /// ```
    pub fn new(a: Point2<S>, b: Point2<S>, c: Point2<S>) -> Result<Self, TriangulationError> {
        match math::orientation(a, b, c) {
            Orientation::CounterClockwise => Ok(Triangle { a, b, c }),
            Orientation::Clockwise => Ok(Triangle { a, b: c, c: b }),
            Orientation::Collinear => Err(TriangulationError::DegenerateTriangle {
                a: a.to_f64(),
                b: b.to_f64(),
                c: c.to_f64(),
            }),
        }
    }

    /// The first vertex.
    pub fn a(&self) -> Point2<S> {
        self.a
    }

    /// The second vertex.
    pub fn b(&self) -> Point2<S> {
        self.b
    }

    /// The third vertex.
    pub fn c(&self) -> Point2<S> {
        self.c
    }

    /// Returns all vertices in counter clockwise order.
    pub fn vertices(&self) -> [Point2<S>; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns the edges `a-b`, `b-c` and `c-a`.
    pub fn edges(&self) -> [Edge<S>; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    /// Returns `true` if `point` is equal to one of the triangle's vertices.
    pub fn contains(&self, point: Point2<S>) -> bool {
        self.a == point || self.b == point || self.c == point
    }

    /// Returns `true` if `point` lies strictly inside this triangle's circumcircle.
    pub fn is_point_in_circumcircle(&self, point: Point2<S>) -> bool {
        math::contained_in_circumcircle(self.a, self.b, self.c, point)
    }

    /// Returns `true` if `point` lies strictly inside this triangle.
    pub fn is_point_inside(&self, point: Point2<S>) -> bool {
        self.edges()
            .iter()
            .all(|edge| math::orientation(edge.start, edge.end, point).is_ccw())
    }

    /// Returns the circumcenter and the squared circumradius.
    pub fn circumcenter(&self) -> (Point2<f64>, f64) {
        math::circumcenter(self.vertices())
    }

    /// Returns the triangle's area.
    pub fn area(&self) -> f64 {
        math::triangle_area(self.vertices())
    }
}

impl<S: CoordinateNum> PartialEq for Triangle<S> {
    fn eq(&self, other: &Self) -> bool {
        // Both triangles are ccw, equal triangles can only differ by a rotation
        let [a, b, c] = other.vertices();
        [[a, b, c], [b, c, a], [c, a, b]]
            .iter()
            .any(|rotation| *rotation == self.vertices())
    }
}

use num_traits::Signed;
use thiserror::Error;

use super::orientation::{Orientation, EPSILON};
use crate::{CoordinateNum, Point2};

/// The error type used for validating point coordinates.
///
/// Vertices can be checked for validity by using [crate::validate_point].
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash, Error)]
pub enum InsertionError {
    /// A coordinate value was too small.
    ///
    /// The absolute value of any inserted vertex coordinate must either be zero or
    /// greater than or equal to [crate::MIN_ALLOWED_VALUE].
    #[error("coordinate is too small")]
    TooSmall,

    /// A coordinate value was too large.
    ///
    /// The absolute value of any inserted vertex coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE].
    #[error("coordinate is too large")]
    TooLarge,

    /// A coordinate value was NaN.
    #[error("coordinate is NaN")]
    NAN,
}

/// The smallest allowed coordinate value greater than zero. This value is equal to 2<sup>-142</sup>.
///
/// Smaller values can underflow the `f64` exponent while the exact predicates are evaluated.
///
/// *See also [validate_coordinate], [validate_point], [MAX_ALLOWED_VALUE]*
// Bounds from Shewchuk, "Adaptive Precision Floating-Point Arithmetic and Fast Robust
// Geometric Predicates": inputs with exponents in [-142, 201] neither overflow nor underflow.
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest allowed coordinate value. This value is equal to 2<sup>201</sup>.
///
/// *See also [validate_coordinate], [validate_point], [MIN_ALLOWED_VALUE]*
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Checks if a coordinate value is suitable for insertion into a triangulation.
///
/// Will return an error if and only if
///  - The absolute value of the coordinate is too small (See [MIN_ALLOWED_VALUE])
///  - The absolute value of the coordinate is too large (See [MAX_ALLOWED_VALUE])
///  - The coordinate is NaN (not a number)
///
/// Passing in any non-finite floating point number (e.g. `f32::NEG_INFINITY`) will
/// result in `Err(InsertionError::TooLarge)`.
pub fn validate_coordinate<S: CoordinateNum>(value: S) -> Result<(), InsertionError> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InsertionError::NAN)
    } else if as_f64.abs() < MIN_ALLOWED_VALUE && as_f64 != 0.0 {
        Err(InsertionError::TooSmall)
    } else if as_f64.abs() > MAX_ALLOWED_VALUE {
        Err(InsertionError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if both coordinates of a point are valid. See [validate_coordinate].
pub fn validate_point<S: CoordinateNum>(point: Point2<S>) -> Result<(), InsertionError> {
    validate_coordinate(point.x)?;
    validate_coordinate(point.y)?;
    Ok(())
}

fn to_robust_coord<S: CoordinateNum>(point: Point2<S>) -> robust::Coord<f64> {
    robust::Coord {
        x: point.x.into(),
        y: point.y.into(),
    }
}

/// Returns the largest absolute coordinate difference between `origin` and any of `others`.
fn max_offset<S: CoordinateNum>(origin: Point2<S>, others: &[Point2<S>]) -> f64 {
    let origin = origin.to_f64();
    others.iter().fold(0.0, |result, other| {
        let other = other.to_f64();
        let dx = Signed::abs(&(other.x - origin.x));
        let dy = Signed::abs(&(other.y - origin.y));
        let offset = if dx > dy { dx } else { dy };
        if offset > result {
            offset
        } else {
            result
        }
    })
}

/// Returns the orientation of the ordered triplet `(p, q, r)`.
///
/// The sign of the cross product `(q - p) x (r - q)` is evaluated exactly and then
/// compared against [EPSILON](crate::EPSILON) times the squared largest offset from `p`.
pub fn orientation<S: CoordinateNum>(p: Point2<S>, q: Point2<S>, r: Point2<S>) -> Orientation {
    let determinant = robust::orient2d(to_robust_coord(p), to_robust_coord(q), to_robust_coord(r));
    let scale = max_offset(p, &[q, r]);
    Orientation::from_determinant(determinant, EPSILON * scale * scale)
}

/// Returns `true` if `q` lies within the axis aligned bounding box spanned by `p` and `r`.
///
/// This is not a distance test. It is only meaningful once `p`, `q` and `r` are known to be
/// collinear.
pub fn on_segment<S: CoordinateNum>(p: Point2<S>, q: Point2<S>, r: Point2<S>) -> bool {
    let (min_x, max_x) = min_max(p.x, r.x);
    let (min_y, max_y) = min_max(p.y, r.y);
    q.x <= max_x && q.x >= min_x && q.y <= max_y && q.y >= min_y
}

fn min_max<S: CoordinateNum>(a: S, b: S) -> (S, S) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Returns `true` if the segments `p1 -> q1` and `p2 -> q2` share at least one point.
///
/// Segments that only touch (e.g. at a common endpoint) or overlap collinearly are
/// considered intersecting.
pub fn segments_intersect<S: CoordinateNum>(
    p1: Point2<S>,
    q1: Point2<S>,
    p2: Point2<S>,
    q2: Point2<S>,
) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // Each segment straddles the other
    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1.is_collinear() && on_segment(p1, p2, q1))
        || (o2.is_collinear() && on_segment(p1, q2, q1))
        || (o3.is_collinear() && on_segment(p2, p1, q2))
        || (o4.is_collinear() && on_segment(p2, q1, q2))
}

/// Returns `true` if `p` lies strictly inside the circumcircle of `v1, v2, v3`.
///
/// The vertices must be ordered counter clockwise. [Triangle](crate::Triangle) guarantees
/// this ordering on construction. The exact determinant must exceed
/// [EPSILON](crate::EPSILON) times the fourth power of the largest offset from `p`.
pub fn contained_in_circumcircle<S: CoordinateNum>(
    v1: Point2<S>,
    v2: Point2<S>,
    v3: Point2<S>,
    p: Point2<S>,
) -> bool {
    let scale = max_offset(p, &[v1, v2, v3]);
    let scale_2 = scale * scale;
    let determinant = robust::incircle(
        to_robust_coord(v1),
        to_robust_coord(v2),
        to_robust_coord(v3),
        to_robust_coord(p),
    );

    determinant > EPSILON * scale_2 * scale_2
}

/// Returns twice the signed area of a triangle. Positive for counter clockwise input.
pub fn signed_area_2<S: CoordinateNum>(positions: [Point2<S>; 3]) -> f64 {
    let [v0, v1, v2] = positions;
    robust::orient2d(to_robust_coord(v0), to_robust_coord(v1), to_robust_coord(v2))
}

/// Returns the area of a triangle.
pub fn triangle_area<S: CoordinateNum>(positions: [Point2<S>; 3]) -> f64 {
    Signed::abs(&signed_area_2(positions)) * 0.5
}

/// Returns the circumcenter and the squared circumradius of a non degenerate triangle.
pub fn circumcenter<S: CoordinateNum>(positions: [Point2<S>; 3]) -> (Point2<f64>, f64) {
    let [v0, v1, v2] = positions.map(Point2::to_f64);
    let b = v1.sub(v0);
    let c = v2.sub(v0);

    let d = 2.0 * (b.x * c.y - c.x * b.y);
    let len_b = b.length2();
    let len_c = c.length2();
    let d_inv = 1.0 / d;

    let x = (len_b * c.y - len_c * b.y) * d_inv;
    let y = (-len_b * c.x + len_c * b.x) * d_inv;
    let result = Point2::new(x, y);
    (result.add(v0), x * x + y * y)
}

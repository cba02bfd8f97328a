/// Relative tolerance shared by every predicate of this crate.
///
/// Determinants are compared against `EPSILON` times the matching power of the largest
/// coordinate offset involved: the square for orientation tests, the fourth power for
/// circumcircle tests. Smaller determinants are treated as zero. Results therefore do not
/// depend on the scale of the input. Using different tolerances for the two predicates
/// can produce missing or overlapping triangles.
pub const EPSILON: f64 = 1.0e-10;

/// Describes the orientation of an ordered point triplet `(p, q, r)`.
///
/// Created by [orientation](crate::orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The three points lie on a common line (within [EPSILON]).
    Collinear,
    /// `r` lies to the right of the directed line `p -> q`.
    Clockwise,
    /// `r` lies to the left of the directed line `p -> q`.
    CounterClockwise,
}

impl Orientation {
    #[inline]
    pub(crate) fn from_determinant(s: f64, tolerance: f64) -> Orientation {
        if s > tolerance {
            Orientation::CounterClockwise
        } else if s < -tolerance {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    /// Returns `true` if the triplet is collinear.
    #[inline]
    pub fn is_collinear(self) -> bool {
        self == Orientation::Collinear
    }

    /// Returns `true` if the triplet is ordered counter clockwise.
    ///
    /// For left-handed coordinate systems, this method returns if the triplet is ordered clockwise.
    pub fn is_ccw(self) -> bool {
        self == Orientation::CounterClockwise
    }

    /// Returns `true` if the triplet is ordered clockwise.
    pub fn is_cw(self) -> bool {
        self == Orientation::Clockwise
    }

    /// Returns the orientation of the reversed triplet.
    pub fn reversed(self) -> Orientation {
        match self {
            Orientation::Collinear => Orientation::Collinear,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

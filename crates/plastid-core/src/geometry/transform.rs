//! Affine transforms and local coordinate frames.
//!
//! Connector intermediate points are stored in the source document relative
//! to a local frame spanned by two participant anchor points. [`Frame`]
//! rebuilds that frame and [`Transform`] maps frame-local coordinates into
//! global map coordinates.

use thiserror::Error;

use super::Point;

/// Error raised by degenerate geometric input.
///
/// These conditions are never fatal to a conversion: callers fall back to the
/// identity frame (or the shape center) and record a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The two points defining a frame axis coincide.
    #[error("frame axis points coincide; falling back to the identity frame")]
    DegenerateFrame,
    /// The reference point of a border crossing equals the shape center.
    #[error("border reference point equals the shape center")]
    DegenerateReference,
}

/// A 2D affine transform.
///
/// Stored as the six coefficients of the matrix
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// ```
///
/// mapping `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`. Composition via
/// [`Transform::then`] is associative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A pure translation by `offset`
    pub fn translation(offset: Point) -> Self {
        Self {
            e: offset.x(),
            f: offset.y(),
            ..Self::identity()
        }
    }

    /// A transform with explicit basis vectors and origin.
    ///
    /// `x_basis` and `y_basis` are the images of the unit x and y vectors,
    /// `origin` the image of `(0, 0)`.
    pub fn from_basis(origin: Point, x_basis: Point, y_basis: Point) -> Self {
        Self {
            a: x_basis.x(),
            b: x_basis.y(),
            c: y_basis.x(),
            d: y_basis.y(),
            e: origin.x(),
            f: origin.y(),
        }
    }

    /// Applies the transform to a point
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x() + self.c * point.y() + self.e,
            self.b * point.x() + self.d * point.y() + self.f,
        )
    }

    /// Returns the transform equivalent to applying `self` first, then `next`
    pub fn then(&self, next: &Transform) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A local coordinate frame anchored at a segment between two points.
///
/// The frame's x-axis basis vector runs from `origin` to the x-axis point;
/// the y-axis basis is that vector rotated 90 degrees about the origin.
/// Frame-local `(u, v)` coordinates map to `origin + u * x_basis + v *
/// y_basis`, so `(0, 0)` lands on the origin and `(1, 0)` on the x-axis
/// point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    transform: Transform,
}

impl Frame {
    /// Builds the frame spanned by `origin` and `x_axis_point`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateFrame`] when the two points
    /// coincide; the frame would have no axis and any division by its length
    /// is undefined. Callers fall back to [`Frame::identity`].
    pub fn between(origin: Point, x_axis_point: Point) -> Result<Self, GeometryError> {
        let x_basis = x_axis_point.sub(origin);
        if x_basis.is_zero() {
            return Err(GeometryError::DegenerateFrame);
        }
        // Rotated 90 degrees in the y-down coordinate system.
        let y_basis = Point::new(-x_basis.y(), x_basis.x());
        Ok(Self {
            transform: Transform::from_basis(origin, x_basis, y_basis),
        })
    }

    /// The identity frame: local coordinates are global coordinates
    pub fn identity() -> Self {
        Self {
            transform: Transform::identity(),
        }
    }

    /// Maps a frame-local point to global coordinates
    pub fn to_global(&self, local: Point) -> Point {
        self.transform.apply(local)
    }

    /// The underlying affine transform
    pub fn as_transform(&self) -> Transform {
        self.transform
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn transform_strategy() -> impl Strategy<Value = Transform> {
        (
            point_strategy(),
            point_strategy(),
            point_strategy(),
        )
            .prop_map(|(origin, xb, yb)| Transform::from_basis(origin, xb, yb))
    }

    /// Composition must be associative: (t1;t2);t3 == t1;(t2;t3).
    fn check_compose_is_associative(
        t1: Transform,
        t2: Transform,
        t3: Transform,
        p: Point,
    ) -> Result<(), TestCaseError> {
        let left = t1.then(&t2).then(&t3).apply(p);
        let right = t1.then(&t2.then(&t3)).apply(p);
        prop_assert!(approx_eq!(f64, left.x(), right.x(), epsilon = 1e-6));
        prop_assert!(approx_eq!(f64, left.y(), right.y(), epsilon = 1e-6));
        Ok(())
    }

    /// Composing with the identity on either side changes nothing.
    fn check_identity_is_neutral(t: Transform, p: Point) -> Result<(), TestCaseError> {
        let id = Transform::identity();
        let left = id.then(&t).apply(p);
        let right = t.then(&id).apply(p);
        let direct = t.apply(p);
        prop_assert!(approx_eq!(f64, left.x(), direct.x(), epsilon = 1e-9));
        prop_assert!(approx_eq!(f64, left.y(), direct.y(), epsilon = 1e-9));
        prop_assert!(approx_eq!(f64, right.x(), direct.x(), epsilon = 1e-9));
        prop_assert!(approx_eq!(f64, right.y(), direct.y(), epsilon = 1e-9));
        Ok(())
    }

    proptest! {
        #[test]
        fn compose_is_associative(
            t1 in transform_strategy(),
            t2 in transform_strategy(),
            t3 in transform_strategy(),
            p in point_strategy(),
        ) {
            check_compose_is_associative(t1, t2, t3, p)?;
        }

        #[test]
        fn identity_is_neutral(t in transform_strategy(), p in point_strategy()) {
            check_identity_is_neutral(t, p)?;
        }
    }
}

//! Named anchor points and boundary crossings on glyph shapes.
//!
//! Connectors terminate either on one of 17 named anchors (the shape center
//! plus 16 compass directions) or, when the document gives no explicit
//! anchor, on the point where the segment from the shape's center to a
//! reference point crosses the shape's boundary.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Bounds, Point, transform::GeometryError};

/// One of the 17 named attachment points on a shape.
///
/// The compass names match the vocabulary of the source documents: the four
/// cardinal directions, the four diagonals, and the eight intermediate
/// directions, plus the shape center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    Center,
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

impl Anchor {
    /// All 17 anchors, compass order starting north, center last.
    pub const ALL: [Anchor; 17] = [
        Anchor::North,
        Anchor::NorthNorthEast,
        Anchor::NorthEast,
        Anchor::EastNorthEast,
        Anchor::East,
        Anchor::EastSouthEast,
        Anchor::SouthEast,
        Anchor::SouthSouthEast,
        Anchor::South,
        Anchor::SouthSouthWest,
        Anchor::SouthWest,
        Anchor::WestSouthWest,
        Anchor::West,
        Anchor::WestNorthWest,
        Anchor::NorthWest,
        Anchor::NorthNorthWest,
        Anchor::Center,
    ];

    /// The angle of the anchor direction in radians, measured from east,
    /// increasing toward north. `None` for the center anchor.
    fn direction_angle(self) -> Option<f64> {
        let sixteenth = std::f64::consts::PI / 8.0;
        let step = match self {
            Anchor::Center => return None,
            Anchor::East => 0.0,
            Anchor::EastNorthEast => 1.0,
            Anchor::NorthEast => 2.0,
            Anchor::NorthNorthEast => 3.0,
            Anchor::North => 4.0,
            Anchor::NorthNorthWest => 5.0,
            Anchor::NorthWest => 6.0,
            Anchor::WestNorthWest => 7.0,
            Anchor::West => 8.0,
            Anchor::WestSouthWest => 9.0,
            Anchor::SouthWest => 10.0,
            Anchor::SouthSouthWest => 11.0,
            Anchor::South => 12.0,
            Anchor::SouthSouthEast => 13.0,
            Anchor::SouthEast => 14.0,
            Anchor::EastSouthEast => 15.0,
        };
        Some(step * sixteenth)
    }
}

impl FromStr for Anchor {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CENTER" => Ok(Anchor::Center),
            "N" => Ok(Anchor::North),
            "NNE" => Ok(Anchor::NorthNorthEast),
            "NE" => Ok(Anchor::NorthEast),
            "ENE" => Ok(Anchor::EastNorthEast),
            "E" => Ok(Anchor::East),
            "ESE" => Ok(Anchor::EastSouthEast),
            "SE" => Ok(Anchor::SouthEast),
            "SSE" => Ok(Anchor::SouthSouthEast),
            "S" => Ok(Anchor::South),
            "SSW" => Ok(Anchor::SouthSouthWest),
            "SW" => Ok(Anchor::SouthWest),
            "WSW" => Ok(Anchor::WestSouthWest),
            "W" => Ok(Anchor::West),
            "WNW" => Ok(Anchor::WestNorthWest),
            "NW" => Ok(Anchor::NorthWest),
            "NNW" => Ok(Anchor::NorthNorthWest),
            _ => Err("Unknown anchor name"),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anchor::Center => "CENTER",
            Anchor::North => "N",
            Anchor::NorthNorthEast => "NNE",
            Anchor::NorthEast => "NE",
            Anchor::EastNorthEast => "ENE",
            Anchor::East => "E",
            Anchor::EastSouthEast => "ESE",
            Anchor::SouthEast => "SE",
            Anchor::SouthSouthEast => "SSE",
            Anchor::South => "S",
            Anchor::SouthSouthWest => "SSW",
            Anchor::SouthWest => "SW",
            Anchor::WestSouthWest => "WSW",
            Anchor::West => "W",
            Anchor::WestNorthWest => "WNW",
            Anchor::NorthWest => "NW",
            Anchor::NorthNorthWest => "NNW",
        };
        write!(f, "{name}")
    }
}

/// The outline family of a glyph shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeClass {
    /// Rectangular outline (species glyphs, square compartments)
    #[default]
    Rectangle,
    /// Elliptical outline (oval compartments, ions)
    Ellipse,
}

/// A positioned shape: an outline class over a bounding box.
///
/// This is the geometric view of a glyph that the connector-routing code
/// works against; it knows nothing about the glyph's semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    class: ShapeClass,
    bounds: Bounds,
}

impl Shape {
    pub fn new(class: ShapeClass, bounds: Bounds) -> Self {
        Self { class, bounds }
    }

    /// Rectangle shorthand
    pub fn rectangle(bounds: Bounds) -> Self {
        Self::new(ShapeClass::Rectangle, bounds)
    }

    /// Ellipse shorthand
    pub fn ellipse(bounds: Bounds) -> Self {
        Self::new(ShapeClass::Ellipse, bounds)
    }

    /// The outline class of the shape
    pub fn class(self) -> ShapeClass {
        self.class
    }

    /// The bounding box of the shape
    pub fn bounds(self) -> Bounds {
        self.bounds
    }

    /// The center of the shape
    pub fn center(self) -> Point {
        self.bounds.center()
    }

    /// Returns the global coordinate of a named anchor on this shape.
    ///
    /// Rectangles place the intermediate compass anchors at quarter-side
    /// offsets from the cardinal midpoints; ellipses place every compass
    /// anchor on the outline at its 22.5-degree step.
    pub fn anchor_point(self, anchor: Anchor) -> Point {
        match self.class {
            ShapeClass::Rectangle => self.rectangle_anchor(anchor),
            ShapeClass::Ellipse => match anchor.direction_angle() {
                None => self.center(),
                Some(angle) => {
                    let center = self.center();
                    let rx = self.bounds.width() / 2.0;
                    let ry = self.bounds.height() / 2.0;
                    // Y grows downward, so north is the negative sine direction.
                    Point::new(
                        center.x() + rx * angle.cos(),
                        center.y() - ry * angle.sin(),
                    )
                }
            },
        }
    }

    fn rectangle_anchor(self, anchor: Anchor) -> Point {
        let b = self.bounds;
        let center = b.center();
        let (cx, cy) = (center.x(), center.y());
        let quarter_w = b.width() / 4.0;
        let quarter_h = b.height() / 4.0;
        match anchor {
            Anchor::Center => center,
            Anchor::North => Point::new(cx, b.min_y()),
            Anchor::NorthNorthEast => Point::new(cx + quarter_w, b.min_y()),
            Anchor::NorthEast => Point::new(b.max_x(), b.min_y()),
            Anchor::EastNorthEast => Point::new(b.max_x(), cy - quarter_h),
            Anchor::East => Point::new(b.max_x(), cy),
            Anchor::EastSouthEast => Point::new(b.max_x(), cy + quarter_h),
            Anchor::SouthEast => Point::new(b.max_x(), b.max_y()),
            Anchor::SouthSouthEast => Point::new(cx + quarter_w, b.max_y()),
            Anchor::South => Point::new(cx, b.max_y()),
            Anchor::SouthSouthWest => Point::new(cx - quarter_w, b.max_y()),
            Anchor::SouthWest => Point::new(b.min_x(), b.max_y()),
            Anchor::WestSouthWest => Point::new(b.min_x(), cy + quarter_h),
            Anchor::West => Point::new(b.min_x(), cy),
            Anchor::WestNorthWest => Point::new(b.min_x(), cy - quarter_h),
            Anchor::NorthWest => Point::new(b.min_x(), b.min_y()),
            Anchor::NorthNorthWest => Point::new(cx - quarter_w, b.min_y()),
        }
    }

    /// Returns the point where the segment from the shape center to
    /// `reference` crosses the shape boundary.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateReference`] when `reference`
    /// coincides with the center (or the shape has collapsed to a point);
    /// there is no defined direction to cross in, and callers fall back to
    /// the center.
    pub fn border_point(self, reference: Point) -> Result<Point, GeometryError> {
        let center = self.center();
        let d = reference.sub(center);
        if d.is_zero() {
            return Err(GeometryError::DegenerateReference);
        }
        let half_w = self.bounds.width() / 2.0;
        let half_h = self.bounds.height() / 2.0;
        let scale = match self.class {
            ShapeClass::Rectangle => {
                let rx = ratio(d.x(), half_w);
                let ry = ratio(d.y(), half_h);
                rx.max(ry)
            }
            ShapeClass::Ellipse => {
                let rx = ratio(d.x(), half_w);
                let ry = ratio(d.y(), half_h);
                (rx * rx + ry * ry).sqrt()
            }
        };
        if !scale.is_finite() || scale == 0.0 {
            return Err(GeometryError::DegenerateReference);
        }
        Ok(center.add(d.scale(1.0 / scale)))
    }
}

/// Directional extent of `delta` in units of the shape half-extent.
/// Infinite when the half-extent is collapsed but the delta is not.
fn ratio(delta: f64, half_extent: f64) -> f64 {
    if delta == 0.0 {
        0.0
    } else if half_extent <= 0.0 {
        f64::INFINITY
    } else {
        delta.abs() / half_extent
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::geometry::Size;

    fn unit_rect() -> Shape {
        Shape::rectangle(Bounds::from_center(Point::new(0.0, 0.0), Size::new(20.0, 10.0)))
    }

    #[test]
    fn test_anchor_parse_roundtrip() {
        for anchor in Anchor::ALL {
            let name = anchor.to_string();
            assert_eq!(name.parse::<Anchor>().unwrap(), anchor);
        }
    }

    #[test]
    fn test_anchor_parse_rejects_unknown_names() {
        assert!("NORTHISH".parse::<Anchor>().is_err());
        assert!("INACTIVE".parse::<Anchor>().is_err());
    }

    #[test]
    fn test_rectangle_cardinal_anchors() {
        let shape = unit_rect();
        assert_eq!(shape.anchor_point(Anchor::North), Point::new(0.0, -5.0));
        assert_eq!(shape.anchor_point(Anchor::East), Point::new(10.0, 0.0));
        assert_eq!(shape.anchor_point(Anchor::South), Point::new(0.0, 5.0));
        assert_eq!(shape.anchor_point(Anchor::West), Point::new(-10.0, 0.0));
        assert_eq!(shape.anchor_point(Anchor::Center), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_rectangle_corner_and_quarter_anchors() {
        let shape = unit_rect();
        assert_eq!(shape.anchor_point(Anchor::NorthEast), Point::new(10.0, -5.0));
        assert_eq!(shape.anchor_point(Anchor::SouthWest), Point::new(-10.0, 5.0));
        assert_eq!(shape.anchor_point(Anchor::NorthNorthEast), Point::new(5.0, -5.0));
        assert_eq!(shape.anchor_point(Anchor::WestSouthWest), Point::new(-10.0, 2.5));
    }

    #[test]
    fn test_ellipse_cardinal_anchors() {
        let shape = Shape::ellipse(Bounds::from_center(
            Point::new(0.0, 0.0),
            Size::new(20.0, 10.0),
        ));
        let north = shape.anchor_point(Anchor::North);
        assert!(approx_eq!(f64, north.x(), 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, north.y(), -5.0, epsilon = 1e-9));
        let east = shape.anchor_point(Anchor::East);
        assert!(approx_eq!(f64, east.x(), 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, east.y(), 0.0, epsilon = 1e-9));
    }

    #[test]
    fn test_rectangle_border_point() {
        let shape = unit_rect();
        // Due east: crosses the right edge.
        assert_eq!(
            shape.border_point(Point::new(40.0, 0.0)).unwrap(),
            Point::new(10.0, 0.0)
        );
        // Diagonal dominated by y: crosses the bottom edge.
        assert_eq!(
            shape.border_point(Point::new(5.0, 50.0)).unwrap(),
            Point::new(0.5, 5.0)
        );
    }

    #[test]
    fn test_ellipse_border_point_lies_on_outline() {
        let shape = Shape::ellipse(Bounds::from_center(
            Point::new(0.0, 0.0),
            Size::new(20.0, 10.0),
        ));
        let p = shape.border_point(Point::new(30.0, 30.0)).unwrap();
        let on_outline = (p.x() / 10.0).powi(2) + (p.y() / 5.0).powi(2);
        assert!(approx_eq!(f64, on_outline, 1.0, epsilon = 1e-9));
    }

    #[test]
    fn test_border_point_degenerate_reference() {
        let shape = unit_rect();
        assert_eq!(
            shape.border_point(shape.center()),
            Err(GeometryError::DegenerateReference)
        );
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::geometry::Size;

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        (
            -500.0f64..500.0,
            -500.0f64..500.0,
            1.0f64..200.0,
            1.0f64..200.0,
            prop::bool::ANY,
        )
            .prop_map(|(x, y, w, h, ellipse)| {
                let bounds = Bounds::from_center(Point::new(x, y), Size::new(w, h));
                if ellipse {
                    Shape::ellipse(bounds)
                } else {
                    Shape::rectangle(bounds)
                }
            })
    }

    fn reference_strategy() -> impl Strategy<Value = Point> {
        (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Every non-center border point must lie on the shape boundary.
    fn check_border_point_on_boundary(
        shape: Shape,
        reference: Point,
    ) -> Result<(), TestCaseError> {
        prop_assume!(reference != shape.center());
        let p = match shape.border_point(reference) {
            Ok(p) => p,
            // A reference can still be degenerate after rounding; skip it.
            Err(_) => return Ok(()),
        };
        let b = shape.bounds();
        let c = b.center();
        match shape.class() {
            ShapeClass::Rectangle => {
                prop_assert!(b.contains(p));
                let on_vertical = approx_eq!(f64, p.x(), b.min_x(), epsilon = 1e-6)
                    || approx_eq!(f64, p.x(), b.max_x(), epsilon = 1e-6);
                let on_horizontal = approx_eq!(f64, p.y(), b.min_y(), epsilon = 1e-6)
                    || approx_eq!(f64, p.y(), b.max_y(), epsilon = 1e-6);
                prop_assert!(on_vertical || on_horizontal);
            }
            ShapeClass::Ellipse => {
                let nx = (p.x() - c.x()) / (b.width() / 2.0);
                let ny = (p.y() - c.y()) / (b.height() / 2.0);
                prop_assert!(approx_eq!(f64, nx * nx + ny * ny, 1.0, epsilon = 1e-6));
            }
        }
        Ok(())
    }

    /// Every named anchor of a rectangle lies on its boundary, except the center.
    fn check_rectangle_anchors_on_boundary(shape: Shape) -> Result<(), TestCaseError> {
        prop_assume!(shape.class() == ShapeClass::Rectangle);
        let b = shape.bounds();
        for anchor in Anchor::ALL {
            let p = shape.anchor_point(anchor);
            prop_assert!(b.contains(p));
            if anchor != Anchor::Center {
                let on_edge = approx_eq!(f64, p.x(), b.min_x(), epsilon = 1e-6)
                    || approx_eq!(f64, p.x(), b.max_x(), epsilon = 1e-6)
                    || approx_eq!(f64, p.y(), b.min_y(), epsilon = 1e-6)
                    || approx_eq!(f64, p.y(), b.max_y(), epsilon = 1e-6);
                prop_assert!(on_edge);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn border_point_on_boundary(shape in shape_strategy(), reference in reference_strategy()) {
            check_border_point_on_boundary(shape, reference)?;
        }

        #[test]
        fn rectangle_anchors_on_boundary(shape in shape_strategy()) {
            check_rectangle_anchors_on_boundary(shape)?;
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::shape_spec::ShapeSpec;
use crate::vector::Vector2;

/// Discriminant of a [`Shape`], without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A filled circle.
    Circle,
    /// A line segment.
    Line,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Line => write!(f, "line"),
        }
    }
}

/// The geometry of an obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// A circle with an integral radius.
    Circle {
        /// Center point.
        center: Vector2,
        /// Radius in world units.
        radius: u32,
    },
    /// A line segment between two endpoints.
    Line {
        /// First endpoint.
        p1: Vector2,
        /// Second endpoint.
        p2: Vector2,
    },
}

impl Shape {
    /// The kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Line { .. } => ShapeKind::Line,
        }
    }

    fn validate(&self) -> CoreResult<()> {
        match self {
            Self::Circle { center, .. } => {
                if !center.is_finite() {
                    return Err(CoreError::geometry("circle center must be a finite point"));
                }
            }
            Self::Line { p1, p2 } => {
                if !p1.is_finite() || !p2.is_finite() {
                    return Err(CoreError::geometry("line endpoints must be finite points"));
                }
            }
        }
        Ok(())
    }
}

/// An impassable obstacle: a circle or a line segment.
///
/// Walls carry no behavior beyond validation. Repulsion against them is the
/// business of the agents; drawing them is the business of a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeSpec", into = "Shape")]
pub struct Wall {
    shape: Shape,
}

impl Wall {
    /// Build a circular wall.
    pub fn circle(center: Vector2, radius: u32) -> CoreResult<Self> {
        Self::from_shape(Shape::Circle { center, radius })
    }

    /// Build a line-segment wall.
    pub fn line(p1: Vector2, p2: Vector2) -> CoreResult<Self> {
        Self::from_shape(Shape::Line { p1, p2 })
    }

    /// Build a wall from an already-typed shape, checking it is well formed.
    pub fn from_shape(shape: Shape) -> CoreResult<Self> {
        shape.validate()?;
        Ok(Self { shape })
    }

    pub(crate) fn from_checked(shape: Shape) -> Self {
        Self { shape }
    }

    /// The wall's geometry.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Circle or line.
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Shift the wall by `offset`.
    pub fn translate(&mut self, offset: Vector2) {
        match &mut self.shape {
            Shape::Circle { center, .. } => *center = *center + offset,
            Shape::Line { p1, p2 } => {
                *p1 = *p1 + offset;
                *p2 = *p2 + offset;
            }
        }
    }

    /// The point on the wall's outline nearest to `point`.
    pub fn closest_point(&self, point: Vector2) -> Vector2 {
        match self.shape {
            Shape::Circle { center, radius } => {
                let offset = point - center;
                match offset.norm() {
                    Ok(dir) => center + dir * f64::from(radius),
                    // Point sits on the center: every boundary point is equally near
                    Err(_) => center + Vector2::new(f64::from(radius), 0.0),
                }
            }
            Shape::Line { p1, p2 } => closest_on_segment(p1, p2, point),
        }
    }
}

impl TryFrom<ShapeSpec> for Wall {
    type Error = CoreError;

    fn try_from(spec: ShapeSpec) -> CoreResult<Self> {
        Self::from_shape(spec.into_shape()?)
    }
}

impl From<Wall> for Shape {
    fn from(wall: Wall) -> Self {
        wall.shape
    }
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.shape {
            Shape::Circle { center, radius } => write!(f, "circle ({center}) r={radius}"),
            Shape::Line { p1, p2 } => write!(f, "line ({p1}) -> ({p2})"),
        }
    }
}

pub(crate) fn closest_on_segment(p1: Vector2, p2: Vector2, point: Vector2) -> Vector2 {
    let seg = p2 - p1;
    let len_sq = seg.dot(seg);
    if len_sq == 0.0 {
        return p1;
    }
    let t = ((point - p1).dot(seg) / len_sq).clamp(0.0, 1.0);
    p1 + seg * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_round_trips_parameters() {
        let wall = Wall::circle(Vector2::new(600.0, 600.0), 50).unwrap();
        assert_eq!(wall.kind(), ShapeKind::Circle);
        assert_eq!(
            wall.shape(),
            &Shape::Circle {
                center: Vector2::new(600.0, 600.0),
                radius: 50,
            }
        );
    }

    #[test]
    fn line_round_trips_parameters() {
        let wall = Wall::line(Vector2::new(0.0, 0.0), Vector2::new(400.0, 0.0)).unwrap();
        assert_eq!(wall.kind(), ShapeKind::Line);
        match wall.shape() {
            Shape::Line { p1, p2 } => {
                assert_eq!(*p1, Vector2::new(0.0, 0.0));
                assert_eq!(*p2, Vector2::new(400.0, 0.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_points_rejected() {
        let err = Wall::circle(Vector2::new(f64::NAN, 0.0), 3).unwrap_err();
        assert!(matches!(err, CoreError::InvalidGeometry(_)));
        let err = Wall::line(Vector2::zero(), Vector2::new(f64::INFINITY, 1.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidGeometry(_)));
    }

    #[test]
    fn identical_walls_are_independent() {
        let a = Wall::line(Vector2::new(0.0, 0.0), Vector2::new(0.0, 600.0)).unwrap();
        let mut b = Wall::line(Vector2::new(0.0, 0.0), Vector2::new(0.0, 600.0)).unwrap();
        assert_eq!(a, b);

        b.translate(Vector2::new(10.0, 0.0));
        assert_ne!(a, b);
        assert_eq!(
            a.shape(),
            &Shape::Line {
                p1: Vector2::new(0.0, 0.0),
                p2: Vector2::new(0.0, 600.0),
            }
        );
    }

    #[test]
    fn closest_point_on_line_clamps_to_endpoints() {
        let wall = Wall::line(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0)).unwrap();
        assert_eq!(wall.closest_point(Vector2::new(5.0, 3.0)), Vector2::new(5.0, 0.0));
        assert_eq!(wall.closest_point(Vector2::new(-4.0, 3.0)), Vector2::new(0.0, 0.0));
        assert_eq!(wall.closest_point(Vector2::new(14.0, -1.0)), Vector2::new(10.0, 0.0));
    }

    #[test]
    fn closest_point_on_circle_outline() {
        let wall = Wall::circle(Vector2::new(0.0, 0.0), 5).unwrap();
        assert_eq!(wall.closest_point(Vector2::new(20.0, 0.0)), Vector2::new(5.0, 0.0));
        // Center has no preferred direction; any outline point is acceptable
        let p = wall.closest_point(Vector2::zero());
        assert!((p.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn display_formats() {
        let circle = Wall::circle(Vector2::new(600.0, 600.0), 50).unwrap();
        let line = Wall::line(Vector2::new(0.0, 0.0), Vector2::new(400.0, 0.0)).unwrap();
        insta::assert_snapshot!(circle.to_string(), @"circle (600, 600) r=50");
        insta::assert_snapshot!(line.to_string(), @"line (0, 0) -> (400, 0)");
    }

    #[test]
    fn serializes_as_tagged_shape() {
        let wall = Wall::circle(Vector2::new(1.0, 2.0), 3).unwrap();
        let json = serde_json::to_value(&wall).unwrap();
        assert_eq!(json["kind"], "circle");
        assert_eq!(json["radius"], 3);

        let back: Wall = serde_json::from_value(json).unwrap();
        assert_eq!(back, wall);
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::vector::Vector2;
use crate::wall::Shape;

/// An unvalidated shape description, as written in a scenario file.
///
/// Keys follow the geometry construction table: `circle` uses `center` and
/// `radius`, `line` uses `p1` and `p2`. Every parameter is optional here so
/// that a missing or mistyped value surfaces as
/// [`CoreError::InvalidGeometry`] when the spec is turned into a
/// [`Wall`](crate::Wall) or [`Goal`](crate::Goal), rather than as an opaque
/// parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    /// Shape tag: `"circle"` or `"line"`.
    pub kind: String,
    /// Circle center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vector2>,
    /// Circle radius. Must be a non-negative integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Line start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<Vector2>,
    /// Line end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<Vector2>,
}

impl ShapeSpec {
    /// A circle description.
    pub fn circle(center: Vector2, radius: f64) -> Self {
        Self {
            kind: "circle".into(),
            center: Some(center),
            radius: Some(radius),
            ..Self::default()
        }
    }

    /// A line description.
    pub fn line(p1: Vector2, p2: Vector2) -> Self {
        Self {
            kind: "line".into(),
            p1: Some(p1),
            p2: Some(p2),
            ..Self::default()
        }
    }

    /// Check the parameters for the declared kind and produce a typed shape.
    pub fn into_shape(self) -> CoreResult<Shape> {
        match self.kind.as_str() {
            "circle" => {
                let center = self
                    .center
                    .ok_or_else(|| CoreError::geometry("circle needs a center"))?;
                let radius = self
                    .radius
                    .ok_or_else(|| CoreError::geometry("circle needs a radius"))?;
                Ok(Shape::Circle {
                    center,
                    radius: integral_radius(radius)?,
                })
            }
            "line" => {
                let p1 = self
                    .p1
                    .ok_or_else(|| CoreError::geometry("line needs a p1 point"))?;
                let p2 = self
                    .p2
                    .ok_or_else(|| CoreError::geometry("line needs a p2 point"))?;
                Ok(Shape::Line { p1, p2 })
            }
            other => Err(CoreError::geometry(format!(
                "unknown shape kind \"{other}\" (expected circle or line)"
            ))),
        }
    }
}

impl From<Shape> for ShapeSpec {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Circle { center, radius } => Self::circle(center, f64::from(radius)),
            Shape::Line { p1, p2 } => Self::line(p1, p2),
        }
    }
}

fn integral_radius(radius: f64) -> CoreResult<u32> {
    if !radius.is_finite() || radius.fract() != 0.0 {
        return Err(CoreError::geometry(format!(
            "radius needs to be an integer, got {radius}"
        )));
    }
    if radius < 0.0 || radius > f64::from(u32::MAX) {
        return Err(CoreError::geometry(format!(
            "radius must be a non-negative integer, got {radius}"
        )));
    }
    Ok(radius as u32)
}

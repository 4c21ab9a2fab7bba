use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::shape_spec::ShapeSpec;
use crate::vector::Vector2;
use crate::wall::{Shape, Wall};

/// Which axis a goal line runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Both endpoints share an x coordinate.
    Vertical,
    /// Both endpoints share a y coordinate.
    Horizontal,
}

/// Direction from which agents approach a goal line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    /// Agents move toward larger coordinates (rightward or downward).
    #[default]
    Increasing,
    /// Agents move toward smaller coordinates (leftward or upward).
    Decreasing,
}

/// An exit line. Agents that cross it count as escaped.
///
/// Only axis-aligned goals exist: diagonal lines are rejected at
/// construction, and a goal whose endpoints coincide counts as vertical.
/// Endpoints are stored in canonical order, so `p1` always has the smaller
/// coordinate along the line (smaller y for a vertical goal,
/// smaller x for a horizontal one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeSpec", into = "ShapeSpec")]
pub struct Goal {
    p1: Vector2,
    p2: Vector2,
    orientation: Orientation,
}

impl Goal {
    /// Build a goal line, reordering the endpoints if needed.
    pub fn new(p1: Vector2, p2: Vector2) -> CoreResult<Self> {
        if !p1.is_finite() || !p2.is_finite() {
            return Err(CoreError::geometry("goal endpoints must be finite points"));
        }
        let (orientation, swap) = if p1.x == p2.x {
            (Orientation::Vertical, p1.y > p2.y)
        } else if p1.y == p2.y {
            (Orientation::Horizontal, p1.x > p2.x)
        } else {
            return Err(CoreError::geometry(format!(
                "goal from ({p1}) to ({p2}) is neither vertical nor horizontal"
            )));
        };

        let (p1, p2) = if swap { (p2, p1) } else { (p1, p2) };
        Ok(Self { p1, p2, orientation })
    }

    /// Endpoint with the smaller coordinate along the line.
    pub fn p1(&self) -> Vector2 {
        self.p1
    }

    /// Endpoint with the larger coordinate along the line.
    pub fn p2(&self) -> Vector2 {
        self.p2
    }

    /// Vertical or horizontal.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The fixed coordinate of the line that a crossing test compares against:
    /// `p1.x` for a vertical goal, `p1.y` for a horizontal one.
    pub fn crossing_coordinate(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.p1.x,
            Orientation::Horizontal => self.p1.y,
        }
    }

    /// Center of the opening.
    pub fn midpoint(&self) -> Vector2 {
        (self.p1 + self.p2) / 2.0
    }

    /// Length of the opening.
    pub fn width(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// Unit vector perpendicular to the goal pointing in the approach direction.
    pub fn normal(&self, approach: Approach) -> Vector2 {
        let sign = match approach {
            Approach::Increasing => 1.0,
            Approach::Decreasing => -1.0,
        };
        match self.orientation {
            Orientation::Vertical => Vector2::new(sign, 0.0),
            Orientation::Horizontal => Vector2::new(0.0, sign),
        }
    }

    /// Whether `position` lies strictly past the goal line.
    ///
    /// Only the coordinate perpendicular to the line is compared; the extent
    /// of the opening is ignored.
    pub fn is_crossed_by(&self, position: Vector2, approach: Approach) -> bool {
        let coord = match self.orientation {
            Orientation::Vertical => position.x,
            Orientation::Horizontal => position.y,
        };
        match approach {
            Approach::Increasing => coord > self.crossing_coordinate(),
            Approach::Decreasing => coord < self.crossing_coordinate(),
        }
    }

    /// The goal as a plain line wall, for consumers that draw or collide
    /// against generic shapes.
    pub fn as_wall(&self) -> Wall {
        Wall::from_checked(Shape::Line {
            p1: self.p1,
            p2: self.p2,
        })
    }
}

impl TryFrom<ShapeSpec> for Goal {
    type Error = CoreError;

    fn try_from(spec: ShapeSpec) -> CoreResult<Self> {
        match spec.into_shape()? {
            Shape::Line { p1, p2 } => Self::new(p1, p2),
            Shape::Circle { .. } => Err(CoreError::geometry("a goal must be a line")),
        }
    }
}

impl From<Goal> for ShapeSpec {
    fn from(goal: Goal) -> Self {
        ShapeSpec::line(goal.p1, goal.p2)
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "goal ({}) -> ({})", self.p1, self.p2)
    }
}

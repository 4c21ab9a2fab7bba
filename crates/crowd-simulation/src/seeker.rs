use std::sync::Arc;

use crowd_core::{Approach, Goal, Vector2};

use crate::agent::Agent;
use crate::context::StepContext;
use crate::error::SimResult;

/// Default walking speed in world units per second.
pub const DEFAULT_DESIRED_SPEED: f64 = 60.0;

/// A minimal pedestrian that walks straight for the middle of its goal.
///
/// Each tick the agent heads for a point just past the goal opening, or
/// straight away from the goal once it has crossed it. Any wall or neighbor
/// it overlaps adds a body-compression push away from the contact.
/// The push scales with `k / mass` and is capped at the walking speed, so an
/// agent pinned between obstacles stalls rather than tunnelling. Sliding
/// friction (`ka`) is not modelled.
#[derive(Debug, Clone)]
pub struct GoalSeeker {
    position: Vector2,
    desired_direction: Vector2,
    size: f64,
    mass: f64,
    desired_speed: f64,
    approach: Approach,
    goal: Arc<Goal>,
}

impl GoalSeeker {
    /// Create an agent at `position` heading for `goal`.
    pub fn new(size: f64, mass: f64, position: Vector2, goal: Arc<Goal>) -> Self {
        Self {
            position,
            desired_direction: Vector2::zero(),
            size,
            mass,
            desired_speed: DEFAULT_DESIRED_SPEED,
            approach: Approach::default(),
            goal,
        }
    }

    /// Set the walking speed in world units per second.
    pub fn with_desired_speed(mut self, speed: f64) -> Self {
        self.desired_speed = speed;
        self
    }

    /// Set which side of the goal counts as "through".
    pub fn with_approach(mut self, approach: Approach) -> Self {
        self.approach = approach;
        self
    }

    /// Walking speed in world units per second.
    pub fn desired_speed(&self) -> f64 {
        self.desired_speed
    }

    /// Side of the goal this agent walks toward.
    pub fn approach(&self) -> Approach {
        self.approach
    }

    fn target(&self) -> Vector2 {
        self.goal.midpoint() + self.goal.normal(self.approach) * (self.size + 1.0)
    }

    fn overlap_push(&self, ctx: &StepContext<'_>) -> Vector2 {
        let mut push = Vector2::zero();

        for wall in ctx.walls() {
            let away = self.position - wall.closest_point(self.position);
            push = push + separation(away, self.size);
        }

        for other in ctx.neighbors() {
            if Some(other.index) == ctx.agent_index() {
                continue;
            }
            let away = self.position - other.position;
            push = push + separation(away, self.size + other.size);
        }

        push
    }
}

/// Displacement needed to clear an overlap of `reach` along `away`.
fn separation(away: Vector2, reach: f64) -> Vector2 {
    let dist = away.magnitude();
    if dist >= reach {
        return Vector2::zero();
    }
    // Coincident bodies have no separating direction
    match away.norm() {
        Ok(dir) => dir * (reach - dist),
        Err(_) => Vector2::zero(),
    }
}

impl Agent for GoalSeeker {
    fn position(&self) -> Vector2 {
        self.position
    }

    fn desired_direction(&self) -> Vector2 {
        self.desired_direction
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    fn goal(&self) -> &Goal {
        &self.goal
    }

    fn update(&mut self, ctx: &StepContext<'_>) -> SimResult<()> {
        if self.goal.is_crossed_by(self.position, self.approach) {
            // Clear the exit so the agents behind can pass
            self.desired_direction = self.goal.normal(self.approach);
        } else if let Ok(dir) = (self.target() - self.position).norm() {
            self.desired_direction = dir;
        }

        let dt = ctx.dt();
        let mut body = self.overlap_push(ctx) * (ctx.conditions().k() / self.mass) * dt;
        if body.magnitude() > self.desired_speed.max(0.0) {
            body = body.norm()? * self.desired_speed;
        }

        let velocity = self.desired_direction * self.desired_speed + body;
        self.position = self.position + velocity * dt;
        Ok(())
    }
}

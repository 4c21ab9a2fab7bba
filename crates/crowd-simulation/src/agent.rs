use crowd_core::{Goal, Vector2};

use crate::context::{AgentSnapshot, StepContext};
use crate::error::SimResult;

/// A simulated pedestrian.
///
/// The environment never touches an agent's state directly: it reads the
/// accessors below and calls [`Agent::update`] once per tick. The force law,
/// including how `k` and `ka` from the conditions are used, belongs entirely
/// to the implementor.
pub trait Agent: std::fmt::Debug {
    /// Center of the agent's body.
    fn position(&self) -> Vector2;

    /// Unit (or near-unit) heading chosen by the force law on the last tick.
    fn desired_direction(&self) -> Vector2;

    /// Collision radius.
    fn size(&self) -> f64;

    /// Body mass.
    fn mass(&self) -> f64;

    /// The exit this agent is heading for.
    fn goal(&self) -> &Goal;

    /// Advance direction and position by one tick.
    fn update(&mut self, ctx: &StepContext<'_>) -> SimResult<()>;

    /// Capture the fields other agents may read during a tick.
    fn snapshot(&self, index: usize) -> AgentSnapshot {
        AgentSnapshot {
            index,
            position: self.position(),
            size: self.size(),
            mass: self.mass(),
        }
    }
}

use crowd_core::{Vector2, Wall};

use crate::clock::SimClock;
use crate::conditions::Conditions;

/// Tick-start state of one agent, as seen by every other agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshot {
    /// Position in the collection, stable for the whole run.
    pub index: usize,
    /// Center of the agent's body.
    pub position: Vector2,
    /// Collision radius.
    pub size: f64,
    /// Body mass.
    pub mass: f64,
}

/// Read-only view of the world handed to each agent during a tick.
///
/// Agents hold their own goal, so only the shared surroundings appear here.
/// Neighbor positions are captured before any agent moves, so every agent
/// reacts to the same tick-consistent picture regardless of update order.
pub struct StepContext<'a> {
    pub(crate) walls: &'a [Wall],
    pub(crate) conditions: &'a Conditions,
    pub(crate) clock: &'a SimClock,
    pub(crate) neighbors: &'a [AgentSnapshot],
    pub(crate) agent: Option<usize>,
}

impl<'a> StepContext<'a> {
    /// Build a context by hand, e.g. to drive an agent outside an environment.
    pub fn new(
        walls: &'a [Wall],
        conditions: &'a Conditions,
        clock: &'a SimClock,
        neighbors: &'a [AgentSnapshot],
    ) -> Self {
        Self {
            walls,
            conditions,
            clock,
            neighbors,
            agent: None,
        }
    }

    /// The same view, addressed to the agent at `index`.
    pub fn with_agent(mut self, index: usize) -> Self {
        self.agent = Some(index);
        self
    }

    /// Index of the agent being updated, if the context was addressed to one.
    pub fn agent_index(&self) -> Option<usize> {
        self.agent
    }

    /// Obstacles in the room.
    pub fn walls(&self) -> &'a [Wall] {
        self.walls
    }

    /// Physical constants for the force law.
    pub fn conditions(&self) -> &'a Conditions {
        self.conditions
    }

    /// Every agent's state at the start of this tick, including the caller's own.
    pub fn neighbors(&self) -> &'a [AgentSnapshot] {
        self.neighbors
    }

    /// Seconds simulated by this tick.
    pub fn dt(&self) -> f64 {
        self.clock.time_step()
    }
}

use std::path::Path;
use std::sync::Arc;

use crowd_core::{Approach, Goal, ShapeSpec, Vector2, Wall};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::conditions::Conditions;
use crate::config::SimConfig;
use crate::environment::Environment;
use crate::error::{SimError, SimResult};
use crate::reached_goal::ReachedGoal;
use crate::seeker::{DEFAULT_DESIRED_SPEED, GoalSeeker};

/// Room dimensions of the built-in evacuation layout.
pub const ROOM_WIDTH: f64 = 400.0;
/// Room height of the built-in evacuation layout.
pub const ROOM_HEIGHT: f64 = 600.0;
/// Width of the doorway in the right-hand wall.
pub const DOOR_WIDTH: f64 = 100.0;

const MAX_AGENT_SIZE: u32 = 20;
const MIN_AGENT_SIZE: u32 = 10;
const DEFAULT_MASS: f64 = 50.0;

fn default_time_step() -> f64 {
    SimConfig::default().time_step
}

fn default_mass() -> f64 {
    DEFAULT_MASS
}

fn default_speed() -> f64 {
    DEFAULT_DESIRED_SPEED
}

/// One pedestrian in a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Starting position.
    pub position: Vector2,
    /// Collision radius.
    pub size: f64,
    /// Body mass.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Index into the scenario's goal list.
    #[serde(default)]
    pub goal: usize,
    /// Walking speed in world units per second.
    #[serde(default = "default_speed")]
    pub desired_speed: f64,
}

/// A complete, serializable description of a simulation run.
///
/// Walls and goals are kept in their loose [`ShapeSpec`] form until
/// [`Scenario::build`], so that a bad shape is reported as invalid geometry
/// instead of a generic parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Intended agent count; defaults to the number of agents listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_agents: Option<usize>,
    /// Simulated seconds per tick.
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    /// Overrides for the physical constants.
    #[serde(default)]
    pub conditions: Conditions,
    /// Side of the goal lines that counts as "through", for every agent and
    /// for the escape counter.
    #[serde(default)]
    pub approach: Approach,
    /// Obstacles.
    #[serde(default)]
    pub walls: Vec<ShapeSpec>,
    /// Exits. Agents refer to these by index.
    pub goals: Vec<ShapeSpec>,
    /// Pedestrians.
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(text: &str) -> SimResult<Self> {
        serde_json::from_str(text).map_err(|e| SimError::Scenario(e.to_string()))
    }

    /// Read and parse a scenario file.
    pub fn from_path(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimError::Scenario(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Scenario(e.to_string()))
    }

    /// The evacuation layout: a 400 x 600 room with a 100-wide doorway in the
    /// right-hand wall, one circular pillar outside, and `agents`
    /// pedestrians of random size scattered inside.
    pub fn room_with_doorway(agents: usize, seed: u64) -> Self {
        let door_top = ROOM_HEIGHT / 2.0 - DOOR_WIDTH / 2.0;
        let door_bottom = ROOM_HEIGHT / 2.0 + DOOR_WIDTH / 2.0;
        let p = Vector2::new;

        let walls = vec![
            ShapeSpec::circle(p(600.0, 600.0), 50.0),
            ShapeSpec::line(p(0.0, 0.0), p(ROOM_WIDTH, 0.0)),
            ShapeSpec::line(p(0.0, 0.0), p(0.0, ROOM_HEIGHT)),
            ShapeSpec::line(p(0.0, ROOM_HEIGHT), p(ROOM_WIDTH, ROOM_HEIGHT)),
            ShapeSpec::line(p(ROOM_WIDTH, 0.0), p(ROOM_WIDTH, door_top)),
            ShapeSpec::line(p(ROOM_WIDTH, door_bottom), p(ROOM_WIDTH, ROOM_HEIGHT)),
        ];
        let goals = vec![ShapeSpec::line(p(ROOM_WIDTH, door_top), p(ROOM_WIDTH, door_bottom))];

        let mut rng = StdRng::seed_from_u64(seed);
        let margin = f64::from(MAX_AGENT_SIZE) / 2.0;
        let agents = (0..agents)
            .map(|_| {
                let size = rng.random_range(MIN_AGENT_SIZE..=MAX_AGENT_SIZE);
                let x = rng.random_range(margin..=ROOM_WIDTH - margin);
                let y = rng.random_range(margin..=ROOM_HEIGHT - margin);
                AgentSpec {
                    position: p(x.round(), y.round()),
                    size: f64::from(size),
                    mass: DEFAULT_MASS,
                    goal: 0,
                    desired_speed: DEFAULT_DESIRED_SPEED,
                }
            })
            .collect();

        Self {
            target_agents: None,
            time_step: default_time_step(),
            conditions: Conditions::default(),
            approach: Approach::Increasing,
            walls,
            goals,
            agents,
        }
    }

    /// Validate the description and assemble an environment with a
    /// [`ReachedGoal`] registered as instrument 0.
    pub fn build(&self) -> SimResult<Environment> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimError::Scenario(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }

        let config = SimConfig::default()
            .with_target_agents(self.target_agents.unwrap_or(self.agents.len()))
            .with_time_step(self.time_step)
            .with_conditions(self.conditions.clone());
        let mut env = Environment::new(config);

        for spec in &self.walls {
            env.add_wall(Wall::try_from(spec.clone())?);
        }

        let goals: Vec<Arc<Goal>> = self
            .goals
            .iter()
            .map(|spec| Goal::try_from(spec.clone()).map(|goal| env.add_goal(goal)))
            .collect::<Result<_, _>>()?;

        for (i, spec) in self.agents.iter().enumerate() {
            if !(spec.size > 0.0 && spec.mass > 0.0) {
                return Err(SimError::Scenario(format!(
                    "agent {i} needs a positive size and mass"
                )));
            }
            if !(spec.desired_speed.is_finite() && spec.desired_speed >= 0.0) {
                return Err(SimError::Scenario(format!(
                    "agent {i} needs a non-negative desired_speed, got {}",
                    spec.desired_speed
                )));
            }
            let goal = goals
                .get(spec.goal)
                .ok_or(SimError::UnknownGoal(spec.goal))?;
            env.add_agent(
                GoalSeeker::new(spec.size, spec.mass, spec.position, Arc::clone(goal))
                    .with_desired_speed(spec.desired_speed)
                    .with_approach(self.approach),
            );
        }

        env.add_instrument(ReachedGoal::with_approach(self.approach));
        Ok(env)
    }
}

use crowd_core::Approach;

use crate::environment::Environment;
use crate::error::SimResult;
use crate::instrument::Instrument;

/// Counts agents that are past their own goal line.
///
/// An agent counts as escaped when [`Goal::is_crossed_by`] holds for its
/// position. With the default [`Approach::Increasing`] and a vertical goal
/// that is `position.x > goal.p1.x`, i.e. agents walking rightward through an
/// exit on the right-hand wall. Horizontal goals compare `y` instead.
///
/// [`Goal::is_crossed_by`]: crowd_core::Goal::is_crossed_by
#[derive(Debug, Default)]
pub struct ReachedGoal {
    approach: Approach,
    metric: Vec<f64>,
}

impl ReachedGoal {
    /// Count agents moving toward larger coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count agents crossing from the given side.
    pub fn with_approach(approach: Approach) -> Self {
        Self {
            approach,
            metric: Vec::new(),
        }
    }

    /// Direction this instrument treats as "through the goal".
    pub fn approach(&self) -> Approach {
        self.approach
    }

    /// Number of agents past their goal right now.
    pub fn count_reached_goal(&self, env: &Environment) -> usize {
        env.agents()
            .iter()
            .filter(|agent| agent.goal().is_crossed_by(agent.position(), self.approach))
            .count()
    }

    /// Most recent sample, if any tick has been recorded.
    pub fn latest(&self) -> Option<usize> {
        self.metric.last().map(|v| *v as usize)
    }
}

impl Instrument for ReachedGoal {
    fn name(&self) -> &str {
        "reached goal"
    }

    fn update(&mut self, env: &Environment) -> SimResult<()> {
        let escaped = self.count_reached_goal(env);
        self.metric.push(escaped as f64);
        Ok(())
    }

    fn metric(&self) -> &[f64] {
        &self.metric
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

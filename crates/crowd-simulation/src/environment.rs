use std::sync::Arc;

use crowd_core::{Goal, Wall};
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::clock::SimClock;
use crate::conditions::Conditions;
use crate::config::SimConfig;
use crate::context::{AgentSnapshot, StepContext};
use crate::error::{SimError, SimResult};
use crate::instrument::{Instrument, Report};
use crate::reached_goal::ReachedGoal;

/// The simulated room: walls, goals, agents, and the instruments watching them.
///
/// Owns every collection exclusively. Goals are handed out as `Arc<Goal>` so
/// agents can refer to the exit they head for; goals never change after
/// construction, so sharing them is read-only.
pub struct Environment {
    target_agents: usize,
    walls: Vec<Wall>,
    goals: Vec<Arc<Goal>>,
    agents: Vec<Box<dyn Agent>>,
    instruments: Vec<Box<dyn Instrument>>,
    conditions: Conditions,
    clock: SimClock,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("tick", &self.clock.tick())
            .field("agents", &self.agents.len())
            .field("walls", &self.walls.len())
            .field("goals", &self.goals.len())
            .field("instruments", &self.instruments.len())
            .finish()
    }
}

impl Environment {
    /// Create an empty environment from a configuration.
    pub fn new(config: SimConfig) -> Self {
        Self {
            target_agents: config.target_agents,
            walls: Vec::new(),
            goals: Vec::new(),
            agents: Vec::new(),
            instruments: Vec::new(),
            conditions: config.conditions,
            clock: SimClock::new(config.time_step),
        }
    }

    /// Add an obstacle.
    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    /// Add an exit and return a shared handle for assigning it to agents.
    pub fn add_goal(&mut self, goal: Goal) -> Arc<Goal> {
        let goal = Arc::new(goal);
        self.goals.push(Arc::clone(&goal));
        goal
    }

    /// Add an agent. Agents are updated in insertion order.
    pub fn add_agent<A: Agent + 'static>(&mut self, agent: A) {
        self.agents.push(Box::new(agent));
    }

    /// Register an instrument. Instruments are updated in registration order.
    pub fn add_instrument<I: Instrument + 'static>(&mut self, instrument: I) {
        self.instruments.push(Box::new(instrument));
    }

    /// Advance the simulation by one tick.
    ///
    /// Every agent updates against the same tick-start snapshot of its
    /// neighbors, then every instrument samples the fully updated state.
    /// Any error aborts the tick and is returned to the caller.
    pub fn step(&mut self) -> SimResult<()> {
        let tick = self.clock.advance();
        if tick == 1 && self.target_agents != 0 && self.target_agents != self.agents.len() {
            warn!(
                expected = self.target_agents,
                actual = self.agents.len(),
                "agent count differs from target"
            );
        }

        let snapshots: Vec<AgentSnapshot> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, agent)| agent.snapshot(i))
            .collect();

        for (i, agent) in self.agents.iter_mut().enumerate() {
            let ctx = StepContext::new(
                &self.walls,
                &self.conditions,
                &self.clock,
                &snapshots,
            )
            .with_agent(i);
            agent.update(&ctx)?;
        }

        self.update_instruments()?;
        debug!(tick, escaped = ?self.escaped_count(), "tick complete");
        Ok(())
    }

    /// Let every instrument sample the current state, in registration order.
    pub fn update_instruments(&mut self) -> SimResult<()> {
        for i in 0..self.instruments.len() {
            let mut instrument =
                std::mem::replace(&mut self.instruments[i], Box::new(NoopInstrument));
            let result = instrument.update(self);
            self.instruments[i] = instrument;
            result?;
        }
        Ok(())
    }

    /// Advance the simulation by `n` ticks.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Step until every agent has crossed its goal, returning the final tick.
    ///
    /// Requires a registered [`ReachedGoal`]. Fails with
    /// [`SimError::TickLimitExceeded`] if the run reaches `max_ticks` first.
    pub fn run_until_complete(&mut self, max_ticks: u64) -> SimResult<u64> {
        if self.get_instrument::<ReachedGoal>().is_none() {
            return Err(SimError::MissingInstrument("reached goal".into()));
        }
        while !self.is_complete() {
            if self.clock.tick() >= max_ticks {
                return Err(SimError::TickLimitExceeded(max_ticks));
            }
            self.step()?;
        }
        info!(
            tick = self.clock.tick(),
            elapsed = self.clock.elapsed(),
            agents = self.agents.len(),
            "all agents escaped"
        );
        Ok(self.clock.tick())
    }

    /// Report from the instrument at `index`.
    pub fn plot(&self, index: usize) -> SimResult<Report> {
        self.instruments
            .get(index)
            .map(|instrument| instrument.report())
            .ok_or(SimError::InstrumentNotFound(index))
    }

    /// Latest escaped count from the first registered [`ReachedGoal`].
    pub fn escaped_count(&self) -> Option<usize> {
        self.get_instrument::<ReachedGoal>()
            .and_then(ReachedGoal::latest)
    }

    /// Whether the latest [`ReachedGoal`] sample covers every agent.
    pub fn is_complete(&self) -> bool {
        self.escaped_count() == Some(self.agents.len())
    }

    /// Access an instrument by downcasting to a concrete type.
    pub fn get_instrument<T: Instrument + 'static>(&self) -> Option<&T> {
        self.instruments
            .iter()
            .find_map(|i| i.as_any().downcast_ref::<T>())
    }

    /// Registered instruments, in update order.
    pub fn instruments(&self) -> &[Box<dyn Instrument>] {
        &self.instruments
    }

    /// Agents, in update order.
    pub fn agents(&self) -> &[Box<dyn Agent>] {
        &self.agents
    }

    /// Obstacles.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Exits.
    pub fn goals(&self) -> &[Arc<Goal>] {
        &self.goals
    }

    /// Physical constants.
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Intended number of agents, as configured.
    pub fn target_agents(&self) -> usize {
        self.target_agents
    }

    /// Number of completed ticks.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }
}

/// Placeholder instrument used during the swap-and-update pattern.
#[derive(Debug)]
struct NoopInstrument;

impl Instrument for NoopInstrument {
    fn name(&self) -> &str {
        "noop"
    }
    fn update(&mut self, _env: &Environment) -> SimResult<()> {
        Ok(())
    }
    fn metric(&self) -> &[f64] {
        &[]
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowd_core::{Approach, Vector2};

    /// Agent that walks a fixed distance along +x each tick.
    #[derive(Debug)]
    struct Walker {
        position: Vector2,
        speed: f64,
        goal: Arc<Goal>,
    }

    impl Walker {
        fn new(x: f64, y: f64, speed: f64, goal: &Arc<Goal>) -> Self {
            Self {
                position: Vector2::new(x, y),
                speed,
                goal: Arc::clone(goal),
            }
        }
    }

    impl Agent for Walker {
        fn position(&self) -> Vector2 {
            self.position
        }
        fn desired_direction(&self) -> Vector2 {
            Vector2::new(1.0, 0.0)
        }
        fn size(&self) -> f64 {
            5.0
        }
        fn mass(&self) -> f64 {
            50.0
        }
        fn goal(&self) -> &Goal {
            &self.goal
        }
        fn update(&mut self, _ctx: &StepContext<'_>) -> SimResult<()> {
            self.position = self.position + self.desired_direction() * self.speed;
            Ok(())
        }
    }

    /// Agent whose update always fails.
    #[derive(Debug)]
    struct Broken {
        goal: Arc<Goal>,
    }

    impl Agent for Broken {
        fn position(&self) -> Vector2 {
            Vector2::zero()
        }
        fn desired_direction(&self) -> Vector2 {
            Vector2::zero()
        }
        fn size(&self) -> f64 {
            1.0
        }
        fn mass(&self) -> f64 {
            1.0
        }
        fn goal(&self) -> &Goal {
            &self.goal
        }
        fn update(&mut self, _ctx: &StepContext<'_>) -> SimResult<()> {
            Err(SimError::AgentUpdate("stuck".into()))
        }
    }

    /// Records the agent count it sees on each tick.
    #[derive(Debug, Default)]
    struct AgentCounter {
        metric: Vec<f64>,
    }

    impl Instrument for AgentCounter {
        fn name(&self) -> &str {
            "agents"
        }
        fn update(&mut self, env: &Environment) -> SimResult<()> {
            self.metric.push(env.agents().len() as f64);
            Ok(())
        }
        fn metric(&self) -> &[f64] {
            &self.metric
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn vertical_exit(env: &mut Environment, x: f64) -> Arc<Goal> {
        env.add_goal(Goal::new(Vector2::new(x, 0.0), Vector2::new(x, 100.0)).unwrap())
    }

    #[test]
    fn reached_goal_counts_agents_past_goal() {
        let mut env = Environment::new(SimConfig::default());
        let goal = vertical_exit(&mut env, 5.0);
        env.add_agent(Walker::new(10.0, 50.0, 0.0, &goal));
        env.add_agent(Walker::new(3.0, 50.0, 0.0, &goal));
        env.add_instrument(ReachedGoal::new());

        env.step().unwrap();
        assert_eq!(env.get_instrument::<ReachedGoal>().unwrap().metric(), &[1.0]);
        assert_eq!(env.escaped_count(), Some(1));
        assert!(!env.is_complete());
    }

    #[test]
    fn agent_on_goal_line_not_counted() {
        let mut env = Environment::new(SimConfig::default());
        let goal = vertical_exit(&mut env, 5.0);
        env.add_agent(Walker::new(5.0, 50.0, 0.0, &goal));
        let counter = ReachedGoal::new();
        assert_eq!(counter.count_reached_goal(&env), 0);
    }

    #[test]
    fn horizontal_goal_compares_y() {
        // Reference behavior compared x for every goal; horizontal goals now use y.
        let mut env = Environment::new(SimConfig::default());
        let goal = env.add_goal(Goal::new(Vector2::new(0.0, 40.0), Vector2::new(100.0, 40.0)).unwrap());
        env.add_agent(Walker::new(-50.0, 60.0, 0.0, &goal));
        env.add_agent(Walker::new(500.0, 20.0, 0.0, &goal));

        let downward = ReachedGoal::new();
        assert_eq!(downward.count_reached_goal(&env), 1);
        let upward = ReachedGoal::with_approach(Approach::Decreasing);
        assert_eq!(upward.count_reached_goal(&env), 1);
        assert_eq!(upward.approach(), Approach::Decreasing);
    }

    #[test]
    fn metric_grows_by_one_per_step() {
        let mut env = Environment::new(SimConfig::default());
        let goal = vertical_exit(&mut env, 50.0);
        env.add_agent(Walker::new(0.0, 10.0, 1.0, &goal));
        env.add_instrument(ReachedGoal::new());
        env.add_instrument(AgentCounter::default());

        for n in 1..=7 {
            env.step().unwrap();
            assert_eq!(env.plot(0).unwrap().len(), n);
            assert_eq!(env.plot(1).unwrap().len(), n);
        }
        assert_eq!(env.current_tick(), 7);
    }

    #[test]
    fn run_until_complete_terminates() {
        let mut env = Environment::new(SimConfig::default().with_target_agents(3));
        let goal = vertical_exit(&mut env, 200.0);
        env.add_agent(Walker::new(0.0, 10.0, 10.0, &goal));
        env.add_agent(Walker::new(50.0, 50.0, 7.0, &goal));
        env.add_agent(Walker::new(150.0, 90.0, 3.0, &goal));
        env.add_instrument(ReachedGoal::new());

        let ticks = env.run_until_complete(1_000).unwrap();
        // Slowest: 50 + 7n > 200 at n = 22; fastest: 10n > 200 at n = 21
        assert_eq!(ticks, 22);
        let report = env.plot(0).unwrap();
        assert_eq!(report.latest(), Some(3.0));
        assert_eq!(report.len(), 22);
        assert!(report.metric.windows(2).all(|w| w[0] <= w[1]));
        assert!(env.is_complete());
    }

    #[test]
    fn run_until_complete_hits_limit() {
        let mut env = Environment::new(SimConfig::default());
        let goal = vertical_exit(&mut env, 200.0);
        env.add_agent(Walker::new(0.0, 10.0, 1.0, &goal));
        env.add_instrument(ReachedGoal::new());

        let err = env.run_until_complete(10).unwrap_err();
        assert!(matches!(err, SimError::TickLimitExceeded(10)));
        assert_eq!(env.current_tick(), 10);
    }

    #[test]
    fn run_until_complete_needs_counter() {
        let mut env = Environment::new(SimConfig::default());
        let err = env.run_until_complete(10).unwrap_err();
        assert!(matches!(err, SimError::MissingInstrument(_)));
    }

    #[test]
    fn empty_environment_completes_immediately() {
        let mut env = Environment::new(SimConfig::default());
        env.add_instrument(ReachedGoal::new());
        assert_eq!(env.run_until_complete(10).unwrap(), 1);
    }

    #[test]
    fn agent_failure_aborts_step() {
        let mut env = Environment::new(SimConfig::default());
        let goal = vertical_exit(&mut env, 200.0);
        env.add_agent(Broken { goal });
        env.add_instrument(ReachedGoal::new());

        let err = env.step().unwrap_err();
        assert!(matches!(err, SimError::AgentUpdate(_)));
        assert!(env.plot(0).unwrap().is_empty(), "instruments skipped on failure");
    }

    #[test]
    fn plot_out_of_range() {
        let env = Environment::new(SimConfig::default());
        assert!(matches!(env.plot(3), Err(SimError::InstrumentNotFound(3))));
    }

    #[test]
    fn instruments_see_state_after_agents_move() {
        let mut env = Environment::new(SimConfig::default());
        let goal = vertical_exit(&mut env, 5.0);
        env.add_agent(Walker::new(0.0, 50.0, 10.0, &goal));
        env.add_instrument(ReachedGoal::new());

        env.step().unwrap();
        assert_eq!(env.escaped_count(), Some(1));
    }

    #[test]
    fn goals_are_shared_with_agents() {
        let mut env = Environment::new(SimConfig::default());
        let goal = vertical_exit(&mut env, 5.0);
        env.add_agent(Walker::new(0.0, 50.0, 1.0, &goal));
        assert_eq!(Arc::strong_count(&goal), 3);
        assert_eq!(env.agents()[0].goal(), env.goals()[0].as_ref());
    }

    #[test]
    fn conditions_come_from_config() {
        let env = Environment::new(SimConfig::default().with_condition("k", 2.0));
        assert!((env.conditions().k() - 2.0).abs() < f64::EPSILON);
        assert!((env.conditions().ka() - 2.4e5).abs() < f64::EPSILON);
    }
}

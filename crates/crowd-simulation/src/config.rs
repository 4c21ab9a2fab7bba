use crate::conditions::Conditions;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Intended number of agents. Advisory only; never checked against the
    /// agents actually added.
    pub target_agents: usize,
    /// Simulated seconds per tick.
    pub time_step: f64,
    /// Physical constants for the agents' force law.
    pub conditions: Conditions,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            target_agents: 0,
            time_step: 0.05,
            conditions: Conditions::default(),
        }
    }
}

impl SimConfig {
    /// Set the intended number of agents.
    pub fn with_target_agents(mut self, n: usize) -> Self {
        self.target_agents = n;
        self
    }

    /// Set the simulated seconds per tick.
    pub fn with_time_step(mut self, seconds: f64) -> Self {
        self.time_step = seconds;
        self
    }

    /// Replace the condition registry.
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Override or add a single condition.
    pub fn with_condition(mut self, key: impl Into<String>, value: f64) -> Self {
        self.conditions = self.conditions.with(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.target_agents, 0);
        assert!((config.time_step - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.conditions, Conditions::default());
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_target_agents(100)
            .with_time_step(0.1)
            .with_condition("k", 3.0);
        assert_eq!(config.target_agents, 100);
        assert!((config.time_step - 0.1).abs() < f64::EPSILON);
        assert!((config.conditions.k() - 3.0).abs() < f64::EPSILON);
        assert!((config.conditions.ka() - 2.4e5).abs() < f64::EPSILON);
    }

    #[test]
    fn config_conditions_replaced() {
        let conditions = Conditions::new([("ka", 9.0)]);
        let config = SimConfig::default().with_conditions(conditions.clone());
        assert_eq!(config.conditions, conditions);
    }
}

//! Tick-based pedestrian evacuation engine.
//!
//! An [`Environment`] owns walls, goals, agents, and instruments. Each call
//! to [`Environment::step`] lets every [`Agent`] advance itself against a
//! tick-consistent snapshot of the room, then lets every [`Instrument`]
//! sample the result. The per-agent force law is left to implementors of
//! [`Agent`]; [`GoalSeeker`] is a small reference pedestrian.

/// The contract every simulated pedestrian implements.
pub mod agent;
/// Simulation clock for tracking ticks and elapsed time.
pub mod clock;
/// Named physical constants for agent force laws.
pub mod conditions;
/// Configuration types for simulation runs.
pub mod config;
/// Read-only view handed to agents each tick.
pub mod context;
/// The environment that owns and drives a run.
pub mod environment;
/// Error types for the simulation crate.
pub mod error;
/// The trait that all instruments implement, and their reports.
pub mod instrument;
/// Instrument counting agents past their goal.
pub mod reached_goal;
/// Serializable run descriptions and the built-in room layout.
pub mod scenario;
/// Reference goal-seeking pedestrian.
pub mod seeker;

/// Re-export of [`agent::Agent`].
pub use agent::Agent;
/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`conditions::Conditions`].
pub use conditions::Conditions;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`context::StepContext`] and [`context::AgentSnapshot`].
pub use context::{AgentSnapshot, StepContext};
/// Re-export of [`environment::Environment`].
pub use environment::Environment;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`instrument::Instrument`] and [`instrument::Report`].
pub use instrument::{Instrument, Report};
/// Re-export of [`reached_goal::ReachedGoal`].
pub use reached_goal::ReachedGoal;
/// Re-exports of [`scenario::Scenario`] and [`scenario::AgentSpec`].
pub use scenario::{AgentSpec, Scenario};
/// Re-export of [`seeker::GoalSeeker`].
pub use seeker::GoalSeeker;

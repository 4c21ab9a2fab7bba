use crowd_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building or running an environment.
///
/// Every error is fatal to the run: a tick either completes for all agents
/// and instruments or the run aborts.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Invalid geometry or vector arithmetic in the core types.
    #[error(transparent)]
    Geometry(#[from] CoreError),

    /// No instrument is registered at the given index.
    #[error("no instrument at index {0}")]
    InstrumentNotFound(usize),

    /// An operation needs an instrument that is not registered.
    #[error("no {0} instrument registered")]
    MissingInstrument(String),

    /// An agent references a goal index that does not exist.
    #[error("agent references unknown goal {0}")]
    UnknownGoal(usize),

    /// The run did not finish within the allowed number of ticks.
    #[error("not all agents escaped within {0} ticks")]
    TickLimitExceeded(u64),

    /// A scenario description could not be read or is inconsistent.
    #[error("scenario error: {0}")]
    Scenario(String),

    /// An agent failed to advance its own state.
    #[error("agent update failed: {0}")]
    AgentUpdate(String),
}

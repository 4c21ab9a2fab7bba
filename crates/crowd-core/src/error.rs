/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or manipulating geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A wall or goal was described with missing, mistyped, or inconsistent parameters.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A zero-length vector was normalized.
    #[error("division by zero: cannot normalize a zero-length vector")]
    DivisionByZero,
}

impl CoreError {
    pub(crate) fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }
}

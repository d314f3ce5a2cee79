use thiserror::Error;

/// Failure to arm the periodic tick source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum TimerError {
    #[error("tick interval must be greater than zero")]
    ZeroInterval,
    #[error("tick source is unavailable")]
    Unavailable,
}

/// A [`crate::config::GameConfig`] whose starting layout cannot be placed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("initial snake length must be at least 1")]
    ZeroInitialLength,
    #[error("initial snake length {length} exceeds grid capacity {capacity}")]
    InitialLengthExceedsCapacity { length: usize, capacity: usize },
    #[error("initial snake of length {length} does not fit left of column {head_x}")]
    StartOutOfBounds { length: usize, head_x: usize },
}

/// Fatal error while setting up or restarting a round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum InitializationError {
    #[error("invalid game configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("failed to arm tick timer: {0}")]
    Timer(#[from] TimerError),
}

use thiserror::Error;

/// Top-level error type for the Sprouts rule engine.
#[derive(Debug, Error)]
pub enum SproutsError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the rotation system and its faces.
#[derive(Debug, Clone, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to engine operations and their inputs.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised when a move cannot be committed.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("move is not completed")]
    Incomplete,

    #[error("illegal move: {0}")]
    Illegal(String),

    #[error("no admissible middle sprout position near ({x}, {y})")]
    NoMiddleSprout { x: f64, y: f64 },
}

/// Convenience type alias for results using [`SproutsError`].
pub type Result<T> = std::result::Result<T, SproutsError>;

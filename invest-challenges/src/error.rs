use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The catalog or budget fails a precondition. No solve is attempted.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Exhaustive enumeration over this many investments would not complete.
    #[error(
        "Catalog of {num_investments} investments exceeds the exhaustive search limit of {max_investments}"
    )]
    ExhaustedResource {
        num_investments: usize,
        max_investments: usize,
    },

    /// The chunk worker pool could not be started or a chunk worker died.
    #[error("Worker pool failure: {0}")]
    Worker(String),

    /// A post-solve consistency check failed. Indicates a logic defect.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

pub type SolveResult<T> = std::result::Result<T, SolveError>;

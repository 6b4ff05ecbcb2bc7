//! Unified error type for transport algorithms.
//!
//! Failures fall into four classes: bad caller input, operations attempted
//! out of order, topology/geometry errors surfaced by the network, and
//! numerical failure of the linear solve. Nothing is retried or silently
//! recovered; every failure propagates to the caller and leaves algorithm
//! state as it was before the failing call (mutations happen after
//! validation, not interleaved with it).

use pnt_core::{NetworkError, SolveError};
use thiserror::Error;

/// Error type for all transport-algorithm operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Bad enum value, mismatched value count, out-of-range index, empty
    /// pore set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation attempted before its prerequisites: unbound property keys,
    /// NaN conductances at setup, derived quantities queried before `run`.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Topology or geometry query failure from the network collaborator.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The linear solver could not produce a solution.
    #[error("linear solve failed: {0}")]
    Solve(#[from] SolveError),
}

/// Convenience alias for Results using [`TransportError`].
pub type TransportResult<T> = Result<T, TransportError>;

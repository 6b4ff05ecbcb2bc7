//! Pluggable dense linear-system backends.
//!
//! Transport solves reduce to `A x = b` with `A` assembled from the network
//! Laplacian. The [`LinearSystemBackend`] trait keeps the factorization engine
//! swappable: a portable Gaussian-elimination fallback and a faer LU backend
//! are provided, selected by name through [`SolverKind`].

pub mod backend;
pub mod registry;

pub use backend::{FaerSolver, GaussSolver, LinearSystemBackend, SolveError};
pub use registry::SolverKind;

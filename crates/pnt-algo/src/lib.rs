//! # pnt-algo: Pore-Network Transport Algorithms
//!
//! Steady-state linear transport solves on pore networks: diffusion, viscous
//! flow, and electrical/thermal conduction all reduce to the same
//! conductance-weighted graph Laplacian, and this crate provides that engine.
//!
//! ## Pipeline
//!
//! ```text
//! topology + conductance -> system matrix A   (laplacian)
//! boundary conditions    -> rhs vector b      (laplacian)
//! (A, b)                 -> quantity field x  (transport::run)
//! x + conductance        -> net rates         (transport::rate)
//! rates + geometry + BCs -> effective coeff.  (transport::effective_property)
//! ```
//!
//! The network topology and the pore-scale conductance physics live in
//! [`pnt_core`]; this crate only reads them.
//!
//! ## Example
//!
//! ```rust
//! use pnt_algo::LinearTransport;
//! use pnt_algo::test_utils::{lattice_with_faces, uniform_conductance};
//!
//! let (network, inlet, outlet) = lattice_with_faces([3, 3, 3], 1.0);
//! let phase = uniform_conductance(&network, "throat.diffusive_conductance", 1.0);
//!
//! let mut alg = LinearTransport::new(&network);
//! alg.setup(&phase, "throat.diffusive_conductance", "pore.mole_fraction")
//!     .unwrap();
//! alg.set_dirichlet(&inlet, 1.0).unwrap();
//! alg.set_dirichlet(&outlet, 0.0).unwrap();
//! alg.run(&network, &phase).unwrap();
//!
//! let d_eff = alg.effective_property(&network, &phase).unwrap();
//! assert!(d_eff > 0.0);
//! ```

pub mod boundary;
pub mod error;
pub mod laplacian;
pub mod test_utils;
pub mod transport;

pub use boundary::{BcKind, BcMode, BcValues, BoundaryConditions};
pub use error::{TransportError, TransportResult};
pub use laplacian::{build_rhs, build_system_matrix};
pub use transport::{LinearTransport, RateMode, TransportSettings};

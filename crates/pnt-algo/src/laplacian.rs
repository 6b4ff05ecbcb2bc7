//! System matrix and right-hand-side assembly.
//!
//! The steady-state balance over the network is `A x = b` where `A` is the
//! conductance-weighted graph Laplacian:
//!
//! ```text
//! A[i,j] = -g_ij       for i != j (summed over parallel throats)
//! A[i,i] = sum_j g_ij  so every row sums to zero
//! ```
//!
//! Dirichlet pores are decoupled by row surgery on the COO triplets: every
//! entry in a fixed pore's row is dropped and a single unit diagonal entry is
//! appended, turning that row into the exact constraint `x_p = b_p`. Entries
//! of all other rows are preserved untouched. Neumann conditions never alter
//! the matrix; they enter through the right-hand side only.

use crate::boundary::{BcKind, BoundaryConditions};
use crate::error::TransportResult;
use pnt_core::PoreNetwork;
use sprs::{CsMat, TriMat};
use std::collections::HashSet;

/// Assemble the system matrix from throat conductances and boundary
/// conditions, in CSR format for row access and solving.
///
/// Conductance health (no NaNs) is a setup-time guard and is assumed to hold
/// here.
pub fn build_system_matrix(
    network: &PoreNetwork,
    conductance: &[f64],
    bcs: &BoundaryConditions,
) -> TransportResult<CsMat<f64>> {
    let n = network.num_pores();
    let negated: Vec<f64> = conductance.iter().map(|g| -g).collect();
    let mut triplets = network.adjacency_triplets(&negated)?;

    // Fill diagonals to zero row-sum.
    let mut diag = vec![0.0; n];
    for &(row, _, w) in &triplets {
        diag[row] -= w;
    }
    for (p, &d) in diag.iter().enumerate() {
        triplets.push((p, p, d));
    }

    if bcs.any_dirichlet() {
        let fixed: HashSet<usize> = bcs.dirichlet_pores().into_iter().collect();
        // Deletion first, as a set-difference on the row index; then the
        // unit diagonal is appended for each fixed row.
        triplets.retain(|&(row, _, _)| !fixed.contains(&row));
        for p in bcs.dirichlet_pores() {
            triplets.push((p, p, 1.0));
        }
    }

    let mut tri = TriMat::new((n, n));
    for (row, col, value) in triplets {
        tri.add_triplet(row, col, value);
    }
    Ok(tri.to_csr())
}

/// Assemble the right-hand-side vector: zero for free pores, the prescribed
/// value for Dirichlet pores, the negated prescribed flux for Neumann pores.
pub fn build_rhs(bcs: &BoundaryConditions) -> Vec<f64> {
    let mut b = vec![0.0; bcs.num_pores()];
    for (p, entry) in b.iter_mut().enumerate() {
        match bcs.condition(p) {
            Some((BcKind::Dirichlet, value)) => *entry = value,
            Some((BcKind::Neumann, flux)) => *entry = -flux,
            None => {}
        }
    }
    b
}

//! Per-pore boundary condition storage.
//!
//! Each pore holds at most one condition: a Dirichlet value (fixed quantity)
//! or a Neumann value (fixed net flux). The store is a tagged per-pore slot
//! rather than parallel label/value arrays, which makes an overlapping
//! Dirichlet + Neumann assignment unrepresentable; attempts to stack the two
//! kinds on one pore are rejected up front.

use crate::error::{TransportError, TransportResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of boundary condition applied at a pore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BcKind {
    /// Fixes the transported quantity (pressure, concentration) at the pore.
    Dirichlet,
    /// Fixes the net flux into the pore.
    Neumann,
}

impl fmt::Display for BcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BcKind::Dirichlet => write!(f, "dirichlet"),
            BcKind::Neumann => write!(f, "neumann"),
        }
    }
}

/// How a `set` call combines with already-stored conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BcMode {
    /// Add to existing conditions; re-marking a pore overwrites only that
    /// pore's value.
    Merge,
    /// Clear every pore holding this kind first, then apply.
    Overwrite,
    /// Remove all conditions from the given pores.
    Remove,
}

/// Boundary values for a `set` call: one value for every pore, or one per
/// pore in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BcValues {
    Scalar(f64),
    PerPore(Vec<f64>),
}

impl From<f64> for BcValues {
    fn from(value: f64) -> Self {
        BcValues::Scalar(value)
    }
}

impl From<Vec<f64>> for BcValues {
    fn from(values: Vec<f64>) -> Self {
        BcValues::PerPore(values)
    }
}

/// Tagged per-pore boundary condition store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConditions {
    slots: Vec<Option<(BcKind, f64)>>,
}

impl BoundaryConditions {
    pub fn new(num_pores: usize) -> Self {
        Self {
            slots: vec![None; num_pores],
        }
    }

    pub fn num_pores(&self) -> usize {
        self.slots.len()
    }

    /// Apply boundary conditions to the given pores.
    ///
    /// Validation happens in full before any mutation, so a failed call
    /// leaves the store unchanged. Fails with
    /// [`TransportError::InvalidArgument`] when a pore index is out of range,
    /// when a per-pore value vector does not match the pore count, when a
    /// value is not finite, or when a target pore already holds the other
    /// condition kind.
    pub fn set(
        &mut self,
        pores: &[usize],
        kind: BcKind,
        values: &BcValues,
        mode: BcMode,
    ) -> TransportResult<()> {
        if mode == BcMode::Remove {
            return self.remove(pores);
        }
        self.check_pores(pores)?;

        let resolved: Vec<f64> = match values {
            BcValues::Scalar(v) => vec![*v; pores.len()],
            BcValues::PerPore(v) => {
                if v.len() != pores.len() {
                    return Err(TransportError::InvalidArgument(
                        "value count must match location count".into(),
                    ));
                }
                v.clone()
            }
        };
        if resolved.iter().any(|v| !v.is_finite()) {
            return Err(TransportError::InvalidArgument(
                "boundary values must be finite".into(),
            ));
        }
        let other = match kind {
            BcKind::Dirichlet => BcKind::Neumann,
            BcKind::Neumann => BcKind::Dirichlet,
        };
        for &p in pores {
            if matches!(self.slots[p], Some((k, _)) if k == other) {
                return Err(TransportError::InvalidArgument(format!(
                    "pore {} already holds a {} condition; remove it before applying a {} condition",
                    p, other, kind
                )));
            }
        }

        if mode == BcMode::Overwrite {
            for slot in &mut self.slots {
                if matches!(slot, Some((k, _)) if *k == kind) {
                    *slot = None;
                }
            }
        }
        for (&p, &v) in pores.iter().zip(resolved.iter()) {
            self.slots[p] = Some((kind, v));
        }
        Ok(())
    }

    /// Remove all boundary conditions from the given pores. Pores without a
    /// condition are silently skipped.
    pub fn remove(&mut self, pores: &[usize]) -> TransportResult<()> {
        self.check_pores(pores)?;
        for &p in pores {
            self.slots[p] = None;
        }
        Ok(())
    }

    /// Remove every boundary condition in the store.
    pub fn remove_all(&mut self) {
        self.slots.fill(None);
    }

    /// The condition at a pore, if any.
    pub fn condition(&self, pore: usize) -> Option<(BcKind, f64)> {
        self.slots.get(pore).copied().flatten()
    }

    pub fn kind(&self, pore: usize) -> Option<BcKind> {
        self.condition(pore).map(|(k, _)| k)
    }

    pub fn value(&self, pore: usize) -> Option<f64> {
        self.condition(pore).map(|(_, v)| v)
    }

    /// Pores holding a condition of the given kind, ascending.
    pub fn pores_of_kind(&self, kind: BcKind) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(p, slot)| match slot {
                Some((k, _)) if *k == kind => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn dirichlet_pores(&self) -> Vec<usize> {
        self.pores_of_kind(BcKind::Dirichlet)
    }

    pub fn neumann_pores(&self) -> Vec<usize> {
        self.pores_of_kind(BcKind::Neumann)
    }

    pub fn any_dirichlet(&self) -> bool {
        self.slots
            .iter()
            .any(|s| matches!(s, Some((BcKind::Dirichlet, _))))
    }

    pub fn any_neumann(&self) -> bool {
        self.slots
            .iter()
            .any(|s| matches!(s, Some((BcKind::Neumann, _))))
    }

    fn check_pores(&self, pores: &[usize]) -> TransportResult<()> {
        for &p in pores {
            if p >= self.slots.len() {
                return Err(TransportError::InvalidArgument(format!(
                    "pore index {} out of range for network with {} pores",
                    p,
                    self.slots.len()
                )));
            }
        }
        Ok(())
    }
}

//! Steady-state linear transport over a pore network.
//!
//! [`LinearTransport`] is the generic engine behind diffusion, viscous flow,
//! and conduction solves: bind a throat conductance key and a pore quantity
//! key, apply boundary conditions, and `run` to populate the quantity field.
//! Derived quantities (net rates across pore-set boundaries, the effective
//! bulk transport coefficient) are computed from the solved field afterward.
//!
//! Instances own their matrix/RHS state exclusively and rebuild it from
//! scratch on every `run`, so parallel parameter sweeps just use one instance
//! per thread; nothing is shared.
//!
//! ## Example
//!
//! ```rust
//! use pnt_algo::LinearTransport;
//! use pnt_core::{Phase, PoreNetwork};
//!
//! let mut network = PoreNetwork::new();
//! for i in 0..3 {
//!     network.add_pore([i as f64, 0.0, 0.0]);
//! }
//! network.add_throat(0, 1).unwrap();
//! network.add_throat(1, 2).unwrap();
//!
//! let mut phase = Phase::new("water");
//! phase
//!     .set_throat_values("throat.conductance", vec![1.0, 1.0])
//!     .unwrap();
//!
//! let mut alg = LinearTransport::new(&network);
//! alg.setup(&phase, "throat.conductance", "pore.pressure").unwrap();
//! alg.set_dirichlet(&[0], 1.0).unwrap();
//! alg.set_dirichlet(&[2], 0.0).unwrap();
//! alg.run(&network, &phase).unwrap();
//!
//! let pressure = alg.quantity().unwrap();
//! assert!((pressure[1] - 0.5).abs() < 1e-12);
//! ```

use crate::boundary::{BcKind, BcMode, BcValues, BoundaryConditions};
use crate::error::{TransportError, TransportResult};
use crate::laplacian::{build_rhs, build_system_matrix};
use pnt_core::phase::split_key;
use pnt_core::{Entity, NeighborMode, Phase, PoreNetwork, SolverKind};
use sprs::CsMat;
use std::collections::HashSet;

/// How [`LinearTransport::rate`] partitions the queried pores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateMode {
    /// One cumulative rate for the whole pore set.
    Group,
    /// One rate per queried pore.
    Individual,
}

/// Property-key bindings and solver selection for one algorithm instance.
#[derive(Debug, Clone, Default)]
pub struct TransportSettings {
    /// Throat property holding conductances, e.g. `throat.diffusive_conductance`.
    pub conductance: Option<String>,
    /// Pore property the solution is stored under, e.g. `pore.mole_fraction`.
    pub quantity: Option<String>,
    /// Linear-system backend used by `run`.
    pub solver: SolverKind,
}

/// Generic linear transport algorithm.
#[derive(Debug, Clone)]
pub struct LinearTransport {
    num_pores: usize,
    settings: TransportSettings,
    bcs: BoundaryConditions,
    a: Option<CsMat<f64>>,
    b: Option<Vec<f64>>,
    quantity: Option<Vec<f64>>,
}

impl LinearTransport {
    pub fn new(network: &PoreNetwork) -> Self {
        Self {
            num_pores: network.num_pores(),
            settings: TransportSettings::default(),
            bcs: BoundaryConditions::new(network.num_pores()),
            a: None,
            b: None,
            quantity: None,
        }
    }

    /// Select the linear-system backend (default: faer LU).
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.settings.solver = solver;
        self
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.bcs
    }

    /// Bind the conductance and quantity property keys.
    ///
    /// The conductance key must name a throat property and the quantity key a
    /// pore property (`InvalidArgument` otherwise). The bound conductance
    /// field is scanned for NaN here so that a bad setup fails early; `run`
    /// repeats the scan against whatever phase it is given.
    pub fn setup(
        &mut self,
        phase: &Phase,
        conductance_key: &str,
        quantity_key: &str,
    ) -> TransportResult<()> {
        let (entity, _) =
            split_key(conductance_key).map_err(|e| TransportError::InvalidArgument(e.to_string()))?;
        if entity != Entity::Throat {
            return Err(TransportError::InvalidArgument(format!(
                "conductance key '{}' must name a throat property",
                conductance_key
            )));
        }
        let (entity, _) =
            split_key(quantity_key).map_err(|e| TransportError::InvalidArgument(e.to_string()))?;
        if entity != Entity::Pore {
            return Err(TransportError::InvalidArgument(format!(
                "quantity key '{}' must name a pore property",
                quantity_key
            )));
        }

        let g = phase.throat_values(conductance_key).ok_or_else(|| {
            TransportError::Precondition(format!("phase has no property '{}'", conductance_key))
        })?;
        if g.iter().any(|v| v.is_nan()) {
            return Err(TransportError::Precondition(
                "the provided throat conductance contains NaNs".into(),
            ));
        }

        self.settings.conductance = Some(conductance_key.to_string());
        self.settings.quantity = Some(quantity_key.to_string());
        Ok(())
    }

    /// Apply boundary conditions to the given pores. See
    /// [`BoundaryConditions::set`] for merge/overwrite/remove semantics.
    pub fn set_boundary_conditions(
        &mut self,
        pores: &[usize],
        kind: BcKind,
        values: impl Into<BcValues>,
        mode: BcMode,
    ) -> TransportResult<()> {
        self.bcs.set(pores, kind, &values.into(), mode)
    }

    /// Fix the quantity value at the given pores (merge mode).
    pub fn set_dirichlet(&mut self, pores: &[usize], value: f64) -> TransportResult<()> {
        self.bcs
            .set(pores, BcKind::Dirichlet, &value.into(), BcMode::Merge)
    }

    /// Fix the net flux into the given pores (merge mode).
    pub fn set_neumann(&mut self, pores: &[usize], value: f64) -> TransportResult<()> {
        self.bcs
            .set(pores, BcKind::Neumann, &value.into(), BcMode::Merge)
    }

    /// Remove all boundary conditions from the given pores.
    pub fn remove_boundary_conditions(&mut self, pores: &[usize]) -> TransportResult<()> {
        self.bcs.remove(pores)
    }

    /// Remove every boundary condition.
    pub fn remove_all_boundary_conditions(&mut self) {
        self.bcs.remove_all();
    }

    /// Assemble and solve the transport system, storing the solution as the
    /// per-pore quantity field.
    ///
    /// The matrix and RHS are rebuilt from scratch on every call and retained
    /// for diagnostics ([`Self::system_matrix`], [`Self::rhs`]). On failure
    /// the quantity field is not written.
    pub fn run(&mut self, network: &PoreNetwork, phase: &Phase) -> TransportResult<()> {
        if network.num_pores() != self.num_pores {
            return Err(TransportError::InvalidArgument(format!(
                "network has {} pores but the algorithm was created for {}",
                network.num_pores(),
                self.num_pores
            )));
        }
        let g = self.conductance_values(network, phase)?;
        // The phase passed here need not be the one `setup` scanned, so the
        // NaN check is repeated against the actual solve input.
        if g.iter().any(|v| v.is_nan()) {
            return Err(TransportError::Precondition(
                "the provided throat conductance contains NaNs".into(),
            ));
        }

        let a = build_system_matrix(network, g, &self.bcs)?;
        let b = build_rhs(&self.bcs);
        let dense = to_dense(&a);

        let backend = self.settings.solver.build_solver();
        let solved = backend.solve(&dense, &b);

        // The assembled system is retained for diagnostics even when the
        // solve fails; the quantity field is only written on success.
        self.a = Some(a);
        self.b = Some(b);
        self.quantity = Some(solved?);
        Ok(())
    }

    /// The solved quantity field, if `run` has succeeded.
    pub fn quantity(&self) -> Option<&[f64]> {
        self.quantity.as_deref()
    }

    /// The key the quantity field is stored under.
    pub fn quantity_key(&self) -> Option<&str> {
        self.settings.quantity.as_deref()
    }

    /// Copy the solved quantity field onto a phase under the bound key.
    pub fn write_quantity(&self, phase: &mut Phase) -> TransportResult<()> {
        let x = self
            .quantity
            .as_ref()
            .ok_or_else(|| TransportError::Precondition("algorithm has not been run".into()))?;
        let key = self
            .settings
            .quantity
            .as_ref()
            .ok_or_else(|| TransportError::Precondition("setup() has not been called".into()))?;
        phase
            .set_pore_values(key, x.clone())
            .map_err(|e| TransportError::InvalidArgument(e.to_string()))
    }

    /// The assembled system matrix from the last `run`, for diagnostics.
    pub fn system_matrix(&self) -> Option<&CsMat<f64>> {
        self.a.as_ref()
    }

    /// The assembled right-hand side from the last `run`, for diagnostics.
    pub fn rhs(&self) -> Option<&[f64]> {
        self.b.as_deref()
    }

    /// Net rate of material moving into the given pores.
    ///
    /// Only throats crossing the set boundary carry net flux; internal
    /// throats are excluded. For each boundary throat the contribution is
    /// `g * (x_outer - x_inner)`, so a negative rate means net inflow
    /// (material accumulating in the set). Returns one value in
    /// [`RateMode::Group`] mode, one per pore in [`RateMode::Individual`]
    /// mode.
    pub fn rate(
        &self,
        network: &PoreNetwork,
        phase: &Phase,
        pores: &[usize],
        mode: RateMode,
    ) -> TransportResult<Vec<f64>> {
        if network.num_pores() != self.num_pores {
            return Err(TransportError::InvalidArgument(format!(
                "network has {} pores but the algorithm was created for {}",
                network.num_pores(),
                self.num_pores
            )));
        }
        let x = self
            .quantity
            .as_ref()
            .ok_or_else(|| TransportError::Precondition("algorithm has not been run".into()))?;
        if pores.is_empty() {
            return Err(TransportError::InvalidArgument("pore set is empty".into()));
        }
        let g = self.conductance_values(network, phase)?;

        let groups: Vec<(Vec<usize>, Vec<usize>)> = match mode {
            RateMode::Group => {
                let throats = network.neighbor_throats(pores, NeighborMode::NotIntersection)?;
                vec![(pores.to_vec(), throats)]
            }
            RateMode::Individual => network
                .neighbor_throats_grouped(pores, NeighborMode::NotIntersection)?
                .into_iter()
                .zip(pores.iter())
                .map(|(throats, &p)| (vec![p], throats))
                .collect(),
        };

        let mut rates = Vec::with_capacity(groups.len());
        for (members, throats) in groups {
            let inside: HashSet<usize> = members.into_iter().collect();
            let mut total = 0.0;
            for (&t, (p1, p2)) in throats.iter().zip(network.connected_pores(&throats)?) {
                // Orient so the inner endpoint is the one in the group.
                let (inner, outer) = if inside.contains(&p1) {
                    (p1, p2)
                } else {
                    (p2, p1)
                };
                total += g[t] * (x[outer] - x[inner]);
            }
            rates.push(total);
        }
        Ok(rates)
    }

    /// Domain-scale transport coefficient from a two-level Dirichlet solve.
    ///
    /// Pores at the higher Dirichlet value form the inlet face, pores at the
    /// lower value the outlet face. The coefficient combines the net rate
    /// into the inlet face with the domain area and length:
    /// `D = rate * L / (A * (outlet - inlet))`, positive for a
    /// positive-conductance medium since the inlet rate is an inflow
    /// (negative under the rate sign convention).
    pub fn effective_property(
        &self,
        network: &PoreNetwork,
        phase: &Phase,
    ) -> TransportResult<f64> {
        if self.quantity.is_none() {
            return Err(TransportError::Precondition(
                "algorithm has not been run".into(),
            ));
        }

        let dirichlet = self.bcs.dirichlet_pores();
        let mut levels: Vec<f64> = dirichlet
            .iter()
            .filter_map(|&p| self.bcs.value(p))
            .collect();
        levels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        levels.dedup();
        if levels.len() != 2 {
            return Err(TransportError::Precondition(format!(
                "effective property requires exactly two distinct dirichlet values, found {}",
                levels.len()
            )));
        }
        let (v_min, v_max) = (levels[0], levels[1]);
        let inlets: Vec<usize> = dirichlet
            .iter()
            .copied()
            .filter(|&p| self.bcs.value(p) == Some(v_max))
            .collect();
        let outlets: Vec<usize> = dirichlet
            .iter()
            .copied()
            .filter(|&p| self.bcs.value(p) == Some(v_min))
            .collect();

        let area = network.domain_area(&inlets)?;
        let length = network.domain_length(&inlets, &outlets)?;
        let rate: f64 = self
            .rate(network, phase, &inlets, RateMode::Group)?
            .into_iter()
            .sum();
        Ok(rate * length / (area * (v_min - v_max)))
    }

    fn conductance_values<'p>(
        &self,
        network: &PoreNetwork,
        phase: &'p Phase,
    ) -> TransportResult<&'p [f64]> {
        let key = self
            .settings
            .conductance
            .as_ref()
            .ok_or_else(|| TransportError::Precondition("setup() has not been called".into()))?;
        let g = phase.throat_values(key).ok_or_else(|| {
            TransportError::Precondition(format!("phase has no property '{}'", key))
        })?;
        if g.len() != network.num_throats() {
            return Err(TransportError::InvalidArgument(format!(
                "conductance field has {} values but the network has {} throats",
                g.len(),
                network.num_throats()
            )));
        }
        Ok(g)
    }
}

fn to_dense(a: &CsMat<f64>) -> Vec<Vec<f64>> {
    let mut dense = vec![vec![0.0; a.cols()]; a.rows()];
    for (value, (row, col)) in a.iter() {
        dense[row][col] += *value;
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{chain_network, lattice_with_faces, uniform_conductance};

    const G_KEY: &str = "throat.conductance";
    const X_KEY: &str = "pore.quantity";

    fn solved_chain(n: usize) -> (PoreNetwork, Phase, LinearTransport) {
        let network = chain_network(n);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let mut alg = LinearTransport::new(&network);
        alg.setup(&phase, G_KEY, X_KEY).unwrap();
        alg.set_dirichlet(&[0], 1.0).unwrap();
        alg.set_dirichlet(&[n - 1], 0.0).unwrap();
        alg.run(&network, &phase).unwrap();
        (network, phase, alg)
    }

    #[test]
    fn test_chain_interpolates_linearly() {
        let (_, _, alg) = solved_chain(3);
        let x = alg.quantity().unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 0.5).abs() < 1e-12);
        assert!(x[2].abs() < 1e-12);
    }

    #[test]
    fn test_dirichlet_values_reproduced_exactly() {
        let (network, _, outlet) = lattice_with_faces([3, 3, 1], 1.0);
        let phase = uniform_conductance(&network, G_KEY, 2.5);
        let mut alg = LinearTransport::new(&network);
        alg.setup(&phase, G_KEY, X_KEY).unwrap();
        alg.set_boundary_conditions(
            &[0, 4],
            BcKind::Dirichlet,
            vec![7.25, -1.5],
            BcMode::Merge,
        )
        .unwrap();
        alg.set_dirichlet(&outlet, 0.0).unwrap();
        alg.run(&network, &phase).unwrap();

        let x = alg.quantity().unwrap();
        assert!((x[0] - 7.25).abs() < 1e-12);
        assert!((x[4] + 1.5).abs() < 1e-12);
        for &p in &outlet {
            assert!(x[p].abs() < 1e-12);
        }
    }

    #[test]
    fn test_run_before_setup_fails() {
        let network = chain_network(3);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let mut alg = LinearTransport::new(&network);
        assert!(matches!(
            alg.run(&network, &phase),
            Err(TransportError::Precondition(_))
        ));
        assert!(alg.quantity().is_none());
    }

    #[test]
    fn test_setup_rejects_wrong_entity_keys() {
        let network = chain_network(3);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let mut alg = LinearTransport::new(&network);
        assert!(matches!(
            alg.setup(&phase, "pore.conductance", X_KEY),
            Err(TransportError::InvalidArgument(_))
        ));
        assert!(matches!(
            alg.setup(&phase, G_KEY, "throat.quantity"),
            Err(TransportError::InvalidArgument(_))
        ));
        assert!(matches!(
            alg.setup(&phase, "conductance", X_KEY),
            Err(TransportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_setup_rejects_nan_conductance() {
        let network = chain_network(3);
        let mut phase = Phase::new("broken");
        phase
            .set_throat_values(G_KEY, vec![1.0, f64::NAN])
            .unwrap();
        let mut alg = LinearTransport::new(&network);
        assert!(matches!(
            alg.setup(&phase, G_KEY, X_KEY),
            Err(TransportError::Precondition(_))
        ));
    }

    #[test]
    fn test_run_is_idempotent() {
        let (network, phase, mut alg) = solved_chain(5);
        let first = alg.quantity().unwrap().to_vec();
        alg.run(&network, &phase).unwrap();
        assert_eq!(alg.quantity().unwrap(), first.as_slice());
    }

    #[test]
    fn test_failed_run_leaves_quantity_unset() {
        // No Dirichlet condition anywhere: the Laplacian is singular.
        let network = chain_network(3);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let mut alg = LinearTransport::new(&network);
        alg.setup(&phase, G_KEY, X_KEY).unwrap();
        assert!(matches!(
            alg.run(&network, &phase),
            Err(TransportError::Solve(_))
        ));
        assert!(alg.quantity().is_none());
        // The assembled system is still retained for inspection.
        assert!(alg.system_matrix().is_some());
        assert!(alg.rhs().is_some());
    }

    #[test]
    fn test_rate_conservation_on_chain() {
        let (network, phase, alg) = solved_chain(4);
        let inflow = alg.rate(&network, &phase, &[0], RateMode::Group).unwrap()[0];
        let outflow = alg.rate(&network, &phase, &[3], RateMode::Group).unwrap()[0];
        assert!((inflow + outflow).abs() < 1e-12);
        // Unit conductance over three series throats: |rate| = 1/3.
        assert!((inflow + 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rate_group_matches_sum_of_individual() {
        let (network, inlet, outlet) = lattice_with_faces([4, 3, 3], 1.0);
        let phase = uniform_conductance(&network, G_KEY, 1.5);
        let mut alg = LinearTransport::new(&network);
        alg.setup(&phase, G_KEY, X_KEY).unwrap();
        alg.set_dirichlet(&inlet, 2.0).unwrap();
        alg.set_dirichlet(&outlet, 1.0).unwrap();
        alg.run(&network, &phase).unwrap();

        let group = alg
            .rate(&network, &phase, &inlet, RateMode::Group)
            .unwrap()[0];
        let individual: f64 = alg
            .rate(&network, &phase, &inlet, RateMode::Individual)
            .unwrap()
            .into_iter()
            .sum();
        assert!(
            (group - individual).abs() < 1e-10,
            "group {} != sum of individual {}",
            group,
            individual
        );
    }

    #[test]
    fn test_rate_at_neumann_pore_equals_prescribed_flux() {
        let network = chain_network(3);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let mut alg = LinearTransport::new(&network);
        alg.setup(&phase, G_KEY, X_KEY).unwrap();
        alg.set_dirichlet(&[0], 0.0).unwrap();
        alg.set_neumann(&[2], 2.0).unwrap();
        alg.run(&network, &phase).unwrap();

        let rate = alg.rate(&network, &phase, &[2], RateMode::Group).unwrap()[0];
        assert!((rate - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rate_rejects_bad_pore_sets() {
        let (network, phase, alg) = solved_chain(3);
        assert!(matches!(
            alg.rate(&network, &phase, &[], RateMode::Group),
            Err(TransportError::InvalidArgument(_))
        ));
        assert!(matches!(
            alg.rate(&network, &phase, &[99], RateMode::Group),
            Err(TransportError::Network(_))
        ));
    }

    #[test]
    fn test_rate_rejects_grown_network() {
        // The network is append-only, so pores added after a solve have no
        // entry in the stored quantity field.
        let (mut network, phase, alg) = solved_chain(3);
        let p3 = network.add_pore([3.0, 0.0, 0.0]);
        network.add_throat(2, p3).unwrap();
        let phase2 = uniform_conductance(&network, G_KEY, 1.0);

        assert!(matches!(
            alg.rate(&network, &phase2, &[p3], RateMode::Group),
            Err(TransportError::InvalidArgument(_))
        ));
        assert!(matches!(
            alg.effective_property(&network, &phase2),
            Err(TransportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_run_rescans_conductance_for_nan() {
        // setup() scans one phase, but run() may be handed another.
        let network = chain_network(3);
        let clean = uniform_conductance(&network, G_KEY, 1.0);
        let mut broken = Phase::new("broken");
        broken
            .set_throat_values(G_KEY, vec![1.0, f64::NAN])
            .unwrap();

        let mut alg = LinearTransport::new(&network);
        alg.setup(&clean, G_KEY, X_KEY).unwrap();
        alg.set_dirichlet(&[0], 1.0).unwrap();
        alg.set_dirichlet(&[2], 0.0).unwrap();
        assert!(matches!(
            alg.run(&network, &broken),
            Err(TransportError::Precondition(_))
        ));
        assert!(alg.quantity().is_none());
    }

    #[test]
    fn test_rate_before_run_fails() {
        let network = chain_network(3);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let alg = LinearTransport::new(&network);
        assert!(matches!(
            alg.rate(&network, &phase, &[0], RateMode::Group),
            Err(TransportError::Precondition(_))
        ));
    }

    #[test]
    fn test_effective_property_before_run_fails() {
        let network = chain_network(3);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let alg = LinearTransport::new(&network);
        let err = alg.effective_property(&network, &phase).unwrap_err();
        match err {
            TransportError::Precondition(msg) => {
                assert!(msg.contains("has not been run"))
            }
            other => panic!("expected Precondition, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_property_on_uniform_lattice() {
        let (network, inlet, outlet) = lattice_with_faces([3, 3, 3], 1.0);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let mut alg = LinearTransport::new(&network);
        alg.setup(&phase, G_KEY, X_KEY).unwrap();
        alg.set_dirichlet(&inlet, 1.0).unwrap();
        alg.set_dirichlet(&outlet, 0.0).unwrap();
        alg.run(&network, &phase).unwrap();

        // Nine parallel chains of two series unit conductances give a network
        // conductance of 4.5; with face area 4 and length 2 the effective
        // coefficient is 4.5 * 2 / 4 = 2.25.
        let d_eff = alg.effective_property(&network, &phase).unwrap();
        assert!((d_eff - 2.25).abs() < 1e-10, "d_eff = {}", d_eff);
    }

    #[test]
    fn test_effective_property_requires_two_levels() {
        let (network, inlet, outlet) = lattice_with_faces([3, 3, 3], 1.0);
        let phase = uniform_conductance(&network, G_KEY, 1.0);
        let mut alg = LinearTransport::new(&network);
        alg.setup(&phase, G_KEY, X_KEY).unwrap();
        alg.set_dirichlet(&inlet, 1.0).unwrap();
        alg.set_dirichlet(&outlet, 0.0).unwrap();
        alg.set_dirichlet(&[13], 0.5).unwrap();
        alg.run(&network, &phase).unwrap();

        assert!(matches!(
            alg.effective_property(&network, &phase),
            Err(TransportError::Precondition(_))
        ));
    }

    #[test]
    fn test_gauss_backend_matches_faer() {
        let network = chain_network(6);
        let phase = uniform_conductance(&network, G_KEY, 3.0);
        let mut faer_alg = LinearTransport::new(&network);
        let mut gauss_alg = LinearTransport::new(&network).with_solver(SolverKind::Gauss);
        for alg in [&mut faer_alg, &mut gauss_alg] {
            alg.setup(&phase, G_KEY, X_KEY).unwrap();
            alg.set_dirichlet(&[0], 4.0).unwrap();
            alg.set_dirichlet(&[5], -4.0).unwrap();
            alg.run(&network, &phase).unwrap();
        }
        for (a, b) in faer_alg
            .quantity()
            .unwrap()
            .iter()
            .zip(gauss_alg.quantity().unwrap())
        {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn test_write_quantity_to_phase() {
        let (_, mut phase, alg) = solved_chain(3);
        alg.write_quantity(&mut phase).unwrap();
        let stored = phase.pore_values(X_KEY).unwrap();
        assert_eq!(stored, alg.quantity().unwrap());
    }
}

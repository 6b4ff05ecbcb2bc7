//! Shared network fixtures for tests.

use pnt_core::{Phase, PoreNetwork};

/// A linear chain of `n` pores spaced one unit apart along x.
pub fn chain_network(n: usize) -> PoreNetwork {
    let mut network = PoreNetwork::new();
    for i in 0..n {
        network.add_pore([i as f64, 0.0, 0.0]);
    }
    for i in 0..n.saturating_sub(1) {
        network
            .add_throat(i, i + 1)
            .expect("chain endpoints are in range");
    }
    network
}

/// A cubic lattice plus its x = 0 (inlet) and x = max (outlet) face pores.
pub fn lattice_with_faces(
    shape: [usize; 3],
    spacing: f64,
) -> (PoreNetwork, Vec<usize>, Vec<usize>) {
    let network = PoreNetwork::cubic(shape, spacing);
    let [nx, ny, nz] = shape;
    let face = |i: usize| -> Vec<usize> {
        let mut pores = Vec::with_capacity(ny * nz);
        for j in 0..ny {
            for k in 0..nz {
                pores.push((i * ny + j) * nz + k);
            }
        }
        pores
    };
    (network, face(0), face(nx - 1))
}

/// A phase with the same conductance on every throat, stored under `key`.
pub fn uniform_conductance(network: &PoreNetwork, key: &str, g: f64) -> Phase {
    let mut phase = Phase::new("test_phase");
    phase
        .set_throat_values(key, vec![g; network.num_throats()])
        .expect("key must carry the throat prefix");
    phase
}

//! # pnt-core: Pore Network Modeling Core
//!
//! Provides the fundamental data structures and graph-based network model for
//! pore-scale transport analysis.
//!
//! ## Design Philosophy
//!
//! Networks are modeled as **undirected multigraphs** where:
//! - **Nodes**: Pores (lumped void volumes with spatial coordinates)
//! - **Edges**: Throats (constrictions connecting exactly two pores)
//!
//! This graph-based approach enables:
//! - Fast topological queries (neighbor throats, connected pores)
//! - Direct translation to sparse adjacency/Laplacian matrices
//! - Support for multiple throats between the same pore pair
//!
//! Pore and throat indices are creation-ordered and stable: the network is
//! append-only, so index `i` always refers to the `i`-th element added.
//!
//! ## Quick Start
//!
//! ```rust
//! use pnt_core::PoreNetwork;
//!
//! let mut network = PoreNetwork::new();
//! let p0 = network.add_pore([0.0, 0.0, 0.0]);
//! let p1 = network.add_pore([1.0, 0.0, 0.0]);
//! network.add_throat(p0, p1).unwrap();
//!
//! assert_eq!(network.num_pores(), 2);
//! assert_eq!(network.num_throats(), 1);
//! ```

pub mod phase;
pub mod solver;

pub use phase::{Entity, Phase, PhaseError};
pub use solver::{FaerSolver, GaussSolver, LinearSystemBackend, SolveError, SolverKind};

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from network topology and geometry queries.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("pore index {index} out of range for network with {count} pores")]
    PoreOutOfRange { index: usize, count: usize },

    #[error("throat index {index} out of range for network with {count} throats")]
    ThroatOutOfRange { index: usize, count: usize },

    #[error("self-loop throats are not supported")]
    SelfLoop,

    #[error("weight count {got} does not match throat count {expected}")]
    WeightCount { expected: usize, got: usize },

    #[error("face pore set is empty")]
    EmptyFace,

    #[error("face pores span a degenerate (zero-area) region")]
    DegenerateFace,
}

/// A pore: a lumped void volume at a point in space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pore {
    /// Center coordinates in meters.
    pub coords: [f64; 3],
    /// Equivalent spherical diameter in meters.
    pub diameter: f64,
}

impl Default for Pore {
    fn default() -> Self {
        Self {
            coords: [0.0; 3],
            diameter: 0.0,
        }
    }
}

/// A throat: a constriction connecting exactly two pores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Throat {
    /// Equivalent cylindrical diameter in meters.
    pub diameter: f64,
    /// Center-to-center length in meters.
    pub length: f64,
}

/// Inclusion mode for neighbor-throat queries.
///
/// Given a query set of pores, a throat is classified by how many of its two
/// endpoints fall inside the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborMode {
    /// Throats touching at least one pore of the set.
    Union,
    /// Throats with both endpoints inside the set.
    Intersection,
    /// Throats with exactly one endpoint inside the set. These are the
    /// boundary throats that carry net flux across the set boundary.
    NotIntersection,
}

/// An undirected pore/throat multigraph with spatial geometry.
#[derive(Debug, Clone, Default)]
pub struct PoreNetwork {
    pub graph: UnGraph<Pore, Throat>,
}

impl PoreNetwork {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    /// Build a regular cubic lattice of `shape = [nx, ny, nz]` pores with the
    /// given center-to-center spacing. Pores are placed at `[i, j, k] * spacing`
    /// with index `(i * ny + j) * nz + k`; throats connect lattice neighbors
    /// along all three axes.
    pub fn cubic(shape: [usize; 3], spacing: f64) -> Self {
        let [nx, ny, nz] = shape;
        let mut network = Self::new();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let idx = network.add_pore([
                        i as f64 * spacing,
                        j as f64 * spacing,
                        k as f64 * spacing,
                    ]);
                    debug_assert_eq!(idx, (i * ny + j) * nz + k);
                }
            }
        }
        let id = |i: usize, j: usize, k: usize| (i * ny + j) * nz + k;
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    if i + 1 < nx {
                        network
                            .add_throat(id(i, j, k), id(i + 1, j, k))
                            .expect("lattice endpoints are in range");
                    }
                    if j + 1 < ny {
                        network
                            .add_throat(id(i, j, k), id(i, j + 1, k))
                            .expect("lattice endpoints are in range");
                    }
                    if k + 1 < nz {
                        network
                            .add_throat(id(i, j, k), id(i, j, k + 1))
                            .expect("lattice endpoints are in range");
                    }
                }
            }
        }
        network
    }

    /// Add a pore at the given coordinates, returning its index.
    pub fn add_pore(&mut self, coords: [f64; 3]) -> usize {
        self.graph
            .add_node(Pore {
                coords,
                ..Pore::default()
            })
            .index()
    }

    /// Add a throat between two existing pores, returning its index.
    pub fn add_throat(&mut self, p1: usize, p2: usize) -> Result<usize, NetworkError> {
        self.check_pore(p1)?;
        self.check_pore(p2)?;
        if p1 == p2 {
            return Err(NetworkError::SelfLoop);
        }
        let a = self.graph[NodeIndex::new(p1)].coords;
        let b = self.graph[NodeIndex::new(p2)].coords;
        let length = distance(a, b);
        Ok(self
            .graph
            .add_edge(
                NodeIndex::new(p1),
                NodeIndex::new(p2),
                Throat {
                    length,
                    ..Throat::default()
                },
            )
            .index())
    }

    pub fn num_pores(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_throats(&self) -> usize {
        self.graph.edge_count()
    }

    /// All pore indices.
    pub fn pores(&self) -> Vec<usize> {
        (0..self.num_pores()).collect()
    }

    /// Endpoint pores of a throat, in creation order.
    pub fn throat_endpoints(&self, throat: usize) -> Result<(usize, usize), NetworkError> {
        let (a, b) = self
            .graph
            .edge_endpoints(EdgeIndex::new(throat))
            .ok_or(NetworkError::ThroatOutOfRange {
                index: throat,
                count: self.num_throats(),
            })?;
        Ok((a.index(), b.index()))
    }

    /// Endpoint pore pairs for a set of throats.
    pub fn connected_pores(&self, throats: &[usize]) -> Result<Vec<(usize, usize)>, NetworkError> {
        throats.iter().map(|&t| self.throat_endpoints(t)).collect()
    }

    /// Throats neighboring a pore set, flattened, sorted, and deduplicated.
    ///
    /// The `mode` controls inclusion by endpoint membership; see
    /// [`NeighborMode`].
    pub fn neighbor_throats(
        &self,
        pores: &[usize],
        mode: NeighborMode,
    ) -> Result<Vec<usize>, NetworkError> {
        let set = self.pore_set(pores)?;
        let mut throats = Vec::new();
        for edge in self.graph.edge_references() {
            let inside = set.contains(&edge.source().index()) as usize
                + set.contains(&edge.target().index()) as usize;
            let keep = match mode {
                NeighborMode::Union => inside >= 1,
                NeighborMode::Intersection => inside == 2,
                NeighborMode::NotIntersection => inside == 1,
            };
            if keep {
                throats.push(edge.id().index());
            }
        }
        throats.sort_unstable();
        throats.dedup();
        Ok(throats)
    }

    /// Throats neighboring each pore of a set, one group per input pore.
    ///
    /// Membership tests use the whole input set: with
    /// [`NeighborMode::NotIntersection`], a throat between two input pores
    /// appears in no group, since it crosses no set boundary.
    pub fn neighbor_throats_grouped(
        &self,
        pores: &[usize],
        mode: NeighborMode,
    ) -> Result<Vec<Vec<usize>>, NetworkError> {
        let set = self.pore_set(pores)?;
        let mut groups = Vec::with_capacity(pores.len());
        for &p in pores {
            let mut throats = Vec::new();
            for edge in self.graph.edges(NodeIndex::new(p)) {
                let (a, b) = (edge.source().index(), edge.target().index());
                let other = if a == p { b } else { a };
                let keep = match mode {
                    NeighborMode::Union => true,
                    NeighborMode::Intersection => set.contains(&other),
                    NeighborMode::NotIntersection => !set.contains(&other),
                };
                if keep {
                    throats.push(edge.id().index());
                }
            }
            throats.sort_unstable();
            groups.push(throats);
        }
        Ok(groups)
    }

    /// Symmetric weighted adjacency structure in COO triplets.
    ///
    /// Each throat contributes both orientations `(p1, p2, w)` and
    /// `(p2, p1, w)`. The weight slice must hold one value per throat.
    pub fn adjacency_triplets(
        &self,
        weights: &[f64],
    ) -> Result<Vec<(usize, usize, f64)>, NetworkError> {
        if weights.len() != self.num_throats() {
            return Err(NetworkError::WeightCount {
                expected: self.num_throats(),
                got: weights.len(),
            });
        }
        let mut triplets = Vec::with_capacity(2 * self.num_throats());
        for edge in self.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let w = weights[edge.id().index()];
            triplets.push((a, b, w));
            triplets.push((b, a, w));
        }
        Ok(triplets)
    }

    /// Cross-sectional area of a boundary face, estimated as the bounding
    /// rectangle of the face pore centers in their two dominant axes.
    pub fn domain_area(&self, face: &[usize]) -> Result<f64, NetworkError> {
        let coords = self.face_coords(face)?;
        let mut spans = axis_spans(&coords);
        spans.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let area = spans[0] * spans[1];
        if area <= 0.0 {
            return Err(NetworkError::DegenerateFace);
        }
        Ok(area)
    }

    /// Macroscopic length between two boundary faces: the distance between
    /// their pore-center centroids.
    pub fn domain_length(&self, face1: &[usize], face2: &[usize]) -> Result<f64, NetworkError> {
        let c1 = centroid(&self.face_coords(face1)?);
        let c2 = centroid(&self.face_coords(face2)?);
        Ok(distance(c1, c2))
    }

    fn check_pore(&self, index: usize) -> Result<(), NetworkError> {
        if index >= self.num_pores() {
            return Err(NetworkError::PoreOutOfRange {
                index,
                count: self.num_pores(),
            });
        }
        Ok(())
    }

    fn pore_set(&self, pores: &[usize]) -> Result<HashSet<usize>, NetworkError> {
        for &p in pores {
            self.check_pore(p)?;
        }
        Ok(pores.iter().copied().collect())
    }

    fn face_coords(&self, face: &[usize]) -> Result<Vec<[f64; 3]>, NetworkError> {
        if face.is_empty() {
            return Err(NetworkError::EmptyFace);
        }
        face.iter()
            .map(|&p| {
                self.check_pore(p)?;
                Ok(self.graph[NodeIndex::new(p)].coords)
            })
            .collect()
    }
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

fn centroid(coords: &[[f64; 3]]) -> [f64; 3] {
    let n = coords.len() as f64;
    let mut c = [0.0; 3];
    for p in coords {
        for axis in 0..3 {
            c[axis] += p[axis];
        }
    }
    for value in &mut c {
        *value /= n;
    }
    c
}

fn axis_spans(coords: &[[f64; 3]]) -> [f64; 3] {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for p in coords {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    [max[0] - min[0], max[1] - min[1], max[2] - min[2]]
}

//! Build a CSR (compressed-sparse-row) *dual graph* of a mesh.
//
// Each *element* is a vertex; an undirected edge joins two elements that
// share at least one node (node-cut partitioning: nodes become the cut).
//
// Returned in METIS-ready CSR form (unweighted, so METIS uses unit vertex
// weights):
//
// * `xadj[i] .. xadj[i+1]`   = neighbour list of element *i*
// * `adjncy`                 = concatenated neighbour vertices
//
// The dual graph is **symmetrised** (i↔j appear in both lists),
// **self-free** (no loops) and neighbour lists are sorted.

use std::collections::BTreeSet;

use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::mesh::MeshModel;

/// CSR adjacency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualGraph {
    pub xadj: Vec<usize>,
    pub adjncy: Vec<usize>,
}

impl DualGraph {
    /// Number of vertices (elements).
    pub fn vertex_count(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjncy.len() / 2
    }

    /// Neighbours of vertex `v`, ascending.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjncy[self.xadj[v]..self.xadj[v + 1]]
    }

    /// Undirected edges `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.vertex_count()).flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .filter(move |&&v| u < v)
                .map(move |&v| (u, v))
        })
    }
}

/// Build the element-adjacency graph. Vertex `i` is element `i` of `mesh`.
pub fn build_dual(mesh: &MeshModel, connectivity: &ConnectivityIndex) -> DualGraph {
    let n = mesh.element_count();

    // 1. adjacency sets: every pair of elements meeting at a node
    let mut adj: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for (e, element) in mesh.elements().iter().enumerate() {
        for &node in &element.nodes {
            for &other in connectivity.incident(node) {
                if other != e {
                    adj[e].insert(other);
                }
            }
        }
    }

    // 2. sets → CSR vectors
    let mut xadj = Vec::with_capacity(n + 1);
    let mut adjncy = Vec::new();
    xadj.push(0);
    for nbrs in &adj {
        adjncy.extend(nbrs.iter().copied());
        xadj.push(adjncy.len());
    }

    DualGraph { xadj, adjncy }
}

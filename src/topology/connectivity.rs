//! Node → incident-element index.
//!
//! Built by one pass over every element's node list, so the cost is linear
//! in the total element–node incidence count. Element indices per node are
//! ascending and free of duplicates (an element listing a node twice still
//! counts once).

use crate::algs::partitioner::PartitionAssignment;
use crate::topology::mesh::MeshModel;
use std::collections::BTreeSet;

/// For every node, the elements incident on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityIndex {
    incident: Vec<Vec<usize>>,
    element_count: usize,
}

impl ConnectivityIndex {
    pub fn build(mesh: &MeshModel) -> Self {
        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); mesh.node_count()];
        for (e, element) in mesh.elements().iter().enumerate() {
            for &n in &element.nodes {
                // elements are visited in order, so a repeat can only be the tail
                if incident[n].last() != Some(&e) {
                    incident[n].push(e);
                }
            }
        }
        Self {
            incident,
            element_count: mesh.element_count(),
        }
    }

    /// Elements incident on node `n`, ascending.
    pub fn incident(&self, n: usize) -> &[usize] {
        &self.incident[n]
    }

    /// Number of nodes covered by the index.
    pub fn len(&self) -> usize {
        self.incident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incident.is_empty()
    }

    /// Number of elements of the indexed mesh.
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Total number of (node, element) incidences.
    pub fn incidence_count(&self) -> usize {
        self.incident.iter().map(Vec::len).sum()
    }

    /// Partition ids of the elements incident on `n`, derived fresh from
    /// `assignment`.
    ///
    /// # Panics
    /// Panics if `assignment` covers fewer elements than this index; check
    /// with [`element_count`](Self::element_count) first.
    pub fn incident_partitions(&self, n: usize, assignment: &PartitionAssignment) -> BTreeSet<usize> {
        self.incident[n]
            .iter()
            .map(|&e| assignment.part_of(e))
            .collect()
    }
}

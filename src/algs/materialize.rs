//! Per-partition node lists.
//!
//! For partition `p` the materializer produces the nodes a solver instance
//! owns exclusively (`local_nodes`) and the nodes it shares with other
//! instances (`shared_nodes`, each annotated with the remote partitions).
//! Three passes, in order:
//!
//! 1. **Elements.** Every node of an element assigned to `p` is local if all
//!    its incident elements are in `p`, shared otherwise.
//! 2. **Dependencies.** For each slave/master pair where exactly one side is
//!    local to `p`, the other side is added as shared; a master of a slave
//!    that is shared in `p` is added as well unless it is local.
//! 3. **Closure.** Any node whose closed partition set contains `p` but is
//!    not yet listed is added as shared.
//!
//! Remote partitions of every node added in passes 2 and 3 are derived from
//! that node's own incident elements.

use crate::algs::classify::NodeClassification;
use crate::algs::partitioner::PartitionAssignment;
use crate::algs::resolver::DependencyTable;
use crate::mesh_error::NodeCutError;
use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::mesh::MeshModel;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Nodes and elements of one partition, ready for an external writer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionNodeList {
    pub partition: usize,
    /// Elements assigned to this partition, ascending.
    pub elements: Vec<usize>,
    pub local_nodes: BTreeSet<usize>,
    /// Shared node → partitions (other than this one) touching it.
    pub shared_nodes: BTreeMap<usize, BTreeSet<usize>>,
}

impl PartitionNodeList {
    pub fn is_local(&self, n: usize) -> bool {
        self.local_nodes.contains(&n)
    }

    pub fn is_shared(&self, n: usize) -> bool {
        self.shared_nodes.contains_key(&n)
    }

    /// Local or shared.
    pub fn is_accessible(&self, n: usize) -> bool {
        self.is_local(n) || self.is_shared(n)
    }

    /// Number of nodes emitted for this partition.
    pub fn node_count(&self) -> usize {
        self.local_nodes.len() + self.shared_nodes.len()
    }

    /// Node-renumbering table: mesh node index → 1-based number inside this
    /// partition, in ascending mesh order.
    pub fn renumbering(&self) -> BTreeMap<usize, usize> {
        let mut all: Vec<usize> = self
            .local_nodes
            .iter()
            .chain(self.shared_nodes.keys())
            .copied()
            .collect();
        all.sort_unstable();
        all.into_iter()
            .enumerate()
            .map(|(i, n)| (n, i + 1))
            .collect()
    }
}

/// Read-only state shared by all per-partition materializations.
#[derive(Clone, Copy, Debug)]
pub struct PartitionContext<'a> {
    mesh: &'a MeshModel,
    connectivity: &'a ConnectivityIndex,
    assignment: &'a PartitionAssignment,
    classification: &'a NodeClassification,
    dependencies: &'a DependencyTable,
}

impl<'a> PartitionContext<'a> {
    /// Bundle the per-run tables of `mesh`.
    ///
    /// # Errors
    /// [`NodeCutError::SizeMismatch`] if a table was built for a mesh of
    /// another size.
    pub fn new(
        mesh: &'a MeshModel,
        connectivity: &'a ConnectivityIndex,
        assignment: &'a PartitionAssignment,
        classification: &'a NodeClassification,
        dependencies: &'a DependencyTable,
    ) -> Result<Self, NodeCutError> {
        let nodes = mesh.node_count();
        let elements = mesh.element_count();
        let sizes = [
            ("connectivity index", nodes, connectivity.len()),
            ("connectivity index elements", elements, connectivity.element_count()),
            ("partition assignment", elements, assignment.len()),
            ("node classification", nodes, classification.len()),
            ("node partition sets", nodes, classification.partitions.len()),
            ("dependency table", nodes, dependencies.len()),
        ];
        if let Some(&(table, expected, found)) =
            sizes.iter().find(|&&(_, expected, found)| expected != found)
        {
            return Err(NodeCutError::SizeMismatch {
                table,
                expected,
                found,
            });
        }
        Ok(Self {
            mesh,
            connectivity,
            assignment,
            classification,
            dependencies,
        })
    }

    /// Node lists of partition `p`.
    pub fn materialize(&self, p: usize) -> PartitionNodeList {
        let mut list = PartitionNodeList {
            partition: p,
            elements: self.assignment.elements_of(p).collect(),
            ..Default::default()
        };

        // 1. element pass
        for &e in &list.elements {
            for &n in &self.mesh.element(e).nodes {
                let remote = self.remote_partitions(n, p);
                if remote.is_empty() {
                    list.local_nodes.insert(n);
                } else {
                    list.shared_nodes.entry(n).or_default().extend(remote);
                }
            }
        }

        // 2. dependency pass, judged against the element pass
        let mut extra = BTreeSet::new();
        for (s, dep) in self.dependencies.iter() {
            for &m in &dep.masters {
                let s_local = list.is_local(s);
                let m_local = list.is_local(m);
                if (s_local || list.is_shared(s)) && !m_local {
                    extra.insert(m);
                } else if m_local && !s_local {
                    extra.insert(s);
                }
            }
        }
        for n in extra {
            self.add_shared(&mut list, n);
        }

        // 3. nodes pulled into p by dependency closure
        for (n, parts) in self.classification.partitions.iter().enumerate() {
            if parts.contains(&p) && !list.is_accessible(n) {
                self.add_shared(&mut list, n);
            }
        }

        list
    }

    /// Node lists of every partition, in partition order.
    pub fn materialize_all(&self) -> Vec<PartitionNodeList> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..self.assignment.n_parts())
                .into_par_iter()
                .map(|p| self.materialize(p))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..self.assignment.n_parts())
                .map(|p| self.materialize(p))
                .collect()
        }
    }

    /// Partitions of `n`'s incident elements other than `p`.
    fn remote_partitions(&self, n: usize, p: usize) -> BTreeSet<usize> {
        let mut parts = self.connectivity.incident_partitions(n, self.assignment);
        parts.remove(&p);
        parts
    }

    fn add_shared(&self, list: &mut PartitionNodeList, n: usize) {
        let remote = self.remote_partitions(n, list.partition);
        list.shared_nodes.entry(n).or_default().extend(remote);
    }
}

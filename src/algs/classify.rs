//! Node classification: local vs. shared.
//!
//! Given the element → partition assignment, every node receives the set of
//! partitions whose elements touch it. A node touched by exactly one
//! partition is [`NodeStatus::Local`]; every other node, including one with
//! no incident element and an empty set, is [`NodeStatus::Shared`].
//! [`NodeStatus::Undefined`] only marks nodes not yet classified.

use crate::algs::partitioner::PartitionAssignment;
use crate::mesh_error::NodeCutError;
use crate::topology::connectivity::ConnectivityIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-node status for one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    #[default]
    Undefined,
    Local,
    Shared,
}

/// Node statuses and touching-partition sets, indexed by node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeClassification {
    pub status: Vec<NodeStatus>,
    /// Partitions that must be able to access each node. Only grows.
    pub partitions: Vec<BTreeSet<usize>>,
}

impl NodeClassification {
    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Whether partition `p` can access node `n`.
    pub fn is_accessible(&self, n: usize, p: usize) -> bool {
        self.partitions[n].contains(&p)
    }

    /// Number of nodes with the given status.
    pub fn count(&self, status: NodeStatus) -> usize {
        self.status.iter().filter(|&&s| s == status).count()
    }
}

/// Classify every node from the connectivity index and the assignment.
/// Pure: neither input is modified.
///
/// # Errors
/// [`NodeCutError::InvalidAssignment`] if the assignment does not cover
/// exactly the indexed elements.
pub fn classify(
    connectivity: &ConnectivityIndex,
    assignment: &PartitionAssignment,
) -> Result<NodeClassification, NodeCutError> {
    if assignment.len() != connectivity.element_count() {
        return Err(NodeCutError::InvalidAssignment(format!(
            "{} entries for {} elements",
            assignment.len(),
            connectivity.element_count()
        )));
    }
    let partitions: Vec<BTreeSet<usize>> = (0..connectivity.len())
        .map(|n| connectivity.incident_partitions(n, assignment))
        .collect();
    let status = partitions
        .iter()
        .map(|parts| {
            if parts.len() == 1 {
                NodeStatus::Local
            } else {
                NodeStatus::Shared
            }
        })
        .collect();
    Ok(NodeClassification { status, partitions })
}

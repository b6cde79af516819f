//! Partitioning metrics utilities.
//!
//! Edge cut of an assignment and the per-partition summary printed at the
//! end of a run (local nodes, shared nodes, elements).

use crate::algs::dual_graph::DualGraph;
use crate::algs::materialize::PartitionNodeList;
use crate::algs::partitioner::PartitionAssignment;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Computes the edge cut of a partitioning (O(E)).
///
/// The edge cut is the number of dual-graph edges that cross between
/// different parts.
pub fn edge_cut(g: &DualGraph, assignment: &PartitionAssignment) -> usize {
    g.edges()
        .filter(|&(u, v)| assignment.part_of(u) != assignment.part_of(v))
        .count()
}

/// Counts for one partition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSummary {
    pub partition: usize,
    pub local_nodes: usize,
    pub shared_nodes: usize,
    pub elements: usize,
}

impl From<&PartitionNodeList> for PartitionSummary {
    fn from(list: &PartitionNodeList) -> Self {
        Self {
            partition: list.partition,
            local_nodes: list.local_nodes.len(),
            shared_nodes: list.shared_nodes.len(),
            elements: list.elements.len(),
        }
    }
}

/// Fixed-width table, one row per partition.
pub fn format_summary_table(rows: &[PartitionSummary]) -> String {
    let header = format!(
        "{:>9} {:>12} {:>12} {:>10}\n{}",
        "Partition",
        "local_nodes",
        "shared_nodes",
        "elements",
        "-".repeat(46)
    );
    let body = rows
        .iter()
        .map(|r| {
            format!(
                "{:>9} {:>12} {:>12} {:>10}",
                r.partition, r.local_nodes, r.shared_nodes, r.elements
            )
        })
        .join("\n");
    if body.is_empty() {
        header
    } else {
        format!("{header}\n{body}")
    }
}

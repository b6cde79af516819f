//! Element → partition assignment and the partitioner seam.
//!
//! The graph partitioner is an external collaborator: it consumes the
//! element-adjacency graph ([`DualGraph`]) and returns one partition id per
//! element together with the number of cut edges. The call is a single
//! blocking, all-or-nothing invocation; any failure is reported as
//! [`NodeCutError::ExternalPartitionerUnavailable`] and is fatal.
//!
//! Implementations:
//! - [`MetisPartitioner`]: k-way METIS (feature `metis-support`).
//! - [`ManualPartitioner`]: a precomputed vector, e.g. from another tool.
//! - [`BlockPartitioner`]: contiguous, equally sized element blocks.

use crate::algs::dual_graph::DualGraph;
use crate::algs::metrics::edge_cut;
use crate::mesh_error::NodeCutError;
use serde::{Deserialize, Serialize};

/// Element index → partition id in `[0, n_parts)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionAssignment {
    parts: Vec<usize>,
    n_parts: usize,
}

impl PartitionAssignment {
    /// Validate and wrap a raw partition vector.
    pub fn new(parts: Vec<usize>, n_parts: usize) -> Result<Self, NodeCutError> {
        if n_parts == 0 {
            return Err(NodeCutError::InvalidPartitionCount(0));
        }
        if let Some((e, &p)) = parts.iter().enumerate().find(|&(_, &p)| p >= n_parts) {
            return Err(NodeCutError::InvalidAssignment(format!(
                "element {e} assigned to partition {p}, but only {n_parts} partitions exist"
            )));
        }
        Ok(Self { parts, n_parts })
    }

    /// Partition of element `e`.
    #[inline]
    pub fn part_of(&self, e: usize) -> usize {
        self.parts[e]
    }

    pub fn n_parts(&self) -> usize {
        self.n_parts
    }

    /// Number of assigned elements.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.parts
    }

    /// Elements assigned to partition `p`, ascending.
    pub fn elements_of(&self, p: usize) -> impl Iterator<Item = usize> + '_ {
        self.parts
            .iter()
            .enumerate()
            .filter_map(move |(e, &q)| (q == p).then_some(e))
    }
}

/// Result of one partitioner invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionOutcome {
    /// Number of dual-graph edges whose endpoints lie in different partitions.
    pub edge_cut: usize,
    pub assignment: PartitionAssignment,
}

/// An element-graph partitioner.
pub trait Partitioner {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Split the vertices of `graph` into `n_parts` partitions.
    fn partition(&self, graph: &DualGraph, n_parts: usize)
    -> Result<PartitionOutcome, NodeCutError>;
}

fn check_part_count(n_parts: usize) -> Result<(), NodeCutError> {
    if n_parts == 0 {
        Err(NodeCutError::InvalidPartitionCount(0))
    } else {
        Ok(())
    }
}

/// Everything in partition 0.
fn single_partition(graph: &DualGraph) -> Result<PartitionOutcome, NodeCutError> {
    Ok(PartitionOutcome {
        edge_cut: 0,
        assignment: PartitionAssignment::new(vec![0; graph.vertex_count()], 1)?,
    })
}

/// A precomputed element → partition vector.
#[derive(Clone, Debug)]
pub struct ManualPartitioner {
    parts: Vec<usize>,
}

impl ManualPartitioner {
    pub fn new(parts: Vec<usize>) -> Self {
        Self { parts }
    }
}

impl Partitioner for ManualPartitioner {
    fn name(&self) -> &str {
        "manual"
    }

    fn partition(
        &self,
        graph: &DualGraph,
        n_parts: usize,
    ) -> Result<PartitionOutcome, NodeCutError> {
        check_part_count(n_parts)?;
        if self.parts.len() != graph.vertex_count() {
            return Err(NodeCutError::InvalidAssignment(format!(
                "manual partition lists {} elements, mesh has {}",
                self.parts.len(),
                graph.vertex_count()
            )));
        }
        let assignment = PartitionAssignment::new(self.parts.clone(), n_parts)?;
        Ok(PartitionOutcome {
            edge_cut: edge_cut(graph, &assignment),
            assignment,
        })
    }
}

/// Contiguous blocks of roughly `n_elements / n_parts` elements each.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockPartitioner;

impl Partitioner for BlockPartitioner {
    fn name(&self) -> &str {
        "block"
    }

    fn partition(
        &self,
        graph: &DualGraph,
        n_parts: usize,
    ) -> Result<PartitionOutcome, NodeCutError> {
        check_part_count(n_parts)?;
        let n = graph.vertex_count();
        let mut parts = Vec::with_capacity(n);
        for i in 0..n_parts {
            while parts.len() < n * (i + 1) / n_parts {
                parts.push(i);
            }
        }
        let assignment = PartitionAssignment::new(parts, n_parts)?;
        Ok(PartitionOutcome {
            edge_cut: edge_cut(graph, &assignment),
            assignment,
        })
    }
}

/// k-way graph partitioning with METIS.
///
/// Without the `metis-support` feature every call fails with
/// [`NodeCutError::ExternalPartitionerUnavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MetisPartitioner;

impl Partitioner for MetisPartitioner {
    fn name(&self) -> &str {
        "metis"
    }

    #[cfg(feature = "metis-support")]
    fn partition(
        &self,
        graph: &DualGraph,
        n_parts: usize,
    ) -> Result<PartitionOutcome, NodeCutError> {
        use metis::Idx;

        check_part_count(n_parts)?;
        let n = graph.vertex_count();
        // METIS rejects a single part; nothing to cut anyway
        if n_parts == 1 || n == 0 {
            return single_partition(graph);
        }
        let unavailable = |e: &dyn std::fmt::Display| {
            NodeCutError::ExternalPartitionerUnavailable(format!("METIS: {e}"))
        };

        let xadj: Vec<Idx> = graph.xadj.iter().map(|&u| u as Idx).collect();
        let adjncy: Vec<Idx> = graph.adjncy.iter().map(|&v| v as Idx).collect();
        let mut part: Vec<Idx> = vec![0; n];

        let objval = metis::Graph::new(1, n_parts as Idx, &xadj, &adjncy)
            .map_err(|e| unavailable(&e))?
            .part_kway(&mut part)
            .map_err(|e| unavailable(&e))?;

        let parts = part.into_iter().map(|p| p as usize).collect();
        let assignment = PartitionAssignment::new(parts, n_parts)?;
        log::debug!("METIS reported edge cut {objval}");
        Ok(PartitionOutcome {
            edge_cut: edge_cut(graph, &assignment),
            assignment,
        })
    }

    #[cfg(not(feature = "metis-support"))]
    fn partition(
        &self,
        graph: &DualGraph,
        n_parts: usize,
    ) -> Result<PartitionOutcome, NodeCutError> {
        check_part_count(n_parts)?;
        if n_parts == 1 {
            return single_partition(graph);
        }
        Err(NodeCutError::ExternalPartitionerUnavailable(
            "METIS support not compiled in (enable the `metis-support` feature)".into(),
        ))
    }
}

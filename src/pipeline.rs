//! End-to-end partitioning run.
//!
//! ```text
//! MeshModel ─► ConnectivityIndex ─► DualGraph ─► Partitioner
//!                                                   │
//!   DependencyTable ─► classify ─► propagate ◄──────┘
//!                                      │
//!                              materialize_all ─► PartitionedMesh
//! ```
//!
//! Any error aborts the run; nothing partial is returned.

use crate::algs::classify::{NodeClassification, NodeStatus, classify};
use crate::algs::closure::{ClosureMode, ClosureReport, propagate, unsatisfied};
use crate::algs::dual_graph::build_dual;
use crate::algs::materialize::{PartitionContext, PartitionNodeList};
use crate::algs::metrics::{PartitionSummary, format_summary_table};
use crate::algs::partitioner::{PartitionAssignment, Partitioner};
use crate::algs::resolver::DependencyResolver;
use crate::config::NodeCutConfig;
use crate::io::deck::{DeckReader, MeshDeck};
use crate::mesh_error::NodeCutError;
use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::mesh::MeshModel;
use std::io::Read;

/// Everything a writer needs to emit one deck per partition.
#[derive(Clone, Debug)]
pub struct PartitionedMesh {
    pub edge_cut: usize,
    pub assignment: PartitionAssignment,
    /// Node statuses after dependency closure.
    pub classification: NodeClassification,
    pub closure: ClosureReport,
    /// One entry per partition, in partition order.
    pub partitions: Vec<PartitionNodeList>,
}

impl PartitionedMesh {
    pub fn summary(&self) -> Vec<PartitionSummary> {
        self.partitions.iter().map(PartitionSummary::from).collect()
    }
}

/// Partition `mesh` into `config.n_parts` node-cut partitions.
pub fn partition_mesh<P: Partitioner + ?Sized>(
    mesh: &MeshModel,
    partitioner: &P,
    config: &NodeCutConfig,
) -> Result<PartitionedMesh, NodeCutError> {
    config.validate()?;
    log::info!(
        "partitioning {} nodes / {} elements into {} parts with {}",
        mesh.node_count(),
        mesh.element_count(),
        config.n_parts,
        partitioner.name()
    );

    let connectivity = ConnectivityIndex::build(mesh);
    let graph = build_dual(mesh, &connectivity);
    log::debug!(
        "dual graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    let outcome = partitioner.partition(&graph, config.n_parts)?;
    let assignment = outcome.assignment;
    if assignment.len() != mesh.element_count() || assignment.n_parts() != config.n_parts {
        return Err(NodeCutError::InvalidAssignment(format!(
            "{} returned {} entries over {} parts, expected {} over {}",
            partitioner.name(),
            assignment.len(),
            assignment.n_parts(),
            mesh.element_count(),
            config.n_parts
        )));
    }
    log::info!("edge cut: {}", outcome.edge_cut);

    let dependencies = DependencyResolver::new(mesh).resolve_all()?;
    log::debug!("{} constrained nodes", dependencies.constrained_count());

    let mut classification = classify(&connectivity, &assignment)?;
    let closure = propagate(&mut classification, &dependencies, config.closure)?;
    log::debug!(
        "closure: {} pass(es), {} shared nodes",
        closure.passes,
        classification.count(NodeStatus::Shared)
    );
    if config.closure == ClosureMode::SinglePass {
        for (s, m) in unsatisfied(&classification, &dependencies)? {
            log::warn!(
                "master node {} not reachable from every partition of slave {} after a single closure pass",
                mesh.node(m).id,
                mesh.node(s).id
            );
        }
    }
    let orphans = classification
        .partitions
        .iter()
        .filter(|parts| parts.is_empty())
        .count();
    if orphans > 0 {
        log::warn!("{orphans} nodes belong to no partition");
    }

    let partitions = PartitionContext::new(
        mesh,
        &connectivity,
        &assignment,
        &classification,
        &dependencies,
    )?
    .materialize_all();

    let result = PartitionedMesh {
        edge_cut: outcome.edge_cut,
        assignment,
        classification,
        closure,
        partitions,
    };
    log::info!("\n{}", format_summary_table(&result.summary()));
    Ok(result)
}

/// Read a deck from `reader` and partition its mesh.
pub fn partition_deck<R: Read, P: Partitioner + ?Sized>(
    reader: R,
    partitioner: &P,
    config: &NodeCutConfig,
) -> Result<(MeshDeck, PartitionedMesh), NodeCutError> {
    let deck = DeckReader.read(reader)?;
    let result = partition_mesh(&deck.mesh, partitioner, config)?;
    Ok((deck, result))
}

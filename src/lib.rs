#![cfg_attr(docsrs, feature(doc_cfg))]
//! # nodecut
//!
//! nodecut splits a finite-element mesh into node-cut partitions: every
//! element goes to exactly one partition, and nodes on partition boundaries
//! are replicated as *shared* nodes. Kinematic dependencies (slave nodes,
//! rigid arms, hanging nodes) are closed across partitions so that every
//! partition holding a dependent node can also reach its masters.
//!
//! ## Features
//! - Line-oriented input-deck reader producing a typed [`topology::MeshModel`]
//! - Node → element connectivity and the element dual graph (CSR)
//! - Pluggable element partitioners: manual, block, and METIS
//! - Local / shared node classification and dependency closure
//!   (single pass or fixed point)
//! - Per-partition node lists with remote-partition annotations
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! nodecut = "0.1"
//! # Optional features:
//! # features = ["metis-support", "parallel"]
//! ```
//!
//! ```no_run
//! use nodecut::prelude::*;
//!
//! # fn main() -> Result<(), NodeCutError> {
//! let file = std::fs::File::open("beam.in")?;
//! let config = NodeCutConfig::new(4)?;
//! let (_deck, run) = partition_deck(file, &MetisPartitioner, &config)?;
//! for list in &run.partitions {
//!     println!("{}: {} local", list.partition, list.local_nodes.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Determinism
//! Given the same mesh and assignment, classification, closure and node
//! lists are identical across runs: all per-node sets are ordered and
//! constrained nodes are visited in node-index order.

pub mod algs;
pub mod config;
pub mod io;
pub mod mesh_error;
pub mod pipeline;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::classify::{NodeClassification, NodeStatus, classify};
    pub use crate::algs::closure::{ClosureMode, ClosureReport, propagate};
    pub use crate::algs::dual_graph::{DualGraph, build_dual};
    pub use crate::algs::materialize::{PartitionContext, PartitionNodeList};
    pub use crate::algs::partitioner::{
        BlockPartitioner, ManualPartitioner, MetisPartitioner, PartitionAssignment, Partitioner,
    };
    pub use crate::algs::resolver::{DependencyResolver, DependencyTable};
    pub use crate::config::NodeCutConfig;
    pub use crate::io::deck::{DeckReader, MeshDeck};
    pub use crate::mesh_error::NodeCutError;
    pub use crate::pipeline::{PartitionedMesh, partition_deck, partition_mesh};
    pub use crate::topology::{
        ConnectivityIndex, Constraint, ConstraintKind, Element, GlobalId, MeshModel, Node,
    };
}

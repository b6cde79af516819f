//! Re-export public algorithms.
//!
//! Pipeline order: [`dual_graph`] → [`partitioner`] → [`resolver`] →
//! [`classify`] → [`closure`] → [`materialize`].

pub mod classify;
pub mod closure;
pub mod dual_graph;
pub mod materialize;
pub mod metrics;
pub mod partitioner;
pub mod resolver;

pub use classify::{NodeClassification, NodeStatus, classify};
pub use closure::{ClosureMode, ClosureReport, propagate};
pub use dual_graph::{DualGraph, build_dual};
pub use materialize::{PartitionContext, PartitionNodeList};
pub use partitioner::{
    BlockPartitioner, ManualPartitioner, MetisPartitioner, PartitionAssignment, PartitionOutcome,
    Partitioner,
};
pub use resolver::{Dependency, DependencyResolver, DependencyTable};

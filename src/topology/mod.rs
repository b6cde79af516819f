//! Top-level module for the mesh model.
//!
//! It includes:
//! - Global ids of the input deck ([`ids::GlobalId`])
//! - Node and element tables ([`mesh::MeshModel`])
//! - Kinematic constraint descriptors ([`constraint::Constraint`])
//! - The node → incident-element index ([`connectivity::ConnectivityIndex`])

pub mod connectivity;
pub mod constraint;
pub mod ids;
pub mod mesh;

pub use connectivity::ConnectivityIndex;
pub use constraint::{Constraint, ConstraintKind};
pub use ids::GlobalId;
pub use mesh::{Element, MeshModel, Node};

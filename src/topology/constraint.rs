//! Kinematic constraints attached to dof managers.
//!
//! A constrained node ("slave") expresses its degrees of freedom through one
//! or more master nodes. The descriptor stores *global* ids exactly as read
//! from the input; translation to mesh-local indices happens in
//! [`DependencyResolver`](crate::algs::resolver::DependencyResolver) so that
//! masters may be declared after their slaves.

use crate::topology::ids::GlobalId;
use serde::{Deserialize, Serialize};

/// Tag identifying how a node depends on its masters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Slave dofs list their master nodes directly.
    ExplicitMasters,
    /// Rigid-arm link to the master node(s).
    RigidArm,
    /// Dofs interpolated from the nodes of a master element.
    HangingOnElement,
}

/// Constraint descriptor of a single node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// Master node ids, in declaration order.
    ExplicitMasters(Vec<GlobalId>),
    /// Master node ids of a rigid arm. Resolves like
    /// [`Constraint::ExplicitMasters`]; kept distinct because the solver
    /// interprets the link differently.
    RigidArm(Vec<GlobalId>),
    /// Master element whose node list becomes the master set. `None` means
    /// the input asked for automatic element lookup, which is unsupported.
    HangingOnElement(Option<GlobalId>),
}

impl Constraint {
    /// The tag of this constraint.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::ExplicitMasters(_) => ConstraintKind::ExplicitMasters,
            Constraint::RigidArm(_) => ConstraintKind::RigidArm,
            Constraint::HangingOnElement(_) => ConstraintKind::HangingOnElement,
        }
    }
}

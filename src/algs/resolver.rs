//! Dependency resolution: master nodes of constrained nodes.
//!
//! For a node carrying a [`Constraint`], the resolver translates the
//! descriptor into mesh-local master node indices:
//!
//! 1. [`Constraint::ExplicitMasters`]: the listed master ids.
//! 2. [`Constraint::RigidArm`]: same mechanics, distinct tag.
//! 3. [`Constraint::HangingOnElement`]: every node of the master element.
//!    A hanging node without a master element is a fatal
//!    [`NodeCutError::UnsupportedConstraint`].
//!
//! Nodes without a constraint have no dependency. References to ids that do
//! not exist are reported as [`NodeCutError::UnknownNode`] /
//! [`NodeCutError::UnknownElement`].

use crate::mesh_error::NodeCutError;
use crate::topology::constraint::{Constraint, ConstraintKind};
use crate::topology::ids::GlobalId;
use crate::topology::mesh::MeshModel;
use itertools::Itertools;

/// Resolved dependency of one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub kind: ConstraintKind,
    /// Master node indices, in declaration order, without repeats.
    pub masters: Vec<usize>,
}

/// Resolves constraint descriptors against a mesh.
#[derive(Clone, Copy, Debug)]
pub struct DependencyResolver<'a> {
    mesh: &'a MeshModel,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(mesh: &'a MeshModel) -> Self {
        Self { mesh }
    }

    /// Dependency of `node`, or `None` if it is unconstrained.
    pub fn resolve(&self, node: usize) -> Result<Option<Dependency>, NodeCutError> {
        let entry = self.mesh.node(node);
        let Some(constraint) = &entry.constraint else {
            return Ok(None);
        };
        let masters = match constraint {
            Constraint::ExplicitMasters(ids) | Constraint::RigidArm(ids) => {
                self.master_nodes(entry.id, ids)?
            }
            Constraint::HangingOnElement(Some(elem_id)) => {
                let e = self.mesh.element_index(*elem_id).ok_or_else(|| {
                    NodeCutError::UnknownElement {
                        id: elem_id.get(),
                        referenced_by: format!("hanging node {}", entry.id),
                    }
                })?;
                self.mesh.element(e).nodes.clone()
            }
            Constraint::HangingOnElement(None) => {
                return Err(NodeCutError::UnsupportedConstraint {
                    node: entry.id.get(),
                });
            }
        };
        let masters = masters
            .into_iter()
            .filter(|&m| m != node)
            .unique()
            .collect();
        Ok(Some(Dependency {
            kind: constraint.kind(),
            masters,
        }))
    }

    /// Master node indices of `node`; empty if it is unconstrained.
    pub fn resolve_masters(&self, node: usize) -> Result<Vec<usize>, NodeCutError> {
        Ok(self.resolve(node)?.map(|d| d.masters).unwrap_or_default())
    }

    /// Resolve every node once. Fails on the first bad constraint, in node
    /// order.
    pub fn resolve_all(&self) -> Result<DependencyTable, NodeCutError> {
        let deps = (0..self.mesh.node_count())
            .map(|n| self.resolve(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DependencyTable { deps })
    }

    fn master_nodes(&self, slave: GlobalId, ids: &[GlobalId]) -> Result<Vec<usize>, NodeCutError> {
        ids.iter()
            .map(|&id| {
                self.mesh.node_index(id).ok_or_else(|| NodeCutError::UnknownNode {
                    id: id.get(),
                    referenced_by: format!("slave node {slave}"),
                })
            })
            .collect()
    }
}

/// Resolved dependencies of every node of a mesh, indexed by node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyTable {
    deps: Vec<Option<Dependency>>,
}

impl DependencyTable {
    /// Number of nodes covered, constrained or not.
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// Dependency of `node`, if any.
    pub fn get(&self, node: usize) -> Option<&Dependency> {
        self.deps.get(node).and_then(Option::as_ref)
    }

    /// Master indices of `node` (empty if unconstrained).
    pub fn masters(&self, node: usize) -> &[usize] {
        self.get(node)
            .map(|d| d.masters.as_slice())
            .unwrap_or_default()
    }

    /// `(slave, dependency)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Dependency)> + '_ {
        self.deps
            .iter()
            .enumerate()
            .filter_map(|(n, d)| d.as_ref().map(|d| (n, d)))
    }

    /// Number of constrained nodes.
    pub fn constrained_count(&self) -> usize {
        self.deps.iter().flatten().count()
    }
}

//! Owned mesh model: node and element tables with global-id lookup.
//!
//! A [`MeshModel`] is built once per run, either by the deck reader
//! ([`crate::io::deck`]) or programmatically, and then passed by reference
//! to every stage of the pipeline. Nodes and elements are addressed by their
//! position in the tables ("local index"); [`GlobalId`]s are only used at the
//! input boundary.

use crate::mesh_error::NodeCutError;
use crate::topology::constraint::Constraint;
use crate::topology::ids::GlobalId;
use hashbrown::HashMap;

/// A dof manager: a true node or a virtual entity under a constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: GlobalId,
    pub constraint: Option<Constraint>,
}

/// A mesh primitive referencing an ordered list of node indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub id: GlobalId,
    pub nodes: Vec<usize>,
}

/// Node and element tables of a single mesh.
#[derive(Clone, Debug, Default)]
pub struct MeshModel {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    node_index: HashMap<GlobalId, usize>,
    element_index: HashMap<GlobalId, usize>,
}

impl MeshModel {
    /// Empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from element node lists given as local indices.
    ///
    /// Nodes `0..node_count` get global ids `1..=node_count`, elements are
    /// numbered the same way in iteration order.
    pub fn from_element_nodes<I>(node_count: usize, elements: I) -> Result<Self, NodeCutError>
    where
        I: IntoIterator<Item = Vec<usize>>,
    {
        let mut mesh = Self::new();
        for i in 0..node_count {
            mesh.add_node(GlobalId::new(i as u64 + 1)?, None)?;
        }
        for (i, nodes) in elements.into_iter().enumerate() {
            mesh.add_element_by_index(GlobalId::new(i as u64 + 1)?, nodes)?;
        }
        Ok(mesh)
    }

    /// Append a node and return its local index.
    pub fn add_node(
        &mut self,
        id: GlobalId,
        constraint: Option<Constraint>,
    ) -> Result<usize, NodeCutError> {
        if self.node_index.contains_key(&id) {
            return Err(NodeCutError::DuplicateId {
                kind: "node",
                id: id.get(),
            });
        }
        let idx = self.nodes.len();
        self.nodes.push(Node { id, constraint });
        self.node_index.insert(id, idx);
        Ok(idx)
    }

    /// Append an element whose nodes are given by global id.
    pub fn add_element(&mut self, id: GlobalId, node_ids: &[GlobalId]) -> Result<usize, NodeCutError> {
        let nodes = node_ids
            .iter()
            .map(|&n| {
                self.node_index(n).ok_or_else(|| NodeCutError::UnknownNode {
                    id: n.get(),
                    referenced_by: format!("element {id}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.push_element(id, nodes)
    }

    /// Append an element whose nodes are given by local index.
    pub fn add_element_by_index(
        &mut self,
        id: GlobalId,
        nodes: Vec<usize>,
    ) -> Result<usize, NodeCutError> {
        if let Some(&bad) = nodes.iter().find(|&&n| n >= self.nodes.len()) {
            return Err(NodeCutError::InvalidNodeIndex {
                element: id.get(),
                index: bad,
                node_count: self.nodes.len(),
            });
        }
        self.push_element(id, nodes)
    }

    fn push_element(&mut self, id: GlobalId, nodes: Vec<usize>) -> Result<usize, NodeCutError> {
        if self.element_index.contains_key(&id) {
            return Err(NodeCutError::DuplicateId {
                kind: "element",
                id: id.get(),
            });
        }
        let idx = self.elements.len();
        self.elements.push(Element { id, nodes });
        self.element_index.insert(id, idx);
        Ok(idx)
    }

    /// Attach (or replace) the constraint of node `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of range.
    pub fn set_constraint(&mut self, node: usize, constraint: Constraint) {
        self.nodes[node].constraint = Some(constraint);
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn element(&self, idx: usize) -> &Element {
        &self.elements[idx]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Local index of the node with global id `id`.
    pub fn node_index(&self, id: GlobalId) -> Option<usize> {
        self.node_index.get(&id).copied()
    }

    /// Local index of the element with global id `id`.
    pub fn element_index(&self, id: GlobalId) -> Option<usize> {
        self.element_index.get(&id).copied()
    }
}

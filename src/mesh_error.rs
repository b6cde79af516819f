//! NodeCutError: Unified error type for nodecut public APIs
//!
//! Every failure in this crate is fatal to the partitioning run: components
//! return a `NodeCutError` and the caller aborts without emitting partial
//! output. Variants carry enough context (keyword, record text, global id)
//! to locate the offending input construct by hand.

use thiserror::Error;

/// Unified error type for nodecut operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeCutError {
    /// A required keyword is absent from a record, or its value does not
    /// have the expected shape. Malformed records are reported here too.
    #[error("Missing keyword \"{keyword}\" in\n{record}")]
    MissingKeyword { keyword: String, record: String },
    /// A hanging node does not reference a master element.
    #[error("Hanging node {node} has no master element; automatic master lookup is not supported")]
    UnsupportedConstraint { node: u64 },
    /// The external graph partitioner is missing or failed.
    #[error("External partitioner unavailable: {0}")]
    ExternalPartitionerUnavailable(String),
    /// The number of target partitions must be at least one.
    #[error("Invalid partition count {0}: at least one partition is required")]
    InvalidPartitionCount(usize),
    /// Global ids are 1-based; 0 is reserved.
    #[error("Global id must be non-zero")]
    InvalidGlobalId,
    /// A node id referenced by an element or a constraint does not exist.
    #[error("Unknown node {id} referenced by {referenced_by}")]
    UnknownNode { id: u64, referenced_by: String },
    /// An element given by local node indices references a node past the
    /// end of the node table.
    #[error("Element {element} references node index {index}, but the mesh has {node_count} nodes")]
    InvalidNodeIndex {
        element: u64,
        index: usize,
        node_count: usize,
    },
    /// An element id referenced by a constraint does not exist.
    #[error("Unknown element {id} referenced by {referenced_by}")]
    UnknownElement { id: u64, referenced_by: String },
    /// Two records of the same kind share a global id.
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },
    /// The element→partition vector does not match the mesh or the partition count.
    #[error("Invalid partition assignment: {0}")]
    InvalidAssignment(String),
    /// Per-node or per-element tables handed to one stage were built for
    /// meshes of different sizes.
    #[error("{table} has {found} entries, expected {expected}")]
    SizeMismatch {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    /// The input ended before all announced records were read.
    #[error("Truncated input: expected {expected} {section} records, found {found}")]
    TruncatedInput {
        section: &'static str,
        expected: usize,
        found: usize,
    },
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for NodeCutError {
    fn from(e: std::io::Error) -> Self {
        NodeCutError::Io(e.to_string())
    }
}

impl NodeCutError {
    /// Shorthand for [`NodeCutError::MissingKeyword`].
    pub fn missing_keyword(keyword: impl Into<String>, record: impl Into<String>) -> Self {
        NodeCutError::MissingKeyword {
            keyword: keyword.into(),
            record: record.into(),
        }
    }
}

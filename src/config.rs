//! Run configuration.

use crate::algs::closure::ClosureMode;
use crate::mesh_error::NodeCutError;
use serde::{Deserialize, Serialize};

/// Parameters of one partitioning run.
///
/// There is no `Default`: the partition count has no sensible fallback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCutConfig {
    /// Number of target partitions, at least 1.
    pub n_parts: usize,
    /// How far dependency closure is driven.
    #[serde(default)]
    pub closure: ClosureMode,
}

impl NodeCutConfig {
    /// Configuration for `n_parts` partitions with fixed-point closure.
    pub fn new(n_parts: usize) -> Result<Self, NodeCutError> {
        let cfg = Self {
            n_parts,
            closure: ClosureMode::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_closure(mut self, closure: ClosureMode) -> Self {
        self.closure = closure;
        self
    }

    /// Reject values no run can use. Call after deserializing.
    pub fn validate(&self) -> Result<(), NodeCutError> {
        if self.n_parts == 0 {
            return Err(NodeCutError::InvalidPartitionCount(self.n_parts));
        }
        Ok(())
    }
}

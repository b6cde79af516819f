//! Dependency closure: make masters reachable wherever their slaves are.
//!
//! One pass visits every constrained node `s` in node-index order and, for
//! each master `m`:
//! - leaves `m` untouched if `s` is local and its partition already
//!   accesses `m`;
//! - otherwise marks `m` shared and adds the partitions of `s` to those of `m`.
//!
//! After one pass every *direct* master is accessible from every partition
//! of its slave. Chains (a master that is itself a slave) are only closed if
//! the pass happens to visit them in dependency order; [`ClosureMode::FixedPoint`]
//! repeats the pass until nothing changes, which closes chains of any depth.

use crate::algs::classify::{NodeClassification, NodeStatus};
use crate::algs::resolver::DependencyTable;
use crate::mesh_error::NodeCutError;
use serde::{Deserialize, Serialize};

/// How far dependency closure is driven.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosureMode {
    /// A single pass in node-index order. Multi-level chains may stay open.
    SinglePass,
    /// Repeat passes until no status or partition set changes.
    #[default]
    FixedPoint,
}

/// What a closure run did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureReport {
    pub mode: ClosureMode,
    /// Passes executed, including the final pass that changed nothing.
    pub passes: usize,
    /// True if every master is accessible from every partition of its slaves.
    pub converged: bool,
}

fn check_tables(
    classification: &NodeClassification,
    deps: &DependencyTable,
) -> Result<(), NodeCutError> {
    if deps.len() != classification.len() {
        return Err(NodeCutError::SizeMismatch {
            table: "dependency table",
            expected: classification.len(),
            found: deps.len(),
        });
    }
    if classification.partitions.len() != classification.status.len() {
        return Err(NodeCutError::SizeMismatch {
            table: "node partition sets",
            expected: classification.status.len(),
            found: classification.partitions.len(),
        });
    }
    Ok(())
}

/// Run dependency closure on `classification` in place.
///
/// # Errors
/// [`NodeCutError::SizeMismatch`] if `deps` and `classification` were built
/// for meshes with different node counts.
pub fn propagate(
    classification: &mut NodeClassification,
    deps: &DependencyTable,
    mode: ClosureMode,
) -> Result<ClosureReport, NodeCutError> {
    check_tables(classification, deps)?;
    let report = match mode {
        ClosureMode::SinglePass => {
            propagate_once(classification, deps);
            ClosureReport {
                mode,
                passes: 1,
                converged: open_pairs(classification, deps).is_empty(),
            }
        }
        ClosureMode::FixedPoint => {
            // each changing pass moves partitions at least one link further
            // down some chain, and no chain is longer than the node count
            let max_passes = classification.len() + 1;
            let mut passes = 0;
            let mut converged = false;
            while passes < max_passes {
                passes += 1;
                if !propagate_once(classification, deps) {
                    converged = true;
                    break;
                }
            }
            if !converged {
                log::warn!("dependency closure did not settle after {passes} passes");
            }
            ClosureReport {
                mode,
                passes,
                converged,
            }
        }
    };
    Ok(report)
}

/// One pass over all constrained nodes. Returns whether anything changed.
fn propagate_once(classification: &mut NodeClassification, deps: &DependencyTable) -> bool {
    let mut changed = false;
    for (s, dep) in deps.iter() {
        for &m in &dep.masters {
            let slave_local = classification.status[s] == NodeStatus::Local;
            if slave_local
                && classification.partitions[s].is_subset(&classification.partitions[m])
            {
                continue;
            }
            let slave_parts = classification.partitions[s].clone();
            let master_parts = &mut classification.partitions[m];
            let before = master_parts.len();
            master_parts.extend(slave_parts);
            changed |= master_parts.len() != before;
            if classification.status[m] != NodeStatus::Shared {
                classification.status[m] = NodeStatus::Shared;
                changed = true;
            }
        }
    }
    changed
}

/// `(slave, master)` pairs where some partition of the slave cannot access
/// the master.
///
/// # Errors
/// [`NodeCutError::SizeMismatch`] under the same condition as [`propagate`].
pub fn unsatisfied(
    classification: &NodeClassification,
    deps: &DependencyTable,
) -> Result<Vec<(usize, usize)>, NodeCutError> {
    check_tables(classification, deps)?;
    Ok(open_pairs(classification, deps))
}

fn open_pairs(classification: &NodeClassification, deps: &DependencyTable) -> Vec<(usize, usize)> {
    let parts = &classification.partitions;
    deps.iter()
        .flat_map(|(s, dep)| dep.masters.iter().map(move |&m| (s, m)))
        .filter(|&(s, m)| !parts[s].is_subset(&parts[m]))
        .collect()
}

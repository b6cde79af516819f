//! Serial input-deck reader.
//!
//! # Supported layout
//! ```text
//! <free header lines: output file, description, analysis, domain, ...>
//! ndofman <n> nelem <m> ...           (domain component record)
//! <n dof-manager records>
//! <m element records>
//! <trailing records: cross sections, materials, boundary conditions, ...>
//! ```
//!
//! Dof-manager constraints are recognised in this order (first match wins):
//! 1. `mastermask <k> ids…` → explicit masters; zero entries (unslaved dofs)
//!    are dropped. Ignored on `rigidarmnode`, where the mask is a per-dof
//!    flag rather than a node list.
//! 2. `masterdofman <k> ids…` → explicit masters (required on `slavenode`).
//! 3. `rigidarmnode … master <id>` → rigid arm (`master` required).
//! 4. `hangingnode … masterelement <id>` → hanging node; absent or `<= 0`
//!    leaves the master element unset.
//!
//! # Limitations
//! - Records span exactly one line.
//! - Coordinates, boundary conditions and all trailing records are kept as
//!   raw text only.

use crate::io::record::{InputRecord, records};
use crate::mesh_error::NodeCutError;
use crate::topology::constraint::Constraint;
use crate::topology::ids::GlobalId;
use crate::topology::mesh::MeshModel;
use itertools::Itertools;
use std::io::Read;

/// A parsed deck: the typed mesh plus the raw records around it.
#[derive(Clone, Debug)]
pub struct MeshDeck {
    /// Lines before the component record.
    pub header: Vec<InputRecord>,
    /// The record carrying `ndofman` / `nelem`.
    pub components: InputRecord,
    pub dofmanagers: Vec<InputRecord>,
    pub elements: Vec<InputRecord>,
    pub trailer: Vec<InputRecord>,
    pub mesh: MeshModel,
}

/// Reader for serial decks.
#[derive(Debug, Default, Clone)]
pub struct DeckReader;

impl DeckReader {
    /// Read a deck from any byte source.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<MeshDeck, NodeCutError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        self.read_str(&contents)
    }

    /// Read a deck held in memory.
    pub fn read_str(&self, contents: &str) -> Result<MeshDeck, NodeCutError> {
        let mut recs = records(contents);

        let mut header = Vec::new();
        let components = loop {
            match recs.next() {
                Some(rec) if rec.has("ndofman") => break rec,
                Some(rec) => header.push(rec),
                None => {
                    return Err(NodeCutError::missing_keyword("ndofman", "<end of input>"));
                }
            }
        };
        let ndofman: usize = components.value("ndofman")?;
        let nelem: usize = components.value("nelem")?;

        let dofmanagers: Vec<InputRecord> = recs.by_ref().take(ndofman).collect();
        if dofmanagers.len() < ndofman {
            return Err(NodeCutError::TruncatedInput {
                section: "dof manager",
                expected: ndofman,
                found: dofmanagers.len(),
            });
        }
        let elements: Vec<InputRecord> = recs.by_ref().take(nelem).collect();
        if elements.len() < nelem {
            return Err(NodeCutError::TruncatedInput {
                section: "element",
                expected: nelem,
                found: elements.len(),
            });
        }
        let trailer: Vec<InputRecord> = recs.collect();

        let mut mesh = MeshModel::new();
        for rec in &dofmanagers {
            let id = record_id(rec)?;
            mesh.add_node(id, parse_constraint(rec)?)?;
        }
        for rec in &elements {
            let id = record_id(rec)?;
            let nodes = global_ids(rec, "nodes", rec.list("nodes")?)?;
            mesh.add_element(id, &nodes)?;
        }
        log::debug!(
            "read deck: {} dof managers, {} elements, {} trailing records",
            mesh.node_count(),
            mesh.element_count(),
            trailer.len()
        );

        Ok(MeshDeck {
            header,
            components,
            dofmanagers,
            elements,
            trailer,
            mesh,
        })
    }
}

fn record_id(rec: &InputRecord) -> Result<GlobalId, NodeCutError> {
    let raw = rec.number()?;
    GlobalId::new(raw).map_err(|_| rec_error(rec, "record number"))
}

fn rec_error(rec: &InputRecord, keyword: &str) -> NodeCutError {
    NodeCutError::missing_keyword(keyword, format!("line {}: {}", rec.line(), rec.text()))
}

/// Wrap raw ids; a zero id is a malformed `keyword` value.
fn global_ids(
    rec: &InputRecord,
    keyword: &str,
    raw: Vec<u64>,
) -> Result<Vec<GlobalId>, NodeCutError> {
    raw.into_iter()
        .map(|r| GlobalId::new(r).map_err(|_| rec_error(rec, keyword)))
        .collect()
}

/// Constraint carried by a dof-manager record, if any.
fn parse_constraint(rec: &InputRecord) -> Result<Option<Constraint>, NodeCutError> {
    let kind = rec.kind();

    if kind != "rigidarmnode" {
        if let Some(mask) = rec.optional_list::<u64>("mastermask")? {
            let masters: Vec<u64> = mask.into_iter().filter(|&m| m != 0).unique().collect();
            if !masters.is_empty() {
                let masters = global_ids(rec, "mastermask", masters)?;
                return Ok(Some(Constraint::ExplicitMasters(masters)));
            }
        }
    }

    if let Some(list) = rec.optional_list::<u64>("masterdofman")? {
        let list = list.into_iter().unique().collect();
        let masters = global_ids(rec, "masterdofman", list)?;
        return Ok(Some(Constraint::ExplicitMasters(masters)));
    } else if kind == "slavenode" {
        return Err(rec_error(rec, "masterdofman"));
    }

    match kind {
        "rigidarmnode" => {
            let master = global_ids(rec, "master", vec![rec.value("master")?])?;
            Ok(Some(Constraint::RigidArm(master)))
        }
        "hangingnode" => {
            let element = match rec.optional_value::<i64>("masterelement")? {
                Some(e) if e > 0 => Some(GlobalId::new(e as u64)?),
                _ => None,
            };
            Ok(Some(Constraint::HangingOnElement(element)))
        }
        _ => Ok(None),
    }
}

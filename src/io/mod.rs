//! Input-deck readers.
//!
//! [`record`] splits a deck into tokenized records; [`deck`] interprets the
//! domain component record, the dof-manager and element sections, and builds
//! a [`MeshModel`](crate::topology::MeshModel). Everything else in the deck
//! is kept verbatim so an external writer can reproduce it per partition.

pub mod deck;
pub mod record;

pub use deck::{DeckReader, MeshDeck};
pub use record::{InputRecord, Token, records};

//! `GlobalId`: the 1-based number a record carries in the input deck.
//!
//! Dof managers and elements are numbered from 1 in the input; 0 never names
//! an entity. `GlobalId` wraps a `NonZeroU64` so that an unset or zero id
//! cannot leak into the mesh tables. Mesh-wide *local* indices are plain
//! `usize` positions into [`MeshModel`](crate::topology::mesh::MeshModel)
//! tables and never wrapped.

use crate::mesh_error::NodeCutError;
use std::{fmt, num::NonZeroU64};

/// Global (input-file) number of a node or element.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct GlobalId(NonZeroU64);

impl GlobalId {
    /// Creates a new `GlobalId` from a raw `u64` value.
    ///
    /// # Errors
    /// Returns [`NodeCutError::InvalidGlobalId`] if `raw == 0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nodecut::topology::ids::GlobalId;
    /// let id = GlobalId::new(1).unwrap();
    /// assert_eq!(id.get(), 1);
    /// assert!(GlobalId::new(0).is_err());
    /// ```
    #[inline]
    pub fn new(raw: u64) -> Result<Self, NodeCutError> {
        NonZeroU64::new(raw)
            .map(GlobalId)
            .ok_or(NodeCutError::InvalidGlobalId)
    }

    /// Returns the raw number.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobalId").field(&self.get()).finish()
    }
}

/// Prints only the raw integer, as it appears in the input deck.
impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(GlobalId, u64);
    assert_eq_size!(Option<GlobalId>, u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(GlobalId::new(0), Err(NodeCutError::InvalidGlobalId));
    }

    #[test]
    fn debug_and_display() {
        let id = GlobalId::new(7).unwrap();
        assert_eq!(format!("{:?}", id), "GlobalId(7)");
        assert_eq!(format!("{}", id), "7");
    }

    #[test]
    fn ordering_follows_raw_value() {
        let a = GlobalId::new(3).unwrap();
        let b = GlobalId::new(12).unwrap();
        assert!(a < b);
    }

    #[test]
    fn json_roundtrip() {
        let id = GlobalId::new(123).unwrap();
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "123");
        let back: GlobalId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, id);
    }
}

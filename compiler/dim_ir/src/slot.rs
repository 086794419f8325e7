//! Typed node slots.

use crate::{Name, NodeId};

/// One operand of a [`GraphNode`](crate::GraphNode).
///
/// Slots are plain values: integers, interned strings, or references to other
/// nodes. `Null` is an absent operand (a missing optional field, a `void`
/// return type in a signature array, an unset reference).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Slot {
    /// Absent operand.
    #[default]
    Null,
    /// Unsigned integer (tags, line numbers, sizes, flag words).
    UInt(u64),
    /// Signed integer (subrange bounds, enumerator values).
    Int(i64),
    /// Interned string (names, identifiers, file paths).
    Str(Name),
    /// Reference to another node.
    Node(NodeId),
}

impl Slot {
    /// Returns `true` if this is `Slot::Null`.
    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self, Slot::Null)
    }

    /// The referenced node, if this slot is a node reference.
    #[inline]
    pub const fn as_node(self) -> Option<NodeId> {
        match self {
            Slot::Node(id) => Some(id),
            _ => None,
        }
    }

    /// The interned string, if this slot is a string.
    #[inline]
    pub const fn as_str(self) -> Option<Name> {
        match self {
            Slot::Str(name) => Some(name),
            _ => None,
        }
    }

    /// Unsigned view of an integer slot, if this slot is an integer.
    ///
    /// Signed values are reinterpreted bit-for-bit.
    #[inline]
    #[expect(
        clippy::cast_sign_loss,
        reason = "integer slots are reinterpreted, not converted"
    )]
    pub const fn as_u64(self) -> Option<u64> {
        match self {
            Slot::UInt(v) => Some(v),
            Slot::Int(v) => Some(v as u64),
            _ => None,
        }
    }

    /// Signed view of an integer slot, if this slot is an integer.
    #[inline]
    #[expect(
        clippy::cast_possible_wrap,
        reason = "integer slots are reinterpreted, not converted"
    )]
    pub const fn as_i64(self) -> Option<i64> {
        match self {
            Slot::Int(v) => Some(v),
            Slot::UInt(v) => Some(v as i64),
            _ => None,
        }
    }
}

impl From<NodeId> for Slot {
    fn from(id: NodeId) -> Self {
        Slot::Node(id)
    }
}

impl From<Option<NodeId>> for Slot {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(Slot::Null, Slot::Node)
    }
}

impl From<Name> for Slot {
    fn from(name: Name) -> Self {
        Slot::Str(name)
    }
}

impl From<u64> for Slot {
    fn from(v: u64) -> Self {
        Slot::UInt(v)
    }
}

impl From<u32> for Slot {
    fn from(v: u32) -> Self {
        Slot::UInt(u64::from(v))
    }
}

impl From<bool> for Slot {
    fn from(v: bool) -> Self {
        Slot::UInt(u64::from(v))
    }
}

impl From<i64> for Slot {
    fn from(v: i64) -> Self {
        Slot::Int(v)
    }
}

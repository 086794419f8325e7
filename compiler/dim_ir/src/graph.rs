//! Immutable metadata graph.

use smallvec::SmallVec;

use crate::{Name, NodeId, Slot, StringInterner, Tag};

/// Inline slot capacity; covers tags, pairs, locations and small arrays.
const INLINE_SLOTS: usize = 4;

/// One node of the metadata graph: an ordered list of typed slots.
///
/// Nodes never change once the graph is finished. Equality and hashing are
/// structural, which is what the builder uses to unique nodes.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GraphNode {
    slots: SmallVec<[Slot; INLINE_SLOTS]>,
}

impl GraphNode {
    /// Create a node from its slots.
    pub fn new(slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    /// All slots in order.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at `index`, or `Slot::Null` past the end.
    #[inline]
    pub fn slot(&self, index: usize) -> Slot {
        self.slots.get(index).copied().unwrap_or(Slot::Null)
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` for a node with no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Decode the tag word in slot 0.
    ///
    /// Untagged nodes (locations, arrays, file pairs) return `None`.
    pub fn tag(&self) -> Option<Tag> {
        match self.slot(0) {
            Slot::UInt(word) => Tag::from_word(word),
            _ => None,
        }
    }
}

/// A finished, read-only metadata graph.
///
/// Produced by [`GraphBuilder::finish`](crate::GraphBuilder::finish). All
/// accessors are total: unknown ids and missing slots read as empty.
#[derive(Clone, Debug)]
pub struct MetadataGraph {
    nodes: Vec<GraphNode>,
    strings: StringInterner,
}

impl MetadataGraph {
    pub(crate) fn from_parts(nodes: Vec<GraphNode>, strings: StringInterner) -> Self {
        Self { nodes, strings }
    }

    /// Get a node by id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// Slot `index` of node `id`, or `Slot::Null` if either is missing.
    #[inline]
    pub fn slot(&self, id: NodeId, index: usize) -> Slot {
        self.get(id).map_or(Slot::Null, |node| node.slot(index))
    }

    /// Number of slots of node `id` (0 for unknown ids).
    #[inline]
    pub fn num_slots(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, GraphNode::len)
    }

    /// Look up an interned string.
    #[inline]
    pub fn str(&self, name: Name) -> &str {
        self.strings.lookup(name)
    }

    /// Find the `Name` of a string already present in the graph.
    pub fn find_str(&self, s: &str) -> Option<Name> {
        self.strings.get(s)
    }

    /// The string table.
    pub fn strings(&self) -> &StringInterner {
        &self.strings
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(id, node)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "builder caps node count at u32::MAX"
            )]
            let raw = i as u32;
            (NodeId::new(raw), node)
        })
    }
}

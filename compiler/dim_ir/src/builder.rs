//! Metadata graph construction.
//!
//! Three ways to allocate a node:
//!
//! - [`GraphBuilder::node`]: uniqued. Structurally equal slot lists return the
//!   same `NodeId` (content addressing).
//! - [`GraphBuilder::distinct`]: always a fresh node, even if an equal one
//!   exists.
//! - [`GraphBuilder::forward`] + [`GraphBuilder::define`]: reserve an id now,
//!   fill it later. This is the only way to build a cycle (a struct whose
//!   member points back at the struct).
//!
//! [`GraphBuilder::finish`] freezes the graph; every forward node must have
//! been defined by then.

use rustc_hash::FxHashMap;

use crate::{GraphError, GraphNode, MetadataGraph, Name, NodeId, Slot, StringInterner};

/// Mutable builder for a [`MetadataGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Node storage; `None` marks a forward node not yet defined.
    nodes: Vec<Option<GraphNode>>,
    /// Uniquing table for nodes created through [`GraphBuilder::node`].
    uniqued: FxHashMap<GraphNode, NodeId>,
    strings: StringInterner,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string for use in a `Slot::Str`.
    pub fn intern(&mut self, s: &str) -> Name {
        self.strings.intern(s)
    }

    /// String slot for `s`.
    pub fn str_slot(&mut self, s: &str) -> Slot {
        Slot::Str(self.intern(s))
    }

    /// Allocate a uniqued node.
    ///
    /// # Panics
    /// Panics if the graph exceeds `u32::MAX` nodes.
    pub fn node(&mut self, slots: impl IntoIterator<Item = Slot>) -> NodeId {
        let node = GraphNode::new(slots);
        if let Some(&id) = self.uniqued.get(&node) {
            return id;
        }
        let id = self.alloc(Some(node.clone()));
        self.uniqued.insert(node, id);
        id
    }

    /// Allocate a node that is never merged with an equal one.
    pub fn distinct(&mut self, slots: impl IntoIterator<Item = Slot>) -> NodeId {
        self.alloc(Some(GraphNode::new(slots)))
    }

    /// Reserve a node id whose contents are supplied later by [`define`].
    ///
    /// [`define`]: GraphBuilder::define
    pub fn forward(&mut self) -> NodeId {
        self.alloc(None)
    }

    /// Give a forward node its contents.
    pub fn define(
        &mut self,
        id: NodeId,
        slots: impl IntoIterator<Item = Slot>,
    ) -> Result<(), GraphError> {
        let len = self.nodes.len();
        let entry = self
            .nodes
            .get_mut(id.index())
            .ok_or(GraphError::OutOfRange { id, len })?;
        if entry.is_some() {
            return Err(GraphError::AlreadyDefined(id));
        }
        *entry = Some(GraphNode::new(slots));
        Ok(())
    }

    /// Contents of a node, if it exists and is defined.
    pub fn get(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of allocated nodes, including undefined forward nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Freeze the graph.
    pub fn finish(self) -> Result<MetadataGraph, GraphError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.into_iter().enumerate() {
            match node {
                Some(node) => nodes.push(node),
                None => {
                    let raw = u32::try_from(index)
                        .map_err(|_| GraphError::TooManyNodes { max: u32::MAX })?;
                    return Err(GraphError::UndefinedForwardNode(NodeId::new(raw)));
                }
            }
        }
        tracing::debug!(
            nodes = nodes.len(),
            strings = self.strings.len(),
            "metadata graph finished"
        );
        Ok(MetadataGraph::from_parts(nodes, self.strings))
    }

    fn alloc(&mut self, node: Option<GraphNode>) -> NodeId {
        let raw = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("{}", GraphError::TooManyNodes { max: u32::MAX }));
        self.nodes.push(node);
        NodeId::new(raw)
    }
}

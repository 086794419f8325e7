//! Errors raised while constructing a metadata graph.
//!
//! A finished [`MetadataGraph`](crate::MetadataGraph) never produces errors:
//! reads of missing slots degrade to `Slot::Null`. Only the builder can fail.

use thiserror::Error;

use crate::NodeId;

/// Graph construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A forward-declared node was never given contents.
    #[error("forward-declared node {0} was never defined")]
    UndefinedForwardNode(NodeId),

    /// `define` was called on a node that already has contents.
    #[error("node {0} is already defined")]
    AlreadyDefined(NodeId),

    /// A node id does not belong to this builder.
    #[error("node {id} is out of range (graph has {len} nodes)")]
    OutOfRange { id: NodeId, len: usize },

    /// More nodes than a `NodeId` can address.
    #[error("metadata graph exceeded {max} nodes")]
    TooManyNodes { max: u32 },
}

//! Dual-mode references between descriptors.
//!
//! A reference slot holds either a direct node reference or an interned
//! identifier string naming a composite type registered in an
//! [`IdentifierMap`]. Identifiers let one translation unit refer to a type
//! defined in another without sharing node ids.
//!
//! A null slot, or an empty identifier, is "no reference". Any other slot
//! shape is treated as no reference too; [`verify`](crate::verify) reports it.

use std::fmt;
use std::marker::PhantomData;

use dim_ir::{MetadataGraph, Name, NodeId, Slot};

use crate::identifier_map::IdentifierMap;
use crate::node::{AnnotatedNode, DescriptorView};
use crate::scope::DiScope;
use crate::types::DiType;

/// Target of a non-empty reference.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RefTarget {
    /// A node in the same graph.
    Direct(NodeId),
    /// An identifier to look up in an [`IdentifierMap`].
    ByIdentifier(Name),
}

/// A possibly-absent reference to a `T` descriptor.
pub struct CrossRef<'g, T> {
    graph: &'g MetadataGraph,
    target: Option<RefTarget>,
    _marker: PhantomData<T>,
}

/// Reference to an enclosing scope.
pub type ScopeRef<'g> = CrossRef<'g, DiScope<'g>>;

/// Reference to a type.
pub type TypeRef<'g> = CrossRef<'g, DiType<'g>>;

impl<'g, T: DescriptorView<'g>> CrossRef<'g, T> {
    /// Decode a reference slot.
    pub fn from_slot(graph: &'g MetadataGraph, slot: Slot) -> Self {
        let target = match slot {
            Slot::Node(id) => Some(RefTarget::Direct(id)),
            Slot::Str(name) if !name.is_empty() => Some(RefTarget::ByIdentifier(name)),
            _ => None,
        };
        Self::with_target(graph, target)
    }

    /// Direct reference to `id`.
    pub fn direct(graph: &'g MetadataGraph, id: NodeId) -> Self {
        Self::with_target(graph, Some(RefTarget::Direct(id)))
    }

    /// Reference by identifier.
    ///
    /// An empty identifier produces the empty reference.
    pub fn by_identifier(graph: &'g MetadataGraph, identifier: Name) -> Self {
        Self::from_slot(graph, Slot::Str(identifier))
    }

    /// No reference.
    pub fn empty(graph: &'g MetadataGraph) -> Self {
        Self::with_target(graph, None)
    }

    fn with_target(graph: &'g MetadataGraph, target: Option<RefTarget>) -> Self {
        Self {
            graph,
            target,
            _marker: PhantomData,
        }
    }

    /// The decoded target.
    #[inline]
    pub fn target(&self) -> Option<RefTarget> {
        self.target
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }

    /// The identifier, for an identifier-mode reference.
    pub fn identifier(&self) -> Option<&'g str> {
        match self.target {
            Some(RefTarget::ByIdentifier(name)) => Some(self.graph.str(name)),
            _ => None,
        }
    }

    /// Resolve to a view.
    ///
    /// # Panics
    ///
    /// Panics if an identifier-mode reference names an identifier missing
    /// from `map`. Every identifier used as a reference must belong to a
    /// retained composite type of some compile unit.
    pub fn resolve(&self, map: &IdentifierMap) -> T {
        let node = match self.target {
            None => AnnotatedNode::null(self.graph),
            Some(RefTarget::Direct(id)) => AnnotatedNode::new(self.graph, id),
            Some(RefTarget::ByIdentifier(name)) => match map.get(name) {
                Some(id) => AnnotatedNode::new(self.graph, id),
                None => {
                    let identifier = self.graph.str(name);
                    tracing::error!(identifier, "unresolved type identifier");
                    panic!("type identifier `{identifier}` is not in the identifier map");
                }
            },
        };
        T::wrap(node)
    }

    /// The identifier text, or the directly referenced node's name.
    ///
    /// Scopes and types carry their name in slot 3; anything else names
    /// itself with `""`.
    pub fn name(&self) -> &'g str {
        match self.target {
            None => "",
            Some(RefTarget::ByIdentifier(name)) => self.graph.str(name),
            Some(RefTarget::Direct(id)) => DiScope::from(AnnotatedNode::new(self.graph, id)).name(),
        }
    }
}

impl<T> Clone for CrossRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CrossRef<'_, T> {}

impl<T> PartialEq for CrossRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.target == other.target
    }
}

impl<T> Eq for CrossRef<'_, T> {}

impl<T> fmt::Debug for CrossRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            None => write!(f, "CrossRef(empty)"),
            Some(RefTarget::Direct(id)) => write!(f, "CrossRef({id})"),
            Some(RefTarget::ByIdentifier(name)) => {
                write!(f, "CrossRef({:?})", self.graph.str(name))
            }
        }
    }
}

#[cfg(test)]
mod tests;

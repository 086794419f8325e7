//! Identifier-to-type lookup table.
//!
//! Built from the retained-type lists of a program's compile units: every
//! composite type there with a non-empty identifier is registered. Member
//! lists are not searched.

use dim_ir::{MetadataGraph, Name, NodeId, Program};
use rustc_hash::FxHashMap;

use crate::config::IdentifierPolicy;
use crate::node::{AnnotatedNode, DescriptorView};
use crate::scope::DiCompileUnit;
use crate::types::DiCompositeType;

/// Maps type identifiers to the composite type node that defines them.
#[derive(Clone, Debug, Default)]
pub struct IdentifierMap {
    entries: FxHashMap<Name, NodeId>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with the default first-wins policy.
    pub fn build(graph: &MetadataGraph, compile_units: &[NodeId]) -> Self {
        Self::build_with(graph, compile_units, IdentifierPolicy::default())
    }

    /// Build from the retained types of `compile_units`.
    pub fn build_with(
        graph: &MetadataGraph,
        compile_units: &[NodeId],
        policy: IdentifierPolicy,
    ) -> Self {
        let mut map = Self::new();
        for &cu in compile_units {
            let cu = DiCompileUnit::wrap(AnnotatedNode::new(graph, cu));
            for element in cu.retained_types().iter() {
                let ty = DiCompositeType::wrap(element);
                let (Some(identifier), Some(id)) = (ty.identifier_name(), ty.id()) else {
                    continue;
                };
                map.insert(identifier, id, policy);
            }
        }
        tracing::debug!(entries = map.len(), "built type identifier map");
        map
    }

    /// Build from a program's compile-unit list.
    pub fn from_program(program: &Program, policy: IdentifierPolicy) -> Self {
        Self::build_with(program.graph(), program.compile_units(), policy)
    }

    /// Register `identifier`. Returns `true` if the map changed.
    pub fn insert(&mut self, identifier: Name, id: NodeId, policy: IdentifierPolicy) -> bool {
        match policy {
            IdentifierPolicy::FirstWins => {
                if self.entries.contains_key(&identifier) {
                    tracing::trace!(?identifier, ?id, "duplicate type identifier ignored");
                    return false;
                }
                self.entries.insert(identifier, id);
                true
            }
            IdentifierPolicy::Overwrite => self.entries.insert(identifier, id) != Some(id),
        }
    }

    #[inline]
    pub fn get(&self, identifier: Name) -> Option<NodeId> {
        self.entries.get(&identifier).copied()
    }

    #[inline]
    pub fn contains(&self, identifier: Name) -> bool {
        self.entries.contains_key(&identifier)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, NodeId)> + '_ {
        self.entries.iter().map(|(&name, &id)| (name, id))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests;

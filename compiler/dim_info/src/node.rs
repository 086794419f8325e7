//! The untyped descriptor view.
//!
//! [`AnnotatedNode`] pairs a graph borrow with an optional node id and reads
//! slots by position. Every typed view in this crate wraps one. Reads never
//! fail: a null node, a missing slot or a slot of the wrong shape yields the
//! empty value for the requested type (`""`, `0`, a null node).

use std::fmt;

use dim_ir::{MetadataGraph, Name, NodeId, Slot, Tag};

use crate::cross_ref::CrossRef;
use crate::kind::NodeKind;

/// A typed view over one metadata node.
///
/// Implemented by [`AnnotatedNode`] and every `Di*` view. Conversions between
/// views never check kinds; accessors do.
pub trait DescriptorView<'g>: Copy {
    /// Wrap an untyped node.
    fn wrap(node: AnnotatedNode<'g>) -> Self;

    /// The wrapped untyped node.
    fn node(self) -> AnnotatedNode<'g>;

    /// The wrapped node id.
    #[inline]
    fn id(self) -> Option<NodeId> {
        self.node().id()
    }

    /// Returns `true` if no node is wrapped.
    #[inline]
    fn is_null(self) -> bool {
        self.node().is_null()
    }

    /// Reinterpret as another view of the same node.
    #[inline]
    fn cast<T: DescriptorView<'g>>(self) -> T {
        T::wrap(self.node())
    }
}

/// Read-only view of a node in a [`MetadataGraph`].
#[derive(Copy, Clone)]
pub struct AnnotatedNode<'g> {
    graph: &'g MetadataGraph,
    id: Option<NodeId>,
}

impl<'g> AnnotatedNode<'g> {
    /// View of `id`.
    #[inline]
    pub fn new(graph: &'g MetadataGraph, id: NodeId) -> Self {
        Self {
            graph,
            id: Some(id),
        }
    }

    /// View of an optional node.
    #[inline]
    pub fn from_option(graph: &'g MetadataGraph, id: Option<NodeId>) -> Self {
        Self { graph, id }
    }

    /// The null view.
    #[inline]
    pub fn null(graph: &'g MetadataGraph) -> Self {
        Self { graph, id: None }
    }

    /// The null view over the same graph.
    #[inline]
    pub(crate) fn nulled(self) -> Self {
        Self::null(self.graph)
    }

    /// The graph this view reads from.
    #[inline]
    pub fn graph(self) -> &'g MetadataGraph {
        self.graph
    }

    /// The viewed node id.
    #[inline]
    pub fn id(self) -> Option<NodeId> {
        self.id
    }

    /// Returns `true` if no node is viewed.
    #[inline]
    pub fn is_null(self) -> bool {
        self.id.is_none()
    }

    /// Number of slots (0 for the null view).
    pub fn num_slots(self) -> usize {
        self.id.map_or(0, |id| self.graph.num_slots(id))
    }

    /// Raw slot `index`.
    pub fn slot(self, index: usize) -> Slot {
        self.id.map_or(Slot::Null, |id| self.graph.slot(id, index))
    }

    /// Decoded tag, if the node carries a valid tag word.
    pub fn tag(self) -> Option<Tag> {
        match self.slot(0) {
            Slot::UInt(word) => Tag::from_word(word),
            _ => None,
        }
    }

    /// Kind classification from the tag.
    pub fn kind(self) -> Option<NodeKind> {
        self.tag()
            .and_then(|tag| NodeKind::classify(tag, self.num_slots()))
    }

    // -- Slot readers --

    /// String slot, or `""`.
    pub fn string_field(self, index: usize) -> &'g str {
        self.slot(index)
            .as_str()
            .map_or("", |name| self.graph.str(name))
    }

    /// Interned string slot.
    pub fn name_field(self, index: usize) -> Option<Name> {
        self.slot(index).as_str()
    }

    /// Unsigned integer slot, or 0.
    pub fn u64_field(self, index: usize) -> u64 {
        self.slot(index).as_u64().unwrap_or(0)
    }

    /// Unsigned integer slot truncated to 32 bits, or 0.
    pub fn u32_field(self, index: usize) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "32-bit fields are stored widened"
        )]
        let value = self.u64_field(index) as u32;
        value
    }

    /// Signed integer slot, or 0.
    pub fn i64_field(self, index: usize) -> i64 {
        self.slot(index).as_i64().unwrap_or(0)
    }

    /// Node-reference slot as an untyped view (null if not a node).
    pub fn node_field(self, index: usize) -> AnnotatedNode<'g> {
        Self::from_option(self.graph, self.slot(index).as_node())
    }

    /// Node-reference slot as a typed view.
    pub fn field_as<T: DescriptorView<'g>>(self, index: usize) -> T {
        T::wrap(self.node_field(index))
    }

    /// Direct-or-identifier reference slot.
    pub fn ref_field<T: DescriptorView<'g>>(self, index: usize) -> CrossRef<'g, T> {
        CrossRef::from_slot(self.graph, self.slot(index))
    }

    // -- Kind predicates --

    #[inline]
    fn kind_is(self, f: impl FnOnce(NodeKind) -> bool) -> bool {
        self.kind().is_some_and(f)
    }

    pub fn is_derived_type(self) -> bool {
        self.kind_is(|k| matches!(k, NodeKind::DerivedType | NodeKind::CompositeType))
    }

    pub fn is_composite_type(self) -> bool {
        self.kind_is(|k| k == NodeKind::CompositeType)
    }

    pub fn is_basic_type(self) -> bool {
        self.kind_is(|k| k == NodeKind::BasicType)
    }

    pub fn is_type(self) -> bool {
        self.kind_is(NodeKind::is_type)
    }

    pub fn is_variable(self) -> bool {
        self.kind_is(|k| k == NodeKind::Variable)
    }

    pub fn is_global_variable(self) -> bool {
        self.kind_is(|k| k == NodeKind::GlobalVariable)
    }

    pub fn is_subprogram(self) -> bool {
        self.kind_is(|k| k == NodeKind::Subprogram)
    }

    pub fn is_scope(self) -> bool {
        self.kind_is(NodeKind::is_scope)
    }

    pub fn is_file(self) -> bool {
        self.kind_is(|k| k == NodeKind::File)
    }

    pub fn is_compile_unit(self) -> bool {
        self.kind_is(|k| k == NodeKind::CompileUnit)
    }

    pub fn is_name_space(self) -> bool {
        self.kind_is(|k| k == NodeKind::NameSpace)
    }

    pub fn is_lexical_block(self) -> bool {
        self.kind_is(|k| k == NodeKind::LexicalBlock)
    }

    pub fn is_lexical_block_file(self) -> bool {
        self.kind_is(|k| k == NodeKind::LexicalBlockFile)
    }

    pub fn is_subrange(self) -> bool {
        self.kind_is(|k| k == NodeKind::Subrange)
    }

    pub fn is_enumerator(self) -> bool {
        self.kind_is(|k| k == NodeKind::Enumerator)
    }

    pub fn is_unspecified_parameter(self) -> bool {
        self.kind_is(|k| k == NodeKind::UnspecifiedParameters)
    }

    pub fn is_template_type_parameter(self) -> bool {
        self.kind_is(|k| k == NodeKind::TemplateTypeParameter)
    }

    pub fn is_template_value_parameter(self) -> bool {
        self.kind_is(|k| k == NodeKind::TemplateValueParameter)
    }

    pub fn is_objc_property(self) -> bool {
        self.kind_is(|k| k == NodeKind::ObjCProperty)
    }

    pub fn is_imported_entity(self) -> bool {
        self.kind_is(|k| k == NodeKind::ImportedEntity)
    }

    /// Four-slot node whose first two slots are integers.
    ///
    /// Locations carry no tag, so a line number may read as a tag word.
    /// Only callers that already know they hold a location (an instruction
    /// attachment or an inlined-at slot) should rely on this alone.
    pub fn is_location(self) -> bool {
        self.num_slots() == 4
            && self.slot(0).as_u64().is_some()
            && self.slot(1).as_u64().is_some()
    }

    /// Any node can be read as an array of its slots.
    pub fn is_array(self) -> bool {
        !self.is_null()
    }
}

impl<'g> DescriptorView<'g> for AnnotatedNode<'g> {
    #[inline]
    fn wrap(node: AnnotatedNode<'g>) -> Self {
        node
    }

    #[inline]
    fn node(self) -> AnnotatedNode<'g> {
        self
    }
}

impl PartialEq for AnnotatedNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl Eq for AnnotatedNode<'_> {}

impl fmt::Debug for AnnotatedNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.id, self.tag()) {
            (None, _) => write!(f, "AnnotatedNode(null)"),
            (Some(id), Some(tag)) => write!(f, "AnnotatedNode({id}, {tag})"),
            (Some(id), None) => write!(f, "AnnotatedNode({id})"),
        }
    }
}

/// Declare a typed view over [`AnnotatedNode`].
///
/// `$valid` decides whether the wrapped node has the expected kind; accessors
/// read through `fields()`, which substitutes the null node on a mismatch so
/// every accessor degrades to its empty value.
macro_rules! descriptor_view {
    ($(#[$meta:meta])* $name:ident, $valid:path) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub struct $name<'g>($crate::node::AnnotatedNode<'g>);

        impl<'g> $crate::node::DescriptorView<'g> for $name<'g> {
            #[inline]
            fn wrap(node: $crate::node::AnnotatedNode<'g>) -> Self {
                Self(node)
            }

            #[inline]
            fn node(self) -> $crate::node::AnnotatedNode<'g> {
                self.0
            }
        }

        impl<'g> From<$crate::node::AnnotatedNode<'g>> for $name<'g> {
            #[inline]
            fn from(node: $crate::node::AnnotatedNode<'g>) -> Self {
                Self(node)
            }
        }

        impl<'g> $name<'g> {
            /// Returns `true` if the wrapped node has this view's kind.
            #[inline]
            pub fn is_valid(self) -> bool {
                $valid(self.0)
            }

            #[inline]
            #[allow(dead_code, reason = "not every view reads raw slots")]
            fn fields(self) -> $crate::node::AnnotatedNode<'g> {
                if $valid(self.0) {
                    self.0
                } else {
                    self.0.nulled()
                }
            }
        }
    };
}

pub(crate) use descriptor_view;

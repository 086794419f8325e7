//! Type descriptors.
//!
//! All types share slots 1 to 8 (file pair, context, name, line, size,
//! alignment, offset, flags). Basic types add an encoding; derived types add
//! the type they derive from; composite types extend derived types with a
//! member array, containing type, template parameters and an identifier.
//!
//! The shared accessors come from [`TypeLike`], implemented by every type
//! view.

use dim_ir::{Name, NodeId, Slot, Tag};
use rustc_hash::FxHashSet;

use crate::cross_ref::{CrossRef, ScopeRef, TypeRef};
use crate::elements::{DiArray, DiObjCProperty};
use crate::flags::DebugFlags;
use crate::identifier_map::IdentifierMap;
use crate::node::{descriptor_view, AnnotatedNode, DescriptorView};
use crate::scope::ScopeLike;

/// Accessors shared by every type view.
pub trait TypeLike<'g>: DescriptorView<'g> {
    /// View as a generic type.
    #[inline]
    fn as_type(self) -> DiType<'g> {
        DiType::wrap(self.node())
    }

    /// The wrapped node, or null if it is not a type.
    fn type_fields(self) -> AnnotatedNode<'g> {
        let node = self.node();
        if node.is_type() {
            node
        } else {
            node.nulled()
        }
    }

    fn context(self) -> ScopeRef<'g> {
        self.type_fields().ref_field(2)
    }

    fn name(self) -> &'g str {
        self.type_fields().string_field(3)
    }

    fn line(self) -> u32 {
        self.type_fields().u32_field(4)
    }

    fn size_in_bits(self) -> u64 {
        self.type_fields().u64_field(5)
    }

    fn align_in_bits(self) -> u64 {
        self.type_fields().u64_field(6)
    }

    /// Bit offset of a member within its aggregate.
    fn offset_in_bits(self) -> u64 {
        self.type_fields().u64_field(7)
    }

    fn flags(self) -> DebugFlags {
        DebugFlags::from_word(self.type_fields().u64_field(8))
    }

    fn is_private(self) -> bool {
        self.flags().is_private()
    }

    fn is_protected(self) -> bool {
        self.flags().is_protected()
    }

    fn is_forward_decl(self) -> bool {
        self.flags().is_forward_decl()
    }

    fn is_apple_block_extension(self) -> bool {
        self.flags().is_apple_block_extension()
    }

    fn is_block_byref_struct(self) -> bool {
        self.flags().is_block_byref_struct()
    }

    fn is_virtual(self) -> bool {
        self.flags().is_virtual()
    }

    fn is_artificial(self) -> bool {
        self.flags().is_artificial()
    }

    fn is_object_pointer(self) -> bool {
        self.flags().is_object_pointer()
    }

    fn is_objc_class_complete(self) -> bool {
        self.flags().is_objc_class_complete()
    }

    fn is_vector(self) -> bool {
        self.flags().is_vector()
    }

    fn is_static_member(self) -> bool {
        self.flags().is_static_member()
    }

    /// Reference to this type, by identifier when it has one.
    fn to_type_ref(self) -> TypeRef<'g> {
        let node = self.type_fields();
        let graph = node.graph();
        match node.id() {
            None => CrossRef::empty(graph),
            Some(id) => match DiCompositeType::wrap(node).identifier_name() {
                Some(identifier) => CrossRef::by_identifier(graph, identifier),
                None => CrossRef::direct(graph, id),
            },
        }
    }
}

descriptor_view!(
    /// Any type.
    DiType,
    AnnotatedNode::is_type
);

impl<'g> TypeLike<'g> for DiType<'g> {}
impl<'g> ScopeLike<'g> for DiType<'g> {}

descriptor_view!(
    /// A primitive type (`int`, `double`, ...).
    DiBasicType,
    AnnotatedNode::is_basic_type
);

impl DiBasicType<'_> {
    /// DWARF base type encoding (`DW_ATE_*`).
    pub fn encoding(self) -> u32 {
        self.fields().u32_field(9)
    }
}

impl<'g> TypeLike<'g> for DiBasicType<'g> {}
impl<'g> ScopeLike<'g> for DiBasicType<'g> {}

descriptor_view!(
    /// A type built from another one: qualifiers, pointers, references,
    /// typedefs, members, inheritance and friends.
    ///
    /// Composite types are derived types too.
    DiDerivedType,
    AnnotatedNode::is_derived_type
);

impl<'g> DiDerivedType<'g> {
    /// The type this one is built from.
    pub fn derived_from(self) -> TypeRef<'g> {
        self.fields().ref_field(9)
    }

    /// Class of a pointer-to-member; empty for any other tag.
    pub fn class_type(self) -> TypeRef<'g> {
        let node = self.fields();
        if node.tag() == Some(Tag::PtrToMemberType) {
            node.ref_field(10)
        } else {
            CrossRef::empty(node.graph())
        }
    }

    /// Initializer of a static data member; `Slot::Null` otherwise.
    pub fn constant(self) -> Slot {
        let node = self.fields();
        if node.tag() == Some(Tag::Member) && self.is_static_member() {
            node.slot(10)
        } else {
            Slot::Null
        }
    }

    /// Objective-C property backed by this ivar.
    pub fn objc_property(self) -> DiObjCProperty<'g> {
        self.fields().field_as(10)
    }
}

impl<'g> TypeLike<'g> for DiDerivedType<'g> {}
impl<'g> ScopeLike<'g> for DiDerivedType<'g> {}

descriptor_view!(
    /// Structures, classes, unions, enumerations, arrays and subroutine
    /// types.
    DiCompositeType,
    AnnotatedNode::is_composite_type
);

impl<'g> DiCompositeType<'g> {
    /// View as a derived type.
    pub fn as_derived(self) -> DiDerivedType<'g> {
        DiDerivedType::wrap(self.0)
    }

    pub fn derived_from(self) -> TypeRef<'g> {
        self.fields().ref_field(9)
    }

    /// Members, enumerators, array subranges or signature elements.
    ///
    /// For subroutine types element 0 is the return type (null for `void`),
    /// followed by the parameter types.
    pub fn type_array(self) -> DiArray<'g> {
        self.fields().field_as(10)
    }

    /// Objective-C runtime version.
    pub fn runtime_lang(self) -> u32 {
        self.fields().u32_field(11)
    }

    /// Class holding the vtable pointer.
    pub fn containing_type(self) -> TypeRef<'g> {
        self.fields().ref_field(12)
    }

    pub fn template_params(self) -> DiArray<'g> {
        self.fields().field_as(13)
    }

    /// Identifier used for cross-unit references; `""` if none.
    pub fn identifier(self) -> &'g str {
        self.fields().string_field(14)
    }

    /// The interned identifier, if present and non-empty.
    pub fn identifier_name(self) -> Option<Name> {
        self.fields()
            .name_field(14)
            .filter(|identifier| !identifier.is_empty())
    }
}

impl<'g> TypeLike<'g> for DiCompositeType<'g> {}
impl<'g> ScopeLike<'g> for DiCompositeType<'g> {}

/// Strip derived types until a composite type is reached.
///
/// Returns the null view for a basic type, an empty derived-from chain, or a
/// chain that loops.
///
/// # Panics
///
/// Panics if a derived-from reference names an identifier missing from
/// `map`.
pub fn underlying_composite<'g>(ty: DiType<'g>, map: &IdentifierMap) -> DiCompositeType<'g> {
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut current = ty.node();
    loop {
        if current.is_composite_type() {
            return DiCompositeType::wrap(current);
        }
        let Some(id) = current.id() else {
            return DiCompositeType::wrap(current);
        };
        if !current.is_derived_type() || !seen.insert(id) {
            return DiCompositeType::wrap(current.nulled());
        }
        let next: DiType<'g> = DiDerivedType::wrap(current).derived_from().resolve(map);
        current = next.node();
    }
}

#[cfg(test)]
mod tests;

//! Array, enumeration, template, Objective-C and import descriptors.

use bitflags::bitflags;
use dim_ir::Slot;

use crate::cross_ref::{CrossRef, ScopeRef, TypeRef};
use crate::node::{descriptor_view, AnnotatedNode};
use crate::scope::{DiFile, ScopeLike};
use crate::types::DiType;

descriptor_view!(
    /// An untagged list of node references.
    ///
    /// Null slots read as null elements (a `void` return type in a
    /// signature).
    DiArray,
    AnnotatedNode::is_array
);

impl<'g> DiArray<'g> {
    /// Number of elements; 0 for the null array.
    pub fn len(self) -> usize {
        self.fields().num_slots()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Element `index`, null if absent or not a node.
    pub fn element(self, index: usize) -> AnnotatedNode<'g> {
        self.fields().node_field(index)
    }

    /// Elements in order.
    pub fn iter(self) -> impl Iterator<Item = AnnotatedNode<'g>> {
        (0..self.len()).map(move |index| self.element(index))
    }
}

descriptor_view!(
    /// Array dimension bounds.
    DiSubrange,
    AnnotatedNode::is_subrange
);

impl DiSubrange<'_> {
    pub fn lo(self) -> i64 {
        self.fields().i64_field(1)
    }

    /// Element count; -1 for an unbounded dimension.
    pub fn count(self) -> i64 {
        self.fields().i64_field(2)
    }
}

descriptor_view!(
    /// One named value of an enumeration.
    DiEnumerator,
    AnnotatedNode::is_enumerator
);

impl<'g> DiEnumerator<'g> {
    pub fn name(self) -> &'g str {
        self.fields().string_field(1)
    }

    pub fn value(self) -> i64 {
        self.fields().i64_field(2)
    }
}

descriptor_view!(
    /// A template type argument.
    DiTemplateTypeParameter,
    AnnotatedNode::is_template_type_parameter
);

impl<'g> DiTemplateTypeParameter<'g> {
    pub fn context(self) -> ScopeRef<'g> {
        self.fields().ref_field(1)
    }

    pub fn name(self) -> &'g str {
        self.fields().string_field(2)
    }

    pub fn type_ref(self) -> TypeRef<'g> {
        self.fields().ref_field(3)
    }

    pub fn file(self) -> DiFile<'g> {
        self.fields().field_as(4)
    }

    pub fn filename(self) -> &'g str {
        self.file().filename()
    }

    pub fn directory(self) -> &'g str {
        self.file().directory()
    }

    pub fn line(self) -> u32 {
        self.fields().u32_field(5)
    }

    pub fn column(self) -> u32 {
        self.fields().u32_field(6)
    }
}

descriptor_view!(
    /// A template value argument.
    DiTemplateValueParameter,
    AnnotatedNode::is_template_value_parameter
);

impl<'g> DiTemplateValueParameter<'g> {
    pub fn context(self) -> ScopeRef<'g> {
        self.fields().ref_field(1)
    }

    pub fn name(self) -> &'g str {
        self.fields().string_field(2)
    }

    pub fn type_ref(self) -> TypeRef<'g> {
        self.fields().ref_field(3)
    }

    /// The argument value as stored.
    pub fn value(self) -> Slot {
        self.fields().slot(4)
    }

    pub fn file(self) -> DiFile<'g> {
        self.fields().field_as(5)
    }

    pub fn filename(self) -> &'g str {
        self.file().filename()
    }

    pub fn directory(self) -> &'g str {
        self.file().directory()
    }

    pub fn line(self) -> u32 {
        self.fields().u32_field(6)
    }

    pub fn column(self) -> u32 {
        self.fields().u32_field(7)
    }
}

bitflags! {
    /// `DW_APPLE_PROPERTY_*` attribute bits of an Objective-C property.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PropertyAttributes: u32 {
        const READONLY = 0x01;
        const GETTER = 0x02;
        const ASSIGN = 0x04;
        const READWRITE = 0x08;
        const RETAIN = 0x10;
        const COPY = 0x20;
        const NONATOMIC = 0x40;
    }
}

descriptor_view!(
    /// An Objective-C `@property`.
    DiObjCProperty,
    AnnotatedNode::is_objc_property
);

impl<'g> DiObjCProperty<'g> {
    pub fn name(self) -> &'g str {
        self.fields().string_field(1)
    }

    pub fn file(self) -> DiFile<'g> {
        self.fields().field_as(2)
    }

    pub fn line(self) -> u32 {
        self.fields().u32_field(3)
    }

    pub fn getter_name(self) -> &'g str {
        self.fields().string_field(4)
    }

    pub fn setter_name(self) -> &'g str {
        self.fields().string_field(5)
    }

    pub fn attributes(self) -> PropertyAttributes {
        PropertyAttributes::from_bits_truncate(self.fields().u32_field(6))
    }

    pub fn is_read_only(self) -> bool {
        self.attributes().contains(PropertyAttributes::READONLY)
    }

    pub fn is_read_write(self) -> bool {
        self.attributes().contains(PropertyAttributes::READWRITE)
    }

    pub fn is_assign(self) -> bool {
        self.attributes().contains(PropertyAttributes::ASSIGN)
    }

    pub fn is_retain(self) -> bool {
        self.attributes().contains(PropertyAttributes::RETAIN)
    }

    pub fn is_copy(self) -> bool {
        self.attributes().contains(PropertyAttributes::COPY)
    }

    pub fn is_non_atomic(self) -> bool {
        self.attributes().contains(PropertyAttributes::NONATOMIC)
    }

    pub fn ty(self) -> DiType<'g> {
        self.fields().field_as(7)
    }
}

descriptor_view!(
    /// A `using` declaration or directive.
    DiImportedEntity,
    AnnotatedNode::is_imported_entity
);

impl<'g> DiImportedEntity<'g> {
    pub fn context(self) -> ScopeRef<'g> {
        self.fields().ref_field(1)
    }

    /// The imported declaration or module.
    pub fn entity(self) -> CrossRef<'g, AnnotatedNode<'g>> {
        self.fields().ref_field(2)
    }

    pub fn line(self) -> u32 {
        self.fields().u32_field(3)
    }

    /// Name the entity is imported as; `""` if unrenamed.
    pub fn name(self) -> &'g str {
        self.fields().string_field(4)
    }
}

//! Variable and location descriptors.

use dim_ir::{Function, Slot};

use crate::cross_ref::TypeRef;
use crate::flags::DebugFlags;
use crate::identifier_map::IdentifierMap;
use crate::node::{descriptor_view, AnnotatedNode, DescriptorView};
use crate::scope::{enclosing_subprogram, DiFile, DiScope, ScopeLike};
use crate::types::{DiDerivedType, DiType, TypeLike};

/// Bits of the variable line slot holding the line number.
const LINE_BITS: u32 = 24;

/// Slot where a variable's complex address expression starts.
const ADDR_START: usize = 8;

descriptor_view!(
    /// A global or static variable.
    DiGlobalVariable,
    AnnotatedNode::is_global_variable
);

impl<'g> DiGlobalVariable<'g> {
    pub fn context(self) -> DiScope<'g> {
        self.fields().field_as(2)
    }

    pub fn name(self) -> &'g str {
        self.fields().string_field(3)
    }

    pub fn display_name(self) -> &'g str {
        self.fields().string_field(4)
    }

    pub fn linkage_name(self) -> &'g str {
        self.fields().string_field(5)
    }

    pub fn file(self) -> DiFile<'g> {
        self.fields().field_as(6)
    }

    pub fn filename(self) -> &'g str {
        self.file().filename()
    }

    pub fn directory(self) -> &'g str {
        self.file().directory()
    }

    pub fn line(self) -> u32 {
        self.fields().u32_field(7)
    }

    pub fn type_ref(self) -> TypeRef<'g> {
        self.fields().ref_field(8)
    }

    pub fn is_local_to_unit(self) -> bool {
        self.fields().u64_field(9) != 0
    }

    pub fn is_definition(self) -> bool {
        self.fields().u64_field(10) != 0
    }

    /// The storage this variable describes: a global name or a constant.
    pub fn global(self) -> Slot {
        self.fields().slot(11)
    }

    /// In-class declaration of a static data member.
    pub fn static_data_member_declaration(self) -> DiDerivedType<'g> {
        self.fields().field_as(12)
    }
}

descriptor_view!(
    /// A local variable or parameter.
    DiVariable,
    AnnotatedNode::is_variable
);

impl<'g> DiVariable<'g> {
    pub fn context(self) -> DiScope<'g> {
        self.fields().field_as(1)
    }

    pub fn name(self) -> &'g str {
        self.fields().string_field(2)
    }

    pub fn file(self) -> DiFile<'g> {
        self.fields().field_as(3)
    }

    /// Source line (low 24 bits of slot 4).
    pub fn line(self) -> u32 {
        self.fields().u32_field(4) & ((1 << LINE_BITS) - 1)
    }

    /// 1-based argument position; 0 for locals.
    pub fn arg_number(self) -> u32 {
        self.fields().u32_field(4) >> LINE_BITS
    }

    pub fn type_ref(self) -> TypeRef<'g> {
        self.fields().ref_field(5)
    }

    pub fn flags(self) -> DebugFlags {
        DebugFlags::from_word(self.fields().u64_field(6))
    }

    pub fn is_artificial(self) -> bool {
        self.flags().is_artificial()
    }

    pub fn is_object_pointer(self) -> bool {
        self.flags().is_object_pointer()
    }

    /// Variable is described through a pointer to its storage.
    pub fn is_indirect(self) -> bool {
        self.flags().is_indirect_variable()
    }

    /// Call site this variable was inlined into.
    pub fn inlined_at(self) -> DiLocation<'g> {
        self.fields().field_as(7)
    }

    pub fn num_addr_elements(self) -> usize {
        self.fields().num_slots().saturating_sub(ADDR_START)
    }

    pub fn has_complex_address(self) -> bool {
        self.num_addr_elements() > 0
    }

    pub fn addr_element(self, index: usize) -> u64 {
        self.fields().u64_field(index + ADDR_START)
    }

    /// `__block` variable (Apple Blocks).
    ///
    /// # Panics
    ///
    /// Panics if the variable's type names an identifier missing from `map`.
    pub fn is_block_byref_variable(self, map: &IdentifierMap) -> bool {
        let ty: DiType<'g> = self.type_ref().resolve(map);
        ty.is_block_byref_struct()
    }

    /// Returns `true` for a parameter of a subprogram inlined into
    /// `current`.
    pub fn is_inlined_fn_argument(self, current: &Function) -> bool {
        if self.arg_number() == 0 {
            return false;
        }
        let subprogram = enclosing_subprogram(self.context().node());
        subprogram.is_valid() && !subprogram.describes(current)
    }
}

descriptor_view!(
    /// A source position: line, column, scope and inlining call site.
    ///
    /// Locations are the only untagged descriptors.
    DiLocation,
    AnnotatedNode::is_location
);

impl<'g> DiLocation<'g> {
    pub fn line(self) -> u32 {
        self.fields().u32_field(0)
    }

    pub fn column(self) -> u32 {
        self.fields().u32_field(1)
    }

    pub fn scope(self) -> DiScope<'g> {
        self.fields().field_as(2)
    }

    /// Location of the call this one was inlined into.
    pub fn inlined_at(self) -> DiLocation<'g> {
        self.fields().field_as(3)
    }

    pub fn filename(self) -> &'g str {
        self.scope().filename()
    }

    pub fn directory(self) -> &'g str {
        self.scope().directory()
    }
}

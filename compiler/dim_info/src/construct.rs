//! Descriptor construction.
//!
//! [`DescriptorBuilder`] lays descriptors out slot by slot on top of a
//! [`GraphBuilder`]. Most descriptors are uniqued, so building the same type
//! twice yields one node. Compile units, types and subprograms can also be
//! reserved first and defined later, which is how cycles get built:
//! a struct whose member points back at it, or a subprogram whose local
//! variables name it as their scope.

use dim_ir::{GraphBuilder, GraphError, MetadataGraph, Name, NodeId, Slot, Tag};

use crate::flags::DebugFlags;

/// A reference slot value.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RefDesc<'a> {
    /// No reference.
    #[default]
    None,
    /// Direct node reference.
    Node(NodeId),
    /// Reference by type identifier.
    Identifier(&'a str),
}

impl From<NodeId> for RefDesc<'_> {
    fn from(id: NodeId) -> Self {
        RefDesc::Node(id)
    }
}

impl From<Option<NodeId>> for RefDesc<'_> {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(RefDesc::None, RefDesc::Node)
    }
}

/// Fields of a compile unit.
#[derive(Clone, Debug, Default)]
pub struct CompileUnitDesc<'a> {
    pub filename: &'a str,
    pub directory: &'a str,
    pub language: u32,
    pub producer: &'a str,
    pub optimized: bool,
    pub flags: &'a str,
    pub runtime_version: u32,
    pub enum_types: &'a [NodeId],
    pub retained_types: &'a [NodeId],
    pub subprograms: &'a [NodeId],
    pub global_variables: &'a [NodeId],
    pub imported_entities: &'a [NodeId],
    pub split_debug_filename: &'a str,
}

/// Fields of a basic type.
#[derive(Clone, Debug, Default)]
pub struct BasicTypeDesc<'a> {
    pub name: &'a str,
    pub size: u64,
    pub align: u64,
    /// `DW_ATE_*` encoding.
    pub encoding: u32,
}

/// Fields of a derived type.
#[derive(Clone, Debug, Default)]
pub struct DerivedTypeDesc<'a> {
    /// File node the type is declared in.
    pub file: Option<NodeId>,
    pub context: RefDesc<'a>,
    pub name: &'a str,
    pub line: u32,
    pub size: u64,
    pub align: u64,
    pub offset: u64,
    pub flags: DebugFlags,
    pub derived_from: RefDesc<'a>,
    /// Class type of a pointer-to-member, constant of a static member, or
    /// Objective-C property of an ivar.
    pub extra: Option<Slot>,
}

/// Fields of a composite type.
#[derive(Clone, Debug, Default)]
pub struct CompositeTypeDesc<'a> {
    pub file: Option<NodeId>,
    pub context: RefDesc<'a>,
    pub name: &'a str,
    pub line: u32,
    pub size: u64,
    pub align: u64,
    pub offset: u64,
    pub flags: DebugFlags,
    pub derived_from: RefDesc<'a>,
    pub members: &'a [NodeId],
    pub runtime_lang: u32,
    pub containing_type: RefDesc<'a>,
    pub template_params: &'a [NodeId],
    /// Cross-unit identifier; empty for none.
    pub identifier: &'a str,
}

/// Fields of a subprogram.
#[derive(Clone, Debug, Default)]
pub struct SubprogramDesc<'a> {
    pub file: Option<NodeId>,
    pub context: RefDesc<'a>,
    pub name: &'a str,
    pub display_name: &'a str,
    pub linkage_name: &'a str,
    pub line: u32,
    /// Subroutine type node.
    pub signature: Option<NodeId>,
    pub local: bool,
    pub definition: bool,
    pub virtuality: u32,
    pub virtual_index: u32,
    pub containing_type: RefDesc<'a>,
    pub flags: DebugFlags,
    pub optimized: bool,
    /// Name of the described function.
    pub function: &'a str,
    pub template_params: &'a [NodeId],
    pub declaration: Option<NodeId>,
    pub variables: &'a [NodeId],
    pub scope_line: u32,
}

/// Fields of a global variable.
#[derive(Clone, Debug, Default)]
pub struct GlobalVariableDesc<'a> {
    pub context: Option<NodeId>,
    pub name: &'a str,
    pub display_name: &'a str,
    pub linkage_name: &'a str,
    pub file: Option<NodeId>,
    pub line: u32,
    pub ty: RefDesc<'a>,
    pub local: bool,
    pub definition: bool,
    /// Name of the storage.
    pub global: &'a str,
    pub static_member_declaration: Option<NodeId>,
}

/// Fields of a local variable or parameter.
#[derive(Clone, Debug, Default)]
pub struct VariableDesc<'a> {
    pub context: Option<NodeId>,
    pub name: &'a str,
    pub file: Option<NodeId>,
    pub line: u32,
    /// 1-based parameter position; 0 makes a local.
    pub arg: u32,
    pub ty: RefDesc<'a>,
    pub flags: DebugFlags,
    pub inlined_at: Option<NodeId>,
    /// Complex address expression.
    pub address: &'a [u64],
}

/// Builds well-formed descriptors into a metadata graph.
#[derive(Debug, Default)]
pub struct DescriptorBuilder {
    graph: GraphBuilder,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying graph builder, for hand-made nodes.
    pub fn graph_mut(&mut self) -> &mut GraphBuilder {
        &mut self.graph
    }

    pub fn intern(&mut self, s: &str) -> Name {
        self.graph.intern(s)
    }

    /// Freeze the graph.
    pub fn finish(self) -> Result<MetadataGraph, GraphError> {
        self.graph.finish()
    }

    /// Reserve a node to define later with one of the `define_*` methods.
    pub fn reserve(&mut self) -> NodeId {
        self.graph.forward()
    }

    // -- Slot helpers --

    fn tag(tag: Tag) -> Slot {
        Slot::UInt(tag.word())
    }

    fn str(&mut self, s: &str) -> Slot {
        self.graph.str_slot(s)
    }

    fn reference(&mut self, reference: RefDesc<'_>) -> Slot {
        match reference {
            RefDesc::None => Slot::Null,
            RefDesc::Node(id) => Slot::Node(id),
            RefDesc::Identifier(identifier) => self.str(identifier),
        }
    }

    fn flags(flags: DebugFlags) -> Slot {
        Slot::UInt(flags.word())
    }

    /// The `{filename, directory}` pair of a file node.
    fn pair_of(&self, file: Option<NodeId>) -> Slot {
        file.and_then(|id| self.graph.get(id))
            .map_or(Slot::Null, |node| node.slot(1))
    }

    fn pair(&mut self, filename: &str, directory: &str) -> NodeId {
        let filename = self.str(filename);
        let directory = self.str(directory);
        self.graph.node([filename, directory])
    }

    /// Uniqued node array.
    pub fn array(&mut self, elements: impl IntoIterator<Item = Option<NodeId>>) -> NodeId {
        self.graph.node(elements.into_iter().map(Slot::from))
    }

    fn node_array(&mut self, elements: &[NodeId]) -> Slot {
        Slot::Node(self.array(elements.iter().copied().map(Some)))
    }

    // -- Scopes --

    /// A source file.
    pub fn file(&mut self, filename: &str, directory: &str) -> NodeId {
        let pair = self.pair(filename, directory);
        self.graph.node([Self::tag(Tag::FileType), Slot::Node(pair)])
    }

    fn compile_unit_slots(&mut self, desc: &CompileUnitDesc<'_>) -> Vec<Slot> {
        let pair = self.pair(desc.filename, desc.directory);
        vec![
            Self::tag(Tag::CompileUnit),
            Slot::Node(pair),
            Slot::from(desc.language),
            self.str(desc.producer),
            Slot::from(desc.optimized),
            self.str(desc.flags),
            Slot::from(desc.runtime_version),
            self.node_array(desc.enum_types),
            self.node_array(desc.retained_types),
            self.node_array(desc.subprograms),
            self.node_array(desc.global_variables),
            self.node_array(desc.imported_entities),
            self.str(desc.split_debug_filename),
        ]
    }

    pub fn compile_unit(&mut self, desc: &CompileUnitDesc<'_>) -> NodeId {
        let slots = self.compile_unit_slots(desc);
        self.graph.node(slots)
    }

    pub fn define_compile_unit(
        &mut self,
        id: NodeId,
        desc: &CompileUnitDesc<'_>,
    ) -> Result<(), GraphError> {
        let slots = self.compile_unit_slots(desc);
        self.graph.define(id, slots)
    }

    fn subprogram_slots(&mut self, desc: &SubprogramDesc<'_>) -> Vec<Slot> {
        vec![
            Self::tag(Tag::Subprogram),
            self.pair_of(desc.file),
            self.reference(desc.context),
            self.str(desc.name),
            self.str(desc.display_name),
            self.str(desc.linkage_name),
            Slot::from(desc.line),
            Slot::from(desc.signature),
            Slot::from(desc.local),
            Slot::from(desc.definition),
            Slot::from(desc.virtuality),
            Slot::from(desc.virtual_index),
            self.reference(desc.containing_type),
            Self::flags(desc.flags),
            Slot::from(desc.optimized),
            self.str(desc.function),
            self.node_array(desc.template_params),
            Slot::from(desc.declaration),
            self.node_array(desc.variables),
            Slot::from(desc.scope_line),
        ]
    }

    pub fn subprogram(&mut self, desc: &SubprogramDesc<'_>) -> NodeId {
        let slots = self.subprogram_slots(desc);
        self.graph.node(slots)
    }

    pub fn define_subprogram(
        &mut self,
        id: NodeId,
        desc: &SubprogramDesc<'_>,
    ) -> Result<(), GraphError> {
        let slots = self.subprogram_slots(desc);
        self.graph.define(id, slots)
    }

    /// A nested block. Blocks are never merged.
    pub fn lexical_block(
        &mut self,
        file: Option<NodeId>,
        scope: NodeId,
        line: u32,
        column: u32,
        unique_id: u32,
    ) -> NodeId {
        let slots = [
            Self::tag(Tag::LexicalBlock),
            self.pair_of(file),
            Slot::Node(scope),
            Slot::from(line),
            Slot::from(column),
            Slot::from(unique_id),
        ];
        self.graph.distinct(slots)
    }

    /// A file change inside `block`.
    pub fn lexical_block_file(&mut self, file: Option<NodeId>, block: NodeId) -> NodeId {
        let slots = [
            Self::tag(Tag::LexicalBlock),
            self.pair_of(file),
            Slot::Node(block),
        ];
        self.graph.node(slots)
    }

    pub fn namespace(
        &mut self,
        file: Option<NodeId>,
        context: Option<NodeId>,
        name: &str,
        line: u32,
    ) -> NodeId {
        let slots = [
            Self::tag(Tag::Namespace),
            self.pair_of(file),
            Slot::from(context),
            self.str(name),
            Slot::from(line),
        ];
        self.graph.node(slots)
    }

    // -- Types --

    pub fn basic_type(&mut self, desc: &BasicTypeDesc<'_>) -> NodeId {
        let slots = [
            Self::tag(Tag::BaseType),
            Slot::Null,
            Slot::Null,
            self.str(desc.name),
            Slot::from(0u32),
            Slot::from(desc.size),
            Slot::from(desc.align),
            Slot::from(0u64),
            Self::flags(DebugFlags::empty()),
            Slot::from(desc.encoding),
        ];
        self.graph.node(slots)
    }

    fn derived_type_slots(&mut self, tag: Tag, desc: &DerivedTypeDesc<'_>) -> Vec<Slot> {
        let mut slots = vec![
            Self::tag(tag),
            self.pair_of(desc.file),
            self.reference(desc.context),
            self.str(desc.name),
            Slot::from(desc.line),
            Slot::from(desc.size),
            Slot::from(desc.align),
            Slot::from(desc.offset),
            Self::flags(desc.flags),
            self.reference(desc.derived_from),
        ];
        slots.extend(desc.extra);
        slots
    }

    /// A derived type with tag `tag` (pointer, typedef, member, ...).
    pub fn derived_type(&mut self, tag: Tag, desc: &DerivedTypeDesc<'_>) -> NodeId {
        let slots = self.derived_type_slots(tag, desc);
        self.graph.node(slots)
    }

    pub fn define_derived_type(
        &mut self,
        id: NodeId,
        tag: Tag,
        desc: &DerivedTypeDesc<'_>,
    ) -> Result<(), GraphError> {
        let slots = self.derived_type_slots(tag, desc);
        self.graph.define(id, slots)
    }

    /// Pointer to `pointee` with the given size in bits.
    pub fn pointer_type(&mut self, pointee: RefDesc<'_>, size: u64) -> NodeId {
        self.derived_type(
            Tag::PointerType,
            &DerivedTypeDesc {
                size,
                align: size,
                derived_from: pointee,
                ..DerivedTypeDesc::default()
            },
        )
    }

    fn composite_type_slots(&mut self, tag: Tag, desc: &CompositeTypeDesc<'_>) -> Vec<Slot> {
        vec![
            Self::tag(tag),
            self.pair_of(desc.file),
            self.reference(desc.context),
            self.str(desc.name),
            Slot::from(desc.line),
            Slot::from(desc.size),
            Slot::from(desc.align),
            Slot::from(desc.offset),
            Self::flags(desc.flags),
            self.reference(desc.derived_from),
            self.node_array(desc.members),
            Slot::from(desc.runtime_lang),
            self.reference(desc.containing_type),
            self.node_array(desc.template_params),
            if desc.identifier.is_empty() {
                Slot::Null
            } else {
                self.str(desc.identifier)
            },
        ]
    }

    /// A composite type with tag `tag` (struct, class, union, enum, array).
    pub fn composite_type(&mut self, tag: Tag, desc: &CompositeTypeDesc<'_>) -> NodeId {
        let slots = self.composite_type_slots(tag, desc);
        self.graph.node(slots)
    }

    pub fn define_composite_type(
        &mut self,
        id: NodeId,
        tag: Tag,
        desc: &CompositeTypeDesc<'_>,
    ) -> Result<(), GraphError> {
        let slots = self.composite_type_slots(tag, desc);
        self.graph.define(id, slots)
    }

    /// A function signature: return type first (`None` for `void`), then the
    /// parameter types.
    pub fn subroutine_type(&mut self, signature: &[Option<NodeId>]) -> NodeId {
        let members = self.array(signature.iter().copied());
        let mut slots = self.composite_type_slots(Tag::SubroutineType, &CompositeTypeDesc::default());
        slots[10] = Slot::Node(members);
        self.graph.node(slots)
    }

    pub fn subrange(&mut self, lo: i64, count: i64) -> NodeId {
        self.graph.node([
            Self::tag(Tag::SubrangeType),
            Slot::from(lo),
            Slot::from(count),
        ])
    }

    pub fn enumerator(&mut self, name: &str, value: i64) -> NodeId {
        let name = self.str(name);
        self.graph
            .node([Self::tag(Tag::Enumerator), name, Slot::from(value)])
    }

    pub fn template_type_parameter(
        &mut self,
        context: RefDesc<'_>,
        name: &str,
        ty: RefDesc<'_>,
        file: Option<NodeId>,
        line: u32,
        column: u32,
    ) -> NodeId {
        let slots = [
            Self::tag(Tag::TemplateTypeParameter),
            self.reference(context),
            self.str(name),
            self.reference(ty),
            Slot::from(file),
            Slot::from(line),
            Slot::from(column),
        ];
        self.graph.node(slots)
    }

    #[expect(clippy::too_many_arguments, reason = "one argument per slot")]
    pub fn template_value_parameter(
        &mut self,
        context: RefDesc<'_>,
        name: &str,
        ty: RefDesc<'_>,
        value: Slot,
        file: Option<NodeId>,
        line: u32,
        column: u32,
    ) -> NodeId {
        let slots = [
            Self::tag(Tag::TemplateValueParameter),
            self.reference(context),
            self.str(name),
            self.reference(ty),
            value,
            Slot::from(file),
            Slot::from(line),
            Slot::from(column),
        ];
        self.graph.node(slots)
    }

    #[expect(clippy::too_many_arguments, reason = "one argument per slot")]
    pub fn objc_property(
        &mut self,
        name: &str,
        file: Option<NodeId>,
        line: u32,
        getter: &str,
        setter: &str,
        attributes: u32,
        ty: Option<NodeId>,
    ) -> NodeId {
        let slots = [
            Self::tag(Tag::AppleProperty),
            self.str(name),
            Slot::from(file),
            Slot::from(line),
            self.str(getter),
            self.str(setter),
            Slot::from(attributes),
            Slot::from(ty),
        ];
        self.graph.node(slots)
    }

    /// A `using` module or declaration. An empty `name` omits the name slot.
    pub fn imported_entity(
        &mut self,
        tag: Tag,
        context: RefDesc<'_>,
        entity: RefDesc<'_>,
        line: u32,
        name: &str,
    ) -> NodeId {
        let mut slots = vec![
            Self::tag(tag),
            self.reference(context),
            self.reference(entity),
            Slot::from(line),
        ];
        if !name.is_empty() {
            slots.push(self.str(name));
        }
        self.graph.node(slots)
    }

    // -- Variables and locations --

    pub fn global_variable(&mut self, desc: &GlobalVariableDesc<'_>) -> NodeId {
        let slots = [
            Self::tag(Tag::Variable),
            Slot::Null,
            Slot::from(desc.context),
            self.str(desc.name),
            self.str(desc.display_name),
            self.str(desc.linkage_name),
            Slot::from(desc.file),
            Slot::from(desc.line),
            self.reference(desc.ty),
            Slot::from(desc.local),
            Slot::from(desc.definition),
            self.str(desc.global),
            Slot::from(desc.static_member_declaration),
        ];
        self.graph.node(slots)
    }

    /// A local variable, or a parameter when `desc.arg` is non-zero.
    pub fn variable(&mut self, desc: &VariableDesc<'_>) -> NodeId {
        let tag = if desc.arg == 0 {
            Tag::AutoVariable
        } else {
            Tag::ArgVariable
        };
        let line_and_arg = (desc.line & 0x00ff_ffff) | (desc.arg << 24);
        let mut slots = vec![
            Self::tag(tag),
            Slot::from(desc.context),
            self.str(desc.name),
            Slot::from(desc.file),
            Slot::from(line_and_arg),
            self.reference(desc.ty),
            Self::flags(desc.flags),
            Slot::from(desc.inlined_at),
        ];
        slots.extend(desc.address.iter().copied().map(Slot::from));
        self.graph.node(slots)
    }

    /// A source location. Locations carry no tag.
    pub fn location(
        &mut self,
        line: u32,
        column: u32,
        scope: NodeId,
        inlined_at: Option<NodeId>,
    ) -> NodeId {
        self.graph.node([
            Slot::from(line),
            Slot::from(column),
            Slot::Node(scope),
            Slot::from(inlined_at),
        ])
    }
}

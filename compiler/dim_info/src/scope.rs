//! Scope descriptors.
//!
//! Every scope stores a file pair node in slot 1 and (except files and
//! compile units) its enclosing scope in slot 2. Types are scopes too; their
//! accessors live in [`types`](crate::types).

use dim_ir::{Function, NodeId};
use smallvec::SmallVec;

use crate::cross_ref::{CrossRef, RefTarget, ScopeRef, TypeRef};
use crate::elements::DiArray;
use crate::flags::DebugFlags;
use crate::kind::NodeKind;
use crate::node::{descriptor_view, AnnotatedNode, DescriptorView};
use crate::types::DiCompositeType;

/// Accessors shared by every scope view.
pub trait ScopeLike<'g>: DescriptorView<'g> {
    /// View as a generic scope.
    #[inline]
    fn as_scope(self) -> DiScope<'g> {
        DiScope::wrap(self.node())
    }

    /// Source file name from the file pair.
    fn filename(self) -> &'g str {
        self.as_scope().file_pair().string_field(0)
    }

    /// Source directory from the file pair.
    fn directory(self) -> &'g str {
        self.as_scope().file_pair().string_field(1)
    }

    /// Reference to this scope.
    ///
    /// Composite types that carry an identifier are referenced by it; every
    /// other scope is referenced directly.
    fn to_ref(self) -> ScopeRef<'g> {
        let node = self.as_scope().fields();
        let graph = node.graph();
        let composite = DiCompositeType::wrap(node);
        if let Some(identifier) = composite.identifier_name() {
            return CrossRef::by_identifier(graph, identifier);
        }
        node.id()
            .map_or_else(|| CrossRef::empty(graph), |id| CrossRef::direct(graph, id))
    }
}

descriptor_view!(
    /// Any scope: file, compile unit, subprogram, lexical block, namespace
    /// or type.
    DiScope,
    AnnotatedNode::is_scope
);

impl<'g> DiScope<'g> {
    /// The `{filename, directory}` pair node.
    pub fn file_pair(self) -> AnnotatedNode<'g> {
        self.fields().node_field(1)
    }

    /// Enclosing scope.
    ///
    /// Files and compile units have no context.
    pub fn context(self) -> ScopeRef<'g> {
        let node = self.fields();
        match node.kind() {
            Some(kind) if kind.is_type() => node.ref_field(2),
            Some(NodeKind::Subprogram | NodeKind::LexicalBlock | NodeKind::NameSpace) => {
                node.ref_field(2)
            }
            Some(NodeKind::LexicalBlockFile) => DiLexicalBlockFile::wrap(node).context(),
            _ => CrossRef::empty(node.graph()),
        }
    }

    /// Name of a type, subprogram or namespace; `""` for other scopes.
    pub fn name(self) -> &'g str {
        let node = self.fields();
        match node.kind() {
            Some(kind) if kind.is_type() => node.string_field(3),
            Some(NodeKind::Subprogram | NodeKind::NameSpace) => node.string_field(3),
            _ => "",
        }
    }
}

impl<'g> ScopeLike<'g> for DiScope<'g> {}

descriptor_view!(
    /// A source file.
    DiFile,
    AnnotatedNode::is_file
);

impl<'g> DiFile<'g> {
    /// The `{filename, directory}` pair node.
    pub fn file_node(self) -> AnnotatedNode<'g> {
        self.fields().node_field(1)
    }
}

impl<'g> ScopeLike<'g> for DiFile<'g> {}

descriptor_view!(
    /// Root of one translation unit's debug info.
    DiCompileUnit,
    AnnotatedNode::is_compile_unit
);

impl<'g> DiCompileUnit<'g> {
    /// DWARF source language code.
    pub fn language(self) -> u32 {
        self.fields().u32_field(2)
    }

    pub fn producer(self) -> &'g str {
        self.fields().string_field(3)
    }

    pub fn is_optimized(self) -> bool {
        self.fields().u64_field(4) != 0
    }

    /// Command-line flags passed to the producer.
    pub fn flags(self) -> &'g str {
        self.fields().string_field(5)
    }

    pub fn runtime_version(self) -> u32 {
        self.fields().u32_field(6)
    }

    pub fn enum_types(self) -> DiArray<'g> {
        self.fields().field_as(7)
    }

    /// Types emitted even if nothing references them.
    ///
    /// Composite types registered for identifier lookup come from here.
    pub fn retained_types(self) -> DiArray<'g> {
        self.fields().field_as(8)
    }

    pub fn subprograms(self) -> DiArray<'g> {
        self.fields().field_as(9)
    }

    pub fn global_variables(self) -> DiArray<'g> {
        self.fields().field_as(10)
    }

    pub fn imported_entities(self) -> DiArray<'g> {
        self.fields().field_as(11)
    }

    pub fn split_debug_filename(self) -> &'g str {
        self.fields().string_field(12)
    }
}

impl<'g> ScopeLike<'g> for DiCompileUnit<'g> {}

descriptor_view!(
    /// A function, method or function declaration.
    DiSubprogram,
    AnnotatedNode::is_subprogram
);

impl<'g> DiSubprogram<'g> {
    pub fn context(self) -> ScopeRef<'g> {
        self.fields().ref_field(2)
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

    pub fn line(self) -> u32 {
        self.fields().u32_field(6)
    }

    /// Subroutine type; element 0 of its member array is the return type.
    pub fn signature(self) -> DiCompositeType<'g> {
        self.fields().field_as(7)
    }

    pub fn is_local_to_unit(self) -> bool {
        self.fields().u64_field(8) != 0
    }

    pub fn is_definition(self) -> bool {
        self.fields().u64_field(9) != 0
    }

    pub fn virtuality(self) -> u32 {
        self.fields().u32_field(10)
    }

    pub fn virtual_index(self) -> u32 {
        self.fields().u32_field(11)
    }

    /// Class holding the vtable for a virtual method.
    pub fn containing_type(self) -> TypeRef<'g> {
        self.fields().ref_field(12)
    }

    pub fn flags(self) -> DebugFlags {
        DebugFlags::from_word(self.fields().u64_field(13))
    }

    pub fn is_artificial(self) -> bool {
        self.flags().is_artificial()
    }

    pub fn is_private(self) -> bool {
        self.flags().is_private()
    }

    pub fn is_protected(self) -> bool {
        self.flags().is_protected()
    }

    pub fn is_explicit(self) -> bool {
        self.flags().is_explicit()
    }

    pub fn is_prototyped(self) -> bool {
        self.flags().is_prototyped()
    }

    /// Older subprograms end before the optimized slot.
    pub fn is_optimized(self) -> bool {
        let node = self.fields();
        node.num_slots() > 14 && node.u64_field(14) != 0
    }

    /// Name of the function this subprogram describes.
    pub fn function_name(self) -> &'g str {
        self.fields().string_field(15)
    }

    pub fn template_params(self) -> DiArray<'g> {
        self.fields().field_as(16)
    }

    /// Declaration matching this definition.
    pub fn declaration(self) -> DiSubprogram<'g> {
        self.fields().field_as(17)
    }

    /// Local variables and parameters.
    pub fn variables(self) -> DiArray<'g> {
        let node = self.fields();
        if node.num_slots() <= 19 {
            return DiArray::wrap(node.nulled());
        }
        node.field_as(18)
    }

    /// Line of the function body's opening brace.
    pub fn scope_line(self) -> u32 {
        self.fields().u32_field(19)
    }

    /// Returns `true` if this subprogram describes `function`.
    ///
    /// Matches the attached function name first, then the linkage name, then
    /// the plain name.
    pub fn describes(self, function: &Function) -> bool {
        if !self.is_valid() {
            return false;
        }
        let attached = self.function_name();
        if !attached.is_empty() && attached == function.name {
            return true;
        }
        let name = match self.linkage_name() {
            "" => self.name(),
            linkage => linkage,
        };
        name == function.name
    }
}

impl<'g> ScopeLike<'g> for DiSubprogram<'g> {}

descriptor_view!(
    /// A nested block scope inside a subprogram.
    DiLexicalBlock,
    AnnotatedNode::is_lexical_block
);

impl<'g> DiLexicalBlock<'g> {
    pub fn context(self) -> DiScope<'g> {
        self.fields().field_as(2)
    }

    pub fn line(self) -> u32 {
        self.fields().u32_field(3)
    }

    pub fn column(self) -> u32 {
        self.fields().u32_field(4)
    }

    /// Distinguishes otherwise identical blocks.
    pub fn unique_id(self) -> u32 {
        self.fields().u32_field(5)
    }
}

impl<'g> ScopeLike<'g> for DiLexicalBlock<'g> {}

descriptor_view!(
    /// A lexical block whose code comes from a different file.
    DiLexicalBlockFile,
    AnnotatedNode::is_lexical_block_file
);

impl<'g> DiLexicalBlockFile<'g> {
    /// The wrapped block.
    pub fn scope(self) -> DiLexicalBlock<'g> {
        self.fields().field_as(2)
    }

    /// The wrapped block's enclosing scope.
    ///
    /// When the wrapped slot is a subprogram it is the context itself.
    pub fn context(self) -> ScopeRef<'g> {
        let node = self.fields();
        let inner = node.node_field(2);
        if inner.is_lexical_block() {
            return inner.ref_field(2);
        }
        match inner.id() {
            Some(id) => CrossRef::direct(node.graph(), id),
            None => CrossRef::empty(node.graph()),
        }
    }

    pub fn line(self) -> u32 {
        self.scope().line()
    }

    pub fn column(self) -> u32 {
        self.scope().column()
    }
}

impl<'g> ScopeLike<'g> for DiLexicalBlockFile<'g> {}

descriptor_view!(
    /// A namespace.
    DiNameSpace,
    AnnotatedNode::is_name_space
);

impl<'g> DiNameSpace<'g> {
    pub fn context(self) -> DiScope<'g> {
        self.fields().field_as(2)
    }

    pub fn name(self) -> &'g str {
        self.fields().string_field(3)
    }

    pub fn line(self) -> u32 {
        self.fields().u32_field(4)
    }
}

impl<'g> ScopeLike<'g> for DiNameSpace<'g> {}

/// The subprogram enclosing `scope`.
///
/// Walks out through lexical blocks and lexical block files. Returns the null
/// view if the chain ends, leaves lexical scopes without reaching a
/// subprogram, or loops.
pub fn enclosing_subprogram(scope: AnnotatedNode<'_>) -> DiSubprogram<'_> {
    let mut seen: SmallVec<[NodeId; 8]> = SmallVec::new();
    let mut current = scope;
    loop {
        let Some(id) = current.id() else {
            return DiSubprogram::wrap(current);
        };
        if seen.contains(&id) {
            return DiSubprogram::wrap(current.nulled());
        }
        seen.push(id);

        current = match current.kind() {
            Some(NodeKind::Subprogram) => return DiSubprogram::wrap(current),
            Some(NodeKind::LexicalBlock) => current.node_field(2),
            Some(NodeKind::LexicalBlockFile) => {
                match DiLexicalBlockFile::wrap(current).context().target() {
                    Some(RefTarget::Direct(next)) => {
                        AnnotatedNode::new(current.graph(), next)
                    }
                    _ => current.nulled(),
                }
            }
            _ => return DiSubprogram::wrap(current.nulled()),
        };
    }
}

#[cfg(test)]
mod tests;

//! Node kind classification for tag-driven dispatch.
//!
//! A node's kind is a function of its tag and, for lexical blocks, its slot
//! count: a `DW_TAG_lexical_block` with exactly three slots is a lexical
//! block *file* (a file change inside a block), anything longer is a plain
//! lexical block.
//!
//! # Kind Groups
//!
//! - **Types**: basic, derived, composite
//! - **Scopes**: compile unit, file, subprogram, lexical block (both forms),
//!   namespace, and every type
//! - **Everything else**: variables, array elements, template parameters,
//!   imported entities, Objective-C properties

use std::fmt;

use dim_ir::Tag;

/// Kind of a tagged metadata node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    BasicType,
    DerivedType,
    CompositeType,
    CompileUnit,
    File,
    Subprogram,
    LexicalBlock,
    LexicalBlockFile,
    NameSpace,
    GlobalVariable,
    Variable,
    Subrange,
    Enumerator,
    UnspecifiedParameters,
    TemplateTypeParameter,
    TemplateValueParameter,
    ObjCProperty,
    ImportedEntity,
}

impl NodeKind {
    /// Classify a node from its tag and slot count.
    ///
    /// Returns `None` only for a lexical-block tag on a node too short to be
    /// either block form.
    pub fn classify(tag: Tag, num_slots: usize) -> Option<NodeKind> {
        let kind = match tag {
            Tag::BaseType | Tag::UnspecifiedType => NodeKind::BasicType,
            Tag::Typedef
            | Tag::PointerType
            | Tag::PtrToMemberType
            | Tag::ReferenceType
            | Tag::RvalueReferenceType
            | Tag::ConstType
            | Tag::VolatileType
            | Tag::RestrictType
            | Tag::Member
            | Tag::Inheritance
            | Tag::Friend => NodeKind::DerivedType,
            Tag::ArrayType
            | Tag::EnumerationType
            | Tag::StructureType
            | Tag::UnionType
            | Tag::SubroutineType
            | Tag::ClassType => NodeKind::CompositeType,
            Tag::CompileUnit => NodeKind::CompileUnit,
            Tag::FileType => NodeKind::File,
            Tag::Subprogram => NodeKind::Subprogram,
            Tag::LexicalBlock => match num_slots {
                3 => NodeKind::LexicalBlockFile,
                n if n > 3 => NodeKind::LexicalBlock,
                _ => return None,
            },
            Tag::Namespace => NodeKind::NameSpace,
            Tag::Variable => NodeKind::GlobalVariable,
            Tag::AutoVariable | Tag::ArgVariable => NodeKind::Variable,
            Tag::SubrangeType => NodeKind::Subrange,
            Tag::Enumerator => NodeKind::Enumerator,
            Tag::UnspecifiedParameters => NodeKind::UnspecifiedParameters,
            Tag::TemplateTypeParameter => NodeKind::TemplateTypeParameter,
            Tag::TemplateValueParameter => NodeKind::TemplateValueParameter,
            Tag::AppleProperty => NodeKind::ObjCProperty,
            Tag::ImportedModule | Tag::ImportedDeclaration => NodeKind::ImportedEntity,
        };
        Some(kind)
    }

    /// Basic, derived or composite type.
    #[inline]
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            NodeKind::BasicType | NodeKind::DerivedType | NodeKind::CompositeType
        )
    }

    /// Anything that can be the context of another node.
    #[inline]
    pub const fn is_scope(self) -> bool {
        self.is_type()
            || matches!(
                self,
                NodeKind::CompileUnit
                    | NodeKind::File
                    | NodeKind::Subprogram
                    | NodeKind::LexicalBlock
                    | NodeKind::LexicalBlockFile
                    | NodeKind::NameSpace
            )
    }

    /// Either lexical block form.
    #[inline]
    pub const fn is_lexical(self) -> bool {
        matches!(self, NodeKind::LexicalBlock | NodeKind::LexicalBlockFile)
    }

    /// Human-readable kind name.
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::BasicType => "basic type",
            NodeKind::DerivedType => "derived type",
            NodeKind::CompositeType => "composite type",
            NodeKind::CompileUnit => "compile unit",
            NodeKind::File => "file",
            NodeKind::Subprogram => "subprogram",
            NodeKind::LexicalBlock => "lexical block",
            NodeKind::LexicalBlockFile => "lexical block file",
            NodeKind::NameSpace => "namespace",
            NodeKind::GlobalVariable => "global variable",
            NodeKind::Variable => "variable",
            NodeKind::Subrange => "subrange",
            NodeKind::Enumerator => "enumerator",
            NodeKind::UnspecifiedParameters => "unspecified parameters",
            NodeKind::TemplateTypeParameter => "template type parameter",
            NodeKind::TemplateValueParameter => "template value parameter",
            NodeKind::ObjCProperty => "objc property",
            NodeKind::ImportedEntity => "imported entity",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;

//! DWARF tags and the versioned tag word.
//!
//! Slot 0 of every tagged node holds a tag word: the DWARF tag in the low 16
//! bits, [`VERSION_WORD`] in the high bits. Nodes without a tag word
//! (locations, arrays, file pairs) start with some other slot and classify as
//! untagged.
//!
//! # Tag Ranges
//!
//! - `0x01..=0x43`: standard DWARF tags
//! - `0x100..=0x101`: local variable tags (auto / argument)
//! - `0x4200`: Objective-C property

use std::fmt;

/// Debug-metadata format version carried in the high bits of every tag word.
pub const VERSION_WORD: u64 = 12 << 16;

/// Mask selecting the version bits of a tag word.
pub const VERSION_MASK: u64 = 0xffff_0000;

/// Node kind discriminant (the DWARF tag).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u16)]
pub enum Tag {
    // === Composite types ===
    /// `T[N]`.
    ArrayType = 0x01,
    /// C++ class.
    ClassType = 0x02,
    /// Enumeration.
    EnumerationType = 0x04,
    /// C struct / C++ struct.
    StructureType = 0x13,
    /// Function signature (return type then parameter types).
    SubroutineType = 0x15,
    /// Union.
    UnionType = 0x17,

    // === Derived types ===
    /// `T*`.
    PointerType = 0x0f,
    /// `T&`.
    ReferenceType = 0x10,
    /// Named alias.
    Typedef = 0x16,
    /// Base class of a class.
    Inheritance = 0x1c,
    /// `T C::*`.
    PtrToMemberType = 0x1f,
    /// `const T`.
    ConstType = 0x26,
    /// Friend declaration.
    Friend = 0x2a,
    /// `volatile T`.
    VolatileType = 0x35,
    /// `restrict T`.
    RestrictType = 0x37,
    /// `T&&`.
    RvalueReferenceType = 0x42,
    /// Data member of a composite.
    Member = 0x0d,

    // === Basic types ===
    /// Scalar with an encoding (`int`, `float`, ...).
    BaseType = 0x24,
    /// Opaque type (`decltype(nullptr)`).
    UnspecifiedType = 0x3b,

    // === Scopes ===
    /// Translation unit.
    CompileUnit = 0x11,
    /// Lexical block (and lexical block with file change).
    LexicalBlock = 0x0b,
    /// Function.
    Subprogram = 0x2e,
    /// Source file.
    FileType = 0x29,
    /// C++ namespace.
    Namespace = 0x39,

    // === Other ===
    /// Imported declaration (`using ns::f;`).
    ImportedDeclaration = 0x08,
    /// Imported module (`using namespace ns;`).
    ImportedModule = 0x3a,
    /// Variadic marker in a signature.
    UnspecifiedParameters = 0x18,
    /// Array bound.
    SubrangeType = 0x21,
    /// Enumeration constant.
    Enumerator = 0x28,
    /// Template type parameter.
    TemplateTypeParameter = 0x2f,
    /// Template value parameter.
    TemplateValueParameter = 0x30,
    /// Global variable.
    Variable = 0x34,
    /// Local variable.
    AutoVariable = 0x100,
    /// Function argument.
    ArgVariable = 0x101,
    /// Objective-C property.
    AppleProperty = 0x4200,
}

impl Tag {
    /// Every tag, in declaration order.
    pub const ALL: [Tag; 35] = [
        Tag::ArrayType,
        Tag::ClassType,
        Tag::EnumerationType,
        Tag::StructureType,
        Tag::SubroutineType,
        Tag::UnionType,
        Tag::PointerType,
        Tag::ReferenceType,
        Tag::Typedef,
        Tag::Inheritance,
        Tag::PtrToMemberType,
        Tag::ConstType,
        Tag::Friend,
        Tag::VolatileType,
        Tag::RestrictType,
        Tag::RvalueReferenceType,
        Tag::Member,
        Tag::BaseType,
        Tag::UnspecifiedType,
        Tag::CompileUnit,
        Tag::LexicalBlock,
        Tag::Subprogram,
        Tag::FileType,
        Tag::Namespace,
        Tag::ImportedDeclaration,
        Tag::ImportedModule,
        Tag::UnspecifiedParameters,
        Tag::SubrangeType,
        Tag::Enumerator,
        Tag::TemplateTypeParameter,
        Tag::TemplateValueParameter,
        Tag::Variable,
        Tag::AutoVariable,
        Tag::ArgVariable,
        Tag::AppleProperty,
    ];

    /// Decode a raw DWARF tag. Unknown values yield `None`.
    pub fn from_raw(raw: u16) -> Option<Tag> {
        Self::ALL.into_iter().find(|tag| *tag as u16 == raw)
    }

    /// Decode a tag word (slot 0 of a tagged node).
    ///
    /// Returns `None` unless the version bits match [`VERSION_WORD`] and the
    /// low bits name a known tag.
    pub fn from_word(word: u64) -> Option<Tag> {
        if word & VERSION_MASK != VERSION_WORD {
            return None;
        }
        u16::try_from(word & !VERSION_MASK)
            .ok()
            .and_then(Tag::from_raw)
    }

    /// Encode this tag as a tag word.
    #[inline]
    pub const fn word(self) -> u64 {
        self as u64 | VERSION_WORD
    }

    /// Raw DWARF value.
    #[inline]
    pub const fn raw(self) -> u16 {
        self as u16
    }

    /// DWARF spelling of this tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ArrayType => "DW_TAG_array_type",
            Self::ClassType => "DW_TAG_class_type",
            Self::EnumerationType => "DW_TAG_enumeration_type",
            Self::StructureType => "DW_TAG_structure_type",
            Self::SubroutineType => "DW_TAG_subroutine_type",
            Self::UnionType => "DW_TAG_union_type",
            Self::PointerType => "DW_TAG_pointer_type",
            Self::ReferenceType => "DW_TAG_reference_type",
            Self::Typedef => "DW_TAG_typedef",
            Self::Inheritance => "DW_TAG_inheritance",
            Self::PtrToMemberType => "DW_TAG_ptr_to_member_type",
            Self::ConstType => "DW_TAG_const_type",
            Self::Friend => "DW_TAG_friend",
            Self::VolatileType => "DW_TAG_volatile_type",
            Self::RestrictType => "DW_TAG_restrict_type",
            Self::RvalueReferenceType => "DW_TAG_rvalue_reference_type",
            Self::Member => "DW_TAG_member",
            Self::BaseType => "DW_TAG_base_type",
            Self::UnspecifiedType => "DW_TAG_unspecified_type",
            Self::CompileUnit => "DW_TAG_compile_unit",
            Self::LexicalBlock => "DW_TAG_lexical_block",
            Self::Subprogram => "DW_TAG_subprogram",
            Self::FileType => "DW_TAG_file_type",
            Self::Namespace => "DW_TAG_namespace",
            Self::ImportedDeclaration => "DW_TAG_imported_declaration",
            Self::ImportedModule => "DW_TAG_imported_module",
            Self::UnspecifiedParameters => "DW_TAG_unspecified_parameters",
            Self::SubrangeType => "DW_TAG_subrange_type",
            Self::Enumerator => "DW_TAG_enumerator",
            Self::TemplateTypeParameter => "DW_TAG_template_type_parameter",
            Self::TemplateValueParameter => "DW_TAG_template_value_parameter",
            Self::Variable => "DW_TAG_variable",
            Self::AutoVariable => "DW_TAG_auto_variable",
            Self::ArgVariable => "DW_TAG_arg_variable",
            Self::AppleProperty => "DW_TAG_APPLE_property",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Tag must stay a 2-byte discriminant.
const _: () = assert!(std::mem::size_of::<Tag>() == 2);

#[cfg(test)]
mod tests;

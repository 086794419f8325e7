//! Human-readable descriptor printing.
//!
//! Output is one line: the tag in brackets followed by kind-specific fields,
//! each in its own bracket pair:
//!
//! ```text
//! [ DW_TAG_base_type ] [int] [line 0, size 32, align 32, offset 0, enc DW_ATE_signed]
//! [ DW_TAG_pointer_type ] [line 0, size 64, align 64, offset 0] [from int]
//! [ DW_TAG_subprogram ] [line 3] [def] [main]
//! ```

use std::fmt;

use dim_ir::Tag;

use crate::elements::{
    DiArray, DiEnumerator, DiImportedEntity, DiObjCProperty, DiSubrange, DiTemplateTypeParameter,
    DiTemplateValueParameter,
};
use crate::kind::NodeKind;
use crate::node::{AnnotatedNode, DescriptorView};
use crate::scope::{
    DiCompileUnit, DiFile, DiLexicalBlock, DiLexicalBlockFile, DiNameSpace, DiScope, DiSubprogram,
    ScopeLike,
};
use crate::types::{DiBasicType, DiCompositeType, DiDerivedType, DiType, TypeLike};
use crate::variable::{DiGlobalVariable, DiLocation, DiVariable};

/// `DW_LANG_*` name of a source language code.
pub fn language_name(code: u32) -> Option<&'static str> {
    let name = match code {
        0x01 => "DW_LANG_C89",
        0x02 => "DW_LANG_C",
        0x03 => "DW_LANG_Ada83",
        0x04 => "DW_LANG_C_plus_plus",
        0x05 => "DW_LANG_Cobol74",
        0x06 => "DW_LANG_Cobol85",
        0x07 => "DW_LANG_Fortran77",
        0x08 => "DW_LANG_Fortran90",
        0x09 => "DW_LANG_Pascal83",
        0x0a => "DW_LANG_Modula2",
        0x0b => "DW_LANG_Java",
        0x0c => "DW_LANG_C99",
        0x0d => "DW_LANG_Ada95",
        0x0e => "DW_LANG_Fortran95",
        0x0f => "DW_LANG_PLI",
        0x10 => "DW_LANG_ObjC",
        0x11 => "DW_LANG_ObjC_plus_plus",
        0x12 => "DW_LANG_UPC",
        0x13 => "DW_LANG_D",
        0x14 => "DW_LANG_Python",
        _ => return None,
    };
    Some(name)
}

/// `DW_ATE_*` name of a base type encoding.
pub fn encoding_name(code: u32) -> Option<&'static str> {
    let name = match code {
        0x01 => "DW_ATE_address",
        0x02 => "DW_ATE_boolean",
        0x03 => "DW_ATE_complex_float",
        0x04 => "DW_ATE_float",
        0x05 => "DW_ATE_signed",
        0x06 => "DW_ATE_signed_char",
        0x07 => "DW_ATE_unsigned",
        0x08 => "DW_ATE_unsigned_char",
        0x09 => "DW_ATE_imaginary_float",
        0x0a => "DW_ATE_packed_decimal",
        0x0b => "DW_ATE_numeric_string",
        0x0c => "DW_ATE_edited",
        0x0d => "DW_ATE_signed_fixed",
        0x0e => "DW_ATE_unsigned_fixed",
        0x0f => "DW_ATE_decimal_float",
        0x10 => "DW_ATE_UTF",
        _ => return None,
    };
    Some(name)
}

/// ` [name]`, skipped when empty.
fn bracket_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if name.is_empty() {
        Ok(())
    } else {
        write!(f, " [{name}]")
    }
}

fn print_scope(f: &mut fmt::Formatter<'_>, scope: DiScope<'_>) -> fmt::Result {
    write!(f, " [{}/{}]", scope.directory(), scope.filename())
}

fn print_type(f: &mut fmt::Formatter<'_>, ty: DiType<'_>) -> fmt::Result {
    bracket_name(f, ty.name())?;
    write!(
        f,
        " [line {}, size {}, align {}, offset {}",
        ty.line(),
        ty.size_in_bits(),
        ty.align_in_bits(),
        ty.offset_in_bits()
    )?;
    if ty.node().is_basic_type() {
        if let Some(encoding) = encoding_name(DiBasicType::wrap(ty.node()).encoding()) {
            write!(f, ", enc {encoding}")?;
        }
    }
    f.write_str("]")?;

    if ty.is_private() {
        f.write_str(" [private]")?;
    } else if ty.is_protected() {
        f.write_str(" [protected]")?;
    }
    if ty.is_artificial() {
        f.write_str(" [artificial]")?;
    }
    if ty.is_forward_decl() {
        f.write_str(" [decl]")?;
    } else if matches!(
        ty.node().tag(),
        Some(Tag::StructureType | Tag::UnionType | Tag::EnumerationType | Tag::ClassType)
    ) {
        f.write_str(" [def]")?;
    }
    if ty.is_vector() {
        f.write_str(" [vector]")?;
    }
    if ty.is_static_member() {
        f.write_str(" [static]")?;
    }
    Ok(())
}

fn print_subprogram(f: &mut fmt::Formatter<'_>, sp: DiSubprogram<'_>) -> fmt::Result {
    write!(f, " [line {}]", sp.line())?;
    if sp.is_local_to_unit() {
        f.write_str(" [local]")?;
    }
    if sp.is_definition() {
        f.write_str(" [def]")?;
    }
    if sp.scope_line() != sp.line() {
        write!(f, " [scope {}]", sp.scope_line())?;
    }
    if sp.is_private() {
        f.write_str(" [private]")?;
    } else if sp.is_protected() {
        f.write_str(" [protected]")?;
    }
    bracket_name(f, sp.name())
}

impl fmt::Display for AnnotatedNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = *self;
        if node.is_null() {
            return Ok(());
        }
        let Some(tag) = node.tag() else {
            if node.is_location() {
                let loc = DiLocation::wrap(node);
                return write!(
                    f,
                    "[ location ] [{}:{}:{}]",
                    loc.filename(),
                    loc.line(),
                    loc.column()
                );
            }
            return write!(f, "[ array ] [{} elements]", DiArray::wrap(node).len());
        };
        write!(f, "[ {tag} ]")?;

        match node.kind() {
            Some(NodeKind::Subrange) => {
                let range = DiSubrange::wrap(node);
                if range.count() == -1 {
                    f.write_str(" [unbounded]")
                } else {
                    write!(f, " [{}, {}]", range.lo(), range.count() - 1)
                }
            }
            Some(NodeKind::CompileUnit) => {
                let cu = DiCompileUnit::wrap(node);
                print_scope(f, cu.as_scope())?;
                match language_name(cu.language()) {
                    Some(language) => write!(f, " [{language}]"),
                    None => write!(f, " [lang {:#x}]", cu.language()),
                }
            }
            Some(NodeKind::File) => print_scope(f, DiScope::wrap(node)),
            Some(NodeKind::Enumerator) => {
                let enumerator = DiEnumerator::wrap(node);
                write!(f, " [{} :: {}]", enumerator.name(), enumerator.value())
            }
            Some(NodeKind::BasicType) => print_type(f, DiType::wrap(node)),
            Some(NodeKind::DerivedType) => {
                print_type(f, DiType::wrap(node))?;
                write!(f, " [from {}]", DiDerivedType::wrap(node).derived_from().name())
            }
            Some(NodeKind::CompositeType) => {
                print_type(f, DiType::wrap(node))?;
                write!(
                    f,
                    " [{} elements]",
                    DiCompositeType::wrap(node).type_array().len()
                )
            }
            Some(NodeKind::Subprogram) => print_subprogram(f, DiSubprogram::wrap(node)),
            Some(NodeKind::GlobalVariable) => {
                let global = DiGlobalVariable::wrap(node);
                bracket_name(f, global.name())?;
                write!(f, " [line {}]", global.line())?;
                if global.is_local_to_unit() {
                    f.write_str(" [local]")?;
                }
                if global.is_definition() {
                    f.write_str(" [def]")?;
                }
                Ok(())
            }
            Some(NodeKind::Variable) => {
                let variable = DiVariable::wrap(node);
                bracket_name(f, variable.name())?;
                write!(f, " [line {}]", variable.line())
            }
            Some(NodeKind::ObjCProperty) => {
                let property = DiObjCProperty::wrap(node);
                bracket_name(f, property.name())?;
                write!(
                    f,
                    " [line {}, properties {}]",
                    property.line(),
                    property.attributes().bits()
                )
            }
            Some(NodeKind::NameSpace) => {
                let namespace = DiNameSpace::wrap(node);
                bracket_name(f, namespace.name())?;
                write!(f, " [line {}]", namespace.line())
            }
            Some(NodeKind::LexicalBlock | NodeKind::LexicalBlockFile) => {
                print_scope(f, DiScope::wrap(node))
            }
            _ => Ok(()),
        }
    }
}

/// Views print like the node they wrap.
macro_rules! display_via_node {
    ($($view:ident),* $(,)?) => {
        $(
            impl fmt::Display for $view<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.node(), f)
                }
            }
        )*
    };
}

display_via_node!(
    DiScope,
    DiFile,
    DiCompileUnit,
    DiSubprogram,
    DiLexicalBlock,
    DiLexicalBlockFile,
    DiNameSpace,
    DiType,
    DiBasicType,
    DiDerivedType,
    DiCompositeType,
    DiGlobalVariable,
    DiVariable,
    DiLocation,
    DiArray,
    DiSubrange,
    DiEnumerator,
    DiTemplateTypeParameter,
    DiTemplateValueParameter,
    DiObjCProperty,
    DiImportedEntity,
);

//! Shape checks for descriptors.
//!
//! `verify()` checks one node in isolation: its kind, its slot count and the
//! shape of reference slots that can be judged locally. It never follows a
//! reference, so a verified node may still point at malformed nodes.
//!
//! # Reference slot shapes
//!
//! | Check | Accepts |
//! |-------|---------|
//! | node | anything but a non-empty string |
//! | string | null or a string |
//! | scope ref | null, a non-empty identifier, or a scope node |
//! | type ref | null, a non-empty identifier, or a type node |

use dim_ir::{Slot, Tag};

use crate::elements::{
    DiEnumerator, DiImportedEntity, DiObjCProperty, DiSubrange, DiTemplateTypeParameter,
    DiTemplateValueParameter,
};
use crate::kind::NodeKind;
use crate::node::{AnnotatedNode, DescriptorView};
use crate::scope::{
    DiCompileUnit, DiFile, DiLexicalBlock, DiLexicalBlockFile, DiNameSpace, DiSubprogram,
    ScopeLike,
};
use crate::types::{DiBasicType, DiCompositeType, DiDerivedType, DiType};
use crate::variable::{DiGlobalVariable, DiLocation, DiVariable};

/// Tags of types that may omit a file name.
const FILELESS_TYPE_TAGS: [Tag; 12] = [
    Tag::ConstType,
    Tag::VolatileType,
    Tag::PointerType,
    Tag::PtrToMemberType,
    Tag::ReferenceType,
    Tag::RvalueReferenceType,
    Tag::RestrictType,
    Tag::ArrayType,
    Tag::EnumerationType,
    Tag::SubroutineType,
    Tag::Inheritance,
    Tag::Friend,
];

fn field_is_node(node: AnnotatedNode<'_>, index: usize) -> bool {
    match node.slot(index) {
        Slot::Str(name) => name.is_empty(),
        _ => true,
    }
}

fn field_is_string(node: AnnotatedNode<'_>, index: usize) -> bool {
    matches!(node.slot(index), Slot::Null | Slot::Str(_))
}

fn field_is_ref(node: AnnotatedNode<'_>, index: usize, accept: fn(NodeKind) -> bool) -> bool {
    match node.slot(index) {
        Slot::Null => true,
        Slot::Str(name) => !name.is_empty(),
        Slot::Node(id) => AnnotatedNode::new(node.graph(), id)
            .kind()
            .is_some_and(accept),
        Slot::UInt(_) | Slot::Int(_) => false,
    }
}

fn field_is_scope_ref(node: AnnotatedNode<'_>, index: usize) -> bool {
    field_is_ref(node, index, NodeKind::is_scope)
}

fn field_is_type_ref(node: AnnotatedNode<'_>, index: usize) -> bool {
    field_is_ref(node, index, NodeKind::is_type)
}

impl AnnotatedNode<'_> {
    /// Shape check for whatever kind this node is.
    ///
    /// Untagged four-slot nodes are checked as locations.
    pub fn verify(self) -> bool {
        let Some(kind) = self.kind() else {
            return self.is_location() && DiLocation::wrap(self).verify();
        };
        match kind {
            NodeKind::BasicType | NodeKind::DerivedType | NodeKind::CompositeType => {
                DiType::wrap(self).verify()
            }
            NodeKind::CompileUnit => DiCompileUnit::wrap(self).verify(),
            NodeKind::File => DiFile::wrap(self).verify(),
            NodeKind::Subprogram => DiSubprogram::wrap(self).verify(),
            NodeKind::LexicalBlock => DiLexicalBlock::wrap(self).verify(),
            NodeKind::LexicalBlockFile => DiLexicalBlockFile::wrap(self).verify(),
            NodeKind::NameSpace => DiNameSpace::wrap(self).verify(),
            NodeKind::GlobalVariable => DiGlobalVariable::wrap(self).verify(),
            NodeKind::Variable => DiVariable::wrap(self).verify(),
            NodeKind::Subrange => DiSubrange::wrap(self).verify(),
            NodeKind::Enumerator => DiEnumerator::wrap(self).verify(),
            NodeKind::TemplateTypeParameter => DiTemplateTypeParameter::wrap(self).verify(),
            NodeKind::TemplateValueParameter => DiTemplateValueParameter::wrap(self).verify(),
            NodeKind::ObjCProperty => DiObjCProperty::wrap(self).verify(),
            NodeKind::ImportedEntity => DiImportedEntity::wrap(self).verify(),
            NodeKind::UnspecifiedParameters => true,
        }
    }
}

impl DiCompileUnit<'_> {
    /// Producer and directory may be empty; the file name may not.
    pub fn verify(self) -> bool {
        self.is_valid() && !self.filename().is_empty() && self.node().num_slots() == 13
    }
}

impl DiFile<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 2
    }
}

impl DiType<'_> {
    /// Common type checks, then the checks for the concrete type kind.
    pub fn verify(self) -> bool {
        let node = self.node();
        if !self.is_valid() || !field_is_scope_ref(node, 2) {
            return false;
        }
        let needs_file = !node.is_basic_type()
            && node.tag().is_some_and(|tag| !FILELESS_TYPE_TAGS.contains(&tag));
        if needs_file && self.filename().is_empty() {
            return false;
        }
        if node.is_basic_type() {
            DiBasicType::wrap(node).verify()
        } else if node.is_composite_type() {
            DiCompositeType::wrap(node).verify()
        } else {
            DiDerivedType::wrap(node).verify()
        }
    }
}

impl DiBasicType<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 10
    }
}

impl DiDerivedType<'_> {
    pub fn verify(self) -> bool {
        let node = self.node();
        if !field_is_type_ref(node, 9) {
            return false;
        }
        if node.tag() == Some(Tag::PtrToMemberType) && !field_is_type_ref(node, 10) {
            return false;
        }
        self.is_valid() && (10..=14).contains(&node.num_slots())
    }
}

impl DiCompositeType<'_> {
    /// Identifier slot may be null.
    pub fn verify(self) -> bool {
        let node = self.node();
        self.is_valid()
            && field_is_type_ref(node, 9)
            && field_is_type_ref(node, 12)
            && field_is_string(node, 14)
            && node.num_slots() == 15
    }
}

impl DiSubprogram<'_> {
    pub fn verify(self) -> bool {
        let node = self.node();
        self.is_valid()
            && field_is_scope_ref(node, 2)
            && field_is_node(node, 7)
            && field_is_type_ref(node, 12)
            && node.num_slots() == 20
    }
}

impl DiLexicalBlock<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 6
    }
}

impl DiLexicalBlockFile<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 3
    }
}

impl DiNameSpace<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 5
    }
}

impl DiGlobalVariable<'_> {
    pub fn verify(self) -> bool {
        let node = self.node();
        self.is_valid()
            && !self.display_name().is_empty()
            && field_is_node(node, 2)
            && field_is_type_ref(node, 8)
            && field_is_node(node, 12)
            && node.num_slots() == 13
    }
}

impl DiVariable<'_> {
    pub fn verify(self) -> bool {
        let node = self.node();
        self.is_valid()
            && field_is_node(node, 1)
            && field_is_type_ref(node, 5)
            && node.num_slots() >= 8
    }
}

impl DiLocation<'_> {
    pub fn verify(self) -> bool {
        self.is_valid()
    }
}

impl DiSubrange<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 3
    }
}

impl DiEnumerator<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 3
    }
}

impl DiTemplateTypeParameter<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 7
    }
}

impl DiTemplateValueParameter<'_> {
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 8
    }
}

impl DiObjCProperty<'_> {
    /// Only the slot count is checked.
    pub fn verify(self) -> bool {
        self.is_valid() && self.node().num_slots() == 8
    }
}

impl DiImportedEntity<'_> {
    /// The name slot is optional.
    pub fn verify(self) -> bool {
        self.is_valid() && matches!(self.node().num_slots(), 4 | 5)
    }
}

use super::*;

#[test]
fn every_tag_classifies() {
    for tag in Tag::ALL {
        assert!(
            NodeKind::classify(tag, 20).is_some(),
            "{tag} should classify with enough slots"
        );
    }
}

#[test]
fn lexical_block_form_depends_on_slot_count() {
    assert_eq!(
        NodeKind::classify(Tag::LexicalBlock, 6),
        Some(NodeKind::LexicalBlock)
    );
    assert_eq!(
        NodeKind::classify(Tag::LexicalBlock, 3),
        Some(NodeKind::LexicalBlockFile)
    );
    assert_eq!(NodeKind::classify(Tag::LexicalBlock, 2), None);
}

#[test]
fn type_groups() {
    assert_eq!(
        NodeKind::classify(Tag::PointerType, 10),
        Some(NodeKind::DerivedType)
    );
    assert_eq!(
        NodeKind::classify(Tag::Member, 10),
        Some(NodeKind::DerivedType)
    );
    assert_eq!(
        NodeKind::classify(Tag::SubroutineType, 15),
        Some(NodeKind::CompositeType)
    );
    assert_eq!(
        NodeKind::classify(Tag::UnspecifiedType, 10),
        Some(NodeKind::BasicType)
    );
}

#[test]
fn types_are_scopes_but_variables_are_not() {
    assert!(NodeKind::CompositeType.is_scope());
    assert!(NodeKind::BasicType.is_scope());
    assert!(NodeKind::NameSpace.is_scope());
    assert!(NodeKind::LexicalBlockFile.is_scope());
    assert!(!NodeKind::Variable.is_scope());
    assert!(!NodeKind::GlobalVariable.is_scope());
    assert!(!NodeKind::ImportedEntity.is_scope());
    assert!(!NodeKind::Subprogram.is_type());
}

#[test]
fn variable_tags() {
    assert_eq!(
        NodeKind::classify(Tag::AutoVariable, 8),
        Some(NodeKind::Variable)
    );
    assert_eq!(
        NodeKind::classify(Tag::ArgVariable, 8),
        Some(NodeKind::Variable)
    );
    assert_eq!(
        NodeKind::classify(Tag::Variable, 13),
        Some(NodeKind::GlobalVariable)
    );
}

use pretty_assertions::assert_eq;

use super::*;
use crate::construct::{CompositeTypeDesc, DescriptorBuilder, RefDesc};
use crate::config::IdentifierPolicy;
use dim_ir::Tag;

#[test]
fn slot_decoding() {
    let mut b = DescriptorBuilder::new();
    let id = b.composite_type(Tag::StructureType, &CompositeTypeDesc::default());
    let ident = b.intern("_ZTS1S");
    let empty = b.intern("");
    let graph = b.finish().unwrap();

    let direct: TypeRef<'_> = CrossRef::from_slot(&graph, Slot::Node(id));
    assert_eq!(direct.target(), Some(RefTarget::Direct(id)));

    let by_name: TypeRef<'_> = CrossRef::from_slot(&graph, Slot::Str(ident));
    assert_eq!(by_name.target(), Some(RefTarget::ByIdentifier(ident)));
    assert_eq!(by_name.identifier(), Some("_ZTS1S"));

    for slot in [Slot::Null, Slot::Str(empty), Slot::UInt(4)] {
        let r: TypeRef<'_> = CrossRef::from_slot(&graph, slot);
        assert!(r.is_empty(), "{slot:?} should decode as no reference");
    }
}

#[test]
fn empty_resolves_to_null() {
    let graph = DescriptorBuilder::new().finish().unwrap();
    let r: TypeRef<'_> = CrossRef::empty(&graph);
    assert!(r.resolve(&IdentifierMap::new()).is_null());
    assert_eq!(r.name(), "");
}

#[test]
fn direct_resolves_without_the_map() {
    let mut b = DescriptorBuilder::new();
    let id = b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            name: "S",
            ..CompositeTypeDesc::default()
        },
    );
    let graph = b.finish().unwrap();

    let r: TypeRef<'_> = CrossRef::direct(&graph, id);
    assert_eq!(r.resolve(&IdentifierMap::new()).id(), Some(id));
    assert_eq!(r.name(), "S");
}

#[test]
fn identifier_resolves_through_the_map() {
    let mut b = DescriptorBuilder::new();
    let id = b.composite_type(
        Tag::ClassType,
        &CompositeTypeDesc {
            name: "C",
            identifier: "_ZTS1C",
            ..CompositeTypeDesc::default()
        },
    );
    let ident = b.intern("_ZTS1C");
    let graph = b.finish().unwrap();

    let mut map = IdentifierMap::new();
    map.insert(ident, id, IdentifierPolicy::FirstWins);

    let r: TypeRef<'_> = CrossRef::by_identifier(&graph, ident);
    assert_eq!(r.resolve(&map).id(), Some(id));
    assert_eq!(r.name(), "_ZTS1C");
}

#[test]
#[should_panic(expected = "type identifier `_ZTS7Missing` is not in the identifier map")]
fn unresolved_identifier_panics() {
    let mut b = DescriptorBuilder::new();
    b.pointer_type(RefDesc::Identifier("_ZTS7Missing"), 64);
    let ident = b.intern("_ZTS7Missing");
    let graph = b.finish().unwrap();

    let r: TypeRef<'_> = CrossRef::by_identifier(&graph, ident);
    let _ = r.resolve(&IdentifierMap::new());
}

#[test]
fn debug_output() {
    let mut b = DescriptorBuilder::new();
    let ident = b.intern("_ZTS1S");
    let graph = b.finish().unwrap();

    let r: TypeRef<'_> = CrossRef::by_identifier(&graph, ident);
    assert_eq!(format!("{r:?}"), "CrossRef(\"_ZTS1S\")");
    let r: TypeRef<'_> = CrossRef::empty(&graph);
    assert_eq!(format!("{r:?}"), "CrossRef(empty)");
}

use pretty_assertions::assert_eq;

use super::*;
use crate::config::IdentifierPolicy;
use crate::construct::{
    BasicTypeDesc, CompositeTypeDesc, DerivedTypeDesc, DescriptorBuilder, RefDesc,
};
use crate::cross_ref::RefTarget;
use dim_ir::MetadataGraph;

fn int(b: &mut DescriptorBuilder) -> NodeId {
    b.basic_type(&BasicTypeDesc {
        name: "int",
        size: 32,
        align: 32,
        encoding: 0x05,
    })
}

fn view(graph: &MetadataGraph, id: NodeId) -> DiType<'_> {
    DiType::wrap(AnnotatedNode::new(graph, id))
}

#[test]
fn common_fields() {
    let mut b = DescriptorBuilder::new();
    let file = b.file("t.c", "/src");
    let int = int(&mut b);
    let member = b.derived_type(
        Tag::Member,
        &DerivedTypeDesc {
            file: Some(file),
            name: "x",
            line: 4,
            size: 32,
            align: 32,
            offset: 64,
            flags: DebugFlags::PRIVATE | DebugFlags::ARTIFICIAL,
            derived_from: RefDesc::Node(int),
            ..DerivedTypeDesc::default()
        },
    );
    let graph = b.finish().unwrap();

    let ty = view(&graph, member);
    assert_eq!(ty.name(), "x");
    assert_eq!(ty.line(), 4);
    assert_eq!(ty.offset_in_bits(), 64);
    assert_eq!(ty.filename(), "t.c");
    assert!(ty.is_private());
    assert!(!ty.is_protected());
    assert!(ty.is_artificial());

    let derived = DiDerivedType::wrap(ty.node());
    assert_eq!(derived.derived_from().target(), Some(RefTarget::Direct(int)));
}

#[test]
fn pointer_to_member_has_a_class_type() {
    let mut b = DescriptorBuilder::new();
    let int = int(&mut b);
    let class = b.composite_type(
        Tag::ClassType,
        &CompositeTypeDesc {
            name: "C",
            identifier: "_ZTS1C",
            ..CompositeTypeDesc::default()
        },
    );
    let pm = b.derived_type(
        Tag::PtrToMemberType,
        &DerivedTypeDesc {
            derived_from: RefDesc::Node(int),
            extra: Some(Slot::Node(class)),
            ..DerivedTypeDesc::default()
        },
    );
    let ptr = b.pointer_type(RefDesc::Node(int), 64);
    let graph = b.finish().unwrap();

    let pm = DiDerivedType::wrap(AnnotatedNode::new(&graph, pm));
    assert_eq!(pm.class_type().target(), Some(RefTarget::Direct(class)));
    let ptr = DiDerivedType::wrap(AnnotatedNode::new(&graph, ptr));
    assert!(ptr.class_type().is_empty());
}

#[test]
fn static_member_constant() {
    let mut b = DescriptorBuilder::new();
    let int = int(&mut b);
    let member = |b: &mut DescriptorBuilder, flags| {
        b.derived_type(
            Tag::Member,
            &DerivedTypeDesc {
                name: "k",
                flags,
                derived_from: RefDesc::Node(int),
                extra: Some(Slot::Int(42)),
                ..DerivedTypeDesc::default()
            },
        )
    };
    let static_member = member(&mut b, DebugFlags::STATIC_MEMBER);
    let field = member(&mut b, DebugFlags::empty());
    let graph = b.finish().unwrap();

    let static_member = DiDerivedType::wrap(AnnotatedNode::new(&graph, static_member));
    assert!(static_member.is_static_member());
    assert_eq!(static_member.constant(), Slot::Int(42));
    let field = DiDerivedType::wrap(AnnotatedNode::new(&graph, field));
    assert_eq!(field.constant(), Slot::Null);
}

#[test]
fn ivar_property() {
    let mut b = DescriptorBuilder::new();
    let int = int(&mut b);
    let property = b.objc_property("count", None, 3, "count", "setCount:", 0x09, Some(int));
    let ivar = b.derived_type(
        Tag::Member,
        &DerivedTypeDesc {
            name: "_count",
            derived_from: RefDesc::Node(int),
            extra: Some(Slot::Node(property)),
            ..DerivedTypeDesc::default()
        },
    );
    let graph = b.finish().unwrap();

    let property: DiObjCProperty<'_> =
        DiDerivedType::wrap(AnnotatedNode::new(&graph, ivar)).objc_property();
    assert_eq!(property.name(), "count");
    assert!(property.is_read_only());
    assert!(property.is_read_write());
    assert_eq!(property.ty().id(), Some(int));
}

#[test]
fn composite_fields() {
    let mut b = DescriptorBuilder::new();
    let int = int(&mut b);
    let a = b.enumerator("A", 0);
    let e = b.composite_type(
        Tag::EnumerationType,
        &CompositeTypeDesc {
            name: "E",
            size: 32,
            members: &[a],
            runtime_lang: 2,
            containing_type: RefDesc::Node(int),
            identifier: "_ZTS1E",
            ..CompositeTypeDesc::default()
        },
    );
    let graph = b.finish().unwrap();

    let e = DiCompositeType::wrap(AnnotatedNode::new(&graph, e));
    assert_eq!(e.type_array().len(), 1);
    assert_eq!(e.runtime_lang(), 2);
    assert_eq!(e.identifier(), "_ZTS1E");
    assert_eq!(e.identifier_name(), graph.find_str("_ZTS1E"));
    assert_eq!(e.containing_type().target(), Some(RefTarget::Direct(int)));
    assert!(e.as_derived().is_valid());
}

#[test]
fn to_type_ref_prefers_identifiers() {
    let mut b = DescriptorBuilder::new();
    let int = int(&mut b);
    let s = b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            name: "S",
            identifier: "_ZTS1S",
            ..CompositeTypeDesc::default()
        },
    );
    let graph = b.finish().unwrap();

    assert_eq!(view(&graph, s).to_type_ref().identifier(), Some("_ZTS1S"));
    assert_eq!(
        view(&graph, int).to_type_ref().target(),
        Some(RefTarget::Direct(int))
    );
}

#[test]
fn underlying_composite_strips_derived_types() {
    let mut b = DescriptorBuilder::new();
    let s = b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            name: "S",
            identifier: "_ZTS1S",
            ..CompositeTypeDesc::default()
        },
    );
    let by_name = b.pointer_type(RefDesc::Identifier("_ZTS1S"), 64);
    let typedef = b.derived_type(
        Tag::Typedef,
        &DerivedTypeDesc {
            name: "SP",
            derived_from: RefDesc::Node(by_name),
            ..DerivedTypeDesc::default()
        },
    );
    let int = int(&mut b);
    let ident = b.intern("_ZTS1S");
    let graph = b.finish().unwrap();

    let mut map = IdentifierMap::new();
    map.insert(ident, s, IdentifierPolicy::FirstWins);

    assert_eq!(underlying_composite(view(&graph, typedef), &map).id(), Some(s));
    assert_eq!(underlying_composite(view(&graph, s), &map).id(), Some(s));
    assert!(underlying_composite(view(&graph, int), &map).is_null());
}

#[test]
fn underlying_composite_stops_on_a_loop() {
    let mut b = DescriptorBuilder::new();
    let a = b.reserve();
    let c = b.derived_type(
        Tag::Typedef,
        &DerivedTypeDesc {
            name: "c",
            derived_from: RefDesc::Node(a),
            ..DerivedTypeDesc::default()
        },
    );
    let slots = {
        let g = b.graph_mut();
        let name = g.str_slot("a");
        let mut slots = vec![Slot::UInt(Tag::Typedef.word()), Slot::Null, Slot::Null, name];
        slots.extend([0u64, 0, 0, 0, 0].map(Slot::UInt));
        slots.push(Slot::Node(c));
        slots
    };
    b.graph_mut().define(a, slots).unwrap();
    let graph = b.finish().unwrap();

    assert!(underlying_composite(view(&graph, c), &IdentifierMap::new()).is_null());
}

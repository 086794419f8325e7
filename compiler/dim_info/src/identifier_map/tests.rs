use pretty_assertions::assert_eq;

use super::*;
use crate::construct::{CompileUnitDesc, CompositeTypeDesc, DescriptorBuilder};
use dim_ir::Tag;

fn structure(b: &mut DescriptorBuilder, name: &str, identifier: &str) -> NodeId {
    b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            name,
            identifier,
            ..CompositeTypeDesc::default()
        },
    )
}

#[test]
fn registers_retained_composites_with_identifiers() {
    let mut b = DescriptorBuilder::new();
    let named = structure(&mut b, "A", "_ZTS1A");
    let anonymous = structure(&mut b, "B", "");
    let cu = b.compile_unit(&CompileUnitDesc {
        filename: "a.cc",
        retained_types: &[named, anonymous],
        ..CompileUnitDesc::default()
    });
    let graph = b.finish().unwrap();

    let map = IdentifierMap::build(&graph, &[cu]);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(graph.find_str("_ZTS1A").unwrap()), Some(named));
}

#[test]
fn member_lists_are_not_searched() {
    let mut b = DescriptorBuilder::new();
    let inner = structure(&mut b, "Inner", "_ZTS5Inner");
    let outer = b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            name: "Outer",
            members: &[inner],
            identifier: "_ZTS5Outer",
            ..CompositeTypeDesc::default()
        },
    );
    let cu = b.compile_unit(&CompileUnitDesc {
        filename: "o.cc",
        retained_types: &[outer],
        ..CompileUnitDesc::default()
    });
    let graph = b.finish().unwrap();

    let map = IdentifierMap::build(&graph, &[cu]);
    assert!(map.contains(graph.find_str("_ZTS5Outer").unwrap()));
    assert!(!map.contains(graph.find_str("_ZTS5Inner").unwrap()));
}

#[test]
fn duplicate_identifier_policies() {
    let mut b = DescriptorBuilder::new();
    let first = structure(&mut b, "S", "_ZTS1S");
    let second = b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            name: "S",
            size: 64,
            identifier: "_ZTS1S",
            ..CompositeTypeDesc::default()
        },
    );
    let cu1 = b.compile_unit(&CompileUnitDesc {
        filename: "one.cc",
        retained_types: &[first],
        ..CompileUnitDesc::default()
    });
    let cu2 = b.compile_unit(&CompileUnitDesc {
        filename: "two.cc",
        retained_types: &[second],
        ..CompileUnitDesc::default()
    });
    let graph = b.finish().unwrap();
    let ident = graph.find_str("_ZTS1S").unwrap();

    let first_wins = IdentifierMap::build_with(&graph, &[cu1, cu2], IdentifierPolicy::FirstWins);
    assert_eq!(first_wins.get(ident), Some(first));

    let overwrite = IdentifierMap::build_with(&graph, &[cu1, cu2], IdentifierPolicy::Overwrite);
    assert_eq!(overwrite.get(ident), Some(second));
}

#[test]
fn insert_reports_changes() {
    let mut b = DescriptorBuilder::new();
    let a = structure(&mut b, "A", "_ZTS1A");
    let c = structure(&mut b, "C", "_ZTS1C");
    let ident = b.intern("_ZTS1A");

    let mut map = IdentifierMap::new();
    assert!(map.insert(ident, a, IdentifierPolicy::FirstWins));
    assert!(!map.insert(ident, c, IdentifierPolicy::FirstWins));
    assert!(!map.insert(ident, a, IdentifierPolicy::Overwrite));
    assert!(map.insert(ident, c, IdentifierPolicy::Overwrite));
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![(ident, c)]);

    map.clear();
    assert!(map.is_empty());
}

#[test]
fn program_compile_units_feed_the_map() {
    let mut b = DescriptorBuilder::new();
    let s = structure(&mut b, "S", "_ZTS1S");
    let cu = b.compile_unit(&CompileUnitDesc {
        filename: "p.cc",
        retained_types: &[s],
        ..CompileUnitDesc::default()
    });
    let program = Program::new(b.finish().unwrap(), vec![cu]);

    let map = IdentifierMap::from_program(&program, IdentifierPolicy::default());
    assert_eq!(map.len(), 1);
}

use pretty_assertions::assert_eq;

use super::*;
use crate::construct::{CompositeTypeDesc, DescriptorBuilder, RefDesc, SubprogramDesc};
use crate::identifier_map::IdentifierMap;
use dim_ir::{Function, MetadataGraph, Tag};

struct Nested {
    graph: MetadataGraph,
    file: NodeId,
    sp: NodeId,
    ns: NodeId,
    outer: NodeId,
    inner: NodeId,
    block_file: NodeId,
}

/// `namespace n { int f() { { { ... } } } }` with a file switch inside the
/// innermost block.
fn nested() -> Nested {
    let mut b = DescriptorBuilder::new();
    let file = b.file("f.cc", "/src");
    let header = b.file("f.h", "/src");
    let ns = b.namespace(Some(file), Some(file), "n", 1);
    let sp = b.subprogram(&SubprogramDesc {
        file: Some(file),
        context: RefDesc::Node(ns),
        name: "f",
        linkage_name: "_ZN1n1fEv",
        line: 2,
        definition: true,
        scope_line: 3,
        ..SubprogramDesc::default()
    });
    let outer = b.lexical_block(Some(file), sp, 3, 1, 0);
    let inner = b.lexical_block(Some(file), outer, 4, 5, 1);
    let block_file = b.lexical_block_file(Some(header), inner);
    Nested {
        graph: b.finish().unwrap(),
        file,
        sp,
        ns,
        outer,
        inner,
        block_file,
    }
}

#[test]
fn scope_context_chain() {
    let n = nested();
    let map = IdentifierMap::new();
    let scope = |id| DiScope::wrap(AnnotatedNode::new(&n.graph, id));

    assert_eq!(scope(n.block_file).context().resolve(&map), scope(n.outer));
    assert_eq!(scope(n.inner).context().resolve(&map), scope(n.outer));
    assert_eq!(scope(n.outer).context().resolve(&map), scope(n.sp));
    assert_eq!(scope(n.sp).context().resolve(&map), scope(n.ns));
    assert_eq!(scope(n.ns).context().resolve(&map), scope(n.file));
    assert!(scope(n.file).context().is_empty());
}

#[test]
fn names_and_files() {
    let n = nested();
    let scope = |id| DiScope::wrap(AnnotatedNode::new(&n.graph, id));

    assert_eq!(scope(n.sp).name(), "f");
    assert_eq!(scope(n.ns).name(), "n");
    assert_eq!(scope(n.outer).name(), "");
    assert_eq!(scope(n.outer).filename(), "f.cc");
    assert_eq!(scope(n.block_file).filename(), "f.h");
    assert_eq!(scope(n.block_file).directory(), "/src");
}

#[test]
fn lexical_block_file_reads_through_to_its_block() {
    let n = nested();
    let block_file = DiLexicalBlockFile::wrap(AnnotatedNode::new(&n.graph, n.block_file));
    assert!(block_file.is_valid());
    assert_eq!(block_file.scope().id(), Some(n.inner));
    assert_eq!(block_file.line(), 4);
    assert_eq!(block_file.column(), 5);
}

#[test]
fn lexical_block_fields() {
    let n = nested();
    let block = DiLexicalBlock::wrap(AnnotatedNode::new(&n.graph, n.inner));
    assert_eq!(block.context().id(), Some(n.outer));
    assert_eq!((block.line(), block.column(), block.unique_id()), (4, 5, 1));
}

#[test]
fn enclosing_subprogram_climbs_blocks() {
    let n = nested();
    for id in [n.block_file, n.inner, n.outer, n.sp] {
        let sp = enclosing_subprogram(AnnotatedNode::new(&n.graph, id));
        assert_eq!(sp.id(), Some(n.sp), "from {id}");
    }
    assert!(enclosing_subprogram(AnnotatedNode::new(&n.graph, n.ns)).is_null());
}

#[test]
fn subprogram_describes_function() {
    let n = nested();
    let sp = DiSubprogram::wrap(AnnotatedNode::new(&n.graph, n.sp));
    assert!(sp.describes(&Function::new("_ZN1n1fEv", Vec::new())));
    assert!(!sp.describes(&Function::new("f", Vec::new())));
    assert!(sp.is_definition());
    assert_eq!(sp.scope_line(), 3);
}

#[test]
fn attached_function_name_wins() {
    let mut b = DescriptorBuilder::new();
    let sp = b.subprogram(&SubprogramDesc {
        name: "g",
        function: "g.clone",
        ..SubprogramDesc::default()
    });
    let graph = b.finish().unwrap();
    let sp = DiSubprogram::wrap(AnnotatedNode::new(&graph, sp));

    assert!(sp.describes(&Function::new("g.clone", Vec::new())));
    assert!(sp.describes(&Function::new("g", Vec::new())));
    assert!(!sp.describes(&Function::new("h", Vec::new())));
}

#[test]
fn short_subprogram_has_no_variables() {
    let mut b = DescriptorBuilder::new();
    let name = b.graph_mut().str_slot("old");
    let tag = dim_ir::Slot::UInt(Tag::Subprogram.word());
    let short = b.graph_mut().node([
        tag,
        dim_ir::Slot::Null,
        dim_ir::Slot::Null,
        name,
    ]);
    let graph = b.finish().unwrap();
    let sp = DiSubprogram::wrap(AnnotatedNode::new(&graph, short));

    assert_eq!(sp.name(), "old");
    assert!(sp.variables().is_null());
    assert!(!sp.is_optimized());
}

#[test]
fn composites_with_identifiers_are_referenced_by_name() {
    let mut b = DescriptorBuilder::new();
    let named = b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            name: "S",
            identifier: "_ZTS1S",
            ..CompositeTypeDesc::default()
        },
    );
    let anonymous = b.composite_type(Tag::StructureType, &CompositeTypeDesc::default());
    let graph = b.finish().unwrap();

    let named = DiScope::wrap(AnnotatedNode::new(&graph, named)).to_ref();
    assert_eq!(named.identifier(), Some("_ZTS1S"));

    let anonymous_ref = DiScope::wrap(AnnotatedNode::new(&graph, anonymous)).to_ref();
    assert_eq!(anonymous_ref.target(), Some(RefTarget::Direct(anonymous)));

    assert!(DiScope::wrap(AnnotatedNode::null(&graph)).to_ref().is_empty());
}

//! Property-based tests for the finder.
//!
//! Random type chains, optionally closed into a cycle, with random fan-in
//! from a struct's member list. Whatever the shape, every reachable type is
//! recorded exactly once and a second walk adds nothing.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::HashSet;

use dim_info::{
    BasicTypeDesc, CompileUnitDesc, CompositeTypeDesc, DerivedTypeDesc, DescriptorBuilder,
    Finder,
};
use dim_ir::{NodeId, Program, Tag};
use proptest::prelude::*;

/// A typedef chain of `len` nodes. With `cycle`, the last node points back
/// at the first; otherwise it ends in `int`.
struct Chain {
    program: Program,
    nodes: Vec<NodeId>,
    base: Option<NodeId>,
}

fn build_chain(len: usize, cycle: bool, members: &[usize]) -> Chain {
    let mut b = DescriptorBuilder::new();
    let file = b.file("chain.c", "/work");
    let base = (!cycle).then(|| {
        b.basic_type(&BasicTypeDesc {
            name: "int",
            size: 32,
            align: 32,
            encoding: 0x05,
        })
    });
    let nodes: Vec<NodeId> = (0..len).map(|_| b.reserve()).collect();
    for (i, &id) in nodes.iter().enumerate() {
        let next = match nodes.get(i + 1) {
            Some(&next) => Some(next),
            None if cycle => Some(nodes[0]),
            None => base,
        };
        let name = format!("t{i}");
        b.define_derived_type(
            id,
            Tag::Typedef,
            &DerivedTypeDesc {
                file: Some(file),
                name: &name,
                derived_from: next.into(),
                ..DerivedTypeDesc::default()
            },
        )
        .unwrap();
    }

    let member_ids: Vec<NodeId> = members.iter().map(|&i| nodes[i % len]).collect();
    let holder = b.composite_type(
        Tag::StructureType,
        &CompositeTypeDesc {
            file: Some(file),
            name: "holder",
            members: &member_ids,
            ..CompositeTypeDesc::default()
        },
    );
    let cu = b.compile_unit(&CompileUnitDesc {
        filename: "chain.c",
        retained_types: &[holder],
        ..CompileUnitDesc::default()
    });
    Chain {
        program: Program::new(b.finish().unwrap(), vec![cu]),
        nodes,
        base,
    }
}

fn snapshot(finder: &Finder) -> [Vec<NodeId>; 5] {
    [
        finder.compile_units().to_vec(),
        finder.subprograms().to_vec(),
        finder.global_variables().to_vec(),
        finder.types().to_vec(),
        finder.scopes().to_vec(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_reachable_type_is_recorded_once(
        len in 1usize..64,
        cycle in any::<bool>(),
        members in prop::collection::vec(0usize..64, 1..8),
    ) {
        let chain = build_chain(len, cycle, &members);
        let mut finder = Finder::new();
        finder.process_module(&chain.program);

        let types = finder.types();
        let unique: HashSet<_> = types.iter().copied().collect();
        prop_assert_eq!(unique.len(), types.len());

        // The holder, every chain node reachable from the lowest member
        // index (or all of them in a cycle), and the base.
        let first = members.iter().map(|&i| i % len).min().unwrap();
        let reachable = if cycle { len } else { len - first };
        let expected = 1 + reachable + usize::from(chain.base.is_some());
        prop_assert_eq!(types.len(), expected);

        for &id in &chain.nodes[if cycle { 0 } else { first }..] {
            prop_assert!(unique.contains(&id));
        }
    }

    #[test]
    fn second_walk_adds_nothing(
        len in 1usize..32,
        cycle in any::<bool>(),
        members in prop::collection::vec(0usize..32, 1..4),
    ) {
        let chain = build_chain(len, cycle, &members);
        let mut finder = Finder::new();
        finder.process_module(&chain.program);
        let before = snapshot(&finder);

        finder.process_module(&chain.program);
        prop_assert_eq!(snapshot(&finder), before.clone());

        finder.reset();
        finder.process_module(&chain.program);
        prop_assert_eq!(snapshot(&finder), before);
    }
}

#[test]
fn long_chain_does_not_overflow_the_stack() {
    let chain = build_chain(20_000, false, &[0]);
    let mut finder = Finder::new();
    finder.process_module(&chain.program);
    assert_eq!(finder.type_count(), 20_000 + 2);
}

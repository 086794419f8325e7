use super::*;
use crate::{GraphBuilder, Slot};

#[test]
fn instructions_flatten_in_program_order() {
    let mut b = GraphBuilder::new();
    let loc_a = b.node([Slot::UInt(1), Slot::UInt(1)]);
    let loc_b = b.node([Slot::UInt(2), Slot::UInt(1)]);
    let var = b.distinct([Slot::UInt(7)]);
    let graph = b.finish().unwrap();

    let program = Program::new(graph, Vec::new())
        .with_function(Function::new("f", vec![Instruction::at(loc_a)]))
        .with_function(Function::new(
            "g",
            vec![
                Instruction::declare(var, Some(loc_b)),
                Instruction::value(var, 8, None),
            ],
        ));

    let locations: Vec<_> = program.instructions().map(|i| i.location).collect();
    assert_eq!(locations, vec![Some(loc_a), Some(loc_b), None]);
    assert_eq!(program.functions().len(), 2);
    assert!(program.compile_units().is_empty());
}

#[test]
fn intrinsic_variable_is_shared_accessor() {
    let var = NodeId::new(3);
    assert_eq!(
        DebugIntrinsic::Declare {
            variable: Some(var)
        }
        .variable(),
        Some(var)
    );
    assert_eq!(
        DebugIntrinsic::Value {
            variable: None,
            offset: 0
        }
        .variable(),
        None
    );
}

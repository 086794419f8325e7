//! Program representation consumed by debug-info traversal.
//!
//! A `Program` owns the frozen metadata graph, the ordered list of compile
//! unit roots (the `llvm.dbg.cu` analogue) and the functions whose
//! instructions may carry debug attachments. It is deliberately thin: no
//! operands, no control flow, only what a debug-info walk reads.

use crate::{MetadataGraph, NodeId};

/// A debug intrinsic attached to an instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DebugIntrinsic {
    /// Declares the storage of a variable (`dbg.declare`).
    Declare {
        /// Variable descriptor, if the operand is a node.
        variable: Option<NodeId>,
    },
    /// Describes a variable's new value (`dbg.value`).
    Value {
        /// Variable descriptor, if the operand is a node.
        variable: Option<NodeId>,
        /// Byte offset into the variable.
        offset: u64,
    },
}

impl DebugIntrinsic {
    /// The variable operand of either intrinsic.
    pub fn variable(self) -> Option<NodeId> {
        match self {
            DebugIntrinsic::Declare { variable } | DebugIntrinsic::Value { variable, .. } => {
                variable
            }
        }
    }
}

/// One instruction, reduced to its debug attachments.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Instruction {
    /// Debug intrinsic, if this instruction is one.
    pub intrinsic: Option<DebugIntrinsic>,
    /// Attached source location node.
    pub location: Option<NodeId>,
}

impl Instruction {
    /// Plain instruction with only a location.
    pub fn at(location: NodeId) -> Self {
        Self {
            intrinsic: None,
            location: Some(location),
        }
    }

    /// `dbg.declare` of `variable`.
    pub fn declare(variable: NodeId, location: Option<NodeId>) -> Self {
        Self {
            intrinsic: Some(DebugIntrinsic::Declare {
                variable: Some(variable),
            }),
            location,
        }
    }

    /// `dbg.value` of `variable`.
    pub fn value(variable: NodeId, offset: u64, location: Option<NodeId>) -> Self {
        Self {
            intrinsic: Some(DebugIntrinsic::Value {
                variable: Some(variable),
                offset,
            }),
            location,
        }
    }
}

/// A function body.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Function {
    /// Symbol name.
    pub name: String,
    /// Instructions in program order.
    pub instructions: Vec<Instruction>,
}

impl Function {
    /// Create a function with the given body.
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            instructions,
        }
    }
}

/// A whole program snapshot.
#[derive(Clone, Debug)]
pub struct Program {
    graph: MetadataGraph,
    compile_units: Vec<NodeId>,
    functions: Vec<Function>,
}

impl Program {
    /// Create a program over `graph` with the given compile unit roots.
    pub fn new(graph: MetadataGraph, compile_units: Vec<NodeId>) -> Self {
        Self {
            graph,
            compile_units,
            functions: Vec::new(),
        }
    }

    /// Add a function body.
    #[must_use]
    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    /// Add a function body in place.
    pub fn push_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    /// The metadata graph.
    pub fn graph(&self) -> &MetadataGraph {
        &self.graph
    }

    /// Compile unit roots in declaration order.
    pub fn compile_units(&self) -> &[NodeId] {
        &self.compile_units
    }

    /// Function bodies.
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Every instruction of every function, in program order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.functions.iter().flat_map(|f| f.instructions.iter())
    }
}

#[cfg(test)]
mod tests;

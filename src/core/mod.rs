//! Core functionality: the MIR data model ([`Module`]/[`Function`]/
//! [`BasicBlock`]/[`Instruction`]), the [`MIRBuilder`] that's the sole
//! mutator of that model, the [`Graph`]/dominance analyses, and the
//! supporting interning and diagnostics surfaces.

mod builder;
mod context;
mod diagnostics;
mod display;
mod dominance;
mod graph;
mod ir;

// Public API.
pub use self::{
    builder::MIRBuilder,
    context::{intern, resolve, Context, InternedStr, GLOBAL_CONTEXT},
    diagnostics::{diagnostics_color_disable, diagnostics_setup, LocationInfo},
    display::{BasicBlockView, FunctionView, InstructionView, SymRegView, ValueView},
    dominance::{build_dominator_tree, dominators_slow, DominatorMap},
    graph::Graph,
    ir::{
        BasicBlock, BasicBlockId, BinOpKind, Function, FunctionId, Imm, Instruction, Module,
        SymReg, SymRegId, UnOpKind, Value,
    },
};

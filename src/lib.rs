//! `wyrm-mir`: a mid-level IR core.
//!
//! A builder API over a `Module` -> `Function` -> `BasicBlock` ->
//! `Instruction` container hierarchy, plus a dominance analysis
//! (`dominators_slow`, `build_dominator_tree`) over its control-flow graphs.
//!
//! The IR model, builder, and textual dumper live under [`core`] and are
//! re-exported at the crate root.

mod core;
pub use self::core::*;

#[macro_use]
extern crate lazy_static;

/*!

  `MIRBuilder` is the sole mutator of a `Module`: it creates functions,
  basic blocks, global/local symbolic registers, and instructions, and
  tracks an implicit "current basic block" cursor the way this lineage's
  own `OperationBuilder` tracks a `(region, block)` cursor.

*/

use crate::core::context;
use crate::core::ir::{
    BasicBlock, BasicBlockId, BinOpKind, FunctionId, Instruction, Module, SymRegId, UnOpKind, Value,
};

/// Builds a single `Module` by appending functions, basic blocks, and
/// instructions. Holds an exclusive borrow of the `Module`, so the borrow
/// checker -- not a runtime lock -- enforces that only one mutator exists at
/// a time.
pub struct MIRBuilder<'m> {
    module: &'m mut Module,
    cursor: Option<BasicBlockId>,
}

impl<'m> MIRBuilder<'m> {
    pub fn new(module: &'m mut Module) -> MIRBuilder<'m> {
        MIRBuilder {
            module,
            cursor: None,
        }
    }

    pub fn module(&self) -> &Module {
        self.module
    }

    pub fn current_basic_block(&self) -> Option<BasicBlockId> {
        self.cursor
    }

    pub fn set_basic_block(&mut self, bb: BasicBlockId) {
        self.cursor = Some(bb);
    }

    fn current_function_id(&self) -> FunctionId {
        self.cursor
            .expect("no current basic block set")
            .0
    }

    fn current_block_mut(&mut self) -> &mut BasicBlock {
        let bb = self.cursor.expect("no current basic block set");
        self.module.function_mut(bb.0).block_mut(bb)
    }

    // -- functions --------------------------------------------------------

    pub fn create_function(
        &mut self,
        name: impl AsRef<str>,
        params: &[&str],
    ) -> Option<FunctionId> {
        let name = context::intern(name);
        let params = params.iter().map(context::intern).collect::<Vec<_>>();
        let id = self.module.try_push_function(name, params);
        match id {
            Some(id) => {
                tracing::debug!(function = ?id, "created function");
                Some(id)
            }
            None => {
                tracing::debug!("function creation rejected: duplicate name");
                None
            }
        }
    }

    pub fn find_function(&self, name: impl AsRef<str>) -> Option<FunctionId> {
        let name = context::intern(name);
        self.module.find_function(name)
    }

    // -- globals ------------------------------------------------------------

    pub fn create_global_variable(&mut self, name: impl AsRef<str>) -> SymRegId {
        let name = context::intern(name);
        let id = self.module.push_global_variable(name);
        tracing::debug!(global = ?id, "created global variable");
        id
    }

    pub fn find_global_variable(&self, name: impl AsRef<str>) -> Option<SymRegId> {
        let name = context::intern(name);
        self.module.find_global_variable(name)
    }

    // -- basic blocks -------------------------------------------------------

    /// Create a new basic block in `func`. An empty `label` creates an
    /// unlabeled block; a non-empty one must be unique within `func`.
    pub fn create_basic_block(&mut self, func: FunctionId, label: &str) -> BasicBlockId {
        let label = if label.is_empty() {
            None
        } else {
            Some(context::intern(label))
        };
        let f = self.module.function_mut(func);
        if let Some(l) = label {
            assert!(
                f.find_label(l).is_none(),
                "duplicate basic block label {:?} in function",
                label
            );
        }
        let id = f.push_block(func, label);
        tracing::debug!(block = ?id, "created basic block");
        id
    }

    // -- SymReg resolution ----------------------------------------------

    /// Resolve the destination register for an instruction being created in
    /// the current function: reuses an existing named local, or creates a
    /// fresh one (named or anonymous).
    fn resolve_dest(&mut self, name: &str) -> SymRegId {
        let func_id = self.current_function_id();
        if !name.is_empty() {
            let interned = context::intern(name);
            let f = self.module.function_mut(func_id);
            if let Some(existing) = f.find_local(interned) {
                return existing;
            }
            return f.push_local(func_id, Some(interned));
        }
        self.module.function_mut(func_id).push_local(func_id, None)
    }

    fn push(&mut self, inst: Instruction) -> usize {
        tracing::trace!(instruction = ?inst, "appended instruction");
        self.current_block_mut().push_instruction(inst)
    }

    // -- instruction creation -------------------------------------------

    pub fn create_receive_inst(&mut self, name: &str) -> SymRegId {
        let dest = self.resolve_dest(name);
        self.push(Instruction::Receive { dest });
        dest
    }

    pub fn create_goto_inst(&mut self, succ: BasicBlockId) {
        self.push(Instruction::GoTo { succ });
    }

    pub fn create_br_inst(&mut self, cond: Value, true_succ: BasicBlockId, false_succ: BasicBlockId) {
        self.push(Instruction::Br {
            cond,
            true_succ,
            false_succ,
        });
    }

    pub fn create_ret_inst(&mut self, val: Value) {
        self.push(Instruction::Ret { val });
    }

    pub fn create_call_inst(
        &mut self,
        has_return: bool,
        callee: FunctionId,
        args: Vec<Value>,
        name: &str,
    ) -> Option<SymRegId> {
        let dest = if has_return {
            Some(self.resolve_dest(name))
        } else {
            None
        };
        self.push(Instruction::Call {
            dest,
            callee,
            args,
        });
        dest
    }

    pub fn create_unop_inst(&mut self, kind: UnOpKind, operand: Value, name: &str) -> SymRegId {
        let dest = self.resolve_dest(name);
        self.push(Instruction::UnOp {
            dest,
            kind,
            operand,
        });
        dest
    }

    pub fn create_binop_inst(
        &mut self,
        kind: BinOpKind,
        op1: Value,
        op2: Value,
        name: &str,
    ) -> SymRegId {
        let dest = self.resolve_dest(name);
        self.push(Instruction::BinOp {
            dest,
            kind,
            op1,
            op2,
        });
        dest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ir::Module;

    #[test]
    fn create_function_rejects_duplicate_names() {
        let mut module = Module::new("test_mod_builder_dup_fn");
        let mut b = MIRBuilder::new(&mut module);
        assert!(b.create_function("f", &[]).is_some());
        assert!(b.create_function("f", &[]).is_none());
    }

    #[test]
    fn global_variable_name_collision_is_auto_suffixed() {
        let mut module = Module::new("test_mod_builder_global");
        let mut b = MIRBuilder::new(&mut module);
        let g1 = b.create_global_variable("var");
        let g2 = b.create_global_variable("var");
        assert_ne!(g1, g2);
        assert_eq!(module.global(g1).name.map(context::resolve).unwrap(), "var");
        assert_eq!(module.global(g2).name.map(context::resolve).unwrap(), "var.1");
    }

    #[test]
    #[should_panic]
    fn duplicate_label_panics() {
        let mut module = Module::new("test_mod_builder_label");
        let mut b = MIRBuilder::new(&mut module);
        let f = b.create_function("f", &[]).unwrap();
        b.create_basic_block(f, "entry");
        b.create_basic_block(f, "entry");
    }

    #[test]
    #[should_panic]
    fn instruction_without_current_block_panics() {
        let mut module = Module::new("test_mod_builder_no_cursor");
        let mut b = MIRBuilder::new(&mut module);
        b.create_function("f", &[]).unwrap();
        b.create_receive_inst("");
    }

    #[test]
    fn named_local_reuse_within_function() {
        let mut module = Module::new("test_mod_builder_reuse");
        let mut b = MIRBuilder::new(&mut module);
        let f = b.create_function("f", &[]).unwrap();
        let bb = b.create_basic_block(f, "");
        b.set_basic_block(bb);
        let a = b.create_unop_inst(UnOpKind::Assign, Value::Imm(1), "x");
        let c = b.create_unop_inst(UnOpKind::Assign, Value::Imm(2), "x");
        assert_eq!(a, c);
    }

    #[test]
    fn find_function_and_global_miss_return_none() {
        let mut module = Module::new("test_mod_builder_find_miss");
        let mut b = MIRBuilder::new(&mut module);
        assert!(b.find_function("nope").is_none());
        assert!(b.find_global_variable("nope").is_none());
        b.create_function("present", &[]).unwrap();
        assert!(b.find_function("present").is_some());
    }

    #[test]
    fn cursor_starts_unset_and_tracks_set_basic_block() {
        let mut module = Module::new("test_mod_builder_cursor");
        let mut b = MIRBuilder::new(&mut module);
        assert!(b.current_basic_block().is_none());
        let f = b.create_function("f", &[]).unwrap();
        let bb = b.create_basic_block(f, "");
        b.set_basic_block(bb);
        assert_eq!(b.current_basic_block(), Some(bb));
    }

    #[test]
    fn call_without_return_has_no_out_register() {
        let mut module = Module::new("test_mod_builder_call_voidlike");
        let mut b = MIRBuilder::new(&mut module);
        let callee = b.create_function("callee", &[]).unwrap();
        let caller = b.create_function("caller", &[]).unwrap();
        let bb = b.create_basic_block(caller, "");
        b.set_basic_block(bb);
        let dest = b.create_call_inst(false, callee, vec![], "");
        assert!(dest.is_none());
    }
}

/*!

  The textual dump. This is a byte-exact external contract (tests assert
  exact string equality), so unlike this lineage's own `core::display`
  (which layers `yansi` color onto its `Display` impls), nothing here emits
  ANSI escapes -- only `indenter` for structural indentation, matching the
  plain half of what the teacher already does.

  Arena entities (`SymRegId`, `BasicBlockId`, `Value`, `Instruction`) carry
  no owning pointer, so rendering them needs the owning `Module`/`Function`
  at hand. Rather than thread that context through a free function at every
  call site, small `*View` wrappers (`SymRegView`, `ValueView`,
  `InstructionView`, `BasicBlockView`, `FunctionView`) pair an entity with its
  owner and implement `Display` themselves -- the `Display` impls the
  external interface calls for, just parametrized by the borrow that makes
  them renderable.

*/

use crate::core::context;
use crate::core::ir::{
    BasicBlockId, BinOpKind, Function, FunctionId, Instruction, Module, SymRegId, UnOpKind, Value,
};
use std::fmt;
use {indenter::indented, std::fmt::Write as _};

fn render_symreg(module: &Module, func: &Function, id: SymRegId) -> String {
    match id {
        SymRegId::Global(_) => {
            let g = module.global(id);
            format!("%{}", context::resolve(g.name.expect("globals are always named")))
        }
        SymRegId::Local(_, _) => {
            let l = func.local(id);
            match l.name {
                Some(n) => format!("%{}", context::resolve(n)),
                None => format!("%{}", func.unnamed_local_number(id)),
            }
        }
    }
}

fn render_value(module: &Module, func: &Function, v: Value) -> String {
    match v {
        Value::Imm(i) => i.to_string(),
        Value::Reg(r) => render_symreg(module, func, r),
    }
}

fn render_block_header(module: &Module, func: &Function, id: BasicBlockId) -> String {
    let bb = func.block(id);
    match bb.label {
        Some(name) => context::resolve(name),
        None => format!("BB{}", func.unlabeled_block_number(id)),
    }
}

impl BinOpKind {
    fn mnemonic(&self) -> &'static str {
        match self {
            BinOpKind::Add => "add",
            BinOpKind::Sub => "sub",
            BinOpKind::Mul => "mul",
            BinOpKind::Div => "div",
            BinOpKind::Mod => "mod",
            BinOpKind::Min => "min",
            BinOpKind::Max => "max",
            BinOpKind::Shl => "shl",
            BinOpKind::Shr => "shr",
            BinOpKind::Shra => "shra",
            BinOpKind::And => "and",
            BinOpKind::Or => "or",
            BinOpKind::Xor => "xor",
            BinOpKind::Eq => "cmp eq",
            BinOpKind::Neq => "cmp neq",
            BinOpKind::Less => "cmp lt",
            BinOpKind::Leq => "cmp leq",
            BinOpKind::Greater => "cmp gt",
            BinOpKind::Geq => "cmp ge",
        }
    }
}

fn write_instruction(
    f: &mut impl fmt::Write,
    module: &Module,
    func: &Function,
    inst: &Instruction,
) -> fmt::Result {
    match inst {
        Instruction::Receive { dest } => {
            write!(f, "{} = receive", render_symreg(module, func, *dest))
        }
        Instruction::GoTo { succ } => {
            write!(f, "goto {}", render_block_header(module, func, *succ))
        }
        Instruction::Br {
            cond,
            true_succ,
            false_succ,
        } => write!(
            f,
            "br {}, {}, {}",
            render_value(module, func, *cond),
            render_block_header(module, func, *true_succ),
            render_block_header(module, func, *false_succ)
        ),
        Instruction::Ret { val } => write!(f, "ret {}", render_value(module, func, *val)),
        Instruction::Call { dest, callee, args } => {
            let callee_name = context::resolve(module.function(*callee).name);
            let args = args
                .iter()
                .map(|v| render_value(module, func, *v))
                .collect::<Vec<_>>()
                .join(", ");
            match dest {
                Some(d) => write!(
                    f,
                    "{} = call {}({})",
                    render_symreg(module, func, *d),
                    callee_name,
                    args
                ),
                None => write!(f, "call {}({})", callee_name, args),
            }
        }
        Instruction::UnOp {
            dest,
            kind,
            operand,
        } => {
            let d = render_symreg(module, func, *dest);
            let o = render_value(module, func, *operand);
            match kind {
                UnOpKind::Assign => write!(f, "{} = {}", d, o),
                UnOpKind::Neg => write!(f, "{} = neg {}", d, o),
                UnOpKind::Not => write!(f, "{} = not {}", d, o),
            }
        }
        Instruction::BinOp {
            dest,
            kind,
            op1,
            op2,
        } => write!(
            f,
            "{} = {} {}, {}",
            render_symreg(module, func, *dest),
            kind.mnemonic(),
            render_value(module, func, *op1),
            render_value(module, func, *op2)
        ),
    }
}

/// A symbolic register together with its owning module/function, renderable
/// via `Display` (`%name` or `%N`).
pub struct SymRegView<'a> {
    pub module: &'a Module,
    pub func: &'a Function,
    pub id: SymRegId,
}

impl<'a> fmt::Display for SymRegView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_symreg(self.module, self.func, self.id))
    }
}

/// A value (register or immediate) together with its owning module/function,
/// renderable via `Display`.
pub struct ValueView<'a> {
    pub module: &'a Module,
    pub func: &'a Function,
    pub value: Value,
}

impl<'a> fmt::Display for ValueView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_value(self.module, self.func, self.value))
    }
}

/// An instruction together with its owning module/function, renderable via
/// `Display` exactly as it appears in a module dump, sans leading
/// indentation and trailing newline.
pub struct InstructionView<'a> {
    pub module: &'a Module,
    pub func: &'a Function,
    pub inst: &'a Instruction,
}

impl<'a> fmt::Display for InstructionView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_instruction(f, self.module, self.func, self.inst)
    }
}

/// A basic block together with its owning module/function, renderable via
/// `Display`.
pub struct BasicBlockView<'a> {
    pub module: &'a Module,
    pub func: &'a Function,
    pub id: BasicBlockId,
}

impl<'a> fmt::Display for BasicBlockView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}:", render_block_header(self.module, self.func, self.id))?;
        let mut indented_f = indented(f).with_str("  ");
        for inst in self.func.block(self.id).instructions() {
            let view = InstructionView {
                module: self.module,
                func: self.func,
                inst,
            };
            write!(indented_f, "{}", view)?;
            writeln!(indented_f)?;
        }
        Ok(())
    }
}

/// A function together with its owning module, renderable via `Display`.
pub struct FunctionView<'a> {
    pub module: &'a Module,
    pub id: FunctionId,
}

impl<'a> fmt::Display for FunctionView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let func = self.module.function(self.id);
        write!(f, "function {}(", context::resolve(func.name))?;
        for p in &func.params {
            write!(f, "{}, ", context::resolve(*p))?;
        }
        writeln!(f, "...) {{")?;
        for (idx, _) in func.blocks().iter().enumerate() {
            let view = BasicBlockView {
                module: self.module,
                func,
                id: BasicBlockId(self.id, idx),
            };
            write!(f, "{}", view)?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "module {}", context::resolve(self.name))?;
        for g in self.globals() {
            writeln!(f, "global %{}", context::resolve(g.name.expect("globals are always named")))?;
        }
        for (idx, _) in self.functions().iter().enumerate() {
            let view = FunctionView {
                module: self,
                id: FunctionId(idx),
            };
            write!(f, "{}", view)?;
        }
        Ok(())
    }
}

impl Module {
    /// Write this module's textual dump to `w`.
    pub fn write_to(&self, w: &mut impl std::io::Write) -> anyhow::Result<()> {
        write!(w, "{}", self)?;
        Ok(())
    }
}

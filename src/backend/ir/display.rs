use std::fmt::{Display, Error, Formatter};

use itertools::Itertools;

use crate::backend::ir::{BasicBlock, CastOp, Entity, FunctionDef, GetEntity, Instruction, InstructionKind, LLVM, Opcode, Predicate, StringDecl, ValueType};

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            ValueType::I1 => write!(f, "i1"),
            ValueType::I8 => write!(f, "i8"),
            ValueType::I32 => write!(f, "i32"),
            ValueType::Double => write!(f, "double"),
            ValueType::Array { len, item_t } => write!(f, "[{} x {}]", len, item_t),
            ValueType::Reference { t } => write!(f, "{}*", t),
        }
    }
}

impl Predicate {
    fn int_name(&self) -> &'static str {
        match self {
            Predicate::Eq => "eq",
            Predicate::Ne => "ne",
            Predicate::Gt => "sgt",
            Predicate::Ge => "sge",
            Predicate::Lt => "slt",
            Predicate::Le => "sle",
        }
    }

    /// ordered comparisons, false if any operand is NaN
    fn float_name(&self) -> &'static str {
        match self {
            Predicate::Eq => "oeq",
            Predicate::Ne => "one",
            Predicate::Gt => "ogt",
            Predicate::Ge => "oge",
            Predicate::Lt => "olt",
            Predicate::Le => "ole",
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Opcode::Add => write!(f, "add"),
            Opcode::Sub => write!(f, "sub"),
            Opcode::Mul => write!(f, "mul"),
            Opcode::SDiv => write!(f, "sdiv"),
            Opcode::FAdd => write!(f, "fadd"),
            Opcode::FSub => write!(f, "fsub"),
            Opcode::FMul => write!(f, "fmul"),
            Opcode::FDiv => write!(f, "fdiv"),
            Opcode::And => write!(f, "and"),
            Opcode::Or => write!(f, "or"),
            Opcode::Xor => write!(f, "xor"),
            Opcode::ICmp(p) => write!(f, "icmp {}", p.int_name()),
            Opcode::FCmp(p) => write!(f, "fcmp {}", p.float_name()),
        }
    }
}

impl Display for CastOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            CastOp::SIToFP => write!(f, "sitofp"),
            CastOp::FPToSI => write!(f, "fptosi"),
            CastOp::ZExt => write!(f, "zext"),
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Entity::Int { v } => write!(f, "{}", v),
            // exact bit pattern, LLVM accepts any double written this way
            Entity::Double { v } => write!(f, "0x{:016X}", v.to_bits()),
            Entity::Bool { v } => write!(f, "{}", v),
            Entity::Register { n, t: _ } => write!(f, "%tmp_{}", n),
            Entity::Pointer { n, t: _ } => write!(f, "%ptr_{}", n),
            Entity::LogicSlot { n } => write!(f, "%logic_{}", n),
            Entity::Variable { ident, t: _ } => write!(f, "%{}", ident),
            Entity::Global { name, t: _ } => write!(f, "@{}", name),
        }
    }
}

/// argument of printf / scanf pointing to the format string
fn format_arg(format: &Entity) -> String {
    format!("i8* bitcast ({} {} to i8*)", format.get_type(), format)
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match &self.item {
            InstructionKind::Alloc { t } => {
                write!(f, "{} = alloca {}", self.get_entity(), t)
            }
            InstructionKind::Load { ptr } => {
                write!(
                    f, "{} = load {}, {} {}",
                    self.get_entity(),
                    self.get_entity().get_type(),
                    ptr.get_type(),
                    ptr
                )
            }
            InstructionKind::Store { val, ptr } => {
                write!(
                    f, "store {} {}, {} {}",
                    val.get_type(),
                    val,
                    ptr.get_type(),
                    ptr
                )
            }
            InstructionKind::BinaryOp { op, l, r } => {
                write!(
                    f, "{} = {} {} {}, {}",
                    self.get_entity(),
                    op, l.get_type(),
                    l, r
                )
            }
            InstructionKind::FNeg { arg } => {
                write!(f, "{} = fneg {} {}", self.get_entity(), arg.get_type(), arg)
            }
            InstructionKind::Cast { op, val, to } => {
                write!(
                    f, "{} = {} {} {} to {}",
                    self.get_entity(),
                    op, val.get_type(), val, to
                )
            }
            InstructionKind::Printf { format, args } => {
                let args = args.iter()
                    .map(|ent| format!(", {} {}", ent.get_type(), ent))
                    .join("");
                write!(f, "call i32 (i8*, ...) @printf({}{})", format_arg(format), args)
            }
            InstructionKind::Scanf { format, ptr } => {
                write!(
                    f, "call i32 (i8*, ...) @scanf({}, {} {})",
                    format_arg(format), ptr.get_type(), ptr
                )
            }
            InstructionKind::Ret { val } => {
                write!(f, "ret {} {}", val.get_type(), val)
            }
            InstructionKind::JumpCond { cond, true_label, false_label } => {
                write!(
                    f, "br {} {}, label %{}, label %{}",
                    cond.get_type(), cond,
                    true_label, false_label
                )
            }
            InstructionKind::Jump { label } => {
                write!(f, "br label %{}", label)
            }
            InstructionKind::Comment { text } => {
                write!(f, "; {}", text)
            }
        }
    }
}

impl Display for BasicBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if let Some(label) = &self.label {
            writeln!(f, "{}:", label)?
        }
        let instructions = self.instructions.iter()
            .map(Instruction::to_string)
            .map(|i| format!("\t{}", i))
            .join("\n");
        writeln!(f, "{}", instructions)
    }
}

impl Display for StringDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f, "@{} = private unnamed_addr constant [{} x i8] c\"{}\\00\"",
            self.name, self.len, self.val
        )
    }
}

impl Display for FunctionDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let f_instrs = self.body.iter()
            .map(BasicBlock::to_string)
            .join("");
        write!(
            f, "define {} @{}() {{\n{}}}\n",
            self.ret_type, self.name, f_instrs
        )
    }
}

impl Display for LLVM {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            LLVM::Comment { text } => write!(f, "; {}", text),
            LLVM::DeclFunction { decl } => write!(f, "{}", decl),
            LLVM::DeclString { decl } => write!(f, "{}", decl),
            LLVM::Function { def } => write!(f, "{}", def),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::ir::*;

    #[test]
    fn double_literal_is_exact() {
        assert_eq!(Entity::Double { v: 1.0 }.to_string(), "0x3FF0000000000000");
        assert_eq!(Entity::Double { v: 0.0 }.to_string(), "0x0000000000000000");
    }

    #[test]
    fn load_and_store() {
        let x = Entity::Variable { ident: String::from("x"), t: ValueType::I32 };
        let store = InstructionKind::Store { val: Entity::from(5), ptr: x.clone() }.without_result();
        assert_eq!(store.to_string(), "store i32 5, i32* %x");
        let load = InstructionKind::Load { ptr: x }
            .with_result(Entity::Register { n: 1, t: ValueType::I32 });
        assert_eq!(load.to_string(), "%tmp_1 = load i32, i32* %x");
    }

    #[test]
    fn comparison_uses_operand_type() {
        let l = Entity::Register { n: 1, t: ValueType::Double };
        let cmp = InstructionKind::BinaryOp { op: Opcode::FCmp(Predicate::Ge), l, r: Entity::Double { v: 1.0 } }
            .with_result(Entity::Register { n: 2, t: ValueType::I1 });
        assert_eq!(cmp.to_string(), "%tmp_2 = fcmp oge double %tmp_1, 0x3FF0000000000000");
    }

    #[test]
    fn printf_call() {
        let printf = InstructionKind::Printf {
            format: Format::WriteInt.decl().get_entity(),
            args: vec![Entity::Register { n: 3, t: ValueType::I32 }],
        }.without_result();
        assert_eq!(
            printf.to_string(),
            "call i32 (i8*, ...) @printf(i8* bitcast ([3 x i8]* @int_res to i8*), i32 %tmp_3)"
        );
    }

    #[test]
    fn scanf_call() {
        let scanf = InstructionKind::Scanf {
            format: Format::ReadDouble.decl().get_entity(),
            ptr: Entity::Pointer { n: 1, t: ValueType::Double },
        }.without_result();
        assert_eq!(
            scanf.to_string(),
            "call i32 (i8*, ...) @scanf(i8* bitcast ([4 x i8]* @read_double to i8*), double* %ptr_1)"
        );
    }

    #[test]
    fn string_declaration() {
        let decl = StringDecl::new(String::from(".str.1"), String::from("hi\\0A"));
        assert_eq!(decl.to_string(), "@.str.1 = private unnamed_addr constant [4 x i8] c\"hi\\0A\\00\"");
    }
}

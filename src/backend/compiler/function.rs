use crate::backend::context::{BlockContext, FunctionContext, GlobalContext, LabelKind};
use crate::backend::ir::{BasicBlock, CastOp, Entity, Format, InstructionKind, Opcode, Predicate, ValueType};
use crate::frontend::ast::{BinaryOperator, Expression, ExpressionKind, Statement, StatementKind, Type, UnaryOperator};
use crate::frontend::CheckedProgram;
use crate::meta::{GetLocation, GetType, TypeMeta};

/// compiles statements of the program into basic blocks of a single function
pub struct FunctionCompiler<'a> {
    program: &'a CheckedProgram,
    block_context: BlockContext,
    function_context: FunctionContext,
    global_context: &'a mut GlobalContext,
}

impl<'a> FunctionCompiler<'a> {
    pub fn new(program: &'a CheckedProgram, global_context: &'a mut GlobalContext) -> Self {
        Self {
            program,
            block_context: BlockContext::new(),
            function_context: FunctionContext::new(),
            global_context,
        }
    }

    /// shortcut function for pushing an instruction that produces no value
    fn push(&mut self, instr: InstructionKind) {
        self.function_context.push_instruction(instr.without_result());
    }

    /// shortcut function for pushing an instruction that produces a value in a new register
    fn push_with_result(&mut self, instr: InstructionKind, t: ValueType) -> Entity {
        let result = self.function_context.new_register(t);
        self.function_context.push_instruction(instr.with_result(result.clone()));
        result
    }

    /// shortcut function for creating a new basic block
    fn next_block(&mut self, label: &str) {
        self.function_context.next_block(String::from(label));
    }

    fn jump(&mut self, label: &str) {
        self.push(InstructionKind::Jump { label: String::from(label) });
    }

    fn jump_cond(&mut self, cond: Entity, true_label: &str, false_label: &str) {
        self.push(InstructionKind::JumpCond {
            cond,
            true_label: String::from(true_label),
            false_label: String::from(false_label),
        });
    }

    /// convert int value to double, other values are returned unchanged
    fn promote(&mut self, ent: Entity) -> Entity {
        if ent.get_type() == ValueType::I32 {
            let instr = InstructionKind::Cast { op: CastOp::SIToFP, val: ent, to: ValueType::Double };
            self.push_with_result(instr, ValueType::Double)
        } else {
            ent
        }
    }

    /// finish compilation: append the final return and get all blocks,
    /// with temporary storage allocated at the beginning of the entry block
    pub fn conclude(mut self) -> Vec<BasicBlock> {
        self.push(InstructionKind::Ret { val: Entity::from(0) });
        let mut instructions: Vec<_> = self.function_context.get_entry_storage().iter()
            .map(|ptr| InstructionKind::Alloc { t: ptr.get_pointee_type() }.with_result(ptr.clone()))
            .collect();
        let mut blocks = self.function_context.conclude();
        if let Some(entry) = blocks.first_mut() {
            instructions.append(&mut entry.instructions);
            entry.instructions = instructions;
        }
        blocks
    }

    pub fn compile_statement(&mut self, stmt: &Statement<TypeMeta>) {
        if let StatementKind::Block { stmts } = &stmt.item {
            for stmt in stmts.iter() {
                self.compile_statement(stmt);
            }
            return;
        }

        let line = self.program.line_number(&stmt.get_location());
        let text = format!("line {}: {}", line, self.program.line_text(line).trim());
        self.push(InstructionKind::Comment { text });

        match &stmt.item {
            StatementKind::Block { .. } => unreachable!(),
            StatementKind::Decl { t, ident } => {
                let t = ValueType::from(*t);
                let ptr = Entity::Variable { ident: ident.clone(), t: t.clone() };
                self.function_context.push_instruction(
                    InstructionKind::Alloc { t: t.clone() }.with_result(ptr.clone())
                );
                self.push(InstructionKind::Store { val: t.zero(), ptr: ptr.clone() });
                self.block_context.set_new_variable(ident, ptr);
            }
            StatementKind::Expr { expr } => {
                self.compile_expression(expr);
            }
            StatementKind::Cond { expr, stmt } => {
                let entry_label = self.function_context.new_label(LabelKind::Entry);
                let true_label = self.function_context.new_label(LabelKind::True);
                let false_label = self.function_context.new_label(LabelKind::False);

                self.jump(&entry_label);
                self.next_block(&entry_label);
                let cond = self.compile_expression(expr);
                self.jump_cond(cond, &true_label, &false_label);

                // false block is also the exit of the whole statement
                self.next_block(&true_label);
                self.compile_statement(stmt);
                self.jump(&false_label);

                self.next_block(&false_label);
            }
            StatementKind::CondElse { expr, stmt_true, stmt_false } => {
                let entry_label = self.function_context.new_label(LabelKind::Entry);
                let true_label = self.function_context.new_label(LabelKind::True);
                let false_label = self.function_context.new_label(LabelKind::False);
                let out_label = self.function_context.new_label(LabelKind::Out);

                self.jump(&entry_label);
                self.next_block(&entry_label);
                let cond = self.compile_expression(expr);
                self.jump_cond(cond, &true_label, &false_label);

                self.next_block(&true_label);
                self.compile_statement(stmt_true);
                self.jump(&out_label);

                self.next_block(&false_label);
                self.compile_statement(stmt_false);
                self.jump(&out_label);

                self.next_block(&out_label);
            }
            StatementKind::While { expr, stmt } => {
                let entry_label = self.function_context.new_label(LabelKind::Entry);
                let true_label = self.function_context.new_label(LabelKind::True);
                let out_label = self.function_context.new_label(LabelKind::Out);

                self.jump(&entry_label);
                self.next_block(&entry_label);
                let cond = self.compile_expression(expr);
                self.jump_cond(cond, &true_label, &out_label);

                self.next_block(&true_label);
                self.compile_statement(stmt);
                self.jump(&entry_label);

                self.next_block(&out_label);
            }
            StatementKind::WriteString { val } => {
                let format = self.global_context.declare_string(val).get_entity();
                self.push(InstructionKind::Printf { format, args: vec![] });
            }
            StatementKind::WriteHex { expr } => {
                let val = self.compile_expression(expr);
                let format = Format::WriteHex.decl().get_entity();
                self.push(InstructionKind::Printf { format, args: vec![val] });
            }
            StatementKind::Write { expr } => {
                if expr.get_type() == Type::Bool {
                    self.compile_bool_write(expr);
                } else {
                    let format = match expr.get_type() {
                        Type::Double => Format::WriteDouble,
                        _ => Format::WriteInt,
                    };
                    let val = self.compile_expression(expr);
                    let format = format.decl().get_entity();
                    self.push(InstructionKind::Printf { format, args: vec![val] });
                }
            }
            StatementKind::Read { ident } => {
                let var = self.block_context.get_variable(ident);
                let format = match var.get_pointee_type() {
                    ValueType::Double => Format::ReadDouble,
                    _ => Format::ReadInt,
                };
                self.compile_read(var, format);
            }
            StatementKind::ReadHex { ident } => {
                let var = self.block_context.get_variable(ident);
                self.compile_read(var, Format::ReadHex);
            }
            StatementKind::Return => {
                self.push(InstructionKind::Ret { val: Entity::from(0) });
            }
        }
    }

    /// there is no bool to string conversion, so printing True or False is a conditional
    fn compile_bool_write(&mut self, expr: &Expression<TypeMeta>) {
        let entry_label = self.function_context.new_label(LabelKind::Entry);
        let true_label = self.function_context.new_label(LabelKind::True);
        let false_label = self.function_context.new_label(LabelKind::False);
        let out_label = self.function_context.new_label(LabelKind::Out);

        self.jump(&entry_label);
        self.next_block(&entry_label);
        let cond = self.compile_expression(expr);
        self.jump_cond(cond, &true_label, &false_label);

        self.next_block(&true_label);
        self.push(InstructionKind::Printf { format: Format::WriteTrue.decl().get_entity(), args: vec![] });
        self.jump(&out_label);

        self.next_block(&false_label);
        self.push(InstructionKind::Printf { format: Format::WriteFalse.decl().get_entity(), args: vec![] });
        self.jump(&out_label);

        self.next_block(&out_label);
    }

    /// scan into temporary storage, then copy the value into the variable
    fn compile_read(&mut self, var: Entity, format: Format) {
        let t = var.get_pointee_type();
        let tmp_ptr = self.function_context.new_pointer(t.clone());
        self.push(InstructionKind::Scanf { format: format.decl().get_entity(), ptr: tmp_ptr.clone() });
        let val = self.push_with_result(InstructionKind::Load { ptr: tmp_ptr }, t);
        self.push(InstructionKind::Store { val, ptr: var });
    }

    pub fn compile_expression(&mut self, expr: &Expression<TypeMeta>) -> Entity {
        match &expr.item {
            ExpressionKind::LitInt { val } => Entity::from(*val),
            ExpressionKind::LitDouble { val } => Entity::Double { v: *val },
            ExpressionKind::LitBool { val } => Entity::from(*val),
            ExpressionKind::Reference { ident } => {
                let ptr = self.block_context.get_variable(ident);
                let t = ptr.get_pointee_type();
                self.push_with_result(InstructionKind::Load { ptr }, t)
            }
            ExpressionKind::Assign { ident, expr } => {
                let ptr = self.block_context.get_variable(ident);
                let t = ptr.get_pointee_type();
                let mut val = self.compile_expression(expr);
                if t == ValueType::Double {
                    val = self.promote(val);
                }
                self.push(InstructionKind::Store { val, ptr: ptr.clone() });
                self.push_with_result(InstructionKind::Load { ptr }, t)
            }
            ExpressionKind::Convert { t, arg } => {
                let val = self.compile_expression(arg);
                let (op, to) = match (arg.get_type(), t) {
                    (Type::Double, Type::Int) => (CastOp::FPToSI, ValueType::I32),
                    (Type::Bool, Type::Int) => (CastOp::ZExt, ValueType::I32),
                    (Type::Int, Type::Double) => (CastOp::SIToFP, ValueType::Double),
                    // conversion to the same type
                    _ => return val,
                };
                self.push_with_result(InstructionKind::Cast { op, val, to: to.clone() }, to)
            }
            ExpressionKind::Unary { op, arg } => {
                let val = self.compile_expression(arg);
                let t = val.get_type();
                let instr = match op {
                    UnaryOperator::Neg if t == ValueType::Double => InstructionKind::FNeg { arg: val },
                    UnaryOperator::Neg => InstructionKind::BinaryOp { op: Opcode::Sub, l: Entity::from(0), r: val },
                    UnaryOperator::Not => InstructionKind::BinaryOp { op: Opcode::Xor, l: val, r: Entity::from(true) },
                    UnaryOperator::BitNot => InstructionKind::BinaryOp { op: Opcode::Xor, l: val, r: Entity::from(-1) },
                };
                self.push_with_result(instr, t)
            }
            ExpressionKind::Binary { left, op, right } if op.is_logical() => {
                self.compile_lazy_binary(left, *op, right)
            }
            ExpressionKind::Binary { left, op, right } => {
                let mut l = self.compile_expression(left);
                let mut r = self.compile_expression(right);
                let (left_t, right_t) = (left.get_type(), right.get_type());

                // comparisons of a double with an int and arithmetic with double result
                let use_double = left_t == Type::Double || right_t == Type::Double;
                if use_double {
                    l = self.promote(l);
                    r = self.promote(r);
                }

                let opcode = match op {
                    BinaryOperator::Plus => if use_double { Opcode::FAdd } else { Opcode::Add },
                    BinaryOperator::Minus => if use_double { Opcode::FSub } else { Opcode::Sub },
                    BinaryOperator::Times => if use_double { Opcode::FMul } else { Opcode::Mul },
                    BinaryOperator::Divide => if use_double { Opcode::FDiv } else { Opcode::SDiv },
                    BinaryOperator::BitOr => Opcode::Or,
                    BinaryOperator::BitAnd => Opcode::And,
                    cmp => {
                        let predicate = match cmp {
                            BinaryOperator::Equal => Predicate::Eq,
                            BinaryOperator::NotEqual => Predicate::Ne,
                            BinaryOperator::Greater => Predicate::Gt,
                            BinaryOperator::GreaterEqual => Predicate::Ge,
                            BinaryOperator::Less => Predicate::Lt,
                            _ => Predicate::Le,
                        };
                        if use_double { Opcode::FCmp(predicate) } else { Opcode::ICmp(predicate) }
                    }
                };
                let result_t = ValueType::from(expr.get_type());
                self.push_with_result(InstructionKind::BinaryOp { op: opcode, l, r }, result_t)
            }
        }
    }

    /// && and || evaluate the right operand only when the left one does not decide the result,
    /// both paths store the result in a dedicated slot which is loaded in the merge block
    fn compile_lazy_binary(
        &mut self, left: &Expression<TypeMeta>, op: BinaryOperator, right: &Expression<TypeMeta>,
    ) -> Entity {
        let slot = self.function_context.new_logic_slot();
        let l = self.compile_expression(left);
        let true_label = self.function_context.new_label(LabelKind::True);
        let false_label = self.function_context.new_label(LabelKind::False);
        let out_label = self.function_context.new_label(LabelKind::Out);

        let is_true = self.push_with_result(
            InstructionKind::BinaryOp { op: Opcode::ICmp(Predicate::Eq), l: l.clone(), r: Entity::from(true) },
            ValueType::I1,
        );
        self.jump_cond(is_true, &true_label, &false_label);

        // for && the right operand matters only if the left one is true, for || if it is false
        let (evaluate_on_true, opcode) = match op {
            BinaryOperator::And => (true, Opcode::And),
            _ => (false, Opcode::Or),
        };

        self.next_block(&true_label);
        self.compile_lazy_branch(evaluate_on_true, &l, right, opcode, &slot);
        self.jump(&out_label);

        self.next_block(&false_label);
        self.compile_lazy_branch(!evaluate_on_true, &l, right, opcode, &slot);
        self.jump(&out_label);

        self.next_block(&out_label);
        self.push_with_result(InstructionKind::Load { ptr: slot }, ValueType::I1)
    }

    /// store either the left operand or the result of combining it with the right operand
    fn compile_lazy_branch(
        &mut self, evaluate: bool, l: &Entity, right: &Expression<TypeMeta>, opcode: Opcode, slot: &Entity,
    ) {
        let val = if evaluate {
            let r = self.compile_expression(right);
            let instr = InstructionKind::BinaryOp { op: opcode, l: l.clone(), r };
            self.push_with_result(instr, ValueType::I1)
        } else {
            l.clone()
        };
        self.push(InstructionKind::Store { val, ptr: slot.clone() });
    }
}

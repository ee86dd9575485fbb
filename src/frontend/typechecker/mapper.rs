use crate::frontend::ast::*;
use crate::frontend::typechecker::typechecker::TypeChecker;
use crate::meta::{GetLocation, GetType, LocationMeta, TypeMeta};
use crate::util::mapper::AstMapper;

impl TypeChecker {
    /// conditions of if / while statements must be boolean
    fn map_condition(&mut self, expr: &Expression<LocationMeta>, operation: &str) -> Box<Expression<TypeMeta>> {
        let mapped = self.map_expression(expr);
        let t = mapped.get_type();
        self.expect(t == Type::Bool, operation, "bool", vec![t], expr.get_location());
        Box::new(mapped)
    }

    fn map_unary(&mut self, op: UnaryOperator, arg: &Expression<TypeMeta>, loc: LocationMeta) -> Type {
        let arg_t = arg.get_type();
        let (valid, expected, result_t) = match op {
            UnaryOperator::Neg => {
                let result_t = if arg_t == Type::Double { Type::Double } else { Type::Int };
                (arg_t.is_numeric(), "int or double", result_t)
            }
            UnaryOperator::Not => (arg_t == Type::Bool, "bool", Type::Bool),
            UnaryOperator::BitNot => (arg_t == Type::Int, "int", Type::Int),
        };
        self.expect(valid, op.name(), expected, vec![arg_t], loc);
        result_t
    }

    fn map_binary(
        &mut self, op: BinaryOperator,
        left: &Expression<TypeMeta>, right: &Expression<TypeMeta>, loc: LocationMeta,
    ) -> Type {
        let (left_t, right_t) = (left.get_type(), right.get_type());
        let numeric = left_t.is_numeric() && right_t.is_numeric();
        let (valid, expected, result_t) = if op.is_arithmetic() {
            (numeric, "int or double", Type::promote(&left_t, &right_t))
        } else if op.is_equality() {
            let both_bool = left_t == Type::Bool && right_t == Type::Bool;
            (numeric || both_bool, "two numbers or two bools", Type::Bool)
        } else if op.is_relational() {
            (numeric, "int or double", Type::Bool)
        } else if op.is_logical() {
            (left_t == Type::Bool && right_t == Type::Bool, "bool", Type::Bool)
        } else {
            (left_t == Type::Int && right_t == Type::Int, "int", Type::Int)
        };
        self.expect(valid, op.name(), expected, vec![left_t, right_t], loc);
        result_t
    }

    fn map_convert(&mut self, t: Type, arg: &Expression<TypeMeta>, loc: LocationMeta) -> Type {
        let arg_t = arg.get_type();
        let (valid, expected) = match t {
            Type::Int => (arg_t.is_numeric() || arg_t == Type::Bool, "int, double or bool"),
            _ => (arg_t.is_numeric(), "int or double"),
        };
        self.expect(valid, &format!("conversion to {}", t), expected, vec![arg_t], loc);
        t
    }

    fn map_assign(&mut self, target_t: Type, expr: &Expression<TypeMeta>, loc: LocationMeta) -> Type {
        let expr_t = expr.get_type();
        let (valid, expected) = match target_t {
            Type::Double => (expr_t.is_numeric(), "int or double"),
            Type::Bool => (expr_t == Type::Bool, "bool"),
            _ => (expr_t == Type::Int, "int"),
        };
        self.expect(valid, "assignment", expected, vec![target_t, expr_t], loc);
        target_t
    }
}

impl AstMapper<LocationMeta, TypeMeta> for TypeChecker {
    fn map_expression(&mut self, expr: &Expression<LocationMeta>) -> Expression<TypeMeta> {
        let loc = expr.get_location();
        let (kind, t) = match &expr.item {
            ExpressionKind::LitInt { val } => (ExpressionKind::LitInt { val: *val }, Type::Int),
            ExpressionKind::LitDouble { val } => (ExpressionKind::LitDouble { val: *val }, Type::Double),
            ExpressionKind::LitBool { val } => (ExpressionKind::LitBool { val: *val }, Type::Bool),
            ExpressionKind::Reference { ident } => {
                let var_t = self.get_variable(ident, loc);
                (ExpressionKind::Reference { ident: ident.clone() }, var_t)
            }
            ExpressionKind::Convert { t, arg } => {
                let arg = self.map_expression(arg);
                let result_t = self.map_convert(*t, &arg, loc);
                (ExpressionKind::Convert { t: *t, arg: Box::new(arg) }, result_t)
            }
            ExpressionKind::Unary { op, arg } => {
                let arg = self.map_expression(arg);
                let result_t = self.map_unary(*op, &arg, loc);
                (ExpressionKind::Unary { op: *op, arg: Box::new(arg) }, result_t)
            }
            ExpressionKind::Binary { left, op, right } => {
                let left = self.map_expression(left);
                let right = self.map_expression(right);
                let result_t = self.map_binary(*op, &left, &right, loc);
                let kind = ExpressionKind::Binary {
                    left: Box::new(left),
                    op: *op,
                    right: Box::new(right),
                };
                (kind, result_t)
            }
            ExpressionKind::Assign { ident, expr } => {
                let target_t = self.get_variable(ident, loc);
                let expr = self.map_expression(expr);
                let result_t = self.map_assign(target_t, &expr, loc);
                (ExpressionKind::Assign { ident: ident.clone(), expr: Box::new(expr) }, result_t)
            }
        };
        Expression::new(kind, TypeMeta { t, location: loc })
    }

    fn map_statement(&mut self, stmt: &Statement<LocationMeta>) -> Statement<TypeMeta> {
        let loc = stmt.get_location();
        let kind = match &stmt.item {
            StatementKind::Block { stmts } => {
                let stmts = stmts.iter()
                    .map(|s| Box::new(self.map_statement(s)))
                    .collect();
                StatementKind::Block { stmts }
            }
            StatementKind::Decl { t, ident } => {
                self.declare_variable(ident, *t, loc);
                StatementKind::Decl { t: *t, ident: ident.clone() }
            }
            StatementKind::Expr { expr } => {
                StatementKind::Expr { expr: Box::new(self.map_expression(expr)) }
            }
            StatementKind::Cond { expr, stmt } => {
                let expr = self.map_condition(expr, "if condition");
                StatementKind::Cond { expr, stmt: Box::new(self.map_statement(stmt)) }
            }
            StatementKind::CondElse { expr, stmt_true, stmt_false } => {
                let expr = self.map_condition(expr, "if-else condition");
                StatementKind::CondElse {
                    expr,
                    stmt_true: Box::new(self.map_statement(stmt_true)),
                    stmt_false: Box::new(self.map_statement(stmt_false)),
                }
            }
            StatementKind::While { expr, stmt } => {
                let expr = self.map_condition(expr, "while condition");
                StatementKind::While { expr, stmt: Box::new(self.map_statement(stmt)) }
            }
            StatementKind::WriteString { val } => StatementKind::WriteString { val: val.clone() },
            StatementKind::WriteHex { expr } => {
                let expr = self.map_expression(expr);
                let t = expr.get_type();
                self.expect(t == Type::Int, "hexadecimal write", "int", vec![t], loc);
                StatementKind::WriteHex { expr: Box::new(expr) }
            }
            StatementKind::Write { expr } => {
                let expr = self.map_expression(expr);
                let t = expr.get_type();
                self.expect(t.is_numeric() || t == Type::Bool, "write", "int, double or bool", vec![t], loc);
                StatementKind::Write { expr: Box::new(expr) }
            }
            StatementKind::Read { ident } => {
                let t = self.get_variable(ident, loc);
                self.expect(t.is_numeric(), "read", "int or double", vec![t], loc);
                StatementKind::Read { ident: ident.clone() }
            }
            StatementKind::ReadHex { ident } => {
                let t = self.get_variable(ident, loc);
                self.expect(t == Type::Int, "hexadecimal read", "int", vec![t], loc);
                StatementKind::ReadHex { ident: ident.clone() }
            }
            StatementKind::Return => StatementKind::Return,
        };
        Statement::new(kind, TypeMeta { t: Type::Void, location: loc })
    }
}

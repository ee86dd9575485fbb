use std::fmt;

use crate::meta::Meta;

/// alias for all metadata containers attached to ast items
pub type AstItem<ItemT, MetaT> = Meta<ItemT, MetaT>;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Type {
    Int,
    Double,
    Bool,
    /// surface syntax only, literals are canonicalized to Int during parsing
    Hex,
    /// statements and the fallback type of unresolved names
    Void,
}

impl Type {
    /// runtime representation of the type (hex values are ints)
    pub fn canonical(&self) -> Type {
        match self {
            Type::Hex => Type::Int,
            t => *t,
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self.canonical() {
            Type::Int | Type::Double => true,
            _ => false,
        }
    }

    /// result type of an arithmetic operation on numeric operands:
    /// double if any of them is double, int otherwise
    pub fn promote(left: &Type, right: &Type) -> Type {
        if left.canonical() == Type::Double || right.canonical() == Type::Double {
            Type::Double
        } else {
            Type::Int
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Double => write!(f, "double"),
            Type::Bool => write!(f, "bool"),
            Type::Hex => write!(f, "hex"),
            Type::Void => write!(f, "void"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    BitOr,
    BitAnd,
    Times,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn is_arithmetic(&self) -> bool {
        match self {
            BinaryOperator::Plus | BinaryOperator::Minus
            | BinaryOperator::Times | BinaryOperator::Divide => true,
            _ => false,
        }
    }

    pub fn is_relational(&self) -> bool {
        match self {
            BinaryOperator::Greater | BinaryOperator::GreaterEqual
            | BinaryOperator::Less | BinaryOperator::LessEqual => true,
            _ => false,
        }
    }

    pub fn is_equality(&self) -> bool {
        *self == BinaryOperator::Equal || *self == BinaryOperator::NotEqual
    }

    pub fn is_logical(&self) -> bool {
        *self == BinaryOperator::And || *self == BinaryOperator::Or
    }

    /// operator name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperator::BitOr => "bitwise or",
            BinaryOperator::BitAnd => "bitwise and",
            BinaryOperator::Times => "multiplication",
            BinaryOperator::Divide => "division",
            BinaryOperator::Plus => "addition",
            BinaryOperator::Minus => "subtraction",
            BinaryOperator::Equal => "equal",
            BinaryOperator::NotEqual => "not equal",
            BinaryOperator::Greater => "greater",
            BinaryOperator::GreaterEqual => "greater or equal",
            BinaryOperator::Less => "less",
            BinaryOperator::LessEqual => "less or equal",
            BinaryOperator::And => "logical and",
            BinaryOperator::Or => "logical or",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
    Neg,
    Not,
    BitNot,
}

impl UnaryOperator {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOperator::Neg => "unary minus",
            UnaryOperator::Not => "logical negation",
            UnaryOperator::BitNot => "bitwise negation",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExpressionKind<MetaT> {
    LitInt { val: i32 },
    LitDouble { val: f64 },
    LitBool { val: bool },
    Reference { ident: String },
    Convert { t: Type, arg: Box<Expression<MetaT>> },
    Unary { op: UnaryOperator, arg: Box<Expression<MetaT>> },
    Binary {
        left: Box<Expression<MetaT>>,
        op: BinaryOperator,
        right: Box<Expression<MetaT>>,
    },
    Assign { ident: String, expr: Box<Expression<MetaT>> },
}

pub type Expression<MetaT> = AstItem<ExpressionKind<MetaT>, MetaT>;

#[derive(Debug, PartialEq, Clone)]
pub enum StatementKind<MetaT> {
    Block { stmts: Vec<Box<Statement<MetaT>>> },
    Decl { t: Type, ident: String },
    Expr { expr: Box<Expression<MetaT>> },
    Cond { expr: Box<Expression<MetaT>>, stmt: Box<Statement<MetaT>> },
    CondElse {
        expr: Box<Expression<MetaT>>,
        stmt_true: Box<Statement<MetaT>>,
        stmt_false: Box<Statement<MetaT>>,
    },
    While { expr: Box<Expression<MetaT>>, stmt: Box<Statement<MetaT>> },
    /// val is already escaped for LLVM (non-printable bytes as \XX)
    WriteString { val: String },
    WriteHex { expr: Box<Expression<MetaT>> },
    Write { expr: Box<Expression<MetaT>> },
    Read { ident: String },
    ReadHex { ident: String },
    Return,
}

pub type Statement<MetaT> = AstItem<StatementKind<MetaT>, MetaT>;

#[derive(Debug, PartialEq, Clone)]
pub struct Program<MetaT> {
    pub stmts: Vec<Statement<MetaT>>,
}

impl<MetaT> Program<MetaT> {
    /// program body: all declarations come before other statements
    pub fn new(decls: Vec<Vec<Statement<MetaT>>>, stmts: Vec<Statement<MetaT>>) -> Self {
        let mut all_stmts: Vec<_> = decls.into_iter().flatten().collect();
        all_stmts.extend(stmts);
        Self { stmts: all_stmts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_promotion() {
        assert_eq!(Type::promote(&Type::Int, &Type::Int), Type::Int);
        assert_eq!(Type::promote(&Type::Int, &Type::Double), Type::Double);
        assert_eq!(Type::promote(&Type::Double, &Type::Int), Type::Double);
        assert_eq!(Type::promote(&Type::Double, &Type::Double), Type::Double);
        assert_eq!(Type::promote(&Type::Hex, &Type::Int), Type::Int);
    }

    #[test]
    fn hex_is_int_at_runtime() {
        assert_eq!(Type::Hex.canonical(), Type::Int);
        assert!(Type::Hex.is_numeric());
        assert!(!Type::Bool.is_numeric());
        assert!(!Type::Void.is_numeric());
    }
}

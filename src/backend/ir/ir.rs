// internal type representation:
// int: i32, double: double, bool: i1, all passed by value
// variables and temporary storage: pointers to values, created with alloca
// strings: global constant arrays of characters, passed to printf / scanf as i8*

use crate::frontend::ast::Type;
use crate::meta::Meta;

#[derive(Debug, PartialEq, Clone)]
pub enum ValueType {
    I1,
    I8,
    I32,
    Double,
    Array { len: usize, item_t: Box<ValueType> },
    Reference { t: Box<ValueType> },
}

impl ValueType {
    pub fn reference(&self) -> Self {
        ValueType::Reference { t: Box::new(self.clone()) }
    }

    /// value stored in freshly declared variables
    pub fn zero(&self) -> Entity {
        match self {
            ValueType::I1 => Entity::Bool { v: false },
            ValueType::Double => Entity::Double { v: 0.0 },
            _ => Entity::Int { v: 0 },
        }
    }
}

impl From<Type> for ValueType {
    fn from(t: Type) -> Self {
        match t.canonical() {
            Type::Int => ValueType::I32,
            Type::Double => ValueType::Double,
            Type::Bool => ValueType::I1,
            t => panic!("type {} has no runtime representation", t),
        }
    }
}

/// value references used by instructions:
/// literals (Int, Double, Bool), named values (Register)
/// and addresses (Pointer, LogicSlot, Variable, Global)
#[derive(Debug, PartialEq, Clone)]
pub enum Entity {
    Int { v: i32 },
    Double { v: f64 },
    Bool { v: bool },
    Register { n: usize, t: ValueType },
    /// temporary storage, t is the type of stored value
    Pointer { n: usize, t: ValueType },
    /// storage for the result of a short-circuit boolean operator
    LogicSlot { n: usize },
    /// storage of a source code variable, t is the type of stored value
    Variable { ident: String, t: ValueType },
    /// global constant, t is the type of stored value
    Global { name: String, t: ValueType },
}

impl Entity {
    pub fn get_type(&self) -> ValueType {
        match self {
            Entity::Int { .. } => ValueType::I32,
            Entity::Double { .. } => ValueType::Double,
            Entity::Bool { .. } => ValueType::I1,
            Entity::Register { n: _, t } => t.clone(),
            Entity::Pointer { n: _, t } => t.reference(),
            Entity::LogicSlot { .. } => ValueType::I1.reference(),
            Entity::Variable { ident: _, t } => t.reference(),
            Entity::Global { name: _, t } => t.reference(),
        }
    }

    /// type of the value stored under the address
    pub fn get_pointee_type(&self) -> ValueType {
        match self.get_type() {
            ValueType::Reference { t } => *t,
            t => panic!("entity of type {} is not an address", t),
        }
    }
}

impl From<i32> for Entity {
    fn from(i: i32) -> Self {
        Entity::Int { v: i }
    }
}

impl From<bool> for Entity {
    fn from(b: bool) -> Self {
        Entity::Bool { v: b }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Predicate {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    SDiv,
    FAdd,
    FSub,
    FMul,
    FDiv,
    And,
    Or,
    Xor,
    ICmp(Predicate),
    FCmp(Predicate),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CastOp {
    SIToFP,
    FPToSI,
    ZExt,
}

#[derive(Debug, Clone)]
pub enum InstructionKind {
    Alloc { t: ValueType },
    Load { ptr: Entity },
    Store { val: Entity, ptr: Entity },
    BinaryOp { op: Opcode, l: Entity, r: Entity },
    FNeg { arg: Entity },
    Cast { op: CastOp, val: Entity, to: ValueType },
    Printf { format: Entity, args: Vec<Entity> },
    Scanf { format: Entity, ptr: Entity },
    Ret { val: Entity },
    JumpCond { cond: Entity, true_label: String, false_label: String },
    Jump { label: String },
    Comment { text: String },
}

impl InstructionKind {
    pub fn without_result(self) -> Instruction {
        Instruction::new(self, None)
    }

    pub fn with_result(self, result: Entity) -> Instruction {
        Instruction::new(self, Some(result))
    }
}

pub type Instruction = Meta<InstructionKind, Option<Entity>>;

pub trait GetEntity {
    fn get_entity(&self) -> Entity;
}

impl GetEntity for Instruction {
    fn get_entity(&self) -> Entity {
        if let Some(entity) = self.get_meta() {
            entity.clone()
        } else {
            panic!("missing result entity information for {:?}", self)
        }
    }
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub label: Option<String>,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringDecl {
    pub name: String,
    /// contents of the constant, with non-printable bytes already escaped as \XX
    pub val: String,
    /// length in bytes, including the trailing zero
    pub len: usize,
}

impl StringDecl {
    pub fn new(name: String, val: String) -> Self {
        // each \XX escape sequence is 3 characters representing a single byte
        let escapes = val.matches('\\').count();
        let len = val.len() - 2 * escapes + 1;
        Self { name, val, len }
    }

    /// entity for passing the constant to printf / scanf
    pub fn get_entity(&self) -> Entity {
        Entity::Global {
            name: self.name.clone(),
            t: ValueType::Array { len: self.len, item_t: Box::new(ValueType::I8) },
        }
    }
}

/// format strings used by write and read statements
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Format {
    WriteInt,
    WriteDouble,
    WriteHex,
    WriteTrue,
    WriteFalse,
    ReadInt,
    ReadDouble,
    ReadHex,
}

impl Format {
    pub const ALL: [Format; 8] = [
        Format::WriteInt, Format::WriteDouble, Format::WriteHex, Format::WriteTrue,
        Format::WriteFalse, Format::ReadInt, Format::ReadDouble, Format::ReadHex,
    ];

    pub fn decl(&self) -> StringDecl {
        let (name, val) = match self {
            Format::WriteInt => ("int_res", "%d"),
            Format::WriteDouble => ("double_res", "%lf"),
            Format::WriteHex => ("hex_res", "0X%X"),
            Format::WriteTrue => ("true_res", "True"),
            Format::WriteFalse => ("false_res", "False"),
            Format::ReadInt => ("read_int", "%d"),
            Format::ReadDouble => ("read_double", "%lf"),
            Format::ReadHex => ("read_hex", "%X"),
        };
        StringDecl::new(String::from(name), String::from(val))
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub ret_type: ValueType,
    pub body: Vec<BasicBlock>,
}

#[derive(Debug, Clone)]
pub enum LLVM {
    Comment { text: String },
    DeclFunction { decl: String },
    DeclString { decl: StringDecl },
    Function { def: FunctionDef },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_length_counts_escapes_as_single_bytes() {
        let decl = StringDecl::new(String::from(".str.1"), String::from("aqb\\0A"));
        assert_eq!(decl.len, 5);
        let decl = StringDecl::new(String::from(".str.2"), String::from(""));
        assert_eq!(decl.len, 1);
    }

    #[test]
    fn format_lengths() {
        assert_eq!(Format::WriteInt.decl().len, 3);
        assert_eq!(Format::WriteDouble.decl().len, 4);
        assert_eq!(Format::WriteHex.decl().len, 5);
        assert_eq!(Format::WriteFalse.decl().len, 6);
    }

    #[test]
    fn addresses_are_pointers() {
        let var = Entity::Variable { ident: String::from("x"), t: ValueType::Double };
        assert_eq!(var.get_type(), ValueType::Double.reference());
        assert_eq!(var.get_pointee_type(), ValueType::Double);
        assert_eq!(Entity::LogicSlot { n: 1 }.get_pointee_type(), ValueType::I1);
    }
}

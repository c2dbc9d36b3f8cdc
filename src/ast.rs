//! Jack abstract syntax tree.
//!
//! One compilation unit is one `Class`. Names and expressions carry their
//! source span so stage-1 errors can point at the offending text.

use std::fmt;

use crate::span::Spanned;

#[derive(Clone, Debug)]
pub struct Class {
    pub name: Spanned<String>,
    pub var_decs: Vec<VarDec>,
    pub subroutines: Vec<Subroutine>,
}

/// A class-level variable declaration (one name per entry).
#[derive(Clone, Debug)]
pub struct VarDec {
    pub ty: Type,
    pub name: Spanned<String>,
    pub kind: ClassVarKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassVarKind {
    Static,
    Field,
}

/// A parameter or local variable.
#[derive(Clone, Debug)]
pub struct TypedName {
    pub ty: Type,
    pub name: Spanned<String>,
}

#[derive(Clone, Debug)]
pub struct Subroutine {
    pub kind: SubroutineKind,
    pub return_type: Type,
    pub name: Spanned<String>,
    pub params: Vec<TypedName>,
    pub locals: Vec<TypedName>,
    pub statements: Vec<Spanned<Stmt>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl fmt::Display for SubroutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubroutineKind::Constructor => write!(f, "constructor"),
            SubroutineKind::Function => write!(f, "function"),
            SubroutineKind::Method => write!(f, "method"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Int,
    Char,
    Boolean,
    /// Only valid as a subroutine return type.
    Void,
    Class(String),
}

impl Type {
    /// The spelling used when qualifying instance calls (`Point.sum`).
    pub fn name(&self) -> &str {
        match self {
            Type::Int => "int",
            Type::Char => "char",
            Type::Boolean => "boolean",
            Type::Void => "void",
            Type::Class(name) => name,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Let {
        target: Spanned<String>,
        /// `Some` for `let a[i] = v;`.
        index: Option<Spanned<Expr>>,
        value: Spanned<Expr>,
    },
    If {
        cond: Spanned<Expr>,
        then_body: Vec<Spanned<Stmt>>,
        else_body: Vec<Spanned<Stmt>>,
    },
    While {
        cond: Spanned<Expr>,
        body: Vec<Spanned<Stmt>>,
    },
    Do(SubroutineCall),
    Return(Option<Spanned<Expr>>),
}

#[derive(Clone, Debug)]
pub enum Expr {
    BinOp {
        op: BinOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },
    IntConst(u16),
    StringConst(String),
    BoolConst(bool),
    NullConst,
    ThisRef,
    VarRef(String),
    ArrayAccess {
        name: Spanned<String>,
        index: Box<Spanned<Expr>>,
    },
    Call(SubroutineCall),
    Group(Box<Spanned<Expr>>),
}

/// `name(args)` or `receiver.name(args)`.
#[derive(Clone, Debug)]
pub struct SubroutineCall {
    pub receiver: Option<Spanned<String>>,
    pub name: Spanned<String>,
    pub args: Vec<Spanned<Expr>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl BinOp {
    /// Binding power: (left, right). Higher binds tighter; `left < right`
    /// makes every level left-associative.
    pub fn binding_power(&self) -> (u8, u8) {
        match self {
            BinOp::Or => (1, 2),
            BinOp::And => (3, 4),
            BinOp::Eq | BinOp::Lt | BinOp::Gt => (5, 6),
            BinOp::Add | BinOp::Sub => (7, 8),
            BinOp::Mul | BinOp::Div => (9, 10),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::And => "&",
            BinOp::Or => "|",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Eq => "=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

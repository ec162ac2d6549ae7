//! AST for the C subset
//!
//! These are the trees the backend walks: statements with their control
//! structure, expressions as opaque leaves (the value emitter owns their
//! internals), and the top-level translation unit. The semantic stage
//! has already resolved names, so declaration-like nodes carry symbol
//! ids into the symbol table.

use crate::types::Type;
use qcc_common::SymbolId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression operators, carried for the value emitter's benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    Greater,
    Equal,
    NotEqual,
    Assign,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Assign => "=",
        };
        write!(f, "{text}")
    }
}

/// Expressions are lowered by the value-emission collaborator; the
/// statement lowerer treats them as opaque condition/value leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    IntLiteral(i64),
    Identifier {
        name: String,
        symbol_id: Option<SymbolId>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

/// AST statement nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Expression statement
    Expression(Expression),

    /// Compound statement (block)
    Compound(Vec<Statement>),

    /// Variable declaration
    Declaration(Declaration),

    /// If statement
    If {
        condition: Expression,
        then_stmt: Box<Statement>,
        else_stmt: Option<Box<Statement>>,
    },

    /// Pre-test loop: condition checked before the first iteration too
    While {
        condition: Expression,
        body: Box<Statement>,
    },

    /// Post-test loop: condition checked only after each iteration
    DoWhile {
        body: Box<Statement>,
        condition: Expression,
    },

    /// Counted iteration. Init may be a declaration or an expression
    /// statement; condition and step may be absent.
    For {
        init: Option<Box<Statement>>,
        condition: Option<Expression>,
        step: Option<Expression>,
        body: Box<Statement>,
    },

    /// Return statement
    Return(Option<Expression>),

    /// Break statement
    Break,

    /// Continue statement
    Continue,

    /// Empty statement (just a semicolon)
    Empty,
}

impl StatementKind {
    /// Tag name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            StatementKind::Expression(_) => "expression",
            StatementKind::Compound(_) => "compound",
            StatementKind::Declaration(_) => "declaration",
            StatementKind::If { .. } => "if",
            StatementKind::While { .. } => "while",
            StatementKind::DoWhile { .. } => "do-while",
            StatementKind::For { .. } => "for",
            StatementKind::Return(_) => "return",
            StatementKind::Break => "break",
            StatementKind::Continue => "continue",
            StatementKind::Empty => "empty",
        }
    }
}

/// Variable declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub decl_type: Type,
    pub initializer: Option<Expression>,
    /// Filled during semantic analysis
    pub symbol_id: Option<SymbolId>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub param_type: Type,
    pub symbol_id: Option<SymbolId>,
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Statement,
    /// Filled during semantic analysis
    pub symbol_id: Option<SymbolId>,
}

/// Top-level compilation unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    /// Function definition
    Function(FunctionDefinition),

    /// Global variable declaration
    Declaration(Declaration),

    /// Module inclusion, already resolved to the included unit (or to
    /// nothing, for headers that produced no code)
    Include { unit: Option<Box<TranslationUnit>> },

    /// Empty top-level item
    Empty,
}

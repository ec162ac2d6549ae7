//! Quartz C Compiler - Frontend Data Model
//!
//! The typed AST, the type model with target sizing, and the symbol
//! table. The trees defined here are built and owned by the parsing and
//! semantic stages; the backend only reads them, except for the symbol
//! fields explicitly reserved for it (stack offsets and function labels).

pub mod ast;
pub mod symbols;
pub mod types;

pub use ast::{
    BinaryOp, Declaration, Expression, FunctionDefinition, Item, Parameter, Statement,
    StatementKind, TranslationUnit,
};
pub use symbols::{Symbol, SymbolTable, SymbolTag};
pub use types::Type;

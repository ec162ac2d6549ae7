//! Quartz C Compiler - Common Types
//!
//! Shared definitions used by every phase of the compiler: error types
//! and the identifier aliases that cross crate boundaries.

pub mod error;

pub use error::CompilerError;

/// Symbol identifier, an index into the symbol table
pub type SymbolId = u32;

/// Label identifier for code generation
pub type LabelId = u32;

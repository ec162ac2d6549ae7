//! Quartz C Compiler - Codegen Support
//!
//! This crate describes the compilation target and owns the assembly
//! output layer: the operation enum the backend emits, label and operand
//! values, and the buffered output stream they are written to.

pub mod arch;
pub mod asm;
pub mod stream;

pub use arch::Architecture;
pub use asm::{AsmOp, Label, LabelKind, Operand};
pub use stream::AsmStream;

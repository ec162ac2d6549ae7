//! Quartz C Compiler - Backend
//!
//! Lowers the typed AST to a linear assembly-operation stream and
//! assigns every function its stack frame layout. Expression code
//! generation and declaration initialization are collaborators behind
//! the [`values::ValueEmitter`] and [`values::DeclEmitter`] seams; this
//! crate decides control structure and storage placement only.

pub mod flow;
pub mod frame;
pub mod values;

mod func;
mod module;
mod stmt;

pub use flow::FlowTargets;
pub use frame::assign_frame;
pub use module::{emit_unit, Emitter};
pub use values::{DeclEmitter, ValueEmitter, ValueRequest};

#[cfg(test)]
mod tests;

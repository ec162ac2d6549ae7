//! Collaborator seams for expression and declaration code generation
//!
//! The statement lowerer never looks inside an expression or an
//! initializer. It hands them to these traits together with a placement
//! request saying where the result must end up, and passes any returned
//! operand straight back into branch emission.

use qcc_codegen::{AsmStream, Operand};
use qcc_common::CompilerError;
use qcc_frontend::{Declaration, Expression, SymbolTable};

/// Where an evaluated expression's result must be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRequest {
    /// Evaluate for side effects only, discard the result
    Discard,
    /// Leave a boolean outcome in the processor flags for a branch
    Flags,
    /// Place the result in the function's return slot per the calling
    /// convention
    ReturnSlot,
}

/// Expression code generation
pub trait ValueEmitter {
    fn emit(
        &mut self,
        asm: &mut AsmStream,
        symbols: &SymbolTable,
        expr: &Expression,
        request: ValueRequest,
    ) -> Result<Operand, CompilerError>;
}

/// Declaration lowering: storage and initialization for one declaration
pub trait DeclEmitter {
    fn emit(
        &mut self,
        asm: &mut AsmStream,
        symbols: &SymbolTable,
        decl: &Declaration,
    ) -> Result<(), CompilerError>;
}

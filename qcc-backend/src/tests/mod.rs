//! Backend tests with stub collaborators
//!
//! The stubs record every placement request and leave marker comments
//! in the op stream, so tests can check the emitted control-flow shape
//! without any real expression code generation.

use crate::values::{DeclEmitter, ValueEmitter, ValueRequest};
use qcc_codegen::{AsmOp, AsmStream, Operand};
use qcc_common::CompilerError;
use qcc_frontend::{Declaration, Expression, SymbolTable};

mod lowering_tests;

/// Value emitter double: records requests, emits a marker comment
#[derive(Default, Debug)]
pub(crate) struct StubValues {
    pub requests: Vec<ValueRequest>,
}

impl ValueEmitter for StubValues {
    fn emit(
        &mut self,
        asm: &mut AsmStream,
        _symbols: &SymbolTable,
        _expr: &Expression,
        request: ValueRequest,
    ) -> Result<Operand, CompilerError> {
        self.requests.push(request);
        asm.comment("value");
        Ok(match request {
            ValueRequest::Flags => Operand::Flags,
            _ => Operand::Undefined,
        })
    }
}

/// Declaration emitter double: records names, emits a marker comment
#[derive(Default, Debug)]
pub(crate) struct StubDecls {
    pub emitted: Vec<String>,
}

impl DeclEmitter for StubDecls {
    fn emit(
        &mut self,
        asm: &mut AsmStream,
        _symbols: &SymbolTable,
        decl: &Declaration,
    ) -> Result<(), CompilerError> {
        self.emitted.push(decl.name.clone());
        asm.comment(format!("decl {}", decl.name));
        Ok(())
    }
}

/// The op stream without purely cosmetic entries
pub(crate) fn shape(asm: &AsmStream) -> Vec<AsmOp> {
    asm.ops()
        .iter()
        .filter(|op| {
            !matches!(
                op,
                AsmOp::Enter
                    | AsmOp::Leave
                    | AsmOp::FilePrologue { .. }
                    | AsmOp::FileEpilogue
            ) && !matches!(op, AsmOp::Comment(text) if text.is_empty())
        })
        .cloned()
        .collect()
}

//! Function lowering
//!
//! One prologue, one epilogue. The epilogue sits at a fresh return
//! label and every `return` in the body jumps to it, however deeply
//! nested, so stack teardown is emitted exactly once per function.

use log::debug;
use qcc_codegen::LabelKind;
use qcc_common::CompilerError;
use qcc_frontend::FunctionDefinition;

use crate::flow::FlowTargets;
use crate::frame;
use crate::values::{DeclEmitter, ValueEmitter};
use crate::Emitter;

impl<V: ValueEmitter, D: DeclEmitter> Emitter<'_, V, D> {
    pub(crate) fn function(&mut self, def: &FunctionDefinition) -> Result<(), CompilerError> {
        let sym_id = def.symbol_id.ok_or_else(|| {
            CompilerError::internal(format!(
                "function '{}' reached lowering without a resolved symbol",
                def.name
            ))
        })?;
        debug!("lowering function '{}'", def.name);

        // Mangle on first use only; a function already carrying a label
        // keeps it.
        let label = match &self.symbols.get(sym_id).label {
            Some(label) => label.clone(),
            None => {
                let mangled = self.arch.mangle(&def.name);
                self.symbols.get_mut(sym_id).label = Some(mangled.clone());
                mangled
            }
        };

        let frame_size = frame::assign_frame(self.arch, self.symbols, sym_id);

        let return_to = self.asm.create_label(LabelKind::Return);

        self.asm.comment("");
        self.asm.fn_prologue(label, frame_size);

        self.line(&def.body, FlowTargets::function(return_to))?;

        self.asm.fn_epilogue(return_to);
        Ok(())
    }
}

//! Buffered assembly output stream
//!
//! Lowering appends operations to an in-memory buffer which is rendered
//! to text in one pass at the end. Tests inspect the buffer directly
//! instead of parsing text output.

use crate::asm::{AsmOp, Label, LabelKind, Operand};
use log::trace;
use qcc_common::CompilerError;
use std::io::Write;

/// The assembly output sink for one module compilation
#[derive(Debug, Default)]
pub struct AsmStream {
    ops: Vec<AsmOp>,
    next_label: u32,
}

impl AsmStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh label. The kind only affects the printed name.
    pub fn create_label(&mut self, kind: LabelKind) -> Label {
        let label = Label {
            id: self.next_label,
            kind,
        };
        self.next_label += 1;
        label
    }

    /// Define a previously created label at the current position
    pub fn label(&mut self, label: Label) {
        self.push(AsmOp::Label(label));
    }

    /// Emit an unconditional jump
    pub fn jump(&mut self, label: Label) {
        self.push(AsmOp::Jump(label));
    }

    /// Emit a branch to `label`, taken when `condition` is false
    pub fn branch_false(&mut self, condition: Operand, label: Label) {
        self.push(AsmOp::BranchFalse(condition, label));
    }

    /// Emit a comment line; empty text renders as a blank separator
    pub fn comment(&mut self, text: impl Into<String>) {
        self.push(AsmOp::Comment(text.into()));
    }

    pub fn file_prologue(&mut self, target: impl Into<String>) {
        self.push(AsmOp::FilePrologue {
            target: target.into(),
        });
    }

    pub fn file_epilogue(&mut self) {
        self.push(AsmOp::FileEpilogue);
    }

    pub fn fn_prologue(&mut self, label: impl Into<String>, frame_size: u32) {
        self.push(AsmOp::FnPrologue {
            label: label.into(),
            frame_size,
        });
    }

    pub fn fn_epilogue(&mut self, label: Label) {
        self.push(AsmOp::FnEpilogue { label });
    }

    /// Begin a lexical block in the output (indentation only)
    pub fn enter(&mut self) {
        self.push(AsmOp::Enter);
    }

    /// End a lexical block
    pub fn leave(&mut self) {
        self.push(AsmOp::Leave);
    }

    fn push(&mut self, op: AsmOp) {
        trace!("emit: {op:?}");
        self.ops.push(op);
    }

    /// The operations emitted so far, in order
    pub fn ops(&self) -> &[AsmOp] {
        &self.ops
    }

    /// Render the buffered operations as assembly text
    pub fn flush<W: Write>(&self, out: &mut W) -> Result<(), CompilerError> {
        let mut depth: usize = 0;
        for op in &self.ops {
            match op {
                AsmOp::Enter => depth += 1,
                AsmOp::Leave => depth = depth.saturating_sub(1),
                AsmOp::Label(_)
                | AsmOp::FnPrologue { .. }
                | AsmOp::FnEpilogue { .. }
                | AsmOp::FilePrologue { .. }
                | AsmOp::FileEpilogue => writeln!(out, "{op}")?,
                AsmOp::Comment(text) if text.is_empty() => writeln!(out)?,
                _ => writeln!(out, "{}{op}", "\t".repeat(depth.max(1)))?,
            }
        }
        Ok(())
    }
}

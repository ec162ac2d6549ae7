//! Jump targets for the control construct currently being lowered
//!
//! Instead of mutable save/restore fields on the emitter, the current
//! targets are an immutable value passed down each recursive lowering
//! call. An inner loop extends its own copy; the caller's copy is
//! untouched, so restoration on the way out is automatic and an inner
//! construct's targets can never leak into an outer one.

use qcc_codegen::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTargets {
    /// The function's shared epilogue label; every `return` jumps here
    pub return_to: Label,
    /// Exit label of the innermost enclosing loop, if any
    pub break_to: Option<Label>,
    /// Continue label of the innermost enclosing loop, if any
    pub continue_to: Option<Label>,
}

impl FlowTargets {
    /// Targets at function entry: a return label and no enclosing loop
    pub fn function(return_to: Label) -> Self {
        Self {
            return_to,
            break_to: None,
            continue_to: None,
        }
    }

    /// Targets inside a loop body: break/continue replaced, return kept
    pub fn with_loop(self, break_to: Label, continue_to: Label) -> Self {
        Self {
            break_to: Some(break_to),
            continue_to: Some(continue_to),
            ..self
        }
    }
}

//! Assembly operation definitions
//!
//! The backend emits a linear stream of these operations. Everything
//! instruction-level (operand code, register use) lives behind the
//! value-emission seam; what remains here is control structure: labels,
//! jumps, conditional branches and function entry/exit.

use qcc_common::LabelId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a label was created for. Purely cosmetic: it only affects
/// the printed name, never the semantics of jumps that target it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelKind {
    Return,
    Else,
    EndIf,
    While,
    For,
    Break,
    Continue,
}

impl LabelKind {
    fn as_str(&self) -> &'static str {
        match self {
            LabelKind::Return => "ret",
            LabelKind::Else => "else",
            LabelKind::EndIf => "endif",
            LabelKind::While => "while",
            LabelKind::For => "for",
            LabelKind::Break => "break",
            LabelKind::Continue => "cont",
        }
    }
}

/// A jump target within the current module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub kind: LabelKind,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}_{}", self.kind.as_str(), self.id)
    }
}

/// Result of evaluating an expression, as seen by this layer
///
/// The lowering core never inspects these beyond passing them straight
/// back into a branch emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    /// No meaningful result (discarded or void)
    Undefined,
    /// Condition outcome left in the processor flags
    Flags,
    /// A jump target
    Label(Label),
}

/// Assembly operations emitted by the lowering core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AsmOp {
    /// Module-level prologue (section directives)
    FilePrologue { target: String },
    /// Module-level epilogue
    FileEpilogue,
    /// Function entry: label definition plus stack frame setup
    FnPrologue { label: String, frame_size: u32 },
    /// Function exit: the shared return label, stack teardown, return
    FnEpilogue { label: Label },
    /// Label definition
    Label(Label),
    /// Unconditional jump
    Jump(Label),
    /// Branch taken when the previously computed condition is false
    BranchFalse(Operand, Label),
    /// Comment line; an empty string renders as a blank separator
    Comment(String),
    /// Begin a lexical block (output indentation only)
    Enter,
    /// End a lexical block
    Leave,
}

impl fmt::Display for AsmOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmOp::FilePrologue { target } => {
                write!(f, "; qcc, target {target}\n.text")
            }
            AsmOp::FileEpilogue => write!(f, "; end of module"),
            AsmOp::FnPrologue { label, frame_size } => {
                write!(f, "{label}:\n\tenter {frame_size}, 0")
            }
            AsmOp::FnEpilogue { label } => write!(f, "{label}:\n\tleave\n\tret"),
            AsmOp::Label(label) => write!(f, "{label}:"),
            AsmOp::Jump(label) => write!(f, "jmp {label}"),
            AsmOp::BranchFalse(_, label) => write!(f, "jz {label}"),
            AsmOp::Comment(text) if text.is_empty() => Ok(()),
            AsmOp::Comment(text) => write!(f, "; {text}"),
            AsmOp::Enter | AsmOp::Leave => Ok(()),
        }
    }
}

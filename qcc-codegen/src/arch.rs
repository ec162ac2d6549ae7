//! Target architecture description
//!
//! The backend is parameterized over a small architecture descriptor:
//! word size, the calling convention's fixed frame slots, and the rule
//! for turning a function name into an assembly label.

use serde::{Deserialize, Serialize};

/// Target architecture descriptor
///
/// Frame layout convention: the caller leaves two words on the stack
/// (return address and saved frame pointer) below the parameters, plus a
/// third word holding a hidden pointer to caller-supplied storage when
/// the return value does not fit in one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    /// Target name, used in diagnostics and the file prologue
    pub name: String,
    /// Word size in bytes
    pub word_size: u32,
    /// Prefix prepended to function names when mangling into labels
    pub label_prefix: String,
}

impl Architecture {
    /// Number of housekeeping words at the base of every frame:
    /// return address and saved frame pointer.
    pub const FRAME_BASE_WORDS: u32 = 2;

    /// A 64-bit target with underscore-prefixed symbols
    pub fn amd64() -> Self {
        Self {
            name: "amd64".to_string(),
            word_size: 8,
            label_prefix: "_".to_string(),
        }
    }

    /// A 32-bit target with unprefixed symbols
    pub fn i686() -> Self {
        Self {
            name: "i686".to_string(),
            word_size: 4,
            label_prefix: String::new(),
        }
    }

    /// Mangle a function name into its assembly label
    pub fn mangle(&self, name: &str) -> String {
        format!("{}{}", self.label_prefix, name)
    }

    /// Whether a return value of the given size is passed through a
    /// hidden pointer to caller-supplied storage rather than a register.
    pub fn returns_via_pointer(&self, return_size: u32) -> bool {
        return_size > self.word_size
    }
}

//! Type model for the C subset
//!
//! Storage sizes depend on the target word size, so sizing takes the
//! architecture descriptor. Record layout is computed upstream; a record
//! type arrives here already carrying its total size.

use qcc_codegen::Architecture;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Void,
    /// char (1 byte)
    Char,
    /// int (4 bytes on every supported target)
    Int,
    /// long (one word)
    Long,
    /// Pointer to another type (one word)
    Pointer(Box<Type>),
    /// struct/union with layout already computed by the semantic stage
    Record { name: String, size: u32 },
    /// Function type; only its return type matters to the backend
    Function {
        return_type: Box<Type>,
        parameters: Vec<Type>,
    },
}

impl Type {
    /// Storage size in bytes on the given target
    pub fn size_in_bytes(&self, arch: &Architecture) -> u32 {
        match self {
            Type::Void => 0,
            Type::Char => 1,
            Type::Int => 4,
            Type::Long | Type::Pointer(_) => arch.word_size,
            Type::Record { size, .. } => *size,
            // A function denotes its address when sized
            Type::Function { .. } => arch.word_size,
        }
    }

    /// The return type, for function types; `Void` otherwise
    pub fn return_type(&self) -> &Type {
        match self {
            Type::Function { return_type, .. } => return_type,
            _ => &Type::Void,
        }
    }

    pub fn pointer_to(inner: Type) -> Type {
        Type::Pointer(Box::new(inner))
    }

    pub fn function(return_type: Type, parameters: Vec<Type>) -> Type {
        Type::Function {
            return_type: Box::new(return_type),
            parameters,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Char => write!(f, "char"),
            Type::Int => write!(f, "int"),
            Type::Long => write!(f, "long"),
            Type::Pointer(inner) => write!(f, "{inner}*"),
            Type::Record { name, .. } => write!(f, "struct {name}"),
            Type::Function { return_type, .. } => write!(f, "{return_type}()"),
        }
    }
}

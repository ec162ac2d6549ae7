//! Symbol table
//!
//! Symbols form a tree mirroring lexical scope nesting: a function's
//! children are its parameters (a contiguous prefix, in declaration
//! order) followed by the variables and nested scopes of its body. The
//! table is built by the semantic stage; the backend reads tags and
//! types and writes exactly two fields, `offset` and `label`.

use crate::types::Type;
use qcc_common::SymbolId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolTag {
    Function,
    Param,
    Variable,
    /// An anonymous lexical scope; groups its children without
    /// consuming storage itself
    Scope,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub tag: SymbolTag,
    pub ty: Type,
    pub children: Vec<SymbolId>,
    /// Signed displacement from the frame base, assigned by the backend.
    /// Parameters get non-negative offsets, automatics negative ones.
    pub offset: i32,
    /// Assembly label for function symbols, assigned on first lowering
    pub label: Option<String>,
}

/// Flat, id-indexed symbol storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol, optionally attaching it to a parent scope
    pub fn add(
        &mut self,
        parent: Option<SymbolId>,
        name: impl Into<String>,
        tag: SymbolTag,
        ty: Type,
    ) -> SymbolId {
        let id = self.symbols.len() as SymbolId;
        self.symbols.push(Symbol {
            id,
            name: name.into(),
            tag,
            ty,
            children: Vec::new(),
            offset: 0,
            label: None,
        });
        if let Some(parent) = parent {
            self.symbols[parent as usize].children.push(id);
        }
        id
    }

    /// Add an anonymous scope under `parent`
    pub fn add_scope(&mut self, parent: SymbolId) -> SymbolId {
        self.add(Some(parent), "", SymbolTag::Scope, Type::Void)
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id as usize]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id as usize]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

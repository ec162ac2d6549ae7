//! Module lowering
//!
//! Walks the translation unit's top-level items in order, dispatching
//! function definitions to function lowering and global declarations to
//! the declaration collaborator. Resolved includes are flattened into
//! the same output stream.

use log::{info, trace};
use qcc_codegen::{Architecture, AsmStream};
use qcc_common::CompilerError;
use qcc_frontend::{Item, SymbolTable, TranslationUnit};

use crate::values::{DeclEmitter, ValueEmitter};

/// Emission state for one module compilation: the target description,
/// the symbol table (written only for offsets and labels), the two
/// collaborator seams and the output stream.
pub struct Emitter<'a, V, D> {
    pub(crate) arch: &'a Architecture,
    pub(crate) symbols: &'a mut SymbolTable,
    pub(crate) values: &'a mut V,
    pub(crate) decls: &'a mut D,
    pub(crate) asm: AsmStream,
}

/// Lower a whole translation unit to an assembly-operation stream
pub fn emit_unit<V: ValueEmitter, D: DeclEmitter>(
    unit: &TranslationUnit,
    arch: &Architecture,
    symbols: &mut SymbolTable,
    values: &mut V,
    decls: &mut D,
) -> Result<AsmStream, CompilerError> {
    info!("lowering module for {}", arch.name);

    let mut emitter = Emitter {
        arch,
        symbols,
        values,
        decls,
        asm: AsmStream::new(),
    };
    emitter.asm.file_prologue(arch.name.as_str());
    emitter.unit(unit)?;
    emitter.asm.file_epilogue();

    Ok(emitter.asm)
}

impl<V: ValueEmitter, D: DeclEmitter> Emitter<'_, V, D> {
    pub(crate) fn unit(&mut self, unit: &TranslationUnit) -> Result<(), CompilerError> {
        for item in &unit.items {
            match item {
                Item::Function(def) => self.function(def)?,
                Item::Declaration(decl) => {
                    self.decls.emit(&mut self.asm, self.symbols, decl)?;
                }
                Item::Include { unit: Some(inner) } => self.unit(inner)?,
                Item::Include { unit: None } => trace!("include with no code"),
                Item::Empty => trace!("empty item"),
            }
        }
        Ok(())
    }
}

//! Stack frame layout assignment
//!
//! Runs once per function, before its body is lowered. Parameters get
//! non-negative offsets above the frame base; automatic variables get
//! negative offsets below it, assigned by a single depth-first walk in
//! declaration order, so no two live variables ever overlap.

use log::trace;
use qcc_codegen::Architecture;
use qcc_common::SymbolId;
use qcc_frontend::{SymbolTable, SymbolTag};

/// Assign stack offsets to every parameter and automatic variable of
/// `function`, returning the frame size the prologue must reserve.
pub fn assign_frame(arch: &Architecture, symbols: &mut SymbolTable, function: SymbolId) -> u32 {
    // Two words are already on the stack below the parameters: the
    // return address and the saved frame pointer.
    let mut last_offset = (Architecture::FRAME_BASE_WORDS * arch.word_size) as i32;

    // Returning through a hidden pointer takes one more word.
    let return_size = symbols
        .get(function)
        .ty
        .return_type()
        .size_in_bytes(arch);
    if arch.returns_via_pointer(return_size) {
        last_offset += arch.word_size as i32;
    }

    // Parameters are a contiguous prefix of the children, in
    // declaration order.
    let children = symbols.get(function).children.clone();
    for id in children {
        let param = symbols.get(id);
        if param.tag != SymbolTag::Param {
            break;
        }
        let size = param.ty.size_in_bytes(arch) as i32;
        let param = symbols.get_mut(id);
        param.offset = last_offset;
        trace!("param '{}' at fp{:+}", param.name, param.offset);
        last_offset += size;
    }

    // The stack grows down, so the frame size is the negation of the
    // lowest auto-variable offset.
    let lowest = assign_scope_offsets(arch, symbols, function, 0);
    (-lowest) as u32
}

/// Walk a scope's children depth-first in declaration order, placing
/// each variable below the space used so far.
fn assign_scope_offsets(
    arch: &Architecture,
    symbols: &mut SymbolTable,
    scope: SymbolId,
    mut offset: i32,
) -> i32 {
    let children = symbols.get(scope).children.clone();
    for id in children {
        match symbols.get(id).tag {
            SymbolTag::Scope => {
                offset = assign_scope_offsets(arch, symbols, id, offset);
            }
            SymbolTag::Variable => {
                let size = symbols.get(id).ty.size_in_bytes(arch) as i32;
                offset -= size;
                let var = symbols.get_mut(id);
                var.offset = offset;
                trace!("var '{}' at fp{:+}", var.name, var.offset);
            }
            SymbolTag::Param | SymbolTag::Function => {}
        }
    }
    offset
}

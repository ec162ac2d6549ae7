//! Placeholder expression and declaration emitters
//!
//! Real operand code generation is a later milestone. These emitters
//! mark the spot each expression would occupy with a comment describing
//! the expression and the requested placement, so the emitted assembly
//! shows the full control-flow skeleton and the assigned stack offsets.

use qcc_backend::{DeclEmitter, ValueEmitter, ValueRequest};
use qcc_codegen::{AsmStream, Operand};
use qcc_common::CompilerError;
use qcc_frontend::{Declaration, Expression, SymbolTable};

pub struct MarkerValues;

impl ValueEmitter for MarkerValues {
    fn emit(
        &mut self,
        asm: &mut AsmStream,
        symbols: &SymbolTable,
        expr: &Expression,
        request: ValueRequest,
    ) -> Result<Operand, CompilerError> {
        asm.comment(format!("{} -> {}", describe(symbols, expr), placement(request)));
        Ok(match request {
            ValueRequest::Flags => Operand::Flags,
            _ => Operand::Undefined,
        })
    }
}

pub struct MarkerDecls;

impl DeclEmitter for MarkerDecls {
    fn emit(
        &mut self,
        asm: &mut AsmStream,
        symbols: &SymbolTable,
        decl: &Declaration,
    ) -> Result<(), CompilerError> {
        match decl.symbol_id {
            Some(id) => {
                let sym = symbols.get(id);
                asm.comment(format!(
                    "alloc {} : {} at fp{:+}",
                    sym.name, decl.decl_type, sym.offset
                ));
            }
            None => asm.comment(format!("alloc {} : {}", decl.name, decl.decl_type)),
        }
        if let Some(init) = &decl.initializer {
            asm.comment(format!("init {} = {}", decl.name, describe(symbols, init)));
        }
        Ok(())
    }
}

fn placement(request: ValueRequest) -> &'static str {
    match request {
        ValueRequest::Discard => "void",
        ValueRequest::Flags => "flags",
        ValueRequest::ReturnSlot => "return slot",
    }
}

fn describe(symbols: &SymbolTable, expr: &Expression) -> String {
    match expr {
        Expression::IntLiteral(n) => n.to_string(),
        Expression::Identifier { name, symbol_id } => match symbol_id {
            Some(id) => format!("{name} [fp{:+}]", symbols.get(*id).offset),
            None => name.clone(),
        },
        Expression::Binary { op, left, right } => format!(
            "({} {} {})",
            describe(symbols, left),
            op,
            describe(symbols, right)
        ),
        Expression::Call { callee, arguments } => {
            format!("{}(...{} args)", describe(symbols, callee), arguments.len())
        }
    }
}

//! Lowering shape tests
//!
//! Each test lowers a hand-built function body and checks the emitted
//! op sequence against the expected control-flow shape.

use super::{shape, StubDecls, StubValues};
use crate::{emit_unit, ValueRequest};
use pretty_assertions::assert_eq;
use qcc_codegen::{Architecture, AsmOp, AsmStream, Label, LabelKind, Operand};
use qcc_common::CompilerError;
use qcc_frontend::{
    Declaration, Expression, FunctionDefinition, Item, Statement, StatementKind, SymbolTable,
    SymbolTag, TranslationUnit, Type,
};

fn stmt(kind: StatementKind) -> Statement {
    Statement::new(kind)
}

fn block(stmts: Vec<Statement>) -> Statement {
    stmt(StatementKind::Compound(stmts))
}

fn lit(n: i64) -> Expression {
    Expression::IntLiteral(n)
}

/// An expression statement, used as an opaque body marker
fn expr_stmt(n: i64) -> Statement {
    stmt(StatementKind::Expression(lit(n)))
}

fn label(id: u32, kind: LabelKind) -> Label {
    Label { id, kind }
}

fn comment(text: &str) -> AsmOp {
    AsmOp::Comment(text.to_string())
}

/// A unit holding one function `f` with the given body
fn unit_with_body(body: Statement) -> (TranslationUnit, SymbolTable) {
    let mut symbols = SymbolTable::new();
    let f = symbols.add(
        None,
        "f",
        SymbolTag::Function,
        Type::function(Type::Int, vec![]),
    );
    let unit = TranslationUnit {
        items: vec![Item::Function(FunctionDefinition {
            name: "f".to_string(),
            parameters: vec![],
            body,
            symbol_id: Some(f),
        })],
    };
    (unit, symbols)
}

fn lower(
    unit: &TranslationUnit,
    symbols: &mut SymbolTable,
) -> Result<(AsmStream, StubValues, StubDecls), CompilerError> {
    let arch = Architecture::amd64();
    let mut values = StubValues::default();
    let mut decls = StubDecls::default();
    let asm = emit_unit(unit, &arch, symbols, &mut values, &mut decls)?;
    Ok((asm, values, decls))
}

#[test]
fn test_if_else_shape() {
    // if (c) A else B =>
    //   branch-false else; A; jmp end; else:; B; end:
    let body = block(vec![stmt(StatementKind::If {
        condition: lit(1),
        then_stmt: Box::new(expr_stmt(10)),
        else_stmt: Some(Box::new(expr_stmt(20))),
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, _, _) = lower(&unit, &mut symbols).unwrap();

    let else_l = label(1, LabelKind::Else);
    let end_l = label(2, LabelKind::EndIf);
    assert_eq!(
        shape(&asm),
        vec![
            AsmOp::FnPrologue {
                label: "_f".to_string(),
                frame_size: 0
            },
            comment("value"),
            AsmOp::BranchFalse(Operand::Flags, else_l),
            comment("value"),
            AsmOp::Jump(end_l),
            AsmOp::Label(else_l),
            comment("value"),
            AsmOp::Label(end_l),
            AsmOp::FnEpilogue {
                label: label(0, LabelKind::Return)
            },
        ]
    );
}

#[test]
fn test_if_without_else_reuses_else_label() {
    let body = block(vec![stmt(StatementKind::If {
        condition: lit(1),
        then_stmt: Box::new(expr_stmt(10)),
        else_stmt: None,
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, _, _) = lower(&unit, &mut symbols).unwrap();

    let else_l = label(1, LabelKind::Else);
    let ops = shape(&asm);
    assert!(ops.contains(&AsmOp::BranchFalse(Operand::Flags, else_l)));
    assert!(ops.contains(&AsmOp::Label(else_l)));
    // No jump and no end-if label when there is no else branch
    assert!(!ops.iter().any(|op| matches!(op, AsmOp::Jump(_))));
    assert!(!ops
        .iter()
        .any(|op| matches!(op, AsmOp::Label(l) if l.kind == LabelKind::EndIf)));
}

#[test]
fn test_while_is_pre_test() {
    let body = block(vec![stmt(StatementKind::While {
        condition: lit(1),
        body: Box::new(block(vec![expr_stmt(10)])),
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, values, _) = lower(&unit, &mut symbols).unwrap();

    let top = label(1, LabelKind::While);
    let brk = label(2, LabelKind::Break);
    let cont = label(3, LabelKind::Continue);
    assert_eq!(
        shape(&asm),
        vec![
            AsmOp::FnPrologue {
                label: "_f".to_string(),
                frame_size: 0
            },
            // guard before the first iteration
            comment("value"),
            AsmOp::BranchFalse(Operand::Flags, brk),
            AsmOp::Label(top),
            comment("value"),
            AsmOp::Label(cont),
            // check once per iteration at the continue point
            comment("value"),
            AsmOp::BranchFalse(Operand::Flags, brk),
            AsmOp::Jump(top),
            AsmOp::Label(brk),
            AsmOp::FnEpilogue {
                label: label(0, LabelKind::Return)
            },
        ]
    );
    assert_eq!(
        values.requests,
        vec![
            ValueRequest::Flags,
            ValueRequest::Discard,
            ValueRequest::Flags
        ]
    );
}

#[test]
fn test_do_while_is_post_test() {
    let body = block(vec![stmt(StatementKind::DoWhile {
        body: Box::new(block(vec![expr_stmt(10)])),
        condition: lit(1),
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, values, _) = lower(&unit, &mut symbols).unwrap();

    let top = label(1, LabelKind::While);
    let brk = label(2, LabelKind::Break);
    let cont = label(3, LabelKind::Continue);
    assert_eq!(
        shape(&asm),
        vec![
            AsmOp::FnPrologue {
                label: "_f".to_string(),
                frame_size: 0
            },
            // body first, condition only at the bottom
            AsmOp::Label(top),
            comment("value"),
            AsmOp::Label(cont),
            comment("value"),
            AsmOp::BranchFalse(Operand::Flags, brk),
            AsmOp::Jump(top),
            AsmOp::Label(brk),
            AsmOp::FnEpilogue {
                label: label(0, LabelKind::Return)
            },
        ]
    );
    assert_eq!(values.requests, vec![ValueRequest::Discard, ValueRequest::Flags]);
}

#[test]
fn test_bare_for_loop_has_no_condition_check() {
    // for (;;) { break; }
    let body = block(vec![stmt(StatementKind::For {
        init: None,
        condition: None,
        step: None,
        body: Box::new(block(vec![stmt(StatementKind::Break)])),
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, values, _) = lower(&unit, &mut symbols).unwrap();

    let top = label(1, LabelKind::For);
    let brk = label(2, LabelKind::Break);
    let cont = label(3, LabelKind::Continue);
    assert_eq!(
        shape(&asm),
        vec![
            AsmOp::FnPrologue {
                label: "_f".to_string(),
                frame_size: 0
            },
            AsmOp::Label(top),
            // the break jumps to the iteration's own exit label
            AsmOp::Jump(brk),
            AsmOp::Label(cont),
            AsmOp::Jump(top),
            AsmOp::Label(brk),
            AsmOp::FnEpilogue {
                label: label(0, LabelKind::Return)
            },
        ]
    );
    assert_eq!(values.requests, vec![]);
}

#[test]
fn test_for_with_declaration_init_runs_before_loop_top() {
    let decl = Declaration {
        name: "i".to_string(),
        decl_type: Type::Int,
        initializer: Some(lit(0)),
        symbol_id: None,
    };
    let body = block(vec![stmt(StatementKind::For {
        init: Some(Box::new(stmt(StatementKind::Declaration(decl)))),
        condition: Some(lit(1)),
        step: Some(lit(2)),
        body: Box::new(block(vec![expr_stmt(10)])),
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, values, decls) = lower(&unit, &mut symbols).unwrap();

    assert_eq!(decls.emitted, vec!["i".to_string()]);

    let ops = shape(&asm);
    let init_pos = ops
        .iter()
        .position(|op| *op == comment("decl i"))
        .expect("declaration marker");
    let top_pos = ops
        .iter()
        .position(|op| matches!(op, AsmOp::Label(l) if l.kind == LabelKind::For))
        .expect("loop top label");
    assert!(init_pos < top_pos, "init must precede the loop top");

    // condition (flags), body (discard), step (discard)
    assert_eq!(
        values.requests,
        vec![
            ValueRequest::Flags,
            ValueRequest::Discard,
            ValueRequest::Discard
        ]
    );
}

#[test]
fn test_for_rejects_unhandled_initializer() {
    let body = block(vec![stmt(StatementKind::For {
        init: Some(Box::new(stmt(StatementKind::Break))),
        condition: None,
        step: None,
        body: Box::new(block(vec![])),
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let err = lower(&unit, &mut symbols).unwrap_err();
    assert_eq!(
        err,
        CompilerError::internal("unhandled for-initializer: break")
    );
}

#[test]
fn test_nested_breaks_target_their_own_loop() {
    // while (c) { while (c) { break; } break; }
    let inner = stmt(StatementKind::While {
        condition: lit(1),
        body: Box::new(block(vec![stmt(StatementKind::Break)])),
    });
    let body = block(vec![stmt(StatementKind::While {
        condition: lit(1),
        body: Box::new(block(vec![inner, stmt(StatementKind::Break)])),
    })]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, _, _) = lower(&unit, &mut symbols).unwrap();

    let outer_brk = label(2, LabelKind::Break);
    let inner_brk = label(5, LabelKind::Break);

    // Jumps to break labels, in emission order: the inner loop's break
    // first, then the outer one once the inner loop is done.
    let break_jumps: Vec<Label> = shape(&asm)
        .iter()
        .filter_map(|op| match op {
            AsmOp::Jump(l) if l.kind == LabelKind::Break => Some(*l),
            _ => None,
        })
        .collect();
    assert_eq!(break_jumps, vec![inner_brk, outer_brk]);
}

#[test]
fn test_single_epilogue_many_returns() {
    let body = block(vec![
        stmt(StatementKind::If {
            condition: lit(1),
            then_stmt: Box::new(stmt(StatementKind::Return(Some(lit(1))))),
            else_stmt: Some(Box::new(stmt(StatementKind::Return(Some(lit(2)))))),
        }),
        stmt(StatementKind::Return(Some(lit(3)))),
    ]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, values, _) = lower(&unit, &mut symbols).unwrap();

    let ops = shape(&asm);
    let ret = label(0, LabelKind::Return);
    let epilogues = ops
        .iter()
        .filter(|op| matches!(op, AsmOp::FnEpilogue { .. }))
        .count();
    let return_jumps = ops.iter().filter(|op| **op == AsmOp::Jump(ret)).count();
    assert_eq!(epilogues, 1);
    assert_eq!(return_jumps, 3);
    assert_eq!(
        values
            .requests
            .iter()
            .filter(|r| **r == ValueRequest::ReturnSlot)
            .count(),
        3
    );
}

#[test]
fn test_valueless_return_jumps_only() {
    let body = block(vec![stmt(StatementKind::Return(None))]);
    let (unit, mut symbols) = unit_with_body(body);
    let (asm, values, _) = lower(&unit, &mut symbols).unwrap();

    assert_eq!(values.requests, vec![]);
    assert!(shape(&asm).contains(&AsmOp::Jump(label(0, LabelKind::Return))));
}

#[test]
fn test_orphan_break_is_an_internal_error() {
    let body = block(vec![stmt(StatementKind::Break)]);
    let (unit, mut symbols) = unit_with_body(body);
    let err = lower(&unit, &mut symbols).unwrap_err();
    assert_eq!(err, CompilerError::internal("break outside of a loop"));
}

#[test]
fn test_orphan_continue_is_an_internal_error() {
    let body = block(vec![stmt(StatementKind::Continue)]);
    let (unit, mut symbols) = unit_with_body(body);
    let err = lower(&unit, &mut symbols).unwrap_err();
    assert_eq!(err, CompilerError::internal("continue outside of a loop"));
}

#[test]
fn test_function_without_symbol_is_an_internal_error() {
    let unit = TranslationUnit {
        items: vec![Item::Function(FunctionDefinition {
            name: "ghost".to_string(),
            parameters: vec![],
            body: block(vec![]),
            symbol_id: None,
        })],
    };
    let mut symbols = SymbolTable::new();
    let err = lower(&unit, &mut symbols).unwrap_err();
    assert!(matches!(err, CompilerError::InternalError { .. }));
}

#[test]
fn test_existing_label_is_kept() {
    let (unit, mut symbols) = unit_with_body(block(vec![]));
    symbols.get_mut(0).label = Some("custom".to_string());

    let (asm, _, _) = lower(&unit, &mut symbols).unwrap();
    assert!(shape(&asm).contains(&AsmOp::FnPrologue {
        label: "custom".to_string(),
        frame_size: 0
    }));
    assert_eq!(symbols.get(0).label.as_deref(), Some("custom"));
}

#[test]
fn test_lowering_twice_does_not_remangle() {
    let (mut unit, mut symbols) = unit_with_body(block(vec![]));
    let again = unit.items[0].clone();
    unit.items.push(again);

    let (asm, _, _) = lower(&unit, &mut symbols).unwrap();
    let prologues: Vec<String> = shape(&asm)
        .iter()
        .filter_map(|op| match op {
            AsmOp::FnPrologue { label, .. } => Some(label.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(prologues, vec!["_f".to_string(), "_f".to_string()]);
}

#[test]
fn test_include_is_flattened_into_one_stream() {
    let (inner_unit, mut symbols) = unit_with_body(block(vec![]));
    let unit = TranslationUnit {
        items: vec![
            Item::Include {
                unit: Some(Box::new(inner_unit)),
            },
            Item::Include { unit: None },
            Item::Empty,
        ],
    };

    let (asm, _, _) = lower(&unit, &mut symbols).unwrap();
    let prologues = shape(&asm)
        .iter()
        .filter(|op| matches!(op, AsmOp::FnPrologue { .. }))
        .count();
    assert_eq!(prologues, 1);
}

#[test]
fn test_global_declarations_go_to_the_collaborator() {
    let unit = TranslationUnit {
        items: vec![Item::Declaration(Declaration {
            name: "g".to_string(),
            decl_type: Type::Long,
            initializer: None,
            symbol_id: None,
        })],
    };
    let mut symbols = SymbolTable::new();
    let (_, _, decls) = lower(&unit, &mut symbols).unwrap();
    assert_eq!(decls.emitted, vec!["g".to_string()]);
}

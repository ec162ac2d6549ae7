//! Built-in demo programs
//!
//! Hand-built translation units standing in for parser output until the
//! frontend lands. Each covers a different slice of the statement
//! lowering: loops, branches, counted iteration with a declaration
//! initializer, and post-test loops.

use qcc_common::SymbolId;
use qcc_frontend::{
    BinaryOp, Declaration, Expression, FunctionDefinition, Item, Parameter, Statement,
    StatementKind, SymbolTable, SymbolTag, TranslationUnit, Type,
};

pub fn names() -> &'static [&'static str] {
    &["countdown", "sign", "sum", "events"]
}

pub fn build(name: &str) -> Option<(TranslationUnit, SymbolTable)> {
    match name {
        "countdown" => Some(countdown()),
        "sign" => Some(sign()),
        "sum" => Some(sum()),
        "events" => Some(events()),
        _ => None,
    }
}

fn ident(name: &str, id: SymbolId) -> Expression {
    Expression::Identifier {
        name: name.to_string(),
        symbol_id: Some(id),
    }
}

fn lit(n: i64) -> Expression {
    Expression::IntLiteral(n)
}

fn bin(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    Expression::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn stmt(kind: StatementKind) -> Statement {
    Statement::new(kind)
}

fn block(stmts: Vec<Statement>) -> Statement {
    stmt(StatementKind::Compound(stmts))
}

fn unit_of(def: FunctionDefinition) -> TranslationUnit {
    TranslationUnit {
        items: vec![Item::Function(def)],
    }
}

/// int countdown(int n) { while (n) { n = n - 1; } return n; }
fn countdown() -> (TranslationUnit, SymbolTable) {
    let mut symbols = SymbolTable::new();
    let f = symbols.add(
        None,
        "countdown",
        SymbolTag::Function,
        Type::function(Type::Int, vec![Type::Int]),
    );
    let n = symbols.add(Some(f), "n", SymbolTag::Param, Type::Int);

    let body = block(vec![
        stmt(StatementKind::While {
            condition: ident("n", n),
            body: Box::new(block(vec![stmt(StatementKind::Expression(bin(
                BinaryOp::Assign,
                ident("n", n),
                bin(BinaryOp::Sub, ident("n", n), lit(1)),
            )))])),
        }),
        stmt(StatementKind::Return(Some(ident("n", n)))),
    ]);

    let def = FunctionDefinition {
        name: "countdown".to_string(),
        parameters: vec![Parameter {
            name: "n".to_string(),
            param_type: Type::Int,
            symbol_id: Some(n),
        }],
        body,
        symbol_id: Some(f),
    };
    (unit_of(def), symbols)
}

/// int sign(int x) { if (x < 0) { return 0 - 1; } else { if (x > 0) { return 1; } } return 0; }
fn sign() -> (TranslationUnit, SymbolTable) {
    let mut symbols = SymbolTable::new();
    let f = symbols.add(
        None,
        "sign",
        SymbolTag::Function,
        Type::function(Type::Int, vec![Type::Int]),
    );
    let x = symbols.add(Some(f), "x", SymbolTag::Param, Type::Int);

    let inner_if = stmt(StatementKind::If {
        condition: bin(BinaryOp::Greater, ident("x", x), lit(0)),
        then_stmt: Box::new(block(vec![stmt(StatementKind::Return(Some(lit(1))))])),
        else_stmt: None,
    });
    let body = block(vec![
        stmt(StatementKind::If {
            condition: bin(BinaryOp::Less, ident("x", x), lit(0)),
            then_stmt: Box::new(block(vec![stmt(StatementKind::Return(Some(bin(
                BinaryOp::Sub,
                lit(0),
                lit(1),
            ))))])),
            else_stmt: Some(Box::new(block(vec![inner_if]))),
        }),
        stmt(StatementKind::Return(Some(lit(0)))),
    ]);

    let def = FunctionDefinition {
        name: "sign".to_string(),
        parameters: vec![Parameter {
            name: "x".to_string(),
            param_type: Type::Int,
            symbol_id: Some(x),
        }],
        body,
        symbol_id: Some(f),
    };
    (unit_of(def), symbols)
}

/// int sum(int n) {
///     int total; total = 0;
///     for (int i = 0; i < n; i = i + 1) { total = total + i; }
///     return total;
/// }
fn sum() -> (TranslationUnit, SymbolTable) {
    let mut symbols = SymbolTable::new();
    let f = symbols.add(
        None,
        "sum",
        SymbolTag::Function,
        Type::function(Type::Int, vec![Type::Int]),
    );
    let n = symbols.add(Some(f), "n", SymbolTag::Param, Type::Int);
    let total = symbols.add(Some(f), "total", SymbolTag::Variable, Type::Int);
    let loop_scope = symbols.add_scope(f);
    let i = symbols.add(Some(loop_scope), "i", SymbolTag::Variable, Type::Int);

    let body = block(vec![
        stmt(StatementKind::Declaration(Declaration {
            name: "total".to_string(),
            decl_type: Type::Int,
            initializer: None,
            symbol_id: Some(total),
        })),
        stmt(StatementKind::Expression(bin(
            BinaryOp::Assign,
            ident("total", total),
            lit(0),
        ))),
        stmt(StatementKind::For {
            init: Some(Box::new(stmt(StatementKind::Declaration(Declaration {
                name: "i".to_string(),
                decl_type: Type::Int,
                initializer: Some(lit(0)),
                symbol_id: Some(i),
            })))),
            condition: Some(bin(BinaryOp::Less, ident("i", i), ident("n", n))),
            step: Some(bin(
                BinaryOp::Assign,
                ident("i", i),
                bin(BinaryOp::Add, ident("i", i), lit(1)),
            )),
            body: Box::new(block(vec![stmt(StatementKind::Expression(bin(
                BinaryOp::Assign,
                ident("total", total),
                bin(BinaryOp::Add, ident("total", total), ident("i", i)),
            )))])),
        }),
        stmt(StatementKind::Return(Some(ident("total", total)))),
    ]);

    let def = FunctionDefinition {
        name: "sum".to_string(),
        parameters: vec![Parameter {
            name: "n".to_string(),
            param_type: Type::Int,
            symbol_id: Some(n),
        }],
        body,
        symbol_id: Some(f),
    };
    (unit_of(def), symbols)
}

/// int events(int n) {
///     do { n = n - 1; } while (n);
///     for (;;) { if (n == 0) { break; } }
///     return n;
/// }
fn events() -> (TranslationUnit, SymbolTable) {
    let mut symbols = SymbolTable::new();
    let f = symbols.add(
        None,
        "events",
        SymbolTag::Function,
        Type::function(Type::Int, vec![Type::Int]),
    );
    let n = symbols.add(Some(f), "n", SymbolTag::Param, Type::Int);

    let body = block(vec![
        stmt(StatementKind::DoWhile {
            body: Box::new(block(vec![stmt(StatementKind::Expression(bin(
                BinaryOp::Assign,
                ident("n", n),
                bin(BinaryOp::Sub, ident("n", n), lit(1)),
            )))])),
            condition: ident("n", n),
        }),
        stmt(StatementKind::For {
            init: None,
            condition: None,
            step: None,
            body: Box::new(block(vec![stmt(StatementKind::If {
                condition: bin(BinaryOp::Equal, ident("n", n), lit(0)),
                then_stmt: Box::new(block(vec![stmt(StatementKind::Break)])),
                else_stmt: None,
            })])),
        }),
        stmt(StatementKind::Return(Some(ident("n", n)))),
    ]);

    let def = FunctionDefinition {
        name: "events".to_string(),
        parameters: vec![Parameter {
            name: "n".to_string(),
            param_type: Type::Int,
            symbol_id: Some(n),
        }],
        body,
        symbol_id: Some(f),
    };
    (unit_of(def), symbols)
}

//! Statement lowering
//!
//! Recursive dispatch over the closed statement enum. Each control
//! construct emits its branch/label shape here and delegates every
//! condition, step and return value to the value-emission seam. Loop
//! bodies are lowered with extended [`FlowTargets`], so break/continue
//! always resolve to the innermost enclosing loop.

use log::trace;
use qcc_codegen::LabelKind;
use qcc_common::CompilerError;
use qcc_frontend::{Expression, Statement, StatementKind};

use crate::flow::FlowTargets;
use crate::values::{DeclEmitter, ValueEmitter, ValueRequest};
use crate::Emitter;

impl<V: ValueEmitter, D: DeclEmitter> Emitter<'_, V, D> {
    /// Lower one statement at line position
    pub(crate) fn line(&mut self, stmt: &Statement, flow: FlowTargets) -> Result<(), CompilerError> {
        self.asm.comment("");

        match &stmt.kind {
            StatementKind::Compound(stmts) => self.block(stmts, flow),
            StatementKind::If {
                condition,
                then_stmt,
                else_stmt,
            } => self.branch(condition, then_stmt, else_stmt.as_deref(), flow),
            StatementKind::While { condition, body } => self.while_loop(condition, body, flow),
            StatementKind::DoWhile { body, condition } => self.do_while_loop(body, condition, flow),
            StatementKind::For {
                init,
                condition,
                step,
                body,
            } => self.iteration(init.as_deref(), condition.as_ref(), step.as_ref(), body, flow),
            StatementKind::Return(value) => self.ret(value.as_ref(), flow),
            StatementKind::Break => match flow.break_to {
                Some(label) => {
                    self.asm.jump(label);
                    Ok(())
                }
                None => Err(CompilerError::internal("break outside of a loop")),
            },
            StatementKind::Continue => match flow.continue_to {
                Some(label) => {
                    self.asm.jump(label);
                    Ok(())
                }
                None => Err(CompilerError::internal("continue outside of a loop")),
            },
            StatementKind::Declaration(decl) => {
                self.decls.emit(&mut self.asm, self.symbols, decl)
            }
            StatementKind::Expression(expr) => {
                self.values
                    .emit(&mut self.asm, self.symbols, expr, ValueRequest::Discard)?;
                Ok(())
            }
            StatementKind::Empty => {
                trace!("empty statement");
                Ok(())
            }
        }
    }

    fn block(&mut self, stmts: &[Statement], flow: FlowTargets) -> Result<(), CompilerError> {
        self.asm.enter();
        for stmt in stmts {
            self.line(stmt, flow)?;
        }
        self.asm.leave();
        Ok(())
    }

    fn branch(
        &mut self,
        condition: &Expression,
        then_stmt: &Statement,
        else_stmt: Option<&Statement>,
        flow: FlowTargets,
    ) -> Result<(), CompilerError> {
        trace!("branch");

        let else_label = self.asm.create_label(LabelKind::Else);
        let end_label = self.asm.create_label(LabelKind::EndIf);

        // Compute the condition, requesting it be placed in the flags
        let cond = self
            .values
            .emit(&mut self.asm, self.symbols, condition, ValueRequest::Flags)?;
        self.asm.branch_false(cond, else_label);

        self.line(then_stmt, flow)?;

        if let Some(else_stmt) = else_stmt {
            self.asm.comment("");
            self.asm.jump(end_label);
            self.asm.label(else_label);

            self.line(else_stmt, flow)?;

            self.asm.label(end_label);
        } else {
            // Without an else branch the else label doubles as the end
            self.asm.label(else_label);
        }
        Ok(())
    }

    fn while_loop(
        &mut self,
        condition: &Expression,
        body: &Statement,
        flow: FlowTargets,
    ) -> Result<(), CompilerError> {
        trace!("while");

        let loop_top = self.asm.create_label(LabelKind::While);
        let break_to = self.asm.create_label(LabelKind::Break);
        let continue_to = self.asm.create_label(LabelKind::Continue);
        let inner = flow.with_loop(break_to, continue_to);

        // Pre-test: the condition also guards the first iteration
        let cond = self
            .values
            .emit(&mut self.asm, self.symbols, condition, ValueRequest::Flags)?;
        self.asm.branch_false(cond, break_to);

        self.asm.label(loop_top);
        self.line(body, inner)?;

        self.asm.comment("");
        self.asm.label(continue_to);
        let cond = self
            .values
            .emit(&mut self.asm, self.symbols, condition, ValueRequest::Flags)?;
        self.asm.branch_false(cond, break_to);
        self.asm.jump(loop_top);
        self.asm.label(break_to);

        Ok(())
    }

    fn do_while_loop(
        &mut self,
        body: &Statement,
        condition: &Expression,
        flow: FlowTargets,
    ) -> Result<(), CompilerError> {
        trace!("do-while");

        let loop_top = self.asm.create_label(LabelKind::While);
        let break_to = self.asm.create_label(LabelKind::Break);
        let continue_to = self.asm.create_label(LabelKind::Continue);
        let inner = flow.with_loop(break_to, continue_to);

        // Post-test: straight into the body, condition only at the bottom
        self.asm.label(loop_top);
        self.line(body, inner)?;

        self.asm.comment("");
        self.asm.label(continue_to);
        let cond = self
            .values
            .emit(&mut self.asm, self.symbols, condition, ValueRequest::Flags)?;
        self.asm.branch_false(cond, break_to);
        self.asm.jump(loop_top);
        self.asm.label(break_to);

        Ok(())
    }

    fn iteration(
        &mut self,
        init: Option<&Statement>,
        condition: Option<&Expression>,
        step: Option<&Expression>,
        body: &Statement,
        flow: FlowTargets,
    ) -> Result<(), CompilerError> {
        trace!("iter");

        let loop_top = self.asm.create_label(LabelKind::For);
        let break_to = self.asm.create_label(LabelKind::Break);
        let continue_to = self.asm.create_label(LabelKind::Continue);
        let inner = flow.with_loop(break_to, continue_to);

        if let Some(init) = init {
            match &init.kind {
                StatementKind::Declaration(decl) => {
                    self.decls.emit(&mut self.asm, self.symbols, decl)?;
                    self.asm.comment("");
                }
                StatementKind::Expression(expr) => {
                    self.values
                        .emit(&mut self.asm, self.symbols, expr, ValueRequest::Discard)?;
                    self.asm.comment("");
                }
                StatementKind::Empty => {}
                other => {
                    return Err(CompilerError::internal(format!(
                        "unhandled for-initializer: {}",
                        other.name()
                    )))
                }
            }
        }

        self.asm.label(loop_top);

        // An absent condition means unconditional continuation; the
        // only exits are break and return.
        if let Some(condition) = condition {
            let cond = self
                .values
                .emit(&mut self.asm, self.symbols, condition, ValueRequest::Flags)?;
            self.asm.branch_false(cond, break_to);
        }

        self.line(body, inner)?;

        self.asm.comment("");
        self.asm.label(continue_to);

        if let Some(step) = step {
            self.values
                .emit(&mut self.asm, self.symbols, step, ValueRequest::Discard)?;
            self.asm.comment("");
        }

        self.asm.jump(loop_top);
        self.asm.label(break_to);

        Ok(())
    }

    fn ret(
        &mut self,
        value: Option<&Expression>,
        flow: FlowTargets,
    ) -> Result<(), CompilerError> {
        trace!("return");

        if let Some(value) = value {
            self.values
                .emit(&mut self.asm, self.symbols, value, ValueRequest::ReturnSlot)?;
        }
        self.asm.jump(flow.return_to);
        Ok(())
    }
}

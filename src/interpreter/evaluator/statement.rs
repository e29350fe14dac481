use std::io::Write;

use crate::{ast::{Expr, Mutability, Statement},
            error::RuntimeError,
            interpreter::{evaluator::core::{ExecResult, Flow, Interpreter},
                          value::core::Value}};

impl<W: Write> Interpreter<W> {
    /// Executes a single statement.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// [`Flow::Normal`], or the `break`/`continue` signal a nested statement
    /// raised and no loop consumed yet.
    pub fn execute(&mut self, statement: &Statement) -> ExecResult {
        match statement {
            Statement::Expression { expr } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
            Statement::Console { expr } => {
                let value = self.eval(expr)?;
                writeln!(self.output, "{value}").map_err(|e| RuntimeError::Output(e.to_string()))?;
                Ok(Flow::Normal)
            },
            Statement::VariableDeclaration { name,
                                             initializer,
                                             mutability,
                                             .. } => {
                let value = match initializer {
                    Some(initializer) => self.eval(initializer)?,
                    None => Value::Null,
                };
                match mutability {
                    Mutability::Let => self.environment.define_var(name, value)?,
                    Mutability::Const => self.environment.define_const(name, value)?,
                }
                Ok(Flow::Normal)
            },
            Statement::Block { statements } => self.execute_block(statements),
            Statement::IfThen { condition,
                                then_branch,
                                else_branch, } => {
                let branch = if self.eval(condition)?.is_truthy() {
                    then_branch
                } else {
                    else_branch
                };
                match branch {
                    Some(branch) => self.execute(branch),
                    None => Ok(Flow::Normal),
                }
            },
            Statement::While { condition, body } => self.execute_while(condition, body.as_deref()),
            Statement::For { initializer,
                             condition,
                             increment,
                             body, } => self.execute_for(initializer,
                                                         condition,
                                                         increment.as_ref(),
                                                         body.as_deref()),
            Statement::Break { .. } => Ok(Flow::Break),
            Statement::Continue { .. } => Ok(Flow::Continue),
        }
    }

    /// Runs `statements` in a fresh child scope.
    ///
    /// A `break` or `continue` stops the block and is handed to the caller.
    fn execute_block(&mut self, statements: &[Statement]) -> ExecResult {
        let mut scope = self.scoped();
        for statement in statements {
            let flow = scope.execute(statement)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_while(&mut self, condition: &Expr, body: Option<&Statement>) -> ExecResult {
        while self.eval(condition)?.is_truthy() {
            if let Some(body) = body
               && self.execute(body)? == Flow::Break
            {
                break;
            }
        }
        Ok(Flow::Normal)
    }
}

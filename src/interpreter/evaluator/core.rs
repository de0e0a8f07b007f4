use std::{collections::BTreeMap, rc::Rc};

use crate::{
    ast::{Block, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::{apply_binary, apply_unary},
            frames::{CallFrame, CallStack},
        },
        semantics::{
            analyzer::Analysis,
            symbols::{Param, ScopeArena, ScopeId, Symbol},
        },
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Executes a validated program by walking its tree.
///
/// The interpreter owns no global state: it holds a read-only reference to
/// the analyzed scope arena, the runtime frame chain, and a cursor for the
/// scope whose routine is currently executing (used to resolve callee
/// symbols lexically). Evaluation is single-threaded and recursive; the
/// host call stack mirrors the program's own, so extremely deep program
/// recursion exhausts the host stack, an accepted resource limit.
///
/// Execution assumes the program passed [`analyze`](crate::interpreter::semantics::analyzer::analyze):
/// a name that reaches execution without any declaration in the frame chain
/// is an invariant violation and panics rather than producing a user-facing
/// error.
pub struct Interpreter<'a> {
    arena: &'a ScopeArena,
    stack: CallStack,
    scope: ScopeId,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter over an analysis result.
    #[must_use]
    pub fn new(analysis: &'a Analysis) -> Self {
        Self { arena: &analysis.arena,
               stack: CallStack::new(),
               scope: analysis.global }
    }

    /// Runs a program to completion.
    ///
    /// Pushes the program frame (one unset binding per global variable),
    /// executes the top-level block, and returns the frame's final
    /// bindings. Variables that were never assigned are omitted from the
    /// result.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised during execution: division
    /// by zero, a read of a never-assigned variable, an overflow, or a
    /// function that returned without producing a result.
    pub fn run(&mut self, program: &Program) -> EvalResult<BTreeMap<String, Value>> {
        let frame = self.frame_for_scope(self.scope);
        self.stack.push(frame);

        let result = self.exec_block(&program.block);
        let frame = self.stack.pop().unwrap_or_default();
        result?;

        Ok(frame.bindings())
    }

    /// Builds a frame with one unset slot per variable declared directly in
    /// the given scope (parameters and locals, not anything transitive).
    fn frame_for_scope(&self, scope: ScopeId) -> CallFrame {
        let mut frame = CallFrame::new();
        for symbol in self.arena.scope(scope).symbols() {
            if let Symbol::Var { name, .. } = symbol {
                frame.declare(name);
            }
        }
        frame
    }

    /// Executes a block. Declarations carry no runtime effect of their own
    /// (the analyzer already recorded them); only the compound statement
    /// runs.
    fn exec_block(&mut self, block: &Block) -> EvalResult<()> {
        self.exec_statement(&block.compound)
    }

    fn exec_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Compound { statements, .. } => {
                for statement in statements {
                    self.exec_statement(statement)?;
                }
                Ok(())
            },
            Statement::Assign { name, value, line } => {
                let value = self.eval_expr(value)?;
                assert!(self.stack.set(name, value),
                        "assignment to '{name}' on line {line} reached execution with no \
                         declaration in the frame chain; analysis should have rejected this \
                         program");
                Ok(())
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                let test = self.eval_expr(condition)?
                               .as_bool(condition.line_number())?;
                if test {
                    self.exec_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_statement(else_branch)
                } else {
                    Ok(())
                }
            },
            Statement::WhileDo { condition, body, .. } => {
                while self.eval_expr(condition)?
                          .as_bool(condition.line_number())?
                {
                    self.exec_statement(body)?;
                }
                Ok(())
            },
            Statement::RepeatUntil { body, condition, .. } => {
                loop {
                    self.exec_statement(body)?;
                    if self.eval_expr(condition)?
                           .as_bool(condition.line_number())?
                    {
                        return Ok(());
                    }
                }
            },
            Statement::ProcedureCall { name,
                                       arguments,
                                       line, } => {
                self.call_procedure(name, arguments, *line)
            },
            Statement::Noop => Ok(()),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::IntegerLit { value, .. } => Ok(Value::Integer(*value)),
            Expr::RealLit { value, .. } => Ok(Value::Real(*value)),
            Expr::BooleanLit { value, .. } => Ok(Value::Bool(*value)),
            Expr::Var { name, line } => match self.stack.lookup(name) {
                Some(value) => Ok(value),
                None if self.stack.declares(name) => {
                    Err(RuntimeError::UnsetVariable { name: name.clone(),
                                                      line: *line })
                },
                None => panic!("variable '{name}' on line {line} reached execution with no \
                                declaration in the frame chain; analysis should have rejected \
                                this program"),
            },
            Expr::BinOp { left, op, right, line } => {
                // Left before right; fixed for determinism.
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                apply_binary(*op, lhs, rhs, *line)
            },
            Expr::UnaryOp { op, operand, line } => {
                let value = self.eval_expr(operand)?;
                apply_unary(*op, value, *line)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => self.call_function(name, arguments, *line),
        }
    }

    fn call_procedure(&mut self, name: &str, arguments: &[Expr], line: usize) -> EvalResult<()> {
        let Some(Symbol::Procedure { params, body, scope, .. }) =
            self.arena.lookup(self.scope, name, true)
        else {
            panic!("procedure call '{name}' on line {line} did not resolve to a procedure \
                    symbol; analysis should have rejected this program");
        };
        let (params, body, scope) = (params.clone(), Rc::clone(body), *scope);

        self.execute_call(&params, &body, scope, arguments, None)?;
        Ok(())
    }

    fn call_function(&mut self, name: &str, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        let Some(Symbol::Function { params, body, scope, .. }) =
            self.arena.lookup(self.scope, name, true)
        else {
            panic!("function call '{name}' on line {line} did not resolve to a function symbol; \
                    analysis should have rejected this program");
        };
        let (params, body, scope) = (params.clone(), Rc::clone(body), *scope);

        // By convention the body assigns the result to the function's own
        // name; that slot is the return value.
        self.execute_call(&params, &body, scope, arguments, Some(name))?
            .ok_or_else(|| RuntimeError::MissingReturnValue { name: name.to_string(),
                                                              line })
    }

    /// The shared call protocol.
    ///
    /// Evaluates the arguments in the CALLER's frame, left to right; builds
    /// the callee frame (every local and parameter unset, plus the return
    /// slot for functions); binds parameters in declaration order; pushes
    /// the frame, whose parent is whatever frame was active at the call
    /// (the dynamic chain documented in
    /// [`frames`](crate::interpreter::evaluator::frames)); executes the
    /// body with the lexical cursor moved to the callee's scope, pops, and
    /// reads the return slot if one was requested.
    fn execute_call(&mut self,
                    params: &[Param],
                    body: &Block,
                    callee_scope: ScopeId,
                    arguments: &[Expr],
                    return_slot: Option<&str>)
                    -> EvalResult<Option<Value>> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_expr(argument)?);
        }

        let mut frame = self.frame_for_scope(callee_scope);
        if let Some(name) = return_slot {
            frame.declare(name);
        }
        for (param, value) in params.iter().zip(values) {
            frame.bind(&param.name, value);
        }

        self.stack.push(frame);
        let enclosing = self.scope;
        self.scope = callee_scope;
        let result = self.exec_block(body);
        self.scope = enclosing;
        let frame = self.stack.pop().unwrap_or_default();
        result?;

        Ok(return_slot.and_then(|name| frame.get(name)))
    }
}

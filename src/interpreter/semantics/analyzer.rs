use crate::{
    ast::{Block, Declaration, Expr, FunctionDecl, ParamDecl, Program, ProcedureDecl, Statement,
          TypeSpec, VarDecl},
    error::SemanticError,
    interpreter::semantics::{
        symbols::{BuiltinType, Param, ScopeArena, ScopeId, Symbol},
        types::type_of,
    },
};

/// Result type used by the analyzer.
pub type AnalyzeResult<T> = Result<T, SemanticError>;

/// The product of a successful analysis: the populated scope arena plus the
/// ids the evaluator needs to get started.
#[derive(Debug)]
pub struct Analysis {
    /// Every scope of the program, parent-linked.
    pub arena:  ScopeArena,
    /// The root scope holding the builtin types and the program name.
    pub root:   ScopeId,
    /// The global scope holding the program's top-level declarations.
    pub global: ScopeId,
}

/// Statically validates a parsed program.
///
/// Walks the AST once in declaration order, building the scope chain and
/// checking scope and type correctness. Analysis is fail-fast: the first
/// violation is returned and execution must not proceed.
///
/// # Errors
/// Returns the [`SemanticError`] for the first violated rule: duplicate or
/// undefined symbols, unknown types, assignment or argument type
/// mismatches, calls naming the wrong kind of symbol, or non-boolean
/// conditions.
///
/// # Example
/// ```
/// use pascaline::interpreter::semantics::analyzer::analyze;
/// use pascaline::parse_source;
///
/// let program = parse_source("PROGRAM demo; VAR a : INTEGER; BEGIN a := 5 END.").unwrap();
/// assert!(analyze(&program).is_ok());
///
/// let program = parse_source("PROGRAM demo; VAR a : INTEGER; BEGIN a := 5.0 END.").unwrap();
/// assert!(analyze(&program).is_err());
/// ```
pub fn analyze(program: &Program) -> AnalyzeResult<Analysis> {
    let mut arena = ScopeArena::new();
    let root = arena.push_scope(None);

    for ty in [BuiltinType::Integer, BuiltinType::Real, BuiltinType::Boolean] {
        arena.define(root, Symbol::Builtin(ty))
             .unwrap_or_else(|_| unreachable!("builtins are distinct"));
    }
    define(&mut arena,
           root,
           Symbol::Program { name: program.name.clone(), },
           program.line)?;

    let global = arena.push_scope(Some(root));

    let mut analyzer = Analyzer { arena, current: global };
    analyzer.check_block(&program.block)?;

    Ok(Analysis { arena: analyzer.arena,
                  root,
                  global })
}

/// Defines a symbol, translating a collision into a [`SemanticError`].
fn define(arena: &mut ScopeArena,
          scope: ScopeId,
          symbol: Symbol,
          line: usize)
          -> AnalyzeResult<()> {
    arena.define(scope, symbol).map_err(|rejected| {
                                   SemanticError::DuplicateSymbol { name: rejected.name()
                                                                                  .to_string(),
                                                                    line }
                               })
}

/// The walking state: the arena being populated and a cursor for the scope
/// currently being analyzed.
struct Analyzer {
    arena:   ScopeArena,
    current: ScopeId,
}

impl Analyzer {
    fn check_block(&mut self, block: &Block) -> AnalyzeResult<()> {
        for declaration in &block.declarations {
            match declaration {
                Declaration::Var(decl) => self.check_var_decl(decl)?,
                Declaration::Procedure(decl) => self.check_procedure_decl(decl)?,
                Declaration::Function(decl) => self.check_function_decl(decl)?,
            }
        }
        self.check_statement(&block.compound)
    }

    /// Resolves a type spec to a builtin type through the scope chain.
    fn resolve_type(&self, spec: &TypeSpec) -> AnalyzeResult<BuiltinType> {
        match self.arena.lookup(self.current, &spec.name, true) {
            Some(Symbol::Builtin(ty)) => Ok(*ty),
            _ => Err(SemanticError::UnknownType { name: spec.name.clone(),
                                                  line: spec.line }),
        }
    }

    fn check_var_decl(&mut self, decl: &VarDecl) -> AnalyzeResult<()> {
        let ty = self.resolve_type(&decl.type_spec)?;
        define(&mut self.arena,
               self.current,
               Symbol::Var { name: decl.name.clone(),
                             ty },
               decl.line)
    }

    /// Resolves a declaration's formal parameters.
    fn resolve_params(&self, params: &[ParamDecl]) -> AnalyzeResult<Vec<Param>> {
        params.iter()
              .map(|param| {
                  Ok(Param { name: param.name.clone(),
                             ty:   self.resolve_type(&param.type_spec)?, })
              })
              .collect()
    }

    /// Opens the routine's own scope, defines its parameters there, and
    /// checks its body with that scope current.
    fn check_routine_body(&mut self,
                          scope: ScopeId,
                          params: &[Param],
                          block: &Block,
                          line: usize)
                          -> AnalyzeResult<()> {
        for param in params {
            define(&mut self.arena,
                   scope,
                   Symbol::Var { name: param.name.clone(),
                                 ty:   param.ty, },
                   line)?;
        }

        let enclosing = self.current;
        self.current = scope;
        let result = self.check_block(block);
        self.current = enclosing;
        result
    }

    fn check_procedure_decl(&mut self, decl: &ProcedureDecl) -> AnalyzeResult<()> {
        let params = self.resolve_params(&decl.params)?;
        let scope = self.arena.push_scope(Some(self.current));

        // Defined in the enclosing scope before the body is visited, so the
        // body can call the procedure recursively.
        define(&mut self.arena,
               self.current,
               Symbol::Procedure { name: decl.name.clone(),
                                   params: params.clone(),
                                   body: decl.block.clone(),
                                   scope },
               decl.line)?;

        self.check_routine_body(scope, &params, &decl.block, decl.line)
    }

    fn check_function_decl(&mut self, decl: &FunctionDecl) -> AnalyzeResult<()> {
        let params = self.resolve_params(&decl.params)?;
        let return_type = self.resolve_type(&decl.return_spec)?;
        let scope = self.arena.push_scope(Some(self.current));

        define(&mut self.arena,
               self.current,
               Symbol::Function { name: decl.name.clone(),
                                  params: params.clone(),
                                  return_type,
                                  body: decl.block.clone(),
                                  scope },
               decl.line)?;

        self.check_routine_body(scope, &params, &decl.block, decl.line)
    }

    fn check_statement(&mut self, statement: &Statement) -> AnalyzeResult<()> {
        match statement {
            Statement::Compound { statements, .. } => {
                for statement in statements {
                    self.check_statement(statement)?;
                }
                Ok(())
            },
            Statement::Assign { name, value, line } => self.check_assign(name, value, *line),
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                self.check_condition(condition, *line)?;
                self.check_statement(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_statement(else_branch)?;
                }
                Ok(())
            },
            Statement::WhileDo { condition, body, line } => {
                self.check_condition(condition, *line)?;
                self.check_statement(body)
            },
            Statement::RepeatUntil { body, condition, line } => {
                self.check_condition(condition, *line)?;
                self.check_statement(body)
            },
            Statement::ProcedureCall { name,
                                       arguments,
                                       line, } => {
                self.check_procedure_call(name, arguments, *line)
            },
            Statement::Noop => Ok(()),
        }
    }

    /// Checks an assignment: the target must resolve to a variable (or to
    /// a function, supporting the convention that a function body assigns
    /// its result to the function's own name), and the right-hand side's
    /// static type must equal the declared type exactly. No implicit
    /// widening: assigning an INTEGER expression to a REAL variable is as
    /// invalid as the reverse.
    fn check_assign(&mut self, name: &str, value: &Expr, line: usize) -> AnalyzeResult<()> {
        let declared = match self.arena.lookup(self.current, name, true) {
            Some(Symbol::Var { ty, .. }) => *ty,
            Some(Symbol::Function { return_type, .. }) => *return_type,
            Some(_) => {
                return Err(SemanticError::NotAssignable { name: name.to_string(),
                                                          line });
            },
            None => {
                return Err(SemanticError::UndefinedSymbol { name: name.to_string(),
                                                            line });
            },
        };

        self.check_expr(value)?;

        let found = type_of(value, &self.arena, self.current);
        if found == Some(declared) {
            Ok(())
        } else {
            Err(SemanticError::TypeMismatch { expected: declared,
                                              found,
                                              line })
        }
    }

    /// Checks the test of an IF, WHILE, or REPEAT: it must be BOOLEAN.
    fn check_condition(&mut self, condition: &Expr, line: usize) -> AnalyzeResult<()> {
        self.check_expr(condition)?;

        let found = type_of(condition, &self.arena, self.current);
        if found == Some(BuiltinType::Boolean) {
            Ok(())
        } else {
            Err(SemanticError::NonBooleanCondition { found, line })
        }
    }

    fn check_procedure_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> AnalyzeResult<()> {
        let params = match self.arena.lookup(self.current, name, true) {
            Some(Symbol::Procedure { params, .. }) => params.clone(),
            Some(_) => {
                return Err(SemanticError::NotCallable { name: name.to_string(),
                                                        line });
            },
            None => {
                return Err(SemanticError::UndefinedSymbol { name: name.to_string(),
                                                            line });
            },
        };

        self.check_arguments(name, &params, arguments, line)
    }

    /// Checks a call's arguments: each must analyze on its own, the count
    /// must match the formal parameter list, and each argument's static
    /// type must equal the corresponding parameter's declared type.
    fn check_arguments(&mut self,
                       name: &str,
                       params: &[Param],
                       arguments: &[Expr],
                       line: usize)
                       -> AnalyzeResult<()> {
        if params.len() != arguments.len() {
            return Err(SemanticError::ArgumentCountMismatch { name: name.to_string(),
                                                              expected: params.len(),
                                                              found: arguments.len(),
                                                              line });
        }

        for (position, (param, argument)) in params.iter().zip(arguments).enumerate() {
            self.check_expr(argument)?;

            let found = type_of(argument, &self.arena, self.current);
            if found != Some(param.ty) {
                return Err(SemanticError::ArgumentTypeMismatch { name: name.to_string(),
                                                                 position: position + 1,
                                                                 expected: param.ty,
                                                                 found,
                                                                 line });
            }
        }

        Ok(())
    }

    /// Checks every name mentioned by an expression, and the callee kind
    /// and arguments of any function call inside it.
    fn check_expr(&mut self, expr: &Expr) -> AnalyzeResult<()> {
        match expr {
            Expr::IntegerLit { .. } | Expr::RealLit { .. } | Expr::BooleanLit { .. } => Ok(()),
            Expr::Var { name, line } => {
                if self.arena.lookup(self.current, name, true).is_some() {
                    Ok(())
                } else {
                    Err(SemanticError::UndefinedSymbol { name: name.clone(),
                                                         line: *line })
                }
            },
            Expr::BinOp { left, right, .. } => {
                self.check_expr(left)?;
                self.check_expr(right)
            },
            Expr::UnaryOp { operand, .. } => self.check_expr(operand),
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => {
                let params = match self.arena.lookup(self.current, name, true) {
                    Some(Symbol::Function { params, .. }) => params.clone(),
                    Some(_) => {
                        return Err(SemanticError::NotCallable { name: name.clone(),
                                                                line: *line });
                    },
                    None => {
                        return Err(SemanticError::UndefinedSymbol { name: name.clone(),
                                                                    line: *line });
                    },
                };

                self.check_arguments(name, &params, arguments, *line)
            },
        }
    }
}

use std::{collections::HashMap, rc::Rc};

use crate::ast::Block;

/// One of the language's builtin types.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BuiltinType {
    /// `INTEGER`
    Integer,
    /// `REAL`
    Real,
    /// `BOOLEAN`
    Boolean,
}

impl BuiltinType {
    /// The canonical name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl std::fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A resolved formal parameter of a procedure or function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Canonical name of the parameter.
    pub name: String,
    /// The parameter's resolved type.
    pub ty:   BuiltinType,
}

/// A named entity produced by semantic analysis.
///
/// Variables always carry a [`BuiltinType`], so the invariant that a
/// variable's type resolves to a builtin holds by construction. Procedure
/// and function symbols capture their body and their own scope so the
/// evaluator can reuse both at call time.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A builtin type name such as `INTEGER`.
    Builtin(BuiltinType),
    /// The program's own name.
    Program {
        /// Canonical name of the program.
        name: String,
    },
    /// A declared variable.
    Var {
        /// Canonical name of the variable.
        name: String,
        /// The variable's resolved type.
        ty:   BuiltinType,
    },
    /// A declared procedure.
    Procedure {
        /// Canonical name of the procedure.
        name:   String,
        /// Formal parameters, in declaration order.
        params: Vec<Param>,
        /// The procedure body.
        body:   Rc<Block>,
        /// The procedure's own scope, holding its parameters and locals.
        scope:  ScopeId,
    },
    /// A declared function.
    Function {
        /// Canonical name of the function.
        name:        String,
        /// Formal parameters, in declaration order.
        params:      Vec<Param>,
        /// The declared return type.
        return_type: BuiltinType,
        /// The function body.
        body:        Rc<Block>,
        /// The function's own scope, holding its parameters and locals.
        scope:       ScopeId,
    },
}

impl Symbol {
    /// The canonical name this symbol is defined under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(ty) => ty.name(),
            Self::Program { name }
            | Self::Var { name, .. }
            | Self::Procedure { name, .. }
            | Self::Function { name, .. } => name,
        }
    }
}

/// Index of a scope inside a [`ScopeArena`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScopeId(usize);

/// One scope: a mapping from canonical name to symbol, plus an optional
/// link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    parent:  Option<ScopeId>,
}

impl Scope {
    /// Iterates over the symbols defined directly in this scope, in no
    /// particular order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// The enclosing scope, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<ScopeId> {
        self.parent
    }
}

/// Owns every scope of an analyzed program.
///
/// Scopes are linked to their parents by index rather than by reference, so
/// a scope captured inside a [`Symbol::Procedure`] or [`Symbol::Function`]
/// stays valid for as long as the arena does. The arena is immutable once
/// analysis finishes and is shared read-only with the evaluator.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new scope with the given parent and returns its id.
    pub fn push_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { symbols: HashMap::new(),
                                 parent });
        id
    }

    /// Accesses a scope by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this arena; ids are only ever
    /// produced by [`Self::push_scope`], so an out-of-range id is a bug.
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// Defines a symbol in exactly the given scope.
    ///
    /// The duplicate check deliberately does NOT recurse: shadowing a name
    /// from an enclosing scope is legal, redefining one within the same
    /// scope is not.
    ///
    /// # Errors
    /// Returns the rejected symbol when its name is already defined in this
    /// scope.
    pub fn define(&mut self, id: ScopeId, symbol: Symbol) -> Result<(), Symbol> {
        let scope = &mut self.scopes[id.0];
        if scope.symbols.contains_key(symbol.name()) {
            return Err(symbol);
        }
        scope.symbols.insert(symbol.name().to_string(), symbol);
        Ok(())
    }

    /// Looks up a name starting from the given scope.
    ///
    /// With `recurse` set, the search walks the parent chain; without it,
    /// only the given scope is consulted (the duplicate-definition check
    /// needs the non-recursive form, general name resolution the recursive
    /// one).
    #[must_use]
    pub fn lookup(&self, id: ScopeId, name: &str, recurse: bool) -> Option<&Symbol> {
        let scope = &self.scopes[id.0];
        if let Some(symbol) = scope.symbols.get(name) {
            return Some(symbol);
        }
        if recurse && let Some(parent) = scope.parent {
            return self.lookup(parent, name, recurse);
        }
        None
    }
}

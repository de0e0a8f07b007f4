use crate::interpreter::semantics::symbols::BuiltinType;

#[derive(Debug)]
/// Represents all errors that can be detected by static analysis.
///
/// Analysis is fail-fast: the first error aborts the walk and execution
/// never starts.
pub enum SemanticError {
    /// A declaration referred to a type name that does not resolve to a
    /// builtin type.
    UnknownType {
        /// The unresolved type name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name was defined twice in the same scope.
    DuplicateSymbol {
        /// The name of the symbol.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name was used but never declared in any enclosing scope.
    UndefinedSymbol {
        /// The name of the symbol.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expression's static type does not match the declared type of the
    /// assignment target.
    TypeMismatch {
        /// The declared type of the target.
        expected: BuiltinType,
        /// The static type of the expression, if it has one.
        found:    Option<BuiltinType>,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A call named a symbol that is not the right kind of callable.
    NotCallable {
        /// The name of the symbol.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The target of an assignment is not a variable (or function result).
    NotAssignable {
        /// The name of the symbol.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The test of an IF, WHILE, or REPEAT was not a boolean expression.
    NonBooleanCondition {
        /// The static type of the test expression, if it has one.
        found: Option<BuiltinType>,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A call supplied the wrong number of arguments.
    ArgumentCountMismatch {
        /// The name of the callee.
        name:     String,
        /// How many parameters the callee declares.
        expected: usize,
        /// How many arguments the call supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument's static type does not match the declared parameter type.
    ArgumentTypeMismatch {
        /// The name of the callee.
        name:     String,
        /// One-based position of the offending argument.
        position: usize,
        /// The declared type of the parameter.
        expected: BuiltinType,
        /// The static type of the argument, if it has one.
        found:    Option<BuiltinType>,
        /// The source line where the error occurred.
        line:     usize,
    },
}

fn describe(ty: Option<BuiltinType>) -> String {
    ty.map_or_else(|| "an expression with no type".to_string(), |t| t.to_string())
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType { name, line } => {
                write!(f, "Error on line {line}: Unknown type '{name}'.")
            },
            Self::DuplicateSymbol { name, line } => {
                write!(f, "Error on line {line}: Symbol '{name}' is already defined in this scope.")
            },
            Self::UndefinedSymbol { name, line } => {
                write!(f, "Error on line {line}: Undefined symbol '{name}'.")
            },
            Self::TypeMismatch { expected,
                                 found,
                                 line, } => {
                write!(f,
                       "Error on line {line}: Type mismatch: expected {expected}, found {}.",
                       describe(*found))
            },
            Self::NotCallable { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not callable here.")
            },
            Self::NotAssignable { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not assignable.")
            },
            Self::NonBooleanCondition { found, line } => {
                write!(f,
                       "Error on line {line}: Condition must be BOOLEAN, found {}.",
                       describe(*found))
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => {
                write!(f,
                       "Error on line {line}: '{name}' takes {expected} argument(s), but {found} were supplied.")
            },
            Self::ArgumentTypeMismatch { name,
                                         position,
                                         expected,
                                         found,
                                         line, } => {
                write!(f,
                       "Error on line {line}: Argument {position} of '{name}' must be {expected}, found {}.",
                       describe(*found))
            },
        }
    }
}

impl std::error::Error for SemanticError {}

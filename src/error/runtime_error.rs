#[derive(Debug)]
/// Represents all errors that can occur while executing a validated program.
///
/// Note that undefined *names* at execution time are not represented here:
/// a name with no declaration anywhere in the frame chain means semantic
/// analysis failed to reject the program, and the evaluator treats that as
/// an invariant violation (panic), not a reportable error.
pub enum RuntimeError {
    /// Attempted division by zero, with `DIV` or `/`.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Read a variable that was declared but never assigned anywhere in the
    /// frame chain.
    UnsetVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function body returned without assigning to the function's name.
    MissingReturnValue {
        /// The name of the function.
        name: String,
        /// The source line of the call.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer was too large to promote to a real exactly.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::UnsetVariable { name, line } => {
                write!(f, "Error on line {line}: Variable '{name}' was read before being assigned.")
            },
            Self::MissingReturnValue { name, line } => {
                write!(f,
                       "Error on line {line}: Function '{name}' returned without assigning a result.")
            },
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected number."),
            Self::ExpectedBoolean { line } => write!(f, "Error on line {line}: Expected boolean."),
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}

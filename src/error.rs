/// Lexing and parsing errors.
///
/// Defines all error types that can occur while tokenizing source text or
/// building the syntax tree: unrecognized characters, unexpected tokens,
/// premature end of input, and trailing garbage after the program terminator.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the error types that can be raised while executing a validated
/// program: division by zero, reads of unset variables, functions that never
/// produce a return value, and failed numeric conversions.
pub mod runtime_error;
/// Semantic analysis errors.
///
/// Contains the error types raised by the static validation pass: duplicate
/// and undefined symbols, type mismatches, calls to the wrong kind of symbol,
/// non-boolean loop and branch conditions, and argument-list mismatches.
pub mod semantic_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;

/// Binary expression productions.
///
/// Implements the precedence ladder `expr` / `term` / `boolean_expr` on top
/// of a shared left-fold helper, so every left-associative binary production
/// is one call with an operator class.
pub mod binary;
/// Top-level productions: program, block, declarations, and type specs.
pub mod core;
/// The `factor` production: unary operators, literals, parenthesized
/// boolean expressions, variables, and function calls.
pub mod factor;
/// Statement productions: compound, conditional, loops, assignment, and
/// procedure calls.
pub mod statement;
/// Small shared helpers for token expectation and list parsing.
pub mod utils;

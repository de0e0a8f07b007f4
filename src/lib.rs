//! # pascaline
//!
//! pascaline is an interpreter for a small Pascal subset, written in Rust.
//! It tokenizes source text, parses it by recursive descent into an AST,
//! statically validates scope and type correctness, and executes the
//! validated tree, producing the program's final variable state.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::BTreeMap;

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{
        evaluator::core::Interpreter,
        lexer::tokenize,
        parser::core::parse_program,
        semantics::analyzer::analyze,
    },
};
pub use crate::interpreter::value::Value;

/// Defines the structure of parsed code.
///
/// This module declares the AST types that represent the syntactic
/// structure of source code as a tree: the program root, blocks,
/// declarations, statements, and expressions. The tree is built once by the
/// parser and never mutated; the analyzer and evaluator only read it.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Keeps routine bodies reference-counted so symbols can capture them.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// analyzing, or executing code. Each stage has its own enum; all carry
/// line information and implement the standard error traits.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches line numbers and detailed messages for context.
/// - Keeps runtime invariant violations (which panic) apart from
///   user-facing errors (which are returned).
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, semantic analysis, evaluation,
/// value representations, and error handling to provide a complete pipeline
/// from source text to final variable state.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, analyzer, evaluator.
/// - Provides entry points for parsing and running programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert `i64` to `f64` without silent data loss.
pub mod util;

/// Parses a source string into a [`Program`] without analyzing or running
/// it.
///
/// Parsing is deterministic and stateless: parsing the same source twice
/// yields structurally identical trees.
///
/// # Errors
/// Returns a [`ParseError`] for the first lexical or syntactic problem.
///
/// # Examples
/// ```
/// use pascaline::parse_source;
///
/// let source = "PROGRAM demo; BEGIN END.";
/// let first = parse_source(source).unwrap();
/// let second = parse_source(source).unwrap();
/// assert_eq!(first, second);
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(&mut tokens.iter().peekable())
}

/// Runs a whole program and returns its final variable state.
///
/// This is the main entry point: it lexes, parses, analyzes, and executes
/// the source, surfacing the first error of the earliest failing stage.
/// Execution never starts for a program that fails analysis. On success the
/// result maps each assigned top-level variable's canonical name to its
/// final value.
///
/// # Errors
/// Returns the stage error (lex/parse, semantic, or runtime) boxed as a
/// `dyn std::error::Error`.
///
/// # Examples
/// ```
/// use pascaline::{Value, run_program};
///
/// let bindings = run_program("PROGRAM demo; VAR a : INTEGER; BEGIN a := 4 + 5 * 3 END.").unwrap();
/// assert_eq!(bindings["A"], Value::Integer(19));
///
/// // 'b' is never declared, so analysis rejects the program.
/// let result = run_program("PROGRAM demo; VAR a : INTEGER; BEGIN a := b END.");
/// assert!(result.is_err());
/// ```
pub fn run_program(source: &str) -> Result<BTreeMap<String, Value>, Box<dyn std::error::Error>> {
    let program = parse_source(source)?;
    let analysis = analyze(&program)?;

    let mut interpreter = Interpreter::new(&analysis);
    Ok(interpreter.run(&program)?)
}

/// The evaluator module executes validated AST nodes and computes results.
///
/// The evaluator traverses the tree, executes statements against the runtime
/// frame chain, evaluates expressions, and produces the program's final
/// variable state. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Executes every statement and expression kind the analyzer admits.
/// - Maintains the call-frame chain across procedure and function calls.
/// - Reports runtime errors such as division by zero or missing results.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, identifiers, operators, delimiters, and reserved words. This is
/// the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source locations.
/// - Handles numeric and boolean literals, identifiers, and operators.
/// - Skips whitespace and comments; reports unrecognized characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer by recursive
/// descent, one function per grammar production, and constructs an AST
/// representing the program. This enables the later phases to validate and
/// execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates the grammar, reporting errors with the production in
///   progress and the offending token.
/// - Covers the full statement, declaration, and expression grammar.
pub mod parser;
/// The semantics module statically validates a parsed program.
///
/// Semantic analysis walks the AST once, building a chain of scopes that
/// records every declared name, and rejects programs that misuse names or
/// types before any of their code runs.
///
/// # Responsibilities
/// - Builds the scope arena consumed later by the evaluator.
/// - Enforces declaration, scoping, and exact-type-match rules.
/// - Provides the pure type analyzer used for all static type questions.
pub mod semantics;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum over the language's three types.
/// - Implements checked conversions and numeric promotion.
/// - Serializes values for the JSON rendering of the final state.
pub mod value;

/// The semantic analyzer walks the AST once, builds the scope chain, and
/// checks every scope and type rule before execution.
pub mod analyzer;
/// Symbols and the scope arena.
///
/// Declares the `Symbol` variants produced during analysis and the
/// `ScopeArena` that owns every scope, chained by parent indices so that
/// scopes captured inside procedure and function symbols outlive the
/// declaration walk.
pub mod symbols;
/// The type analyzer: a pure, side-effect-free mapping from expressions to
/// their static types.
pub mod types;

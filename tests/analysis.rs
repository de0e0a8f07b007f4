use pascaline::{
    error::SemanticError,
    interpreter::{
        lexer::tokenize,
        parser::binary::parse_boolean_expr,
        semantics::{
            analyzer::{Analysis, analyze},
            symbols::{BuiltinType, ScopeArena, Symbol},
            types::type_of,
        },
    },
    parse_source,
};

fn analyze_source(src: &str) -> Result<Analysis, SemanticError> {
    let program = parse_source(src).unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"));
    analyze(&program)
}

fn assert_valid(src: &str) {
    if let Err(e) = analyze_source(src) {
        panic!("Analysis failed: {e}\n{src}");
    }
}

fn assert_invalid(src: &str) {
    if analyze_source(src).is_ok() {
        panic!("Analysis succeeded but was expected to fail:\n{src}");
    }
}

#[test]
fn valid_assignments_pass() {
    assert_valid("PROGRAM test; VAR a : INTEGER; BEGIN a := 5; END.");
    assert_valid("PROGRAM test; VAR a : REAL; BEGIN a := 5.0; END.");
    assert_valid("PROGRAM test; VAR a : REAL; BEGIN a := 5.0 / 3; END.");
}

#[test]
fn assignments_must_match_declared_types_exactly() {
    assert_invalid("PROGRAM test; VAR a : INTEGER; BEGIN a := 5.0; END.");
    assert_invalid("PROGRAM test; VAR a : REAL; BEGIN a := 5; END.");
    assert_invalid("PROGRAM test; VAR a : INTEGER; BEGIN a := 5.0 / 3; END.");
    assert_invalid("PROGRAM test; VAR a : BOOLEAN; BEGIN a := 1; END.");
}

#[test]
fn undefined_names_are_rejected() {
    assert_invalid("PROGRAM test; VAR a : INTEGER; BEGIN b := 5; END.");
    assert_invalid("PROGRAM test; VAR a : INTEGER; BEGIN a := b; END.");
}

#[test]
fn duplicate_definitions_in_one_scope_are_rejected() {
    assert_invalid("PROGRAM test; VAR x : INTEGER; x : REAL; BEGIN END.");
}

#[test]
fn local_scopes_and_parameters_resolve() {
    assert_valid("PROGRAM test; PROCEDURE myproc; VAR x : INTEGER; BEGIN x := 5; END; \
                  BEGIN END.");
    assert_valid("PROGRAM test; PROCEDURE myproc(a : INTEGER); VAR x : INTEGER; \
                  BEGIN x := a; END; BEGIN END.");
}

#[test]
fn procedures_may_refer_to_enclosing_scopes() {
    assert_valid("PROGRAM test; VAR x : REAL; PROCEDURE myproc; VAR a : REAL; \
                  BEGIN a := x; END; BEGIN END.");
}

#[test]
fn local_declarations_may_shadow_enclosing_names() {
    assert_valid("PROGRAM test; VAR x : REAL; PROCEDURE myproc; VAR x : INTEGER; \
                  BEGIN END; BEGIN END.");
}

#[test]
fn local_names_do_not_leak_to_enclosing_scopes() {
    assert_invalid("PROGRAM test; VAR x : REAL; PROCEDURE myproc; VAR a : REAL; \
                    BEGIN END; BEGIN x := a; END.");
}

#[test]
fn root_scope_holds_builtins_and_the_program_name() {
    let analysis = analyze_source("PROGRAM test; BEGIN END.").unwrap();

    assert!(matches!(analysis.arena.lookup(analysis.root, "INTEGER", false),
                     Some(Symbol::Builtin(BuiltinType::Integer))));
    assert!(matches!(analysis.arena.lookup(analysis.root, "REAL", false),
                     Some(Symbol::Builtin(BuiltinType::Real))));
    assert!(matches!(analysis.arena.lookup(analysis.root, "BOOLEAN", false),
                     Some(Symbol::Builtin(BuiltinType::Boolean))));
    assert!(matches!(analysis.arena.lookup(analysis.root, "TEST", false),
                     Some(Symbol::Program { .. })));

    // The global scope reaches them only through recursion.
    assert!(analysis.arena.lookup(analysis.global, "INTEGER", false).is_none());
    assert!(analysis.arena.lookup(analysis.global, "INTEGER", true).is_some());
}

#[test]
fn procedure_calls_must_name_procedures() {
    assert_valid("PROGRAM test; PROCEDURE myproc; BEGIN END; BEGIN myproc; END.");
    assert_invalid("PROGRAM test; PROCEDURE someproc; BEGIN END; BEGIN myproc; END.");
    assert_invalid("PROGRAM test; VAR x : INTEGER; BEGIN x; END.");
}

#[test]
fn call_arguments_are_checked() {
    assert_valid("PROGRAM test; PROCEDURE myproc(a : INTEGER); BEGIN END; \
                  BEGIN myproc(5); END.");
    assert_valid("PROGRAM test; VAR x : INTEGER; PROCEDURE myproc(a : INTEGER); BEGIN END; \
                  BEGIN myproc(x); END.");
    assert_invalid("PROGRAM test; VAR x : INTEGER; PROCEDURE myproc(a : INTEGER); BEGIN END; \
                    BEGIN myproc(y); END.");
}

#[test]
fn call_arity_must_match() {
    assert_invalid("PROGRAM test; PROCEDURE myproc(a : INTEGER); BEGIN END; \
                    BEGIN myproc; END.");
    assert_invalid("PROGRAM test; PROCEDURE myproc(a : INTEGER); BEGIN END; \
                    BEGIN myproc(1, 2); END.");
}

#[test]
fn argument_types_must_match_declared_parameters() {
    assert_invalid("PROGRAM test; PROCEDURE myproc(a : INTEGER); BEGIN END; \
                    BEGIN myproc(5.0); END.");
    assert_invalid("PROGRAM test; PROCEDURE myproc(a : BOOLEAN); BEGIN END; \
                    BEGIN myproc(1); END.");
}

#[test]
fn conditions_must_be_boolean() {
    assert_invalid("PROGRAM test; BEGIN IF 10 + 3.4 THEN; END.");
    assert_valid("PROGRAM test; BEGIN IF true AND false THEN; END.");
    assert_valid("PROGRAM test; VAR a : BOOLEAN; BEGIN IF a OR true THEN; END.");
    assert_valid("PROGRAM test; BEGIN IF 6 < 7 THEN; END.");
    assert_invalid("PROGRAM test; BEGIN WHILE 1 + 3 DO END.");
    assert_valid("PROGRAM test; BEGIN WHILE true DO END.");
    assert_valid("PROGRAM test; VAR a : INTEGER; BEGIN a := 0; \
                  REPEAT a := a + 1 UNTIL a > 2 END.");
    assert_invalid("PROGRAM test; VAR a : INTEGER; BEGIN REPEAT a := 1 UNTIL 2 END.");
}

#[test]
fn loop_bodies_are_analyzed() {
    assert_invalid("PROGRAM test; BEGIN WHILE true DO a := 1 END.");
    assert_valid("PROGRAM test; VAR a : INTEGER; BEGIN a := 0; \
                  WHILE true DO BEGIN a := a + 1 END; END.");
}

#[test]
fn function_bodies_may_assign_their_own_name() {
    assert_valid("PROGRAM test; FUNCTION f : INTEGER; BEGIN f := 1 END; BEGIN END.");
    // ...but only with the declared return type.
    assert_invalid("PROGRAM test; FUNCTION f : INTEGER; BEGIN f := 1.5 END; BEGIN END.");
}

#[test]
fn reanalyzing_a_valid_program_succeeds() {
    let src = "PROGRAM test; VAR a : INTEGER; \
               FUNCTION inc(x : INTEGER) : INTEGER; BEGIN inc := x + 1 END; \
               BEGIN a := inc(1) END.";
    let program = parse_source(src).unwrap();
    assert!(analyze(&program).is_ok());
    assert!(analyze(&program).is_ok());
}

/// Builds the scope chain for a fixed header program, then types a
/// standalone expression against its global scope.
fn expr_type(expr: &str) -> Option<BuiltinType> {
    let analysis = analyze_source("PROGRAM test; VAR i : INTEGER; r : REAL; b : BOOLEAN; \
                                   FUNCTION f(x : INTEGER) : REAL; BEGIN f := 1.0 END; \
                                   BEGIN END.").unwrap();

    let tokens = tokenize(expr).unwrap();
    let expr = parse_boolean_expr(&mut tokens.iter().peekable()).unwrap();
    type_of(&expr, &analysis.arena, analysis.global)
}

#[test]
fn literal_and_variable_types() {
    assert_eq!(expr_type("1"), Some(BuiltinType::Integer));
    assert_eq!(expr_type("1.5"), Some(BuiltinType::Real));
    assert_eq!(expr_type("true"), Some(BuiltinType::Boolean));
    assert_eq!(expr_type("i"), Some(BuiltinType::Integer));
    assert_eq!(expr_type("r"), Some(BuiltinType::Real));
    assert_eq!(expr_type("missing"), None);
}

#[test]
fn additive_and_multiplicative_types() {
    assert_eq!(expr_type("1 + 2"), Some(BuiltinType::Integer));
    assert_eq!(expr_type("1 + 2.0"), Some(BuiltinType::Real));
    assert_eq!(expr_type("i * r"), Some(BuiltinType::Real));
    assert_eq!(expr_type("1 + b"), None);
}

#[test]
fn division_types() {
    assert_eq!(expr_type("1 / 2"), Some(BuiltinType::Real));
    assert_eq!(expr_type("1.0 / 2.0"), Some(BuiltinType::Real));
    assert_eq!(expr_type("1 DIV 2"), Some(BuiltinType::Integer));
    assert_eq!(expr_type("1.0 DIV 2"), None);
    assert_eq!(expr_type("1 DIV r"), None);
}

#[test]
fn boolean_and_relational_types() {
    assert_eq!(expr_type("b AND b"), Some(BuiltinType::Boolean));
    assert_eq!(expr_type("b XOR b"), Some(BuiltinType::Boolean));
    assert_eq!(expr_type("b AND i"), None);
    assert_eq!(expr_type("1 < 2"), Some(BuiltinType::Boolean));
    assert_eq!(expr_type("i <= r"), Some(BuiltinType::Boolean));
    assert_eq!(expr_type("b < b"), None);
}

#[test]
fn unary_and_call_types() {
    assert_eq!(expr_type("-i"), Some(BuiltinType::Integer));
    assert_eq!(expr_type("NOT b"), Some(BuiltinType::Boolean));
    assert_eq!(expr_type("f(1)"), Some(BuiltinType::Real));
}

#[test]
fn scope_arena_defines_and_looks_up() {
    let mut arena = ScopeArena::new();
    let root = arena.push_scope(None);
    let child = arena.push_scope(Some(root));

    arena.define(root,
                 Symbol::Var { name: "X".to_string(),
                               ty:   BuiltinType::Integer, })
         .unwrap();

    // Defining the same name twice in one scope fails...
    assert!(arena.define(root,
                         Symbol::Var { name: "X".to_string(),
                                       ty:   BuiltinType::Real, })
                 .is_err());
    // ...but shadowing it from a child scope is fine.
    assert!(arena.define(child,
                         Symbol::Var { name: "X".to_string(),
                                       ty:   BuiltinType::Real, })
                 .is_ok());

    assert!(arena.lookup(child, "X", false).is_some());
    assert!(arena.lookup(root, "Y", true).is_none());
}

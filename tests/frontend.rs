use pascaline::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::parse_expr,
    },
    parse_source,
};

fn kinds(src: &str) -> Vec<Token> {
    tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {e}\n{src}"))
                 .into_iter()
                 .map(|(tok, _)| tok)
                 .collect()
}

#[test]
fn reserved_words_match_case_insensitively() {
    assert_eq!(kinds("begin End PROGRAM wHiLe"),
               vec![Token::Begin, Token::End, Token::Program, Token::While]);
    assert_eq!(kinds("div DIV Div"),
               vec![Token::IntDiv, Token::IntDiv, Token::IntDiv]);
}

#[test]
fn boolean_literals_become_constants_not_identifiers() {
    assert_eq!(kinds("TRUE false True"),
               vec![Token::BooleanConst(true),
                    Token::BooleanConst(false),
                    Token::BooleanConst(true)]);
}

#[test]
fn identifiers_canonicalize_to_uppercase() {
    assert_eq!(kinds("counter Counter COUNTER"),
               vec![Token::Identifier("COUNTER".to_string()),
                    Token::Identifier("COUNTER".to_string()),
                    Token::Identifier("COUNTER".to_string())]);
    // A reserved-word prefix does not make an identifier reserved.
    assert_eq!(kinds("beginning"),
               vec![Token::Identifier("BEGINNING".to_string())]);
}

#[test]
fn numeric_literals() {
    assert_eq!(kinds("12 3.14"),
               vec![Token::IntegerConst(12), Token::RealConst(3.14)]);
    // A bare trailing dot belongs to the program terminator, not the number.
    assert_eq!(kinds("7."), vec![Token::IntegerConst(7), Token::Dot]);
}

#[test]
fn two_character_operators_win_over_their_prefixes() {
    assert_eq!(kinds(":= <= >= <>"),
               vec![Token::Assign, Token::LessEqual, Token::GreaterEqual, Token::NotEqual]);
    assert_eq!(kinds(": < > ="),
               vec![Token::Colon, Token::Less, Token::Greater, Token::Equal]);
}

#[test]
fn line_numbers_follow_newlines() {
    let tokens = tokenize("a\nb\n\nc").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|(_, line)| *line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn comments_are_skipped_including_unterminated_ones() {
    assert_eq!(kinds("a { anything \n goes } b"),
               vec![Token::Identifier("A".to_string()),
                    Token::Identifier("B".to_string())]);
    assert_eq!(kinds("a { runs off the end"),
               vec![Token::Identifier("A".to_string())]);
}

#[test]
fn newlines_inside_comments_still_count() {
    let tokens = tokenize("{ one \n two \n } a").unwrap();
    assert_eq!(tokens, vec![(Token::Identifier("A".to_string()), 3)]);
}

#[test]
fn unrecognized_characters_are_lexical_errors() {
    match tokenize("a @ b") {
        Err(ParseError::UnexpectedCharacter { character,
                                              position,
                                              line, }) => {
            assert_eq!(character, '@');
            assert_eq!(position, 2);
            assert_eq!(line, 1);
        },
        other => panic!("Expected a lexical error, got {other:?}"),
    }
}

fn parse_expression(src: &str) -> Expr {
    let tokens = tokenize(src).unwrap();
    parse_expr(&mut tokens.iter().peekable()).unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"))
}

fn int(value: i64) -> Box<Expr> {
    Box::new(Expr::IntegerLit { value, line: 1 })
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(parse_expression("4 + 5 * 3"),
               Expr::BinOp { left:  int(4),
                             op:    BinaryOperator::Add,
                             right: Box::new(Expr::BinOp { left:  int(5),
                                                           op:    BinaryOperator::Mul,
                                                           right: int(3),
                                                           line:  1, }),
                             line:  1, });
}

#[test]
fn additive_operators_fold_left() {
    assert_eq!(parse_expression("4 + 5 - 2"),
               Expr::BinOp { left:  Box::new(Expr::BinOp { left:  int(4),
                                                           op:    BinaryOperator::Add,
                                                           right: int(5),
                                                           line:  1, }),
                             op:    BinaryOperator::Sub,
                             right: int(2),
                             line:  1, });
}

#[test]
fn parsing_is_idempotent() {
    let src = "PROGRAM demo; VAR a, b : INTEGER; r : REAL; \
               PROCEDURE p(x : INTEGER); BEGIN a := x END; \
               FUNCTION f(x : INTEGER) : INTEGER; BEGIN f := x + 1 END; \
               BEGIN a := 1; p(f(a)); IF a < b THEN r := 1.0 ELSE r := 2.0; \
               WHILE a < 3 DO a := a + 1; REPEAT b := a UNTIL true END.";
    let first = parse_source(src).unwrap();
    let second = parse_source(src).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parse_errors_name_the_production_in_progress() {
    // Missing the ';' after the program header.
    match parse_source("PROGRAM demo BEGIN END.") {
        Err(ParseError::UnexpectedToken { production, .. }) => {
            assert_eq!(production, "program");
        },
        other => panic!("Expected a parse error, got {other:?}"),
    }

    // Missing END before the terminating dot.
    match parse_source("PROGRAM demo; BEGIN .") {
        Err(ParseError::UnexpectedToken { production, .. }) => {
            assert_eq!(production, "compound statement");
        },
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn relational_operators_are_non_associative() {
    assert!(parse_source("PROGRAM demo; BEGIN IF 1 < 2 < 3 THEN END.").is_err());
}

#[test]
fn assignment_right_hand_sides_are_plain_expressions() {
    // A bare relational expression is only valid in test position or inside
    // parentheses.
    assert!(parse_source("PROGRAM demo; VAR b : BOOLEAN; BEGIN b := 3 < 4 END.").is_err());
    assert!(parse_source("PROGRAM demo; VAR b : BOOLEAN; BEGIN b := (3 < 4) END.").is_ok());
}

#[test]
fn trailing_input_after_the_terminator_is_rejected() {
    match parse_source("PROGRAM demo; BEGIN END. extra") {
        Err(ParseError::TrailingTokens { found, .. }) => {
            assert!(found.contains("EXTRA"));
        },
        other => panic!("Expected trailing-token error, got {other:?}"),
    }
}

#[test]
fn empty_parameter_lists_and_missing_ones_are_equivalent() {
    let with_parens = parse_source("PROGRAM demo; PROCEDURE p(); BEGIN END; BEGIN p END.");
    let without = parse_source("PROGRAM demo; PROCEDURE p; BEGIN END; BEGIN p END.");
    assert_eq!(with_parens.unwrap(), without.unwrap());
}

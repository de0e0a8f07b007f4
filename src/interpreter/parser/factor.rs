use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_boolean_expr, parse_expr},
            core::ParseResult,
            utils::expect,
        },
    },
};

/// Parses a `factor`, the tightest-binding expression production.
///
/// The rule is:
/// ```text
/// factor := (PLUS | MINUS | NOT) factor
///         | INTEGER_CONST | REAL_CONST | BOOLEAN_CONST
///         | LPAREN boolean_expr RPAREN
///         | ID LPAREN arguments RPAREN
///         | ID
/// ```
///
/// Unary operators are right-associative, so `--4` parses as `-(-4)`.
/// An identifier followed by `(` is a function call; otherwise it is a
/// variable read.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { production: "factor",
                                                      line:       0, });
    };
    let line = *line;

    match token {
        Token::Plus => {
            tokens.next();
            let operand = parse_factor(tokens)?;
            Ok(Expr::UnaryOp { op: UnaryOperator::Plus,
                               operand: Box::new(operand),
                               line })
        },
        Token::Minus => {
            tokens.next();
            let operand = parse_factor(tokens)?;
            Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                               operand: Box::new(operand),
                               line })
        },
        Token::Not => {
            tokens.next();
            let operand = parse_factor(tokens)?;
            Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                               operand: Box::new(operand),
                               line })
        },
        Token::IntegerConst(value) => {
            let value = *value;
            tokens.next();
            Ok(Expr::IntegerLit { value, line })
        },
        Token::RealConst(value) => {
            let value = *value;
            tokens.next();
            Ok(Expr::RealLit { value, line })
        },
        Token::BooleanConst(value) => {
            let value = *value;
            tokens.next();
            Ok(Expr::BooleanLit { value, line })
        },
        Token::LParen => {
            tokens.next();
            let inner = parse_boolean_expr(tokens)?;
            expect(tokens, &Token::RParen, "factor")?;
            Ok(inner)
        },
        Token::Identifier(name) => {
            let name = name.clone();
            tokens.next();
            if let Some((Token::LParen, _)) = tokens.peek() {
                let arguments = parse_call_arguments(tokens)?;
                Ok(Expr::FunctionCall { name,
                                        arguments,
                                        line })
            } else {
                Ok(Expr::Var { name, line })
            }
        },
        tok => {
            Err(ParseError::UnexpectedToken { expected: "a literal, identifier, unary operator, or '('".to_string(),
                                              found: format!("{tok:?}"),
                                              production: "factor",
                                              line })
        },
    }
}

/// Parses a parenthesized, comma-separated argument list.
///
/// The rule is: `arguments := LPAREN (expr (COMMA expr)*)? RPAREN`
///
/// An immediately closing `)` produces an empty list; this is how "no more
/// items" is told apart from a malformed item.
pub(in crate::interpreter::parser) fn parse_call_arguments<'a, I>(tokens: &mut Peekable<I>)
                                                                  -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "argument list")?;

    let mut arguments = Vec::new();
    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_expr(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { expected: "',' or ')'".to_string(),
                                                         found: format!("{tok:?}"),
                                                         production: "argument list",
                                                         line: *line });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { production: "argument list",
                                                              line:       0, });
            },
        }
    }

    Ok(arguments)
}

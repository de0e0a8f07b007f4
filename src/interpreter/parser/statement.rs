use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_boolean_expr, parse_expr},
            core::ParseResult,
            factor::parse_call_arguments,
            utils::{expect, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// The rule is:
/// ```text
/// statement := compound
///            | conditional
///            | while_loop
///            | repeat_loop
///            | assignment      (ID followed by ':=')
///            | procedure_call  (ID not followed by ':=')
///            | empty
/// ```
///
/// A statement starting with an identifier needs one token of lookahead to
/// tell an assignment from a procedure call. Anything that starts no
/// statement at all produces [`Statement::Noop`]; the enclosing production
/// decides whether whatever follows is acceptable there.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Begin, _)) => parse_compound(tokens),
        Some((Token::If, _)) => parse_conditional(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        Some((Token::Repeat, _)) => parse_repeat(tokens),
        Some((Token::Identifier(_), _)) => parse_assignment_or_call(tokens),
        _ => Ok(Statement::Noop),
    }
}

/// Parses a compound statement.
///
/// The rule is: `compound := BEGIN statement (SEMI statement)* END`
pub fn parse_compound<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Begin, "compound statement")?;

    let mut statements = vec![parse_statement(tokens)?];
    while let Some((Token::Semi, _)) = tokens.peek() {
        tokens.next();
        statements.push(parse_statement(tokens)?);
    }

    expect(tokens, &Token::End, "compound statement")?;
    Ok(Statement::Compound { statements, line })
}

/// Parses a conditional statement.
///
/// The rule is: `conditional := IF boolean_expr THEN statement (ELSE statement)?`
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::If, "conditional statement")?;
    let condition = parse_boolean_expr(tokens)?;
    expect(tokens, &Token::Then, "conditional statement")?;
    let then_branch = parse_statement(tokens)?;

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch: Box::new(then_branch),
                       else_branch,
                       line })
}

/// Parses a while loop.
///
/// The rule is: `while_loop := WHILE boolean_expr DO statement`
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::While, "while loop")?;
    let condition = parse_boolean_expr(tokens)?;
    expect(tokens, &Token::Do, "while loop")?;
    let body = parse_statement(tokens)?;

    Ok(Statement::WhileDo { condition,
                            body: Box::new(body),
                            line })
}

/// Parses a repeat loop.
///
/// The rule is: `repeat_loop := REPEAT statement UNTIL boolean_expr`
fn parse_repeat<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Repeat, "repeat loop")?;
    let body = parse_statement(tokens)?;
    expect(tokens, &Token::Until, "repeat loop")?;
    let condition = parse_boolean_expr(tokens)?;

    Ok(Statement::RepeatUntil { body: Box::new(body),
                                condition,
                                line })
}

/// Parses a statement that starts with an identifier: an assignment when the
/// next token is `:=`, otherwise a procedure call (with an optional
/// parenthesized argument list).
fn parse_assignment_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens, "statement")?;

    match tokens.peek() {
        Some((Token::Assign, _)) => {
            tokens.next();
            let value = parse_expr(tokens)?;
            Ok(Statement::Assign { name, value, line })
        },
        Some((Token::LParen, _)) => {
            let arguments = parse_call_arguments(tokens)?;
            Ok(Statement::ProcedureCall { name,
                                          arguments,
                                          line })
        },
        _ => {
            Ok(Statement::ProcedureCall { name,
                                          arguments: Vec::new(),
                                          line })
        },
    }
}

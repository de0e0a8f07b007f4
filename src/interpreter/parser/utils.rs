use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Consumes the next token if it equals `expected`, returning its line.
///
/// # Errors
/// Returns a `ParseError` naming the production if the next token differs or
/// the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    production: &'static str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: format!("{expected:?}"),
                                              found: format!("{tok:?}"),
                                              production,
                                              line: *line })
        },
        None => {
            Err(ParseError::UnexpectedEndOfInput { production,
                                                   line: 0 })
        },
    }
}

/// Parses a plain identifier and returns its canonical name and line.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              production: &'static str)
                                                              -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => Ok((name.clone(), *line)),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "an identifier".to_string(),
                                              found: format!("{tok:?}"),
                                              production,
                                              line: *line })
        },
        None => {
            Err(ParseError::UnexpectedEndOfInput { production,
                                                   line: 0 })
        },
    }
}

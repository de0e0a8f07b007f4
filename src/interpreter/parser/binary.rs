use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, factor::parse_factor},
    },
};

/// Folds a left-hand non-terminal and a loop of `(operator, right-hand
/// non-terminal)` pairs into a left-leaning [`Expr::BinOp`] chain.
///
/// Every left-associative binary production in the grammar is this shape;
/// `expr` and `term` differ only in their operand parser and accepted
/// operator class.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `parse_operand`: Parser for the next-tighter non-terminal.
/// - `accepts`: The operator class this production chains with.
///
/// # Returns
/// The operand itself when no operator follows, otherwise the folded chain.
pub(in crate::interpreter::parser) fn parse_binary_chain<'a, I>(
    tokens: &mut Peekable<I>,
    parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>,
    accepts: impl Fn(BinaryOperator) -> bool)
    -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_operand(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && accepts(op)
        {
            let line = *line;
            tokens.next();
            let right = parse_operand(tokens)?;
            left = Expr::BinOp { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses a `term`.
///
/// The rule is: `term := factor (("*" | DIV | "/" | AND) factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_chain(tokens, parse_factor, |op| {
        matches!(op,
                 BinaryOperator::Mul
                 | BinaryOperator::IntDiv
                 | BinaryOperator::RealDiv
                 | BinaryOperator::And)
    })
}

/// Parses an `expr`.
///
/// The rule is: `expr := term (("+" | "-" | OR | XOR) term)*`
pub fn parse_expr<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_chain(tokens, parse_term, |op| {
        matches!(op,
                 BinaryOperator::Add
                 | BinaryOperator::Sub
                 | BinaryOperator::Or
                 | BinaryOperator::Xor)
    })
}

/// Parses a `boolean_expr`.
///
/// The rule is: `boolean_expr := expr ((LT|GT|EQ|LEQ|GEQ|NEQ) expr)?`
///
/// Relational operators are non-associative: at most one may appear, so
/// `a < b < c` fails in whatever production consumes the second `<`.
pub fn parse_boolean_expr<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_expr(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_binary_operator(token)
       && is_relational_op(op)
    {
        let line = *line;
        tokens.next();
        let right = parse_expr(tokens)?;
        return Ok(Expr::BinOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line });
    }

    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::IntDiv => Some(BinaryOperator::IntDiv),
        Token::Slash => Some(BinaryOperator::RealDiv),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        Token::Xor => Some(BinaryOperator::Xor),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Determines whether a binary operator belongs to the relational class.
///
/// # Example
/// ```
/// use pascaline::{ast::BinaryOperator, interpreter::parser::binary::is_relational_op};
///
/// assert!(is_relational_op(BinaryOperator::Less));
/// assert!(!is_relational_op(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual)
}

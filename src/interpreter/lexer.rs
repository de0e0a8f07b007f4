use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Reserved words and identifiers are matched case-insensitively;
/// identifiers are canonicalized to uppercase, so `counter`, `Counter`, and
/// `COUNTER` all name the same variable.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real literal tokens, such as `3.14`. At least one fractional digit is
    /// required, so the `.` terminating a program never becomes part of a
    /// preceding number.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    RealConst(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    IntegerConst(i64),
    /// Boolean literal tokens: `TRUE` or `FALSE` in any casing.
    #[token("TRUE", parse_bool, ignore(ascii_case))]
    #[token("FALSE", parse_bool, ignore(ascii_case))]
    BooleanConst(bool),
    /// `PROGRAM`
    #[token("PROGRAM", ignore(ascii_case))]
    Program,
    /// `VAR`
    #[token("VAR", ignore(ascii_case))]
    Var,
    /// `BEGIN`
    #[token("BEGIN", ignore(ascii_case))]
    Begin,
    /// `END`
    #[token("END", ignore(ascii_case))]
    End,
    /// `IF`
    #[token("IF", ignore(ascii_case))]
    If,
    /// `THEN`
    #[token("THEN", ignore(ascii_case))]
    Then,
    /// `ELSE`
    #[token("ELSE", ignore(ascii_case))]
    Else,
    /// `WHILE`
    #[token("WHILE", ignore(ascii_case))]
    While,
    /// `DO`
    #[token("DO", ignore(ascii_case))]
    Do,
    /// `REPEAT`
    #[token("REPEAT", ignore(ascii_case))]
    Repeat,
    /// `UNTIL`
    #[token("UNTIL", ignore(ascii_case))]
    Until,
    /// `PROCEDURE`
    #[token("PROCEDURE", ignore(ascii_case))]
    Procedure,
    /// `FUNCTION`
    #[token("FUNCTION", ignore(ascii_case))]
    Function,
    /// The builtin type name `INTEGER`.
    #[token("INTEGER", ignore(ascii_case))]
    TypeInteger,
    /// The builtin type name `REAL`.
    #[token("REAL", ignore(ascii_case))]
    TypeReal,
    /// The builtin type name `BOOLEAN`.
    #[token("BOOLEAN", ignore(ascii_case))]
    TypeBoolean,
    /// `DIV` (truncating integer division)
    #[token("DIV", ignore(ascii_case))]
    IntDiv,
    /// `AND`
    #[token("AND", ignore(ascii_case))]
    And,
    /// `OR`
    #[token("OR", ignore(ascii_case))]
    Or,
    /// `XOR`
    #[token("XOR", ignore(ascii_case))]
    Xor,
    /// `NOT`
    #[token("NOT", ignore(ascii_case))]
    Not,
    /// Identifier tokens; variable, routine, or program names. Stored
    /// uppercase.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", parse_identifier)]
    Identifier(String),
    /// `:=`
    #[token(":=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/` (real division)
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `;`
    #[token(";")]
    Semi,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `=`
    #[token("=")]
    Equal,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    /// `{ ... }` comments. An unterminated comment runs to the end of the
    /// input and still counts as a comment, not an error.
    #[regex(r"\{[^}]*\}?", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    Comment,
    /// Line breaks; counted for diagnostics, never emitted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Newline,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a real literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a boolean literal from the current token slice, in any casing.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice().to_ascii_uppercase().as_str() {
        "TRUE" => Some(true),
        "FALSE" => Some(false),
        _ => None,
    }
}
/// Canonicalizes an identifier to uppercase.
fn parse_identifier(lex: &logos::Lexer<Token>) -> String {
    lex.slice().to_ascii_uppercase()
}

/// Tokenizes a whole source string.
///
/// Runs the scanner to completion and pairs every token with the line it
/// started on; the resulting stream is what the parser consumes. Whitespace
/// and comments are skipped before this pairing, so the stream contains only
/// meaningful tokens.
///
/// # Errors
/// Returns [`ParseError::UnexpectedCharacter`] for the first character no
/// lexer rule recognizes; nothing is silently skipped.
///
/// # Example
/// ```
/// use pascaline::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("BEGIN x := 1 END").unwrap();
/// assert_eq!(tokens[0].0, Token::Begin);
/// assert_eq!(tokens[1].0, Token::Identifier("X".to_string()));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or('\0');
                return Err(ParseError::UnexpectedCharacter { character,
                                                             position: lexer.span().start,
                                                             line: lexer.extras.line });
            },
        }
    }

    Ok(tokens)
}

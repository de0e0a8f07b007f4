use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Block, Declaration, FunctionDecl, ParamDecl, ProcedureDecl, Program, TypeSpec, VarDecl},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            statement::parse_compound,
            utils::{expect, parse_identifier},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// This is the entry point for parsing. The rule is:
/// `program := PROGRAM ID SEMI block DOT`, and nothing may follow the dot.
///
/// # Errors
/// Returns a `ParseError` naming the production in progress when any
/// required token is missing, and [`ParseError::TrailingTokens`] when input
/// continues past the terminating `.`.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Program, "program")?;
    let (name, _) = parse_identifier(tokens, "program")?;
    expect(tokens, &Token::Semi, "program")?;

    let block = parse_block(tokens)?;
    expect(tokens, &Token::Dot, "program")?;

    if let Some((tok, line)) = tokens.next() {
        return Err(ParseError::TrailingTokens { found: format!("{tok:?}"),
                                                line:  *line, });
    }

    Ok(Program { name, block, line })
}

/// Parses a block.
///
/// The rule is: `block := declarations compound`
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let declarations = parse_declarations(tokens)?;
    let compound = parse_compound(tokens)?;

    Ok(Block { declarations,
               compound })
}

/// Parses a block's declaration section.
///
/// The rule is:
/// ```text
/// declarations := (VAR (ID (COMMA ID)* COLON type_spec SEMI)+)?
///                 (procedure_declaration | function_declaration)*
/// ```
///
/// The section may be entirely absent. After `VAR`, at least one declaration
/// line is required; further lines are probed for by their leading
/// identifier, so a following `PROCEDURE` or `BEGIN` ends the section
/// instead of failing it.
fn parse_declarations<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Declaration>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut declarations = Vec::new();

    if let Some((Token::Var, _)) = tokens.peek() {
        tokens.next();
        declarations.extend(parse_var_line(tokens)?.into_iter().map(Declaration::Var));
        while let Some((Token::Identifier(_), _)) = tokens.peek() {
            declarations.extend(parse_var_line(tokens)?.into_iter().map(Declaration::Var));
        }
    }

    loop {
        match tokens.peek() {
            Some((Token::Procedure, _)) => {
                declarations.push(Declaration::Procedure(parse_procedure_declaration(tokens)?));
            },
            Some((Token::Function, _)) => {
                declarations.push(Declaration::Function(parse_function_declaration(tokens)?));
            },
            _ => break,
        }
    }

    Ok(declarations)
}

/// Parses one variable declaration line: `ID (COMMA ID)* COLON type_spec
/// SEMI`, producing one [`VarDecl`] per name.
fn parse_var_line<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<VarDecl>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut names = vec![parse_identifier(tokens, "variable declaration")?];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        names.push(parse_identifier(tokens, "variable declaration")?);
    }

    expect(tokens, &Token::Colon, "variable declaration")?;
    let type_spec = parse_type_spec(tokens)?;
    expect(tokens, &Token::Semi, "variable declaration")?;

    Ok(names.into_iter()
            .map(|(name, line)| VarDecl { name,
                                          type_spec: type_spec.clone(),
                                          line })
            .collect())
}

/// Parses a type spec: one of the builtin type names.
///
/// The rule is: `type_spec := INTEGER | REAL | BOOLEAN`
pub fn parse_type_spec<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeSpec>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::TypeInteger, line)) => Ok(TypeSpec { name: "INTEGER".to_string(),
                                                          line: *line }),
        Some((Token::TypeReal, line)) => Ok(TypeSpec { name: "REAL".to_string(),
                                                       line: *line }),
        Some((Token::TypeBoolean, line)) => Ok(TypeSpec { name: "BOOLEAN".to_string(),
                                                          line: *line }),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "INTEGER, REAL, or BOOLEAN".to_string(),
                                              found: format!("{tok:?}"),
                                              production: "type spec",
                                              line: *line })
        },
        None => {
            Err(ParseError::UnexpectedEndOfInput { production: "type spec",
                                                   line:       0, })
        },
    }
}

/// Parses a procedure declaration.
///
/// The rule is:
/// `procedure_declaration := PROCEDURE ID formal_parameters? SEMI block SEMI`
fn parse_procedure_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ProcedureDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Procedure, "procedure declaration")?;
    let (name, line) = parse_identifier(tokens, "procedure declaration")?;
    let params = parse_formal_parameters(tokens)?;

    expect(tokens, &Token::Semi, "procedure declaration")?;
    let block = parse_block(tokens)?;
    expect(tokens, &Token::Semi, "procedure declaration")?;

    Ok(ProcedureDecl { name,
                       params,
                       block: Rc::new(block),
                       line })
}

/// Parses a function declaration.
///
/// The rule is:
/// `function_declaration := FUNCTION ID formal_parameters? COLON type_spec SEMI block SEMI`
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<FunctionDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Function, "function declaration")?;
    let (name, line) = parse_identifier(tokens, "function declaration")?;
    let params = parse_formal_parameters(tokens)?;

    expect(tokens, &Token::Colon, "function declaration")?;
    let return_spec = parse_type_spec(tokens)?;

    expect(tokens, &Token::Semi, "function declaration")?;
    let block = parse_block(tokens)?;
    expect(tokens, &Token::Semi, "function declaration")?;

    Ok(FunctionDecl { name,
                      params,
                      return_spec,
                      block: Rc::new(block),
                      line })
}

/// Parses an optional formal parameter list.
///
/// The rule is:
/// ```text
/// formal_parameters := (LPAREN group (SEMI group)* RPAREN)?
/// group             := ID (COMMA ID)* COLON type_spec
/// ```
///
/// A missing list and an empty `()` both produce no parameters.
fn parse_formal_parameters<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<ParamDecl>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();

    let Some((Token::LParen, _)) = tokens.peek() else {
        return Ok(params);
    };
    tokens.next();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(params);
    }

    loop {
        let mut names = vec![parse_identifier(tokens, "formal parameters")?];
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            names.push(parse_identifier(tokens, "formal parameters")?);
        }

        expect(tokens, &Token::Colon, "formal parameters")?;
        let type_spec = parse_type_spec(tokens)?;

        params.extend(names.into_iter().map(|(name, line)| {
                                           ParamDecl { name,
                                                       type_spec: type_spec.clone(),
                                                       line }
                                       }));

        match tokens.next() {
            Some((Token::Semi, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { expected: "';' or ')'".to_string(),
                                                         found: format!("{tok:?}"),
                                                         production: "formal parameters",
                                                         line: *line });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { production: "formal parameters",
                                                              line:       0, });
            },
        }
    }

    Ok(params)
}

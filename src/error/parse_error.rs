#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer hit a character no rule recognizes.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the source.
        position:  usize,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// What the production in progress expected.
        expected:   String,
        /// The token encountered instead.
        found:      String,
        /// Name of the grammar production that was being parsed.
        production: &'static str,
        /// The source line where the error occurred.
        line:       usize,
    },
    /// Reached the end of input in the middle of a production.
    UnexpectedEndOfInput {
        /// Name of the grammar production that was being parsed.
        production: &'static str,
        /// The source line where the error occurred.
        line:       usize,
    },
    /// Found extra tokens after the program's terminating `.`.
    TrailingTokens {
        /// The first extra token.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character,
                                        position,
                                        line, } => {
                write!(f,
                       "Error on line {line}: Unrecognized character '{character}' at byte {position}.")
            },

            Self::UnexpectedToken { expected,
                                    found,
                                    production,
                                    line, } => {
                write!(f,
                       "Error on line {line}: Expected {expected} while parsing {production}, found {found}.")
            },

            Self::UnexpectedEndOfInput { production, line } => {
                write!(f,
                       "Error on line {line}: Unexpected end of input while parsing {production}.")
            },

            Self::TrailingTokens { found, line } => {
                write!(f, "Error on line {line}: Extra input after the program terminator: {found}.")
            },
        }
    }
}

impl std::error::Error for ParseError {}

use std::fmt;
use std::io;

use thiserror::Error;

use crate::token::TokenKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// `start` is where the token began, `position` the character at which
    /// it stopped being recognisable.
    #[error("unknown token `{lexeme}` at position {position}")]
    UnknownToken {
        lexeme: String,
        start: usize,
        position: usize,
    },

    #[error("number `{lexeme}` at position {position} is too large")]
    NumberTooLarge { lexeme: String, position: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {}, found {}", ExpectedKinds(.expected), found_name(.found))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: Option<TokenKind>,
    },

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error(transparent)]
    Lex(#[from] LexError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("requires a variable at the left of the assignment, found `{target}`")]
    InvalidAssignmentTarget { target: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("assignment target is not a variable")]
    InvalidAssignmentTarget,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(LexError),

    #[error("parse error: {0}")]
    Parse(ParseError),

    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

// A lexer failure met while parsing is still reported as a lex error.
impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(lex) => Error::Lex(lex),
            other => Error::Parse(other),
        }
    }
}

struct ExpectedKinds<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedKinds<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => write!(f, "end of input"),
            [only] => write!(f, "{}", only),
            kinds => {
                write!(f, "one of ")?;
                for (index, kind) in kinds.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                Ok(())
            }
        }
    }
}

fn found_name(found: &Option<TokenKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "end of input".to_string(),
    }
}

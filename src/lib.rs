mod ast;
mod environment;
mod error;
mod evaluator;
mod lexer;
pub mod logger;
mod number;
mod parser;
mod semantic;
mod session;
mod token;

pub use ast::{BinaryOperator, ComparisonOperator, Expr};
pub use environment::Environment;
pub use error::{Error, LexError, ParseError, RuntimeError, SemanticError};
pub use evaluator::evaluate;
pub use lexer::Lexer;
pub use number::Number;
pub use parser::Parser;
pub use semantic::check;
pub use session::Session;
pub use token::{Keyword, Operator, Token, TokenKind};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Runs `program` line by line in a fresh session and returns the final
/// variables, built-in constants included.
pub fn execute(program: &str) -> Result<HashMap<String, Number>, Error> {
    let mut session = Session::new();
    session.run_program(program)?;
    Ok(session.into_variables())
}

pub fn execute_file(path: impl AsRef<Path>) -> Result<HashMap<String, Number>, Error> {
    let program = fs::read_to_string(path)?;
    execute(&program)
}

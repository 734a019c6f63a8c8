use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ast::Expr;
use crate::environment::Environment;
use crate::error::Error;
use crate::evaluator::evaluate;
use crate::lexer::Lexer;
use crate::number::Number;
use crate::parser::Parser;
use crate::semantic::check;

/// One run of sequential statements sharing a variable environment.
pub struct Session {
    env: Environment,
    interrupted: Arc<AtomicBool>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            env: Environment::seeded(),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Lexes, parses, checks and evaluates one statement.
    ///
    /// Blank text is a no-op and yields `Ok(None)`.
    pub fn run(&mut self, text: &str) -> Result<Option<Number>, Error> {
        match self.compile(text)? {
            Some(statement) => self.eval(&statement).map(Some),
            None => Ok(None),
        }
    }

    /// Lexes, parses and checks one statement without evaluating it.
    pub fn compile(&self, text: &str) -> Result<Option<Expr>, Error> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let mut parser = Parser::new(Lexer::new(text));
        let statement = check(parser.parse()?)?;
        Ok(Some(statement))
    }

    /// Evaluates a statement returned by `compile` against this session.
    pub fn eval(&mut self, statement: &Expr) -> Result<Number, Error> {
        log::debug!("evaluating `{}`", statement);
        Ok(evaluate(statement, &mut self.env)?)
    }

    /// Runs `source` one line at a time and returns the last value produced.
    ///
    /// Stops at the first failing line, or before the next line once the
    /// interrupt flag has been raised.
    pub fn run_program(&mut self, source: &str) -> Result<Option<Number>, Error> {
        let mut last = None;
        for (index, line) in source.lines().enumerate() {
            if self.interrupted.load(Ordering::SeqCst) {
                log::warn!("interrupted before line {}", index + 1);
                return Err(Error::Interrupted);
            }
            match self.run(line) {
                Ok(Some(value)) => last = Some(value),
                Ok(None) => {}
                Err(err) => {
                    return Err(Error::Line {
                        line: index + 1,
                        source: Box::new(err),
                    });
                }
            }
        }
        Ok(last)
    }

    /// A flag that, once set, makes `run_program` stop before its next line.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn variables(&self) -> &Environment {
        &self.env
    }

    pub fn into_variables(self) -> HashMap<String, Number> {
        self.env.to_map()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

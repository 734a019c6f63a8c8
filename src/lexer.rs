use crate::error::LexError;
use crate::number::Number;
use crate::token::{Keyword, Operator, Token};

/// Lexer states. Each call to `next_token` walks them from `Start` until a
/// character fails to continue the current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Integer,
    Point,
    Fraction,
    Word,
    Arithmetic,
    Relational,
    Bang,
    Compound,
    Bracket,
    Error,
}

enum Step {
    Continue(State),
    Stop,
}

impl State {
    fn step(self, ch: char) -> Step {
        let next = match self {
            State::Start => match ch {
                '0'..='9' => State::Integer,
                '+' | '-' | '*' | '/' => State::Arithmetic,
                '=' | '<' | '>' => State::Relational,
                '!' => State::Bang,
                '(' | ')' | '{' | '}' => State::Bracket,
                c if is_word_start(c) => State::Word,
                _ => State::Error,
            },
            State::Integer => match ch {
                '0'..='9' => State::Integer,
                '.' => State::Point,
                _ => return Step::Stop,
            },
            State::Point => match ch {
                '0'..='9' => State::Fraction,
                _ => State::Error,
            },
            State::Fraction => match ch {
                '0'..='9' => State::Fraction,
                _ => return Step::Stop,
            },
            State::Word => match ch {
                c if is_word_start(c) || c.is_ascii_digit() => State::Word,
                _ => return Step::Stop,
            },
            State::Relational => match ch {
                '=' => State::Compound,
                _ => return Step::Stop,
            },
            State::Bang => match ch {
                '=' => State::Compound,
                _ => State::Error,
            },
            State::Arithmetic | State::Compound | State::Bracket | State::Error => {
                return Step::Stop;
            }
        };
        Step::Continue(next)
    }

    fn is_accepting(self) -> bool {
        matches!(
            self,
            State::Integer
                | State::Fraction
                | State::Word
                | State::Arithmetic
                | State::Relational
                | State::Compound
                | State::Bracket
        )
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

pub struct Lexer {
    text: Vec<char>,
    pos: usize,
    state: State,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Lexer {
            text: text.chars().collect(),
            pos: 0,
            state: State::Start,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.state = State::Start;
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.text.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn unread(&mut self) {
        self.pos -= 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.text.get(self.pos) {
            if !is_space(ch) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Returns the next token, or `Ok(None)` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();
        let start = self.pos;
        if start >= self.text.len() {
            return Ok(None);
        }

        self.state = State::Start;
        loop {
            let Some(ch) = self.advance() else {
                break;
            };
            match self.state.step(ch) {
                Step::Continue(State::Error) => {
                    // the first character is always consumed so the cursor moves on
                    if self.pos - start > 1 {
                        self.unread();
                    }
                    self.state = State::Error;
                    break;
                }
                Step::Continue(next) => self.state = next,
                Step::Stop => {
                    self.unread();
                    break;
                }
            }
        }

        let exit_state = self.state;
        self.state = State::Start;
        let lexeme: String = self.text[start..self.pos].iter().collect();

        if !exit_state.is_accepting() {
            return Err(unknown_token(lexeme, start));
        }
        self.build_token(exit_state, lexeme, start).map(Some)
    }

    fn build_token(&self, state: State, lexeme: String, start: usize) -> Result<Token, LexError> {
        let token = match state {
            State::Integer => Token::Number(Number::Int(integer_value(&lexeme, start)?)),
            State::Fraction => {
                let value = lexeme.parse::<f64>().map_err(|_| unknown_token(lexeme.clone(), start))?;
                Token::Number(Number::Float(value))
            }
            State::Word => match Keyword::from_word(&lexeme) {
                Some(keyword) => Token::Keyword(keyword),
                None => Token::Symbol(lexeme),
            },
            State::Arithmetic | State::Relational | State::Compound => {
                Token::Operator(operator(&lexeme, start)?)
            }
            State::Bracket => match lexeme.as_str() {
                "(" => Token::OpenParen,
                ")" => Token::CloseParen,
                "{" => Token::OpenBrace,
                _ => Token::CloseBrace,
            },
            _ => return Err(unknown_token(lexeme, start)),
        };
        log::trace!("token `{}` at {}", token, start);
        Ok(token)
    }
}

fn integer_value(lexeme: &str, start: usize) -> Result<i64, LexError> {
    let mut value: i64 = 0;
    for digit in lexeme.chars().filter_map(|ch| ch.to_digit(10)) {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit)))
            .ok_or_else(|| LexError::NumberTooLarge {
                lexeme: lexeme.to_string(),
                position: start,
            })?;
    }
    Ok(value)
}

fn operator(lexeme: &str, start: usize) -> Result<Operator, LexError> {
    let op = match lexeme {
        "+" => Operator::Plus,
        "-" => Operator::Minus,
        "*" => Operator::Multiply,
        "/" => Operator::Divide,
        "=" => Operator::Assign,
        "==" => Operator::Equal,
        "!=" => Operator::NotEqual,
        "<" => Operator::Less,
        "<=" => Operator::LessEqual,
        ">" => Operator::Greater,
        ">=" => Operator::GreaterEqual,
        _ => return Err(unknown_token(lexeme.to_string(), start)),
    };
    Ok(op)
}

/// The error points at the last character of the rejected slice.
fn unknown_token(lexeme: String, start: usize) -> LexError {
    let position = start + lexeme.chars().count().saturating_sub(1);
    LexError::UnknownToken {
        lexeme,
        start,
        position,
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

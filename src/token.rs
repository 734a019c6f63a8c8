use std::fmt;

use crate::number::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Assign,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Assign => "=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(Number),
    Symbol(String),
    Keyword(Keyword),
    Operator(Operator),
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
}

/// A token's category without its literal, used in expected-kind sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Symbol,
    Keyword(Keyword),
    Operator,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) => TokenKind::Number,
            Token::Symbol(_) => TokenKind::Symbol,
            Token::Keyword(keyword) => TokenKind::Keyword(*keyword),
            Token::Operator(_) => TokenKind::Operator,
            Token::OpenParen => TokenKind::OpenParen,
            Token::CloseParen => TokenKind::CloseParen,
            Token::OpenBrace => TokenKind::OpenBrace,
            Token::CloseBrace => TokenKind::CloseBrace,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Symbol(name) => write!(f, "{}", name),
            Token::Keyword(Keyword::If) => write!(f, "if"),
            Token::Keyword(Keyword::Else) => write!(f, "else"),
            Token::Operator(op) => write!(f, "{}", op.as_str()),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::OpenBrace => write!(f, "{{"),
            Token::CloseBrace => write!(f, "}}"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::Symbol => write!(f, "symbol"),
            TokenKind::Keyword(Keyword::If) => write!(f, "`if`"),
            TokenKind::Keyword(Keyword::Else) => write!(f, "`else`"),
            TokenKind::Operator => write!(f, "operator"),
            TokenKind::OpenParen => write!(f, "`(`"),
            TokenKind::CloseParen => write!(f, "`)`"),
            TokenKind::OpenBrace => write!(f, "`{{`"),
            TokenKind::CloseBrace => write!(f, "`}}`"),
        }
    }
}

use crate::ast::{BinaryOperator, ComparisonOperator, Expr};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Keyword, Operator, Token, TokenKind};

/// Deepest expression tree, and deepest parenthesis nesting, one statement
/// may build. Parsing, evaluating and dropping a tree all recurse on it.
pub const MAX_DEPTH: usize = 256;

const STATEMENT_START: &[TokenKind] = &[
    TokenKind::Keyword(Keyword::If),
    TokenKind::Number,
    TokenKind::Symbol,
    TokenKind::OpenParen,
];

const FACTOR_START: &[TokenKind] = &[TokenKind::Number, TokenKind::Symbol, TokenKind::OpenParen];

/// A parsed subtree together with its height.
struct Node {
    expr: Expr,
    depth: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Node { expr, depth: 1 }
    }

    fn branch(expr: Expr, children: &[usize]) -> Result<Self, ParseError> {
        let depth = children.iter().copied().max().unwrap_or(0) + 1;
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(Node { expr, depth })
    }
}

/// Predictive recursive-descent parser.
///
/// The grammar is LL(1): every decision needs at most one token of
/// lookahead, so a single `fallback` slot is enough to hand a token that did
/// not continue a production back to the caller. Pushing a second token while
/// the slot is occupied is a bug and panics.
pub struct Parser {
    lexer: Lexer,
    fallback: Option<Token>,
    nesting: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser {
            lexer,
            fallback: None,
            nesting: 0,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        if let Some(token) = self.fallback.take() {
            return Ok(Some(token));
        }
        Ok(self.lexer.next_token()?)
    }

    fn push_back(&mut self, token: Token) {
        assert!(
            self.fallback.is_none(),
            "pushback slot already holds {:?}",
            self.fallback
        );
        self.fallback = Some(token);
    }

    /// Looks at the next token without consuming it.
    fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        if self.fallback.is_none() {
            self.fallback = self.lexer.next_token()?;
        }
        Ok(self.fallback.as_ref())
    }

    fn peek_operator(&mut self) -> Result<Option<Operator>, ParseError> {
        match self.peek()? {
            Some(Token::Operator(op)) => Ok(Some(*op)),
            _ => Ok(None),
        }
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: &[TokenKind]) -> Result<Token, ParseError> {
        match self.next_token()? {
            Some(token) if expected.contains(&token.kind()) => Ok(token),
            Some(token) => {
                let found = token.kind();
                self.push_back(token);
                Err(ParseError::UnexpectedToken {
                    expected: expected.to_vec(),
                    found: Some(found),
                })
            }
            None => Err(ParseError::UnexpectedToken {
                expected: expected.to_vec(),
                found: None,
            }),
        }
    }

    /// Fails if any token is left after the last statement.
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        self.expect(&[]).map(|_| ())
    }

    /// Parses one statement and requires that nothing follows it.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let statement = match self.parse_statement()? {
            Some(statement) => statement,
            None => {
                return Err(ParseError::UnexpectedToken {
                    expected: STATEMENT_START.to_vec(),
                    found: None,
                });
            }
        };
        self.expect_end()?;
        Ok(statement)
    }

    /// Parses the next statement, `None` at end of input.
    pub fn parse_statement(&mut self) -> Result<Option<Expr>, ParseError> {
        let starts_conditional = match self.peek()? {
            None => return Ok(None),
            Some(token) => *token == Token::Keyword(Keyword::If),
        };
        let node = if starts_conditional {
            self.conditional()?
        } else {
            self.assignment_expr()?
        };
        Ok(Some(node.expr))
    }

    fn conditional(&mut self) -> Result<Node, ParseError> {
        self.expect(&[TokenKind::Keyword(Keyword::If)])?;
        self.expect(&[TokenKind::OpenParen])?;
        let cond = self.condition()?;
        self.expect(&[TokenKind::CloseParen])?;
        let then_branch = self.block()?;
        self.expect(&[TokenKind::Keyword(Keyword::Else)])?;
        let else_branch = self.block()?;
        let depths = [cond.depth, then_branch.depth, else_branch.depth];
        Node::branch(
            Expr::Conditional {
                cond: Box::new(cond.expr),
                then_branch: Box::new(then_branch.expr),
                else_branch: Box::new(else_branch.expr),
            },
            &depths,
        )
    }

    fn block(&mut self) -> Result<Node, ParseError> {
        self.expect(&[TokenKind::OpenBrace])?;
        let body = self.assignment_expr()?;
        self.expect(&[TokenKind::CloseBrace])?;
        Ok(body)
    }

    fn condition(&mut self) -> Result<Node, ParseError> {
        let left = self.arith()?;
        let op = match self.peek_operator()? {
            Some(Operator::Equal) => ComparisonOperator::Eq,
            Some(Operator::NotEqual) => ComparisonOperator::NotEq,
            Some(Operator::Less) => ComparisonOperator::Less,
            Some(Operator::LessEqual) => ComparisonOperator::LessEq,
            Some(Operator::Greater) => ComparisonOperator::Greater,
            Some(Operator::GreaterEqual) => ComparisonOperator::GreaterEq,
            _ => return Ok(left),
        };
        self.advance()?;
        let right = self.arith()?;
        let depths = [left.depth, right.depth];
        Node::branch(
            Expr::Comparison {
                op,
                left: Box::new(left.expr),
                right: Box::new(right.expr),
            },
            &depths,
        )
    }

    fn assignment_expr(&mut self) -> Result<Node, ParseError> {
        let target = self.arith()?;
        if self.peek_operator()? != Some(Operator::Assign) {
            return Ok(target);
        }
        self.advance()?;
        let value = self.arith()?;
        let depths = [target.depth, value.depth];
        Node::branch(Expr::assignment(target.expr, value.expr), &depths)
    }

    fn arith(&mut self) -> Result<Node, ParseError> {
        let mut node = self.term()?;
        loop {
            let op = match self.peek_operator()? {
                Some(Operator::Plus) => BinaryOperator::Add,
                Some(Operator::Minus) => BinaryOperator::Sub,
                _ => return Ok(node),
            };
            self.advance()?;
            let right = self.term()?;
            let depths = [node.depth, right.depth];
            node = Node::branch(Expr::binary(op, node.expr, right.expr), &depths)?;
        }
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let mut node = self.factor()?;
        loop {
            let op = match self.peek_operator()? {
                Some(Operator::Multiply) => BinaryOperator::Mul,
                Some(Operator::Divide) => BinaryOperator::Div,
                _ => return Ok(node),
            };
            self.advance()?;
            let right = self.factor()?;
            let depths = [node.depth, right.depth];
            node = Node::branch(Expr::binary(op, node.expr, right.expr), &depths)?;
        }
    }

    fn factor(&mut self) -> Result<Node, ParseError> {
        match self.expect(FACTOR_START)? {
            Token::Number(n) => Ok(Node::leaf(Expr::Const(n))),
            Token::Symbol(name) => Ok(Node::leaf(Expr::Symbol(name))),
            Token::OpenParen => {
                if self.nesting >= MAX_DEPTH {
                    return Err(ParseError::TooDeep { limit: MAX_DEPTH });
                }
                self.nesting += 1;
                let node = self.arith();
                self.nesting -= 1;
                let node = node?;
                self.expect(&[TokenKind::CloseParen])?;
                Ok(node)
            }
            _ => unreachable!(),
        }
    }
}

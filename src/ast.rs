use std::fmt;

use crate::number::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(Number),
    Symbol(String),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: ComparisonOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Sub => 1,
            BinaryOperator::Mul | BinaryOperator::Div => 2,
        }
    }
}

impl ComparisonOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::NotEq => "!=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEq => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEq => ">=",
        }
    }
}

impl Expr {
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assignment(target: Expr, value: Expr) -> Self {
        Expr::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// Reverse Polish rendering, operands before their operator.
    pub fn postfix(&self) -> String {
        match self {
            Expr::Const(n) => n.to_string(),
            Expr::Symbol(name) => name.clone(),
            Expr::BinaryOp { op, left, right } => {
                format!("{} {} {}", left.postfix(), right.postfix(), op.symbol())
            }
            Expr::Comparison { op, left, right } => {
                format!("{} {} {}", left.postfix(), right.postfix(), op.symbol())
            }
            Expr::Assignment { target, value } => {
                format!("{} {} =", target.postfix(), value.postfix())
            }
            Expr::Conditional {
                cond,
                then_branch,
                else_branch,
            } => format!(
                "{} {} {} if",
                cond.postfix(),
                then_branch.postfix(),
                else_branch.postfix()
            ),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: u8, right_side: bool) -> fmt::Result {
        let wrap = match self {
            Expr::BinaryOp { op, .. } => {
                op.precedence() < parent || (right_side && op.precedence() == parent)
            }
            Expr::Comparison { .. } | Expr::Assignment { .. } | Expr::Conditional { .. } => true,
            Expr::Const(_) | Expr::Symbol(_) => false,
        };
        if wrap {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(n) => write!(f, "{}", n),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::BinaryOp { op, left, right } => {
                left.fmt_operand(f, op.precedence(), false)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_operand(f, op.precedence(), true)
            }
            Expr::Comparison { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            Expr::Assignment { target, value } => write!(f, "{} = {}", target, value),
            Expr::Conditional {
                cond,
                then_branch,
                else_branch,
            } => write!(
                f,
                "if ({}) {{ {} }} else {{ {} }}",
                cond, then_branch, else_branch
            ),
        }
    }
}

use std::cmp::Ordering;

use crate::ast::{BinaryOperator, ComparisonOperator, Expr};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::number::Number;

/// Reduces `expr` to a number. Only assignments touch `env`; bindings made
/// before a failure stay in place.
pub fn evaluate(expr: &Expr, env: &mut Environment) -> Result<Number, RuntimeError> {
    match expr {
        Expr::Const(n) => Ok(*n),
        Expr::Symbol(name) => env
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownVariable(name.clone())),
        Expr::BinaryOp { op, left, right } => {
            let left_val = evaluate(left, env)?;
            let right_val = evaluate(right, env)?;
            match op {
                BinaryOperator::Add => left_val.add(right_val),
                BinaryOperator::Sub => left_val.sub(right_val),
                BinaryOperator::Mul => left_val.mul(right_val),
                BinaryOperator::Div => left_val.div(right_val),
            }
        }
        Expr::Comparison { op, left, right } => {
            let left_val = evaluate(left, env)?;
            let right_val = evaluate(right, env)?;
            let holds = match left_val.compare(right_val) {
                Some(ordering) => compare(*op, ordering),
                // NaN is unequal to everything
                None => *op == ComparisonOperator::NotEq,
            };
            Ok(Number::Int(i64::from(holds)))
        }
        Expr::Assignment { target, value } => {
            let Expr::Symbol(name) = target.as_ref() else {
                return Err(RuntimeError::InvalidAssignmentTarget);
            };
            let val = evaluate(value, env)?;
            log::debug!("bind {} = {}", name, val);
            env.set(name, val);
            Ok(val)
        }
        Expr::Conditional {
            cond,
            then_branch,
            else_branch,
        } => {
            if evaluate(cond, env)?.is_zero() {
                evaluate(else_branch, env)
            } else {
                evaluate(then_branch, env)
            }
        }
    }
}

fn compare(op: ComparisonOperator, ordering: Ordering) -> bool {
    match op {
        ComparisonOperator::Eq => ordering == Ordering::Equal,
        ComparisonOperator::NotEq => ordering != Ordering::Equal,
        ComparisonOperator::Less => ordering == Ordering::Less,
        ComparisonOperator::LessEq => ordering != Ordering::Greater,
        ComparisonOperator::Greater => ordering == Ordering::Greater,
        ComparisonOperator::GreaterEq => ordering != Ordering::Less,
    }
}

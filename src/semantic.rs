use crate::ast::Expr;
use crate::error::SemanticError;

/// Static checks run on each parsed statement before it is evaluated.
///
/// An assignment must bind a variable. The rule applies to the statement
/// itself and to both arms of a conditional, which are assignment
/// expressions as well.
pub fn check(expr: Expr) -> Result<Expr, SemanticError> {
    check_statement(&expr)?;
    Ok(expr)
}

fn check_statement(expr: &Expr) -> Result<(), SemanticError> {
    match expr {
        Expr::Assignment { target, .. } => match target.as_ref() {
            Expr::Symbol(_) => Ok(()),
            other => Err(SemanticError::InvalidAssignmentTarget {
                target: other.to_string(),
            }),
        },
        Expr::Conditional {
            then_branch,
            else_branch,
            ..
        } => {
            check_statement(then_branch)?;
            check_statement(else_branch)
        }
        _ => Ok(()),
    }
}

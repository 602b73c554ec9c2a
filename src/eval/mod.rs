//! Directive expression evaluation.
//!
//! A deliberately small grammar rather than a scripting engine: literals,
//! environment names, `defined()`, comparisons, and short-circuiting
//! boolean connectives. Unknown names fail loudly instead of defaulting,
//! and oversized or deeply nested expressions are rejected rather than
//! evaluated.

mod lexer;
mod parser;
mod value;

#[cfg(test)]
mod tests;

use serde_json::Value;
use thiserror::Error;

use crate::env::Environment;

/// Why an expression failed to evaluate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("expression nesting exceeds {} levels", parser::MAX_NESTING)]
    NestingTooDeep,

    #[error("expression exceeds {} tokens", parser::MAX_TOKENS)]
    ExpressionTooLong,

    #[error("unknown variable `{0}`")]
    UnknownName(String),

    #[error("`{op}` is not defined between {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("`-` expects a number, got {0}")]
    NegateNonNumber(&'static str),
}

/// Evaluate a directive expression down to its branch decision.
pub fn evaluate(expression: &str, env: &Environment) -> Result<bool, EvalError> {
    if expression.trim().is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    let tokens = lexer::tokenize(expression)?;
    let expr = parser::parse(&tokens)?;
    Ok(value::truthy(&eval_expr(&expr, env)?))
}

fn eval_expr(expr: &parser::Expr, env: &Environment) -> Result<Value, EvalError> {
    use parser::Expr;

    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Var(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownName(name.clone())),
        Expr::Defined(name) => Ok(Value::Bool(env.contains(name))),
        Expr::Not(inner) => Ok(Value::Bool(!value::truthy(&eval_expr(inner, env)?))),
        Expr::Neg(inner) => {
            let v = eval_expr(inner, env)?;
            match v.as_f64() {
                Some(f) => Ok(Value::from(-f)),
                None => Err(EvalError::NegateNonNumber(value::type_name(&v))),
            }
        }
        Expr::And(left, right) => {
            if !value::truthy(&eval_expr(left, env)?) {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(value::truthy(&eval_expr(right, env)?)))
        }
        Expr::Or(left, right) => {
            if value::truthy(&eval_expr(left, env)?) {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(value::truthy(&eval_expr(right, env)?)))
        }
        Expr::Cmp(op, left, right) => {
            let lv = eval_expr(left, env)?;
            let rv = eval_expr(right, env)?;
            Ok(Value::Bool(value::apply_cmp(*op, &lv, &rv)?))
        }
    }
}

use std::cmp::Ordering;

use serde_json::Value;

use super::parser::CmpOp;
use super::EvalError;

/// JS-style truthiness: `null`, `false`, `0` and `""` are falsy, everything
/// else (arrays and objects included) is truthy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strict equality: same JSON type and equal value. Numbers compare
/// numerically so the integer and float spellings of a value agree.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Apply a comparison operator. Equality works for every value pair;
/// ordering only for number pairs and string pairs.
pub(crate) fn apply_cmp(op: CmpOp, a: &Value, b: &Value) -> Result<bool, EvalError> {
    match op {
        CmpOp::Eq => Ok(values_equal(a, b)),
        CmpOp::Ne => Ok(!values_equal(a, b)),
        CmpOp::Lt => Ok(order(op, a, b)? == Ordering::Less),
        CmpOp::Le => Ok(order(op, a, b)? != Ordering::Greater),
        CmpOp::Gt => Ok(order(op, a, b)? == Ordering::Greater),
        CmpOp::Ge => Ok(order(op, a, b)? != Ordering::Less),
    }
}

fn order(op: CmpOp, a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    let ordering = match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64().partial_cmp(&y.as_f64()),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    };
    ordering.ok_or_else(|| EvalError::TypeMismatch {
        op: op.symbol(),
        lhs: type_name(a),
        rhs: type_name(b),
    })
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

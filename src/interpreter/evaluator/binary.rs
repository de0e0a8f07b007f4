use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Applies a binary operator to two already-evaluated operands.
///
/// Both operands are evaluated before this is called, so `AND` and `OR` are
/// eager by construction. Two INTEGER operands stay on the integer path
/// (with overflow checking); any REAL operand promotes both sides through a
/// checked `i64` → `f64` conversion.
///
/// # Errors
/// - `DivisionByZero` for `DIV` and `/` with a zero divisor.
/// - `Overflow` when integer arithmetic leaves the `i64` range.
/// - `ExpectedNumber` / `ExpectedBoolean` when an operand has the wrong
///   kind; unreachable for programs that passed analysis.
pub fn apply_binary(op: BinaryOperator, lhs: Value, rhs: Value, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => numeric_op(lhs, rhs, line, i64::checked_add, |a, b| a + b),
        BinaryOperator::Sub => numeric_op(lhs, rhs, line, i64::checked_sub, |a, b| a - b),
        BinaryOperator::Mul => numeric_op(lhs, rhs, line, i64::checked_mul, |a, b| a * b),
        BinaryOperator::IntDiv => {
            let a = lhs.as_integer(line)?;
            let b = rhs.as_integer(line)?;
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a.checked_div(b)
             .map(Value::Integer)
             .ok_or(RuntimeError::Overflow { line })
        },
        BinaryOperator::RealDiv => {
            let a = lhs.as_real(line)?;
            let b = rhs.as_real(line)?;
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Value::Real(a / b))
        },
        BinaryOperator::And => Ok(Value::Bool(lhs.as_bool(line)? && rhs.as_bool(line)?)),
        BinaryOperator::Or => Ok(Value::Bool(lhs.as_bool(line)? || rhs.as_bool(line)?)),
        BinaryOperator::Xor => Ok(Value::Bool(lhs.as_bool(line)? ^ rhs.as_bool(line)?)),
        BinaryOperator::Less => comparison_op(lhs, rhs, line, |o| o.is_lt()),
        BinaryOperator::Greater => comparison_op(lhs, rhs, line, |o| o.is_gt()),
        BinaryOperator::LessEqual => comparison_op(lhs, rhs, line, |o| o.is_le()),
        BinaryOperator::GreaterEqual => comparison_op(lhs, rhs, line, |o| o.is_ge()),
        BinaryOperator::Equal => comparison_op(lhs, rhs, line, |o| o.is_eq()),
        BinaryOperator::NotEqual => comparison_op(lhs, rhs, line, |o| o.is_ne()),
    }
}

/// Applies a unary operator to an already-evaluated operand.
///
/// `+` is the identity; `-` negates a number (with overflow checking on
/// integers); `NOT` inverts a boolean.
pub fn apply_unary(op: UnaryOperator, operand: Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Plus => Ok(operand),
        UnaryOperator::Negate => match operand {
            Value::Integer(n) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { line })
            },
            Value::Real(r) => Ok(Value::Real(-r)),
            Value::Bool(_) => Err(RuntimeError::ExpectedNumber { line }),
        },
        UnaryOperator::Not => Ok(Value::Bool(!operand.as_bool(line)?)),
    }
}

/// Runs `+ - *` on the integer path when both operands are integers,
/// otherwise promotes to the real path.
fn numeric_op(lhs: Value,
              rhs: Value,
              line: usize,
              int_op: impl Fn(i64, i64) -> Option<i64>,
              real_op: impl Fn(f64, f64) -> f64)
              -> EvalResult<Value> {
    if let (Value::Integer(a), Value::Integer(b)) = (lhs, rhs) {
        return int_op(a, b).map(Value::Integer)
                           .ok_or(RuntimeError::Overflow { line });
    }

    let a = lhs.as_real(line)?;
    let b = rhs.as_real(line)?;
    Ok(Value::Real(real_op(a, b)))
}

/// Compares two numeric operands, on the integer path when possible.
fn comparison_op(lhs: Value,
                 rhs: Value,
                 line: usize,
                 test: impl Fn(std::cmp::Ordering) -> bool)
                 -> EvalResult<Value> {
    if let (Value::Integer(a), Value::Integer(b)) = (lhs, rhs) {
        return Ok(Value::Bool(test(a.cmp(&b))));
    }

    let a = lhs.as_real(line)?;
    let b = rhs.as_real(line)?;
    let ordering = a.partial_cmp(&b)
                    .ok_or(RuntimeError::ExpectedNumber { line })?;
    Ok(Value::Bool(test(ordering)))
}

use serde::{Serialize, Serializer};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models the three value types of the language; it is what
/// expressions evaluate to, what call frames bind, and what the final
/// variable state maps names onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// An integer value (64-bit signed).
    Integer(i64),
    /// A real value (double precision floating-point).
    Real(f64),
    /// A boolean value (`TRUE` or `FALSE`).
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real` and `Value::Integer`. For integers, conversion
    /// fails if the value is too large to be represented as `f64` exactly.
    ///
    /// # Errors
    /// `RuntimeError::ExpectedNumber` for booleans,
    /// `RuntimeError::LiteralTooLarge` for unrepresentable integers.
    ///
    /// # Example
    /// ```
    /// use pascaline::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real(1).unwrap(), 10.0);
    /// assert!(Value::Bool(true).as_real(1).is_err());
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::LiteralTooLarge { line }),
            Self::Bool(_) => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to an `i64`, or returns an error if it is not an
    /// integer.
    pub const fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to a `bool`, or returns an error if it is not a
    /// boolean.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Serializes as a bare JSON number or boolean, so a bindings map renders
/// as a plain `{"NAME": value}` object.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        match self {
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Real(r) => serializer.serialize_f64(*r),
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

use std::cmp::Ordering;
use std::fmt;

use crate::error::RuntimeError;

/// A numeric value: integer unless a float took part in producing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(val) => val as f64,
            Number::Float(val) => val,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(val) => val == 0,
            Number::Float(val) => val == 0.0,
        }
    }

    pub fn add(self, other: Number) -> Result<Number, RuntimeError> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => {
                a.checked_add(b).map(Number::Int).ok_or(RuntimeError::Overflow)
            }
            (a, b) => Ok(Number::Float(a.as_f64() + b.as_f64())),
        }
    }

    pub fn sub(self, other: Number) -> Result<Number, RuntimeError> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => {
                a.checked_sub(b).map(Number::Int).ok_or(RuntimeError::Overflow)
            }
            (a, b) => Ok(Number::Float(a.as_f64() - b.as_f64())),
        }
    }

    pub fn mul(self, other: Number) -> Result<Number, RuntimeError> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => {
                a.checked_mul(b).map(Number::Int).ok_or(RuntimeError::Overflow)
            }
            (a, b) => Ok(Number::Float(a.as_f64() * b.as_f64())),
        }
    }

    /// True division: the result is always a float.
    pub fn div(self, other: Number) -> Result<Number, RuntimeError> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(Number::Float(self.as_f64() / other.as_f64()))
    }

    /// Compares across integer and float. `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(val) => write!(f, "{}", val),
            // Debug keeps the trailing `.0` on whole floats
            Number::Float(val) => write!(f, "{:?}", val),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic_stays_int() {
        assert_eq!(Number::Int(3).add(Number::Int(4)).unwrap(), Number::Int(7));
        assert_eq!(Number::Int(3).sub(Number::Int(4)).unwrap(), Number::Int(-1));
        assert_eq!(Number::Int(3).mul(Number::Int(4)).unwrap(), Number::Int(12));
    }

    #[test]
    fn test_float_operand_promotes() {
        assert_eq!(Number::Int(1).add(Number::Float(0.5)).unwrap(), Number::Float(1.5));
        assert_eq!(Number::Float(2.0).mul(Number::Int(3)).unwrap(), Number::Float(6.0));
    }

    #[test]
    fn test_division_is_always_float() {
        assert_eq!(Number::Int(4).div(Number::Int(2)).unwrap(), Number::Float(2.0));
        assert_eq!(Number::Int(1).div(Number::Int(4)).unwrap(), Number::Float(0.25));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(Number::Int(1).div(Number::Int(0)), Err(RuntimeError::DivisionByZero));
        assert_eq!(Number::Float(1.0).div(Number::Float(0.0)), Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(Number::Int(i64::MAX).add(Number::Int(1)), Err(RuntimeError::Overflow));
        assert_eq!(Number::Int(i64::MIN).mul(Number::Int(-1)), Err(RuntimeError::Overflow));
    }

    #[test]
    fn test_compare_mixed() {
        assert_eq!(Number::Int(2).compare(Number::Float(2.0)), Some(Ordering::Equal));
        assert_eq!(Number::Int(1).compare(Number::Float(1.5)), Some(Ordering::Less));
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::Int(14).to_string(), "14");
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Float(12.5).to_string(), "12.5");
    }
}

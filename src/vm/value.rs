//! VM value type with integer/float promotion.

use std::cmp::Ordering;
use std::fmt;

use super::error::VmError;
use crate::ir::Constant;
use crate::lexer::ComparisonOp;

/// Runtime value carried on the operand stack and in memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
}

impl Default for Value {
    fn default() -> Self {
        Self::Integer(0)
    }
}

impl From<Constant> for Value {
    fn from(constant: Constant) -> Self {
        match constant {
            Constant::Int(value) => Self::Integer(value),
            Constant::Float(value) => Self::Float(value),
        }
    }
}

impl Value {
    /// Parses one input word: integer first, then float.
    pub fn parse(word: &str) -> Result<Self, VmError> {
        if let Ok(value) = word.parse::<i64>() {
            return Ok(Self::Integer(value));
        }
        word.parse::<f64>()
            .map(Self::Float)
            .map_err(|_| VmError::invalid_input(word))
    }

    /// Widens the value to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    /// Tests the `JUMP_NO` condition.
    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(value) => value == 0,
            Self::Float(value) => value == 0.0,
        }
    }

    /// `self + rhs`; integer only when both operands are integers.
    pub fn add(self, rhs: Self) -> Result<Self, VmError> {
        self.arithmetic(rhs, i64::checked_add, |a, b| a + b)
    }

    /// `self - rhs`.
    pub fn sub(self, rhs: Self) -> Result<Self, VmError> {
        self.arithmetic(rhs, i64::checked_sub, |a, b| a - b)
    }

    /// `self * rhs`.
    pub fn mul(self, rhs: Self) -> Result<Self, VmError> {
        self.arithmetic(rhs, i64::checked_mul, |a, b| a * b)
    }

    /// `self / rhs`; integer division truncates toward zero.
    pub fn div(self, rhs: Self) -> Result<Self, VmError> {
        if rhs == Self::Integer(0) && matches!(self, Self::Integer(_)) {
            return Err(VmError::division_by_zero());
        }
        self.arithmetic(rhs, i64::checked_div, |a, b| a / b)
    }

    /// Arithmetic negation.
    pub fn negate(self) -> Result<Self, VmError> {
        match self {
            Self::Integer(value) => value
                .checked_neg()
                .map(Self::Integer)
                .ok_or_else(VmError::arithmetic_overflow),
            Self::Float(value) => Ok(Self::Float(-value)),
        }
    }

    /// Evaluates `self <op> rhs` as integer `1` or `0`.
    pub fn compare(self, op: ComparisonOp, rhs: Self) -> Self {
        let ordering = match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&rhs.as_f64()),
        };
        let holds = match (op, ordering) {
            (ComparisonOp::NotEqual, None) => true,
            (_, None) => false,
            (ComparisonOp::Equal, Some(order)) => order == Ordering::Equal,
            (ComparisonOp::NotEqual, Some(order)) => order != Ordering::Equal,
            (ComparisonOp::Less, Some(order)) => order == Ordering::Less,
            (ComparisonOp::Greater, Some(order)) => order == Ordering::Greater,
            (ComparisonOp::LessOrEqual, Some(order)) => order != Ordering::Greater,
            (ComparisonOp::GreaterOrEqual, Some(order)) => order != Ordering::Less,
        };
        Self::Integer(i64::from(holds))
    }

    fn arithmetic(
        self,
        rhs: Self,
        integer: fn(i64, i64) -> Option<i64>,
        float: fn(f64, f64) -> f64,
    ) -> Result<Self, VmError> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => integer(a, b)
                .map(Self::Integer)
                .ok_or_else(VmError::arithmetic_overflow),
            _ => Ok(Self::Float(float(self.as_f64(), rhs.as_f64()))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

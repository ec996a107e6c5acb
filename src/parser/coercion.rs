//! Cast directives and the numeric-literal emission policy.
//!
//! A parenthesized `(int)` or `(float)` prefix pushes a directive that only
//! the next emitted literal consults; emitting any literal clears the stack.
//! Float literals without a directive take the kind of the most recently
//! declared variable in the unit, not of the assignment target.

use crate::ir::Constant;
use crate::parser::symbols::NumericKind;

/// Pending cast directives, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercionStack {
    pending: Vec<NumericKind>,
}

impl CoercionStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a directive.
    pub fn push(&mut self, kind: NumericKind) {
        self.pending.push(kind);
    }

    /// Returns the most recently pushed directive.
    pub fn top(&self) -> Option<NumericKind> {
        self.pending.last().copied()
    }

    /// Drops every directive.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drops directives pushed after the stack had `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.pending.truncate(len);
    }

    /// Returns the number of pending directives.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` when no directive is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Chooses the `PUSH` operand for an integer literal.
pub fn integer_literal(value: i64, directive: Option<NumericKind>) -> Constant {
    match directive {
        Some(NumericKind::Float) => Constant::Float(value as f64),
        _ => Constant::Int(value),
    }
}

/// Chooses the `PUSH` operand for a float literal.
///
/// `after_operator` is set when the token before the literal was an
/// arithmetic or comparison operator; such literals are always pushed as
/// floats.
pub fn float_literal(
    value: f64,
    after_operator: bool,
    directive: Option<NumericKind>,
    last_declared: Option<NumericKind>,
) -> Constant {
    if after_operator {
        return Constant::Float(value);
    }

    let float_context = last_declared == Some(NumericKind::Float);
    match directive {
        Some(NumericKind::Float) => Constant::Float(value),
        Some(NumericKind::Int) if float_context => Constant::Float(value.trunc()),
        Some(NumericKind::Int) => Constant::Int(value.trunc() as i64),
        None if float_context => Constant::Float(value),
        None => Constant::Int(value.trunc() as i64),
    }
}

//! IR error contracts.

use thiserror::Error;

/// Stable IR error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrErrorKind {
    /// A reserved slot was never filled.
    UnfilledReservation,
    /// A branch points outside the program.
    InvalidBranchTarget,
    /// A required structural invariant was violated.
    InvariantViolation,
}

/// IR error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct IrError {
    /// Error category.
    pub kind: IrErrorKind,
    /// Human-readable error summary.
    pub message: String,
}

impl IrError {
    /// Creates an IR error.
    pub fn new(kind: IrErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an `UnfilledReservation` error for the given addresses.
    pub fn unfilled_reservation(addresses: &[u32]) -> Self {
        let list = addresses
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            IrErrorKind::UnfilledReservation,
            format!("reserved slots never filled at address(es) {list}"),
        )
    }

    /// Creates an `InvalidBranchTarget` error.
    pub fn invalid_branch_target(at: u32, target: u32, len: usize) -> Self {
        Self::new(
            IrErrorKind::InvalidBranchTarget,
            format!("branch at {at} targets {target}, outside program of length {len}"),
        )
    }

    /// Creates an `InvariantViolation` error.
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::new(IrErrorKind::InvariantViolation, message)
    }
}

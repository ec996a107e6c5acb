//! VM error contracts.

use thiserror::Error;

/// Stable VM error categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmErrorKind {
    /// VM operand stack exceeded its configured depth limit.
    StackOverflow,
    /// Pop on an empty operand stack.
    StackUnderflow,
    /// Integer division by zero.
    DivisionByZero,
    /// Integer arithmetic overflowed.
    ArithmeticOverflow,
    /// A placeholder or otherwise unexecutable instruction was reached.
    InvalidInstruction,
    /// A branch target lies outside the program.
    InvalidBranchTarget,
    /// Execution ran past the last instruction without `STOP`.
    MissingStop,
    /// The configured step budget was used up.
    StepLimitExceeded,
    /// `INPUT` found no more input.
    InputExhausted,
    /// `INPUT` read a word that is not a number.
    InvalidInput(String),
    /// Reading input or writing output failed.
    Io,
}

/// VM error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct VmError {
    /// Error category.
    pub kind: VmErrorKind,
    /// Human-readable error message.
    pub message: String,
}

impl VmError {
    /// Creates a VM error.
    pub fn new(kind: VmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `StackOverflow` error.
    pub fn stack_overflow(limit: usize) -> Self {
        Self::new(
            VmErrorKind::StackOverflow,
            format!("stack overflow (limit {limit})"),
        )
    }

    /// Creates a `StackUnderflow` error.
    pub fn stack_underflow() -> Self {
        Self::new(VmErrorKind::StackUnderflow, "stack underflow")
    }

    /// Creates a `DivisionByZero` error.
    pub fn division_by_zero() -> Self {
        Self::new(VmErrorKind::DivisionByZero, "division by zero")
    }

    /// Creates an `ArithmeticOverflow` error.
    pub fn arithmetic_overflow() -> Self {
        Self::new(VmErrorKind::ArithmeticOverflow, "integer overflow")
    }

    /// Creates an `InvalidInstruction` error.
    pub fn invalid_instruction(address: usize, message: impl Into<String>) -> Self {
        Self::new(
            VmErrorKind::InvalidInstruction,
            format!("{address}: {}", message.into()),
        )
    }

    /// Creates an `InvalidBranchTarget` error.
    pub fn invalid_branch_target(address: usize, target: usize) -> Self {
        Self::new(
            VmErrorKind::InvalidBranchTarget,
            format!("{address}: branch target {target} is outside the program"),
        )
    }

    /// Creates a `MissingStop` error.
    pub fn missing_stop(len: usize) -> Self {
        Self::new(
            VmErrorKind::MissingStop,
            format!("execution ran past the last instruction ({len})"),
        )
    }

    /// Creates a `StepLimitExceeded` error.
    pub fn step_limit_exceeded(limit: usize) -> Self {
        Self::new(
            VmErrorKind::StepLimitExceeded,
            format!("step limit of {limit} exceeded"),
        )
    }

    /// Creates an `InputExhausted` error.
    pub fn input_exhausted() -> Self {
        Self::new(VmErrorKind::InputExhausted, "no more input to read")
    }

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(word: impl Into<String>) -> Self {
        let word = word.into();
        let message = format!("input '{word}' is not a number");
        Self::new(VmErrorKind::InvalidInput(word), message)
    }

    /// Creates an `Io` error.
    pub fn io(error: &std::io::Error) -> Self {
        Self::new(VmErrorKind::Io, format!("i/o error: {error}"))
    }
}

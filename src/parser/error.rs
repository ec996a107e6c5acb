//! Compilation diagnostic contracts.

use std::fmt;

use thiserror::Error;

/// Stable diagnostic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A concrete token did not match grammar expectations.
    SyntaxError,
    /// A variable was used or assigned before declaration.
    UndeclaredVariable,
    /// A variable was declared a second time.
    DuplicateDeclaration,
    /// A condition had no comparison operator.
    MissingComparisonOperator,
    /// A token cannot start a statement.
    UnrecognizedStatement,
    /// A token cannot start a factor.
    UnrecognizedFactor,
    /// The scanner rejected part of the input.
    LexicalError,
    /// Blocks or parentheses nest deeper than the configured limit.
    NestingTooDeep,
}

/// One reported problem, tagged with the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {message}")]
pub struct Diagnostic {
    /// Diagnostic category.
    pub kind: DiagnosticKind,
    /// 1-based source line.
    pub line: u32,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(kind: DiagnosticKind, line: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates a `SyntaxError` for a token mismatch.
    pub fn syntax(line: u32, found: impl fmt::Display, expected: impl fmt::Display) -> Self {
        Self::new(
            DiagnosticKind::SyntaxError,
            line,
            format!("{found} found while {expected} expected."),
        )
    }

    /// Creates an `UndeclaredVariable` error.
    pub fn undeclared_variable(line: u32, name: &str) -> Self {
        Self::new(
            DiagnosticKind::UndeclaredVariable,
            line,
            format!("Variable '{name}' has not been declared."),
        )
    }

    /// Creates a `DuplicateDeclaration` error.
    pub fn duplicate_declaration(line: u32, name: &str) -> Self {
        Self::new(
            DiagnosticKind::DuplicateDeclaration,
            line,
            format!("Variable '{name}' has been already declared."),
        )
    }

    /// Creates a `MissingComparisonOperator` error.
    pub fn missing_comparison(line: u32) -> Self {
        Self::new(
            DiagnosticKind::MissingComparisonOperator,
            line,
            "comparison operator expected.",
        )
    }

    /// Creates an `UnrecognizedStatement` error.
    pub fn statement_expected(line: u32) -> Self {
        Self::new(
            DiagnosticKind::UnrecognizedStatement,
            line,
            "statement expected.",
        )
    }

    /// Creates an `UnrecognizedFactor` error.
    pub fn expression_expected(line: u32) -> Self {
        Self::new(
            DiagnosticKind::UnrecognizedFactor,
            line,
            "expression expected.",
        )
    }

    /// Creates a `NestingTooDeep` error.
    pub fn nesting_too_deep(line: u32, limit: usize) -> Self {
        Self::new(
            DiagnosticKind::NestingTooDeep,
            line,
            format!("nesting deeper than {limit} levels; rest of input ignored."),
        )
    }
}

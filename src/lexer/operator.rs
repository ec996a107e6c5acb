//! Operator and punctuation scanning with longest-match rules.

use crate::lexer::cursor::Cursor;
use crate::lexer::token::{ArithmeticOp, ComparisonOp, TokenKind, TokenValue};

/// Result of scanning one operator token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OperatorScan {
    /// Operator category.
    pub(crate) kind: TokenKind,
    /// Operator subtype payload.
    pub(crate) value: TokenValue,
    /// Exact source lexeme.
    pub(crate) lexeme: &'static str,
}

/// Scans an operator at cursor position, advancing past it on success.
pub(crate) fn scan_operator(cursor: &mut Cursor, input: &str) -> Option<OperatorScan> {
    let scan = match_operator_at(input, cursor.offset().as_usize())?;
    for _ in 0..scan.lexeme.len() {
        cursor.advance_byte(input);
    }
    Some(scan)
}

fn match_operator_at(input: &str, start: usize) -> Option<OperatorScan> {
    let tail = input.as_bytes().get(start..)?;
    let first = *tail.first()?;

    if tail.len() >= 2 {
        let matched = match &tail[..2] {
            b":=" => Some((TokenKind::Assign, TokenValue::None, ":=")),
            b"!=" => Some(comparison(ComparisonOp::NotEqual, "!=")),
            b"<=" => Some(comparison(ComparisonOp::LessOrEqual, "<=")),
            b">=" => Some(comparison(ComparisonOp::GreaterOrEqual, ">=")),
            _ => None,
        };
        if let Some((kind, value, lexeme)) = matched {
            return Some(OperatorScan {
                kind,
                value,
                lexeme,
            });
        }
    }

    let (kind, value, lexeme) = match first {
        b'+' => arithmetic(TokenKind::AddOp, ArithmeticOp::Plus, "+"),
        b'-' => arithmetic(TokenKind::AddOp, ArithmeticOp::Minus, "-"),
        b'*' => arithmetic(TokenKind::MulOp, ArithmeticOp::Multiply, "*"),
        b'/' => arithmetic(TokenKind::MulOp, ArithmeticOp::Divide, "/"),
        b'=' => comparison(ComparisonOp::Equal, "="),
        b'<' => comparison(ComparisonOp::Less, "<"),
        b'>' => comparison(ComparisonOp::Greater, ">"),
        b'(' => (TokenKind::LeftParen, TokenValue::None, "("),
        b')' => (TokenKind::RightParen, TokenValue::None, ")"),
        b';' => (TokenKind::Semicolon, TokenValue::None, ";"),
        _ => return None,
    };

    Some(OperatorScan {
        kind,
        value,
        lexeme,
    })
}

fn arithmetic(
    kind: TokenKind,
    op: ArithmeticOp,
    lexeme: &'static str,
) -> (TokenKind, TokenValue, &'static str) {
    (kind, TokenValue::Arithmetic(op), lexeme)
}

fn comparison(op: ComparisonOp, lexeme: &'static str) -> (TokenKind, TokenValue, &'static str) {
    (TokenKind::Compare, TokenValue::Comparison(op), lexeme)
}

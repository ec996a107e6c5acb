//! Lexical scanner for Milan source text.
//!
//! The scanner never fails: characters outside the language become
//! [`TokenKind::Illegal`] tokens, and problems that cannot be expressed as a
//! token (an unterminated comment, an out-of-range literal) are recorded as
//! [`LexDiagnostic`]s for the caller to drain.

pub mod diagnostics;
pub mod span;
pub mod token;

mod cursor;
mod operator;

use crate::lexer::cursor::Cursor;

pub use diagnostics::{DiagnosticCode, LexDiagnostic};
pub use span::{ByteOffset, Span};
pub use token::{ArithmeticOp, ComparisonOp, Token, TokenKind, TokenValue};

/// Milan scanner producing one token per call.
pub struct Lexer<'a> {
    input: &'a str,
    cursor: Cursor,
    diagnostics: Vec<LexDiagnostic>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Returns the 1-based line of the scan position.
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Scans and returns the next token.
    ///
    /// Once input is exhausted every call returns an [`TokenKind::Eof`] token.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.cursor.offset();
        let line = self.cursor.line();
        let Some(byte) = self.cursor.peek_byte(self.input) else {
            return Token::new(
                TokenKind::Eof,
                TokenValue::None,
                String::new(),
                Span::new(start, start, line),
            );
        };

        if byte.is_ascii_digit() {
            return self.scan_number();
        }

        if byte.is_ascii_alphabetic() || byte == b'_' {
            return self.scan_word();
        }

        if let Some(scan) = operator::scan_operator(&mut self.cursor, self.input) {
            let span = Span::new(start, self.cursor.offset(), line);
            return Token::new(scan.kind, scan.value, scan.lexeme.to_string(), span);
        }

        let illegal = self.input[start.as_usize()..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        for _ in 0..illegal.len_utf8() {
            self.cursor.advance_byte(self.input);
        }
        Token::new(
            TokenKind::Illegal,
            TokenValue::None,
            illegal.to_string(),
            Span::new(start, self.cursor.offset(), line),
        )
    }

    /// Drains diagnostics recorded since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<LexDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn skip_trivia(&mut self) {
        loop {
            self.cursor
                .advance_while(self.input, |byte| byte.is_ascii_whitespace());

            let opens_comment = self.cursor.peek_byte(self.input) == Some(b'/')
                && self.cursor.peek_next_byte(self.input) == Some(b'*');
            if !opens_comment {
                return;
            }
            self.skip_comment();
        }
    }

    fn skip_comment(&mut self) {
        let start = self.cursor.offset();
        let line = self.cursor.line();
        self.cursor.advance_byte(self.input);
        self.cursor.advance_byte(self.input);

        while !self.cursor.is_eof(self.input) {
            if self.cursor.peek_byte(self.input) == Some(b'*')
                && self.cursor.peek_next_byte(self.input) == Some(b'/')
            {
                self.cursor.advance_byte(self.input);
                self.cursor.advance_byte(self.input);
                return;
            }
            self.cursor.advance_byte(self.input);
        }

        self.diagnostics.push(LexDiagnostic::new(
            DiagnosticCode::UnterminatedComment,
            "comment is not closed before end of file.",
            Span::new(start, self.cursor.offset(), line),
        ));
    }

    fn scan_number(&mut self) -> Token {
        let start = self.cursor.offset();
        let line = self.cursor.line();
        self.cursor
            .advance_while(self.input, |byte| byte.is_ascii_digit());

        let has_fraction = self.cursor.peek_byte(self.input) == Some(b'.')
            && self
                .cursor
                .peek_next_byte(self.input)
                .is_some_and(|byte| byte.is_ascii_digit());
        if has_fraction {
            self.cursor.advance_byte(self.input);
            self.cursor
                .advance_while(self.input, |byte| byte.is_ascii_digit());
        }

        let end = self.cursor.offset();
        let span = Span::new(start, end, line);
        let input = self.input;
        let lexeme = &input[start.as_usize()..end.as_usize()];

        if has_fraction {
            let value = lexeme.parse::<f64>().unwrap_or_default();
            return Token::new(
                TokenKind::FloatLiteral,
                TokenValue::Float(value),
                lexeme.to_string(),
                span,
            );
        }

        let value = lexeme.parse::<i64>().unwrap_or_else(|_| {
            self.diagnostics.push(LexDiagnostic::new(
                DiagnosticCode::IntegerOutOfRange,
                format!("integer literal '{lexeme}' is out of range."),
                span,
            ));
            0
        });
        Token::new(
            TokenKind::IntLiteral,
            TokenValue::Integer(value),
            lexeme.to_string(),
            span,
        )
    }

    fn scan_word(&mut self) -> Token {
        let start = self.cursor.offset();
        let line = self.cursor.line();
        self.cursor.advance_while(self.input, |byte| {
            byte.is_ascii_alphanumeric() || byte == b'_'
        });

        let end = self.cursor.offset();
        let span = Span::new(start, end, line);
        let word = &self.input[start.as_usize()..end.as_usize()];

        match TokenKind::keyword(word) {
            Some(kind) => Token::new(kind, TokenValue::None, word.to_string(), span),
            None => Token::new(
                TokenKind::Identifier,
                TokenValue::Name(word.to_string()),
                word.to_string(),
                span,
            ),
        }
    }
}

/// Scans all of `input`, returning the tokens (ending with `Eof`) and any
/// lexer diagnostics.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexDiagnostic>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.take_diagnostics())
}

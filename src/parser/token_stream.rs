//! Lexer-backed token stream with one current token.

use crate::lexer::{LexDiagnostic, Lexer, Token, TokenKind};

/// Single-token-lookahead stream over the lexer.
///
/// Besides the current token the stream remembers the kind of the token
/// consumed last, which literal coercion consults.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Option<TokenKind>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream and scans its first token.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: None,
        }
    }

    /// Returns the current token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Returns the current token kind.
    pub fn kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the kind of the most recently consumed token.
    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.previous
    }

    /// Returns the line of the current token.
    pub fn line(&self) -> u32 {
        self.current.line()
    }

    /// Returns `true` when the current token has kind `kind`.
    pub fn see(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Returns `true` at end of input.
    pub fn is_eof(&self) -> bool {
        self.see(TokenKind::Eof)
    }

    /// Consumes and returns the current token.
    ///
    /// At end of input the stream stays on `Eof`.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        self.previous = Some(consumed.kind);
        consumed
    }

    /// Consumes the current token when it has kind `kind`.
    pub fn consume_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.see(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Discards tokens until the current one is `kind` or `Eof`.
    ///
    /// Returns the number of discarded tokens.
    pub fn skip_until(&mut self, kind: TokenKind) -> usize {
        let mut skipped = 0;
        while !self.see(kind) && !self.is_eof() {
            self.advance();
            skipped += 1;
        }
        skipped
    }

    /// Drains diagnostics the lexer recorded so far.
    pub fn take_lex_diagnostics(&mut self) -> Vec<LexDiagnostic> {
        self.lexer.take_diagnostics()
    }
}

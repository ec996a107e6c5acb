//! Single-pass recursive-descent parser that emits VM code as it recognizes
//! each construct.
//!
//! There is no syntax tree: every production writes straight into the
//! [`CodeSink`]. Forward branches of `if` and `while` are reserved before the
//! target is known and filled once it is. Grammar errors are reported and
//! followed by panic-mode recovery, so one run can surface several
//! independent errors.

use crate::ir::{CodeSink, Constant, Instruction, Slot};
use crate::lexer::{ArithmeticOp, Token, TokenKind};
use crate::parser::coercion::{self, CoercionStack};
use crate::parser::error::Diagnostic;
use crate::parser::recovery::Diagnostics;
use crate::parser::symbols::{NumericKind, SymbolError, SymbolTable};
use crate::parser::token_stream::TokenStream;

/// Parser behavior options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Maximum nesting of `if`/`while` bodies, parentheses and unary minus.
    pub max_nesting: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_nesting: 256 }
    }
}

/// Everything a finished parse leaves behind.
#[derive(Debug)]
pub struct ParseOutcome<S> {
    /// The sink with all emitted code.
    pub sink: S,
    /// Variables declared by the program.
    pub symbols: SymbolTable,
    /// Diagnostics in report order; empty on success.
    pub diagnostics: Vec<Diagnostic>,
}

/// Milan parser and code generator.
pub struct Parser<'a, S> {
    options: ParseOptions,
    stream: TokenStream<'a>,
    sink: S,
    symbols: SymbolTable,
    coercions: CoercionStack,
    diagnostics: Diagnostics,
    depth: usize,
}

impl<'a, S: CodeSink> Parser<'a, S> {
    /// Creates a parser over `stream` emitting into `sink`.
    pub fn new(options: ParseOptions, stream: TokenStream<'a>, sink: S) -> Self {
        let mut parser = Self {
            options,
            stream,
            sink,
            symbols: SymbolTable::new(),
            coercions: CoercionStack::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
        };
        parser.drain_lex_diagnostics();
        parser
    }

    /// Parses `program := 'begin' statementList 'end'` and emits `STOP`.
    pub fn parse_program(&mut self) {
        self.expect(TokenKind::Begin);
        self.statement_list();
        self.expect(TokenKind::End);
        self.sink.emit(Instruction::Stop);
    }

    /// Consumes the parser.
    pub fn finish(self) -> ParseOutcome<S> {
        ParseOutcome {
            sink: self.sink,
            symbols: self.symbols,
            diagnostics: self.diagnostics.into_vec(),
        }
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    fn statement_list(&mut self) {
        if self.stream.kind().closes_block() {
            return;
        }

        loop {
            self.statement();
            if self.consume_if(TokenKind::Semicolon).is_none() {
                break;
            }
        }
    }

    fn statement(&mut self) {
        match self.stream.kind() {
            TokenKind::Int => {
                self.advance();
                self.declaration(NumericKind::Int);
            }
            TokenKind::Float => {
                self.advance();
                self.declaration(NumericKind::Float);
            }
            TokenKind::Identifier => self.assignment(),
            TokenKind::If => self.nested(Self::if_statement),
            TokenKind::While => self.nested(Self::while_statement),
            TokenKind::Write => self.write_statement(),
            _ => {
                let line = self.stream.line();
                self.report(Diagnostic::statement_expected(line));
            }
        }
    }

    fn declaration(&mut self, kind: NumericKind) {
        let slot = self
            .expect(TokenKind::Identifier)
            .and_then(|name| self.declare(&name, kind));
        self.expect(TokenKind::Assign);
        self.expression();
        if let Some(slot) = slot {
            self.sink.emit(Instruction::Store(slot));
        }
    }

    fn assignment(&mut self) {
        let name = self.advance();
        let slot = self.resolve(&name);
        self.expect(TokenKind::Assign);
        self.expression();
        if let Some(slot) = slot {
            self.sink.emit(Instruction::Store(slot));
        }
    }

    fn if_statement(&mut self) {
        self.advance();
        self.relation();
        let jump_no = self.sink.reserve();

        self.expect(TokenKind::Then);
        self.statement_list();

        if self.consume_if(TokenKind::Else).is_some() {
            let jump = self.sink.reserve();
            let else_start = self.sink.current_address();
            self.sink.fill(jump_no, Instruction::JumpNo(else_start));

            self.statement_list();
            let end = self.sink.current_address();
            self.sink.fill(jump, Instruction::Jump(end));
        } else {
            let end = self.sink.current_address();
            self.sink.fill(jump_no, Instruction::JumpNo(end));
        }

        self.expect(TokenKind::Fi);
    }

    fn while_statement(&mut self) {
        self.advance();
        let condition = self.sink.current_address();
        self.relation();
        let exit = self.sink.reserve();

        self.expect(TokenKind::Do);
        self.statement_list();
        self.expect(TokenKind::Od);

        self.sink.emit(Instruction::Jump(condition));
        let end = self.sink.current_address();
        self.sink.fill(exit, Instruction::JumpNo(end));
    }

    fn write_statement(&mut self) {
        self.advance();
        self.expect(TokenKind::LeftParen);
        self.expression();
        self.expect(TokenKind::RightParen);
        self.sink.emit(Instruction::Print);
    }

    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    fn relation(&mut self) {
        self.expression();

        let Some(operator) = self.consume_if(TokenKind::Compare) else {
            let line = self.stream.line();
            self.report(Diagnostic::missing_comparison(line));
            return;
        };

        self.expression();
        if let Some(op) = operator.comparison() {
            self.sink.emit(Instruction::Compare(op));
        }
    }

    fn expression(&mut self) {
        self.term();
        while self.stream.see(TokenKind::AddOp) {
            let operator = self.advance();
            self.term();
            match operator.arithmetic() {
                Some(ArithmeticOp::Minus) => self.sink.emit(Instruction::Sub),
                _ => self.sink.emit(Instruction::Add),
            }
        }
    }

    fn term(&mut self) {
        self.factor();
        while self.stream.see(TokenKind::MulOp) {
            let operator = self.advance();
            self.factor();
            match operator.arithmetic() {
                Some(ArithmeticOp::Divide) => self.sink.emit(Instruction::Div),
                _ => self.sink.emit(Instruction::Mult),
            }
        }
    }

    fn factor(&mut self) {
        match self.stream.kind() {
            TokenKind::IntLiteral => {
                let literal = self.advance();
                let value = literal.integer().unwrap_or_default();
                let constant = coercion::integer_literal(value, self.coercions.top());
                self.emit_literal(constant);
            }
            TokenKind::FloatLiteral => {
                let after_operator = self
                    .stream
                    .previous_kind()
                    .is_some_and(TokenKind::is_operator);
                let literal = self.advance();
                let value = literal.float().unwrap_or_default();
                let constant = coercion::float_literal(
                    value,
                    after_operator,
                    self.coercions.top(),
                    self.symbols.last_declared_kind(),
                );
                self.emit_literal(constant);
            }
            TokenKind::Identifier => {
                let name = self.advance();
                if let Some(slot) = self.resolve(&name) {
                    self.sink.emit(Instruction::Load(slot));
                }
            }
            TokenKind::AddOp if self.stream.current().arithmetic() == Some(ArithmeticOp::Minus) => {
                self.nested(|parser| {
                    parser.advance();
                    parser.factor();
                    parser.sink.emit(Instruction::Invert);
                });
            }
            TokenKind::LeftParen => self.nested(Self::parenthesized),
            TokenKind::Read => {
                self.advance();
                self.sink.emit(Instruction::Input);
            }
            _ => {
                let line = self.stream.line();
                self.report(Diagnostic::expression_expected(line));
            }
        }
    }

    fn parenthesized(&mut self) {
        self.advance();

        let cast = match self.stream.kind() {
            TokenKind::Int => Some(NumericKind::Int),
            TokenKind::Float => Some(NumericKind::Float),
            _ => None,
        };

        match cast {
            Some(kind) => {
                self.advance();
                let outer = self.coercions.len();
                self.coercions.push(kind);
                self.expect(TokenKind::RightParen);
                self.expression();
                self.coercions.truncate(outer);
            }
            None => {
                self.coercions.clear();
                self.expression();
                self.expect(TokenKind::RightParen);
            }
        }
    }

    fn emit_literal(&mut self, constant: Constant) {
        self.sink.emit(Instruction::Push(constant));
        self.coercions.clear();
    }

    // -----------------------------------------------------------------------
    // Symbols
    // -----------------------------------------------------------------------

    fn declare(&mut self, name: &Token, kind: NumericKind) -> Option<Slot> {
        let text = name.name()?;
        match self.symbols.declare(text, kind) {
            Ok(slot) => Some(slot),
            Err(SymbolError::DuplicateDeclaration(existing)) => {
                self.report(Diagnostic::duplicate_declaration(name.line(), text));
                Some(existing.slot)
            }
            Err(SymbolError::UndeclaredVariable) => None,
        }
    }

    fn resolve(&mut self, name: &Token) -> Option<Slot> {
        let text = name.name()?;
        match self.symbols.resolve(text) {
            Ok(binding) => Some(binding.slot),
            Err(_) => {
                self.report(Diagnostic::undeclared_variable(name.line(), text));
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Token handling and recovery
    // -----------------------------------------------------------------------

    fn advance(&mut self) -> Token {
        let token = self.stream.advance();
        self.drain_lex_diagnostics();
        token
    }

    fn consume_if(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.stream.consume_if(kind)?;
        self.drain_lex_diagnostics();
        Some(token)
    }

    /// Consumes a token of `kind`, or reports a syntax error and recovers.
    ///
    /// Returns the matching token when one was consumed, directly or after
    /// recovery.
    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.stream.see(kind) {
            return Some(self.advance());
        }

        let line = self.stream.line();
        let found = self.stream.kind();
        self.report(Diagnostic::syntax(line, found, kind));
        self.recover(kind)
    }

    /// Discards tokens up to the next `kind` (consumed) or end of input.
    fn recover(&mut self, kind: TokenKind) -> Option<Token> {
        let skipped = self.stream.skip_until(kind);
        self.drain_lex_diagnostics();
        log::debug!("recovery discarded {skipped} token(s) looking for {kind}");
        self.consume_if(kind)
    }

    fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        if self.depth >= self.options.max_nesting {
            if !self.diagnostics.is_aborted() {
                let line = self.stream.line();
                self.report(Diagnostic::nesting_too_deep(line, self.options.max_nesting));
                self.diagnostics.abort();
                self.stream.skip_until(TokenKind::Eof);
            }
            return;
        }

        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }

    fn drain_lex_diagnostics(&mut self) {
        for diagnostic in self.stream.take_lex_diagnostics() {
            self.diagnostics.report_lexical(diagnostic);
        }
    }
}

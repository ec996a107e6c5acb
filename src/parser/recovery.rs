//! Diagnostic collection with a sticky error state.

use crate::lexer::LexDiagnostic;
use crate::parser::error::{Diagnostic, DiagnosticKind};

/// Ordered diagnostic log for one compilation.
///
/// Any recorded entry marks the compilation as failed; entries are never
/// removed. After [`Self::abort`] further reports are dropped.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    aborted: bool,
}

impl Diagnostics {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic unless the compilation was aborted.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.aborted {
            return;
        }
        log::debug!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Records a lexer diagnostic.
    pub fn report_lexical(&mut self, diagnostic: LexDiagnostic) {
        self.report(Diagnostic::new(
            DiagnosticKind::LexicalError,
            diagnostic.span.line,
            diagnostic.message,
        ));
    }

    /// Stops accepting diagnostics.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    /// Returns `true` once [`Self::abort`] was called.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Consumes the log, returning its entries.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

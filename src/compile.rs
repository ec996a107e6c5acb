//! Top-level compilation entry points.

use thiserror::Error;

use crate::ir::{CodeBuffer, IrError, Program, verify_program};
use crate::lexer::Lexer;
use crate::parser::{Diagnostic, ParseOptions, Parser, TokenStream};

/// Failure of a whole compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The source had errors; no code was finalized.
    #[error("compilation failed with {} error(s)", diagnostics.len())]
    Rejected {
        /// Every diagnostic, in report order.
        diagnostics: Vec<Diagnostic>,
    },
    /// Emitted code broke a structural invariant.
    #[error("internal compiler error: {0}")]
    Internal(#[from] IrError),
}

impl CompileError {
    /// Returns the diagnostics of a rejected compilation.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Rejected { diagnostics } => diagnostics,
            Self::Internal(_) => &[],
        }
    }
}

/// Compiles Milan source with default options.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    compile_with_options(source, ParseOptions::default())
}

/// Compiles Milan source.
///
/// Any diagnostic rejects the compilation: the code buffer is then dropped
/// without being finalized.
pub fn compile_with_options(source: &str, options: ParseOptions) -> Result<Program, CompileError> {
    log::debug!("compiling {} byte(s) of source", source.len());

    let stream = TokenStream::new(Lexer::new(source));
    let mut parser = Parser::new(options, stream, CodeBuffer::new());
    parser.parse_program();
    let outcome = parser.finish();

    if !outcome.diagnostics.is_empty() {
        log::debug!(
            "compilation rejected with {} diagnostic(s)",
            outcome.diagnostics.len()
        );
        return Err(CompileError::Rejected {
            diagnostics: outcome.diagnostics,
        });
    }

    let program = outcome.sink.finalize()?;
    verify_program(&program)?;
    log::debug!(
        "compiled {} instruction(s), {} variable(s)",
        program.len(),
        outcome.symbols.len()
    );
    Ok(program)
}

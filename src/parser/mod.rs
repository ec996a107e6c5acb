//! Recursive-descent parser with integrated code generation.

pub mod coercion;
pub mod error;
pub mod parser;
pub mod recovery;
pub mod symbols;
pub mod token_stream;

pub use coercion::CoercionStack;
pub use error::{Diagnostic, DiagnosticKind};
pub use parser::{ParseOptions, ParseOutcome, Parser};
pub use recovery::Diagnostics;
pub use symbols::{Binding, NumericKind, SymbolError, SymbolTable};
pub use token_stream::TokenStream;

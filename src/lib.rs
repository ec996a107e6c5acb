//! Library entrypoint for `milan`.
//!
//! A one-pass compiler for the Milan teaching language. The parser drives
//! the lexer and writes stack-machine instructions into a code sink as it
//! recognizes each construct; the `vm` module executes the result.

pub mod ir;
pub mod lexer;
pub mod parser;
pub mod vm;

mod compile;

pub use compile::{CompileError, compile, compile_with_options};

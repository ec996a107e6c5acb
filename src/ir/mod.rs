//! Instruction set, code sink and finalized program for the Milan stack VM.

pub mod bytecode;
pub mod error;
pub mod ids;
pub mod program;
pub mod verify;

pub use bytecode::{Constant, Instruction};
pub use error::{IrError, IrErrorKind};
pub use ids::{Address, Slot};
pub use program::{CodeBuffer, CodeSink, PatchSlot, Program};
pub use verify::verify_program;

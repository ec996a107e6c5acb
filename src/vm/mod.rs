//! Stack virtual machine executing compiled Milan programs.

pub mod error;
pub mod frame;
pub mod machine;
pub mod value;

pub use error::{VmError, VmErrorKind};
pub use frame::Frame;
pub use machine::{VmMachine, VmOptions};
pub use value::Value;

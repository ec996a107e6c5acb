//! Stack-machine instruction set emitted by the compiler.

use std::fmt;

use crate::ir::ids::{Address, Slot};
use crate::lexer::ComparisonOp;

/// Constant operand of `PUSH`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
        }
    }
}

/// One VM instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Placeholder written by a reservation; never survives finalization.
    Nop,
    /// Stops the machine.
    Stop,
    /// Pushes the value stored in a slot.
    Load(Slot),
    /// Pops a value into a slot.
    Store(Slot),
    /// Pushes a constant.
    Push(Constant),
    /// Pops `b`, `a`; pushes `a + b`.
    Add,
    /// Pops `b`, `a`; pushes `a - b`.
    Sub,
    /// Pops `b`, `a`; pushes `a * b`.
    Mult,
    /// Pops `b`, `a`; pushes `a / b`.
    Div,
    /// Negates the stack top.
    Invert,
    /// Pops `b`, `a`; pushes `1` if `a <op> b` holds, else `0`.
    Compare(ComparisonOp),
    /// Unconditional branch.
    Jump(Address),
    /// Pops a value and branches when it is zero.
    JumpNo(Address),
    /// Reads one value from input and pushes it.
    Input,
    /// Pops a value and writes it to output.
    Print,
}

impl Instruction {
    /// Returns the listing mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Stop => "STOP",
            Self::Load(_) => "LOAD",
            Self::Store(_) => "STORE",
            Self::Push(_) => "PUSH",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mult => "MULT",
            Self::Div => "DIV",
            Self::Invert => "INVERT",
            Self::Compare(_) => "COMPARE",
            Self::Jump(_) => "JUMP",
            Self::JumpNo(_) => "JUMP_NO",
            Self::Input => "INPUT",
            Self::Print => "PRINT",
        }
    }

    /// Returns the branch target for `JUMP` and `JUMP_NO`.
    pub fn branch_target(&self) -> Option<Address> {
        match self {
            Self::Jump(target) | Self::JumpNo(target) => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())?;
        match self {
            Self::Load(slot) | Self::Store(slot) => write!(f, "\t{slot}"),
            Self::Push(constant) => write!(f, "\t{constant}"),
            Self::Compare(op) => write!(f, "\t{}", op.code()),
            Self::Jump(target) | Self::JumpNo(target) => write!(f, "\t{target}"),
            _ => Ok(()),
        }
    }
}

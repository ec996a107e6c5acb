//! VM activation state: program counter, operand stack and variable memory.

use crate::ir::Slot;
use crate::vm::error::VmError;
use crate::vm::value::Value;

/// The single activation record of a running program.
#[derive(Debug, Clone)]
pub struct Frame {
    pc: usize,
    memory: Vec<Value>,
    stack: Vec<Value>,
    max_stack: usize,
}

impl Frame {
    /// Creates a frame with `slots` zero-initialized memory cells.
    ///
    /// `max_stack` sets the operand stack depth limit.
    pub fn new(slots: usize, max_stack: usize) -> Self {
        Self {
            pc: 0,
            memory: vec![Value::default(); slots],
            stack: Vec::with_capacity(max_stack.min(64)),
            max_stack,
        }
    }

    // -- PC accessors --

    /// Returns the current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Sets the program counter to `pc`.
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Returns the current program counter and then increments it.
    pub fn advance_pc(&mut self) -> usize {
        let current = self.pc;
        self.pc += 1;
        current
    }

    // -- Stack operations --

    /// Pushes a value onto the operand stack.
    ///
    /// Returns `Err(VmError)` with `StackOverflow` if the stack has reached its
    /// configured depth limit.
    pub fn push(&mut self, value: Value) -> Result<(), VmError> {
        if self.stack.len() >= self.max_stack {
            return Err(VmError::stack_overflow(self.max_stack));
        }
        self.stack.push(value);
        Ok(())
    }

    /// Pops the top value from the operand stack.
    pub fn pop(&mut self) -> Result<Value, VmError> {
        self.stack.pop().ok_or_else(VmError::stack_underflow)
    }

    /// Pops `rhs` then `lhs`, returning them in source order.
    pub fn pop_pair(&mut self) -> Result<(Value, Value), VmError> {
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        Ok((lhs, rhs))
    }

    /// Returns the current operand stack depth.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    // -- Memory operations --

    /// Reads a memory cell; never-written cells read as integer zero.
    pub fn load(&self, slot: Slot) -> Value {
        self.memory.get(slot.index()).copied().unwrap_or_default()
    }

    /// Writes a memory cell, growing memory as needed.
    pub fn store(&mut self, slot: Slot, value: Value) {
        let index = slot.index();
        if index >= self.memory.len() {
            self.memory.resize(index + 1, Value::default());
        }
        self.memory[index] = value;
    }

    /// Returns the memory cells.
    pub fn memory(&self) -> &[Value] {
        &self.memory
    }
}

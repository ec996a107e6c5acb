//! Top-level VM execution engine with a fetch/dispatch loop.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::ir::{Instruction, Program};
use crate::vm::error::VmError;
use crate::vm::frame::Frame;
use crate::vm::value::Value;

/// Resource guardrails for execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VmOptions {
    /// Maximum operand stack depth.
    pub max_stack_depth: usize,
    /// Maximum number of executed instructions.
    pub max_steps: usize,
}

impl Default for VmOptions {
    fn default() -> Self {
        Self {
            max_stack_depth: 1024,
            max_steps: 10_000_000,
        }
    }
}

/// Interpreter for a finalized [`Program`].
pub struct VmMachine<'p> {
    program: &'p Program,
    options: VmOptions,
    frame: Frame,
    steps: usize,
}

impl<'p> VmMachine<'p> {
    /// Creates a VM with default options.
    pub fn new(program: &'p Program) -> Self {
        Self::with_options(program, VmOptions::default())
    }

    /// Creates a VM with explicit options.
    pub fn with_options(program: &'p Program, options: VmOptions) -> Self {
        Self {
            program,
            options,
            frame: Frame::new(program.slot_count(), options.max_stack_depth),
            steps: 0,
        }
    }

    /// Returns the variable memory.
    pub fn memory(&self) -> &[Value] {
        self.frame.memory()
    }

    /// Returns the number of instructions executed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Runs until `STOP`, reading `INPUT` words from `input` and writing
    /// `PRINT` lines to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), VmError> {
        let mut input = InputWords::new(input);
        let program = self.program;
        let instructions = program.instructions();

        loop {
            let pc = self.frame.pc();
            let Some(instruction) = instructions.get(pc).copied() else {
                return Err(VmError::missing_stop(instructions.len()));
            };

            if self.steps >= self.options.max_steps {
                return Err(VmError::step_limit_exceeded(self.options.max_steps));
            }
            self.steps += 1;
            self.frame.advance_pc();

            match instruction {
                Instruction::Nop => {
                    return Err(VmError::invalid_instruction(pc, "unfilled placeholder"));
                }
                Instruction::Stop => break,
                Instruction::Load(slot) => {
                    let value = self.frame.load(slot);
                    self.frame.push(value)?;
                }
                Instruction::Store(slot) => {
                    let value = self.frame.pop()?;
                    self.frame.store(slot, value);
                }
                Instruction::Push(constant) => self.frame.push(constant.into())?,
                Instruction::Add => self.binary(Value::add)?,
                Instruction::Sub => self.binary(Value::sub)?,
                Instruction::Mult => self.binary(Value::mul)?,
                Instruction::Div => self.binary(Value::div)?,
                Instruction::Invert => {
                    let value = self.frame.pop()?.negate()?;
                    self.frame.push(value)?;
                }
                Instruction::Compare(op) => {
                    let (lhs, rhs) = self.frame.pop_pair()?;
                    self.frame.push(lhs.compare(op, rhs))?;
                }
                Instruction::Jump(target) => self.branch(pc, target.index())?,
                Instruction::JumpNo(target) => {
                    if self.frame.pop()?.is_zero() {
                        self.branch(pc, target.index())?;
                    }
                }
                Instruction::Input => {
                    let value = input.next_value()?;
                    self.frame.push(value)?;
                }
                Instruction::Print => {
                    let value = self.frame.pop()?;
                    writeln!(output, "{value}").map_err(|error| VmError::io(&error))?;
                }
            }
        }

        output.flush().map_err(|error| VmError::io(&error))?;
        log::debug!("program stopped after {} step(s)", self.steps);
        Ok(())
    }

    fn binary(&mut self, op: fn(Value, Value) -> Result<Value, VmError>) -> Result<(), VmError> {
        let (lhs, rhs) = self.frame.pop_pair()?;
        self.frame.push(op(lhs, rhs)?)
    }

    fn branch(&mut self, at: usize, target: usize) -> Result<(), VmError> {
        if target >= self.program.len() {
            return Err(VmError::invalid_branch_target(at, target));
        }
        self.frame.set_pc(target);
        Ok(())
    }
}

/// Whitespace-separated words pulled lazily from a reader.
struct InputWords<R> {
    reader: R,
    words: VecDeque<String>,
}

impl<R: BufRead> InputWords<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            words: VecDeque::new(),
        }
    }

    fn next_value(&mut self) -> Result<Value, VmError> {
        loop {
            if let Some(word) = self.words.pop_front() {
                return Value::parse(&word);
            }

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|error| VmError::io(&error))?;
            if read == 0 {
                return Err(VmError::input_exhausted());
            }
            self.words
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

//! Instruction buffer with two-phase branch reservation, and the finalized
//! program it produces.

use std::collections::BTreeSet;
use std::fmt;

use crate::ir::bytecode::Instruction;
use crate::ir::error::IrError;
use crate::ir::ids::Address;

/// Handle to an instruction position reserved for a later fill.
///
/// Handles are neither `Clone` nor `Copy`: [`CodeSink::fill`] takes the
/// handle by value, so each reservation is filled at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a reserved slot must be filled before finalization"]
pub struct PatchSlot {
    address: Address,
}

impl PatchSlot {
    /// Creates a handle for a position a sink has just reserved.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Returns the reserved address.
    pub fn address(&self) -> Address {
        self.address
    }
}

/// Destination for instructions emitted while parsing.
pub trait CodeSink {
    /// Appends one instruction.
    fn emit(&mut self, instruction: Instruction);

    /// Appends a placeholder and returns a handle to its position.
    fn reserve(&mut self) -> PatchSlot;

    /// Overwrites a reserved placeholder.
    fn fill(&mut self, slot: PatchSlot, instruction: Instruction);

    /// Returns the address the next emitted instruction will occupy.
    fn current_address(&self) -> Address;
}

/// In-memory [`CodeSink`].
#[derive(Debug, Clone, Default)]
pub struct CodeBuffer {
    instructions: Vec<Instruction>,
    pending: BTreeSet<u32>,
}

impl CodeBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the instructions emitted so far, placeholders included.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the number of reservations not yet filled.
    pub fn pending_reservations(&self) -> usize {
        self.pending.len()
    }

    /// Seals the buffer into a [`Program`].
    ///
    /// Fails when a reservation was never filled.
    pub fn finalize(self) -> Result<Program, IrError> {
        if !self.pending.is_empty() {
            let addresses = self.pending.iter().copied().collect::<Vec<_>>();
            return Err(IrError::unfilled_reservation(&addresses));
        }
        log::trace!("finalized {} instructions", self.instructions.len());
        Ok(Program::new(self.instructions))
    }
}

impl CodeSink for CodeBuffer {
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn reserve(&mut self) -> PatchSlot {
        let address = self.current_address();
        self.instructions.push(Instruction::Nop);
        self.pending.insert(address.value());
        log::trace!("reserved slot at {address}");
        PatchSlot::new(address)
    }

    fn fill(&mut self, slot: PatchSlot, instruction: Instruction) {
        let address = slot.address();
        assert!(
            self.pending.remove(&address.value()),
            "fill of address {address}, which holds no pending reservation"
        );
        log::trace!("filled slot at {address} with {instruction}");
        self.instructions[address.index()] = instruction;
    }

    fn current_address(&self) -> Address {
        Address::new(u32::try_from(self.instructions.len()).unwrap_or(u32::MAX))
    }
}

/// Finalized instruction sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Wraps an instruction sequence.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Returns the instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the instruction at `address`.
    pub fn get(&self, address: Address) -> Option<&Instruction> {
        self.instructions.get(address.index())
    }

    /// Returns the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` when the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns one past the highest slot referenced by `LOAD` or `STORE`.
    pub fn slot_count(&self) -> usize {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Load(slot) | Instruction::Store(slot) => Some(slot.index() + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Renders the program in listing format.
    pub fn listing(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (address, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{address}:\t{instruction}")?;
        }
        Ok(())
    }
}

//! Structural validation of a finalized [`Program`].
//!
//! Catches lowering bugs (dangling placeholders, out-of-bounds branch
//! targets, missing terminator) before a program reaches the VM.

use crate::ir::bytecode::Instruction;
use crate::ir::error::IrError;
use crate::ir::program::Program;

/// Verifies structural invariants of a program.
///
/// Returns the first error found, or `Ok(())` when the program is well-formed.
pub fn verify_program(program: &Program) -> Result<(), IrError> {
    let instructions = program.instructions();

    match instructions.last() {
        None => return Err(IrError::invariant_violation("program is empty")),
        Some(Instruction::Stop) => {}
        Some(other) => {
            return Err(IrError::invariant_violation(format!(
                "program ends with {other} instead of STOP"
            )));
        }
    }

    for (at, instruction) in instructions.iter().enumerate() {
        if *instruction == Instruction::Nop {
            return Err(IrError::invariant_violation(format!(
                "placeholder left at address {at}"
            )));
        }

        if let Some(target) = instruction.branch_target()
            && target.index() >= instructions.len()
        {
            return Err(IrError::invalid_branch_target(
                at as u32,
                target.value(),
                instructions.len(),
            ));
        }
    }

    Ok(())
}

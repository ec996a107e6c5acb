use milan::ir::{
    Address, CodeBuffer, CodeSink, Constant, Instruction, IrErrorKind, PatchSlot, Slot,
};

#[test]
fn reserve_writes_a_placeholder_and_advances_the_address() {
    let mut buffer = CodeBuffer::new();
    buffer.emit(Instruction::Push(Constant::Int(1)));
    assert_eq!(buffer.current_address(), Address::new(1));

    let slot = buffer.reserve();
    assert_eq!(slot.address(), Address::new(1));
    assert_eq!(buffer.current_address(), Address::new(2));
    assert_eq!(buffer.instructions()[1], Instruction::Nop);
    assert_eq!(buffer.pending_reservations(), 1);

    buffer.fill(slot, Instruction::JumpNo(Address::new(2)));
    assert_eq!(buffer.pending_reservations(), 0);
    assert_eq!(buffer.instructions()[1], Instruction::JumpNo(Address::new(2)));
}

#[test]
fn fills_can_happen_in_any_order() {
    let mut buffer = CodeBuffer::new();
    let outer = buffer.reserve();
    let inner = buffer.reserve();
    buffer.emit(Instruction::Stop);

    buffer.fill(inner, Instruction::Jump(Address::new(2)));
    buffer.fill(outer, Instruction::JumpNo(Address::new(2)));

    let program = buffer.finalize().expect("all reservations filled");
    assert_eq!(
        program.instructions(),
        &[
            Instruction::JumpNo(Address::new(2)),
            Instruction::Jump(Address::new(2)),
            Instruction::Stop,
        ]
    );
}

#[test]
fn finalize_rejects_unfilled_reservations() {
    let mut buffer = CodeBuffer::new();
    buffer.emit(Instruction::Input);
    let _slot = buffer.reserve();
    buffer.emit(Instruction::Stop);

    let err = buffer.finalize().expect_err("reservation left open");
    assert_eq!(err.kind, IrErrorKind::UnfilledReservation);
    assert!(err.message.contains('1'));
}

#[test]
#[should_panic(expected = "no pending reservation")]
fn filling_an_address_that_was_never_reserved_panics() {
    let mut buffer = CodeBuffer::new();
    buffer.emit(Instruction::Stop);
    buffer.fill(PatchSlot::new(Address::new(0)), Instruction::Nop);
}

#[test]
fn program_accessors_and_slot_count() {
    let mut buffer = CodeBuffer::new();
    buffer.emit(Instruction::Push(Constant::Float(0.5)));
    buffer.emit(Instruction::Store(Slot::new(3)));
    buffer.emit(Instruction::Load(Slot::new(1)));
    buffer.emit(Instruction::Stop);
    let program = buffer.finalize().expect("no reservations");

    assert_eq!(program.len(), 4);
    assert!(!program.is_empty());
    assert_eq!(program.slot_count(), 4);
    assert_eq!(program.get(Address::new(3)), Some(&Instruction::Stop));
    assert_eq!(program.get(Address::new(4)), None);
}

#[test]
fn listing_renders_each_instruction_on_its_own_line() {
    let mut buffer = CodeBuffer::new();
    buffer.emit(Instruction::Push(Constant::Float(2.5)));
    buffer.emit(Instruction::Print);
    buffer.emit(Instruction::Stop);
    let program = buffer.finalize().expect("no reservations");

    assert_eq!(program.listing(), "0:\tPUSH\t2.5\n1:\tPRINT\n2:\tSTOP\n");
    assert_eq!(program.to_string(), program.listing());
}

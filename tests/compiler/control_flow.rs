use milan::compile;
use milan::ir::{Address, CodeBuffer, Constant, Instruction, Slot};
use milan::lexer::{ComparisonOp, Lexer};
use milan::parser::{DiagnosticKind, ParseOptions, Parser, TokenStream};

fn instructions(source: &str) -> Vec<Instruction> {
    compile(source)
        .expect("program compiles")
        .instructions()
        .to_vec()
}

#[test]
fn if_without_else_skips_to_the_end_of_the_then_block() {
    assert_eq!(
        instructions("begin int x := 1; if x > 0 then write(x) fi end"),
        vec![
            Instruction::Push(Constant::Int(1)),
            Instruction::Store(Slot::new(0)),
            Instruction::Load(Slot::new(0)),
            Instruction::Push(Constant::Int(0)),
            Instruction::Compare(ComparisonOp::Greater),
            Instruction::JumpNo(Address::new(8)),
            Instruction::Load(Slot::new(0)),
            Instruction::Print,
            Instruction::Stop,
        ]
    );
}

#[test]
fn if_else_branches_to_else_and_jumps_past_it() {
    assert_eq!(
        instructions("begin int x := 1; if x = 1 then write(1) else write(2) fi end"),
        vec![
            Instruction::Push(Constant::Int(1)),
            Instruction::Store(Slot::new(0)),
            Instruction::Load(Slot::new(0)),
            Instruction::Push(Constant::Int(1)),
            Instruction::Compare(ComparisonOp::Equal),
            Instruction::JumpNo(Address::new(9)),
            Instruction::Push(Constant::Int(1)),
            Instruction::Print,
            Instruction::Jump(Address::new(11)),
            Instruction::Push(Constant::Int(2)),
            Instruction::Print,
            Instruction::Stop,
        ]
    );
}

#[test]
fn while_jumps_back_to_the_condition() {
    assert_eq!(
        instructions("begin int i := 0; while i < 3 do i := i + 1 od; write(i) end"),
        vec![
            Instruction::Push(Constant::Int(0)),
            Instruction::Store(Slot::new(0)),
            Instruction::Load(Slot::new(0)),
            Instruction::Push(Constant::Int(3)),
            Instruction::Compare(ComparisonOp::Less),
            Instruction::JumpNo(Address::new(11)),
            Instruction::Load(Slot::new(0)),
            Instruction::Push(Constant::Int(1)),
            Instruction::Add,
            Instruction::Store(Slot::new(0)),
            Instruction::Jump(Address::new(2)),
            Instruction::Load(Slot::new(0)),
            Instruction::Print,
            Instruction::Stop,
        ]
    );
}

#[test]
fn empty_bodies_are_allowed() {
    assert_eq!(
        instructions("begin while 1 = 1 do od; if 1 != 2 then else fi end"),
        vec![
            Instruction::Push(Constant::Int(1)),
            Instruction::Push(Constant::Int(1)),
            Instruction::Compare(ComparisonOp::Equal),
            Instruction::JumpNo(Address::new(5)),
            Instruction::Jump(Address::new(0)),
            Instruction::Push(Constant::Int(1)),
            Instruction::Push(Constant::Int(2)),
            Instruction::Compare(ComparisonOp::NotEqual),
            Instruction::JumpNo(Address::new(10)),
            Instruction::Jump(Address::new(10)),
            Instruction::Stop,
        ]
    );
}

#[test]
fn nested_branches_resolve_to_their_own_targets() {
    let program = compile(
        "begin
           int i := 0;
           while i < 5 do
             if i >= 3 then write(i) fi;
             i := i + 1
           od
         end",
    )
    .expect("program compiles");

    for (at, instruction) in program.instructions().iter().enumerate() {
        if let Some(target) = instruction.branch_target() {
            assert!(target.index() < program.len(), "branch at {at} out of range");
        }
    }

    let outer_exit = program.instructions()[5];
    assert_eq!(
        outer_exit,
        Instruction::JumpNo(Address::new(program.len() as u32 - 1))
    );
}

#[test]
fn every_comparison_operator_maps_to_its_code() {
    let cases = [
        ("=", ComparisonOp::Equal),
        ("!=", ComparisonOp::NotEqual),
        ("<", ComparisonOp::Less),
        (">", ComparisonOp::Greater),
        ("<=", ComparisonOp::LessOrEqual),
        (">=", ComparisonOp::GreaterOrEqual),
    ];
    for (text, op) in cases {
        let source = format!("begin if 1 {text} 2 then fi end");
        let code = instructions(&source);
        assert_eq!(code[2], Instruction::Compare(op), "operator {text}");
    }
}

#[test]
fn missing_comparison_emits_no_compare() {
    let stream = TokenStream::new(Lexer::new(
        "begin int x := 1; if x then write(x) fi end",
    ));
    let mut parser = Parser::new(ParseOptions::default(), stream, CodeBuffer::new());
    parser.parse_program();
    let outcome = parser.finish();

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].kind,
        DiagnosticKind::MissingComparisonOperator
    );
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "Line 1: comparison operator expected."
    );
    assert!(
        !outcome
            .sink
            .instructions()
            .iter()
            .any(|instruction| matches!(instruction, Instruction::Compare(_)))
    );
    assert_eq!(outcome.sink.pending_reservations(), 0);
}

use milan::ir::{CodeBuffer, Constant, Instruction, Slot};
use milan::lexer::Lexer;
use milan::parser::{
    DiagnosticKind, NumericKind, ParseOptions, ParseOutcome, Parser, SymbolError, SymbolTable,
    TokenStream,
};

fn parse(source: &str) -> ParseOutcome<CodeBuffer> {
    let stream = TokenStream::new(Lexer::new(source));
    let mut parser = Parser::new(ParseOptions::default(), stream, CodeBuffer::new());
    parser.parse_program();
    parser.finish()
}

#[test]
fn table_assigns_contiguous_slots_in_declaration_order() {
    let mut table = SymbolTable::new();
    assert_eq!(table.declare("x", NumericKind::Int), Ok(Slot::new(0)));
    assert_eq!(table.declare("y", NumericKind::Float), Ok(Slot::new(1)));
    assert_eq!(table.declare("z", NumericKind::Int), Ok(Slot::new(2)));
    assert_eq!(table.len(), 3);
    assert_eq!(table.last_declared_kind(), Some(NumericKind::Int));

    let y = table.resolve("y").expect("y is declared");
    assert_eq!(y.slot, Slot::new(1));
    assert_eq!(y.kind, NumericKind::Float);
}

#[test]
fn table_rejects_redeclaration_without_mutation() {
    let mut table = SymbolTable::new();
    table.declare("x", NumericKind::Int).expect("fresh name");

    let err = table
        .declare("x", NumericKind::Float)
        .expect_err("redeclaration fails");
    match err {
        SymbolError::DuplicateDeclaration(existing) => {
            assert_eq!(existing.slot, Slot::new(0));
            assert_eq!(existing.kind, NumericKind::Int);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(table.len(), 1);
    assert_eq!(table.last_declared_kind(), Some(NumericKind::Int));
}

#[test]
fn table_resolve_of_unknown_name_fails() {
    let table = SymbolTable::new();
    assert_eq!(table.resolve("ghost"), Err(SymbolError::UndeclaredVariable));
    assert!(table.is_empty());
    assert_eq!(table.last_declared_kind(), None);
}

#[test]
fn bindings_are_listed_by_slot() {
    let outcome = parse("begin int b := 1; float a := 2.0; int c := 3 end");
    let names: Vec<&str> = outcome
        .symbols
        .bindings()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn duplicate_declaration_reports_once_and_reuses_the_slot() {
    let outcome = parse("begin int a := 1; int a := 2; int b := 3 end");

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].kind,
        DiagnosticKind::DuplicateDeclaration
    );
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "Line 1: Variable 'a' has been already declared."
    );

    assert_eq!(outcome.symbols.len(), 2);
    let b = outcome.symbols.resolve("b").expect("b is declared");
    assert_eq!(b.slot, Slot::new(1));

    assert_eq!(
        outcome.sink.instructions(),
        &[
            Instruction::Push(Constant::Int(1)),
            Instruction::Store(Slot::new(0)),
            Instruction::Push(Constant::Int(2)),
            Instruction::Store(Slot::new(0)),
            Instruction::Push(Constant::Int(3)),
            Instruction::Store(Slot::new(1)),
            Instruction::Stop,
        ]
    );
}

#[test]
fn undeclared_assignment_reports_and_leaves_table_untouched() {
    let outcome = parse("begin\n  x := 1\nend");

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].kind,
        DiagnosticKind::UndeclaredVariable
    );
    assert_eq!(outcome.diagnostics[0].line, 2);
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "Line 2: Variable 'x' has not been declared."
    );
    assert!(outcome.symbols.is_empty());
    assert_eq!(
        outcome.sink.instructions(),
        &[Instruction::Push(Constant::Int(1)), Instruction::Stop]
    );
}

#[test]
fn undeclared_use_in_expression_emits_no_load() {
    let outcome = parse("begin int a := y + 1 end");

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].kind,
        DiagnosticKind::UndeclaredVariable
    );
    assert!(
        !outcome
            .sink
            .instructions()
            .iter()
            .any(|instruction| matches!(instruction, Instruction::Load(_)))
    );
    assert_eq!(outcome.symbols.len(), 1);
}

#[test]
fn variables_are_visible_after_the_enclosing_block() {
    let outcome = parse("begin int x := 1; if x > 0 then int y := 2 fi; write(y) end");
    assert!(outcome.diagnostics.is_empty());
    let y = outcome.symbols.resolve("y").expect("y is declared");
    assert_eq!(y.slot, Slot::new(1));
}

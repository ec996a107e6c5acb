use milan::compile;
use milan::ir::{CodeBuffer, Instruction};
use milan::lexer::Lexer;
use milan::parser::{ParseOptions, Parser, TokenStream};
use proptest::prelude::*;

const MAX_INPUT_BYTES: usize = 256;
const MAX_FRAGMENTS: usize = 64;

const FRAGMENTS: &[&str] = &[
    "begin", "end", "if", "then", "else", "fi", "while", "do", "od", "write", "read", "int",
    "float", "x", "y", ":=", ";", "(", ")", "+", "-", "*", "/", "<", "=", ">=", "1", "2.5", "#",
];

fn token_soup() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(FRAGMENTS), 0..=MAX_FRAGMENTS)
        .prop_map(|fragments| fragments.join(" "))
}

fn declarations() -> impl Strategy<Value = Vec<(bool, i64)>> {
    proptest::collection::vec((any::<bool>(), 0i64..1000), 1..12)
}

proptest! {
    #[test]
    fn compile_handles_lossy_utf8_inputs_without_panicking(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES)
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let _ = compile(&input);
    }

    #[test]
    fn parse_always_terminates_with_stop_and_no_open_reservations(source in token_soup()) {
        let stream = TokenStream::new(Lexer::new(&source));
        let mut parser = Parser::new(ParseOptions::default(), stream, CodeBuffer::new());
        parser.parse_program();
        let outcome = parser.finish();

        prop_assert_eq!(outcome.sink.instructions().last(), Some(&Instruction::Stop));
        prop_assert_eq!(outcome.sink.pending_reservations(), 0);
        prop_assert_eq!(compile(&source).is_ok(), outcome.diagnostics.is_empty());
    }

    #[test]
    fn compile_is_deterministic(source in token_soup()) {
        prop_assert_eq!(compile(&source), compile(&source));
    }

    #[test]
    fn declarations_receive_contiguous_slots(decls in declarations()) {
        let body = decls
            .iter()
            .enumerate()
            .map(|(index, (is_float, value))| {
                let kind = if *is_float { "float" } else { "int" };
                format!("{kind} v{index} := {value}")
            })
            .collect::<Vec<_>>()
            .join("; ");
        let source = format!("begin {body} end");

        let program = compile(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let stores: Vec<u32> = program
            .instructions()
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Store(slot) => Some(slot.value()),
                _ => None,
            })
            .collect();
        let expected: Vec<u32> = (0..decls.len() as u32).collect();
        prop_assert_eq!(stores, expected);
        prop_assert_eq!(program.slot_count(), decls.len());
    }
}

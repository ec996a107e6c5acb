use milan::compile;
use milan::vm::{Value, VmMachine};

fn execute(source: &str, input: &str) -> String {
    let program = compile(source).expect("program compiles");
    let mut output = Vec::new();
    VmMachine::new(&program)
        .run(input.as_bytes(), &mut output)
        .expect("program runs");
    String::from_utf8(output).expect("utf-8 output")
}

#[test]
fn factorial_of_input() {
    let source = "
        begin
          int n := read;
          int result := 1;
          /* multiply down to 1 */
          while n > 1 do
            result := result * n;
            n := n - 1
          od;
          write(result)
        end";
    assert_eq!(execute(source, "5\n"), "120\n");
    assert_eq!(execute(source, "0\n"), "1\n");
}

#[test]
fn if_else_selects_a_branch() {
    let source = "begin int x := read; if x >= 10 then write(1) else write(0) fi end";
    assert_eq!(execute(source, "12"), "1\n");
    assert_eq!(execute(source, "3"), "0\n");
}

#[test]
fn arithmetic_follows_operand_kinds() {
    assert_eq!(execute("begin write(7 / 2); write(-7 / 2) end", ""), "3\n-3\n");
    assert_eq!(execute("begin float f := 1.0; write(f / 4) end", ""), "0.25\n");
    assert_eq!(execute("begin write((float) 7 / 2) end", ""), "3.5\n");
}

#[test]
fn memory_holds_final_variable_values() {
    let program = compile("begin int a := 3; float b := a * 1.5 end").expect("program compiles");
    let mut machine = VmMachine::new(&program);
    machine
        .run(&b""[..], Vec::new())
        .expect("program runs");
    assert_eq!(machine.memory(), &[Value::Integer(3), Value::Float(4.5)]);
    assert_eq!(machine.steps(), program.len());
}

#[test]
fn nested_loops_count_pairs() {
    let source = "
        begin
          int i := 0;
          int pairs := 0;
          while i < 3 do
            int j := 0;
            while j < 4 do
              pairs := pairs + 1;
              j := j + 1
            od;
            i := i + 1
          od;
          write(pairs)
        end";
    assert_eq!(execute(source, ""), "12\n");
}

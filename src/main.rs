use std::env;
use std::fs;
use std::io;
use std::process;

use log::{LevelFilter, Log, Metadata, Record};
use milan::CompileError;
use milan::vm::VmMachine;

/// Writes log records to stderr; level comes from `MILAN_LOG`.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = env::var("MILAN_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Off);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("milanc");
    let (run, path) = match args.get(1..).unwrap_or_default() {
        [path] => (false, path),
        [flag, path] if flag == "--run" => (true, path),
        _ => {
            eprintln!("usage: {program_name} [--run] <file>");
            process::exit(1);
        }
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{program_name}: cannot read {path}: {err}");
            process::exit(1);
        }
    };

    let program = match milan::compile(&source) {
        Ok(program) => program,
        Err(CompileError::Rejected { diagnostics }) => {
            for diagnostic in &diagnostics {
                eprintln!("{diagnostic}");
            }
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{program_name}: {err}");
            process::exit(1);
        }
    };

    if !run {
        print!("{program}");
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut machine = VmMachine::new(&program);
    if let Err(err) = machine.run(stdin.lock(), stdout.lock()) {
        eprintln!("{program_name}: runtime error: {err}");
        process::exit(1);
    }
}

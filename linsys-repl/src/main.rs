mod app;
mod command;
mod error;
mod sink;

use app::{App, Method};
use clap::Parser;
use linsys_compute::ctxt::{Ctxt, DEFAULT_MAX_COMPONENT};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, path::PathBuf, process::ExitCode};

/// Practice solving systems of two linear equations with exact fractions.
#[derive(Debug, Parser)]
#[command(name = "linsys", version)]
struct Args {
    /// The method used to solve the exercises.
    #[arg(short, long, value_enum, default_value_t = Method::Elimination)]
    method: Method,

    /// The largest numerator that a result may have.
    #[arg(long, env = "LINSYS_MAX_NUMERATOR", default_value_t = DEFAULT_MAX_COMPONENT)]
    max_numerator: u32,

    /// The largest denominator that a result may have.
    #[arg(long, env = "LINSYS_MAX_DENOMINATOR", default_value_t = DEFAULT_MAX_COMPONENT)]
    max_denominator: u32,

    /// A file of commands to run, one per line. Lines starting with `#` are ignored.
    file: Option<PathBuf>,
}

/// Runs every line of a script, printing the results. Returns false if any line failed.
fn run_script(app: &mut App, src_id: &str, input: &str) -> bool {
    let mut ok = true;
    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        match app.execute(line) {
            Ok(out) if out.is_empty() => (),
            Ok(out) => println!("{}", out),
            Err(err) => {
                err.report_to_stderr(src_id, line);
                ok = false;
            },
        }
    }
    ok
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let mut app = App::new(args.method, Ctxt::new(args.max_numerator, args.max_denominator));

    if let Some(path) = args.file {
        // run a script
        let src_id = path.display().to_string();
        let input = match fs::read_to_string(&path) {
            Ok(input) => input,
            Err(err) => {
                eprintln!("could not read {}: {}", src_id, err);
                return ExitCode::FAILURE;
            },
        };
        if run_script(&mut app, &src_id, &input) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    } else if !io::stdin().is_terminal() {
        // read the script from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        if run_script(&mut app, "input", &input) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        fn process_line(rl: &mut DefaultEditor, app: &mut App) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            match app.execute(&input) {
                Ok(out) if out.is_empty() => (),
                Ok(out) => println!("{}", out),
                Err(err) => err.report_to_stderr("input", &input),
            }
            Ok(())
        }

        println!("type `help` to see the list of commands");
        loop {
            if let Err(err) = process_line(&mut rl, &mut app) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
        ExitCode::SUCCESS
    }
}

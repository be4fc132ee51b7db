//! Apply periodic boundary conditions to the positions in a trace streamed
//! through stdin.
use std::io::{BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use pbcwrap::{parse_args, Command, PbcFilter, SimBox, USAGE};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(Command::Help) => {
            eprint!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(config)) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprint!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("error: no data on stdin");
        eprint!("{USAGE}");
        return ExitCode::FAILURE;
    }

    let filter = PbcFilter::new(SimBox::new(config.size));
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let result = filter
        .process(stdin.lock(), &mut writer)
        .and_then(|_| writer.flush());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

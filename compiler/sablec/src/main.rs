//! Sable CLI

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    sablec::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = sablec::run(&args, &mut out);
    let _ = out.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = sablec::report(&error, &mut io::stderr());
            ExitCode::from(error.exit_code())
        }
    }
}

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match parrotd::run_bot() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "parrotd: {error}");
            ExitCode::FAILURE
        }
    }
}

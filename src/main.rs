//! fileshelf - embedded JSON document store

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = fileshelf::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

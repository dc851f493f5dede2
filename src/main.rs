//! Basket - Local-first shopping history tracker

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = basket_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

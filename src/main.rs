use std::process::ExitCode;

use clap::Parser;
use cursor_id_modifier::{cli::Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported on the console by `run`.
        Err(_) => ExitCode::FAILURE,
    }
}

use std::process::ExitCode;

use anyhow::Result;

pub mod args;
mod exit_code;
mod report;
mod run;

pub use args::{Arguments, Command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let output = run::run(args)?;
    report::print(&output, verbose);

    Ok(match exit_code::exit_code_from_output(&output) {
        0 => ExitStatus::Success,
        _ => ExitStatus::Failure,
    })
}

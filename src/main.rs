mod cli_args;
mod container;
mod core;
mod dissect;
mod network;
mod report;
mod setup_logger;
#[cfg(test)]
mod test_utils;

use crate::cli_args::CommandLineArguments;
use crate::core::config::OutputFormat;
use crate::core::{Configuration, DissectError};
use crate::dissect::dissect_file;
use crate::report::{JsonReporter, TextReporter};
use crate::setup_logger::setup_logger;
use log::debug;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DissectError> {
    let args = CommandLineArguments::parse(std::env::args_os().skip(1).collect::<Vec<OsString>>())
        .map_err(DissectError::Usage)?;

    // 環境変数 (.env) から設定を読み込む
    let config = Configuration::from_env()?;
    setup_logger(&config.logging)
        .map_err(|e| DissectError::Logger(e.to_string()))?;
    debug!("設定: {:?}", config);

    let stdout = io::stdout();
    match config.output.format {
        OutputFormat::Text => {
            let mut reporter = TextReporter::new(stdout.lock(), io::stderr().lock());
            dissect_file(args.input(), &config, &mut reporter)?;
        }
        OutputFormat::Json => {
            let mut reporter = JsonReporter::new(stdout.lock());
            dissect_file(args.input(), &config, &mut reporter)?;
        }
    }

    Ok(())
}

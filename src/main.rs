//! Main application entry point.
//!
//! Parses the command line and dispatches to the matching command. The live
//! dashboard is run through the [`Yearglance`] builder:
//!
//! - Normal startup: `Yearglance::new(debug_enabled).run()`
//! - Simulation: `--simulate` installs a simulated clock, then runs
//!   `Yearglance::new(debug_enabled).without_headers()`

use anyhow::Result;
use std::path::PathBuf;

use yearglance::{
    Yearglance,
    args::{self, CliAction, ParsedArgs},
    commands,
    common::{
        constants::{EXIT_FAILURE, EXIT_SUCCESS},
        logger::{Log, LoggerGuard},
    },
    config, log_error_exit,
};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let code = match dispatch(parsed_args.action) {
        Ok(code) => code,
        Err(e) => {
            log_error_exit!("{:#}", e);
            // The log file writer has already shut down by now
            if Log::is_file_logging() {
                eprintln!("{e:?}");
            }
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

fn dispatch(action: CliAction) -> Result<i32> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
        }
        CliAction::ShowHelp => {
            args::display_help();
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            return Ok(EXIT_FAILURE);
        }
        CliAction::Help { command } => {
            commands::help::run_help_command(command.as_deref())?;
        }
        CliAction::Snapshot {
            json,
            at,
            config_dir,
        } => {
            config::set_config_dir(config_dir)?;
            commands::snapshot::handle_snapshot_command(json, at.as_deref())?;
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            log_file,
        } => {
            config::set_config_dir(config_dir)?;
            let _log_guard = start_file_logging(log_file)?;
            Yearglance::new(debug_enabled).run()?;
        }
        CliAction::Simulate {
            debug_enabled,
            start_time,
            end_time,
            multiplier,
            config_dir,
            log_file,
        } => {
            config::set_config_dir(config_dir)?;
            // The time source must be installed before the log file opens so
            // every line carries a simulated timestamp
            commands::simulate::handle_simulate_command(
                &start_time,
                &end_time,
                multiplier,
                debug_enabled,
            )?;
            let _log_guard = start_file_logging(log_file)?;
            Yearglance::new(debug_enabled).without_headers().run()?;
        }
    }

    Ok(EXIT_SUCCESS)
}

fn start_file_logging(log_file: Option<String>) -> Result<Option<LoggerGuard>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let guard = Log::start_file_logging(PathBuf::from(path))?;
    Ok(Some(guard))
}

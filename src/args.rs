//! Command-line argument parsing and processing.
//!
//! A small hand-written parser turning `std::env::args()` into a
//! [`CliAction`]. Unknown options never abort parsing immediately; they are
//! reported as warnings and the action becomes [`CliAction::ShowHelpDueToError`].

use crate::common::constants::{
    DEFAULT_SIMULATION_MULTIPLIER, MAXIMUM_SIMULATION_MULTIPLIER, MINIMUM_SIMULATION_MULTIPLIER,
};
use crate::time_source::parse_datetime;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the live dashboard
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        log_file: Option<String>,
    },
    /// Print the metrics once and exit (`now`)
    Snapshot {
        json: bool,
        at: Option<String>,
        config_dir: Option<String>,
    },
    /// Run the dashboard on simulated time
    Simulate {
        debug_enabled: bool,
        start_time: String,
        end_time: String,
        /// Acceleration factor, 0.0 means fast-forward
        multiplier: f64,
        config_dir: Option<String>,
        log_file: Option<String>,
    },
    /// `help [COMMAND]`
    Help { command: Option<String> },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Now,
    Help,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments including the program name
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut config_dir: Option<String> = None;
        let mut log_file: Option<String> = None;
        let mut json = false;
        let mut at: Option<String> = None;
        let mut simulate: Option<(String, String, f64)> = None;
        let mut command: Option<Command> = None;
        let mut help_topic: Option<String> = None;

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = args_vec[i].as_str();
            // Value of a flag that takes one argument
            let value = args_vec
                .get(i + 1)
                .filter(|next| !next.starts_with('-'))
                .cloned();

            match arg_str {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => json = true,
                "--config" | "-c" => match value {
                    Some(dir) => {
                        config_dir = Some(dir);
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                },
                "--log" | "-l" => match value {
                    Some(path) => {
                        log_file = Some(path);
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing file for --log. Usage: --log <file>");
                        unknown_arg_found = true;
                    }
                },
                "--at" => match value {
                    Some(time) if parse_datetime(&time).is_ok() => {
                        at = Some(time);
                        i += 1;
                    }
                    Some(time) => {
                        log_error!("Invalid time for --at: '{}'. Use YYYY-MM-DD HH:MM:SS", time);
                        unknown_arg_found = true;
                        i += 1;
                    }
                    None => {
                        log_warning!("Missing time for --at. Usage: --at \"YYYY-MM-DD HH:MM:SS\"");
                        unknown_arg_found = true;
                    }
                },
                "--simulate" | "-S" => {
                    // --simulate <start> <end> [multiplier | --fast-forward]
                    if i + 2 < args_vec.len() {
                        let start = args_vec[i + 1].clone();
                        let end = args_vec[i + 2].clone();
                        i += 2;

                        let mut multiplier = DEFAULT_SIMULATION_MULTIPLIER;
                        if let Some(next) = args_vec.get(i + 1) {
                            if next == "--fast-forward" {
                                multiplier = 0.0;
                                i += 1;
                            } else if let Ok(mult) = next.parse::<f64>() {
                                if (MINIMUM_SIMULATION_MULTIPLIER..=MAXIMUM_SIMULATION_MULTIPLIER)
                                    .contains(&mult)
                                {
                                    multiplier = mult;
                                } else {
                                    log_error!(
                                        "Invalid multiplier: {}. Must be between {} and {}.",
                                        mult,
                                        MINIMUM_SIMULATION_MULTIPLIER,
                                        MAXIMUM_SIMULATION_MULTIPLIER
                                    );
                                    unknown_arg_found = true;
                                }
                                i += 1;
                            }
                        }

                        match (parse_datetime(&start), parse_datetime(&end)) {
                            (Err(e), _) => {
                                log_error!("Invalid start time '{}': {}", start, e);
                                unknown_arg_found = true;
                            }
                            (_, Err(e)) => {
                                log_error!("Invalid end time '{}': {}", end, e);
                                unknown_arg_found = true;
                            }
                            (Ok(s), Ok(e)) if e <= s => {
                                log_error!("Simulation end time must be after the start time");
                                unknown_arg_found = true;
                            }
                            _ => simulate = Some((start, end, multiplier)),
                        }
                    } else {
                        log_warning!(
                            "Missing arguments for --simulate. Usage: --simulate \"YYYY-MM-DD HH:MM:SS\" \"YYYY-MM-DD HH:MM:SS\" [multiplier | --fast-forward]"
                        );
                        unknown_arg_found = true;
                        i = args_vec.len();
                    }
                }
                _ if arg_str.starts_with('-') => {
                    log_warning!("Unknown option: {arg_str}");
                    unknown_arg_found = true;
                }
                _ => match command {
                    None => match arg_str {
                        "now" | "n" => command = Some(Command::Now),
                        "help" => command = Some(Command::Help),
                        _ => {
                            log_warning!("Unknown command: {arg_str}");
                            unknown_arg_found = true;
                        }
                    },
                    Some(Command::Help) if help_topic.is_none() => {
                        help_topic = Some(arg_str.to_string());
                    }
                    Some(_) => {
                        log_error!("Unexpected argument: '{}'", arg_str);
                        unknown_arg_found = true;
                    }
                },
            }
            i += 1;
        }

        if !unknown_arg_found && command != Some(Command::Now) && (json || at.is_some()) {
            log_warning!("--json and --at only apply to the 'now' command");
            unknown_arg_found = true;
        }
        if !unknown_arg_found && command == Some(Command::Now) && simulate.is_some() {
            log_error!("Cannot combine 'now' with --simulate; use 'now --at' instead");
            unknown_arg_found = true;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if command == Some(Command::Help) {
            CliAction::Help {
                command: help_topic,
            }
        } else if command == Some(Command::Now) {
            CliAction::Snapshot {
                json,
                at,
                config_dir,
            }
        } else if let Some((start_time, end_time, multiplier)) = simulate {
            CliAction::Simulate {
                debug_enabled,
                start_time,
                end_time,
                multiplier,
                config_dir,
                log_file,
            }
        } else {
            CliAction::Run {
                debug_enabled,
                config_dir,
                log_file,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("yearglance [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-l, --log <file>       Write log output to a file");
    log_indented!("-S, --simulate         Run the dashboard on simulated time");
    log_indented!("                       Usage: --simulate <start> <end> [multiplier | --fast-forward]");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("now, n [--json] [--at <time>]  Print the metrics once and exit");
    log_indented!("help [COMMAND]                 Show detailed help for a command");
    log_block_start!("Keys:");
    log_indented!("q, Esc, Ctrl+C         Quit");
    log_indented!("r                      Recompute all metrics now");
    log_end!();
}

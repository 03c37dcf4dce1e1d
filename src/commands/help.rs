//! Help command implementation for yearglance.
//!
//! Dispatches `yearglance help [COMMAND]` to general or command-specific help.

use anyhow::Result;

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: &str) {
    match command {
        "now" | "n" => log_block_start!("Usage: yearglance now [--json] [--at <time>]"),
        "simulate" | "S" => log_block_start!(
            "Usage: yearglance --simulate <start> <end> [multiplier | --fast-forward]"
        ),
        _ => log_block_start!("Usage: yearglance [OPTIONS] [COMMAND]"),
    }
}

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("now") | Some("n") => super::snapshot::display_help(),
        Some("simulate") | Some("S") | Some("--simulate") => super::simulate::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("now, n [--json] [--at <time>]  Print the metrics once and exit");
    log_indented!("help [COMMAND]                 Show detailed help for a command");
    log_block_start!("Other topics:");
    log_indented!("simulate                       Run the dashboard on simulated time");
    log_pipe!();
    log_info!("Use 'yearglance help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'yearglance --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: yearglance help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("# Show general help");
    log_indented!("yearglance help");
    log_pipe!();
    log_indented!("# Show help for specific commands");
    log_indented!("yearglance help now");
    log_indented!("yearglance help simulate");
    log_end!();
}

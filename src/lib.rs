//! # Yearglance Library
//!
//! Internal library for the yearglance binary: a terminal dashboard showing
//! how far through the day and the year the local clock is.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Yearglance` builder handles resource setup and hands off to the core loop
//! - **Core Logic**: `core` module with the main loop and the frame/timer `scheduler`
//! - **Metrics**: `calendar` module with pure calendar arithmetic
//! - **Animation**: `animation` module with cancellable value transitions
//! - **Dashboard**: `dashboard` module tying metrics, animations and rendering together
//! - **Configuration**: `config` module for TOML-based settings
//! - **Commands**: `commands` module for CLI subcommands (`now`, `help`, `--simulate`)
//! - **Infrastructure**: signal handling, keyboard input, logging, time source

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

// Public API modules
pub mod animation;
pub mod args;
pub mod calendar;
pub mod commands;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod io;
pub mod time_source;

// Internal modules
mod yearglance;

pub use yearglance::Yearglance;

//! Command-line subcommands.
//!
//! Each command runs to completion and returns; the live dashboard itself is
//! started from `main.rs` through [`crate::Yearglance`].

pub mod help;
pub mod simulate;
pub mod snapshot;

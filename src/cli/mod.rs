//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, GenerateArgs};
pub use commands::{
    handle_config_action, render_build, resolve_settings, run_build, run_build_init,
    run_decompile, run_generate,
};
pub use enums::{Aspect, Model, OutputFormat, Quality};

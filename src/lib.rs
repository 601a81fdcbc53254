//! veo-studio library crate.
//!
//! Structured prompt compilation ([`prompt`]), the Veo generation lifecycle
//! ([`veo`]), configuration and the command-line front-end.

pub mod cli;
pub mod config;
pub mod prompt;
pub mod veo;

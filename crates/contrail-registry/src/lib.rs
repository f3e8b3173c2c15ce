//! Contrail Registry - command-line front end for the service registry
//!
//! This crate wires the registry to the outside world:
//! - Command line parsing
//! - Layered configuration (file, environment, flags)
//! - Logging setup
//! - Command execution and output rendering

pub mod cli;
pub mod commands;
pub mod configuration;
pub mod logging;

pub use cli::{Cli, Command, ListTarget, OutputFormat};
pub use commands::{CommandError, execute};
pub use configuration::Configuration;

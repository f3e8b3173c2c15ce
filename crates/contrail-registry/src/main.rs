//! Main entry point for contrail-registry.
//!
//! Loads configuration and logging, picks the built-in or configured catalog,
//! then runs a single lookup command.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use contrail_registry::{Cli, CommandError, Configuration, commands, logging};
use contrail_services::ServiceRegistry;
use tracing::{debug, info};

/// Exit status for a lookup miss, distinct from load or I/O failures
const LOOKUP_MISS_EXIT_CODE: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let configuration = Configuration::load(&cli).context("failed to load configuration")?;
    let _logging_guard = logging::init_logging(&configuration.logging_config())?;

    let loaded;
    let catalog_path = configuration
        .catalog_path()
        .filter(|_| commands::needs_active_catalog(&cli.command));
    let registry = match catalog_path {
        Some(path) => {
            info!(path = %path.display(), "Using catalog file");
            loaded = ServiceRegistry::from_file(&path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            &loaded
        }
        None => {
            debug!("Using built-in catalog");
            ServiceRegistry::builtin()
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match commands::execute(&cli.command, registry, cli.output, &mut out) {
        Ok(()) => {
            out.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(CommandError::Lookup(e)) => {
            debug!(error = %e, "Lookup miss");
            commands::report_lookup_error(&e, cli.output, &mut out, &mut io::stderr())?;
            Ok(ExitCode::from(LOOKUP_MISS_EXIT_CODE))
        }
        Err(e) => Err(e.into()),
    }
}

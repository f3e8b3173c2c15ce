//! Command execution against a loaded registry.
//!
//! Commands write their results to the given sink so they can run against an
//! in-memory buffer as easily as stdout.

use std::io::{self, Write};

use contrail_common::{CatalogError, LookupError};
use contrail_services::{DumpError, ServiceRegistry, dump};
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::{Command, ListTarget, OutputFormat};

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Dump(#[from] DumpError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run one command, writing its result to `out`.
pub fn execute<W: Write>(
    command: &Command,
    registry: &ServiceRegistry,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CommandError> {
    debug!(?command, "Executing command");
    match command {
        Command::Containers { service } => {
            let containers = registry.containers_for(service)?;
            emit_lines(out, format, containers, || {
                json!({ "service": service, "containers": containers })
            })
        }
        Command::Services { pod } => {
            let services = registry.services_for(pod)?;
            emit_lines(out, format, services, || {
                json!({ "pod": pod, "services": services })
            })
        }
        Command::Port { service } => {
            let port = registry.port_for(service)?;
            emit(out, format, &port, || {
                json!({ "service": service, "port": port })
            })
        }
        Command::ConfigDir { pod } => {
            let dir = registry.config_dir_for(pod)?;
            emit(out, format, &dir.display(), || {
                json!({ "pod": pod, "configDir": dir })
            })
        }
        Command::ComposeFile { pod } => {
            let file = registry.compose_file_for(pod);
            emit(out, format, &file, || {
                json!({
                    "pod": pod,
                    "composeFile": file,
                    "override": registry.config_file_override_for(pod),
                })
            })
        }
        Command::Backup { service } => {
            let capable = registry.is_backup_capable(service);
            emit(out, format, &capable, || {
                json!({ "service": service, "backupCapable": capable })
            })
        }
        Command::List { target } => list(registry, *target, format, out),
        Command::Find { service, running } => {
            let found = registry.find_container(service, running.iter().map(String::as_str))?;
            match format {
                OutputFormat::Text => {
                    if let Some(name) = found {
                        writeln!(out, "{}", name)?;
                    }
                    Ok(())
                }
                OutputFormat::Json => write_json(
                    out,
                    &json!({ "service": service, "container": found }),
                ),
            }
        }
        Command::Validate { path } => {
            let loaded;
            let checked = match path {
                Some(path) => {
                    loaded = ServiceRegistry::from_file(path)?;
                    &loaded
                }
                None => registry,
            };
            let summary = checked.summary();
            match format {
                OutputFormat::Text => {
                    writeln!(
                        out,
                        "catalog ok: {} services, {} pods, {} http ports, {} config dirs, {} compose overrides, {} backup services",
                        summary.services,
                        summary.pods,
                        summary.http_ports,
                        summary.config_dirs,
                        summary.compose_overrides,
                        summary.backup_services
                    )?;
                    Ok(())
                }
                OutputFormat::Json => write_json(out, &serde_json::to_value(summary)?),
            }
        }
        Command::Dump { format: dump_format } => {
            dump(registry, *dump_format, &mut *out)?;
            Ok(())
        }
    }
}

/// Whether the command reads the active catalog.
///
/// `validate <CATALOG>` checks its own file, so a broken configured catalog
/// must not stop it from running.
pub fn needs_active_catalog(command: &Command) -> bool {
    !matches!(command, Command::Validate { path: Some(_) })
}

fn list<W: Write>(
    registry: &ServiceRegistry,
    target: ListTarget,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CommandError> {
    match target {
        ListTarget::Services => {
            let names: Vec<&str> = registry.all_service_names().into_iter().collect();
            emit_lines(out, format, &names, || json!(names))
        }
        ListTarget::Pods => {
            let names: Vec<&str> = registry.all_pod_names().into_iter().collect();
            emit_lines(out, format, &names, || json!(names))
        }
        ListTarget::Backup => {
            let names: Vec<&str> = registry.backup_capable_services().into_iter().collect();
            emit_lines(out, format, &names, || json!(names))
        }
        ListTarget::Ports => match format {
            OutputFormat::Text => {
                for (service, port) in registry.http_ports() {
                    writeln!(out, "{} {}", service, port)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let ports: serde_json::Map<String, Value> = registry
                    .http_ports()
                    .map(|(service, port)| (service.to_string(), json!(port)))
                    .collect();
                write_json(out, &Value::Object(ports))
            }
        },
    }
}

/// Report a lookup miss in the requested format.
///
/// Text goes to `err` as a one-line message; JSON goes to `out` as an error
/// object carrying the error code and the missing key.
pub fn report_lookup_error<O: Write, E: Write>(
    error: &LookupError,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(err, "error: {}", error),
        OutputFormat::Json => {
            let code = error.error_code();
            let body = json!({
                "code": code.code,
                "message": code.message,
                "key": error.key(),
                "detail": error.to_string(),
            });
            serde_json::to_writer_pretty(&mut *out, &body)?;
            writeln!(out)
        }
    }
}

fn emit<W: Write, T: std::fmt::Display + ?Sized>(
    out: &mut W,
    format: OutputFormat,
    text: &T,
    as_json: impl FnOnce() -> Value,
) -> Result<(), CommandError> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", text)?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, &as_json()),
    }
}

fn emit_lines<W: Write, T: AsRef<str>>(
    out: &mut W,
    format: OutputFormat,
    lines: &[T],
    as_json: impl FnOnce() -> Value,
) -> Result<(), CommandError> {
    match format {
        OutputFormat::Text => {
            for line in lines {
                writeln!(out, "{}", line.as_ref())?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, &as_json()),
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> Result<(), CommandError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

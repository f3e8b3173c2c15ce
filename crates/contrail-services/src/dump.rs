//! Debug dump of the registry tables for ad-hoc troubleshooting.
//!
//! The text form is meant for humans and is not stable for parsing.
//! Use [`DumpFormat::Json`] or [`DumpFormat::Yaml`] when a tool reads it.

use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::registry::ServiceRegistry;

#[derive(thiserror::Error, Debug)]
pub enum DumpError {
    #[error("failed to write dump: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize dump: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for DumpError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json wraps writer failures; keep those as I/O errors
        if e.is_io() {
            DumpError::Io(io::Error::from(e))
        } else {
            DumpError::Serialize(e.to_string())
        }
    }
}

impl From<serde_yaml::Error> for DumpError {
    fn from(e: serde_yaml::Error) -> Self {
        DumpError::Serialize(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl DumpFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DumpFormat::Text => "text",
            DumpFormat::Json => "json",
            DumpFormat::Yaml => "yaml",
        }
    }
}

impl Display for DumpFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DumpFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(DumpFormat::Text),
            "json" => Ok(DumpFormat::Json),
            "yaml" | "yml" => Ok(DumpFormat::Yaml),
            _ => Err(format!("Invalid dump format: {}", s)),
        }
    }
}

/// Write every table of the registry to `writer`.
///
/// Text output is three lines: services, pods, then the remaining tables.
pub fn dump<W: Write>(
    registry: &ServiceRegistry,
    format: DumpFormat,
    mut writer: W,
) -> Result<(), DumpError> {
    let catalog = registry.catalog();
    match format {
        DumpFormat::Text => {
            writeln!(writer, "# DEBUG services= {:?}", catalog.containers)?;
            writeln!(writer, "# DEBUG pods= {:?}", catalog.pods)?;
            writeln!(
                writer,
                "# DEBUG tables= http_ports={:?} config_dirs={:?} compose_files={:?} backup_services={:?}",
                catalog.http_ports,
                catalog.config_dirs,
                catalog.compose_files,
                registry.backup_capable_services()
            )?;
        }
        DumpFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, catalog)?;
            writeln!(writer)?;
        }
        DumpFormat::Yaml => {
            // serde_yaml does not surface writer errors distinctly, so render first
            let rendered = serde_yaml::to_string(catalog)?;
            writer.write_all(rendered.as_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Text dump to the process's standard output.
pub fn dump_to_stdout(registry: &ServiceRegistry) -> Result<(), DumpError> {
    dump(registry, DumpFormat::Text, io::stdout().lock())
}

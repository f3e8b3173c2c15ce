//! Command line arguments for contrail-registry

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use contrail_services::DumpFormat;

#[derive(Debug, Parser)]
#[command(
    name = "contrail-registry",
    version,
    about = "Look up Contrail services, pods, ports and config directories"
)]
pub struct Cli {
    /// Configuration file (default: conf/registry.yml if present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file replacing the built-in one
    #[arg(long = "catalog", global = true)]
    pub catalog: Option<PathBuf>,

    /// Console log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Output format for command results
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Text,
        global = true
    )]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Container/process aliases of a service, in match order
    Containers { service: String },

    /// Services co-located in a pod
    Services { pod: String },

    /// Node-manager HTTP port of a service
    Port { service: String },

    /// Configuration directory of a pod
    ConfigDir { pod: String },

    /// Compose file of a pod (override or default)
    ComposeFile { pod: String },

    /// Whether a service supports backup
    Backup { service: String },

    /// Enumerate a table
    List {
        #[command(subcommand)]
        target: ListTarget,
    },

    /// Match a service against running container names
    Find {
        service: String,
        /// Names of running containers or processes
        #[arg(required = true)]
        running: Vec<String>,
    },

    /// Load and validate a catalog, then print its summary
    Validate {
        /// Catalog file to check (default: the active catalog)
        #[arg(value_name = "CATALOG")]
        path: Option<PathBuf>,
    },

    /// Dump every table for troubleshooting
    Dump {
        #[arg(long = "format", default_value = "text")]
        format: DumpFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListTarget {
    Services,
    Pods,
    Ports,
    Backup,
}

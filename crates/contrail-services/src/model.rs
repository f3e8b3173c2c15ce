//! Catalog data models
//!
//! This module defines the raw tables a catalog file carries:
//! - Service to container/process alias lists
//! - Pod to service membership
//! - Backup-capable services, HTTP ports, config directories, compose overrides

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The raw lookup tables, as authored in a catalog file.
///
/// Maps are keyed by name and ordered by key. List values keep the order they
/// were written in, duplicates included.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Service name to container/process aliases, in match priority order
    pub containers: BTreeMap<String, Vec<String>>,
    /// Pod name to the services co-located in it
    #[serde(default)]
    pub pods: BTreeMap<String, Vec<String>>,
    /// Services that support the backup workflow
    #[serde(default)]
    pub backup_services: Vec<String>,
    /// Service name to node-manager HTTP port
    #[serde(default)]
    pub http_ports: BTreeMap<String, u16>,
    /// Pod name to on-disk configuration directory
    #[serde(default)]
    pub config_dirs: BTreeMap<String, PathBuf>,
    /// Pod name to compose file name, only where it differs from the default
    #[serde(default)]
    pub compose_files: BTreeMap<String, String>,
}

/// Table sizes of a loaded registry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub services: usize,
    pub pods: usize,
    pub http_ports: usize,
    pub config_dirs: usize,
    pub compose_overrides: usize,
    pub backup_services: usize,
}

impl From<&Catalog> for RegistrySummary {
    fn from(catalog: &Catalog) -> Self {
        Self {
            services: catalog.containers.len(),
            pods: catalog.pods.len(),
            http_ports: catalog.http_ports.len(),
            config_dirs: catalog.config_dirs.len(),
            compose_overrides: catalog.compose_files.len(),
            backup_services: catalog.backup_services.len(),
        }
    }
}

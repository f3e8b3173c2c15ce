//! Immutable service registry
//!
//! `ServiceRegistry` wraps a validated [`Catalog`] and answers lookups over it.
//! Two lookup families exist side by side:
//! - strict lookups return a [`LookupError`] when the key is missing
//! - total lookups (`is_backup_capable`, `config_file_override_for`,
//!   `compose_file_for`, `pod_of`) treat absence as an answer

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use contrail_common::{CatalogError, DEFAULT_COMPOSE_FILE, LookupError};
use tracing::debug;

use crate::model::{Catalog, RegistrySummary};
use crate::validation;

/// Catalog compiled into the crate
pub const BUILTIN_CATALOG: &str = include_str!("../data/contrail_services.yml");

static BUILTIN: LazyLock<ServiceRegistry> = LazyLock::new(|| {
    ServiceRegistry::from_yaml_str(BUILTIN_CATALOG)
        .expect("built-in service catalog must be valid")
});

/// Read-only lookup tables for Contrail services and pods.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    catalog: Catalog,
    backup: BTreeSet<String>,
}

impl ServiceRegistry {
    /// The registry built from the compiled-in catalog, shared process-wide.
    pub fn builtin() -> &'static ServiceRegistry {
        &BUILTIN
    }

    /// Validate a catalog and wrap it.
    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        validation::validate(&catalog)?;
        let backup = catalog.backup_services.iter().cloned().collect();
        let registry = Self { catalog, backup };
        debug!(summary = ?registry.summary(), "Service registry loaded");
        Ok(registry)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        Self::from_catalog(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        debug!(path = %path.display(), "Loading service catalog");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    // ========================================================================
    // Strict lookups
    // ========================================================================

    /// Container/process aliases for a service, in match priority order.
    pub fn containers_for(&self, service: &str) -> Result<&[String], LookupError> {
        self.catalog
            .containers
            .get(service)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownService(service.to_string()))
    }

    /// Services co-located in a pod, in authored order.
    pub fn services_for(&self, pod: &str) -> Result<&[String], LookupError> {
        self.catalog
            .pods
            .get(pod)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownPod(pod.to_string()))
    }

    /// Node-manager HTTP port of a service.
    pub fn port_for(&self, service: &str) -> Result<u16, LookupError> {
        self.catalog
            .http_ports
            .get(service)
            .copied()
            .ok_or_else(|| LookupError::NoPortDefined(service.to_string()))
    }

    pub fn config_dir_for(&self, pod: &str) -> Result<&Path, LookupError> {
        self.catalog
            .config_dirs
            .get(pod)
            .map(|p| p.as_path())
            .ok_or_else(|| LookupError::NoConfigDir(pod.to_string()))
    }

    /// Find which running container realizes a service.
    ///
    /// Aliases are tried in declared order. For each alias the first running
    /// name that is the alias itself, or the alias plus a replica suffix
    /// (`_1`, `-2`), wins. So `config_api` matches `config_api_1` but
    /// `vrouter_agent` does not match `vrouter_agent_nodemgr_1`.
    /// Returns `Ok(None)` when the service is known but nothing is running.
    pub fn find_container<'a, I>(
        &self,
        service: &str,
        running: I,
    ) -> Result<Option<&'a str>, LookupError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let aliases = self.containers_for(service)?;
        let running: Vec<&'a str> = running.into_iter().collect();
        Ok(aliases.iter().find_map(|alias| {
            running
                .iter()
                .copied()
                .find(|name| is_replica_of(name, alias))
        }))
    }

    // ========================================================================
    // Total lookups
    // ========================================================================

    /// Compose file override for a pod. `None` means the pod uses the default.
    pub fn config_file_override_for(&self, pod: &str) -> Option<&str> {
        self.catalog.compose_files.get(pod).map(String::as_str)
    }

    /// Compose file name for a pod, falling back to [`DEFAULT_COMPOSE_FILE`].
    pub fn compose_file_for(&self, pod: &str) -> &str {
        self.config_file_override_for(pod).unwrap_or(DEFAULT_COMPOSE_FILE)
    }

    /// Whether a service supports backup. Unknown names are simply not capable.
    pub fn is_backup_capable(&self, service: &str) -> bool {
        self.backup.contains(service)
    }

    /// First pod, in name order, that lists the service.
    pub fn pod_of(&self, service: &str) -> Option<&str> {
        self.catalog
            .pods
            .iter()
            .find(|(_, services)| services.iter().any(|s| s == service))
            .map(|(pod, _)| pod.as_str())
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    pub fn all_service_names(&self) -> BTreeSet<&str> {
        self.catalog.containers.keys().map(String::as_str).collect()
    }

    pub fn all_pod_names(&self) -> BTreeSet<&str> {
        self.catalog.pods.keys().map(String::as_str).collect()
    }

    pub fn backup_capable_services(&self) -> BTreeSet<&str> {
        self.backup.iter().map(String::as_str).collect()
    }

    /// HTTP port table in service-name order.
    pub fn http_ports(&self) -> impl Iterator<Item = (&str, u16)> + '_ {
        self.catalog
            .http_ports
            .iter()
            .map(|(service, port)| (service.as_str(), *port))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary::from(&self.catalog)
    }
}

/// `name` is `alias` or `alias` followed by `_<n>` / `-<n>`.
fn is_replica_of(name: &str, alias: &str) -> bool {
    match name.strip_prefix(alias) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(['_', '-'])
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

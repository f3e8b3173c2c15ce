//! Load-time validation of catalog tables
//!
//! Hard violations reject the catalog. Soft findings are logged and accepted,
//! since deployment tooling tolerates them.

use std::collections::BTreeMap;
use std::path::Path;

use contrail_common::{CONTRAIL_CONFIG_ROOT, CatalogError};
use tracing::warn;

use crate::model::Catalog;

/// Check every cross-table invariant, collecting all violations.
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut violations = Vec::new();

    for (service, aliases) in &catalog.containers {
        if service.is_empty() {
            violations.push("service name must not be empty".to_string());
        }
        if aliases.is_empty() {
            violations.push(format!("service '{}' has no container aliases", service));
        }
        if aliases.iter().any(|a| a.is_empty()) {
            violations.push(format!("service '{}' has an empty container alias", service));
        }
    }

    for (pod, services) in &catalog.pods {
        if pod.is_empty() {
            violations.push("pod name must not be empty".to_string());
        }
        for service in services {
            if !catalog.containers.contains_key(service) {
                violations.push(format!(
                    "pod '{}' references unknown service '{}'",
                    pod, service
                ));
            }
        }
    }

    for service in &catalog.backup_services {
        if !catalog.containers.contains_key(service) {
            violations.push(format!("backup service '{}' is not a known service", service));
        }
    }

    if catalog.http_ports.keys().any(|k| k.is_empty()) {
        violations.push("http port entry has an empty service name".to_string());
    }

    for (pod, dir) in &catalog.config_dirs {
        if pod.is_empty() {
            violations.push("config dir entry has an empty pod name".to_string());
        }
        if !dir.is_absolute() {
            violations.push(format!(
                "config dir for pod '{}' is not absolute: {}",
                pod,
                dir.display()
            ));
        }
    }

    for (pod, file) in &catalog.compose_files {
        if pod.is_empty() || file.is_empty() {
            violations.push(format!("compose file override for '{}' is empty", pod));
        }
    }

    if !violations.is_empty() {
        return Err(CatalogError::Validation(violations));
    }

    warn_soft_findings(catalog);
    Ok(())
}

/// Findings that are logged but do not reject the catalog.
pub fn soft_findings(catalog: &Catalog) -> Vec<String> {
    let mut findings = Vec::new();

    let mut owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (pod, services) in &catalog.pods {
        if services.is_empty() {
            findings.push(format!("pod '{}' has no services", pod));
        }
        for (i, service) in services.iter().enumerate() {
            if services[..i].contains(service) {
                findings.push(format!(
                    "service '{}' listed twice in pod '{}'",
                    service, pod
                ));
                continue;
            }
            owners.entry(service.as_str()).or_default().push(pod.as_str());
        }
    }
    for (service, pods) in owners {
        if pods.len() > 1 {
            findings.push(format!(
                "service '{}' belongs to more than one pod: {}",
                service,
                pods.join(", ")
            ));
        }
    }

    let root = Path::new(CONTRAIL_CONFIG_ROOT);
    for (pod, dir) in &catalog.config_dirs {
        if !dir.starts_with(root) {
            findings.push(format!(
                "config dir for pod '{}' is outside {}: {}",
                pod,
                CONTRAIL_CONFIG_ROOT,
                dir.display()
            ));
        }
    }

    findings
}

fn warn_soft_findings(catalog: &Catalog) {
    for finding in soft_findings(catalog) {
        warn!(finding = %finding, "Catalog accepted with warning");
    }
}

//! Built-in Catalog Tests
//!
//! Checks the compiled-in tables against the deployment conventions
//! downstream tooling relies on.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use contrail_services::{CatalogError, LookupError, ServiceRegistry};
use proptest::prelude::*;

fn builtin() -> &'static ServiceRegistry {
    ServiceRegistry::builtin()
}

// ============== Container Alias Tests ==============

#[test]
fn test_every_service_has_aliases() {
    let registry = builtin();
    for service in registry.all_service_names() {
        let aliases = registry.containers_for(service).unwrap();
        assert!(!aliases.is_empty(), "{} has no aliases", service);
    }
}

#[test]
fn test_alias_order_is_stable() {
    let registry = builtin();
    assert_eq!(
        registry.containers_for("agent").unwrap(),
        &[
            "contrail-agent",
            "vrouter-agent",
            "contrail-vrouter-agent",
            "vrouter_agent"
        ]
    );
    // Repeated calls hand back the same slice
    assert_eq!(
        registry.containers_for("agent").unwrap().as_ptr(),
        registry.containers_for("agent").unwrap().as_ptr()
    );
}

#[test]
fn test_shared_aliases_kept_literal() {
    let registry = builtin();
    assert_eq!(registry.containers_for("rabbitmq").unwrap(), &["rabbitmq"]);
    assert_eq!(
        registry.containers_for("config-rabbitmq").unwrap(),
        &["configdatabase_rabbitmq", "rabbitmq"]
    );
    assert_eq!(
        registry.containers_for("redis").unwrap(),
        &["webui_redis", "webui-redis", "redis"]
    );
}

#[test]
fn test_unknown_service() {
    assert_eq!(
        builtin().containers_for("nonexistent-service"),
        Err(LookupError::UnknownService("nonexistent-service".to_string()))
    );
}

// ============== Pod Tests ==============

#[test]
fn test_pod_referential_integrity() {
    let registry = builtin();
    let services = registry.all_service_names();
    for pod in registry.all_pod_names() {
        for service in registry.services_for(pod).unwrap() {
            assert!(
                services.contains(service.as_str()),
                "pod {} references unknown service {}",
                pod,
                service
            );
        }
    }
}

#[test]
fn test_pod_names() {
    let pods: Vec<&str> = builtin().all_pod_names().into_iter().collect();
    assert_eq!(
        pods,
        vec![
            "analytics",
            "analytics-database",
            "config",
            "config-database",
            "control",
            "kubernetes",
            "vrouter",
            "webui"
        ]
    );
}

#[test]
fn test_flattened_pods_reproduce_service_set() {
    let registry = builtin();
    let flattened: Vec<&str> = registry
        .all_pod_names()
        .into_iter()
        .flat_map(|pod| registry.services_for(pod).unwrap())
        .map(String::as_str)
        .collect();
    let unique: BTreeSet<&str> = flattened.iter().copied().collect();

    // No service is listed under two pods
    assert_eq!(flattened.len(), unique.len());
    assert_eq!(flattened.len(), 25);
    assert_eq!(flattened.iter().filter(|s| **s == "redis").count(), 1);
    assert_eq!(registry.pod_of("redis"), Some("webui"));
    assert_eq!(registry.pod_of("nova"), None);
}

#[test]
fn test_services_for_config_pod() {
    assert_eq!(
        builtin().services_for("config").unwrap(),
        &[
            "config-nodemgr",
            "api-server",
            "schema",
            "svc-monitor",
            "device-manager"
        ]
    );
    assert!(matches!(
        builtin().services_for("openstack"),
        Err(LookupError::UnknownPod(_))
    ));
}

// ============== Port Tests ==============

#[test]
fn test_port_for() {
    let registry = builtin();
    assert_eq!(registry.port_for("api-server"), Ok(8084));
    assert_eq!(registry.port_for("contrail-kube-manager"), Ok(8108));
    assert_eq!(
        registry.port_for("webui"),
        Err(LookupError::NoPortDefined("webui".to_string()))
    );
}

#[test]
fn test_ports_without_aliases_are_allowed() {
    let registry = builtin();
    assert_eq!(registry.port_for("snmp-collector"), Ok(5920));
    assert_eq!(registry.port_for("topology"), Ok(5921));
    assert!(registry.containers_for("topology").is_err());
    assert_eq!(registry.http_ports().count(), 18);
}

// ============== Config Dir / Compose File Tests ==============

#[test]
fn test_config_dir_for() {
    let registry = builtin();
    assert_eq!(
        registry.config_dir_for("config").unwrap(),
        Path::new("/etc/contrail/config")
    );
    assert_eq!(
        registry.config_dir_for("strongswan").unwrap(),
        Path::new("/etc/contrail/vrouter/strongswan")
    );
    assert_eq!(
        registry.config_dir_for("webui"),
        Err(LookupError::NoConfigDir("webui".to_string()))
    );
}

#[test]
fn test_config_file_override_for() {
    let registry = builtin();
    assert_eq!(
        registry.config_file_override_for("strongswan"),
        Some("strongswan_compose.yml")
    );
    assert_eq!(registry.config_file_override_for("config"), None);
    assert_eq!(registry.compose_file_for("config"), "docker-compose.yaml");
}

// ============== Backup Tests ==============

#[test]
fn test_backup_capable_set_is_exact() {
    let expected: BTreeSet<&str> = [
        "schema",
        "svc-monitor",
        "device-manager",
        "contrail-kube-manager",
    ]
    .into_iter()
    .collect();
    let registry = builtin();
    assert_eq!(registry.backup_capable_services(), expected);
    for service in registry.all_service_names() {
        assert_eq!(
            registry.is_backup_capable(service),
            expected.contains(service),
            "{}",
            service
        );
    }
    assert!(!registry.is_backup_capable("nonexistent-service"));
}

// ============== Container Discovery Tests ==============

#[test]
fn test_find_container_on_host() {
    let running = [
        "config_database_cassandra_1",
        "contrail-config-api",
        "config_api_1",
        "webui_redis_1",
    ];
    let registry = builtin();
    assert_eq!(
        registry.find_container("api-server", running).unwrap(),
        Some("config_api_1")
    );
    assert_eq!(
        registry.find_container("redis", running).unwrap(),
        Some("webui_redis_1")
    );
    assert_eq!(registry.find_container("schema", running).unwrap(), None);
}

#[test]
fn test_find_container_prefers_own_replica() {
    // vrouter_agent is an agent alias and a prefix of a nodemgr alias
    let running = ["vrouter_agent_nodemgr_1", "vrouter_agent_1"];
    let registry = builtin();
    assert_eq!(
        registry.find_container("agent", running).unwrap(),
        Some("vrouter_agent_1")
    );
    assert_eq!(
        registry.find_container("vrouter-nodemgr", running).unwrap(),
        Some("vrouter_agent_nodemgr_1")
    );
    assert_eq!(
        registry
            .find_container("agent", ["vrouter_agent_nodemgr_1"])
            .unwrap(),
        None
    );
}

// ============== Loading Tests ==============

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contrail_services::BUILTIN_CATALOG.as_bytes())
        .unwrap();

    let registry = ServiceRegistry::from_file(file.path()).unwrap();
    assert_eq!(registry.catalog(), builtin().catalog());
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ServiceRegistry::from_file(&dir.path().join("missing.yml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn test_builtin_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| ServiceRegistry::builtin().port_for("agent")))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(8085));
    }
}

// ============== Property Tests ==============

proptest! {
    #[test]
    fn prop_backup_probe_never_fails(name in "\\PC*") {
        let expected = matches!(
            name.as_str(),
            "schema" | "svc-monitor" | "device-manager" | "contrail-kube-manager"
        );
        prop_assert_eq!(builtin().is_backup_capable(&name), expected);
    }

    #[test]
    fn prop_unknown_service_error_carries_key(name in "[a-z]{1,8}-x[0-9]{1,4}") {
        let err = builtin().containers_for(&name).unwrap_err();
        prop_assert_eq!(err.key(), name.as_str());
    }

    #[test]
    fn prop_override_lookup_is_total(pod in "\\PC*") {
        let expected = (pod == "strongswan").then_some("strongswan_compose.yml");
        prop_assert_eq!(builtin().config_file_override_for(&pod), expected);
    }
}

//! Contrail Common - Shared types and constants
//!
//! This crate provides the foundational types used across the registry crates:
//! - Error types and error codes
//! - Deployment conventions shared by the lookup tables

pub mod error;

// Re-exports for convenience
pub use error::{CatalogError, ErrorCode, LookupError};

/// Root under which the ansible deployer lays out per-pod configuration
pub const CONTRAIL_CONFIG_ROOT: &str = "/etc/contrail";

/// Compose file name a pod uses unless the catalog overrides it
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yaml";

/// Environment variable prefix for registry configuration
pub const ENV_PREFIX: &str = "CONTRAIL_REGISTRY";

//! Contrail Services - Static service registry
//!
//! This crate provides:
//! - The built-in catalog of Contrail services, pods and ports
//! - Load-time validation of catalog files
//! - Pure lookups over the validated tables
//! - A debug dump of the tables

pub mod dump;
pub mod model;
pub mod registry;
pub mod validation;

// Re-export commonly used types
pub use contrail_common::{CatalogError, LookupError};
pub use dump::{DumpError, DumpFormat, dump, dump_to_stdout};
pub use model::{Catalog, RegistrySummary};
pub use registry::{BUILTIN_CATALOG, ServiceRegistry};

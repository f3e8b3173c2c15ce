//! Error types and error codes for the Contrail service registry
//!
//! This module defines:
//! - `LookupError`: key misses on the registry tables
//! - `CatalogError`: failures while loading and validating a catalog
//! - `ErrorCode`: structured error codes for machine-readable output

use std::fmt::{Display, Formatter};
use std::io;

use serde::{Deserialize, Serialize};

/// A lookup against the registry tables found no entry for the key.
///
/// None of these indicate corruption. Callers decide whether a miss is fatal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown service '{0}'")]
    UnknownService(String),

    #[error("unknown pod '{0}'")]
    UnknownPod(String),

    #[error("no http port defined for service '{0}'")]
    NoPortDefined(String),

    #[error("no config directory defined for pod '{0}'")]
    NoConfigDir(String),
}

impl LookupError {
    /// The key that was looked up.
    pub fn key(&self) -> &str {
        match self {
            LookupError::UnknownService(k)
            | LookupError::UnknownPod(k)
            | LookupError::NoPortDefined(k)
            | LookupError::NoConfigDir(k) => k,
        }
    }

    pub fn error_code(&self) -> ErrorCode<'static> {
        match self {
            LookupError::UnknownService(_) => UNKNOWN_SERVICE,
            LookupError::UnknownPod(_) => UNKNOWN_POD,
            LookupError::NoPortDefined(_) => NO_PORT_DEFINED,
            LookupError::NoConfigDir(_) => NO_CONFIG_DIR,
        }
    }
}

/// Loading a catalog failed.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl CatalogError {
    /// Violation messages, empty unless this is a validation failure.
    pub fn violations(&self) -> &[String] {
        match self {
            CatalogError::Validation(v) => v,
            _ => &[],
        }
    }

    pub fn error_code(&self) -> ErrorCode<'static> {
        match self {
            CatalogError::Io(_) => CATALOG_READ_ERROR,
            CatalogError::Parse(_) => CATALOG_PARSE_ERROR,
            CatalogError::Validation(_) => CATALOG_VALIDATION_ERROR,
        }
    }
}

/// Error code structure for machine-readable output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

impl Display for ErrorCode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

// Lookup misses
pub const UNKNOWN_SERVICE: ErrorCode<'static> = ErrorCode {
    code: 20401,
    message: "unknown service",
};

pub const UNKNOWN_POD: ErrorCode<'static> = ErrorCode {
    code: 20402,
    message: "unknown pod",
};

pub const NO_PORT_DEFINED: ErrorCode<'static> = ErrorCode {
    code: 20403,
    message: "no port defined",
};

pub const NO_CONFIG_DIR: ErrorCode<'static> = ErrorCode {
    code: 20404,
    message: "no config directory",
};

// Catalog loading
pub const CATALOG_READ_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30001,
    message: "catalog read error",
};

pub const CATALOG_PARSE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30002,
    message: "catalog parse error",
};

pub const CATALOG_VALIDATION_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30003,
    message: "catalog validation error",
};

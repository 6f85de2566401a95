//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading or parsing package.json (fatal)
//! - RegistryError: Issues with npm registry communication (per-package)
//! - VersionError: Version specifier parsing failures
//! - ConfigError: Issues with the optional config file

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to reading the package manifest
///
/// These are the only fatal errors in a check run: without a readable
/// manifest there is nothing to check.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("package.json not found at {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("invalid JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to npm registry communication
///
/// All of these are non-fatal per package: the affected dependency is
/// reported as unresolved and the run continues.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in the registry (HTTP 404)
    #[error("package '{package}' not found on the npm registry")]
    PackageNotFound { package: String },

    /// Rate limit exceeded (HTTP 429)
    #[error("rate limited by the npm registry for '{package}'")]
    RateLimitExceeded { package: String },

    /// Connection could not be established (likely offline)
    #[error("network error fetching '{package}': no internet connection")]
    NoConnection { package: String },

    /// Request timed out
    #[error("timeout while fetching '{package}'")]
    Timeout { package: String },

    /// Other network failure
    #[error("failed to fetch '{package}': {message}")]
    NetworkError { package: String, message: String },

    /// Response could not be interpreted
    #[error("invalid response for '{package}': {message}")]
    InvalidResponse { package: String, message: String },
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(package: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            package: package.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }
}

/// Errors related to version specifier parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The specifier does not contain a leading x.y.z triple
    #[error("invalid version format '{spec}': expected format x.y.z")]
    InvalidFormat { spec: String },
}

/// Errors related to the optional config file
///
/// A broken config file degrades to "no config" with a warning; these
/// never abort the run.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON
    #[error("could not parse {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

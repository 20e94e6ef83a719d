//! Configuration for the conversion service.
//!
//! Every knob lives in [`ServiceConfig`], built via its
//! [`ServiceConfigBuilder`]. The same struct drives the HTTP server and the
//! one-shot CLI conversion, so both behave identically.

use crate::error::ConvertError;
use adapt_plugins::ResourceLocations;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Smallest accepted request body limit.
pub const MIN_BODY_BYTES: usize = 1024;

/// Configuration for the conversion service.
///
/// # Example
/// ```rust
/// use sii_converter::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .resources_dir("/srv/sii/Resources")
///     .function_key("s3cret")
///     .build()
///     .unwrap();
/// assert_eq!(config.max_body_bytes, 4 * 1024 * 1024);
/// ```
#[derive(Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server listens on. Default: `127.0.0.1:7071`.
    pub bind_addr: SocketAddr,

    /// Directory holding the codec lookup tables. Default: `./Resources`.
    pub resources_dir: PathBuf,

    /// Parent directory for per-request working directories.
    /// If None, uses the system temp directory.
    pub work_root: Option<PathBuf>,

    /// Maximum accepted request body in bytes. Default: 4 MiB.
    pub max_body_bytes: usize,

    /// When set, requests must pass this value in the `code` query parameter.
    pub function_key: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7071)),
            resources_dir: PathBuf::from("Resources"),
            work_root: None,
            max_body_bytes: 4 * 1024 * 1024,
            function_key: None,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind_addr", &self.bind_addr)
            .field("resources_dir", &self.resources_dir)
            .field("work_root", &self.work_root)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("function_key", &self.function_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServiceConfig {
    /// Create a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }

    /// Lookup table paths inside [`Self::resources_dir`].
    pub fn resource_locations(&self) -> ResourceLocations {
        ResourceLocations::from_base(&self.resources_dir)
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    pub fn resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.resources_dir = dir.into();
        self
    }

    pub fn work_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.work_root = Some(dir.into());
        self
    }

    pub fn max_body_bytes(mut self, n: usize) -> Self {
        self.config.max_body_bytes = n;
        self
    }

    pub fn function_key(mut self, key: impl Into<String>) -> Self {
        self.config.function_key = Some(key.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, ConvertError> {
        let c = &self.config;
        if c.max_body_bytes < MIN_BODY_BYTES {
            return Err(ConvertError::InvalidConfig(format!(
                "max body size must be at least {MIN_BODY_BYTES} bytes, got {}",
                c.max_body_bytes
            )));
        }
        if c.function_key.as_deref().is_some_and(str::is_empty) {
            return Err(ConvertError::InvalidConfig(
                "function key must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

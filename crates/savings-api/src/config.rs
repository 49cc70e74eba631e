//! Server configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! TOML file, then command-line flags and environment variables (applied by
//! the binary).
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 4000
//! log_level = "info"
//! default_it_rate = 100.0
//! default_business_rate = 150.0
//! seed_demo_projects = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use savings_core::Settings;
use savings_core::settings::{DEFAULT_BUSINESS_RATE, DEFAULT_IT_RATE};

use crate::{Error, Result};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 4000;

/// Runtime configuration for [`Server`](crate::Server).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind; `0` picks a free port.
    pub port: u16,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// IT hourly rate at startup.
    pub default_it_rate: f64,
    /// Business hourly rate at startup.
    pub default_business_rate: f64,
    /// Start with the demo projects.
    pub seed_demo_projects: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            default_it_rate: DEFAULT_IT_RATE,
            default_business_rate: DEFAULT_BUSINESS_RATE,
            seed_demo_projects: true,
        }
    }
}

impl ServerConfig {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Reject values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::config("host must not be empty"));
        }
        for (key, rate) in [
            ("default_it_rate", self.default_it_rate),
            ("default_business_rate", self.default_business_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::config(format!(
                    "{key} must be a non-negative number, got {rate}"
                )));
            }
        }
        Ok(())
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rates the settings store starts with.
    pub fn initial_settings(&self) -> Settings {
        Settings {
            it_rate: self.default_it_rate,
            business_rate: self.default_business_rate,
        }
    }
}

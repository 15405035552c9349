//! # Client Configuration
//!
//! Configuration for the terminal and its backend connection.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOUTIQUE_BACKEND_URL=http://192.168.1.20:8080/api/admin            │
//! │     BOUTIQUE_AUTH_TOKEN=eyJ...                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/boutique-pos/terminal.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost backend, 18% GST, no token                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # terminal.toml
//! [backend]
//! base_url = "http://localhost:8080/api/admin"
//! timeout_secs = 10
//! auth_token = "eyJ..."   # admin role token, optional
//!
//! [store]
//! name = "Boutique Store"
//! tax_rate_bps = 1800   # 18% GST
//! ```
//!
//! The original terminal read its admin role token out of ambient
//! browser session storage; here the token is explicit configuration
//! handed to the client at construction, with the same "admin-only
//! mutations" guarantee enforced by the backend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use boutique_core::money::TaxRate;
use boutique_core::DEFAULT_TAX_RATE_BPS;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Backend Settings
// =============================================================================

/// Connection settings for the admin backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the admin API, e.g. `http://localhost:8080/api/admin`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token for the admin role, if the backend requires one.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/admin".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            auth_token: None,
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store identity and billing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Store name printed on receipts.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Tax rate in basis points (1800 = 18% GST).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
}

fn default_store_name() -> String {
    "Boutique Store".to_string()
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            tax_rate_bps: default_tax_rate_bps(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (terminal.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading terminal config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load terminal config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ClientError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got: {}",
                self.backend.base_url
            )));
        }

        if self.backend.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.store.tax_rate_bps > 10_000 {
            return Err(ClientError::InvalidConfig(format!(
                "tax_rate_bps must be at most 10000 (100%), got: {}",
                self.store.tax_rate_bps
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BOUTIQUE_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Ok(token) = std::env::var("BOUTIQUE_AUTH_TOKEN") {
            self.backend.auth_token = Some(token);
        }

        if let Ok(name) = std::env::var("BOUTIQUE_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(bps) = std::env::var("BOUTIQUE_TAX_RATE_BPS") {
            match bps.parse::<u32>() {
                Ok(v) => self.store.tax_rate_bps = v,
                Err(_) => warn!(value = %bps, "Ignoring non-numeric BOUTIQUE_TAX_RATE_BPS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "boutique", "pos")
            .map(|dirs| dirs.config_dir().join("terminal.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The configured tax rate as a [`TaxRate`].
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.store.tax_rate_bps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:8080/api/admin");
        assert_eq!(config.store.tax_rate_bps, 1800);
        assert!(config.backend.auth_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.backend.base_url = "ftp://nope".to_string();
        assert!(config.validate().is_err());

        config.backend.base_url = "https://pos.example.com/api/admin".to_string();
        assert!(config.validate().is_ok());

        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.backend.timeout_secs = 10;
        config.store.tax_rate_bps = 20_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            [backend]
            base_url = "http://10.0.0.5:8080/api/admin"
            timeout_secs = 5

            [store]
            name = "Downtown Branch"
            tax_rate_bps = 1200
        "#;

        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.5:8080/api/admin");
        assert_eq!(config.store.name, "Downtown Branch");
        assert_eq!(config.tax_rate().bps(), 1200);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("[store]\nname = \"Branch 2\"\n").unwrap();
        assert_eq!(config.store.name, "Branch 2");
        assert_eq!(config.store.tax_rate_bps, 1800);
        assert_eq!(config.backend.timeout_secs, 10);
    }
}

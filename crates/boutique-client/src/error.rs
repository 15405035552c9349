//! # Client Error Types
//!
//! Error types for backend communication and configuration.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Backend             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Backend { status }     │ │
//! │  │  InvalidUrl     │  │  (reqwest)      │  │  (non-2xx response)     │ │
//! │  │  ConfigParse    │  │                 │  │  CorruptCatalog         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Every variant is recoverable: a failed catalog fetch degrades the     │
//! │  session, a failed submission preserves the cart for retry.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering configuration and backend failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Base URL failed to parse or join.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the config file.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // =========================================================================
    // Transport / Backend Errors
    // =========================================================================
    /// HTTP transport failure (connection refused, timeout, bad body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {status}")]
    Backend { status: u16 },

    /// The catalog body parsed but carried unusable values.
    #[error("Backend sent a corrupt catalog: {0}")]
    CorruptCatalog(#[from] boutique_core::ValidationError),
}

//! # boutique-client: Backend REST Client for Boutique POS
//!
//! Everything that talks to the admin backend lives here: the HTTP
//! client, the configuration it is built from, and the
//! [`session::CheckoutSession`] that ties the pure billing engine to
//! the two network calls a checkout needs (catalog fetch, order
//! submission).
//!
//! ## Modules
//!
//! - [`api`] - `GET /products` and `PUT /billing` over reqwest
//! - [`config`] - TOML config file with environment overrides
//! - [`session`] - the explicit checkout session context
//! - [`error`] - client error types

pub mod api;
pub mod config;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{CheckoutSession, OrderSubmitter, SessionError};

//! Shared Module
//!
//! Types that mirror the document backend's JSON contract, plus the
//! platform-agnostic helpers the desktop client builds on. Nothing in here
//! touches the network or the UI, so everything is usable from tests and tools.
//!
//! # Overview
//!
//! - `document` - the `Document` record, its `Visibility`, and the create/update payload
//! - `auth` - login/register request bodies and the token response
//! - `markup` - rich-text markup to styled blocks, used by previews and PDF export
//! - `error` - validation and serialization errors
//! - `config` - application configuration and its builder

/// Document records and payloads
pub mod document;

/// Authentication wire types
pub mod auth;

/// Rich-text markup rendering support
pub mod markup;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use document::{Document, DocumentPayload, Visibility};
pub use auth::{ErrorDetail, LoginRequest, RegisterRequest, TokenResponse};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};

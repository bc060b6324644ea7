//! egui Native Desktop App Module
//!
//! A desktop client for the document backend: log in or register, then
//! list, search, preview, create, edit, delete and export documents.
//!
//! # Architecture
//!
//! - **`config`** - Configuration loading (server URL, debounce, session file)
//! - **`session`** - Session context and token persistence
//! - **`api`** - HTTP client for the backend
//! - **`runtime`** - Background tokio runtime the UI hands requests to
//! - **`auth`** - Login/registration forms and calls
//! - **`documents`** - List and editor state machines
//! - **`export`** - PDF export
//! - **`notify`** - Toast notifications
//! - **`types`** - Routes and navigation history
//! - **`state`** - `AppState`, which ties the above together
//! - **`views`** / **`theme`** - egui rendering
//!
//! Views never talk to the network. They mutate `AppState`, which spawns
//! requests on the runtime and applies the results in
//! [`AppState::check_pending_operations`] once per frame.

pub mod config;
pub mod session;
pub mod api;
pub mod runtime;
pub mod auth;
pub mod documents;
pub mod export;
pub mod notify;
pub mod types;
pub mod state;
pub mod views;
pub mod theme;

// Re-export commonly used types
pub use config::Config;
pub use api::{ApiClient, ApiError};
pub use auth::AuthState;
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionManager, TokenStore};
pub use types::{History, Route};
pub use state::AppState;

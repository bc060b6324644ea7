//! Docshelf - Main Library
//!
//! A native desktop client for a personal document backend. Users register
//! or log in, then create, edit, list, search, preview, delete and export
//! their notes ("documents") over the backend's REST API.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no UI dependency
//!   - Document and auth wire types
//!   - Markup parsing used by both the UI and the PDF exporter
//!   - Configuration and error types
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Session handling and HTTP client
//!   - Debounced search and stale-response guarding
//!   - Views, theme and PDF export
//!
//! # Error Handling
//!
//! Each layer has its own `thiserror` enum (`SharedError`, `ConfigError`,
//! `ApiError`, `SessionError`, `ExportError`). Nothing escapes to the UI
//! loop: failures become inline messages or toasts.
//!
//! # Security
//!
//! Document content is backend-supplied markup and is rendered without
//! sanitization. It is only ever turned into text, never executed.

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;

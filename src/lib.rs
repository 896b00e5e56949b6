//! # Polyglot
//!
//! A translation manager, usable both as a standalone binary and as a library.
//! Administrators organise keys into domains, add languages and translations,
//! and client applications resolve `(key, language code)` pairs over HTTP.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! polyglot = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use polyglot::server::{AppState, create_router};
//! use polyglot::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/polyglot.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), None));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod snippets;
pub mod store;
pub mod types;

//! # session-scope
//!
//! Per-request session store with scoped namespacing and one-shot flash data.
//!
//! This crate provides an in-process session API for request-handling hosts.
//! It lazily boots a backing storage exactly once per logical request,
//! addresses values through an optional scope (prefix) plus dotted two-level
//! keys, and implements flash semantics: data written with `flash` survives
//! exactly one subsequent request and is then purged by `flush`.
//!
//! ## Features
//!
//! - **Lazy boot**: every accessor guarantees the backing storage is active
//!   before any read or write
//! - **Scoped keys**: an optional prefix nests all operations one level deep,
//!   with per-call overrides
//! - **Flash data**: one-request-cycle messages with automatic purge
//! - **Pluggable storage**: file/database/cache backends implement a single
//!   trait; an in-memory backend ships by default
//!
//! ## Quick Start
//!
//! ```
//! use session_scope::{SessionConfig, SessionStore};
//! use serde_json::json;
//!
//! fn main() -> session_scope::Result<()> {
//!     // Initialize logging
//!     session_scope::logging::try_init().ok();
//!
//!     let mut session = SessionStore::in_memory(SessionConfig::default());
//!
//!     // First access boots the store and activates the storage.
//!     session.set("user.name", "ada", None)?;
//!     assert_eq!(session.get("user.name", None)?, Some(json!("ada")));
//!
//!     // Flash data stays for this request and exactly one more.
//!     session.flash("notice", "saved")?;
//!     session.flush()?;
//!     assert_eq!(session.get("notice", None)?, Some(json!("saved")));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigError, SessionConfig};
pub use error::{Result, SessionError};
pub use session::{InitState, RequestContext, SessionStore};
pub use storage::{MemoryStorage, SessionStorage};

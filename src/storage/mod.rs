//! Backing session storage abstraction.
//!
//! The store configures and activates a storage backend but never implements
//! persistence itself. File, database, or cache backends implement
//! [`SessionStorage`]; [`MemoryStorage`] is the in-process reference backend.

mod memory;

pub use memory::MemoryStorage;

use serde_json::{Map, Value};

use crate::Result;

/// Interface to the backing session-persistence mechanism.
///
/// Attribute setters are plain configuration writes and may be called before
/// activation. Cross-process consistency (locking, expiry enforcement) is the
/// backend's concern.
pub trait SessionStorage {
    /// Whether the backend has been activated.
    fn is_active(&self) -> bool;

    /// Activate the backend, making the session document available.
    ///
    /// Returns [`crate::SessionError::AlreadyActive`] if called on an active
    /// backend.
    fn activate(&mut self) -> Result<()>;

    /// Seed the session id.
    fn set_id(&mut self, id: &str);

    /// Set the session name (typically the cookie name).
    fn set_name(&mut self, name: &str);

    /// Set the save path for persisted sessions.
    fn set_save_path(&mut self, path: &str);

    /// Set the cookie domain.
    fn set_cookie_domain(&mut self, domain: &str);

    /// Set the lifetime in seconds, for both server-side GC and the cookie.
    fn set_lifetime(&mut self, seconds: u64);

    /// Mark the session cookie as secure.
    fn set_secure(&mut self, secure: bool);

    /// Mark the session cookie as http-only.
    fn set_http_only(&mut self, http_only: bool);

    /// Control whether cookies are used to propagate the session id.
    fn set_use_cookies(&mut self, use_cookies: bool);

    /// Set the HTTP cache limiter.
    fn set_cache_limiter(&mut self, limiter: &str);

    /// Set the HTTP cache expiry in minutes.
    fn set_cache_expire(&mut self, minutes: u64);

    /// Read access to the session document.
    fn document(&self) -> &Map<String, Value>;

    /// Write access to the session document.
    fn document_mut(&mut self) -> &mut Map<String, Value>;
}

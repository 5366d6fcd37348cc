//! In-memory reference backend.

use serde_json::{Map, Value};

use super::SessionStorage;
use crate::{Result, SessionError};

/// In-process session storage.
///
/// Holds the session document and the configured attributes directly in
/// memory. Useful as the default backend for single-process hosts and for
/// tests; it records every attribute so callers can inspect what the store
/// applied.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    active: bool,
    document: Map<String, Value>,
    id: Option<String>,
    name: Option<String>,
    save_path: Option<String>,
    cookie_domain: Option<String>,
    lifetime: Option<u64>,
    secure: bool,
    http_only: bool,
    use_cookies: bool,
    cache_limiter: Option<String>,
    cache_expire: Option<u64>,
}

impl MemoryStorage {
    /// Create a new inactive storage with an empty document.
    pub fn new() -> Self {
        Self {
            use_cookies: true,
            ..Self::default()
        }
    }

    /// The seeded session id, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The configured session name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The configured save path, if any.
    pub fn save_path(&self) -> Option<&str> {
        self.save_path.as_deref()
    }

    /// The configured cookie domain, if any.
    pub fn cookie_domain(&self) -> Option<&str> {
        self.cookie_domain.as_deref()
    }

    /// The configured lifetime in seconds, if any.
    pub fn lifetime(&self) -> Option<u64> {
        self.lifetime
    }

    /// Whether the session cookie is marked secure.
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Whether the session cookie is marked http-only.
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// Whether cookies are used to propagate the session id.
    pub fn use_cookies(&self) -> bool {
        self.use_cookies
    }

    /// The configured cache limiter, if any.
    pub fn cache_limiter(&self) -> Option<&str> {
        self.cache_limiter.as_deref()
    }

    /// The configured cache expiry in minutes, if any.
    pub fn cache_expire(&self) -> Option<u64> {
        self.cache_expire
    }
}

impl SessionStorage for MemoryStorage {
    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) -> Result<()> {
        if self.active {
            return Err(SessionError::AlreadyActive);
        }
        self.active = true;
        Ok(())
    }

    fn set_id(&mut self, id: &str) {
        self.id = Some(id.to_string());
    }

    fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    fn set_save_path(&mut self, path: &str) {
        self.save_path = Some(path.to_string());
    }

    fn set_cookie_domain(&mut self, domain: &str) {
        self.cookie_domain = Some(domain.to_string());
    }

    fn set_lifetime(&mut self, seconds: u64) {
        self.lifetime = Some(seconds);
    }

    fn set_secure(&mut self, secure: bool) {
        self.secure = secure;
    }

    fn set_http_only(&mut self, http_only: bool) {
        self.http_only = http_only;
    }

    fn set_use_cookies(&mut self, use_cookies: bool) {
        self.use_cookies = use_cookies;
    }

    fn set_cache_limiter(&mut self, limiter: &str) {
        self.cache_limiter = Some(limiter.to_string());
    }

    fn set_cache_expire(&mut self, minutes: u64) {
        self.cache_expire = Some(minutes);
    }

    fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.document
    }
}

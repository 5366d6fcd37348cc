//! Per-request context.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Context for one logical request.
///
/// Carries the request start timestamp (fixed for the lifetime of the
/// request) and the inbound string parameters a session id may be seeded
/// from. Constructed by the hosting layer at request entry and bound to the
/// store with [`crate::SessionStore::bind_request`]; this replaces any notion
/// of implicit request-scoped globals.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Wall-clock start of the request, UNIX seconds.
    start_time: f64,
    /// Inbound query/form parameters.
    params: HashMap<String, String>,
}

impl RequestContext {
    /// Create a context whose start time is now.
    pub fn new() -> Self {
        Self {
            start_time: unix_now(),
            params: HashMap::new(),
        }
    }

    /// Create a context with an explicit start time (UNIX seconds).
    pub fn with_start_time(start_time: f64) -> Self {
        Self {
            start_time,
            params: HashMap::new(),
        }
    }

    /// The request start timestamp, UNIX seconds.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Look up an inbound parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    /// Set an inbound parameter.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`Self::set_param`].
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(name, value);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time as UNIX seconds.
fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

//! Session management module.
//!
//! This module provides the session store itself plus the types that drive
//! it: the initialization state machine and the per-request context.

mod context;
mod state;
mod store;

pub use context::RequestContext;
pub use state::InitState;
pub use store::SessionStore;

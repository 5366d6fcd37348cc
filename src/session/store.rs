//! Scoped session store with flash data.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{InitState, RequestContext};
use crate::config::SessionConfig;
use crate::storage::{MemoryStorage, SessionStorage};
use crate::Result;

/// Reserved document key holding the flash registry.
const FLASH_KEY: &str = "__flash__";
/// Registry field holding the flash batch timestamp.
const TIME_FIELD: &str = "__time__";
/// Registry field holding the flashed key names.
const NAMES_FIELD: &str = "__names__";
/// Dotted path to the flash batch timestamp.
const FLASH_TIME_KEY: &str = "__flash__.__time__";
/// Dotted path to the flashed key names.
const FLASH_NAMES_KEY: &str = "__flash__.__names__";

/// Per-request session store with scoped namespacing and flash data.
///
/// The store lazily boots the backing storage exactly once: every data
/// accessor calls [`Self::boot`] before touching the document, so no session
/// access can happen against inactive storage. Keys address the document
/// directly, or a nested sub-mapping when a scope (prefix) is active; a
/// dotted key `part1.part2` reaches one level deeper still.
///
/// Scope overrides are per call: `None` uses the stored scope, `Some("")`
/// addresses the top level, any other value names the scope for that call
/// only.
pub struct SessionStore<S = MemoryStorage> {
    config: SessionConfig,
    scope: Option<String>,
    state: InitState,
    storage: S,
    request: RequestContext,
}

impl SessionStore<MemoryStorage> {
    /// Create a store over a fresh [`MemoryStorage`] backend.
    pub fn in_memory(config: SessionConfig) -> Self {
        Self::new(config, MemoryStorage::new(), RequestContext::new())
    }
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create a store over the given backend and request context.
    ///
    /// Construction applies nothing; configuration is applied on
    /// [`Self::apply_config`] or lazily on first access.
    pub fn new(config: SessionConfig, storage: S, request: RequestContext) -> Self {
        let scope = config.prefix.as_deref().and_then(normalize_scope);
        Self {
            config,
            scope,
            state: InitState::Uninitialized,
            storage,
            request,
        }
    }

    /// Current initialization state.
    pub fn state(&self) -> InitState {
        self.state
    }

    /// The stored scope (prefix), if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Set the stored scope. An empty string clears it.
    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = normalize_scope(&scope.into());
    }

    /// Clear the stored scope.
    pub fn clear_scope(&mut self) {
        self.scope = None;
    }

    /// The bound request context.
    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Bind a fresh request context at a request boundary.
    ///
    /// The session document persists in the backing storage; only the
    /// request start time and inbound parameters change.
    pub fn bind_request(&mut self, request: RequestContext) {
        self.request = request;
    }

    /// Read access to the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Merge configuration and apply it to the backing storage.
    ///
    /// The session id is seeded from the request parameter named by
    /// `var_session_id` when present, falling back to the configured `id`.
    /// If `auto_start` is set and the storage is not yet active, the store
    /// starts immediately; otherwise it is left configured-but-not-started.
    /// Safe to call repeatedly; a started store never regresses.
    pub fn apply_config(&mut self, overrides: SessionConfig) -> Result<()> {
        self.config.merge(overrides);

        if let Some(prefix) = self.config.prefix.as_deref() {
            self.scope = normalize_scope(prefix);
        }

        let seeded = self
            .config
            .var_session_id
            .as_deref()
            .and_then(|var| self.request.param(var));
        if let Some(id) = seeded {
            self.storage.set_id(id);
        } else if let Some(id) = self.config.id.as_deref() {
            self.storage.set_id(id);
        }

        if let Some(name) = self.config.name.as_deref() {
            self.storage.set_name(name);
        }
        if let Some(path) = self.config.path.as_deref() {
            self.storage.set_save_path(path);
        }
        if let Some(domain) = self.config.domain.as_deref() {
            self.storage.set_cookie_domain(domain);
        }
        if let Some(expire) = self.config.expire {
            self.storage.set_lifetime(expire);
        }
        if let Some(secure) = self.config.secure {
            self.storage.set_secure(secure);
        }
        if let Some(httponly) = self.config.httponly {
            self.storage.set_http_only(httponly);
        }
        if let Some(use_cookies) = self.config.use_cookies {
            self.storage.set_use_cookies(use_cookies);
        }
        if let Some(limiter) = self.config.cache_limiter.as_deref() {
            self.storage.set_cache_limiter(limiter);
        }
        if let Some(minutes) = self.config.cache_expire {
            self.storage.set_cache_expire(minutes);
        }

        if self.config.auto_start() && !self.storage.is_active() {
            self.start()?;
        } else if !self.state.is_started() {
            self.state = InitState::Configured;
            debug!("session configured, awaiting first access");
        }

        Ok(())
    }

    /// Ensure the store is started, applying stored configuration first if
    /// none has been applied yet.
    ///
    /// Idempotent; every data accessor calls this before touching the
    /// document.
    pub fn boot(&mut self) -> Result<()> {
        if self.state.is_started() {
            return Ok(());
        }
        if self.state.needs_config() {
            self.apply_config(SessionConfig::default())?;
        }
        if self.state == InitState::Configured {
            if !self.storage.is_active() {
                self.storage.activate()?;
            }
            self.state = InitState::Started;
            debug!("session started on first access");
        }
        Ok(())
    }

    /// Unconditionally start the backing storage.
    ///
    /// A double start is reported as a warning and otherwise treated as a
    /// no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.storage.is_active() {
            warn!("session storage already active, start ignored");
        } else {
            self.storage.activate()?;
        }
        self.state = InitState::Started;
        Ok(())
    }

    /// Inform the store that an external caller already started the backing
    /// storage, so the lazy boot skips a redundant start.
    pub fn mark_initialized(&mut self) {
        self.state = InitState::Started;
    }

    /// Read a value.
    ///
    /// An empty key returns the full scoped document. Dotted keys walk at
    /// most two levels; only the first two segments of a key are used.
    pub fn get(&mut self, key: &str, scope: Option<&str>) -> Result<Option<Value>> {
        self.boot()?;
        let scope = self.effective_scope(scope);
        let doc = self.storage.document();

        let base = match scope.as_deref() {
            Some(s) => doc.get(s).and_then(Value::as_object),
            None => Some(doc),
        };

        if key.is_empty() {
            return Ok(Some(Value::Object(base.cloned().unwrap_or_default())));
        }

        let Some(base) = base else { return Ok(None) };
        let (first, second) = split_key(key);

        let Some(mut value) = base.get(first) else {
            return Ok(None);
        };
        if let Some(second) = second {
            match value.get(second) {
                Some(inner) => value = inner,
                None => return Ok(None),
            }
        }
        Ok(Some(value.clone()))
    }

    /// Write a value, creating intermediate mappings as needed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>, scope: Option<&str>) -> Result<()> {
        self.boot()?;
        let scope = self.effective_scope(scope);
        let value = value.into();
        let doc = self.storage.document_mut();

        let base = match scope.as_deref() {
            Some(s) => ensure_object(doc, s),
            None => doc,
        };

        let (first, second) = split_key(key);
        match second {
            Some(second) => {
                ensure_object(base, first).insert(second.to_string(), value);
            }
            None => {
                base.insert(first.to_string(), value);
            }
        }
        Ok(())
    }

    /// Check whether a key resolves to a value.
    pub fn has(&mut self, key: &str, scope: Option<&str>) -> Result<bool> {
        self.boot()?;
        let scope = self.effective_scope(scope);
        let doc = self.storage.document();

        let base = match scope.as_deref() {
            Some(s) => doc.get(s).and_then(Value::as_object),
            None => Some(doc),
        };
        let Some(base) = base else { return Ok(false) };

        let (first, second) = split_key(key);
        let Some(value) = base.get(first) else {
            return Ok(false);
        };
        match second {
            Some(second) => Ok(value.get(second).is_some()),
            None => Ok(true),
        }
    }

    /// Delete a key.
    ///
    /// For a dotted key only the leaf segment is removed; an emptied parent
    /// mapping stays in place. Deleting a missing key is a no-op.
    pub fn delete(&mut self, key: &str, scope: Option<&str>) -> Result<()> {
        self.boot()?;
        let scope = self.effective_scope(scope);
        let doc = self.storage.document_mut();

        let base = match scope.as_deref() {
            Some(s) => match doc.get_mut(s).and_then(Value::as_object_mut) {
                Some(base) => base,
                None => return Ok(()),
            },
            None => doc,
        };

        let (first, second) = split_key(key);
        match second {
            Some(second) => {
                if let Some(inner) = base.get_mut(first).and_then(Value::as_object_mut) {
                    inner.remove(second);
                }
            }
            None => {
                base.remove(first);
            }
        }
        Ok(())
    }

    /// Delete each key in a sequence.
    pub fn delete_many<I, K>(&mut self, keys: I, scope: Option<&str>) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.delete(key.as_ref(), scope)?;
        }
        Ok(())
    }

    /// Remove the entire scoped sub-mapping, or the whole document when no
    /// scope is active.
    pub fn clear(&mut self, scope: Option<&str>) -> Result<()> {
        self.boot()?;
        let scope = self.effective_scope(scope);
        let doc = self.storage.document_mut();
        match scope.as_deref() {
            Some(s) => {
                doc.remove(s);
            }
            None => doc.clear(),
        }
        Ok(())
    }

    /// Read a value and delete it in one step.
    ///
    /// Known quirk, preserved for compatibility: a stored falsy value
    /// (null, `false`, numeric zero, `""`, `"0"`, an empty sequence or
    /// mapping) is treated as "nothing to pull" — `None` is returned and the
    /// value is left in place.
    pub fn pull(&mut self, key: &str, scope: Option<&str>) -> Result<Option<Value>> {
        match self.get(key, scope)? {
            Some(value) if !is_falsy(&value) => {
                self.delete(key, scope)?;
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    /// Append a value to the sequence stored at `key` under the default
    /// scope, creating the sequence if absent.
    ///
    /// A non-sequence target is misuse and is replaced by a fresh
    /// one-element sequence.
    pub fn push(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut items = match self.get(key, None)? {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        items.push(value.into());
        self.set(key, Value::Array(items), None)
    }

    /// Write a value that stays visible for the remainder of this request
    /// and exactly one subsequent request.
    ///
    /// The first flash of a request stamps the registry with the request
    /// start time; [`Self::flush`] purges the batch once it observes a stamp
    /// from an earlier request.
    pub fn flash(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.set(key, value, None)?;
        if !self.has(FLASH_TIME_KEY, None)? {
            let start = self.request.start_time();
            self.set(FLASH_TIME_KEY, start, None)?;
        }
        self.push(FLASH_NAMES_KEY, key)
    }

    /// Purge flash data recorded by a previous request.
    ///
    /// No-op if the store was never started this request, or if the current
    /// batch was flashed during this request (its keys stay visible for the
    /// next cycle).
    pub fn flush(&mut self) -> Result<()> {
        if !self.state.is_started() {
            return Ok(());
        }
        let Some(registry) = self.get(FLASH_KEY, None)? else {
            return Ok(());
        };
        let Some(registry) = registry.as_object() else {
            return Ok(());
        };
        let Some(batch_time) = registry.get(TIME_FIELD).and_then(Value::as_f64) else {
            return Ok(());
        };

        if self.request.start_time() > batch_time {
            let names: Vec<String> = registry
                .get(NAMES_FIELD)
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(|n| n.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();

            debug!(count = names.len(), "purging expired flash data");
            self.delete_many(&names, None)?;
            self.set(FLASH_KEY, Value::Object(Map::new()), None)?;
        }
        Ok(())
    }

    /// Resolve the effective scope for one call.
    fn effective_scope(&self, scope: Option<&str>) -> Option<String> {
        match scope {
            Some(s) => normalize_scope(s),
            None => self.scope.clone(),
        }
    }
}

/// An empty scope string means "no scope".
fn normalize_scope(scope: &str) -> Option<String> {
    if scope.is_empty() {
        None
    } else {
        Some(scope.to_string())
    }
}

/// Split a dotted key into its first two segments; the rest is ignored.
fn split_key(key: &str) -> (&str, Option<&str>) {
    let mut segments = key.split('.');
    let first = segments.next().unwrap_or("");
    (first, segments.next())
}

/// Get-or-create a nested mapping. A non-mapping value at the key is misuse
/// and is replaced.
fn ensure_object<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(obj) => obj,
        _ => unreachable!(),
    }
}

/// The falsy notion the pull quirk is defined over.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> SessionStore {
        SessionStore::in_memory(SessionConfig::default())
    }

    #[test]
    fn test_first_access_boots() {
        let mut session = store();
        assert_eq!(session.state(), InitState::Uninitialized);

        let value = session.get("anything", None).unwrap();
        assert_eq!(value, None);
        assert_eq!(session.state(), InitState::Started);
        assert!(session.storage().is_active());
    }

    #[test]
    fn test_boot_is_idempotent() {
        let mut session = store();
        session.boot().unwrap();
        session.boot().unwrap();
        assert_eq!(session.state(), InitState::Started);
    }

    #[test]
    fn test_apply_config_without_auto_start() {
        let mut session = store();
        session.apply_config(SessionConfig::default()).unwrap();
        assert_eq!(session.state(), InitState::Configured);
        assert!(!session.storage().is_active());
    }

    #[test]
    fn test_apply_config_auto_start() {
        let mut session = store();
        session
            .apply_config(SessionConfig {
                auto_start: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.state(), InitState::Started);
        assert!(session.storage().is_active());
    }

    #[test]
    fn test_apply_config_reaches_storage() {
        let mut session = store();
        session
            .apply_config(SessionConfig {
                id: Some("sid-42".into()),
                name: Some("SESSID".into()),
                path: Some("/tmp/sessions".into()),
                domain: Some("example.com".into()),
                expire: Some(3600),
                secure: Some(true),
                httponly: Some(true),
                use_cookies: Some(false),
                cache_limiter: Some("nocache".into()),
                cache_expire: Some(30),
                ..Default::default()
            })
            .unwrap();

        let storage = session.storage();
        assert_eq!(storage.id(), Some("sid-42"));
        assert_eq!(storage.name(), Some("SESSID"));
        assert_eq!(storage.save_path(), Some("/tmp/sessions"));
        assert_eq!(storage.cookie_domain(), Some("example.com"));
        assert_eq!(storage.lifetime(), Some(3600));
        assert!(storage.secure());
        assert!(storage.http_only());
        assert!(!storage.use_cookies());
        assert_eq!(storage.cache_limiter(), Some("nocache"));
        assert_eq!(storage.cache_expire(), Some(30));
    }

    #[test]
    fn test_apply_config_does_not_regress_started() {
        let mut session = store();
        session.boot().unwrap();
        session.apply_config(SessionConfig::default()).unwrap();
        assert_eq!(session.state(), InitState::Started);
    }

    #[test]
    fn test_request_param_seeds_session_id() {
        let request = RequestContext::new().with_param("session_id", "from-request");
        let config = SessionConfig {
            id: Some("from-config".into()),
            var_session_id: Some("session_id".into()),
            ..Default::default()
        };
        let mut session = SessionStore::new(config, MemoryStorage::new(), request);

        session.boot().unwrap();
        assert_eq!(session.storage().id(), Some("from-request"));
    }

    #[test]
    fn test_configured_id_without_request_param() {
        let config = SessionConfig {
            id: Some("from-config".into()),
            var_session_id: Some("session_id".into()),
            ..Default::default()
        };
        let mut session = SessionStore::new(config, MemoryStorage::new(), RequestContext::new());

        session.boot().unwrap();
        assert_eq!(session.storage().id(), Some("from-config"));
    }

    #[test]
    fn test_double_start_is_benign() {
        let mut session = store();
        session.start().unwrap();
        session.start().unwrap();
        assert_eq!(session.state(), InitState::Started);
    }

    #[test]
    fn test_mark_initialized_skips_activation() {
        let mut session = store();
        session.mark_initialized();
        assert_eq!(session.state(), InitState::Started);

        // Boot must not try to activate again.
        session.boot().unwrap();
        assert!(!session.storage().is_active());
    }

    #[test]
    fn test_set_get_top_level() {
        let mut session = store();
        session.set("name", "ada", None).unwrap();
        assert_eq!(session.get("name", None).unwrap(), Some(json!("ada")));
    }

    #[test]
    fn test_dot_path_round_trip() {
        let mut session = store();
        session.set("user.name", "ada", None).unwrap();
        assert_eq!(session.get("user.name", None).unwrap(), Some(json!("ada")));
        assert_eq!(
            session.get("user", None).unwrap(),
            Some(json!({"name": "ada"}))
        );
    }

    #[test]
    fn test_dot_path_round_trip_with_scope() {
        let mut session = store();
        session.set_scope("app");
        session.set("user.name", "ada", None).unwrap();

        assert_eq!(session.get("user.name", None).unwrap(), Some(json!("ada")));
        // Invisible from the top level under that key.
        assert_eq!(session.get("user.name", Some("")).unwrap(), None);
        // The scope nests one level below the document root.
        assert_eq!(
            session.get("app", Some("")).unwrap(),
            Some(json!({"user": {"name": "ada"}}))
        );
    }

    #[test]
    fn test_scope_isolation() {
        let mut session = store();
        session.set("k", "v1", Some("s1")).unwrap();
        session.set("k", "v2", Some("s2")).unwrap();

        assert_eq!(session.get("k", Some("s1")).unwrap(), Some(json!("v1")));
        assert_eq!(session.get("k", Some("s2")).unwrap(), Some(json!("v2")));
        assert_eq!(session.get("k", Some("")).unwrap(), None);
    }

    #[test]
    fn test_empty_key_returns_scoped_document() {
        let mut session = store();
        session.set("a", 1, Some("s")).unwrap();
        session.set("b", 2, Some("s")).unwrap();

        assert_eq!(
            session.get("", Some("s")).unwrap(),
            Some(json!({"a": 1, "b": 2}))
        );
        // Absent scope reads as an empty mapping.
        assert_eq!(session.get("", Some("missing")).unwrap(), Some(json!({})));
    }

    #[test]
    fn test_multi_dot_uses_first_two_segments() {
        let mut session = store();
        session.set("a.b.c", "deep", None).unwrap();
        assert_eq!(session.get("a.b", None).unwrap(), Some(json!("deep")));
        assert_eq!(session.get("a.b.anything", None).unwrap(), Some(json!("deep")));
    }

    #[test]
    fn test_has() {
        let mut session = store();
        session.set("user.name", "ada", None).unwrap();

        assert!(session.has("user", None).unwrap());
        assert!(session.has("user.name", None).unwrap());
        assert!(!session.has("user.email", None).unwrap());
        assert!(!session.has("missing", None).unwrap());
        assert!(!session.has("missing.leaf", None).unwrap());
    }

    #[test]
    fn test_delete_leaf_keeps_parent() {
        let mut session = store();
        session.set("user.name", "ada", None).unwrap();
        session.delete("user.name", None).unwrap();

        assert!(!session.has("user.name", None).unwrap());
        // The emptied parent mapping is not pruned.
        assert_eq!(session.get("user", None).unwrap(), Some(json!({})));
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let mut session = store();
        session.delete("nope", None).unwrap();
        session.delete("nope.leaf", None).unwrap();
        session.delete("nope", Some("ghost")).unwrap();
        assert_eq!(session.get("", None).unwrap(), Some(json!({})));
    }

    #[test]
    fn test_delete_many() {
        let mut session = store();
        session.set("a", 1, None).unwrap();
        session.set("b", 2, None).unwrap();
        session.set("c", 3, None).unwrap();

        session.delete_many(["a", "c"], None).unwrap();
        assert!(!session.has("a", None).unwrap());
        assert!(session.has("b", None).unwrap());
        assert!(!session.has("c", None).unwrap());
    }

    #[test]
    fn test_clear_scoped_leaves_top_level() {
        let mut session = store();
        session.set("keep", "me", Some("")).unwrap();
        session.set("k", "v", Some("s1")).unwrap();

        session.clear(Some("s1")).unwrap();
        assert_eq!(session.get("k", Some("s1")).unwrap(), None);
        assert_eq!(session.get("keep", Some("")).unwrap(), Some(json!("me")));
    }

    #[test]
    fn test_clear_unscoped_removes_everything() {
        let mut session = store();
        session.set("a", 1, None).unwrap();
        session.set("k", "v", Some("s1")).unwrap();

        session.clear(None).unwrap();
        assert_eq!(session.get("", None).unwrap(), Some(json!({})));
    }

    #[test]
    fn test_pull_truthy_value() {
        let mut session = store();
        session.set("token", "x", None).unwrap();

        assert_eq!(session.pull("token", None).unwrap(), Some(json!("x")));
        assert!(!session.has("token", None).unwrap());
    }

    #[test]
    fn test_pull_falsy_value_left_in_place() {
        let mut session = store();
        session.set("zero", 0, None).unwrap();

        assert_eq!(session.pull("zero", None).unwrap(), None);
        assert!(session.has("zero", None).unwrap());

        session.set("flag", false, None).unwrap();
        assert_eq!(session.pull("flag", None).unwrap(), None);
        assert!(session.has("flag", None).unwrap());

        session.set("empty", "", None).unwrap();
        assert_eq!(session.pull("empty", None).unwrap(), None);
        assert!(session.has("empty", None).unwrap());
    }

    #[test]
    fn test_pull_missing_key() {
        let mut session = store();
        assert_eq!(session.pull("missing", None).unwrap(), None);
    }

    #[test]
    fn test_push_creates_and_appends() {
        let mut session = store();
        session.push("log", "first").unwrap();
        session.push("log", "second").unwrap();

        assert_eq!(
            session.get("log", None).unwrap(),
            Some(json!(["first", "second"]))
        );
    }

    #[test]
    fn test_push_replaces_non_sequence_target() {
        let mut session = store();
        session.set("log", "scalar", None).unwrap();
        session.push("log", "entry").unwrap();

        assert_eq!(session.get("log", None).unwrap(), Some(json!(["entry"])));
    }

    #[test]
    fn test_flash_records_registry() {
        let request = RequestContext::with_start_time(100.0);
        let mut session =
            SessionStore::new(SessionConfig::default(), MemoryStorage::new(), request);

        session.flash("msg", "hi").unwrap();
        session.flash("other", "there").unwrap();

        assert_eq!(session.get("msg", None).unwrap(), Some(json!("hi")));
        assert_eq!(
            session.get(FLASH_TIME_KEY, None).unwrap(),
            Some(json!(100.0))
        );
        assert_eq!(
            session.get(FLASH_NAMES_KEY, None).unwrap(),
            Some(json!(["msg", "other"]))
        );
    }

    #[test]
    fn test_flash_keeps_first_batch_timestamp() {
        let request = RequestContext::with_start_time(100.0);
        let mut session =
            SessionStore::new(SessionConfig::default(), MemoryStorage::new(), request);

        session.flash("msg", "hi").unwrap();
        session.flash("late", "comer").unwrap();

        assert_eq!(
            session.get(FLASH_TIME_KEY, None).unwrap(),
            Some(json!(100.0))
        );
    }

    #[test]
    fn test_flush_same_request_keeps_flash_data() {
        let request = RequestContext::with_start_time(100.0);
        let mut session =
            SessionStore::new(SessionConfig::default(), MemoryStorage::new(), request);

        session.flash("msg", "hi").unwrap();
        session.flush().unwrap();

        assert_eq!(session.get("msg", None).unwrap(), Some(json!("hi")));
    }

    #[test]
    fn test_flush_next_request_purges_flash_data() {
        let request = RequestContext::with_start_time(100.0);
        let mut session =
            SessionStore::new(SessionConfig::default(), MemoryStorage::new(), request);

        session.flash("msg", "hi").unwrap();
        session.bind_request(RequestContext::with_start_time(101.0));

        // Still visible until the next flush.
        assert_eq!(session.get("msg", None).unwrap(), Some(json!("hi")));

        session.flush().unwrap();
        assert!(!session.has("msg", None).unwrap());
        assert_eq!(session.get(FLASH_KEY, None).unwrap(), Some(json!({})));
    }

    #[test]
    fn test_flush_before_boot_is_noop() {
        let mut session = store();
        session.flush().unwrap();
        assert_eq!(session.state(), InitState::Uninitialized);
    }

    #[test]
    fn test_flush_without_flash_data() {
        let mut session = store();
        session.set("plain", "data", None).unwrap();
        session.flush().unwrap();
        assert_eq!(session.get("plain", None).unwrap(), Some(json!("data")));
    }

    #[test]
    fn test_scope_from_config_prefix() {
        let config = SessionConfig {
            prefix: Some("app".into()),
            ..Default::default()
        };
        let mut session = SessionStore::new(config, MemoryStorage::new(), RequestContext::new());
        assert_eq!(session.scope(), Some("app"));

        session.set("k", "v", None).unwrap();
        assert_eq!(
            session.get("app", Some("")).unwrap(),
            Some(json!({"k": "v"}))
        );
    }

    #[test]
    fn test_set_scope_empty_clears() {
        let mut session = store();
        session.set_scope("app");
        assert_eq!(session.scope(), Some("app"));

        session.set_scope("");
        assert_eq!(session.scope(), None);
    }
}

//! The live nested mapping.
//!
//! A [`LiveMap`] behaves like an ordinary JSON object for reads while keeping
//! a remote path-addressed store synchronized with every write. Reads come
//! from an in-memory cache seeded at construction; nested object values are
//! handed back wrapped in fresh child `LiveMap`s bound one path segment
//! deeper, so mutations on a child land on the right remote node. Writes and
//! deletes call the remote store first and touch the cache only after the
//! remote call succeeds, so a failed operation leaves the local view exactly
//! as it was.
//!
//! The cache is never authoritative. A caller that ignores a returned error
//! and keeps the instance around is accepting that its view may have drifted
//! from the remote tree.

use crate::error::LiveTreeError;
use crate::path::{self, TreePath};
use crate::store::RemoteStore;
use serde_json::{Map, Value};
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// A mapping bound to a node of the remote tree.
#[derive(Clone)]
pub struct LiveMap {
    cache: Map<String, Value>,
    path: Option<TreePath>,
    store: Arc<dyn RemoteStore>,
}

/// The result of looking a key up in a [`LiveMap`].
///
/// Object values come back as child maps so that writing through them
/// propagates to the correct remote node; scalars and arrays come back
/// as plain JSON values.
#[derive(Debug, Clone)]
pub enum LiveValue {
    Map(LiveMap),
    Leaf(Value),
}

/// Outcome of a bulk [`LiveMap::extend`]: per-key failures are collected
/// instead of aborting the whole merge, since each single-key write fails
/// independently at the remote store.
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub applied: usize,
    pub failed: Vec<(String, LiveTreeError)>,
}

impl UpdateReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl LiveMap {
    /// An empty container. With `path` of `None` the container is unbound:
    /// reads work but writes and deletes fail with
    /// [`LiveTreeError::Unbound`].
    pub fn new(store: Arc<dyn RemoteStore>, path: Option<TreePath>) -> Self {
        LiveMap {
            cache: Map::new(),
            path,
            store,
        }
    }

    /// Seed a container from a fetched subtree. `Null` seeds an empty map
    /// (the remote convention for an absent node); any other non-object
    /// value is rejected.
    pub fn from_value(
        store: Arc<dyn RemoteStore>,
        path: Option<TreePath>,
        value: Value,
    ) -> Result<Self, LiveTreeError> {
        let cache = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(LiveTreeError::NotAMap {
                    path: path.map_or_else(|| "<unbound>".to_string(), |p| p.to_string()),
                    found: json_type(&other),
                });
            }
        };
        Ok(LiveMap { cache, path, store })
    }

    /// Seed a container from serialized JSON text. Parse failures propagate;
    /// callers hand in pre-validated data or deal with the error.
    pub fn from_json(
        store: Arc<dyn RemoteStore>,
        path: Option<TreePath>,
        text: &str,
    ) -> Result<Self, LiveTreeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(store, path, value)
    }

    /// The bound path, if any.
    pub fn path(&self) -> Option<&TreePath> {
        self.path.as_ref()
    }

    /// Look up `key` in the local cache. No remote call is made.
    ///
    /// Returns `None` when the key is absent; a present-but-null entry comes
    /// back as `Some(LiveValue::Leaf(Value::Null))`, keeping "absent" and
    /// "present but empty" distinguishable. Object values are wrapped in a
    /// fresh child map bound at `self_path/key` holding an independent copy
    /// of the nested object.
    pub fn get(&self, key: &str) -> Option<LiveValue> {
        match self.cache.get(key)? {
            Value::Object(nested) => {
                let child_path = self.path.as_ref().and_then(|p| p.child(key).ok());
                Some(LiveValue::Map(LiveMap {
                    cache: nested.clone(),
                    path: child_path,
                    store: Arc::clone(&self.store),
                }))
            }
            other => Some(LiveValue::Leaf(other.clone())),
        }
    }

    /// Write one key. The remote node at the bound path receives a partial
    /// update (`{key: value}`) first; the cache is only touched once that
    /// call has succeeded. On failure the cache is left exactly as it was
    /// and the error is returned.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), LiveTreeError> {
        path::validate_segment(key)?;
        let bound = self.path.as_ref().ok_or(LiveTreeError::Unbound)?;
        let mut partial = Map::new();
        partial.insert(key.to_string(), value.clone());
        if let Err(err) = self.store.merge(bound, &partial) {
            warn!(path = %bound, key, error = %err, "remote merge failed; cache unchanged");
            return Err(err.into());
        }
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    /// Insert `default` under `key` only if the key is absent. An existing
    /// key is a no-op (`Ok(None)`) with no remote call; otherwise this is a
    /// plain [`set`](Self::set) and the inserted value is handed back.
    pub fn set_default(
        &mut self,
        key: &str,
        default: Value,
    ) -> Result<Option<Value>, LiveTreeError> {
        if self.cache.contains_key(key) {
            return Ok(None);
        }
        self.set(key, default.clone())?;
        Ok(Some(default))
    }

    /// Delete one key. The remote delete targets the derived child path
    /// `bound/key`; the bound path itself is never mutated, so it is
    /// identical before and after the call whether or not the remote delete
    /// succeeds. The cache entry is removed (and returned) only on success.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>, LiveTreeError> {
        let bound = self.path.as_ref().ok_or(LiveTreeError::Unbound)?;
        let node = bound.child(key)?;
        if let Err(err) = self.store.remove(&node) {
            warn!(path = %node, error = %err, "remote delete failed; cache unchanged");
            return Err(err.into());
        }
        Ok(self.cache.remove(key))
    }

    /// Bulk merge: each entry goes through the single-key [`set`](Self::set)
    /// path, so every pair is replicated remotely and failures are
    /// independent per key. Partial failure is reported, not raised.
    pub fn extend<I>(&mut self, entries: I) -> UpdateReport
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut report = UpdateReport::default();
        for (key, value) in entries {
            match self.set(&key, value) {
                Ok(()) => report.applied += 1,
                Err(err) => report.failed.push((key, err)),
            }
        }
        report
    }

    /// Serialize the cache content to JSON text.
    pub fn to_json(&self) -> Result<String, LiveTreeError> {
        Ok(serde_json::to_string(&self.cache)?)
    }

    /// Serialize the cache content to a UTF-8 JSON file. The file handle is
    /// scoped to this call and closed on every exit path.
    pub fn to_json_file(&self, dest: &Path) -> Result<(), LiveTreeError> {
        let file = File::create(dest)?;
        serde_json::to_writer(file, &self.cache)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.cache.keys()
    }

    /// Raw cache entries, for inspection. Mutating through the returned
    /// values is impossible; all mutation goes through [`set`](Self::set)
    /// and [`remove`](Self::remove) so the remote store stays in step.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.cache.iter()
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.cache
    }
}

impl fmt::Debug for LiveMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveMap")
            .field("path", &self.path)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl LiveValue {
    pub fn into_map(self) -> Option<LiveMap> {
        match self {
            LiveValue::Map(map) => Some(map),
            LiveValue::Leaf(_) => None,
        }
    }

    pub fn into_leaf(self) -> Option<Value> {
        match self {
            LiveValue::Map(_) => None,
            LiveValue::Leaf(value) => Some(value),
        }
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            LiveValue::Map(_) => None,
            LiveValue::Leaf(value) => Some(value),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

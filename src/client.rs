//! Path-bound handles over a shared remote store.
//!
//! A [`TreeRef`] is the entry point for top-level access: navigate to a node
//! with [`child`](TreeRef::child), pull its subtree into a bound
//! [`LiveMap`] with [`fetch_map`](TreeRef::fetch_map), or operate on the
//! node directly. Handles are cheap to clone and derive children by pure
//! path concatenation; nothing shared is ever mutated to compute a path.

use crate::error::LiveTreeError;
use crate::live::LiveMap;
use crate::path::TreePath;
use crate::store::RemoteStore;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TreeRef {
    store: Arc<dyn RemoteStore>,
    path: TreePath,
}

impl TreeRef {
    pub fn new(store: Arc<dyn RemoteStore>, path: TreePath) -> Self {
        TreeRef { store, path }
    }

    pub fn path(&self) -> &TreePath {
        &self.path
    }

    /// A handle one segment deeper. `self` is untouched.
    pub fn child(&self, key: &str) -> Result<TreeRef, LiveTreeError> {
        Ok(TreeRef {
            store: Arc::clone(&self.store),
            path: self.path.child(key)?,
        })
    }

    /// The raw subtree at this node; `Null` if the node is absent.
    pub fn fetch(&self) -> Result<Value, LiveTreeError> {
        debug!(path = %self.path, "fetch");
        Ok(self.store.fetch(&self.path)?)
    }

    /// Fetch this node's subtree and seed a [`LiveMap`] bound here, so that
    /// writes on the returned container propagate back to this node. An
    /// absent node seeds an empty map; a scalar node is an error.
    pub fn fetch_map(&self) -> Result<LiveMap, LiveTreeError> {
        let value = self.fetch()?;
        LiveMap::from_value(Arc::clone(&self.store), Some(self.path.clone()), value)
    }

    /// Fully overwrite this node.
    pub fn replace(&self, value: &Value) -> Result<(), LiveTreeError> {
        debug!(path = %self.path, "replace");
        self.store.replace(&self.path, value).map_err(|err| {
            warn!(path = %self.path, error = %err, "remote replace failed");
            err.into()
        })
    }

    /// Partial update of this node: only the named keys are overwritten.
    pub fn merge(&self, partial: &Map<String, Value>) -> Result<(), LiveTreeError> {
        debug!(path = %self.path, keys = partial.len(), "merge");
        self.store.merge(&self.path, partial).map_err(|err| {
            warn!(path = %self.path, error = %err, "remote merge failed");
            err.into()
        })
    }

    /// Delete this node.
    pub fn remove(&self) -> Result<(), LiveTreeError> {
        debug!(path = %self.path, "remove");
        self.store.remove(&self.path).map_err(|err| {
            warn!(path = %self.path, error = %err, "remote delete failed");
            err.into()
        })
    }
}

impl fmt::Debug for TreeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeRef")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

//! The remote-store collaborator contract.
//!
//! `livetree` is purely a client of a tree-shaped, path-addressed key-value
//! service; it defines no wire format of its own. Every call is synchronous
//! and blocking, and the implementation owns its own timeout and retry
//! policy (the core performs no retries).

use crate::error::RemoteError;
use crate::path::TreePath;
use serde_json::{Map, Value};

/// A remote hierarchical key-value store addressed by slash-delimited paths.
///
/// The remote store is authoritative; every [`LiveMap`](crate::live::LiveMap)
/// cache is a best-effort mirror of one of its subtrees. One handle is shared
/// (via `Arc`) by a parent container and every child it produces.
pub trait RemoteStore: Send + Sync {
    /// Fetch the whole subtree at `path`. An absent node yields
    /// `Value::Null`, not an error.
    fn fetch(&self, path: &TreePath) -> Result<Value, RemoteError>;

    /// Fully overwrite the node at `path`. Writing `Value::Null` deletes it.
    fn replace(&self, path: &TreePath, value: &Value) -> Result<(), RemoteError>;

    /// Partial update: overwrite only the named keys at `path`, leaving
    /// sibling keys untouched.
    fn merge(&self, path: &TreePath, partial: &Map<String, Value>) -> Result<(), RemoteError>;

    /// Delete the node at `path`. Removing an absent node is a no-op.
    fn remove(&self, path: &TreePath) -> Result<(), RemoteError>;
}

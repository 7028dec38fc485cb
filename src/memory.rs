//! In-process remote store.
//!
//! `MemoryStore` keeps an authoritative JSON tree behind a mutex and speaks
//! the [`RemoteStore`] contract over it. It backs local/offline operation
//! and the test suite; the semantics mirror the hosted realtime-database
//! behavior the contract was modeled on: fetching an absent node yields
//! `Null`, merging creates intermediate objects, replacing with `Null`
//! deletes, and removing an absent node is a no-op.

use crate::error::RemoteError;
use crate::path::TreePath;
use crate::store::RemoteStore;
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard};

pub struct MemoryStore {
    root: Mutex<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_seed(Value::Object(Map::new()))
    }

    /// Start from an existing tree, e.g. one loaded from a seed file.
    pub fn with_seed(seed: Value) -> Self {
        MemoryStore {
            root: Mutex::new(seed),
        }
    }

    /// A copy of the entire tree.
    pub fn snapshot(&self) -> Value {
        self.tree().clone()
    }

    fn tree(&self) -> MutexGuard<'_, Value> {
        // A poisoned lock still holds valid JSON; take it back.
        self.root.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for MemoryStore {
    fn fetch(&self, path: &TreePath) -> Result<Value, RemoteError> {
        let tree = self.tree();
        Ok(descend(&tree, path).cloned().unwrap_or(Value::Null))
    }

    fn replace(&self, path: &TreePath, value: &Value) -> Result<(), RemoteError> {
        if value.is_null() {
            return self.remove(path);
        }
        let mut tree = self.tree();
        *descend_mut(&mut tree, path) = value.clone();
        Ok(())
    }

    fn merge(&self, path: &TreePath, partial: &Map<String, Value>) -> Result<(), RemoteError> {
        let mut tree = self.tree();
        let node = descend_mut(&mut tree, path);
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        if let Value::Object(map) = node {
            for (key, value) in partial {
                map.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    fn remove(&self, path: &TreePath) -> Result<(), RemoteError> {
        let mut tree = self.tree();
        let segments: Vec<&str> = path.segments().collect();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };
        let mut node = &mut *tree;
        for segment in parents {
            match node.get_mut(segment) {
                Some(next) => node = next,
                None => return Ok(()),
            }
        }
        if let Value::Object(map) = node {
            map.remove(*last);
        }
        Ok(())
    }
}

fn descend<'a>(mut node: &'a Value, path: &TreePath) -> Option<&'a Value> {
    for segment in path.segments() {
        node = node.get(segment)?;
    }
    Some(node)
}

/// Walk to the node at `path`, materializing intermediate objects. A scalar
/// in the way is overwritten, matching the hosted store's write semantics.
fn descend_mut<'a>(mut node: &'a mut Value, path: &TreePath) -> &'a mut Value {
    for segment in path.segments() {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = match node {
            Value::Object(map) => map.entry(segment).or_insert(Value::Null),
            _ => unreachable!(),
        };
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(s: &str) -> TreePath {
        TreePath::new(s).unwrap()
    }

    #[test]
    fn test_fetch_missing_path_yields_null() {
        let store = MemoryStore::new();
        assert_eq!(store.fetch(&p("nowhere/at/all")).unwrap(), Value::Null);
    }

    #[test]
    fn test_merge_creates_intermediate_objects() {
        let store = MemoryStore::new();
        let mut partial = Map::new();
        partial.insert("c".to_string(), json!(2));
        store.merge(&p("a/b"), &partial).unwrap();
        assert_eq!(store.snapshot(), json!({"a": {"b": {"c": 2}}}));
    }

    #[test]
    fn test_merge_leaves_sibling_keys_untouched() {
        let store = MemoryStore::with_seed(json!({"r": {"keep": 1, "hit": 2}}));
        let mut partial = Map::new();
        partial.insert("hit".to_string(), json!(99));
        store.merge(&p("r"), &partial).unwrap();
        assert_eq!(store.fetch(&p("r")).unwrap(), json!({"keep": 1, "hit": 99}));
    }

    #[test]
    fn test_remove_missing_node_is_noop() {
        let store = MemoryStore::with_seed(json!({"r": {"x": 1}}));
        store.remove(&p("r/absent")).unwrap();
        store.remove(&p("elsewhere/deep")).unwrap();
        assert_eq!(store.snapshot(), json!({"r": {"x": 1}}));
    }

    #[test]
    fn test_remove_deletes_subtree() {
        let store = MemoryStore::with_seed(json!({"r": {"x": {"y": 1}, "z": 2}}));
        store.remove(&p("r/x")).unwrap();
        assert_eq!(store.snapshot(), json!({"r": {"z": 2}}));
    }

    #[test]
    fn test_replace_with_null_deletes() {
        let store = MemoryStore::with_seed(json!({"r": {"x": 1}}));
        store.replace(&p("r/x"), &Value::Null).unwrap();
        assert_eq!(store.fetch(&p("r")).unwrap(), json!({}));
    }

    #[test]
    fn test_replace_overwrites_whole_node() {
        let store = MemoryStore::with_seed(json!({"r": {"x": {"old": 1}}}));
        store.replace(&p("r/x"), &json!({"new": 2})).unwrap();
        assert_eq!(store.fetch(&p("r/x")).unwrap(), json!({"new": 2}));
    }
}

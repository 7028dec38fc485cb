//! Livetree: live nested mappings over a path-addressed tree store.
//!
//! A remote realtime database keeps state as one big JSON tree addressed by
//! slash-delimited paths. `livetree` lets you work with a node of that tree
//! as an ordinary mapping while keeping the remote side in step:
//!
//! - **Reads are local.** A [`LiveMap`] caches the subtree it was seeded
//!   with; lookups never touch the network.
//! - **Nested values stay live.** Looking up a key whose value is itself an
//!   object returns a child `LiveMap` bound one path segment deeper, so
//!   writes through the child land on the right remote node.
//! - **Writes go remote first.** `set`/`remove` replicate to the store
//!   before mutating the cache; a failed remote call leaves the local view
//!   exactly as it was and surfaces as an `Err` the caller can inspect.
//!
//! The remote side is abstracted behind the [`RemoteStore`] trait
//! (fetch / replace / merge / remove by path). [`MemoryStore`] is the
//! built-in in-process implementation; production backends implement the
//! same trait over their own transport.
//!
//! # Example
//!
//! ```
//! use livetree::{MemoryStore, TreePath, TreeRef};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::with_seed(json!({
//!     "root": {"a": 1, "b": {"c": 2}}
//! })));
//! let root = TreeRef::new(store, TreePath::root("root").unwrap());
//!
//! let map = root.fetch_map().unwrap();
//! let mut child = map.get("b").unwrap().into_map().unwrap();
//! assert_eq!(child.path().unwrap().as_str(), "root/b");
//!
//! // Replicated to the remote node "root/b" before the cache changes.
//! child.set("c", json!(3)).unwrap();
//! ```
//!
//! # Model
//!
//! The store is authoritative; every cache is a best-effort mirror. All
//! calls are synchronous and blocking, with no retries and no timeouts of
//! the core's own; the `RemoteStore` implementation owns that policy.
//! A `LiveMap` is meant for a single caller; share the `RemoteStore`
//! handle, not the container.

pub mod client;
pub mod config;
pub mod error;
pub mod live;
pub mod memory;
pub mod path;
pub mod store;

pub use client::TreeRef;
pub use config::{StoreConfig, open_memory};
pub use error::{LiveTreeError, RemoteError};
pub use live::{LiveMap, LiveValue, UpdateReport};
pub use memory::MemoryStore;
pub use path::TreePath;
pub use store::RemoteStore;

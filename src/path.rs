//! Slash-delimited paths into the remote tree.
//!
//! A `TreePath` identifies one node in the remote hierarchical store
//! (`"root/child/grandchild"`). Child paths are derived by pure
//! concatenation on a fresh value; no path is ever mutated in place, so a
//! failed remote call can never leave a container pointing at the wrong
//! node.

use crate::error::LiveTreeError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Characters the realtime-database key grammar forbids inside a segment.
static INVALID_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/.$#\[\]\x00-\x1f\x7f]"#).unwrap());

/// A validated slash-delimited location in the remote tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreePath(String);

impl TreePath {
    /// Parse a slash-delimited path, validating every segment.
    pub fn new(path: &str) -> Result<Self, LiveTreeError> {
        let mut segments = Vec::new();
        for segment in path.split('/') {
            segments.push(validate_segment(segment)?);
        }
        Ok(TreePath(segments.join("/")))
    }

    /// A single-segment path, typically the tree root for a handle.
    pub fn root(segment: &str) -> Result<Self, LiveTreeError> {
        Ok(TreePath(validate_segment(segment)?.to_string()))
    }

    /// Derive the path of a child node. Returns a new path; `self` is
    /// untouched.
    pub fn child(&self, key: &str) -> Result<Self, LiveTreeError> {
        let key = validate_segment(key)?;
        Ok(TreePath(format!("{}/{}", self.0, key)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn validate_segment(segment: &str) -> Result<&str, LiveTreeError> {
    if segment.is_empty() || INVALID_SEGMENT.is_match(segment) {
        return Err(LiveTreeError::InvalidSegment(segment.to_string()));
    }
    Ok(segment)
}

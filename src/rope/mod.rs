//! Persistent rope over Unicode scalar values.
//!
//! A [`Rope`] is an immutable handle to a binary tree of text chunks. Every edit returns a new rope that shares
//! the untouched subtrees of the one it came from, so keeping old versions around is cheap and reading them
//! from several threads at once is safe.

mod iter;
mod node;

use std::{convert::Infallible, fmt, str::FromStr, sync::Arc};

use tracing::{debug, trace};

use self::node::Node;
use crate::{RopeConfig, RopeError};

pub use self::iter::Chunks;
pub use self::node::NodeView;

#[derive(Clone)]
pub struct Rope {
    root: Arc<Node>,
    chunk_size: usize,
}

impl Rope {
    /// Builds a rope from `text` using the default chunk size.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, &RopeConfig::default())
    }

    pub fn with_config(text: &str, config: &RopeConfig) -> Self {
        let chunk_size = config.chunk_size();
        let root = node::build(text, chunk_size);
        debug!(chars = root.len(), chunk_size, depth = root.depth(), "built rope");

        Self { root, chunk_size }
    }

    pub fn with_chunk_size(text: &str, chunk_size: usize) -> Result<Self, RopeError> {
        let config = RopeConfig::new(chunk_size)?;
        Ok(Self::with_config(text, &config))
    }

    fn with_root(&self, root: Option<Arc<Node>>) -> Self {
        Self { root: root.unwrap_or_else(Node::empty), chunk_size: self.chunk_size }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chars in the rope. Constant time.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn char_at(&self, index: usize) -> Result<char, RopeError> {
        if index >= self.len() {
            return Err(RopeError::OutOfRange { index, len: self.len() });
        }

        self.root.char_at(index).ok_or(RopeError::OutOfRange { index, len: self.len() })
    }

    /// Splits into `[0, index)` and `[index, len)`.
    ///
    /// Never fails: an index past the end behaves like `len`, leaving the right half empty.
    pub fn split(&self, index: usize) -> (Rope, Rope) {
        trace!(index, len = self.len(), "split");
        let (left, right) = node::split(&self.root, index);
        (self.with_root(left), self.with_root(right))
    }

    /// Concatenates `other` after `self`. The result keeps `self`'s chunk size.
    pub fn concat(&self, other: &Rope) -> Rope {
        self.with_root(node::join(Some(Arc::clone(&self.root)), Some(Arc::clone(&other.root))))
    }

    pub fn insert(&self, index: usize, text: &str) -> Result<Rope, RopeError> {
        if index > self.len() {
            return Err(RopeError::OutOfRange { index, len: self.len() });
        }
        trace!(index, chars = text.chars().count(), "insert");

        let (left, right) = node::split(&self.root, index);
        let middle = node::build(text, self.chunk_size);
        Ok(self.with_root(node::join(node::join(left, Some(middle)), right)))
    }

    pub fn delete(&self, start: usize, end: usize) -> Result<Rope, RopeError> {
        self.check_range(start, end)?;
        trace!(start, end, "delete");

        let (left, rest) = node::split(&self.root, start);
        let right = rest.and_then(|rest| node::split(&rest, end - start).1);
        Ok(self.with_root(node::join(left, right)))
    }

    pub fn replace(&self, start: usize, end: usize, text: &str) -> Result<Rope, RopeError> {
        self.delete(start, end)?.insert(start, text)
    }

    /// Returns the chars in `[start, end)` as a new rope without materializing them.
    pub fn slice(&self, start: usize, end: usize) -> Result<Rope, RopeError> {
        self.check_range(start, end)?;

        let (_, rest) = node::split(&self.root, start);
        let middle = rest.and_then(|rest| node::split(&rest, end - start).0);
        Ok(self.with_root(middle))
    }

    pub fn substring(&self, start: usize, end: usize) -> Result<String, RopeError> {
        Ok(self.slice(start, end)?.to_string())
    }

    pub fn substring_from(&self, start: usize) -> Result<String, RopeError> {
        self.substring(start, self.len())
    }

    pub fn append(&self, text: &str) -> Rope {
        self.with_root(node::join(Some(Arc::clone(&self.root)), Some(node::build(text, self.chunk_size))))
    }

    pub fn prepend(&self, text: &str) -> Rope {
        self.with_root(node::join(Some(node::build(text, self.chunk_size)), Some(Arc::clone(&self.root))))
    }

    /// Rebuilds a depth-balanced tree with the same content and chunk size.
    ///
    /// Edits never rebalance on their own, so a rope that has seen many edits at one spot can degrade
    /// towards a list. Call this when [`Rope::is_balanced`] starts returning `false`.
    pub fn rebalance(&self) -> Rope {
        debug!(chars = self.len(), depth = self.depth(), "rebalancing rope");
        Self { root: node::build(&self.to_string(), self.chunk_size), chunk_size: self.chunk_size }
    }

    pub fn is_balanced(&self) -> bool {
        self.depth() <= node::balanced_depth(self.len(), self.chunk_size)
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.root)
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chunks().flat_map(str::chars)
    }

    /// Visits every node in pre-order along with its depth below the root.
    pub fn walk<'a, F>(&'a self, mut visitor: F)
    where
        F: FnMut(usize, NodeView<'a>),
    {
        self.root.walk(&mut visitor);
    }

    /// Recounts every subtree and verifies the cached weights and lengths.
    pub fn check_invariants(&self) -> Result<(), RopeError> {
        self.root.check().map(|_| ())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), RopeError> {
        if start > end {
            return Err(RopeError::InvalidRange { start, end });
        }
        if end > self.len() {
            return Err(RopeError::OutOfRange { index: end, len: self.len() });
        }

        Ok(())
    }
}

impl Default for Rope {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for Rope {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Rope {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl FromStr for Rope {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(text))
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rope")
            .field("len", &self.len())
            .field("depth", &self.depth())
            .field("chunk_size", &self.chunk_size)
            .field("text", &self.to_string())
            .finish()
    }
}

impl PartialEq for Rope {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root) || (self.len() == other.len() && self.chars().eq(other.chars()))
    }
}

impl Eq for Rope {}

impl PartialEq<str> for Rope {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<&str> for Rope {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Rope {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

use std::{
    mem,
    sync::{Arc, OnceLock},
};

use crate::RopeError;

/// A rope node. Nodes are never mutated once built; every edit allocates new nodes and shares the untouched
/// subtrees of the old tree through `Arc`.
pub(crate) enum Node {
    Leaf {
        text: String,
        len: usize,
    },
    Internal {
        left: Arc<Node>,
        right: Arc<Node>,
        weight: usize,
        len: usize,
    },
}

/// Read-only view of a node handed out by [`Rope::walk`](crate::Rope::walk).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeView<'a> {
    Leaf(&'a str),
    Internal { weight: usize, len: usize },
}

impl Node {
    pub(crate) fn len(&self) -> usize {
        match self {
            Node::Leaf { len, .. } | Node::Internal { len, .. } => *len,
        }
    }

    pub(crate) fn empty() -> Arc<Self> {
        Arc::new(Node::Leaf { text: String::new(), len: 0 })
    }

    fn new_leaf(text: &str, len: usize) -> Arc<Self> {
        Arc::new(Node::Leaf { text: text.to_string(), len })
    }

    fn new_internal(left: Arc<Self>, right: Arc<Self>) -> Arc<Self> {
        let weight = left.len();
        let len = weight + right.len();
        Arc::new(Node::Internal { left, right, weight, len })
    }

    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        let mut node = self;
        let mut index = index;

        loop {
            match node {
                Node::Leaf { text, .. } => return text.chars().nth(index),
                Node::Internal { left, right, weight, .. } => {
                    if index < *weight {
                        node = left.as_ref();
                    } else {
                        index -= weight;
                        node = right.as_ref();
                    }
                }
            }
        }
    }

    pub(crate) fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Node::Internal { left, right, .. } = node {
                stack.push((right.as_ref(), depth + 1));
                stack.push((left.as_ref(), depth + 1));
            }
        }

        deepest
    }

    pub(crate) fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }

        count
    }

    pub(crate) fn walk<'a, F>(&'a self, visitor: &mut F)
    where
        F: FnMut(usize, NodeView<'a>),
    {
        let mut stack = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { text, .. } => visitor(depth, NodeView::Leaf(text.as_str())),
                Node::Internal { left, right, weight, len } => {
                    visitor(depth, NodeView::Internal { weight: *weight, len: *len });
                    stack.push((right.as_ref(), depth + 1));
                    stack.push((left.as_ref(), depth + 1));
                }
            }
        }
    }

    /// Verifies every cached length against the node's children and every leaf against its text, returning
    /// the subtree length. Checking each node locally is enough since leaves anchor the counts.
    pub(crate) fn check(&self) -> Result<usize, RopeError> {
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { text, len } => {
                    let actual = text.chars().count();
                    if actual != *len {
                        return Err(RopeError::MalformedNode { cached: *len, actual });
                    }
                }
                Node::Internal { left, right, weight, len } => {
                    if left.len() != *weight {
                        return Err(RopeError::MalformedNode { cached: *weight, actual: left.len() });
                    }
                    if weight + right.len() != *len {
                        return Err(RopeError::MalformedNode { cached: *len, actual: weight + right.len() });
                    }
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }

        Ok(self.len())
    }
}

// Edits never rebalance, so a tree can be as deep as the number of edits made to it. Dropping it with the
// default recursive glue would use one stack frame per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        take_internal_children(self, &mut stack);

        while let Some(node) = stack.pop() {
            if let Some(mut node) = Arc::into_inner(node) {
                take_internal_children(&mut node, &mut stack);
            }
        }
    }
}

fn take_internal_children(node: &mut Node, stack: &mut Vec<Arc<Node>>) {
    if let Node::Internal { left, right, .. } = node {
        for child in [left, right] {
            if matches!(child.as_ref(), Node::Internal { .. }) {
                stack.push(mem::replace(child, placeholder()));
            }
        }
    }
}

fn placeholder() -> Arc<Node> {
    static EMPTY: OnceLock<Arc<Node>> = OnceLock::new();
    Arc::clone(EMPTY.get_or_init(|| Arc::new(Node::Leaf { text: String::new(), len: 0 })))
}

/// Builds a depth-balanced tree by halving `text` until every piece fits in `chunk_size` chars.
///
/// `chunk_size` must be at least 1, otherwise single chars would be halved forever.
pub(crate) fn build(text: &str, chunk_size: usize) -> Arc<Node> {
    debug_assert!(chunk_size > 0);
    build_counted(text, text.chars().count(), chunk_size)
}

fn build_counted(text: &str, len: usize, chunk_size: usize) -> Arc<Node> {
    if len <= chunk_size {
        return Node::new_leaf(text, len);
    }

    let mid = len / 2;
    let (left, right) = text.split_at(byte_offset(text, mid));
    Node::new_internal(build_counted(left, mid, chunk_size), build_counted(right, len - mid, chunk_size))
}

/// Depth of the tree `build` produces for `len` chars.
pub(crate) fn balanced_depth(len: usize, chunk_size: usize) -> usize {
    if len <= chunk_size {
        0
    } else {
        1 + balanced_depth(len - len / 2, chunk_size)
    }
}

/// Joins two optional subtrees, dropping empty ones so no Internal node ever holds an empty leaf.
pub(crate) fn join(left: Option<Arc<Node>>, right: Option<Arc<Node>>) -> Option<Arc<Node>> {
    match (non_empty(left), non_empty(right)) {
        (Some(left), Some(right)) => Some(Node::new_internal(left, right)),
        (left, None) => left,
        (None, right) => right,
    }
}

fn non_empty(node: Option<Arc<Node>>) -> Option<Arc<Node>> {
    node.filter(|node| node.len() > 0)
}

enum Step<'a> {
    /// Went left; the right sibling belongs after whatever is split off.
    Left(&'a Arc<Node>),
    /// Went right; the left sibling belongs before whatever is split off.
    Right(&'a Arc<Node>),
}

/// Splits `node` into `[0, index)` and `[index, len)`. Out of range indices clamp to the ends.
///
/// Walks down to the leaf holding `index`, then rejoins the siblings it passed on the way back up, so the
/// stack use stays flat however deep the tree is.
pub(crate) fn split(node: &Arc<Node>, index: usize) -> (Option<Arc<Node>>, Option<Arc<Node>>) {
    let mut path = Vec::new();
    let mut node = node;
    let mut index = index;

    let (mut left, mut right) = loop {
        match node.as_ref() {
            Node::Leaf { text, len } => {
                break if index == 0 {
                    (None, Some(Arc::clone(node)))
                } else if index >= *len {
                    (Some(Arc::clone(node)), None)
                } else {
                    let (left, right) = text.split_at(byte_offset(text, index));
                    (Some(Node::new_leaf(left, index)), Some(Node::new_leaf(right, len - index)))
                };
            }
            Node::Internal { left, right, weight, .. } => {
                if index < *weight {
                    path.push(Step::Left(right));
                    node = left;
                } else {
                    path.push(Step::Right(left));
                    index -= weight;
                    node = right;
                }
            }
        }
    };

    for step in path.into_iter().rev() {
        match step {
            Step::Left(sibling) => right = join(right, Some(Arc::clone(sibling))),
            Step::Right(sibling) => left = join(Some(Arc::clone(sibling)), left),
        }
    }

    (left, right)
}

fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(offset, _)| offset)
}

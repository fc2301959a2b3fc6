use std::iter::FusedIterator;

use super::node::Node;

/// In-order iterator over the text chunks stored in a rope's leaves.
pub struct Chunks<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf { text, .. } if text.is_empty() => continue,
                Node::Leaf { text, .. } => return Some(text.as_str()),
                Node::Internal { left, right, .. } => {
                    self.stack.push(right.as_ref());
                    self.stack.push(left.as_ref());
                }
            }
        }

        None
    }
}

impl FusedIterator for Chunks<'_> {}

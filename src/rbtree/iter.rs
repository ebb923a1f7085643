use smallvec::SmallVec;
use std::iter::FusedIterator;

use super::{NodeId, OrderedKeySet, NIL};

/// In-order iterator over the keys of an [`OrderedKeySet`].
///
/// Keeps the pending ancestors on an explicit stack, so it needs `O(height)` extra space and
/// no parent links.
pub struct Iter<'a> {
    set: &'a OrderedKeySet,
    stack: SmallVec<[NodeId; 32]>,
}

impl<'a> Iter<'a> {
    fn new(set: &'a OrderedKeySet) -> Self {
        let mut iter = Self {
            set,
            stack: SmallVec::new(),
        };
        iter.descend_left(set.root);
        iter
    }

    fn descend_left(&mut self, mut id: NodeId) {
        while id != NIL {
            self.stack.push(id);
            id = self.set.nodes[id].left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let set = self.set;
        while let Some(id) = self.stack.pop() {
            let node = &set.nodes[id];
            self.descend_left(node.right);
            // The empty key marks the sentinel and never reaches the caller.
            if !node.key.is_empty() {
                return Some(node.key.as_str());
            }
        }
        None
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a OrderedKeySet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl OrderedKeySet {
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Collects every stored key in ascending order.
    pub fn sorted_keys(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

use std::{error::Error, fmt};

use super::{Color, NodeId, OrderedKeySet, NIL};

/// A broken structural rule found by [`OrderedKeySet::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    RedSentinel,
    RedRoot,
    /// A child does not point back at the node holding it.
    BrokenParentLink { key: String },
    /// A key is greater than an ancestor holding it on the left, or less than one holding it
    /// on the right. Equal keys may sit on either side, rotations move duplicates both ways.
    OutOfOrder { key: String },
    /// A red node has a red child.
    RedRedEdge { key: String },
    /// The two subtrees of a node contain different numbers of black nodes on their paths.
    BlackHeightMismatch { key: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedSentinel => write!(f, "sentinel leaf is red"),
            Self::RedRoot => write!(f, "root is red"),
            Self::BrokenParentLink { key } => write!(f, "parent link of {key:?} is broken"),
            Self::OutOfOrder { key } => write!(f, "{key:?} is out of order"),
            Self::RedRedEdge { key } => write!(f, "red node {key:?} has a red child"),
            Self::BlackHeightMismatch { key } => {
                write!(f, "subtrees of {key:?} differ in black height")
            }
        }
    }
}

impl Error for Violation {}

impl OrderedKeySet {
    /// Checks every red-black and search-tree rule and returns the black height of the root:
    /// the number of black nodes from below the root down to a sentinel, sentinel included.
    pub fn validate(&self) -> Result<usize, Violation> {
        if self.nodes[NIL].color != Color::Black {
            return Err(Violation::RedSentinel);
        }
        if self.root == NIL {
            return Ok(0);
        }
        if self.color(self.root) != Color::Black {
            return Err(Violation::RedRoot);
        }
        if self.parent(self.root) != NIL {
            return Err(self.violation(self.root, |key| Violation::BrokenParentLink { key }));
        }
        Ok(self.black_path(self.root, None, None)? - 1)
    }

    /// Black nodes from `id` down to a sentinel, both ends included. Keys of the subtree must
    /// lie in `lower..=upper`.
    fn black_path(
        &self,
        id: NodeId,
        lower: Option<&str>,
        upper: Option<&str>,
    ) -> Result<usize, Violation> {
        if id == NIL {
            return Ok(1);
        }
        let node = &self.nodes[id];
        let key = node.key.as_str();
        if lower.is_some_and(|lower| key < lower) || upper.is_some_and(|upper| key > upper) {
            return Err(self.violation(id, |key| Violation::OutOfOrder { key }));
        }

        for child in [node.left, node.right] {
            if child == NIL {
                continue;
            }
            if self.parent(child) != id {
                return Err(self.violation(child, |key| Violation::BrokenParentLink { key }));
            }
            if node.color == Color::Red && self.color(child) == Color::Red {
                return Err(self.violation(id, |key| Violation::RedRedEdge { key }));
            }
        }

        let left = self.black_path(node.left, lower, Some(key))?;
        let right = self.black_path(node.right, Some(key), upper)?;
        if left != right {
            return Err(self.violation(id, |key| Violation::BlackHeightMismatch { key }));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }

    fn violation(&self, id: NodeId, make: impl FnOnce(String) -> Violation) -> Violation {
        make(self.nodes[id].key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::Node;

    #[test]
    fn accepts_balanced_trees() {
        let mut set = OrderedKeySet::new();
        assert_eq!(set.validate(), Ok(0));
        set.insert("Z").unwrap();
        assert_eq!(set.validate(), Ok(1));
        for key in ["M", "F", "T", "B", "H", "S", "W"] {
            set.insert(key).unwrap();
        }
        assert!(set.validate().is_ok());
    }

    #[test]
    fn accepts_duplicates_on_both_sides() {
        let mut set = OrderedKeySet::new();
        for key in ["b", "b", "b", "a", "c", "b"] {
            set.insert(key).unwrap();
            assert!(set.validate().is_ok(), "{:?}", set);
        }
        let root = &set.nodes[set.root];
        assert_eq!(root.key, "b");
        assert_eq!(set.nodes[root.left].key, "b");
    }

    #[test]
    fn reports_red_root() {
        let mut set = OrderedKeySet::new();
        set.insert("a").unwrap();
        let root = set.root;
        set.paint(root, Color::Red);
        assert_eq!(set.validate(), Err(Violation::RedRoot));
    }

    #[test]
    fn reports_double_red() {
        let mut set = OrderedKeySet::new();
        for key in ["b", "a", "c"] {
            set.insert(key).unwrap();
        }
        let left = set.nodes[set.root].left;
        let id = set.nodes.len();
        set.nodes.push(Node::new_with_parent("0".to_owned(), left));
        set.nodes[left].left = id;
        assert_eq!(
            set.validate(),
            Err(Violation::RedRedEdge {
                key: "a".to_owned()
            })
        );
    }

    #[test]
    fn reports_black_height_mismatch() {
        let mut set = OrderedKeySet::new();
        for key in ["b", "a", "c"] {
            set.insert(key).unwrap();
        }
        let left = set.nodes[set.root].left;
        set.paint(left, Color::Black);
        assert_eq!(
            set.validate(),
            Err(Violation::BlackHeightMismatch {
                key: "b".to_owned()
            })
        );
    }

    #[test]
    fn reports_out_of_order_key() {
        let mut set = OrderedKeySet::new();
        for key in ["b", "a", "c"] {
            set.insert(key).unwrap();
        }
        let left = set.nodes[set.root].left;
        set.nodes[left].key = "d".to_owned();
        assert_eq!(
            set.validate(),
            Err(Violation::OutOfOrder {
                key: "d".to_owned()
            })
        );
    }
}

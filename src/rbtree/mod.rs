use log::{debug, trace};
use smallvec::SmallVec;
use std::{cmp::Ordering, fmt::Debug};

use crate::error::InvalidKeyError;

mod check;
mod iter;

pub use check::Violation;
pub use iter::Iter;

type NodeId = usize;

/// Sentinel slot. Every leaf link and the parent link of the root point here.
const NIL: NodeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// A red-black tree of string keys. Equal keys are kept as separate nodes.
pub struct OrderedKeySet {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Debug for OrderedKeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}", self.view(self.root)))
    }
}

struct Node {
    key: String,
    color: Color,
    left: NodeId,
    right: NodeId,
    parent: NodeId,
}

impl Node {
    fn sentinel() -> Self {
        Self {
            key: String::new(),
            color: Color::Black,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    fn new_with_parent(key: String, parent: NodeId) -> Self {
        Self {
            key,
            color: Color::Red,
            left: NIL,
            right: NIL,
            parent,
        }
    }
}

struct NodeView<'a> {
    set: &'a OrderedKeySet,
    id: NodeId,
}

impl Debug for NodeView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = &self.set.nodes[self.id];
        f.debug_struct("Node")
            .field("key", &node.key)
            .field("color", &node.color)
            .field("left", &self.set.view(node.left))
            .field("right", &self.set.view(node.right))
            .finish()
    }
}

impl Default for OrderedKeySet {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedKeySet {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            root: NIL,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// The empty string is reserved for the sentinel and is rejected.
    pub fn insert(&mut self, key: impl Into<String>) -> Result<(), InvalidKeyError> {
        let key = key.into();
        if key.is_empty() {
            return Err(InvalidKeyError);
        }

        let mut parent = NIL;
        let mut cursor = self.root;
        let mut goes_left = false;
        while cursor != NIL {
            parent = cursor;
            goes_left = key.cmp(&self.nodes[cursor].key) == Ordering::Less;
            cursor = if goes_left {
                self.nodes[cursor].left
            } else {
                self.nodes[cursor].right
            };
        }

        let id = self.nodes.len();
        debug!("inserting {key:?} as node {id} below node {parent}");
        self.nodes.push(Node::new_with_parent(key, parent));
        if parent == NIL {
            self.root = id;
        } else if goes_left {
            self.nodes[parent].left = id;
        } else {
            self.nodes[parent].right = id;
        }

        self.fix_insert(id);
        Ok(())
    }

    pub fn contains(&self, needle: &str) -> bool {
        let mut cursor = self.root;
        while cursor != NIL {
            let node = &self.nodes[cursor];
            cursor = match needle.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return true,
                Ordering::Greater => node.right,
            };
        }
        false
    }

    pub fn first(&self) -> Option<&str> {
        if self.root == NIL {
            return None;
        }
        let mut cursor = self.root;
        while self.nodes[cursor].left != NIL {
            cursor = self.nodes[cursor].left;
        }
        Some(self.nodes[cursor].key.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        if self.root == NIL {
            return None;
        }
        let mut cursor = self.root;
        while self.nodes[cursor].right != NIL {
            cursor = self.nodes[cursor].right;
        }
        Some(self.nodes[cursor].key.as_str())
    }

    pub fn height(&self) -> usize {
        let mut stack: SmallVec<[(NodeId, usize); 32]> = SmallVec::new();
        let mut height = 0;
        if self.root != NIL {
            stack.push((self.root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    fn view(&self, id: NodeId) -> Option<NodeView<'_>> {
        (id != NIL).then_some(NodeView { set: self, id })
    }

    fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id].parent
    }

    fn color(&self, id: NodeId) -> Color {
        self.nodes[id].color
    }

    fn paint(&mut self, id: NodeId, color: Color) {
        debug_assert!(id != NIL, "the sentinel stays black");
        self.nodes[id].color = color;
    }

    // A red parent is never the root, so the grandparent always exists.
    fn fix_insert(&mut self, mut k: NodeId) {
        while self.color(self.parent(k)) == Color::Red {
            let parent = self.parent(k);
            let grandparent = self.parent(parent);

            if parent == self.nodes[grandparent].right {
                let uncle = self.nodes[grandparent].left;
                if self.color(uncle) == Color::Red {
                    trace!("node {k}: red uncle {uncle}, recoloring");
                    self.paint(uncle, Color::Black);
                    self.paint(parent, Color::Black);
                    self.paint(grandparent, Color::Red);
                    k = grandparent;
                } else {
                    if k == self.nodes[parent].left {
                        trace!("node {k}: bent right-left line");
                        k = parent;
                        self.rotate_right(k);
                    }
                    let parent = self.parent(k);
                    let grandparent = self.parent(parent);
                    trace!("node {k}: straight right-right line");
                    self.paint(parent, Color::Black);
                    self.paint(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            } else {
                let uncle = self.nodes[grandparent].right;
                if self.color(uncle) == Color::Red {
                    trace!("node {k}: red uncle {uncle}, recoloring");
                    self.paint(uncle, Color::Black);
                    self.paint(parent, Color::Black);
                    self.paint(grandparent, Color::Red);
                    k = grandparent;
                } else {
                    if k == self.nodes[parent].right {
                        trace!("node {k}: bent left-right line");
                        k = parent;
                        self.rotate_left(k);
                    }
                    let parent = self.parent(k);
                    let grandparent = self.parent(parent);
                    trace!("node {k}: straight left-left line");
                    self.paint(parent, Color::Black);
                    self.paint(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            }
        }
        let root = self.root;
        self.paint(root, Color::Black);
    }

    fn rotate_left(&mut self, x: NodeId) {
        let y = self.nodes[x].right;
        debug_assert!(y != NIL, "rotate_left needs a right child");
        trace!("rotating node {x} left");

        let inner = self.nodes[y].left;
        self.nodes[x].right = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }

        let up = self.nodes[x].parent;
        self.nodes[y].parent = up;
        if up == NIL {
            self.root = y;
        } else if x == self.nodes[up].left {
            self.nodes[up].left = y;
        } else {
            self.nodes[up].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, x: NodeId) {
        let y = self.nodes[x].left;
        debug_assert!(y != NIL, "rotate_right needs a left child");
        trace!("rotating node {x} right");

        let inner = self.nodes[y].right;
        self.nodes[x].left = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }

        let up = self.nodes[x].parent;
        self.nodes[y].parent = up;
        if up == NIL {
            self.root = y;
        } else if x == self.nodes[up].right {
            self.nodes[up].right = y;
        } else {
            self.nodes[up].left = y;
        }

        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }
}

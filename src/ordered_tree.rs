use crate::config::TreeConfig;
use crate::tree::TreeOps;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

/// Unbalanced binary search tree. Its shape is fixed by insertion order, or
/// by [`OrderedTree::rebuild_from_sorted`].
///
/// Nodes own their children and keep no link back to their parent, so the
/// relational queries (`get_parent`, `get_sibling`) walk down from the root
/// on every call.
pub struct OrderedTree<T: Ord> {
    pub(crate) root: Link<T>,
    pub(crate) len: usize,
    pub(crate) config: TreeConfig,
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T: Ord> OrderedTree<T> {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        OrderedTree {
            root: None,
            len: 0,
            config,
        }
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Releases every node, children before their parent.
    pub fn clear(&mut self) {
        if self.len > 0 {
            debug!(released = self.len, "clearing tree");
        }
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(node) = stack.last_mut() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            } else if let Some(right) = node.right.take() {
                stack.push(right);
            } else {
                stack.pop();
            }
        }
        self.len = 0;
    }

    /// Inserts `value` at a leaf position. Returns `false`, dropping
    /// `value`, if an equal record is already stored.
    pub fn insert(&mut self, value: T) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    trace!(len = self.len, "rejected duplicate record");
                    return false;
                }
            };
        }
        *link = Some(Box::new(Node::new(value)));
        self.len += 1;
        true
    }

    pub fn retrieve(&self, key: &T) -> Option<&T> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.value) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Like [`retrieve`](Self::retrieve), but hands out the stored record
    /// for in-place updates. Changing how the record orders against its
    /// neighbours breaks the search invariant.
    pub fn retrieve_mut(&mut self, key: &T) -> Option<&mut T> {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match key.cmp(&node.value) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    pub fn contains(&self, key: &T) -> bool {
        self.retrieve(key).is_some()
    }

    /// Returns a copy of the record sharing a parent with `key`.
    ///
    /// The root and only children have no sibling. The search visits both
    /// children of a node before descending, left subtree first.
    pub fn get_sibling(&self, key: &T) -> Option<T>
    where
        T: Clone,
    {
        let root = self.root.as_deref()?;
        if root.holds(key) {
            return None;
        }
        root.sibling_of(key).cloned()
    }

    /// Returns a copy of the record whose node has `key` as a direct child.
    pub fn get_parent(&self, key: &T) -> Option<T>
    where
        T: Clone,
    {
        let root = self.root.as_deref()?;
        if root.holds(key) {
            return None;
        }
        root.parent_of(key).cloned()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|node| (node, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        height
    }

    pub fn iter<'a>(&'a self) -> Iter<'a, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }
}

impl<T: Ord> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    fn holds(&self, key: &T) -> bool {
        self.value.cmp(key) == Ordering::Equal
    }

    // Pre-order walk, left subtree before right. A matching only child
    // ends its own branch without a result.
    fn sibling_of<'a>(&'a self, key: &T) -> Option<&'a T> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match (node.left.as_deref(), node.right.as_deref()) {
                (None, None) => {}
                (None, Some(only)) | (Some(only), None) => {
                    if !only.holds(key) {
                        stack.push(only);
                    }
                }
                (Some(left), Some(right)) => {
                    if left.holds(key) {
                        return Some(&right.value);
                    }
                    if right.holds(key) {
                        return Some(&left.value);
                    }
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        None
    }

    fn parent_of<'a>(&'a self, key: &T) -> Option<&'a T> {
        let is_child = |child: &Link<T>| child.as_deref().is_some_and(|node| node.holds(key));
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if is_child(&node.left) || is_child(&node.right) {
                return Some(&node.value);
            }
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        None
    }
}

impl<T: Ord> TreeOps<T> for OrderedTree<T> {
    fn insert(&mut self, value: T) -> bool {
        OrderedTree::insert(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        OrderedTree::contains(self, value)
    }

    fn len(&self) -> usize {
        OrderedTree::len(self)
    }

    fn is_empty(&self) -> bool {
        OrderedTree::is_empty(self)
    }

    fn clear(&mut self) {
        OrderedTree::clear(self)
    }
}

impl<T: Ord> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Deep copy: every node and record is duplicated, root first, then the
/// left subtree, then the right subtree.
impl<T: Ord + Clone> Clone for OrderedTree<T> {
    fn clone(&self) -> Self {
        // built in place so a panicking clone drops the partial copy through
        // the tree's own teardown
        let mut copy = OrderedTree::with_config(self.config);
        copy_into(&mut copy.root, &self.root);
        copy.len = self.len;
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.config = source.config;
        copy_into(&mut self.root, &source.root);
        self.len = source.len;
    }
}

fn copy_into<T: Clone>(target: &mut Link<T>, source: &Link<T>) {
    let mut stack: Vec<(&Node<T>, &mut Link<T>)> = Vec::new();
    if let Some(node) = source.as_deref() {
        stack.push((node, target));
    }
    while let Some((node, slot)) = stack.pop() {
        let copy = slot.insert(Box::new(Node {
            value: node.value.clone(),
            left: None,
            right: None,
        }));
        let Node { left, right, .. } = &mut **copy;
        if let Some(source_right) = node.right.as_deref() {
            stack.push((source_right, right));
        }
        if let Some(source_left) = node.left.as_deref() {
            stack.push((source_left, left));
        }
    }
}

/// Structural equality: same shape and equal records at every position.
impl<T: Ord> PartialEq for OrderedTree<T> {
    fn eq(&self, other: &Self) -> bool {
        links_equal(&self.root, &other.root)
    }
}

impl<T: Ord> Eq for OrderedTree<T> {}

fn links_equal<T: Ord>(a: &Link<T>, b: &Link<T>) -> bool {
    let mut stack = vec![(a, b)];
    while let Some((a, b)) = stack.pop() {
        match (a.as_deref(), b.as_deref()) {
            (None, None) => {}
            (Some(a), Some(b)) => {
                if a.value != b.value {
                    return false;
                }
                stack.push((&a.right, &b.right));
                stack.push((&a.left, &b.left));
            }
            _ => return false,
        }
    }
    true
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = OrderedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> IntoIterator for OrderedTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        self.len = 0;
        IntoIter::new(self.root.take())
    }
}

impl<'a, T: Ord> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.value)
    }
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { value, right, .. } = *node;
        self.push_left(right);
        Some(value)
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // drain one node at a time so long right spines never drop recursively
        for _ in self.by_ref() {}
    }
}

impl<T: fmt::Debug + Ord> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("OrderedTree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

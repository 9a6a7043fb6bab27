use std::{
    cmp::Ordering,
    mem,
    ops::{Deref, DerefMut},
};

use crate::container::{Container, Key};
use crate::error::{Error, Result};

/// Llrb manage a keyed set using [left-leaning-red-black][llrb] tree.
/// It is the red-black contender among the bundled containers.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct Llrb {
    name: String,
    root: Option<Box<Node>>,
    n_count: usize, // number of entries in the tree.
}

/// Different ways to construct a new Llrb instance.
impl Llrb {
    /// Create an empty instance of Llrb, identified by `name`.
    pub fn new<S>(name: S) -> Llrb
    where
        S: AsRef<str>,
    {
        Llrb {
            name: name.as_ref().to_string(),
            root: Default::default(),
            n_count: Default::default(),
        }
    }

    /// Create a new instance of Llrb tree and load it with keys from
    /// `iter`. Keys must be ``unique``.
    pub fn load_from<S, I>(name: S, iter: I) -> Result<Llrb>
    where
        S: AsRef<str>,
        I: Iterator<Item = Key>,
    {
        let mut llrb = Llrb::new(name);
        for key in iter {
            llrb.create(key)?;
        }
        Ok(llrb)
    }
}

/// Maintenance API.
impl Llrb {
    /// Identify this instance.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node>())
    }

    /// Validate LLRB tree with following rules:
    ///
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    ///
    /// Additionally return full statistics on the tree.
    pub fn validate(&self) -> Result<Stats> {
        let root = self.root.as_ref().map(Deref::deref);
        let red = is_red(root);
        let mut stats = Stats::new(self.n_count, mem::size_of::<Node>());
        let blacks = Llrb::validate_tree(root, red, 0, 0, &mut stats)?;
        stats.blacks = Some(blacks);
        Ok(stats)
    }
}

type Delete = (Option<Box<Node>>, bool);

type Delmin = (Option<Box<Node>>, Option<Key>);

/// Write operations on Llrb instance.
impl Llrb {
    /// Add a new key to the index. If key is already present return
    /// error, the tree is left unchanged.
    pub fn create(&mut self, key: Key) -> Result<()> {
        let (mut root, created) = Llrb::insert_key(self.root.take(), key);
        root.set_black();
        self.root = Some(root);
        if created {
            self.n_count += 1;
            Ok(())
        } else {
            Err(Error::DuplicateInsert(key))
        }
    }

    /// Remove key from this instance. Return false if key was not
    /// present, in which case delete is effectively a no-op.
    pub fn delete(&mut self, key: &Key) -> bool {
        let (root, deleted) = match Llrb::do_delete(self.root.take(), key) {
            (None, deleted) => (None, deleted),
            (Some(mut root), deleted) => {
                root.set_black();
                (Some(root), deleted)
            }
        };
        self.root = root;
        if deleted {
            self.n_count -= 1;
        }
        deleted
    }
}

/// Read operations on Llrb instance.
impl Llrb {
    /// Check whether key is present.
    pub fn contains(&self, key: &Key) -> bool {
        let mut node = self.root.as_ref().map(Deref::deref);
        while let Some(nref) = node {
            node = match nref.key.cmp(key) {
                Ordering::Less => nref.right_deref(),
                Ordering::Greater => nref.left_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Return all keys in sort order.
    pub fn keys(&self) -> Vec<Key> {
        let mut acc = Vec::with_capacity(self.n_count);
        let mut stack: Vec<&Node> = vec![];
        let mut node = self.root.as_ref().map(Deref::deref);
        loop {
            while let Some(nref) = node {
                stack.push(nref);
                node = nref.left_deref();
            }
            match stack.pop() {
                Some(nref) => {
                    acc.push(nref.key);
                    node = nref.right_deref();
                }
                None => break acc,
            }
        }
    }
}

impl Llrb {
    fn insert_key(node: Option<Box<Node>>, key: Key) -> (Box<Node>, bool) {
        let mut node = match node {
            None => return (Node::new(key, false /*black*/), true),
            Some(node) => node,
        };

        match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, created) = Llrb::insert_key(node.left.take(), key);
                node.left = Some(left);
                (Llrb::walkuprot_23(node), created)
            }
            Ordering::Less => {
                let (right, created) = Llrb::insert_key(node.right.take(), key);
                node.right = Some(right);
                (Llrb::walkuprot_23(node), created)
            }
            Ordering::Equal => (Llrb::walkuprot_23(node), false),
        }
    }

    fn do_delete(node: Option<Box<Node>>, key: &Key) -> Delete {
        let mut node = match node {
            None => return (None, false),
            Some(node) => node,
        };

        if node.key.gt(key) {
            if node.left.is_none() {
                return (Some(node), false);
            }
            let ok = !is_red(node.left_deref());
            if ok && !is_red(node.left_deref().and_then(Node::left_deref)) {
                node = Llrb::move_red_left(node);
            }
            let (left, deleted) = Llrb::do_delete(node.left.take(), key);
            node.left = left;
            (Some(Llrb::fixup(node)), deleted)
        } else {
            if is_red(node.left_deref()) {
                node = Llrb::rotate_right(node);
            }

            if !node.key.lt(key) && node.right.is_none() {
                return (None, true);
            }

            let ok = node.right.is_some() && !is_red(node.right_deref());
            if ok && !is_red(node.right_deref().and_then(Node::left_deref)) {
                node = Llrb::move_red_right(node);
            }

            if !node.key.lt(key) {
                // node == key, replace it with its successor.
                let (right, successor) = Llrb::delete_min(node.right.take());
                node.right = right;
                match successor {
                    Some(successor) => node.key = successor,
                    None => panic!("do_delete(): fatal logic, call the programmer"),
                }
                (Some(Llrb::fixup(node)), true)
            } else {
                let (right, deleted) = Llrb::do_delete(node.right.take(), key);
                node.right = right;
                (Some(Llrb::fixup(node)), deleted)
            }
        }
    }

    fn delete_min(node: Option<Box<Node>>) -> Delmin {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };
        if node.left.is_none() {
            return (None, Some(node.key));
        }
        let left = node.left_deref();
        if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
            node = Llrb::move_red_left(node);
        }
        let (left, min_key) = Llrb::delete_min(node.left.take());
        node.left = left;
        (Some(Llrb::fixup(node)), min_key)
    }

    fn validate_tree(
        node: Option<&Node>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize> {
        let node = match node {
            None => {
                stats.sample_depth(depth);
                return Ok(nb);
            }
            Some(node) => node,
        };

        let red = !node.is_black();
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if !red {
            nb += 1;
        }
        let (left, right) = (node.left_deref(), node.right_deref());
        let lblacks = Llrb::validate_tree(left, red, nb, depth + 1, stats)?;
        let rblacks = Llrb::validate_tree(right, red, nb, depth + 1, stats)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        if let Some(left) = left {
            if left.key.ge(&node.key) {
                return Err(Error::SortError(left.key, node.key));
            }
        }
        if let Some(right) = right {
            if right.key.le(&node.key) {
                return Err(Error::SortError(right.key, node.key));
            }
        }
        Ok(lblacks)
    }

    //--------- rotation routines for 2-3 algorithm ----------------

    fn walkuprot_23(mut node: Box<Node>) -> Box<Node> {
        if is_red(node.right_deref()) && !is_red(node.left_deref()) {
            node = Llrb::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut())
        }
        node
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    (r)                 (r)  \
    //            /       \                 /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(mut node: Box<Node>) -> Box<Node> {
        let mut x = match node.right.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotateleft(): rotating a black link ? Call the programmer"),
        };
        node.right = x.left.take();
        x.black = node.black;
        node.set_red();
        x.left = Some(node);
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //            (r)   \                   (r)  \
    //           /       \                 /      \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(mut node: Box<Node>) -> Box<Node> {
        let mut x = match node.left.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotateright(): rotating a black link ? Call the programmer"),
        };
        node.left = x.right.take();
        x.black = node.black;
        node.set_red();
        x.right = Some(node);
        x
    }

    //        (x)                   (!x)
    //         |                     |
    //        node                  node
    //        / \                   / \
    //      (y) (z)              (!y) (!z)
    //     /      \              /      \
    //   left    right         left    right
    //
    fn flip(node: &mut Node) {
        if let Some(left) = node.left.as_mut() {
            left.toggle_link();
        }
        if let Some(right) = node.right.as_mut() {
            right.toggle_link();
        }
        node.toggle_link();
    }

    fn fixup(mut node: Box<Node>) -> Box<Node> {
        if is_red(node.right_deref()) {
            node = Llrb::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut());
        }
        node
    }

    fn move_red_left(mut node: Box<Node>) -> Box<Node> {
        Llrb::flip(node.deref_mut());
        if is_red(node.right_deref().and_then(Node::left_deref)) {
            node.right = node.right.take().map(Llrb::rotate_right);
            node = Llrb::rotate_left(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }

    fn move_red_right(mut node: Box<Node>) -> Box<Node> {
        Llrb::flip(node.deref_mut());
        if is_red(node.left_deref().and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }
}

impl Container for Llrb {
    fn name(&self) -> String {
        self.id()
    }

    #[inline]
    fn insert(&mut self, key: Key) -> bool {
        self.create(key).is_ok()
    }

    #[inline]
    fn search(&self, key: &Key) -> bool {
        self.contains(key)
    }

    #[inline]
    fn delete(&mut self, key: &Key) -> bool {
        Llrb::delete(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.n_count
    }
}

fn is_red(node: Option<&Node>) -> bool {
    node.map_or(false, |node| !node.is_black())
}

/// Node corresponds to a single key in Llrb instance.
#[derive(Clone)]
pub struct Node {
    key: Key,
    black: bool,             // store: black or red
    left: Option<Box<Node>>, // store: left child
    right: Option<Box<Node>>, // store: right child
}

impl Node {
    fn new(key: Key, black: bool) -> Box<Node> {
        Box::new(Node {
            key,
            black,
            left: None,
            right: None,
        })
    }

    #[inline]
    fn left_deref(&self) -> Option<&Node> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    fn right_deref(&self) -> Option<&Node> {
        self.right.as_ref().map(Deref::deref)
    }

    #[inline]
    fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    fn is_black(&self) -> bool {
        self.black
    }
}

/// Statistics on [`Llrb`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Llrb::stats`] method.
/// * To get full statisics, including leaf depths, via
///   [`Llrb::validate`] method.
#[derive(Default, Debug, Clone)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    leaves: usize,
    min_depth: usize,
    max_depth: usize,
    total_depth: usize,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            ..Default::default()
        }
    }

    fn sample_depth(&mut self, depth: usize) {
        if self.leaves == 0 || depth < self.min_depth {
            self.min_depth = depth
        }
        if depth > self.max_depth {
            self.max_depth = depth
        }
        self.leaves += 1;
        self.total_depth += depth;
    }

    /// Return number entries in [`Llrb`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head. EG:
    ///
    /// ```
    /// use sid_bench::Llrb;
    /// let llrb = Llrb::new("myinstance");
    ///
    /// // key: 8 bytes, color: 8 bytes, children: 16 bytes
    /// assert_eq!(llrb.stats().node_size(), 32);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return (min, mean, max) depth of leaf positions, None when the
    /// tree was not walked.
    pub fn depths(&self) -> Option<(usize, usize, usize)> {
        match self.leaves {
            0 => None,
            n => Some((self.min_depth, self.total_depth / n, self.max_depth)),
        }
    }
}

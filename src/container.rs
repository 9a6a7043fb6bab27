use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Keys handled by every benchmarked container.
pub type Key = u64;

/// Kind of operation a benchmark issues against a [`Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Search,
    Insert,
    Delete,
}

impl OpKind {
    /// All kinds, in the order figures are emitted.
    pub const ALL: [OpKind; 3] = [OpKind::Search, OpKind::Insert, OpKind::Delete];
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpKind::Search => write!(f, "search"),
            OpKind::Insert => write!(f, "insert"),
            OpKind::Delete => write!(f, "delete"),
        }
    }
}

/// Capability interface consumed by the benchmarks. Any ordered
/// structure implementing it can be plugged in.
///
/// Return values report whether the operation did what was asked:
/// `insert` returns false when the key was already present, `search`
/// and `delete` return false when the key was absent. The harness only
/// drives containers with pre-vetted operations, so a `false` is a
/// contract violation and fails the run.
pub trait Container {
    /// Label used for this container's series in figures.
    fn name(&self) -> String;

    fn insert(&mut self, key: Key) -> bool;

    fn search(&self, key: &Key) -> bool;

    fn delete(&mut self, key: &Key) -> bool;

    /// Number of keys held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Container for BTreeSet<Key> {
    fn name(&self) -> String {
        "BTreeSet".to_string()
    }

    #[inline]
    fn insert(&mut self, key: Key) -> bool {
        BTreeSet::insert(self, key)
    }

    #[inline]
    fn search(&self, key: &Key) -> bool {
        self.contains(key)
    }

    #[inline]
    fn delete(&mut self, key: &Key) -> bool {
        self.remove(key)
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

impl<C: Container + ?Sized> Container for Box<C> {
    fn name(&self) -> String {
        (**self).name()
    }

    #[inline]
    fn insert(&mut self, key: Key) -> bool {
        (**self).insert(key)
    }

    #[inline]
    fn search(&self, key: &Key) -> bool {
        (**self).search(key)
    }

    #[inline]
    fn delete(&mut self, key: &Key) -> bool {
        (**self).delete(key)
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }
}

use crate::container::{Container, Key};

/// SortedList keeps keys in a contiguous, sorted vector. Search is a
/// binary search, insert and delete shift the tail.
#[derive(Clone, Default)]
pub struct SortedList {
    keys: Vec<Key>,
}

impl SortedList {
    pub fn new() -> SortedList {
        Default::default()
    }

    pub fn with_capacity(capacity: usize) -> SortedList {
        SortedList {
            keys: Vec::with_capacity(capacity),
        }
    }

    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }
}

impl Container for SortedList {
    fn name(&self) -> String {
        "SortedList".to_string()
    }

    fn insert(&mut self, key: Key) -> bool {
        match self.keys.binary_search(&key) {
            Ok(_) => false,
            Err(off) => {
                self.keys.insert(off, key);
                true
            }
        }
    }

    #[inline]
    fn search(&self, key: &Key) -> bool {
        self.keys.binary_search(key).is_ok()
    }

    fn delete(&mut self, key: &Key) -> bool {
        match self.keys.binary_search(key) {
            Ok(off) => {
                self.keys.remove(off);
                true
            }
            Err(_) => false,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.keys.len()
    }
}

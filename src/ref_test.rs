// Reference container, a BTreeSet that counts every call and records
// every contract violation instead of failing.
#[allow(dead_code)]
struct RefSet {
    keys: std::collections::BTreeSet<crate::container::Key>,
    searches: std::cell::Cell<usize>,
    inserts: usize,
    deletes: usize,
    violations: std::cell::RefCell<Vec<(crate::container::OpKind, crate::container::Key)>>,
}

#[allow(dead_code)]
impl RefSet {
    fn new() -> RefSet {
        RefSet {
            keys: Default::default(),
            searches: std::cell::Cell::new(0),
            inserts: 0,
            deletes: 0,
            violations: std::cell::RefCell::new(vec![]),
        }
    }

    fn searches(&self) -> usize {
        self.searches.get()
    }

    fn violations(&self) -> Vec<(crate::container::OpKind, crate::container::Key)> {
        self.violations.borrow().clone()
    }
}

impl crate::container::Container for RefSet {
    fn name(&self) -> String {
        "RefSet".to_string()
    }

    fn insert(&mut self, key: crate::container::Key) -> bool {
        self.inserts += 1;
        let ok = self.keys.insert(key);
        if !ok {
            let op = crate::container::OpKind::Insert;
            self.violations.borrow_mut().push((op, key));
        }
        ok
    }

    fn search(&self, key: &crate::container::Key) -> bool {
        self.searches.set(self.searches.get() + 1);
        let ok = self.keys.contains(key);
        if !ok {
            let op = crate::container::OpKind::Search;
            self.violations.borrow_mut().push((op, *key));
        }
        ok
    }

    fn delete(&mut self, key: &crate::container::Key) -> bool {
        self.deletes += 1;
        let ok = self.keys.remove(key);
        if !ok {
            let op = crate::container::OpKind::Delete;
            self.violations.borrow_mut().push((op, *key));
        }
        ok
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

// Container that silently drops `lost` on insert.
#[allow(dead_code)]
struct LossySet {
    keys: std::collections::BTreeSet<crate::container::Key>,
    lost: crate::container::Key,
}

impl crate::container::Container for LossySet {
    fn name(&self) -> String {
        "LossySet".to_string()
    }

    fn insert(&mut self, key: crate::container::Key) -> bool {
        if key != self.lost {
            self.keys.insert(key);
        }
        true
    }

    fn search(&self, key: &crate::container::Key) -> bool {
        self.keys.contains(key)
    }

    fn delete(&mut self, key: &crate::container::Key) -> bool {
        self.keys.remove(key)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

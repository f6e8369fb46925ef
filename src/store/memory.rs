//-
// Copyright (c) 2026, Jason Lingle
//
// This file is part of Mailprefs.
//
// Mailprefs is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.
//
// Mailprefs is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for
// more details.
//
// You should have received a copy of the GNU General Public License along with
// Mailprefs. If not, see <http://www.gnu.org/licenses/>.

//! In-memory preference stores for tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

use super::{FolderStoreProvider, KeyValueStore, Pending, Value};
use crate::source::Folder;
use crate::support::error::Error;

#[derive(Default)]
struct Shared {
    committed: RefCell<BTreeMap<String, Value>>,
    /// Successful commits left before one is made to fail.
    fail_after: Cell<Option<usize>>,
    writes: Cell<usize>,
}

/// A handle onto an in-memory store.
///
/// All handles obtained through `handle()` share the same committed values,
/// but each has its own pending writes.
pub struct MemoryStore {
    name: String,
    shared: Rc<Shared>,
    pending: Pending,
}

impl MemoryStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            shared: Rc::new(Shared::default()),
            pending: Pending::default(),
        }
    }

    pub fn handle(&self) -> Self {
        Self {
            name: self.name.clone(),
            shared: Rc::clone(&self.shared),
            pending: Pending::default(),
        }
    }

    /// Directly store a committed value, as if written by some earlier
    /// process. Not counted as a write.
    pub fn seed(&self, key: &str, value: impl Into<Value>) {
        self.shared
            .committed
            .borrow_mut()
            .insert(key.to_owned(), value.into());
    }

    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.shared.committed.borrow().clone()
    }

    /// The number of `set` and `remove` calls made through any handle.
    pub fn writes(&self) -> usize {
        self.shared.writes.get()
    }

    /// Cause the next commit with pending writes, through any handle, to
    /// fail.
    pub fn fail_next_commit(&self) {
        self.fail_commit_after(0);
    }

    /// Let `successes` commits with pending writes succeed, then fail the
    /// one after.
    pub fn fail_commit_after(&self, successes: usize) {
        self.shared.fail_after.set(Some(successes));
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.pending.lookup(&self.shared.committed.borrow(), key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.shared.writes.set(self.shared.writes.get() + 1);
        self.pending.stage(key, Some(value));
    }

    fn remove(&mut self, key: &str) {
        self.shared.writes.set(self.shared.writes.get() + 1);
        self.pending.stage(key, None);
    }

    fn commit(&mut self) -> Result<(), Error> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let fail_after = self.shared.fail_after.get();
        self.shared
            .fail_after
            .set(fail_after.and_then(|n| n.checked_sub(1)));
        if Some(0) == fail_after {
            return Err(Error::StorageWrite {
                store: self.name.clone(),
                source: io::Error::new(
                    io::ErrorKind::Other,
                    "simulated write failure",
                ),
            });
        }

        let values = self.pending.apply_to(&self.shared.committed.borrow());
        *self.shared.committed.borrow_mut() = values;
        self.pending.clear();
        Ok(())
    }

    fn discard(&mut self) {
        self.pending.clear();
    }
}

/// Folder stores keyed by `(account, folder id)`.
#[derive(Default)]
pub struct MemoryFolderStores {
    stores: BTreeMap<(String, String), MemoryStore>,
}

impl MemoryFolderStores {
    pub fn store(&mut self, account: &str, folder_id: &str) -> &MemoryStore {
        self.stores
            .entry((account.to_owned(), folder_id.to_owned()))
            .or_insert_with(|| {
                MemoryStore::new(&format!("Folder-{account}-{folder_id}"))
            })
    }

    pub fn snapshot(
        &self,
    ) -> BTreeMap<(String, String), BTreeMap<String, Value>> {
        self.stores
            .iter()
            .map(|(key, store)| (key.clone(), store.snapshot()))
            .filter(|(_, values)| !values.is_empty())
            .collect()
    }

    pub fn writes(&self) -> usize {
        self.stores.values().map(MemoryStore::writes).sum()
    }
}

impl FolderStoreProvider for MemoryFolderStores {
    fn open(
        &mut self,
        account: &str,
        folder: &Folder,
    ) -> Result<Box<dyn KeyValueStore>, Error> {
        Ok(Box::new(self.store(account, &folder.id).handle()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn handles_see_only_committed_writes() {
        let store = MemoryStore::new("unified");
        let mut a = store.handle();
        let b = store.handle();

        a.set("swipe", Value::Bool(true));
        assert_eq!(Some(Value::Bool(true)), a.get("swipe"));
        assert_eq!(None, b.get("swipe"));

        a.commit().unwrap();
        assert_eq!(Some(Value::Bool(true)), b.get("swipe"));
        assert_eq!(1, store.writes());
    }

    #[test]
    fn injected_failure_keeps_pending_writes() {
        let store = MemoryStore::new("unified");
        let mut handle = store.handle();

        store.fail_next_commit();
        // Nothing pending, so the failure stays armed
        handle.commit().unwrap();

        handle.set("swipe", Value::Bool(true));
        assert_matches!(Err(Error::StorageWrite { .. }), handle.commit());
        assert!(store.snapshot().is_empty());

        handle.commit().unwrap();
        assert_eq!(Some(&Value::Bool(true)), store.snapshot().get("swipe"));
    }

    #[test]
    fn failure_can_be_deferred() {
        let store = MemoryStore::new("unified");
        let mut handle = store.handle();
        store.fail_commit_after(1);

        handle.set("swipe", Value::Bool(true));
        handle.commit().unwrap();
        handle.set("reply", Value::Bool(true));
        assert_matches!(Err(Error::StorageWrite { .. }), handle.commit());
        assert_eq!(None, store.snapshot().get("reply"));

        handle.commit().unwrap();
        assert_eq!(Some(&Value::Bool(true)), store.snapshot().get("reply"));
    }

    #[test]
    fn discard_drops_pending_writes() {
        let store = MemoryStore::new("unified");
        let mut handle = store.handle();

        handle.set("swipe", Value::Bool(true));
        store.fail_next_commit();
        assert_matches!(Err(Error::StorageWrite { .. }), handle.commit());
        handle.discard();
        assert_eq!(None, handle.get("swipe"));

        handle.set("reply", Value::Bool(false));
        handle.commit().unwrap();
        assert_eq!(None, store.snapshot().get("swipe"));
        assert_eq!(Some(&Value::Bool(false)), store.snapshot().get("reply"));
    }
}

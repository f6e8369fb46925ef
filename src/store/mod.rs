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

//! Persistent key-value preference stores.
//!
//! A store holds flat preference values. Writes are staged on the handle that
//! made them and only become durable (and visible to other handles) on
//! `commit`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::source::Folder;
use crate::support::error::Error;

pub mod file;
#[cfg(test)]
pub mod memory;

/// A single preference value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    StringSet(BTreeSet<String>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_set(&self) -> Option<&BTreeSet<String>> {
        match *self {
            Value::StringSet(ref set) => Some(set),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(set: BTreeSet<String>) -> Self {
        Value::StringSet(set)
    }
}

pub trait KeyValueStore {
    /// A human-readable name for the store, used in logs and errors.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> Option<Value>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn set(&mut self, key: &str, value: Value);

    fn remove(&mut self, key: &str);

    /// Durably flush all pending writes.
    ///
    /// Succeeds without doing anything if nothing is pending. On failure, the
    /// pending writes are retained.
    fn commit(&mut self) -> Result<(), Error>;

    /// Drop all pending writes without committing them.
    fn discard(&mut self);
}

/// Opens the per-(account, folder) notification preference stores, creating
/// them on demand.
pub trait FolderStoreProvider {
    fn open(
        &mut self,
        account: &str,
        folder: &Folder,
    ) -> Result<Box<dyn KeyValueStore>, Error>;
}

/// Writes staged against a store but not yet committed. `None` marks a
/// removal.
#[derive(Clone, Debug, Default)]
struct Pending(BTreeMap<String, Option<Value>>);

impl Pending {
    fn lookup(
        &self,
        committed: &BTreeMap<String, Value>,
        key: &str,
    ) -> Option<Value> {
        match self.0.get(key) {
            Some(staged) => staged.clone(),
            None => committed.get(key).cloned(),
        }
    }

    fn stage(&mut self, key: &str, value: Option<Value>) {
        self.0.insert(key.to_owned(), value);
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Produce the values `committed` will hold once these writes land.
    fn apply_to(
        &self,
        committed: &BTreeMap<String, Value>,
    ) -> BTreeMap<String, Value> {
        let mut values = committed.clone();
        for (key, staged) in &self.0 {
            match *staged {
                Some(ref value) => {
                    values.insert(key.clone(), value.clone());
                }
                None => {
                    values.remove(key);
                }
            }
        }
        values
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

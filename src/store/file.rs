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

//! Preference stores kept as TOML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{FolderStoreProvider, KeyValueStore, Pending, Value};
use crate::source::Folder;
use crate::support::{
    error::Error,
    file_ops::{self, IgnoreKinds},
    safe_name::is_safe_name,
};

/// A preference store backed by a single TOML file.
///
/// A file which does not exist yet opens as an empty store; it is created on
/// the first commit that has something to write.
pub struct FileStore {
    name: String,
    path: PathBuf,
    tmp: PathBuf,
    committed: BTreeMap<String, Value>,
    pending: Pending,
}

impl FileStore {
    pub fn open(
        path: impl Into<PathBuf>,
        tmp: impl Into<PathBuf>,
    ) -> Result<Self, Error> {
        let path = path.into();
        let name = path.display().to_string();
        let text = fs::read_to_string(&path).ignore_not_found()?;
        let committed =
            toml::from_str(&text).map_err(|source| Error::CorruptStore {
                store: name.clone(),
                source,
            })?;

        Ok(Self {
            name,
            path,
            tmp: tmp.into(),
            committed,
            pending: Pending::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.pending.lookup(&self.committed, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.pending.stage(key, Some(value));
    }

    fn remove(&mut self, key: &str) {
        self.pending.stage(key, None);
    }

    fn commit(&mut self) -> Result<(), Error> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let values = self.pending.apply_to(&self.committed);
        let data = toml::to_string(&values)?;
        file_ops::spit(&self.tmp, &self.path, 0o600, data.as_bytes())
            .map_err(|source| Error::StorageWrite {
                store: self.name.clone(),
                source,
            })?;

        debug!("Committed {} value(s) to {}", values.len(), self.name);
        self.committed = values;
        self.pending.clear();
        Ok(())
    }

    fn discard(&mut self) {
        self.pending.clear();
    }
}

/// Per-folder notification stores, each a `FileStore` named
/// `Folder-<account>-<folder id>.toml` under one directory.
///
/// Account names may contain `-` but folder ids may not, so the last `-` in a
/// file name always separates the two and no two folders share a file.
pub struct FileFolderStores {
    root: PathBuf,
    tmp: PathBuf,
}

impl FileFolderStores {
    pub fn new(root: impl Into<PathBuf>, tmp: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tmp: tmp.into(),
        }
    }
}

impl FolderStoreProvider for FileFolderStores {
    fn open(
        &mut self,
        account: &str,
        folder: &Folder,
    ) -> Result<Box<dyn KeyValueStore>, Error> {
        for name in [account, folder.id.as_str()].iter() {
            if !is_safe_name(name) {
                return Err(Error::UnsafeName((*name).to_owned()));
            }
        }
        if folder.id.contains('-') {
            return Err(Error::UnsafeName(folder.id.clone()));
        }

        let path = self
            .root
            .join(format!("Folder-{}-{}.toml", account, folder.id));
        Ok(Box::new(FileStore::open(path, &self.tmp)?))
    }
}

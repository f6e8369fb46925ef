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

//! In-memory stores and records shared by the tests.

use std::collections::BTreeMap;

use crate::migration::{upgrade, Migrator, Stores, Summary};
use crate::source::memory::MemorySource;
use crate::store::{
    memory::{MemoryFolderStores, MemoryStore},
    Value,
};
use crate::support::error::Error;

/// The observable result of a migration: the committed unified preferences
/// and the committed, non-empty folder preferences.
pub type State = (
    BTreeMap<String, Value>,
    BTreeMap<(String, String), BTreeMap<String, Value>>,
);

pub struct Fixture {
    pub legacy: MemoryStore,
    pub notifications: MemoryStore,
    pub unified: MemoryStore,
    pub folders: MemoryFolderStores,
    pub source: MemorySource,
}

impl Fixture {
    pub fn new() -> Self {
        crate::init_test_log();
        Self {
            legacy: MemoryStore::new("legacy"),
            notifications: MemoryStore::new("notifications"),
            unified: MemoryStore::new("unified"),
            folders: MemoryFolderStores::default(),
            source: MemorySource::default(),
        }
    }

    pub fn migrate(
        &mut self,
        old_version: u32,
        new_version: u32,
    ) -> Result<Summary, Error> {
        self.migrate_with(&Migrator::default(), old_version, new_version)
    }

    pub fn migrate_with(
        &mut self,
        migrator: &Migrator,
        old_version: u32,
        new_version: u32,
    ) -> Result<Summary, Error> {
        let mut stores = Stores {
            legacy: &self.legacy,
            legacy_notifications: &self.notifications,
            unified: &mut self.unified,
            folders: &mut self.folders,
        };
        migrator.migrate(old_version, new_version, &self.source, &mut stores)
    }

    pub fn upgrade(&mut self) -> Result<Option<Summary>, Error> {
        let mut stores = Stores {
            legacy: &self.legacy,
            legacy_notifications: &self.notifications,
            unified: &mut self.unified,
            folders: &mut self.folders,
        };
        upgrade::upgrade_if_needed(&Migrator::default(), &self.source, &mut stores)
    }

    pub fn upgrade_from(&mut self, from: u32) -> Result<Summary, Error> {
        let mut stores = Stores {
            legacy: &self.legacy,
            legacy_notifications: &self.notifications,
            unified: &mut self.unified,
            folders: &mut self.folders,
        };
        upgrade::upgrade_from(&Migrator::default(), from, &self.source, &mut stores)
    }

    pub fn state(&self) -> State {
        (self.unified.snapshot(), self.folders.snapshot())
    }

    /// Writes made to any store, committed or not.
    pub fn writes(&self) -> usize {
        self.legacy.writes()
            + self.notifications.writes()
            + self.unified.writes()
            + self.folders.writes()
    }
}

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

//! An in-memory record source for tests.

use std::cell::Cell;

use super::{Account, AccountSettings, Cursor, Folder, RecordSource};
use crate::support::error::Error;

#[derive(Default)]
pub struct MemorySource {
    pub accounts: Vec<Account>,
    pub folders: Vec<Folder>,
    /// If set, every query fails with `SourceUnavailable`.
    pub unavailable: bool,
    open_cursors: Cell<usize>,
    queries: Cell<usize>,
}

impl MemorySource {
    /// Add an account whose default inbox is the folder `folder_id`, along
    /// with that folder.
    pub fn add_account(&mut self, name: &str, folder_id: &str) {
        self.add_account_with_inbox(name, &format!("folder:{name}/{folder_id}"));
        self.folders.push(Folder {
            id: folder_id.to_owned(),
            name: "Inbox".to_owned(),
            account: name.to_owned(),
        });
    }

    /// Add an account with the given raw default inbox reference and no
    /// folders.
    pub fn add_account_with_inbox(&mut self, name: &str, inbox: &str) {
        self.accounts.push(Account {
            name: name.to_owned(),
            settings: AccountSettings {
                default_inbox: inbox.to_owned(),
                ..AccountSettings::default()
            },
        });
    }

    /// The number of cursors handed out and not yet released.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.get()
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    fn query<T>(&self, rows: Vec<T>) -> Result<Cursor<'_, T>, Error> {
        self.queries.set(self.queries.get() + 1);
        if self.unavailable {
            return Err(Error::SourceUnavailable(
                "memory source switched off".to_owned(),
            ));
        }

        self.open_cursors.set(self.open_cursors.get() + 1);
        let open_cursors = &self.open_cursors;
        Ok(Cursor::with_release(rows, move || {
            open_cursors.set(open_cursors.get() - 1)
        }))
    }
}

impl RecordSource for MemorySource {
    fn query_accounts(&self) -> Result<Cursor<'_, Account>, Error> {
        self.query(self.accounts.clone())
    }

    fn query_folders(
        &self,
        account: &Account,
    ) -> Result<Cursor<'_, Folder>, Error> {
        let inbox = account.default_inbox()?;
        self.query(
            self.folders
                .iter()
                .filter(|folder| inbox.matches(folder))
                .cloned()
                .collect(),
        )
    }
}

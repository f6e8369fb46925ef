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

//! Account and folder records read from a TOML document.
//!
//! The document looks like this:
//!
//! ```toml
//! [[account]]
//! name = "alice@example.com"
//! [account.settings]
//! default_inbox = "folder:alice@example.com/1"
//!
//! [[folder]]
//! id = "1"
//! name = "Inbox"
//! account = "alice@example.com"
//! ```

use std::fs;
use std::path::PathBuf;

use log::trace;
use serde::Deserialize;

use super::{Account, Cursor, Folder, RecordSource};
use crate::support::error::Error;

#[derive(Deserialize, Default)]
struct AccountsDocument {
    #[serde(default)]
    account: Vec<Account>,
    #[serde(default)]
    folder: Vec<Folder>,
}

pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<AccountsDocument, Error> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::SourceUnavailable(format!(
                "reading '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        toml::from_str(&text).map_err(|e| {
            Error::SourceUnavailable(format!(
                "parsing '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn cursor<T>(&self, what: &'static str, rows: Vec<T>) -> Cursor<'_, T> {
        trace!("Opened {} cursor on {}", what, self.path.display());
        Cursor::with_release(rows, move || {
            trace!("Released {} cursor on {}", what, self.path.display())
        })
    }
}

impl RecordSource for FileRecordSource {
    fn query_accounts(&self) -> Result<Cursor<'_, Account>, Error> {
        let document = self.load()?;
        Ok(self.cursor("account", document.account))
    }

    fn query_folders(
        &self,
        account: &Account,
    ) -> Result<Cursor<'_, Folder>, Error> {
        let inbox = account.default_inbox()?;
        let document = self.load()?;
        let folders = document
            .folder
            .into_iter()
            .filter(|folder| inbox.matches(folder))
            .collect();
        Ok(self.cursor("folder", folders))
    }
}

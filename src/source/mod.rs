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

//! Where account and folder records come from.
//!
//! Records are fetched fresh for each migration and never modified.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::support::error::Error;

pub mod file;
#[cfg(test)]
pub mod memory;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Account {
    /// The account's name, which is normally its email address.
    pub name: String,
    #[serde(default)]
    pub settings: AccountSettings,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AccountSettings {
    /// Reference to the account's default inbox, in the form
    /// `folder:<account>/<folder id>`.
    #[serde(default)]
    pub default_inbox: String,
    /// Everything else the record source knows about the account. Migration
    /// does not look at these.
    #[serde(flatten)]
    pub other: BTreeMap<String, toml::Value>,
}

impl Account {
    pub fn default_inbox(&self) -> Result<FolderRef, Error> {
        self.settings.default_inbox.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Folder {
    /// The folder's persistent identifier within its account.
    pub id: String,
    pub name: String,
    /// The name of the owning account.
    pub account: String,
}

/// A parsed reference to a single folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRef {
    pub account: String,
    pub folder_id: String,
}

impl FolderRef {
    pub fn matches(&self, folder: &Folder) -> bool {
        self.account == folder.account && self.folder_id == folder.id
    }
}

impl FromStr for FolderRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let malformed = || Error::MalformedFolderRef(s.to_owned());

        let rest = s.strip_prefix("folder:").ok_or_else(malformed)?;
        let (account, folder_id) = rest.rsplit_once('/').ok_or_else(malformed)?;
        if account.is_empty() || folder_id.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            account: account.to_owned(),
            folder_id: folder_id.to_owned(),
        })
    }
}

impl fmt::Display for FolderRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "folder:{}/{}", self.account, self.folder_id)
    }
}

/// A scoped handle over the rows produced by one query.
///
/// The release hook runs exactly once, when the cursor is dropped, on every
/// path out of the scope which owns it.
pub struct Cursor<'a, T> {
    rows: std::vec::IntoIter<T>,
    release: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a, T> Cursor<'a, T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: rows.into_iter(),
            release: None,
        }
    }

    pub fn with_release(rows: Vec<T>, release: impl FnOnce() + 'a) -> Self {
        Self {
            rows: rows.into_iter(),
            release: Some(Box::new(release)),
        }
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.rows.next()
    }
}

impl<'a, T> Drop for Cursor<'a, T> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// A read-only source of account and folder records.
///
/// Both queries produce an empty cursor, not an error, when there is nothing
/// to return. Being unable to run the query at all is
/// `Error::SourceUnavailable`.
pub trait RecordSource {
    fn query_accounts(&self) -> Result<Cursor<'_, Account>, Error>;

    /// Query the folders located at `account`'s default inbox reference.
    fn query_folders(
        &self,
        account: &Account,
    ) -> Result<Cursor<'_, Folder>, Error>;
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn parse_folder_ref() {
        let parsed: FolderRef = "folder:alice@example.com/12".parse().unwrap();
        assert_eq!("alice@example.com", parsed.account);
        assert_eq!("12", parsed.folder_id);
        assert_eq!("folder:alice@example.com/12", parsed.to_string());

        for bad in &[
            "",
            "folder:",
            "folder:alice@example.com",
            "folder:/12",
            "folder:alice@example.com/",
            "mailbox:alice@example.com/12",
        ] {
            assert_matches!(
                Err(Error::MalformedFolderRef(..)),
                bad.parse::<FolderRef>()
            );
        }
    }

    #[test]
    fn cursor_releases_once_on_drop() {
        let released = Cell::new(0);
        {
            let mut cursor = Cursor::with_release(vec![1, 2, 3], || {
                released.set(released.get() + 1)
            });
            assert_eq!(Some(1), cursor.next());
            assert_eq!(0, released.get());
        }
        assert_eq!(1, released.get());

        let collected: Vec<i32> = Cursor::with_release(vec![4, 5], || {
            released.set(released.get() + 1)
        })
        .collect();
        assert_eq!(vec![4, 5], collected);
        assert_eq!(2, released.get());
    }

    #[test]
    fn account_settings_keep_unknown_fields() {
        let account: Account = toml::from_str(
            "name = \"alice@example.com\"\n\
             [settings]\n\
             default_inbox = \"folder:alice@example.com/1\"\n\
             signature = \"-- alice\"\n",
        )
        .unwrap();

        assert_eq!(
            FolderRef {
                account: "alice@example.com".to_owned(),
                folder_id: "1".to_owned(),
            },
            account.default_inbox().unwrap()
        );
        assert_eq!(
            Some(&toml::Value::String("-- alice".to_owned())),
            account.settings.other.get("signature")
        );
    }
}

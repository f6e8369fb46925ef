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

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Record source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Failed to commit preference store '{store}': {source}")]
    StorageWrite {
        store: String,
        #[source]
        source: io::Error,
    },
    #[error("Malformed folder reference '{0}'")]
    MalformedFolderRef(String),
    #[error("Unsafe account or folder name '{0}'")]
    UnsafeName(String),
    #[error("Cannot migrate backwards from version {old} to {new}")]
    VersionRegression { old: u32, new: u32 },
    #[error("Preference store '{store}' is corrupt: {source}")]
    CorruptStore {
        store: String,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

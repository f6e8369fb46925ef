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

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The configuration for Mailprefs.
///
/// This is stored in a file named `mailprefs.toml` under the Mailprefs root,
/// which is typically `~/.config/mailprefs`. Every path is interpreted
/// relative to that root.
#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct SystemConfig {
    /// Locations of the preference stores.
    #[serde(default)]
    pub stores: StoreConfig,

    /// Where account and folder records are read from.
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// The legacy global preference store, read during migration only.
    pub legacy: PathBuf,
    /// The legacy flat notification preferences shared by all accounts.
    pub legacy_notifications: PathBuf,
    /// The unified preference store, which also records the migrated
    /// schema version.
    pub unified: PathBuf,
    /// Directory holding one notification store per account inbox.
    pub folders: PathBuf,
    /// Staging directory for atomic writes. Must be on the same file system
    /// as the stores.
    pub tmp: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            legacy: "legacy/preferences.toml".into(),
            legacy_notifications: "legacy/notifications.toml".into(),
            unified: "unified.toml".into(),
            folders: "folders".into(),
            tmp: "tmp".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// The TOML document listing accounts and their folders.
    pub accounts: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            accounts: "accounts.toml".into(),
        }
    }
}

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

//! Notification preferences for a single folder of a single account.

use crate::source::Folder;
use crate::store::{FolderStoreProvider, KeyValueStore, Value};
use crate::support::error::Error;

const NOTIFICATIONS_ENABLED: &str = "notifications-enabled";
const NOTIFICATION_RINGTONE: &str = "notification-ringtone";
const NOTIFICATION_VIBRATE: &str = "notification-vibrate";

/// Changes are staged until `commit()`; dropping an uncommitted
/// `FolderPreferences` discards them.
pub struct FolderPreferences {
    store: Box<dyn KeyValueStore>,
    is_inbox: bool,
}

impl FolderPreferences {
    pub fn open(
        provider: &mut dyn FolderStoreProvider,
        account: &str,
        folder: &Folder,
        is_inbox: bool,
    ) -> Result<Self, Error> {
        Ok(Self {
            store: provider.open(account, folder)?,
            is_inbox,
        })
    }

    /// Notifications default to on for inboxes and off elsewhere.
    pub fn notifications_enabled(&self) -> bool {
        self.store
            .get(NOTIFICATIONS_ENABLED)
            .and_then(|v| v.as_bool())
            .unwrap_or(self.is_inbox)
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.store.set(NOTIFICATIONS_ENABLED, Value::Bool(enabled));
    }

    /// The ringtone URI, or `None` for the system default.
    pub fn notification_ringtone_uri(&self) -> Option<String> {
        self.store
            .get(NOTIFICATION_RINGTONE)
            .and_then(|v| v.as_str().map(str::to_owned))
    }

    pub fn set_notification_ringtone_uri(&mut self, uri: Option<String>) {
        match uri {
            Some(uri) => self.store.set(NOTIFICATION_RINGTONE, Value::String(uri)),
            None => self.store.remove(NOTIFICATION_RINGTONE),
        }
    }

    pub fn notification_vibrate_enabled(&self) -> bool {
        self.store
            .get(NOTIFICATION_VIBRATE)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn set_notification_vibrate_enabled(&mut self, vibrate: bool) {
        self.store.set(NOTIFICATION_VIBRATE, Value::Bool(vibrate));
    }

    pub fn commit(&mut self) -> Result<(), Error> {
        self.store.commit()
    }
}

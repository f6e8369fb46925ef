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

//! Read-only views over the stores that predate the unified preferences.
//!
//! These views are frozen at `FROZEN_AT_VERSION`, the last schema version
//! whose migration reads them. Nothing outside the migration steps should use
//! them.

use std::collections::BTreeSet;

use log::warn;

use super::{read_bool, read_string};
use crate::store::{KeyValueStore, Value};
use crate::support::log_prefix::LogPrefix;

pub const FROZEN_AT_VERSION: u32 = 3;

const SWIPE_DELETE: &str = "swipe_delete";
const REPLY_ALL: &str = "reply_all";
const TRUSTED_SENDERS: &str = "trusted_senders";
const CONV_LIST_ICON: &str = "conversation_list_icons";

pub const CONV_LIST_ICON_NONE: &str = "none";
pub const CONV_LIST_ICON_SENDER_IMAGE: &str = "senderimage";

const NOTIFY: &str = "account_notify";
const RINGTONE: &str = "account_ringtone";
const VIBRATE: &str = "account_settings_vibrate";
const VIBRATE_WHEN: &str = "account_settings_vibrate_when";
const VIBRATE_WHEN_ALWAYS: &str = "always";

/// The legacy global preferences.
pub struct LegacyPreferences<'a> {
    log_prefix: &'a LogPrefix,
    store: &'a dyn KeyValueStore,
}

impl<'a> LegacyPreferences<'a> {
    pub fn new(log_prefix: &'a LogPrefix, store: &'a dyn KeyValueStore) -> Self {
        Self { log_prefix, store }
    }

    /// Whether the swipe-to-delete flag was ever set explicitly.
    pub fn has_swipe_delete(&self) -> bool {
        self.store.contains(SWIPE_DELETE)
    }

    pub fn swipe_delete(&self) -> bool {
        read_bool(self.log_prefix, self.store, SWIPE_DELETE, false)
    }

    /// Whether the reply-all default was ever set explicitly.
    pub fn has_reply_all(&self) -> bool {
        self.store.contains(REPLY_ALL)
    }

    pub fn reply_all(&self) -> bool {
        read_bool(self.log_prefix, self.store, REPLY_ALL, false)
    }

    /// The addresses whose images are always displayed.
    ///
    /// These were kept as a JSON array inside a string. Anything unreadable
    /// is logged and treated as an empty whitelist.
    pub fn whitelisted_sender_addresses(&self) -> BTreeSet<String> {
        match self.store.get(TRUSTED_SENDERS) {
            None => BTreeSet::new(),
            Some(Value::StringSet(addresses)) => addresses,
            Some(Value::String(ref json)) if json.is_empty() => {
                BTreeSet::new()
            }
            Some(Value::String(json)) => {
                match serde_json::from_str::<Vec<String>>(&json) {
                    Ok(addresses) => addresses.into_iter().collect(),
                    Err(e) => {
                        warn!(
                            "{} {}: unreadable sender whitelist {:?}: {}",
                            self.log_prefix,
                            self.store.name(),
                            json,
                            e
                        );
                        BTreeSet::new()
                    }
                }
            }
            Some(other) => {
                warn!(
                    "{} {}: unexpected sender whitelist {:?}",
                    self.log_prefix,
                    self.store.name(),
                    other
                );
                BTreeSet::new()
            }
        }
    }

    pub fn conversation_list_icon(&self) -> String {
        read_string(self.log_prefix, self.store, CONV_LIST_ICON)
            .unwrap_or_else(|| CONV_LIST_ICON_SENDER_IMAGE.to_owned())
    }
}

/// The legacy flat notification preferences, which every account shared.
///
/// Each accessor returns `None` if the corresponding setting was never made.
pub struct LegacyNotificationPreferences<'a> {
    log_prefix: &'a LogPrefix,
    store: &'a dyn KeyValueStore,
}

impl<'a> LegacyNotificationPreferences<'a> {
    pub fn new(log_prefix: &'a LogPrefix, store: &'a dyn KeyValueStore) -> Self {
        Self { log_prefix, store }
    }

    pub fn notifications_enabled(&self) -> Option<bool> {
        if self.store.contains(NOTIFY) {
            Some(read_bool(self.log_prefix, self.store, NOTIFY, true))
        } else {
            None
        }
    }

    /// The ringtone setting. `Some(None)` means the setting is present but
    /// holds no usable URI.
    pub fn ringtone_uri(&self) -> Option<Option<String>> {
        if self.store.contains(RINGTONE) {
            Some(read_string(self.log_prefix, self.store, RINGTONE))
        } else {
            None
        }
    }

    /// The vibrate setting.
    ///
    /// The boolean key takes priority. Failing that, the older enumerated key
    /// means "vibrate" only when it is exactly `always`.
    pub fn vibrate(&self) -> Option<bool> {
        if self.store.contains(VIBRATE) {
            Some(read_bool(self.log_prefix, self.store, VIBRATE, false))
        } else if self.store.contains(VIBRATE_WHEN) {
            Some(
                read_string(self.log_prefix, self.store, VIBRATE_WHEN)
                    .map_or(false, |when| VIBRATE_WHEN_ALWAYS == when),
            )
        } else {
            None
        }
    }
}

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

//! The unified preference store, which replaced the legacy preferences.

use std::collections::BTreeSet;
use std::convert::TryFrom;

use crate::store::{KeyValueStore, Value};
use crate::support::error::Error;

const CONVERSATION_LIST_SWIPE: &str = "conversation-list-swipe";
const DEFAULT_REPLY_ALL: &str = "default-reply-all";
const SENDER_WHITELIST: &str = "display_images";
const SHOW_SENDER_IMAGES: &str = "conversation-list-sender-image";
const MIGRATED_VERSION: &str = "migrated-version";

pub struct UnifiedPreferences<'a> {
    store: &'a mut dyn KeyValueStore,
}

impl<'a> UnifiedPreferences<'a> {
    pub fn new(store: &'a mut dyn KeyValueStore) -> Self {
        Self { store }
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        self.store
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    pub fn conversation_list_swipe_enabled(&self) -> bool {
        self.bool_or(CONVERSATION_LIST_SWIPE, true)
    }

    pub fn set_conversation_list_swipe_enabled(&mut self, enabled: bool) {
        self.store.set(CONVERSATION_LIST_SWIPE, Value::Bool(enabled));
    }

    pub fn default_reply_all(&self) -> bool {
        self.bool_or(DEFAULT_REPLY_ALL, false)
    }

    pub fn set_default_reply_all(&mut self, reply_all: bool) {
        self.store.set(DEFAULT_REPLY_ALL, Value::Bool(reply_all));
    }

    pub fn sender_whitelist(&self) -> BTreeSet<String> {
        self.store
            .get(SENDER_WHITELIST)
            .and_then(|v| v.as_string_set().cloned())
            .unwrap_or_default()
    }

    pub fn set_sender_whitelist(&mut self, addresses: BTreeSet<String>) {
        self.store.set(SENDER_WHITELIST, Value::StringSet(addresses));
    }

    pub fn show_sender_images(&self) -> bool {
        self.bool_or(SHOW_SENDER_IMAGES, true)
    }

    pub fn set_show_sender_images(&mut self, show: bool) {
        self.store.set(SHOW_SENDER_IMAGES, Value::Bool(show));
    }

    /// The schema version the preferences were last migrated to, 0 if they
    /// never were.
    pub fn migrated_version(&self) -> u32 {
        self.store
            .get(MIGRATED_VERSION)
            .and_then(|v| v.as_int())
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    }

    pub fn set_migrated_version(&mut self, version: u32) {
        self.store
            .set(MIGRATED_VERSION, Value::Int(i64::from(version)));
    }

    pub fn commit(&mut self) -> Result<(), Error> {
        self.store.commit()
    }
}

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

//! Typed views over the raw preference stores.

use log::warn;

use crate::store::{KeyValueStore, Value};
use crate::support::log_prefix::LogPrefix;

pub mod folder;
pub mod legacy;
pub mod unified;

/// Read `key` as a boolean, falling back to `default` if it is absent or
/// holds something else.
fn read_bool(
    log_prefix: &LogPrefix,
    store: &dyn KeyValueStore,
    key: &str,
    default: bool,
) -> bool {
    match store.get(key) {
        None => default,
        Some(Value::Bool(b)) => b,
        Some(other) => {
            warn!(
                "{} {}: expected a boolean for '{}', found {:?}; using {}",
                log_prefix,
                store.name(),
                key,
                other,
                default
            );
            default
        }
    }
}

/// Read `key` as a string. Present values of the wrong type read as `None`.
fn read_string(
    log_prefix: &LogPrefix,
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<String> {
    match store.get(key) {
        None => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            warn!(
                "{} {}: expected a string for '{}', found {:?}",
                log_prefix,
                store.name(),
                key,
                other
            );
            None
        }
    }
}

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

//! Deciding when to migrate, and recording that it happened.
//!
//! The version preferences were last migrated to lives in the unified store.
//! It only advances after a migration succeeds, so a failed migration is
//! retried from the same place on the next start.

use std::cmp::Ordering;

use log::{error, info, warn};

use super::engine::{Migrator, Stores, Summary};
use crate::prefs::unified::UnifiedPreferences;
use crate::source::RecordSource;
use crate::support::error::Error;

/// The schema version this build expects the preferences to be at.
pub const CURRENT_VERSION: u32 = 3;

/// The version the preferences were last migrated to.
pub fn migrated_version(stores: &mut Stores<'_>) -> u32 {
    UnifiedPreferences::new(&mut *stores.unified).migrated_version()
}

/// Migrate the preferences if they were last migrated for an older version.
///
/// Returns `None` if there was nothing to do.
pub fn upgrade_if_needed(
    migrator: &Migrator,
    source: &dyn RecordSource,
    stores: &mut Stores<'_>,
) -> Result<Option<Summary>, Error> {
    let stored = migrated_version(stores);
    match stored.cmp(&CURRENT_VERSION) {
        Ordering::Equal => Ok(None),
        Ordering::Greater => {
            warn!(
                "Preferences were migrated for version {}, newer than this \
                 version ({}); leaving them alone",
                stored, CURRENT_VERSION
            );
            Ok(None)
        }
        Ordering::Less => upgrade_from(migrator, stored, source, stores).map(Some),
    }
}

/// Migrate from `from` to the current version regardless of what was last
/// recorded, then record the current version.
pub fn upgrade_from(
    migrator: &Migrator,
    from: u32,
    source: &dyn RecordSource,
    stores: &mut Stores<'_>,
) -> Result<Summary, Error> {
    let summary = migrator.migrate(from, CURRENT_VERSION, source, stores)?;

    let mut unified = UnifiedPreferences::new(&mut *stores.unified);
    unified.set_migrated_version(CURRENT_VERSION);
    if let Err(e) = unified.commit() {
        error!(
            "Migrated preferences, but failed to record version {}: {}",
            CURRENT_VERSION, e
        );
        stores.unified.discard();
        return Err(e);
    }
    info!("Preferences now at version {}", CURRENT_VERSION);

    Ok(summary)
}

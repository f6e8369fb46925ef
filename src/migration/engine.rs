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

use log::{error, info};

use super::steps::{standard_steps, MigrationStep, StepContext};
use crate::prefs::{
    legacy::{LegacyNotificationPreferences, LegacyPreferences},
    unified::UnifiedPreferences,
};
use crate::source::{Account, RecordSource};
use crate::store::{FolderStoreProvider, KeyValueStore};
use crate::support::{error::Error, log_prefix::LogPrefix};

/// The stores a migration reads from and writes to.
pub struct Stores<'a> {
    pub legacy: &'a dyn KeyValueStore,
    pub legacy_notifications: &'a dyn KeyValueStore,
    pub unified: &'a mut dyn KeyValueStore,
    pub folders: &'a mut dyn FolderStoreProvider,
}

/// What a successful migration did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub steps_applied: Vec<&'static str>,
    pub folders_migrated: usize,
    pub accounts_skipped: usize,
}

pub struct Migrator {
    steps: Vec<MigrationStep>,
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new(standard_steps())
    }
}

impl Migrator {
    /// Create a migrator running `steps` in ascending order of
    /// `applies_below`.
    ///
    /// Panics if two steps share a threshold.
    pub fn new(mut steps: Vec<MigrationStep>) -> Self {
        steps.sort_by_key(|s| s.applies_below);
        for pair in steps.windows(2) {
            assert!(
                pair[0].applies_below != pair[1].applies_below,
                "migration steps '{}' and '{}' share threshold {}",
                pair[0].name,
                pair[1].name,
                pair[0].applies_below,
            );
        }

        Self { steps }
    }

    /// The version reached once every step has run.
    pub fn latest_version(&self) -> u32 {
        self.steps.last().map_or(0, |s| s.applies_below)
    }

    /// Migrate preferences written by `old_version` for use by
    /// `new_version`.
    ///
    /// Every step with `old_version < applies_below` runs, in order, and the
    /// unified store is committed once they have all succeeded. The first
    /// failure abandons the remaining steps and discards everything staged
    /// against the unified store, so a later commit cannot pick it up.
    ///
    /// Recording `new_version` is the caller's job, and must only happen if
    /// this succeeds.
    pub fn migrate(
        &self,
        old_version: u32,
        new_version: u32,
        source: &dyn RecordSource,
        stores: &mut Stores<'_>,
    ) -> Result<Summary, Error> {
        if old_version > new_version {
            return Err(Error::VersionRegression {
                old: old_version,
                new: new_version,
            });
        }

        let mut summary = Summary::default();
        if old_version == new_version {
            return Ok(summary);
        }

        let log_prefix = LogPrefix::migration(old_version, new_version);
        info!("{} Beginning preference migration", log_prefix);

        let accounts = fetch_accounts(&log_prefix, source)?;

        for step in self
            .steps
            .iter()
            .filter(|step| old_version < step.applies_below)
        {
            info!(
                "{} Applying step #{}: {}",
                log_prefix, step.applies_below, step.name
            );

            let mut cx = StepContext {
                log_prefix: &log_prefix,
                legacy: LegacyPreferences::new(&log_prefix, stores.legacy),
                notifications: LegacyNotificationPreferences::new(
                    &log_prefix,
                    stores.legacy_notifications,
                ),
                unified: UnifiedPreferences::new(&mut *stores.unified),
                folders: &mut *stores.folders,
                source,
                accounts: &accounts,
                summary: &mut summary,
            };

            if let Err(e) = (step.apply)(&mut cx) {
                error!(
                    "{} Step #{} failed, abandoning migration: {}",
                    log_prefix, step.applies_below, e
                );
                stores.unified.discard();
                return Err(e);
            }

            summary.steps_applied.push(step.name);
        }

        if let Err(e) = stores.unified.commit() {
            error!("{} Failed to commit migrated preferences: {}", log_prefix, e);
            stores.unified.discard();
            return Err(e);
        }

        info!(
            "{} Migration complete: {} step(s), {} inbox(es) migrated, \
             {} account(s) skipped",
            log_prefix,
            summary.steps_applied.len(),
            summary.folders_migrated,
            summary.accounts_skipped,
        );
        Ok(summary)
    }
}

/// Fetch every account once, up front.
///
/// An unavailable source is not fatal: the migration continues with no
/// accounts, so only per-account work is lost.
fn fetch_accounts(
    log_prefix: &LogPrefix,
    source: &dyn RecordSource,
) -> Result<Vec<Account>, Error> {
    match source.query_accounts() {
        Ok(cursor) => Ok(cursor.collect()),
        Err(e @ Error::SourceUnavailable(..)) => {
            error!(
                "{} Unable to enumerate accounts, per-account settings will \
                 not be migrated: {}",
                log_prefix, e
            );
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

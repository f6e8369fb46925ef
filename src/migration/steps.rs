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

use log::{debug, error};

use super::engine::Summary;
use crate::prefs::{
    folder::FolderPreferences,
    legacy::{
        LegacyNotificationPreferences, LegacyPreferences, CONV_LIST_ICON_NONE,
    },
    unified::UnifiedPreferences,
};
use crate::source::{Account, Folder, RecordSource};
use crate::store::FolderStoreProvider;
use crate::support::{error::Error, log_prefix::LogPrefix};

/// A single version-gated transformation.
pub struct MigrationStep {
    /// The step runs whenever the migration starts from a version below this
    /// one.
    pub applies_below: u32,
    pub name: &'static str,
    pub apply: fn(&mut StepContext<'_>) -> Result<(), Error>,
}

/// Everything a step may read or write.
pub struct StepContext<'a> {
    pub log_prefix: &'a LogPrefix,
    pub legacy: LegacyPreferences<'a>,
    pub notifications: LegacyNotificationPreferences<'a>,
    pub unified: UnifiedPreferences<'a>,
    pub folders: &'a mut dyn FolderStoreProvider,
    pub source: &'a dyn RecordSource,
    /// The accounts, fetched once at the start of the migration. Empty if
    /// the record source was unavailable.
    pub accounts: &'a [Account],
    pub summary: &'a mut Summary,
}

pub fn standard_steps() -> Vec<MigrationStep> {
    vec![
        MigrationStep {
            applies_below: 1,
            name: "global and inbox notification settings",
            apply: move_global_and_notification_settings,
        },
        MigrationStep {
            applies_below: 2,
            name: "sender whitelist",
            apply: move_sender_whitelist,
        },
        MigrationStep {
            applies_below: 3,
            name: "sender images",
            apply: move_sender_images,
        },
    ]
}

fn move_global_and_notification_settings(
    cx: &mut StepContext<'_>,
) -> Result<(), Error> {
    if cx.legacy.has_swipe_delete() {
        cx.unified
            .set_conversation_list_swipe_enabled(cx.legacy.swipe_delete());
    }

    if cx.legacy.has_reply_all() {
        cx.unified.set_default_reply_all(cx.legacy.reply_all());
    }

    // Notifications were only ever offered for the inbox, so that's the only
    // folder with anything to migrate.
    for account in cx.accounts {
        let log_prefix = cx.log_prefix.with_account(&account.name);

        let inbox = match resolve_inbox(cx.source, account) {
            Ok(inbox) => inbox,
            Err(e) => {
                error!(
                    "{} Can't resolve default inbox {:?}, skipping \
                     notification settings: {}",
                    log_prefix, account.settings.default_inbox, e
                );
                cx.summary.accounts_skipped += 1;
                continue;
            }
        };

        let mut folder_prefs = match FolderPreferences::open(
            &mut *cx.folders,
            &account.name,
            &inbox,
            true,
        ) {
            Ok(p) => p,
            Err(e @ Error::UnsafeName(..)) => {
                error!(
                    "{} No usable preference store for inbox, skipping \
                     notification settings: {}",
                    log_prefix, e
                );
                cx.summary.accounts_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Some(notify) = cx.notifications.notifications_enabled() {
            folder_prefs.set_notifications_enabled(notify);
        }

        if let Some(ringtone) = cx.notifications.ringtone_uri() {
            folder_prefs.set_notification_ringtone_uri(ringtone);
        }

        if let Some(vibrate) = cx.notifications.vibrate() {
            folder_prefs.set_notification_vibrate_enabled(vibrate);
        }

        folder_prefs.commit()?;
        debug!("{} Migrated notification settings", log_prefix);
        cx.summary.folders_migrated += 1;
    }

    Ok(())
}

/// Look up the folder `account`'s default inbox refers to.
///
/// The folder cursor is released before this returns.
fn resolve_inbox(
    source: &dyn RecordSource,
    account: &Account,
) -> Result<Folder, Error> {
    let mut folders = source.query_folders(account)?;
    folders.next().ok_or_else(|| {
        Error::MalformedFolderRef(account.settings.default_inbox.clone())
    })
}

fn move_sender_whitelist(cx: &mut StepContext<'_>) -> Result<(), Error> {
    let whitelist = cx.legacy.whitelisted_sender_addresses();
    cx.unified.set_sender_whitelist(whitelist);
    Ok(())
}

fn move_sender_images(cx: &mut StepContext<'_>) -> Result<(), Error> {
    // The legacy default was to show the sender image
    let show = CONV_LIST_ICON_NONE != cx.legacy.conversation_list_icon();
    cx.unified.set_show_sender_images(show);
    Ok(())
}

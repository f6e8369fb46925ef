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

use std::path::Path;

use log::error;

use crate::migration::{upgrade, Migrator, Stores, Summary};
use crate::prefs::unified::UnifiedPreferences;
use crate::source::file::FileRecordSource;
use crate::store::file::{FileFolderStores, FileStore};
use crate::support::{
    error::Error, sysexits::Sysexit, system_config::SystemConfig,
};

struct OpenStores {
    legacy: FileStore,
    legacy_notifications: FileStore,
    unified: FileStore,
    folders: FileFolderStores,
}

fn open_stores(root: &Path, config: &SystemConfig) -> Result<OpenStores, Error> {
    let paths = &config.stores;
    let tmp = root.join(&paths.tmp);
    Ok(OpenStores {
        legacy: FileStore::open(root.join(&paths.legacy), &tmp)?,
        legacy_notifications: FileStore::open(
            root.join(&paths.legacy_notifications),
            &tmp,
        )?,
        unified: FileStore::open(root.join(&paths.unified), &tmp)?,
        folders: FileFolderStores::new(root.join(&paths.folders), &tmp),
    })
}

fn die(e: Error) -> ! {
    error!("{}", e);
    eprintln!("{}", e);
    Sysexit::for_error(&e).exit()
}

pub(super) fn migrate(root: &Path, config: &SystemConfig, from: Option<u32>) {
    let mut opened = open_stores(root, config).unwrap_or_else(|e| die(e));
    let source = FileRecordSource::new(root.join(&config.source.accounts));
    let migrator = Migrator::default();

    let mut stores = Stores {
        legacy: &opened.legacy,
        legacy_notifications: &opened.legacy_notifications,
        unified: &mut opened.unified,
        folders: &mut opened.folders,
    };

    let result = match from {
        Some(from) => {
            upgrade::upgrade_from(&migrator, from, &source, &mut stores)
                .map(Some)
        }
        None => upgrade::upgrade_if_needed(&migrator, &source, &mut stores),
    };

    match result {
        Ok(None) => println!(
            "Preferences are already at version {}",
            upgrade::migrated_version(&mut stores)
        ),
        Ok(Some(summary)) => print_summary(&summary),
        Err(e) => die(e),
    }
}

fn print_summary(summary: &Summary) {
    println!("Migrated preferences to version {}", upgrade::CURRENT_VERSION);
    for step in &summary.steps_applied {
        println!("  applied: {}", step);
    }
    println!("  inboxes migrated: {}", summary.folders_migrated);
    if summary.accounts_skipped > 0 {
        println!(
            "  accounts skipped: {} (see log for details)",
            summary.accounts_skipped
        );
    }
}

pub(super) fn status(root: &Path, config: &SystemConfig) {
    let mut unified = FileStore::open(
        root.join(&config.stores.unified),
        root.join(&config.stores.tmp),
    )
    .unwrap_or_else(|e| die(e));
    let prefs = UnifiedPreferences::new(&mut unified);

    let migrated = prefs.migrated_version();
    println!("migrated version: {}", migrated);
    println!("current version:  {}", upgrade::CURRENT_VERSION);
    if migrated < upgrade::CURRENT_VERSION {
        println!("migration pending");
    }

    println!();
    println!(
        "conversation-list swipe: {}",
        prefs.conversation_list_swipe_enabled()
    );
    println!("default reply-all:       {}", prefs.default_reply_all());
    println!("show sender images:      {}", prefs.show_sender_images());
    let whitelist = prefs.sender_whitelist();
    println!("sender whitelist:        {} address(es)", whitelist.len());
    for address in &whitelist {
        println!("  {}", address);
    }
}

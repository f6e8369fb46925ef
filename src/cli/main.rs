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

use std::fs;
use std::path::{Path, PathBuf};

use structopt::StructOpt;

use crate::support::file_ops::IgnoreKinds;
use crate::support::sysexits::*;
use crate::support::system_config::SystemConfig;

#[derive(StructOpt)]
#[structopt(max_term_width = 80)]
enum Command {
    Migrate(MigrateSubcommand),
    /// Show the schema version the preferences were last migrated to, along
    /// with the current unified preferences.
    Status(CommonOptions),
}

#[derive(StructOpt, Default)]
pub(super) struct CommonOptions {
    /// The directory containing `mailprefs.toml` and the preference stores
    /// [default: ~/.config/mailprefs]
    #[structopt(long, parse(from_os_str))]
    root: Option<PathBuf>,
}

/// Migrate legacy preferences into the unified preference store.
///
/// Normally this only does anything if the preferences were last migrated by
/// an older version, in which case every step added since then is applied and
/// the current version is recorded. If anything fails, the recorded version
/// is left alone so that running this again retries the same steps.
///
/// Account and folder records are read from the accounts document named in
/// the configuration. If it cannot be read, global settings are still
/// migrated but per-account notification settings are not.
#[derive(StructOpt)]
pub(super) struct MigrateSubcommand {
    #[structopt(flatten)]
    common: CommonOptions,

    /// Re-run every step due for preferences at this version, even if a
    /// newer version is already recorded.
    #[structopt(long)]
    pub(super) from: Option<u32>,
}

pub fn main() {
    // Clap exits with status 1 instead of EX_USAGE if we use the more concise
    // API
    let cmd = Command::from_clap(&match Command::clap().get_matches_safe() {
        Ok(matches) => matches,
        Err(
            e @ clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            },
        )
        | Err(
            e @ clap::Error {
                kind: clap::ErrorKind::VersionDisplayed,
                ..
            },
        ) => {
            println!("{}", e.message);
            return;
        }
        Err(e) => {
            eprintln!("{}", e.message);
            EX_USAGE.exit()
        }
    });

    match cmd {
        Command::Migrate(cmd) => {
            let (root, config) = load_config(&cmd.common);
            init_logging(&root);
            super::migrate::migrate(&root, &config, cmd.from);
        }
        Command::Status(common) => {
            let (root, config) = load_config(&common);
            super::migrate::status(&root, &config);
        }
    }
}

fn load_config(common: &CommonOptions) -> (PathBuf, SystemConfig) {
    let root = match common.root {
        Some(ref root) => root.clone(),
        None => match std::env::var_os("HOME") {
            Some(home) => Path::new(&home).join(".config/mailprefs"),
            None => {
                eprintln!(
                    "HOME is not set; use --root=/path/to/mailprefs to say \
                     where the preferences are"
                );
                EX_CONFIG.exit()
            }
        },
    };

    if !root.is_dir() {
        eprintln!("'{}' is not a directory", root.display());
        EX_CONFIG.exit();
    }

    let config_path = root.join("mailprefs.toml");
    let config_toml = match fs::read_to_string(&config_path).ignore_not_found()
    {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading '{}': {}", config_path.display(), e);
            EX_CONFIG.exit()
        }
    };

    let config: SystemConfig = match toml::from_str(&config_toml) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Error in config file at '{}': {}",
                config_path.display(),
                e
            );
            EX_CONFIG.exit()
        }
    };

    (root, config)
}

fn init_logging(root: &Path) {
    let log_config_file = root.join("logging.toml");
    if log_config_file.is_file() {
        if let Err(e) = log4rs::init_file(
            &log_config_file,
            log4rs::file::Deserializers::new(),
        ) {
            eprintln!(
                "Failed to initialise logging from '{}': {}",
                log_config_file.display(),
                e
            );
            EX_CONFIG.exit();
        }
    } else {
        crate::init_simple_log();
    }
}

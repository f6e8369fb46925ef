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

use std::fmt;

/// Text included at the start of every log statement made while migrating.
///
/// Renders as `migrate[0->3]`, or `migrate[0->3][account=alice@example.com]`
/// once scoped to an account.
#[derive(Clone, Debug)]
pub struct LogPrefix {
    operation: String,
    account: Option<String>,
}

impl LogPrefix {
    pub fn new(operation: String) -> Self {
        Self {
            operation: sanitise(operation),
            account: None,
        }
    }

    pub fn migration(old_version: u32, new_version: u32) -> Self {
        Self::new(format!("migrate[{old_version}->{new_version}]"))
    }

    /// Derive a prefix scoped to the given account.
    pub fn with_account(&self, account: &str) -> Self {
        Self {
            operation: self.operation.clone(),
            account: Some(sanitise(account.to_owned())),
        }
    }
}

impl fmt::Display for LogPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.operation)?;
        if let Some(ref account) = self.account {
            write!(f, "[account={account}]")?;
        }

        Ok(())
    }
}

fn sanitise(mut s: String) -> String {
    s.retain(|c| !c.is_control());
    if let Some((truncate_len, _)) = s.char_indices().nth(64) {
        s.truncate(truncate_len);
    }

    s
}

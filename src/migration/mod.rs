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

//! Forward-only migration of preferences between schema versions.
//!
//! Each step is tagged with the version it brings the preferences up to and
//! runs during any migration that starts below that version. Steps are
//! idempotent, so a migration that fails partway can simply be run again from
//! the same starting version.

pub mod engine;
pub mod steps;
pub mod upgrade;

pub use self::engine::{Migrator, Stores, Summary};

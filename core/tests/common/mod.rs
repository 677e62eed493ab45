// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Stored calendars to edit and apply messages to
//! - Date-time shorthands
//! - Temporary `.ics` files with auto-cleanup

mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{
    DAILY_UID, WEEKLY_UID, daily_store, floating, la, moved, split_daily_store, wall_clocks,
    weekly_store,
};
#[allow(unused_imports)]
pub use temp_dir::TempCalendar;

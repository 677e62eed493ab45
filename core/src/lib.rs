// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendars, iTIP message processing and scoped edits of recurring series.
//!
//! The content model, parser and recurrence engine live in `recurcal-ical`;
//! this crate adds the calendar container that associates overrides with
//! their series, applies incoming iTIP messages, and turns a delete or an
//! edit of one occurrence into the outgoing messages for the chosen scope.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::similar_names, clippy::single_match_else)]

mod calendar;
mod config;
pub mod edit;
mod error;
mod itip;

pub use crate::calendar::{Calendar, CalendarError};
pub use crate::config::Config;
pub use crate::edit::{
    ChangeDialogOption, DateTimeRange, DeleteParams, Deleter, ReviseParams, Reviser, ScopeChoices,
};
pub use crate::error::{EditError, Error};
pub use crate::itip::ProcessLog;

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Entry point for calendar container tests.
//!
//! Covers loading calendars and configuration from files, validity checks
//! across components, and applying iTIP messages.

mod calendar;
mod common;

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Deleting and revising occurrences of stored series.

mod deleter;
mod range;
mod reviser;

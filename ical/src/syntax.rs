// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content-line syntax as defined in RFC 5545, no types.
//!
//! Text goes through two stages: physical lines are unfolded into logical
//! lines, then each logical line is scanned into its name, parameters and
//! raw value.

mod lexer;
mod scanner;
mod unfold;

pub use crate::syntax::lexer::Token;
pub use crate::syntax::scanner::{
    ContentLine, ContentLineError, ScannedParameter, ScannedValue, scan_line,
};
pub use crate::syntax::unfold::{LogicalLine, PushbackIterator, UnfoldingLines, unfold};

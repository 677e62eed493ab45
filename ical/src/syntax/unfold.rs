// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line unfolding, RFC 5545 Section 3.1.
//!
//! A physical line that starts with a SPACE or HTAB continues the previous
//! line. [`UnfoldingLines`] reads ahead one physical line to find the end of
//! a logical line and hands the line that ended it back to the underlying
//! [`PushbackIterator`], so no line is lost at the boundary.

use std::borrow::Cow;
use std::iter::Enumerate;

/// An iterator that can take items back.
///
/// Items pushed back are returned by `next` before the inner iterator is
/// advanced again, most recent first.
#[derive(Debug, Clone)]
pub struct PushbackIterator<I: Iterator> {
    inner: I,
    pushed: Vec<I::Item>,
}

impl<I: Iterator> PushbackIterator<I> {
    /// Wrap an iterator.
    #[must_use]
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            pushed: Vec::new(),
        }
    }

    /// Return an item so the next call to `next` yields it again.
    pub fn push_back(&mut self, item: I::Item) {
        self.pushed.push(item);
    }
}

impl<I: Iterator> Iterator for PushbackIterator<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.pushed.pop().or_else(|| self.inner.next())
    }
}

/// One unfolded logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine<'src> {
    /// 1-based number of the first physical line
    pub number: usize,

    /// Line content with continuations joined
    pub text: Cow<'src, str>,
}

/// Unfolds physical lines into logical lines.
#[derive(Debug, Clone)]
pub struct UnfoldingLines<'src, I: Iterator<Item = &'src str>> {
    lines: PushbackIterator<Enumerate<I>>,
}

impl<'src, I: Iterator<Item = &'src str>> UnfoldingLines<'src, I> {
    /// Unfold physical lines, given without their line endings.
    #[must_use]
    pub fn new(lines: I) -> Self {
        Self {
            lines: PushbackIterator::new(lines.enumerate()),
        }
    }
}

impl<'src, I: Iterator<Item = &'src str>> Iterator for UnfoldingLines<'src, I> {
    type Item = LogicalLine<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, first) = self.lines.next()?;
            // a continuation with nothing to continue stands on its own
            let first = strip_fold(first).unwrap_or(first);
            if first.is_empty() {
                continue;
            }

            let mut text = Cow::Borrowed(first);
            while let Some((next_index, next)) = self.lines.next() {
                match strip_fold(next) {
                    Some(rest) => text.to_mut().push_str(rest),
                    None => {
                        self.lines.push_back((next_index, next));
                        break;
                    }
                }
            }

            return Some(LogicalLine {
                number: index + 1,
                text,
            });
        }
    }
}

fn strip_fold(line: &str) -> Option<&str> {
    line.strip_prefix([' ', '\t'])
}

/// Split text at LF or CRLF and unfold the result.
#[must_use]
pub fn unfold(src: &str) -> UnfoldingLines<'_, impl Iterator<Item = &str>> {
    UnfoldingLines::new(
        src.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line)),
    )
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module writes components back to the RFC 5545 text format, folding
//! long content lines on the way out. Components are written as
//! `BEGIN:`, their children in order, then `END:`; each property is a single
//! content line rendered by its `Display` implementation.
//!
//! # Example
//!
//! ```ignore
//! use recurcal_ical::{parse, formatter::{FormatOptions, format_component}};
//!
//! let input = std::fs::read_to_string("event.ics")?;
//! let components = parse(&input)?;
//!
//! let ics_string = format_component(&components[0], FormatOptions::default());
//! println!("{ics_string}");
//! ```

use std::fmt::{self, Write};

use crate::component::{Child, Component};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::property::Property;

/// Format a component, with its children, to a `String`.
#[must_use]
pub fn format_component(component: &Component, options: FormatOptions) -> String {
    Formatted { component, options }.to_string()
}

/// Fold a single logical line, without the final CRLF.
#[must_use]
pub fn fold_line(line: &str, options: FormatOptions) -> String {
    FoldedLine { line, options }.to_string()
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// Get the folding sequence for this style.
    #[must_use]
    const fn as_str(self) -> &'static str {
        match self {
            Self::Space => "\r\n ",
            Self::Tab => "\r\n\t",
        }
    }

    /// Get the length of the continuation character after CRLF.
    #[must_use]
    const fn continuation_len() -> usize {
        1 // Both SPACE and TAB are 1 byte
    }
}

/// iCalendar formatter that writes to any `fmt::Write` implementer.
///
/// Text written through its `fmt::Write` implementation is folded; line
/// endings are written with [`Formatter::writeln`] only.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
    /// Current line length in bytes (excluding the pending CRLF).
    line_length: usize,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
        }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a component and everything below it.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_component(&mut self, component: &Component) -> fmt::Result {
        write!(self, "{KW_BEGIN}:{}", component.kind)?;
        self.writeln()?;
        for (_, child) in component.children().iter() {
            match child {
                Child::Property(property) => self.write_property(property)?,
                Child::Component(sub) => self.write_component(sub)?,
            }
        }
        write!(self, "{KW_END}:{}", component.kind)?;
        self.writeln()
    }

    /// Write one property as a content line.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_property(&mut self, property: &Property) -> fmt::Result {
        write!(self, "{property}")?;
        self.writeln()
    }

    /// Write a CRLF line ending.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn writeln(&mut self) -> fmt::Result {
        self.writer.write_str("\r\n")?;
        self.line_length = 0;
        Ok(())
    }

    /// Insert line folding: CRLF + whitespace.
    fn insert_fold(&mut self) -> fmt::Result {
        self.writer.write_str(self.options.folding_style.as_str())?;
        self.line_length = FoldingStyle::continuation_len();
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let Some(max_len) = self.options.folding else {
            // Folding disabled, write directly
            return self.writer.write_str(s);
        };

        let mut rest = s;
        while !rest.is_empty() {
            let available = max_len.saturating_sub(self.line_length);
            let cut = safe_cut(rest, available);
            if cut == 0 {
                // a fresh line always takes at least one character
                if self.line_length > FoldingStyle::continuation_len() {
                    self.insert_fold()?;
                    continue;
                }
                let width = rest.chars().next().map_or(rest.len(), char::len_utf8);
                let (head, tail) = rest.split_at(width);
                self.writer.write_str(head)?;
                self.line_length += head.len();
                rest = tail;
                continue;
            }

            let (head, tail) = rest.split_at(cut);
            self.writer.write_str(head)?;
            self.line_length += head.len();
            rest = tail;
            if !rest.is_empty() {
                self.insert_fold()?;
            }
        }
        Ok(())
    }
}

/// Longest prefix of `s` that fits in `max_bytes` without breaking a
/// character.
fn safe_cut(s: &str, max_bytes: usize) -> usize {
    if max_bytes >= s.len() {
        return s.len();
    }
    let mut pos = max_bytes;
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

struct Formatted<'a> {
    component: &'a Component,
    options: FormatOptions,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Formatter::new(f, self.options).write_component(self.component)
    }
}

struct FoldedLine<'a> {
    line: &'a str,
    options: FormatOptions,
}

impl fmt::Display for FoldedLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Formatter::new(f, self.options).write_str(self.line)
    }
}

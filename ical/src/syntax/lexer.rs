// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for the name and parameter part of a content line, RFC 5545
//! Section 3.1.

use std::fmt::{self, Display};

use logos::Logos;

/// Token emitted by the content-line lexer
///
/// The lexer runs over one unfolded logical line. Everything after the
/// first unquoted colon is the value and is taken verbatim, so the lexer is
/// never asked to tokenize it.
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
pub enum Token<'a> {
    /// Semicolon (;), decimal codepoint 59
    #[token(";")]
    Semicolon,

    /// Colon (:), decimal codepoint 58
    #[token(":")]
    Colon,

    /// Equal sign (=), decimal codepoint 61
    #[token("=")]
    Equal,

    /// Comma (,), decimal codepoint 44
    #[token(",")]
    Comma,

    /// Quoted string, without its quotes
    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    Quoted(&'a str),

    /// Double quote (") that is never closed
    #[token("\"")]
    DQuote,

    /// Name characters: ALPHA, DIGIT and "-"
    #[regex("[0-9A-Za-z-]+")]
    Word(&'a str),

    /// Any run of other characters, allowed in unquoted parameter values
    #[regex(r#"[^";:=,0-9A-Za-z-]+"#)]
    Text(&'a str),
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Semicolon => write!(f, ";"),
            Self::Colon => write!(f, ":"),
            Self::Equal => write!(f, "="),
            Self::Comma => write!(f, ","),
            Self::Quoted(s) => write!(f, "\"{s}\""),
            Self::DQuote => write!(f, "\""),
            Self::Word(s) | Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quoted(s) => write!(f, "Quoted({s})"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::Text(s) => write!(f, "Text({s})"),
            _ => Display::fmt(self, f),
        }
    }
}

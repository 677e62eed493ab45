// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline   = name *(";" param ) ":" value CRLF
//! param         = param-name "=" param-value *("," param-value)
//! param-value   = paramtext / quoted-string
//! ```
//!
//! The line is split at the first colon that is not inside a quoted
//! parameter value; the value is returned verbatim for the value parsers.

use logos::{Lexer, Logos};

use crate::syntax::lexer::Token;

/// A scanned iCalendar content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'src> {
    /// Property name (e.g., "DTSTART", "SUMMARY")
    pub name: &'src str,

    /// Property parameters, in order
    pub params: Vec<ScannedParameter<'src>>,

    /// Property value, everything after the colon
    pub value: &'src str,
}

/// A scanned parameter from a content line.
///
/// Parameters have the format: `name=value` or `name=value1,value2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedParameter<'src> {
    /// Parameter name (e.g., "TZID", "VALUE")
    pub name: &'src str,

    /// Parameter values (comma-separated)
    pub values: Vec<ScannedValue<'src>>,
}

/// A single scanned parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedValue<'src> {
    /// The value, without quotes
    pub text: &'src str,

    /// Whether the value was quoted in the source
    pub quoted: bool,
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLineError {
    /// The line does not start with a name.
    #[error("missing property name")]
    EmptyName,

    /// The name contains characters outside ALPHA, DIGIT and "-".
    #[error("invalid property name `{0}`")]
    InvalidName(String),

    /// No colon separates the value.
    ///
    /// Example: `PROPNAME value` instead of `PROPNAME:value`
    #[error("missing colon in property `{0}`")]
    MissingColon(String),

    /// Empty parameter name.
    ///
    /// Example: `;=value`
    #[error("empty parameter name")]
    EmptyParameterName,

    /// Missing equals sign.
    ///
    /// Example: `TZID America/New_York`
    #[error("missing equals in parameter `{0}`")]
    MissingEquals(String),

    /// Unterminated quoted string.
    ///
    /// Example: `PARAM="unclosed value`
    #[error("unterminated quoted string in parameter `{0}`")]
    UnterminatedQuote(String),

    /// A quote in the middle of a value, or a character the lexer rejects.
    #[error("unexpected `{found}` in parameter `{param}`")]
    UnexpectedToken {
        /// Parameter being scanned
        param: String,
        /// Offending text
        found: String,
    },
}

/// Scan one unfolded line.
///
/// # Errors
///
/// If the line is not `name *(";" param) ":" value`.
pub fn scan_line(line: &str) -> Result<ContentLine<'_>, ContentLineError> {
    let mut lexer = Token::lexer(line);
    let name = match lexer.next() {
        Some(Ok(Token::Word(name))) => name,
        None | Some(Ok(Token::Colon | Token::Semicolon)) => {
            return Err(ContentLineError::EmptyName);
        }
        Some(_) => return Err(ContentLineError::InvalidName(lexer.slice().to_owned())),
    };

    let mut params = Vec::new();
    let mut delimiter = lexer.next();
    loop {
        match delimiter {
            Some(Ok(Token::Colon)) => {
                let value = line.get(lexer.span().end..).unwrap_or_default();
                return Ok(ContentLine {
                    name,
                    params,
                    value,
                });
            }
            Some(Ok(Token::Semicolon)) => {
                let (param, next) = scan_parameter(&mut lexer, line)?;
                params.push(param);
                delimiter = next;
            }
            None => return Err(ContentLineError::MissingColon(name.to_owned())),
            Some(_) => {
                let end = line.find([';', ':']).unwrap_or(line.len());
                let name = line.get(..end).unwrap_or(line);
                return Err(ContentLineError::InvalidName(name.to_owned()));
            }
        }
    }
}

type Next<'src> = Option<Result<Token<'src>, ()>>;

/// Scan one parameter after its `;`, returning the token that ended it.
fn scan_parameter<'src>(
    lexer: &mut Lexer<'src, Token<'src>>,
    line: &'src str,
) -> Result<(ScannedParameter<'src>, Next<'src>), ContentLineError> {
    let name = match lexer.next() {
        Some(Ok(Token::Word(name))) => name,
        _ => return Err(ContentLineError::EmptyParameterName),
    };
    if lexer.next() != Some(Ok(Token::Equal)) {
        return Err(ContentLineError::MissingEquals(name.to_owned()));
    }

    let unexpected = |found: &str| ContentLineError::UnexpectedToken {
        param: name.to_owned(),
        found: found.to_owned(),
    };

    let mut values = Vec::new();
    loop {
        let mut next = lexer.next();
        match next {
            Some(Ok(Token::Quoted(text))) => {
                values.push(ScannedValue { text, quoted: true });
                next = lexer.next();
            }
            Some(Ok(Token::DQuote)) => {
                return Err(ContentLineError::UnterminatedQuote(name.to_owned()));
            }
            Some(Ok(Token::Word(_) | Token::Text(_) | Token::Equal)) => {
                let start = lexer.span().start;
                let mut end = lexer.span().end;
                next = lexer.next();
                while let Some(Ok(Token::Word(_) | Token::Text(_) | Token::Equal)) = next {
                    end = lexer.span().end;
                    next = lexer.next();
                }
                let text = line.get(start..end).unwrap_or_default();
                values.push(ScannedValue {
                    text,
                    quoted: false,
                });
            }
            // empty paramtext
            _ => values.push(ScannedValue {
                text: "",
                quoted: false,
            }),
        }

        match next {
            Some(Ok(Token::Comma)) => {}
            Some(Ok(Token::Semicolon | Token::Colon)) | None => {
                return Ok((ScannedParameter { name, values }, next));
            }
            Some(Ok(Token::DQuote)) => {
                return Err(ContentLineError::UnterminatedQuote(name.to_owned()));
            }
            Some(_) => return Err(unexpected(lexer.slice())),
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value type parsing module for iCalendar property values.
//!
//! This module handles the parsing and validation of iCalendar value types
//! as defined in RFC 5545 Section 3.3.

pub(crate) mod datetime;
mod duration;
mod numeric;
mod period;
mod rrule;
mod text;

use std::fmt;

use chumsky::prelude::*;
use jiff::tz::TimeZone;

pub use datetime::{RawDateTime, ValueTime, ValueUtcOffset};
pub use duration::ValueDuration;
pub use period::ValuePeriod;
pub use rrule::{Frequency, RecurrenceRule, RuleViolation, WeekdayNum, weekday_code};
pub use text::{escape_text, split_unescaped, unescape_text};

use crate::datetime::Temporal;
use crate::keyword::{
    KW_BINARY, KW_BOOLEAN, KW_CAL_ADDRESS, KW_DATE, KW_DATETIME, KW_DURATION, KW_FLOAT,
    KW_INTEGER, KW_PERIOD, KW_RECUR, KW_TEXT, KW_TIME, KW_URI, KW_UTC_OFFSET, keyword_enum,
};
use crate::value::datetime::{value_date, value_date_time, value_time, value_utc_offset};
use crate::value::duration::value_duration;
use crate::value::numeric::{value_binary, value_boolean, value_float, value_integer};
use crate::value::period::{RawPeriod, value_period};

pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

keyword_enum! {
    /// Value data types defined in RFC 5545 Section 3.3.
    pub enum ValueKind {
        /// BINARY
        Binary => KW_BINARY,
        /// BOOLEAN
        Boolean => KW_BOOLEAN,
        /// CAL-ADDRESS
        CalAddress => KW_CAL_ADDRESS,
        /// DATE
        Date => KW_DATE,
        /// DATE-TIME
        DateTime => KW_DATETIME,
        /// DURATION
        Duration => KW_DURATION,
        /// FLOAT
        Float => KW_FLOAT,
        /// INTEGER
        Integer => KW_INTEGER,
        /// PERIOD
        Period => KW_PERIOD,
        /// RECUR
        Recur => KW_RECUR,
        /// TEXT
        Text => KW_TEXT,
        /// TIME
        Time => KW_TIME,
        /// URI
        Uri => KW_URI,
        /// UTC-OFFSET
        UtcOffset => KW_UTC_OFFSET,
    }
}

/// A single property value in its native representation.
///
/// The value type of a property is either its default or the one named by
/// the `VALUE` parameter. See RFC 5545 Section 3.3 for more details.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Inline base64 data, kept as written.
    Binary(String),

    /// "TRUE" or "FALSE".
    Boolean(bool),

    /// Calendar user address, usually a `mailto:` URI.
    CalAddress(String),

    /// DATE or DATE-TIME, with its zone binding.
    Temporal(Temporal),

    /// Duration of time.
    Duration(ValueDuration),

    /// Real number.
    Float(f64),

    /// Signed integer.
    Integer(i32),

    /// Precise period of time.
    Period(ValuePeriod),

    /// Recurrence rule.
    Recur(RecurrenceRule),

    /// Human-readable text, escapes resolved.
    Text(String),

    /// Time of day.
    Time(ValueTime),

    /// URI.
    Uri(String),

    /// Offset from UTC to local time.
    UtcOffset(ValueUtcOffset),

    /// Text that did not parse as the expected type, or of an unknown type.
    Raw(String),
}

impl Value {
    /// Get the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Binary(_) => ValueKind::Binary,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::CalAddress(_) => ValueKind::CalAddress,
            Value::Temporal(Temporal::Date(_)) => ValueKind::Date,
            Value::Temporal(_) => ValueKind::DateTime,
            Value::Duration(_) => ValueKind::Duration,
            Value::Float(_) => ValueKind::Float,
            Value::Integer(_) => ValueKind::Integer,
            Value::Period(_) => ValueKind::Period,
            Value::Recur(_) => ValueKind::Recur,
            Value::Text(_) => ValueKind::Text,
            Value::Time(_) => ValueKind::Time,
            Value::Uri(_) => ValueKind::Uri,
            Value::UtcOffset(_) => ValueKind::UtcOffset,
            Value::Raw(_) => ValueKind::Unknown,
        }
    }

    /// The instant, for DATE and DATE-TIME values.
    #[must_use]
    pub fn as_temporal(&self) -> Option<&Temporal> {
        match self {
            Value::Temporal(t) => Some(t),
            _ => None,
        }
    }

    /// The text, for TEXT, URI, CAL-ADDRESS and raw values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Uri(s) | Value::CalAddress(s) | Value::Raw(s) => Some(s),
            _ => None,
        }
    }

    /// The number, for INTEGER values.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The rule, for RECUR values.
    #[must_use]
    pub fn as_recur(&self) -> Option<&RecurrenceRule> {
        match self {
            Value::Recur(r) => Some(r),
            _ => None,
        }
    }

    /// The duration, for DURATION values.
    #[must_use]
    pub fn as_duration(&self) -> Option<ValueDuration> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Value text as it appears after the colon of a content line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Binary(s) | Value::CalAddress(s) | Value::Uri(s) | Value::Raw(s) => {
                f.write_str(s)
            }
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Temporal(t) => write!(f, "{t}"),
            Value::Duration(d) => write!(f, "{d}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Period(p) => write!(f, "{p}"),
            Value::Recur(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(&escape_text(s)),
            Value::Time(t) => write!(f, "{t}"),
            Value::UtcOffset(o) => write!(f, "{o}"),
        }
    }
}

/// Errors raised while converting value text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The text does not match the grammar of the value type.
    #[error("cannot parse `{text}` as {kind}: {reason}")]
    Unparseable {
        /// Expected value type
        kind: ValueKind,
        /// Offending text
        text: String,
        /// What went wrong
        reason: String,
    },
}

impl ValueError {
    pub(crate) fn with_text(self, text: &str) -> Self {
        match self {
            ValueError::Unparseable { kind, reason, .. } => ValueError::Unparseable {
                kind,
                text: text.to_owned(),
                reason,
            },
        }
    }
}

pub(crate) fn run_parser<'src, O>(
    parser: impl Parser<'src, &'src str, O, Extra<'src>>,
    kind: ValueKind,
    text: &'src str,
) -> Result<O, ValueError> {
    parser
        .then_ignore(end())
        .parse(text)
        .into_result()
        .map_err(|errs| ValueError::Unparseable {
            kind,
            text: text.to_owned(),
            reason: errs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        })
}

/// Parse one value of the given type.
///
/// `tz` is attached to DATE-TIME and PERIOD values that are not UTC.
///
/// # Errors
///
/// If the text does not match the grammar of `kind`.
pub fn parse_value(
    kind: ValueKind,
    text: &str,
    tz: Option<&TimeZone>,
) -> Result<Value, ValueError> {
    let temporal = |raw: RawDateTime| {
        Temporal::from_raw(raw, tz).map_err(|e| ValueError::Unparseable {
            kind,
            text: text.to_owned(),
            reason: e.to_string(),
        })
    };

    Ok(match kind {
        ValueKind::Binary => {
            run_parser(value_binary(), kind, text)?;
            Value::Binary(text.to_owned())
        }
        ValueKind::Boolean => Value::Boolean(run_parser(value_boolean(), kind, text)?),
        ValueKind::CalAddress => Value::CalAddress(text.to_owned()),
        ValueKind::Date => Value::Temporal(Temporal::Date(run_parser(value_date(), kind, text)?)),
        ValueKind::DateTime => {
            Value::Temporal(temporal(run_parser(value_date_time(), kind, text)?)?)
        }
        ValueKind::Duration => Value::Duration(run_parser(value_duration(), kind, text)?),
        ValueKind::Float => Value::Float(run_parser(value_float(), kind, text)?),
        ValueKind::Integer => Value::Integer(run_parser(value_integer(), kind, text)?),
        ValueKind::Period => Value::Period(match run_parser(value_period(), kind, text)? {
            RawPeriod::Explicit(start, end) => ValuePeriod::Explicit {
                start: temporal(start)?,
                end: temporal(end)?,
            },
            RawPeriod::Duration(start, duration) => ValuePeriod::Duration {
                start: temporal(start)?,
                duration,
            },
        }),
        ValueKind::Recur => Value::Recur(text.parse()?),
        ValueKind::Text => Value::Text(unescape_text(text)),
        ValueKind::Time => Value::Time(run_parser(value_time(), kind, text)?),
        ValueKind::Uri => Value::Uri(text.to_owned()),
        ValueKind::UtcOffset => Value::UtcOffset(run_parser(value_utc_offset(), kind, text)?),
        ValueKind::Unknown => Value::Raw(text.to_owned()),
    })
}

/// Parse a property value, attempting each allowed value type until one
/// succeeds.
///
/// When multiple value types are allowed (e.g., DATE or DATE-TIME), the
/// types are tried in order and the first successful parse wins. A
/// `separator` splits multi-valued properties; TEXT lists only split at
/// unescaped separators.
///
/// # Errors
///
/// The error of the first type tried, if no type matches.
pub fn parse_values(
    kinds: &[ValueKind],
    text: &str,
    separator: Option<char>,
    tz: Option<&TimeZone>,
) -> Result<Vec<Value>, ValueError> {
    let mut first_error = None;
    for &kind in kinds {
        let parts = match separator {
            Some(sep) if kind == ValueKind::Text => split_unescaped(text, sep),
            Some(sep) => text.split(sep).collect(),
            None => vec![text],
        };

        match parts
            .into_iter()
            .map(|part| parse_value(kind, part, tz))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(values) => return Ok(values),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    Err(first_error.unwrap_or_else(|| ValueError::Unparseable {
        kind: ValueKind::Unknown,
        text: text.to_owned(),
        reason: "no value type allowed".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parses_value_by_kind() {
        assert_eq!(
            parse_value(ValueKind::Date, "19970714", None).unwrap(),
            Value::Temporal(Temporal::Date(date(1997, 7, 14)))
        );
        assert_eq!(
            parse_value(ValueKind::Text, r"Meeting\, room 1", None).unwrap(),
            Value::Text("Meeting, room 1".to_owned())
        );
        assert_eq!(
            parse_value(ValueKind::Integer, "-5", None).unwrap(),
            Value::Integer(-5)
        );
        assert_eq!(
            parse_value(ValueKind::Unknown, "anything;goes", None).unwrap(),
            Value::Raw("anything;goes".to_owned())
        );
    }

    #[test]
    fn attaches_zone_to_local_date_time() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let value = parse_value(ValueKind::DateTime, "19980119T020000", Some(&tz)).unwrap();
        let temporal = value.as_temporal().unwrap();
        assert_eq!(temporal.tzid(), Some("America/New_York"));
        assert_eq!(temporal.wall_clock(), date(1998, 1, 19).at(2, 0, 0, 0));

        let value = parse_value(ValueKind::DateTime, "19980119T070000Z", Some(&tz)).unwrap();
        assert!(matches!(value.as_temporal(), Some(Temporal::Utc(_))));
    }

    #[test]
    fn tries_allowed_kinds_in_order() {
        let values = parse_values(
            &[ValueKind::DateTime, ValueKind::Date],
            "19970714,19970715",
            Some(','),
            None,
        )
        .unwrap();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.kind() == ValueKind::Date));
    }

    #[test]
    fn splits_text_lists_at_unescaped_separators() {
        let values = parse_values(&[ValueKind::Text], r"a\,b,c", Some(','), None).unwrap();
        assert_eq!(
            values,
            vec![Value::Text("a,b".to_owned()), Value::Text("c".to_owned())]
        );
    }

    #[test]
    fn reports_first_error() {
        let err = parse_values(&[ValueKind::Integer], "ten", None, None).unwrap_err();
        assert!(matches!(
            err,
            ValueError::Unparseable {
                kind: ValueKind::Integer,
                ..
            }
        ));
    }

    #[test]
    fn displays_value_text() {
        assert_eq!(Value::Text("a,b;c".to_owned()).to_string(), r"a\,b\;c");
        assert_eq!(Value::Boolean(true).to_string(), "TRUE");
        assert_eq!(Value::Float(-122.083_932).to_string(), "-122.083932");
    }
}

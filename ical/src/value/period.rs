// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period value type parser as defined in RFC 5545 Section 3.3.9.

use std::fmt;

use chumsky::prelude::*;

use crate::datetime::Temporal;
use crate::value::Extra;
use crate::value::datetime::{RawDateTime, value_date_time};
use crate::value::duration::{ValueDuration, value_duration};

/// Period of Time value defined in RFC 5545 Section 3.3.9
#[derive(Debug, Clone, PartialEq)]
pub enum ValuePeriod {
    /// Explicit period with start and end date-time
    ///
    /// Format: `date-time "/" date-time`
    Explicit {
        /// Start date-time
        start: Temporal,

        /// End date-time
        end: Temporal,
    },

    /// Period with start date-time and duration
    ///
    /// Format: `date-time "/" dur-value`
    Duration {
        /// Start date-time
        start: Temporal,

        /// Duration
        duration: ValueDuration,
    },
}

impl ValuePeriod {
    /// Start of the period.
    #[must_use]
    pub fn start(&self) -> &Temporal {
        match self {
            ValuePeriod::Explicit { start, .. } | ValuePeriod::Duration { start, .. } => start,
        }
    }
}

impl fmt::Display for ValuePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuePeriod::Explicit { start, end } => write!(f, "{start}/{end}"),
            ValuePeriod::Duration { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// Period as written on the wire; zones are attached by the caller.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RawPeriod {
    Explicit(RawDateTime, RawDateTime),
    Duration(RawDateTime, ValueDuration),
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// period     = period-explicit / period-start
///
/// period-explicit = date-time "/" date-time
/// ; [ISO.8601.2004] complete representation basic format for a
/// ; period of time consisting of a start and end.  The start MUST
/// ; be before the end.
///
/// period-start = date-time "/" dur-value
/// ; [ISO.8601.2004] complete representation basic format for a
/// ; period of time consisting of a start and positive duration
/// ; of time.
/// ```
pub(crate) fn value_period<'src>() -> impl Parser<'src, &'src str, RawPeriod, Extra<'src>> + Clone
{
    // Both date-times must have the same UTC flag (both UTC or both floating)
    let explicit = value_date_time()
        .then_ignore(just('/'))
        .then(value_date_time())
        .try_map(|(start, end), span| {
            if start.utc == end.utc {
                Ok(RawPeriod::Explicit(start, end))
            } else {
                Err(Rich::custom(span, "period start and end disagree on UTC"))
            }
        });

    let start = value_date_time()
        .then_ignore(just('/'))
        .then(value_duration())
        .try_map(|(start, duration), span| {
            if duration.is_negative() {
                Err(Rich::custom(span, "period duration must be positive"))
            } else {
                Ok(RawPeriod::Duration(start, duration))
            }
        });

    choice((explicit, start))
}

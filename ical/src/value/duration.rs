// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type parser as defined in RFC 5545 Section 3.3.6.

use std::fmt;

use chumsky::prelude::*;
use jiff::{SignedDuration, Span};

use crate::value::Extra;

/// Duration Value defined in RFC 5545 Section 3.3.6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDuration {
    /// Date and Time Duration
    DateTime {
        /// Whether the duration is positive
        positive: bool,
        /// Day Duration
        day: u32,
        /// Hour Duration
        hour: u32,
        /// Minute Duration
        minute: u32,
        /// Second Duration
        second: u32,
    },

    /// Week Duration
    Week {
        /// Whether the duration is positive
        positive: bool,
        /// Week Duration
        week: u32,
    },
}

impl ValueDuration {
    /// Build the shortest duration text for a number of seconds, using a day
    /// part for whole days.
    #[must_use]
    pub fn from_seconds(seconds: i64) -> Self {
        let positive = seconds >= 0;
        let abs = seconds.unsigned_abs();
        let day = abs / 86_400;
        let rest = abs % 86_400;
        ValueDuration::DateTime {
            positive,
            day: u32::try_from(day).unwrap_or(u32::MAX),
            hour: u32::try_from(rest / 3600).unwrap_or(0),
            minute: u32::try_from(rest % 3600 / 60).unwrap_or(0),
            second: u32::try_from(rest % 60).unwrap_or(0),
        }
    }

    /// Build from an exact duration, e.g. the distance between two instants.
    #[must_use]
    pub fn from_signed_duration(duration: SignedDuration) -> Self {
        Self::from_seconds(duration.as_secs())
    }

    /// Whether the duration runs backwards.
    #[must_use]
    pub fn is_negative(self) -> bool {
        match self {
            ValueDuration::DateTime { positive, .. } | ValueDuration::Week { positive, .. } => {
                !positive
            }
        }
    }

    /// Nominal span: weeks and days are calendar days, the rest clock time.
    ///
    /// # Errors
    /// If a unit is out of the range jiff supports.
    pub fn to_span(self) -> Result<Span, jiff::Error> {
        let (positive, span) = match self {
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => (
                positive,
                Span::new()
                    .try_days(i64::from(day))?
                    .try_hours(i64::from(hour))?
                    .try_minutes(i64::from(minute))?
                    .try_seconds(i64::from(second))?,
            ),
            ValueDuration::Week { positive, week } => {
                (positive, Span::new().try_weeks(i64::from(week))?)
            }
        };
        Ok(if positive { span } else { span.negate() })
    }
}

impl fmt::Display for ValueDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueDuration::Week { positive, week } => {
                let sign = if positive { "" } else { "-" };
                write!(f, "{sign}P{week}W")
            }
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => {
                f.write_str(if positive { "P" } else { "-P" })?;
                if day > 0 {
                    write!(f, "{day}D")?;
                }
                if hour == 0 && minute == 0 && second == 0 {
                    if day == 0 {
                        f.write_str("T0S")?;
                    }
                    return Ok(());
                }
                f.write_str("T")?;
                // dur-hour and dur-minute may only be followed by the next unit
                if hour > 0 {
                    write!(f, "{hour}H")?;
                    if minute > 0 || second > 0 {
                        write!(f, "{minute}M")?;
                    }
                } else if minute > 0 {
                    write!(f, "{minute}M")?;
                }
                if second > 0 {
                    write!(f, "{second}S")?;
                }
                Ok(())
            }
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
pub(crate) fn value_duration<'src>()
-> impl Parser<'src, &'src str, ValueDuration, Extra<'src>> + Clone {
    // case-sensitive
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .to_slice()
        .try_map(|digits, span| {
            lexical::parse::<u32, _>(digits)
                .map_err(|_| Rich::custom(span, format!("`{digits}` is out of range")))
        });

    let week = int.clone().then_ignore(just('W'));

    // Base parsers for each time component
    let second_val = int.clone().then_ignore(just('S'));
    let minute_val = int.clone().then_ignore(just('M'));
    let hour_val = int.clone().then_ignore(just('H'));

    // dur-second = 1*DIGIT "S"
    let second_only = second_val.clone().map(|s| (0, 0, s));

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_with_second = minute_val
        .clone()
        .then(second_val.clone().or_not())
        .map(|(m, s)| (0, m, s.unwrap_or(0)));

    // dur-hour = 1*DIGIT "H" [dur-minute]
    let hour_with_minute = hour_val
        .then(minute_val.then(second_val.or_not()).or_not())
        .map(|(h, opt_ms)| match opt_ms {
            Some((m, opt_s)) => (h, m, opt_s.unwrap_or(0)),
            None => (h, 0, 0),
        });

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour_with_minute, minute_with_second, second_only)));

    let day = int.then_ignore(just('D'));
    let date = day.then(time.clone().or_not());

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));
    let prefix = sign.then_ignore(just('P'));
    choice((
        prefix.clone().then(date).map(|(positive, (day, time))| {
            let (hour, minute, second) = time.unwrap_or((0, 0, 0));
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            }
        }),
        prefix
            .clone()
            .then(time)
            .map(|(positive, (h, m, s))| ValueDuration::DateTime {
                positive,
                day: 0,
                hour: h,
                minute: m,
                second: s,
            }),
        prefix
            .then(week)
            .map(|(positive, week)| ValueDuration::Week { positive, week }),
    ))
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;

    use super::*;

    fn parse(src: &str) -> Result<ValueDuration, Vec<Rich<'_, char>>> {
        value_duration().then_ignore(end()).parse(src).into_result()
    }

    #[test]
    fn parses_duration() {
        use ValueDuration::{DateTime, Week};

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.6
            ("P15DT5H0M20S", DateTime { positive: true, day: 15, hour: 5, minute: 0, second: 20 }),
            ("P2W",  Week { positive: true,  week: 2 }),
            // extra tests
            ("+P3W", Week { positive: true,  week: 3 }),
            ("-P1W", Week { positive: false, week: 1 }),
            ("+P3DT4H5M6S",  DateTime { positive:  true, day: 3, hour:  4, minute:  5, second:  6 }),
            ("-PT10H11M12S", DateTime { positive: false, day: 0, hour: 10, minute: 11, second: 12 }),
            ("PT15M",        DateTime { positive: true,  day: 0, hour:  0, minute: 15, second:  0 }),
            ("PT30S",        DateTime { positive: true,  day: 0, hour:  0, minute:  0, second: 30 }),
            ("PT1H30M",      DateTime { positive: true,  day: 0, hour:  1, minute: 30, second:  0 }),
            ("-PT15M",       DateTime { positive: false, day: 0, hour:  0, minute: 15, second:  0 }),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "Failed to parse: {src}");
        }

        let fail_cases = [
            "P",           // missing duration value
            "PT",          // missing time value
            "P3X",         // invalid designator
            "P-3W",        // invalid negative sign position
            "P3DT4H5M6",   // missing 'S' designator
            "3W",          // missing 'P' designator
            "P10H11M12S3", // missing 'T' designator
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn formats_duration() {
        for src in ["P15DT5H0M20S", "P2W", "-P1W", "PT15M", "PT30S", "PT1H30M", "P1D", "PT0S", "-PT10H11M12S"] {
            assert_eq!(parse(src).unwrap().to_string(), src);
        }
        assert_eq!(parse("+P3W").unwrap().to_string(), "P3W");
    }

    #[test]
    fn converts_to_span() {
        let span = parse("-P1DT2H").unwrap().to_span().unwrap();
        assert_eq!(span.fieldwise(), (-1).day().hours(-2).fieldwise());
        let span = parse("P2W").unwrap().to_span().unwrap();
        assert_eq!(span.fieldwise(), 2.weeks().fieldwise());
    }

    #[test]
    fn builds_from_seconds() {
        assert_eq!(ValueDuration::from_seconds(90_061).to_string(), "P1DT1H1M1S");
        assert_eq!(ValueDuration::from_seconds(-3600).to_string(), "-PT1H");
        assert_eq!(ValueDuration::from_seconds(0).to_string(), "PT0S");
    }
}

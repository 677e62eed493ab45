// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for date and time values as defined in RFC 5545 Section 3.3.

use std::fmt;

use chumsky::prelude::*;
use jiff::civil::{Date, DateTime, Time};

use crate::value::Extra;

/// Date-Time value as written on the wire, before a time zone is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDateTime {
    /// Civil date-time.
    pub date_time: DateTime,

    /// Whether the value carried the trailing 'Z'.
    pub utc: bool,
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Civil time, leap second 60 contracted to 59.
    pub time: Time,

    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

impl fmt::Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time(f, self.time)?;
        if self.utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// UTC Offset Value defined in RFC 5545 Section 3.3.14
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueUtcOffset {
    /// Whether the offset is positive
    pub positive: bool,

    /// Hour, 0-23
    pub hour: u8,

    /// Minute, 0-59
    pub minute: u8,

    /// Second, 0-60, optional
    pub second: Option<u8>,
}

impl ValueUtcOffset {
    /// Offset from UTC in seconds.
    #[must_use]
    pub fn seconds(self) -> i32 {
        let abs = i32::from(self.hour) * 3600
            + i32::from(self.minute) * 60
            + i32::from(self.second.unwrap_or(0));
        if self.positive { abs } else { -abs }
    }
}

impl fmt::Display for ValueUtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{sign}{:02}{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, "{second:02}")?;
        }
        Ok(())
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub(crate) fn value_date<'src>() -> impl Parser<'src, &'src str, Date, Extra<'src>> + Clone {
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            Date::new(year, month, day).map_err(|_| {
                Rich::custom(span, format!("{year:04}-{month:02}-{day:02} does not exist"))
            })
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
pub(crate) fn value_time<'src>() -> impl Parser<'src, &'src str, ValueTime, Extra<'src>> + Clone {
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .try_map(|(((hour, minute), second), utc), span| {
            // NOTE: leap second 60 is contracted to 59
            Time::new(hour, minute, second.min(59), 0)
                .map(|time| ValueTime {
                    time,
                    utc: utc.is_some(),
                })
                .map_err(|e| Rich::custom(span, e.to_string()))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
pub(crate) fn value_date_time<'src>()
-> impl Parser<'src, &'src str, RawDateTime, Extra<'src>> + Clone {
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| RawDateTime {
            date_time: date.to_datetime(time.time),
            utc: time.utc,
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
pub(crate) fn value_utc_offset<'src>()
-> impl Parser<'src, &'src str, ValueUtcOffset, Extra<'src>> + Clone {
    select! { c @ ('+' | '-') => c }
        .then(time_hour())
        .then(time_minute())
        .then(time_second().or_not())
        .map(|(((sign, hour), minute), second)| ValueUtcOffset {
            positive: sign != '-',
            hour: hour.unsigned_abs(),
            minute: minute.unsigned_abs(),
            second: second.map(i8::unsigned_abs),
        })
}

/// Write a date as `YYYYMMDD`.
pub(crate) fn write_date(f: &mut impl fmt::Write, date: Date) -> fmt::Result {
    write!(f, "{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Write a time as `HHMMSS`.
pub(crate) fn write_time(f: &mut impl fmt::Write, time: Time) -> fmt::Result {
    write!(f, "{:02}{:02}{:02}", time.hour(), time.minute(), time.second())
}

/// Write a date-time as `YYYYMMDDTHHMMSS`, without any UTC designator.
pub(crate) fn write_date_time(f: &mut impl fmt::Write, dt: DateTime) -> fmt::Result {
    write_date(f, dt.date())?;
    f.write_char('T')?;
    write_time(f, dt.time())
}

fn time_hour<'src>() -> impl Parser<'src, &'src str, i8, Extra<'src>> + Copy {
    choice((
        i8_0_1().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(i8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src>() -> impl Parser<'src, &'src str, i8, Extra<'src>> + Copy {
    i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src>() -> impl Parser<'src, &'src str, i8, Extra<'src>> + Copy {
    choice((
        i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0').ignored().to(60)), // leap second
    ))
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        const fn $fname<'src>() -> impl Parser<'src, &'src str, $ty, Extra<'src>> + Copy {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_5 : i8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn parses_date() {
        fn parse(src: &str) -> Result<Date, Vec<Rich<'_, char>>> {
            value_date().then_ignore(end()).parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.4
            ("19970714", date(1997, 7, 14)),
            // extra tests
            ("20240101", date(2024, 1, 1)),
            ("20000229", date(2000, 2, 29)), // leap year
            ("19000101", date(1900, 1, 1)),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected);
        }

        let fail_cases = [
            "20241301",  // invalid month
            "20240001",  // invalid month
            "abcd1234",  // invalid characters
            "2024011",   // invalid length
            "202401011", // invalid length
            "19970230",  // invalid date
            "20230229",  // not a leap year
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_time() {
        fn parse(src: &str) -> Result<ValueTime, Vec<Rich<'_, char>>> {
            value_time().then_ignore(end()).parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.12
            ("230000", ValueTime { time: time(23, 0, 0, 0), utc: false }),
            ("070000Z", ValueTime { time: time(7, 0, 0, 0), utc: true }),
            ("083000", ValueTime { time: time(8, 30, 0, 0), utc: false }),
            // leap second
            ("235960", ValueTime { time: time(23, 59, 59, 0), utc: false }),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected);
        }

        let fail_cases = ["240000", "126000", "120061", "1200", "120000z"];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_date_time() {
        fn parse(src: &str) -> Result<RawDateTime, Vec<Rich<'_, char>>> {
            value_date_time().then_ignore(end()).parse(src).into_result()
        }

        let floating = parse("19980118T230000").unwrap();
        assert_eq!(floating.date_time, date(1998, 1, 18).at(23, 0, 0, 0));
        assert!(!floating.utc);

        let utc = parse("19980119T070000Z").unwrap();
        assert_eq!(utc.date_time, date(1998, 1, 19).at(7, 0, 0, 0));
        assert!(utc.utc);

        for src in ["19980118", "19980118T", "19980118 230000", "19980118T2300"] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_utc_offset() {
        fn parse(src: &str) -> Result<ValueUtcOffset, Vec<Rich<'_, char>>> {
            value_utc_offset().then_ignore(end()).parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            ("-0500", ValueUtcOffset { positive: false, hour: 5, minute: 0, second: None }, -18000),
            ("+0100", ValueUtcOffset { positive: true, hour: 1, minute: 0, second: None }, 3600),
            ("+053030", ValueUtcOffset { positive: true, hour: 5, minute: 30, second: Some(30) }, 19830),
        ];
        for (src, expected, seconds) in success_cases {
            let offset = parse(src).unwrap();
            assert_eq!(offset, expected);
            assert_eq!(offset.seconds(), seconds);
            assert_eq!(offset.to_string(), src);
        }

        for src in ["0500", "+05", "+2500", "*0500"] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn writes_date_time() {
        let mut out = String::new();
        write_date_time(&mut out, date(2024, 3, 9).at(7, 5, 0, 0)).unwrap();
        assert_eq!(out, "20240309T070500");
    }
}

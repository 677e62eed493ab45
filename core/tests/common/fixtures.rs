// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

#![allow(dead_code)]

use jiff::civil::{DateTime, date};
use recurcal_core::Calendar;
use recurcal_ical::{Component, Temporal};

/// UID of the daily series in [`daily_store`].
pub const DAILY_UID: &str = "daily@example.com";

/// UID of the weekly series in [`weekly_store`].
pub const WEEKLY_UID: &str = "weekly@example.com";

/// Ten daily stand-ups from 2016-05-10 at 10:00, floating, one hour each.
#[must_use]
pub fn daily_store() -> Calendar {
    Calendar::parse(
        "BEGIN:VCALENDAR\r
PRODID:-//Test//EN\r
VERSION:2.0\r
BEGIN:VEVENT\r
UID:daily@example.com\r
DTSTAMP:20160101T000000Z\r
DTSTART:20160510T100000\r
DTEND:20160510T110000\r
RRULE:FREQ=DAILY;COUNT=10\r
SUMMARY:Stand-up\r
END:VEVENT\r
END:VCALENDAR\r
",
    )
    .unwrap()
}

/// [`daily_store`] after its instances from 2016-05-16 on were moved to
/// 14:00 with a range override.
#[must_use]
pub fn split_daily_store() -> Calendar {
    Calendar::parse(
        "BEGIN:VCALENDAR\r
PRODID:-//Test//EN\r
VERSION:2.0\r
BEGIN:VEVENT\r
UID:daily@example.com\r
DTSTAMP:20160101T000000Z\r
DTSTART:20160510T100000\r
DTEND:20160510T110000\r
RRULE:FREQ=DAILY;UNTIL=20160515T100000\r
SUMMARY:Stand-up\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:daily@example.com\r
DTSTAMP:20160101T000000Z\r
SEQUENCE:1\r
RECURRENCE-ID;RANGE=THISANDFUTURE:20160516T100000\r
DTSTART:20160516T140000\r
DTEND:20160516T150000\r
RRULE:FREQ=DAILY;COUNT=4\r
SUMMARY:Late stand-up\r
END:VEVENT\r
END:VCALENDAR\r
",
    )
    .unwrap()
}

/// An endless weekly review on Mondays from 2016-05-02 at 10:00 in Los
/// Angeles, with the 2016-05-09 instance moved to 11:00.
#[must_use]
pub fn weekly_store() -> Calendar {
    Calendar::parse(
        "BEGIN:VCALENDAR\r
PRODID:-//Test//EN\r
VERSION:2.0\r
BEGIN:VEVENT\r
UID:weekly@example.com\r
DTSTAMP:20160101T000000Z\r
DTSTART;TZID=America/Los_Angeles:20160502T100000\r
DURATION:PT1H\r
RRULE:FREQ=WEEKLY\r
SUMMARY:Review\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:weekly@example.com\r
DTSTAMP:20160101T000000Z\r
RECURRENCE-ID;TZID=America/Los_Angeles:20160509T100000\r
DTSTART;TZID=America/Los_Angeles:20160509T110000\r
DURATION:PT1H\r
SUMMARY:Review\r
END:VEVENT\r
END:VCALENDAR\r
",
    )
    .unwrap()
}

/// A floating date-time in May 2016.
#[must_use]
pub fn floating(day: i8, hour: i8) -> Temporal {
    Temporal::Floating(date(2016, 5, day).at(hour, 0, 0, 0))
}

/// A date-time in May 2016 in Los Angeles.
#[must_use]
pub fn la(day: i8, hour: i8) -> Temporal {
    Temporal::zoned(date(2016, 5, day).at(hour, 0, 0, 0), "America/Los_Angeles").unwrap()
}

/// A copy of `component` starting at `start`, its length kept.
#[must_use]
pub fn moved(component: &Component, start: &Temporal) -> Component {
    let span = component.instance_span();
    let mut copy = component.clone();
    copy.set_dtstart(Some(start));
    if copy.dtend().is_some() {
        copy.set_dtend(Some(&start.checked_add(span).unwrap()));
    }
    copy
}

/// Wall-clock starts of a series' occurrences in May 2016.
#[must_use]
pub fn wall_clocks(calendar: &Calendar, uid: &str) -> Vec<DateTime> {
    let start = Temporal::Floating(date(2016, 5, 1).at(0, 0, 0, 0));
    let end = Temporal::Floating(date(2016, 6, 1).at(0, 0, 0, 0));
    calendar
        .series_occurrences(uid, &start, &end)
        .unwrap()
        .into_iter()
        .map(|o| o.start.wall_clock())
        .collect()
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar instants: dates, floating date-times, UTC instants and zoned
//! date-times.

use std::cmp::Ordering;
use std::fmt;

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp, Zoned};

use crate::value::datetime::{RawDateTime, write_date, write_date_time};

/// A DATE or DATE-TIME value, with its time zone binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Temporal {
    /// All-day date, `VALUE=DATE`.
    Date(Date),

    /// Wall-clock date-time not bound to any zone.
    Floating(DateTime),

    /// Absolute instant, written with a trailing `Z`.
    Utc(Timestamp),

    /// Wall-clock date-time bound to a `TZID`.
    Zoned(Zoned),
}

/// The four shapes a [`Temporal`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    /// All-day date.
    Date,
    /// Floating date-time.
    Floating,
    /// UTC date-time.
    Utc,
    /// Zoned date-time.
    Zoned,
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemporalKind::Date => "date",
            TemporalKind::Floating => "floating date-time",
            TemporalKind::Utc => "UTC date-time",
            TemporalKind::Zoned => "zoned date-time",
        })
    }
}

impl Temporal {
    /// Build a value from its wire form, attaching `tz` when the value is
    /// not already UTC.
    ///
    /// # Errors
    /// If the wall clock cannot be resolved in the zone.
    pub fn from_raw(raw: RawDateTime, tz: Option<&TimeZone>) -> Result<Self, jiff::Error> {
        match (raw.utc, tz) {
            (true, _) => Ok(Temporal::Utc(raw.date_time.to_zoned(TimeZone::UTC)?.timestamp())),
            (false, Some(tz)) => Ok(Temporal::Zoned(raw.date_time.to_zoned(tz.clone())?)),
            (false, None) => Ok(Temporal::Floating(raw.date_time)),
        }
    }

    /// Wall clock `dt` interpreted in UTC.
    ///
    /// # Errors
    /// If the date-time is outside the supported range.
    pub fn utc(dt: DateTime) -> Result<Self, jiff::Error> {
        Ok(Temporal::Utc(dt.to_zoned(TimeZone::UTC)?.timestamp()))
    }

    /// Wall clock `dt` in the IANA zone `tzid`.
    ///
    /// # Errors
    /// If the zone is unknown or the date-time is outside the supported range.
    pub fn zoned(dt: DateTime, tzid: &str) -> Result<Self, jiff::Error> {
        Ok(Temporal::Zoned(dt.in_tz(tzid)?))
    }

    /// Shape of this value.
    #[must_use]
    pub fn kind(&self) -> TemporalKind {
        match self {
            Temporal::Date(_) => TemporalKind::Date,
            Temporal::Floating(_) => TemporalKind::Floating,
            Temporal::Utc(_) => TemporalKind::Utc,
            Temporal::Zoned(_) => TemporalKind::Zoned,
        }
    }

    /// Whether this is an all-day date.
    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Temporal::Date(_))
    }

    /// Wall-clock reading; UTC values are read in UTC, dates at midnight.
    #[must_use]
    pub fn wall_clock(&self) -> DateTime {
        match self {
            Temporal::Date(d) => d.to_datetime(Time::midnight()),
            Temporal::Floating(dt) => *dt,
            Temporal::Utc(ts) => ts.to_zoned(TimeZone::UTC).datetime(),
            Temporal::Zoned(z) => z.datetime(),
        }
    }

    /// Calendar date of the wall clock.
    #[must_use]
    pub fn date(&self) -> Date {
        self.wall_clock().date()
    }

    /// Time zone bound to the value, UTC included.
    #[must_use]
    pub fn time_zone(&self) -> Option<TimeZone> {
        match self {
            Temporal::Date(_) | Temporal::Floating(_) => None,
            Temporal::Utc(_) => Some(TimeZone::UTC),
            Temporal::Zoned(z) => Some(z.time_zone().clone()),
        }
    }

    /// IANA name to be written as `TZID`, only for zoned values.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match self {
            Temporal::Zoned(z) => z.time_zone().iana_name(),
            _ => None,
        }
    }

    /// Same shape and zone, but a different wall clock.
    ///
    /// # Errors
    /// If the wall clock cannot be resolved in the zone.
    pub fn with_wall_clock(&self, dt: DateTime) -> Result<Self, jiff::Error> {
        Ok(match self {
            Temporal::Date(_) => Temporal::Date(dt.date()),
            Temporal::Floating(_) => Temporal::Floating(dt),
            Temporal::Utc(_) => Temporal::utc(dt)?,
            Temporal::Zoned(z) => Temporal::Zoned(dt.to_zoned(z.time_zone().clone())?),
        })
    }

    /// Convert into the shape (and zone) of `template`.
    ///
    /// Absolute values keep their instant when the target is absolute too;
    /// everything else keeps its wall clock.
    ///
    /// # Errors
    /// If the wall clock cannot be resolved in the target zone.
    pub fn coerce_to(&self, template: &Temporal) -> Result<Self, jiff::Error> {
        Ok(match template {
            Temporal::Date(_) => Temporal::Date(self.date()),
            Temporal::Floating(_) => Temporal::Floating(self.wall_clock()),
            Temporal::Utc(_) => match self {
                Temporal::Utc(ts) => Temporal::Utc(*ts),
                Temporal::Zoned(z) => Temporal::Utc(z.timestamp()),
                other => Temporal::utc(other.wall_clock())?,
            },
            Temporal::Zoned(tpl) => {
                let tz = tpl.time_zone().clone();
                match self {
                    Temporal::Utc(ts) => Temporal::Zoned(ts.to_zoned(tz)),
                    Temporal::Zoned(z) => Temporal::Zoned(z.with_time_zone(tz)),
                    other => Temporal::Zoned(other.wall_clock().to_zoned(tz)?),
                }
            }
        })
    }

    /// Order against `other` after coercing it into this value's shape.
    #[must_use]
    pub fn compare(&self, other: &Temporal) -> Ordering {
        match other.coerce_to(self) {
            Ok(other) => match (self, &other) {
                (Temporal::Date(a), Temporal::Date(b)) => a.cmp(b),
                (Temporal::Floating(a), Temporal::Floating(b)) => a.cmp(b),
                (Temporal::Utc(a), Temporal::Utc(b)) => a.cmp(b),
                (Temporal::Zoned(a), Temporal::Zoned(b)) => a.timestamp().cmp(&b.timestamp()),
                _ => self.wall_clock().cmp(&other.wall_clock()),
            },
            Err(_) => self.wall_clock().cmp(&other.wall_clock()),
        }
    }

    /// Whether both denote the same point once coerced.
    #[must_use]
    pub fn same_instant(&self, other: &Temporal) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Add a span; zoned values use the zone's rules, dates move by whole days.
    ///
    /// # Errors
    /// If the result overflows.
    pub fn checked_add(&self, span: Span) -> Result<Self, jiff::Error> {
        Ok(match self {
            Temporal::Date(d) => {
                Temporal::Date(d.to_datetime(Time::midnight()).checked_add(span)?.date())
            }
            Temporal::Floating(dt) => Temporal::Floating(dt.checked_add(span)?),
            Temporal::Utc(ts) => {
                Temporal::Utc(ts.to_zoned(TimeZone::UTC).checked_add(span)?.timestamp())
            }
            Temporal::Zoned(z) => Temporal::Zoned(z.checked_add(span)?),
        })
    }

    /// Wall-clock difference from `self` to `other`, in days and smaller units.
    ///
    /// # Errors
    /// If the difference cannot be represented.
    pub fn wall_clock_until(&self, other: &Temporal) -> Result<Span, jiff::Error> {
        self.wall_clock().until(other.wall_clock())
    }

    /// Absolute instant, for UTC and zoned values.
    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Temporal::Utc(ts) => Some(*ts),
            Temporal::Zoned(z) => Some(z.timestamp()),
            Temporal::Date(_) | Temporal::Floating(_) => None,
        }
    }

    /// Length from `self` to `other`: elapsed time when both are absolute,
    /// the wall-clock difference otherwise.
    ///
    /// # Errors
    /// If the difference cannot be represented.
    pub fn span_until(&self, other: &Temporal) -> Result<Span, jiff::Error> {
        match (self.timestamp(), other.timestamp()) {
            (Some(a), Some(b)) => Span::try_from(b.duration_since(a)),
            _ => self.wall_clock_until(other),
        }
    }

    /// Shift by the wall-clock amount, keeping shape and zone.
    ///
    /// # Errors
    /// If the shifted wall clock overflows or cannot be resolved.
    pub fn shift_wall_clock(&self, span: Span) -> Result<Self, jiff::Error> {
        self.with_wall_clock(self.wall_clock().checked_add(span)?)
    }
}

impl fmt::Display for Temporal {
    /// Value text as it appears on a content line; the zone goes in `TZID`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write_date(f, *d),
            Temporal::Floating(dt) => write_date_time(f, *dt),
            Temporal::Utc(ts) => {
                write_date_time(f, ts.to_zoned(TimeZone::UTC).datetime())?;
                f.write_str("Z")
            }
            Temporal::Zoned(z) => write_date_time(f, z.datetime()),
        }
    }
}

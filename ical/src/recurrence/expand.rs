// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of a single RRULE on the wall clock of its DTSTART.
//!
//! Periods (years, months, weeks, days, hours, ...) are stepped from the
//! period holding DTSTART at INTERVAL. Each period is expanded into the
//! candidate dates allowed by the BYxxx parts, crossed with the times of
//! day, narrowed by BYSETPOS, and emitted in order. Only candidates after
//! DTSTART are emitted; DTSTART itself is added by the caller.

use std::collections::VecDeque;

use jiff::civil::{Date, DateTime, Time, Weekday};
use jiff::{SignedDuration, ToSpan};

use crate::value::{Frequency, RecurrenceRule, WeekdayNum};

const SECONDS_PER_DAY: i64 = 86_400;

/// Lazy, wall-clock expansion of one recurrence rule.
#[derive(Debug, Clone)]
pub(crate) struct RuleIter {
    /// Rule with the defaults taken from DTSTART filled in
    rule: RecurrenceRule,
    interval: i64,
    wkst: Weekday,
    start: DateTime,
    date_only: bool,
    period: i64,
    buffer: VecDeque<DateTime>,
    horizon: Option<DateTime>,
    max_empty: usize,
    empty: usize,
    done: bool,
}

impl RuleIter {
    pub(crate) fn new(rule: &RecurrenceRule, start: DateTime, date_only: bool) -> Self {
        Self {
            rule: with_defaults(rule, start),
            interval: i64::from(rule.interval()),
            wkst: rule.week_start(),
            start,
            date_only,
            period: 0,
            buffer: VecDeque::new(),
            horizon: None,
            max_empty: usize::MAX,
            empty: 0,
            done: false,
        }
    }

    /// Stop once a period starts after `horizon`.
    pub(crate) fn set_horizon(&mut self, horizon: Option<DateTime>) {
        self.horizon = horizon;
    }

    /// Stop after this many periods in a row produce nothing.
    pub(crate) fn set_max_empty_periods(&mut self, max: usize) {
        self.max_empty = max;
    }

    /// Jump ahead to the period before the one holding `target`.
    ///
    /// Only valid when nothing counts the skipped instances, i.e. without
    /// COUNT.
    pub(crate) fn skip_before(&mut self, target: DateTime) {
        if let Some(index) = self.period_index(target) {
            self.period = self.period.max(index - 1);
        }
    }

    fn period_index(&self, target: DateTime) -> Option<i64> {
        let units = match self.rule.freq {
            Frequency::Yearly => i64::from(target.year()) - i64::from(self.start.year()),
            Frequency::Monthly => month_number(target.date()) - month_number(self.start.date()),
            Frequency::Weekly => {
                let from = week_start(self.start.date(), self.wkst);
                let to = week_start(target.date(), self.wkst);
                days_between(from, to).div_euclid(7)
            }
            Frequency::Daily => days_between(self.start.date(), target.date()),
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                let unit = unit_seconds(self.rule.freq);
                let from = truncate(self.start, self.rule.freq)?;
                from.duration_until(target).as_secs().div_euclid(unit)
            }
        };
        Some(units.div_euclid(self.interval))
    }

    /// First instant of the `n`-th period.
    fn period_start(&self, n: i64) -> Option<DateTime> {
        let step = n.checked_mul(self.interval)?;
        let date = match self.rule.freq {
            Frequency::Yearly => {
                let year = i16::try_from(i64::from(self.start.year()) + step).ok()?;
                Date::new(year, 1, 1).ok()?
            }
            Frequency::Monthly => {
                let months = month_number(self.start.date()).checked_add(step)?;
                let year = i16::try_from(months.div_euclid(12)).ok()?;
                let month = i8::try_from(months.rem_euclid(12) + 1).ok()?;
                Date::new(year, month, 1).ok()?
            }
            Frequency::Weekly => week_start(self.start.date(), self.wkst)
                .checked_add(step.checked_mul(7)?.days())
                .ok()?,
            Frequency::Daily => self.start.date().checked_add(step.days()).ok()?,
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                let secs = step.checked_mul(unit_seconds(self.rule.freq))?;
                return truncate(self.start, self.rule.freq)?
                    .checked_add(SignedDuration::from_secs(secs))
                    .ok();
            }
        };
        Some(date.to_datetime(Time::midnight()))
    }

    /// All candidates of the period starting at `period_start`, sorted.
    fn expand_period(&self, period_start: DateTime) -> Vec<DateTime> {
        let first = period_start.date();
        let days: Vec<Date> = match self.rule.freq {
            Frequency::Yearly => series(first, first.days_in_year()),
            Frequency::Monthly => series(first, first.days_in_month()),
            Frequency::Weekly => series(first, 7),
            Frequency::Daily => vec![first],
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                return self.expand_slot(period_start);
            }
        };

        let times = self.times_of_day();
        let mut candidates: Vec<DateTime> = days
            .into_iter()
            .filter(|date| self.day_matches(*date))
            .flat_map(|date| times.iter().map(move |time| date.to_datetime(*time)))
            .collect();
        candidates.sort();
        candidates.dedup();
        select_positions(candidates, &self.rule.by_set_pos)
    }

    /// Candidates of one sub-daily slot: BYxxx parts coarser than the
    /// frequency limit, finer ones expand.
    fn expand_slot(&self, slot: DateTime) -> Vec<DateTime> {
        let rule = &self.rule;
        let allows = |list: &[u8], value: i8| {
            list.is_empty() || u8::try_from(value).is_ok_and(|v| list.contains(&v))
        };
        if !self.day_matches(slot.date()) || !allows(rule.by_hour.as_slice(), slot.hour()) {
            return Vec::new();
        }
        if rule.freq <= Frequency::Minutely && !allows(rule.by_minute.as_slice(), slot.minute()) {
            return Vec::new();
        }
        if rule.freq == Frequency::Secondly && !allows(rule.by_second.as_slice(), slot.second()) {
            return Vec::new();
        }

        let own = |value: i8| vec![u8::try_from(value).unwrap_or_default()];
        let hours = own(slot.hour());
        let minutes = match rule.freq {
            Frequency::Hourly => rule.by_minute.clone(),
            _ => own(slot.minute()),
        };
        let seconds = match rule.freq {
            Frequency::Secondly => own(slot.second()),
            _ => rule.by_second.clone(),
        };

        let date = slot.date();
        let mut candidates: Vec<DateTime> = cross_times(&hours, &minutes, &seconds)
            .into_iter()
            .map(|time| date.to_datetime(time))
            .collect();
        candidates.sort();
        candidates.dedup();
        select_positions(candidates, &rule.by_set_pos)
    }

    fn times_of_day(&self) -> Vec<Time> {
        if self.date_only {
            return vec![Time::midnight()];
        }
        let rule = &self.rule;
        let mut times = cross_times(&rule.by_hour, &rule.by_minute, &rule.by_second);
        times.sort();
        times.dedup();
        times
    }

    fn day_matches(&self, date: Date) -> bool {
        let rule = &self.rule;
        if !rule.by_month.is_empty()
            && !u8::try_from(date.month()).is_ok_and(|m| rule.by_month.contains(&m))
        {
            return false;
        }

        if !rule.by_week_no.is_empty() && rule.freq == Frequency::Yearly {
            let Some((week, weeks)) = week_number(date, self.wkst) else {
                return false;
            };
            let matched = rule.by_week_no.iter().any(|&n| {
                let n = i64::from(n);
                n == week || (n < 0 && weeks + n + 1 == week)
            });
            if !matched {
                return false;
            }
        }

        if !rule.by_year_day.is_empty() {
            let day = date.day_of_year();
            let len = date.days_in_year();
            if !rule
                .by_year_day
                .iter()
                .any(|&n| n == day || (n < 0 && len + n + 1 == day))
            {
                return false;
            }
        }

        if !rule.by_month_day.is_empty() {
            let day = date.day();
            let len = date.days_in_month();
            if !rule
                .by_month_day
                .iter()
                .any(|&n| n == day || (n < 0 && len + n + 1 == day))
            {
                return false;
            }
        }

        rule.by_day.is_empty() || rule.by_day.iter().any(|wd| self.weekday_matches(*wd, date))
    }

    fn weekday_matches(&self, wd: WeekdayNum, date: Date) -> bool {
        if wd.weekday != date.weekday() {
            return false;
        }
        let Some(ordinal) = wd.ordinal else {
            return true;
        };

        let (index, len) = match self.rule.freq {
            Frequency::Monthly => (date.day().into(), date.days_in_month().into()),
            Frequency::Yearly if !self.rule.by_month.is_empty() => {
                (date.day().into(), date.days_in_month().into())
            }
            Frequency::Yearly => (date.day_of_year(), date.days_in_year()),
            // numeric BYDAY is rejected by validation for other frequencies
            _ => return true,
        };
        let ordinal = i16::from(ordinal);
        ordinal == (index - 1) / 7 + 1 || ordinal == -((len - index) / 7 + 1)
    }
}

impl Iterator for RuleIter {
    type Item = DateTime;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(dt) = self.buffer.pop_front() {
                return Some(dt);
            }
            if self.done {
                return None;
            }

            let Some(period_start) = self.period_start(self.period) else {
                self.done = true;
                continue;
            };
            if self.horizon.is_some_and(|horizon| period_start > horizon) {
                self.done = true;
                continue;
            }

            let start = self.start;
            let candidates = self.expand_period(period_start);
            self.period += 1;
            self.buffer.extend(candidates.into_iter().filter(|dt| *dt > start));
            if self.buffer.is_empty() {
                self.empty += 1;
                if self.empty >= self.max_empty {
                    self.done = true;
                }
            } else {
                self.empty = 0;
            }
        }
    }
}

/// Fill in the parts RFC 5545 derives from DTSTART when they are absent.
fn with_defaults(rule: &RecurrenceRule, start: DateTime) -> RecurrenceRule {
    let mut rule = rule.clone();
    let own = |value: i8| vec![u8::try_from(value).unwrap_or_default()];

    if rule.by_second.is_empty() && rule.freq > Frequency::Secondly {
        rule.by_second = own(start.second());
    }
    if rule.by_minute.is_empty() && rule.freq > Frequency::Minutely {
        rule.by_minute = own(start.minute());
    }
    if rule.by_hour.is_empty() && rule.freq > Frequency::Hourly {
        rule.by_hour = own(start.hour());
    }

    let no_day_parts = rule.by_week_no.is_empty()
        && rule.by_year_day.is_empty()
        && rule.by_month_day.is_empty()
        && rule.by_day.is_empty();
    match rule.freq {
        Frequency::Yearly if no_day_parts => {
            if rule.by_month.is_empty() {
                rule.by_month = own(start.month());
            }
            rule.by_month_day = vec![start.day()];
        }
        Frequency::Yearly
            if rule.by_day.is_empty()
                && rule.by_year_day.is_empty()
                && rule.by_month_day.is_empty() =>
        {
            // BYWEEKNO alone picks the weekday of DTSTART
            rule.by_day = vec![WeekdayNum::every(start.weekday())];
        }
        Frequency::Monthly if rule.by_month_day.is_empty() && rule.by_day.is_empty() => {
            rule.by_month_day = vec![start.day()];
        }
        Frequency::Weekly if rule.by_day.is_empty() => {
            rule.by_day = vec![WeekdayNum::every(start.weekday())];
        }
        _ => {}
    }
    rule
}

fn cross_times(hours: &[u8], minutes: &[u8], seconds: &[u8]) -> Vec<Time> {
    let mut times = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
    for &h in hours {
        for &m in minutes {
            for &s in seconds {
                let (Ok(h), Ok(m), Ok(s)) = (i8::try_from(h), i8::try_from(m), i8::try_from(s))
                else {
                    continue;
                };
                // a leap second of 60 has no civil time and is skipped
                if let Ok(time) = Time::new(h, m, s, 0) {
                    times.push(time);
                }
            }
        }
    }
    times
}

/// Keep the candidates at the given 1-based positions, negative from the end.
fn select_positions(candidates: Vec<DateTime>, positions: &[i16]) -> Vec<DateTime> {
    if positions.is_empty() {
        return candidates;
    }
    let Ok(len) = i64::try_from(candidates.len()) else {
        return Vec::new();
    };
    let mut picked: Vec<DateTime> = positions
        .iter()
        .filter_map(|&pos| {
            let index = if pos > 0 {
                i64::from(pos) - 1
            } else {
                len + i64::from(pos)
            };
            usize::try_from(index)
                .ok()
                .and_then(|i| candidates.get(i))
                .copied()
        })
        .collect();
    picked.sort();
    picked.dedup();
    picked
}

fn series(first: Date, len: impl Into<i64>) -> Vec<Date> {
    let len = usize::try_from(len.into()).unwrap_or_default();
    first.series(1.day()).take(len).collect()
}

fn unit_seconds(freq: Frequency) -> i64 {
    match freq {
        Frequency::Hourly => 3_600,
        Frequency::Minutely => 60,
        _ => 1,
    }
}

fn truncate(dt: DateTime, freq: Frequency) -> Option<DateTime> {
    let time = match freq {
        Frequency::Hourly => Time::new(dt.hour(), 0, 0, 0),
        Frequency::Minutely => Time::new(dt.hour(), dt.minute(), 0, 0),
        _ => Time::new(dt.hour(), dt.minute(), dt.second(), 0),
    };
    time.ok().map(|time| dt.date().to_datetime(time))
}

fn month_number(date: Date) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month()) - 1
}

fn days_between(from: Date, to: Date) -> i64 {
    let from = from.to_datetime(Time::midnight());
    let to = to.to_datetime(Time::midnight());
    from.duration_until(to).as_secs().div_euclid(SECONDS_PER_DAY)
}

/// Days from the last `wkst` on or before a day with weekday `day`.
fn days_since(day: Weekday, wkst: Weekday) -> i64 {
    i64::from(day.to_monday_zero_offset() - wkst.to_monday_zero_offset()).rem_euclid(7)
}

fn week_start(date: Date, wkst: Weekday) -> Date {
    let back = days_since(date.weekday(), wkst);
    date.checked_sub(back.days()).unwrap_or(date)
}

/// Day index, relative to January 1st, on which week 1 of `year` starts.
///
/// Week 1 is the first week with at least four days in the year.
fn week_one_offset(year: i16, wkst: Weekday) -> Option<i64> {
    let jan1 = Date::new(year, 1, 1).ok()?;
    let offset = days_since(jan1.weekday(), wkst);
    Some(if offset <= 3 { -offset } else { 7 - offset })
}

fn weeks_in_year(year: i16, wkst: Weekday) -> Option<i64> {
    let first = week_one_offset(year, wkst)?;
    let len = i64::from(Date::new(year, 1, 1).ok()?.days_in_year());
    let next = len + week_one_offset(year.checked_add(1)?, wkst)?;
    Some((next - first) / 7)
}

/// Week number of `date` and the number of weeks of its week-numbering
/// year.
fn week_number(date: Date, wkst: Weekday) -> Option<(i64, i64)> {
    let year = date.year();
    let index = i64::from(date.day_of_year()) - 1;
    let first = week_one_offset(year, wkst)?;
    if index < first {
        let weeks = weeks_in_year(year.checked_sub(1)?, wkst)?;
        return Some((weeks, weeks));
    }

    let week = (index - first) / 7 + 1;
    let weeks = weeks_in_year(year, wkst)?;
    if week > weeks {
        Some((1, weeks_in_year(year.checked_add(1)?, wkst)?))
    } else {
        Some((week, weeks))
    }
}

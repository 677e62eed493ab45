// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value as defined in RFC 5545 Section 3.3.10.

use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::prelude::*;
use jiff::civil::Weekday;
use jiff::tz::TimeZone;

use crate::datetime::{Temporal, TemporalKind};
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{value_date, value_date_time};
use crate::value::{Extra, ValueError, ValueKind, run_parser};

/// Recurrence rule
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: Frequency,
    /// Inclusive bound of the recurrence set
    pub until: Option<Temporal>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Second specifier, 0-60
    pub by_second: Vec<u8>,
    /// Minute specifier, 0-59
    pub by_minute: Vec<u8>,
    /// Hour specifier, 0-23
    pub by_hour: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekdayNum>,
    /// Day of month specifier, -31..-1 and 1..31
    pub by_month_day: Vec<i8>,
    /// Day of year specifier, -366..-1 and 1..366
    pub by_year_day: Vec<i16>,
    /// Week number specifier, -53..-1 and 1..53
    pub by_week_no: Vec<i8>,
    /// Month specifier, 1-12
    pub by_month: Vec<u8>,
    /// Position within the period's set, -366..-1 and 1..366
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Option<Weekday>,
    /// Rule parts this crate does not interpret, kept for output
    pub extensions: Vec<(String, String)>,
}

/// Recurrence frequency
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Occurrence within the month or year, negative counts from the end
    pub ordinal: Option<i8>,
    /// Day of the week
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Every `weekday` of the period.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// The `ordinal`-th `weekday` of the period.
    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        f.write_str(weekday_code(self.weekday))
    }
}

/// Two-letter code of a weekday.
#[must_use]
pub const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => KW_DAY_SU,
        Weekday::Monday => KW_DAY_MO,
        Weekday::Tuesday => KW_DAY_TU,
        Weekday::Wednesday => KW_DAY_WE,
        Weekday::Thursday => KW_DAY_TH,
        Weekday::Friday => KW_DAY_FR,
        Weekday::Saturday => KW_DAY_SA,
    }
}

/// A rule combination RFC 5545 forbids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// BYWEEKNO outside a YEARLY rule.
    #[error("BYWEEKNO is only valid in a YEARLY rule, found {0}")]
    ByWeekNoRequiresYearly(Frequency),

    /// BYYEARDAY in a DAILY, WEEKLY or MONTHLY rule.
    #[error("BYYEARDAY is not valid in a {0} rule")]
    ByYearDayNotAllowed(Frequency),

    /// BYMONTHDAY in a WEEKLY rule.
    #[error("BYMONTHDAY is not valid in a WEEKLY rule")]
    ByMonthDayInWeekly,

    /// Numeric BYDAY outside MONTHLY and YEARLY rules.
    #[error("numeric BYDAY values are not valid in a {0} rule")]
    ByDayOrdinalNotAllowed(Frequency),

    /// Numeric BYDAY together with BYWEEKNO in a YEARLY rule.
    #[error("numeric BYDAY values are not valid together with BYWEEKNO")]
    ByDayOrdinalWithByWeekNo,

    /// BYSETPOS without any other BYxxx part.
    #[error("BYSETPOS requires another BYxxx rule part")]
    BySetPosAlone,

    /// Time-of-day parts or a sub-daily frequency on an all-day DTSTART.
    #[error("a {0} rule with time-of-day parts cannot repeat a DATE")]
    TimeOfDayForDate(Frequency),

    /// UNTIL shape does not match DTSTART.
    #[error("UNTIL must be a {expected} to match DTSTART, found {found}")]
    UntilMismatch {
        /// Shape required by DTSTART
        expected: TemporalKind,
        /// Shape of UNTIL
        found: TemporalKind,
    },
}

impl RecurrenceRule {
    /// A rule with only FREQ set.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            until: None,
            count: None,
            interval: None,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            wkst: None,
            extensions: Vec::new(),
        }
    }

    /// Effective interval, 1 if absent.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval.unwrap_or(1).max(1)
    }

    /// Effective week start, Monday if absent.
    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.wkst.unwrap_or(Weekday::Monday)
    }

    /// Whether the rule ends through COUNT or UNTIL.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.count.is_some() || self.until.is_some()
    }

    /// Check part combinations against RFC 5545 and, if given, the shape of
    /// DTSTART.
    #[must_use]
    pub fn violations(&self, dtstart: Option<&Temporal>) -> Vec<RuleViolation> {
        let mut violations = Vec::new();
        let freq = self.freq;

        if !self.by_week_no.is_empty() && freq != Frequency::Yearly {
            violations.push(RuleViolation::ByWeekNoRequiresYearly(freq));
        }
        if !self.by_year_day.is_empty()
            && matches!(freq, Frequency::Daily | Frequency::Weekly | Frequency::Monthly)
        {
            violations.push(RuleViolation::ByYearDayNotAllowed(freq));
        }
        if !self.by_month_day.is_empty() && freq == Frequency::Weekly {
            violations.push(RuleViolation::ByMonthDayInWeekly);
        }

        let has_ordinal = self.by_day.iter().any(|d| d.ordinal.is_some());
        if has_ordinal && !matches!(freq, Frequency::Monthly | Frequency::Yearly) {
            violations.push(RuleViolation::ByDayOrdinalNotAllowed(freq));
        }
        if has_ordinal && freq == Frequency::Yearly && !self.by_week_no.is_empty() {
            violations.push(RuleViolation::ByDayOrdinalWithByWeekNo);
        }

        let other_by_parts = !(self.by_second.is_empty()
            && self.by_minute.is_empty()
            && self.by_hour.is_empty()
            && self.by_day.is_empty()
            && self.by_month_day.is_empty()
            && self.by_year_day.is_empty()
            && self.by_week_no.is_empty()
            && self.by_month.is_empty());
        if !self.by_set_pos.is_empty() && !other_by_parts {
            violations.push(RuleViolation::BySetPosAlone);
        }

        let has_time_parts = !(self.by_second.is_empty()
            && self.by_minute.is_empty()
            && self.by_hour.is_empty());
        if let Some(dtstart) = dtstart
            && dtstart.is_date()
            && (has_time_parts || freq < Frequency::Daily)
        {
            violations.push(RuleViolation::TimeOfDayForDate(freq));
        }

        if let (Some(until), Some(dtstart)) = (&self.until, dtstart) {
            let expected = match dtstart.kind() {
                TemporalKind::Date => TemporalKind::Date,
                TemporalKind::Floating => TemporalKind::Floating,
                TemporalKind::Utc | TemporalKind::Zoned => TemporalKind::Utc,
            };
            if until.kind() != expected {
                violations.push(RuleViolation::UntilMismatch {
                    expected,
                    found: until.kind(),
                });
            }
        }

        violations
    }
}

impl FromStr for RecurrenceRule {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // rule part names and weekday codes are case-insensitive
        let upper = s.to_ascii_uppercase();
        run_parser(value_rrule(), ValueKind::Recur, &upper).map_err(|err| err.with_text(s))
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: Display>(f: &mut fmt::Formatter<'_>, name: &str, items: &[T]) -> fmt::Result {
            if items.is_empty() {
                return Ok(());
            }
            write!(f, ";{name}=")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if let Some(until) = &self.until {
            match until {
                Temporal::Zoned(z) => {
                    write!(f, ";{KW_RRULE_UNTIL}={}", Temporal::Utc(z.timestamp()))?;
                }
                until => write!(f, ";{KW_RRULE_UNTIL}={until}")?,
            }
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if let Some(interval) = self.interval {
            write!(f, ";{KW_RRULE_INTERVAL}={interval}")?;
        }
        list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        list(f, KW_RRULE_BYDAY, &self.by_day)?;
        list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if let Some(wkst) = self.wkst {
            write!(f, ";{KW_RRULE_WKST}={}", weekday_code(wkst))?;
        }
        for (name, value) in &self.extensions {
            write!(f, ";{name}={value}")?;
        }
        Ok(())
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
fn value_rrule<'src>() -> impl Parser<'src, &'src str, RecurrenceRule, Extra<'src>> + Clone {
    recur_rule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect::<Vec<_>>()
        .try_map(|parts, span| build_from_parts(parts).map_err(|msg| Rich::custom(span, msg)))
}

fn build_from_parts(parts: Vec<Part>) -> Result<RecurrenceRule, String> {
    fn set_once<T>(slot: &mut Option<T>, value: T, name: &str) -> Result<(), String> {
        match slot {
            Some(_) => Err(format!("{name} occurs more than once")),
            None => {
                *slot = Some(value);
                Ok(())
            }
        }
    }

    fn set_list<T>(slot: &mut Vec<T>, value: Vec<T>, name: &str) -> Result<(), String> {
        if slot.is_empty() {
            *slot = value;
            Ok(())
        } else {
            Err(format!("{name} occurs more than once"))
        }
    }

    let mut freq = None;
    let mut rule = RecurrenceRule::new(Frequency::Yearly);
    for part in parts {
        match part {
            Part::Freq(v) => set_once(&mut freq, v, KW_RRULE_FREQ)?,
            Part::Until(v) => set_once(&mut rule.until, v, KW_RRULE_UNTIL)?,
            Part::Count(v) => set_once(&mut rule.count, v, KW_RRULE_COUNT)?,
            Part::Interval(v) => set_once(&mut rule.interval, v, KW_RRULE_INTERVAL)?,
            Part::BySecond(v) => set_list(&mut rule.by_second, v, KW_RRULE_BYSECOND)?,
            Part::ByMinute(v) => set_list(&mut rule.by_minute, v, KW_RRULE_BYMINUTE)?,
            Part::ByHour(v) => set_list(&mut rule.by_hour, v, KW_RRULE_BYHOUR)?,
            Part::ByDay(v) => set_list(&mut rule.by_day, v, KW_RRULE_BYDAY)?,
            Part::ByMonthDay(v) => set_list(&mut rule.by_month_day, v, KW_RRULE_BYMONTHDAY)?,
            Part::ByYearDay(v) => set_list(&mut rule.by_year_day, v, KW_RRULE_BYYEARDAY)?,
            Part::ByWeekNo(v) => set_list(&mut rule.by_week_no, v, KW_RRULE_BYWEEKNO)?,
            Part::ByMonth(v) => set_list(&mut rule.by_month, v, KW_RRULE_BYMONTH)?,
            Part::BySetPos(v) => set_list(&mut rule.by_set_pos, v, KW_RRULE_BYSETPOS)?,
            Part::Wkst(v) => set_once(&mut rule.wkst, v, KW_RRULE_WKST)?,
            Part::Other(name, value) => {
                if KNOWN_PARTS.contains(&name.as_str()) {
                    return Err(format!("invalid value `{value}` for {name}"));
                }
                rule.extensions.push((name, value));
            }
        }
    }

    if rule.count.is_some() && rule.until.is_some() {
        return Err("COUNT and UNTIL must not occur together".to_owned());
    }
    rule.freq = freq.ok_or_else(|| "FREQ is required".to_owned())?;
    Ok(rule)
}

const KNOWN_PARTS: [&str; 14] = [
    KW_RRULE_FREQ,
    KW_RRULE_UNTIL,
    KW_RRULE_COUNT,
    KW_RRULE_INTERVAL,
    KW_RRULE_BYSECOND,
    KW_RRULE_BYMINUTE,
    KW_RRULE_BYHOUR,
    KW_RRULE_BYDAY,
    KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYYEARDAY,
    KW_RRULE_BYWEEKNO,
    KW_RRULE_BYMONTH,
    KW_RRULE_BYSETPOS,
    KW_RRULE_WKST,
];

#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(Temporal),
    Count(u32),
    Interval(u32),
    BySecond(Vec<u8>),
    ByMinute(Vec<u8>),
    ByHour(Vec<u8>),
    ByDay(Vec<WeekdayNum>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<u8>),
    BySetPos(Vec<i16>),
    Wkst(Weekday),
    Other(String, String),
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn recur_rule_part<'src>() -> impl Parser<'src, &'src str, Part, Extra<'src>> + Clone {
    let kw = |kw: &'static str| just(kw).ignore_then(just('='));
    let end_of_part = any().filter(|c: &char| *c != ';').not();

    let freq = kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq);
    let until = kw(KW_RRULE_UNTIL).ignore_then(enddate()).map(Part::Until);
    let count = kw(KW_RRULE_COUNT).ignore_then(u32_non_zero()).map(Part::Count);
    let interval = kw(KW_RRULE_INTERVAL)
        .ignore_then(u32_non_zero())
        .map(Part::Interval);

    let by_second = kw(KW_RRULE_BYSECOND)
        .ignore_then(list(unsigned_in(0, 60)))
        .map(Part::BySecond);
    let by_minute = kw(KW_RRULE_BYMINUTE)
        .ignore_then(list(unsigned_in(0, 59)))
        .map(Part::ByMinute);
    let by_hour = kw(KW_RRULE_BYHOUR)
        .ignore_then(list(unsigned_in(0, 23)))
        .map(Part::ByHour);
    let by_day = kw(KW_RRULE_BYDAY)
        .ignore_then(list(weekdaynum()))
        .map(Part::ByDay);
    let by_month_day = kw(KW_RRULE_BYMONTHDAY)
        .ignore_then(list(signed_non_zero(31)))
        .map(Part::ByMonthDay);
    let by_year_day = kw(KW_RRULE_BYYEARDAY)
        .ignore_then(list(signed_non_zero(366)))
        .map(Part::ByYearDay);
    let by_week_no = kw(KW_RRULE_BYWEEKNO)
        .ignore_then(list(signed_non_zero(53)))
        .map(Part::ByWeekNo);
    let by_month = kw(KW_RRULE_BYMONTH)
        .ignore_then(list(unsigned_in(1, 12)))
        .map(Part::ByMonth);
    let by_set_pos = kw(KW_RRULE_BYSETPOS)
        .ignore_then(list(signed_non_zero(366)))
        .map(Part::BySetPos);
    let wkst = kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst);

    // x-name = value, any part this crate does not know
    let other = any()
        .filter(|c: &char| *c != '=' && *c != ';')
        .repeated()
        .at_least(1)
        .to_slice()
        .then_ignore(just('='))
        .then(any().filter(|c: &char| *c != ';').repeated().to_slice())
        .map(|(name, value): (&str, &str)| Part::Other(name.to_owned(), value.to_owned()));

    choice((
        choice((
            freq, until, count, interval, by_second, by_minute, by_hour, by_day,
        )),
        choice((
            by_month_day,
            by_year_day,
            by_week_no,
            by_month,
            by_set_pos,
            wkst,
        )),
    ))
    .then_ignore(end_of_part)
    .or(other)
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src>() -> impl Parser<'src, &'src str, Frequency, Extra<'src>> + Clone {
    any()
        .filter(char::is_ascii_alphabetic)
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|s: &str, span| {
            Frequency::from_str(s)
                .map_err(|_| Rich::custom(span, format!("unknown frequency `{s}`")))
        })
}

/// ```txt
/// enddate     = date / date-time
/// ```
fn enddate<'src>() -> impl Parser<'src, &'src str, Temporal, Extra<'src>> + Clone {
    choice((
        value_date_time().try_map(|raw, span| {
            Temporal::from_raw(raw, None::<&TimeZone>).map_err(|e| Rich::custom(span, e))
        }),
        value_date().map(Temporal::Date),
    ))
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn weekdaynum<'src>() -> impl Parser<'src, &'src str, WeekdayNum, Extra<'src>> + Clone {
    signed_non_zero(53)
        .or_not()
        .then(weekday())
        .map(|(ordinal, weekday)| WeekdayNum { ordinal, weekday })
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src>() -> impl Parser<'src, &'src str, Weekday, Extra<'src>> + Clone {
    choice((
        just(KW_DAY_SU).to(Weekday::Sunday),
        just(KW_DAY_MO).to(Weekday::Monday),
        just(KW_DAY_TU).to(Weekday::Tuesday),
        just(KW_DAY_WE).to(Weekday::Wednesday),
        just(KW_DAY_TH).to(Weekday::Thursday),
        just(KW_DAY_FR).to(Weekday::Friday),
        just(KW_DAY_SA).to(Weekday::Saturday),
    ))
}

// Helper parsers

fn list<'src, T>(
    item: impl Parser<'src, &'src str, T, Extra<'src>> + Clone,
) -> impl Parser<'src, &'src str, Vec<T>, Extra<'src>> + Clone {
    item.separated_by(just(',')).at_least(1).collect()
}

fn digits<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits
        .to_slice()
        .try_map(|s: &str, span| {
            lexical::parse::<u32, _>(s)
                .map_err(|_| Rich::custom(span, format!("`{s}` is out of range")))
        })
}

/// Unsigned number in `low..=high`.
fn unsigned_in<'src, T: TryFrom<u32>>(
    low: u32,
    high: u32,
) -> impl Parser<'src, &'src str, T, Extra<'src>> + Clone {
    digits().try_map(move |n, span| {
        if (low..=high).contains(&n) {
            T::try_from(n).map_err(|_| Rich::custom(span, format!("{n} is out of range")))
        } else {
            Err(Rich::custom(span, format!("{n} is not within {low} to {high}")))
        }
    })
}

/// Signed number in `-max..=-1` or `1..=max`.
fn signed_non_zero<'src, T: TryFrom<i64>>(
    max: u32,
) -> impl Parser<'src, &'src str, T, Extra<'src>> + Clone {
    select! { c @ ('+' | '-') => c }
        .or_not()
        .then(digits())
        .try_map(move |(sign, n), span| {
            if n == 0 || n > max {
                return Err(Rich::custom(span, format!("{n} is not within 1 to {max}")));
            }
            let n = if sign == Some('-') { -i64::from(n) } else { i64::from(n) };
            T::try_from(n).map_err(|_| Rich::custom(span, format!("{n} is out of range")))
        })
}

/// Parse u32 (1 or more digits), zero excluded
fn u32_non_zero<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
    digits().try_map(|n, span| match n {
        0 => Err(Rich::custom(span, "expected a positive integer")),
        n => Ok(n),
    })
}

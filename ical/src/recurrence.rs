// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence sets, RFC 5545 Section 3.8.5.
//!
//! The recurrence set of a component is DTSTART, the RRULE expansion and
//! the RDATEs, minus the EXDATEs. Every instance takes the shape and zone of
//! DTSTART; RDATE, EXDATE and window bounds are coerced to it first.
//!
//! Overrides (components with RECURRENCE-ID) live beside their parent, so
//! splicing them in is left to whoever holds the calendar.

mod expand;

use std::cmp::Ordering;
use std::collections::VecDeque;

use jiff::Span;

use crate::component::Component;
use crate::datetime::Temporal;
use crate::recurrence::expand::RuleIter;
use crate::value::{RecurrenceRule, RuleViolation};

/// Periods in a row without an instance before an unbounded expansion
/// gives up.
pub const DEFAULT_MAX_EMPTY_PERIODS: usize = 10_000;

/// Errors raised while expanding a recurrence set.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecurrenceError {
    /// The component has no DTSTART to anchor the set.
    #[error("component has no DTSTART")]
    MissingStart,

    /// The RRULE is not valid for this DTSTART.
    #[error(transparent)]
    InvalidRule(#[from] RuleViolation),

    /// A date-time could not be converted.
    #[error("invalid date-time: {0}")]
    DateTime(#[from] jiff::Error),
}

/// One instance with its end.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    /// Instance start, in the shape of DTSTART
    pub start: Temporal,

    /// Instance end
    pub end: Temporal,
}

/// Instances of a component inside a window, in ascending order.
///
/// The iterator owns what it needs, so it can be cloned to restart.
#[derive(Debug, Clone)]
pub struct Recurrences {
    base: Base,
    pending: Option<Temporal>,
    rdates: VecDeque<Temporal>,
    exdates: Vec<Temporal>,
    window_start: Option<Temporal>,
    window_end: Option<Temporal>,
    last: Option<Temporal>,
    finished: bool,
}

/// Instances of a component in `[start, end)`.
///
/// # Errors
/// If the component has no DTSTART, the RRULE is invalid for it, or a
/// bound cannot be converted to the shape of DTSTART.
pub fn recurrences(
    component: &Component,
    start: &Temporal,
    end: &Temporal,
) -> Result<Recurrences, RecurrenceError> {
    Recurrences::build(component, Some(start), Some(end), true)
}

/// Instances of a component from `start` on, possibly without end.
///
/// # Errors
/// As [`recurrences`].
pub fn recurrences_from(
    component: &Component,
    start: &Temporal,
) -> Result<Recurrences, RecurrenceError> {
    Recurrences::build(component, Some(start), None, true)
}

/// Instances in `[start, end)` paired with their ends.
///
/// # Errors
/// As [`recurrences`].
pub fn occurrences(
    component: &Component,
    start: &Temporal,
    end: &Temporal,
) -> Result<impl Iterator<Item = Occurrence> + use<>, RecurrenceError> {
    let span = component.instance_span();
    Ok(recurrences(component, start, end)?.map(move |start| occurrence(start, span)))
}

/// An instance starting at `start` that lasts `span`.
#[must_use]
pub fn occurrence(start: Temporal, span: Span) -> Occurrence {
    let end = start.checked_add(span).unwrap_or_else(|_| start.clone());
    Occurrence { start, end }
}

/// First instance, DTSTART unless it is excluded.
///
/// # Errors
/// As [`recurrences`].
pub fn first_recurrence(component: &Component) -> Result<Option<Temporal>, RecurrenceError> {
    Ok(Recurrences::build(component, None, None, true)?.next())
}

/// Last instance, `None` for a series without end.
///
/// # Errors
/// As [`recurrences`].
pub fn last_recurrence(component: &Component) -> Result<Option<Temporal>, RecurrenceError> {
    let series = Recurrences::build(component, None, None, true)?;
    Ok(if series.is_bounded() {
        series.last()
    } else {
        None
    })
}

/// Latest instance strictly before `before`.
///
/// # Errors
/// As [`recurrences`].
pub fn previous_recurrence(
    component: &Component,
    before: &Temporal,
) -> Result<Option<Temporal>, RecurrenceError> {
    Ok(Recurrences::build(component, None, Some(before), true)?.last())
}

/// Number of instances produced by DTSTART and the RRULE strictly before
/// `instant`, RDATE and EXDATE aside. This is what COUNT counts.
///
/// # Errors
/// As [`recurrences`].
pub fn count_before(component: &Component, instant: &Temporal) -> Result<u32, RecurrenceError> {
    let series = Recurrences::build(component, None, Some(instant), false)?;
    Ok(u32::try_from(series.count()).unwrap_or(u32::MAX))
}

impl Recurrences {
    fn build(
        component: &Component,
        window_start: Option<&Temporal>,
        window_end: Option<&Temporal>,
        with_dates: bool,
    ) -> Result<Self, RecurrenceError> {
        let dtstart = component
            .dtstart()
            .ok_or(RecurrenceError::MissingStart)?
            .clone();
        let rule = component.rrule();
        if let Some(rule) = rule
            && let Some(violation) = rule.violations(Some(&dtstart)).into_iter().next()
        {
            return Err(violation.into());
        }

        let coerce = |t: &Temporal| t.coerce_to(&dtstart);
        let window_start = window_start.map(coerce).transpose()?;
        let window_end = window_end.map(coerce).transpose()?;

        let (mut rdates, exdates) = if with_dates {
            let rdates = component
                .rdates()
                .iter()
                .map(coerce)
                .collect::<Result<Vec<_>, _>>()?;
            let exdates = component
                .exdates()
                .iter()
                .map(coerce)
                .collect::<Result<Vec<_>, _>>()?;
            (rdates, exdates)
        } else {
            (Vec::new(), Vec::new())
        };
        rdates.sort_by(Temporal::compare);
        rdates.dedup_by(|a, b| a.same_instant(b));

        let base = Base::new(rule, &dtstart, window_start.as_ref(), window_end.as_ref())?;
        Ok(Self {
            base,
            pending: None,
            rdates: rdates.into(),
            exdates,
            window_start,
            window_end,
            last: None,
            finished: false,
        })
    }

    /// Stop an expansion after `max` periods in a row without an instance.
    #[must_use]
    pub fn with_max_empty_periods(mut self, max: usize) -> Self {
        if let Some(rule) = &mut self.base.rule {
            rule.set_max_empty_periods(max);
        }
        self
    }

    /// Whether the set is finite without a window end.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.base.bounded
    }

    /// Next instance of DTSTART, RRULE and RDATE in order, duplicates
    /// dropped.
    fn next_merged(&mut self) -> Option<Temporal> {
        loop {
            if self.pending.is_none() {
                self.pending = self.base.next();
            }
            let take_rdate = match (&self.pending, self.rdates.front()) {
                (None, None) => return None,
                (Some(_), None) => false,
                (None, Some(_)) => true,
                (Some(base), Some(rdate)) => rdate.compare(base) == Ordering::Less,
            };
            let next = if take_rdate {
                self.rdates.pop_front()
            } else {
                self.pending.take()
            }?;

            if self.last.as_ref().is_some_and(|last| last.same_instant(&next)) {
                continue;
            }
            self.last = Some(next.clone());
            return Some(next);
        }
    }
}

impl Iterator for Recurrences {
    type Item = Temporal;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while let Some(candidate) = self.next_merged() {
            if self.exdates.iter().any(|ex| candidate.same_instant(ex)) {
                continue;
            }
            if let Some(start) = &self.window_start
                && candidate.compare(start) == Ordering::Less
            {
                continue;
            }
            if let Some(end) = &self.window_end
                && candidate.compare(end) != Ordering::Less
            {
                break;
            }
            return Some(candidate);
        }
        self.finished = true;
        None
    }
}

/// DTSTART followed by the RRULE expansion, with COUNT and UNTIL applied.
#[derive(Debug, Clone)]
struct Base {
    template: Temporal,
    dtstart: Option<Temporal>,
    rule: Option<RuleIter>,
    until: Option<Temporal>,
    remaining: Option<u32>,
    bounded: bool,
}

impl Base {
    fn new(
        rule: Option<&RecurrenceRule>,
        dtstart: &Temporal,
        window_start: Option<&Temporal>,
        window_end: Option<&Temporal>,
    ) -> Result<Self, RecurrenceError> {
        let Some(rule) = rule else {
            return Ok(Self {
                template: dtstart.clone(),
                dtstart: Some(dtstart.clone()),
                rule: None,
                until: None,
                remaining: None,
                bounded: true,
            });
        };

        let until = rule
            .until
            .as_ref()
            .map(|until| until.coerce_to(dtstart))
            .transpose()?;
        let horizon = match (&until, window_end) {
            (Some(until), Some(end)) => Some(until.wall_clock().min(end.wall_clock())),
            (Some(until), None) => Some(until.wall_clock()),
            (None, Some(end)) => Some(end.wall_clock()),
            (None, None) => None,
        };

        let mut iter = RuleIter::new(rule, dtstart.wall_clock(), dtstart.is_date());
        iter.set_horizon(horizon);
        if horizon.is_none() {
            iter.set_max_empty_periods(DEFAULT_MAX_EMPTY_PERIODS);
        }
        if rule.count.is_none()
            && let Some(start) = window_start
        {
            iter.skip_before(start.wall_clock());
        }

        Ok(Self {
            template: dtstart.clone(),
            dtstart: Some(dtstart.clone()),
            rule: Some(iter),
            until,
            remaining: rule.count,
            bounded: rule.is_bounded(),
        })
    }
}

impl Iterator for Base {
    type Item = Temporal;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        let next = match self.dtstart.take() {
            Some(dtstart) => dtstart,
            None => {
                let wall = self.rule.as_mut()?.next()?;
                let Ok(next) = self.template.with_wall_clock(wall) else {
                    self.rule = None;
                    return None;
                };
                if let Some(until) = &self.until
                    && next.compare(until) == Ordering::Greater
                {
                    self.rule = None;
                    return None;
                }
                next
            }
        };
        if let Some(remaining) = &mut self.remaining {
            *remaining -= 1;
        }
        Some(next)
    }
}

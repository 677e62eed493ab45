// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scoped deletes and edits of recurring components.
//!
//! Acting on one occurrence of a series asks which part of the series is
//! meant. The engine works out the legal scopes with the range each one
//! affects, hands them to a dialog callback and turns the answer into
//! outgoing iTIP messages. Nothing stored is mutated: applying the
//! messages with [`Calendar::process_message`] is up to the caller.

mod deleter;
mod reviser;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use jiff::{Span, Timestamp};
use recurcal_ical::recurrence::{first_recurrence, last_recurrence};
use recurcal_ical::{Component, Method, Property, PropertyName, Temporal};

pub use deleter::{DeleteParams, Deleter};
pub use reviser::{ReviseParams, Reviser};

use crate::calendar::Calendar;
use crate::error::EditError;

/// Which part of a series an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeDialogOption {
    /// The acted-on occurrence only.
    One,
    /// The whole series.
    All,
    /// The acted-on occurrence and every later one.
    ThisAndFuture,
    /// Do nothing.
    Cancel,
}

/// Instances affected by a scope; `end` is `None` for a series without end.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeRange {
    /// First affected instance
    pub start: Temporal,
    /// Last affected instance
    pub end: Option<Temporal>,
}

/// Legal scopes with the range each one affects. [`ChangeDialogOption::Cancel`]
/// is always a valid answer and never listed.
pub type ScopeChoices = BTreeMap<ChangeDialogOption, DateTimeRange>;

/// Legal scopes for acting on `instant`.
///
/// ONE is offered unless the recurrence rule itself changed, ALL always,
/// and THIS_AND_FUTURE only when `instant` is neither the first instance
/// nor after the last.
pub(crate) fn scope_choices(
    component: &Component,
    instant: &Temporal,
    rule_changed: bool,
) -> Result<ScopeChoices, EditError> {
    let first = first_recurrence(component)?;
    let last = last_recurrence(component)?;

    let mut choices = ScopeChoices::new();
    if !rule_changed {
        choices.insert(
            ChangeDialogOption::One,
            DateTimeRange {
                start: instant.clone(),
                end: Some(instant.clone()),
            },
        );
    }
    choices.insert(
        ChangeDialogOption::All,
        DateTimeRange {
            start: first.clone().unwrap_or_else(|| instant.clone()),
            end: last.clone(),
        },
    );

    let is_first = first.as_ref().is_none_or(|f| f.same_instant(instant));
    let after_last = last
        .as_ref()
        .is_some_and(|l| instant.compare(l) == Ordering::Greater);
    if !is_first && !after_last {
        choices.insert(
            ChangeDialogOption::ThisAndFuture,
            DateTimeRange {
                start: instant.clone(),
                end: last,
            },
        );
    }
    Ok(choices)
}

/// Whether `component` overrides a single instance, as opposed to a
/// parent or a range override.
pub(crate) fn is_single_override(component: &Component) -> bool {
    component.recurrence_id().is_some() && !component.is_this_and_future()
}

/// Scope implied without asking: a single override is edited on its own,
/// a component that does not repeat is edited as a whole.
pub(crate) fn implicit_scope(component: &Component) -> Option<ChangeDialogOption> {
    if is_single_override(component) {
        Some(ChangeDialogOption::One)
    } else if !component.is_recurring() {
        Some(ChangeDialogOption::All)
    } else {
        None
    }
}

/// Ask the dialog and check its answer against the choices.
pub(crate) fn choose(
    choices: &ScopeChoices,
    dialog: impl FnOnce(&ScopeChoices) -> Option<ChangeDialogOption>,
) -> Result<ChangeDialogOption, EditError> {
    match dialog(choices) {
        None => Err(EditError::NoScopeChosen),
        Some(ChangeDialogOption::Cancel) => Ok(ChangeDialogOption::Cancel),
        Some(option) if choices.contains_key(&option) => Ok(option),
        Some(option) => Err(EditError::IllegalScope(option)),
    }
}

/// Fail for kinds without an edit strategy.
pub(crate) fn ensure_supported(component: &Component) -> Result<(), EditError> {
    if component.kind.is_displayable() {
        Ok(())
    } else {
        Err(EditError::Unsupported(component.kind.clone()))
    }
}

pub(crate) fn dtstart(component: &Component) -> Result<&Temporal, EditError> {
    component
        .dtstart()
        .ok_or(EditError::MissingProperty(PropertyName::DtStart))
}

/// Where `occurrence` of `component` sits in the original series.
///
/// A range override shows its instances moved by the wall-clock shift from
/// its RECURRENCE-ID to its DTSTART; overrides of those instances are still
/// identified by the instant before that shift.
pub(crate) fn series_instant(
    component: &Component,
    occurrence: &Temporal,
) -> Result<Temporal, EditError> {
    let start = dtstart(component)?;
    let local = occurrence.coerce_to(start)?;
    match component.recurrence_id() {
        Some(anchor) if component.is_this_and_future() => {
            let shift = anchor.wall_clock_until(start)?;
            Ok(local.shift_wall_clock(shift.negate())?.coerce_to(anchor)?)
        }
        _ => Ok(local),
    }
}

/// A copy of one instance: the recurrence removed, DTSTART set to
/// `occurrence` with the end moved along, RECURRENCE-ID naming the
/// instance in the original series.
pub(crate) fn instance_copy(
    component: &Component,
    occurrence: &Temporal,
    this_and_future: bool,
) -> Result<Component, EditError> {
    let start = occurrence.coerce_to(dtstart(component)?)?;
    let recurrence_id = series_instant(component, occurrence)?;
    let span = component.instance_span();
    let mut copy = component.clone();
    strip_recurrence(&mut copy);
    copy.set_dtstart(Some(&start));
    if let Some(name) = component.kind.end_property()
        && copy.property(&name).is_some()
    {
        let end = start.checked_add(span)?;
        copy.set_property(Property::from_temporal(name, &end));
    }
    copy.set_recurrence_id(Some(&recurrence_id), this_and_future);
    Ok(copy)
}

pub(crate) fn strip_recurrence(component: &mut Component) {
    for name in [PropertyName::RRule, PropertyName::RDate, PropertyName::ExDate] {
        component.remove_property(&name);
    }
}

/// Shift every date-time list property by the wall-clock `shift`.
pub(crate) fn shift_dates(
    component: &mut Component,
    shift: Span,
    keep: impl Fn(&Temporal) -> bool,
) -> Result<(), EditError> {
    let rdates = shifted(&component.rdates(), shift, &keep)?;
    let exdates = shifted(&component.exdates(), shift, &keep)?;
    if component.property(&PropertyName::RDate).is_some() {
        component.set_rdates(&rdates);
    }
    if component.property(&PropertyName::ExDate).is_some() {
        component.set_exdates(&exdates);
    }
    Ok(())
}

fn shifted(
    dates: &[Temporal],
    shift: Span,
    keep: impl Fn(&Temporal) -> bool,
) -> Result<Vec<Temporal>, EditError> {
    dates
        .iter()
        .filter(|d| keep(d))
        .map(|d| Ok(d.shift_wall_clock(shift)?))
        .collect()
}

/// Bump SEQUENCE above `base` and set a fresh DTSTAMP.
pub(crate) fn stamp(component: &mut Component, base: i32) {
    component.set_sequence(base.saturating_add(1));
    component.set_dtstamp(Timestamp::now());
}

/// Wrap outgoing components in an iTIP message.
pub(crate) fn message(method: Method, prod_id: &str, components: Vec<Component>) -> Calendar {
    let mut calendar = Calendar::message(method, prod_id);
    for component in components {
        calendar.push(component);
    }
    calendar
}

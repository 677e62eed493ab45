// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use jiff::Span;
use recurcal_ical::recurrence::count_before;
use recurcal_ical::{Component, ComponentKind, Method, Property, PropertyName, Temporal};

use crate::calendar::Calendar;
use crate::config::Config;
use crate::edit::{
    ChangeDialogOption, ScopeChoices, choose, dtstart, ensure_supported, implicit_scope,
    is_single_override, message, scope_choices, series_instant, shift_dates, stamp,
    strip_recurrence,
};
use crate::error::EditError;

/// Properties that describe where an instance sits in time or which
/// revision it is; they are handled through the start shift and stamping.
const PLACEMENT: &[PropertyName] = &[
    PropertyName::DtStart,
    PropertyName::DtEnd,
    PropertyName::Due,
    PropertyName::Duration,
    PropertyName::RecurrenceId,
    PropertyName::DtStamp,
    PropertyName::Sequence,
];

/// What to revise.
#[derive(Debug, Clone)]
pub struct ReviseParams {
    /// The stored component the occurrence belongs to
    pub original: Component,

    /// The occurrence as edited: DTSTART is the new start of the acted-on
    /// occurrence and the end or DURATION its new length
    pub edited: Component,

    /// Start of the occurrence acted on, before the edit
    pub occurrence: Temporal,

    /// Properties whose values changed, placement aside
    pub changed: Vec<PropertyName>,

    /// Stored overrides of the series, re-based when the series moves
    pub overrides: Vec<Component>,

    /// The series parent, when `original` is a range override
    pub parent: Option<Component>,
}

impl ReviseParams {
    /// Revise `occurrence` of `original` into `edited`; the changed
    /// properties are found by comparing the two.
    #[must_use]
    pub fn new(original: Component, edited: Component, occurrence: Temporal) -> Self {
        let changed = changed_properties(&original, &edited);
        Self {
            original,
            edited,
            occurrence,
            changed,
            overrides: Vec::new(),
            parent: None,
        }
    }

    /// Replace the changed properties found by comparison.
    #[must_use]
    pub fn with_changed(mut self, changed: Vec<PropertyName>) -> Self {
        self.changed = changed;
        self
    }

    /// The series' overrides, re-based when the series moves.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Vec<Component>) -> Self {
        self.overrides = overrides;
        self
    }

    /// The series parent; a range override can only be revised as a whole
    /// series when it is known.
    #[must_use]
    pub fn with_parent(mut self, parent: Component) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Whether the recurrence set itself was edited, which only makes sense
    /// for the series as a whole.
    fn rule_changed(&self) -> bool {
        self.changed.iter().any(|name| {
            matches!(
                name,
                PropertyName::RRule | PropertyName::RDate | PropertyName::ExDate
            )
        })
    }
}

/// Turns the edit of an occurrence into REQUEST messages.
#[derive(Debug, Clone)]
pub struct Reviser {
    prod_id: String,
}

impl Default for Reviser {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Reviser {
    /// A reviser writing messages with the configured PRODID.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            prod_id: config.prod_id.clone(),
        }
    }

    /// Revise an occurrence in the scope chosen by `dialog`.
    ///
    /// - ONE writes an override for the occurrence, or updates the existing
    ///   one.
    /// - ALL moves the series by the wall-clock shift of the occurrence and
    ///   re-bases the RECURRENCE-IDs of its overrides.
    /// - THIS_AND_FUTURE writes a range override anchored at the occurrence
    ///   that carries the rest of the series.
    ///
    /// When `original` is a range override, ONE and THIS_AND_FUTURE name the
    /// occurrence by its instant in the original series, and ALL revises the
    /// parent given with [`ReviseParams::with_parent`]; without it ALL is not
    /// offered.
    ///
    /// # Errors
    /// If the component kind cannot be revised, an event or to-do has
    /// neither an end nor DURATION, the dialog gives no answer or one that
    /// was not offered, or the series cannot be expanded.
    #[tracing::instrument(skip_all, fields(uid = params.original.uid()))]
    pub fn revise(
        &self,
        params: &ReviseParams,
        dialog: impl FnOnce(&ScopeChoices) -> Option<ChangeDialogOption>,
    ) -> Result<Vec<Calendar>, EditError> {
        let original = &params.original;
        ensure_supported(original)?;
        if original.uid().is_none() {
            return Err(EditError::MissingProperty(PropertyName::Uid));
        }
        ensure_end(&params.edited)?;

        let scope = match implicit_scope(original) {
            Some(scope) => scope,
            None => {
                let mut choices =
                    scope_choices(original, &params.occurrence, params.rule_changed())?;
                if original.is_this_and_future() && params.parent.is_none() {
                    choices.remove(&ChangeDialogOption::All);
                }
                choose(&choices, dialog)?
            }
        };
        tracing::debug!(%scope, changed = ?params.changed, "revising");

        let components = match scope {
            ChangeDialogOption::Cancel => return Ok(Vec::new()),
            ChangeDialogOption::One => vec![revise_one(params)?],
            ChangeDialogOption::All => revise_all(params)?,
            ChangeDialogOption::ThisAndFuture => revise_this_and_future(params)?,
        };
        Ok(vec![message(Method::Request, &self.prod_id, components)])
    }
}

fn revise_one(params: &ReviseParams) -> Result<Component, EditError> {
    let original = &params.original;
    let (base, recurrence_id) = match original.recurrence_id() {
        Some(rid) if is_single_override(original) => (original, rid.clone()),
        _ => {
            let instant = series_instant(original, &params.occurrence)?;
            let existing = params
                .overrides
                .iter()
                .find(|o| is_single_override(o) && overrides_at(o, &instant));
            (existing.unwrap_or(original), instant)
        }
    };

    let mut one = base.clone();
    apply_changes(&mut one, params);
    strip_recurrence(&mut one);
    place(&mut one, &params.edited, dtstart(&params.edited)?)?;
    one.set_recurrence_id(Some(&recurrence_id), false);
    stamp(&mut one, base.sequence().max(original.sequence()));
    Ok(one)
}

fn revise_all(params: &ReviseParams) -> Result<Vec<Component>, EditError> {
    let original = match &params.parent {
        Some(parent) if params.original.is_this_and_future() => parent,
        _ => &params.original,
    };
    let shift = start_shift(params)?;

    let mut all = original.clone();
    apply_changes(&mut all, params);
    let start = dtstart(original)?.shift_wall_clock(shift)?;
    place(&mut all, &params.edited, &start)?;
    // an edited recurrence set is taken as given
    if !params.rule_changed() {
        shift_until(&mut all, shift)?;
        shift_dates(&mut all, shift, |_| true)?;
    }
    stamp(&mut all, original.sequence().max(params.original.sequence()));

    let mut components = vec![all];
    for o in &params.overrides {
        components.push(rebase(o, shift)?);
    }
    Ok(components)
}

fn revise_this_and_future(params: &ReviseParams) -> Result<Vec<Component>, EditError> {
    let original = &params.original;
    let shift = start_shift(params)?;
    let new_start = dtstart(&params.edited)?.coerce_to(dtstart(original)?)?;
    // the occurrence as `original` produces it, and as the series names it
    let occurrence = new_start.shift_wall_clock(shift.negate())?;
    let anchor = series_instant(original, &occurrence)?;
    let from_occurrence = |t: &Temporal| t.compare(&occurrence) != Ordering::Less;

    let mut future = original.clone();
    apply_changes(&mut future, params);
    if !params.rule_changed() {
        if let Some(mut rule) = future.rrule().cloned() {
            if let Some(count) = rule.count {
                let before = count_before(original, &occurrence)?;
                rule.count = Some(count.saturating_sub(before).max(1));
            }
            if let Some(until) = rule.until.take() {
                rule.until = Some(until.shift_wall_clock(shift)?);
            }
            future.set_rrule(Some(rule));
        }
        shift_dates(&mut future, shift, from_occurrence)?;
    }
    place(&mut future, &params.edited, &new_start)?;
    future.set_recurrence_id(Some(&anchor), true);
    stamp(&mut future, original.sequence());

    Ok(std::iter::once(future)
        .chain(resent_overrides(&params.overrides, &anchor))
        .collect())
}

/// Overrides from `anchor` on, sent again after a range override that
/// replaces them in the store.
///
/// Their RECURRENCE-IDs keep naming instants of the original series, which
/// is how the range override's instances are matched against them. Later
/// range overrides come first so each cuts the new range before the single
/// overrides after it are stored.
fn resent_overrides(overrides: &[Component], anchor: &Temporal) -> Vec<Component> {
    let from_anchor = |o: &&Component| {
        let after = o
            .recurrence_id()
            .is_some_and(|r| r.compare(anchor) == Ordering::Greater);
        after || (is_single_override(o) && overrides_at(o, anchor))
    };
    let mut ranges: Vec<&Component> = overrides
        .iter()
        .filter(from_anchor)
        .filter(|o| o.is_this_and_future())
        .collect();
    ranges.sort_by(|a, b| match (a.recurrence_id(), b.recurrence_id()) {
        (Some(a), Some(b)) => a.compare(b),
        _ => Ordering::Equal,
    });
    let singles = overrides
        .iter()
        .filter(from_anchor)
        .filter(|o| is_single_override(o));

    ranges
        .into_iter()
        .chain(singles)
        .map(|o| {
            let mut resent = o.clone();
            stamp(&mut resent, o.sequence());
            resent
        })
        .collect()
}

fn overrides_at(component: &Component, instant: &Temporal) -> bool {
    component
        .recurrence_id()
        .is_some_and(|r| r.same_instant(instant))
}

/// Wall-clock shift from the occurrence to its edited start.
fn start_shift(params: &ReviseParams) -> Result<Span, EditError> {
    let new_start = dtstart(&params.edited)?;
    Ok(params.occurrence.wall_clock_until(new_start)?)
}

/// Copy the changed properties from the edited occurrence.
fn apply_changes(target: &mut Component, params: &ReviseParams) {
    for name in &params.changed {
        if PLACEMENT.contains(name) {
            continue;
        }
        target.remove_property(name);
        for property in params.edited.properties_named(name) {
            target.add_property(property.clone());
        }
    }
}

/// Set DTSTART and recompute whichever of the end or DURATION is in use,
/// taking the length from the edited occurrence.
fn place(target: &mut Component, edited: &Component, start: &Temporal) -> Result<(), EditError> {
    target.set_dtstart(Some(start));
    let end_name = target.kind.end_property();
    if let Some(name) = end_name.clone()
        && target.property(&name).is_some()
    {
        let end = start.checked_add(edited.instance_span())?;
        target.set_property(Property::from_temporal(name, &end));
    } else if target.property(&PropertyName::Duration).is_some() {
        target.set_duration(edited.duration());
    } else if end_name.is_some() {
        return Err(EditError::MissingEnd(target.kind.clone()));
    }
    Ok(())
}

/// Events and to-dos must carry an end or DURATION to be revised.
fn ensure_end(edited: &Component) -> Result<(), EditError> {
    let has_end = edited.end().is_some() || edited.duration().is_some();
    match edited.kind {
        ComponentKind::VEvent | ComponentKind::VTodo if !has_end => {
            Err(EditError::MissingEnd(edited.kind.clone()))
        }
        _ => Ok(()),
    }
}

fn shift_until(component: &mut Component, shift: Span) -> Result<(), EditError> {
    if let Some(mut rule) = component.rrule().cloned()
        && let Some(until) = rule.until.take()
    {
        rule.until = Some(until.shift_wall_clock(shift)?);
        component.set_rrule(Some(rule));
    }
    Ok(())
}

/// An override moved along with its series.
fn rebase(component: &Component, shift: Span) -> Result<Component, EditError> {
    let mut rebased = component.clone();
    if let Some(rid) = component.recurrence_id() {
        let rid = rid.shift_wall_clock(shift)?;
        rebased.set_recurrence_id(Some(&rid), component.is_this_and_future());
    }
    stamp(&mut rebased, component.sequence());
    Ok(rebased)
}

/// Names of properties whose values differ, placement aside, in the order
/// they appear in `edited` and then `original`.
fn changed_properties(original: &Component, edited: &Component) -> Vec<PropertyName> {
    let mut names: Vec<PropertyName> = Vec::new();
    for property in edited.properties().chain(original.properties()) {
        if !PLACEMENT.contains(&property.name) && !names.contains(&property.name) {
            names.push(property.name.clone());
        }
    }
    names.retain(|name| {
        let before: Vec<_> = original.properties_named(name).collect();
        let after: Vec<_> = edited.properties_named(name).collect();
        before != after
    });
    names
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::path::Path;

use recurcal_ical::recurrence::{occurrence, recurrences};
use recurcal_ical::{
    Component, ComponentKind, Diagnostic, FormatOptions, Method, Occurrence, Property,
    PropertyName, RecurrenceError, Status, Temporal, ValidationError, Version, format_component,
    parse, parse_lenient,
};

use crate::config::Config;
use crate::error::Error;

/// A VCALENDAR: calendar properties plus top-level components.
///
/// Overrides (components with RECURRENCE-ID) are stored beside their
/// parent and found again by UID, never by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    root: Component,
}

/// A problem that involves more than one component.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// An override whose series is not in the calendar.
    #[error("override of {uid} has no parent series")]
    OrphanOverride {
        /// UID shared with the missing parent
        uid: String,
    },

    /// A component is not valid on its own.
    #[error("{}: {error}", uid.as_deref().unwrap_or("VCALENDAR"))]
    Component {
        /// UID of the component, if it has one
        uid: Option<String>,
        /// What is wrong
        error: ValidationError,
    },
}

impl Calendar {
    /// An empty calendar with PRODID and VERSION.
    #[must_use]
    pub fn new(prod_id: &str) -> Self {
        let root = Component::new(ComponentKind::VCalendar)
            .with_property(Property::text(PropertyName::ProdId, prod_id))
            .with_property(Property::text(PropertyName::Version, Version::V2_0.to_string()));
        Self { root }
    }

    /// An empty iTIP message with the given method.
    #[must_use]
    pub fn message(method: Method, prod_id: &str) -> Self {
        let mut calendar = Self::new(prod_id);
        calendar
            .root
            .push_property(Property::text(PropertyName::Method, method.to_string()));
        calendar
    }

    /// Wrap a parsed VCALENDAR.
    ///
    /// # Errors
    /// If the component is not a VCALENDAR.
    pub fn from_component(root: Component) -> Result<Self, Error> {
        match root.kind {
            ComponentKind::VCalendar => Ok(Self { root }),
            _ => Err(Error::NotACalendar),
        }
    }

    /// Parse the first VCALENDAR in `text`.
    ///
    /// # Errors
    /// If any line has an error, with all diagnostics, or if there is no
    /// VCALENDAR.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let components = parse(text).map_err(|diagnostics| Error::Parse { diagnostics })?;
        Self::first_calendar(components)
    }

    /// Parse the first VCALENDAR in `text`, keeping whatever could be
    /// understood and returning the diagnostics beside it.
    ///
    /// # Errors
    /// If there is no VCALENDAR at all.
    pub fn parse_lenient(text: &str) -> Result<(Self, Vec<Diagnostic>), Error> {
        let parsed = parse_lenient(text);
        let calendar = Self::first_calendar(parsed.components)?;
        Ok((calendar, parsed.diagnostics))
    }

    /// Read and parse a `.ics` file.
    ///
    /// # Errors
    /// If the file cannot be read, or as [`Calendar::parse`].
    #[tracing::instrument]
    pub fn parse_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let calendar = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            components = calendar.components().count(),
            "parsed calendar file"
        );
        Ok(calendar)
    }

    fn first_calendar(components: Vec<Component>) -> Result<Self, Error> {
        components
            .into_iter()
            .find(|c| c.kind == ComponentKind::VCalendar)
            .map(|root| Self { root })
            .ok_or(Error::NotACalendar)
    }

    /// RFC 5545 text, folded at 75 octets.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.root.to_text()
    }

    /// RFC 5545 text with the given formatting options.
    #[must_use]
    pub fn to_text_with(&self, options: FormatOptions) -> String {
        format_component(&self.root, options)
    }

    /// The VCALENDAR component.
    #[must_use]
    pub fn root(&self) -> &Component {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Component {
        &mut self.root
    }

    /// METHOD, set on iTIP messages.
    #[must_use]
    pub fn method(&self) -> Option<Method> {
        self.root
            .property(&PropertyName::Method)
            .and_then(Property::as_text)
            .map(Method::from_token)
    }

    /// PRODID
    #[must_use]
    pub fn prod_id(&self) -> Option<&str> {
        self.root
            .property(&PropertyName::ProdId)
            .and_then(Property::as_text)
    }

    /// Top-level components in order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.root.components()
    }

    /// Top-level components of one kind, in order.
    pub fn components_of<'a>(
        &'a self,
        kind: &'a ComponentKind,
    ) -> impl Iterator<Item = &'a Component> + 'a {
        self.components().filter(move |c| &c.kind == kind)
    }

    /// Append a top-level component.
    pub fn push(&mut self, component: Component) {
        self.root.push_component(component);
    }

    /// The component with this UID and RECURRENCE-ID; `None` asks for the
    /// series parent.
    #[must_use]
    pub fn find(&self, uid: &str, recurrence_id: Option<&Temporal>) -> Option<&Component> {
        self.components()
            .find(|c| c.uid() == Some(uid) && matches_rid(c, recurrence_id))
    }

    pub(crate) fn find_mut(
        &mut self,
        uid: &str,
        recurrence_id: Option<&Temporal>,
    ) -> Option<&mut Component> {
        self.root
            .components_mut()
            .find(|c| c.uid() == Some(uid) && matches_rid(c, recurrence_id))
    }

    /// The series parent: the component with this UID and no RECURRENCE-ID.
    #[must_use]
    pub fn parent(&self, uid: &str) -> Option<&Component> {
        self.find(uid, None)
    }

    /// Every override of the series, in order.
    pub fn overrides<'a>(&'a self, uid: &'a str) -> impl Iterator<Item = &'a Component> + 'a {
        self.components()
            .filter(move |c| c.uid() == Some(uid) && c.recurrence_id().is_some())
    }

    /// Remove the parent and every override with this UID, returning how
    /// many components were removed.
    pub fn remove_series(&mut self, uid: &str) -> usize {
        self.remove_where(|c| c.uid() == Some(uid))
    }

    pub(crate) fn remove_where(&mut self, mut remove: impl FnMut(&Component) -> bool) -> usize {
        let before = self.components().count();
        self.root.retain_components(|c| !remove(c));
        before - self.components().count()
    }

    /// Every problem in the calendar: invalid components and overrides
    /// without a parent.
    #[must_use]
    pub fn errors(&self) -> Vec<CalendarError> {
        let mut shell = self.root.clone();
        shell.retain_components(|_| false);
        let mut errors: Vec<_> = shell
            .errors()
            .into_iter()
            .map(|error| CalendarError::Component { uid: None, error })
            .collect();

        for component in self.components() {
            let uid = component.uid().map(str::to_string);
            errors.extend(component.errors().into_iter().map(|error| {
                CalendarError::Component {
                    uid: uid.clone(),
                    error,
                }
            }));
        }

        let mut orphans: Vec<&str> = self
            .components()
            .filter(|c| c.recurrence_id().is_some())
            .filter_map(Component::uid)
            .filter(|uid| self.parent(uid).is_none())
            .collect();
        orphans.sort_unstable();
        orphans.dedup();
        errors.extend(orphans.into_iter().map(|uid| CalendarError::OrphanOverride {
            uid: uid.to_string(),
        }));
        errors
    }

    /// Whether [`Calendar::errors`] is empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Occurrences of a series in `[start, end)`, overrides spliced in, in
    /// ascending order.
    ///
    /// An override replaces the instance named by its RECURRENCE-ID and
    /// shows up where its own DTSTART puts it; a cancelled override removes
    /// the instance. A range override replaces every instance from its
    /// anchor on with its own recurrence set.
    ///
    /// # Errors
    /// If the parent or a range override cannot be expanded.
    pub fn series_occurrences(
        &self,
        uid: &str,
        start: &Temporal,
        end: &Temporal,
    ) -> Result<Vec<Occurrence>, RecurrenceError> {
        self.series_occurrences_with(uid, start, end, &Config::default())
    }

    /// As [`Calendar::series_occurrences`], stopping sparse rules after
    /// [`Config::max_empty_periods`] periods in a row without an instance.
    ///
    /// # Errors
    /// As [`Calendar::series_occurrences`].
    pub fn series_occurrences_with(
        &self,
        uid: &str,
        start: &Temporal,
        end: &Temporal,
        config: &Config,
    ) -> Result<Vec<Occurrence>, RecurrenceError> {
        let Some(parent) = self.parent(uid) else {
            return Ok(Vec::new());
        };

        let mut ranges: Vec<&Component> = self
            .overrides(uid)
            .filter(|c| c.is_this_and_future())
            .collect();
        ranges.sort_by(|a, b| compare_rid(a, b));
        let singles: Vec<&Component> = self
            .overrides(uid)
            .filter(|c| !c.is_this_and_future())
            .collect();

        // each segment runs from its anchor to the next one
        let mut segments = vec![(parent, None)];
        segments.extend(ranges.iter().map(|&c| (c, c.recurrence_id())));
        let mut result = Vec::new();
        for (i, &(component, _)) in segments.iter().enumerate() {
            let next_anchor = segments.get(i + 1).and_then(|&(_, anchor)| anchor);
            if component.status() == Some(Status::Cancelled) {
                continue;
            }
            let shift = match component.recurrence_id() {
                Some(rid) => match component.dtstart() {
                    Some(dtstart) => rid.wall_clock_until(dtstart)?,
                    None => continue,
                },
                None => jiff::Span::new(),
            };

            let span = component.instance_span();
            let series = recurrences(component, start, end)?
                .with_max_empty_periods(config.max_empty_periods);
            for instance in series {
                let original = instance.shift_wall_clock(shift.negate())?;
                if let Some(anchor) = next_anchor
                    && original.compare(anchor) != Ordering::Less
                {
                    break;
                }
                if singles
                    .iter()
                    .any(|o| o.recurrence_id().is_some_and(|r| r.same_instant(&original)))
                {
                    continue;
                }
                result.push(occurrence(instance, span));
            }
        }

        for single in singles {
            if single.status() == Some(Status::Cancelled) {
                continue;
            }
            let Some(dtstart) = single.dtstart() else {
                continue;
            };
            if dtstart.compare(start) != Ordering::Less && dtstart.compare(end) == Ordering::Less {
                result.push(occurrence(dtstart.clone(), single.instance_span()));
            }
        }

        result.sort_by(|a, b| a.start.compare(&b.start));
        Ok(result)
    }
}

fn matches_rid(component: &Component, recurrence_id: Option<&Temporal>) -> bool {
    match (component.recurrence_id(), recurrence_id) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same_instant(b),
        _ => false,
    }
}

fn compare_rid(a: &Component, b: &Component) -> Ordering {
    match (a.recurrence_id(), b.recurrence_id()) {
        (Some(a), Some(b)) => a.compare(b),
        _ => Ordering::Equal,
    }
}

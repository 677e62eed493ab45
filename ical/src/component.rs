// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Components: `BEGIN`/`END` blocks of properties and nested components.
//!
//! A [`Component`] keeps its properties and sub-components in one ordered
//! [`Children`] list, so the text written out follows the order in which
//! children were parsed or added. Displayable components (VEVENT, VTODO,
//! VJOURNAL) get typed accessors for the properties that drive recurrence
//! and scheduling.

mod children;
mod validate;

use std::fmt;

use jiff::{Span, Timestamp, ToSpan};

pub use children::{Child, ChildId, Children};
pub use validate::ValidationError;

use crate::datetime::Temporal;
use crate::formatter::{FormatOptions, format_component};
use crate::keyword::{
    KW_DAYLIGHT, KW_STANDARD, KW_VALARM, KW_VCALENDAR, KW_VEVENT, KW_VFREEBUSY, KW_VJOURNAL,
    KW_VTIMEZONE, KW_VTODO, name_enum,
};
use crate::parameter::{ParameterName, RecurrenceRange};
use crate::property::{Property, PropertyName, Status};
use crate::value::{RecurrenceRule, Value, ValueDuration};

name_enum! {
    /// Names of iCalendar components
    #[expect(missing_docs)]
    pub enum ComponentKind {
        VCalendar => KW_VCALENDAR,
        VEvent    => KW_VEVENT,
        VTodo     => KW_VTODO,
        VJournal  => KW_VJOURNAL,
        VFreeBusy => KW_VFREEBUSY,
        VTimeZone => KW_VTIMEZONE,
        VAlarm    => KW_VALARM,
        Standard  => KW_STANDARD,
        Daylight  => KW_DAYLIGHT,
    }
}

impl ComponentKind {
    /// Whether the component is shown on a calendar and may recur.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        matches!(self, Self::VEvent | Self::VTodo | Self::VJournal)
    }

    /// Property holding the end of an instance, DTEND or DUE.
    #[must_use]
    pub fn end_property(&self) -> Option<PropertyName> {
        match self {
            Self::VEvent | Self::VFreeBusy => Some(PropertyName::DtEnd),
            Self::VTodo => Some(PropertyName::Due),
            _ => None,
        }
    }
}

/// An iCalendar component.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Component name
    pub kind: ComponentKind,
    children: Children,
}

impl Component {
    /// An empty component.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            children: Children::new(),
        }
    }

    /// Append a property, builder style.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.children.push(property);
        self
    }

    /// Append a sub-component, builder style.
    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.children.push(component);
        self
    }

    /// All children in order.
    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// All children in order, mutably.
    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Properties in order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.children.iter().filter_map(|(_, c)| c.as_property())
    }

    /// Sub-components in order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.children.iter().filter_map(|(_, c)| c.as_component())
    }

    /// Sub-components in order, mutably.
    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.children.iter_mut().filter_map(|(_, c)| match c {
            Child::Component(c) => Some(c),
            Child::Property(_) => None,
        })
    }

    /// First property with the given name.
    #[must_use]
    pub fn property(&self, name: &PropertyName) -> Option<&Property> {
        self.properties().find(|p| &p.name == name)
    }

    /// Every property with the given name.
    pub fn properties_named<'a>(
        &'a self,
        name: &'a PropertyName,
    ) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties().filter(move |p| &p.name == name)
    }

    /// Append a property.
    pub fn push_property(&mut self, property: Property) -> ChildId {
        self.children.push(property)
    }

    /// Append a sub-component.
    pub fn push_component(&mut self, component: Component) -> ChildId {
        self.children.push(component)
    }

    /// Add a property after the existing ones but before any sub-component.
    pub fn add_property(&mut self, property: Property) -> ChildId {
        let first_component = self
            .children
            .iter()
            .position(|(_, c)| c.as_component().is_some());
        match first_component {
            Some(index) => self.children.insert(index, property),
            None => self.children.push(property),
        }
    }

    /// Replace the first property of the same name in place and drop any
    /// later ones, or add it as [`Component::add_property`] does.
    pub fn set_property(&mut self, property: Property) -> ChildId {
        let ids = self.property_ids(&property.name);
        match ids.split_first() {
            Some((&first, rest)) => {
                for &id in rest {
                    self.children.remove(id);
                }
                self.children.replace(first, Some(Child::Property(property)));
                first
            }
            None => self.add_property(property),
        }
    }

    /// Remove every property with the given name, returning how many.
    pub fn remove_property(&mut self, name: &PropertyName) -> usize {
        let before = self.children.len();
        self.children
            .retain(|c| c.as_property().is_none_or(|p| &p.name != name));
        before - self.children.len()
    }

    /// Keep only the sub-components for which `keep` returns true.
    pub fn retain_components(&mut self, mut keep: impl FnMut(&Component) -> bool) {
        self.children
            .retain(|c| c.as_component().is_none_or(&mut keep));
    }

    fn property_ids(&self, name: &PropertyName) -> Vec<ChildId> {
        self.children
            .iter()
            .filter(|(_, c)| c.as_property().is_some_and(|p| &p.name == name))
            .map(|(id, _)| id)
            .collect()
    }

    fn temporal(&self, name: &PropertyName) -> Option<&Temporal> {
        self.property(name).and_then(Property::as_temporal)
    }

    fn set_temporal(&mut self, name: PropertyName, value: Option<&Temporal>) {
        match value {
            Some(t) => {
                self.set_property(Property::from_temporal(name, t));
            }
            None => {
                self.remove_property(&name);
            }
        }
    }

    /// UID, the identity shared by a series and its overrides.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.property(&PropertyName::Uid).and_then(Property::as_text)
    }

    /// SEQUENCE, 0 when absent.
    #[must_use]
    pub fn sequence(&self) -> i32 {
        self.property(&PropertyName::Sequence)
            .and_then(Property::as_integer)
            .unwrap_or(0)
    }

    /// DTSTART
    #[must_use]
    pub fn dtstart(&self) -> Option<&Temporal> {
        self.temporal(&PropertyName::DtStart)
    }

    /// DTEND
    #[must_use]
    pub fn dtend(&self) -> Option<&Temporal> {
        self.temporal(&PropertyName::DtEnd)
    }

    /// DUE
    #[must_use]
    pub fn due(&self) -> Option<&Temporal> {
        self.temporal(&PropertyName::Due)
    }

    /// DTEND of an event or DUE of a to-do.
    #[must_use]
    pub fn end(&self) -> Option<&Temporal> {
        self.kind
            .end_property()
            .and_then(|name| self.temporal(&name))
    }

    /// DURATION
    #[must_use]
    pub fn duration(&self) -> Option<ValueDuration> {
        self.property(&PropertyName::Duration)
            .and_then(Property::as_duration)
    }

    /// DTSTAMP
    #[must_use]
    pub fn dtstamp(&self) -> Option<&Temporal> {
        self.temporal(&PropertyName::DtStamp)
    }

    /// RRULE
    #[must_use]
    pub fn rrule(&self) -> Option<&RecurrenceRule> {
        self.property(&PropertyName::RRule)
            .and_then(Property::as_recur)
    }

    /// Every RDATE value across all RDATE properties; periods give their start.
    #[must_use]
    pub fn rdates(&self) -> Vec<Temporal> {
        self.properties_named(&PropertyName::RDate)
            .flat_map(Property::temporals)
            .cloned()
            .collect()
    }

    /// Every EXDATE value across all EXDATE properties.
    #[must_use]
    pub fn exdates(&self) -> Vec<Temporal> {
        self.properties_named(&PropertyName::ExDate)
            .flat_map(Property::temporals)
            .cloned()
            .collect()
    }

    /// RECURRENCE-ID, set on overrides of a series instance.
    #[must_use]
    pub fn recurrence_id(&self) -> Option<&Temporal> {
        self.temporal(&PropertyName::RecurrenceId)
    }

    /// RANGE of the RECURRENCE-ID.
    #[must_use]
    pub fn range(&self) -> Option<RecurrenceRange> {
        self.property(&PropertyName::RecurrenceId)
            .and_then(Property::range)
    }

    /// Whether this overrides an instance and every later one.
    #[must_use]
    pub fn is_this_and_future(&self) -> bool {
        self.range() == Some(RecurrenceRange::ThisAndFuture)
    }

    /// STATUS
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.property(&PropertyName::Status)
            .and_then(Property::as_text)
            .map(Status::from_token)
    }

    /// SUMMARY
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.property(&PropertyName::Summary)
            .and_then(Property::as_text)
    }

    /// RELATED-TO
    #[must_use]
    pub fn related_to(&self) -> Option<&str> {
        self.property(&PropertyName::RelatedTo)
            .and_then(Property::as_text)
    }

    /// TZID of a VTIMEZONE.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.property(&PropertyName::TzId)
            .and_then(Property::as_text)
    }

    /// Whether the component has RRULE or RDATE.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.property(&PropertyName::RRule).is_some()
            || self.property(&PropertyName::RDate).is_some()
    }

    /// Length of one instance: end minus start, or DURATION.
    ///
    /// Without either, an all-day instance lasts one day and any other
    /// instance has no length.
    #[must_use]
    pub fn instance_span(&self) -> Span {
        let start = self.dtstart();
        if let (Some(start), Some(end)) = (start, self.end())
            && let Ok(span) = start.span_until(end)
        {
            return span;
        }
        if let Some(duration) = self.duration()
            && let Ok(span) = duration.to_span()
        {
            return span;
        }
        match start {
            Some(Temporal::Date(_)) => 1.day(),
            _ => Span::new(),
        }
    }

    /// Set UID.
    pub fn set_uid(&mut self, uid: impl Into<String>) {
        self.set_property(Property::text(PropertyName::Uid, uid));
    }

    /// Set SEQUENCE.
    pub fn set_sequence(&mut self, sequence: i32) {
        self.set_property(Property::integer(PropertyName::Sequence, sequence));
    }

    /// Set DTSTART, or remove it.
    pub fn set_dtstart(&mut self, value: Option<&Temporal>) {
        self.set_temporal(PropertyName::DtStart, value);
    }

    /// Set DTEND, or remove it.
    pub fn set_dtend(&mut self, value: Option<&Temporal>) {
        self.set_temporal(PropertyName::DtEnd, value);
    }

    /// Set DUE, or remove it.
    pub fn set_due(&mut self, value: Option<&Temporal>) {
        self.set_temporal(PropertyName::Due, value);
    }

    /// Set DURATION, or remove it.
    pub fn set_duration(&mut self, value: Option<ValueDuration>) {
        match value {
            Some(d) => {
                self.set_property(Property::new(PropertyName::Duration, Value::Duration(d)));
            }
            None => {
                self.remove_property(&PropertyName::Duration);
            }
        }
    }

    /// Set DTSTAMP, always written in UTC.
    pub fn set_dtstamp(&mut self, stamp: Timestamp) {
        self.set_temporal(PropertyName::DtStamp, Some(&Temporal::Utc(stamp)));
    }

    /// Set RECURRENCE-ID, optionally with `RANGE=THISANDFUTURE`, or remove it.
    pub fn set_recurrence_id(&mut self, value: Option<&Temporal>, this_and_future: bool) {
        let Some(value) = value else {
            self.remove_property(&PropertyName::RecurrenceId);
            return;
        };
        let mut prop = Property::from_temporal(PropertyName::RecurrenceId, value);
        if this_and_future {
            prop = prop.with_param(crate::parameter::Parameter::this_and_future());
        }
        self.set_property(prop);
    }

    /// Set STATUS.
    pub fn set_status(&mut self, status: Status) {
        self.set_property(Property::text(PropertyName::Status, status.to_string()));
    }

    /// Set RRULE, or remove it.
    pub fn set_rrule(&mut self, rule: Option<RecurrenceRule>) {
        match rule {
            Some(rule) => {
                self.set_property(Property::new(PropertyName::RRule, Value::Recur(rule)));
            }
            None => {
                self.remove_property(&PropertyName::RRule);
            }
        }
    }

    /// Replace every EXDATE with a single property, none if empty.
    pub fn set_exdates(&mut self, dates: &[Temporal]) {
        self.set_temporal_list(PropertyName::ExDate, dates);
    }

    /// Replace every RDATE with a single property, none if empty.
    ///
    /// RDATE periods are not preserved; use the children list to keep them.
    pub fn set_rdates(&mut self, dates: &[Temporal]) {
        self.set_temporal_list(PropertyName::RDate, dates);
    }

    fn set_temporal_list(&mut self, name: PropertyName, dates: &[Temporal]) {
        if dates.is_empty() {
            self.remove_property(&name);
        } else {
            self.set_property(Property::from_temporals(name, dates));
        }
    }

    /// `TZID` parameter of the named property, whether or not the zone
    /// resolved.
    #[must_use]
    pub fn property_tzid<'a>(&'a self, name: &PropertyName) -> Option<&'a str> {
        self.property(name)
            .and_then(|p| p.param_value(&ParameterName::TzId))
    }

    /// The component as RFC 5545 text, folded at 75 octets with CRLF line
    /// endings.
    #[must_use]
    pub fn to_text(&self) -> String {
        format_component(self, FormatOptions::default())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::value::Frequency;

    fn event() -> Component {
        Component::new(ComponentKind::VEvent)
            .with_property(Property::text(PropertyName::Uid, "1@example.com"))
            .with_property(Property::from_temporal(
                PropertyName::DtStart,
                &Temporal::Floating(date(2015, 11, 15).at(10, 0, 0, 0)),
            ))
            .with_property(Property::text(PropertyName::Summary, "Daily"))
    }

    #[test]
    fn reads_typed_properties() {
        let mut event = event();
        assert_eq!(event.uid(), Some("1@example.com"));
        assert_eq!(event.sequence(), 0);
        assert_eq!(event.summary(), Some("Daily"));
        assert!(!event.is_recurring());

        event.set_rrule(Some(RecurrenceRule::new(Frequency::Daily)));
        assert!(event.is_recurring());
        assert_eq!(event.rrule().map(|r| r.freq), Some(Frequency::Daily));
    }

    #[test]
    fn sets_properties_in_place() {
        let mut event = event();
        event.set_sequence(2);
        event.set_dtstart(Some(&Temporal::Date(date(2015, 11, 16))));
        let names: Vec<_> = event.properties().map(|p| p.name.to_string()).collect();
        assert_eq!(names, ["UID", "DTSTART", "SUMMARY", "SEQUENCE"]);
        assert_eq!(event.sequence(), 2);
        assert_eq!(event.dtstart(), Some(&Temporal::Date(date(2015, 11, 16))));

        assert_eq!(event.remove_property(&PropertyName::Summary), 1);
        assert_eq!(event.summary(), None);
    }

    #[test]
    fn adds_properties_before_sub_components() {
        let mut event = event().with_component(Component::new(ComponentKind::VAlarm));
        event.set_sequence(1);
        event.add_property(Property::text(PropertyName::Comment, "late"));
        let kinds: Vec<_> = event
            .children()
            .iter()
            .map(|(_, c)| match c {
                Child::Property(p) => p.name.to_string(),
                Child::Component(c) => c.kind.to_string(),
            })
            .collect();
        assert_eq!(
            kinds,
            ["UID", "DTSTART", "SUMMARY", "SEQUENCE", "COMMENT", "VALARM"]
        );
    }

    #[test]
    fn computes_instance_span() {
        let mut event = event();
        assert_eq!(event.instance_span().fieldwise(), Span::new().fieldwise());

        event.set_dtend(Some(&Temporal::Floating(date(2015, 11, 15).at(11, 30, 0, 0))));
        assert_eq!(event.instance_span().fieldwise(), 1.hour().minutes(30).fieldwise());

        event.set_dtend(None);
        event.set_duration(Some(ValueDuration::from_seconds(900)));
        assert_eq!(
            event.instance_span().total(jiff::Unit::Minute).unwrap(),
            15.0
        );

        event.set_duration(None);
        event.set_dtstart(Some(&Temporal::Date(date(2015, 11, 15))));
        assert_eq!(event.instance_span().fieldwise(), 1.day().fieldwise());
    }

    #[test]
    fn sets_recurrence_id_with_range() {
        let mut event = event();
        let rid = Temporal::Floating(date(2015, 11, 17).at(10, 0, 0, 0));
        event.set_recurrence_id(Some(&rid), true);
        assert_eq!(event.recurrence_id(), Some(&rid));
        assert!(event.is_this_and_future());

        event.set_recurrence_id(Some(&rid), false);
        assert_eq!(event.range(), None);
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Structural validation of components, RFC 5545 Section 3.6.
//!
//! Validation is pull-based: a component may be invalid while it is being
//! edited, and [`Component::errors`] reports what is wrong at the moment it
//! is asked.

use std::cmp::Ordering;

use crate::component::{Component, ComponentKind};
use crate::datetime::{Temporal, TemporalKind};
use crate::property::{Action, Property, PropertyName, Status};
use crate::value::{RuleViolation, Value, ValueKind};

/// A structural problem found in a component.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required property is absent.
    #[error("{component} requires {property}")]
    MissingProperty {
        /// Component kind
        component: ComponentKind,
        /// Missing property
        property: PropertyName,
    },

    /// A property that may occur once occurs more often.
    #[error("{property} occurs more than once in {component}")]
    DuplicateProperty {
        /// Component kind
        component: ComponentKind,
        /// Repeated property
        property: PropertyName,
    },

    /// Both an end (DTEND or DUE) and DURATION are set.
    #[error("{component} has both {end} and DURATION")]
    EndAndDuration {
        /// Component kind
        component: ComponentKind,
        /// DTEND or DUE
        end: PropertyName,
    },

    /// DURATION without DTSTART in a to-do.
    #[error("DURATION requires DTSTART in {0}")]
    DurationWithoutStart(ComponentKind),

    /// The end is before the start.
    #[error("{end} is before DTSTART in {component}")]
    EndBeforeStart {
        /// Component kind
        component: ComponentKind,
        /// DTEND or DUE
        end: PropertyName,
    },

    /// DURATION is negative.
    #[error("DURATION is negative in {0}")]
    NegativeDuration(ComponentKind),

    /// A DATE where DTSTART holds a DATE-TIME, or the other way around.
    #[error("{property} is a {found} but DTSTART is a {expected}")]
    TypeMismatch {
        /// Offending property
        property: PropertyName,
        /// Shape of DTSTART
        expected: TemporalKind,
        /// Shape of the property
        found: TemporalKind,
    },

    /// A property holds a value type it does not allow.
    #[error("{property} cannot hold a {kind} value")]
    UnexpectedValue {
        /// Offending property
        property: PropertyName,
        /// Value type found
        kind: ValueKind,
    },

    /// A property that requires UTC holds a local time.
    #[error("{0} must be a UTC date-time")]
    NotUtc(PropertyName),

    /// STATUS value not defined for the component.
    #[error("STATUS {status} is not valid in {component}")]
    StatusNotAllowed {
        /// Component kind
        component: ComponentKind,
        /// Status found
        status: Status,
    },

    /// RRULE breaks a part combination rule.
    #[error(transparent)]
    InvalidRule(#[from] RuleViolation),

    /// REPEAT and DURATION of an alarm must appear together.
    #[error("VALARM needs both REPEAT and DURATION, or neither")]
    RepeatWithoutDuration,

    /// VTIMEZONE without any STANDARD or DAYLIGHT observance.
    #[error("VTIMEZONE requires at least one STANDARD or DAYLIGHT")]
    MissingObservance,
}

/// Properties that must not occur more than once in displayable components.
const SINGLETONS: &[PropertyName] = &[
    PropertyName::Uid,
    PropertyName::DtStamp,
    PropertyName::DtStart,
    PropertyName::DtEnd,
    PropertyName::Due,
    PropertyName::Duration,
    PropertyName::RecurrenceId,
    PropertyName::Sequence,
    PropertyName::Status,
    PropertyName::Summary,
    PropertyName::Class,
    PropertyName::Created,
    PropertyName::LastModified,
];

impl Component {
    /// Every structural problem in this component and its sub-components.
    #[must_use]
    pub fn errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        errors
    }

    /// Whether [`Component::errors`] is empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        self.check_values(errors);
        match self.kind {
            ComponentKind::VCalendar => {
                self.require(&[PropertyName::ProdId, PropertyName::Version], errors);
            }
            ComponentKind::VEvent | ComponentKind::VTodo | ComponentKind::VJournal => {
                self.check_displayable(errors);
            }
            ComponentKind::VFreeBusy => {
                self.require(&[PropertyName::Uid, PropertyName::DtStamp], errors);
            }
            ComponentKind::VTimeZone => {
                self.require(&[PropertyName::TzId], errors);
                if !self.components().any(|c| {
                    matches!(c.kind, ComponentKind::Standard | ComponentKind::Daylight)
                }) {
                    errors.push(ValidationError::MissingObservance);
                }
            }
            ComponentKind::Standard | ComponentKind::Daylight => {
                self.require(
                    &[
                        PropertyName::DtStart,
                        PropertyName::TzOffsetFrom,
                        PropertyName::TzOffsetTo,
                    ],
                    errors,
                );
            }
            ComponentKind::VAlarm => self.check_alarm(errors),
            ComponentKind::Other(_) => {}
        }

        for child in self.components() {
            child.collect_errors(errors);
        }
    }

    fn require(&self, names: &[PropertyName], errors: &mut Vec<ValidationError>) {
        for name in names {
            if self.property(name).is_none() {
                errors.push(ValidationError::MissingProperty {
                    component: self.kind.clone(),
                    property: name.clone(),
                });
            }
        }
    }

    fn check_values(&self, errors: &mut Vec<ValidationError>) {
        for prop in self.properties() {
            let spec = prop.name.spec();
            if spec.allowed.contains(&ValueKind::Unknown) {
                continue;
            }
            for value in &prop.values {
                if !spec.allowed.contains(&value.kind()) {
                    errors.push(ValidationError::UnexpectedValue {
                        property: prop.name.clone(),
                        kind: value.kind(),
                    });
                    break;
                }
                if spec.utc_only && !matches!(value, Value::Temporal(Temporal::Utc(_))) {
                    errors.push(ValidationError::NotUtc(prop.name.clone()));
                    break;
                }
            }
        }
    }

    fn check_displayable(&self, errors: &mut Vec<ValidationError>) {
        let kind = &self.kind;
        self.require(&[PropertyName::Uid, PropertyName::DtStamp], errors);
        if *kind == ComponentKind::VEvent {
            self.require(&[PropertyName::DtStart], errors);
        }

        for name in SINGLETONS {
            if self.properties_named(name).nth(1).is_some() {
                errors.push(ValidationError::DuplicateProperty {
                    component: kind.clone(),
                    property: name.clone(),
                });
            }
        }

        let start = self.dtstart();
        if let Some(end_name) = kind.end_property() {
            let end = self.end();
            if end.is_some() && self.property(&PropertyName::Duration).is_some() {
                errors.push(ValidationError::EndAndDuration {
                    component: kind.clone(),
                    end: end_name.clone(),
                });
            }
            if let (Some(start), Some(end)) = (start, end) {
                check_shape(&end_name, start, end, errors);
                if end.compare(start) == Ordering::Less {
                    errors.push(ValidationError::EndBeforeStart {
                        component: kind.clone(),
                        end: end_name,
                    });
                }
            }
        }

        if let Some(duration) = self.duration() {
            if duration.is_negative() {
                errors.push(ValidationError::NegativeDuration(kind.clone()));
            }
            if *kind == ComponentKind::VTodo && start.is_none() {
                errors.push(ValidationError::DurationWithoutStart(kind.clone()));
            }
        }

        if let Some(start) = start {
            if let Some(rid) = self.recurrence_id() {
                check_shape(&PropertyName::RecurrenceId, start, rid, errors);
            }
            for exdate in self.exdates() {
                if exdate.is_date() != start.is_date() {
                    check_shape(&PropertyName::ExDate, start, &exdate, errors);
                    break;
                }
            }
        }

        if let Some(rule) = self.rrule() {
            errors.extend(
                rule.violations(start)
                    .into_iter()
                    .map(ValidationError::InvalidRule),
            );
        }

        if let Some(status) = self.status()
            && !status.allowed_in(kind.as_str())
        {
            errors.push(ValidationError::StatusNotAllowed {
                component: kind.clone(),
                status,
            });
        }
    }

    fn check_alarm(&self, errors: &mut Vec<ValidationError>) {
        self.require(&[PropertyName::Action, PropertyName::Trigger], errors);

        let action = self
            .property(&PropertyName::Action)
            .and_then(Property::as_text)
            .map(Action::from_token);
        match action {
            Some(Action::Display) => self.require(&[PropertyName::Description], errors),
            Some(Action::Email) => self.require(
                &[
                    PropertyName::Description,
                    PropertyName::Summary,
                    PropertyName::Attendee,
                ],
                errors,
            ),
            _ => {}
        }

        let repeat = self.property(&PropertyName::Repeat).is_some();
        let duration = self.property(&PropertyName::Duration).is_some();
        if repeat != duration {
            errors.push(ValidationError::RepeatWithoutDuration);
        }
    }
}

/// DATE against DATE-TIME; zones may differ.
fn check_shape(
    property: &PropertyName,
    start: &Temporal,
    other: &Temporal,
    errors: &mut Vec<ValidationError>,
) {
    if start.is_date() != other.is_date() {
        errors.push(ValidationError::TypeMismatch {
            property: property.clone(),
            expected: start.kind(),
            found: other.kind(),
        });
    }
}

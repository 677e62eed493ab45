// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property model for iCalendar content lines.
//!
//! A [`Property`] is one `NAME;PARAM=VALUE:VALUE` line: a name, its
//! parameters in insertion order, and one or more typed values. What a
//! property may hold is described by its [`PropertySpec`], so a single type
//! covers every property of RFC 5545 Section 3.7 and 3.8.

mod enums;
mod kind;

use std::fmt;

pub use enums::{Action, CalendarScale, Classification, Method, Status, Transparency, Version};
pub use kind::{PropertyName, PropertySpec};

use crate::datetime::Temporal;
use crate::parameter::{Parameter, ParameterName, RecurrenceRange};
use crate::value::{RecurrenceRule, Value, ValueDuration, ValueKind, ValuePeriod};

/// A property with its parameters and values.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name
    pub name: PropertyName,

    /// Parameters, in the order they are written
    pub params: Vec<Parameter>,

    /// Values, at least one
    pub values: Vec<Value>,
}

impl Property {
    /// A property with a single value and no parameters.
    #[must_use]
    pub fn new(name: PropertyName, value: Value) -> Self {
        Self {
            name,
            params: Vec::new(),
            values: vec![value],
        }
    }

    /// A TEXT property.
    #[must_use]
    pub fn text(name: PropertyName, text: impl Into<String>) -> Self {
        Self::new(name, Value::Text(text.into()))
    }

    /// An INTEGER property.
    #[must_use]
    pub fn integer(name: PropertyName, n: i32) -> Self {
        Self::new(name, Value::Integer(n))
    }

    /// A DATE or DATE-TIME property, with `TZID` and `VALUE` set to match.
    #[must_use]
    pub fn from_temporal(name: PropertyName, temporal: &Temporal) -> Self {
        Self::from_temporals(name, std::slice::from_ref(temporal))
    }

    /// A multi-valued DATE or DATE-TIME property such as EXDATE.
    ///
    /// The parameters follow the first value, so all values are expected to
    /// share its shape and zone.
    #[must_use]
    pub fn from_temporals(name: PropertyName, temporals: &[Temporal]) -> Self {
        let mut prop = Self {
            name,
            params: Vec::new(),
            values: Vec::new(),
        };
        prop.set_temporals(temporals);
        prop
    }

    /// Append a parameter.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// First parameter with the given name.
    #[must_use]
    pub fn param(&self, name: &ParameterName) -> Option<&Parameter> {
        self.params.iter().find(|p| &p.name == name)
    }

    /// First value of the first parameter with the given name.
    #[must_use]
    pub fn param_value(&self, name: &ParameterName) -> Option<&str> {
        self.param(name).and_then(Parameter::value)
    }

    /// Replace the parameter of the same name in place, or append it.
    pub fn set_param(&mut self, param: Parameter) {
        match self.params.iter_mut().find(|p| p.name == param.name) {
            Some(slot) => *slot = param,
            None => self.params.push(param),
        }
    }

    /// Remove every parameter with the given name.
    pub fn remove_param(&mut self, name: &ParameterName) {
        self.params.retain(|p| &p.name != name);
    }

    /// First value.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.values.first()
    }

    /// First value as a DATE or DATE-TIME.
    #[must_use]
    pub fn as_temporal(&self) -> Option<&Temporal> {
        self.value().and_then(Value::as_temporal)
    }

    /// Every DATE or DATE-TIME value, with periods contributing their start.
    pub fn temporals(&self) -> impl Iterator<Item = &Temporal> {
        self.values.iter().filter_map(|v| match v {
            Value::Temporal(t) => Some(t),
            Value::Period(p) => Some(p.start()),
            _ => None,
        })
    }

    /// Every PERIOD value.
    pub fn periods(&self) -> impl Iterator<Item = &ValuePeriod> {
        self.values.iter().filter_map(|v| match v {
            Value::Period(p) => Some(p),
            _ => None,
        })
    }

    /// First value as text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value().and_then(Value::as_text)
    }

    /// First value as an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        self.value().and_then(Value::as_integer)
    }

    /// First value as a recurrence rule.
    #[must_use]
    pub fn as_recur(&self) -> Option<&RecurrenceRule> {
        self.value().and_then(Value::as_recur)
    }

    /// First value as a duration.
    #[must_use]
    pub fn as_duration(&self) -> Option<ValueDuration> {
        self.value().and_then(Value::as_duration)
    }

    /// The `RANGE` parameter, meaningful on RECURRENCE-ID.
    #[must_use]
    pub fn range(&self) -> Option<RecurrenceRange> {
        self.param(&ParameterName::Range)
            .and_then(Parameter::as_range)
    }

    /// Value type named by `VALUE`, or the default of the property.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        self.param(&ParameterName::ValueType)
            .and_then(Parameter::as_value_kind)
            .unwrap_or_else(|| self.name.spec().default)
    }

    /// Replace the values with DATE or DATE-TIME values and bring `TZID`
    /// and `VALUE` in line with the first one.
    ///
    /// Zoned values whose zone has no IANA name are stored as UTC, since
    /// they could not be written with a `TZID`.
    pub fn set_temporals(&mut self, temporals: &[Temporal]) {
        self.values = temporals
            .iter()
            .map(|t| match t {
                Temporal::Zoned(z) if z.time_zone().iana_name().is_none() => {
                    Value::Temporal(Temporal::Utc(z.timestamp()))
                }
                t => Value::Temporal(t.clone()),
            })
            .collect();
        self.sync_temporal_params();
    }

    fn sync_temporal_params(&mut self) {
        let first = self.values.first();
        let kind = first.map_or(ValueKind::DateTime, Value::kind);
        let tzid = first
            .and_then(Value::as_temporal)
            .and_then(Temporal::tzid)
            .map(ToOwned::to_owned);

        if kind == self.name.spec().default {
            self.remove_param(&ParameterName::ValueType);
        } else {
            self.set_param(Parameter::value_type(kind));
        }
        match tzid {
            Some(tzid) => self.set_tzid(tzid),
            None => self.remove_param(&ParameterName::TzId),
        }
    }

    /// `TZID` goes before `RANGE` so RECURRENCE-ID reads naturally.
    fn set_tzid(&mut self, tzid: String) {
        let param = Parameter::tzid(tzid);
        if let Some(slot) = self.params.iter_mut().find(|p| p.name == param.name) {
            *slot = param;
            return;
        }
        let at = self
            .params
            .iter()
            .position(|p| p.name == ParameterName::Range)
            .unwrap_or(self.params.len());
        self.params.insert(at, param);
    }
}

impl fmt::Display for Property {
    /// The logical content line, unfolded and without the line break.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for param in &self.params {
            write!(f, ";{param}")?;
        }
        f.write_str(":")?;

        let separator = self.name.spec().separator.unwrap_or(',');
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, "{separator}")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

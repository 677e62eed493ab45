// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters as defined in RFC 5545 Section 3.2.

use std::fmt;

use crate::keyword::{
    KW_ALTREP, KW_CN, KW_CUTYPE, KW_CUTYPE_GROUP, KW_CUTYPE_INDIVIDUAL, KW_CUTYPE_RESOURCE,
    KW_CUTYPE_ROOM, KW_CUTYPE_UNKNOWN, KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_DIR, KW_ENCODING,
    KW_FBTYPE, KW_FMTTYPE, KW_LANGUAGE, KW_MEMBER, KW_PARTSTAT, KW_PARTSTAT_ACCEPTED,
    KW_PARTSTAT_COMPLETED, KW_PARTSTAT_DECLINED, KW_PARTSTAT_DELEGATED, KW_PARTSTAT_IN_PROCESS,
    KW_PARTSTAT_NEEDS_ACTION, KW_PARTSTAT_TENTATIVE, KW_RANGE, KW_RANGE_THISANDFUTURE,
    KW_RELATED, KW_RELATED_END, KW_RELATED_START, KW_RELTYPE, KW_ROLE, KW_ROLE_CHAIR,
    KW_ROLE_NON_PARTICIPANT, KW_ROLE_OPT_PARTICIPANT, KW_ROLE_REQ_PARTICIPANT, KW_RSVP,
    KW_SENT_BY, KW_TZID, KW_VALUE, keyword_enum, name_enum,
};
use crate::value::ValueKind;

name_enum! {
    /// Names of iCalendar parameters
    #[expect(missing_docs)]
    pub enum ParameterName {
        AlternateText       => KW_ALTREP,
        CommonName          => KW_CN,
        CalendarUserType    => KW_CUTYPE,
        Delegators          => KW_DELEGATED_FROM,
        Delegatees          => KW_DELEGATED_TO,
        Directory           => KW_DIR,
        Encoding            => KW_ENCODING,
        FormatType          => KW_FMTTYPE,
        FreeBusyType        => KW_FBTYPE,
        Language            => KW_LANGUAGE,
        Membership          => KW_MEMBER,
        ParticipationStatus => KW_PARTSTAT,
        Range               => KW_RANGE,
        Related             => KW_RELATED,
        RelationshipType    => KW_RELTYPE,
        Role                => KW_ROLE,
        Rsvp                => KW_RSVP,
        SentBy              => KW_SENT_BY,
        TzId                => KW_TZID,
        ValueType           => KW_VALUE,
    }
}

keyword_enum! {
    /// Recurrence identifier range, RFC 5545 Section 3.2.13.
    pub enum RecurrenceRange {
        /// THISANDFUTURE
        ThisAndFuture => KW_RANGE_THISANDFUTURE,
    }
}

keyword_enum! {
    /// Participation status, RFC 5545 Section 3.2.12.
    #[expect(missing_docs)]
    pub enum ParticipationStatus {
        NeedsAction => KW_PARTSTAT_NEEDS_ACTION,
        Accepted    => KW_PARTSTAT_ACCEPTED,
        Declined    => KW_PARTSTAT_DECLINED,
        Tentative   => KW_PARTSTAT_TENTATIVE,
        Delegated   => KW_PARTSTAT_DELEGATED,
        Completed   => KW_PARTSTAT_COMPLETED,
        InProcess   => KW_PARTSTAT_IN_PROCESS,
    }
}

keyword_enum! {
    /// Participation role, RFC 5545 Section 3.2.16.
    #[expect(missing_docs)]
    pub enum ParticipationRole {
        Chair          => KW_ROLE_CHAIR,
        ReqParticipant => KW_ROLE_REQ_PARTICIPANT,
        OptParticipant => KW_ROLE_OPT_PARTICIPANT,
        NonParticipant => KW_ROLE_NON_PARTICIPANT,
    }
}

keyword_enum! {
    /// Calendar user type, RFC 5545 Section 3.2.3.
    #[expect(missing_docs)]
    pub enum CalendarUserType {
        Individual  => KW_CUTYPE_INDIVIDUAL,
        Group       => KW_CUTYPE_GROUP,
        Resource    => KW_CUTYPE_RESOURCE,
        Room        => KW_CUTYPE_ROOM,
        Unspecified => KW_CUTYPE_UNKNOWN,
    }
}

keyword_enum! {
    /// Alarm trigger relationship, RFC 5545 Section 3.2.14.
    #[expect(missing_docs)]
    pub enum AlarmTriggerRelationship {
        Start => KW_RELATED_START,
        End   => KW_RELATED_END,
    }
}

/// One value of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue {
    /// Value text, without quotes.
    pub text: String,

    /// Whether the value was written as a quoted string.
    pub quoted: bool,
}

impl ParamValue {
    /// An unquoted value; quotes are still added on output when required.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    /// Whether the value must be quoted on output.
    #[must_use]
    pub fn needs_quotes(&self) -> bool {
        self.quoted || self.text.contains([':', ';', ','])
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_quotes() {
            write!(f, "\"{}\"", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// A parameter attached to a property, e.g. `TZID=Europe/Berlin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub name: ParameterName,

    /// Parameter values, at least one
    pub values: Vec<ParamValue>,
}

impl Parameter {
    /// A parameter with a single value.
    #[must_use]
    pub fn new(name: ParameterName, value: impl Into<String>) -> Self {
        Self {
            name,
            values: vec![ParamValue::new(value)],
        }
    }

    /// `TZID=<tzid>`
    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new(ParameterName::TzId, tzid)
    }

    /// `VALUE=<kind>`
    #[must_use]
    pub fn value_type(kind: ValueKind) -> Self {
        Self::new(ParameterName::ValueType, kind.to_string())
    }

    /// `RANGE=THISANDFUTURE`
    #[must_use]
    pub fn this_and_future() -> Self {
        Self::new(ParameterName::Range, KW_RANGE_THISANDFUTURE)
    }

    /// First value text.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(|v| v.text.as_str())
    }

    /// The value type named by a `VALUE` parameter.
    #[must_use]
    pub fn as_value_kind(&self) -> Option<ValueKind> {
        match self.name {
            ParameterName::ValueType => self.value().map(ValueKind::from_token),
            _ => None,
        }
    }

    /// The range named by a `RANGE` parameter.
    #[must_use]
    pub fn as_range(&self) -> Option<RecurrenceRange> {
        match self.name {
            ParameterName::Range => self.value().map(RecurrenceRange::from_token),
            _ => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

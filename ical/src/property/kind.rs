// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property names and the value types each property accepts.
//!
//! This module defines the `PropertyName` enum that represents all standard
//! iCalendar properties defined in RFC 5545, along with their value types.

use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT,
    KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE,
    KW_DURATION, KW_EXDATE, KW_FREEBUSY, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION, KW_METHOD,
    KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE, KW_RECURRENCE_ID,
    KW_RELATED_TO, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_STATUS,
    KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO,
    KW_TZURL, KW_UID, KW_URL, KW_VERSION, name_enum,
};
use crate::value::ValueKind;

name_enum! {
    /// Names of iCalendar properties
    #[expect(missing_docs)]
    pub enum PropertyName {
        // 3.7. Calendar Properties
        CalScale        => KW_CALSCALE,
        Method          => KW_METHOD,
        ProdId          => KW_PRODID,
        Version         => KW_VERSION,
        // 3.8.1. Descriptive Component Properties
        Attach          => KW_ATTACH,
        Categories      => KW_CATEGORIES,
        Class           => KW_CLASS,
        Comment         => KW_COMMENT,
        Description     => KW_DESCRIPTION,
        Geo             => KW_GEO,
        Location        => KW_LOCATION,
        PercentComplete => KW_PERCENT_COMPLETE,
        Priority        => KW_PRIORITY,
        Resources       => KW_RESOURCES,
        Status          => KW_STATUS,
        Summary         => KW_SUMMARY,
        // 3.8.2. Date and Time Component Properties
        Completed       => KW_COMPLETED,
        DtEnd           => KW_DTEND,
        Due             => KW_DUE,
        DtStart         => KW_DTSTART,
        Duration        => KW_DURATION,
        FreeBusy        => KW_FREEBUSY,
        Transp          => KW_TRANSP,
        // 3.8.3. Time Zone Component Properties
        TzId            => KW_TZID,
        TzName          => KW_TZNAME,
        TzOffsetFrom    => KW_TZOFFSETFROM,
        TzOffsetTo      => KW_TZOFFSETTO,
        TzUrl           => KW_TZURL,
        // 3.8.4. Relationship Component Properties
        Attendee        => KW_ATTENDEE,
        Contact         => KW_CONTACT,
        Organizer       => KW_ORGANIZER,
        RecurrenceId    => KW_RECURRENCE_ID,
        RelatedTo       => KW_RELATED_TO,
        Url             => KW_URL,
        Uid             => KW_UID,
        // 3.8.5. Recurrence Component Properties
        ExDate          => KW_EXDATE,
        RDate           => KW_RDATE,
        RRule           => KW_RRULE,
        // 3.8.6. Alarm Component Properties
        Action          => KW_ACTION,
        Repeat          => KW_REPEAT,
        Trigger         => KW_TRIGGER,
        // 3.8.7. Change Management Component Properties
        Created         => KW_CREATED,
        DtStamp         => KW_DTSTAMP,
        LastModified    => KW_LAST_MODIFIED,
        Sequence        => KW_SEQUENCE,
        // 3.8.8. Miscellaneous Component Properties
        RequestStatus   => KW_REQUEST_STATUS,
    }
}

/// How the value of a property is read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    /// Value type when no `VALUE` parameter is present.
    pub default: ValueKind,

    /// Value types the property accepts, the default first.
    pub allowed: &'static [ValueKind],

    /// Separator between multiple values, if the property is multi-valued.
    pub separator: Option<char>,

    /// Whether DATE-TIME values must be UTC.
    pub utc_only: bool,
}

impl PropertySpec {
    const fn single(kind: ValueKind, allowed: &'static [ValueKind]) -> Self {
        Self {
            default: kind,
            allowed,
            separator: None,
            utc_only: false,
        }
    }

    const fn list(kind: ValueKind, allowed: &'static [ValueKind], separator: char) -> Self {
        Self {
            default: kind,
            allowed,
            separator: Some(separator),
            utc_only: false,
        }
    }

    const fn utc() -> Self {
        Self {
            default: ValueKind::DateTime,
            allowed: &[ValueKind::DateTime],
            separator: None,
            utc_only: true,
        }
    }
}

impl PropertyName {
    /// Value types of the property, see RFC 5545 Section 3.7 and 3.8.
    ///
    /// Unregistered properties are kept as raw text unless a `VALUE`
    /// parameter says otherwise.
    #[must_use]
    pub fn spec(&self) -> PropertySpec {
        use ValueKind::{
            Binary, CalAddress, Date, DateTime, Duration, Float, Integer, Period, Recur, Text,
            Unknown, Uri, UtcOffset,
        };

        match self {
            Self::CalScale
            | Self::Method
            | Self::ProdId
            | Self::Version
            | Self::Class
            | Self::Comment
            | Self::Description
            | Self::Location
            | Self::Status
            | Self::Summary
            | Self::Transp
            | Self::TzId
            | Self::TzName
            | Self::Contact
            | Self::RelatedTo
            | Self::Uid
            | Self::Action => PropertySpec::single(Text, &[Text]),

            Self::Categories | Self::Resources => PropertySpec::list(Text, &[Text], ','),
            Self::Attach => PropertySpec::single(Uri, &[Uri, Binary]),
            Self::Geo => PropertySpec::list(Float, &[Float], ';'),
            Self::PercentComplete | Self::Priority | Self::Repeat | Self::Sequence => {
                PropertySpec::single(Integer, &[Integer])
            }

            Self::Completed | Self::Created | Self::DtStamp | Self::LastModified => {
                PropertySpec::utc()
            }
            Self::DtEnd | Self::Due | Self::DtStart | Self::RecurrenceId => {
                PropertySpec::single(DateTime, &[DateTime, Date])
            }
            Self::Duration => PropertySpec::single(Duration, &[Duration]),
            Self::FreeBusy => PropertySpec::list(Period, &[Period], ','),

            Self::TzOffsetFrom | Self::TzOffsetTo => PropertySpec::single(UtcOffset, &[UtcOffset]),
            Self::TzUrl | Self::Url => PropertySpec::single(Uri, &[Uri]),
            Self::Attendee | Self::Organizer => PropertySpec::single(CalAddress, &[CalAddress]),

            Self::ExDate => PropertySpec::list(DateTime, &[DateTime, Date], ','),
            Self::RDate => PropertySpec::list(DateTime, &[DateTime, Date, Period], ','),
            Self::RRule => PropertySpec::single(Recur, &[Recur]),
            Self::Trigger => PropertySpec::single(Duration, &[Duration, DateTime]),

            // statcode ";" statdesc [";" extdata], kept verbatim
            Self::RequestStatus | Self::Other(_) => PropertySpec::single(Unknown, &[Unknown]),
        }
    }

    /// Whether the value holds a DATE or DATE-TIME and may carry `TZID`.
    #[must_use]
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::DtStart
                | Self::DtEnd
                | Self::Due
                | Self::RecurrenceId
                | Self::ExDate
                | Self::RDate
                | Self::Completed
                | Self::Created
                | Self::DtStamp
                | Self::LastModified
        )
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545 and RFC 5546.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// Section 3.6 - Calendar Components
pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VTODO: &str = "VTODO";
pub const KW_VJOURNAL: &str = "VJOURNAL";
pub const KW_VFREEBUSY: &str = "VFREEBUSY";
pub const KW_VTIMEZONE: &str = "VTIMEZONE";
pub const KW_VALARM: &str = "VALARM";
pub const KW_STANDARD: &str = "STANDARD";
pub const KW_DAYLIGHT: &str = "DAYLIGHT";

// Section 3.2 - Property Parameters
pub const KW_ALTREP: &str = "ALTREP";
pub const KW_CN: &str = "CN";
pub const KW_CUTYPE: &str = "CUTYPE";
pub const KW_DELEGATED_FROM: &str = "DELEGATED-FROM";
pub const KW_DELEGATED_TO: &str = "DELEGATED-TO";
pub const KW_DIR: &str = "DIR";
pub const KW_ENCODING: &str = "ENCODING";
pub const KW_FMTTYPE: &str = "FMTTYPE";
pub const KW_FBTYPE: &str = "FBTYPE";
pub const KW_LANGUAGE: &str = "LANGUAGE";
pub const KW_MEMBER: &str = "MEMBER";
pub const KW_PARTSTAT: &str = "PARTSTAT";
pub const KW_RANGE: &str = "RANGE";
pub const KW_RELATED: &str = "RELATED";
pub const KW_RELTYPE: &str = "RELTYPE";
pub const KW_ROLE: &str = "ROLE";
pub const KW_RSVP: &str = "RSVP";
pub const KW_SENT_BY: &str = "SENT-BY";
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";

// Section 3.2 - Parameter values
pub const KW_CUTYPE_INDIVIDUAL: &str = "INDIVIDUAL";
pub const KW_CUTYPE_GROUP: &str = "GROUP";
pub const KW_CUTYPE_RESOURCE: &str = "RESOURCE";
pub const KW_CUTYPE_ROOM: &str = "ROOM";
pub const KW_CUTYPE_UNKNOWN: &str = "UNKNOWN";
pub const KW_PARTSTAT_NEEDS_ACTION: &str = "NEEDS-ACTION";
pub const KW_PARTSTAT_ACCEPTED: &str = "ACCEPTED";
pub const KW_PARTSTAT_DECLINED: &str = "DECLINED";
pub const KW_PARTSTAT_TENTATIVE: &str = "TENTATIVE";
pub const KW_PARTSTAT_DELEGATED: &str = "DELEGATED";
pub const KW_PARTSTAT_COMPLETED: &str = "COMPLETED";
pub const KW_PARTSTAT_IN_PROCESS: &str = "IN-PROCESS";
pub const KW_RANGE_THISANDFUTURE: &str = "THISANDFUTURE";
pub const KW_RELATED_START: &str = "START";
pub const KW_RELATED_END: &str = "END";
pub const KW_ROLE_CHAIR: &str = "CHAIR";
pub const KW_ROLE_REQ_PARTICIPANT: &str = "REQ-PARTICIPANT";
pub const KW_ROLE_OPT_PARTICIPANT: &str = "OPT-PARTICIPANT";
pub const KW_ROLE_NON_PARTICIPANT: &str = "NON-PARTICIPANT";

// Section 3.3 - Property Value Data Types
pub const KW_BINARY: &str = "BINARY";
pub const KW_BOOLEAN: &str = "BOOLEAN";
pub const KW_CAL_ADDRESS: &str = "CAL-ADDRESS";
pub const KW_DATE: &str = "DATE";
pub const KW_DATETIME: &str = "DATE-TIME";
pub const KW_DURATION: &str = "DURATION";
pub const KW_FLOAT: &str = "FLOAT";
pub const KW_INTEGER: &str = "INTEGER";
pub const KW_PERIOD: &str = "PERIOD";
pub const KW_RECUR: &str = "RECUR";
pub const KW_TEXT: &str = "TEXT";
pub const KW_TIME: &str = "TIME";
pub const KW_URI: &str = "URI";
pub const KW_UTC_OFFSET: &str = "UTC-OFFSET";

// Section 3.3.10 - Recurrence Rule
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYSECOND: &str = "BYSECOND";
pub const KW_RRULE_BYMINUTE: &str = "BYMINUTE";
pub const KW_RRULE_BYHOUR: &str = "BYHOUR";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_BYYEARDAY: &str = "BYYEARDAY";
pub const KW_RRULE_BYWEEKNO: &str = "BYWEEKNO";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_RRULE_BYSETPOS: &str = "BYSETPOS";
pub const KW_RRULE_WKST: &str = "WKST";
pub const KW_DAY_SU: &str = "SU";
pub const KW_DAY_MO: &str = "MO";
pub const KW_DAY_TU: &str = "TU";
pub const KW_DAY_WE: &str = "WE";
pub const KW_DAY_TH: &str = "TH";
pub const KW_DAY_FR: &str = "FR";
pub const KW_DAY_SA: &str = "SA";

// Section 3.7 - Calendar Properties
pub const KW_CALSCALE: &str = "CALSCALE";
pub const KW_CALSCALE_GREGORIAN: &str = "GREGORIAN";
pub const KW_METHOD: &str = "METHOD";
pub const KW_PRODID: &str = "PRODID";
pub const KW_VERSION: &str = "VERSION";
pub const KW_VERSION_2_0: &str = "2.0";

// RFC 5546 Section 1.4 - Methods
pub const KW_METHOD_PUBLISH: &str = "PUBLISH";
pub const KW_METHOD_REQUEST: &str = "REQUEST";
pub const KW_METHOD_REPLY: &str = "REPLY";
pub const KW_METHOD_ADD: &str = "ADD";
pub const KW_METHOD_CANCEL: &str = "CANCEL";
pub const KW_METHOD_REFRESH: &str = "REFRESH";
pub const KW_METHOD_COUNTER: &str = "COUNTER";
pub const KW_METHOD_DECLINECOUNTER: &str = "DECLINECOUNTER";

// Section 3.8.1 - Descriptive Component Properties
pub const KW_ATTACH: &str = "ATTACH";
pub const KW_CATEGORIES: &str = "CATEGORIES";
pub const KW_CLASS: &str = "CLASS";
pub const KW_COMMENT: &str = "COMMENT";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_GEO: &str = "GEO";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
pub const KW_PRIORITY: &str = "PRIORITY";
pub const KW_RESOURCES: &str = "RESOURCES";
pub const KW_STATUS: &str = "STATUS";
pub const KW_SUMMARY: &str = "SUMMARY";

// Section 3.8.1.3 - Classification values
pub const KW_CLASS_PUBLIC: &str = "PUBLIC";
pub const KW_CLASS_PRIVATE: &str = "PRIVATE";
pub const KW_CLASS_CONFIDENTIAL: &str = "CONFIDENTIAL";

// Section 3.8.1.11 - Status values
pub const KW_STATUS_TENTATIVE: &str = "TENTATIVE";
pub const KW_STATUS_CONFIRMED: &str = "CONFIRMED";
pub const KW_STATUS_CANCELLED: &str = "CANCELLED";
pub const KW_STATUS_NEEDS_ACTION: &str = "NEEDS-ACTION";
pub const KW_STATUS_COMPLETED: &str = "COMPLETED";
pub const KW_STATUS_IN_PROCESS: &str = "IN-PROCESS";
pub const KW_STATUS_DRAFT: &str = "DRAFT";
pub const KW_STATUS_FINAL: &str = "FINAL";

// Section 3.8.2 - Date and Time Component Properties
pub const KW_COMPLETED: &str = "COMPLETED";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DUE: &str = "DUE";
pub const KW_FREEBUSY: &str = "FREEBUSY";
pub const KW_TRANSP: &str = "TRANSP";
pub const KW_TRANSP_OPAQUE: &str = "OPAQUE";
pub const KW_TRANSP_TRANSPARENT: &str = "TRANSPARENT";

// Section 3.8.3 - Time Zone Component Properties
pub const KW_TZNAME: &str = "TZNAME";
pub const KW_TZOFFSETFROM: &str = "TZOFFSETFROM";
pub const KW_TZOFFSETTO: &str = "TZOFFSETTO";
pub const KW_TZURL: &str = "TZURL";

// Section 3.8.4 - Relationship Component Properties
pub const KW_ATTENDEE: &str = "ATTENDEE";
pub const KW_CONTACT: &str = "CONTACT";
pub const KW_ORGANIZER: &str = "ORGANIZER";
pub const KW_RECURRENCE_ID: &str = "RECURRENCE-ID";
pub const KW_RELATED_TO: &str = "RELATED-TO";
pub const KW_URL: &str = "URL";
pub const KW_UID: &str = "UID";

// Section 3.8.5 - Recurrence Component Properties
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_RDATE: &str = "RDATE";
pub const KW_RRULE: &str = "RRULE";

// Section 3.8.6 - Alarm Component Properties
pub const KW_ACTION: &str = "ACTION";
pub const KW_ACTION_AUDIO: &str = "AUDIO";
pub const KW_ACTION_DISPLAY: &str = "DISPLAY";
pub const KW_ACTION_EMAIL: &str = "EMAIL";
pub const KW_REPEAT: &str = "REPEAT";
pub const KW_TRIGGER: &str = "TRIGGER";

// Section 3.8.7 - Change Management Component Properties
pub const KW_CREATED: &str = "CREATED";
pub const KW_DTSTAMP: &str = "DTSTAMP";
pub const KW_LAST_MODIFIED: &str = "LAST-MODIFIED";
pub const KW_SEQUENCE: &str = "SEQUENCE";

// Section 3.8.8 - Miscellaneous Component Properties
pub const KW_REQUEST_STATUS: &str = "REQUEST-STATUS";

/// Define a keyword enum that keeps unrecognized tokens as a sentinel.
///
/// Unknown tokens never fail: RFC 5545 requires applications to preserve or
/// ignore values they do not understand, so the text is kept by the owning
/// property and the typed view reports `Unknown`.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $Name:ident {
            $(
                $(#[$vmeta:meta])*
                $Variant:ident => $kw:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $Name {
            $(
                $(#[$vmeta])*
                $Variant,
            )*
            /// Token not defined by the RFC, an x-name or an iana-token.
            Unknown,
        }

        impl $Name {
            /// Parse a token, case-insensitively, falling back to `Unknown`.
            #[must_use]
            pub fn from_token(token: &str) -> Self {
                $(
                    if token.eq_ignore_ascii_case($kw) {
                        return Self::$Variant;
                    }
                )*
                Self::Unknown
            }

            /// The canonical token, `None` for `Unknown`.
            #[must_use]
            pub const fn as_token(self) -> Option<&'static str> {
                match self {
                    $(
                        Self::$Variant => Some($kw),
                    )*
                    Self::Unknown => None,
                }
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_token().unwrap_or("UNKNOWN"))
            }
        }
    };
}

pub(crate) use keyword_enum;

/// Define an open set of names: the registered ones plus `Other` for
/// x-names and iana-tokens, stored upper-cased.
macro_rules! name_enum {
    (
        $(#[$meta:meta])*
        pub enum $Name:ident {
            $(
                $(#[$vmeta:meta])*
                $Variant:ident => $kw:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $Name {
            $(
                $(#[$vmeta])*
                $Variant,
            )*
            /// Name not registered in RFC 5545, an x-name or an iana-token.
            Other(String),
        }

        impl $Name {
            /// Parse a name, case-insensitively.
            #[must_use]
            pub fn from_name(name: &str) -> Self {
                $(
                    if name.eq_ignore_ascii_case($kw) {
                        return Self::$Variant;
                    }
                )*
                Self::Other(name.to_ascii_uppercase())
            }

            /// The canonical, upper-case name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(
                        Self::$Variant => $kw,
                    )*
                    Self::Other(name) => name,
                }
            }

            /// Whether this is an `X-` name.
            #[must_use]
            pub fn is_x_name(&self) -> bool {
                matches!(self, Self::Other(name) if name.starts_with("X-"))
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $Name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_name(s))
            }
        }
    };
}

pub(crate) use name_enum;

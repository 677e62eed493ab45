// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Enumerated property values.

use crate::keyword::{
    KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL, KW_CALSCALE_GREGORIAN,
    KW_CLASS_CONFIDENTIAL, KW_CLASS_PRIVATE, KW_CLASS_PUBLIC, KW_METHOD_ADD, KW_METHOD_CANCEL,
    KW_METHOD_COUNTER, KW_METHOD_DECLINECOUNTER, KW_METHOD_PUBLISH, KW_METHOD_REFRESH,
    KW_METHOD_REPLY, KW_METHOD_REQUEST, KW_STATUS_CANCELLED, KW_STATUS_COMPLETED,
    KW_STATUS_CONFIRMED, KW_STATUS_DRAFT, KW_STATUS_FINAL, KW_STATUS_IN_PROCESS,
    KW_STATUS_NEEDS_ACTION, KW_STATUS_TENTATIVE, KW_TRANSP_OPAQUE, KW_TRANSP_TRANSPARENT,
    KW_VERSION_2_0, keyword_enum,
};

keyword_enum! {
    /// iTIP method of a calendar, RFC 5546 Section 1.4.
    #[expect(missing_docs)]
    pub enum Method {
        Publish        => KW_METHOD_PUBLISH,
        Request        => KW_METHOD_REQUEST,
        Reply          => KW_METHOD_REPLY,
        Add            => KW_METHOD_ADD,
        Cancel         => KW_METHOD_CANCEL,
        Refresh        => KW_METHOD_REFRESH,
        Counter        => KW_METHOD_COUNTER,
        DeclineCounter => KW_METHOD_DECLINECOUNTER,
    }
}

keyword_enum! {
    /// Overall status of a component, RFC 5545 Section 3.8.1.11.
    #[expect(missing_docs)]
    pub enum Status {
        Tentative   => KW_STATUS_TENTATIVE,
        Confirmed   => KW_STATUS_CONFIRMED,
        Cancelled   => KW_STATUS_CANCELLED,
        NeedsAction => KW_STATUS_NEEDS_ACTION,
        Completed   => KW_STATUS_COMPLETED,
        InProcess   => KW_STATUS_IN_PROCESS,
        Draft       => KW_STATUS_DRAFT,
        Final       => KW_STATUS_FINAL,
    }
}

keyword_enum! {
    /// Access classification, RFC 5545 Section 3.8.1.3.
    #[expect(missing_docs)]
    pub enum Classification {
        Public       => KW_CLASS_PUBLIC,
        Private      => KW_CLASS_PRIVATE,
        Confidential => KW_CLASS_CONFIDENTIAL,
    }
}

keyword_enum! {
    /// Time transparency, RFC 5545 Section 3.8.2.7.
    #[expect(missing_docs)]
    pub enum Transparency {
        Opaque      => KW_TRANSP_OPAQUE,
        Transparent => KW_TRANSP_TRANSPARENT,
    }
}

keyword_enum! {
    /// Alarm action, RFC 5545 Section 3.8.6.1.
    #[expect(missing_docs)]
    pub enum Action {
        Audio   => KW_ACTION_AUDIO,
        Display => KW_ACTION_DISPLAY,
        Email   => KW_ACTION_EMAIL,
    }
}

keyword_enum! {
    /// Specification version, RFC 5545 Section 3.7.4.
    pub enum Version {
        /// 2.0
        V2_0 => KW_VERSION_2_0,
    }
}

keyword_enum! {
    /// Calendar scale, RFC 5545 Section 3.7.1.
    pub enum CalendarScale {
        /// GREGORIAN
        Gregorian => KW_CALSCALE_GREGORIAN,
    }
}

impl Status {
    /// Whether the status is allowed on a component of the given name.
    #[must_use]
    pub fn allowed_in(self, component: &str) -> bool {
        use crate::keyword::{KW_VEVENT, KW_VJOURNAL, KW_VTODO};

        match self {
            Status::Tentative | Status::Confirmed => component == KW_VEVENT,
            Status::NeedsAction | Status::Completed | Status::InProcess => component == KW_VTODO,
            Status::Draft | Status::Final => component == KW_VJOURNAL,
            Status::Cancelled | Status::Unknown => true,
        }
    }
}

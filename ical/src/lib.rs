// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, represent, write and expand iCalendar (RFC 5545) data.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod component;
pub mod datetime;
pub mod formatter;
pub mod keyword;
pub mod parameter;
mod parser;
pub mod property;
pub mod recurrence;
pub mod syntax;
pub mod value;

pub use crate::component::{Child, ChildId, Children, Component, ComponentKind, ValidationError};
pub use crate::datetime::{Temporal, TemporalKind};
pub use crate::formatter::{FoldingStyle, FormatOptions, format_component};
pub use crate::parameter::{
    AlarmTriggerRelationship, CalendarUserType, ParamValue, Parameter, ParameterName,
    ParticipationRole, ParticipationStatus, RecurrenceRange,
};
pub use crate::parser::{Diagnostic, Parsed, Severity, parse, parse_lenient};
pub use crate::property::{
    Action, CalendarScale, Classification, Method, Property, PropertyName, PropertySpec, Status,
    Transparency, Version,
};
pub use crate::recurrence::{Occurrence, RecurrenceError, Recurrences};
pub use crate::value::{
    Frequency, RecurrenceRule, RuleViolation, Value, ValueDuration, ValueError, ValueKind,
    ValuePeriod, WeekdayNum,
};

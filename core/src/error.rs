// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use recurcal_ical::{ComponentKind, Diagnostic, PropertyName, RecurrenceError};

use crate::edit::ChangeDialogOption;

/// Errors from loading calendars and configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text could not be parsed; every diagnostic is kept.
    #[error("failed to parse calendar: {}", summarize(diagnostics))]
    Parse {
        /// Diagnostics in input order, warnings included
        diagnostics: Vec<Diagnostic>,
    },

    /// The text parsed, but holds no VCALENDAR.
    #[error("input does not contain a VCALENDAR")]
    NotACalendar,

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`crate::Config`].
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Errors from deleting or revising a component.
///
/// These indicate a wrong request rather than bad data, and abort the
/// operation without producing any message.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The dialog answered with an option that was not offered.
    #[error("scope {0} is not allowed here")]
    IllegalScope(ChangeDialogOption),

    /// The dialog gave no answer for a repeating series.
    #[error("no scope was chosen for a repeating series")]
    NoScopeChosen,

    /// There is no edit strategy for this kind of component.
    #[error("editing {0} components is not supported")]
    Unsupported(ComponentKind),

    /// Neither an end nor a duration is set, so the instance length is
    /// unknown.
    #[error("{0} has neither an end nor DURATION")]
    MissingEnd(ComponentKind),

    /// A property the edit relies on is missing.
    #[error("component has no {0}")]
    MissingProperty(PropertyName),

    /// The recurrence set could not be expanded.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    /// A date-time could not be shifted.
    #[error("invalid date-time: {0}")]
    DateTime(#[from] jiff::Error),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "no diagnostics".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use recurcal_ical::Severity;

    use super::*;

    fn diagnostic(line: usize) -> Diagnostic {
        Diagnostic {
            line,
            severity: Severity::Error,
            message: "END:VEVENT without BEGIN".to_string(),
        }
    }

    #[test]
    fn parse_error_shows_first_diagnostic() {
        let err = Error::Parse {
            diagnostics: vec![diagnostic(3), diagnostic(7)],
        };
        assert_eq!(
            err.to_string(),
            "failed to parse calendar: line 3: error: END:VEVENT without BEGIN (and 1 more)"
        );
    }

    #[test]
    fn edit_errors_name_the_problem() {
        assert_eq!(
            EditError::IllegalScope(ChangeDialogOption::ThisAndFuture).to_string(),
            "scope THIS_AND_FUTURE is not allowed here"
        );
        assert_eq!(
            EditError::Unsupported(ComponentKind::VFreeBusy).to_string(),
            "editing VFREEBUSY components is not supported"
        );
        assert_eq!(
            EditError::MissingEnd(ComponentKind::VEvent).to_string(),
            "VEVENT has neither an end nor DURATION"
        );
    }
}

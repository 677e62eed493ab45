// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Build the component tree from iCalendar text.
//!
//! Parsing never stops at the first problem: every logical line is scanned,
//! converted and attached where possible, and whatever goes wrong is
//! collected as a [`Diagnostic`] against its physical line number.

use std::fmt;

use jiff::tz::TimeZone;

use crate::component::{Component, ComponentKind};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::parameter::{ParamValue, Parameter, ParameterName};
use crate::property::{Property, PropertyName};
use crate::syntax::{ContentLine, scan_line, unfold};
use crate::value::{Value, ValueKind, parse_values};

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The input was understood, with a fallback.
    Warning,
    /// Part of the input was dropped or kept raw.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based physical line number
    pub line: usize,

    /// Severity
    pub severity: Severity,

    /// Human readable message
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.severity, self.message)
    }
}

/// Result of a lenient parse.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    /// Top-level components, normally one VCALENDAR
    pub components: Vec<Component>,

    /// Everything that went wrong, in input order
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    /// Whether any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Parse iCalendar text into its top-level components.
///
/// ## Errors
/// If there are errors, all diagnostics are returned, warnings included.
pub fn parse(src: &str) -> Result<Vec<Component>, Vec<Diagnostic>> {
    let parsed = parse_lenient(src);
    if parsed.has_errors() {
        Err(parsed.diagnostics)
    } else {
        Ok(parsed.components)
    }
}

/// Parse iCalendar text, keeping whatever could be understood.
#[must_use]
pub fn parse_lenient(src: &str) -> Parsed {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let mut builder = TreeBuilder::default();
    for line in unfold(src) {
        builder.line(line.number, &line.text);
    }
    builder.finish()
}

#[derive(Debug, Default)]
struct TreeBuilder {
    /// Open components with the line of their BEGIN
    stack: Vec<(usize, Component)>,
    done: Vec<Component>,
    diagnostics: Vec<Diagnostic>,
}

impl TreeBuilder {
    fn line(&mut self, number: usize, text: &str) {
        let content = match scan_line(text) {
            Ok(content) => content,
            Err(err) => return self.report(number, Severity::Error, err.to_string()),
        };

        if content.name.eq_ignore_ascii_case(KW_BEGIN) {
            let kind = ComponentKind::from_name(content.value.trim());
            self.stack.push((number, Component::new(kind)));
        } else if content.name.eq_ignore_ascii_case(KW_END) {
            let kind = ComponentKind::from_name(content.value.trim());
            match self.stack.last() {
                Some((_, open)) if open.kind == kind => {
                    if let Some((_, component)) = self.stack.pop() {
                        self.attach(component);
                    }
                }
                Some((_, open)) => {
                    let message = format!("END:{kind} does not match BEGIN:{}", open.kind);
                    self.report(number, Severity::Error, message);
                }
                None => self.report(number, Severity::Error, format!("END:{kind} without BEGIN")),
            }
        } else {
            let property = convert_property(&content, number, &mut self.diagnostics);
            match self.stack.last_mut() {
                Some((_, parent)) => {
                    parent.push_property(property);
                }
                None => {
                    let message = format!("property {} outside of any component", property.name);
                    self.report(number, Severity::Error, message);
                }
            }
        }
    }

    fn attach(&mut self, component: Component) {
        match self.stack.last_mut() {
            Some((_, parent)) => {
                parent.push_component(component);
            }
            None => self.done.push(component),
        }
    }

    fn report(&mut self, line: usize, severity: Severity, message: String) {
        self.diagnostics.push(Diagnostic {
            line,
            severity,
            message,
        });
    }

    fn finish(mut self) -> Parsed {
        while let Some((number, component)) = self.stack.pop() {
            let message = format!("BEGIN:{} is never closed", component.kind);
            self.report(number, Severity::Error, message);
            self.attach(component);
        }
        self.diagnostics.sort_by_key(|d| d.line);
        Parsed {
            components: self.done,
            diagnostics: self.diagnostics,
        }
    }
}

/// Convert a scanned line into a typed property.
///
/// Values that cannot be converted are kept raw, so the text still
/// round-trips.
fn convert_property(
    content: &ContentLine<'_>,
    line: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Property {
    let mut report = |severity, message| {
        diagnostics.push(Diagnostic {
            line,
            severity,
            message,
        });
    };

    let name = PropertyName::from_name(content.name);
    let params: Vec<Parameter> = content
        .params
        .iter()
        .map(|p| Parameter {
            name: ParameterName::from_name(p.name),
            values: p
                .values
                .iter()
                .map(|v| ParamValue {
                    text: v.text.to_owned(),
                    quoted: v.quoted,
                })
                .collect(),
        })
        .collect();

    let tz = match params.iter().find(|p| p.name == ParameterName::TzId) {
        Some(param) if name.is_temporal() => {
            let tzid = param.value().unwrap_or_default();
            match TimeZone::get(tzid) {
                Ok(tz) => Some(tz),
                Err(_) => {
                    report(
                        Severity::Warning,
                        format!("{name}: unknown TZID `{tzid}`, value kept floating"),
                    );
                    None
                }
            }
        }
        _ => None,
    };

    let spec = name.spec();
    let requested = params.iter().find_map(Parameter::as_value_kind);
    let raw_only = spec.allowed.contains(&ValueKind::Unknown);
    let kind;
    let kinds: &[ValueKind] = match requested {
        None => spec.allowed,
        Some(requested) if requested == ValueKind::Unknown => &[ValueKind::Unknown],
        Some(requested) if raw_only || spec.allowed.contains(&requested) => {
            kind = requested;
            std::slice::from_ref(&kind)
        }
        Some(requested) => {
            report(
                Severity::Error,
                format!("{name}: VALUE={requested} is not allowed"),
            );
            &[ValueKind::Unknown]
        }
    };

    let separator = match kinds {
        [ValueKind::Unknown] => None,
        _ => spec.separator,
    };
    let values = match parse_values(kinds, content.value, separator, tz.as_ref()) {
        Ok(values) => values,
        Err(err) => {
            report(Severity::Error, format!("{name}: {err}"));
            vec![Value::Raw(content.value.to_owned())]
        }
    };

    Property {
        name,
        params,
        values,
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing whole documents: typed values, diagnostics and validation.

use jiff::civil::date;
use recurcal_ical::{
    ComponentKind, PropertyName, Severity, Temporal, TemporalKind, ValidationError, Value, parse,
    parse_lenient,
};

fn calendar(body: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//EN\r\n{body}END:VCALENDAR\r\n"
    )
}

#[test]
fn date_value_has_no_time_of_day() {
    let src = calendar(
        "BEGIN:VEVENT\r\nUID:all-day\r\nDTSTAMP:20160101T000000Z\r\n\
DTSTART;VALUE=DATE:20160307\r\nEND:VEVENT\r\n",
    );
    let components = parse(&src).unwrap();
    let event = components[0].components().next().unwrap();

    let start = event.dtstart().unwrap();
    assert_eq!(start, &Temporal::Date(date(2016, 3, 7)));
    assert_eq!(start.kind(), TemporalKind::Date);
    assert!(start.is_date());
}

#[test]
fn date_time_shapes() {
    let src = calendar(
        "BEGIN:VEVENT\r\nUID:shapes\r\nDTSTAMP:20160101T000000Z\r\n\
DTSTART;TZID=America/Los_Angeles:20160516T100000\r\n\
DTEND:20160516T170000Z\r\n\
RECURRENCE-ID:20160516T100000\r\nEND:VEVENT\r\n",
    );
    let components = parse(&src).unwrap();
    let event = components[0].components().next().unwrap();
    assert_eq!(event.dtstart().unwrap().kind(), TemporalKind::Zoned);
    assert_eq!(event.dtend().unwrap().kind(), TemporalKind::Utc);
    assert_eq!(event.recurrence_id().unwrap().kind(), TemporalKind::Floating);
    assert!(
        event
            .dtstart()
            .unwrap()
            .same_instant(event.dtend().unwrap())
    );
}

#[test]
fn several_top_level_calendars() {
    let src = format!("{}{}", calendar(""), calendar(""));
    let components = parse(&src).unwrap();
    assert_eq!(components.len(), 2);
    assert!(components.iter().all(|c| c.kind == ComponentKind::VCalendar));
}

#[test]
fn lenient_parse_keeps_what_it_understands() {
    let src = calendar(
        "BEGIN:VEVENT\r\nUID:broken\r\nDTSTAMP:20160101T000000Z\r\n\
DTSTART:2016-05-16\r\nSUMMARY:Still here\r\nEND:VEVENT\r\n",
    );
    assert!(parse(&src).is_err());

    let parsed = parse_lenient(&src);
    assert!(parsed.has_errors());
    assert_eq!(parsed.diagnostics.len(), 1);
    let diagnostic = &parsed.diagnostics[0];
    assert_eq!(diagnostic.line, 7);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert!(diagnostic.to_string().starts_with("line 7: error: DTSTART"));

    let event = parsed.components[0].components().next().unwrap();
    assert_eq!(event.summary(), Some("Still here"));
    assert_eq!(
        event.property(&PropertyName::DtStart).unwrap().values,
        [Value::Raw("2016-05-16".to_owned())]
    );
}

#[test]
fn diagnostics_point_at_physical_lines() {
    let src = calendar(
        "BEGIN:VEVENT\r\nUID:folded\r\nDESCRIPTION:a long\r\n  description\r\n\
PRIORITY:\r\n urgent\r\nEND:VEVENT\r\n",
    );
    let parsed = parse_lenient(&src);
    let lines: Vec<_> = parsed.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, [8]);
}

#[test]
fn validation_reports_structural_problems() {
    let src = calendar(
        "BEGIN:VEVENT\r\nUID:invalid\r\nDTSTAMP:20160101T000000Z\r\n\
DTSTART:20160516T100000\r\nDTEND:20160516T090000\r\nDURATION:PT1H\r\nEND:VEVENT\r\n",
    );
    let components = parse(&src).unwrap();
    let errors = components[0].errors();
    assert!(errors.contains(&ValidationError::EndAndDuration {
        component: ComponentKind::VEvent,
        end: PropertyName::DtEnd,
    }));
    assert!(errors.contains(&ValidationError::EndBeforeStart {
        component: ComponentKind::VEvent,
        end: PropertyName::DtEnd,
    }));
    assert!(!components[0].is_valid());
}

#[test]
fn valid_document_has_no_errors() {
    let src = calendar(
        "BEGIN:VEVENT\r\nUID:ok\r\nDTSTAMP:20160101T000000Z\r\n\
DTSTART:20160516T100000\r\nDTEND:20160516T110000\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO\r\nEND:VEVENT\r\n",
    );
    let components = parse(&src).unwrap();
    let errors = components[0].errors();
    assert!(errors.is_empty(), "{errors:?}");
}

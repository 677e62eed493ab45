// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use recurcal_core::{Calendar, CalendarError, Config, Error};
use recurcal_ical::Method;

use crate::common::{DAILY_UID, TempCalendar, daily_store};

#[test]
fn parse_file_reads_a_stored_calendar() {
    // Arrange
    let dir = TempCalendar::new().unwrap();
    let path = dir.write("daily.ics", &daily_store().to_text()).unwrap();

    // Act
    let calendar = Calendar::parse_file(&path).unwrap();

    // Assert
    assert_eq!(calendar, daily_store());
    assert_eq!(calendar.prod_id(), Some("-//Test//EN"));
    assert!(calendar.parent(DAILY_UID).is_some());
}

#[test]
fn parse_file_reports_missing_path() {
    let dir = TempCalendar::new().unwrap();
    let path = dir.path("missing.ics");

    let err = Calendar::parse_file(&path).unwrap_err();
    match &err {
        Error::Io { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("missing.ics"));
}

#[test]
fn parse_reports_every_diagnostic() {
    let text = "BEGIN:VCALENDAR\r\nPRODID:-//Test//EN\r\nVERSION:2.0\r\n\
BEGIN:VEVENT\r\nUID:bad\r\nDTSTART:tomorrow\r\nPRIORITY:high\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

    let err = Calendar::parse(text).unwrap_err();
    match &err {
        Error::Parse { diagnostics } => assert_eq!(diagnostics.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().ends_with("(and 1 more)"), "{err}");

    let (calendar, diagnostics) = Calendar::parse_lenient(text).unwrap();
    assert_eq!(diagnostics.len(), 2);
    assert!(calendar.find("bad", None).is_some());
}

#[test]
fn text_without_calendar_is_rejected() {
    let err = Calendar::parse("BEGIN:VEVENT\r\nUID:x\r\nEND:VEVENT\r\n").unwrap_err();
    assert!(matches!(err, Error::NotACalendar));
}

#[test]
fn config_file_controls_output() {
    // Arrange
    let dir = TempCalendar::new().unwrap();
    let path = dir
        .write(
            "recurcal.toml",
            "prod_id = \"-//Example//Planner//EN\"\nfold_width = 40\nfold_with_tab = true\n",
        )
        .unwrap();

    // Act
    let config = Config::load(&path).unwrap();
    let mut calendar = Calendar::new(&config.prod_id);
    let mut event = daily_store().parent(DAILY_UID).unwrap().clone();
    event.set_property(recurcal_ical::Property::text(
        recurcal_ical::PropertyName::Description,
        "a description long enough to be folded twice at forty octets per line",
    ));
    calendar.push(event);
    let text = calendar.to_text_with(config.format_options());

    // Assert
    assert_eq!(calendar.prod_id(), Some("-//Example//Planner//EN"));
    assert!(text.contains("\r\n\t"));
    assert!(text.split("\r\n").all(|line| line.len() <= 40));
    assert_eq!(Calendar::parse(&text).unwrap(), calendar);
}

#[test]
fn invalid_config_is_an_error() {
    let dir = TempCalendar::new().unwrap();
    let path = dir.write("recurcal.toml", "fold_width = \"wide\"\n").unwrap();
    assert!(matches!(Config::load(&path), Err(Error::Config(_))));
}

#[test]
fn orphan_overrides_make_calendar_invalid() {
    let text = "BEGIN:VCALENDAR\r\nPRODID:-//Test//EN\r\nVERSION:2.0\r\nMETHOD:PUBLISH\r\n\
BEGIN:VEVENT\r\nUID:orphan\r\nDTSTAMP:20160101T000000Z\r\nRECURRENCE-ID:20160512T100000\r\n\
DTSTART:20160512T120000\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendar = Calendar::parse(text).unwrap();
    assert_eq!(calendar.method(), Some(Method::Publish));
    assert_eq!(
        calendar.errors(),
        [CalendarError::OrphanOverride {
            uid: "orphan".to_string(),
        }]
    );
    assert!(!calendar.is_valid());
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use recurcal_core::{Calendar, ProcessLog};

use crate::common::{DAILY_UID, WEEKLY_UID, daily_store, floating, la, weekly_store};

fn message(method: Option<&str>, body: &str) -> Calendar {
    let method = method.map(|m| format!("METHOD:{m}\r\n")).unwrap_or_default();
    Calendar::parse(&format!(
        "BEGIN:VCALENDAR\r\nPRODID:-//Organizer//EN\r\nVERSION:2.0\r\n{method}{body}END:VCALENDAR\r\n"
    ))
    .unwrap()
}

#[test]
fn publish_into_empty_calendar() {
    // Arrange
    let mut store = Calendar::new("-//Test//EN");
    let publish = message(
        Some("PUBLISH"),
        "BEGIN:VEVENT\r\nUID:new@example.com\r\nDTSTAMP:20160101T000000Z\r\n\
DTSTART:20160520T090000\r\nDURATION:PT30M\r\nSUMMARY:Kick-off\r\nEND:VEVENT\r\n",
    );

    // Act
    let log = store.process_message(&publish);

    // Assert
    assert_eq!(
        log,
        [ProcessLog::Added {
            uid: "new@example.com".to_string(),
            recurrence_id: None,
        }]
    );
    assert_eq!(log[0].to_string(), "added new@example.com");
    let stored = store.find("new@example.com", None).unwrap();
    assert_eq!(stored.summary(), Some("Kick-off"));
    assert!(store.is_valid(), "{:?}", store.errors());
}

#[test]
fn cancel_series_removes_every_component_with_its_uid() {
    // Arrange
    let mut store = weekly_store();
    let cancel = message(
        Some("CANCEL"),
        "BEGIN:VEVENT\r\nUID:weekly@example.com\r\nDTSTAMP:20160601T000000Z\r\nSEQUENCE:1\r\n\
STATUS:CANCELLED\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nUID:weekly@example.com\r\nDTSTAMP:20160601T000000Z\r\nSEQUENCE:1\r\n\
RECURRENCE-ID;TZID=America/Los_Angeles:20160509T100000\r\nSTATUS:CANCELLED\r\nEND:VEVENT\r\n",
    );

    // Act
    let log = store.process_message(&cancel);

    // Assert
    assert_eq!(
        log,
        [ProcessLog::Removed {
            uid: WEEKLY_UID.to_string(),
            count: 2,
        }]
    );
    assert!(store.components().all(|c| c.uid() != Some(WEEKLY_UID)));
}

#[test]
fn cancel_instance_of_lone_component_removes_it() {
    // Arrange
    let mut store = Calendar::new("-//Test//EN");
    store.process_message(&message(
        Some("PUBLISH"),
        "BEGIN:VEVENT\r\nUID:lone@example.com\r\nDTSTAMP:20160101T000000Z\r\n\
DTSTART:20160520T090000\r\nDURATION:PT30M\r\nEND:VEVENT\r\n",
    ));
    let cancel = message(
        Some("CANCEL"),
        "BEGIN:VEVENT\r\nUID:lone@example.com\r\nDTSTAMP:20160601T000000Z\r\nSEQUENCE:1\r\n\
RECURRENCE-ID:20160520T090000\r\nSTATUS:CANCELLED\r\nEND:VEVENT\r\n",
    );

    // Act
    let log = store.process_message(&cancel);

    // Assert
    assert_eq!(
        log,
        [ProcessLog::Removed {
            uid: "lone@example.com".to_string(),
            count: 1,
        }]
    );
    assert!(store.find("lone@example.com", None).is_none());
    assert_eq!(store.components().count(), 0);
}

#[test]
fn request_with_same_sequence_is_rejected() {
    // Arrange
    let mut store = daily_store();
    let before = store.clone();
    let request = message(
        Some("REQUEST"),
        "BEGIN:VEVENT\r\nUID:daily@example.com\r\nDTSTAMP:20160601T000000Z\r\n\
DTSTART:20160510T090000\r\nDTEND:20160510T100000\r\nSUMMARY:Moved\r\nEND:VEVENT\r\n",
    );

    // Act
    let log = store.process_message(&request);

    // Assert
    assert_eq!(log.len(), 1);
    assert_eq!(
        log[0].to_string(),
        "rejected daily@example.com: SEQUENCE 0 is not newer than 0"
    );
    assert_eq!(store, before);
}

#[test]
fn overrides_are_added_then_replaced() {
    // Arrange
    let mut store = daily_store();
    let revision = |sequence: i32, summary: &str| {
        message(
            Some("REQUEST"),
            &format!(
                "BEGIN:VEVENT\r\nUID:daily@example.com\r\nDTSTAMP:20160601T000000Z\r\n\
SEQUENCE:{sequence}\r\nRECURRENCE-ID:20160512T100000\r\nDTSTART:20160512T120000\r\n\
DTEND:20160512T130000\r\nSUMMARY:{summary}\r\nEND:VEVENT\r\n"
            ),
        )
    };

    // Act
    let first = store.process_message(&revision(1, "Later"));
    let second = store.process_message(&revision(2, "Even later"));

    // Assert
    assert_eq!(
        first,
        [ProcessLog::Added {
            uid: DAILY_UID.to_string(),
            recurrence_id: Some(floating(12, 10)),
        }]
    );
    assert_eq!(
        second,
        [ProcessLog::Replaced {
            uid: DAILY_UID.to_string(),
            recurrence_id: Some(floating(12, 10)),
        }]
    );
    let overrides: Vec<_> = store.overrides(DAILY_UID).collect();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].summary(), Some("Even later"));
}

#[test]
fn time_zones_are_added_once() {
    // Arrange
    let mut store = weekly_store();
    let request = message(
        Some("REQUEST"),
        "BEGIN:VTIMEZONE\r\nTZID:America/Los_Angeles\r\n\
BEGIN:STANDARD\r\nDTSTART:19701101T020000\r\nTZOFFSETFROM:-0700\r\nTZOFFSETTO:-0800\r\nEND:STANDARD\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\nUID:weekly@example.com\r\nDTSTAMP:20160601T000000Z\r\nSEQUENCE:1\r\n\
RECURRENCE-ID;TZID=America/Los_Angeles:20160523T100000\r\n\
DTSTART;TZID=America/Los_Angeles:20160523T150000\r\nDURATION:PT1H\r\nEND:VEVENT\r\n",
    );

    // Act
    let first = store.process_message(&request);
    let second = store.process_message(&request);

    // Assert
    assert_eq!(
        first[0],
        ProcessLog::TimeZoneAdded {
            tzid: "America/Los_Angeles".to_string(),
        }
    );
    assert!(matches!(first[1], ProcessLog::Added { .. }));
    assert!(matches!(second[..], [ProcessLog::Rejected { .. }]));

    let kinds: Vec<_> = store.components().map(|c| c.kind.to_string()).collect();
    assert_eq!(kinds, ["VTIMEZONE", "VEVENT", "VEVENT", "VEVENT"]);
    assert!(store.find(WEEKLY_UID, Some(&la(23, 10))).is_some());
}

#[test]
fn unsupported_messages_are_rejected() {
    let mut store = daily_store();
    let before = store.clone();
    let body = "BEGIN:VEVENT\r\nUID:daily@example.com\r\nDTSTAMP:20160601T000000Z\r\n\
SEQUENCE:5\r\nDTSTART:20160510T090000\r\nDURATION:PT1H\r\nEND:VEVENT\r\n";

    let reply = store.process_message(&message(Some("REPLY"), body));
    assert_eq!(
        reply[0].to_string(),
        "rejected daily@example.com: METHOD:REPLY is not supported"
    );

    let no_method = store.process_message(&message(None, body));
    assert_eq!(
        no_method[0].to_string(),
        "rejected daily@example.com: message has no METHOD"
    );

    let free_busy = store.process_message(&message(
        Some("PUBLISH"),
        "BEGIN:VFREEBUSY\r\nDTSTAMP:20160601T000000Z\r\nEND:VFREEBUSY\r\n",
    ));
    assert_eq!(free_busy[0].to_string(), "rejected: VFREEBUSY cannot be scheduled");

    assert_eq!(store, before);
}

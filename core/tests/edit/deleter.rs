// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::date;
use recurcal_core::{ChangeDialogOption, DeleteParams, Deleter};
use recurcal_ical::{Method, PropertyName, Status};

use crate::common::{DAILY_UID, WEEKLY_UID, daily_store, floating, la, wall_clocks, weekly_store};

#[test]
fn delete_one_occurrence_of_daily_series() {
    // Arrange
    let mut store = daily_store();
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let params = DeleteParams::new(parent, floating(16, 10));

    // Act
    let messages = Deleter::default()
        .delete(&params, |choices| {
            assert!(choices.contains_key(&ChangeDialogOption::One));
            assert!(choices.contains_key(&ChangeDialogOption::ThisAndFuture));
            Some(ChangeDialogOption::One)
        })
        .unwrap();

    // Assert
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message.method(), Some(Method::Cancel));

    let cancelled: Vec<_> = message.components().collect();
    assert_eq!(cancelled.len(), 1);
    let copy = cancelled[0];
    assert_eq!(copy.uid(), Some(DAILY_UID));
    assert_eq!(copy.status(), Some(Status::Cancelled));
    assert_eq!(copy.recurrence_id(), Some(&floating(16, 10)));
    assert!(copy.rrule().is_none());

    let text = message.to_text();
    assert!(text.contains("\r\nRECURRENCE-ID:20160516T100000\r\n"), "{text}");
    assert!(text.contains("\r\nSTATUS:CANCELLED\r\n"), "{text}");
    assert!(!text.contains("RRULE"), "{text}");

    // Applying the message excludes the instance
    store.process_message(message);
    let starts = wall_clocks(&store, DAILY_UID);
    assert_eq!(starts.len(), 9);
    assert!(!starts.contains(&date(2016, 5, 16).at(10, 0, 0, 0)));
}

#[test]
fn delete_this_and_future_of_zoned_series() {
    // Arrange
    let mut store = weekly_store();
    let parent = store.parent(WEEKLY_UID).unwrap().clone();
    let params = DeleteParams::new(parent, la(16, 10));

    // Act
    let messages = Deleter::default()
        .delete(&params, |_| Some(ChangeDialogOption::ThisAndFuture))
        .unwrap();

    // Assert
    let message = &messages[0];
    assert_eq!(message.method(), Some(Method::Cancel));
    let copy = message.components().next().unwrap();
    assert_eq!(
        copy.property(&PropertyName::RecurrenceId)
            .unwrap()
            .to_string(),
        "RECURRENCE-ID;TZID=America/Los_Angeles;RANGE=THISANDFUTURE:20160516T100000"
    );
    assert!(copy.is_this_and_future());
    assert_eq!(copy.status(), Some(Status::Cancelled));

    // Applying the message ends the series before the anchor
    store.process_message(message);
    assert_eq!(
        wall_clocks(&store, WEEKLY_UID),
        [
            date(2016, 5, 2).at(10, 0, 0, 0),
            date(2016, 5, 9).at(11, 0, 0, 0),
        ]
    );
}

#[test]
fn delete_all_removes_series_with_its_override() {
    // Arrange
    let mut store = weekly_store();
    let parent = store.parent(WEEKLY_UID).unwrap().clone();
    let overrides = store.overrides(WEEKLY_UID).cloned().collect();
    let params = DeleteParams::new(parent, la(16, 10)).with_overrides(overrides);

    // Act
    let messages = Deleter::default()
        .delete(&params, |choices| {
            assert_eq!(choices[&ChangeDialogOption::All].start, la(2, 10));
            assert_eq!(choices[&ChangeDialogOption::All].end, None);
            Some(ChangeDialogOption::All)
        })
        .unwrap();

    // Assert
    let message = &messages[0];
    assert_eq!(message.components().count(), 2);
    assert!(
        message
            .components()
            .all(|c| c.status() == Some(Status::Cancelled) && c.sequence() == 1)
    );

    store.process_message(message);
    assert!(store.components().all(|c| c.uid() != Some(WEEKLY_UID)));
    assert!(store.find(WEEKLY_UID, None).is_none());
}

#[test]
fn delete_existing_override_skips_dialog() {
    // Arrange
    let mut store = weekly_store();
    let moved = store.find(WEEKLY_UID, Some(&la(9, 10))).unwrap().clone();
    let params = DeleteParams::new(moved, la(9, 11));

    // Act
    let messages = Deleter::default()
        .delete(&params, |_| panic!("an override is deleted on its own"))
        .unwrap();

    // Assert
    let copy = messages[0].components().next().unwrap();
    assert_eq!(copy.recurrence_id(), Some(&la(9, 10)));
    assert_eq!(copy.dtstart(), Some(&la(9, 11)));

    store.process_message(&messages[0]);
    assert_eq!(store.overrides(WEEKLY_UID).count(), 0);
    assert_eq!(
        wall_clocks(&store, WEEKLY_UID),
        [
            date(2016, 5, 2).at(10, 0, 0, 0),
            date(2016, 5, 16).at(10, 0, 0, 0),
            date(2016, 5, 23).at(10, 0, 0, 0),
            date(2016, 5, 30).at(10, 0, 0, 0),
        ]
    );
}

#[test]
fn cancel_answer_leaves_store_untouched() {
    let store = daily_store();
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let params = DeleteParams::new(parent, floating(12, 10));

    let messages = Deleter::default()
        .delete(&params, |_| Some(ChangeDialogOption::Cancel))
        .unwrap();
    assert!(messages.is_empty());
}

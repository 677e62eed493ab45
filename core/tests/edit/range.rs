// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Edits on the segment of a series carried by a range override.

use jiff::civil::{DateTime, date};
use recurcal_core::{Calendar, ChangeDialogOption, DeleteParams, Deleter, ReviseParams, Reviser};
use recurcal_ical::{Component, Method, Property, PropertyName};

use crate::common::{DAILY_UID, floating, moved, split_daily_store, wall_clocks};

fn range_override(store: &Calendar) -> Component {
    store.find(DAILY_UID, Some(&floating(16, 10))).unwrap().clone()
}

fn starts(early: &[i8], late: &[(i8, i8)]) -> Vec<DateTime> {
    early
        .iter()
        .map(|&d| date(2016, 5, d).at(10, 0, 0, 0))
        .chain(late.iter().map(|&(d, h)| date(2016, 5, d).at(h, 0, 0, 0)))
        .collect()
}

#[test]
fn split_store_shows_both_segments() {
    let store = split_daily_store();
    assert!(range_override(&store).is_this_and_future());
    assert_eq!(
        wall_clocks(&store, DAILY_UID),
        starts(
            &[10, 11, 12, 13, 14, 15],
            &[(16, 14), (17, 14), (18, 14), (19, 14)]
        )
    );
}

#[test]
fn delete_one_inside_range_override_keeps_the_segment() {
    // Arrange
    let mut store = split_daily_store();
    let params = DeleteParams::new(range_override(&store), floating(18, 14));

    // Act
    let messages = Deleter::default()
        .delete(&params, |_| Some(ChangeDialogOption::One))
        .unwrap();

    // Assert
    let message = &messages[0];
    assert_eq!(message.method(), Some(Method::Cancel));
    let copy = message.components().next().unwrap();
    assert_eq!(copy.recurrence_id(), Some(&floating(18, 10)));
    assert!(!copy.is_this_and_future());
    assert_eq!(copy.dtstart(), Some(&floating(18, 14)));
    let text = message.to_text();
    assert!(text.contains("\r\nRECURRENCE-ID:20160518T100000\r\n"), "{text}");

    store.process_message(message);
    assert_eq!(
        wall_clocks(&store, DAILY_UID),
        starts(&[10, 11, 12, 13, 14, 15], &[(16, 14), (17, 14), (19, 14)])
    );
}

#[test]
fn delete_this_and_future_inside_range_override_cuts_the_segment() {
    // Arrange
    let mut store = split_daily_store();
    let params = DeleteParams::new(range_override(&store), floating(18, 14));

    // Act
    let messages = Deleter::default()
        .delete(&params, |_| Some(ChangeDialogOption::ThisAndFuture))
        .unwrap();

    // Assert
    let copy = messages[0].components().next().unwrap();
    assert_eq!(copy.recurrence_id(), Some(&floating(18, 10)));
    assert!(copy.is_this_and_future());

    store.process_message(&messages[0]);
    assert_eq!(
        wall_clocks(&store, DAILY_UID),
        starts(&[10, 11, 12, 13, 14, 15], &[(16, 14), (17, 14)])
    );
}

#[test]
fn delete_all_from_range_override_cancels_the_series() {
    // Arrange
    let mut store = split_daily_store();
    let params = DeleteParams::new(range_override(&store), floating(18, 14));

    // Act
    let messages = Deleter::default()
        .delete(&params, |_| Some(ChangeDialogOption::All))
        .unwrap();

    // Assert
    let copy = messages[0].components().next().unwrap();
    assert_eq!(copy.recurrence_id(), None);

    store.process_message(&messages[0]);
    assert_eq!(store.components().count(), 0);
}

#[test]
fn revise_one_inside_range_override_adds_single_override() {
    // Arrange
    let mut store = split_daily_store();
    let original = range_override(&store);
    let edited = moved(&original, &floating(18, 16));
    let params = ReviseParams::new(original, edited, floating(18, 14));

    // Act
    let messages = Reviser::default()
        .revise(&params, |_| Some(ChangeDialogOption::One))
        .unwrap();

    // Assert
    let one = messages[0].components().next().unwrap();
    assert_eq!(one.recurrence_id(), Some(&floating(18, 10)));
    assert!(!one.is_this_and_future());
    assert_eq!(one.dtstart(), Some(&floating(18, 16)));
    assert!(one.rrule().is_none());
    assert_eq!(one.summary(), Some("Late stand-up"));
    assert_eq!(one.sequence(), 2);

    store.process_message(&messages[0]);
    assert!(range_override(&store).is_this_and_future());
    assert_eq!(
        wall_clocks(&store, DAILY_UID),
        starts(
            &[10, 11, 12, 13, 14, 15],
            &[(16, 14), (17, 14), (18, 16), (19, 14)]
        )
    );
}

#[test]
fn revise_all_from_range_override_needs_the_parent() {
    // Arrange
    let mut store = split_daily_store();
    let original = range_override(&store);
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let overrides = store.overrides(DAILY_UID).cloned().collect();
    let edited = moved(&original, &floating(18, 15));
    let params = ReviseParams::new(original, edited, floating(18, 14)).with_overrides(overrides);

    // Act
    let mut offered = Vec::new();
    let without_parent = Reviser::default().revise(&params, |choices| {
        offered = choices.keys().copied().collect();
        Some(ChangeDialogOption::Cancel)
    });
    let messages = Reviser::default()
        .revise(&params.with_parent(parent), |choices| {
            assert!(choices.contains_key(&ChangeDialogOption::All));
            Some(ChangeDialogOption::All)
        })
        .unwrap();

    // Assert
    assert!(without_parent.unwrap().is_empty());
    assert!(offered.contains(&ChangeDialogOption::One));
    assert!(!offered.contains(&ChangeDialogOption::All));

    let components: Vec<_> = messages[0].components().collect();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].recurrence_id(), None);
    assert_eq!(components[0].dtstart(), Some(&floating(10, 11)));
    assert_eq!(components[0].summary(), Some("Stand-up"));
    assert_eq!(components[1].recurrence_id(), Some(&floating(16, 11)));
    assert!(components[1].is_this_and_future());

    store.process_message(&messages[0]);
    let late = [(16, 14), (17, 14), (18, 14), (19, 14)];
    let expected: Vec<_> = (10..16)
        .map(|d| date(2016, 5, d).at(11, 0, 0, 0))
        .chain(late.iter().map(|&(d, h)| date(2016, 5, d).at(h, 0, 0, 0)))
        .collect();
    assert_eq!(wall_clocks(&store, DAILY_UID), expected);
}

#[test]
fn revise_this_and_future_inside_range_override_keeps_later_overrides() {
    // Arrange
    let mut store = split_daily_store();
    let original = range_override(&store);
    let one = ReviseParams::new(
        original.clone(),
        moved(&original, &floating(19, 16)),
        floating(19, 14),
    );
    let messages = Reviser::default()
        .revise(&one, |_| Some(ChangeDialogOption::One))
        .unwrap();
    store.process_message(&messages[0]);

    let overrides: Vec<_> = store.overrides(DAILY_UID).cloned().collect();
    let mut edited = moved(&original, &floating(18, 9));
    edited.set_property(Property::text(PropertyName::Summary, "Early stand-up"));
    let params =
        ReviseParams::new(original, edited, floating(18, 14)).with_overrides(overrides);

    // Act
    let messages = Reviser::default()
        .revise(&params, |_| Some(ChangeDialogOption::ThisAndFuture))
        .unwrap();

    // Assert
    let components: Vec<_> = messages[0].components().collect();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].recurrence_id(), Some(&floating(18, 10)));
    assert!(components[0].is_this_and_future());
    assert_eq!(components[0].rrule().unwrap().count, Some(2));
    assert_eq!(components[1].recurrence_id(), Some(&floating(19, 10)));

    store.process_message(&messages[0]);
    assert_eq!(
        wall_clocks(&store, DAILY_UID),
        starts(
            &[10, 11, 12, 13, 14, 15],
            &[(16, 14), (17, 14), (18, 9), (19, 16)]
        )
    );
    assert_eq!(
        store
            .find(DAILY_UID, Some(&floating(18, 10)))
            .unwrap()
            .summary(),
        Some("Early stand-up")
    );
}

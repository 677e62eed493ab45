// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::date;
use recurcal_core::{ChangeDialogOption, ReviseParams, Reviser};
use recurcal_ical::{Method, Property, PropertyName, Value};

use crate::common::{
    DAILY_UID, WEEKLY_UID, daily_store, floating, la, moved, wall_clocks, weekly_store,
};

#[test]
fn revise_one_moves_single_occurrence() {
    // Arrange
    let mut store = daily_store();
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let edited = moved(&parent, &floating(16, 14));
    let params = ReviseParams::new(parent, edited, floating(16, 10));

    // Act
    let messages = Reviser::default()
        .revise(&params, |_| Some(ChangeDialogOption::One))
        .unwrap();

    // Assert
    let message = &messages[0];
    assert_eq!(message.method(), Some(Method::Request));
    let one = message.components().next().unwrap();
    assert_eq!(one.recurrence_id(), Some(&floating(16, 10)));
    assert_eq!(one.dtstart(), Some(&floating(16, 14)));
    assert_eq!(one.dtend(), Some(&floating(16, 15)));
    assert!(one.rrule().is_none());
    assert_eq!(one.sequence(), 1);

    store.process_message(message);
    let starts = wall_clocks(&store, DAILY_UID);
    assert_eq!(starts.len(), 10);
    assert_eq!(starts[6], date(2016, 5, 16).at(14, 0, 0, 0));
    assert_eq!(starts[7], date(2016, 5, 17).at(10, 0, 0, 0));
}

#[test]
fn revise_all_moves_series_and_overrides() {
    // Arrange
    let mut store = weekly_store();
    let parent = store.parent(WEEKLY_UID).unwrap().clone();
    let overrides = store.overrides(WEEKLY_UID).cloned().collect();
    let edited = moved(&parent, &la(16, 12));
    let params = ReviseParams::new(parent, edited, la(16, 10)).with_overrides(overrides);

    // Act
    let messages = Reviser::default()
        .revise(&params, |_| Some(ChangeDialogOption::All))
        .unwrap();

    // Assert
    let components: Vec<_> = messages[0].components().collect();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].dtstart(), Some(&la(2, 12)));
    assert_eq!(components[1].recurrence_id(), Some(&la(9, 12)));
    assert_eq!(components[1].dtstart(), Some(&la(9, 11)));

    store.process_message(&messages[0]);
    assert_eq!(store.overrides(WEEKLY_UID).count(), 1);
    assert_eq!(
        wall_clocks(&store, WEEKLY_UID),
        [
            date(2016, 5, 2).at(12, 0, 0, 0),
            date(2016, 5, 9).at(11, 0, 0, 0),
            date(2016, 5, 16).at(12, 0, 0, 0),
            date(2016, 5, 23).at(12, 0, 0, 0),
            date(2016, 5, 30).at(12, 0, 0, 0),
        ]
    );
}

#[test]
fn revise_this_and_future_splits_series() {
    // Arrange
    let mut store = daily_store();
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let mut edited = moved(&parent, &floating(16, 14));
    edited.set_property(Property::text(PropertyName::Summary, "Late stand-up"));
    let params = ReviseParams::new(parent, edited, floating(16, 10));
    assert_eq!(params.changed, [PropertyName::Summary]);

    // Act
    let messages = Reviser::default()
        .revise(&params, |_| Some(ChangeDialogOption::ThisAndFuture))
        .unwrap();

    // Assert
    let future = messages[0].components().next().unwrap();
    assert!(future.is_this_and_future());
    assert_eq!(future.recurrence_id(), Some(&floating(16, 10)));
    assert_eq!(future.dtstart(), Some(&floating(16, 14)));
    assert_eq!(future.rrule().unwrap().count, Some(4));
    assert_eq!(future.summary(), Some("Late stand-up"));

    store.process_message(&messages[0]);
    let starts = wall_clocks(&store, DAILY_UID);
    let expected: Vec<_> = (10..16)
        .map(|d| date(2016, 5, d).at(10, 0, 0, 0))
        .chain((16..20).map(|d| date(2016, 5, d).at(14, 0, 0, 0)))
        .collect();
    assert_eq!(starts, expected);
    assert_eq!(
        store.parent(DAILY_UID).unwrap().summary(),
        Some("Stand-up")
    );
    assert_eq!(
        store
            .find(DAILY_UID, Some(&floating(16, 10)))
            .unwrap()
            .summary(),
        Some("Late stand-up")
    );
}

#[test]
fn rule_change_offers_whole_series_only() {
    // Arrange
    let mut store = daily_store();
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let mut edited = parent.clone();
    edited.set_property(Property::new(
        PropertyName::RRule,
        Value::Recur("FREQ=DAILY;COUNT=5".parse().unwrap()),
    ));
    let params = ReviseParams::new(parent, edited, floating(10, 10));

    // Act
    let messages = Reviser::default()
        .revise(&params, |choices| {
            assert_eq!(
                choices.keys().copied().collect::<Vec<_>>(),
                [ChangeDialogOption::All]
            );
            Some(ChangeDialogOption::All)
        })
        .unwrap();

    // Assert
    store.process_message(&messages[0]);
    assert_eq!(wall_clocks(&store, DAILY_UID).len(), 5);
}

#[test]
fn exdate_change_offers_whole_series_only() {
    // Arrange
    let mut store = daily_store();
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let mut edited = parent.clone();
    edited.set_exdates(&[floating(12, 10)]);
    let params = ReviseParams::new(parent, edited, floating(10, 10));
    assert_eq!(params.changed, [PropertyName::ExDate]);

    // Act
    let messages = Reviser::default()
        .revise(&params, |choices| {
            assert_eq!(
                choices.keys().copied().collect::<Vec<_>>(),
                [ChangeDialogOption::All]
            );
            Some(ChangeDialogOption::All)
        })
        .unwrap();

    // Assert
    let all = messages[0].components().next().unwrap();
    assert_eq!(all.exdates(), [floating(12, 10)]);
    assert_eq!(all.dtstart(), Some(&floating(10, 10)));

    store.process_message(&messages[0]);
    let starts = wall_clocks(&store, DAILY_UID);
    assert_eq!(starts.len(), 9);
    assert!(!starts.contains(&date(2016, 5, 12).at(10, 0, 0, 0)));
}

#[test]
fn stale_revision_is_not_applied_twice() {
    let mut store = daily_store();
    let parent = store.parent(DAILY_UID).unwrap().clone();
    let edited = moved(&parent, &floating(16, 14));
    let params = ReviseParams::new(parent, edited, floating(16, 10));
    let messages = Reviser::default()
        .revise(&params, |_| Some(ChangeDialogOption::All))
        .unwrap();

    store.process_message(&messages[0]);
    let once = store.clone();
    let log = store.process_message(&messages[0]);
    assert_eq!(log.len(), 1);
    assert_eq!(store, once);
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Folding and unfolding of content lines.

use recurcal_ical::formatter::fold_line;
use recurcal_ical::syntax::unfold;
use recurcal_ical::{FoldingStyle, FormatOptions};

fn unfolded(folded: &str) -> Vec<String> {
    unfold(folded).map(|line| line.text.into_owned()).collect()
}

#[test]
fn fold_then_unfold_is_identity() {
    let options = FormatOptions::default();
    for len in 1..=200 {
        let line = format!("X-TEST:{}", "a".repeat(len));
        let folded = fold_line(&line, options);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75, "{len}: {physical:?}");
        }
        assert_eq!(unfolded(&folded), [line], "{len}");
    }
}

#[test]
fn folds_only_past_seventy_five_octets() {
    let options = FormatOptions::default();

    let exact = format!("SUMMARY:{}", "x".repeat(75 - "SUMMARY:".len()));
    assert_eq!(exact.len(), 75);
    assert_eq!(fold_line(&exact, options), exact);

    let over = format!("{exact}y");
    let folded = fold_line(&over, options);
    assert_eq!(folded, format!("{exact}\r\n y"));
}

#[test]
fn never_splits_a_character() {
    let options = FormatOptions::default();
    for prefix in 0..8 {
        let line = format!(
            "DESCRIPTION:{}{}",
            "-".repeat(prefix),
            "日本語のテキストと絵文字🎉".repeat(6)
        );
        let folded = fold_line(&line, options);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75, "{physical:?}");
        }
        assert_eq!(unfolded(&folded), [line]);
    }
}

#[test]
fn unfolds_tab_continuations() {
    let options = FormatOptions::default()
        .folding(Some(20))
        .folding_style(FoldingStyle::Tab);
    let line = "COMMENT:folded with a tab instead of a space";
    let folded = fold_line(line, options);
    assert!(folded.contains("\r\n\t"));
    assert_eq!(unfolded(&folded), [line]);
}

#[test]
fn keeps_physical_line_numbers() {
    let src = "BEGIN:VCALENDAR\r\nSUMMARY:a\r\n b\r\n c\r\nUID:1\r\nEND:VCALENDAR\r\n";
    let lines: Vec<_> = unfold(src)
        .map(|line| (line.number, line.text.into_owned()))
        .collect();
    assert_eq!(
        lines,
        [
            (1, "BEGIN:VCALENDAR".to_owned()),
            (2, "SUMMARY:abc".to_owned()),
            (5, "UID:1".to_owned()),
            (6, "END:VCALENDAR".to_owned()),
        ]
    );
}

#[test]
fn accepts_bare_line_feeds() {
    let src = "SUMMARY:one\n two\nUID:1\n";
    assert_eq!(unfolded(src), ["SUMMARY:onetwo", "UID:1"]);
}

//! End-to-end tests for `sync_text`.
//!
//! Scenarios are written as line arrays so the nesting stays readable.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::settings::Settings;
use crate::sync::sync_text;

fn text(lines: &[&str]) -> String {
    lines.join("\n")
}

fn settings(child: bool, parent: bool) -> Settings {
    Settings::builder()
        .ignore_symbols(['~'])
        .enable_automatic_child_state(child)
        .enable_automatic_parent_state(parent)
        .build()
        .unwrap()
}

fn both() -> Settings {
    settings(true, true)
}

// Reference scenarios

#[test]
fn checking_parent_checks_child() {
    let previous = text(&["- [ ] P", "  - [ ] C"]);
    let current = text(&["- [x] P", "  - [ ] C"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [x] P", "  - [x] C"])
    );
}

#[test]
fn checking_last_child_checks_parent() {
    let previous = text(&["- [ ] P", "  - [x] C1", "  - [ ] C2"]);
    let current = text(&["- [ ] P", "  - [x] C1", "  - [x] C2"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [x] P", "  - [x] C1", "  - [x] C2"])
    );
}

#[test]
fn unchecking_parent_skips_ignored_subtree() {
    let previous = text(&["- [x] P", "  - [~] I", "    - [ ] G"]);
    let current = text(&["- [ ] P", "  - [~] I", "    - [ ] G"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [ ] P", "  - [~] I", "    - [ ] G"])
    );
}

#[test]
fn plain_child_does_not_block_aggregation() {
    let doc = text(&["- [ ] P", "  Plain child", "  - [x] C"]);
    // Identical snapshots short-circuit, so open it fresh instead.
    assert_eq!(
        sync_text(&doc, None, &both()),
        text(&["- [x] P", "  Plain child", "  - [x] C"])
    );
}

#[test]
fn two_line_edit_only_aggregates() {
    let previous = text(&["- [ ] P", "  - [ ] C"]);
    let current = text(&["- [x] P Changed", "  - [x] C"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [x] P Changed", "  - [x] C"])
    );
}

#[test]
fn two_line_edit_with_parent_checked_is_corrected_by_child() {
    let previous = text(&["- [ ] P", "  - [ ] C"]);
    let current = text(&["- [x] P Changed", "  - [ ] C also"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [ ] P Changed", "  - [ ] C also"])
    );
}

// Flag combinations

#[rstest]
#[case::child_only(true, false, &["- [x] P", "  - [x] C"])]
#[case::parent_only(false, true, &["- [ ] P", "  - [ ] C"])]
#[case::both(true, true, &["- [x] P", "  - [x] C"])]
#[case::neither(false, false, &["- [x] P", "  - [ ] C"])]
fn checking_parent_under_flags(
    #[case] child: bool,
    #[case] parent: bool,
    #[case] expected: &[&str],
) {
    let previous = text(&["- [ ] P", "  - [ ] C"]);
    let current = text(&["- [x] P", "  - [ ] C"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &settings(child, parent)),
        text(expected)
    );
}

#[rstest]
#[case::child_only(true, false, &["- [ ] P", "  - [x] C"])]
#[case::parent_only(false, true, &["- [x] P", "  - [x] C"])]
#[case::both(true, true, &["- [x] P", "  - [x] C"])]
#[case::neither(false, false, &["- [ ] P", "  - [x] C"])]
fn checking_child_under_flags(
    #[case] child: bool,
    #[case] parent: bool,
    #[case] expected: &[&str],
) {
    let previous = text(&["- [ ] P", "  - [ ] C"]);
    let current = text(&["- [ ] P", "  - [x] C"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &settings(child, parent)),
        text(expected)
    );
}

// Structural edits never cascade

#[test]
fn indent_change_does_not_propagate_down() {
    let previous = text(&["- [ ] Parent", "  - [ ] Child"]);
    let current = text(&["  - [x] Parent", "    - [ ] Child"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &settings(true, false)),
        current
    );
}

#[test]
fn added_line_does_not_propagate_down() {
    let previous = text(&["- [ ] P", "  - [ ] C"]);
    let current = text(&["- [x] P", "  - [ ] C", "  - [ ] D"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &settings(true, false)),
        current
    );
}

#[test]
fn unchanged_text_is_returned_verbatim() {
    let doc = text(&["- [ ] Parent", "  - [x] Child"]);
    assert_eq!(sync_text(&doc, Some(&doc), &both()), doc);
}

// Plain items and text

#[test]
fn plain_list_child_is_transparent_upward() {
    let previous = text(&["- [ ] Parent", "  - Child1", "  - [ ] Child2"]);
    let current = text(&["- [ ] Parent", "  - Child1", "  - [x] Child2"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [x] Parent", "  - Child1", "  - [x] Child2"])
    );
}

#[test]
fn plain_text_child_is_transparent_upward() {
    let previous = text(&["- [ ] Parent", "  Child1", "  - [ ] Child2"]);
    let current = text(&["- [ ] Parent", "  Child1", "  - [x] Child2"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [x] Parent", "  Child1", "  - [x] Child2"])
    );
}

#[test]
fn toggle_reaches_checkboxes_below_plain_items() {
    let previous = text(&["- [ ] P", "  - Group", "    - [ ] A", "    - [ ] B"]);
    let current = text(&["- [x] P", "  - Group", "    - [ ] A", "    - [ ] B"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&["- [x] P", "  - Group", "    - [x] A", "    - [x] B"])
    );
}

#[test]
fn non_list_text_after_list_only_ends_by_indent() {
    // A shallower text line closes the list; later deeper lines start fresh.
    let previous = text(&["- [ ] P", "  - [ ] C", "Paragraph", "  - [ ] Other"]);
    let current = text(&["- [x] P", "  - [ ] C", "Paragraph", "  - [ ] Other"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &settings(true, false)),
        text(&["- [x] P", "  - [x] C", "Paragraph", "  - [ ] Other"])
    );
}

// Fresh documents (no previous snapshot)

#[test]
fn fresh_document_done_child_checks_parent() {
    let doc = text(&["- [ ] Parent", "  - [x] Child"]);
    assert_eq!(
        sync_text(&doc, None, &both()),
        text(&["- [x] Parent", "  - [x] Child"])
    );
}

#[test]
fn fresh_document_open_child_unchecks_parent() {
    let doc = text(&["- [x] Parent", "  - [ ] Child"]);
    assert_eq!(
        sync_text(&doc, None, &both()),
        text(&["- [ ] Parent", "  - [ ] Child"])
    );
}

#[test]
fn fresh_document_with_several_roots() {
    let doc = text(&["- [x] Parent1", "  - [ ] Child1", "- [ ] Parent2", "  - [x] Child2"]);
    assert_eq!(
        sync_text(&doc, None, &both()),
        text(&["- [ ] Parent1", "  - [ ] Child1", "- [x] Parent2", "  - [x] Child2"])
    );
}

#[test]
fn unchecking_a_child_in_one_root_leaves_other_roots_alone() {
    let previous = text(&[
        "- [x] Parent1",
        "  - [x] Child1",
        "- Parent2",
        "  - Child2",
        "Parent3",
        "  Child3",
    ]);
    let current = text(&[
        "- [x] Parent1",
        "  - [ ] Child1",
        "- Parent2",
        "  - Child2",
        "Parent3",
        "  Child3",
    ]);
    assert_eq!(
        sync_text(&current, Some(&previous), &both()),
        text(&[
            "- [ ] Parent1",
            "  - [ ] Child1",
            "- Parent2",
            "  - Child2",
            "Parent3",
            "  Child3",
        ])
    );
}

// Symbols

#[test]
fn mutations_use_first_configured_symbol_and_keep_others() {
    let settings = Settings::builder()
        .checked_symbols(['V', 'x'])
        .unchecked_symbols(['O', ' '])
        .build()
        .unwrap();
    let previous = text(&["- [O] P", "  - [ ] A", "  - [x] B"]);
    let current = text(&["- [x] P", "  - [ ] A", "  - [x] B"]);
    assert_eq!(
        sync_text(&current, Some(&previous), &settings),
        text(&["- [x] P", "  - [V] A", "  - [x] B"])
    );
}

#[test]
fn unknown_symbols_follow_policy_during_aggregation() {
    let settings = Settings::builder()
        .unknown_symbol_policy(crate::settings::CheckboxState::Ignore)
        .build()
        .unwrap();
    let doc = text(&["- [ ] P", "  - [?] Unknown", "  - [x] Done"]);
    assert_eq!(
        sync_text(&doc, None, &settings),
        text(&["- [x] P", "  - [?] Unknown", "  - [x] Done"])
    );
}

#[test]
fn tab_indented_children_follow_parent() {
    let previous = "- [ ] P\n\t- [ ] C\n\t\t- [ ] G";
    let current = "- [x] P\n\t- [ ] C\n\t\t- [ ] G";
    assert_eq!(
        sync_text(current, Some(previous), &both()),
        "- [x] P\n\t- [x] C\n\t\t- [x] G"
    );
}

#[test]
fn trailing_newline_is_preserved() {
    let previous = "- [ ] P\n  - [ ] C\n";
    let current = "- [x] P\n  - [ ] C\n";
    assert_eq!(
        sync_text(current, Some(previous), &both()),
        "- [x] P\n  - [x] C\n"
    );
}

#[test]
fn crlf_blank_line_ends_the_list_above() {
    let doc = "- [ ] P\r\n  - [x] C\r\n\r\n  - [ ] Stray\r\n";
    assert_eq!(
        sync_text(doc, None, &both()),
        "- [x] P\r\n  - [x] C\r\n\r\n  - [ ] Stray\r\n"
    );
}

#[test]
fn empty_document_stays_empty() {
    assert_eq!(sync_text("", None, &both()), "");
}

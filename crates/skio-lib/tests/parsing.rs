mod common;

use std::path::Path;

use skio_lib::{
    load_course, load_map, parse_course, parse_map, Error, NodeId, ParseMode, SkipReason,
};

use crate::common::fixtures_dir;

#[test]
fn lenient_map_parse_skips_and_reports_bad_lines() {
    let path = fixtures_dir().join("malformed_map.txt");
    let parsed = load_map(&path, ParseMode::Lenient).expect("lenient parse succeeds");

    let ids: Vec<_> = parsed.registry.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["T1", "T5"]);

    let skipped: Vec<_> = parsed.skipped.iter().map(|s| s.line).collect();
    assert_eq!(skipped, vec![2, 3, 4, 6]);
    assert_eq!(
        parsed.skipped[0].reason,
        SkipReason::FieldCount { found: 3 }
    );
    assert_eq!(
        parsed.skipped[1].reason,
        SkipReason::InvalidWeight {
            field: "forward weight",
            value: "four".to_string(),
        }
    );
    assert_eq!(
        parsed.skipped[2].reason,
        SkipReason::FieldCount { found: 7 }
    );
}

#[test]
fn strict_map_parse_fails_on_first_bad_number() {
    let path = fixtures_dir().join("malformed_map.txt");
    let error = load_map(&path, ParseMode::Strict).expect_err("strict parse fails");

    match error {
        Error::InvalidTrack { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("four"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_mode_still_skips_wrong_field_counts() {
    let parsed = parse_map("T1 J1 J2 0 1 2\nnot a track\n", ParseMode::Strict)
        .expect("field count skips are not fatal");
    assert_eq!(parsed.registry.len(), 1);
    assert_eq!(parsed.skipped.len(), 1);
}

#[test]
fn map_accepts_real_weights_and_extra_whitespace() {
    let parsed = parse_map("  T7\tJ1   J2 x 2.5   0.75  \n", ParseMode::Lenient).unwrap();
    let track = parsed.registry.get("T7").expect("track parsed");
    assert_eq!(track.forward_weight, 2.5);
    assert_eq!(track.reverse_weight, 0.75);
}

#[test]
fn missing_map_file_is_a_read_error() {
    let error = load_map(Path::new("does/not/exist.txt"), ParseMode::Lenient)
        .expect_err("missing file");
    assert!(matches!(error, Error::FileRead { .. }));
    assert!(error.to_string().contains("does/not/exist.txt"));
}

#[test]
fn course_fixture_builds_waypoint_sequence() {
    let parsed = load_course(&fixtures_dir().join("sample_course.txt")).expect("course loads");
    assert!(parsed.warnings.is_empty());
    assert_eq!(
        parsed.course.waypoints(),
        vec![
            NodeId::junction("J1"),
            NodeId::control("T1"),
            NodeId::control("T3"),
            NodeId::junction("J4"),
        ]
    );
}

#[test]
fn course_entries_may_appear_in_any_order() {
    let parsed = parse_course("controls 1 T5\nfinish J9\nstart J1\n");
    assert_eq!(
        parsed.course.waypoints(),
        vec![
            NodeId::junction("J1"),
            NodeId::control("T5"),
            NodeId::junction("J9"),
        ]
    );
}

#[test]
fn controls_are_capped_at_declared_count() {
    let parsed = parse_course("start J1\nfinish J2\ncontrols 2 T1 T2 T3\n");
    assert_eq!(parsed.course.controls, vec!["T1", "T2"]);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn short_control_list_keeps_what_is_there() {
    let parsed = parse_course("start J1\nfinish J2\ncontrols 3 T1\n");
    assert_eq!(parsed.course.controls, vec!["T1"]);
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].line, 3);
}

#[test]
fn malformed_course_lines_are_omitted() {
    let parsed = parse_course("start\nfinish J2 extra\ncontrols many T1\nlap 3\n");
    assert_eq!(parsed.course.start, None);
    assert_eq!(parsed.course.finish, None);
    assert!(parsed.course.controls.is_empty());
    assert!(parsed.course.waypoints().is_empty());

    let lines: Vec<_> = parsed.warnings.iter().map(|w| w.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 4]);
}

#[test]
fn missing_course_file_is_a_read_error() {
    let error = load_course(Path::new("does/not/exist.txt")).expect_err("missing file");
    assert!(matches!(error, Error::FileRead { .. }));
}

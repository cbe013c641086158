use std::fs;
use std::path::{Path, PathBuf};

use classtable_tools::ScheduleError;
use classtable_tools::assignment::{AssignmentIndex, ParseOptions};
use classtable_tools::model::{AssignmentRow, OrderingRow, TimeSlot, TimetableRow, UNKNOWN_TEACHER};
use classtable_tools::resolve::{build_schedules, period_number, weekday_number};
use classtable_tools::roster::TeacherRoster;
use classtable_tools::session::{self, Session};
use tempfile::tempdir;

fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write csv");
    path
}

fn assignment_row(class_id: &str, subject: &str, teacher_field: &str) -> AssignmentRow {
    AssignmentRow {
        class_id: class_id.to_string(),
        subject: subject.to_string(),
        teacher_field: teacher_field.to_string(),
    }
}

fn timetable_row(class_id: &str, subject: &str, weekday: &str, period: &str) -> TimetableRow {
    TimetableRow {
        class_id: class_id.to_string(),
        subject: subject.to_string(),
        weekday: weekday.to_string(),
        period: period.to_string(),
    }
}

fn ordering_row(teacher: &str, hours_field: &str) -> OrderingRow {
    OrderingRow {
        teacher: teacher.to_string(),
        hours_field: hours_field.to_string(),
    }
}

#[test]
fn co_teaching_slot_populates_both_views() {
    let temp_dir = tempdir().expect("temporary directory");
    let assignment = write_csv(
        temp_dir.path(),
        "assignment.csv",
        "班級,科目,教師\n101,數學,王老師/李老師\n",
    );
    let timetable = write_csv(
        temp_dir.path(),
        "timetable.csv",
        "班級,科目,星期,節次\n101,數學,一,第3節\n",
    );

    let state = session::ingest(&assignment, &timetable, None, &ParseOptions::default())
        .expect("ingest succeeds");

    let slot = TimeSlot::new(1, 3);
    let class_entry = state.class_schedule["101"].get(&slot).expect("class entry");
    assert_eq!(class_entry.subject, "數學");
    assert_eq!(class_entry.teacher_display, "王老師/李老師");

    for teacher in ["王老師", "李老師"] {
        let teacher_entry = state.teacher_schedule[teacher]
            .get(&slot)
            .expect("teacher entry");
        assert_eq!(teacher_entry.subject, "數學");
        assert_eq!(teacher_entry.class_id, "101");
        assert_eq!(state.taught_hours[teacher], 1);
    }
}

#[test]
fn unrecognized_weekday_or_digitless_period_drops_row_silently() {
    let index = AssignmentIndex::build(&[assignment_row("101", "數學", "王老師")]);
    let rows = vec![
        timetable_row("101", "數學", "日", "第3節"),
        timetable_row("101", "數學", "一", "自習"),
    ];

    let set = build_schedules(&rows, &index);

    assert!(set.class_schedule.is_empty());
    assert!(set.teacher_schedule.is_empty());
    assert!(set.taught_hours.is_empty());
}

#[test]
fn duplicate_slot_rows_overwrite_last_wins() {
    let index = AssignmentIndex::build(&[
        assignment_row("101", "數學", "王老師"),
        assignment_row("101", "體育", "李老師"),
    ]);
    let rows = vec![
        timetable_row("101", "數學", "二", "4"),
        timetable_row("101", "體育", "二", "4"),
    ];

    let set = build_schedules(&rows, &index);
    let entry = set.class_schedule["101"]
        .get(&TimeSlot::new(2, 4))
        .expect("slot entry");

    assert_eq!(entry.subject, "體育");
    assert_eq!(entry.teacher_display, "李老師");
    assert_eq!(set.class_schedule["101"].len(), 1);
    // Both teachers still saw a write; the overwrite is not reconciled.
    assert_eq!(set.taught_hours["王老師"], 1);
    assert_eq!(set.taught_hours["李老師"], 1);
}

#[test]
fn unresolved_slot_degrades_to_unknown_teacher_sentinel() {
    let index = AssignmentIndex::build(&[assignment_row("101", "數學", "王老師")]);
    let rows = vec![timetable_row("101", "美術", "三", "第1節")];

    let set = build_schedules(&rows, &index);
    let entry = set.class_schedule["101"]
        .get(&TimeSlot::new(3, 1))
        .expect("slot entry");

    assert_eq!(entry.teacher_display, UNKNOWN_TEACHER);
    assert!(set.teacher_schedule.is_empty());
    assert!(set.taught_hours.is_empty());
}

#[test]
fn repeated_assignment_matches_concatenate_in_row_order() {
    let index = AssignmentIndex::build(&[
        assignment_row("101", "數學", "王老師"),
        assignment_row("101", "數學", "李老師"),
    ]);

    assert_eq!(index.resolve("101", "數學"), ["王老師", "李老師"]);

    let set = build_schedules(&[timetable_row("101", "數學", "一", "1")], &index);
    let entry = set.class_schedule["101"]
        .get(&TimeSlot::new(1, 1))
        .expect("slot entry");
    assert_eq!(entry.teacher_display, "王老師/李老師");
}

#[test]
fn homeroom_rows_record_unsplit_teacher_field() {
    let index = AssignmentIndex::build(&[
        assignment_row("101", "班級", "王老師/李老師"),
        assignment_row("102", "數學", "陳老師"),
    ]);

    assert_eq!(index.homeroom("101"), Some("王老師/李老師"));
    assert_eq!(index.homeroom("102"), None);
    // Homeroom tokens still join the universe through the usual split.
    assert_eq!(index.universe(), ["王老師", "李老師", "陳老師"]);
}

#[test]
fn empty_and_nan_tokens_are_dropped() {
    let index = AssignmentIndex::build(&[assignment_row("101", "數學", "王老師//nan/ 李老師 ")]);

    assert_eq!(index.resolve("101", "數學"), ["王老師", "李老師"]);
}

#[test]
fn unknown_sentinel_token_is_a_configuration_choice() {
    let rows = [assignment_row("101", "數學", "王老師/未知教師")];

    let filtering = AssignmentIndex::build(&rows);
    assert_eq!(filtering.resolve("101", "數學"), ["王老師"]);

    let keeping = AssignmentIndex::build_with(
        &rows,
        &ParseOptions {
            drop_unknown_sentinel: false,
        },
    );
    assert_eq!(keeping.resolve("101", "數學"), ["王老師", UNKNOWN_TEACHER]);
    assert!(keeping.universe().contains(&UNKNOWN_TEACHER.to_string()));
}

#[test]
fn missing_column_fails_before_any_state_is_built() {
    let temp_dir = tempdir().expect("temporary directory");
    let assignment = write_csv(
        temp_dir.path(),
        "assignment.csv",
        "班級,科目,教師\n101,數學,王老師\n",
    );
    let timetable = write_csv(
        temp_dir.path(),
        "timetable.csv",
        "班級,科目,星期\n101,數學,一\n",
    );

    let error = session::ingest(&assignment, &timetable, None, &ParseOptions::default())
        .expect_err("timetable lacks the period column");

    match error {
        ScheduleError::MissingColumn { table, column } => {
            assert_eq!(table, "timetable");
            assert_eq!(column, "節次");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_reingest_leaves_previous_session_state_untouched() {
    let temp_dir = tempdir().expect("temporary directory");
    let assignment = write_csv(
        temp_dir.path(),
        "assignment.csv",
        "班級,科目,教師\n101,數學,王老師\n",
    );
    let timetable = write_csv(
        temp_dir.path(),
        "timetable.csv",
        "班級,科目,星期,節次\n101,數學,一,1\n",
    );
    let broken = write_csv(temp_dir.path(), "broken.csv", "班級,科目\n101,數學\n");

    let mut session = Session::new();
    session
        .ingest(&assignment, &timetable, None, &ParseOptions::default())
        .expect("first ingest succeeds");

    session
        .ingest(&broken, &timetable, None, &ParseOptions::default())
        .expect_err("second ingest fails on the broken table");

    let state = session.state().expect("previous state survives");
    assert_eq!(state.class_ids(), ["101"]);

    session.reset();
    assert!(session.state().is_none());
}

#[test]
fn roster_orders_by_order_rows_then_first_seen() {
    let universe = vec![
        "王老師".to_string(),
        "李老師".to_string(),
        "陳老師".to_string(),
    ];
    let order_rows = vec![
        ordering_row("李老師", "16"),
        ordering_row("外校老師", "8"),
        ordering_row("王老師", "N/A"),
        ordering_row("李老師", "99"),
    ];

    let roster = TeacherRoster::build(&universe, Some(&order_rows));

    assert_eq!(roster.ordered_names(), ["李老師", "王老師", "陳老師"]);
    assert_eq!(roster.base_hours("李老師"), 16);
    // "N/A" parses to 0 without raising; the duplicate 李老師 row is ignored.
    assert_eq!(roster.base_hours("王老師"), 0);
    assert_eq!(roster.base_hours("陳老師"), 0);
    assert!(!roster.contains("外校老師"));
}

#[test]
fn roster_without_order_rows_sorts_lexicographically() {
    let universe = vec!["b".to_string(), "a".to_string(), "c".to_string()];

    let roster = TeacherRoster::build(&universe, None);

    assert_eq!(roster.ordered_names(), ["a", "b", "c"]);
    assert_eq!(roster.base_hours("a"), 0);
    assert_eq!(roster.len(), universe.len());
}

#[test]
fn roster_is_a_permutation_for_disjoint_order_rows() {
    let universe = vec!["甲".to_string(), "乙".to_string()];
    let order_rows = vec![ordering_row("丙", "10"), ordering_row("丁", "12")];

    let roster = TeacherRoster::build(&universe, Some(&order_rows));

    // Disjoint order rows contribute nothing; the fallback appends the whole
    // universe in first-seen order.
    assert_eq!(roster.ordered_names(), ["甲", "乙"]);
}

#[test]
fn same_teacher_same_slot_across_classes_double_counts() {
    let index = AssignmentIndex::build(&[
        assignment_row("101", "數學", "王老師"),
        assignment_row("102", "數學", "王老師"),
    ]);
    let rows = vec![
        timetable_row("101", "數學", "一", "1"),
        timetable_row("102", "數學", "一", "1"),
    ];

    let set = build_schedules(&rows, &index);

    // The second class overwrote the teacher's slot but both writes counted.
    assert_eq!(set.taught_hours["王老師"], 2);
    let entry = set.teacher_schedule["王老師"]
        .get(&TimeSlot::new(1, 1))
        .expect("slot entry");
    assert_eq!(entry.class_id, "102");
}

#[test]
fn weekday_tokens_map_with_and_without_prefix() {
    assert_eq!(weekday_number("一"), 1);
    assert_eq!(weekday_number("週三"), 3);
    assert_eq!(weekday_number("五"), 5);
    assert_eq!(weekday_number("日"), 0);
    assert_eq!(weekday_number(""), 0);
}

#[test]
fn period_extracts_first_digit_run() {
    assert_eq!(period_number("第3節"), Some(3));
    assert_eq!(period_number("12"), Some(12));
    assert_eq!(period_number("第1-2節"), Some(1));
    assert_eq!(period_number("早自習"), None);
}

#[test]
fn hours_metrics_combine_roster_and_counters() {
    let temp_dir = tempdir().expect("temporary directory");
    let assignment = write_csv(
        temp_dir.path(),
        "assignment.csv",
        "班級,科目,教師\n101,數學,王老師\n102,數學,王老師\n",
    );
    let timetable = write_csv(
        temp_dir.path(),
        "timetable.csv",
        "班級,科目,星期,節次\n101,數學,一,1\n101,數學,二,2\n102,數學,三,3\n",
    );
    let ordering = write_csv(temp_dir.path(), "ordering.csv", "教師,時數\n王老師,16\n");

    let state = session::ingest(
        &assignment,
        &timetable,
        Some(&ordering),
        &ParseOptions::default(),
    )
    .expect("ingest succeeds");

    let hours = state.teacher_metrics("王老師");
    assert_eq!(hours.base, 16);
    assert_eq!(hours.total, 3);
    assert_eq!(hours.extra, -13);
}

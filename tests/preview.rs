use std::fs;

use calamine::{Reader, Xlsx, open_workbook};
use classtable_tools::assignment::ParseOptions;
use classtable_tools::io::grid_write;
use classtable_tools::session;
use tempfile::tempdir;

#[test]
fn preview_workbook_holds_one_sheet_per_class_and_teacher() {
    let temp_dir = tempdir().expect("temporary directory");
    let assignment = temp_dir.path().join("assignment.csv");
    let timetable = temp_dir.path().join("timetable.csv");
    fs::write(
        &assignment,
        "班級,科目,教師\n101,數學,王老師/李老師\n102,英文,陳老師\n",
    )
    .expect("write assignment");
    fs::write(
        &timetable,
        "班級,科目,星期,節次\n101,數學,一,第3節\n102,英文,二,第5節\n",
    )
    .expect("write timetable");

    let state = session::ingest(&assignment, &timetable, None, &ParseOptions::default())
        .expect("ingest succeeds");

    let workbook_path = temp_dir.path().join("preview.xlsx");
    grid_write::write_preview(&workbook_path, &state).expect("preview written");

    let mut workbook: Xlsx<_> = open_workbook(&workbook_path).expect("open preview");
    let sheet_names = workbook.sheet_names().to_vec();
    assert!(sheet_names.contains(&"班級 101".to_string()));
    assert!(sheet_names.contains(&"班級 102".to_string()));
    assert!(sheet_names.contains(&"教師 王老師".to_string()));
    assert!(sheet_names.contains(&"教師 陳老師".to_string()));

    let range = workbook
        .worksheet_range("班級 101")
        .expect("class sheet exists")
        .expect("class sheet readable");
    // Row = period, column = day: (1,3) holds 數學.
    let cell = range.get_value((3, 1)).map(|value| value.to_string());
    assert_eq!(cell.as_deref(), Some("數學"));

    let range = workbook
        .worksheet_range("教師 王老師")
        .expect("teacher sheet exists")
        .expect("teacher sheet readable");
    let cell = range.get_value((3, 1)).map(|value| value.to_string());
    assert_eq!(cell.as_deref(), Some("101 數學"));
}

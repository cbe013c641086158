use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved subject label marking a homeroom row in the assignment table.
pub const HOMEROOM_SUBJECT: &str = "班級";

/// Display value used when no assignment matches a timetable slot. The same
/// literal can leak back into re-imported assignment data, which is why
/// [`crate::assignment::ParseOptions`] can filter it out as a token.
pub const UNKNOWN_TEACHER: &str = "未知教師";

/// Separator between co-teaching teacher names in raw fields and displays.
pub const NAME_SEPARATOR: &str = "/";

/// Missing-value marker produced by spreadsheet exports of empty cells.
pub const NAN_TOKEN: &str = "nan";

/// Number of teaching days in the weekly grid.
pub const DAY_COUNT: u8 = 5;

/// Number of periods per teaching day.
pub const PERIOD_COUNT: u8 = 8;

/// A (day, period) coordinate in the weekly schedule grid. Days run 1..=5
/// (Monday through Friday), periods 1..=8.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSlot {
    pub day: u8,
    pub period: u8,
}

impl TimeSlot {
    /// Creates a new slot coordinate.
    pub fn new(day: u8, period: u8) -> Self {
        Self { day, period }
    }
}

/// Every coordinate of the weekly grid, day-major: (1,1), (1,2), … (5,8).
pub fn all_slots() -> impl Iterator<Item = TimeSlot> {
    (1..=DAY_COUNT).flat_map(|day| (1..=PERIOD_COUNT).map(move |period| TimeSlot::new(day, period)))
}

/// One reconciled cell of the per-class view: what is taught and by whom.
/// `teacher_display` is the `/`-joined resolved teacher names, or the
/// unknown-teacher sentinel when nothing resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub subject: String,
    pub teacher_display: String,
}

/// One reconciled cell of the per-teacher view: what is taught and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherEntry {
    pub subject: String,
    pub class_id: String,
}

/// Weekly grid for a single class or teacher.
pub type SlotGrid<E> = BTreeMap<TimeSlot, E>;

/// class_id → slot → entry, for every class observed in the timetable.
pub type ClassSchedule = BTreeMap<String, SlotGrid<ClassEntry>>;

/// teacher_name → slot → entry, for every teacher resolved from a valid row.
pub type TeacherSchedule = BTreeMap<String, SlotGrid<TeacherEntry>>;

/// teacher_name → count of (teacher, slot) writes into the teacher schedule.
pub type TaughtHours = BTreeMap<String, i32>;

/// One row of the teaching-assignment table, fields trimmed. The teacher
/// field is kept raw here; tokenisation happens in the assignment index so
/// homeroom rows can record the unsplit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRow {
    pub class_id: String,
    pub subject: String,
    pub teacher_field: String,
}

/// One row of the weekly timetable table, fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRow {
    pub class_id: String,
    pub subject: String,
    pub weekday: String,
    pub period: String,
}

/// One positional row of the teacher ordering/workload table: column 0 is
/// the teacher name, column 1 the baseline required hours as free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingRow {
    pub teacher: String,
    pub hours_field: String,
}

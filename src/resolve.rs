use tracing::{debug, instrument};

use crate::assignment::AssignmentIndex;
use crate::model::{
    ClassEntry, ClassSchedule, NAME_SEPARATOR, TaughtHours, TeacherEntry, TeacherSchedule,
    TimeSlot, TimetableRow, UNKNOWN_TEACHER,
};

/// Maps a weekday token to 1..=5, or 0 for anything unrecognised. A 0 return
/// marks the row for silent dropping.
pub fn weekday_number(token: &str) -> u8 {
    match token {
        "一" | "週一" => 1,
        "二" | "週二" => 2,
        "三" | "週三" => 3,
        "四" | "週四" => 4,
        "五" | "週五" => 5,
        _ => 0,
    }
}

/// Extracts the first contiguous digit run from a free-text period field
/// ("第3節" → 3). `None` when the field contains no digit.
pub fn period_number(token: &str) -> Option<u8> {
    let start = token.find(|ch: char| ch.is_ascii_digit())?;
    let digits: String = token[start..]
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// The three reconciled structures produced by one resolution pass over the
/// timetable.
#[derive(Debug, Default)]
pub struct ScheduleSet {
    pub class_schedule: ClassSchedule,
    pub teacher_schedule: TeacherSchedule,
    pub taught_hours: TaughtHours,
}

/// Resolves every timetable row against the assignment index.
///
/// Degrade policies, deliberate and load-bearing:
/// - rows with an unrecognised weekday or a digit-free period are dropped
///   silently, producing no entry anywhere;
/// - a slot with no matching assignment keeps the unknown-teacher sentinel
///   as its display and contributes to no teacher grid;
/// - duplicate (class, slot) rows overwrite (last row wins) without
///   deduplication, and the hour counters still count each write, so a
///   duplicated source row double-counts rather than failing.
#[instrument(level = "debug", skip_all, fields(row_count = rows.len()))]
pub fn build_schedules(rows: &[TimetableRow], index: &AssignmentIndex) -> ScheduleSet {
    let mut set = ScheduleSet::default();
    let mut dropped = 0usize;
    let mut unresolved = 0usize;

    for row in rows {
        let day = weekday_number(&row.weekday);
        let period = match period_number(&row.period) {
            Some(period) if day > 0 => period,
            _ => {
                dropped += 1;
                continue;
            }
        };
        let slot = TimeSlot::new(day, period);

        let teachers = index.resolve(&row.class_id, &row.subject);
        let teacher_display = if teachers.is_empty() {
            unresolved += 1;
            UNKNOWN_TEACHER.to_string()
        } else {
            teachers.join(NAME_SEPARATOR)
        };

        set.class_schedule.entry(row.class_id.clone()).or_default().insert(
            slot,
            ClassEntry {
                subject: row.subject.clone(),
                teacher_display,
            },
        );

        for name in teachers {
            set.teacher_schedule.entry(name.clone()).or_default().insert(
                slot,
                TeacherEntry {
                    subject: row.subject.clone(),
                    class_id: row.class_id.clone(),
                },
            );
            *set.taught_hours.entry(name.clone()).or_insert(0) += 1;
        }
    }

    debug!(
        classes = set.class_schedule.len(),
        teachers = set.teacher_schedule.len(),
        dropped,
        unresolved,
        "timetable resolved"
    );
    set
}

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::assignment::{AssignmentIndex, ParseOptions};
use crate::error::Result;
use crate::io::table_read;
use crate::model::{ClassSchedule, TaughtHours, TeacherSchedule};
use crate::resolve;
use crate::roster::TeacherRoster;

/// All reconciled state for one ingestion run: both schedule grids, the
/// homeroom map, the teacher roster, and the taught-hour counters.
///
/// Rebuilt from scratch on every ingest; there is no incremental update and
/// no cross-run persistence.
#[derive(Debug, Default)]
pub struct ScheduleState {
    pub class_schedule: ClassSchedule,
    pub teacher_schedule: TeacherSchedule,
    pub taught_hours: TaughtHours,
    pub homerooms: BTreeMap<String, String>,
    pub roster: TeacherRoster,
}

/// Per-teacher hour metrics derived from the roster baseline and the
/// taught-hour counters. `extra` may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoursSummary {
    pub base: i32,
    pub total: i32,
    pub extra: i32,
}

impl ScheduleState {
    /// Every class observed in the timetable, in sorted order — the entity
    /// list the selection widget pages through.
    pub fn class_ids(&self) -> Vec<String> {
        self.class_schedule.keys().cloned().collect()
    }

    /// Every teacher in roster order — the other selection entity list.
    pub fn teacher_names(&self) -> Vec<String> {
        self.roster.ordered_names().to_vec()
    }

    /// The raw homeroom teacher string recorded for the class, if any.
    pub fn homeroom(&self, class_id: &str) -> Option<&str> {
        self.homerooms.get(class_id).map(String::as_str)
    }

    /// Hour metrics for one teacher. Teachers without counter entries have
    /// taught nothing this week.
    pub fn teacher_metrics(&self, teacher: &str) -> HoursSummary {
        let base = self.roster.base_hours(teacher);
        let total = self.taught_hours.get(teacher).copied().unwrap_or(0);
        HoursSummary {
            base,
            total,
            extra: total - base,
        }
    }
}

/// Reads and reconciles the three input tables into a fresh state. Required
/// columns are validated per table before any per-row logic runs, so a
/// malformed input fails here without touching any existing state.
#[instrument(
    level = "info",
    skip_all,
    fields(assignment = %assignment.display(), timetable = %timetable.display())
)]
pub fn ingest(
    assignment: &Path,
    timetable: &Path,
    ordering: Option<&Path>,
    options: &ParseOptions,
) -> Result<ScheduleState> {
    let assignment_rows = table_read::parse_assignment_rows(&table_read::read_table(assignment)?)?;
    let timetable_rows = table_read::parse_timetable_rows(&table_read::read_table(timetable)?)?;
    let ordering_rows = match ordering {
        Some(path) => Some(table_read::parse_ordering_rows(&table_read::read_table(path)?)),
        None => None,
    };
    info!(
        assignment_rows = assignment_rows.len(),
        timetable_rows = timetable_rows.len(),
        "input tables loaded"
    );

    let index = AssignmentIndex::build_with(&assignment_rows, options);
    let roster = TeacherRoster::build(index.universe(), ordering_rows.as_deref());
    let schedules = resolve::build_schedules(&timetable_rows, &index);
    info!(
        classes = schedules.class_schedule.len(),
        teachers = roster.len(),
        "schedule reconciled"
    );

    Ok(ScheduleState {
        class_schedule: schedules.class_schedule,
        teacher_schedule: schedules.teacher_schedule,
        taught_hours: schedules.taught_hours,
        homerooms: index.homerooms().clone(),
        roster,
    })
}

/// Process-wide session store with an explicit lifecycle: created on ingest,
/// replaced wholesale on re-ingest, cleared on reset. The replacement state
/// is built completely before the swap, so a failed ingest leaves the
/// previous state untouched.
#[derive(Debug, Default)]
pub struct Session {
    state: Option<ScheduleState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a full ingestion and swaps the result in on success.
    pub fn ingest(
        &mut self,
        assignment: &Path,
        timetable: &Path,
        ordering: Option<&Path>,
        options: &ParseOptions,
    ) -> Result<&ScheduleState> {
        let state = ingest(assignment, timetable, ordering, options)?;
        Ok(self.state.insert(state))
    }

    /// The current reconciled state, if an ingest has succeeded.
    pub fn state(&self) -> Option<&ScheduleState> {
        self.state.as_ref()
    }

    /// Discards all session state.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

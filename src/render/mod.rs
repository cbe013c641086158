//! Template filling and document assembly: one filled document per selected
//! class or teacher, with batch variants that merge many filled instances
//! into a single file.

pub mod fill;
pub mod merge;
pub mod tokens;

pub use fill::{FillValue, container_texts, fill, paragraph_text};
pub use merge::merge;

use docx_rs::{Docx, read_docx};
use tracing::{info, instrument};

use crate::error::{Result, ScheduleError};
use crate::model::{SlotGrid, TeacherEntry, all_slots};
use crate::session::ScheduleState;

/// Parses raw template bytes into a document. Each rendered instance starts
/// from a fresh parse so fills never accumulate across entities.
pub fn parse_template(template: &[u8]) -> Result<Docx> {
    read_docx(template).map_err(|error| ScheduleError::Document(error.to_string()))
}

/// Fills the class template for one class: `{{CLASS}}` plus the subject and
/// teacher-display tokens of every slot. Slots without a timetable entry
/// fill as empty strings.
#[instrument(level = "debug", skip(state, template))]
pub fn render_class(state: &ScheduleState, template: &[u8], class_id: &str) -> Result<Docx> {
    let grid = state
        .class_schedule
        .get(class_id)
        .ok_or_else(|| ScheduleError::UnknownEntity(class_id.to_string()))?;

    let mut docx = parse_template(template)?;
    fill(&mut docx, tokens::CLASS_TOKEN, &FillValue::from(class_id));
    for slot in all_slots() {
        let entry = grid.get(&slot);
        let subject = entry.map(|entry| entry.subject.as_str()).unwrap_or("");
        let teacher = entry
            .map(|entry| entry.teacher_display.as_str())
            .unwrap_or("");
        fill(&mut docx, &tokens::subject_token(slot), &FillValue::from(subject));
        fill(&mut docx, &tokens::teacher_token(slot), &FillValue::from(teacher));
    }
    Ok(docx)
}

/// Fills the teacher template for one roster member: `{{TEACHER}}`, the hour
/// metrics, and the class and subject tokens of every slot. A teacher with
/// no resolved slots renders an empty grid rather than failing.
#[instrument(level = "debug", skip(state, template))]
pub fn render_teacher(state: &ScheduleState, template: &[u8], teacher: &str) -> Result<Docx> {
    if !state.roster.contains(teacher) {
        return Err(ScheduleError::UnknownEntity(teacher.to_string()));
    }
    let empty = SlotGrid::<TeacherEntry>::new();
    let grid = state.teacher_schedule.get(teacher).unwrap_or(&empty);
    let metrics = state.teacher_metrics(teacher);

    let mut docx = parse_template(template)?;
    fill(&mut docx, tokens::TEACHER_TOKEN, &FillValue::from(teacher));
    fill(&mut docx, tokens::BASE_TOKEN, &FillValue::from(metrics.base));
    fill(&mut docx, tokens::TOTAL_TOKEN, &FillValue::from(metrics.total));
    fill(&mut docx, tokens::EXTRA_TOKEN, &FillValue::from(metrics.extra));
    for slot in all_slots() {
        let entry = grid.get(&slot);
        let class_id = entry.map(|entry| entry.class_id.as_str()).unwrap_or("");
        let subject = entry.map(|entry| entry.subject.as_str()).unwrap_or("");
        fill(&mut docx, &tokens::class_token(slot), &FillValue::from(class_id));
        fill(&mut docx, &tokens::subject_token(slot), &FillValue::from(subject));
    }
    Ok(docx)
}

/// Fills one class instance per id and concatenates them in list order.
#[instrument(level = "info", skip(state, template), fields(count = class_ids.len()))]
pub fn render_class_batch(
    state: &ScheduleState,
    template: &[u8],
    class_ids: &[String],
) -> Result<Docx> {
    let mut instances = Vec::with_capacity(class_ids.len());
    for class_id in class_ids {
        instances.push(render_class(state, template, class_id)?);
    }
    info!(count = instances.len(), "class documents filled");
    merge(instances).ok_or(ScheduleError::EmptyBatch)
}

/// Fills one teacher instance per name and concatenates them in list order.
#[instrument(level = "info", skip(state, template), fields(count = teachers.len()))]
pub fn render_teacher_batch(
    state: &ScheduleState,
    template: &[u8],
    teachers: &[String],
) -> Result<Docx> {
    let mut instances = Vec::with_capacity(teachers.len());
    for teacher in teachers {
        instances.push(render_teacher(state, template, teacher)?);
    }
    info!(count = instances.len(), "teacher documents filled");
    merge(instances).ok_or(ScheduleError::EmptyBatch)
}

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::Result;
use crate::model::{DAY_COUNT, PERIOD_COUNT, TimeSlot};
use crate::session::ScheduleState;

const DAY_HEADERS: [&str; DAY_COUNT as usize] = ["週一", "週二", "週三", "週四", "週五"];

/// Writes the reconciled grids as a browsable workbook: one sheet per class
/// and one per teacher, rows = periods 1..=8, columns = weekdays. Class
/// sheets show the subject per slot, teacher sheets "class subject".
pub fn write_preview(path: &Path, state: &ScheduleState) -> Result<()> {
    let mut workbook = Workbook::new();
    let mut sheet_names = SheetNameRegistry::default();

    for (class_id, grid) in &state.class_schedule {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_names.assign(&format!("班級 {class_id}")))?;
        write_grid_frame(worksheet)?;
        for (slot, entry) in grid {
            write_cell(worksheet, *slot, &entry.subject)?;
        }
    }

    for teacher in state.roster.ordered_names() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_names.assign(&format!("教師 {teacher}")))?;
        write_grid_frame(worksheet)?;
        if let Some(grid) = state.teacher_schedule.get(teacher) {
            for (slot, entry) in grid {
                let display = format!("{} {}", entry.class_id, entry.subject);
                write_cell(worksheet, *slot, display.trim())?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_grid_frame(worksheet: &mut Worksheet) -> Result<()> {
    worksheet.write_string(0, 0, "節次")?;
    for (day_idx, header) in DAY_HEADERS.iter().enumerate() {
        worksheet.write_string(0, (day_idx + 1) as u16, *header)?;
    }
    for period in 1..=PERIOD_COUNT {
        worksheet.write_string(period as u32, 0, format!("第 {period} 節"))?;
    }
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, slot: TimeSlot, text: &str) -> Result<()> {
    worksheet.write_string(slot.period as u32, slot.day as u16, text)?;
    Ok(())
}

/// Assigns Excel-safe, unique worksheet names. Sheet names are capped at 31
/// characters and may not contain Excel's reserved punctuation.
#[derive(Debug, Default)]
struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if self.used.insert(base.clone()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let keep = 31usize.saturating_sub(suffix.chars().count());
            let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    let mut sanitized = sanitized.trim().to_string();
    if sanitized.is_empty() {
        sanitized = "Sheet".to_string();
    }

    sanitized.chars().take(31).collect()
}

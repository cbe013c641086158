use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{Result, ScheduleError};
use crate::model::{AssignmentRow, OrderingRow, TimetableRow};

/// Header names required from the assignment table.
pub const ASSIGNMENT_COLUMNS: [&str; 3] = ["班級", "科目", "教師"];

/// Header names required from the timetable table.
pub const TIMETABLE_COLUMNS: [&str; 4] = ["班級", "科目", "星期", "節次"];

/// A fully materialised input table: one header row plus data rows, every
/// cell stringified. Both CSV and spreadsheet sources normalise to this
/// before any per-row logic runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RowTable {
    /// Resolves the position of each required column, failing with
    /// `MissingColumn` on the first absent one.
    pub fn column_positions(&self, table: &str, columns: &[&str]) -> Result<Vec<usize>> {
        columns
            .iter()
            .map(|column| {
                self.headers
                    .iter()
                    .position(|header| header.trim() == *column)
                    .ok_or_else(|| ScheduleError::MissingColumn {
                        table: table.to_string(),
                        column: (*column).to_string(),
                    })
            })
            .collect()
    }
}

fn row_cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Reads a `.csv` or spreadsheet table from disk into memory. The format is
/// chosen by file extension; anything that is not CSV is treated as an xlsx
/// workbook and read from its first worksheet.
pub fn read_table(path: &Path) -> Result<RowTable> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some(extension) if extension.eq_ignore_ascii_case("csv") => read_csv(path),
        _ => read_xlsx(path),
    }
}

fn read_csv(path: &Path) -> Result<RowTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(RowTable { headers, rows })
}

fn read_xlsx(path: &Path) -> Result<RowTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ScheduleError::InvalidWorkbook("workbook has no worksheets".into()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| ScheduleError::InvalidWorkbook(format!("missing sheet '{sheet}'")))?
        .map_err(ScheduleError::from)?;

    let mut row_iter = range.rows();
    let headers: Vec<String> = match row_iter.next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_string(Some(cell)))
            .collect(),
        None => Vec::new(),
    };
    let rows = row_iter
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .collect();

    Ok(RowTable { headers, rows })
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Parses the assignment table into typed rows, validating required columns
/// once up front.
pub fn parse_assignment_rows(table: &RowTable) -> Result<Vec<AssignmentRow>> {
    let positions = table.column_positions("assignment", &ASSIGNMENT_COLUMNS)?;
    let rows = table
        .rows
        .iter()
        .map(|row| AssignmentRow {
            class_id: row_cell(row, positions[0]).trim().to_string(),
            subject: row_cell(row, positions[1]).trim().to_string(),
            teacher_field: row_cell(row, positions[2]).trim().to_string(),
        })
        .collect();
    Ok(rows)
}

/// Parses the timetable table into typed rows, validating required columns
/// once up front. The period field is kept verbatim; digit extraction is the
/// resolver's concern.
pub fn parse_timetable_rows(table: &RowTable) -> Result<Vec<TimetableRow>> {
    let positions = table.column_positions("timetable", &TIMETABLE_COLUMNS)?;
    let rows = table
        .rows
        .iter()
        .map(|row| TimetableRow {
            class_id: row_cell(row, positions[0]).trim().to_string(),
            subject: row_cell(row, positions[1]).trim().to_string(),
            weekday: row_cell(row, positions[2]).trim().to_string(),
            period: row_cell(row, positions[3]).to_string(),
        })
        .collect();
    Ok(rows)
}

/// Parses the ordering table positionally: column 0 is the teacher name,
/// column 1 the hours value. Rows with an empty name are skipped.
pub fn parse_ordering_rows(table: &RowTable) -> Vec<OrderingRow> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let teacher = row.first().map(|cell| cell.trim()).unwrap_or("");
            if teacher.is_empty() {
                return None;
            }
            Some(OrderingRow {
                teacher: teacher.to_string(),
                hours_field: row.get(1).cloned().unwrap_or_default(),
            })
        })
        .collect()
}

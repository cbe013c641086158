use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests, reconciles, or renders schedule data.
///
/// Only fatal conditions surface here. Unresolved teachers degrade to the
/// unknown-teacher sentinel and malformed weekday/period rows are dropped
/// silently; neither ever aborts a run.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the CSV reader implementation.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when JSON serialization of the roster listing fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a required column is absent from an input table, before
    /// any per-row logic runs.
    #[error("missing column '{column}' in {table} table")]
    MissingColumn { table: String, column: String },

    /// Raised when a workbook does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a required document template is unavailable. Fatal only
    /// to the rendering step; reconciled schedule state remains valid.
    #[error("template not found: {0}")]
    MissingTemplate(PathBuf),

    /// Raised when a DOCX document cannot be parsed or packed.
    #[error("document error: {0}")]
    Document(String),

    /// Raised when rendering is requested for a class or teacher the
    /// reconciled schedule does not know about.
    #[error("no schedule data for '{0}'")]
    UnknownEntity(String),

    /// Raised when a batch render is invoked with an empty entity list.
    #[error("no entities selected for batch rendering")]
    EmptyBatch,

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

use std::fs;
use std::path::Path;

use docx_rs::Docx;

use crate::error::{Result, ScheduleError};

/// Loads a template file as raw bytes. The bytes are re-parsed per filled
/// instance, so the template on disk stays pristine across a batch. A
/// missing file is fatal to rendering only.
pub fn load_template(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(ScheduleError::MissingTemplate(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Packs a filled or merged document to disk.
pub fn save_document(mut docx: Docx, path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    docx.build()
        .pack(file)
        .map_err(|error| ScheduleError::Document(error.to_string()))?;
    Ok(())
}

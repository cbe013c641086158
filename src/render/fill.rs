use docx_rs::{
    Docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild, Text,
};

/// A substitution value with fixed coercion rules: numbers render as their
/// truncated integer string, blank or missing values as the empty string —
/// never the textual form of a missing-value marker.
#[derive(Debug, Clone, PartialEq)]
pub enum FillValue {
    Integer(i64),
    Text(String),
    Empty,
}

impl FillValue {
    /// The string written into the document in place of the token.
    pub fn render(&self) -> String {
        match self {
            FillValue::Integer(value) => value.to_string(),
            FillValue::Text(value) if value.trim().is_empty() => String::new(),
            FillValue::Text(value) => value.clone(),
            FillValue::Empty => String::new(),
        }
    }
}

impl From<i64> for FillValue {
    fn from(value: i64) -> Self {
        FillValue::Integer(value)
    }
}

impl From<i32> for FillValue {
    fn from(value: i32) -> Self {
        FillValue::Integer(i64::from(value))
    }
}

impl From<f64> for FillValue {
    fn from(value: f64) -> Self {
        FillValue::Integer(value as i64)
    }
}

impl From<&str> for FillValue {
    fn from(value: &str) -> Self {
        FillValue::Text(value.to_string())
    }
}

impl From<String> for FillValue {
    fn from(value: String) -> Self {
        FillValue::Text(value)
    }
}

/// Replaces every literal occurrence of `token` across all text-bearing
/// containers of the document: every top-level paragraph and every paragraph
/// of every table cell (one level of nesting).
///
/// A token is matched only within a single container, never across container
/// boundaries. Matching containers collapse to the first run's formatting:
/// the combined replaced text is written into the first run and the text of
/// every other run is cleared. This is an accepted, explicit loss of
/// intra-container formatting diversity.
pub fn fill(docx: &mut Docx, token: &str, value: &FillValue) {
    let replacement = value.render();
    for child in docx.document.children.iter_mut() {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                fill_paragraph(paragraph.as_mut(), token, &replacement);
            }
            DocumentChild::Table(table) => fill_table(table.as_mut(), token, &replacement),
            _ => {}
        }
    }
}

fn fill_table(table: &mut Table, token: &str, replacement: &str) {
    for row in table.rows.iter_mut() {
        let TableChild::TableRow(row) = row;
        for cell in row.cells.iter_mut() {
            let TableRowChild::TableCell(cell) = cell;
            for content in cell.children.iter_mut() {
                if let TableCellContent::Paragraph(paragraph) = content {
                    fill_paragraph(paragraph, token, replacement);
                }
            }
        }
    }
}

fn fill_paragraph(paragraph: &mut Paragraph, token: &str, replacement: &str) {
    let combined = paragraph_text(paragraph);
    if !combined.contains(token) {
        return;
    }
    let updated = combined.replace(token, replacement);

    let mut first = true;
    for child in paragraph.children.iter_mut() {
        if let ParagraphChild::Run(run) = child {
            if first {
                run.children = vec![RunChild::Text(Text::new(updated.as_str()))];
                first = false;
            } else {
                run.children
                    .retain(|content| !matches!(content, RunChild::Text(_)));
            }
        }
    }
}

/// Concatenated text of every run in the paragraph, the string token
/// matching operates on.
pub fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for content in &run.children {
                if let RunChild::Text(fragment) = content {
                    text.push_str(&fragment.text);
                }
            }
        }
    }
    text
}

/// Text of every text-bearing container in document order: top-level
/// paragraphs first within their position, table cell paragraphs as the
/// table is reached.
pub fn container_texts(docx: &Docx) -> Vec<String> {
    let mut texts = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => texts.push(paragraph_text(paragraph.as_ref())),
            DocumentChild::Table(table) => {
                for row in &table.rows {
                    let TableChild::TableRow(row) = row;
                    for cell in &row.cells {
                        let TableRowChild::TableCell(cell) = cell;
                        for content in &cell.children {
                            if let TableCellContent::Paragraph(paragraph) = content {
                                texts.push(paragraph_text(paragraph));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    texts
}

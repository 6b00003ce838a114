//! Document extraction: turns an uploaded PDF or Word document into plain text.
//!
//! Both parsers are synchronous and CPU-bound; async callers run them on the
//! blocking pool.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("Error reading DOCX: {0}")]
    Docx(String),
}

/// The two document families the extractor understands.
/// `.doc` is routed through the DOCX reader; legacy binary files fail there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a file name's extension (case-insensitive).
    pub fn from_filename(name: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") | Some("doc") => Ok(DocumentFormat::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(name.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// Extracts raw text from the document at `path`.
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, ExtractionError> {
    info!("Processing file: {}", path.display());

    let text = match format {
        DocumentFormat::Pdf => extract_pdf(path)?,
        DocumentFormat::Docx => extract_docx(path)?,
    };

    info!("Extracted text length: {} characters", text.chars().count());
    Ok(text)
}

/// Page texts joined in page order, each followed by a newline.
fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
    // Opening the file ourselves gives a clean I/O error for missing files.
    std::fs::metadata(path)?;

    // pdf-extract panics on some malformed streams instead of returning Err.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path))
        .map_err(|_| ExtractionError::Pdf("document could not be parsed".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for (index, page) in pages.iter().enumerate() {
        debug!("Page {}: {} characters", index + 1, page.chars().count());
        text.push_str(page);
        text.push('\n');
    }
    Ok(text)
}

/// Paragraph text in document order, then every table cell, space separated.
fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let docx = docx_rs::read_docx(&bytes).map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

    let mut text = String::new();
    let mut cells = Vec::new();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => {
                text.push_str(&paragraph_text(para));
                text.push('\n');
            }
            DocumentChild::Table(table) => cells.extend(table_cell_texts(table)),
            _ => {}
        }
    }

    for cell in cells {
        text.push_str(&cell);
        text.push(' ');
    }
    Ok(text)
}

/// Concatenates every text run of a paragraph, including runs inside hyperlinks.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts = String::new();
    push_run_text(&para.children, &mut parts);
    parts
}

fn push_run_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    if let RunChild::Text(t) = rc {
                        out.push_str(&t.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_run_text(&link.children, out),
            _ => {}
        }
    }
}

/// Cell texts in row-major order; a cell's paragraphs are newline-joined.
fn table_cell_texts(table: &docx_rs::Table) -> Vec<String> {
    let mut cells = Vec::new();
    for row_child in &table.rows {
        let TableChild::TableRow(row) = row_child;
        for cell_child in &row.cells {
            let TableRowChild::TableCell(cell) = cell_child;
            let paragraphs: Vec<String> = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    TableCellContent::Paragraph(para) => Some(paragraph_text(para)),
                    _ => None,
                })
                .collect();
            cells.push(paragraphs.join("\n"));
        }
    }
    cells
}

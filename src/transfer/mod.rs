//! Import and export of the node store as `.json` or `.csv` files.
//!
//! Exports render to an [`ExportedFile`] that callers hand to the user as a
//! download (or write with [`write_export`]). Imports go through a single
//! validation pass: either every node in the file is valid and the whole list
//! is returned, or an [`ImportError`] describes the first offending node and
//! nothing is returned.

use crate::error::{ExportError, ImportError};
use crate::model::{Priority, WorkflowNode};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

mod csv;
mod json;

/// Version written into JSON exports.
pub const FORMAT_VERSION: &str = "1.0";

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// Resolves the format from a file name's extension, ignoring case.
    pub fn from_file_name(file_name: &str) -> Result<Self, ImportError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(ExportFormat::Json),
            Some("csv") => Ok(ExportFormat::Csv),
            _ => Err(ImportError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rendered export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Renders `nodes` in the requested format. Empty node lists and nodes with
/// non-finite coordinates are rejected.
pub fn export_to_file(
    nodes: &[WorkflowNode],
    format: ExportFormat,
    name: &str,
) -> Result<ExportedFile, ExportError> {
    if nodes.is_empty() {
        tracing::warn!(%format, "export rejected: workflow is empty");
        return Err(ExportError::EmptyWorkflow);
    }
    if let Some(node) = nodes.iter().find(|n| !n.position.is_finite()) {
        return Err(ExportError::Serialization(format!(
            "node '{}' has a non-finite position ({}, {})",
            node.id, node.position.x, node.position.y
        )));
    }

    let contents = match format {
        ExportFormat::Json => json::write_document(nodes, name)?,
        ExportFormat::Csv => csv::write_table(nodes),
    };
    tracing::debug!(%format, nodes = nodes.len(), "workflow exported");

    Ok(ExportedFile {
        file_name: format!("{}.{}", sanitize_file_stem(name), format.extension()),
        mime_type: format.mime_type(),
        contents,
    })
}

/// Writes a rendered export into `dir`, returning the full path.
pub fn write_export(file: &ExportedFile, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(&file.file_name);
    fs::write(&path, &file.contents).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(path)
}

/// Reads and validates a workflow file from disk.
pub fn import_from_file(path: &Path) -> Result<Vec<WorkflowNode>, ImportError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    // Check the extension before touching the file.
    ExportFormat::from_file_name(&file_name)?;
    let text = fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    import_from_str(&file_name, &text)
}

/// Parses and validates file contents, dispatching on the file name's extension.
pub fn import_from_str(file_name: &str, text: &str) -> Result<Vec<WorkflowNode>, ImportError> {
    let format = ExportFormat::from_file_name(file_name)?;
    let result = match format {
        ExportFormat::Json => json::read_document(text),
        ExportFormat::Csv => csv::read_table(text),
    };
    match &result {
        Ok(nodes) => tracing::debug!(%format, nodes = nodes.len(), "workflow file parsed"),
        Err(e) => tracing::warn!(%format, file = file_name, "import rejected: {}", e),
    }
    result
}

/// Prints whole coordinates without a fractional part.
pub(crate) fn format_coordinate(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn parse_priority(index: usize, raw: &str) -> Result<Priority, ImportError> {
    raw.parse().map_err(|message| ImportError::InvalidField {
        index,
        field: "priority".to_string(),
        message,
    })
}

fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if stem.is_empty() {
        "workflow".to_string()
    } else {
        stem
    }
}

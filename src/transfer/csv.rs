use super::{format_coordinate, parse_priority};
use crate::error::ImportError;
use crate::model::{Position, WorkflowNode};
use itertools::Itertools;

const HEADER: [&str; 5] = ["label", "subtitle", "x", "y", "priority"];

pub(super) fn write_table(nodes: &[WorkflowNode]) -> String {
    let header = HEADER.join(",");
    let rows = nodes.iter().map(|node| {
        [
            escape(&node.label),
            escape(node.subtitle.as_deref().unwrap_or_default()),
            format_coordinate(node.position.x),
            format_coordinate(node.position.y),
            node.priority.to_string(),
        ]
        .join(",")
    });
    std::iter::once(header).chain(rows).join("\n")
}

/// Column positions resolved from the header row.
struct Columns {
    label: usize,
    subtitle: Option<usize>,
    x: usize,
    y: usize,
    priority: usize,
    width: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, ImportError> {
        let names: Vec<String> = header
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_ascii_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                ImportError::Malformed(format!("CSV header is missing the '{}' column", name))
            })
        };

        Ok(Self {
            label: require("label")?,
            subtitle: find("subtitle"),
            x: require("x")?,
            y: require("y")?,
            priority: require("priority")?,
            width: names.len(),
        })
    }
}

pub(super) fn read_table(text: &str) -> Result<Vec<WorkflowNode>, ImportError> {
    let mut records = parse_records(text)?.into_iter();
    let header = records
        .next()
        .ok_or_else(|| ImportError::Malformed("CSV file is empty".to_string()))?;
    let columns = Columns::from_header(&header)?;

    records
        .enumerate()
        .map(|(index, record)| read_row(index, &record, &columns))
        .collect()
}

fn read_row(index: usize, record: &[String], columns: &Columns) -> Result<WorkflowNode, ImportError> {
    if record.len() != columns.width {
        return Err(ImportError::Malformed(format!(
            "row {} has {} fields, expected {}",
            index + 1,
            record.len(),
            columns.width
        )));
    }

    // Text cells keep their surrounding whitespace; numeric and priority cells are trimmed.
    let text = |column: usize| record[column].as_str();
    let required = |column: usize, field: &str| {
        let value = text(column);
        if value.trim().is_empty() {
            Err(ImportError::MissingField {
                index,
                field: field.to_string(),
            })
        } else {
            Ok(value)
        }
    };
    let coordinate = |column: usize, field: &str| -> Result<f64, ImportError> {
        let raw = required(column, field)?.trim();
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ImportError::InvalidField {
                index,
                field: field.to_string(),
                message: format!("'{}' is not a number", raw),
            })
    };

    let label = required(columns.label, "label")?;
    let x = coordinate(columns.x, "x")?;
    let y = coordinate(columns.y, "y")?;
    let priority = parse_priority(index, required(columns.priority, "priority")?.trim())?;

    let mut node = WorkflowNode::new(label, Position::new(x, y), priority);
    node.subtitle = columns
        .subtitle
        .map(text)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);
    Ok(node)
}

fn escape(field: &str) -> String {
    let padded = field.starts_with(char::is_whitespace) || field.ends_with(char::is_whitespace);
    if padded || field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits CSV text into records, honouring quoted fields. Blank lines are skipped.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>, ImportError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ImportError::Malformed(
            "unterminated quoted field".to_string(),
        ));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }
    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}

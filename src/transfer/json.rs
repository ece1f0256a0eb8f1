use super::{FORMAT_VERSION, parse_priority};
use crate::error::{ExportError, ImportError};
use crate::model::{DepartmentType, NodeId, NodeKind, Position, Priority, WorkflowNode};
use ahash::AHashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
struct ExportDocument<'a> {
    version: &'a str,
    metadata: ExportMetadata<'a>,
    nodes: Vec<NodeRecord<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportMetadata<'a> {
    created_at: DateTime<Utc>,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord<'a> {
    id: &'a str,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<&'a str>,
    x: f64,
    y: f64,
    priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    kind: KindRecord,
}

/// File representation of [`NodeKind`].
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KindRecord {
    Network {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
    },
    Hospital {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        beds: Option<u32>,
    },
    Department {
        #[serde(default)]
        department: DepartmentType,
    },
}

impl From<&NodeKind> for KindRecord {
    fn from(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Network { region } => KindRecord::Network {
                region: region.clone(),
            },
            NodeKind::Hospital { beds } => KindRecord::Hospital { beds: *beds },
            NodeKind::Department { department } => KindRecord::Department {
                department: *department,
            },
        }
    }
}

impl From<KindRecord> for NodeKind {
    fn from(record: KindRecord) -> Self {
        match record {
            KindRecord::Network { region } => NodeKind::Network { region },
            KindRecord::Hospital { beds } => NodeKind::Hospital { beds },
            KindRecord::Department { department } => NodeKind::Department { department },
        }
    }
}

pub(super) fn write_document(nodes: &[WorkflowNode], name: &str) -> Result<String, ExportError> {
    let document = ExportDocument {
        version: FORMAT_VERSION,
        metadata: ExportMetadata {
            created_at: Utc::now(),
            name,
        },
        nodes: nodes
            .iter()
            .map(|node| NodeRecord {
                id: node.id.as_str(),
                label: &node.label,
                subtitle: node.subtitle.as_deref(),
                x: node.position.x,
                y: node.position.y,
                priority: node.priority,
                color: node.color.as_deref(),
                icon: node.icon.as_deref(),
                parent_id: node.parent_id.as_ref().map(NodeId::as_str),
                description: node.description.as_deref(),
                kind: KindRecord::from(&node.kind),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&document).map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Accepts an export document or a bare array of nodes.
pub(super) fn read_document(text: &str) -> Result<Vec<WorkflowNode>, ImportError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ImportError::Malformed(format!("invalid JSON: {}", e)))?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(document) => document
            .get("nodes")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ImportError::Malformed("JSON document has no 'nodes' array".to_string())
            })?,
        _ => {
            return Err(ImportError::Malformed(
                "expected a JSON object or array".to_string(),
            ));
        }
    };

    let mut seen_ids = AHashSet::new();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<WorkflowNode, ImportError> {
            let fields = item.as_object().ok_or_else(|| ImportError::InvalidField {
                index,
                field: "node".to_string(),
                message: "expected an object".to_string(),
            })?;
            let mut node = read_node(index, fields)?;
            if !seen_ids.insert(node.id.clone()) {
                tracing::warn!(index, id = %node.id, "duplicate node id in import, assigning a new one");
                node.id = NodeId::generate();
                seen_ids.insert(node.id.clone());
            }
            Ok(node)
        })
        .collect()
}

fn read_node(index: usize, fields: &Map<String, Value>) -> Result<WorkflowNode, ImportError> {
    let label = optional_string(index, fields, "label")?.ok_or_else(|| missing(index, "label"))?;
    let x = number(index, fields, "x")?;
    let y = number(index, fields, "y")?;
    let priority = match fields.get("priority") {
        None | Some(Value::Null) => return Err(missing(index, "priority")),
        Some(Value::String(raw)) => parse_priority(index, raw)?,
        Some(other) => return Err(invalid(index, "priority", format!("expected a string, found {}", other))),
    };

    let id = optional_string(index, fields, "id")?
        .map(NodeId::from)
        .unwrap_or_else(NodeId::generate);
    let kind = match fields.get("kind") {
        None | Some(Value::Null) => NodeKind::default(),
        Some(raw) => serde_json::from_value::<KindRecord>(raw.clone())
            .map(NodeKind::from)
            .map_err(|e| invalid(index, "kind", e.to_string()))?,
    };

    Ok(WorkflowNode {
        id,
        label,
        subtitle: optional_string(index, fields, "subtitle")?,
        position: Position::new(x, y),
        priority,
        color: optional_string(index, fields, "color")?,
        icon: optional_string(index, fields, "icon")?,
        parent_id: optional_string(index, fields, "parentId")?.map(NodeId::from),
        description: optional_string(index, fields, "description")?,
        kind,
    })
}

/// Blank strings count as absent.
fn optional_string(
    index: usize,
    fields: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ImportError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(index, key, format!("expected a string, found {}", other))),
    }
}

fn number(index: usize, fields: &Map<String, Value>, key: &str) -> Result<f64, ImportError> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(missing(index, key)),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid(index, key, format!("{} is out of range", n))),
        Some(other) => Err(invalid(index, key, format!("expected a number, found {}", other))),
    }
}

fn missing(index: usize, field: &str) -> ImportError {
    ImportError::MissingField {
        index,
        field: field.to_string(),
    }
}

fn invalid(index: usize, field: &str, message: String) -> ImportError {
    ImportError::InvalidField {
        index,
        field: field.to_string(),
        message,
    }
}

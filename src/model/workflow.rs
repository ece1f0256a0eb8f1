use super::node::WorkflowNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named snapshot of the node store, taken on an explicit save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkflow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub nodes: Vec<WorkflowNode>,
    pub created_at: DateTime<Utc>,
}

impl SavedWorkflow {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        nodes: Vec<WorkflowNode>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            nodes,
            created_at: Utc::now(),
        }
    }
}

/// Approval recorded through the authorization dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    pub approver: String,
    pub authorized_at: DateTime<Utc>,
}

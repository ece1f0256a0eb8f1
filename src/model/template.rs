use super::node::WorkflowNode;
use serde::{Deserialize, Serialize};

/// Service-level targets attached to a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaSettings {
    pub response_minutes: u32,
    pub escalation_minutes: u32,
    pub escalation_contact: Option<String>,
}

/// An alternative route taken when a step cannot complete normally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionFlow {
    pub name: String,
    pub trigger: String,
    /// Label of the node the flow diverts to.
    pub target_node: String,
}

/// Read-only seed used to start a new workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub base_nodes: Vec<WorkflowNode>,
    pub sla_settings: Option<SlaSettings>,
    pub exception_flows: Vec<ExceptionFlow>,
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a node on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Priority of a workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "unknown priority '{}', expected low, medium or high",
                other
            )),
        }
    }
}

/// Canvas coordinates of a node's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Hospital departments that can be dropped onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentType {
    Reception,
    Triage,
    Emergency,
    Surgery,
    Icu,
    Ward,
    Laboratory,
    Radiology,
    Pharmacy,
    Discharge,
    #[default]
    General,
}

impl DepartmentType {
    pub const ALL: [DepartmentType; 11] = [
        DepartmentType::Reception,
        DepartmentType::Triage,
        DepartmentType::Emergency,
        DepartmentType::Surgery,
        DepartmentType::Icu,
        DepartmentType::Ward,
        DepartmentType::Laboratory,
        DepartmentType::Radiology,
        DepartmentType::Pharmacy,
        DepartmentType::Discharge,
        DepartmentType::General,
    ];

    /// Default label shown when the department is first dropped.
    pub fn default_label(&self) -> &'static str {
        match self {
            DepartmentType::Reception => "Reception",
            DepartmentType::Triage => "Triage",
            DepartmentType::Emergency => "Emergency",
            DepartmentType::Surgery => "Surgery",
            DepartmentType::Icu => "Intensive Care",
            DepartmentType::Ward => "Ward",
            DepartmentType::Laboratory => "Laboratory",
            DepartmentType::Radiology => "Radiology",
            DepartmentType::Pharmacy => "Pharmacy",
            DepartmentType::Discharge => "Discharge",
            DepartmentType::General => "Department",
        }
    }

    /// Default node colour for the department.
    pub fn default_color(&self) -> &'static str {
        match self {
            DepartmentType::Reception => "#3b82f6",
            DepartmentType::Triage => "#f59e0b",
            DepartmentType::Emergency => "#ef4444",
            DepartmentType::Surgery => "#8b5cf6",
            DepartmentType::Icu => "#dc2626",
            DepartmentType::Ward => "#10b981",
            DepartmentType::Laboratory => "#06b6d4",
            DepartmentType::Radiology => "#6366f1",
            DepartmentType::Pharmacy => "#84cc16",
            DepartmentType::Discharge => "#64748b",
            DepartmentType::General => "#94a3b8",
        }
    }
}

/// What a node stands for. Kind-specific data lives in the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Network { region: Option<String> },
    Hospital { beds: Option<u32> },
    Department { department: DepartmentType },
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Department {
            department: DepartmentType::General,
        }
    }
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Network { .. } => "network",
            NodeKind::Hospital { .. } => "hospital",
            NodeKind::Department { .. } => "department",
        }
    }
}

/// A single step on the workflow canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: NodeId,
    pub label: String,
    pub subtitle: Option<String>,
    pub position: Position,
    pub priority: Priority,
    pub color: Option<String>,
    pub icon: Option<String>,
    /// Weak reference: the parent may have been deleted since.
    pub parent_id: Option<NodeId>,
    pub description: Option<String>,
    pub kind: NodeKind,
}

impl WorkflowNode {
    /// Creates a node with a freshly generated id.
    pub fn new(label: impl Into<String>, position: Position, priority: Priority) -> Self {
        Self::with_id(NodeId::generate(), label, position, priority)
    }

    pub fn with_id(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        position: Position,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            subtitle: None,
            position,
            priority,
            color: None,
            icon: None,
            parent_id: None,
            description: None,
            kind: NodeKind::default(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builds the node dropped onto the canvas for a department type.
    pub fn for_department(department: DepartmentType, position: Position) -> Self {
        Self::new(department.default_label(), position, Priority::Medium)
            .color(department.default_color())
            .kind(NodeKind::Department { department })
    }
}

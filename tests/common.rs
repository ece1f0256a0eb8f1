//! Common test utilities for building node lists and sessions.
use careflow::prelude::*;

/// The single reception node used in the CSV example.
///
/// `[{id:"n1", label:"Recepção", x:10, y:10, priority:"high"}]`
#[allow(dead_code)]
pub fn reception_node() -> WorkflowNode {
    WorkflowNode::with_id("n1", "Recepção", Position::new(10.0, 10.0), Priority::High)
}

/// Three unrelated nodes laid out in a row.
#[allow(dead_code)]
pub fn three_nodes() -> Vec<WorkflowNode> {
    vec![
        WorkflowNode::with_id("a", "Reception", Position::new(0.0, 0.0), Priority::Low)
            .subtitle("Front desk"),
        WorkflowNode::with_id("b", "Triage", Position::new(200.0, 0.0), Priority::High)
            .color("#f59e0b")
            .kind(NodeKind::Department {
                department: DepartmentType::Triage,
            }),
        WorkflowNode::with_id("c", "Ward 3", Position::new(400.5, 80.25), Priority::Medium)
            .parent(NodeId::from("b"))
            .description("Post-triage admission"),
    ]
}

/// A session whose store holds `three_nodes()` and whose canvas sits at (100, 50).
#[allow(dead_code)]
pub fn session_with_nodes() -> EditorSession {
    let mut session = EditorSession::builder().build();
    for node in three_nodes() {
        session.add_node(node).expect("Failed to add node");
    }
    session.set_canvas(CanvasRect::new(100.0, 50.0, 1600.0, 900.0));
    session
}

#[allow(dead_code)]
pub const CSV_WITHOUT_PRIORITY: &str = "label,subtitle,x,y\nReception,,10,10\nTriage,,200,10";

#[allow(dead_code)]
pub const JSON_MISSING_Y: &str = r#"{
  "version": "1.0",
  "metadata": { "createdAt": "2024-05-01T10:00:00Z", "name": "broken" },
  "nodes": [
    { "id": "a", "label": "Reception", "x": 10, "y": 10, "priority": "low" },
    { "id": "b", "label": "Triage", "x": 200, "priority": "high" }
  ]
}"#;

use super::drag::PointerEvent;
use super::modal::ModalKind;
use crate::model::{DepartmentType, NodeId, Position};

/// Which dialog to open, with the entity it acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalRequest {
    EditNode(NodeId),
    DeleteNode(NodeId),
    DeleteWorkflow(String),
    CancelWorkflow,
    SaveWorkflow,
    Authorization,
}

/// A user interaction routed into the session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    DropDepartment {
        department: DepartmentType,
        position: Position,
    },
    AddSubNode {
        parent: NodeId,
        label: String,
    },
    PointerDown {
        pointer: PointerEvent,
        node: NodeId,
    },
    PointerMove(PointerEvent),
    PointerUp,
    OpenModal(ModalRequest),
    UpdateEditDraft {
        label: String,
        subtitle: Option<String>,
    },
    UpdateSaveDraft {
        name: String,
        description: String,
    },
    UpdateAuthorizationDraft {
        approver: String,
    },
    ConfirmModal(ModalKind),
    CancelModal(ModalKind),
    SelectTemplate(String),
    LoadSavedWorkflow(String),
    Import {
        file_name: String,
        contents: String,
    },
}

/// What an event changed.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    NodeAdded(NodeId),
    NodeMoved { node: NodeId, position: Position },
    NodeUpdated(NodeId),
    /// `None` when the node was already gone.
    NodeRemoved(Option<NodeId>),
    WorkflowSaved(String),
    WorkflowDeleted(String),
    WorkflowLoaded(String),
    WorkflowCleared,
    Authorized(String),
    TemplateLoaded(String),
    Imported(usize),
    Unchanged,
}

use crate::error::ModalError;
use crate::model::NodeId;
use std::fmt;

/// The dialogs that gate mutations of the editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    EditNode,
    DeleteNode,
    DeleteWorkflow,
    CancelWorkflow,
    SaveWorkflow,
    Authorization,
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModalKind::EditNode => "edit node",
            ModalKind::DeleteNode => "delete node",
            ModalKind::DeleteWorkflow => "delete workflow",
            ModalKind::CancelWorkflow => "cancel workflow",
            ModalKind::SaveWorkflow => "save workflow",
            ModalKind::Authorization => "authorization",
        };
        f.write_str(name)
    }
}

/// A dialog is either closed or open on a target.
///
/// `T` is whatever the dialog works on: a node id, a draft of text inputs,
/// or `()` when there is nothing to carry.
#[derive(Debug, Clone)]
pub struct Modal<T> {
    kind: ModalKind,
    target: Option<T>,
}

impl<T> Modal<T> {
    pub fn new(kind: ModalKind) -> Self {
        Self { kind, target: None }
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Mutable access for dialogs with text inputs.
    pub fn target_mut(&mut self) -> Result<&mut T, ModalError> {
        self.target.as_mut().ok_or(ModalError::NotOpen(self.kind))
    }

    /// `closed -> open`.
    pub fn open(&mut self, target: T) -> Result<(), ModalError> {
        if self.target.is_some() {
            return Err(ModalError::AlreadyOpen(self.kind));
        }
        self.target = Some(target);
        tracing::debug!(modal = %self.kind, "modal opened");
        Ok(())
    }

    /// `open -> closed`, handing the target to the caller's confirm action.
    pub fn confirm(&mut self) -> Result<T, ModalError> {
        let target = self.target.take().ok_or(ModalError::NotOpen(self.kind))?;
        tracing::debug!(modal = %self.kind, "modal confirmed");
        Ok(target)
    }

    /// `open -> closed` without acting. Returns whether the dialog was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.target.take().is_some();
        if was_open {
            tracing::debug!(modal = %self.kind, "modal cancelled");
        }
        was_open
    }
}

/// Text inputs of the edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub node_id: NodeId,
    pub label: String,
    pub subtitle: Option<String>,
}

/// Text inputs of the save dialog. An empty name is accepted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SaveDraft {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthorizationDraft {
    pub approver: String,
}

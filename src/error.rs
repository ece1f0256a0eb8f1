use crate::editor::ModalKind;
use thiserror::Error;

/// Errors raised while building an export file from the node store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("Cannot export an empty workflow: add at least one node first")]
    EmptyWorkflow,

    #[error("Failed to serialize workflow: {0}")]
    Serialization(String),

    #[error("Could not write export file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors raised while reading a user-supplied workflow file.
///
/// Every variant aborts the import as a whole; nothing is applied to the
/// node store when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Unsupported file type '{0}': expected a .json or .csv file")]
    UnsupportedFormat(String),

    #[error("Malformed file: {0}")]
    Malformed(String),

    #[error("Node {index} is missing required field '{field}'")]
    MissingField { index: usize, field: String },

    #[error("Node {index} has an invalid value for '{field}': {message}")]
    InvalidField {
        index: usize,
        field: String,
        message: String,
    },

    #[error("Could not read import file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors raised by the drag controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragError {
    #[error("Node '{active}' is already being dragged")]
    AlreadyDragging { active: String },

    #[error("Cannot drag node '{0}': it is not on the canvas")]
    NodeNotFound(String),
}

/// Errors raised by modal dialogs when an action does not fit their state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModalError {
    #[error("The {0} dialog is already open")]
    AlreadyOpen(ModalKind),

    #[error("The {0} dialog is not open")]
    NotOpen(ModalKind),
}

/// Errors raised by the single-editor collaboration policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaborationError {
    #[error("Invite code '{0}' does not match this session")]
    InvalidInviteCode(String),

    #[error("'{0}' may view this workflow but only the owner can edit it")]
    ReadOnly(String),
}

/// Errors surfaced by the editor session. Each one is scoped to the action
/// that triggered it; the session stays usable afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("A node with id '{0}' already exists")]
    DuplicateNode(String),

    #[error("Saved workflow '{0}' not found")]
    WorkflowNotFound(String),

    #[error(transparent)]
    Drag(#[from] DragError),

    #[error(transparent)]
    Modal(#[from] ModalError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Collaboration(#[from] CollaborationError),
}

/// Errors raised when persisting or loading the saved-workflow library.
#[derive(Error, Debug, Clone)]
pub enum LibraryError {
    #[error("Could not access library file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to encode workflow library: {0}")]
    Encode(String),

    #[error("Library data is corrupt or from an incompatible version: {0}")]
    Decode(String),
}

/// Errors raised while loading editor configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

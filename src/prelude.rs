//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the careflow crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use careflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut session = EditorSession::builder().build();
//! session.import_file(Path::new("path/to/workflow.csv"))?;
//!
//! let file = session.export(ExportFormat::Json)?;
//! std::fs::write(&file.file_name, &file.contents)?;
//! # Ok(())
//! # }
//! ```

// Session and controllers
pub use crate::editor::{
    CanvasRect, DragController, EditorEvent, EditorOutcome, EditorSession, Modal, ModalKind,
    ModalRequest, PointerEvent,
};
pub use crate::store::NodeStore;

// Data model
pub use crate::model::{
    DepartmentType, NodeId, NodeKind, Position, Priority, SavedWorkflow, WorkflowNode,
    WorkflowTemplate,
};

// Files, templates and persistence
pub use crate::config::EditorConfig;
pub use crate::library::WorkflowLibrary;
pub use crate::template::TemplateCatalog;
pub use crate::transfer::{ExportFormat, ExportedFile, export_to_file, import_from_file};

// Error types
pub use crate::error::{DragError, EditorError, ExportError, ImportError, ModalError};

// Standard library re-exports commonly used with this crate
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

//! # Careflow - Hospital Workflow Editor Core
//!
//! **Careflow** holds the state behind a visual editor for hospital-network
//! workflows: the nodes on the canvas, the pointer drag that moves them, the
//! confirmation dialogs that gate every destructive change, templates that
//! seed a new workflow and the `.json`/`.csv` files users exchange.
//!
//! ## Core Workflow
//!
//! 1.  **Open a session**: `EditorSession::builder()` picks the configuration,
//!     template catalog and saved-workflow library.
//! 2.  **Seed the canvas**: select a template, import a file or drop
//!     department nodes onto the canvas.
//! 3.  **Edit**: drag nodes, edit their text, delete them. Each change goes
//!     through a drag controller or a dialog and either applies fully or not
//!     at all.
//! 4.  **Keep the result**: save a named snapshot into the library or export
//!     the nodes as a file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use careflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut session = EditorSession::builder().build();
//!
//!     // Start from the emergency care template.
//!     session.select_template_by_id("emergency-care")?;
//!
//!     // Drag the first node 40px to the right.
//!     let first = session.nodes()[0].id.clone();
//!     let start = session.nodes()[0].position;
//!     session.start_drag(PointerEvent::new(start.x + 5.0, start.y + 5.0), &first)?;
//!     session.drag_to(PointerEvent::new(start.x + 45.0, start.y + 5.0));
//!     session.stop_drag();
//!
//!     // Save it under a name and export as CSV.
//!     session.open_save_workflow()?;
//!     session.save_draft_mut()?.name = "Night shift ER".to_string();
//!     session.confirm_save_workflow()?;
//!
//!     let file = session.export(ExportFormat::Csv)?;
//!     println!("{}:\n{}", file.file_name, file.contents);
//!     Ok(())
//! }
//! ```

pub mod collab;
pub mod config;
pub mod editor;
pub mod error;
pub mod library;
pub mod metrics;
pub mod model;
pub mod prelude;
pub mod store;
pub mod template;
pub mod transfer;

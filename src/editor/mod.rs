//! The interactive side of the workflow editor: dragging, dialogs and the
//! session that ties them to the node store.

pub mod drag;
pub mod event;
pub mod modal;
pub mod session;

pub use drag::{CanvasRect, DragController, PointerEvent};
pub use event::{EditorEvent, EditorOutcome, ModalRequest};
pub use modal::{AuthorizationDraft, EditDraft, Modal, ModalKind, SaveDraft};
pub use session::{EditorSession, EditorSessionBuilder};

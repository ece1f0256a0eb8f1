use crate::error::DragError;
use crate::model::{NodeId, Position};
use crate::store::NodeStore;

/// Pointer coordinates in client (window) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Placement and size of the canvas in client space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn clamp(&self, position: Position) -> Position {
        Position {
            x: position.x.clamp(0.0, self.width.max(0.0)),
            y: position.y.clamp(0.0, self.height.max(0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveDrag {
    node_id: NodeId,
    offset_x: f64,
    offset_y: f64,
}

/// Tracks the node currently being repositioned by the pointer.
///
/// At most one node is dragged at a time; `Idle` is both the initial and the
/// terminal state.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
    clamp_to_canvas: bool,
}

impl DragController {
    pub fn new(clamp_to_canvas: bool) -> Self {
        Self {
            active: None,
            clamp_to_canvas,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged_node(&self) -> Option<&NodeId> {
        self.active.as_ref().map(|d| &d.node_id)
    }

    /// Records the pointer offset relative to the node's bounding box.
    pub fn start_dragging(
        &mut self,
        pointer: PointerEvent,
        node_id: &NodeId,
        canvas: &CanvasRect,
        store: &NodeStore,
    ) -> Result<(), DragError> {
        if let Some(active) = &self.active {
            tracing::warn!(active = %active.node_id, requested = %node_id, "drag rejected");
            return Err(DragError::AlreadyDragging {
                active: active.node_id.to_string(),
            });
        }
        let node = store
            .get(node_id)
            .ok_or_else(|| DragError::NodeNotFound(node_id.to_string()))?;

        let box_left = canvas.left + node.position.x;
        let box_top = canvas.top + node.position.y;
        self.active = Some(ActiveDrag {
            node_id: node_id.clone(),
            offset_x: pointer.client_x - box_left,
            offset_y: pointer.client_y - box_top,
        });
        tracing::debug!(node = %node_id, "drag started");
        Ok(())
    }

    /// Moves the dragged node under the pointer. Other nodes are untouched.
    /// Pointer events with non-finite coordinates are dropped.
    pub fn handle_mouse_move(
        &mut self,
        pointer: PointerEvent,
        canvas: &CanvasRect,
        store: &mut NodeStore,
    ) -> Option<Position> {
        let active = self.active.as_ref()?;
        let mut position = Position {
            x: pointer.client_x - canvas.left - active.offset_x,
            y: pointer.client_y - canvas.top - active.offset_y,
        };
        if !position.is_finite() {
            tracing::warn!(node = %active.node_id, "ignoring non-finite pointer position");
            return None;
        }
        if self.clamp_to_canvas {
            position = canvas.clamp(position);
        }

        if store.set_position(&active.node_id, position) {
            Some(position)
        } else {
            // The node was removed mid-drag.
            self.active = None;
            None
        }
    }

    pub fn stop_dragging(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!(node = %active.node_id, "drag stopped");
        }
    }
}

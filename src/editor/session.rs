use super::drag::{CanvasRect, DragController, PointerEvent};
use super::event::{EditorEvent, EditorOutcome, ModalRequest};
use super::modal::{AuthorizationDraft, EditDraft, Modal, ModalKind, SaveDraft};
use crate::collab::CollaborationContext;
use crate::config::EditorConfig;
use crate::error::{EditorError, ModalError};
use crate::library::WorkflowLibrary;
use crate::model::{
    Authorization, DepartmentType, ExceptionFlow, NodeId, Position, SavedWorkflow, SlaSettings,
    WorkflowNode,
};
use crate::store::NodeStore;
use crate::template::TemplateCatalog;
use crate::transfer::{self, ExportFormat, ExportedFile};
use chrono::Utc;
use std::path::Path;

/// Builds an [`EditorSession`] from optional parts.
pub struct EditorSessionBuilder {
    config: EditorConfig,
    catalog: TemplateCatalog,
    library: WorkflowLibrary,
    collaboration: Option<CollaborationContext>,
}

impl EditorSessionBuilder {
    pub fn new() -> Self {
        Self {
            config: EditorConfig::default(),
            catalog: TemplateCatalog::builtin(),
            library: WorkflowLibrary::new(),
            collaboration: None,
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_library(mut self, library: WorkflowLibrary) -> Self {
        self.library = library;
        self
    }

    /// Enables collaboration with `owner` as the only editor.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.collaboration = Some(CollaborationContext::new(owner));
        self
    }

    pub fn build(self) -> EditorSession {
        let current_user = self.collaboration.as_ref().map(|c| c.owner().to_string());
        EditorSession {
            canvas: self.config.canvas(),
            drag: DragController::new(self.config.clamp_to_canvas),
            config: self.config,
            store: NodeStore::new(),
            catalog: self.catalog,
            library: self.library,
            active_template: None,
            sla_settings: None,
            exception_flows: Vec::new(),
            authorization: None,
            collaboration: self.collaboration,
            current_user,
            edit_modal: Modal::new(ModalKind::EditNode),
            delete_node_modal: Modal::new(ModalKind::DeleteNode),
            delete_workflow_modal: Modal::new(ModalKind::DeleteWorkflow),
            cancel_modal: Modal::new(ModalKind::CancelWorkflow),
            save_modal: Modal::new(ModalKind::SaveWorkflow),
            authorization_modal: Modal::new(ModalKind::Authorization),
        }
    }
}

impl Default for EditorSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// All state of one open workflow editor.
///
/// Each browser tab or user owns its own session; nothing here is global.
/// Every mutation goes through a method on the session (or through
/// [`EditorSession::handle`]) and either fully applies or leaves the state
/// as it was.
pub struct EditorSession {
    config: EditorConfig,
    canvas: CanvasRect,
    store: NodeStore,
    drag: DragController,
    catalog: TemplateCatalog,
    library: WorkflowLibrary,
    active_template: Option<String>,
    sla_settings: Option<SlaSettings>,
    exception_flows: Vec<ExceptionFlow>,
    authorization: Option<Authorization>,
    collaboration: Option<CollaborationContext>,
    current_user: Option<String>,
    edit_modal: Modal<EditDraft>,
    delete_node_modal: Modal<NodeId>,
    delete_workflow_modal: Modal<String>,
    cancel_modal: Modal<()>,
    save_modal: Modal<SaveDraft>,
    authorization_modal: Modal<AuthorizationDraft>,
}

impl Default for EditorSession {
    fn default() -> Self {
        EditorSessionBuilder::new().build()
    }
}

impl EditorSession {
    pub fn builder() -> EditorSessionBuilder {
        EditorSessionBuilder::new()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &CanvasRect {
        &self.canvas
    }

    /// Updates where the canvas sits on screen, e.g. after a scroll or resize.
    pub fn set_canvas(&mut self, canvas: CanvasRect) {
        self.canvas = canvas;
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        self.store.nodes()
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn library(&self) -> &WorkflowLibrary {
        &self.library
    }

    pub fn active_template(&self) -> Option<&str> {
        self.active_template.as_deref()
    }

    pub fn sla_settings(&self) -> Option<&SlaSettings> {
        self.sla_settings.as_ref()
    }

    pub fn exception_flows(&self) -> &[ExceptionFlow] {
        &self.exception_flows
    }

    pub fn authorization(&self) -> Option<&Authorization> {
        self.authorization.as_ref()
    }

    pub fn collaboration(&self) -> Option<&CollaborationContext> {
        self.collaboration.as_ref()
    }

    pub fn collaboration_mut(&mut self) -> Option<&mut CollaborationContext> {
        self.collaboration.as_mut()
    }

    /// Switches the user on whose behalf actions are performed. A drag in
    /// progress ends if the new user may not edit.
    pub fn set_current_user(&mut self, name: impl Into<String>) {
        self.current_user = Some(name.into());
        if self.ensure_editable().is_err() {
            self.drag.stop_dragging();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_modal_open(&self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::EditNode => self.edit_modal.is_open(),
            ModalKind::DeleteNode => self.delete_node_modal.is_open(),
            ModalKind::DeleteWorkflow => self.delete_workflow_modal.is_open(),
            ModalKind::CancelWorkflow => self.cancel_modal.is_open(),
            ModalKind::SaveWorkflow => self.save_modal.is_open(),
            ModalKind::Authorization => self.authorization_modal.is_open(),
        }
    }

    fn ensure_editable(&self) -> Result<(), EditorError> {
        match (&self.collaboration, &self.current_user) {
            (Some(collab), Some(user)) => Ok(collab.ensure_can_edit(user)?),
            (Some(collab), None) => Ok(collab.ensure_can_edit("")?),
            (None, _) => Ok(()),
        }
    }

    // --- Nodes ---

    pub fn add_node(&mut self, node: WorkflowNode) -> Result<NodeId, EditorError> {
        self.ensure_editable()?;
        let id = node.id.clone();
        self.store.insert(node)?;
        tracing::debug!(node = %id, "node added");
        Ok(id)
    }

    /// A department type dropped onto the canvas.
    pub fn add_department_node(
        &mut self,
        department: DepartmentType,
        position: Position,
    ) -> Result<NodeId, EditorError> {
        self.add_node(WorkflowNode::for_department(department, position))
    }

    /// Adds a child below `parent`, inheriting its colour and kind.
    pub fn add_sub_node(
        &mut self,
        parent: &NodeId,
        label: impl Into<String>,
    ) -> Result<NodeId, EditorError> {
        let parent_node = self
            .store
            .get(parent)
            .ok_or_else(|| EditorError::NodeNotFound(parent.to_string()))?;
        let position = parent_node
            .position
            .offset(self.config.sub_node_offset_x, self.config.sub_node_offset_y);
        let mut node = WorkflowNode::new(label, position, parent_node.priority)
            .parent(parent.clone())
            .kind(parent_node.kind.clone());
        node.color = parent_node.color.clone();
        self.add_node(node)
    }

    // --- Dragging ---

    pub fn start_drag(&mut self, pointer: PointerEvent, node: &NodeId) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.drag
            .start_dragging(pointer, node, &self.canvas, &self.store)?;
        Ok(())
    }

    /// Returns `None` without moving anything when the current user may not edit.
    pub fn drag_to(&mut self, pointer: PointerEvent) -> Option<Position> {
        if self.ensure_editable().is_err() {
            self.drag.stop_dragging();
            return None;
        }
        self.drag
            .handle_mouse_move(pointer, &self.canvas, &mut self.store)
    }

    pub fn stop_drag(&mut self) {
        self.drag.stop_dragging();
    }

    // --- Edit node ---

    pub fn open_edit_node(&mut self, node: &NodeId) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let current = self
            .store
            .get(node)
            .ok_or_else(|| EditorError::NodeNotFound(node.to_string()))?;
        let draft = EditDraft {
            node_id: node.clone(),
            label: current.label.clone(),
            subtitle: current.subtitle.clone(),
        };
        self.edit_modal.open(draft)?;
        Ok(())
    }

    pub fn edit_draft_mut(&mut self) -> Result<&mut EditDraft, EditorError> {
        Ok(self.edit_modal.target_mut()?)
    }

    pub fn confirm_edit_node(&mut self) -> Result<NodeId, EditorError> {
        self.ensure_editable()?;
        let draft = self.edit_modal.confirm()?;
        if !self
            .store
            .update_text(&draft.node_id, draft.label, draft.subtitle)
        {
            return Err(EditorError::NodeNotFound(draft.node_id.to_string()));
        }
        tracing::debug!(node = %draft.node_id, "node edited");
        Ok(draft.node_id)
    }

    // --- Delete node ---

    pub fn request_delete_node(&mut self, node: &NodeId) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.delete_node_modal.open(node.clone())?;
        Ok(())
    }

    /// Removes the node chosen in the delete dialog. Unknown ids change nothing.
    pub fn confirm_delete_node(&mut self) -> Result<Option<WorkflowNode>, EditorError> {
        self.ensure_editable()?;
        let id = self.delete_node_modal.confirm()?;
        Ok(self.remove_node(&id))
    }

    fn remove_node(&mut self, id: &NodeId) -> Option<WorkflowNode> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            if self.drag.dragged_node() == Some(id) {
                self.drag.stop_dragging();
            }
            if self.edit_modal.target().map(|d| &d.node_id) == Some(id) {
                self.edit_modal.cancel();
            }
            tracing::debug!(node = %id, "node removed");
        }
        removed
    }

    // --- Save workflow ---

    pub fn open_save_workflow(&mut self) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let draft = SaveDraft {
            name: self
                .active_template
                .as_deref()
                .and_then(|id| self.catalog.get(id))
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            description: String::new(),
        };
        self.save_modal.open(draft)?;
        Ok(())
    }

    pub fn save_draft_mut(&mut self) -> Result<&mut SaveDraft, EditorError> {
        Ok(self.save_modal.target_mut()?)
    }

    /// Appends a snapshot of the store to the library and returns its id.
    pub fn confirm_save_workflow(&mut self) -> Result<String, EditorError> {
        self.ensure_editable()?;
        let draft = self.save_modal.confirm()?;
        let workflow = SavedWorkflow::new(draft.name, draft.description, self.store.snapshot());
        let id = workflow.id.clone();
        tracing::info!(workflow = %id, name = %workflow.name, nodes = workflow.nodes.len(), "workflow saved");
        self.library.push(workflow);
        Ok(id)
    }

    // --- Delete saved workflow ---

    pub fn request_delete_workflow(&mut self, workflow_id: &str) -> Result<(), EditorError> {
        self.ensure_editable()?;
        if self.library.get(workflow_id).is_none() {
            return Err(EditorError::WorkflowNotFound(workflow_id.to_string()));
        }
        self.delete_workflow_modal.open(workflow_id.to_string())?;
        Ok(())
    }

    pub fn confirm_delete_workflow(&mut self) -> Result<SavedWorkflow, EditorError> {
        self.ensure_editable()?;
        let id = self.delete_workflow_modal.confirm()?;
        let removed = self
            .library
            .remove(&id)
            .ok_or(EditorError::WorkflowNotFound(id))?;
        tracing::info!(workflow = %removed.id, "saved workflow deleted");
        Ok(removed)
    }

    // --- Cancel in-progress workflow ---

    pub fn request_cancel_workflow(&mut self) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.cancel_modal.open(())?;
        Ok(())
    }

    /// Discards the workflow being edited. Saved workflows are kept.
    pub fn confirm_cancel_workflow(&mut self) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.cancel_modal.confirm()?;
        self.store.clear();
        self.reset_workflow_state();
        tracing::info!("in-progress workflow cancelled");
        Ok(())
    }

    // --- Authorization ---

    pub fn open_authorization(&mut self) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let approver = self.current_user.clone().unwrap_or_default();
        self.authorization_modal
            .open(AuthorizationDraft { approver })?;
        Ok(())
    }

    pub fn authorization_draft_mut(&mut self) -> Result<&mut AuthorizationDraft, EditorError> {
        Ok(self.authorization_modal.target_mut()?)
    }

    pub fn confirm_authorization(&mut self) -> Result<&Authorization, EditorError> {
        self.ensure_editable()?;
        let draft = self.authorization_modal.confirm()?;
        tracing::info!(approver = %draft.approver, "workflow authorized");
        Ok(&*self.authorization.insert(Authorization {
            approver: draft.approver,
            authorized_at: Utc::now(),
        }))
    }

    /// Closes a dialog without acting. Returns whether it was open.
    pub fn cancel_modal(&mut self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::EditNode => self.edit_modal.cancel(),
            ModalKind::DeleteNode => self.delete_node_modal.cancel(),
            ModalKind::DeleteWorkflow => self.delete_workflow_modal.cancel(),
            ModalKind::CancelWorkflow => self.cancel_modal.cancel(),
            ModalKind::SaveWorkflow => self.save_modal.cancel(),
            ModalKind::Authorization => self.authorization_modal.cancel(),
        }
    }

    // --- Templates and saved workflows ---

    /// Replaces the store with a copy of the template's nodes and loads its
    /// SLA and exception metadata. Unknown ids leave everything unchanged and
    /// return `false`.
    pub fn select_template_by_id(&mut self, id: &str) -> Result<bool, EditorError> {
        self.ensure_editable()?;
        let Some(template) = self.catalog.get(id) else {
            tracing::debug!(template = id, "no template with this id");
            return Ok(false);
        };
        let template = template.clone();
        self.store.replace_all(template.base_nodes);
        self.reset_workflow_state();
        self.sla_settings = template.sla_settings;
        self.exception_flows = template.exception_flows;
        self.active_template = Some(template.id);
        tracing::info!(template = id, nodes = self.store.len(), "template loaded");
        Ok(true)
    }

    pub fn load_saved_workflow(&mut self, workflow_id: &str) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let workflow = self
            .library
            .get(workflow_id)
            .ok_or_else(|| EditorError::WorkflowNotFound(workflow_id.to_string()))?;
        self.store.replace_all(workflow.nodes.clone());
        self.reset_workflow_state();
        Ok(())
    }

    /// Drops everything tied to the nodes that were just replaced.
    fn reset_workflow_state(&mut self) {
        self.active_template = None;
        self.sla_settings = None;
        self.exception_flows.clear();
        self.authorization = None;
        self.drag.stop_dragging();
        self.edit_modal.cancel();
        self.delete_node_modal.cancel();
    }

    // --- Import / export ---

    pub fn export(&self, format: ExportFormat) -> Result<ExportedFile, EditorError> {
        let name = self.config.default_workflow_name.clone();
        self.export_named(format, &name)
    }

    pub fn export_named(&self, format: ExportFormat, name: &str) -> Result<ExportedFile, EditorError> {
        Ok(transfer::export_to_file(self.store.nodes(), format, name)?)
    }

    /// Replaces the store with the nodes of a workflow file. On error the
    /// store is left as it was.
    pub fn import_file(&mut self, path: &Path) -> Result<usize, EditorError> {
        self.ensure_editable()?;
        let nodes = transfer::import_from_file(path)?;
        Ok(self.apply_import(nodes))
    }

    pub fn import_str(&mut self, file_name: &str, contents: &str) -> Result<usize, EditorError> {
        self.ensure_editable()?;
        let nodes = transfer::import_from_str(file_name, contents)?;
        Ok(self.apply_import(nodes))
    }

    fn apply_import(&mut self, nodes: Vec<WorkflowNode>) -> usize {
        let count = nodes.len();
        self.store.replace_all(nodes);
        self.reset_workflow_state();
        tracing::info!(nodes = count, "workflow imported");
        count
    }

    // --- Event dispatch ---

    /// Routes a user interaction to the controller responsible for it.
    pub fn handle(&mut self, event: EditorEvent) -> Result<EditorOutcome, EditorError> {
        match event {
            EditorEvent::DropDepartment {
                department,
                position,
            } => self
                .add_department_node(department, position)
                .map(EditorOutcome::NodeAdded),
            EditorEvent::AddSubNode { parent, label } => self
                .add_sub_node(&parent, label)
                .map(EditorOutcome::NodeAdded),
            EditorEvent::PointerDown { pointer, node } => {
                self.start_drag(pointer, &node)?;
                Ok(EditorOutcome::Unchanged)
            }
            EditorEvent::PointerMove(pointer) => {
                let node = self.drag.dragged_node().cloned();
                match (node, self.drag_to(pointer)) {
                    (Some(node), Some(position)) => Ok(EditorOutcome::NodeMoved { node, position }),
                    _ => Ok(EditorOutcome::Unchanged),
                }
            }
            EditorEvent::PointerUp => {
                self.stop_drag();
                Ok(EditorOutcome::Unchanged)
            }
            EditorEvent::OpenModal(request) => {
                match request {
                    ModalRequest::EditNode(node) => self.open_edit_node(&node)?,
                    ModalRequest::DeleteNode(node) => self.request_delete_node(&node)?,
                    ModalRequest::DeleteWorkflow(id) => self.request_delete_workflow(&id)?,
                    ModalRequest::CancelWorkflow => self.request_cancel_workflow()?,
                    ModalRequest::SaveWorkflow => self.open_save_workflow()?,
                    ModalRequest::Authorization => self.open_authorization()?,
                }
                Ok(EditorOutcome::Unchanged)
            }
            EditorEvent::UpdateEditDraft { label, subtitle } => {
                let draft = self.edit_draft_mut()?;
                draft.label = label;
                draft.subtitle = subtitle;
                Ok(EditorOutcome::Unchanged)
            }
            EditorEvent::UpdateSaveDraft { name, description } => {
                let draft = self.save_draft_mut()?;
                draft.name = name;
                draft.description = description;
                Ok(EditorOutcome::Unchanged)
            }
            EditorEvent::UpdateAuthorizationDraft { approver } => {
                self.authorization_draft_mut()?.approver = approver;
                Ok(EditorOutcome::Unchanged)
            }
            EditorEvent::ConfirmModal(kind) => self.confirm_modal(kind),
            EditorEvent::CancelModal(kind) => {
                if self.cancel_modal(kind) {
                    Ok(EditorOutcome::Unchanged)
                } else {
                    Err(ModalError::NotOpen(kind).into())
                }
            }
            EditorEvent::SelectTemplate(id) => {
                if self.select_template_by_id(&id)? {
                    Ok(EditorOutcome::TemplateLoaded(id))
                } else {
                    Ok(EditorOutcome::Unchanged)
                }
            }
            EditorEvent::LoadSavedWorkflow(id) => {
                self.load_saved_workflow(&id)?;
                Ok(EditorOutcome::WorkflowLoaded(id))
            }
            EditorEvent::Import {
                file_name,
                contents,
            } => self
                .import_str(&file_name, &contents)
                .map(EditorOutcome::Imported),
        }
    }

    fn confirm_modal(&mut self, kind: ModalKind) -> Result<EditorOutcome, EditorError> {
        match kind {
            ModalKind::EditNode => self.confirm_edit_node().map(EditorOutcome::NodeUpdated),
            ModalKind::DeleteNode => self
                .confirm_delete_node()
                .map(|removed| EditorOutcome::NodeRemoved(removed.map(|n| n.id))),
            ModalKind::DeleteWorkflow => self
                .confirm_delete_workflow()
                .map(|w| EditorOutcome::WorkflowDeleted(w.id)),
            ModalKind::CancelWorkflow => self
                .confirm_cancel_workflow()
                .map(|_| EditorOutcome::WorkflowCleared),
            ModalKind::SaveWorkflow => self
                .confirm_save_workflow()
                .map(EditorOutcome::WorkflowSaved),
            ModalKind::Authorization => self
                .confirm_authorization()
                .map(|a| EditorOutcome::Authorized(a.approver.clone())),
        }
    }
}

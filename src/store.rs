use crate::error::EditorError;
use crate::model::{NodeId, Position, WorkflowNode};

/// Ordered in-memory collection of the nodes on the canvas.
///
/// Nodes keep their insertion order, which is also the render and export
/// order. Ids are unique within a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStore {
    nodes: Vec<WorkflowNode>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes.iter()
    }

    /// Owned copy of the current content.
    pub fn snapshot(&self) -> Vec<WorkflowNode> {
        self.nodes.clone()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn get(&self, id: &NodeId) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// Appends a node, refusing ids already in use.
    pub fn insert(&mut self, node: WorkflowNode) -> Result<(), EditorError> {
        if self.contains(&node.id) {
            return Err(EditorError::DuplicateNode(node.id.to_string()));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Moves a single node. Returns `false` if the id is unknown.
    pub fn set_position(&mut self, id: &NodeId, position: Position) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    pub fn update_text(&mut self, id: &NodeId, label: String, subtitle: Option<String>) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.label = label;
                node.subtitle = subtitle;
                true
            }
            None => false,
        }
    }

    /// Removes exactly the node with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: &NodeId) -> Option<WorkflowNode> {
        self.position_of(id).map(|idx| self.nodes.remove(idx))
    }

    pub fn replace_all(&mut self, nodes: Vec<WorkflowNode>) {
        self.nodes = nodes;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn children_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a WorkflowNode> {
        self.nodes
            .iter()
            .filter(move |n| n.parent_id.as_ref() == Some(id))
    }

    fn position_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| &n.id == id)
    }
}

impl From<Vec<WorkflowNode>> for NodeStore {
    fn from(nodes: Vec<WorkflowNode>) -> Self {
        Self { nodes }
    }
}

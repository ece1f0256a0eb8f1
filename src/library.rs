use crate::error::LibraryError;
use crate::model::SavedWorkflow;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The user's saved workflows, in save order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WorkflowLibrary {
    workflows: Vec<SavedWorkflow>,
}

impl WorkflowLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflows(&self) -> &[SavedWorkflow] {
        &self.workflows
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavedWorkflow> {
        self.workflows.iter().find(|w| w.id == id)
    }

    pub fn push(&mut self, workflow: SavedWorkflow) {
        self.workflows.push(workflow);
    }

    pub fn remove(&mut self, id: &str) -> Option<SavedWorkflow> {
        let idx = self.workflows.iter().position(|w| w.id == id)?;
        Some(self.workflows.remove(idx))
    }

    /// Writes the library to `path` in bincode format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let path = path.as_ref();
        let bytes =
            encode_to_vec(self, standard()).map_err(|e| LibraryError::Encode(e.to_string()))?;
        fs::write(path, bytes).map_err(|e| io_error(path, e))?;
        tracing::debug!(path = %path.display(), workflows = self.workflows.len(), "library saved");
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LibraryError> {
        let (library, _) = decode_from_slice(bytes, standard())
            .map_err(|e| LibraryError::Decode(e.to_string()))?;
        Ok(library)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> LibraryError {
    LibraryError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

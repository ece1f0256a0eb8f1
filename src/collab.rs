use crate::error::CollaborationError;

/// Collaborators invited to a session.
///
/// Editing is single-writer: collaborators who join with the invite code can
/// follow the workflow, but only the owner may change it. There is no merging
/// of concurrent edits.
#[derive(Debug, Clone, PartialEq)]
pub struct CollaborationContext {
    invite_code: String,
    owner: String,
    collaborators: Vec<String>,
}

impl CollaborationContext {
    pub fn new(owner: impl Into<String>) -> Self {
        let code = uuid::Uuid::new_v4().simple().to_string();
        Self {
            invite_code: code[..8].to_ascii_uppercase(),
            owner: owner.into(),
            collaborators: Vec::new(),
        }
    }

    pub fn invite_code(&self) -> &str {
        &self.invite_code
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn collaborators(&self) -> &[String] {
        &self.collaborators
    }

    /// Adds `name` to the collaborator list. Joining twice is harmless.
    pub fn join(&mut self, invite_code: &str, name: &str) -> Result<(), CollaborationError> {
        if !invite_code.trim().eq_ignore_ascii_case(&self.invite_code) {
            return Err(CollaborationError::InvalidInviteCode(
                invite_code.to_string(),
            ));
        }
        if name != self.owner && !self.collaborators.iter().any(|c| c == name) {
            self.collaborators.push(name.to_string());
            tracing::info!(collaborator = name, "collaborator joined");
        }
        Ok(())
    }

    pub fn leave(&mut self, name: &str) -> bool {
        let before = self.collaborators.len();
        self.collaborators.retain(|c| c != name);
        before != self.collaborators.len()
    }

    pub fn ensure_can_edit(&self, name: &str) -> Result<(), CollaborationError> {
        if name == self.owner {
            Ok(())
        } else {
            Err(CollaborationError::ReadOnly(name.to_string()))
        }
    }
}

use crate::store;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// The recommendation a user is currently working on.
///
/// Loaded once at startup and saved explicitly after a command changes it;
/// nothing reads the file behind the caller's back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub rec_id: Option<Uuid>,
    pub user_hash: Option<String>,
}

impl SessionContext {
    /// Reads the session file. A missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        store::load_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        store::save(path, self)
    }

    /// Starts tracking a new recommendation, dropping whatever was tracked before.
    pub fn begin(&mut self, rec_id: Uuid, user_hash: Option<String>) {
        self.rec_id = Some(rec_id);
        self.user_hash = user_hash;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.rec_id.is_some()
    }
}

//! In-memory credential storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::auth::{CredentialField, CredentialStore};
use crate::error::Result;

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<CredentialField, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    fn get(&self, field: CredentialField) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&field).cloned()
    }

    async fn set(&self, field: CredentialField, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(field, value.to_string());
        Ok(())
    }

    async fn remove(&self, field: CredentialField) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&field);
        Ok(())
    }
}
